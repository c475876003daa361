//! Entry asset resolution
//!
//! Collects the files of an entry chunk and its siblings, deduplicates them
//! and turns them into tag descriptors.

use indexmap::IndexSet;
use tracing::{debug, warn};

use super::{AssetKind, AssetTag, ClassificationPolicy, ResolvedAssets};
use crate::chunks::ChunkIndex;
use crate::error::{Error, Result};
use crate::utils::query_separator;

/// Per-document resolution settings
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolveOptions {
    /// Prefix prepended to every file name
    pub public_path: String,

    /// Cache-busting token appended as a query parameter
    pub hash: Option<String>,

    /// Treatment of files that are neither stylesheets nor scripts
    pub policy: ClassificationPolicy,
}

impl ResolveOptions {
    pub fn new(public_path: impl Into<String>) -> Self {
        Self {
            public_path: public_path.into(),
            ..Self::default()
        }
    }

    pub fn with_hash(mut self, hash: impl Into<String>) -> Self {
        self.hash = Some(hash.into());
        self
    }

    pub fn with_policy(mut self, policy: ClassificationPolicy) -> Self {
        self.policy = policy;
        self
    }
}

/// Build the URL for an output file
pub fn file_url(file: &str, public_path: &str, hash: Option<&str>) -> String {
    let mut url = format!("{}{}", public_path, file);

    if let Some(hash) = hash.filter(|h| !h.is_empty()) {
        url.push(query_separator(file));
        url.push_str(hash);
    }

    url
}

/// Resolve the asset tags for a named entry
pub fn resolve<M>(
    index: &ChunkIndex,
    entry: &str,
    options: &ResolveOptions,
    meta: M,
) -> Result<ResolvedAssets<M>> {
    let chunk = index.get_by_name(entry).ok_or_else(|| Error::EntryNotFound {
        name: entry.to_string(),
    })?;

    // Siblings first, then the entry's own files; first occurrence wins
    let mut files: IndexSet<&str> = IndexSet::new();

    for sibling_id in &chunk.siblings {
        let Some(sibling) = index.get(sibling_id) else {
            warn!("Chunk {} lists unknown sibling {}", chunk.id, sibling_id);
            continue;
        };
        files.extend(sibling.files.iter().map(String::as_str));
    }
    files.extend(chunk.files.iter().map(String::as_str));

    let hash = options.hash.as_deref();
    let mut styles = Vec::new();
    let mut scripts = Vec::new();

    for file in files {
        let url = || file_url(file, &options.public_path, hash);

        match AssetKind::classify(file, options.policy) {
            Some(AssetKind::Stylesheet) => styles.push(AssetTag::stylesheet(url())),
            Some(AssetKind::Script) => scripts.push(AssetTag::script(url())),
            None => debug!("Skipping unclassified file {}", file),
        }
    }

    debug!(
        "Resolved entry '{}': {} style(s), {} script(s)",
        entry,
        styles.len(),
        scripts.len()
    );

    Ok(ResolvedAssets {
        styles,
        scripts,
        meta,
    })
}
