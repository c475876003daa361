//! Includes an entry's chunk-group files in its HTML document

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::{debug, warn};

use super::{AlterAssetTagsData, Plugin, PluginContext};
use crate::assets::{resolve, ResolveOptions};
use crate::chunks::{ChunkGraph, ChunkIndex};
use crate::config::PluginConfig;
use crate::error::Error;

/// Name the plugin is registered under
pub const PLUGIN_NAME: &str = "include-chunks";

/// Adds `<link>`/`<script>` tags for every file of the entry chunk and its
/// siblings to the document configured with that entry.
#[derive(Debug, Default)]
pub struct IncludeChunksPlugin {
    /// Snapshot for the current compilation, `None` until its graph is ready
    index: RwLock<Option<Arc<ChunkIndex>>>,
}

impl IncludeChunksPlugin {
    /// Create the plugin
    pub fn new() -> Self {
        Self::default()
    }

    /// Create the plugin from configuration, which must not carry options
    pub fn from_config(config: &PluginConfig) -> crate::error::Result<Self> {
        if config.options.is_some() {
            return Err(Error::Configuration {
                plugin: PLUGIN_NAME.to_string(),
            });
        }
        Ok(Self::new())
    }

    /// Drop the previous compilation's index
    pub fn reset(&self) {
        *self.index.write() = None;
    }

    /// Index a compilation's chunk graph, replacing any previous snapshot
    pub fn on_graph_ready(&self, graph: &ChunkGraph) {
        let index = ChunkIndex::build(graph);
        debug!("{}: indexed {} chunk(s)", PLUGIN_NAME, index.len());

        *self.index.write() = Some(Arc::new(index));
    }

    /// Current snapshot, if the graph has been indexed
    pub fn snapshot(&self) -> Option<Arc<ChunkIndex>> {
        self.index.read().clone()
    }

    /// Replace a document's styles and scripts with its entry's assets
    pub fn on_document_requested(
        &self,
        data: AlterAssetTagsData,
    ) -> crate::error::Result<AlterAssetTagsData> {
        let entry = match &data.entry_key {
            None => None,
            Some(toml::Value::String(key)) if key.is_empty() => None,
            Some(toml::Value::String(key)) => Some(key.clone()),
            Some(other) => {
                return Err(Error::InvalidEntryKey {
                    found: other.type_str().to_string(),
                })
            }
        };

        let Some(entry) = entry else {
            warn!(
                "No entry_key set for {}, skipping {} processing",
                data.output_name, PLUGIN_NAME
            );
            return Ok(data);
        };

        let index = self.snapshot().ok_or(Error::IndexNotBuilt)?;

        let options = ResolveOptions {
            public_path: data.public_path.clone(),
            hash: data.compilation_hash.clone().filter(|_| data.hash),
            policy: data.classification,
        };

        let mut data = data;
        let meta = std::mem::take(&mut data.asset_tags.meta);
        data.asset_tags = resolve(&index, &entry, &options, meta)?;

        Ok(data)
    }
}

#[async_trait]
impl Plugin for IncludeChunksPlugin {
    fn name(&self) -> &str {
        PLUGIN_NAME
    }

    async fn compilation_start(&self, _ctx: &PluginContext) -> Result<()> {
        self.reset();
        Ok(())
    }

    async fn chunk_graph_ready(&self, graph: &ChunkGraph, _ctx: &PluginContext) -> Result<()> {
        self.on_graph_ready(graph);
        Ok(())
    }

    async fn alter_asset_tags(
        &self,
        data: AlterAssetTagsData,
        _ctx: &PluginContext,
    ) -> Result<AlterAssetTagsData> {
        Ok(self.on_document_requested(data)?)
    }
}
