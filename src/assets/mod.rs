//! Asset tag descriptors
//!
//! Classifies output files by extension and describes the `<link>` and
//! `<script>` tags that reference them.

mod resolver;

use std::fmt;

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::utils::{escape_attribute, strip_query};

pub use resolver::{file_url, resolve, ResolveOptions};

static CSS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.css$").unwrap());

static JS_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\.js$").unwrap());

/// Kind of asset a file is emitted as
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AssetKind {
    Stylesheet,
    Script,
}

impl AssetKind {
    /// Classify a file by extension, ignoring any query string or fragment
    pub fn classify(file: &str, policy: ClassificationPolicy) -> Option<Self> {
        let path = strip_query(file);

        if CSS_REGEX.is_match(path) {
            Some(AssetKind::Stylesheet)
        } else if JS_REGEX.is_match(path) {
            Some(AssetKind::Script)
        } else {
            match policy {
                ClassificationPolicy::Strict => None,
                ClassificationPolicy::ScriptFallback => Some(AssetKind::Script),
            }
        }
    }
}

/// How files that are neither `.css` nor `.js` are treated
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ClassificationPolicy {
    /// Drop them
    #[default]
    Strict,
    /// Emit them as scripts
    ScriptFallback,
}

/// A `<link>` or `<script>` tag referencing one output file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetTag {
    pub kind: AssetKind,
    pub url: String,
    pub self_closing: bool,
}

impl AssetTag {
    /// `<link rel="stylesheet" href="...">`
    pub fn stylesheet(url: String) -> Self {
        Self {
            kind: AssetKind::Stylesheet,
            url,
            self_closing: true,
        }
    }

    /// `<script src="..."></script>`
    pub fn script(url: String) -> Self {
        Self {
            kind: AssetKind::Script,
            url,
            self_closing: false,
        }
    }

    /// HTML element name
    pub fn tag_name(&self) -> &'static str {
        match self.kind {
            AssetKind::Stylesheet => "link",
            AssetKind::Script => "script",
        }
    }

    /// Attributes in emission order
    pub fn attributes(&self) -> Vec<(&'static str, &str)> {
        match self.kind {
            AssetKind::Stylesheet => vec![("rel", "stylesheet"), ("href", &self.url)],
            AssetKind::Script => vec![("src", &self.url)],
        }
    }

    /// Render the tag as HTML
    pub fn to_html(&self) -> String {
        let mut html = format!("<{}", self.tag_name());

        for (name, value) in self.attributes() {
            html.push_str(&format!(" {}=\"{}\"", name, escape_attribute(value)));
        }

        if self.self_closing {
            html.push('>');
        } else {
            html.push_str(&format!("></{}>", self.tag_name()));
        }

        html
    }
}

impl fmt::Display for AssetTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_html())
    }
}

/// Tags resolved for one entry, split by kind
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ResolvedAssets<M> {
    /// Stylesheet tags in file order
    pub styles: Vec<AssetTag>,

    /// Script tags in file order
    pub scripts: Vec<AssetTag>,

    /// Caller metadata, forwarded as-is
    pub meta: M,
}

impl<M> ResolvedAssets<M> {
    /// All tags, styles before scripts
    pub fn tags(&self) -> impl Iterator<Item = &AssetTag> {
        self.styles.iter().chain(self.scripts.iter())
    }
}
