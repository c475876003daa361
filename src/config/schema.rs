//! Configuration schema definitions

use serde::{Deserialize, Serialize};

use crate::assets::ClassificationPolicy;

/// Output configuration shared by every page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// Public URL prefix for assets
    #[serde(default)]
    pub public_url: String,

    /// Append the compilation hash to asset URLs
    #[serde(default)]
    pub hash: bool,

    /// Treatment of files that are neither `.css` nor `.js`
    #[serde(default)]
    pub classification: ClassificationPolicy,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            public_url: String::new(),
            hash: false,
            classification: ClassificationPolicy::Strict,
        }
    }
}

/// An HTML document generated for one entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageConfig {
    /// Output file name
    #[serde(default = "default_filename")]
    pub filename: String,

    /// Name of the entry chunk to include. Kept as a raw value so a
    /// non-string key is reported when the page is generated.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_key: Option<toml::Value>,

    /// Overrides `output.hash`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hash: Option<bool>,

    /// Overrides `output.classification`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classification: Option<ClassificationPolicy>,
}

fn default_filename() -> String {
    "index.html".to_string()
}

/// Plugin configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PluginConfig {
    /// Plugin name/identifier
    pub name: String,

    /// Plugin-specific options
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub options: Option<toml::Table>,
}
