//! Configuration handling
//!
//! Parses `include-chunks.toml`, which describes the pages to generate and
//! the plugins to run for them.

mod schema;

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::plugins::{create_plugin, AlterAssetTagsData, PluginManager};

pub use schema::*;

/// Main configuration structure
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Output configuration
    #[serde(default)]
    pub output: OutputConfig,

    /// HTML pages to generate
    #[serde(default)]
    pub pages: Vec<PageConfig>,

    /// Plugin configuration
    #[serde(default)]
    pub plugins: Vec<PluginConfig>,
}

impl Config {
    /// Load configuration from a file path
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::parse(&content)
            .with_context(|| format!("Failed to load config file: {}", path.display()))
    }

    /// Parse configuration from TOML source
    pub fn parse(content: &str) -> Result<Self> {
        let config: Config = toml::from_str(content).context("Failed to parse TOML")?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration
    fn validate(&self) -> Result<()> {
        let mut filenames = HashSet::new();
        for page in &self.pages {
            if !filenames.insert(page.filename.as_str()) {
                anyhow::bail!("Page '{}' is configured more than once", page.filename);
            }
        }

        if self.plugins.iter().any(|p| p.name.trim().is_empty()) {
            anyhow::bail!("Plugin entries must have a name");
        }

        Ok(())
    }

    /// Get a page by output file name
    pub fn page(&self, filename: &str) -> Option<&PageConfig> {
        self.pages.iter().find(|p| p.filename == filename)
    }

    /// Build the per-document request for a page
    pub fn page_request(
        &self,
        page: &PageConfig,
        compilation_hash: Option<&str>,
        meta: serde_json::Value,
    ) -> AlterAssetTagsData {
        let mut data = AlterAssetTagsData {
            output_name: page.filename.clone(),
            entry_key: page.entry_key.clone(),
            hash: page.hash.unwrap_or(self.output.hash),
            compilation_hash: compilation_hash.map(str::to_string),
            public_path: self.output.public_url.clone(),
            classification: page.classification.unwrap_or(self.output.classification),
            ..AlterAssetTagsData::default()
        };
        data.asset_tags.meta = meta;
        data
    }

    /// Create and register every configured plugin
    pub fn build_plugins(&self) -> Result<PluginManager> {
        let mut manager = PluginManager::new();

        for plugin in &self.plugins {
            let created = create_plugin(plugin)
                .with_context(|| format!("Failed to load plugin '{}'", plugin.name))?;
            manager.register(created);
        }

        Ok(manager)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::ClassificationPolicy;
    use crate::error::Error;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    const CONFIG: &str = r#"
[output]
public_url = "/static/"
hash = true

[[pages]]
filename = "index.html"
entry_key = "main"

[[pages]]
filename = "admin.html"
entry_key = "admin"
hash = false
classification = "script-fallback"

[[plugins]]
name = "include-chunks"
"#;

    #[test]
    fn test_parse_config() {
        let config = Config::parse(CONFIG).unwrap();

        assert_eq!(config.output.public_url, "/static/");
        assert!(config.output.hash);
        assert_eq!(config.pages.len(), 2);
        assert_eq!(
            config.page("admin.html").unwrap().classification,
            Some(ClassificationPolicy::ScriptFallback)
        );
        assert_eq!(config.plugins[0].name, "include-chunks");
        assert!(config.plugins[0].options.is_none());
    }

    #[test]
    fn test_defaults() {
        let config = Config::parse("[[pages]]\n").unwrap();

        assert_eq!(config.output, OutputConfig::default());
        assert_eq!(config.pages[0].filename, "index.html");
        assert!(config.pages[0].entry_key.is_none());
        assert!(config.plugins.is_empty());
    }

    #[test]
    fn test_page_request() {
        let config = Config::parse(CONFIG).unwrap();
        let meta = json!([{ "tagName": "meta" }]);

        let index = config.page_request(config.page("index.html").unwrap(), Some("abc"), meta.clone());
        assert_eq!(index.output_name, "index.html");
        assert_eq!(index.entry_key, Some(toml::Value::from("main")));
        assert!(index.hash);
        assert_eq!(index.compilation_hash.as_deref(), Some("abc"));
        assert_eq!(index.public_path, "/static/");
        assert_eq!(index.classification, ClassificationPolicy::Strict);
        assert_eq!(index.asset_tags.meta, meta);

        let admin = config.page_request(config.page("admin.html").unwrap(), None, json!(null));
        assert!(!admin.hash);
        assert_eq!(admin.classification, ClassificationPolicy::ScriptFallback);
    }

    #[test]
    fn test_non_string_entry_key_is_accepted_at_load() {
        let config = Config::parse("[[pages]]\nentry_key = 42\n").unwrap();

        assert_eq!(config.pages[0].entry_key, Some(toml::Value::Integer(42)));
    }

    #[test]
    fn test_duplicate_pages_rejected() {
        let err = Config::parse("[[pages]]\nentry_key = \"a\"\n[[pages]]\nentry_key = \"b\"\n")
            .unwrap_err();

        assert!(err.to_string().contains("index.html"));
    }

    #[test]
    fn test_build_plugins() {
        let manager = Config::parse(CONFIG).unwrap().build_plugins().unwrap();
        assert_eq!(manager.len(), 1);
    }

    #[test]
    fn test_plugin_options_fail_fast() {
        let config = Config::parse(
            "[[plugins]]\nname = \"include-chunks\"\noptions = { entry = \"main\" }\n",
        )
        .unwrap();

        let err = config.build_plugins().err().unwrap();

        assert_eq!(
            err.downcast_ref::<Error>(),
            Some(&Error::Configuration {
                plugin: "include-chunks".to_string()
            })
        );
    }

    #[test]
    fn test_load_from_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("include-chunks.toml");
        fs::write(&path, CONFIG).unwrap();

        let config = Config::load(&path).unwrap();
        assert_eq!(config.pages.len(), 2);

        let missing = Config::load(dir.path().join("missing.toml")).unwrap_err();
        assert!(missing.to_string().contains("Failed to read config file"));
    }
}
