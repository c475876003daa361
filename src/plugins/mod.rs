//! Plugin system for HTML generation
//!
//! Binds the chunk index and asset resolver to the host bundler's build
//! lifecycle: a compilation starts, its chunk graph becomes ready, and then
//! each generated HTML document asks for its asset tags.

mod include_chunks;

use std::sync::Arc;

use anyhow::Result;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::assets::{ClassificationPolicy, ResolvedAssets};
use crate::chunks::ChunkGraph;
use crate::config::PluginConfig;
use crate::error::Error;

pub use include_chunks::{IncludeChunksPlugin, PLUGIN_NAME};

/// Plugin hook context
#[derive(Debug, Clone, Default)]
pub struct PluginContext {
    /// Compilations started so far, including the current one
    pub compilation: u64,
}

/// Asset tags of a document: opaque meta tags plus styles and scripts
pub type AssetTagGroups = ResolvedAssets<serde_json::Value>;

/// Per-document request handed to `alter_asset_tags`, returned altered
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AlterAssetTagsData {
    /// Output file name of the HTML document
    pub output_name: String,

    /// Name of the entry chunk whose assets the document includes
    #[serde(default)]
    pub entry_key: Option<toml::Value>,

    /// Whether to append the compilation hash to asset URLs
    #[serde(default)]
    pub hash: bool,

    /// Hash of the current compilation
    #[serde(default)]
    pub compilation_hash: Option<String>,

    /// Public path prefix for asset URLs
    #[serde(default)]
    pub public_path: String,

    /// Treatment of files that are neither `.css` nor `.js`
    #[serde(default)]
    pub classification: ClassificationPolicy,

    /// Tags computed so far
    #[serde(default)]
    pub asset_tags: AssetTagGroups,
}

/// Plugin trait - implement this to hook into HTML generation
#[async_trait]
pub trait Plugin: Send + Sync {
    /// Plugin name for logging and debugging
    fn name(&self) -> &str;

    /// Called when a compilation starts, including watch-mode rebuilds
    async fn compilation_start(&self, _ctx: &PluginContext) -> Result<()> {
        Ok(())
    }

    /// Called once chunks have been optimized
    async fn chunk_graph_ready(&self, _graph: &ChunkGraph, _ctx: &PluginContext) -> Result<()> {
        Ok(())
    }

    /// Alter the asset tags of one HTML document
    async fn alter_asset_tags(
        &self,
        data: AlterAssetTagsData,
        _ctx: &PluginContext,
    ) -> Result<AlterAssetTagsData> {
        Ok(data)
    }
}

/// Create a plugin from its configuration entry
pub fn create_plugin(config: &PluginConfig) -> Result<Arc<dyn Plugin>> {
    match config.name.as_str() {
        PLUGIN_NAME => Ok(Arc::new(IncludeChunksPlugin::from_config(config)?)),
        other => Err(Error::UnknownPlugin(other.to_string()).into()),
    }
}

/// Plugin manager
#[derive(Default)]
pub struct PluginManager {
    plugins: Vec<Arc<dyn Plugin>>,
    context: PluginContext,
}

impl PluginManager {
    /// Create a new plugin manager
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a plugin
    pub fn register(&mut self, plugin: Arc<dyn Plugin>) {
        debug!("Registered plugin {}", plugin.name());
        self.plugins.push(plugin);
    }

    /// Number of registered plugins
    pub fn len(&self) -> usize {
        self.plugins.len()
    }

    /// Check if no plugins are registered
    pub fn is_empty(&self) -> bool {
        self.plugins.is_empty()
    }

    /// Start a new compilation and run compilation_start hooks
    pub async fn start_compilation(&mut self) -> Result<()> {
        self.context.compilation += 1;
        info!("Starting compilation #{}", self.context.compilation);

        for plugin in &self.plugins {
            plugin.compilation_start(&self.context).await?;
        }
        Ok(())
    }

    /// Run chunk_graph_ready hooks
    pub async fn chunk_graph_ready(&self, graph: &ChunkGraph) -> Result<()> {
        info!(
            "Chunk graph ready: {} chunk(s), {} group(s)",
            graph.chunks.len(),
            graph.groups.len()
        );

        for plugin in &self.plugins {
            plugin.chunk_graph_ready(graph, &self.context).await?;
        }
        Ok(())
    }

    /// Run alter_asset_tags hooks, threading the data through each plugin
    pub async fn alter_asset_tags(&self, data: AlterAssetTagsData) -> Result<AlterAssetTagsData> {
        let mut current = data;

        for plugin in &self.plugins {
            current = plugin.alter_asset_tags(current, &self.context).await?;
        }

        Ok(current)
    }
}
