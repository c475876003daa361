//! include-chunks library
//!
//! Resolves every output file that an entry point and its sibling chunks
//! produce, and turns them into ordered `<link>`/`<script>` tag descriptors
//! for the HTML document generated for that entry.
//!
//! The host bundler drives it in two phases per compilation:
//! - once chunks are optimized, the chunk graph is indexed
//!   ([`IncludeChunksPlugin::on_graph_ready`])
//! - for every HTML document, the entry's tags are resolved
//!   ([`IncludeChunksPlugin::on_document_requested`])

pub mod assets;
pub mod chunks;
pub mod config;
pub mod error;
pub mod plugins;
pub mod utils;

pub use assets::{resolve, AssetKind, AssetTag, ClassificationPolicy, ResolveOptions, ResolvedAssets};
pub use chunks::{Chunk, ChunkGraph, ChunkGroup, ChunkId, ChunkIndex, ChunkRecord};
pub use config::Config;
pub use error::{Error, Result};
pub use plugins::{AlterAssetTagsData, IncludeChunksPlugin, Plugin, PluginManager};
