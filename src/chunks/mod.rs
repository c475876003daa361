//! Chunk graph input types
//!
//! The host bundler hands over its already-optimized chunk graph in this
//! shape: a flat list of chunks with their output files, and the chunk
//! groups that tie them together.

mod index;

use std::fmt;

use serde::{Deserialize, Serialize};

pub use index::{ChunkIndex, ChunkRecord};

/// Opaque chunk identifier, either a string or a number
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ChunkId {
    Number(u64),
    Name(String),
}

impl fmt::Display for ChunkId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChunkId::Number(n) => write!(f, "{}", n),
            ChunkId::Name(s) => f.write_str(s),
        }
    }
}

impl From<u64> for ChunkId {
    fn from(id: u64) -> Self {
        ChunkId::Number(id)
    }
}

impl From<&str> for ChunkId {
    fn from(id: &str) -> Self {
        ChunkId::Name(id.to_string())
    }
}

impl From<String> for ChunkId {
    fn from(id: String) -> Self {
        ChunkId::Name(id)
    }
}

/// A chunk emitted by the bundler
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Chunk {
    /// Chunk identifier
    pub id: ChunkId,

    /// Chunk name, set for entry and explicitly named chunks
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Output files in emission order
    #[serde(default)]
    pub files: Vec<String>,
}

impl Chunk {
    /// Create an unnamed chunk
    pub fn new(id: impl Into<ChunkId>, files: &[&str]) -> Self {
        Self {
            id: id.into(),
            name: None,
            files: files.iter().map(|f| f.to_string()).collect(),
        }
    }

    /// Create a named chunk
    pub fn named(id: impl Into<ChunkId>, name: &str, files: &[&str]) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::new(id, files)
        }
    }
}

/// A set of chunks loaded together (an entrypoint or an async split point)
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChunkGroup {
    /// Group name
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// Member chunk IDs
    #[serde(default)]
    pub chunks: Vec<ChunkId>,
}

impl ChunkGroup {
    pub fn new(name: Option<&str>, chunks: Vec<ChunkId>) -> Self {
        Self {
            name: name.map(str::to_string),
            chunks,
        }
    }
}

/// The chunk graph of one compilation
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ChunkGraph {
    /// All chunks
    #[serde(default)]
    pub chunks: Vec<Chunk>,

    /// All chunk groups
    #[serde(default)]
    pub groups: Vec<ChunkGroup>,
}

impl ChunkGraph {
    /// Create an empty chunk graph
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a chunk graph from its JSON form
    pub fn from_json(json: &str) -> serde_json::Result<Self> {
        serde_json::from_str(json)
    }

    /// Add a chunk
    pub fn add_chunk(&mut self, chunk: Chunk) -> &mut Self {
        self.chunks.push(chunk);
        self
    }

    /// Add a chunk group
    pub fn add_group(&mut self, group: ChunkGroup) -> &mut Self {
        self.groups.push(group);
        self
    }

    /// Number of chunks
    pub fn len(&self) -> usize {
        self.chunks.len()
    }

    /// Check if the graph has no chunks
    pub fn is_empty(&self) -> bool {
        self.chunks.is_empty()
    }
}
