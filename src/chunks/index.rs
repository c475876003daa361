//! Chunk index built once per compilation
//!
//! Flattens the chunk-group graph into lookup tables by chunk ID and by
//! chunk name, precomputing each chunk's siblings: every other chunk that
//! shares at least one chunk group with it.

use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use indexmap::{IndexMap, IndexSet};
use tracing::{debug, warn};

use super::{Chunk, ChunkGraph, ChunkId};

/// A chunk together with its precomputed siblings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChunkRecord {
    /// Chunk identifier
    pub id: ChunkId,

    /// Chunk name, if any
    pub name: Option<String>,

    /// Output files in emission order
    pub files: Vec<String>,

    /// Co-members of any group containing this chunk, in discovery order.
    /// Never contains `id`.
    pub siblings: IndexSet<ChunkId>,
}

/// Immutable snapshot of one compilation's chunks
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ChunkIndex {
    by_id: HashMap<ChunkId, Arc<ChunkRecord>>,

    /// Shares records with `by_id`
    by_name: HashMap<String, Arc<ChunkRecord>>,
}

impl ChunkIndex {
    /// Build an index from a compilation's chunk graph
    pub fn build(graph: &ChunkGraph) -> Self {
        // Last definition of a repeated chunk ID wins, keeping its first position
        let mut chunks: IndexMap<&ChunkId, &Chunk> = IndexMap::with_capacity(graph.chunks.len());
        for chunk in &graph.chunks {
            chunks.insert(&chunk.id, chunk);
        }

        let mut siblings: HashMap<&ChunkId, IndexSet<ChunkId>> = HashMap::new();
        let mut unknown: HashSet<&ChunkId> = HashSet::new();

        for group in &graph.groups {
            let members: Vec<&ChunkId> = group
                .chunks
                .iter()
                .filter(|&id| {
                    let known = chunks.contains_key(id);
                    if !known && unknown.insert(id) {
                        warn!(
                            "Chunk group {} references unknown chunk {}",
                            group.name.as_deref().unwrap_or("<unnamed>"),
                            id
                        );
                    }
                    known
                })
                .collect();

            for &member in &members {
                let set = siblings.entry(member).or_default();
                for &other in &members {
                    if other != member {
                        set.insert(other.clone());
                    }
                }
            }
        }

        let mut index = Self::default();

        for (&id, chunk) in &chunks {
            let record = Arc::new(ChunkRecord {
                id: id.clone(),
                name: chunk.name.clone(),
                files: chunk.files.clone(),
                siblings: siblings.remove(id).unwrap_or_default(),
            });

            if let Some(name) = record.name.as_deref().filter(|n| !n.is_empty()) {
                if let Some(previous) = index.by_name.insert(name.to_string(), record.clone()) {
                    warn!(
                        "Chunk name '{}' is used by both {} and {}; keeping {}",
                        name, previous.id, record.id, record.id
                    );
                }
            }

            index.by_id.insert(id.clone(), record);
        }

        debug!(
            "Indexed {} chunk(s), {} by name",
            index.by_id.len(),
            index.by_name.len()
        );

        index
    }

    /// Look up a chunk by ID
    pub fn get(&self, id: &ChunkId) -> Option<&Arc<ChunkRecord>> {
        self.by_id.get(id)
    }

    /// Look up a chunk by name
    pub fn get_by_name(&self, name: &str) -> Option<&Arc<ChunkRecord>> {
        self.by_name.get(name)
    }

    /// Names of all named chunks
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.by_name.keys().map(String::as_str)
    }

    /// Number of indexed chunks
    pub fn len(&self) -> usize {
        self.by_id.len()
    }

    /// Check if the index holds no chunks
    pub fn is_empty(&self) -> bool {
        self.by_id.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::chunks::{Chunk, ChunkGroup};

    fn ids(items: &[u64]) -> Vec<ChunkId> {
        items.iter().map(|&i| ChunkId::from(i)).collect()
    }

    fn sibling_ids(record: &ChunkRecord) -> Vec<ChunkId> {
        record.siblings.iter().cloned().collect()
    }

    #[test]
    fn test_siblings_union_across_groups() {
        // Chunk 0 is shared by two groups whose other members don't overlap
        let mut graph = ChunkGraph::new();
        graph
            .add_chunk(Chunk::named(0u64, "shared", &["shared.js"]))
            .add_chunk(Chunk::named(1u64, "admin", &["admin.js"]))
            .add_chunk(Chunk::named(2u64, "shop", &["shop.js"]))
            .add_group(ChunkGroup::new(Some("admin"), ids(&[0, 1])))
            .add_group(ChunkGroup::new(Some("shop"), ids(&[0, 2])));

        let index = ChunkIndex::build(&graph);

        assert_eq!(sibling_ids(index.get(&0u64.into()).unwrap()), ids(&[1, 2]));
        assert_eq!(sibling_ids(index.get(&1u64.into()).unwrap()), ids(&[0]));
        assert_eq!(sibling_ids(index.get(&2u64.into()).unwrap()), ids(&[0]));
    }

    #[test]
    fn test_siblings_exclude_self() {
        let mut graph = ChunkGraph::new();
        graph
            .add_chunk(Chunk::named(0u64, "main", &["main.js"]))
            .add_chunk(Chunk::new(1u64, &["vendor.js"]))
            .add_group(ChunkGroup::new(Some("main"), ids(&[0, 1, 0])));

        let index = ChunkIndex::build(&graph);
        let main = index.get_by_name("main").unwrap();

        assert!(!main.siblings.contains(&main.id));
        assert_eq!(sibling_ids(main), ids(&[1]));
    }

    #[test]
    fn test_chunk_without_group_has_no_siblings() {
        let mut graph = ChunkGraph::new();
        graph.add_chunk(Chunk::named("lonely", "lonely", &["lonely.js"]));

        let index = ChunkIndex::build(&graph);

        assert!(index.get_by_name("lonely").unwrap().siblings.is_empty());
    }

    #[test]
    fn test_name_index_shares_records() {
        let mut graph = ChunkGraph::new();
        graph
            .add_chunk(Chunk::named(7u64, "main", &["main.js"]))
            .add_chunk(Chunk::new(8u64, &["chunk.js"]))
            .add_chunk(Chunk::named(9u64, "", &["empty-name.js"]));

        let index = ChunkIndex::build(&graph);

        assert_eq!(index.len(), 3);
        assert!(Arc::ptr_eq(
            index.get_by_name("main").unwrap(),
            index.get(&7u64.into()).unwrap()
        ));
        assert_eq!(index.names().collect::<Vec<_>>(), vec!["main"]);
    }

    #[test]
    fn test_repeated_chunk_last_definition_wins() {
        let mut graph = ChunkGraph::new();
        graph
            .add_chunk(Chunk::named(0u64, "main", &["main.old.js"]))
            .add_chunk(Chunk::new(1u64, &["vendor.js"]))
            .add_chunk(Chunk::named(0u64, "main", &["main.new.js"]))
            .add_group(ChunkGroup::new(Some("main"), ids(&[0, 1])));

        let index = ChunkIndex::build(&graph);
        let main = index.get_by_name("main").unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(main.files, vec!["main.new.js".to_string()]);
        assert_eq!(sibling_ids(main), ids(&[1]));
    }

    #[test]
    fn test_unknown_group_member_is_skipped() {
        let mut graph = ChunkGraph::new();
        graph
            .add_chunk(Chunk::named(0u64, "main", &["main.js"]))
            .add_group(ChunkGroup::new(Some("main"), ids(&[0, 99])));

        let index = ChunkIndex::build(&graph);

        assert!(index.get(&99u64.into()).is_none());
        assert!(index.get_by_name("main").unwrap().siblings.is_empty());
    }

    #[test]
    fn test_build_is_deterministic() {
        let mut graph = ChunkGraph::new();
        graph
            .add_chunk(Chunk::named(0u64, "a", &["a.js"]))
            .add_chunk(Chunk::named(1u64, "b", &["b.js", "b.css"]))
            .add_chunk(Chunk::new(2u64, &["common.js"]))
            .add_group(ChunkGroup::new(Some("a"), ids(&[2, 0])))
            .add_group(ChunkGroup::new(Some("b"), ids(&[2, 1])));

        let first = ChunkIndex::build(&graph);
        let second = ChunkIndex::build(&graph);

        assert_eq!(first, second);
        assert_eq!(
            sibling_ids(first.get(&2u64.into()).unwrap()),
            sibling_ids(second.get(&2u64.into()).unwrap())
        );
    }
}
