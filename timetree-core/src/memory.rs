use std::collections::{HashMap, HashSet};
use std::sync::Arc;

use async_trait::async_trait;
use parking_lot::RwLock;
use tracing::trace;
use uuid::Uuid;

use crate::errors::Result;
use crate::store::{GraphStore, NodeId, NodeKey};

#[derive(Default)]
struct MemoryInner {
    nodes: HashMap<(String, NodeKey), NodeId>,
    edges: HashSet<(NodeId, String, NodeId)>,
}

/// In-memory `GraphStore` used by the test suite and as a lightweight
/// embedded backend.
///
/// Every write happens under a single write lock, which makes upserts
/// atomic with respect to concurrent callers.
#[derive(Default, Clone)]
pub struct MemoryGraphStore {
    inner: Arc<RwLock<MemoryInner>>,
}

impl MemoryGraphStore {
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of nodes currently stored.
    pub fn node_count(&self) -> usize {
        self.inner.read().nodes.len()
    }

    /// Number of directed relationships currently stored.
    pub fn edge_count(&self) -> usize {
        self.inner.read().edges.len()
    }

    /// Number of nodes carrying the given label.
    pub fn nodes_with_label(&self, label: &str) -> usize {
        let inner = self.inner.read();
        inner
            .nodes
            .keys()
            .filter(|(stored, _)| stored == label)
            .count()
    }

    /// Identifier of the node with `label` and `key`, if present.
    pub fn node(&self, label: &str, key: &NodeKey) -> Option<NodeId> {
        let inner = self.inner.read();
        inner.nodes.get(&(label.to_string(), key.clone())).copied()
    }

    /// Targets of `rel` relationships leaving `id`.
    pub fn related(&self, id: NodeId, rel: &str) -> Vec<NodeId> {
        let inner = self.inner.read();
        inner
            .edges
            .iter()
            .filter(|(from, stored, _)| *from == id && stored == rel)
            .map(|(_, _, to)| *to)
            .collect()
    }
}

#[async_trait]
impl GraphStore for MemoryGraphStore {
    async fn upsert_node(&self, label: &str, key: &NodeKey) -> Result<NodeId> {
        let mut inner = self.inner.write();
        let id = *inner
            .nodes
            .entry((label.to_string(), key.clone()))
            .or_insert_with(Uuid::new_v4);
        trace!(label, ?key, %id, "upserted node");
        Ok(id)
    }

    async fn match_node(&self, label: &str, key: &NodeKey) -> Result<Option<NodeId>> {
        let inner = self.inner.read();
        Ok(inner.nodes.get(&(label.to_string(), key.clone())).copied())
    }

    async fn ensure_relationship_pair(
        &self,
        a: NodeId,
        rel_a_to_b: &str,
        b: NodeId,
        rel_b_to_a: &str,
    ) -> Result<()> {
        let mut inner = self.inner.write();
        inner.edges.insert((a, rel_a_to_b.to_string(), b));
        inner.edges.insert((b, rel_b_to_a.to_string(), a));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn key(year: i32) -> NodeKey {
        NodeKey::new(vec![("year", year)])
    }

    #[tokio::test]
    async fn upsert_returns_stable_identifier() {
        let store = MemoryGraphStore::new();
        let first = store.upsert_node("Year", &key(2024)).await.expect("upsert");
        let second = store.upsert_node("Year", &key(2024)).await.expect("upsert");

        assert_eq!(first, second);
        assert_eq!(store.node_count(), 1);
    }

    #[tokio::test]
    async fn match_never_creates() {
        let store = MemoryGraphStore::new();
        let found = store.match_node("Year", &key(1999)).await.expect("match");

        assert!(found.is_none());
        assert_eq!(store.node_count(), 0);
    }

    #[tokio::test]
    async fn relationship_pairs_are_idempotent() {
        let store = MemoryGraphStore::new();
        let a = store.upsert_node("Year", &key(2023)).await.expect("upsert");
        let b = store.upsert_node("Year", &key(2024)).await.expect("upsert");

        store
            .ensure_relationship_pair(a, "NEXT", b, "PREV")
            .await
            .expect("link");
        store
            .ensure_relationship_pair(a, "NEXT", b, "PREV")
            .await
            .expect("link again");

        assert_eq!(store.edge_count(), 2);
        assert_eq!(store.related(a, "NEXT"), vec![b]);
        assert_eq!(store.related(b, "PREV"), vec![a]);
    }
}
