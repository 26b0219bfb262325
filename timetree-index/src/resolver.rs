use std::sync::Arc;

use tracing::debug;

use timetree_core::errors::Result;
use timetree_core::store::{GraphStore, NodeId, NodeKey};

use crate::level::Level;

/// Store-facing resolution of single granularity-level nodes.
///
/// Resolution is a pass-through to the store's atomic upsert: the resolver
/// never reads before writing and never retries, so concurrent callers
/// racing on the same key converge on one node.
#[derive(Clone)]
pub struct NodeResolver {
    store: Arc<dyn GraphStore>,
}

impl NodeResolver {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Fetches or creates the node for (`level`, `key`) in one store
    /// operation and returns its identifier.
    pub async fn resolve_or_create(&self, level: Level, key: &NodeKey) -> Result<NodeId> {
        level.validate_key(key)?;
        let id = self.store.upsert_node(level.label(), key).await?;
        debug!(level = level.label(), ?key, %id, "resolved time unit");
        Ok(id)
    }

    /// Read-only lookup; units nobody has resolved yet stay absent.
    pub async fn lookup(&self, level: Level, key: &NodeKey) -> Result<Option<NodeId>> {
        level.validate_key(key)?;
        self.store.match_node(level.label(), key).await
    }
}
