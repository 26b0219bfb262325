use async_trait::async_trait;
use uuid::Uuid;

use crate::errors::Result;

/// Unique identifier assigned to a node when it is first created.
pub type NodeId = Uuid;

/// Composite key identifying one calendar unit within its level.
///
/// Field order is fixed per level so every caller resolving the same unit
/// issues the same exact-match query.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NodeKey {
    fields: Vec<(&'static str, i32)>,
}

impl NodeKey {
    pub fn new(fields: Vec<(&'static str, i32)>) -> Self {
        Self { fields }
    }

    pub fn fields(&self) -> &[(&'static str, i32)] {
        &self.fields
    }

    /// Value of the named field, if the key carries it.
    pub fn get(&self, name: &str) -> Option<i32> {
        self.fields
            .iter()
            .find(|(field, _)| *field == name)
            .map(|(_, value)| *value)
    }
}

/// Abstraction over the graph-shaped data store holding the time tree.
///
/// `upsert_node` must be a single atomic conditional write on the store
/// side (the equivalent of a Cypher `MERGE`): concurrent callers resolving
/// the same key must never observe two nodes. The index performs no
/// read-then-write of its own and holds no lock, so this contract is the
/// sole duplicate-prevention mechanism.
#[async_trait]
pub trait GraphStore: Send + Sync {
    /// Atomically fetches or creates the node carrying `label` and exactly
    /// the fields of `key`, returning its identifier.
    async fn upsert_node(&self, label: &str, key: &NodeKey) -> Result<NodeId>;

    /// Read-only lookup by label and exact key match. Never creates.
    async fn match_node(&self, label: &str, key: &NodeKey) -> Result<Option<NodeId>>;

    /// Idempotently ensures both directed relationships
    /// `a -[rel_a_to_b]-> b` and `b -[rel_b_to_a]-> a` exist.
    async fn ensure_relationship_pair(
        &self,
        a: NodeId,
        rel_a_to_b: &str,
        b: NodeId,
        rel_b_to_a: &str,
    ) -> Result<()>;
}
