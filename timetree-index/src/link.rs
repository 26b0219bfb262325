use std::sync::Arc;

use tracing::debug;

use timetree_core::errors::Result;
use timetree_core::store::{GraphStore, NodeId};

/// Idempotent writer for bidirectional relationship pairs.
#[derive(Clone)]
pub struct LinkWriter {
    store: Arc<dyn GraphStore>,
}

impl LinkWriter {
    pub fn new(store: Arc<dyn GraphStore>) -> Self {
        Self { store }
    }

    /// Ensures `source -[rel_out]-> target` and `target -[rel_back]-> source`
    /// exist.
    ///
    /// An absent endpoint makes this a no-op rather than an error: the
    /// missing neighbor simply has not been resolved by any call yet.
    pub async fn link_if_both_present(
        &self,
        source: Option<NodeId>,
        rel_out: &str,
        target: Option<NodeId>,
        rel_back: &str,
    ) -> Result<()> {
        let (source, target) = match (source, target) {
            (Some(source), Some(target)) => (source, target),
            _ => return Ok(()),
        };
        self.store
            .ensure_relationship_pair(source, rel_out, target, rel_back)
            .await?;
        debug!(%source, %target, rel_out, rel_back, "ensured relationship pair");
        Ok(())
    }
}
