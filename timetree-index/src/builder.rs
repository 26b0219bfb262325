use std::sync::Arc;

use chrono::{DateTime, FixedOffset, NaiveDateTime, Weekday};
use serde::{Deserialize, Serialize};
use tracing::debug;

use timetree_core::errors::{Result, TimeTreeError};
use timetree_core::store::{GraphStore, NodeId};

use crate::config::TimeTreeConfig;
use crate::level::Level;
use crate::link::LinkWriter;
use crate::resolver::NodeResolver;

/// Sibling relationship labels, shared by every level.
const NEXT: &str = "NEXT";
const PREV: &str = "PREV";

/// Reference to the finest enabled node resolved for one call. Owned by the
/// caller; never persisted by the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeTreeReference {
    pub level: Level,
    pub unique_id: NodeId,
}

/// Builds and maintains the calendar hierarchy inside the store.
///
/// The store handle is injected at construction; the builder keeps no other
/// state and no lock, so independent calls from any number of tasks or
/// processes may run in parallel.
pub struct TimeTreeBuilder {
    resolver: NodeResolver,
    links: LinkWriter,
    config: TimeTreeConfig,
    enabled: Vec<Level>,
}

impl TimeTreeBuilder {
    /// Creates a builder over the injected store, failing fast when the
    /// configuration enables no level at all.
    pub fn new(store: Arc<dyn GraphStore>, config: TimeTreeConfig) -> Result<Self> {
        config.validate()?;
        let enabled = config.enabled_levels();
        debug!(levels = ?enabled, "time tree builder ready");
        Ok(Self {
            resolver: NodeResolver::new(store.clone()),
            links: LinkWriter::new(store),
            config,
            enabled,
        })
    }

    /// Resolves the tree for `timestamp` and returns the finest enabled
    /// node.
    ///
    /// Calendar fields come from the timestamp's own offset, so the node a
    /// moment lands in follows its local calendar day and hour. Levels are
    /// processed coarsest to finest; each step is individually idempotent,
    /// so a call aborted by a store failure leaves valid state and a repeat
    /// call completes whatever was left undone.
    pub async fn get(&self, timestamp: DateTime<FixedOffset>) -> Result<TimeTreeReference> {
        let local = timestamp.naive_local();
        let first_day = self.config.first_day_of_week;

        let mut resolved: Vec<(Level, NodeId)> = Vec::with_capacity(self.enabled.len());
        for &level in &self.enabled {
            let id = self.resolve_level(level, local, first_day, &resolved).await?;
            resolved.push((level, id));
        }

        let (level, unique_id) = resolved.last().copied().ok_or_else(|| {
            TimeTreeError::Configuration("no granularity levels enabled".to_string())
        })?;
        Ok(TimeTreeReference { level, unique_id })
    }

    async fn resolve_level(
        &self,
        level: Level,
        local: NaiveDateTime,
        first_day: Weekday,
        resolved: &[(Level, NodeId)],
    ) -> Result<NodeId> {
        let id = self
            .resolver
            .resolve_or_create(level, &level.key(local, first_day))
            .await?;
        let previous = self
            .resolver
            .lookup(level, &level.previous_key(local, first_day))
            .await?;
        let next = self
            .resolver
            .lookup(level, &level.next_key(local, first_day))
            .await?;

        self.links
            .link_if_both_present(previous, NEXT, Some(id), PREV)
            .await?;
        self.links
            .link_if_both_present(Some(id), NEXT, next, PREV)
            .await?;

        for parent in level.effective_containers(&self.enabled) {
            let parent_id = resolved
                .iter()
                .find(|(resolved_level, _)| *resolved_level == parent)
                .map(|(_, parent_id)| *parent_id);
            self.links
                .link_if_both_present(
                    parent_id,
                    &contains_label(parent, level),
                    Some(id),
                    &contained_label(level, parent),
                )
                .await?;
        }

        Ok(id)
    }
}

/// Parent-to-child hierarchy label, unique per level pair.
fn contains_label(parent: Level, child: Level) -> String {
    format!(
        "{}_CONTAINS_{}",
        parent.label().to_uppercase(),
        child.label().to_uppercase()
    )
}

/// Child-to-parent hierarchy label, unique per level pair.
fn contained_label(child: Level, parent: Level) -> String {
    format!(
        "{}_IN_{}",
        child.label().to_uppercase(),
        parent.label().to_uppercase()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hierarchy_labels_identify_both_levels() {
        assert_eq!(contains_label(Level::Year, Level::Month), "YEAR_CONTAINS_MONTH");
        assert_eq!(contained_label(Level::Month, Level::Year), "MONTH_IN_YEAR");
        assert_eq!(contains_label(Level::Week, Level::Day), "WEEK_CONTAINS_DAY");
        assert_eq!(contained_label(Level::Minute, Level::Hour), "MINUTE_IN_HOUR");
    }
}
