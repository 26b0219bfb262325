//! Calendar time-tree construction against a graph-shaped store.
//!
//! The index maintains one node per calendar unit (year down to second),
//! chained chronologically (`NEXT`/`PREV`) and nested by containment, so
//! that any timestamp maps to a stable node downstream systems can attach
//! events to. Every store write is an idempotent upsert: repeated and
//! concurrent resolution of the same instant converges on the same nodes,
//! and a call interrupted partway leaves valid state that the next call
//! completes.

mod builder;
mod calendar;
mod config;
mod level;
mod link;
mod resolver;

pub use builder::{TimeTreeBuilder, TimeTreeReference};
pub use calendar::{CalendarQuarter, CalendarWeek};
pub use config::TimeTreeConfig;
pub use level::Level;
pub use link::LinkWriter;
pub use resolver::NodeResolver;
