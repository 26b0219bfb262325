//! Shared primitives for the timetree workspace.
//!
//! This crate exposes the pieces the index crate and embedding services
//! depend on: the canonical error type, the graph-store abstraction with an
//! in-memory implementation, and logging setup.

pub mod errors;
pub mod logging;
pub mod memory;
pub mod store;

pub use errors::{ConfigError, Result, TimeTreeError};
pub use memory::MemoryGraphStore;
pub use store::{GraphStore, NodeId, NodeKey};
