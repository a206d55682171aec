//! Core hierarchy mutation engine for PolicyTree.
//! This crate is the single source of truth for tree invariants: the
//! presentation layer only renders snapshots and feeds gestures back in.

pub mod engine;
pub mod gesture;
pub mod logging;
pub mod model;
pub mod store;

pub use engine::mutation::{EngineError, EngineResult, MoveOutcome, MutationEngine};
pub use engine::observer::{NoopObserver, StatusTone, TreeObserver};
pub use gesture::coordinator::{DragPayload, GestureCoordinator};
pub use gesture::drop::{insertion_index, resolve_insertion, ChildRow, InsertionPoint};
pub use logging::{default_log_level, init_logging, logging_status};
pub use model::node::{KindCounts, Node, NodeId, NodeKind, NodeSnapshot};
pub use store::registry::NodeRegistry;
pub use store::tree::{TreeError, TreeModel, TreeResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
