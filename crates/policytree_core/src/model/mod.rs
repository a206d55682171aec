//! Domain model for the hierarchy engine.
//!
//! # Responsibility
//! - Define canonical node, identity, and read-model shapes used by core.
//! - Keep one node record type shared by every kind of palette entry.
//!
//! # Invariants
//! - Every node is identified by a stable `NodeId` minted by the registry.
//! - `NodeKind` is a closed set; every dispatch site matches exhaustively.

pub mod node;
