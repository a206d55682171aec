//! In-memory node storage and containment structure.
//!
//! # Responsibility
//! - Mint and resolve stable node identities (`registry`).
//! - Own the ordered parent/child containment structure (`tree`).
//!
//! # Invariants
//! - The registry is the only component that mints `NodeId` values.
//! - The tree model is the sole authority for parent/child relations; node
//!   records carry no containment state of their own.

pub mod registry;
pub mod tree;
