//! Drag gesture handling.
//!
//! # Responsibility
//! - Resolve pointer positions to insertion points (`drop`).
//! - Track the single active drag payload and route drops to the engine
//!   (`coordinator`).
//!
//! # Invariants
//! - At most one gesture is armed at a time; re-entering idle discards the
//!   payload with nothing to roll back.
//! - Insertion resolution is pure: no validation, no side effects.

pub mod coordinator;
pub mod drop;
