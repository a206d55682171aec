//! Tree mutation engine.
//!
//! # Responsibility
//! - Validate and apply create/move/delete/rename requests atomically.
//! - Publish structure, badge, count, and status updates to the observer.
//!
//! # Invariants
//! - Every operation is fully applied or fully rejected; the tree is never
//!   left partially mutated.
//! - Expected user-facing rejections surface as status messages; everything
//!   else indicates a caller defect and is logged at error level.

pub mod mutation;
pub mod observer;
