//! Outbound presentation contract.
//!
//! # Responsibility
//! - Define the notification seam between core mutations and rendering.
//! - Keep core decoupled from any concrete presentation layer.

use crate::model::node::{KindCounts, NodeId, NodeSnapshot};

/// Tone of a user-facing status line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Success,
    Warning,
}

/// Receiver for engine-side notifications.
///
/// All methods are fire-and-forget: observers must not call back into the
/// engine while handling a notification.
pub trait TreeObserver {
    /// Full root-level snapshot after any structural or label change.
    fn tree_changed(&mut self, roots: &[NodeSnapshot]);

    /// Derived badge state for one group container.
    fn container_badge_changed(&mut self, container: NodeId, child_count: usize, is_empty: bool);

    /// One user-facing status line.
    fn status_message(&mut self, text: &str, tone: StatusTone);

    /// Per-kind node tally after create/move/delete.
    fn global_counts_changed(&mut self, counts: &KindCounts);
}

/// Observer that ignores every notification. Useful for headless callers.
pub struct NoopObserver;

impl TreeObserver for NoopObserver {
    fn tree_changed(&mut self, _roots: &[NodeSnapshot]) {}

    fn container_badge_changed(&mut self, _container: NodeId, _child_count: usize, _is_empty: bool) {
    }

    fn status_message(&mut self, _text: &str, _tone: StatusTone) {}

    fn global_counts_changed(&mut self, _counts: &KindCounts) {}
}
