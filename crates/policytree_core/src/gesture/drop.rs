//! Pointer-to-insertion-point resolution.
//!
//! # Responsibility
//! - Map a pointer height over a container's laid-out rows to the sibling
//!   the drop would land before, or to end-of-list.
//!
//! # Invariants
//! - Pure functions of layout and pointer input; the engine performs all
//!   validation at drop time.
//! - The dragged node is never used as a positional reference against
//!   itself.

use crate::model::node::NodeId;

/// One laid-out child row, supplied by the presentation layer.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ChildRow {
    pub node: NodeId,
    /// Top edge in the same vertical coordinate space as the pointer.
    pub top: f64,
    pub height: f64,
}

impl ChildRow {
    pub fn new(node: NodeId, top: f64, height: f64) -> Self {
        Self { node, top, height }
    }

    fn midpoint(&self) -> f64 {
        self.top + self.height / 2.0
    }
}

/// Where a drop over a container would land.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertionPoint {
    /// Insert just before this existing sibling.
    Before(NodeId),
    /// Append after every existing sibling.
    End,
}

/// Returns the first row whose vertical midpoint lies below the pointer,
/// skipping the row of the node currently being dragged (if any); `End`
/// when the pointer is below every midpoint.
pub fn resolve_insertion(
    rows: &[ChildRow],
    pointer_y: f64,
    dragging: Option<NodeId>,
) -> InsertionPoint {
    for row in rows {
        if Some(row.node) == dragging {
            continue;
        }
        if pointer_y < row.midpoint() {
            return InsertionPoint::Before(row.node);
        }
    }
    InsertionPoint::End
}

/// Translates an insertion point into a numeric index over `children`.
///
/// A reference node that is no longer in the sequence degrades to append;
/// the engine re-validates everything at mutation time anyway.
pub fn insertion_index(children: &[NodeId], insertion: InsertionPoint) -> usize {
    match insertion {
        InsertionPoint::Before(reference) => children
            .iter()
            .position(|id| *id == reference)
            .unwrap_or(children.len()),
        InsertionPoint::End => children.len(),
    }
}
