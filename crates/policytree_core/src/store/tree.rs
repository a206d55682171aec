//! Containment structure for the hierarchy.
//!
//! # Responsibility
//! - Own the ordered parent/child relation between node identifiers.
//! - Validate attach/detach requests and apply them atomically.
//!
//! # Invariants
//! - The relation is a forest: no node is its own ancestor.
//! - Every attached node has exactly one parent entry, and that entry always
//!   agrees with the child sequence that lists the node.
//! - A child sequence exists exactly for the root and each registered
//!   container; its length is the container's live child count.
//! - `attach` and `detach` either fully succeed or leave the model untouched.

use crate::model::node::NodeId;
use std::collections::{HashMap, HashSet};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Result type used by tree model operations.
pub type TreeResult<T> = Result<T, TreeError>;

/// Errors from tree model operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TreeError {
    /// Identifier does not name a live node.
    NotFound(NodeId),
    /// Attach target is neither the root nor a registered container.
    InvalidContainer(NodeId),
    /// Requested insertion index exceeds the append position.
    IndexOutOfRange { index: usize, child_count: usize },
    /// Detach was requested for a node with no current parent.
    NotAttached(NodeId),
}

impl Display for TreeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "hierarchy node not found: {id}"),
            Self::InvalidContainer(id) => {
                write!(f, "target is not a live group container: {id}")
            }
            Self::IndexOutOfRange { index, child_count } => write!(
                f,
                "insertion index {index} out of range for {child_count} children"
            ),
            Self::NotAttached(id) => {
                write!(f, "node is not attached to any container: {id}")
            }
        }
    }
}

impl Error for TreeError {}

/// Ordered containment structure over node identifiers.
///
/// Parent pointers are stored as identifiers, never as references into node
/// records; the registry stays free of containment state and cycles cannot
/// arise from dangling back-references.
pub struct TreeModel {
    root_children: Vec<NodeId>,
    children: HashMap<NodeId, Vec<NodeId>>,
    parent: HashMap<NodeId, Option<NodeId>>,
}

impl TreeModel {
    /// Creates an empty model containing only the implicit root.
    pub fn new() -> Self {
        Self {
            root_children: Vec::new(),
            children: HashMap::new(),
            parent: HashMap::new(),
        }
    }

    /// Registers `id` as a container with an empty child sequence.
    ///
    /// Called once per group node at creation; attach rejects any target that
    /// has not been registered here.
    pub fn register_container(&mut self, id: NodeId) {
        self.children.entry(id).or_default();
    }

    /// Drops the container registration for `id`.
    pub fn unregister_container(&mut self, id: NodeId) {
        self.children.remove(&id);
    }

    /// Returns whether `id` is registered as a container.
    pub fn is_container(&self, id: NodeId) -> bool {
        self.children.contains_key(&id)
    }

    /// Inserts `node_id` into `target` (`None` = root) at `at_index`.
    ///
    /// Append is expressed as `at_index == child_count`. Fails with
    /// `InvalidContainer` or `IndexOutOfRange` without touching the model.
    pub fn attach(
        &mut self,
        node_id: NodeId,
        target: Option<NodeId>,
        at_index: usize,
    ) -> TreeResult<()> {
        debug_assert!(
            !self.parent.contains_key(&node_id),
            "attach requires a detached node: {node_id}"
        );
        match target {
            None => {
                if at_index > self.root_children.len() {
                    return Err(TreeError::IndexOutOfRange {
                        index: at_index,
                        child_count: self.root_children.len(),
                    });
                }
                self.root_children.insert(at_index, node_id);
            }
            Some(container) => {
                let seq = self
                    .children
                    .get_mut(&container)
                    .ok_or(TreeError::InvalidContainer(container))?;
                if at_index > seq.len() {
                    return Err(TreeError::IndexOutOfRange {
                        index: at_index,
                        child_count: seq.len(),
                    });
                }
                seq.insert(at_index, node_id);
            }
        }
        self.parent.insert(node_id, target);
        Ok(())
    }

    /// Removes `node_id` from its current container and returns that
    /// container (`None` = root).
    pub fn detach(&mut self, node_id: NodeId) -> TreeResult<Option<NodeId>> {
        let parent = *self
            .parent
            .get(&node_id)
            .ok_or(TreeError::NotAttached(node_id))?;
        match parent {
            None => self.root_children.retain(|id| *id != node_id),
            Some(container) => {
                let seq = self
                    .children
                    .get_mut(&container)
                    .ok_or(TreeError::NotAttached(node_id))?;
                seq.retain(|id| *id != node_id);
            }
        }
        self.parent.remove(&node_id);
        Ok(parent)
    }

    /// Ordered children of `target` (`None` = root).
    ///
    /// An unknown container yields an empty slice; callers validate container
    /// liveness before relying on the result.
    pub fn children_of(&self, target: Option<NodeId>) -> &[NodeId] {
        match target {
            None => &self.root_children,
            Some(container) => self
                .children
                .get(&container)
                .map(Vec::as_slice)
                .unwrap_or(&[]),
        }
    }

    /// Live child count of `target`.
    pub fn child_count(&self, target: Option<NodeId>) -> usize {
        self.children_of(target).len()
    }

    /// Current container of `node_id`: outer `None` when the node is not
    /// attached anywhere, `Some(None)` when attached at root.
    pub fn parent_of(&self, node_id: NodeId) -> Option<Option<NodeId>> {
        self.parent.get(&node_id).copied()
    }

    /// Walks from `node` upward and reports whether `ancestor` is on the
    /// path to the root. O(depth of `node`).
    pub fn is_descendant(&self, ancestor: NodeId, node: NodeId) -> bool {
        let mut visited = HashSet::new();
        let mut cursor = self.parent.get(&node).copied().flatten();
        while let Some(current) = cursor {
            if current == ancestor {
                return true;
            }
            if !visited.insert(current) {
                // Revisit means the parent chain is already cyclic; report
                // ancestry so the caller rejects the mutation.
                return true;
            }
            cursor = self.parent.get(&current).copied().flatten();
        }
        false
    }

    /// Collects `id` plus every transitive descendant, in teardown order.
    pub fn collect_subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut result = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            result.push(current);
            if let Some(seq) = self.children.get(&current) {
                stack.extend(seq.iter().copied());
            }
        }
        result
    }

    /// Drops all bookkeeping for `id`: its parent entry and, when it was a
    /// container, its child sequence. Used during subtree teardown after the
    /// subtree root has been detached.
    pub fn purge(&mut self, id: NodeId) {
        self.parent.remove(&id);
        self.children.remove(&id);
    }

    /// Verifies parent entries and child sequences agree. Test support.
    pub fn is_consistent(&self) -> bool {
        for (node_id, parent) in &self.parent {
            let listed = self.children_of(*parent).contains(node_id);
            if !listed {
                return false;
            }
        }
        let root = self.root_children.iter().map(|id| (*id, None));
        let nested = self
            .children
            .iter()
            .flat_map(|(container, seq)| seq.iter().map(|id| (*id, Some(*container))));
        root.chain(nested)
            .all(|(id, parent)| self.parent.get(&id) == Some(&parent))
    }
}

impl Default for TreeModel {
    fn default() -> Self {
        Self::new()
    }
}
