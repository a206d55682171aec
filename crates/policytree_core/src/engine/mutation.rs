//! Mutation engine over the registry and tree model.
//!
//! # Responsibility
//! - Enforce creation/move/delete preconditions in contract order.
//! - Keep derived container state and global counts in step with every
//!   structural change.
//!
//! # Invariants
//! - Operations are atomic from the caller's perspective.
//! - The cycle guard rejects any move of a node into itself or into one of
//!   its own descendants.
//! - Same-container move indices are interpreted against the child sequence
//!   with the moved node already removed.

use crate::engine::observer::{StatusTone, TreeObserver};
use crate::model::node::{KindCounts, Node, NodeId, NodeKind, NodeSnapshot};
use crate::store::registry::NodeRegistry;
use crate::store::tree::{TreeError, TreeModel};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

const STATUS_MOVED: &str = "Item moved.";
const STATUS_DELETED: &str = "Item deleted.";
const STATUS_ALREADY_IN_PLACE: &str = "Item already in place.";
const STATUS_CIRCULAR_MOVE: &str = "Cannot move a group inside one of its descendants.";

/// Result type used by engine operations.
pub type EngineResult<T> = Result<T, EngineError>;

/// Errors from engine operations.
///
/// Only `CircularMove` and `InvalidDisplayName` are routine user-visible
/// outcomes; the remaining kinds indicate a defect in the calling layer and
/// are logged loudly at the point of rejection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EngineError {
    /// Identifier does not name a live node.
    NotFound(NodeId),
    /// Target of a create/move is neither the root nor a live group.
    InvalidContainer(NodeId),
    /// Move would make a node its own ancestor.
    CircularMove { node: NodeId, target: NodeId },
    /// Display name is blank after trim.
    InvalidDisplayName,
    /// Tree model level failure (index bounds, attachment bookkeeping).
    Tree(TreeError),
}

impl Display for EngineError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NotFound(id) => write!(f, "hierarchy node not found: {id}"),
            Self::InvalidContainer(id) => {
                write!(f, "target is not a live group container: {id}")
            }
            Self::CircularMove { node, target } => write!(
                f,
                "moving {node} into {target} would make it its own ancestor"
            ),
            Self::InvalidDisplayName => write!(f, "display name must not be blank"),
            Self::Tree(err) => write!(f, "{err}"),
        }
    }
}

impl Error for EngineError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Tree(err) => Some(err),
            _ => None,
        }
    }
}

impl From<TreeError> for EngineError {
    fn from(value: TreeError) -> Self {
        match value {
            TreeError::NotFound(id) => Self::NotFound(id),
            TreeError::InvalidContainer(id) => Self::InvalidContainer(id),
            other => Self::Tree(other),
        }
    }
}

/// Reported result of a successful move request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveOutcome {
    /// Structure changed.
    Moved,
    /// Request resolved to the node's current effective position; nothing
    /// was mutated, observers were still refreshed.
    NoOp,
}

/// Validates and applies hierarchy mutations, publishing to one observer.
///
/// All mutation runs synchronously on the caller's thread; the single-slot
/// gesture coordinator is what serializes callers.
pub struct MutationEngine<O: TreeObserver> {
    registry: NodeRegistry,
    tree: TreeModel,
    observer: O,
}

impl<O: TreeObserver> MutationEngine<O> {
    /// Creates an empty engine publishing to `observer`.
    pub fn new(observer: O) -> Self {
        Self {
            registry: NodeRegistry::new(),
            tree: TreeModel::new(),
            observer,
        }
    }

    /// Creates a node of `kind` inside `target` (`None` = root) at
    /// `at_index`, and returns its fresh identifier.
    pub fn create(
        &mut self,
        kind: NodeKind,
        target: Option<NodeId>,
        at_index: usize,
    ) -> EngineResult<NodeId> {
        let id = self.registry.allocate(kind);
        if kind.is_group() {
            self.tree.register_container(id);
        }
        if let Err(err) = self.tree.attach(id, target, at_index) {
            // Failed creates leave no trace; the burned id is the only cost.
            if kind.is_group() {
                self.tree.unregister_container(id);
            }
            self.registry.forget(id);
            error!("event=create_rejected module=engine status=error kind={kind} err={err}");
            return Err(err.into());
        }

        info!(
            "event=node_created module=engine status=ok id={id} kind={kind} parent={}",
            describe_target(target)
        );
        self.publish_badge(target);
        self.publish_structure();
        self.observer.status_message(
            &format!("{} added to the hierarchy.", kind.palette_label()),
            StatusTone::Success,
        );
        Ok(id)
    }

    /// Moves `node` into `target` (`None` = root) at `at_index`.
    ///
    /// For a same-container move the index is interpreted against the child
    /// sequence with `node` already removed, so "just before itself"
    /// resolves to a no-op rather than an off-by-one shuffle.
    pub fn move_node(
        &mut self,
        node: NodeId,
        target: Option<NodeId>,
        at_index: usize,
    ) -> EngineResult<MoveOutcome> {
        if !self.registry.contains(node) {
            error!("event=move_rejected module=engine status=error id={node} err=not_found");
            return Err(EngineError::NotFound(node));
        }

        if let Some(container) = target {
            if !self.is_live_group(container) {
                error!(
                    "event=move_rejected module=engine status=error id={node} target={container} err=invalid_container"
                );
                return Err(EngineError::InvalidContainer(container));
            }
            if container == node || self.tree.is_descendant(node, container) {
                warn!(
                    "event=move_rejected module=engine status=rejected id={node} target={container} err=circular"
                );
                self.observer
                    .status_message(STATUS_CIRCULAR_MOVE, StatusTone::Warning);
                return Err(EngineError::CircularMove {
                    node,
                    target: container,
                });
            }
        }

        let previous = match self.tree.parent_of(node) {
            Some(parent) => parent,
            None => {
                error!("event=move_rejected module=engine status=error id={node} err=not_attached");
                return Err(EngineError::Tree(TreeError::NotAttached(node)));
            }
        };

        let siblings = self.tree.children_of(target);
        let same_parent = previous == target;
        let current_index = siblings.iter().position(|id| *id == node);
        let effective_len = if same_parent {
            siblings.len().saturating_sub(1)
        } else {
            siblings.len()
        };
        if at_index > effective_len {
            error!(
                "event=move_rejected module=engine status=error id={node} index={at_index} err=index_out_of_range"
            );
            return Err(EngineError::Tree(TreeError::IndexOutOfRange {
                index: at_index,
                child_count: effective_len,
            }));
        }

        if same_parent && current_index == Some(at_index) {
            self.publish_badge(target);
            self.publish_structure();
            self.observer
                .status_message(STATUS_ALREADY_IN_PLACE, StatusTone::Info);
            return Ok(MoveOutcome::NoOp);
        }

        let original_index = self
            .tree
            .children_of(previous)
            .iter()
            .position(|id| *id == node);
        self.tree.detach(node)?;
        if let Err(err) = self.tree.attach(node, target, at_index) {
            // Restore the previous position so the rejection stays atomic.
            let restore_index = original_index
                .unwrap_or(0)
                .min(self.tree.child_count(previous));
            let _ = self.tree.attach(node, previous, restore_index);
            error!("event=move_rejected module=engine status=error id={node} err={err}");
            return Err(err.into());
        }

        info!(
            "event=node_moved module=engine status=ok id={node} from={} to={} index={at_index}",
            describe_target(previous),
            describe_target(target)
        );
        self.publish_badge(previous);
        if previous != target {
            self.publish_badge(target);
        }
        self.publish_structure();
        self.observer.status_message(STATUS_MOVED, StatusTone::Success);
        Ok(MoveOutcome::Moved)
    }

    /// Deletes `node` and its entire subtree.
    pub fn delete(&mut self, node: NodeId) -> EngineResult<()> {
        if !self.registry.contains(node) {
            error!("event=delete_rejected module=engine status=error id={node} err=not_found");
            return Err(EngineError::NotFound(node));
        }

        let previous = self.tree.detach(node)?;
        let subtree = self.tree.collect_subtree(node);
        for id in &subtree {
            self.tree.purge(*id);
            self.registry.forget(*id);
        }

        info!(
            "event=node_deleted module=engine status=ok id={node} removed={}",
            subtree.len()
        );
        self.publish_badge(previous);
        // Counts go out once, after the whole subtree is gone, so observers
        // never see a transiently inconsistent tally.
        self.publish_structure();
        self.observer
            .status_message(STATUS_DELETED, StatusTone::Success);
        Ok(())
    }

    /// Renames `node`. The label is trimmed; blank labels are rejected.
    pub fn rename(&mut self, node: NodeId, display_name: impl Into<String>) -> EngineResult<()> {
        let normalized = normalize_display_name(display_name.into())?;
        let Some(record) = self.registry.resolve_mut(node) else {
            error!("event=rename_rejected module=engine status=error id={node} err=not_found");
            return Err(EngineError::NotFound(node));
        };
        record.display_name = normalized;
        self.publish_tree();
        Ok(())
    }

    /// Flips the presentation-only collapsed flag of one group node and
    /// returns the new state.
    pub fn toggle_collapsed(&mut self, node: NodeId) -> EngineResult<bool> {
        let Some(record) = self.registry.resolve_mut(node) else {
            error!("event=collapse_rejected module=engine status=error id={node} err=not_found");
            return Err(EngineError::NotFound(node));
        };
        if !record.kind.is_group() {
            return Err(EngineError::InvalidContainer(node));
        }
        record.collapsed = !record.collapsed;
        let collapsed = record.collapsed;
        self.publish_tree();
        Ok(collapsed)
    }

    /// Returns whether `id` names a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.registry.contains(id)
    }

    /// Resolves one live node record.
    pub fn resolve(&self, id: NodeId) -> Option<&Node> {
        self.registry.resolve(id)
    }

    /// Ordered children of `target` (`None` = root).
    pub fn children_of(&self, target: Option<NodeId>) -> &[NodeId] {
        self.tree.children_of(target)
    }

    /// Live child count of `target`.
    pub fn child_count(&self, target: Option<NodeId>) -> usize {
        self.tree.child_count(target)
    }

    /// Current per-kind tally of live nodes.
    pub fn kind_counts(&self) -> KindCounts {
        self.registry.kind_counts()
    }

    /// Full root-level snapshot in render order.
    pub fn snapshot(&self) -> Vec<NodeSnapshot> {
        self.tree
            .children_of(None)
            .iter()
            .filter_map(|id| self.snapshot_node(*id))
            .collect()
    }

    /// Read access to the observer, mainly for presentation bridges.
    pub fn observer(&self) -> &O {
        &self.observer
    }

    /// Mutable access to the observer.
    pub fn observer_mut(&mut self) -> &mut O {
        &mut self.observer
    }

    fn is_live_group(&self, id: NodeId) -> bool {
        self.registry
            .resolve(id)
            .is_some_and(|node| node.kind.is_group())
            && self.tree.is_container(id)
    }

    fn snapshot_node(&self, id: NodeId) -> Option<NodeSnapshot> {
        let node = self.registry.resolve(id)?;
        let children = self
            .tree
            .children_of(Some(id))
            .iter()
            .filter_map(|child| self.snapshot_node(*child))
            .collect();
        Some(NodeSnapshot {
            id,
            kind: node.kind,
            display_name: node.display_name.clone(),
            collapsed: node.collapsed,
            children,
        })
    }

    fn publish_badge(&mut self, target: Option<NodeId>) {
        let Some(container) = target else {
            return;
        };
        if !self.is_live_group(container) {
            return;
        }
        let count = self.tree.child_count(Some(container));
        self.observer
            .container_badge_changed(container, count, count == 0);
    }

    fn publish_tree(&mut self) {
        let snapshot = self.snapshot();
        self.observer.tree_changed(&snapshot);
    }

    fn publish_structure(&mut self) {
        self.publish_tree();
        let counts = self.registry.kind_counts();
        self.observer.global_counts_changed(&counts);
    }
}

fn describe_target(target: Option<NodeId>) -> String {
    match target {
        None => "root".to_string(),
        Some(id) => id.to_string(),
    }
}

fn normalize_display_name(value: String) -> EngineResult<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(EngineError::InvalidDisplayName);
    }
    Ok(trimmed.to_string())
}
