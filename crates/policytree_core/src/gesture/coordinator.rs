//! Single-slot drag gesture coordinator.
//!
//! # Responsibility
//! - Hold the one active drag payload from pick-up to drop or cancel.
//! - Translate drops into engine create/move/delete calls.
//!
//! # Invariants
//! - Idle -> Armed on pick-up, back to Idle on drop, disposal, or cancel,
//!   regardless of whether the mutation was accepted.
//! - Drag-over feedback is stateless recomputation, never a state change.

use crate::engine::mutation::{EngineResult, MutationEngine};
use crate::engine::observer::TreeObserver;
use crate::gesture::drop::{insertion_index, resolve_insertion, ChildRow, InsertionPoint};
use crate::model::node::{NodeId, NodeKind};
use log::{debug, warn};

/// Payload held while a gesture is armed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DragPayload {
    /// An existing node is being relocated.
    Move(NodeId),
    /// A new node is being materialized from the palette.
    Create(NodeKind),
}

/// Routes one drag gesture at a time into the mutation engine.
pub struct GestureCoordinator<O: TreeObserver> {
    engine: MutationEngine<O>,
    armed: Option<DragPayload>,
}

impl<O: TreeObserver> GestureCoordinator<O> {
    /// Wraps an engine with an idle coordinator.
    pub fn new(engine: MutationEngine<O>) -> Self {
        Self {
            engine,
            armed: None,
        }
    }

    /// Read access to the underlying engine.
    pub fn engine(&self) -> &MutationEngine<O> {
        &self.engine
    }

    /// Mutable access to the underlying engine.
    pub fn engine_mut(&mut self) -> &mut MutationEngine<O> {
        &mut self.engine
    }

    /// Returns whether a gesture is currently armed.
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Current payload, when armed.
    pub fn payload(&self) -> Option<DragPayload> {
        self.armed
    }

    /// Arms a move gesture for an existing node.
    ///
    /// A stale presentation reference leaves the coordinator idle.
    pub fn pick_up_node(&mut self, node: NodeId) {
        if !self.engine.contains(node) {
            warn!("event=pick_up_ignored module=gesture status=rejected id={node} err=not_found");
            return;
        }
        self.armed = Some(DragPayload::Move(node));
        debug!("event=gesture_armed module=gesture status=ok payload=move id={node}");
    }

    /// Arms a create gesture for a palette template.
    pub fn pick_up_template(&mut self, kind: NodeKind) {
        self.armed = Some(DragPayload::Create(kind));
        debug!("event=gesture_armed module=gesture status=ok payload=create kind={kind}");
    }

    /// Recomputes the live insertion hint for drag-over feedback.
    ///
    /// Returns `None` while idle; no state changes either way.
    pub fn drag_over(&self, rows: &[ChildRow], pointer_y: f64) -> Option<InsertionPoint> {
        let payload = self.armed?;
        Some(resolve_insertion(rows, pointer_y, dragged_node(payload)))
    }

    /// Resolves a drop over `target` (`None` = root) and invokes the engine.
    ///
    /// The gesture ends whatever the mutation outcome; rejections only
    /// produce their status message.
    pub fn drop(&mut self, target: Option<NodeId>, rows: &[ChildRow], pointer_y: f64) {
        let Some(payload) = self.armed.take() else {
            debug!("event=drop_ignored module=gesture status=ok reason=idle");
            return;
        };

        let dragging = dragged_node(payload);
        let insertion = resolve_insertion(rows, pointer_y, dragging);
        let mut children: Vec<NodeId> = self.engine.children_of(target).to_vec();
        if let Some(node) = dragging {
            children.retain(|id| *id != node);
        }
        let at_index = insertion_index(&children, insertion);

        let outcome = match payload {
            DragPayload::Move(node) => self.engine.move_node(node, target, at_index).map(|_| ()),
            DragPayload::Create(kind) => self.engine.create(kind, target, at_index).map(|_| ()),
        };
        if let Err(err) = outcome {
            warn!("event=drop_rejected module=gesture status=rejected err={err}");
        }
    }

    /// Resolves a drop on the disposal target.
    ///
    /// A move payload deletes its node; a create payload dissolves (nothing
    /// was ever created).
    pub fn drop_on_disposal(&mut self) {
        match self.armed.take() {
            Some(DragPayload::Move(node)) => {
                if let Err(err) = self.engine.delete(node) {
                    warn!("event=disposal_rejected module=gesture status=rejected id={node} err={err}");
                }
            }
            Some(DragPayload::Create(kind)) => {
                debug!("event=disposal_discarded module=gesture status=ok kind={kind}");
            }
            None => {}
        }
    }

    /// Drop outside any recognized target: discard the payload silently.
    pub fn cancel(&mut self) {
        if self.armed.take().is_some() {
            debug!("event=gesture_cancelled module=gesture status=ok");
        }
    }

    /// Rename passthrough for the presentation layer.
    pub fn rename(&mut self, node: NodeId, display_name: impl Into<String>) -> EngineResult<()> {
        self.engine.rename(node, display_name)
    }

    /// Collapse-toggle passthrough for the presentation layer.
    pub fn toggle_collapsed(&mut self, node: NodeId) -> EngineResult<bool> {
        self.engine.toggle_collapsed(node)
    }
}

fn dragged_node(payload: DragPayload) -> Option<NodeId> {
    match payload {
        DragPayload::Move(node) => Some(node),
        DragPayload::Create(_) => None,
    }
}
