//! Node identity registry.
//!
//! # Responsibility
//! - Mint fresh, collision-free node identifiers for the process lifetime.
//! - Resolve identifiers to live node records.
//!
//! # Invariants
//! - The identifier counter only ever increases; ids are never reused, even
//!   after the node they named has been forgotten.
//! - The registry knows nothing about parent/child relations.

use crate::model::node::{KindCounts, Node, NodeId, NodeKind};
use std::collections::HashMap;

/// Table of live node records plus the process-scoped identifier counter.
pub struct NodeRegistry {
    next_id: u64,
    nodes: HashMap<NodeId, Node>,
}

impl NodeRegistry {
    /// Creates an empty registry with the counter at its initial value.
    pub fn new() -> Self {
        Self {
            next_id: 1,
            nodes: HashMap::new(),
        }
    }

    /// Mints a fresh identifier and stores a node record of `kind` under it.
    ///
    /// The new record carries its kind's default display name.
    pub fn allocate(&mut self, kind: NodeKind) -> NodeId {
        let id = NodeId::from_raw(self.next_id);
        self.next_id += 1;
        self.nodes.insert(id, Node::new(id, kind));
        id
    }

    /// Resolves one live node record.
    pub fn resolve(&self, id: NodeId) -> Option<&Node> {
        self.nodes.get(&id)
    }

    /// Resolves one live node record for mutation (rename, collapse state).
    pub fn resolve_mut(&mut self, id: NodeId) -> Option<&mut Node> {
        self.nodes.get_mut(&id)
    }

    /// Returns whether `id` names a live node.
    pub fn contains(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Removes one record from the table. The id stays burned: the counter
    /// is not rewound.
    pub fn forget(&mut self, id: NodeId) -> Option<Node> {
        self.nodes.remove(&id)
    }

    /// Number of live nodes.
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// Returns whether no nodes are live.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Iterates live node records in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = &Node> {
        self.nodes.values()
    }

    /// Tallies live nodes per kind. Derived on demand, never cached.
    pub fn kind_counts(&self) -> KindCounts {
        let mut counts = KindCounts::new();
        for node in self.nodes.values() {
            counts.record(node.kind);
        }
        counts
    }
}

impl Default for NodeRegistry {
    fn default() -> Self {
        Self::new()
    }
}
