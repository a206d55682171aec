//! Node domain model.
//!
//! # Responsibility
//! - Define the canonical node record shared by all palette kinds.
//! - Provide the serializable tree read model published to observers.
//!
//! # Invariants
//! - `id` is stable for the process lifetime and never reused.
//! - `kind` is immutable after creation.
//! - Only `NodeKind::Group` nodes may own children.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

/// Stable identifier for every node in the hierarchy.
///
/// Minted exclusively by `NodeRegistry::allocate`; the raw counter value is
/// monotonically increasing and never reset during a session.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct NodeId(u64);

impl NodeId {
    pub(crate) const fn from_raw(value: u64) -> Self {
        Self(value)
    }

    /// Returns the raw counter value behind this identifier.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

impl Display for NodeId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "node-{}", self.0)
    }
}

/// Closed set of creatable node kinds supplied by the palette.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
#[serde(rename_all = "snake_case")]
pub enum NodeKind {
    /// Policy assignment leaf.
    Policy,
    /// Script leaf.
    Script,
    /// Registry value leaf.
    Registry,
    /// Application deployment leaf.
    Application,
    /// Grouping node that owns an ordered child sequence.
    Group,
}

impl NodeKind {
    /// Every palette kind in stable display order.
    pub const ALL: [NodeKind; 5] = [
        NodeKind::Policy,
        NodeKind::Script,
        NodeKind::Registry,
        NodeKind::Application,
        NodeKind::Group,
    ];

    /// Returns whether nodes of this kind may own children.
    pub const fn is_group(self) -> bool {
        matches!(self, NodeKind::Group)
    }

    /// Human-facing singular label used by the palette and status messages.
    pub const fn palette_label(self) -> &'static str {
        match self {
            NodeKind::Policy => "Policy",
            NodeKind::Script => "Script",
            NodeKind::Registry => "Registry",
            NodeKind::Application => "Application",
            NodeKind::Group => "Group",
        }
    }

    /// Default label for a freshly created node, e.g. `Policy 7`.
    pub fn default_display_name(self, id: NodeId) -> String {
        format!("{} {}", self.palette_label(), id.raw())
    }
}

impl Display for NodeKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let text = match self {
            NodeKind::Policy => "policy",
            NodeKind::Script => "script",
            NodeKind::Registry => "registry",
            NodeKind::Application => "application",
            NodeKind::Group => "group",
        };
        write!(f, "{text}")
    }
}

/// Canonical node record.
///
/// Containment is not stored here: the tree model is the sole authority for
/// parent/child relations, so a node record cannot disagree with it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Node {
    /// Stable identity minted by the registry.
    pub id: NodeId,
    /// Immutable palette kind.
    pub kind: NodeKind,
    /// User-facing mutable label.
    pub display_name: String,
    /// Presentation-only collapsed state for group nodes.
    pub collapsed: bool,
}

impl Node {
    /// Creates a node record with its kind's default display name.
    pub fn new(id: NodeId, kind: NodeKind) -> Self {
        Self {
            id,
            kind,
            display_name: kind.default_display_name(id),
            collapsed: false,
        }
    }
}

/// Serializable subtree read model published through `tree_changed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NodeSnapshot {
    pub id: NodeId,
    pub kind: NodeKind,
    pub display_name: String,
    pub collapsed: bool,
    /// Child snapshots in render order. Always empty for leaf kinds.
    pub children: Vec<NodeSnapshot>,
}

/// Per-kind node tally published through `global_counts_changed`.
///
/// Always carries an entry for every kind, including zeroes, so observers can
/// render a full summary row without special-casing absent kinds.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct KindCounts {
    counts: BTreeMap<NodeKind, usize>,
}

impl KindCounts {
    /// Creates a tally with every kind at zero.
    pub fn new() -> Self {
        let mut counts = BTreeMap::new();
        for kind in NodeKind::ALL {
            counts.insert(kind, 0);
        }
        Self { counts }
    }

    /// Adds one node of `kind` to the tally.
    pub fn record(&mut self, kind: NodeKind) {
        if let Some(entry) = self.counts.get_mut(&kind) {
            *entry += 1;
        }
    }

    /// Returns the current count for one kind.
    pub fn get(&self, kind: NodeKind) -> usize {
        self.counts.get(&kind).copied().unwrap_or(0)
    }

    /// Iterates `(kind, count)` pairs in stable order.
    pub fn iter(&self) -> impl Iterator<Item = (NodeKind, usize)> + '_ {
        self.counts.iter().map(|(kind, count)| (*kind, *count))
    }

    /// Sum over every kind.
    pub fn total(&self) -> usize {
        self.counts.values().sum()
    }
}

impl Default for KindCounts {
    fn default() -> Self {
        Self::new()
    }
}
