//! CLI smoke entry point.
//!
//! # Responsibility
//! - Drive one scripted gesture sequence through `policytree_core`.
//! - Keep output deterministic for quick local sanity checks.

use policytree_core::{
    KindCounts, MutationEngine, NodeId, NodeKind, NodeSnapshot, StatusTone, TreeObserver,
};

/// Observer that echoes every notification to stdout.
struct ConsoleObserver;

impl TreeObserver for ConsoleObserver {
    fn tree_changed(&mut self, roots: &[NodeSnapshot]) {
        println!("tree: {} root node(s)", roots.len());
    }

    fn container_badge_changed(&mut self, container: NodeId, child_count: usize, is_empty: bool) {
        println!("badge: {container} children={child_count} empty={is_empty}");
    }

    fn status_message(&mut self, text: &str, tone: StatusTone) {
        let tone = match tone {
            StatusTone::Info => "info",
            StatusTone::Success => "success",
            StatusTone::Warning => "warning",
        };
        println!("status[{tone}]: {text}");
    }

    fn global_counts_changed(&mut self, counts: &KindCounts) {
        let summary: Vec<String> = counts
            .iter()
            .map(|(kind, count)| format!("{kind}={count}"))
            .collect();
        println!("counts: {}", summary.join(" "));
    }
}

fn main() {
    println!("policytree_core version={}", policytree_core::core_version());

    let mut engine = MutationEngine::new(ConsoleObserver);

    let group_a = engine
        .create(NodeKind::Group, None, 0)
        .expect("create root group");
    let _policy = engine
        .create(NodeKind::Policy, Some(group_a), 0)
        .expect("create policy in group");
    let group_b = engine
        .create(NodeKind::Group, Some(group_a), 1)
        .expect("create nested group");

    engine
        .move_node(group_b, Some(group_a), 0)
        .expect("reorder nested group to front");

    // Moving the outer group into its own child must be rejected.
    let circular = engine.move_node(group_a, Some(group_b), 0);
    println!("circular move rejected: {}", circular.is_err());

    match serde_json::to_string_pretty(&engine.snapshot()) {
        Ok(json) => println!("{json}"),
        Err(err) => eprintln!("snapshot serialization failed: {err}"),
    }
}
