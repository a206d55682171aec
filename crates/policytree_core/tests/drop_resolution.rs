use policytree_core::{
    insertion_index, resolve_insertion, ChildRow, InsertionPoint, NodeId, NodeKind, NodeRegistry,
};

fn three_ids() -> (NodeId, NodeId, NodeId) {
    let mut registry = NodeRegistry::new();
    (
        registry.allocate(NodeKind::Policy),
        registry.allocate(NodeKind::Script),
        registry.allocate(NodeKind::Registry),
    )
}

#[test]
fn midpoint_selects_first_row_below_pointer() {
    let (a, b, c) = three_ids();
    let rows = [
        ChildRow::new(a, 0.0, 24.0),
        ChildRow::new(b, 24.0, 24.0),
        ChildRow::new(c, 48.0, 24.0),
    ];

    // Above a's midpoint (12.0): insert before a.
    assert_eq!(resolve_insertion(&rows, 5.0, None), InsertionPoint::Before(a));
    // Between a's and b's midpoints: insert before b.
    assert_eq!(resolve_insertion(&rows, 20.0, None), InsertionPoint::Before(b));
    // Exactly on a midpoint counts as past it.
    assert_eq!(resolve_insertion(&rows, 36.0, None), InsertionPoint::Before(c));
}

#[test]
fn pointer_below_every_midpoint_inserts_at_end() {
    let (a, b, _) = three_ids();
    let rows = [ChildRow::new(a, 0.0, 24.0), ChildRow::new(b, 24.0, 24.0)];

    assert_eq!(resolve_insertion(&rows, 60.0, None), InsertionPoint::End);
}

#[test]
fn empty_container_always_inserts_at_end() {
    assert_eq!(resolve_insertion(&[], 0.0, None), InsertionPoint::End);
}

#[test]
fn dragged_node_is_never_its_own_reference() {
    let (a, b, _) = three_ids();
    let rows = [ChildRow::new(a, 0.0, 24.0), ChildRow::new(b, 24.0, 24.0)];

    // Pointer over a's row while dragging a: b becomes the reference.
    assert_eq!(
        resolve_insertion(&rows, 5.0, Some(a)),
        InsertionPoint::Before(b)
    );
    // Dragging a with the pointer past b's midpoint: end of list.
    assert_eq!(resolve_insertion(&rows, 40.0, Some(a)), InsertionPoint::End);
}

#[test]
fn insertion_index_translates_reference_and_end() {
    let (a, b, c) = three_ids();
    let children = [a, b];

    assert_eq!(insertion_index(&children, InsertionPoint::Before(a)), 0);
    assert_eq!(insertion_index(&children, InsertionPoint::Before(b)), 1);
    assert_eq!(insertion_index(&children, InsertionPoint::End), 2);
    // A stale reference degrades to append.
    assert_eq!(insertion_index(&children, InsertionPoint::Before(c)), 2);
}
