use policytree_core::{
    ChildRow, DragPayload, GestureCoordinator, InsertionPoint, KindCounts, MutationEngine, NodeId,
    NodeKind, NodeSnapshot, StatusTone, TreeObserver,
};

#[derive(Default)]
struct RecordingObserver {
    statuses: Vec<(String, StatusTone)>,
}

impl TreeObserver for RecordingObserver {
    fn tree_changed(&mut self, _roots: &[NodeSnapshot]) {}

    fn container_badge_changed(&mut self, _container: NodeId, _child_count: usize, _is_empty: bool) {
    }

    fn status_message(&mut self, text: &str, tone: StatusTone) {
        self.statuses.push((text.to_string(), tone));
    }

    fn global_counts_changed(&mut self, _counts: &KindCounts) {}
}

const ROW_HEIGHT: f64 = 24.0;

fn setup() -> GestureCoordinator<RecordingObserver> {
    GestureCoordinator::new(MutationEngine::new(RecordingObserver::default()))
}

/// Lays the container's children out as a uniform vertical stack.
fn rows_of(coordinator: &GestureCoordinator<RecordingObserver>, target: Option<NodeId>) -> Vec<ChildRow> {
    coordinator
        .engine()
        .children_of(target)
        .iter()
        .enumerate()
        .map(|(index, id)| ChildRow::new(*id, index as f64 * ROW_HEIGHT, ROW_HEIGHT))
        .collect()
}

/// Pointer height that lands above the midpoint of row `index`.
fn above_row(index: usize) -> f64 {
    index as f64 * ROW_HEIGHT + 2.0
}

/// Pointer height below every row.
fn below_all(row_count: usize) -> f64 {
    row_count as f64 * ROW_HEIGHT + 10.0
}

#[test]
fn pick_up_unknown_node_stays_idle() {
    let mut coordinator = setup();
    let node = coordinator.engine_mut().create(NodeKind::Policy, None, 0).unwrap();
    coordinator.engine_mut().delete(node).unwrap();

    coordinator.pick_up_node(node);
    assert!(!coordinator.is_armed());
}

#[test]
fn pick_up_arms_move_payload() {
    let mut coordinator = setup();
    let node = coordinator.engine_mut().create(NodeKind::Policy, None, 0).unwrap();

    coordinator.pick_up_node(node);
    assert!(coordinator.is_armed());
    assert_eq!(coordinator.payload(), Some(DragPayload::Move(node)));
}

#[test]
fn drag_over_while_idle_returns_no_hint() {
    let coordinator = setup();
    assert_eq!(coordinator.drag_over(&[], 10.0), None);
}

#[test]
fn drag_over_excludes_the_dragged_row() {
    let mut coordinator = setup();
    let engine = coordinator.engine_mut();
    let first = engine.create(NodeKind::Policy, None, 0).unwrap();
    let second = engine.create(NodeKind::Script, None, 1).unwrap();

    coordinator.pick_up_node(first);
    let rows = rows_of(&coordinator, None);

    // Pointer over the dragged node's own row: the next sibling is the
    // reference, not the dragged node itself.
    let hint = coordinator.drag_over(&rows, above_row(0)).unwrap();
    assert_eq!(hint, InsertionPoint::Before(second));
}

#[test]
fn drop_moves_node_before_resolved_reference() {
    let mut coordinator = setup();
    let engine = coordinator.engine_mut();
    let group = engine.create(NodeKind::Group, None, 0).unwrap();
    let policy = engine.create(NodeKind::Policy, Some(group), 0).unwrap();
    let nested = engine.create(NodeKind::Group, Some(group), 1).unwrap();

    coordinator.pick_up_node(nested);
    let rows = rows_of(&coordinator, Some(group));
    coordinator.drop(Some(group), &rows, above_row(0));

    assert!(!coordinator.is_armed());
    assert_eq!(coordinator.engine().children_of(Some(group)), &[nested, policy]);
}

#[test]
fn drop_creates_template_at_end_of_list() {
    let mut coordinator = setup();
    let group = coordinator.engine_mut().create(NodeKind::Group, None, 0).unwrap();
    let existing = coordinator
        .engine_mut()
        .create(NodeKind::Policy, Some(group), 0)
        .unwrap();

    coordinator.pick_up_template(NodeKind::Script);
    let rows = rows_of(&coordinator, Some(group));
    coordinator.drop(Some(group), &rows, below_all(rows.len()));

    assert!(!coordinator.is_armed());
    let children = coordinator.engine().children_of(Some(group));
    assert_eq!(children.len(), 2);
    assert_eq!(children[0], existing);
    let created = coordinator.engine().resolve(children[1]).unwrap();
    assert_eq!(created.kind, NodeKind::Script);
}

#[test]
fn drop_at_own_position_reports_already_in_place() {
    let mut coordinator = setup();
    let engine = coordinator.engine_mut();
    let group = engine.create(NodeKind::Group, None, 0).unwrap();
    engine.create(NodeKind::Policy, Some(group), 0).unwrap();
    let trailing = engine.create(NodeKind::Script, Some(group), 1).unwrap();

    coordinator.pick_up_node(trailing);
    let rows = rows_of(&coordinator, Some(group));
    coordinator.drop(Some(group), &rows, below_all(rows.len()));

    let (text, tone) = coordinator.engine().observer().statuses.last().unwrap().clone();
    assert_eq!(text, "Item already in place.");
    assert_eq!(tone, StatusTone::Info);
}

#[test]
fn disposal_deletes_move_payload() {
    let mut coordinator = setup();
    let group = coordinator.engine_mut().create(NodeKind::Group, None, 0).unwrap();
    let node = coordinator
        .engine_mut()
        .create(NodeKind::Policy, Some(group), 0)
        .unwrap();

    coordinator.pick_up_node(node);
    coordinator.drop_on_disposal();

    assert!(!coordinator.is_armed());
    assert!(!coordinator.engine().contains(node));
    assert_eq!(coordinator.engine().child_count(Some(group)), 0);
}

#[test]
fn disposal_discards_create_payload_without_mutation() {
    let mut coordinator = setup();
    let before = coordinator.engine().kind_counts();

    coordinator.pick_up_template(NodeKind::Application);
    coordinator.drop_on_disposal();

    assert!(!coordinator.is_armed());
    assert_eq!(coordinator.engine().kind_counts(), before);
}

#[test]
fn cancel_discards_payload_without_status() {
    let mut coordinator = setup();
    let node = coordinator.engine_mut().create(NodeKind::Policy, None, 0).unwrap();
    let published_before = coordinator.engine().observer().statuses.len();

    coordinator.pick_up_node(node);
    coordinator.cancel();

    assert!(!coordinator.is_armed());
    assert!(coordinator.engine().contains(node));
    assert_eq!(coordinator.engine().observer().statuses.len(), published_before);
}

#[test]
fn drop_while_idle_is_ignored() {
    let mut coordinator = setup();
    let group = coordinator.engine_mut().create(NodeKind::Group, None, 0).unwrap();
    let before = coordinator.engine().snapshot();

    let rows = rows_of(&coordinator, Some(group));
    coordinator.drop(Some(group), &rows, 10.0);

    assert_eq!(coordinator.engine().snapshot(), before);
}

#[test]
fn rejected_move_still_ends_the_gesture() {
    let mut coordinator = setup();
    let engine = coordinator.engine_mut();
    let outer = engine.create(NodeKind::Group, None, 0).unwrap();
    let inner = engine.create(NodeKind::Group, Some(outer), 0).unwrap();
    let before = coordinator.engine().snapshot();

    coordinator.pick_up_node(outer);
    let rows = rows_of(&coordinator, Some(inner));
    coordinator.drop(Some(inner), &rows, 10.0);

    assert!(!coordinator.is_armed());
    assert_eq!(coordinator.engine().snapshot(), before);
    let (text, tone) = coordinator.engine().observer().statuses.last().unwrap().clone();
    assert_eq!(text, "Cannot move a group inside one of its descendants.");
    assert_eq!(tone, StatusTone::Warning);
}

#[test]
fn rename_and_collapse_pass_through_to_engine() {
    let mut coordinator = setup();
    let group = coordinator.engine_mut().create(NodeKind::Group, None, 0).unwrap();

    coordinator.rename(group, "Workstations").unwrap();
    assert_eq!(
        coordinator.engine().resolve(group).unwrap().display_name,
        "Workstations"
    );

    assert!(coordinator.toggle_collapsed(group).unwrap());
    assert!(coordinator.engine().resolve(group).unwrap().collapsed);
}
