//! To-many (feed) relationship materialization.

use inlay_tests::prelude::*;
use pretty_assertions::assert_eq;

fn parts(entries: Vec<EntityNode>) -> RelationshipEdge {
    RelationshipEdge::new("Parts").with_feed(entries)
}

fn part_ids(root: &EntityNode) -> Vec<Marker> {
    root.get_edge("Parts")
        .and_then(RelationshipEdge::feed)
        .map(|feed| feed.entries.iter().map(|e| e.id.clone()).collect())
        .unwrap_or_default()
}

#[test]
fn test_feed_bulk_create() {
    init_tracing();

    // GIVEN a new widget with two new parts
    let catalog = catalog();
    let mut store = RecordingStore::new();
    let mut root = EntityNode::new("Widgets").edge(parts(vec![
        EntityNode::new("Widgets").property("name", json!("Left")),
        EntityNode::new("Widgets").property("name", json!("Right")),
    ]));

    // WHEN processing the payload
    let widget = Materializer::new(&catalog, &mut store)
        .process_payload(&mut root)
        .unwrap();

    // THEN one bulk create carries both bags, followed by one hook per entry
    verify_sequence(&store, &["create", "create_bulk", "hook", "hook"]).unwrap();
    assert_eq!(
        store.calls()[1],
        StoreCall::CreateBulk {
            set: "Widgets".into(),
            properties: vec![props! { "name" => "Left" }, props! { "name" => "Right" }],
        }
    );

    // AND each entry carries its own created key
    assert_eq!(
        part_ids(&root),
        vec![
            Marker::Resolved(widget_key("2").unwrap()),
            Marker::Resolved(widget_key("3").unwrap()),
        ]
    );
    assert_eq!(store.inner().linked(widget.id, "Parts").len(), 2);
}

#[test]
fn test_feed_with_composite_keys() {
    let catalog = catalog();
    let mut store = RecordingStore::new();
    let mut root = EntityNode::new("Widgets").edge(RelationshipEdge::new("Lines").with_feed(vec![
        EntityNode::new("Lines")
            .property("OrderID", json!("9"))
            .property("Code", json!("a"))
            .property("qty", json!(1)),
        EntityNode::new("Lines")
            .property("OrderID", json!(9))
            .property("Code", json!("b"))
            .property("qty", json!(2)),
    ]));

    Materializer::new(&catalog, &mut store)
        .process_payload(&mut root)
        .unwrap();

    let lines = root.get_edge("Lines").and_then(RelationshipEdge::feed).unwrap();
    let keys: Vec<String> = lines
        .entries
        .iter()
        .map(|e| e.id.resolved().unwrap().to_string())
        .collect();
    assert_eq!(keys, vec!["OrderID=9L,Code='a'", "OrderID=9L,Code='b'"]);
}

#[test]
fn test_feed_bulk_update() {
    // GIVEN two stored parts and a linked feed renaming them
    let catalog = catalog();
    let widgets = catalog.resolve_resource_set("Widgets").unwrap();
    let mut store = RecordingStore::new();
    store.seed(widgets, props! { "id" => 10i64 }).unwrap();
    store.seed(widgets, props! { "id" => 11i64 }).unwrap();
    let mut root = EntityNode::new("Widgets").edge(
        parts(vec![
            EntityNode::new("Widgets")
                .with_id("Widgets(10)")
                .property("name", json!("Ten")),
            EntityNode::new("Widgets")
                .property("id", json!(11))
                .property("name", json!("Eleven")),
        ])
        .with_url("Widgets(10)/Parts"),
    );

    // WHEN processing the payload
    Materializer::new(&catalog, &mut store)
        .process_payload(&mut root)
        .unwrap();

    // THEN both entries go through a single bulk update
    Calls::new()
        .create(1)
        .fetch(2)
        .update_bulk(1)
        .hook(2)
        .nothing_else()
        .verify(&store)
        .unwrap();
    assert_eq!(
        part_ids(&root),
        vec![
            Marker::Resolved(widget_key("10").unwrap()),
            Marker::Resolved(widget_key("11").unwrap()),
        ]
    );
    let names: Vec<Option<&Value>> = store
        .inner()
        .resources("Widgets")
        .take(2)
        .map(|r| r.get("name"))
        .collect();
    assert_eq!(
        names,
        vec![Some(&Value::from("Ten")), Some(&Value::from("Eleven"))]
    );
}

#[test]
fn test_idempotent_reentry() {
    // GIVEN a payload whose feed was materialized
    let catalog = catalog();
    let widgets = catalog.resolve_resource_set("Widgets").unwrap();
    let mut store = RecordingStore::new();
    let mut root = EntityNode::new("Widgets").edge(parts(vec![
        EntityNode::new("Widgets"),
        EntityNode::new("Widgets"),
    ]));
    let widget = Materializer::new(&catalog, &mut store)
        .process_payload(&mut root)
        .unwrap();
    store.clear();

    // WHEN running the feed again
    let edge = root.edges.iter_mut().find(|e| e.name == "Parts").unwrap();
    Materializer::new(&catalog, &mut store)
        .materialize_edge(widgets, &widget, edge)
        .unwrap();

    // THEN no bulk call (nor any other call) is made
    Calls::new()
        .create_bulk(0)
        .update_bulk(0)
        .nothing_else()
        .verify(&store)
        .unwrap();
    assert_eq!(store.inner().len("Widgets"), 3);
}

#[test]
fn test_partially_processed_feed_is_skipped() {
    // GIVEN a feed whose first entry is marked but whose second is not
    let catalog = catalog();
    let widgets = catalog.resolve_resource_set("Widgets").unwrap();
    let mut store = RecordingStore::new();
    let source = store.seed(widgets, props!()).unwrap();
    let mut first = EntityNode::new("Widgets");
    first.id = Marker::Resolved(widget_key("1").unwrap());
    let mut edge = parts(vec![first, EntityNode::new("Widgets")]);

    // WHEN materializing the edge
    Materializer::new(&catalog, &mut store)
        .materialize_edge(widgets, &source, &mut edge)
        .unwrap();

    // THEN the whole feed is skipped, leaving the second entry untouched
    assert!(store.calls().is_empty());
    let entries = &edge.feed().unwrap().entries;
    assert_eq!(entries[1].id, Marker::Unset);
}

#[test]
fn test_partially_processed_feed_fails_processed_check() {
    // GIVEN a payload carrying a partially marked feed
    let catalog = catalog();
    let mut store = RecordingStore::new();
    let mut first = EntityNode::new("Widgets");
    first.id = Marker::Resolved(widget_key("1").unwrap());
    let mut root = EntityNode::new("Widgets").edge(parts(vec![first, EntityNode::new("Widgets")]));

    // WHEN processing the payload
    let err = Materializer::new(&catalog, &mut store)
        .process_payload(&mut root)
        .unwrap_err();

    // THEN the skipped entry is reported by the processed check
    assert_eq!(err.kind(), ErrorKind::Invariant);
    match err {
        MaterializeError::NotProcessed { path } => assert_eq!(path, "Widgets/Parts[1]"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_mixed_feed_is_rejected_before_writes() {
    let catalog = catalog();
    let mut store = RecordingStore::new();
    let mut root = EntityNode::new("Widgets").edge(parts(vec![
        EntityNode::new("Widgets"),
        EntityNode::new("Makers").property("code", json!("acme")),
    ]));

    let err = Materializer::new(&catalog, &mut store)
        .process_payload(&mut root)
        .unwrap_err();

    assert!(matches!(err, MaterializeError::MixedFeed { .. }));
    assert!(store.calls().is_empty());
}

#[test]
fn test_failed_bulk_create_leaves_entries_unmarked() {
    let catalog = catalog();
    let mut store = RecordingStore::new().fail_on("create_bulk");
    let mut root = EntityNode::new("Widgets").edge(parts(vec![EntityNode::new("Widgets")]));

    let err = Materializer::new(&catalog, &mut store)
        .process_payload(&mut root)
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Store);
    assert_eq!(part_ids(&root), vec![Marker::Unset]);
    assert_eq!(store.inner().len("Widgets"), 1);
}
