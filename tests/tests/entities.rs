//! Single-entity materialization: create and update of a root node.

use inlay_tests::prelude::*;

mod create {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_create_without_relationships() {
        init_tracing();

        // GIVEN a new widget with no edges
        let catalog = catalog();
        let mut store = RecordingStore::new();
        let mut root = EntityNode::new("Widgets")
            .property("name", json!("Cog"))
            .property("weight", json!(1.5));

        // WHEN processing the payload
        let created = Materializer::new(&catalog, &mut store)
            .process_payload(&mut root)
            .unwrap();

        // THEN exactly one create was issued
        Calls::new().create(1).nothing_else().verify(&store).unwrap();

        // AND the id descriptor mirrors the created key properties
        let key = root.id.resolved().unwrap();
        let id = created.get("id").unwrap().to_string();
        assert_eq!(key.pairs(), &[("id".to_string(), id)]);
        assert_eq!(key, &widget_key("1").unwrap());
    }

    #[test]
    fn test_created_key_is_echoed_into_properties() {
        let catalog = catalog();
        let mut store = RecordingStore::new();
        let mut root = EntityNode::new("Widgets").property("name", json!("Cog"));

        Materializer::new(&catalog, &mut store)
            .process_payload(&mut root)
            .unwrap();

        assert_eq!(root.properties.get("id"), Some(&json!(1)));
        assert_eq!(root.properties.get("name"), Some(&json!("Cog")));
    }

    #[test]
    fn test_create_passes_typed_properties() {
        // GIVEN a widget with a complex property
        let catalog = catalog();
        let mut store = RecordingStore::new();
        let mut root = EntityNode::new("Widgets")
            .property("name", json!("Cog"))
            .property("dimensions", json!({ "w": 2, "h": 3 }));

        // WHEN processing the payload
        Materializer::new(&catalog, &mut store)
            .process_payload(&mut root)
            .unwrap();

        // THEN the store saw typed values in payload order
        let dimensions = props! { "w" => 2i64, "h" => 3i64 };
        assert_eq!(
            store.calls(),
            vec![StoreCall::Create {
                set: "Widgets".into(),
                properties: props! {
                    "name" => "Cog",
                    "dimensions" => Value::Complex(dimensions),
                },
            }]
        );
    }

    #[test]
    fn test_unknown_property_fails_before_create() {
        let catalog = catalog();
        let mut store = RecordingStore::new();
        let mut root = EntityNode::new("Widgets").property("colour", json!("red"));

        let err = Materializer::new(&catalog, &mut store)
            .process_payload(&mut root)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::Structural);
        assert!(store.calls().is_empty());
    }

    #[test]
    fn test_store_failure_is_propagated() {
        // GIVEN a store whose creates fail
        let catalog = catalog();
        let mut store = RecordingStore::new().fail_on("create");
        let mut root = EntityNode::new("Widgets");

        // WHEN processing the payload
        let err = Materializer::new(&catalog, &mut store)
            .process_payload(&mut root)
            .unwrap_err();

        // THEN the store error surfaces unchanged and the node stays unmarked
        assert_eq!(err.kind(), ErrorKind::Store);
        assert!(matches!(
            err,
            MaterializeError::Store(StoreError::Backend { .. })
        ));
        assert_eq!(root.id, Marker::Unset);
        Calls::new().create(1).nothing_else().verify(&store).unwrap();
    }
}

mod update {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_update_via_identifier() {
        init_tracing();

        // GIVEN a stored widget 7
        let catalog = catalog();
        let widgets = catalog.resolve_resource_set("Widgets").unwrap();
        let mut store = RecordingStore::new();
        store
            .seed(widgets, props! { "id" => 7i64, "name" => "Old" })
            .unwrap();
        let mut root = EntityNode::new("Widgets")
            .with_id("http://host/service.svc/Widgets(7)")
            .property("name", json!("New"));

        // WHEN processing the payload
        let updated = Materializer::new(&catalog, &mut store)
            .process_payload(&mut root)
            .unwrap();

        // THEN the key was fetched then updated, once each
        verify_sequence(&store, &["fetch", "update"]).unwrap();
        assert_eq!(root.id.resolved().unwrap().get("id"), Some("7"));
        assert_eq!(updated.get("name"), Some(&Value::from("New")));
        assert_eq!(store.inner().len("Widgets"), 1);
    }

    #[test]
    fn test_update_with_composite_key() {
        // GIVEN a stored order line
        let catalog = catalog();
        let lines = catalog.resolve_resource_set("Lines").unwrap();
        let mut store = RecordingStore::new();
        store
            .seed(lines, props! { "OrderID" => 3i64, "Code" => "a", "qty" => 1i64 })
            .unwrap();
        let mut root = EntityNode::new("Lines")
            .with_id("Lines(Code='a',OrderID=3)")
            .property("qty", json!(5));

        // WHEN processing the payload
        let updated = Materializer::new(&catalog, &mut store)
            .process_payload(&mut root)
            .unwrap();

        // THEN the descriptor holds canonical literals in declared key order
        assert_eq!(updated.get("qty"), Some(&Value::Int(5)));
        assert_eq!(
            root.id.resolved().unwrap().to_string(),
            "OrderID=3L,Code='a'"
        );
    }

    #[test]
    fn test_update_of_missing_resource() {
        let catalog = catalog();
        let mut store = RecordingStore::new();
        let mut root = EntityNode::new("Widgets").with_id("Widgets(42)");

        let err = Materializer::new(&catalog, &mut store)
            .process_payload(&mut root)
            .unwrap_err();

        assert!(matches!(err, MaterializeError::TargetNotFound { .. }));
        Calls::new().fetch(1).nothing_else().verify(&store).unwrap();
    }

    #[test]
    fn test_malformed_identifier() {
        let catalog = catalog();
        let mut store = RecordingStore::new();
        let mut root = EntityNode::new("Widgets").with_id("Widgets(id=7");

        let err = Materializer::new(&catalog, &mut store)
            .process_payload(&mut root)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::KeyPredicate);
        assert!(store.calls().is_empty());
    }

    #[test]
    fn test_key_of_wrong_kind() {
        let catalog = catalog();
        let mut store = RecordingStore::new();
        let mut root = EntityNode::new("Widgets").with_id("Widgets('seven')");

        let err = Materializer::new(&catalog, &mut store)
            .process_payload(&mut root)
            .unwrap_err();

        assert_eq!(err.kind(), ErrorKind::KeyPredicate);
        assert!(store.calls().is_empty());
    }
}
