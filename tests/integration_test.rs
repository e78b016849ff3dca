use erp_sync::config::SyncConfig;
use erp_sync::engine::{Catalog, Inventory, MemorySink, SinkLevel};
use erp_sync::feed::{parse_feed, Seed};
use erp_sync::lifecycle::SyncSystem;
use erp_sync::model::{
    ActionOutcome, CatalogProduct, FailureKind, InventoryRecord, ProductStatus, StockStatus,
};

const FEED: &str = r#"[
    {"sku": "A", "action": "enable"},
    {"sku": "B", "action": "new", "name": "X", "price": -1, "attribute_set_id": 4,
     "type_id": "simple", "status": 1, "visibility": 4, "sources": []},
    {"sku": "C", "action": "new", "name": "Gadget", "price": "19.90", "attribute_set_id": 4,
     "type_id": "simple", "status": 1, "visibility": 4,
     "sources": [{"source_code": "wh-1", "quantity": 3}, {"quantity": 0}]},
    {"sku": "C", "action": "update", "price": 21,
     "sources": [{"source_code": "wh-1", "quantity": 3}, {"source_code": "default", "quantity": 2}]},
    {"action": "disable"}
]"#;

fn seed() -> Seed {
    Seed {
        products: vec![CatalogProduct::new("A", "Widget", 10.0).with_status(ProductStatus::Disabled)],
        inventory: vec![InventoryRecord::new("A", "default", 4.0)],
    }
}

/// Full batch against the real catalog and inventory actors.
#[tokio::test]
async fn test_full_sync_system_integration() {
    let system = SyncSystem::new();
    system.seed(seed()).await.expect("Failed to seed");

    let records = parse_feed(FEED).expect("Feed should parse");
    let sink = MemorySink::new();
    let summary = {
        let orchestrator = system.orchestrator(&SyncConfig::default());
        orchestrator.run(&records, &sink).await
    };

    // A enabled, B rejected by validation, C created then repriced and restocked, last record has no sku
    assert_eq!(summary.enabled(), 1);
    assert_eq!(summary.created(), 1);
    assert_eq!(summary.updated(), 1);
    assert_eq!(summary.disabled(), 0);

    let reasons: Vec<_> = summary.failure_reasons().collect();
    assert_eq!(
        reasons,
        vec![
            "Product with SKU \"B\" could not be created: price cannot be negative (-1.00)",
            "Product with SKU is missing: SKU is missing.",
        ]
    );
    assert_eq!(summary.failures()[0].kind, FailureKind::Validation);
    assert!(matches!(summary.outcomes()[1].outcome, ActionOutcome::Skipped(_)));

    // B never reached the catalog
    assert!(!system.catalog_client.exists("B").await.unwrap());

    let a = system.catalog_client.get("A").await.unwrap();
    assert_eq!(a.status, ProductStatus::Enabled);

    let c = system.catalog_client.get("C").await.unwrap();
    assert_eq!(c.name, "Gadget");
    assert_eq!(c.price, 21.0);

    let stock = system.inventory_client.list_by_sku("C").await.unwrap();
    let locations: Vec<_> = stock
        .iter()
        .map(|r| (r.location_code.as_str(), r.quantity, r.status))
        .collect();
    assert_eq!(
        locations,
        vec![
            ("wh-1", 3.0, StockStatus::InStock),
            ("default", 2.0, StockStatus::InStock),
        ]
    );

    assert_eq!(
        sink.messages(SinkLevel::Info),
        vec![
            "Product with SKU \"A\" has been enabled.",
            r#"Created SKU: C | Name: Gadget | Price: 19.90 | Sources: [{"source_code":"wh-1","quantity":3.0},{"quantity":0.0}]"#,
            r#"Updated SKU: C | Price: 21.00 | Sources: [{"source_code":"wh-1","quantity":3.0},{"source_code":"default","quantity":2.0}]"#,
            "Total updated: 1 | created: 1 | disabled: 0 | enabled: 1",
        ]
    );

    system.shutdown().await.expect("Shutdown failed");
}

/// Re-running the same update touches nothing the second time.
#[tokio::test]
async fn test_reapplying_an_update_is_idempotent() {
    let system = SyncSystem::new();
    system
        .seed(Seed {
            products: vec![CatalogProduct::new("A", "Widget", 10.0)],
            inventory: Vec::new(),
        })
        .await
        .unwrap();

    let records = parse_feed(r#"[{"sku": "A", "action": "update", "sources": [{"source_code": "default", "quantity": 5}]}]"#)
        .unwrap();
    let config = SyncConfig::default();

    let first = {
        let orchestrator = system.orchestrator(&config);
        orchestrator.run(&records, &MemorySink::new()).await
    };
    assert_eq!(first.updated(), 1);
    let stock = system.inventory_client.list_by_sku("A").await.unwrap();
    assert_eq!(stock, vec![InventoryRecord::new("A", "default", 5.0)]);

    let sink = MemorySink::new();
    let second = {
        let orchestrator = system.orchestrator(&config);
        orchestrator.run(&records, &sink).await
    };
    assert!(second.nothing_processed());
    assert_eq!(
        sink.messages(SinkLevel::Comment),
        vec![
            "No records were processed.",
            "Reasons:",
            "Product with SKU \"A\" could not be updated: no changes detected.",
        ]
    );
    assert_eq!(system.inventory_client.list_by_sku("A").await.unwrap().len(), 1);

    system.shutdown().await.expect("Shutdown failed");
}

/// Collaborator rejections surface as per-record failures, not batch errors.
#[tokio::test]
async fn test_missing_product_update_fails_softly() {
    let system = SyncSystem::new();
    let records = parse_feed(
        r#"[{"sku": "GHOST", "action": "update", "price": 5, "sources": []},
            {"sku": "GHOST", "action": "disable"}]"#,
    )
    .unwrap();

    let sink = MemorySink::new();
    let summary = {
        let orchestrator = system.orchestrator(&SyncConfig::default());
        orchestrator.run(&records, &sink).await
    };

    assert!(summary.nothing_processed());
    assert!(summary
        .failures()
        .iter()
        .all(|f| f.kind == FailureKind::Collaborator));
    assert_eq!(
        summary.failures()[1].reason,
        "Product with SKU \"GHOST\" could not be disabled: Product not found: GHOST"
    );
    assert_eq!(sink.messages(SinkLevel::Error).len(), 2);

    system.shutdown().await.expect("Shutdown failed");
}
