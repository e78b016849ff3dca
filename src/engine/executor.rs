//! Applies one validated record to the catalog and inventory.
//!
//! Every transition checks its preconditions before touching anything, so a
//! conflict ("already exists", "no changes detected", ...) never causes a
//! write. Collaborator failures are caught here and turned into a
//! [`Failure`]; nothing escapes [`Executor::execute`].

use crate::catalog_actor::CatalogError;
use crate::config::{CreateDefaults, SyncConfig};
use crate::engine::{Catalog, Inventory, OutputSink, Reconciler};
use crate::inventory_actor::InventoryError;
use crate::model::{
    ActionKind, ActionOutcome, CatalogProduct, Failure, FailureKind, LocationQuantity, Numeric,
    ProductRecord, ProductStatus,
};
use thiserror::Error;
use tracing::{debug, instrument, warn};

/// Why a transition did not happen. The `Display` text is the operator message.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum ExecutionError {
    #[error("Product with SKU is missing: SKU is missing.")]
    MissingSku,

    #[error("Product with SKU \"{sku}\" could not be created: already exists.")]
    AlreadyExists { sku: String },

    #[error("Product with SKU \"{sku}\" could not be {}: price cannot be negative ({price:.2})", .kind.verb())]
    NegativePrice {
        sku: String,
        kind: ActionKind,
        price: f64,
    },

    #[error("Product with SKU \"{sku}\" could not be updated: no changes detected.")]
    NoChanges { sku: String },

    #[error("Product with SKU \"{sku}\" could not be enabled: already enabled.")]
    AlreadyEnabled { sku: String },

    #[error("Product with SKU \"{sku}\" could not be disabled: already disabled.")]
    AlreadyDisabled { sku: String },

    #[error("Product with SKU \"{sku}\" could not be {}: {source}", .kind.verb())]
    Catalog {
        sku: String,
        kind: ActionKind,
        source: CatalogError,
    },

    #[error("Product with SKU \"{sku}\" could not be {}: {source}", .kind.verb())]
    Inventory {
        sku: String,
        kind: ActionKind,
        source: InventoryError,
    },
}

impl ExecutionError {
    pub fn kind(&self) -> FailureKind {
        match self {
            ExecutionError::MissingSku => FailureKind::Structural,
            ExecutionError::NegativePrice { .. } => FailureKind::Validation,
            ExecutionError::AlreadyExists { .. }
            | ExecutionError::NoChanges { .. }
            | ExecutionError::AlreadyEnabled { .. }
            | ExecutionError::AlreadyDisabled { .. } => FailureKind::Conflict,
            ExecutionError::Catalog { .. } | ExecutionError::Inventory { .. } => {
                FailureKind::Collaborator
            }
        }
    }

    pub fn to_failure(&self) -> Failure {
        Failure::new(self.kind(), self.to_string())
    }

    fn catalog(kind: ActionKind, sku: &str) -> impl FnOnce(CatalogError) -> Self + '_ {
        move |source| ExecutionError::Catalog {
            sku: sku.to_string(),
            kind,
            source,
        }
    }

    fn inventory(kind: ActionKind, sku: &str) -> impl FnOnce(InventoryError) -> Self + '_ {
        move |source| ExecutionError::Inventory {
            sku: sku.to_string(),
            kind,
            source,
        }
    }
}

/// Runs the four transitions against a [`Catalog`] and an [`Inventory`].
pub struct Executor<C, I> {
    catalog: C,
    inventory: I,
    reconciler: Reconciler,
    defaults: CreateDefaults,
}

impl<C: Catalog, I: Inventory> Executor<C, I> {
    pub fn new(catalog: C, inventory: I, config: &SyncConfig) -> Self {
        Self {
            catalog,
            inventory,
            reconciler: Reconciler::new(config.default_location.clone()),
            defaults: config.defaults.clone(),
        }
    }

    /// Attempts `kind` for `record` and reports the result line to `sink`.
    ///
    /// Success lines go to `info`. Collaborator failures are also echoed to
    /// `error`; conflicts are only returned, the orchestrator reports them.
    pub async fn execute(
        &self,
        kind: ActionKind,
        record: &ProductRecord,
        sink: &dyn OutputSink,
    ) -> ActionOutcome {
        match self.transition(kind, record).await {
            Ok(message) => {
                sink.info(&message);
                ActionOutcome::succeeded(kind)
            }
            Err(err) => {
                let failure = err.to_failure();
                if failure.kind == FailureKind::Collaborator {
                    warn!(error = %err, "Collaborator failed");
                    sink.error(&failure.reason);
                } else {
                    debug!(reason = %failure.reason, "Transition refused");
                }
                ActionOutcome::Failed(failure)
            }
        }
    }

    /// Runs one transition, returning the success message.
    pub async fn transition(
        &self,
        kind: ActionKind,
        record: &ProductRecord,
    ) -> Result<String, ExecutionError> {
        let sku = record.sku().ok_or(ExecutionError::MissingSku)?;
        match kind {
            ActionKind::Create => self.create(sku, record).await,
            ActionKind::Update => self.update(sku, record).await,
            ActionKind::Enable => self.set_status(sku, kind, ProductStatus::Enabled).await,
            ActionKind::Disable => self.set_status(sku, kind, ProductStatus::Disabled).await,
        }
    }

    #[instrument(skip(self, record))]
    async fn create(&self, sku: &str, record: &ProductRecord) -> Result<String, ExecutionError> {
        let kind = ActionKind::Create;
        let exists = self
            .catalog
            .exists(sku)
            .await
            .map_err(ExecutionError::catalog(kind, sku))?;
        if exists {
            return Err(ExecutionError::AlreadyExists {
                sku: sku.to_string(),
            });
        }

        let price = number(&record.price).unwrap_or(self.defaults.price);
        if price < 0.0 {
            return Err(ExecutionError::NegativePrice {
                sku: sku.to_string(),
                kind,
                price,
            });
        }

        let product = CatalogProduct {
            sku: sku.to_string(),
            name: record
                .name
                .clone()
                .unwrap_or_else(|| self.defaults.name.clone()),
            price,
            attribute_set_id: integer(&record.attribute_set_id)
                .unwrap_or(self.defaults.attribute_set_id),
            status: integer(&record.status)
                .map(ProductStatus::from_flag)
                .unwrap_or(self.defaults.status),
            visibility: integer(&record.visibility).unwrap_or(self.defaults.visibility),
            type_id: record
                .type_id
                .clone()
                .unwrap_or_else(|| self.defaults.type_id.clone()),
        };
        let message = format!(
            "Created SKU: {} | Name: {} | Price: {:.2} | Sources: {}",
            sku,
            product.name,
            product.price,
            sources_json(record.locations())
        );

        self.catalog
            .save(product)
            .await
            .map_err(ExecutionError::catalog(kind, sku))?;

        let plan = self.reconciler.reconcile(sku, record.locations(), &[]);
        if plan.changed {
            self.inventory
                .save_batch(plan.writes)
                .await
                .map_err(ExecutionError::inventory(kind, sku))?;
        }

        Ok(message)
    }

    #[instrument(skip(self, record))]
    async fn update(&self, sku: &str, record: &ProductRecord) -> Result<String, ExecutionError> {
        let kind = ActionKind::Update;
        let mut product = self
            .catalog
            .get(sku)
            .await
            .map_err(ExecutionError::catalog(kind, sku))?;

        let new_price = number(&record.price).filter(|price| *price != product.price);
        if let Some(price) = new_price.filter(|price| *price < 0.0) {
            return Err(ExecutionError::NegativePrice {
                sku: sku.to_string(),
                kind,
                price,
            });
        }

        let plan = self
            .reconciler
            .reconcile_with(&self.inventory, sku, record.locations())
            .await
            .map_err(ExecutionError::inventory(kind, sku))?;

        if new_price.is_none() && !plan.changed {
            return Err(ExecutionError::NoChanges {
                sku: sku.to_string(),
            });
        }

        let mut message = format!("Updated SKU: {}", sku);
        if let Some(price) = new_price {
            message.push_str(&format!(" | Price: {:.2}", price));
        }

        if plan.changed {
            message.push_str(&format!(" | Sources: {}", sources_json(record.locations())));
            self.inventory
                .save_batch(plan.writes)
                .await
                .map_err(ExecutionError::inventory(kind, sku))?;
        }

        if let Some(price) = new_price {
            product.price = price;
            self.catalog
                .save(product)
                .await
                .map_err(ExecutionError::catalog(kind, sku))?;
        }

        Ok(message)
    }

    #[instrument(skip(self))]
    async fn set_status(
        &self,
        sku: &str,
        kind: ActionKind,
        target: ProductStatus,
    ) -> Result<String, ExecutionError> {
        let mut product = self
            .catalog
            .get(sku)
            .await
            .map_err(ExecutionError::catalog(kind, sku))?;

        if product.status == target {
            let sku = sku.to_string();
            return Err(match target {
                ProductStatus::Enabled => ExecutionError::AlreadyEnabled { sku },
                ProductStatus::Disabled => ExecutionError::AlreadyDisabled { sku },
            });
        }

        product.status = target;
        self.catalog
            .save(product)
            .await
            .map_err(ExecutionError::catalog(kind, sku))?;

        Ok(format!(
            "Product with SKU \"{}\" has been {}.",
            sku,
            kind.verb()
        ))
    }
}

fn number(value: &Option<Numeric>) -> Option<f64> {
    value.as_ref().and_then(Numeric::as_f64)
}

fn integer(value: &Option<Numeric>) -> Option<i64> {
    value.as_ref().and_then(Numeric::as_i64)
}

fn sources_json(entries: &[LocationQuantity]) -> String {
    serde_json::to_string(entries).unwrap_or_else(|_| "[]".to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clients::{CatalogClient, InventoryClient};
    use crate::engine::{MemorySink, SinkLevel};
    use crate::framework::mock::{create_mock_client, expect_action, expect_get, MockClient};
    use crate::framework::FrameworkError;
    use crate::inventory_actor::{StockAction, StockActionResult};
    use crate::model::{InventoryRecord, SkuStock};

    struct Fixture {
        catalog: MockClient<CatalogProduct>,
        inventory: MockClient<SkuStock>,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                catalog: MockClient::new(),
                inventory: MockClient::new(),
            }
        }

        fn executor(&self) -> Executor<CatalogClient, InventoryClient> {
            Executor::new(
                CatalogClient::new(self.catalog.client()),
                InventoryClient::new(self.inventory.client()),
                &SyncConfig::default(),
            )
        }

        fn verify(&self) {
            self.catalog.verify();
            self.inventory.verify();
        }
    }

    fn stored(sku: &str, price: f64) -> CatalogProduct {
        CatalogProduct::new(sku, "Widget", price)
    }

    #[tokio::test]
    async fn test_create_writes_product_then_stock() {
        let mut fx = Fixture::new();
        fx.catalog.expect_exists("S".to_string()).return_ok(false);
        fx.catalog.expect_save().return_ok("S".to_string());
        fx.inventory
            .expect_action("S".to_string())
            .return_ok(StockActionResult::Apply(1));

        let record = ProductRecord::new("S", "new")
            .with_name("Widget")
            .with_price(10.0)
            .with_location(LocationQuantity::new("default", 5.0));
        let sink = MemorySink::new();
        let outcome = fx.executor().execute(ActionKind::Create, &record, &sink).await;

        assert_eq!(outcome, ActionOutcome::Created);
        assert_eq!(
            sink.messages(SinkLevel::Info),
            vec![r#"Created SKU: S | Name: Widget | Price: 10.00 | Sources: [{"source_code":"default","quantity":5.0}]"#]
        );
        let saved = fx.catalog.saved();
        assert_eq!(saved[0].type_id, "simple");
        assert_eq!(saved[0].attribute_set_id, 4);
        fx.verify();
    }

    #[tokio::test]
    async fn test_create_existing_sku_sends_no_write() {
        let mut fx = Fixture::new();
        fx.catalog.expect_exists("S".to_string()).return_ok(true);

        let record = ProductRecord::new("S", "new").with_name("Widget");
        let outcome = fx
            .executor()
            .execute(ActionKind::Create, &record, &MemorySink::new())
            .await;

        assert_eq!(
            outcome,
            ActionOutcome::Failed(Failure::new(
                FailureKind::Conflict,
                "Product with SKU \"S\" could not be created: already exists."
            ))
        );
        assert!(fx.catalog.saved().is_empty());
        fx.verify();
    }

    #[tokio::test]
    async fn test_update_with_nothing_new_is_no_changes() {
        let mut fx = Fixture::new();
        fx.catalog
            .expect_get("S".to_string())
            .return_ok(Some(stored("S", 12.5)));
        fx.inventory.expect_get("S".to_string()).return_ok(Some(SkuStock {
            sku: "S".to_string(),
            records: vec![InventoryRecord::new("S", "default", 5.0)],
        }));

        let record = ProductRecord::new("S", "update")
            .with_price("12.50")
            .with_location(LocationQuantity::new("default", 5.0));
        let outcome = fx
            .executor()
            .execute(ActionKind::Update, &record, &MemorySink::new())
            .await;

        assert_eq!(
            outcome,
            ActionOutcome::Failed(Failure::new(
                FailureKind::Conflict,
                "Product with SKU \"S\" could not be updated: no changes detected."
            ))
        );
        assert!(fx.catalog.saved().is_empty());
        fx.verify();
    }

    #[tokio::test]
    async fn test_update_price_only() {
        let mut fx = Fixture::new();
        fx.catalog
            .expect_get("S".to_string())
            .return_ok(Some(stored("S", 10.0)));
        fx.inventory.expect_get("S".to_string()).return_ok(None);
        fx.catalog.expect_save().return_ok("S".to_string());

        let record = ProductRecord::new("S", "update").with_price(12.5);
        let sink = MemorySink::new();
        let outcome = fx.executor().execute(ActionKind::Update, &record, &sink).await;

        assert_eq!(outcome, ActionOutcome::Updated);
        assert_eq!(sink.messages(SinkLevel::Info), vec!["Updated SKU: S | Price: 12.50"]);
        assert_eq!(fx.catalog.saved()[0].price, 12.5);
        fx.verify();
    }

    #[tokio::test]
    async fn test_update_line_lists_every_desired_location() {
        let mut catalog = MockClient::<CatalogProduct>::new();
        catalog
            .expect_get("S".to_string())
            .return_ok(Some(stored("S", 10.0)));
        let (inner, mut receiver) = create_mock_client::<SkuStock>(10);
        let executor = Executor::new(
            CatalogClient::new(catalog.client()),
            InventoryClient::new(inner),
            &SyncConfig::default(),
        );

        let store = tokio::spawn(async move {
            let (_, responder) = expect_get(&mut receiver).await.expect("Expected Get");
            responder
                .send(Ok(Some(SkuStock {
                    sku: "S".to_string(),
                    records: vec![InventoryRecord::new("S", "default", 5.0)],
                })))
                .unwrap();
            let (sku, action, responder) = expect_action(&mut receiver).await.expect("Expected Action");
            responder.send(Ok(StockActionResult::Apply(1))).unwrap();
            let StockAction::Apply(writes) = action;
            (sku, writes)
        });

        let record = ProductRecord::new("S", "update")
            .with_location(LocationQuantity::new("default", 5.0))
            .with_location(LocationQuantity::new("wh-2", 2.0));
        let sink = MemorySink::new();
        let outcome = executor.execute(ActionKind::Update, &record, &sink).await;

        assert_eq!(outcome, ActionOutcome::Updated);
        let (sku, writes) = store.await.unwrap();
        assert_eq!(sku, "S");
        assert_eq!(writes, vec![InventoryRecord::new("S", "wh-2", 2.0)]);
        assert_eq!(
            sink.messages(SinkLevel::Info),
            vec![r#"Updated SKU: S | Sources: [{"source_code":"default","quantity":5.0},{"source_code":"wh-2","quantity":2.0}]"#]
        );
        catalog.verify();
    }

    #[tokio::test]
    async fn test_update_missing_product_carries_collaborator_message() {
        let mut fx = Fixture::new();
        fx.catalog.expect_get("S".to_string()).return_ok(None);

        let record = ProductRecord::new("S", "update").with_price(1.0);
        let sink = MemorySink::new();
        let outcome = fx.executor().execute(ActionKind::Update, &record, &sink).await;

        let expected = "Product with SKU \"S\" could not be updated: Product not found: S";
        assert_eq!(
            outcome,
            ActionOutcome::Failed(Failure::new(FailureKind::Collaborator, expected))
        );
        assert_eq!(sink.messages(SinkLevel::Error), vec![expected]);
        fx.verify();
    }

    #[tokio::test]
    async fn test_enable_already_enabled_is_conflict() {
        let mut fx = Fixture::new();
        fx.catalog
            .expect_get("S".to_string())
            .return_ok(Some(stored("S", 1.0)));

        let outcome = fx
            .executor()
            .execute(ActionKind::Enable, &ProductRecord::new("S", "enable"), &MemorySink::new())
            .await;

        assert_eq!(
            outcome,
            ActionOutcome::Failed(Failure::new(
                FailureKind::Conflict,
                "Product with SKU \"S\" could not be enabled: already enabled."
            ))
        );
        fx.verify();
    }

    #[tokio::test]
    async fn test_disable_flips_status() {
        let mut fx = Fixture::new();
        fx.catalog
            .expect_get("S".to_string())
            .return_ok(Some(stored("S", 1.0)));
        fx.catalog.expect_save().return_ok("S".to_string());

        let sink = MemorySink::new();
        let outcome = fx
            .executor()
            .execute(ActionKind::Disable, &ProductRecord::new("S", "disable"), &sink)
            .await;

        assert_eq!(outcome, ActionOutcome::Disabled);
        assert_eq!(fx.catalog.saved()[0].status, ProductStatus::Disabled);
        assert_eq!(
            sink.messages(SinkLevel::Info),
            vec!["Product with SKU \"S\" has been disabled."]
        );
        fx.verify();
    }

    #[tokio::test]
    async fn test_inventory_failure_becomes_outcome() {
        let mut fx = Fixture::new();
        fx.catalog
            .expect_get("S".to_string())
            .return_ok(Some(stored("S", 1.0)));
        fx.inventory
            .expect_get("S".to_string())
            .return_err(FrameworkError::ActorClosed);

        let record = ProductRecord::new("S", "update").with_location(LocationQuantity::new("default", 2.0));
        let outcome = fx
            .executor()
            .execute(ActionKind::Update, &record, &MemorySink::new())
            .await;

        match outcome {
            ActionOutcome::Failed(failure) => {
                assert_eq!(failure.kind, FailureKind::Collaborator);
                assert!(failure
                    .reason
                    .starts_with("Product with SKU \"S\" could not be updated: Inventory communication error"));
            }
            other => panic!("expected failure, got {:?}", other),
        }
        fx.verify();
    }
}
