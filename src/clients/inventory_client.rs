use crate::clients::actor_client::ActorClient;
use crate::engine::Inventory;
use crate::framework::{FrameworkError, ResourceClient};
use crate::inventory_actor::{InventoryError, StockAction, StockActionResult};
use crate::model::{InventoryRecord, SkuStock};
use async_trait::async_trait;
use tracing::{debug, instrument};

/// Client for interacting with the Inventory actor.
#[derive(Clone)]
pub struct InventoryClient {
    inner: ResourceClient<SkuStock>,
}

impl InventoryClient {
    pub fn new(inner: ResourceClient<SkuStock>) -> Self {
        Self { inner }
    }

    /// Applies writes that all belong to `sku` in one actor turn.
    #[instrument(skip(self, writes), fields(count = writes.len()))]
    pub async fn apply(
        &self,
        sku: &str,
        writes: Vec<InventoryRecord>,
    ) -> Result<usize, InventoryError> {
        let result = self
            .inner
            .perform_action(sku.to_string(), StockAction::Apply(writes))
            .await
            .map_err(Self::map_error)?;

        match result {
            StockActionResult::Apply(written) => {
                debug!(written, "Stock applied");
                Ok(written)
            }
        }
    }
}

#[async_trait]
impl ActorClient<SkuStock> for InventoryClient {
    type Error = InventoryError;

    fn inner(&self) -> &ResourceClient<SkuStock> {
        &self.inner
    }

    fn map_error(e: FrameworkError) -> Self::Error {
        match e {
            FrameworkError::EntityError(msg) => InventoryError::Rejected(msg),
            other => InventoryError::ActorCommunicationError(other.to_string()),
        }
    }
}

/// Splits writes per sku, keeping skus and writes in first-seen order.
fn group_by_sku(writes: Vec<InventoryRecord>) -> Vec<(String, Vec<InventoryRecord>)> {
    let mut groups: Vec<(String, Vec<InventoryRecord>)> = Vec::new();
    for write in writes {
        match groups.iter_mut().find(|(sku, _)| *sku == write.sku) {
            Some((_, group)) => group.push(write),
            None => groups.push((write.sku.clone(), vec![write])),
        }
    }
    groups
}

#[async_trait]
impl Inventory for InventoryClient {
    async fn list_by_sku(&self, sku: &str) -> Result<Vec<InventoryRecord>, InventoryError> {
        Ok(self
            .fetch(sku.to_string())
            .await?
            .map(|stock| stock.records)
            .unwrap_or_default())
    }

    async fn save_batch(&self, writes: Vec<InventoryRecord>) -> Result<(), InventoryError> {
        for (sku, group) in group_by_sku(writes) {
            self.apply(&sku, group).await?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::framework::mock::{create_mock_client, expect_action, MockClient};

    #[tokio::test]
    async fn test_unknown_sku_lists_no_records() {
        let mut mock = MockClient::<SkuStock>::new();
        mock.expect_get("SKU-1".to_string()).return_ok(None);

        let client = InventoryClient::new(mock.client());
        let records = client.list_by_sku("SKU-1").await.unwrap();

        assert!(records.is_empty());
        mock.verify();
    }

    #[tokio::test]
    async fn test_save_batch_sends_one_action_per_sku_in_order() {
        let (inner, mut receiver) = create_mock_client::<SkuStock>(10);
        let client = InventoryClient::new(inner);

        let writes = vec![
            InventoryRecord::new("B", "wh-1", 1.0),
            InventoryRecord::new("A", "wh-1", 2.0),
            InventoryRecord::new("B", "wh-2", 0.0),
        ];
        let task = tokio::spawn(async move { client.save_batch(writes).await });

        let (sku, action, responder) = expect_action(&mut receiver).await.expect("Expected Action");
        assert_eq!(sku, "B");
        let StockAction::Apply(group) = action;
        assert_eq!(group.len(), 2);
        assert_eq!(group[1].location_code, "wh-2");
        responder.send(Ok(StockActionResult::Apply(2))).unwrap();

        let (sku, _, responder) = expect_action(&mut receiver).await.expect("Expected Action");
        assert_eq!(sku, "A");
        responder.send(Ok(StockActionResult::Apply(1))).unwrap();

        assert_eq!(task.await.unwrap(), Ok(()));
    }

    #[tokio::test]
    async fn test_rejected_write_stops_the_batch() {
        let mut mock = MockClient::<SkuStock>::new();
        mock.expect_action("A".to_string())
            .return_err(FrameworkError::EntityError("Invalid quantity".to_string()));

        let client = InventoryClient::new(mock.client());
        let result = client
            .save_batch(vec![
                InventoryRecord::new("A", "wh-1", 1.0),
                InventoryRecord::new("B", "wh-1", 1.0),
            ])
            .await;

        assert_eq!(result, Err(InventoryError::Rejected("Invalid quantity".to_string())));
        mock.verify();
    }
}
