//! ActorEntity trait implementation for per-sku stock.

use super::actions::{StockAction, StockActionResult};
use super::error::InventoryError;
use crate::framework::ActorEntity;
use crate::model::{InventoryRecord, SkuStock};
use async_trait::async_trait;

fn check_write(stock_sku: &str, write: &InventoryRecord) -> Result<(), InventoryError> {
    if write.sku != stock_sku {
        return Err(InventoryError::SkuMismatch {
            stock: stock_sku.to_string(),
            write: write.sku.clone(),
        });
    }
    if write.quantity.is_nan() || write.quantity < 0.0 {
        return Err(InventoryError::InvalidQuantity {
            location: write.location_code.clone(),
            quantity: write.quantity,
        });
    }
    Ok(())
}

#[async_trait]
impl ActorEntity for SkuStock {
    type Key = String;
    type Action = StockAction;
    type ActionResult = StockActionResult;
    type Error = InventoryError;

    fn key(&self) -> String {
        self.sku.clone()
    }

    /// A sku without stock records is an empty stock entry, not an error.
    fn vacant(key: &String) -> Option<Self> {
        Some(SkuStock::empty(key.clone()))
    }

    async fn handle_action(
        &mut self,
        action: StockAction,
    ) -> Result<StockActionResult, InventoryError> {
        match action {
            StockAction::Apply(writes) => {
                // Validate everything first so a rejected batch leaves the stock untouched.
                for write in &writes {
                    check_write(&self.sku, write)?;
                }
                let written = writes.len();
                for write in writes {
                    self.upsert(write);
                }
                Ok(StockActionResult::Apply(written))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_apply_upserts_all_writes() {
        let mut stock = SkuStock::empty("A");
        let result = stock
            .handle_action(StockAction::Apply(vec![
                InventoryRecord::new("A", "default", 5.0),
                InventoryRecord::new("A", "wh-2", 0.0),
            ]))
            .await
            .unwrap();

        assert_eq!(result, StockActionResult::Apply(2));
        assert_eq!(stock.records.len(), 2);
    }

    #[tokio::test]
    async fn test_apply_rejects_whole_batch_on_negative_quantity() {
        let mut stock = SkuStock::empty("A");
        let result = stock
            .handle_action(StockAction::Apply(vec![
                InventoryRecord::new("A", "default", 5.0),
                InventoryRecord::new("A", "wh-2", -1.0),
            ]))
            .await;

        assert!(matches!(result, Err(InventoryError::InvalidQuantity { .. })));
        assert!(stock.records.is_empty());
    }

    #[tokio::test]
    async fn test_apply_rejects_foreign_sku() {
        let mut stock = SkuStock::empty("A");
        let result = stock
            .handle_action(StockAction::Apply(vec![InventoryRecord::new("B", "default", 1.0)]))
            .await;

        assert_eq!(
            result,
            Err(InventoryError::SkuMismatch { stock: "A".into(), write: "B".into() })
        );
    }
}
