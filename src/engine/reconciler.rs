//! Desired-versus-current stock diff.

use crate::engine::Inventory;
use crate::inventory_actor::InventoryError;
use crate::model::{InventoryRecord, LocationQuantity, StockStatus};
use std::collections::HashMap;

/// The writes needed to bring one sku's stock to the desired state.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Reconciliation {
    /// In the order the desired entries were given.
    pub writes: Vec<InventoryRecord>,
    pub changed: bool,
}

#[derive(Debug, Clone)]
pub struct Reconciler {
    default_location: String,
}

impl Reconciler {
    pub fn new(default_location: impl Into<String>) -> Self {
        Self {
            default_location: default_location.into(),
        }
    }

    pub fn default_location(&self) -> &str {
        &self.default_location
    }

    /// Compares `desired` with `existing` and returns only the writes that change something.
    ///
    /// Entries without a quantity are ignored. A location is left alone only when
    /// its stored quantity and status both equal the desired ones exactly; a
    /// location with no stored record always gets a write.
    pub fn reconcile(
        &self,
        sku: &str,
        desired: &[LocationQuantity],
        existing: &[InventoryRecord],
    ) -> Reconciliation {
        let current: HashMap<&str, &InventoryRecord> = existing
            .iter()
            .filter(|record| record.sku == sku)
            .map(|record| (record.location_code.as_str(), record))
            .collect();

        let mut writes = Vec::new();
        for entry in desired {
            let Some(quantity) = entry.quantity_value() else {
                continue;
            };
            let location = entry.code_or(&self.default_location);
            let status = StockStatus::from_quantity(quantity);

            let unchanged = current
                .get(location)
                .is_some_and(|stored| stored.quantity == quantity && stored.status == status);
            if unchanged {
                continue;
            }

            writes.push(InventoryRecord {
                sku: sku.to_string(),
                location_code: location.to_string(),
                quantity,
                status,
            });
        }

        Reconciliation {
            changed: !writes.is_empty(),
            writes,
        }
    }

    /// Reads the sku's current stock from `inventory` and reconciles against it.
    pub async fn reconcile_with<I: Inventory + ?Sized>(
        &self,
        inventory: &I,
        sku: &str,
        desired: &[LocationQuantity],
    ) -> Result<Reconciliation, InventoryError> {
        let existing = inventory.list_by_sku(sku).await?;
        Ok(self.reconcile(sku, desired, &existing))
    }
}

impl Default for Reconciler {
    fn default() -> Self {
        Self::new(crate::config::DEFAULT_LOCATION)
    }
}
