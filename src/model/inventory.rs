//! Per-location stock records.

use serde::{Deserialize, Serialize};

/// Stock status as stored by the inventory, derived from quantity only.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum StockStatus {
    InStock,
    OutOfStock,
}

impl StockStatus {
    /// `quantity > 0` is in stock; zero (or anything else) is out of stock.
    pub fn from_quantity(quantity: f64) -> Self {
        if quantity > 0.0 {
            StockStatus::InStock
        } else {
            StockStatus::OutOfStock
        }
    }
}

impl From<i64> for StockStatus {
    fn from(flag: i64) -> Self {
        if flag == 1 {
            StockStatus::InStock
        } else {
            StockStatus::OutOfStock
        }
    }
}

impl From<StockStatus> for i64 {
    fn from(status: StockStatus) -> Self {
        match status {
            StockStatus::InStock => 1,
            StockStatus::OutOfStock => 0,
        }
    }
}

/// Quantity and status of one sku at one location.
///
/// Used both for what the inventory currently holds and for the writes the
/// reconciler asks it to apply.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryRecord {
    pub sku: String,
    #[serde(rename = "source_code", alias = "location_code")]
    pub location_code: String,
    pub quantity: f64,
    pub status: StockStatus,
}

impl InventoryRecord {
    /// Builds a record whose status is derived from `quantity`.
    pub fn new(sku: impl Into<String>, location_code: impl Into<String>, quantity: f64) -> Self {
        Self {
            sku: sku.into(),
            location_code: location_code.into(),
            quantity,
            status: StockStatus::from_quantity(quantity),
        }
    }
}

/// All stock records of one sku, in the order their locations were first written.
///
/// This is the entity the inventory actor stores under the sku key.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct SkuStock {
    pub sku: String,
    pub records: Vec<InventoryRecord>,
}

impl SkuStock {
    pub fn empty(sku: impl Into<String>) -> Self {
        Self {
            sku: sku.into(),
            records: Vec::new(),
        }
    }

    pub fn record(&self, location_code: &str) -> Option<&InventoryRecord> {
        self.records
            .iter()
            .find(|r| r.location_code == location_code)
    }

    /// Replaces the record for the write's location, or appends a new one.
    pub fn upsert(&mut self, write: InventoryRecord) {
        match self
            .records
            .iter_mut()
            .find(|r| r.location_code == write.location_code)
        {
            Some(existing) => *existing = write,
            None => self.records.push(write),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_follows_quantity() {
        assert_eq!(StockStatus::from_quantity(5.0), StockStatus::InStock);
        assert_eq!(StockStatus::from_quantity(0.0), StockStatus::OutOfStock);
        assert_eq!(InventoryRecord::new("A", "default", 0.5).status, StockStatus::InStock);
    }

    #[test]
    fn test_upsert_replaces_by_location_and_keeps_order() {
        let mut stock = SkuStock::empty("A");
        stock.upsert(InventoryRecord::new("A", "wh-1", 1.0));
        stock.upsert(InventoryRecord::new("A", "wh-2", 2.0));
        stock.upsert(InventoryRecord::new("A", "wh-1", 0.0));

        let codes: Vec<_> = stock.records.iter().map(|r| r.location_code.as_str()).collect();
        assert_eq!(codes, vec!["wh-1", "wh-2"]);
        assert_eq!(stock.record("wh-1").unwrap().status, StockStatus::OutOfStock);
    }
}
