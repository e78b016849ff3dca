//! Collaborator contracts consumed by the sync engine.
//!
//! The engine never knows how products or stock are persisted. It talks to a
//! [`Catalog`] and an [`Inventory`]; the in-memory actors in this crate are one
//! implementation, a storefront API client would be another.

use crate::catalog_actor::CatalogError;
use crate::inventory_actor::InventoryError;
use crate::model::{CatalogProduct, InventoryRecord};
use async_trait::async_trait;

/// Read/write access to catalog products, keyed by sku.
#[async_trait]
pub trait Catalog: Send + Sync {
    async fn exists(&self, sku: &str) -> Result<bool, CatalogError>;

    /// Fails with [`CatalogError::NotFound`] when no product has this sku.
    async fn get(&self, sku: &str) -> Result<CatalogProduct, CatalogError>;

    async fn save(&self, product: CatalogProduct) -> Result<(), CatalogError>;
}

/// Read/write access to per-location stock records.
#[async_trait]
pub trait Inventory: Send + Sync {
    /// Every location record of `sku`; empty when the sku has no stock records.
    async fn list_by_sku(&self, sku: &str) -> Result<Vec<InventoryRecord>, InventoryError>;

    async fn save_batch(&self, writes: Vec<InventoryRecord>) -> Result<(), InventoryError>;
}
