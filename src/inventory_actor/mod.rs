//! # Inventory Actor
//!
//! In-memory inventory collaborator. Each sku owns one [`SkuStock`] entry
//! holding its per-location [`InventoryRecord`](crate::model::InventoryRecord)s.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`SkuStock`]
//! - [`error`] - [`InventoryError`] type for type-safe error handling
//! - [`actions`] - [`StockAction`] and [`StockActionResult`] for stock writes
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Custom Actions
//!
//! ```rust,ignore
//! // Read every location record of a sku (empty when the sku has none)
//! let records = inventory_client.list_by_sku("SKU-1").await?;
//!
//! // Write several locations, possibly across skus
//! inventory_client.save_batch(writes).await?;
//! ```

pub mod actions;
pub mod entity;
pub mod error;

pub use actions::*;
pub use error::*;

use crate::clients::InventoryClient;
use crate::framework::ResourceActor;
use crate::model::SkuStock;

/// Creates a new Inventory actor and its client.
pub fn new() -> (ResourceActor<SkuStock>, InventoryClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, InventoryClient::new(generic_client))
}
