//! # Catalog Actor
//!
//! In-memory catalog collaborator: one [`CatalogProduct`] per sku, owned by a
//! single [`ResourceActor`] task.
//!
//! ## Structure
//!
//! - [`entity`] - [`ActorEntity`](crate::framework::ActorEntity) implementation for [`CatalogProduct`]
//! - [`error`] - [`CatalogError`] type for type-safe error handling
//! - [`new()`] - Factory function that creates the actor and client
//!
//! ## Usage
//!
//! ```rust
//! use erp_sync::catalog_actor;
//! use erp_sync::engine::Catalog;
//! use erp_sync::model::CatalogProduct;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let (actor, client) = catalog_actor::new();
//!     tokio::spawn(actor.run());
//!
//!     client.save(CatalogProduct::new("SKU-1", "Widget", 9.99)).await?;
//!     assert!(client.exists("SKU-1").await?);
//!     Ok(())
//! }
//! ```

pub mod entity;
pub mod error;

pub use error::*;

use crate::clients::CatalogClient;
use crate::framework::ResourceActor;
use crate::model::CatalogProduct;

/// Creates a new Catalog actor and its client.
pub fn new() -> (ResourceActor<CatalogProduct>, CatalogClient) {
    let (actor, generic_client) = ResourceActor::new(32);
    (actor, CatalogClient::new(generic_client))
}
