//! Type-safe wrappers around [`ResourceClient`](crate::framework::ResourceClient).
//!
//! Each client adapts one reference actor to the engine port it serves:
//! [`CatalogClient`] is a [`Catalog`](crate::engine::Catalog),
//! [`InventoryClient`] is an [`Inventory`](crate::engine::Inventory).

pub mod actor_client;
pub mod catalog_client;
pub mod inventory_client;

pub use actor_client::*;
pub use catalog_client::*;
pub use inventory_client::*;
