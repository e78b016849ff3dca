//! ActorEntity trait implementation for the catalog product type.
//!
//! The catalog has no custom actions: every change, including a status flip,
//! is a whole-product save. The save hook is the last line of defence against
//! states the storefront cannot represent.

use super::error::CatalogError;
use crate::framework::ActorEntity;
use crate::model::CatalogProduct;
use async_trait::async_trait;

#[async_trait]
impl ActorEntity for CatalogProduct {
    type Key = String;
    type Action = ();
    type ActionResult = ();
    type Error = CatalogError;

    fn key(&self) -> String {
        self.sku.clone()
    }

    /// Rejects products without a sku and products with a negative (or NaN) price.
    async fn on_save(&mut self, _previous: Option<&Self>) -> Result<(), CatalogError> {
        if self.sku.trim().is_empty() {
            return Err(CatalogError::EmptySku);
        }
        if self.price.is_nan() || self.price < 0.0 {
            return Err(CatalogError::InvalidPrice(self.price));
        }
        Ok(())
    }

    async fn handle_action(&mut self, _action: ()) -> Result<(), CatalogError> {
        Ok(())
    }
}
