//! Catalog-side product state.
//!
//! [`CatalogProduct`] implements [`ActorEntity`](crate::framework::ActorEntity)
//! so a [`ResourceActor`](crate::framework::ResourceActor) can store it keyed
//! by sku; the save-time checks live in `catalog_actor::entity`.

use serde::{Deserialize, Serialize};

/// Catalog status. The feed and the storefront both encode it as an integer flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum ProductStatus {
    Enabled,
    Disabled,
}

impl ProductStatus {
    pub const ENABLED_FLAG: i64 = 1;
    pub const DISABLED_FLAG: i64 = 2;

    /// `1` is enabled; every other flag is treated as disabled.
    pub fn from_flag(flag: i64) -> Self {
        if flag == Self::ENABLED_FLAG {
            ProductStatus::Enabled
        } else {
            ProductStatus::Disabled
        }
    }

    pub fn flag(self) -> i64 {
        match self {
            ProductStatus::Enabled => Self::ENABLED_FLAG,
            ProductStatus::Disabled => Self::DISABLED_FLAG,
        }
    }
}

impl From<i64> for ProductStatus {
    fn from(flag: i64) -> Self {
        Self::from_flag(flag)
    }
}

impl From<ProductStatus> for i64 {
    fn from(status: ProductStatus) -> Self {
        status.flag()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CatalogProduct {
    pub sku: String,
    pub name: String,
    pub price: f64,
    pub attribute_set_id: i64,
    pub status: ProductStatus,
    pub visibility: i64,
    pub type_id: String,
}

impl Default for CatalogProduct {
    fn default() -> Self {
        Self {
            sku: String::new(),
            name: "New Product".to_string(),
            price: 0.0,
            attribute_set_id: 4,
            status: ProductStatus::Enabled,
            visibility: 4,
            type_id: "simple".to_string(),
        }
    }
}

impl CatalogProduct {
    /// Creates a product with the storefront defaults for everything but sku, name and price.
    ///
    /// # Arguments
    /// * `sku` - Unique stock-keeping unit, also the store key
    /// * `name` - Display name
    /// * `price` - Unit price
    pub fn new(sku: impl Into<String>, name: impl Into<String>, price: f64) -> Self {
        Self {
            sku: sku.into(),
            name: name.into(),
            price,
            ..Self::default()
        }
    }

    pub fn with_status(mut self, status: ProductStatus) -> Self {
        self.status = status;
        self
    }

    pub fn is_enabled(&self) -> bool {
        self.status == ProductStatus::Enabled
    }
}
