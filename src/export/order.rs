//! The ERP order snapshot and the storefront capabilities it is built from.

use serde::{Deserialize, Serialize};

/// Postal address as the ERP expects it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OrderAddress {
    pub firstname: Option<String>,
    pub lastname: Option<String>,
    pub street: Option<String>,
    pub city: Option<String>,
    pub postcode: Option<String>,
    pub country: Option<String>,
    pub telephone: Option<String>,
}

impl OrderAddress {
    /// Joins multi-line street input with single spaces.
    pub fn with_street_lines<S: AsRef<str>>(mut self, lines: &[S]) -> Self {
        let street = lines
            .iter()
            .map(AsRef::as_ref)
            .collect::<Vec<_>>()
            .join(" ");
        self.street = Some(street);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    pub sku: String,
    pub name: String,
    pub qty_ordered: f64,
    pub price: f64,
}

/// An order as the storefront exposes it.
///
/// Storefront order objects differ in what they can report, so every accessor
/// is optional and defaults to "not available".
pub trait OrderSource {
    fn increment_id(&self) -> Option<String> {
        None
    }
    fn customer_id(&self) -> Option<String> {
        None
    }
    fn created_at(&self) -> Option<String> {
        None
    }
    fn grand_total(&self) -> Option<f64> {
        None
    }
    fn currency(&self) -> Option<String> {
        None
    }
    fn status(&self) -> Option<String> {
        None
    }
    fn store_id(&self) -> Option<i64> {
        None
    }
    fn coupon_code(&self) -> Option<String> {
        None
    }
    fn discount_amount(&self) -> Option<f64> {
        None
    }
    fn payment_method(&self) -> Option<String> {
        None
    }
    fn billing_address(&self) -> Option<OrderAddress> {
        None
    }
    fn shipping_address(&self) -> Option<OrderAddress> {
        None
    }
    /// Visible line items only; child items of configurable products are excluded.
    fn items(&self) -> Vec<OrderItem> {
        Vec::new()
    }
}

/// One entry of the ERP order export file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ExportedOrder {
    pub increment_id: Option<String>,
    pub customer_id: Option<String>,
    pub created_at: Option<String>,
    pub grand_total: Option<f64>,
    pub currency: Option<String>,
    pub status: Option<String>,
    pub store_id: Option<i64>,
    pub coupon_code: Option<String>,
    pub discount_amount: Option<f64>,
    pub payment_method: Option<String>,
    pub billing_address: Option<OrderAddress>,
    pub shipping_address: Option<OrderAddress>,
    pub items: Vec<OrderItem>,
}

impl ExportedOrder {
    pub fn from_source(order: &dyn OrderSource) -> Self {
        Self {
            increment_id: order.increment_id(),
            customer_id: order.customer_id(),
            created_at: order.created_at(),
            grand_total: order.grand_total(),
            currency: order.currency(),
            status: order.status(),
            store_id: order.store_id(),
            coupon_code: order.coupon_code(),
            discount_amount: order.discount_amount(),
            payment_method: order.payment_method(),
            billing_address: order.billing_address(),
            shipping_address: order.shipping_address(),
            items: order.items(),
        }
    }

    /// Label used in log lines: the increment id, or `unknown`.
    pub fn label(&self) -> &str {
        self.increment_id.as_deref().unwrap_or("unknown")
    }
}
