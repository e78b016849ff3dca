//! Error types for the Inventory actor.

use thiserror::Error;

/// Errors that can occur during inventory operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum InventoryError {
    /// A stock write carried a negative quantity.
    #[error("Invalid quantity for source \"{location}\": {quantity:.2}")]
    InvalidQuantity { location: String, quantity: f64 },

    /// A stock write was addressed to a different sku than the stock it was applied to.
    #[error("Stock write for sku \"{write}\" sent to sku \"{stock}\"")]
    SkuMismatch { stock: String, write: String },

    /// The stored entity refused the change.
    #[error("Inventory rejected the change: {0}")]
    Rejected(String),

    /// An error occurred while communicating with the actor system.
    #[error("Inventory communication error: {0}")]
    ActorCommunicationError(String),
}
