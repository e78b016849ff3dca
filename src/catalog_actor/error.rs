//! Error types for the Catalog actor.

use thiserror::Error;

/// Errors that can occur during catalog operations.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum CatalogError {
    /// The requested product was not found.
    #[error("Product not found: {0}")]
    NotFound(String),

    /// The product cannot be stored without a sku.
    #[error("Product sku is empty")]
    EmptySku,

    /// The product price is negative.
    #[error("Invalid price: {0:.2}")]
    InvalidPrice(f64),

    /// The stored entity refused the change.
    #[error("Catalog rejected the change: {0}")]
    Rejected(String),

    /// An error occurred while communicating with the actor system.
    #[error("Catalog communication error: {0}")]
    ActorCommunicationError(String),
}
