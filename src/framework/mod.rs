//! Generic actor framework for keyed resource stores.
//!
//! The catalog and inventory collaborators are both built on these pieces.
//!
//! # Main Components
//!
//! - [`ActorEntity`] - Trait that stored resource types implement
//! - [`ResourceActor`] - Generic actor that owns a keyed store
//! - [`ResourceClient`] - Typed handle used to send requests to an actor
//! - [`FrameworkError`] - Common error types
//!
//! # Testing
//!
//! See [`mock`] module for utilities to test clients without spawning full actors.

pub mod core;
pub mod mock;

// Re-export core types for convenience
pub use self::core::*;
