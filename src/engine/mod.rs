//! # Sync Engine
//!
//! Turns a feed of [`ProductRecord`](crate::model::ProductRecord)s into catalog
//! and inventory changes:
//!
//! - [`Validator`] - field checks per record and action
//! - [`Reconciler`] - desired-versus-current stock diff
//! - [`Executor`] - create/update/enable/disable transitions
//! - [`Orchestrator`] - batch policy, counters and the end-of-run report
//!
//! The engine only sees the [`Catalog`] and [`Inventory`] ports and an
//! [`OutputSink`]; it owns no storage of its own.

pub mod executor;
pub mod orchestrator;
pub mod ports;
pub mod reconciler;
pub mod sink;
pub mod validator;

pub use executor::*;
pub use orchestrator::*;
pub use ports::*;
pub use reconciler::*;
pub use sink::*;
pub use validator::*;
