//! # ERP Sync
//!
//! > **Reconcile a storefront catalog and its per-location stock with an ERP product feed.**
//!
//! The ERP drops a JSON feed of product records, each asking for one of four
//! actions: `new`, `update`, `enable` or `disable`. This crate validates every
//! record, works out the minimal set of catalog and inventory writes, applies
//! them, and reports one line per record plus a batch summary.
//!
//! ## Design
//!
//! ### 1. Ports, not storage
//! The engine only talks to a [`Catalog`](engine::Catalog) and an
//! [`Inventory`](engine::Inventory). The crate ships in-memory implementations
//! of both, built as resource actors, so the whole pipeline runs and tests
//! without a storefront.
//!
//! ### 2. Strict input order
//! Records are processed one after another. A record's collaborator calls all
//! complete before the next record is looked at, so a `new` followed by an
//! `update` of the same sku always sees the created product.
//!
//! ### 3. Idempotent writes
//! The [`Reconciler`](engine::Reconciler) only emits writes for locations
//! whose quantity or status actually differs. Re-running a feed is safe and
//! reports "no changes detected" instead of phantom updates.
//!
//! ### 4. Observability
//! `tracing` everywhere: one span per record, structured fields for sku and
//! action, and operator output routed through an injected
//! [`OutputSink`](engine::OutputSink). See [`lifecycle::tracing`].
//!
//! ## Module Tour
//!
//! ### 1. The Engine ([`engine`])
//! - **Role**: Validation, reconciliation, execution and batch policy.
//! - **Key items**: [`Orchestrator`](engine::Orchestrator), [`Executor`](engine::Executor),
//!   [`Validator`](engine::Validator), [`Reconciler`](engine::Reconciler).
//!
//! ### 2. The Data ([`model`])
//! - **Role**: Feed records, catalog and stock state, outcomes and summaries.
//!
//! ### 3. The Collaborators ([`framework`], [`catalog_actor`], [`inventory_actor`], [`clients`])
//! - **Role**: A generic `ResourceActor<T>` and the two stores built on it,
//!   wrapped in clients that implement the engine ports.
//!
//! ### 4. The Runtime ([`lifecycle`], [`config`], [`feed`])
//! - **Role**: Spawning and stopping the actors, configuration, and reading
//!   feeds from disk.
//! - **Key items**: [`SyncSystem`](lifecycle::SyncSystem), [`SyncConfig`](config::SyncConfig),
//!   [`load_feed`](feed::load_feed).
//!
//! ### 5. Order Export ([`export`])
//! - **Role**: The reverse direction: placed and cancelled orders written to a
//!   JSON file for the ERP.
//!
//! ## Quick Start
//!
//! ```bash
//! RUST_LOG=info cargo run -- var/import/erp_products.json --seed var/import/snapshot.json
//! ```
//!
//! ### Running Tests
//!
//! ```bash
//! cargo test
//! ```

pub mod catalog_actor;
pub mod clients;
pub mod config;
pub mod engine;
pub mod export;
pub mod feed;
pub mod framework;
pub mod inventory_actor;
pub mod lifecycle;
pub mod model;
