//! # Observability & Tracing
//!
//! [`setup_tracing`] installs the global subscriber for the binary.
//!
//! - **Configurable log levels** via the `RUST_LOG` environment variable
//! - **Compact format** (default) that hides the module prefix and shows spans inline
//! - **JSON format** with one object per line, for log shippers
//!
//! ## What Gets Traced
//!
//! - **Batch**: start and finish, with the final counters
//! - **Records**: one `record` span per input record carrying `position`, `sku` and `action`
//! - **Collaborators**: every catalog/inventory request, logged by the actors with `entity_type`
//! - **Operator output**: every line written through [`TracingSink`](crate::engine::TracingSink),
//!   tagged `kind = info | error | comment`
//!
//! ```bash
//! RUST_LOG=info erp-sync var/import/erp_products.json
//! RUST_LOG=erp_sync::engine=debug erp-sync --log-format json feed.json
//! ```
//!
//! With `RUST_LOG=info` a run reads like:
//!
//! ```text
//! INFO Batch started records=3
//! INFO record: Created SKU: SKU-1 | Name: Widget | Price: 10.00 | Sources: [...] kind="info" position=0 sku="SKU-1" action="new"
//! INFO Total updated: 1 | created: 1 | disabled: 0 | enabled: 0 kind="info"
//! ```

use clap::ValueEnum;
use tracing_subscriber::EnvFilter;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// Installs the global subscriber. Falls back to `info` when `RUST_LOG` is unset.
pub fn setup_tracing(format: LogFormat) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let builder = tracing_subscriber::fmt().with_env_filter(filter);

    match format {
        LogFormat::Compact => builder
            .with_target(false) // entity_type and span names carry the context
            .compact()
            .init(),
        LogFormat::Json => builder.json().with_current_span(true).init(),
    }
}
