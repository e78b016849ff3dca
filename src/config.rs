//! Run configuration.
//!
//! [`SyncConfig`] is what the engine consumes. [`Cli`] is how the binary
//! builds one: flags first, then `ERP_SYNC_*` environment variables (a `.env`
//! file is honoured), then the defaults below.

use crate::lifecycle::LogFormat;
use crate::model::ProductStatus;
use clap::Parser;
use std::path::PathBuf;

/// Location code used when a feed entry names none.
pub const DEFAULT_LOCATION: &str = "default";

/// Where the ERP drops its product feed.
pub const DEFAULT_FEED_PATH: &str = "var/import/erp_products.json";

/// Where placed orders are exported for the ERP.
pub const DEFAULT_ORDER_EXPORT_PATH: &str = "var/export/erp_orders.json";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationConfig {
    /// Reject `create` records whose `sources` list is empty.
    pub require_create_locations: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PolicyConfig {
    /// Attempt enable/disable even when the record failed validation.
    pub always_attempt_status_changes: bool,
}

impl Default for PolicyConfig {
    fn default() -> Self {
        Self {
            always_attempt_status_changes: true,
        }
    }
}

/// Field values a `create` falls back to when the feed omits them.
#[derive(Debug, Clone, PartialEq)]
pub struct CreateDefaults {
    pub name: String,
    pub price: f64,
    pub attribute_set_id: i64,
    pub status: ProductStatus,
    pub visibility: i64,
    pub type_id: String,
}

impl Default for CreateDefaults {
    fn default() -> Self {
        Self {
            name: "New Product".to_string(),
            price: 0.0,
            attribute_set_id: 4,
            status: ProductStatus::Enabled,
            visibility: 4,
            type_id: "simple".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncConfig {
    pub default_location: String,
    pub validation: ValidationConfig,
    pub policy: PolicyConfig,
    pub defaults: CreateDefaults,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            default_location: DEFAULT_LOCATION.to_string(),
            validation: ValidationConfig::default(),
            policy: PolicyConfig::default(),
            defaults: CreateDefaults::default(),
        }
    }
}

/// Reconcile the catalog and inventory with an ERP product feed.
#[derive(Debug, Parser)]
#[command(name = "erp-sync", version, about)]
pub struct Cli {
    /// JSON feed of product records
    #[arg(env = "ERP_SYNC_FEED", default_value = DEFAULT_FEED_PATH)]
    pub feed: PathBuf,

    /// JSON snapshot (`{"products": [...], "inventory": [...]}`) loaded before the run
    #[arg(long, env = "ERP_SYNC_SEED")]
    pub seed: Option<PathBuf>,

    /// Location code for feed entries without one
    #[arg(long, env = "ERP_SYNC_DEFAULT_LOCATION", default_value = DEFAULT_LOCATION)]
    pub default_location: String,

    /// Reject create records with an empty sources list
    #[arg(long, env = "ERP_SYNC_REQUIRE_CREATE_LOCATIONS")]
    pub require_create_locations: bool,

    /// Skip enable/disable records that fail validation instead of attempting them
    #[arg(long, env = "ERP_SYNC_SKIP_INVALID_STATUS_CHANGES")]
    pub skip_invalid_status_changes: bool,

    /// Log output format
    #[arg(long, env = "ERP_SYNC_LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,
}

impl Cli {
    pub fn sync_config(&self) -> SyncConfig {
        SyncConfig {
            default_location: self.default_location.clone(),
            validation: ValidationConfig {
                require_create_locations: self.require_create_locations,
            },
            policy: PolicyConfig {
                always_attempt_status_changes: !self.skip_invalid_status_changes,
            },
            defaults: CreateDefaults::default(),
        }
    }
}
