//! Appends placed orders to the ERP export file and flags cancellations.
//!
//! The file is a pretty-printed JSON array. Entries are kept as raw JSON so
//! fields written by other tools survive a rewrite.

use super::order::{ExportedOrder, OrderSource};
use crate::config::DEFAULT_ORDER_EXPORT_PATH;
use crate::engine::OutputSink;
use serde_json::Value;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum ExportError {
    #[error("Failed to access ERP order file {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to encode ERP order file: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("Order increment_id is missing, cannot update ERP JSON on cancel.")]
    MissingIncrementId,
}

#[derive(Debug, Clone)]
pub struct OrderExporter {
    path: PathBuf,
}

impl OrderExporter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Snapshots `order` and appends it to the export file, creating the file if needed.
    #[instrument(skip(self, order, sink), fields(path = %self.path.display()))]
    pub async fn export_placed(
        &self,
        order: &dyn OrderSource,
        sink: &dyn OutputSink,
    ) -> Result<ExportedOrder, ExportError> {
        let snapshot = ExportedOrder::from_source(order);

        match self.append(&snapshot).await {
            Ok(()) => {
                sink.info(&format!(
                    "Order #{} successfully exported to ERP JSON file.",
                    snapshot.label()
                ));
                Ok(snapshot)
            }
            Err(err) => {
                sink.error(&format!(
                    "Failed to export order #{} to ERP JSON file: {}",
                    snapshot.label(),
                    err
                ));
                Err(err)
            }
        }
    }

    /// Sets `status` to `canceled` on the first entry with this increment id.
    ///
    /// Returns `Ok(false)` when the file does not exist or has no such order.
    #[instrument(skip(self, sink), fields(path = %self.path.display()))]
    pub async fn mark_cancelled(
        &self,
        increment_id: &str,
        sink: &dyn OutputSink,
    ) -> Result<bool, ExportError> {
        if increment_id.trim().is_empty() {
            let err = ExportError::MissingIncrementId;
            sink.error(&err.to_string());
            return Err(err);
        }

        let mut entries = match self.read_entries().await {
            Ok(Some(entries)) => entries,
            Ok(None) => {
                sink.comment(&format!(
                    "ERP JSON file does not exist, nothing to update for order #{}.",
                    increment_id
                ));
                return Ok(false);
            }
            Err(err) => {
                sink.error(&format!(
                    "Failed to update ERP JSON for canceled order #{}: {}",
                    increment_id, err
                ));
                return Err(err);
            }
        };

        let found = entries
            .iter_mut()
            .find(|entry| matches_increment_id(entry, increment_id));
        let Some(entry) = found else {
            sink.comment(&format!(
                "Order #{} not found in ERP JSON file, cannot mark as canceled.",
                increment_id
            ));
            return Ok(false);
        };
        entry["status"] = Value::String("canceled".to_string());

        match self.write_entries(&entries).await {
            Ok(()) => {
                sink.info(&format!(
                    "Order #{} marked as canceled in ERP JSON file.",
                    increment_id
                ));
                Ok(true)
            }
            Err(err) => {
                sink.error(&format!(
                    "Failed to update ERP JSON for canceled order #{}: {}",
                    increment_id, err
                ));
                Err(err)
            }
        }
    }

    async fn append(&self, snapshot: &ExportedOrder) -> Result<(), ExportError> {
        let mut entries = self.read_entries().await?.unwrap_or_default();
        entries.push(serde_json::to_value(snapshot)?);
        self.write_entries(&entries).await
    }

    /// Current entries, or `None` when the file does not exist.
    /// Content that is not a JSON array reads as an empty list.
    async fn read_entries(&self) -> Result<Option<Vec<Value>>, ExportError> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(ExportError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        match serde_json::from_slice::<Value>(&bytes) {
            Ok(Value::Array(entries)) => Ok(Some(entries)),
            _ => {
                debug!("Export file unreadable as a JSON array; starting over");
                Ok(Some(Vec::new()))
            }
        }
    }

    async fn write_entries(&self, entries: &[Value]) -> Result<(), ExportError> {
        let io_err = |source| ExportError::Io {
            path: self.path.clone(),
            source,
        };
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await.map_err(io_err)?;
        }
        let text = serde_json::to_string_pretty(entries)?;
        tokio::fs::write(&self.path, text).await.map_err(io_err)
    }
}

impl Default for OrderExporter {
    fn default() -> Self {
        Self::new(DEFAULT_ORDER_EXPORT_PATH)
    }
}

/// Increment ids may have been written as strings or numbers.
fn matches_increment_id(entry: &Value, increment_id: &str) -> bool {
    match &entry["increment_id"] {
        Value::String(id) => id == increment_id,
        Value::Number(id) => id.to_string() == increment_id,
        _ => false,
    }
}
