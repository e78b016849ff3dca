//! Reading the ERP product feed and collaborator snapshots from disk.
//!
//! A feed is a JSON array of [`ProductRecord`]s. Anything that prevents the
//! feed as a whole from being read is a [`FeedError`]; problems inside single
//! records are left for the validator.

use crate::model::{CatalogProduct, InventoryRecord, ProductRecord};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;
use tracing::{debug, instrument};

#[derive(Debug, Error)]
pub enum FeedError {
    #[error("Failed to read ERP file {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("ERP file is not valid JSON: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("No products found in file.")]
    Empty,
}

/// Existing catalog and stock state to preload before a run.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Seed {
    pub products: Vec<CatalogProduct>,
    pub inventory: Vec<InventoryRecord>,
}

/// Parses feed text. The top level must be a non-empty JSON array.
///
/// Elements are read one by one: an element with the wrong shape becomes a
/// record flagged as malformed instead of failing the whole feed.
pub fn parse_feed(text: &str) -> Result<Vec<ProductRecord>, FeedError> {
    let value: serde_json::Value = serde_json::from_str(text)?;
    let serde_json::Value::Array(items) = value else {
        return Err(FeedError::Empty);
    };
    if items.is_empty() {
        return Err(FeedError::Empty);
    }
    Ok(items.into_iter().map(ProductRecord::from_feed_value).collect())
}

#[instrument]
pub async fn load_feed(path: &Path) -> Result<Vec<ProductRecord>, FeedError> {
    let text = read(path).await?;
    let records = parse_feed(&text)?;
    debug!(records = records.len(), "Feed loaded");
    Ok(records)
}

#[instrument]
pub async fn load_seed(path: &Path) -> Result<Seed, FeedError> {
    let text = read(path).await?;
    Ok(serde_json::from_str(&text)?)
}

async fn read(path: &Path) -> Result<String, FeedError> {
    tokio::fs::read_to_string(path)
        .await
        .map_err(|source| FeedError::Unreadable {
            path: path.to_path_buf(),
            source,
        })
}
