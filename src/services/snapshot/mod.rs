//! Loading entity snapshots fetched from the remote store.

use std::path::Path;

use anyhow::{Context, Result};
use chrono_tz::Tz;
use serde_json::Value;

use crate::models::entity::{normalize_values, EntityCollection};

/// Parse a JSON array of store records. Records that cannot become valid
/// entities are dropped and counted; only malformed JSON is an error.
pub fn parse_snapshot(json: &str, tz: Tz) -> Result<EntityCollection> {
    let records: Vec<Value> = serde_json::from_str(json).context("Snapshot is not a JSON array")?;
    let total = records.len();
    let collection = normalize_values(records, tz);

    log::info!(
        "Loaded {} of {} entities ({} skipped)",
        collection.entities.len(),
        total,
        collection.skipped
    );

    Ok(collection)
}

pub fn load_snapshot(path: &Path, tz: Tz) -> Result<EntityCollection> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read snapshot {}", path.display()))?;
    parse_snapshot(&content, tz).with_context(|| format!("Invalid snapshot {}", path.display()))
}
