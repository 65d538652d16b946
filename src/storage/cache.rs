//! Snapshot cache
//!
//! Keeps the flattened result of the last full fetch per database so that
//! repeated commands within the TTL don't hit the API again. A snapshot is a
//! disposable memo, never a source of truth: unreadable snapshots are misses.

use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use super::file_io::{read_json_optional, write_json_atomic};
use crate::config::{PropertyNames, Settings};
use crate::error::{ExpenseError, ExpenseResult};
use crate::models::ExpenseRecord;

/// Settings that shape flattened records; a snapshot is only valid for these
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlattenKey {
    pub properties: PropertyNames,
    pub utc_offset_minutes: i32,
}

impl FlattenKey {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            properties: settings.properties.clone(),
            utc_offset_minutes: settings.utc_offset_minutes,
        }
    }
}

/// The flattened result of one full fetch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub database_id: String,
    pub flatten: FlattenKey,
    pub fetched_at: DateTime<Utc>,
    pub records: Vec<ExpenseRecord>,
}

impl Snapshot {
    pub fn new(
        database_id: impl Into<String>,
        flatten: FlattenKey,
        records: Vec<ExpenseRecord>,
    ) -> Self {
        Self {
            database_id: database_id.into(),
            flatten,
            fetched_at: Utc::now(),
            records,
        }
    }

    /// Age of the snapshot relative to `now`; future timestamps count as stale
    fn is_fresh(&self, now: DateTime<Utc>, max_age: Duration) -> bool {
        match (now - self.fetched_at).to_std() {
            Ok(age) => age <= max_age,
            Err(_) => false,
        }
    }
}

/// Directory of per-database snapshot files
#[derive(Debug, Clone)]
pub struct SnapshotCache {
    dir: PathBuf,
}

impl SnapshotCache {
    pub fn new(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Snapshot file for a database id
    pub fn path_for(&self, database_id: &str) -> PathBuf {
        let key: String = database_id
            .trim()
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("expenses-{}.json", key))
    }

    /// Load a snapshot for `database_id` if it is younger than `max_age`
    /// and was flattened with the same `flatten` settings
    ///
    /// Missing, stale, foreign or corrupt snapshots all return `None`.
    pub fn load_fresh(
        &self,
        database_id: &str,
        flatten: &FlattenKey,
        max_age: Duration,
    ) -> Option<Snapshot> {
        self.load_fresh_at(database_id, flatten, max_age, Utc::now())
    }

    fn load_fresh_at(
        &self,
        database_id: &str,
        flatten: &FlattenKey,
        max_age: Duration,
        now: DateTime<Utc>,
    ) -> Option<Snapshot> {
        let path = self.path_for(database_id);
        let snapshot: Snapshot = match read_json_optional(&path) {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) => return None,
            Err(e) => {
                warn!(error = %e, "Ignoring unreadable snapshot");
                return None;
            }
        };

        if snapshot.database_id != database_id.trim() {
            debug!(path = %path.display(), "Snapshot belongs to another database");
            return None;
        }

        if snapshot.flatten != *flatten {
            debug!(path = %path.display(), "Snapshot was flattened with other settings");
            return None;
        }

        if !snapshot.is_fresh(now, max_age) {
            debug!(fetched_at = %snapshot.fetched_at, "Snapshot is stale");
            return None;
        }

        Some(snapshot)
    }

    /// Persist a snapshot, replacing any previous one for the same database
    pub fn save(&self, snapshot: &Snapshot) -> ExpenseResult<()> {
        write_json_atomic(self.path_for(&snapshot.database_id), snapshot)
    }

    /// Remove every snapshot file; returns how many were deleted
    pub fn clear(&self) -> ExpenseResult<usize> {
        if !self.dir.exists() {
            return Ok(0);
        }

        let entries = std::fs::read_dir(&self.dir).map_err(|e| {
            ExpenseError::Cache(format!("Failed to read {}: {}", self.dir.display(), e))
        })?;

        let mut removed = 0;
        for entry in entries {
            let path = entry
                .map_err(|e| ExpenseError::Cache(format!("Failed to read cache entry: {}", e)))?
                .path();
            let is_snapshot = path
                .file_name()
                .and_then(|n| n.to_str())
                .map(|n| n.starts_with("expenses-") && n.ends_with(".json"))
                .unwrap_or(false);
            if is_snapshot {
                std::fs::remove_file(&path).map_err(|e| {
                    ExpenseError::Cache(format!("Failed to remove {}: {}", path.display(), e))
                })?;
                removed += 1;
            }
        }

        Ok(removed)
    }
}
