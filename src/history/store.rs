use anyhow::{Context, Result};
use chrono::Utc;
use tracing::{debug, warn};

use super::ids::IdGenerator;
use crate::models::{AnalysisResult, HistoryEntry};
use crate::storage::KeyValueStore;

/// Key holding the serialized summary list
pub const HISTORY_KEY: &str = "contractiq_history";
/// Prefix of the per-entry full report keys
pub const FULL_RECORD_PREFIX: &str = "contractiq_full_";
/// Capacity of the summary list; older entries are evicted on append
pub const MAX_HISTORY_ENTRIES: usize = 50;

fn full_record_key(id: &str) -> String {
    format!("{}{}", FULL_RECORD_PREFIX, id)
}

fn system_clock() -> i64 {
    Utc::now().timestamp_millis()
}

/// Analysis history over an injected storage backend
///
/// Assumes a single writer. Every mutation is a read-modify-write of the summary list, so two
/// processes sharing a backend race with last-write-wins semantics.
pub struct HistoryStore<S: KeyValueStore> {
    backend: S,
    ids: IdGenerator,
    clock: fn() -> i64,
}

impl<S: KeyValueStore> HistoryStore<S> {
    pub fn new(backend: S) -> Self {
        Self::with_clock(backend, system_clock)
    }

    /// Build a store reading creation times from `clock` (milliseconds since the epoch)
    pub fn with_clock(backend: S, clock: fn() -> i64) -> Self {
        Self { backend, ids: IdGenerator::new(), clock }
    }

    pub fn backend(&self) -> &S {
        &self.backend
    }

    pub fn backend_mut(&mut self) -> &mut S {
        &mut self.backend
    }

    pub fn into_inner(self) -> S {
        self.backend
    }

    /// Record a completed analysis and return the new entry's id
    ///
    /// Writes the full report, then the updated summary list with the new entry at its head.
    /// Entries pushed past [`MAX_HISTORY_ENTRIES`] are dropped together with their full
    /// reports. A failure to clean up an evicted report is logged, not returned.
    pub fn append(
        &mut self,
        file_name: &str,
        score: u8,
        summary: &str,
        full_record: &AnalysisResult,
    ) -> Result<String> {
        let mut entries = self.list()?;
        for entry in &entries {
            self.ids.observe(&entry.id);
        }

        let now = (self.clock)();
        let id = self.ids.next_id(now).context("Failed to assign a history id")?;

        let record_json =
            serde_json::to_string(full_record).context("Failed to serialize analysis result")?;
        self.backend
            .set(&full_record_key(&id), &record_json)
            .context("Failed to save full analysis record")?;

        entries.insert(
            0,
            HistoryEntry {
                id: id.clone(),
                timestamp: now,
                file_name: file_name.to_string(),
                score: score.min(100),
                summary: summary.to_string(),
            },
        );
        let evicted = if entries.len() > MAX_HISTORY_ENTRIES {
            entries.split_off(MAX_HISTORY_ENTRIES)
        } else {
            Vec::new()
        };

        self.write_list(&entries)?;

        for old in evicted {
            debug!(id = %old.id, "evicting history entry beyond capacity");
            if let Err(e) = self.backend.remove(&full_record_key(&old.id)) {
                warn!(id = %old.id, error = %e, "failed to remove evicted analysis record");
            }
        }

        Ok(id)
    }

    /// Append using the result's own score and summary preview
    pub fn record_analysis(&mut self, file_name: &str, result: &AnalysisResult) -> Result<String> {
        self.append(file_name, result.score, &result.summary_preview(), result)
    }

    /// Current summary list, newest first (empty if nothing was ever stored)
    pub fn list(&self) -> Result<Vec<HistoryEntry>> {
        match self.backend.get(HISTORY_KEY).context("Failed to read history list")? {
            Some(json) => serde_json::from_str(&json).context("Failed to parse history list"),
            None => Ok(Vec::new()),
        }
    }

    /// Summary entry for `id`, if listed
    pub fn get(&self, id: &str) -> Result<Option<HistoryEntry>> {
        Ok(self.list()?.into_iter().find(|entry| entry.id == id))
    }

    /// Full report for `id`
    ///
    /// `Ok(None)` means no full report is stored: the entry predates full-report saving, was
    /// deleted, or its write never completed. An unreadable stored report is logged and also
    /// reported as `None`.
    pub fn load_full(&self, id: &str) -> Result<Option<AnalysisResult>> {
        let Some(json) = self
            .backend
            .get(&full_record_key(id))
            .with_context(|| format!("Failed to read analysis record {}", id))?
        else {
            return Ok(None);
        };

        match serde_json::from_str(&json) {
            Ok(result) => Ok(Some(result)),
            Err(e) => {
                warn!(id, error = %e, "stored analysis record is unreadable");
                Ok(None)
            }
        }
    }

    /// Remove the entry with `id` and its full report
    ///
    /// Returns whether a summary entry was removed. Other entries keep their relative order.
    pub fn delete_one(&mut self, id: &str) -> Result<bool> {
        let mut entries = self.list()?;
        let before = entries.len();
        entries.retain(|entry| entry.id != id);
        let removed = entries.len() != before;

        if removed {
            self.write_list(&entries)?;
        }
        self.backend
            .remove(&full_record_key(id))
            .with_context(|| format!("Failed to remove analysis record {}", id))?;

        Ok(removed)
    }

    /// Remove every summary entry and every stored full report, orphans included
    pub fn clear_all(&mut self) -> Result<()> {
        self.backend.remove(HISTORY_KEY).context("Failed to clear history list")?;

        let keys = self.backend.keys().context("Failed to list stored records")?;
        for key in keys.iter().filter(|key| key.starts_with(FULL_RECORD_PREFIX)) {
            self.backend
                .remove(key)
                .with_context(|| format!("Failed to remove stored record {}", key))?;
        }
        Ok(())
    }

    fn write_list(&mut self, entries: &[HistoryEntry]) -> Result<()> {
        let json = serde_json::to_string(entries).context("Failed to serialize history list")?;
        self.backend.set(HISTORY_KEY, &json).context("Failed to save history list")
    }
}
