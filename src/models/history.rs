use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Summary of one completed analysis as stored in the history list
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: String,
    /// Creation time in milliseconds since the Unix epoch
    pub timestamp: i64,
    pub file_name: String,
    pub score: u8,
    pub summary: String,
}

impl HistoryEntry {
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        DateTime::from_timestamp_millis(self.timestamp)
    }
}
