//! Bounded, newest-first history of completed analyses.
//!
//! Two logical stores live in one [`KeyValueStore`](crate::storage::KeyValueStore):
//!
//! - the summary list (`contractiq_history`): at most 50
//!   [`HistoryEntry`](crate::models::HistoryEntry) values, newest first, small enough to load on
//!   every listing
//! - one full report per entry (`contractiq_full_<id>`)
//!
//! There is no transaction across the two. A summary without its full report is an expected
//! state (older entries, interrupted writes), which is why [`HistoryStore::load_full`] returns
//! `Ok(None)` instead of an error.

pub mod ids;
pub mod store;

pub use ids::IdGenerator;
pub use store::{FULL_RECORD_PREFIX, HISTORY_KEY, HistoryStore, MAX_HISTORY_ENTRIES};
