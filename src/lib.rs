//! ContractIQ client core
//!
//! A command-line and terminal client for the ContractIQ contract analysis service. A contract
//! document and a plain-language description of what the user expects from it are sent to the
//! service; the returned risk report (score, itemized risks, AI explanation, negotiation email
//! draft) is displayed and recorded in a bounded local history.
//!
//! - [`markdown`]: line-oriented renderer for the markdown subset in AI-written text
//! - [`history`]: newest-first history of at most 50 analyses over a [`storage`] backend
//! - [`api`]: analysis service client and the input/loading/results flow
//! - [`filters`], [`report`]: narrowing and formatting a report's risks
//! - [`tui`]: interactive history browser
//!
//! # Example
//!
//! ```
//! use contractiq::history::HistoryStore;
//! use contractiq::models::AnalysisResult;
//! use contractiq::storage::MemoryStore;
//!
//! let mut store = HistoryStore::new(MemoryStore::new());
//! let result = AnalysisResult {
//!     score: 45,
//!     risks: vec![],
//!     contract_summary: "Master Services Agreement".to_string(),
//!     explanation: Some("**Unlimited** liability in clause 9".to_string()),
//!     negotiation_email: None,
//! };
//!
//! let id = store.record_analysis("msa.pdf", &result)?;
//! assert_eq!(store.list()?[0].file_name, "msa.pdf");
//! assert_eq!(store.load_full(&id)?, Some(result));
//! # Ok::<(), anyhow::Error>(())
//! ```

pub mod api;
pub mod cli;
pub mod clipboard;
pub mod filters;
pub mod history;
pub mod logging;
pub mod markdown;
pub mod models;
pub mod report;
pub mod storage;
pub mod tui;
pub mod utils;

// Re-export commonly used types
pub use history::HistoryStore;
pub use markdown::{Block, InlineSpan, render_markdown};
pub use models::{AnalysisResult, HistoryEntry, RiskItem};
pub use storage::{FileStore, KeyValueStore, MemoryStore};
