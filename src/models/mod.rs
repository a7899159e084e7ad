//! Data models for ContractIQ analyses and their local history.
//!
//! - [`AnalysisResult`] - Full report returned by the analysis service
//! - [`RiskItem`] - One itemized risk inside a report
//! - [`Severity`] / [`ScoreBand`] - Derived classifications used by the report views
//! - [`HistoryEntry`] - Compact summary persisted in the history list
//!
//! Field names follow the service's JSON (`contract_summary`, `expectation_check`) for the
//! analysis types and the client's persisted layout (`fileName`) for history entries.

pub mod analysis;
pub mod history;

pub use analysis::{AnalysisResponse, AnalysisResult, RiskItem, ScoreBand, Severity, SeverityCounts};
pub use history::HistoryEntry;
