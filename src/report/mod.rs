//! Plain-text analysis reports for the command line.
//!
//! The layout follows the results dashboard: score and band, severity counts, the risk list
//! (most severe first, optionally narrowed by a filter and search query), the contract
//! summary, the AI explanation rendered from markdown and the negotiation email draft.

mod plain;

use std::fmt::Write as _;

pub use plain::{BULLET, block_to_plain, render_plain, spans_to_plain};

use crate::filters::{FilterExpr, filter_risks};
use crate::models::{AnalysisResult, HistoryEntry, RiskItem};
use crate::utils::{format_millis, strip_ansi_codes};

/// Shown instead of a report for history entries saved without their full record
pub const FALLBACK_NOTICE: &str = "This is an older history item without full details. \
     Only newer analyses can be reloaded fully.";

/// Risks to display: those passing `filter` and `query`, most severe first
pub fn visible_risks<'a>(
    result: &'a AnalysisResult,
    filter: &FilterExpr,
    query: &str,
) -> Vec<&'a RiskItem> {
    let mut risks = filter_risks(&result.risks, filter, query);
    risks.sort_by_key(|r| std::cmp::Reverse(r.severity_level().rank()));
    risks
}

/// Full report for `result`
pub fn format_report(result: &AnalysisResult, filter: &FilterExpr, query: &str) -> String {
    let mut out = String::new();
    let band = result.score_band();
    let counts = result.severity_counts();

    let _ = writeln!(out, "Score: {}/100", result.score);
    let _ = writeln!(out, "{}", band.headline());
    let _ = writeln!(out, "{}", band.recommendation());
    let _ = writeln!(out);
    let _ = writeln!(
        out,
        "Critical: {}  High: {}  Medium: {}",
        counts.critical, counts.high, counts.medium
    );
    let _ = writeln!(out);

    let risks = visible_risks(result, filter, query);
    section(&mut out, &format!("Risks ({} of {})", risks.len(), result.risks.len()));
    if risks.is_empty() {
        let _ = writeln!(out, "No risks match the current filters.");
    }
    for risk in &risks {
        let _ = writeln!(out, "{}", format_risk(risk));
    }

    let _ = writeln!(out);
    section(&mut out, "Contract summary");
    let _ = writeln!(out, "{}", strip_ansi_codes(&result.contract_summary));

    if let Some(explanation) = result.explanation.as_deref().filter(|e| !e.trim().is_empty()) {
        let _ = writeln!(out);
        section(&mut out, "AI explanation");
        let _ = writeln!(out, "{}", render_plain(explanation));
    }

    if let Some(email) = result.negotiation_email.as_deref().filter(|e| !e.trim().is_empty()) {
        let _ = writeln!(out);
        section(&mut out, "Negotiation email");
        let _ = writeln!(out, "{}", strip_ansi_codes(email.trim_end()));
    }

    out
}

/// One risk as a header line and an indented finding
pub fn format_risk(risk: &RiskItem) -> String {
    let mut header = format!(
        "[{}] {} ({})",
        strip_ansi_codes(&risk.severity),
        strip_ansi_codes(&risk.category),
        strip_ansi_codes(&risk.expectation_check)
    );
    if let Some(confidence) = risk.confidence {
        let _ = write!(header, " {:.0}% confidence", confidence * 100.0);
    }
    format!("  {}\n    {}", header, strip_ansi_codes(&risk.finding))
}

/// History listing, newest first, one entry per line
pub fn format_history(entries: &[HistoryEntry]) -> String {
    if entries.is_empty() {
        return "No analyses yet.\n".to_string();
    }

    let mut out = String::new();
    for entry in entries {
        let _ = writeln!(
            out,
            "{:<14} {:>3}/100  {:<10} {}",
            entry.id,
            entry.score,
            format_millis(entry.timestamp),
            strip_ansi_codes(&entry.file_name)
        );
    }
    out
}

/// Summary-only view for entries without a full record
pub fn format_fallback(entry: &HistoryEntry) -> String {
    format!(
        "{}\nScore: {}/100\n\n{}\n\n{}\n",
        strip_ansi_codes(&entry.file_name),
        entry.score,
        strip_ansi_codes(&entry.summary),
        FALLBACK_NOTICE
    )
}

fn section(out: &mut String, title: &str) {
    let _ = writeln!(out, "{}", title);
    let _ = writeln!(out, "{}", "-".repeat(title.chars().count()));
}
