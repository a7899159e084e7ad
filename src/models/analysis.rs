use serde::{Deserialize, Serialize};

use crate::utils::text::truncate_chars;

/// Number of explanation characters kept in a history summary
pub const SUMMARY_PREVIEW_CHARS: usize = 150;

/// Envelope returned by `POST /api/v1/analyze`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResponse {
    pub analysis: AnalysisResult,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RiskItem {
    pub category: String,
    pub severity: String,
    pub finding: String,
    pub expectation_check: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub confidence: Option<f64>,
}

impl RiskItem {
    pub fn severity_level(&self) -> Severity {
        Severity::parse(&self.severity)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    pub score: u8,
    pub risks: Vec<RiskItem>,
    pub contract_summary: String,
    #[serde(default)]
    pub explanation: Option<String>,
    #[serde(default)]
    pub negotiation_email: Option<String>,
}

impl AnalysisResult {
    pub fn score_band(&self) -> ScoreBand {
        ScoreBand::from_score(self.score)
    }

    pub fn severity_counts(&self) -> SeverityCounts {
        let mut counts = SeverityCounts::default();
        for risk in &self.risks {
            match risk.severity_level() {
                Severity::Critical | Severity::Severe => counts.critical += 1,
                Severity::High => counts.high += 1,
                Severity::Medium => counts.medium += 1,
                Severity::Low | Severity::Unknown => {}
            }
        }
        counts
    }

    /// Risks ordered from most to least severe, keeping service order within a rank
    pub fn risks_by_severity(&self) -> Vec<&RiskItem> {
        let mut risks: Vec<&RiskItem> = self.risks.iter().collect();
        risks.sort_by_key(|r| std::cmp::Reverse(r.severity_level().rank()));
        risks
    }

    /// Short preview stored alongside a history entry
    ///
    /// Uses the first 150 characters of the AI explanation followed by `...`. Reports without
    /// an explanation fall back to the contract summary.
    pub fn summary_preview(&self) -> String {
        let source = self
            .explanation
            .as_deref()
            .filter(|text| !text.trim().is_empty())
            .unwrap_or(&self.contract_summary);
        format!("{}...", truncate_chars(source, SUMMARY_PREVIEW_CHARS))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Severity {
    Critical,
    Severe,
    High,
    Medium,
    Low,
    Unknown,
}

impl Severity {
    /// Parse the service's free-form severity label (case-insensitive)
    pub fn parse(label: &str) -> Self {
        match label.trim().to_lowercase().as_str() {
            "critical" => Severity::Critical,
            "severe" => Severity::Severe,
            "high" => Severity::High,
            "medium" => Severity::Medium,
            "low" => Severity::Low,
            _ => Severity::Unknown,
        }
    }

    pub fn rank(self) -> u8 {
        match self {
            Severity::Critical => 4,
            Severity::Severe => 3,
            Severity::High => 2,
            Severity::Medium => 1,
            Severity::Low | Severity::Unknown => 0,
        }
    }

    pub fn is_critical(self) -> bool {
        matches!(self, Severity::Critical | Severity::Severe)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SeverityCounts {
    pub critical: usize,
    pub high: usize,
    pub medium: usize,
}

/// Overall risk band derived from the 0-100 score (higher score = safer contract)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    Low,
    Medium,
    High,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        if score > 80 {
            ScoreBand::Low
        } else if score > 50 {
            ScoreBand::Medium
        } else {
            ScoreBand::High
        }
    }

    pub fn headline(self) -> &'static str {
        match self {
            ScoreBand::Low => "Low risk - Contract looks fair",
            ScoreBand::Medium => "Medium risk - Review carefully",
            ScoreBand::High => "High risk - Do not sign without changes",
        }
    }

    pub fn recommendation(self) -> &'static str {
        match self {
            ScoreBand::Low => {
                "The contract is generally favorable. You can proceed, but double-check any \
                 specific user expectations that were flagged."
            }
            ScoreBand::Medium => {
                "Significant risks identified. We recommend renegotiating the flagged clauses \
                 before signing."
            }
            ScoreBand::High => {
                "Critical issues found. Do not sign this contract without legal review and \
                 substantial changes."
            }
        }
    }
}
