use super::ast::{FieldFilter, FilterExpr, FilterField, FilterOperator};
use crate::models::{RiskItem, Severity};

/// Risks matching `filter`, in their original order
pub fn apply_filters<'a>(risks: &'a [RiskItem], filter: &FilterExpr) -> Vec<&'a RiskItem> {
    risks.iter().filter(|risk| evaluate(risk, filter)).collect()
}

/// Risks whose finding or category contains `query` (case-insensitive)
pub fn search_risks<'a>(risks: &[&'a RiskItem], query: &str) -> Vec<&'a RiskItem> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return risks.to_vec();
    }
    risks
        .iter()
        .copied()
        .filter(|risk| {
            risk.finding.to_lowercase().contains(&needle)
                || risk.category.to_lowercase().contains(&needle)
        })
        .collect()
}

/// Field filter followed by free-text search
pub fn filter_risks<'a>(
    risks: &'a [RiskItem],
    filter: &FilterExpr,
    query: &str,
) -> Vec<&'a RiskItem> {
    search_risks(&apply_filters(risks, filter), query)
}

/// OR binds tighter than AND: the expression is a conjunction of OR-clauses
fn evaluate(risk: &RiskItem, filter: &FilterExpr) -> bool {
    let Some(first) = filter.filters.first() else {
        return true;
    };

    let mut all_clauses = true;
    let mut clause = matches_field(risk, first);
    for (operator, next) in filter.operators.iter().zip(filter.filters.iter().skip(1)) {
        let next_result = matches_field(risk, next);
        match operator {
            FilterOperator::Or => clause = clause || next_result,
            FilterOperator::And => {
                all_clauses = all_clauses && clause;
                clause = next_result;
            }
        }
    }
    all_clauses && clause
}

fn matches_field(risk: &RiskItem, filter: &FieldFilter) -> bool {
    match filter.field {
        FilterField::Severity => match_severity(risk, &filter.value),
        FilterField::Category => contains_ignore_case(&risk.category, &filter.value),
        FilterField::Check => contains_ignore_case(&risk.expectation_check, &filter.value),
    }
}

/// `all` matches everything; known labels compare by parsed severity, anything else by label
fn match_severity(risk: &RiskItem, value: &str) -> bool {
    if value.eq_ignore_ascii_case("all") {
        return true;
    }
    match Severity::parse(value) {
        Severity::Unknown => risk.severity.eq_ignore_ascii_case(value),
        wanted => risk.severity_level() == wanted,
    }
}

fn contains_ignore_case(haystack: &str, needle: &str) -> bool {
    haystack.to_lowercase().contains(&needle.to_lowercase())
}
