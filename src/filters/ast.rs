/// Risk attributes a filter can target
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterField {
    /// Severity label (`critical`, `severe`, `high`, `medium`, `low`, or `all`)
    Severity,
    /// Risk category, case-insensitive substring
    Category,
    /// Expectation check verdict (`Mismatch`, `Concern`, `AI Flagged`), case-insensitive substring
    Check,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FilterOperator {
    And,
    Or,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFilter {
    pub field: FilterField,
    pub value: String,
}

impl FieldFilter {
    pub fn new(field: FilterField, value: impl Into<String>) -> Self {
        Self { field, value: value.into() }
    }
}

/// Filters joined by operators (`operators.len() == filters.len() - 1`)
///
/// OR binds tighter than AND, so `a OR b AND c` reads as `(a OR b) AND c`. The parser keeps
/// same-field filters adjacent in one OR-clause.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FilterExpr {
    pub filters: Vec<FieldFilter>,
    pub operators: Vec<FilterOperator>,
}

impl FilterExpr {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, operator: Option<FilterOperator>, filter: FieldFilter) {
        if let Some(operator) = operator {
            self.operators.push(operator);
        }
        self.filters.push(filter);
    }

    pub fn is_empty(&self) -> bool {
        self.filters.is_empty()
    }
}
