//! Parser for risk filter expressions.
//!
//! # Syntax
//!
//! ```text
//! filter_expr  := field_filter (operator? field_filter)*
//! field_filter := field_name:value | field_name:"quoted value"
//! operator     := AND | OR (case-insensitive, OR binds tighter than AND)
//! field_name   := severity | category | check (case-insensitive)
//! ```
//!
//! # Examples
//!
//! ```rust
//! # use contractiq::filters::parser::parse_filter;
//! // Critical or severe risks about liability
//! let expr = parse_filter("severity:critical severity:severe category:liability").unwrap();
//! assert_eq!(expr.filters.len(), 3);
//!
//! // Quoted values for spaces
//! let expr = parse_filter("check:\"ai flagged\"").unwrap();
//! assert_eq!(expr.filters[0].value, "ai flagged");
//! ```

use std::iter::Peekable;
use std::str::Chars;

use anyhow::{Context, Result, anyhow, bail};

use super::ast::{FieldFilter, FilterExpr, FilterField, FilterOperator};

const SEVERITY_VALUES: [&str; 6] = ["all", "critical", "severe", "high", "medium", "low"];

#[derive(Debug, Clone, PartialEq, Eq)]
enum Token {
    Filter { field: String, value: String },
    Operator(FilterOperator),
}

fn tokenize(input: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = input.chars().peekable();

    loop {
        while chars.next_if(|c| c.is_whitespace()).is_some() {}
        if chars.peek().is_none() {
            break;
        }

        let word = take_until_whitespace(&mut chars);
        if word.eq_ignore_ascii_case("and") {
            tokens.push(Token::Operator(FilterOperator::And));
            continue;
        }
        if word.eq_ignore_ascii_case("or") {
            tokens.push(Token::Operator(FilterOperator::Or));
            continue;
        }

        let Some((field, raw_value)) = word.split_once(':') else {
            bail!("Invalid token: '{}' (expected field:value or AND/OR)", word);
        };
        let value = match raw_value.strip_prefix('"') {
            Some(opened) => finish_quoted(&mut chars, opened)?,
            None => raw_value.to_string(),
        };
        if field.is_empty() || value.is_empty() {
            bail!("Invalid field:value format: {}", word);
        }
        tokens.push(Token::Filter { field: field.to_string(), value });
    }

    Ok(tokens)
}

fn take_until_whitespace(chars: &mut Peekable<Chars>) -> String {
    let mut word = String::new();
    while let Some(c) = chars.next_if(|c| !c.is_whitespace()) {
        word.push(c);
    }
    word
}

/// Complete a quoted value whose opening part (after the quote) was already read
fn finish_quoted(chars: &mut Peekable<Chars>, opened: &str) -> Result<String> {
    if let Some((value, _)) = opened.split_once('"') {
        return Ok(value.to_string());
    }

    let mut value = opened.to_string();
    for c in chars.by_ref() {
        if c == '"' {
            return Ok(value);
        }
        value.push(c);
    }
    Err(anyhow!("Unterminated quoted string"))
}

fn parse_field(name: &str) -> Result<FilterField> {
    match name.to_lowercase().as_str() {
        "severity" => Ok(FilterField::Severity),
        "category" => Ok(FilterField::Category),
        "check" => Ok(FilterField::Check),
        _ => Err(anyhow!("Unknown field: '{}' (valid fields: severity, category, check)", name)),
    }
}

fn validate_value(field: FilterField, value: &str) -> Result<()> {
    if field == FilterField::Severity && !SEVERITY_VALUES.contains(&value.to_lowercase().as_str())
    {
        bail!(
            "Invalid severity value: '{}' (expected one of: {})",
            value,
            SEVERITY_VALUES.join(", ")
        );
    }
    Ok(())
}

/// Parse a filter string into a [`FilterExpr`]
///
/// An empty or whitespace-only string yields an empty expression that matches everything.
/// Without an explicit operator a filter joins the earlier clause on the same field (OR) or
/// starts a new clause (AND), wherever that field first appeared in the input.
pub fn parse_filter(input: &str) -> Result<FilterExpr> {
    let tokens = tokenize(input).context("Failed to tokenize filter")?;

    let mut clauses: Vec<Vec<FieldFilter>> = Vec::new();
    let mut pending: Option<FilterOperator> = None;

    for token in tokens {
        match token {
            Token::Filter { field, value } => {
                let field = parse_field(&field)?;
                validate_value(field, &value)?;
                let filter = FieldFilter::new(field, value);

                match pending.take() {
                    Some(FilterOperator::Or) => match clauses.last_mut() {
                        Some(clause) => clause.push(filter),
                        None => clauses.push(vec![filter]),
                    },
                    Some(FilterOperator::And) => clauses.push(vec![filter]),
                    None => {
                        let same_field = clauses
                            .iter_mut()
                            .find(|clause| clause.iter().all(|f| f.field == field));
                        match same_field {
                            Some(clause) => clause.push(filter),
                            None => clauses.push(vec![filter]),
                        }
                    }
                }
            }
            Token::Operator(operator) => {
                if clauses.is_empty() || pending.is_some() {
                    bail!("Unexpected {:?} operator (expected field:value)", operator);
                }
                pending = Some(operator);
            }
        }
    }

    if pending.is_some() {
        bail!("Filter ended with operator (expected field:value)");
    }

    let mut expr = FilterExpr::new();
    for (i, clause) in clauses.into_iter().enumerate() {
        for (j, filter) in clause.into_iter().enumerate() {
            let operator = match (i, j) {
                (0, 0) => None,
                (_, 0) => Some(FilterOperator::And),
                _ => Some(FilterOperator::Or),
            };
            expr.push(operator, filter);
        }
    }
    Ok(expr)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input() {
        assert!(parse_filter("").unwrap().is_empty());
        assert!(parse_filter("   ").unwrap().is_empty());
    }

    #[test]
    fn test_single_filter() {
        let expr = parse_filter("severity:High").unwrap();
        assert_eq!(expr.filters, vec![FieldFilter::new(FilterField::Severity, "High")]);
        assert!(expr.operators.is_empty());
    }

    #[test]
    fn test_implicit_operators() {
        let expr = parse_filter("severity:high severity:critical category:payment").unwrap();
        assert_eq!(expr.operators, vec![FilterOperator::Or, FilterOperator::And]);
    }

    #[test]
    fn test_explicit_operator_overrides_default() {
        let expr = parse_filter("severity:high OR category:payment").unwrap();
        assert_eq!(expr.operators, vec![FilterOperator::Or]);

        let expr = parse_filter("category:a and category:b").unwrap();
        assert_eq!(expr.operators, vec![FilterOperator::And]);
    }

    #[test]
    fn test_implicit_same_field_joins_earlier_clause() {
        let expr = parse_filter("category:payment severity:critical severity:high").unwrap();
        let fields: Vec<FilterField> = expr.filters.iter().map(|f| f.field).collect();
        assert_eq!(
            fields,
            vec![FilterField::Category, FilterField::Severity, FilterField::Severity]
        );
        assert_eq!(expr.operators, vec![FilterOperator::And, FilterOperator::Or]);

        let expr = parse_filter("severity:critical category:payment severity:high").unwrap();
        assert_eq!(expr.filters[1].value, "high");
        assert_eq!(expr.operators, vec![FilterOperator::Or, FilterOperator::And]);
    }

    #[test]
    fn test_explicit_and_then_implicit_same_field() {
        let expr = parse_filter("severity:high AND category:x severity:low").unwrap();
        let values: Vec<&str> = expr.filters.iter().map(|f| f.value.as_str()).collect();
        assert_eq!(values, vec!["high", "low", "x"]);
        assert_eq!(expr.operators, vec![FilterOperator::Or, FilterOperator::And]);
    }

    #[test]
    fn test_quoted_value() {
        let expr = parse_filter("category:\"payment terms\" check:mismatch").unwrap();
        assert_eq!(expr.filters[0].value, "payment terms");
        assert_eq!(expr.filters[1].field, FilterField::Check);
    }

    #[test]
    fn test_quoted_single_word() {
        let expr = parse_filter("check:\"mismatch\"").unwrap();
        assert_eq!(expr.filters[0].value, "mismatch");
    }

    #[test]
    fn test_unterminated_quote() {
        assert!(parse_filter("category:\"payment terms").is_err());
    }

    #[test]
    fn test_unknown_field() {
        let err = parse_filter("owner:me").unwrap_err();
        assert!(err.to_string().contains("Unknown field"));
    }

    #[test]
    fn test_invalid_severity() {
        assert!(parse_filter("severity:extreme").is_err());
        assert!(parse_filter("severity:ALL").is_ok());
    }

    #[test]
    fn test_bare_word_rejected() {
        assert!(parse_filter("payment").is_err());
    }

    #[test]
    fn test_operator_placement_errors() {
        assert!(parse_filter("AND severity:high").is_err());
        assert!(parse_filter("severity:high OR").is_err());
        assert!(parse_filter("severity:high AND OR category:x").is_err());
    }

    #[test]
    fn test_empty_value_rejected() {
        assert!(parse_filter("category:").is_err());
        assert!(parse_filter(":value").is_err());
    }
}
