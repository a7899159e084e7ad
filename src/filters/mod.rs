//! Risk filtering for report views
//!
//! Two layers, matching the report's search box and severity selector:
//! - a field filter expression (`severity:high category:payment`), see [`parser`]
//! - a free-text search over finding and category, see [`apply::search_risks`]

pub mod apply;
pub mod ast;
pub mod parser;

pub use apply::{apply_filters, filter_risks, search_risks};
pub use ast::{FieldFilter, FilterExpr, FilterField, FilterOperator};
pub use parser::parse_filter;
