//! IQL - Insight Query Language
//!
//! The JSON query shape understood by the insight dataset engine.
//!
//! # Syntax Overview
//!
//! ```json
//! {
//!   "WHERE": {
//!     "AND": [
//!       { "GT": { "courses_avg": 90 } },
//!       { "IS": { "courses_dept": "cp*" } },
//!       { "NOT": { "EQ": { "courses_year": 1900 } } }
//!     ]
//!   },
//!   "OPTIONS": {
//!     "COLUMNS": ["courses_dept", "courses_avg"],
//!     "ORDER": "courses_avg"
//!   }
//! }
//! ```
//!
//! # Filters
//!
//! - `{}` - match every record
//! - `AND` / `OR` - non-empty array of filters
//! - `NOT` - a single filter
//! - `IS` - string match; `*` allowed only as first and/or last character
//! - `EQ` / `LT` / `GT` - numeric comparison
//!
//! Field names are qualified as `<dataset>_<field>`. Resolving them against a
//! dataset is left to the engine. Parsing only checks structure; the engine
//! calls [`Comparison::predicate`] and [`Options::validate`] after resolving
//! the fields they apply to.

mod ast;
mod error;
mod parser;

pub use ast::*;
pub use error::ParseError;

/// Parse a JSON query object into an AST
pub fn parse(value: &serde_json::Value) -> Result<Query, ParseError> {
    parser::parse_query(value)
}

/// Parse JSON query text into an AST
pub fn parse_str(input: &str) -> Result<Query, ParseError> {
    parser::parse_query_str(input)
}
