//! Query execution engine for insight
//!
//! Executes parsed IQL queries against loaded datasets.

mod executor;
mod field;
pub mod filter;
pub mod project;
pub mod sort;

pub use executor::{execute, run, MAX_RESULTS};
pub use project::Row;
