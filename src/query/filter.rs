//! Filter/WHERE clause evaluation
//!
//! Each node evaluates to the set of record positions it matches. Sets are
//! combined functionally: AND intersects, OR unions, NOT complements against
//! every position in the dataset.

use std::collections::BTreeSet;

use iql::{Comparison, Filter, LogicOp, Pattern, Predicate};
use regex::{Regex, RegexBuilder};

use super::field;
use crate::error::{Error, Result};
use crate::storage::dataset::{Dataset, Value};

/// Positions into a dataset's record sequence, in record order
pub type IndexSet = BTreeSet<usize>;

/// Compiled size allowed for one wildcard matcher
const WILDCARD_SIZE_LIMIT: usize = 10 * (1 << 20);

/// Evaluate a filter tree against a dataset
pub fn evaluate(filter: &Filter, dataset: &Dataset) -> Result<IndexSet> {
    match filter {
        Filter::Empty => Ok(universe(dataset)),

        Filter::Logical { op, operands } => {
            let (first, rest) = operands.split_first().ok_or_else(|| Error::Shape {
                message: format!("{} must contain at least one filter", op.keyword()),
            })?;

            let mut acc = evaluate(first, dataset)?;
            for operand in rest {
                let next = evaluate(operand, dataset)?;
                acc = match op {
                    LogicOp::And => acc.intersection(&next).copied().collect(),
                    LogicOp::Or => acc.union(&next).copied().collect(),
                };
            }
            Ok(acc)
        }

        Filter::Not(inner) => {
            let excluded = evaluate(inner, dataset)?;
            Ok(universe(dataset).difference(&excluded).copied().collect())
        }

        Filter::Comparison(cmp) => evaluate_comparison(cmp, dataset),
    }
}

fn universe(dataset: &Dataset) -> IndexSet {
    (0..dataset.len()).collect()
}

fn evaluate_comparison(cmp: &Comparison, dataset: &Dataset) -> Result<IndexSet> {
    // Field errors take precedence over operand errors
    let local = field::resolve(&cmp.field, dataset)?;
    let predicate = cmp.predicate()?;
    let matcher = Matcher::new(&predicate)?;

    let mut hits = IndexSet::new();
    for (index, record) in dataset.records().iter().enumerate() {
        // Records are assumed to share the first record's schema
        let Some(value) = record.get(local) else {
            continue;
        };
        if matcher.matches(value).ok_or_else(|| type_error(cmp, &predicate, value))? {
            hits.insert(index);
        }
    }

    Ok(hits)
}

fn type_error(cmp: &Comparison, predicate: &Predicate, value: &Value) -> Error {
    let expected = if predicate.is_numeric() { "number" } else { "string" };
    Error::Type {
        message: format!(
            "{} on '{}' requires {} values, found {}",
            predicate.keyword(),
            cmp.field,
            expected,
            value.type_name()
        ),
    }
}

/// A predicate compiled once per comparison node
#[derive(Debug)]
enum Matcher {
    Exact(String),
    Wildcard(Regex),
    Eq(f64),
    Lt(f64),
    Gt(f64),
}

impl Matcher {
    fn new(predicate: &Predicate) -> Result<Self> {
        Ok(match predicate {
            Predicate::Is(Pattern::Exact(text)) => Matcher::Exact(text.clone()),
            Predicate::Is(pattern) => Matcher::Wildcard(wildcard_regex(pattern)?),
            Predicate::Eq(n) => Matcher::Eq(*n),
            Predicate::Lt(n) => Matcher::Lt(*n),
            Predicate::Gt(n) => Matcher::Gt(*n),
        })
    }

    /// None when the stored value has the wrong type for the operator
    fn matches(&self, value: &Value) -> Option<bool> {
        match self {
            Matcher::Exact(text) => value.as_str().map(|s| s == text),
            Matcher::Wildcard(re) => value.as_str().map(|s| re.is_match(s)),
            Matcher::Eq(n) => value.as_f64().map(|v| v == *n),
            Matcher::Lt(n) => value.as_f64().map(|v| v < *n),
            Matcher::Gt(n) => value.as_f64().map(|v| v > *n),
        }
    }
}

/// Anchored regex for a prefix/suffix/substring pattern
fn wildcard_regex(pattern: &Pattern) -> Result<Regex> {
    compile_wildcard(pattern, WILDCARD_SIZE_LIMIT)
}

/// The literal is escaped, so building only fails when the compiled matcher
/// is over `size_limit`.
fn compile_wildcard(pattern: &Pattern, size_limit: usize) -> Result<Regex> {
    let any = "(?s:.*)";
    let source = format!(
        "^{}{}{}$",
        if pattern.open_start() { any } else { "" },
        regex::escape(pattern.literal()),
        if pattern.open_end() { any } else { "" },
    );

    RegexBuilder::new(&source)
        .size_limit(size_limit)
        .build()
        .map_err(|_| Error::PatternTooLarge {
            pattern: pattern.literal().to_string(),
        })
}
