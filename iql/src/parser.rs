//! IQL shape parser
//!
//! Validates the structure of a loosely-typed JSON query object and converts
//! it into the typed AST. Literal types, wildcard placement and the OPTIONS
//! key set depend on the target dataset being resolved first, so they are
//! checked later through [`Comparison::predicate`] and [`Options::validate`].

use serde_json::{Map, Value};

use crate::ast::*;
use crate::error::ParseError;

const WHERE: &str = "WHERE";
const OPTIONS: &str = "OPTIONS";
const COLUMNS: &str = "COLUMNS";
const ORDER: &str = "ORDER";

/// Parse a complete query object
pub fn parse_query(value: &Value) -> Result<Query, ParseError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ParseError::shape("Query must be an object"))?;

    if obj.len() != 2 || !obj.contains_key(WHERE) || !obj.contains_key(OPTIONS) {
        return Err(ParseError::shape(format!(
            "Query must contain exactly {} and {}, found [{}]",
            WHERE,
            OPTIONS,
            key_list(obj)
        )));
    }

    let filter = match &obj[WHERE] {
        Value::Object(node) => filter(node)?,
        _ => return Err(ParseError::shape("WHERE must be an object")),
    };
    let options = options(&obj[OPTIONS])?;

    Ok(Query { filter, options })
}

/// Parse query text
pub fn parse_query_str(input: &str) -> Result<Query, ParseError> {
    let value: Value = serde_json::from_str(input.trim())?;
    parse_query(&value)
}

// ============================================================================
// WHERE
// ============================================================================

fn filter(node: &Map<String, Value>) -> Result<Filter, ParseError> {
    let mut entries = node.iter();
    let (key, body) = match (entries.next(), entries.next()) {
        (None, _) => return Ok(Filter::Empty),
        (Some(entry), None) => entry,
        _ => {
            return Err(ParseError::shape(format!(
                "Filter must have exactly one key, found [{}]",
                key_list(node)
            )))
        }
    };

    match key.as_str() {
        "AND" => logical(LogicOp::And, body),
        "OR" => logical(LogicOp::Or, body),
        "NOT" => match body {
            Value::Object(inner) => Ok(Filter::Not(Box::new(filter(inner)?))),
            _ => Err(ParseError::shape("NOT must wrap an object")),
        },
        other => match CompareOp::from_keyword(other) {
            Some(op) => comparison(op, body).map(Filter::Comparison),
            None => Err(ParseError::shape(format!("Invalid filter key: {}", other))),
        },
    }
}

fn logical(op: LogicOp, body: &Value) -> Result<Filter, ParseError> {
    let items = body.as_array().ok_or_else(|| {
        ParseError::shape(format!("{} must be an array", op.keyword()))
    })?;

    if items.is_empty() {
        return Err(ParseError::shape(format!(
            "{} must contain at least one filter",
            op.keyword()
        )));
    }

    let operands = items
        .iter()
        .map(|item| match item {
            Value::Object(inner) => filter(inner),
            _ => Err(ParseError::shape(format!(
                "{} operands must be objects",
                op.keyword()
            ))),
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(Filter::Logical { op, operands })
}

fn comparison(op: CompareOp, body: &Value) -> Result<Comparison, ParseError> {
    let body = body
        .as_object()
        .ok_or_else(|| ParseError::shape(format!("{} must be an object", op.keyword())))?;

    let mut entries = body.iter();
    match (entries.next(), entries.next()) {
        (Some((field, literal)), None) => Ok(Comparison::new(field.clone(), op, literal.clone())),
        _ => Err(ParseError::shape(format!(
            "{} must reference exactly one field, found [{}]",
            op.keyword(),
            key_list(body)
        ))),
    }
}

// ============================================================================
// OPTIONS
// ============================================================================

fn options(value: &Value) -> Result<Options, ParseError> {
    let obj = value
        .as_object()
        .ok_or_else(|| ParseError::shape("OPTIONS must be an object"))?;

    let columns = match obj.get(COLUMNS) {
        Some(Value::Array(items)) => items
            .iter()
            .map(|item| {
                item.as_str()
                    .map(str::to_string)
                    .ok_or_else(|| ParseError::shape("COLUMNS entries must be strings"))
            })
            .collect::<Result<Vec<_>, _>>()?,
        Some(_) => return Err(ParseError::shape("COLUMNS must be an array")),
        None => return Err(ParseError::shape("OPTIONS missing COLUMNS")),
    };

    if columns.is_empty() {
        return Err(ParseError::shape("COLUMNS must be a non-empty array"));
    }

    let order = match obj.get(ORDER) {
        None => None,
        Some(Value::String(key)) => Some(key.clone()),
        Some(_) => return Err(ParseError::shape("ORDER must be a string")),
    };

    let extra_keys = obj
        .keys()
        .filter(|k| k.as_str() != COLUMNS && k.as_str() != ORDER)
        .cloned()
        .collect();

    Ok(Options {
        columns,
        order,
        extra_keys,
    })
}

fn key_list(obj: &Map<String, Value>) -> String {
    obj.keys().map(String::as_str).collect::<Vec<_>>().join(", ")
}
