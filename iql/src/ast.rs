//! Abstract Syntax Tree for IQL

use serde_json::Value;

use crate::error::ParseError;

/// A complete IQL query
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    /// The WHERE clause
    pub filter: Filter,
    /// The OPTIONS clause
    pub options: Options,
}

impl Query {
    /// Dataset id the query targets, taken from the first projected column.
    ///
    /// This is the text before the first underscore of `COLUMNS[0]`. Whether
    /// the remaining columns agree is checked during execution.
    pub fn dataset_id(&self) -> &str {
        let first = self.options.columns.first().map(String::as_str).unwrap_or("");
        first.split_once('_').map(|(id, _)| id).unwrap_or(first)
    }
}

/// OPTIONS clause
#[derive(Debug, Clone, PartialEq)]
pub struct Options {
    /// Qualified column names to project, never empty
    pub columns: Vec<String>,
    /// Optional ascending sort column
    pub order: Option<String>,
    /// Keys other than COLUMNS and ORDER, rejected by [`Options::validate`]
    pub extra_keys: Vec<String>,
}

impl Options {
    /// Key-set rules checked once the target dataset is known.
    ///
    /// OPTIONS may hold only COLUMNS and ORDER, and ORDER must name one of
    /// the projected columns.
    pub fn validate(&self) -> Result<(), ParseError> {
        if let Some(extra) = self.extra_keys.first() {
            return Err(ParseError::shape(format!("Invalid key in OPTIONS: {}", extra)));
        }

        match &self.order {
            Some(order) if !self.columns.contains(order) => Err(ParseError::shape(format!(
                "ORDER key '{}' must be in COLUMNS",
                order
            ))),
            _ => Ok(()),
        }
    }
}

/// A node of the WHERE filter tree
#[derive(Debug, Clone, PartialEq)]
pub enum Filter {
    /// `{}` - matches every record
    Empty,
    /// AND / OR over one or more operands
    Logical { op: LogicOp, operands: Vec<Filter> },
    /// NOT
    Not(Box<Filter>),
    /// Field comparison
    Comparison(Comparison),
}

impl Filter {
    /// Number of nodes in the tree
    pub fn size(&self) -> usize {
        match self {
            Filter::Empty | Filter::Comparison(_) => 1,
            Filter::Not(inner) => 1 + inner.size(),
            Filter::Logical { operands, .. } => {
                1 + operands.iter().map(Filter::size).sum::<usize>()
            }
        }
    }
}

/// Logical connectives
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicOp {
    And,
    Or,
}

impl LogicOp {
    pub fn keyword(&self) -> &'static str {
        match self {
            LogicOp::And => "AND",
            LogicOp::Or => "OR",
        }
    }
}

/// A single `{OP: {field: value}}` leaf
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    /// Qualified field name as written in the query
    pub field: String,
    pub op: CompareOp,
    /// Operand as written; its type is only checked by [`Comparison::predicate`]
    pub literal: Value,
}

impl Comparison {
    pub fn new(field: impl Into<String>, op: CompareOp, literal: Value) -> Self {
        Self {
            field: field.into(),
            op,
            literal,
        }
    }

    /// Check the operand against the operator.
    ///
    /// IS takes a string with wildcards only at the ends. EQ, LT and GT take
    /// a number.
    pub fn predicate(&self) -> Result<Predicate, ParseError> {
        if self.op == CompareOp::Is {
            let text = self.literal.as_str().ok_or_else(|| self.mismatch("a string"))?;
            return Ok(Predicate::Is(Pattern::parse(text)?));
        }

        let number = self.literal.as_f64().ok_or_else(|| self.mismatch("a number"))?;
        Ok(match self.op {
            CompareOp::Eq => Predicate::Eq(number),
            CompareOp::Lt => Predicate::Lt(number),
            _ => Predicate::Gt(number),
        })
    }

    fn mismatch(&self, expected: &str) -> ParseError {
        ParseError::type_mismatch(format!(
            "{} on '{}' expects {}, got {}",
            self.op.keyword(),
            self.field,
            expected,
            self.literal
        ))
    }
}

/// Comparison operators
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CompareOp {
    Is,
    Eq,
    Lt,
    Gt,
}

impl CompareOp {
    pub fn from_keyword(keyword: &str) -> Option<Self> {
        match keyword {
            "IS" => Some(CompareOp::Is),
            "EQ" => Some(CompareOp::Eq),
            "LT" => Some(CompareOp::Lt),
            "GT" => Some(CompareOp::Gt),
            _ => None,
        }
    }

    pub fn keyword(&self) -> &'static str {
        match self {
            CompareOp::Is => "IS",
            CompareOp::Eq => "EQ",
            CompareOp::Lt => "LT",
            CompareOp::Gt => "GT",
        }
    }
}

/// Operator together with its checked operand
#[derive(Debug, Clone, PartialEq)]
pub enum Predicate {
    /// IS - string match with optional wildcards
    Is(Pattern),
    /// EQ - numeric equality
    Eq(f64),
    /// LT - numeric less-than
    Lt(f64),
    /// GT - numeric greater-than
    Gt(f64),
}

impl Predicate {
    pub fn keyword(&self) -> &'static str {
        match self {
            Predicate::Is(_) => "IS",
            Predicate::Eq(_) => "EQ",
            Predicate::Lt(_) => "LT",
            Predicate::Gt(_) => "GT",
        }
    }

    /// Whether the operator compares numbers (as opposed to strings)
    pub fn is_numeric(&self) -> bool {
        !matches!(self, Predicate::Is(_))
    }
}

/// Parsed IS operand.
///
/// Wildcards may only appear as the first and/or last character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Pattern {
    /// `abc`
    Exact(String),
    /// `abc*`
    Prefix(String),
    /// `*abc`
    Suffix(String),
    /// `*abc*`
    Contains(String),
}

impl Pattern {
    pub fn parse(raw: &str) -> Result<Self, ParseError> {
        let leading = raw.starts_with('*');
        let rest = if leading { &raw[1..] } else { raw };
        let trailing = rest.ends_with('*');
        let core = if trailing { &rest[..rest.len() - 1] } else { rest };

        if core.contains('*') {
            return Err(ParseError::Pattern(raw.to_string()));
        }

        let core = core.to_string();
        Ok(match (leading, trailing) {
            (false, false) => Pattern::Exact(core),
            (false, true) => Pattern::Prefix(core),
            (true, false) => Pattern::Suffix(core),
            (true, true) => Pattern::Contains(core),
        })
    }

    /// The literal text with wildcards stripped
    pub fn literal(&self) -> &str {
        match self {
            Pattern::Exact(s) | Pattern::Prefix(s) | Pattern::Suffix(s) | Pattern::Contains(s) => s,
        }
    }

    /// True when any input may precede the literal
    pub fn open_start(&self) -> bool {
        matches!(self, Pattern::Suffix(_) | Pattern::Contains(_))
    }

    /// True when any input may follow the literal
    pub fn open_end(&self) -> bool {
        matches!(self, Pattern::Prefix(_) | Pattern::Contains(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_pattern_forms() {
        assert_eq!(Pattern::parse("cpsc").unwrap(), Pattern::Exact("cpsc".into()));
        assert_eq!(Pattern::parse("cpsc*").unwrap(), Pattern::Prefix("cpsc".into()));
        assert_eq!(Pattern::parse("*310").unwrap(), Pattern::Suffix("310".into()));
        assert_eq!(Pattern::parse("*31*").unwrap(), Pattern::Contains("31".into()));
        assert_eq!(Pattern::parse("").unwrap(), Pattern::Exact(String::new()));
    }

    #[test]
    fn test_lone_wildcards() {
        assert_eq!(Pattern::parse("*").unwrap(), Pattern::Suffix(String::new()));
        assert_eq!(Pattern::parse("**").unwrap(), Pattern::Contains(String::new()));
    }

    #[test]
    fn test_interior_wildcard_rejected() {
        assert!(matches!(Pattern::parse("cp*sc"), Err(ParseError::Pattern(_))));
        assert!(matches!(Pattern::parse("***"), Err(ParseError::Pattern(_))));
        assert!(matches!(Pattern::parse("*a*b"), Err(ParseError::Pattern(_))));
    }

    #[test]
    fn test_predicate_checks_literal() {
        let gt = Comparison::new("courses_avg", CompareOp::Gt, json!(90));
        assert_eq!(gt.predicate().unwrap(), Predicate::Gt(90.0));

        let is = Comparison::new("courses_dept", CompareOp::Is, json!("cp*"));
        assert_eq!(is.predicate().unwrap(), Predicate::Is(Pattern::Prefix("cp".into())));

        let wrong = Comparison::new("courses_dept", CompareOp::Is, json!(5));
        assert!(matches!(wrong.predicate(), Err(ParseError::Type(_))));

        let wrong = Comparison::new("courses_avg", CompareOp::Lt, json!("90"));
        assert!(matches!(wrong.predicate(), Err(ParseError::Type(_))));

        let bad = Comparison::new("courses_dept", CompareOp::Is, json!("c*sc"));
        assert_eq!(bad.predicate(), Err(ParseError::Pattern("c*sc".into())));
    }

    #[test]
    fn test_options_validate() {
        let options = |order: Option<&str>, extra: &[&str]| Options {
            columns: vec!["courses_dept".into(), "courses_avg".into()],
            order: order.map(str::to_string),
            extra_keys: extra.iter().map(|k| k.to_string()).collect(),
        };

        assert!(options(None, &[]).validate().is_ok());
        assert!(options(Some("courses_avg"), &[]).validate().is_ok());
        assert!(matches!(options(Some("courses_year"), &[]).validate(), Err(ParseError::Shape(_))));
        assert!(matches!(options(None, &["FORM"]).validate(), Err(ParseError::Shape(_))));
        assert!(matches!(
            options(Some("courses_avg"), &["FORM"]).validate(),
            Err(ParseError::Shape(_))
        ));
    }

    #[test]
    fn test_filter_size() {
        let leaf = Filter::Comparison(Comparison::new("courses_avg", CompareOp::Gt, json!(90)));
        let tree = Filter::Logical {
            op: LogicOp::And,
            operands: vec![leaf.clone(), Filter::Not(Box::new(leaf))],
        };
        assert_eq!(tree.size(), 4);
    }
}
