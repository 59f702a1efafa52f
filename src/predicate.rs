//! Single-condition `WHERE` filtering.
//!
//! A condition has the shape `<identifier> <operator> <literal>`. When the
//! text does not have that shape, or names a column the table lacks, the
//! filter lets every row through instead of failing the query.

use std::cmp::Ordering;

use tracing::debug;

use crate::column::Column;
use crate::tokenizer::parse_literal;
use crate::value::Value;

/// Comparison operators accepted in a `WHERE` condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ComparisonOp {
    GtEq,
    LtEq,
    NotEq,
    Eq,
    Gt,
    Lt,
}

/// Operator tokens in match order: two-character tokens before their prefixes.
const OPERATORS: [(&str, ComparisonOp); 7] = [
    (">=", ComparisonOp::GtEq),
    ("<=", ComparisonOp::LtEq),
    ("!=", ComparisonOp::NotEq),
    ("<>", ComparisonOp::NotEq),
    ("=", ComparisonOp::Eq),
    (">", ComparisonOp::Gt),
    ("<", ComparisonOp::Lt),
];

impl ComparisonOp {
    /// Whether `ordering` (stored value relative to the literal) satisfies the operator.
    pub fn accepts(self, ordering: Ordering) -> bool {
        match self {
            Self::Eq => ordering == Ordering::Equal,
            Self::NotEq => ordering != Ordering::Equal,
            Self::Gt => ordering == Ordering::Greater,
            Self::Lt => ordering == Ordering::Less,
            Self::GtEq => ordering != Ordering::Less,
            Self::LtEq => ordering != Ordering::Greater,
        }
    }
}

/// A parsed `column op literal` comparison.
#[derive(Debug, Clone, PartialEq)]
pub struct Condition {
    pub column: String,
    pub op: ComparisonOp,
    pub value: Value,
}

impl Condition {
    /// Parses `<identifier> <operator> <literal>`, whitespace optional.
    ///
    /// The identifier is the longest run of word characters, the operator the
    /// longest operator token after it, and the literal everything left.
    /// Returns `None` when the text does not have this shape.
    pub fn parse(text: &str) -> Option<Self> {
        let text = text.trim();

        let ident_end = text
            .char_indices()
            .find(|(_, c)| !(c.is_alphanumeric() || *c == '_'))
            .map(|(i, _)| i)
            .unwrap_or(text.len());
        if ident_end == 0 {
            return None;
        }
        let (column, rest) = text.split_at(ident_end);
        let rest = rest.trim_start();

        let (token, op) = OPERATORS
            .iter()
            .find(|(token, _)| rest.starts_with(*token))?;

        let literal = rest[token.len()..].trim();
        if literal.is_empty() {
            return None;
        }

        Some(Self {
            column: column.to_string(),
            op: *op,
            value: parse_literal(literal),
        })
    }

    /// Compares `stored` against the literal using [Value::total_cmp].
    pub fn test(&self, stored: &Value) -> bool {
        self.op.accepts(stored.total_cmp(&self.value))
    }
}

/// The raw `WHERE` text together with its parsed condition, if it parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct Predicate {
    pub text: String,
    pub condition: Option<Condition>,
}

impl Predicate {
    pub fn parse(text: &str) -> Self {
        Self {
            text: text.trim().to_string(),
            condition: Condition::parse(text),
        }
    }

    /// Resolves the condition's column against a table's columns.
    ///
    /// The returned filter matches every row when the condition did not parse
    /// or its column is unknown.
    pub fn bind<'a>(&'a self, columns: &[Column]) -> RowFilter<'a> {
        let Some(condition) = &self.condition else {
            debug!(clause = %self.text, "WHERE clause is not a simple comparison, keeping all rows");
            return RowFilter { target: None };
        };

        match columns.iter().position(|col| col.matches(&condition.column)) {
            Some(idx) => RowFilter {
                target: Some((idx, condition)),
            },
            None => {
                debug!(column = %condition.column, "WHERE column not found, keeping all rows");
                RowFilter { target: None }
            }
        }
    }
}

/// A [Predicate] bound to a column position.
pub struct RowFilter<'a> {
    target: Option<(usize, &'a Condition)>,
}

impl RowFilter<'_> {
    /// True when the row passes the filter.
    pub fn matches(&self, row: &[Value]) -> bool {
        match self.target {
            Some((idx, condition)) => row.get(idx).is_some_and(|v| condition.test(v)),
            None => true,
        }
    }

    /// True when this filter lets every row through.
    pub fn is_pass_through(&self) -> bool {
        self.target.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns() -> Vec<Column> {
        vec![Column::new("id", "INT"), Column::new("name", "TEXT")]
    }

    #[test]
    fn test_parse_condition() {
        let cond = Condition::parse("age > 18").unwrap();
        assert_eq!(cond.column, "age");
        assert_eq!(cond.op, ComparisonOp::Gt);
        assert_eq!(cond.value, Value::Int(18));

        let cond = Condition::parse("name='Bob'").unwrap();
        assert_eq!(cond.op, ComparisonOp::Eq);
        assert_eq!(cond.value, Value::Text("Bob".into()));
    }

    #[test]
    fn test_parse_longest_operator() {
        assert_eq!(Condition::parse("a >= 1").unwrap().op, ComparisonOp::GtEq);
        assert_eq!(Condition::parse("a<=1").unwrap().op, ComparisonOp::LtEq);
        assert_eq!(Condition::parse("a != 1").unwrap().op, ComparisonOp::NotEq);
        assert_eq!(Condition::parse("a <> 1").unwrap().op, ComparisonOp::NotEq);
        assert_eq!(Condition::parse("a < 1").unwrap().op, ComparisonOp::Lt);
    }

    #[test]
    fn test_parse_literal_is_remainder() {
        let cond = Condition::parse("note = 'a b = c'").unwrap();
        assert_eq!(cond.value, Value::Text("a b = c".into()));

        let cond = Condition::parse("x = NULL").unwrap();
        assert_eq!(cond.value, Value::Null);
    }

    #[test]
    fn test_parse_rejects_other_shapes() {
        assert!(Condition::parse("true").is_none());
        assert!(Condition::parse("a = ").is_none());
        assert!(Condition::parse("= 1").is_none());
        assert!(Condition::parse("t.a = 1").is_none());
        assert!(Condition::parse("a LIKE 'x%'").is_none());
    }

    #[test]
    fn test_operator_semantics() {
        let row = vec![Value::Int(5), Value::Text("m".into())];
        let cases = [
            ("id = 5", true),
            ("id != 5", false),
            ("id <> 4", true),
            ("id > 4", true),
            ("id > 5", false),
            ("id >= 5", true),
            ("id < 5", false),
            ("id <= 5", true),
            ("id = 5.0", true),
            ("id < 5.5", true),
            ("name > 'a'", true),
            ("name < 'b'", false),
        ];
        let columns = columns();
        for (text, expected) in cases {
            let predicate = Predicate::parse(text);
            assert_eq!(predicate.bind(&columns).matches(&row), expected, "{text}");
        }
    }

    #[test]
    fn test_cross_kind_comparison() {
        let columns = columns();
        let text_row = vec![Value::Text("10".into()), Value::Null];
        let null_row = vec![Value::Null, Value::Null];

        // text ranks above every number
        assert!(Predicate::parse("id > 999").bind(&columns).matches(&text_row));
        assert!(!Predicate::parse("id = 10").bind(&columns).matches(&text_row));
        // null ranks below every number and equals null
        assert!(Predicate::parse("id < 0").bind(&columns).matches(&null_row));
        assert!(Predicate::parse("id = null").bind(&columns).matches(&null_row));
        assert!(!Predicate::parse("id != NULL").bind(&columns).matches(&null_row));
        // bool ranks below numbers
        let bool_row = vec![Value::Bool(true), Value::Null];
        assert!(Predicate::parse("id < 0").bind(&columns).matches(&bool_row));
        assert!(Predicate::parse("id > false").bind(&columns).matches(&bool_row));
    }

    #[test]
    fn test_unparsed_clause_keeps_all_rows() {
        let columns = columns();
        let filter_source = Predicate::parse("true");
        let filter = filter_source.bind(&columns);
        assert!(filter.is_pass_through());
        assert!(filter.matches(&[Value::Int(1), Value::Null]));
    }

    #[test]
    fn test_unknown_column_keeps_all_rows() {
        let columns = columns();
        let predicate = Predicate::parse("missing = 1");
        assert!(predicate.condition.is_some());
        let filter = predicate.bind(&columns);
        assert!(filter.is_pass_through());
        assert!(filter.matches(&[Value::Int(2), Value::Null]));
    }

    #[test]
    fn test_column_resolution_is_case_insensitive() {
        let columns = columns();
        let predicate = Predicate::parse("NAME = 'm'");
        let filter = predicate.bind(&columns);
        assert!(!filter.is_pass_through());
        assert!(filter.matches(&[Value::Int(1), Value::Text("m".into())]));
        assert!(!filter.matches(&[Value::Int(1), Value::Text("M".into())]));
    }
}
