//! Google BigQuery (GoogleSQL) dialect.

use super::{Dialect, QuoteStyle};
use crate::ast::{BinaryForm, BinaryOp};

/// BigQuery dialect: backtick identifiers and `MOD()` instead of `%`.
#[derive(Debug, Default, Clone, Copy)]
pub struct BigQueryDialect;

impl BigQueryDialect {
    /// Creates a new BigQuery dialect.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

// GoogleSQL lexical structure, "Reserved keywords".
const RESERVED: &[&str] = &[
    "ALL", "AND", "ANY", "ARRAY", "AS", "ASC", "ASSERT_ROWS_MODIFIED", "AT", "BETWEEN", "BY",
    "CASE", "CAST", "COLLATE", "CONTAINS", "CREATE", "CROSS", "CUBE", "CURRENT", "DEFAULT",
    "DEFINE", "DESC", "DISTINCT", "ELSE", "END", "ENUM", "ESCAPE", "EXCEPT", "EXCLUDE", "EXISTS",
    "EXTRACT", "FALSE", "FETCH", "FOLLOWING", "FOR", "FROM", "FULL", "GROUP", "GROUPING",
    "GROUPS", "HASH", "HAVING", "IF", "IGNORE", "IN", "INNER", "INTERSECT", "INTERVAL", "INTO",
    "IS", "JOIN", "LATERAL", "LEFT", "LIKE", "LIMIT", "LOOKUP", "MERGE", "NATURAL", "NEW", "NO",
    "NOT", "NULL", "NULLS", "OF", "ON", "OR", "ORDER", "OUTER", "OVER", "PARTITION",
    "PRECEDING", "PROTO", "QUALIFY", "RANGE", "RECURSIVE", "RESPECT", "RIGHT", "ROLLUP", "ROWS",
    "SELECT", "SET", "SOME", "STRUCT", "TABLESAMPLE", "THEN", "TO", "TREAT", "TRUE", "UNBOUNDED",
    "UNION", "UNNEST", "USING", "WHEN", "WHERE", "WINDOW", "WITH", "WITHIN",
];

impl Dialect for BigQueryDialect {
    fn name(&self) -> &'static str {
        "bigquery"
    }

    fn quote_style(&self) -> QuoteStyle {
        QuoteStyle::Backtick
    }

    fn reserved_words(&self) -> &'static [&'static str] {
        RESERVED
    }

    fn float_type(&self) -> &'static str {
        "FLOAT64"
    }

    /// GoogleSQL strings take backslash escapes, so `\` must be escaped too.
    fn string_literal(&self, value: &str) -> String {
        let mut out = String::with_capacity(value.len() + 2);
        out.push('\'');
        for c in value.chars() {
            match c {
                '\\' => out.push_str("\\\\"),
                '\'' => out.push_str("\\'"),
                '\n' => out.push_str("\\n"),
                '\r' => out.push_str("\\r"),
                '\t' => out.push_str("\\t"),
                _ => out.push(c),
            }
        }
        out.push('\'');
        out
    }

    fn binary_form(&self, op: BinaryOp) -> BinaryForm {
        match op {
            BinaryOp::Mod => BinaryForm::Function("MOD"),
            other => other.form(),
        }
    }
}
