//! SQL Dialect support.
//!
//! Different databases have slightly different SQL syntax. This module provides
//! a trait for dialect-specific behavior: identifier quoting, reserved words,
//! literal spelling and operator render forms.

mod bigquery;
mod generic;

use core::fmt;

use serde::{Deserialize, Serialize};

pub use bigquery::BigQueryDialect;
pub use generic::GenericDialect;

use crate::ast::{BinaryForm, BinaryOp};
use crate::error::{Error, Result};

/// How a dialect delimits quoted identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteStyle {
    /// `` `name` ``, closing quote escaped with a backslash.
    Backtick,
    /// `"name"`, closing quote doubled.
    DoubleQuote,
    /// `[name]`, closing bracket doubled.
    Bracket,
}

impl QuoteStyle {
    /// Wraps an identifier in quotes, escaping the closing delimiter.
    #[must_use]
    pub fn quote(self, ident: &str) -> String {
        match self {
            Self::Backtick => format!("`{}`", ident.replace('`', "\\`")),
            Self::DoubleQuote => format!("\"{}\"", ident.replace('"', "\"\"")),
            Self::Bracket => format!("[{}]", ident.replace(']', "]]")),
        }
    }
}

/// Trait for SQL dialect-specific behavior.
pub trait Dialect: fmt::Debug + Send + Sync {
    /// Returns the name of the dialect.
    fn name(&self) -> &'static str;

    /// Returns the identifier quoting style.
    fn quote_style(&self) -> QuoteStyle {
        QuoteStyle::DoubleQuote
    }

    /// Returns the reserved words that must be quoted when used as identifiers.
    fn reserved_words(&self) -> &'static [&'static str];

    /// Returns whether `word` is reserved (case-insensitive).
    fn is_reserved(&self, word: &str) -> bool {
        self.reserved_words()
            .iter()
            .any(|reserved| reserved.eq_ignore_ascii_case(word))
    }

    /// Returns whether an identifier segment must be quoted.
    ///
    /// Quoting is required for anything outside `[A-Za-z0-9_]`, a leading
    /// digit, or a reserved word.
    fn needs_quoting(&self, ident: &str) -> bool {
        let Some(first) = ident.chars().next() else {
            return true;
        };
        first.is_ascii_digit()
            || !ident.chars().all(|c| c.is_ascii_alphanumeric() || c == '_')
            || self.is_reserved(ident)
    }

    /// Renders an identifier segment, quoting it only when needed.
    fn identifier(&self, ident: &str) -> String {
        if self.needs_quoting(ident) {
            self.quote_style().quote(ident)
        } else {
            String::from(ident)
        }
    }

    /// Renders a string literal. Single quotes are escaped by doubling.
    fn string_literal(&self, value: &str) -> String {
        format!("'{}'", value.replace('\'', "''"))
    }

    /// Returns the keyword for a boolean literal.
    fn boolean_literal(&self, value: bool) -> &'static str {
        if value {
            "TRUE"
        } else {
            "FALSE"
        }
    }

    /// Returns the floating point type name used to spell NaN and infinities.
    fn float_type(&self) -> &'static str {
        "DOUBLE PRECISION"
    }

    /// Returns how a binary operator is spelled in this dialect.
    fn binary_form(&self, op: BinaryOp) -> BinaryForm {
        op.form()
    }
}

/// Built-in dialects, selectable from configuration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum DialectKind {
    /// Google BigQuery (default).
    #[default]
    #[serde(rename = "bigquery", alias = "big_query")]
    BigQuery,
    /// ANSI-flavored generic SQL.
    #[serde(rename = "generic", alias = "ansi")]
    Generic,
}

static BIGQUERY: BigQueryDialect = BigQueryDialect::new();
static GENERIC: GenericDialect = GenericDialect::new();

impl DialectKind {
    /// Returns the dialect implementation.
    #[must_use]
    pub fn dialect(self) -> &'static dyn Dialect {
        match self {
            Self::BigQuery => &BIGQUERY,
            Self::Generic => &GENERIC,
        }
    }

    /// Looks a dialect up by name (`bigquery`, `generic`, `ansi`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfig`] for unknown names.
    pub fn from_name(name: &str) -> Result<Self> {
        match name.to_ascii_lowercase().as_str() {
            "bigquery" | "big_query" => Ok(Self::BigQuery),
            "generic" | "ansi" => Ok(Self::Generic),
            _ => Err(Error::InvalidConfig(format!("unknown dialect '{name}'"))),
        }
    }
}
