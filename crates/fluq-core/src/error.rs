//! Error types for expression and query construction.
//!
//! Every error is raised by the call that builds the offending node.
//! Rendering never fails.

use thiserror::Error;

/// Construction errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Error {
    /// The operator has no rendering rule for the given operands.
    #[error("unsupported operator {op}: {reason}")]
    UnsupportedOperator {
        /// Stable operator symbol (e.g. `ADD`).
        op: &'static str,
        /// Why the operands were rejected.
        reason: String,
    },

    /// A table, column or alias name is empty or malformed.
    #[error("invalid identifier '{name}': {reason}")]
    InvalidIdentifier {
        /// The name as written by the caller.
        name: String,
        /// What is wrong with it.
        reason: &'static str,
    },

    /// A join was requested without an ON predicate.
    #[error("join requires an ON predicate")]
    EmptyJoinPredicate,

    /// A render configuration could not be applied.
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

impl Error {
    pub(crate) fn invalid_identifier(name: &str, reason: &'static str) -> Self {
        tracing::debug!(identifier = name, reason, "rejected identifier");
        Self::InvalidIdentifier {
            name: String::from(name),
            reason,
        }
    }

    pub(crate) fn unsupported_operator(op: &'static str, reason: String) -> Self {
        tracing::debug!(op, %reason, "rejected operator application");
        Self::UnsupportedOperator { op, reason }
    }
}

/// Result type alias for construction operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = Error::invalid_identifier("a..b", "empty path segment");
        assert_eq!(
            err.to_string(),
            "invalid identifier 'a..b': empty path segment"
        );
        assert_eq!(
            Error::EmptyJoinPredicate.to_string(),
            "join requires an ON predicate"
        );
        let err = Error::unsupported_operator("ADD", String::from("string operand"));
        assert_eq!(err.to_string(), "unsupported operator ADD: string operand");
    }
}
