//! Fluent query builder.
//!
//! ```rust
//! use fluq_core::builder::{col, table};
//!
//! # fn main() -> fluq_core::Result<()> {
//! let customers = table("db.schema.customers")?
//!     .select([col("id")?, col("name")?])?
//!     .where_(col("active")?.eq(true))?;
//!
//! assert_eq!(
//!     customers.sql(),
//!     "SELECT id, name FROM db.schema.customers WHERE active = TRUE"
//! );
//! # Ok(())
//! # }
//! ```

pub mod functions;
mod ops;
mod query;

pub use query::{Join, JoinKind, Limit, OrderBy, OrderDirection, Query, TableRef, TableSource};

use crate::ast::{Expr, IntoExpr, ToLiteral};
use crate::error::Result;

/// Starts a query: `SELECT * FROM <name>`.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidIdentifier`] for a malformed table name.
pub fn table(name: &str) -> Result<Query> {
    TableRef::named(name).map(Query::new)
}

/// Creates a column reference from a possibly qualified name.
///
/// # Errors
///
/// Returns [`crate::Error::InvalidIdentifier`] for a malformed name.
pub fn col(name: &str) -> Result<Expr> {
    Expr::column(name)
}

/// Lifts a scalar into a literal expression.
#[must_use]
pub fn lit(value: impl ToLiteral) -> Expr {
    Expr::literal(value)
}

/// Starts a CASE expression with its first branch. Extend it with
/// [`Expr::when`] and [`Expr::otherwise`].
///
/// ```rust
/// use fluq_core::builder::{col, when};
///
/// # fn main() -> fluq_core::Result<()> {
/// let bucket = when(col("a")?.gt(5), 0)?
///     .when(col("a")?.gt(100), 1)?
///     .otherwise(-1)?;
/// assert_eq!(
///     bucket.sql(),
///     "CASE WHEN a > 5 THEN 0 WHEN a > 100 THEN 1 ELSE -1 END"
/// );
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Returns [`crate::Error::UnsupportedOperator`] for a non-boolean literal
/// condition, and propagates errors of the operands.
pub fn when(condition: impl IntoExpr, value: impl IntoExpr) -> Result<Expr> {
    Expr::case([(condition.into_expr()?, value.into_expr()?)], None)
}
