//! Scalar SQL functions.
//!
//! ```rust
//! use fluq_core::builder::{col, functions};
//!
//! # fn main() -> fluq_core::Result<()> {
//! let expr = functions::coalesce([functions::floor(col("price")?)?, col("fallback")?])?;
//! assert_eq!(expr.sql(), "COALESCE(FLOOR(price), fallback)");
//! # Ok(())
//! # }
//! ```

use crate::ast::{Expr, Function, IntoExpr};
use crate::error::Result;

/// `ABS(x)`.
///
/// # Errors
///
/// Returns [`crate::Error::UnsupportedOperator`] for a non-numeric literal.
pub fn abs(x: impl IntoExpr) -> Result<Expr> {
    Expr::function(Function::Abs, [x])
}

/// `CEIL(x)`.
///
/// # Errors
///
/// See [`abs`].
pub fn ceil(x: impl IntoExpr) -> Result<Expr> {
    Expr::function(Function::Ceil, [x])
}

/// `FLOOR(x)`.
///
/// # Errors
///
/// See [`abs`].
pub fn floor(x: impl IntoExpr) -> Result<Expr> {
    Expr::function(Function::Floor, [x])
}

/// `ROUND(x)`.
///
/// # Errors
///
/// See [`abs`].
pub fn round(x: impl IntoExpr) -> Result<Expr> {
    Expr::function(Function::Round, [x])
}

/// `ROUND(x, digits)`.
///
/// # Errors
///
/// See [`abs`].
pub fn round_to(x: impl IntoExpr, digits: i64) -> Result<Expr> {
    Expr::function(Function::Round, [x.into_expr()?, Expr::literal(digits)])
}

/// `MOD(x, y)` in every dialect.
///
/// # Errors
///
/// See [`abs`].
pub fn modulo(x: impl IntoExpr, y: impl IntoExpr) -> Result<Expr> {
    Expr::function(Function::Mod, [x.into_expr()?, y.into_expr()?])
}

/// `UPPER(s)`.
///
/// # Errors
///
/// Returns [`crate::Error::UnsupportedOperator`] for a non-string literal.
pub fn upper(s: impl IntoExpr) -> Result<Expr> {
    Expr::function(Function::Upper, [s])
}

/// `LOWER(s)`.
///
/// # Errors
///
/// See [`upper`].
pub fn lower(s: impl IntoExpr) -> Result<Expr> {
    Expr::function(Function::Lower, [s])
}

/// `LENGTH(s)`.
///
/// # Errors
///
/// See [`upper`].
pub fn length(s: impl IntoExpr) -> Result<Expr> {
    Expr::function(Function::Length, [s])
}

/// `COALESCE(a, b, ...)`.
///
/// # Errors
///
/// Returns [`crate::Error::UnsupportedOperator`] for an empty list or
/// literals of different types.
pub fn coalesce<I, E>(items: I) -> Result<Expr>
where
    I: IntoIterator<Item = E>,
    E: IntoExpr,
{
    Expr::function(Function::Coalesce, items)
}

/// `CURRENT_DATE()`.
///
/// # Errors
///
/// Never fails; kept fallible like every function entry point.
pub fn current_date() -> Result<Expr> {
    Expr::function(Function::CurrentDate, Vec::<Expr>::new())
}
