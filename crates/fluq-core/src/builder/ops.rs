//! `std::ops` overloads for expressions.
//!
//! Every overload returns `Result<Expr>`, so chains are written with `?` on
//! the left operand:
//!
//! ```rust
//! use fluq_core::col;
//!
//! # fn main() -> fluq_core::Result<()> {
//! let total = ((col("price")? * col("qty")?)? - 5_i64)?;
//! assert_eq!(total.sql(), "price * qty - 5");
//! # Ok(())
//! # }
//! ```
//!
//! Comparisons cannot be overloaded to return an expression and are named
//! methods instead (`eq`, `gt`, ...).

use core::ops::{Add, BitAnd, BitOr, Div, Mul, Neg, Not, Rem, Sub};

use crate::ast::{BinaryOp, Expr, IntoExpr, UnaryOp};
use crate::error::Result;

macro_rules! binary_ops {
    ($($trait:ident :: $method:ident => $op:ident),* $(,)?) => {
        $(
            impl<R: IntoExpr> $trait<R> for Expr {
                type Output = Result<Self>;

                fn $method(self, rhs: R) -> Self::Output {
                    Self::binary(BinaryOp::$op, self, rhs)
                }
            }

            impl<R: IntoExpr> $trait<R> for &Expr {
                type Output = Result<Expr>;

                fn $method(self, rhs: R) -> Self::Output {
                    Expr::binary(BinaryOp::$op, self, rhs)
                }
            }
        )*
    };
}

binary_ops! {
    Add::add => Add,
    Sub::sub => Sub,
    Mul::mul => Mul,
    Div::div => Div,
    Rem::rem => Mod,
    BitAnd::bitand => And,
    BitOr::bitor => Or,
}

// Scalar on the left: `5_i64 + col("x")?`.
macro_rules! scalar_lhs_ops {
    ($($t:ty => [$($trait:ident :: $method:ident => $op:ident),*]);* $(;)?) => {
        $($(
            impl $trait<Expr> for $t {
                type Output = Result<Expr>;

                fn $method(self, rhs: Expr) -> Self::Output {
                    Expr::binary(BinaryOp::$op, self, rhs)
                }
            }
        )*)*
    };
}

scalar_lhs_ops! {
    i32 => [Add::add => Add, Sub::sub => Sub, Mul::mul => Mul, Div::div => Div, Rem::rem => Mod];
    i64 => [Add::add => Add, Sub::sub => Sub, Mul::mul => Mul, Div::div => Div, Rem::rem => Mod];
    f64 => [Add::add => Add, Sub::sub => Sub, Mul::mul => Mul, Div::div => Div, Rem::rem => Mod];
    bool => [BitAnd::bitand => And, BitOr::bitor => Or];
}

impl Neg for Expr {
    type Output = Result<Self>;

    fn neg(self) -> Self::Output {
        Self::unary(UnaryOp::Neg, self)
    }
}

impl Neg for &Expr {
    type Output = Result<Expr>;

    fn neg(self) -> Self::Output {
        Expr::unary(UnaryOp::Neg, self)
    }
}

impl Not for Expr {
    type Output = Result<Self>;

    fn not(self) -> Self::Output {
        Self::unary(UnaryOp::Not, self)
    }
}

impl Not for &Expr {
    type Output = Result<Expr>;

    fn not(self) -> Self::Output {
        Expr::unary(UnaryOp::Not, self)
    }
}
