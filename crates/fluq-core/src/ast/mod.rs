//! Abstract syntax tree for SQL expressions.

mod expr;
mod function;
mod ident;
mod operator;
mod value;

pub use expr::{Expr, ExprKind, IntoExpr};
pub use function::{Arity, Function};
pub use ident::{Ident, ObjectName};
pub use operator::{
    Associativity, BinaryForm, BinaryOp, OperandClass, UnaryForm, UnaryOp, ATOM_PRECEDENCE,
    COMPARISON_PRECEDENCE,
};
pub use value::{Literal, LiteralClass, ToLiteral};
