//! Expression tree.
//!
//! An [`Expr`] is a cheap handle to an immutable node. Applying an operator
//! never touches its operands: it allocates a new node that shares them, so
//! one sub-expression can be reused in any number of larger trees.

use core::fmt;
use std::sync::Arc;

use super::function::Function;
use super::ident::{Ident, ObjectName};
use super::operator::{BinaryOp, OperandClass, UnaryOp};
use super::value::{Literal, LiteralClass, ToLiteral};
use crate::builder::{OrderBy, OrderDirection};
use crate::error::{Error, Result};
use crate::render::Renderer;

/// An SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub struct Expr(Arc<ExprKind>);

/// The node types of the expression tree.
#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    /// A literal value.
    Literal(Literal),

    /// A column reference, possibly qualified (`t1.id`) or a wildcard (`t1.*`).
    Column(ObjectName),

    /// A prefix or postfix operator application.
    Unary {
        /// Operator.
        op: UnaryOp,
        /// Operand.
        operand: Expr,
    },

    /// A binary operator application.
    Binary {
        /// Operator.
        op: BinaryOp,
        /// Left operand.
        left: Expr,
        /// Right operand.
        right: Expr,
    },

    /// BETWEEN expression.
    Between {
        /// The expression to check.
        expr: Expr,
        /// Lower bound.
        low: Expr,
        /// Upper bound.
        high: Expr,
        /// Whether this is NOT BETWEEN.
        negated: bool,
    },

    /// IN expression.
    InList {
        /// The expression to check.
        expr: Expr,
        /// The candidate values.
        list: Vec<Expr>,
        /// Whether this is NOT IN.
        negated: bool,
    },

    /// A scalar function call.
    Function {
        /// Function.
        func: Function,
        /// Arguments, in call order.
        args: Vec<Expr>,
    },

    /// `CASE WHEN .. THEN .. [ELSE ..] END`. Has at least one branch.
    Case {
        /// `(condition, value)` pairs, tested in order.
        branches: Vec<(Expr, Expr)>,
        /// The ELSE value.
        otherwise: Option<Expr>,
    },

    /// An output name attached to an expression. Never nested.
    Alias {
        /// The aliased expression.
        inner: Expr,
        /// The output name.
        name: Ident,
    },
}

/// Coercion into an expression operand.
///
/// Implemented for expressions, construction results and every scalar that
/// converts to a [`Literal`]. All operator entry points go through it, so a
/// raw scalar is lifted the same way on either side of an operator.
pub trait IntoExpr {
    /// Converts the value into an expression.
    ///
    /// # Errors
    ///
    /// Propagates the error of a failed construction.
    fn into_expr(self) -> Result<Expr>;
}

impl IntoExpr for Expr {
    fn into_expr(self) -> Result<Expr> {
        Ok(self)
    }
}

impl IntoExpr for &Expr {
    fn into_expr(self) -> Result<Expr> {
        Ok(self.clone())
    }
}

impl IntoExpr for Result<Expr> {
    fn into_expr(self) -> Result<Expr> {
        self
    }
}

impl<T: ToLiteral> IntoExpr for Option<T> {
    fn into_expr(self) -> Result<Expr> {
        Ok(Expr::literal(self))
    }
}

macro_rules! scalar_into_expr {
    ($($t:ty),*) => {
        $(
            impl IntoExpr for $t {
                fn into_expr(self) -> Result<Expr> {
                    Ok(Expr::literal(self))
                }
            }
        )*
    };
}

scalar_into_expr!(Literal, bool, i8, i16, i32, i64, u8, u16, u32, f32, f64, String, &str);

impl Expr {
    fn new(kind: ExprKind) -> Self {
        Self(Arc::new(kind))
    }

    /// Returns the node.
    #[must_use]
    pub fn kind(&self) -> &ExprKind {
        &self.0
    }

    /// Creates a literal.
    #[must_use]
    pub fn literal(value: impl ToLiteral) -> Self {
        Self::new(ExprKind::Literal(value.to_literal()))
    }

    /// Creates a column reference from a dotted path.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if the path is empty or malformed.
    pub fn column(name: &str) -> Result<Self> {
        ObjectName::column(name).map(Self::column_path)
    }

    pub(crate) fn column_path(path: ObjectName) -> Self {
        Self::new(ExprKind::Column(path))
    }

    /// Applies a binary operator.
    ///
    /// Both sides are lifted through [`IntoExpr`]; aliases on operands are
    /// dropped.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperator`] if a literal operand has a type
    /// the operator cannot take, and propagates errors of the operands.
    pub fn binary(op: BinaryOp, left: impl IntoExpr, right: impl IntoExpr) -> Result<Self> {
        let left = left.into_expr()?.unaliased();
        let right = right.into_expr()?.unaliased();
        check_operands(op.name(), op.operand_class(), [&left, &right])?;
        Ok(Self::new(ExprKind::Binary { op, left, right }))
    }

    /// Applies a unary operator.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperator`] if a literal operand has a type
    /// the operator cannot take, and propagates errors of the operand.
    pub fn unary(op: UnaryOp, operand: impl IntoExpr) -> Result<Self> {
        let operand = operand.into_expr()?.unaliased();
        check_operands(op.name(), op.operand_class(), [&operand])?;
        Ok(Self::new(ExprKind::Unary { op, operand }))
    }

    /// Calls a scalar function.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperator`] for the wrong number of
    /// arguments or a literal argument the function cannot take.
    pub fn function<I, E>(func: Function, args: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: IntoExpr,
    {
        let args = args
            .into_iter()
            .map(|arg| arg.into_expr().map(Self::unaliased))
            .collect::<Result<Vec<_>>>()?;
        let arity = func.arity();
        if !arity.admits(args.len()) {
            return Err(Error::unsupported_operator(
                func.name(),
                format!("expects {arity}, got {}", args.len()),
            ));
        }
        check_operands(func.name(), func.operand_class(), &args)?;
        Ok(Self::new(ExprKind::Function { func, args }))
    }

    /// Creates a CASE expression.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperator`] when there are no branches, a
    /// literal condition is not a boolean, or literal results disagree in type.
    pub fn case<I>(branches: I, otherwise: Option<Self>) -> Result<Self>
    where
        I: IntoIterator<Item = (Self, Self)>,
    {
        let branches: Vec<_> = branches
            .into_iter()
            .map(|(condition, value)| (condition.unaliased(), value.unaliased()))
            .collect();
        if branches.is_empty() {
            return Err(Error::unsupported_operator(
                "CASE",
                String::from("at least one WHEN branch is required"),
            ));
        }
        let otherwise = otherwise.map(Self::unaliased);
        check_operands("CASE", OperandClass::Boolean, branches.iter().map(|(c, _)| c))?;
        check_operands(
            "CASE",
            OperandClass::Comparable,
            branches.iter().map(|(_, v)| v).chain(&otherwise),
        )?;
        Ok(Self::new(ExprKind::Case {
            branches,
            otherwise,
        }))
    }

    /// Appends a `WHEN condition THEN value` branch to a CASE expression.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperator`] if `self` is not a CASE
    /// expression, plus the checks of [`Expr::case`].
    pub fn when(self, condition: impl IntoExpr, value: impl IntoExpr) -> Result<Self> {
        let (mut branches, otherwise) = self.into_case("WHEN")?;
        branches.push((condition.into_expr()?, value.into_expr()?));
        Self::case(branches, otherwise)
    }

    /// Sets the ELSE value of a CASE expression, replacing any previous one.
    ///
    /// # Errors
    ///
    /// See [`Expr::when`].
    pub fn otherwise(self, value: impl IntoExpr) -> Result<Self> {
        let (branches, _) = self.into_case("ELSE")?;
        Self::case(branches, Some(value.into_expr()?))
    }

    fn into_case(self, clause: &str) -> Result<(Vec<(Self, Self)>, Option<Self>)> {
        match self.unaliased().kind() {
            ExprKind::Case {
                branches,
                otherwise,
            } => Ok((branches.clone(), otherwise.clone())),
            _ => Err(Error::unsupported_operator(
                "CASE",
                format!("{clause} applies only to a CASE expression"),
            )),
        }
    }

    /// Attaches an output name, replacing any previous one.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidIdentifier`] if the name is empty or blank.
    pub fn as_(self, name: &str) -> Result<Self> {
        let name = Ident::new(name)?;
        Ok(Self::new(ExprKind::Alias {
            inner: self.unaliased(),
            name,
        }))
    }

    /// Returns the output name, if any.
    #[must_use]
    pub fn alias(&self) -> Option<&Ident> {
        match self.kind() {
            ExprKind::Alias { name, .. } => Some(name),
            _ => None,
        }
    }

    /// Strips an alias, returning the aliased expression.
    #[must_use]
    pub fn unaliased(self) -> Self {
        if let ExprKind::Alias { inner, .. } = self.kind() {
            return inner.clone();
        }
        self
    }

    /// Creates an IS NULL expression.
    ///
    /// # Errors
    ///
    /// Never fails for a constructed expression; kept fallible like every
    /// operator entry point.
    pub fn is_null(self) -> Result<Self> {
        Self::unary(UnaryOp::IsNull, self)
    }

    /// Creates an IS NOT NULL expression.
    ///
    /// # Errors
    ///
    /// See [`Expr::is_null`].
    pub fn is_not_null(self) -> Result<Self> {
        Self::unary(UnaryOp::IsNotNull, self)
    }

    /// Creates a BETWEEN expression.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperator`] if literal bounds disagree in type.
    pub fn between(self, low: impl IntoExpr, high: impl IntoExpr) -> Result<Self> {
        self.between_impl(low, high, false)
    }

    /// Creates a NOT BETWEEN expression.
    ///
    /// # Errors
    ///
    /// See [`Expr::between`].
    pub fn not_between(self, low: impl IntoExpr, high: impl IntoExpr) -> Result<Self> {
        self.between_impl(low, high, true)
    }

    fn between_impl(self, low: impl IntoExpr, high: impl IntoExpr, negated: bool) -> Result<Self> {
        let expr = self.unaliased();
        let low = low.into_expr()?.unaliased();
        let high = high.into_expr()?.unaliased();
        check_operands("BETWEEN", OperandClass::Comparable, [&expr, &low, &high])?;
        Ok(Self::new(ExprKind::Between {
            expr,
            low,
            high,
            negated,
        }))
    }

    /// Creates an IN expression.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperator`] for an empty list or literals
    /// of different types.
    pub fn in_list<I, E>(self, items: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: IntoExpr,
    {
        self.in_list_impl(items, false)
    }

    /// Creates a NOT IN expression.
    ///
    /// # Errors
    ///
    /// See [`Expr::in_list`].
    pub fn not_in_list<I, E>(self, items: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: IntoExpr,
    {
        self.in_list_impl(items, true)
    }

    fn in_list_impl<I, E>(self, items: I, negated: bool) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: IntoExpr,
    {
        let expr = self.unaliased();
        let list = items
            .into_iter()
            .map(|item| item.into_expr().map(Self::unaliased))
            .collect::<Result<Vec<_>>>()?;
        if list.is_empty() {
            return Err(Error::unsupported_operator(
                "IN",
                String::from("the list is empty"),
            ));
        }
        check_operands("IN", OperandClass::Comparable, core::iter::once(&expr).chain(&list))?;
        Ok(Self::new(ExprKind::InList {
            expr,
            list,
            negated,
        }))
    }

    /// Sorts ascending when used in ORDER BY.
    #[must_use]
    pub fn asc(self) -> OrderBy {
        OrderBy::new(self, OrderDirection::Asc)
    }

    /// Sorts descending when used in ORDER BY.
    #[must_use]
    pub fn desc(self) -> OrderBy {
        OrderBy::new(self, OrderDirection::Desc)
    }

    /// Renders the expression with the default dialect.
    #[must_use]
    pub fn sql(&self) -> String {
        Renderer::default().expr(self)
    }
}

// Named forms of the operators. The arithmetic and logical ones are also
// available through `std::ops`.
#[allow(clippy::should_implement_trait)]
impl Expr {
    /// Creates an equality expression (`EQ`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperator`] when comparing literals of
    /// different types.
    pub fn eq(self, other: impl IntoExpr) -> Result<Self> {
        Self::binary(BinaryOp::Eq, self, other)
    }

    /// Creates an inequality expression (`NEQ`).
    ///
    /// # Errors
    ///
    /// See [`Expr::eq`].
    pub fn not_eq(self, other: impl IntoExpr) -> Result<Self> {
        Self::binary(BinaryOp::NotEq, self, other)
    }

    /// Creates a greater-than expression (`GT`).
    ///
    /// # Errors
    ///
    /// See [`Expr::eq`].
    pub fn gt(self, other: impl IntoExpr) -> Result<Self> {
        Self::binary(BinaryOp::Gt, self, other)
    }

    /// Creates a greater-than-or-equal expression (`GTE`).
    ///
    /// # Errors
    ///
    /// See [`Expr::eq`].
    pub fn gt_eq(self, other: impl IntoExpr) -> Result<Self> {
        Self::binary(BinaryOp::GtEq, self, other)
    }

    /// Creates a less-than expression (`LT`).
    ///
    /// # Errors
    ///
    /// See [`Expr::eq`].
    pub fn lt(self, other: impl IntoExpr) -> Result<Self> {
        Self::binary(BinaryOp::Lt, self, other)
    }

    /// Creates a less-than-or-equal expression (`LTE`).
    ///
    /// # Errors
    ///
    /// See [`Expr::eq`].
    pub fn lt_eq(self, other: impl IntoExpr) -> Result<Self> {
        Self::binary(BinaryOp::LtEq, self, other)
    }

    /// Creates a LIKE expression.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperator`] for a non-string literal pattern.
    pub fn like(self, pattern: impl IntoExpr) -> Result<Self> {
        Self::binary(BinaryOp::Like, self, pattern)
    }

    /// Creates an AND expression.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperator`] for a non-boolean literal operand.
    pub fn and(self, other: impl IntoExpr) -> Result<Self> {
        Self::binary(BinaryOp::And, self, other)
    }

    /// Creates an OR expression.
    ///
    /// # Errors
    ///
    /// See [`Expr::and`].
    pub fn or(self, other: impl IntoExpr) -> Result<Self> {
        Self::binary(BinaryOp::Or, self, other)
    }

    /// Negates the expression with NOT.
    ///
    /// # Errors
    ///
    /// See [`Expr::and`].
    pub fn not(self) -> Result<Self> {
        Self::unary(UnaryOp::Not, self)
    }

    /// Creates an addition.
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperator`] for a non-numeric literal operand.
    pub fn add(self, other: impl IntoExpr) -> Result<Self> {
        Self::binary(BinaryOp::Add, self, other)
    }

    /// Creates a subtraction.
    ///
    /// # Errors
    ///
    /// See [`Expr::add`].
    pub fn sub(self, other: impl IntoExpr) -> Result<Self> {
        Self::binary(BinaryOp::Sub, self, other)
    }

    /// Creates a multiplication.
    ///
    /// # Errors
    ///
    /// See [`Expr::add`].
    pub fn mul(self, other: impl IntoExpr) -> Result<Self> {
        Self::binary(BinaryOp::Mul, self, other)
    }

    /// Creates a division.
    ///
    /// # Errors
    ///
    /// See [`Expr::add`].
    pub fn div(self, other: impl IntoExpr) -> Result<Self> {
        Self::binary(BinaryOp::Div, self, other)
    }

    /// Creates a modulo.
    ///
    /// # Errors
    ///
    /// See [`Expr::add`].
    pub fn modulo(self, other: impl IntoExpr) -> Result<Self> {
        Self::binary(BinaryOp::Mod, self, other)
    }

    /// Arithmetic negation.
    ///
    /// # Errors
    ///
    /// See [`Expr::add`].
    pub fn neg(self) -> Result<Self> {
        Self::unary(UnaryOp::Neg, self)
    }

    /// Floor division: `FLOOR(self / other)`.
    ///
    /// # Errors
    ///
    /// See [`Expr::add`].
    pub fn floor_div(self, other: impl IntoExpr) -> Result<Self> {
        Self::function(Function::Floor, [self.div(other)?])
    }

    /// String concatenation (`||`).
    ///
    /// # Errors
    ///
    /// Returns [`Error::UnsupportedOperator`] for a non-string literal operand.
    pub fn concat(self, other: impl IntoExpr) -> Result<Self> {
        Self::binary(BinaryOp::Concat, self, other)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.sql())
    }
}

/// Rejects literal operands the operator has no rule for.
fn check_operands<'a>(
    symbol: &'static str,
    accepts: OperandClass,
    operands: impl IntoIterator<Item = &'a Expr>,
) -> Result<()> {
    let mut seen: Option<LiteralClass> = None;
    for operand in operands {
        let ExprKind::Literal(literal) = operand.kind() else {
            continue;
        };
        let class = literal.class();
        if !accepts.admits(class) {
            return Err(Error::unsupported_operator(
                symbol,
                format!("a {class} literal is not a valid operand"),
            ));
        }
        if accepts == OperandClass::Comparable && class != LiteralClass::Null {
            match seen {
                Some(previous) if previous != class => {
                    return Err(Error::unsupported_operator(
                        symbol,
                        format!("cannot compare a {previous} literal with a {class} literal"),
                    ));
                }
                _ => seen = Some(class),
            }
        }
    }
    Ok(())
}
