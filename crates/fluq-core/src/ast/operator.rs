//! The operator table.
//!
//! Each operator carries a stable symbol, a render template, a precedence
//! rank, an associativity and the literal classes it accepts. Ranks, higher
//! binds tighter:
//!
//! | rank | operators                                              | assoc |
//! |------|--------------------------------------------------------|-------|
//! | 1    | `OR`                                                   | left  |
//! | 2    | `AND`                                                  | left  |
//! | 3    | `NOT` (prefix)                                         |       |
//! | 4    | `= != < <= > >= LIKE`, `IS [NOT] NULL`, `BETWEEN`, `IN`| none  |
//! | 5    | `+ -`                                                  | left  |
//! | 6    | `* / % \|\|`                                           | left  |
//! | 7    | `-` (prefix)                                           |       |

use super::value::LiteralClass;

/// Rank of comparison-level constructs (`BETWEEN`, `IN`, `IS NULL`, `=`).
pub const COMPARISON_PRECEDENCE: u8 = 4;

/// Rank of atoms: literals, column references and function calls.
pub const ATOM_PRECEDENCE: u8 = u8::MAX;

/// How a binary operator is spelled around its operands.
///
/// Templates carry their own spacing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryForm {
    /// `left<op>right`, e.g. `" + "`.
    Infix(&'static str),
    /// `NAME(left, right)`.
    Function(&'static str),
}

/// How a unary operator is spelled around its operand.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryForm {
    /// `<op>operand`, e.g. `"NOT "`.
    Prefix(&'static str),
    /// `operand<op>`, e.g. `" IS NULL"`.
    Postfix(&'static str),
}

/// Operator associativity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    /// `a - b - c` groups as `(a - b) - c`.
    Left,
    /// Chaining requires explicit parentheses.
    None,
}

/// Literal classes an operator accepts as operands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OperandClass {
    /// Numeric literals.
    Numeric,
    /// String literals.
    String,
    /// Boolean literals.
    Boolean,
    /// Any literal, as long as two literal operands share a class.
    Comparable,
}

impl OperandClass {
    /// Returns whether a literal of `class` may appear as an operand.
    #[must_use]
    pub const fn admits(self, class: LiteralClass) -> bool {
        matches!(
            (self, class),
            (_, LiteralClass::Null)
                | (Self::Comparable, _)
                | (Self::Numeric, LiteralClass::Numeric)
                | (Self::String, LiteralClass::String)
                | (Self::Boolean, LiteralClass::Boolean)
        )
    }
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum BinaryOp {
    // Comparison
    Eq,
    NotEq,
    Gt,
    GtEq,
    Lt,
    LtEq,
    Like,

    // Logical
    And,
    Or,

    // Arithmetic
    Add,
    Sub,
    Mul,
    Div,
    Mod,

    // String
    Concat,
}

impl BinaryOp {
    /// Every binary operator, in table order.
    pub const ALL: [Self; 15] = [
        Self::Eq,
        Self::NotEq,
        Self::Gt,
        Self::GtEq,
        Self::Lt,
        Self::LtEq,
        Self::Like,
        Self::And,
        Self::Or,
        Self::Add,
        Self::Sub,
        Self::Mul,
        Self::Div,
        Self::Mod,
        Self::Concat,
    ];

    /// Returns the stable symbol of the operator.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Eq => "EQ",
            Self::NotEq => "NEQ",
            Self::Gt => "GT",
            Self::GtEq => "GTE",
            Self::Lt => "LT",
            Self::LtEq => "LTE",
            Self::Like => "LIKE",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Add => "ADD",
            Self::Sub => "SUB",
            Self::Mul => "MUL",
            Self::Div => "DIV",
            Self::Mod => "MOD",
            Self::Concat => "CONCAT",
        }
    }

    /// Returns the SQL representation of the operator.
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eq => "=",
            Self::NotEq => "!=",
            Self::Gt => ">",
            Self::GtEq => ">=",
            Self::Lt => "<",
            Self::LtEq => "<=",
            Self::Like => "LIKE",
            Self::And => "AND",
            Self::Or => "OR",
            Self::Add => "+",
            Self::Sub => "-",
            Self::Mul => "*",
            Self::Div => "/",
            Self::Mod => "%",
            Self::Concat => "||",
        }
    }

    /// Returns the default render template.
    #[must_use]
    pub const fn form(&self) -> BinaryForm {
        BinaryForm::Infix(match self {
            Self::Eq => " = ",
            Self::NotEq => " != ",
            Self::Gt => " > ",
            Self::GtEq => " >= ",
            Self::Lt => " < ",
            Self::LtEq => " <= ",
            Self::Like => " LIKE ",
            Self::And => " AND ",
            Self::Or => " OR ",
            Self::Add => " + ",
            Self::Sub => " - ",
            Self::Mul => " * ",
            Self::Div => " / ",
            Self::Mod => " % ",
            Self::Concat => " || ",
        })
    }

    /// Returns the precedence of the operator (higher = binds tighter).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Or => 1,
            Self::And => 2,
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq | Self::Like => {
                COMPARISON_PRECEDENCE
            }
            Self::Add | Self::Sub => 5,
            Self::Mul | Self::Div | Self::Mod | Self::Concat => 6,
        }
    }

    /// Returns the associativity of the operator.
    #[must_use]
    pub const fn associativity(&self) -> Associativity {
        match self {
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq | Self::Like => {
                Associativity::None
            }
            _ => Associativity::Left,
        }
    }

    /// Returns the literal classes accepted as operands.
    #[must_use]
    pub const fn operand_class(&self) -> OperandClass {
        match self {
            Self::Eq | Self::NotEq | Self::Lt | Self::LtEq | Self::Gt | Self::GtEq => {
                OperandClass::Comparable
            }
            Self::Like | Self::Concat => OperandClass::String,
            Self::And | Self::Or => OperandClass::Boolean,
            Self::Add | Self::Sub | Self::Mul | Self::Div | Self::Mod => OperandClass::Numeric,
        }
    }
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnaryOp {
    /// Logical NOT
    Not,
    /// Negation (-)
    Neg,
    /// IS NULL
    IsNull,
    /// IS NOT NULL
    IsNotNull,
}

impl UnaryOp {
    /// Every unary operator, in table order.
    pub const ALL: [Self; 4] = [Self::Not, Self::Neg, Self::IsNull, Self::IsNotNull];

    /// Returns the stable symbol of the operator.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Not => "NOT",
            Self::Neg => "NEG",
            Self::IsNull => "IS_NULL",
            Self::IsNotNull => "IS_NOT_NULL",
        }
    }

    /// Returns the render template.
    #[must_use]
    pub const fn form(&self) -> UnaryForm {
        match self {
            Self::Not => UnaryForm::Prefix("NOT "),
            Self::Neg => UnaryForm::Prefix("-"),
            Self::IsNull => UnaryForm::Postfix(" IS NULL"),
            Self::IsNotNull => UnaryForm::Postfix(" IS NOT NULL"),
        }
    }

    /// Returns the precedence of the operator (higher = binds tighter).
    #[must_use]
    pub const fn precedence(&self) -> u8 {
        match self {
            Self::Not => 3,
            Self::IsNull | Self::IsNotNull => COMPARISON_PRECEDENCE,
            Self::Neg => 7,
        }
    }

    /// Returns the literal classes accepted as operand.
    #[must_use]
    pub const fn operand_class(&self) -> OperandClass {
        match self {
            Self::Not => OperandClass::Boolean,
            Self::Neg => OperandClass::Numeric,
            Self::IsNull | Self::IsNotNull => OperandClass::Comparable,
        }
    }
}
