//! The scalar function table.
//!
//! Functions render as `NAME(arg, ...)` in every dialect and bind like
//! atoms, so their arguments never need parentheses.

use core::fmt;

use super::operator::OperandClass;

/// Number of arguments a function takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Arity {
    min: usize,
    max: usize,
}

impl Arity {
    /// Exactly `n` arguments.
    #[must_use]
    pub const fn exactly(n: usize) -> Self {
        Self { min: n, max: n }
    }

    /// Between `min` and `max` arguments, inclusive.
    #[must_use]
    pub const fn between(min: usize, max: usize) -> Self {
        Self { min, max }
    }

    /// `min` or more arguments.
    #[must_use]
    pub const fn at_least(min: usize) -> Self {
        Self {
            min,
            max: usize::MAX,
        }
    }

    /// Returns whether `count` arguments are accepted.
    #[must_use]
    pub const fn admits(self, count: usize) -> bool {
        count >= self.min && count <= self.max
    }
}

impl fmt::Display for Arity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let plural = |n: usize| if n == 1 { "" } else { "s" };
        if self.max == usize::MAX {
            write!(f, "at least {} argument{}", self.min, plural(self.min))
        } else if self.max == self.min {
            write!(f, "{} argument{}", self.min, plural(self.min))
        } else {
            write!(f, "{} to {} arguments", self.min, self.max)
        }
    }
}

/// Scalar SQL functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Function {
    // Numeric
    Abs,
    Ceil,
    Floor,
    Round,
    Mod,

    // String
    Upper,
    Lower,
    Length,

    // Other
    Coalesce,
    CurrentDate,
}

impl Function {
    /// Every function, in table order.
    pub const ALL: [Self; 10] = [
        Self::Abs,
        Self::Ceil,
        Self::Floor,
        Self::Round,
        Self::Mod,
        Self::Upper,
        Self::Lower,
        Self::Length,
        Self::Coalesce,
        Self::CurrentDate,
    ];

    /// Returns the SQL name of the function.
    #[must_use]
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Abs => "ABS",
            Self::Ceil => "CEIL",
            Self::Floor => "FLOOR",
            Self::Round => "ROUND",
            Self::Mod => "MOD",
            Self::Upper => "UPPER",
            Self::Lower => "LOWER",
            Self::Length => "LENGTH",
            Self::Coalesce => "COALESCE",
            Self::CurrentDate => "CURRENT_DATE",
        }
    }

    /// Returns the accepted argument count.
    #[must_use]
    pub const fn arity(&self) -> Arity {
        match self {
            Self::Abs | Self::Ceil | Self::Floor | Self::Upper | Self::Lower | Self::Length => {
                Arity::exactly(1)
            }
            Self::Round => Arity::between(1, 2),
            Self::Mod => Arity::exactly(2),
            Self::Coalesce => Arity::at_least(1),
            Self::CurrentDate => Arity::exactly(0),
        }
    }

    /// Returns the literal classes accepted as arguments.
    #[must_use]
    pub const fn operand_class(&self) -> OperandClass {
        match self {
            Self::Abs | Self::Ceil | Self::Floor | Self::Round | Self::Mod => OperandClass::Numeric,
            Self::Upper | Self::Lower | Self::Length => OperandClass::String,
            Self::Coalesce | Self::CurrentDate => OperandClass::Comparable,
        }
    }
}
