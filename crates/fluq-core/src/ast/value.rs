//! Literal values and scalar lifting.

use core::fmt;

/// A typed scalar literal.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    /// NULL value.
    Null,
    /// Boolean value.
    Bool(bool),
    /// Integer value.
    Int(i64),
    /// Float value.
    Float(f64),
    /// Text value.
    String(String),
}

/// Literal type classes used to check operand compatibility.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralClass {
    /// `NULL`, compatible with every class.
    Null,
    /// Booleans.
    Boolean,
    /// Integers and floats.
    Numeric,
    /// Strings.
    String,
}

impl fmt::Display for LiteralClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Null => "null",
            Self::Boolean => "boolean",
            Self::Numeric => "numeric",
            Self::String => "string",
        })
    }
}

impl Literal {
    /// Returns the type class of the literal.
    #[must_use]
    pub const fn class(&self) -> LiteralClass {
        match self {
            Self::Null => LiteralClass::Null,
            Self::Bool(_) => LiteralClass::Boolean,
            Self::Int(_) | Self::Float(_) => LiteralClass::Numeric,
            Self::String(_) => LiteralClass::String,
        }
    }

    /// Returns whether the literal renders with a leading minus sign.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        match self {
            Self::Int(n) => *n < 0,
            Self::Float(f) => f.is_finite() && f.is_sign_negative(),
            _ => false,
        }
    }
}

/// Trait for Rust scalars that can be lifted into a [`Literal`].
pub trait ToLiteral {
    /// Converts the value to a `Literal`.
    fn to_literal(self) -> Literal;
}

impl ToLiteral for Literal {
    fn to_literal(self) -> Literal {
        self
    }
}

impl ToLiteral for bool {
    fn to_literal(self) -> Literal {
        Literal::Bool(self)
    }
}

macro_rules! int_to_literal {
    ($($t:ty),*) => {
        $(
            impl ToLiteral for $t {
                fn to_literal(self) -> Literal {
                    Literal::Int(i64::from(self))
                }
            }
        )*
    };
}

int_to_literal!(i8, i16, i32, i64, u8, u16, u32);

impl ToLiteral for f64 {
    fn to_literal(self) -> Literal {
        Literal::Float(self)
    }
}

impl ToLiteral for f32 {
    fn to_literal(self) -> Literal {
        Literal::Float(f64::from(self))
    }
}

impl ToLiteral for String {
    fn to_literal(self) -> Literal {
        Literal::String(self)
    }
}

impl ToLiteral for &str {
    fn to_literal(self) -> Literal {
        Literal::String(String::from(self))
    }
}

impl<T: ToLiteral> ToLiteral for Option<T> {
    fn to_literal(self) -> Literal {
        match self {
            Some(v) => v.to_literal(),
            None => Literal::Null,
        }
    }
}
