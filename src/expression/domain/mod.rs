//! Generic numeric domains
//!
//! A [`Domain`] is a stateless arithmetic strategy bound to one value
//! representation. Expression trees are evaluated generically over any
//! domain, so the same parsed tree can be run as checked 32-bit integers,
//! floats or arbitrary-precision integers.
//!
//! The five core operations, literal parsing and integer conversion are
//! required. Shifts, power and logarithm are optional and default to
//! [`EvalError::Unsupported`].

mod big_integer;
mod checked_int;
mod float;

use std::fmt;
use std::str::FromStr;

pub use big_integer::{BigInteger, MAX_BITS};
pub use checked_int::CheckedInt;
pub use float::Float;

use super::error::{EvalError, EvalResult, TabulateError};

/// Arithmetic capability set for one value representation
pub trait Domain: Send + Sync {
    /// The value representation
    type Value: Clone + fmt::Debug + PartialEq + Send + Sync;

    /// Short human-readable name, used in error messages
    fn name(&self) -> &'static str;

    /// `x + y`
    fn add(&self, x: Self::Value, y: Self::Value) -> EvalResult<Self::Value>;

    /// `x - y`
    fn subtract(&self, x: Self::Value, y: Self::Value) -> EvalResult<Self::Value>;

    /// `x * y`
    fn multiply(&self, x: Self::Value, y: Self::Value) -> EvalResult<Self::Value>;

    /// `x / y`; a zero divisor is always [`EvalError::DivisionByZero`]
    fn divide(&self, x: Self::Value, y: Self::Value) -> EvalResult<Self::Value>;

    /// `-x`
    fn negate(&self, x: Self::Value) -> EvalResult<Self::Value>;

    /// Parse integer literal text (optional `-`, then digits)
    fn parse_literal(&self, text: &str) -> EvalResult<Self::Value>;

    /// Convert a grid coordinate
    fn from_int(&self, value: i32) -> Self::Value;

    /// `x << y`
    fn shift_left(&self, _x: Self::Value, _y: Self::Value) -> EvalResult<Self::Value> {
        Err(self.unsupported("<<"))
    }

    /// `x >> y`
    fn shift_right(&self, _x: Self::Value, _y: Self::Value) -> EvalResult<Self::Value> {
        Err(self.unsupported(">>"))
    }

    /// `x >>> y`
    fn shift_right_unsigned(&self, _x: Self::Value, _y: Self::Value) -> EvalResult<Self::Value> {
        Err(self.unsupported(">>>"))
    }

    /// `x ** y`
    fn pow(&self, _x: Self::Value, _y: Self::Value) -> EvalResult<Self::Value> {
        Err(self.unsupported("**"))
    }

    /// `x // y`, the logarithm of `x` in base `y` rounded down
    fn log(&self, _x: Self::Value, _y: Self::Value) -> EvalResult<Self::Value> {
        Err(self.unsupported("//"))
    }

    /// Error for an operator this domain does not implement
    fn unsupported(&self, operation: &'static str) -> EvalError {
        EvalError::Unsupported {
            operation,
            domain: self.name(),
        }
    }
}

/// Domain selector used by tabulation requests
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DomainKind {
    /// `"i"`: overflow-checked 32-bit integers
    CheckedInt,
    /// `"d"`: 64-bit floating point
    Float,
    /// `"bi"`: arbitrary-precision integers
    BigInteger,
}

impl DomainKind {
    /// Every supported domain
    pub const ALL: [DomainKind; 3] = [DomainKind::CheckedInt, DomainKind::Float, DomainKind::BigInteger];

    /// The tag accepted by [`FromStr`]
    pub fn tag(self) -> &'static str {
        match self {
            DomainKind::CheckedInt => "i",
            DomainKind::Float => "d",
            DomainKind::BigInteger => "bi",
        }
    }
}

impl FromStr for DomainKind {
    type Err = TabulateError;

    fn from_str(tag: &str) -> Result<Self, Self::Err> {
        DomainKind::ALL
            .into_iter()
            .find(|kind| kind.tag() == tag)
            .ok_or_else(|| TabulateError::UnknownDomain(tag.to_string()))
    }
}

impl fmt::Display for DomainKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.tag())
    }
}
