//! Arbitrary-precision integers
//!
//! Backed by [`num_bigint::BigInt`]. Results never overflow, but shift
//! counts and exponents that would build values wider than [`MAX_BITS`]
//! bits are rejected as illegal operands rather than exhausting memory.

use num_bigint::{BigInt, Sign};
use num_traits::{One, Signed, ToPrimitive, Zero};

use super::super::error::{EvalError, EvalResult};
use super::Domain;

/// Widest value `<<` and `**` are allowed to produce
pub const MAX_BITS: u64 = 1 << 20;

/// [`BigInt`] arithmetic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BigInteger;

fn too_large(x: &BigInt, op: &str, y: &BigInt) -> EvalError {
    EvalError::IllegalOperand(format!(
        "{} {} {} would exceed {} bits",
        x, op, y, MAX_BITS
    ))
}

fn shift_count(x: &BigInt, op: &str, y: &BigInt) -> EvalResult<usize> {
    if y.is_negative() {
        return Err(EvalError::IllegalOperand(format!("negative shift count {}", y)));
    }
    y.to_u64()
        .filter(|&n| x.bits().checked_add(n).is_some_and(|bits| bits <= MAX_BITS))
        .map(|n| n as usize)
        .ok_or_else(|| too_large(x, op, y))
}

impl Domain for BigInteger {
    type Value = BigInt;

    fn name(&self) -> &'static str {
        "big integer"
    }

    fn add(&self, x: BigInt, y: BigInt) -> EvalResult<BigInt> {
        Ok(x + y)
    }

    fn subtract(&self, x: BigInt, y: BigInt) -> EvalResult<BigInt> {
        Ok(x - y)
    }

    fn multiply(&self, x: BigInt, y: BigInt) -> EvalResult<BigInt> {
        Ok(x * y)
    }

    fn divide(&self, x: BigInt, y: BigInt) -> EvalResult<BigInt> {
        if y.is_zero() {
            return Err(EvalError::DivisionByZero);
        }
        Ok(x / y)
    }

    fn negate(&self, x: BigInt) -> EvalResult<BigInt> {
        Ok(-x)
    }

    fn parse_literal(&self, text: &str) -> EvalResult<BigInt> {
        text.parse::<BigInt>()
            .map_err(|_| EvalError::IllegalOperand(format!("invalid integer literal '{}'", text)))
    }

    fn from_int(&self, value: i32) -> BigInt {
        BigInt::from(value)
    }

    fn shift_left(&self, x: BigInt, y: BigInt) -> EvalResult<BigInt> {
        if x.is_zero() && !y.is_negative() {
            return Ok(x);
        }
        let count = shift_count(&x, "<<", &y)?;
        Ok(x << count)
    }

    fn shift_right(&self, x: BigInt, y: BigInt) -> EvalResult<BigInt> {
        if y.is_negative() {
            return Err(EvalError::IllegalOperand(format!("negative shift count {}", y)));
        }
        match y.to_u64() {
            Some(n) if n < x.bits() => Ok(x >> n as usize),
            // Everything shifted out: arithmetic shift leaves only the sign.
            _ if x.sign() == Sign::Minus => Ok(-BigInt::one()),
            _ => Ok(BigInt::zero()),
        }
    }

    fn pow(&self, x: BigInt, y: BigInt) -> EvalResult<BigInt> {
        if x.is_zero() && y.is_zero() {
            return Err(EvalError::IllegalOperand("0 ** 0 is undefined".to_string()));
        }
        if y.is_negative() {
            return Err(EvalError::IllegalOperand(format!(
                "negative exponent in {} ** {}",
                x, y
            )));
        }
        if x.is_zero() || x.is_one() {
            return Ok(x);
        }
        if x == -BigInt::one() {
            return Ok(if y.bit(0) { x } else { BigInt::one() });
        }
        match y.to_u32() {
            Some(exp) if x.bits().saturating_mul(u64::from(exp)) <= MAX_BITS => Ok(x.pow(exp)),
            _ => Err(too_large(&x, "**", &y)),
        }
    }

    fn log(&self, x: BigInt, y: BigInt) -> EvalResult<BigInt> {
        if y <= BigInt::one() {
            return Err(EvalError::IllegalOperand(format!(
                "logarithm base must be greater than 1, got {}",
                y
            )));
        }
        if !x.is_positive() {
            return Err(EvalError::IllegalOperand(format!(
                "logarithm argument must be positive, got {}",
                x
            )));
        }
        let mut value = x;
        let mut result = 0u64;
        while value >= y {
            value /= &y;
            result += 1;
        }
        Ok(BigInt::from(result))
    }
}
