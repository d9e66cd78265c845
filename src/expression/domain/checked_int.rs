//! Overflow-checked 32-bit integers
//!
//! Every operation detects overflow *before* computing the result, by
//! comparing against `i32::MIN` / `i32::MAX` (add, subtract) or through a
//! division pre-check (multiply). Shifts use two's-complement semantics
//! with the shift count masked to its low five bits.

use std::num::IntErrorKind;

use super::super::error::{EvalError, EvalResult};
use super::Domain;

/// Checked `i32` arithmetic
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CheckedInt;

fn overflow(x: i32, op: &str, y: i32) -> EvalError {
    EvalError::Overflow {
        operation: format!("{} {} {}", x, op, y),
    }
}

impl Domain for CheckedInt {
    type Value = i32;

    fn name(&self) -> &'static str {
        "checked int"
    }

    fn add(&self, x: i32, y: i32) -> EvalResult<i32> {
        if (y > 0 && x > i32::MAX - y) || (y < 0 && x < i32::MIN - y) {
            return Err(overflow(x, "+", y));
        }
        Ok(x + y)
    }

    fn subtract(&self, x: i32, y: i32) -> EvalResult<i32> {
        if (y < 0 && x > i32::MAX + y) || (y > 0 && x < i32::MIN + y) {
            return Err(overflow(x, "-", y));
        }
        Ok(x - y)
    }

    fn multiply(&self, x: i32, y: i32) -> EvalResult<i32> {
        let too_high = (x > 0 && y > 0 && x > i32::MAX / y) || (x < 0 && y < 0 && x < i32::MAX / y);
        let too_low = (x > 0 && y < 0 && y < i32::MIN / x) || (x < 0 && y > 0 && x < i32::MIN / y);
        if too_high || too_low {
            return Err(overflow(x, "*", y));
        }
        Ok(x * y)
    }

    fn divide(&self, x: i32, y: i32) -> EvalResult<i32> {
        if y == 0 {
            return Err(EvalError::DivisionByZero);
        }
        if x == i32::MIN && y == -1 {
            return Err(overflow(x, "/", y));
        }
        Ok(x / y)
    }

    fn negate(&self, x: i32) -> EvalResult<i32> {
        if x == i32::MIN {
            return Err(EvalError::Overflow {
                operation: format!("-({})", x),
            });
        }
        Ok(-x)
    }

    fn parse_literal(&self, text: &str) -> EvalResult<i32> {
        text.parse::<i32>().map_err(|err| match err.kind() {
            IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => EvalError::Overflow {
                operation: format!("literal {}", text),
            },
            _ => EvalError::IllegalOperand(format!("invalid integer literal '{}'", text)),
        })
    }

    fn from_int(&self, value: i32) -> i32 {
        value
    }

    fn shift_left(&self, x: i32, y: i32) -> EvalResult<i32> {
        Ok(x.wrapping_shl(y as u32))
    }

    fn shift_right(&self, x: i32, y: i32) -> EvalResult<i32> {
        Ok(x.wrapping_shr(y as u32))
    }

    fn shift_right_unsigned(&self, x: i32, y: i32) -> EvalResult<i32> {
        Ok((x as u32).wrapping_shr(y as u32) as i32)
    }

    fn pow(&self, x: i32, y: i32) -> EvalResult<i32> {
        if x == 0 && y == 0 {
            return Err(EvalError::IllegalOperand("0 ** 0 is undefined".to_string()));
        }
        if y < 0 {
            return Err(EvalError::IllegalOperand(format!(
                "negative exponent in {} ** {}",
                x, y
            )));
        }

        // Square-and-multiply; the base is only squared while higher exponent
        // bits remain, so a failing square means the result overflows too.
        let mut result = 1;
        let mut base = x;
        let mut exp = y;
        while exp > 0 {
            if exp & 1 == 1 {
                result = self.multiply(result, base).map_err(|_| overflow(x, "**", y))?;
            }
            exp >>= 1;
            if exp > 0 {
                base = self.multiply(base, base).map_err(|_| overflow(x, "**", y))?;
            }
        }
        Ok(result)
    }

    fn log(&self, x: i32, y: i32) -> EvalResult<i32> {
        if y <= 1 {
            return Err(EvalError::IllegalOperand(format!(
                "logarithm base must be greater than 1, got {}",
                y
            )));
        }
        if x <= 0 {
            return Err(EvalError::IllegalOperand(format!(
                "logarithm argument must be positive, got {}",
                x
            )));
        }
        let mut value = x;
        let mut result = 0;
        while value >= y {
            value /= y;
            result += 1;
        }
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn is_overflow<T>(result: EvalResult<T>) -> bool {
        matches!(result, Err(EvalError::Overflow { .. }))
    }

    #[test]
    fn test_add_boundaries() {
        assert!(is_overflow(CheckedInt.add(i32::MAX, 1)));
        assert_eq!(CheckedInt.add(i32::MAX, 0), Ok(i32::MAX));
        assert!(is_overflow(CheckedInt.add(i32::MIN, -1)));
        assert_eq!(CheckedInt.add(i32::MIN, i32::MAX), Ok(-1));
    }

    #[test]
    fn test_subtract_boundaries() {
        assert!(is_overflow(CheckedInt.subtract(i32::MIN, 1)));
        assert!(is_overflow(CheckedInt.subtract(0, i32::MIN)));
        assert_eq!(CheckedInt.subtract(-1, i32::MIN), Ok(i32::MAX));
        assert_eq!(CheckedInt.subtract(i32::MAX, i32::MAX), Ok(0));
    }

    #[test]
    fn test_multiply_boundaries() {
        assert!(is_overflow(CheckedInt.multiply(65536, 65536)));
        assert!(is_overflow(CheckedInt.multiply(-65536, 65536)));
        assert!(is_overflow(CheckedInt.multiply(i32::MIN, -1)));
        assert!(is_overflow(CheckedInt.multiply(-1, i32::MIN)));
        assert_eq!(CheckedInt.multiply(i32::MIN, 1), Ok(i32::MIN));
        assert_eq!(CheckedInt.multiply(-65536, 32768), Ok(i32::MIN));
        assert_eq!(CheckedInt.multiply(-46341, -46340), Ok(2_147_441_940));
        assert_eq!(CheckedInt.multiply(0, i32::MIN), Ok(0));
    }

    #[test]
    fn test_divide() {
        assert_eq!(CheckedInt.divide(7, 0), Err(EvalError::DivisionByZero));
        assert!(is_overflow(CheckedInt.divide(i32::MIN, -1)));
        assert_eq!(CheckedInt.divide(-7, 2), Ok(-3));
    }

    #[test]
    fn test_negate() {
        assert!(is_overflow(CheckedInt.negate(i32::MIN)));
        assert_eq!(CheckedInt.negate(i32::MAX), Ok(-i32::MAX));
    }

    #[test]
    fn test_parse_literal() {
        assert_eq!(CheckedInt.parse_literal("-2147483648"), Ok(i32::MIN));
        assert!(is_overflow(CheckedInt.parse_literal("2147483648")));
        assert!(matches!(
            CheckedInt.parse_literal("abc"),
            Err(EvalError::IllegalOperand(_))
        ));
    }

    #[test]
    fn test_shifts_mask_count() {
        assert_eq!(CheckedInt.shift_left(1, 33), Ok(2));
        assert_eq!(CheckedInt.shift_right(-8, 1), Ok(-4));
        assert_eq!(CheckedInt.shift_right_unsigned(-1, 28), Ok(15));
        assert_eq!(CheckedInt.shift_right_unsigned(-1, 0), Ok(-1));
    }

    #[test]
    fn test_pow() {
        assert_eq!(CheckedInt.pow(2, 10), Ok(1024));
        assert_eq!(CheckedInt.pow(-2, 31), Ok(i32::MIN));
        assert_eq!(CheckedInt.pow(-1, 1_000_001), Ok(-1));
        assert_eq!(CheckedInt.pow(0, 5), Ok(0));
        assert_eq!(CheckedInt.pow(7, 0), Ok(1));
        assert!(is_overflow(CheckedInt.pow(2, 31)));
        assert!(is_overflow(CheckedInt.pow(46341, 2)));
        assert!(matches!(CheckedInt.pow(0, 0), Err(EvalError::IllegalOperand(_))));
        assert!(matches!(CheckedInt.pow(2, -1), Err(EvalError::IllegalOperand(_))));
    }

    #[test]
    fn test_log() {
        assert_eq!(CheckedInt.log(1024, 2), Ok(10));
        assert_eq!(CheckedInt.log(1023, 2), Ok(9));
        assert_eq!(CheckedInt.log(1, 10), Ok(0));
        assert!(matches!(CheckedInt.log(8, 1), Err(EvalError::IllegalOperand(_))));
        assert!(matches!(CheckedInt.log(8, -2), Err(EvalError::IllegalOperand(_))));
        assert!(matches!(CheckedInt.log(0, 2), Err(EvalError::IllegalOperand(_))));
    }
}
