//! 64-bit floating point

use super::super::error::{EvalError, EvalResult};
use super::Domain;

/// `f64` arithmetic. Never overflows; a zero divisor is still rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Float;

impl Domain for Float {
    type Value = f64;

    fn name(&self) -> &'static str {
        "float"
    }

    fn add(&self, x: f64, y: f64) -> EvalResult<f64> {
        Ok(x + y)
    }

    fn subtract(&self, x: f64, y: f64) -> EvalResult<f64> {
        Ok(x - y)
    }

    fn multiply(&self, x: f64, y: f64) -> EvalResult<f64> {
        Ok(x * y)
    }

    fn divide(&self, x: f64, y: f64) -> EvalResult<f64> {
        if y == 0.0 {
            return Err(EvalError::DivisionByZero);
        }
        Ok(x / y)
    }

    fn negate(&self, x: f64) -> EvalResult<f64> {
        Ok(-x)
    }

    fn parse_literal(&self, text: &str) -> EvalResult<f64> {
        text.parse::<f64>()
            .map_err(|_| EvalError::IllegalOperand(format!("invalid number literal '{}'", text)))
    }

    fn from_int(&self, value: i32) -> f64 {
        f64::from(value)
    }
}
