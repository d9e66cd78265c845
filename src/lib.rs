//! Gentab - Generic Expression Tabulator
//!
//! Parses arithmetic expressions over the variables `x`, `y` and `z` and
//! evaluates them over a 3-D integer box in a selectable numeric domain.
//! It provides:
//! - Character cursor and primitive recognizers with line/column tracking
//! - Table-driven precedence-climbing parser with pluggable operator factory
//! - Immutable expression tree with canonical, re-parseable display form
//! - Checked 32-bit, floating point and arbitrary-precision integer domains
//! - Tabulation with per-cell fault isolation
//!
//! ## Quick Start
//!
//! ```rust
//! use gentab::prelude::*;
//!
//! let table = tabulate("i", "x * y + z", 0, 2, 0, 2, 0, 1).unwrap();
//! assert_eq!(table.shape(), [3, 3, 2]);
//!
//! let grid = table.as_int().unwrap();
//! assert_eq!(grid.at(2, 2, 1), Some(&5));
//! ```
//!
//! ## Parsing and Evaluating Directly
//!
//! ```rust
//! use gentab::prelude::*;
//!
//! let expr = ExpressionParser::standard().parse("2 ** x // 3").unwrap();
//! assert_eq!(expr.to_string(), "((2 ** x) // 3)");
//! assert_eq!(expr.evaluate_at(&CheckedInt, 10, 0, 0), Ok(6));
//!
//! // Division by zero surfaces when evaluating directly
//! let expr = ExpressionParser::standard().parse("1 / x").unwrap();
//! assert_eq!(expr.evaluate_at(&CheckedInt, 0, 0, 0), Err(EvalError::DivisionByZero));
//! ```
//!
//! ## Feature Flags
//!
//! - `logging` - Enable debug logging using the `log` crate
//! - `parallel` - Evaluate grid planes on the rayon thread pool

// Lint configuration for production quality
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]
#![warn(clippy::all)]
#![allow(clippy::module_inception)]

// Prelude module for convenient imports
pub mod prelude;

pub mod expression;

/// Re-export commonly used types for convenience
pub use expression::{
    // Grammar
    ast::{BinaryOp, Expr, Literal, UnaryOp, Variable},
    // Domains
    domain::{BigInteger, CheckedInt, Domain, DomainKind, Float},
    // Errors
    error::{EvalError, EvalResult, SyntaxError, SyntaxErrorKind, TabulateError},
    grid::Grid,
    parser::{ExpressionParser, OperatorFactory, ParserConfig, StandardOperators},
    precedence::{PrecedenceError, PrecedenceTable},
    source_location::SourcePosition,
    // Tabulation
    tabulator::{tabulate, Bounds, Table, Tabulator, TabulatorConfig},
};
