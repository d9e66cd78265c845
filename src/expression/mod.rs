//! Expression parsing, evaluation and tabulation
//!
//! # Module Organization
//!
//! ## Input
//! - [`source`] - Character cursor with lookahead
//! - [`source_location`] - Line/column tracking
//! - [`base_parser`] - Primitive recognizers over a cursor
//!
//! ## Grammar
//! - [`precedence`] - Operator precedence tables
//! - [`parser`] - Precedence-climbing expression parser
//! - [`ast`] - Expression tree and generic evaluation
//!
//! ## Arithmetic
//! - [`domain`] - Numeric domains (checked `i32`, `f64`, big integers)
//!
//! ## Tabulation
//! - [`grid`] - Dense 3-D result grid
//! - [`tabulator`] - Evaluation over integer boxes
//!
//! ## Error Handling
//! - [`error`] - Syntax, evaluation and tabulation errors

/// Logging macros - use log crate when logging feature is enabled
#[cfg(not(feature = "logging"))]
macro_rules! log_debug {
    ($($arg:tt)*) => {{
        let _ = format_args!($($arg)*);
    }};
}

#[cfg(feature = "logging")]
macro_rules! log_debug {
    ($($arg:tt)*) => { log::debug!($($arg)*) };
}

// ============================================================================
// Module Declarations
// ============================================================================

pub mod ast;
pub mod base_parser;
pub mod domain;
pub mod error;
pub mod grid;
pub mod parser;
pub mod precedence;
pub mod source;
pub mod source_location;
pub mod tabulator;

// ============================================================================
// Core Types
// ============================================================================

pub use ast::{BinaryOp, Expr, Literal, UnaryOp, Variable};
pub use grid::Grid;
pub use parser::{ExpressionParser, OperatorFactory, ParserConfig, StandardOperators};
pub use precedence::{PrecedenceError, PrecedenceTable};

// ============================================================================
// Domains
// ============================================================================

pub use domain::{BigInteger, CheckedInt, Domain, DomainKind, Float};

// ============================================================================
// Tabulation
// ============================================================================

pub use tabulator::{tabulate, Bounds, Table, Tabulator, TabulatorConfig};

// ============================================================================
// Errors
// ============================================================================

pub use error::{EvalError, EvalResult, SyntaxError, SyntaxErrorKind, TabulateError};
pub use source_location::SourcePosition;
