//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and traits from gentab.
//! Importing this module with a wildcard import brings the core types into scope:
//!
//! ```
//! use gentab::prelude::*;
//! ```
//!
//! # Re-exported Items
//!
//! ## Parsing
//! - [`ExpressionParser`] - Precedence-climbing expression parser
//! - [`PrecedenceTable`] - Operator levels used by the parser
//! - [`Expr`] - Expression tree
//!
//! ## Evaluation
//! - [`Domain`] - Numeric domain trait
//! - [`CheckedInt`], [`Float`], [`BigInteger`] - Built-in domains
//! - [`DomainKind`] - Domain selector
//!
//! ## Tabulation
//! - [`tabulate()`] - One-call tabulation by mode tag
//! - [`Tabulator`] - Reusable tabulator
//! - [`Bounds`] - Inclusive coordinate box
//! - [`Table`], [`Grid`] - Results
//!
//! ## Error Handling
//! - [`SyntaxError`] - Malformed expression
//! - [`EvalError`] - Arithmetic failure
//! - [`TabulateError`] - Failed tabulation request

pub use crate::expression::{
    tabulate, BigInteger, Bounds, CheckedInt, Domain, DomainKind, EvalError, EvalResult, Expr,
    ExpressionParser, Float, Grid, PrecedenceTable, SyntaxError, Table, TabulateError, Tabulator,
};
