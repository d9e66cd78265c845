//! Error types for parsing, evaluation and tabulation
//!
//! Failures travel through separate channels because they are recovered at
//! different scopes:
//!
//! - [`SyntaxError`] aborts the whole `parse` call.
//! - [`EvalError`] aborts a single evaluation. The tabulator turns it into an
//!   undefined cell; direct callers of `Expr::evaluate` see it as-is.
//! - [`TabulateError`] is what a tabulation request can fail with: a bad
//!   domain tag, a bad expression, or a grid over the configured size.
//!
//! # Example Output
//!
//! ```text
//! Error at line 1, column 7: expected ')', found end of input
//! (x + y
//!       ^
//! ```

use std::fmt;

use super::source_location::SourcePosition;

/// Render an optional lookahead character for messages
pub(crate) fn describe(found: Option<char>) -> String {
    match found {
        Some(c) => format!("'{}'", c),
        None => "end of input".to_string(),
    }
}

/// What went wrong while parsing
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxErrorKind {
    /// A specific symbol was required but something else was found
    UnexpectedSymbol {
        /// The symbol the parser required
        expected: String,
        /// The symbol actually found (`None` at end of input)
        found: Option<char>,
    },
    /// An operand was required (number, variable or parenthesized expression)
    MissingArgument {
        /// The symbol found instead (`None` at end of input)
        found: Option<char>,
    },
    /// Input continues after a complete expression
    ExtraTrailingInput {
        /// First character of the trailing input
        found: char,
    },
    /// The operator factory does not know a lexeme from the precedence table
    UnknownOperator(String),
    /// Parentheses or operator chains nested deeper than the configured limit
    NestingTooDeep {
        /// The configured maximum depth
        limit: usize,
    },
}

impl fmt::Display for SyntaxErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SyntaxErrorKind::UnexpectedSymbol { expected, found } => {
                write!(f, "expected '{}', found {}", expected, describe(*found))
            }
            SyntaxErrorKind::MissingArgument { found } => {
                write!(f, "missing argument, found {}", describe(*found))
            }
            SyntaxErrorKind::ExtraTrailingInput { found } => {
                write!(f, "unexpected symbol '{}' after end of expression", found)
            }
            SyntaxErrorKind::UnknownOperator(op) => write!(f, "unknown operator '{}'", op),
            SyntaxErrorKind::NestingTooDeep { limit } => {
                write!(f, "expression nested deeper than {} levels", limit)
            }
        }
    }
}

/// A positioned parse failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxError {
    /// What went wrong
    pub kind: SyntaxErrorKind,
    /// Where the lookahead was when it went wrong
    pub position: SourcePosition,
}

impl SyntaxError {
    /// Create a new syntax error
    pub fn new(kind: SyntaxErrorKind, position: SourcePosition) -> Self {
        Self { kind, position }
    }

    /// Format with the offending source line and a caret under the column
    pub fn format_with_source(&self, source: &str) -> String {
        let mut output = format!("{}\n", self);
        output.push_str(self.position.line_text(source));
        output.push('\n');
        for _ in 0..self.position.column.saturating_sub(1) {
            output.push(' ');
        }
        output.push_str("^\n");
        output
    }
}

impl fmt::Display for SyntaxError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Error at {}: {}", self.position, self.kind)
    }
}

impl std::error::Error for SyntaxError {}

/// Arithmetic failure during a single evaluation
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EvalError {
    /// The exact result does not fit the fixed-width representation
    Overflow {
        /// Rendering of the failed operation, e.g. `2147483647 + 1`
        operation: String,
    },
    /// Zero divisor
    DivisionByZero,
    /// Operand outside the operation's domain (log base, negative exponent, `0 ** 0`)
    IllegalOperand(String),
    /// The numeric domain does not implement this operator
    Unsupported {
        /// Operator lexeme
        operation: &'static str,
        /// Domain name
        domain: &'static str,
    },
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EvalError::Overflow { operation } => write!(f, "overflow: {}", operation),
            EvalError::DivisionByZero => write!(f, "division by zero"),
            EvalError::IllegalOperand(msg) => write!(f, "illegal operand: {}", msg),
            EvalError::Unsupported { operation, domain } => {
                write!(f, "operator '{}' is not supported by the {} domain", operation, domain)
            }
        }
    }
}

impl std::error::Error for EvalError {}

/// Result of a single evaluation
pub type EvalResult<T> = Result<T, EvalError>;

/// Failure of a whole tabulation request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TabulateError {
    /// The domain tag is not one of `i`, `d`, `bi`
    UnknownDomain(String),
    /// The expression did not parse
    Syntax(SyntaxError),
    /// The requested grid exceeds the configured cell limit
    RangeTooLarge {
        /// Requested number of cells
        cells: u128,
        /// Configured maximum
        limit: usize,
    },
}

impl fmt::Display for TabulateError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TabulateError::UnknownDomain(tag) => write!(f, "unsupported mode: {}", tag),
            TabulateError::Syntax(err) => write!(f, "{}", err),
            TabulateError::RangeTooLarge { cells, limit } => write!(
                f,
                "grid of {} cells exceeds the limit of {} cells",
                cells, limit
            ),
        }
    }
}

impl std::error::Error for TabulateError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            TabulateError::Syntax(err) => Some(err),
            _ => None,
        }
    }
}

impl From<SyntaxError> for TabulateError {
    fn from(err: SyntaxError) -> Self {
        TabulateError::Syntax(err)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_syntax_error_display() {
        let err = SyntaxError::new(
            SyntaxErrorKind::UnexpectedSymbol {
                expected: ")".to_string(),
                found: None,
            },
            SourcePosition::new(6, 1, 7),
        );
        assert_eq!(
            err.to_string(),
            "Error at line 1, column 7: expected ')', found end of input"
        );
    }

    #[test]
    fn test_format_with_source() {
        let err = SyntaxError::new(
            SyntaxErrorKind::MissingArgument { found: Some('?') },
            SourcePosition::new(4, 1, 5),
        );
        let formatted = err.format_with_source("x + ?");
        assert!(formatted.contains("missing argument, found '?'"));
        assert!(formatted.ends_with("x + ?\n    ^\n"));
    }

    #[test]
    fn test_eval_error_display() {
        assert_eq!(EvalError::DivisionByZero.to_string(), "division by zero");
        let err = EvalError::Unsupported {
            operation: ">>>",
            domain: "float",
        };
        assert!(err.to_string().contains(">>>"));
    }

    #[test]
    fn test_tabulate_error_from_syntax() {
        let syntax = SyntaxError::new(
            SyntaxErrorKind::ExtraTrailingInput { found: ')' },
            SourcePosition::start(),
        );
        let err: TabulateError = syntax.clone().into();
        assert_eq!(err, TabulateError::Syntax(syntax));
        assert!(std::error::Error::source(&err).is_some());
    }
}
