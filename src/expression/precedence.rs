//! Operator Precedence Tables
//!
//! A [`PrecedenceTable`] lists the operator lexemes recognized at each
//! priority level. Level 1 holds the unary (prefix) operators; binary levels
//! are numbered from 2 (binds tightest) up to N (binds loosest). Every binary
//! level is left-associative.
//!
//! Tables are plain values: build one, validate it, and hand it to the
//! parser. They can also be loaded from JSON:
//!
//! ```rust
//! use gentab::expression::precedence::PrecedenceTable;
//!
//! let json = r#"{ "unary": ["-"], "levels": [["*", "/"], ["+", "-"]] }"#;
//! let table: PrecedenceTable = serde_json::from_str(json).unwrap();
//! table.validate().unwrap();
//!
//! assert_eq!(table.level_count(), 3);
//! assert_eq!(table.precedence("+"), Some(3));
//! ```

use std::fmt;

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

/// Reasons a table is rejected
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PrecedenceError {
    /// A binary lexeme appears more than once
    DuplicateLexeme(String),
    /// An empty string was given as a lexeme
    EmptyLexeme,
    /// A binary level has no operators
    EmptyLevel {
        /// 1-based level number (binary levels start at 2)
        level: usize,
    },
}

impl fmt::Display for PrecedenceError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrecedenceError::DuplicateLexeme(op) => {
                write!(f, "operator '{}' appears at more than one level", op)
            }
            PrecedenceError::EmptyLexeme => write!(f, "operator lexemes must not be empty"),
            PrecedenceError::EmptyLevel { level } => {
                write!(f, "precedence level {} has no operators", level)
            }
        }
    }
}

impl std::error::Error for PrecedenceError {}

/// Ordered mapping from priority level to operator lexemes
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecedenceTable {
    /// Prefix operators (level 1)
    unary: Vec<String>,
    /// Binary levels, tightest first
    levels: Vec<Vec<String>>,
}

impl PrecedenceTable {
    /// Create and validate a table
    pub fn new<U, L, S>(unary: U, levels: L) -> Result<Self, PrecedenceError>
    where
        U: IntoIterator<Item = S>,
        L: IntoIterator,
        L::Item: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let table = Self {
            unary: unary.into_iter().map(Into::into).collect(),
            levels: levels
                .into_iter()
                .map(|level| level.into_iter().map(Into::into).collect())
                .collect(),
        };
        table.validate()?;
        Ok(table)
    }

    /// The table without the checked power/log level:
    ///
    /// | level | operators        |
    /// |-------|------------------|
    /// | 1     | `-` (unary)      |
    /// | 2     | `*` `/`          |
    /// | 3     | `+` `-`          |
    /// | 4     | `>>>` `>>` `<<`  |
    pub fn basic() -> Self {
        Self::from_static(
            &["-"],
            &[&["*", "/"], &["+", "-"], &[">>>", ">>", "<<"]],
        )
    }

    /// The reference table, including the checked `**` / `//` level:
    ///
    /// | level | operators        |
    /// |-------|------------------|
    /// | 1     | `-` (unary)      |
    /// | 2     | `**` `//`        |
    /// | 3     | `*` `/`          |
    /// | 4     | `+` `-`          |
    /// | 5     | `>>>` `>>` `<<`  |
    pub fn standard() -> Self {
        Self::from_static(
            &["-"],
            &[&["**", "//"], &["*", "/"], &["+", "-"], &[">>>", ">>", "<<"]],
        )
    }

    fn from_static(unary: &[&str], levels: &[&[&str]]) -> Self {
        Self {
            unary: unary.iter().map(|s| s.to_string()).collect(),
            levels: levels
                .iter()
                .map(|level| level.iter().map(|s| s.to_string()).collect())
                .collect(),
        }
    }

    /// Check the table invariants
    pub fn validate(&self) -> Result<(), PrecedenceError> {
        if self.unary.iter().any(|op| op.is_empty()) {
            return Err(PrecedenceError::EmptyLexeme);
        }

        let mut seen = HashSet::new();
        for (index, level) in self.levels.iter().enumerate() {
            if level.is_empty() {
                return Err(PrecedenceError::EmptyLevel { level: index + 2 });
            }
            for op in level {
                if op.is_empty() {
                    return Err(PrecedenceError::EmptyLexeme);
                }
                if !seen.insert(op.as_str()) {
                    return Err(PrecedenceError::DuplicateLexeme(op.clone()));
                }
            }
        }
        Ok(())
    }

    /// Total number of levels, counting the unary level (N)
    pub fn level_count(&self) -> usize {
        self.levels.len() + 1
    }

    /// Prefix operators, in declared order
    pub fn unary_operators(&self) -> &[String] {
        &self.unary
    }

    /// Binary operators at a level (2..=N), in declared order
    pub fn operators_at_level(&self, level: usize) -> &[String] {
        level
            .checked_sub(2)
            .and_then(|index| self.levels.get(index))
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// Binary operators at a level, longest lexeme first.
    ///
    /// The sort is stable, so lexemes of equal length keep their declared
    /// order. Matching in this order means `>>>` is never read as `>>`.
    pub fn match_order(&self, level: usize) -> Vec<&str> {
        let mut ops: Vec<&str> = self
            .operators_at_level(level)
            .iter()
            .map(String::as_str)
            .collect();
        ops.sort_by(|a, b| b.len().cmp(&a.len()));
        ops
    }

    /// Level of a binary operator
    pub fn precedence(&self, op: &str) -> Option<usize> {
        self.levels
            .iter()
            .position(|level| level.iter().any(|o| o == op))
            .map(|index| index + 2)
    }

    /// Is `op` a binary operator of this table?
    pub fn is_operator(&self, op: &str) -> bool {
        self.precedence(op).is_some()
    }

    /// Is `op` a prefix operator of this table?
    pub fn is_unary(&self, op: &str) -> bool {
        self.unary.iter().any(|o| o == op)
    }
}

impl Default for PrecedenceTable {
    fn default() -> Self {
        Self::standard()
    }
}
