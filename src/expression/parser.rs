//! Precedence-Climbing Expression Parser
//!
//! [`ExpressionParser`] turns text into an [`Expr`] tree. It is driven by a
//! [`PrecedenceTable`] and builds nodes through an [`OperatorFactory`], so
//! both the operator set and the tree shape are supplied by the caller.
//!
//! The parser value holds only immutable configuration. Every call to
//! [`ExpressionParser::parse`] creates a fresh source and lookahead, so one
//! parser can be reused and shared between threads.
//!
//! # Example
//!
//! ```rust
//! use gentab::expression::parser::ExpressionParser;
//!
//! let parser = ExpressionParser::standard();
//! let expr = parser.parse("1 + 2 * 3").unwrap();
//! assert_eq!(expr.to_string(), "(1 + (2 * 3))");
//! ```

use super::ast::{BinaryOp, Expr, Literal, UnaryOp, Variable};
use super::base_parser::BaseParser;
use super::error::{SyntaxError, SyntaxErrorKind};
use super::precedence::PrecedenceTable;
use super::source::{CharSource, StringSource};
use super::source_location::SourcePosition;

/// Default maximum nesting of parentheses and operators
pub const DEFAULT_MAX_NESTING_DEPTH: usize = 256;

/// Builds tree nodes for operator lexemes
pub trait OperatorFactory {
    /// Node for `left op right`
    fn binary(&self, op: &str, left: Expr, right: Expr) -> Result<Expr, SyntaxErrorKind>;

    /// Node for `op operand`
    fn unary(&self, op: &str, operand: Expr) -> Result<Expr, SyntaxErrorKind>;
}

/// Factory for the built-in [`BinaryOp`] and [`UnaryOp`] lexemes
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardOperators;

impl OperatorFactory for StandardOperators {
    fn binary(&self, op: &str, left: Expr, right: Expr) -> Result<Expr, SyntaxErrorKind> {
        BinaryOp::from_symbol(op)
            .map(|kind| Expr::binary(kind, left, right))
            .ok_or_else(|| SyntaxErrorKind::UnknownOperator(op.to_string()))
    }

    fn unary(&self, op: &str, operand: Expr) -> Result<Expr, SyntaxErrorKind> {
        UnaryOp::from_symbol(op)
            .map(|kind| Expr::unary(kind, operand))
            .ok_or_else(|| SyntaxErrorKind::UnknownOperator(op.to_string()))
    }
}

/// Parser limits
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting of parentheses and prefix operators, and maximum
    /// number of operators on any path from the root of the tree
    pub max_depth: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_NESTING_DEPTH,
        }
    }
}

impl ParserConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum nesting depth
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }
}

/// Precedence-climbing parser over a [`PrecedenceTable`]
#[derive(Debug, Clone)]
pub struct ExpressionParser<F: OperatorFactory = StandardOperators> {
    table: PrecedenceTable,
    factory: F,
    config: ParserConfig,
}

impl ExpressionParser<StandardOperators> {
    /// Parser for [`PrecedenceTable::standard`] with the built-in operators
    pub fn standard() -> Self {
        Self::new(PrecedenceTable::standard(), StandardOperators)
    }

    /// Parser for [`PrecedenceTable::basic`] with the built-in operators
    pub fn basic() -> Self {
        Self::new(PrecedenceTable::basic(), StandardOperators)
    }
}

impl<F: OperatorFactory> ExpressionParser<F> {
    /// Create a parser from a table and a node factory
    pub fn new(table: PrecedenceTable, factory: F) -> Self {
        Self {
            table,
            factory,
            config: ParserConfig::default(),
        }
    }

    /// Replace the parser limits
    pub fn with_config(mut self, config: ParserConfig) -> Self {
        self.config = config;
        self
    }

    /// The precedence table in use
    pub fn table(&self) -> &PrecedenceTable {
        &self.table
    }

    /// Parse a complete expression
    pub fn parse(&self, text: &str) -> Result<Expr, SyntaxError> {
        log_debug!("parsing expression {:?}", text);
        let mut run = ParseRun {
            table: &self.table,
            factory: &self.factory,
            config: &self.config,
            lexer: BaseParser::new(StringSource::new(text)),
            depth: 0,
        };
        let result = run.parse_expression();
        match &result {
            Ok(expr) => {
                log_debug!("parsed {}", expr);
            }
            Err(err) => {
                log_debug!("parse failed: {}", err);
            }
        }
        result
    }
}

/// State of a single parse: the lookahead and the current nesting depth
struct ParseRun<'p, F, S: CharSource> {
    table: &'p PrecedenceTable,
    factory: &'p F,
    config: &'p ParserConfig,
    lexer: BaseParser<S>,
    depth: usize,
}

/// A parsed subtree with the number of operator nodes on its longest path
type Parsed = (Expr, usize);

impl<'p, F: OperatorFactory, S: CharSource> ParseRun<'p, F, S> {
    fn parse_expression(&mut self) -> Result<Expr, SyntaxError> {
        let (result, _) = self.parse_level(self.table.level_count())?;
        self.lexer.skip_whitespace();
        match self.lexer.current() {
            None => Ok(result),
            Some(found) => Err(self
                .lexer
                .error(SyntaxErrorKind::ExtraTrailingInput { found })),
        }
    }

    fn parse_level(&mut self, level: usize) -> Result<Parsed, SyntaxError> {
        if level <= 1 {
            return self.parse_unary();
        }

        let (mut result, mut height) = self.parse_level(level - 1)?;
        self.lexer.skip_whitespace();
        while let Some(op) = self.take_operator(level) {
            let position = self.lexer.position();
            let (right, right_height) = self.parse_level(level - 1)?;
            // Long flat chains build a deep left spine
            height = self.node_height(height.max(right_height), position)?;
            result = self
                .factory
                .binary(op, result, right)
                .map_err(|kind| SyntaxError::new(kind, position))?;
            self.lexer.skip_whitespace();
        }
        Ok((result, height))
    }

    /// Consume the longest operator of `level` at the lookahead
    fn take_operator(&mut self, level: usize) -> Option<&'p str> {
        let table: &'p PrecedenceTable = self.table;
        table
            .match_order(level)
            .into_iter()
            .find(|op| self.lexer.take_str(op))
    }

    fn parse_unary(&mut self) -> Result<Parsed, SyntaxError> {
        self.lexer.skip_whitespace();
        let table: &'p PrecedenceTable = self.table;
        for op in table.unary_operators() {
            if !self.lexer.test_str(op) {
                continue;
            }
            let position = self.lexer.position();
            self.lexer.take_str(op);
            if op == "-" && self.lexer.between('0', '9') {
                return self.parse_number("-");
            }
            self.enter()?;
            let (operand, height) = self.parse_unary()?;
            self.depth -= 1;
            let height = self.node_height(height, position)?;
            let node = self
                .factory
                .unary(op, operand)
                .map_err(|kind| SyntaxError::new(kind, position))?;
            return Ok((node, height));
        }
        self.parse_atom()
    }

    fn parse_atom(&mut self) -> Result<Parsed, SyntaxError> {
        self.lexer.skip_whitespace();
        if self.lexer.test('(') {
            self.enter()?;
            self.lexer.take();
            let result = self.parse_level(self.table.level_count())?;
            self.lexer.skip_whitespace();
            self.lexer.expect(')')?;
            self.depth -= 1;
            return Ok(result);
        }
        if self.lexer.between('0', '9') {
            return self.parse_number("");
        }
        if let Some(variable) = self.lexer.current().and_then(Variable::from_char) {
            self.lexer.take();
            return Ok((Expr::Variable(variable), 0));
        }
        Err(self.lexer.error(SyntaxErrorKind::MissingArgument {
            found: self.lexer.current(),
        }))
    }

    /// Read a digit run after an optional sign prefix
    fn parse_number(&mut self, prefix: &str) -> Result<Parsed, SyntaxError> {
        let position = self.lexer.position();
        let mut text = String::from(prefix);
        while self.lexer.between('0', '9') {
            if let Some(digit) = self.lexer.take() {
                text.push(digit);
            }
        }
        match Literal::new(text) {
            Some(literal) => Ok((Expr::Const(literal), 0)),
            None => Err(SyntaxError::new(
                SyntaxErrorKind::MissingArgument {
                    found: self.lexer.current(),
                },
                position,
            )),
        }
    }

    fn enter(&mut self) -> Result<(), SyntaxError> {
        if self.depth >= self.config.max_depth {
            return Err(self.lexer.error(SyntaxErrorKind::NestingTooDeep {
                limit: self.config.max_depth,
            }));
        }
        self.depth += 1;
        Ok(())
    }

    /// Height of a new operator node over children of height `child`
    fn node_height(&self, child: usize, position: SourcePosition) -> Result<usize, SyntaxError> {
        if child >= self.config.max_depth {
            return Err(SyntaxError::new(
                SyntaxErrorKind::NestingTooDeep {
                    limit: self.config.max_depth,
                },
                position,
            ));
        }
        Ok(child + 1)
    }
}
