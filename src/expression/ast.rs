//! Expression AST
//!
//! The tree produced by the parser is independent of any numeric domain:
//! constants keep their literal text and every [`Domain`] parses that text
//! itself. Trees are immutable values; evaluation only reads them, so one
//! tree can be shared by any number of evaluations and domains.
//!
//! `Display` gives the canonical, fully parenthesized form. Re-parsing it
//! yields a structurally equal tree.

use std::fmt;

use serde::{Deserialize, Serialize};

use super::domain::Domain;
use super::error::EvalResult;

/// Integer literal text: an optional leading `-` followed by ASCII digits
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Literal(String);

impl Literal {
    /// Validate and wrap literal text
    pub fn new(text: impl Into<String>) -> Option<Self> {
        let text = text.into();
        let digits = text.strip_prefix('-').unwrap_or(&text);
        if !digits.is_empty() && digits.bytes().all(|b| b.is_ascii_digit()) {
            Some(Self(text))
        } else {
            None
        }
    }

    /// The literal text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Does the literal carry a leading minus sign?
    pub fn is_negative(&self) -> bool {
        self.0.starts_with('-')
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Self(value.to_string())
    }
}

impl TryFrom<String> for Literal {
    type Error = String;

    fn try_from(text: String) -> Result<Self, Self::Error> {
        Literal::new(text.clone()).ok_or_else(|| format!("invalid integer literal: {}", text))
    }
}

impl From<Literal> for String {
    fn from(literal: Literal) -> Self {
        literal.0
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// One of the three expression variables
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Variable {
    /// `x`
    X,
    /// `y`
    Y,
    /// `z`
    Z,
}

impl Variable {
    /// Map a source character to a variable
    pub fn from_char(c: char) -> Option<Self> {
        match c {
            'x' => Some(Variable::X),
            'y' => Some(Variable::Y),
            'z' => Some(Variable::Z),
            _ => None,
        }
    }

    /// The variable's name
    pub fn name(self) -> &'static str {
        match self {
            Variable::X => "x",
            Variable::Y => "y",
            Variable::Z => "z",
        }
    }
}

/// Prefix operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnaryOp {
    /// `-a`
    Negate,
}

impl UnaryOp {
    /// Operator lexeme
    pub fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Negate => "-",
        }
    }

    /// Look up an operator by lexeme
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        match symbol {
            "-" => Some(UnaryOp::Negate),
            _ => None,
        }
    }

    /// Apply the operator in `domain`
    pub fn apply<D: Domain>(self, domain: &D, operand: D::Value) -> EvalResult<D::Value> {
        match self {
            UnaryOp::Negate => domain.negate(operand),
        }
    }
}

/// Binary operators
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BinaryOp {
    /// `a + b`
    Add,
    /// `a - b`
    Subtract,
    /// `a * b`
    Multiply,
    /// `a / b`
    Divide,
    /// `a ** b`
    Pow,
    /// `a // b`, the integer logarithm of `a` in base `b`
    Log,
    /// `a << b`
    ShiftLeft,
    /// `a >> b`
    ShiftRight,
    /// `a >>> b`
    ShiftRightUnsigned,
}

impl BinaryOp {
    /// Every binary operator
    pub const ALL: [BinaryOp; 9] = [
        BinaryOp::Add,
        BinaryOp::Subtract,
        BinaryOp::Multiply,
        BinaryOp::Divide,
        BinaryOp::Pow,
        BinaryOp::Log,
        BinaryOp::ShiftLeft,
        BinaryOp::ShiftRight,
        BinaryOp::ShiftRightUnsigned,
    ];

    /// Operator lexeme
    pub fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Subtract => "-",
            BinaryOp::Multiply => "*",
            BinaryOp::Divide => "/",
            BinaryOp::Pow => "**",
            BinaryOp::Log => "//",
            BinaryOp::ShiftLeft => "<<",
            BinaryOp::ShiftRight => ">>",
            BinaryOp::ShiftRightUnsigned => ">>>",
        }
    }

    /// Look up an operator by lexeme
    pub fn from_symbol(symbol: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|op| op.symbol() == symbol)
    }

    /// Apply the operator in `domain`
    pub fn apply<D: Domain>(
        self,
        domain: &D,
        left: D::Value,
        right: D::Value,
    ) -> EvalResult<D::Value> {
        match self {
            BinaryOp::Add => domain.add(left, right),
            BinaryOp::Subtract => domain.subtract(left, right),
            BinaryOp::Multiply => domain.multiply(left, right),
            BinaryOp::Divide => domain.divide(left, right),
            BinaryOp::Pow => domain.pow(left, right),
            BinaryOp::Log => domain.log(left, right),
            BinaryOp::ShiftLeft => domain.shift_left(left, right),
            BinaryOp::ShiftRight => domain.shift_right(left, right),
            BinaryOp::ShiftRightUnsigned => domain.shift_right_unsigned(left, right),
        }
    }
}

/// Expression tree node
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Expr {
    /// Integer constant
    Const(Literal),
    /// One of `x`, `y`, `z`
    Variable(Variable),
    /// Prefix operation
    Unary {
        /// Operator
        op: UnaryOp,
        /// Operand
        operand: Box<Expr>,
    },
    /// Infix operation
    Binary {
        /// Operator
        op: BinaryOp,
        /// Left operand
        left: Box<Expr>,
        /// Right operand
        right: Box<Expr>,
    },
}

impl Expr {
    /// Constant from an `i32`
    pub fn constant(value: i32) -> Self {
        Expr::Const(Literal::from(value))
    }

    /// Variable node
    pub fn var(variable: Variable) -> Self {
        Expr::Variable(variable)
    }

    /// Prefix operation node
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    /// Infix operation node
    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Evaluate at `(x, y, z)` in `domain`
    pub fn evaluate<D: Domain>(
        &self,
        domain: &D,
        x: &D::Value,
        y: &D::Value,
        z: &D::Value,
    ) -> EvalResult<D::Value> {
        match self {
            Expr::Const(literal) => domain.parse_literal(literal.as_str()),
            Expr::Variable(Variable::X) => Ok(x.clone()),
            Expr::Variable(Variable::Y) => Ok(y.clone()),
            Expr::Variable(Variable::Z) => Ok(z.clone()),
            Expr::Unary { op, operand } => {
                let value = operand.evaluate(domain, x, y, z)?;
                op.apply(domain, value)
            }
            Expr::Binary { op, left, right } => {
                let l = left.evaluate(domain, x, y, z)?;
                let r = right.evaluate(domain, x, y, z)?;
                op.apply(domain, l, r)
            }
        }
    }

    /// Evaluate at integer coordinates, converting them with `from_int`
    pub fn evaluate_at<D: Domain>(&self, domain: &D, x: i32, y: i32, z: i32) -> EvalResult<D::Value> {
        self.evaluate(
            domain,
            &domain.from_int(x),
            &domain.from_int(y),
            &domain.from_int(z),
        )
    }

    /// Evaluate a single-variable expression; `x`, `y` and `z` all take `value`
    pub fn evaluate_x<D: Domain>(&self, domain: &D, value: i32) -> EvalResult<D::Value> {
        let value = domain.from_int(value);
        self.evaluate(domain, &value, &value, &value)
    }

    /// Variables referenced by the tree, each listed once in x, y, z order
    pub fn variables(&self) -> Vec<Variable> {
        let mut used = [false; 3];
        self.mark_variables(&mut used);
        [Variable::X, Variable::Y, Variable::Z]
            .into_iter()
            .zip(used)
            .filter_map(|(v, u)| u.then_some(v))
            .collect()
    }

    fn mark_variables(&self, used: &mut [bool; 3]) {
        match self {
            Expr::Const(_) => {}
            Expr::Variable(v) => used[*v as usize] = true,
            Expr::Unary { operand, .. } => operand.mark_variables(used),
            Expr::Binary { left, right, .. } => {
                left.mark_variables(used);
                right.mark_variables(used);
            }
        }
    }

    /// Height of the tree (a leaf has depth 1)
    pub fn depth(&self) -> usize {
        match self {
            Expr::Const(_) | Expr::Variable(_) => 1,
            Expr::Unary { operand, .. } => 1 + operand.depth(),
            Expr::Binary { left, right, .. } => 1 + left.depth().max(right.depth()),
        }
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Const(literal) => write!(f, "{}", literal),
            Expr::Variable(v) => f.write_str(v.name()),
            Expr::Unary { op, operand } => write!(f, "{}({})", op.symbol(), operand),
            Expr::Binary { op, left, right } => {
                write!(f, "({} {} {})", left, op.symbol(), right)
            }
        }
    }
}
