//! Tabulation over a 3-D integer box
//!
//! The expression is parsed once, then evaluated at every integer point of
//! the inclusive box. Arithmetic failures at a point (overflow, division by
//! zero, illegal operands) leave that cell undefined and never stop the
//! other cells. Only a bad domain tag, a bad expression, or a grid over the
//! configured size fails the request as a whole.
//!
//! # Example
//!
//! ```rust
//! use gentab::expression::tabulator::tabulate;
//!
//! let table = tabulate("i", "1 / x", -1, 1, 0, 0, 0, 0).unwrap();
//! let grid = table.as_int().unwrap();
//! assert_eq!(grid.get(0, 0, 0), Some(&-1));
//! assert_eq!(grid.get(1, 0, 0), None);
//! assert_eq!(grid.get(2, 0, 0), Some(&1));
//! ```
//!
//! # Feature Flag
//!
//! With the `parallel` feature the x-planes of the grid are evaluated on
//! rayon's thread pool. Cell placement is by index, so the result is the
//! same either way.

use std::ops::RangeInclusive;

use num_bigint::BigInt;
use serde::{Deserialize, Serialize};

#[cfg(feature = "rayon")]
use rayon::prelude::*;

use super::ast::Expr;
use super::domain::{BigInteger, CheckedInt, Domain, DomainKind, Float};
use super::error::TabulateError;
use super::grid::Grid;
use super::parser::ExpressionParser;

/// Inclusive coordinate ranges of a tabulation box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bounds {
    /// Range of `x`
    pub x: RangeInclusive<i32>,
    /// Range of `y`
    pub y: RangeInclusive<i32>,
    /// Range of `z`
    pub z: RangeInclusive<i32>,
}

impl Bounds {
    /// Create bounds from three inclusive ranges
    pub fn new(x: RangeInclusive<i32>, y: RangeInclusive<i32>, z: RangeInclusive<i32>) -> Self {
        Self { x, y, z }
    }

    /// Lowest corner of the box
    pub fn origin(&self) -> [i32; 3] {
        [*self.x.start(), *self.y.start(), *self.z.start()]
    }

    /// Number of points along each axis; an inverted range has none
    pub fn shape(&self) -> [u64; 3] {
        let extent = |range: &RangeInclusive<i32>| {
            let (lo, hi) = (i64::from(*range.start()), i64::from(*range.end()));
            if hi < lo {
                0
            } else {
                (hi - lo + 1) as u64
            }
        };
        [extent(&self.x), extent(&self.y), extent(&self.z)]
    }

    /// Total number of points
    pub fn cell_count(&self) -> u128 {
        self.shape().iter().map(|&n| u128::from(n)).product()
    }
}

/// Tabulator limits
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TabulatorConfig {
    /// Refuse grids with more cells than this (None = no limit)
    pub max_cells: Option<usize>,
}

impl TabulatorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the maximum number of cells per grid
    pub fn with_max_cells(mut self, max_cells: usize) -> Self {
        self.max_cells = Some(max_cells);
        self
    }
}

/// Tabulation result for whichever domain was selected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Table {
    /// Checked 32-bit integer results
    Int(Grid<i32>),
    /// Floating point results
    Float(Grid<f64>),
    /// Arbitrary-precision results
    BigInteger(Grid<BigInt>),
}

impl Table {
    /// The domain the table was computed in
    pub fn kind(&self) -> DomainKind {
        match self {
            Table::Int(_) => DomainKind::CheckedInt,
            Table::Float(_) => DomainKind::Float,
            Table::BigInteger(_) => DomainKind::BigInteger,
        }
    }

    /// Extent along x, y and z
    pub fn shape(&self) -> [usize; 3] {
        match self {
            Table::Int(grid) => grid.shape(),
            Table::Float(grid) => grid.shape(),
            Table::BigInteger(grid) => grid.shape(),
        }
    }

    /// Number of undefined cells
    pub fn undefined_count(&self) -> usize {
        match self {
            Table::Int(grid) => grid.undefined_count(),
            Table::Float(grid) => grid.undefined_count(),
            Table::BigInteger(grid) => grid.undefined_count(),
        }
    }

    /// The integer grid, if this table holds one
    pub fn as_int(&self) -> Option<&Grid<i32>> {
        match self {
            Table::Int(grid) => Some(grid),
            _ => None,
        }
    }

    /// The floating point grid, if this table holds one
    pub fn as_float(&self) -> Option<&Grid<f64>> {
        match self {
            Table::Float(grid) => Some(grid),
            _ => None,
        }
    }

    /// The arbitrary-precision grid, if this table holds one
    pub fn as_big_integer(&self) -> Option<&Grid<BigInt>> {
        match self {
            Table::BigInteger(grid) => Some(grid),
            _ => None,
        }
    }

    /// Nested JSON arrays `[x][y][z]` with `null` for undefined cells.
    ///
    /// Big integers are written as decimal strings so no precision is lost;
    /// non-finite floats become `null`.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Table::Int(grid) => grid.to_json_with(|v| serde_json::Value::from(*v)),
            Table::Float(grid) => grid.to_json_with(|v| serde_json::Value::from(*v)),
            Table::BigInteger(grid) => grid.to_json_with(|v| serde_json::Value::String(v.to_string())),
        }
    }
}

/// Parses expressions and tabulates them in a chosen domain
#[derive(Debug, Clone)]
pub struct Tabulator {
    parser: ExpressionParser,
    config: TabulatorConfig,
}

impl Default for Tabulator {
    fn default() -> Self {
        Self::new()
    }
}

impl Tabulator {
    /// Tabulator using the standard precedence table
    pub fn new() -> Self {
        Self {
            parser: ExpressionParser::standard(),
            config: TabulatorConfig::default(),
        }
    }

    /// Replace the expression parser
    pub fn with_parser(mut self, parser: ExpressionParser) -> Self {
        self.parser = parser;
        self
    }

    /// Replace the limits
    pub fn with_config(mut self, config: TabulatorConfig) -> Self {
        self.config = config;
        self
    }

    /// Parse `expression` and tabulate it in the domain named by `mode`
    pub fn tabulate_mode(
        &self,
        mode: &str,
        expression: &str,
        bounds: &Bounds,
    ) -> Result<Table, TabulateError> {
        let kind: DomainKind = mode.parse()?;
        self.tabulate(kind, expression, bounds)
    }

    /// Parse `expression` and tabulate it in domain `kind`
    pub fn tabulate(
        &self,
        kind: DomainKind,
        expression: &str,
        bounds: &Bounds,
    ) -> Result<Table, TabulateError> {
        let expr = self.parser.parse(expression)?;
        Ok(match kind {
            DomainKind::CheckedInt => Table::Int(self.tabulate_with(&CheckedInt, &expr, bounds)?),
            DomainKind::Float => Table::Float(self.tabulate_with(&Float, &expr, bounds)?),
            DomainKind::BigInteger => {
                Table::BigInteger(self.tabulate_with(&BigInteger, &expr, bounds)?)
            }
        })
    }

    /// Tabulate an already parsed expression in any domain
    pub fn tabulate_with<D: Domain>(
        &self,
        domain: &D,
        expr: &Expr,
        bounds: &Bounds,
    ) -> Result<Grid<D::Value>, TabulateError> {
        let [nx, ny, nz] = self.check_size(bounds)?;
        log_debug!(
            "tabulating {} in {} domain over {}x{}x{} cells",
            expr,
            domain.name(),
            nx,
            ny,
            nz
        );

        let axis = |range: &RangeInclusive<i32>, n: usize| -> Vec<D::Value> {
            range.clone().take(n).map(|v| domain.from_int(v)).collect()
        };
        let xs = axis(&bounds.x, nx);
        let ys = axis(&bounds.y, ny);
        let zs = axis(&bounds.z, nz);

        let cells = evaluate_cells(domain, expr, &xs, &ys, &zs);
        let shape = [nx, ny, nz];
        let grid = Grid::from_cells(bounds.origin(), shape, cells).ok_or(
            TabulateError::RangeTooLarge {
                cells: bounds.cell_count(),
                limit: usize::MAX,
            },
        )?;
        log_debug!("tabulation done, {} undefined cells", grid.undefined_count());
        Ok(grid)
    }

    /// Validate the grid size and return its shape
    fn check_size(&self, bounds: &Bounds) -> Result<[usize; 3], TabulateError> {
        let cells = bounds.cell_count();
        let limit = self.config.max_cells.unwrap_or(usize::MAX);
        let [nx, ny, nz] = bounds.shape();
        let too_large = || TabulateError::RangeTooLarge { cells, limit };
        if cells > limit as u128 {
            return Err(too_large());
        }
        let axis = |n: u64| usize::try_from(n).map_err(|_| too_large());
        Ok([axis(nx)?, axis(ny)?, axis(nz)?])
    }
}

/// Values for one x-plane, `y` major and `z` minor
fn evaluate_plane<D: Domain>(
    domain: &D,
    expr: &Expr,
    x: &D::Value,
    ys: &[D::Value],
    zs: &[D::Value],
) -> Vec<Option<D::Value>> {
    let mut plane = Vec::with_capacity(ys.len() * zs.len());
    for y in ys {
        for z in zs {
            plane.push(expr.evaluate(domain, x, y, z).ok());
        }
    }
    plane
}

#[cfg(feature = "rayon")]
fn evaluate_cells<D: Domain>(
    domain: &D,
    expr: &Expr,
    xs: &[D::Value],
    ys: &[D::Value],
    zs: &[D::Value],
) -> Vec<Option<D::Value>> {
    let planes: Vec<Vec<Option<D::Value>>> = xs
        .par_iter()
        .map(|x| evaluate_plane(domain, expr, x, ys, zs))
        .collect();
    planes.into_iter().flatten().collect()
}

#[cfg(not(feature = "rayon"))]
fn evaluate_cells<D: Domain>(
    domain: &D,
    expr: &Expr,
    xs: &[D::Value],
    ys: &[D::Value],
    zs: &[D::Value],
) -> Vec<Option<D::Value>> {
    xs.iter()
        .flat_map(|x| evaluate_plane(domain, expr, x, ys, zs))
        .collect()
}

/// Tabulate `expression` in the domain named by `mode` (`"i"`, `"d"`, `"bi"`)
/// over `x1..=x2`, `y1..=y2`, `z1..=z2`
#[allow(clippy::too_many_arguments)]
pub fn tabulate(
    mode: &str,
    expression: &str,
    x1: i32,
    x2: i32,
    y1: i32,
    y2: i32,
    z1: i32,
    z2: i32,
) -> Result<Table, TabulateError> {
    Tabulator::new().tabulate_mode(mode, expression, &Bounds::new(x1..=x2, y1..=y2, z1..=z2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expression::error::SyntaxErrorKind;

    #[test]
    fn test_fault_isolation() {
        let table = tabulate("i", "1 / x", -1, 1, 0, 0, 0, 0).unwrap();
        assert_eq!(table.shape(), [3, 1, 1]);
        let grid = table.as_int().unwrap();
        assert_eq!(grid.cells(), &[Some(-1), None, Some(1)]);
    }

    #[test]
    fn test_unknown_mode() {
        assert_eq!(
            tabulate("q", "x", 0, 0, 0, 0, 0, 0),
            Err(TabulateError::UnknownDomain("q".to_string()))
        );
    }

    #[test]
    fn test_syntax_error_aborts() {
        let err = tabulate("d", "x +", 0, 5, 0, 5, 0, 5).unwrap_err();
        assert!(matches!(
            err,
            TabulateError::Syntax(ref e) if e.kind == SyntaxErrorKind::MissingArgument { found: None }
        ));
    }

    #[test]
    fn test_shape_and_order() {
        let table = tabulate("i", "100 * x + 10 * y + z", 1, 2, 3, 4, 5, 7).unwrap();
        assert_eq!(table.shape(), [2, 2, 3]);
        let grid = table.as_int().unwrap();
        assert_eq!(grid.get(0, 0, 0), Some(&135));
        assert_eq!(grid.get(1, 1, 2), Some(&247));
        assert_eq!(grid.at(2, 3, 6), Some(&236));
    }

    #[test]
    fn test_inverted_range_is_empty() {
        let table = tabulate("bi", "x", 3, 2, 0, 0, 0, 0).unwrap();
        assert_eq!(table.shape(), [0, 1, 1]);
        assert_eq!(table.undefined_count(), 0);
    }

    #[test]
    fn test_domains_differ_on_overflow() {
        let expr = "x * x * x";
        let bounds = Bounds::new(2000..=2000, 0..=0, 0..=0);
        let tabulator = Tabulator::new();
        let int = tabulator.tabulate(DomainKind::CheckedInt, expr, &bounds).unwrap();
        let big = tabulator.tabulate(DomainKind::BigInteger, expr, &bounds).unwrap();
        assert_eq!(int.undefined_count(), 1);
        assert_eq!(
            big.as_big_integer().unwrap().get(0, 0, 0),
            Some(&BigInt::from(8_000_000_000i64))
        );
    }

    #[test]
    fn test_max_cells() {
        let tabulator = Tabulator::new().with_config(TabulatorConfig::new().with_max_cells(8));
        let ok = tabulator.tabulate_mode("i", "x", &Bounds::new(0..=1, 0..=1, 0..=1));
        assert!(ok.is_ok());
        let err = tabulator
            .tabulate_mode("i", "x", &Bounds::new(0..=2, 0..=1, 0..=1))
            .unwrap_err();
        assert_eq!(err, TabulateError::RangeTooLarge { cells: 12, limit: 8 });
    }

    #[test]
    fn test_full_i32_axis_shape() {
        let bounds = Bounds::new(i32::MIN..=i32::MAX, 0..=0, 0..=0);
        assert_eq!(bounds.shape(), [1 << 32, 1, 1]);
        assert_eq!(bounds.cell_count(), 1 << 32);
    }

    #[test]
    fn test_to_json() {
        let table = tabulate("bi", "10 ** 20 / x", -1, 1, 0, 0, 0, 0).unwrap();
        assert_eq!(
            table.to_json().to_string(),
            r#"[[["-100000000000000000000"]],[[null]],[["100000000000000000000"]]]"#
        );
        let floats = tabulate("d", "x / 2", 1, 1, 0, 0, 0, 0).unwrap();
        assert_eq!(floats.to_json().to_string(), "[[[0.5]]]");
    }
}
