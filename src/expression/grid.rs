//! Dense 3-D result grids
//!
//! Cells are stored row-major with `x` outermost and `z` innermost. A cell
//! holds `Some(value)`, or `None` when evaluation failed at that point.

use serde::{Deserialize, Serialize};

/// Dense grid of evaluation results over an integer box
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawGrid<T>")]
#[serde(bound(deserialize = "T: Deserialize<'de>"))]
pub struct Grid<T> {
    origin: [i32; 3],
    shape: [usize; 3],
    cells: Vec<Option<T>>,
}

/// Unchecked serialized form of a [`Grid`]
#[derive(Deserialize)]
struct RawGrid<T> {
    origin: [i32; 3],
    shape: [usize; 3],
    cells: Vec<Option<T>>,
}

impl<T> TryFrom<RawGrid<T>> for Grid<T> {
    type Error = String;

    fn try_from(raw: RawGrid<T>) -> Result<Self, Self::Error> {
        let [nx, ny, nz] = raw.shape;
        let len = raw.cells.len();
        Grid::from_cells(raw.origin, raw.shape, raw.cells)
            .ok_or_else(|| format!("grid of shape {}x{}x{} cannot hold {} cells", nx, ny, nz, len))
    }
}

impl<T> Grid<T> {
    /// Assemble a grid from cells in row-major order.
    ///
    /// Returns `None` when the cell count does not match the shape.
    pub fn from_cells(origin: [i32; 3], shape: [usize; 3], cells: Vec<Option<T>>) -> Option<Self> {
        let expected = shape[0].checked_mul(shape[1])?.checked_mul(shape[2])?;
        (cells.len() == expected).then_some(Self {
            origin,
            shape,
            cells,
        })
    }

    /// Lowest `(x, y, z)` coordinate covered
    pub fn origin(&self) -> [i32; 3] {
        self.origin
    }

    /// Extent along x, y and z
    pub fn shape(&self) -> [usize; 3] {
        self.shape
    }

    /// Total number of cells
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Does the grid have no cells?
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }

    fn index(&self, i: usize, j: usize, k: usize) -> Option<usize> {
        let [nx, ny, nz] = self.shape;
        (i < nx && j < ny && k < nz).then(|| (i * ny + j) * nz + k)
    }

    /// Cell at offsets `(i, j, k)` from the origin.
    ///
    /// The outer `None` means out of bounds; the inner `None` is an
    /// undefined cell.
    pub fn cell(&self, i: usize, j: usize, k: usize) -> Option<&Option<T>> {
        self.index(i, j, k).map(|index| &self.cells[index])
    }

    /// Value at offsets `(i, j, k)`, `None` if undefined or out of bounds
    pub fn get(&self, i: usize, j: usize, k: usize) -> Option<&T> {
        self.cell(i, j, k).and_then(Option::as_ref)
    }

    /// Value at absolute coordinates `(x, y, z)`
    pub fn at(&self, x: i32, y: i32, z: i32) -> Option<&T> {
        let offset = |value: i32, origin: i32| usize::try_from(i64::from(value) - i64::from(origin)).ok();
        self.get(
            offset(x, self.origin[0])?,
            offset(y, self.origin[1])?,
            offset(z, self.origin[2])?,
        )
    }

    /// All cells in row-major order
    pub fn cells(&self) -> &[Option<T>] {
        &self.cells
    }

    /// Cells with their absolute `(x, y, z)` coordinates
    pub fn iter(&self) -> impl Iterator<Item = ([i32; 3], Option<&T>)> + '_ {
        let [_, ny, nz] = self.shape;
        self.cells.iter().enumerate().map(move |(index, cell)| {
            let k = index % nz;
            let j = (index / nz) % ny;
            let i = index / (ny * nz);
            let coord = |origin: i32, offset: usize| (i64::from(origin) + offset as i64) as i32;
            (
                [
                    coord(self.origin[0], i),
                    coord(self.origin[1], j),
                    coord(self.origin[2], k),
                ],
                cell.as_ref(),
            )
        })
    }

    /// Number of undefined cells
    pub fn undefined_count(&self) -> usize {
        self.cells.iter().filter(|cell| cell.is_none()).count()
    }

    /// Transform every defined value
    pub fn map<U>(&self, mut f: impl FnMut(&T) -> U) -> Grid<U> {
        Grid {
            origin: self.origin,
            shape: self.shape,
            cells: self.cells.iter().map(|cell| cell.as_ref().map(&mut f)).collect(),
        }
    }

    /// Nested JSON arrays `[x][y][z]`, `null` for undefined cells
    pub fn to_json_with(&self, mut f: impl FnMut(&T) -> serde_json::Value) -> serde_json::Value {
        let [nx, ny, nz] = self.shape;
        let mut cells = self.cells.iter();
        let mut next = || match cells.next() {
            Some(Some(value)) => f(value),
            _ => serde_json::Value::Null,
        };
        serde_json::Value::Array(
            (0..nx)
                .map(|_| {
                    serde_json::Value::Array(
                        (0..ny)
                            .map(|_| serde_json::Value::Array((0..nz).map(|_| next()).collect()))
                            .collect(),
                    )
                })
                .collect(),
        )
    }
}

impl<T: Clone> Grid<T> {
    /// Copy into nested vectors indexed `[i][j][k]`
    pub fn to_nested(&self) -> Vec<Vec<Vec<Option<T>>>> {
        let [nx, ny, nz] = self.shape;
        (0..nx)
            .map(|i| {
                (0..ny)
                    .map(|j| {
                        let start = (i * ny + j) * nz;
                        self.cells[start..start + nz].to_vec()
                    })
                    .collect()
            })
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Grid<i32> {
        // x in -1..=0, y in 0..=1, z in 5..=5
        Grid::from_cells([-1, 0, 5], [2, 2, 1], vec![Some(1), None, Some(3), Some(4)]).unwrap()
    }

    #[test]
    fn test_from_cells_checks_shape() {
        assert!(Grid::<i32>::from_cells([0, 0, 0], [2, 2, 2], vec![None; 7]).is_none());
        assert!(Grid::<i32>::from_cells([0, 0, 0], [0, 3, 3], vec![]).is_some());
    }

    #[test]
    fn test_indexing() {
        let grid = sample();
        assert_eq!(grid.get(0, 0, 0), Some(&1));
        assert_eq!(grid.get(0, 1, 0), None);
        assert_eq!(grid.cell(0, 1, 0), Some(&None));
        assert_eq!(grid.cell(2, 0, 0), None);
        assert_eq!(grid.at(0, 1, 5), Some(&4));
        assert_eq!(grid.at(-2, 0, 5), None);
        assert_eq!(grid.undefined_count(), 1);
        assert_eq!(grid.len(), 4);
    }

    #[test]
    fn test_iter_coordinates() {
        let coords: Vec<[i32; 3]> = sample().iter().map(|(c, _)| c).collect();
        assert_eq!(coords, vec![[-1, 0, 5], [-1, 1, 5], [0, 0, 5], [0, 1, 5]]);
    }

    #[test]
    fn test_to_nested() {
        let nested = sample().to_nested();
        assert_eq!(nested, vec![vec![vec![Some(1)], vec![None]], vec![vec![Some(3)], vec![Some(4)]]]);
    }

    #[test]
    fn test_to_json_with() {
        let json = sample().to_json_with(|v| serde_json::json!(v));
        assert_eq!(json.to_string(), "[[[1],[null]],[[3],[4]]]");
    }

    #[test]
    fn test_deserialize_checks_shape() {
        let json = r#"{"origin":[0,0,0],"shape":[2,1,1],"cells":[1]}"#;
        let err = serde_json::from_str::<Grid<i32>>(json).unwrap_err();
        assert!(err.to_string().contains("cannot hold 1 cells"));

        let json = r#"{"origin":[0,0,0],"shape":[2,1,1],"cells":[1,null]}"#;
        let grid: Grid<i32> = serde_json::from_str(json).unwrap();
        assert_eq!(grid.get(0, 0, 0), Some(&1));
        assert_eq!(grid.get(1, 0, 0), None);
    }

    #[test]
    fn test_serde_round_trip() {
        let json = serde_json::to_string(&sample()).unwrap();
        assert_eq!(serde_json::from_str::<Grid<i32>>(&json).unwrap(), sample());
    }

    #[test]
    fn test_map() {
        let doubled = sample().map(|v| v * 2);
        assert_eq!(doubled.get(1, 1, 0), Some(&8));
        assert_eq!(doubled.undefined_count(), 1);
    }
}
