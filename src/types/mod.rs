use serde::{Deserialize, Serialize};
use std::fmt;

/// Orthogonal step offsets, in the order neighbours are scanned:
/// east, south, west, north.
pub const DIRECTIONS: [(isize, isize); 4] = [(1, 0), (0, 1), (-1, 0), (0, -1)];

/// A coordinate on the grid
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Cell {
    pub x: usize,
    pub y: usize,
}

impl Cell {
    pub const fn new(x: usize, y: usize) -> Self {
        Cell { x, y }
    }

    /// Offset by `(dx, dy)`, or `None` when it would leave the grid
    pub fn offset(self, dx: isize, dy: isize, size: GridSize) -> Option<Cell> {
        let x = self.x.checked_add_signed(dx)?;
        let y = self.y.checked_add_signed(dy)?;
        let cell = Cell::new(x, y);
        size.contains(cell).then_some(cell)
    }

    /// In-bounds orthogonal neighbours in [`DIRECTIONS`] order
    pub fn neighbors(self, size: GridSize) -> impl Iterator<Item = Cell> {
        DIRECTIONS
            .into_iter()
            .filter_map(move |(dx, dy)| self.offset(dx, dy, size))
    }

    pub fn manhattan(self, other: Cell) -> usize {
        self.x.abs_diff(other.x) + self.y.abs_diff(other.y)
    }

    pub fn is_adjacent(self, other: Cell) -> bool {
        self.manhattan(other) == 1
    }

    /// `(row, column)` index into a `height x width` array
    pub(crate) fn index(self) -> (usize, usize) {
        (self.y, self.x)
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({},{})", self.x, self.y)
    }
}

impl From<(usize, usize)> for Cell {
    fn from((x, y): (usize, usize)) -> Self {
        Cell::new(x, y)
    }
}

/// Grid dimensions
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GridSize {
    pub width: usize,
    pub height: usize,
}

impl GridSize {
    pub const fn new(width: usize, height: usize) -> Self {
        GridSize { width, height }
    }

    pub fn contains(&self, cell: Cell) -> bool {
        cell.x < self.width && cell.y < self.height
    }

    /// Number of cells, `None` if it does not fit in `usize`
    pub fn area(&self) -> Option<usize> {
        self.width.checked_mul(self.height)
    }

    /// Row-major iteration over every cell
    pub fn cells(self) -> impl Iterator<Item = Cell> {
        (0..self.height).flat_map(move |y| (0..self.width).map(move |x| Cell::new(x, y)))
    }
}

impl Default for GridSize {
    fn default() -> Self {
        GridSize::new(8, 8)
    }
}
