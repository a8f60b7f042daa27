//! Grid positions.

/// Offsets of the 3x3 block centred on a cell, the cell itself included.
const NEIGHBOURHOOD: [(i32, i32); 9] = [
    (-1, -1),
    (-1, 0),
    (-1, 1),
    (0, -1),
    (0, 0),
    (0, 1),
    (1, -1),
    (1, 0),
    (1, 1),
];

/// The coordinates of a cell on a board. Row and column are zero-based. They are signed
/// so that positions just off the edge of the board can be represented and rejected by
/// the board rather than being unrepresentable.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub struct Coordinate {
    /// Row of the cell, counted from the top.
    pub row: i32,
    /// Column of the cell, counted from the left.
    pub col: i32,
}

impl Coordinate {
    /// Construct a [`Coordinate`] from the given `row` and `col`.
    pub const fn new(row: i32, col: i32) -> Self {
        Self { row, col }
    }

    /// Get this coordinate shifted by the given number of rows and columns, or `None`
    /// if the result can't be represented.
    pub fn offset(self, rows: i32, cols: i32) -> Option<Self> {
        Some(Self::new(
            self.row.checked_add(rows)?,
            self.col.checked_add(cols)?,
        ))
    }

    /// Iterate the 3x3 block around this coordinate, including the coordinate itself.
    /// Makes no attempt to exclude cells that lie off the board, only those that can't
    /// be represented.
    pub fn neighbourhood(self) -> impl Iterator<Item = Coordinate> {
        NEIGHBOURHOOD
            .iter()
            .filter_map(move |&(rows, cols)| self.offset(rows, cols))
    }

    /// Returns true if the two coordinates are distinct and touch by an edge or a corner.
    pub fn touches(&self, other: &Coordinate) -> bool {
        let rows = (i64::from(self.row) - i64::from(other.row)).abs();
        let cols = (i64::from(self.col) - i64::from(other.col)).abs();
        self != other && rows <= 1 && cols <= 1
    }
}

impl From<(i32, i32)> for Coordinate {
    /// Construct a [`Coordinate`] from the given `(row, col)` pair.
    fn from((row, col): (i32, i32)) -> Self {
        Self::new(row, col)
    }
}

impl From<Coordinate> for (i32, i32) {
    /// Convert the [`Coordinate`] into a `(row, col)` pair.
    fn from(coord: Coordinate) -> Self {
        (coord.row, coord.col)
    }
}
