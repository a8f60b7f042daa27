//! Defines the cell storage shared between the board's setup and playing versions.

use std::{
    convert::TryFrom,
    ops::{Index, IndexMut},
};

use enumflags2::BitFlags;

use crate::board::Coordinate;

/// Marks that can be set on a single cell. Only the renderer cares about these; the
/// rules are enforced through the board's ship list and coordinate sets.
#[derive(BitFlags, Debug, Copy, Clone, Eq, PartialEq)]
#[repr(u8)]
pub enum Mark {
    /// A ship occupies the cell.
    Ship = 0b001,
    /// A shot was fired at the cell.
    Shot = 0b010,
    /// The cell borders a sunk ship and was revealed as empty water.
    Revealed = 0b100,
}

/// Square grid of cell marks.
#[derive(Debug, Clone)]
pub(super) struct Grid {
    /// Number of rows and columns.
    pub(super) size: usize,
    /// Cells that make up this board, row by row.
    cells: Box<[BitFlags<Mark>]>,
}

impl Grid {
    pub(super) fn new(size: usize) -> Self {
        let cells = (0..size * size).map(|_| BitFlags::empty()).collect();
        Self { size, cells }
    }

    /// Returns true if the coordinate lies on this grid.
    pub(super) fn contains(&self, coord: &Coordinate) -> bool {
        self.linearize(coord).is_some()
    }

    /// Convert a coordinate to an index into `cells`, or `None` if it is off the grid.
    fn linearize(&self, coord: &Coordinate) -> Option<usize> {
        let row = usize::try_from(coord.row).ok()?;
        let col = usize::try_from(coord.col).ok()?;
        if row < self.size && col < self.size {
            Some(row * self.size + col)
        } else {
            None
        }
    }

    /// Get the marks of the cell at the given [`Coordinate`].
    pub(super) fn get(&self, coord: &Coordinate) -> Option<BitFlags<Mark>> {
        self.linearize(coord).map(|i| self.cells[i])
    }

    /// Get a mutable reference to the marks of the cell at the given [`Coordinate`].
    pub(super) fn get_mut(&mut self, coord: &Coordinate) -> Option<&mut BitFlags<Mark>> {
        self.linearize(coord).map(move |i| &mut self.cells[i])
    }

    /// Get an iterator over rows of this grid. Each row is an iterator over the
    /// coordinates of that row.
    pub(super) fn iter_coordinates(
        &self,
    ) -> impl Iterator<Item = impl Iterator<Item = Coordinate>> {
        let size = self.size as i32;
        (0..size).map(move |row| (0..size).map(move |col| Coordinate::new(row, col)))
    }
}

impl Index<Coordinate> for Grid {
    type Output = BitFlags<Mark>;

    fn index(&self, coord: Coordinate) -> &Self::Output {
        match self.linearize(&coord) {
            Some(i) => &self.cells[i],
            None => panic!("{:?} is out of bounds for a {1}x{1} grid", coord, self.size),
        }
    }
}

impl IndexMut<Coordinate> for Grid {
    fn index_mut(&mut self, coord: Coordinate) -> &mut Self::Output {
        match self.linearize(&coord) {
            Some(i) => &mut self.cells[i],
            None => panic!("{:?} is out of bounds for a {1}x{1} grid", coord, self.size),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bounds() {
        let grid = Grid::new(6);
        assert!(grid.contains(&Coordinate::new(0, 0)));
        assert!(grid.contains(&Coordinate::new(5, 5)));
        assert!(!grid.contains(&Coordinate::new(6, 0)));
        assert!(!grid.contains(&Coordinate::new(0, -1)));
        assert!(grid.get(&Coordinate::new(-1, 3)).is_none());
    }

    #[test]
    fn marks_are_per_cell() {
        let mut grid = Grid::new(3);
        grid[Coordinate::new(1, 2)].insert(Mark::Ship);
        assert!(grid[Coordinate::new(1, 2)].contains(Mark::Ship));
        assert!(grid[Coordinate::new(2, 1)].is_empty());
    }

    #[test]
    fn rows_cover_the_grid() {
        let grid = Grid::new(4);
        let rows: Vec<Vec<_>> = grid.iter_coordinates().map(|row| row.collect()).collect();
        assert_eq!(rows.len(), 4);
        assert!(rows.iter().all(|row| row.len() == 4));
        assert_eq!(rows[3][1], Coordinate::new(3, 1));
    }
}
