//! Implements the setup phase of the board.
use std::collections::HashSet;

use tracing::trace;

use crate::{
    board::{Board, CannotPlaceReason, Coordinate, Grid, Mark, PlaceError},
    ships::Ship,
};

/// Setup phase for a [`Board`]. Allows placing ships and does not allow shooting.
#[derive(Debug, Clone)]
pub struct BoardSetup {
    /// Grid for placement of ships.
    grid: Grid,

    /// Ships placed so far, in placement order.
    ships: Vec<Ship>,

    /// Every cell covered by a ship or bordering one. No further ship may use these.
    occupied_or_buffered: HashSet<Coordinate>,
}

impl BoardSetup {
    /// Begin setup by constructing an empty square board with the given number of rows
    /// and columns. Panics if `size` is 0.
    pub fn new(size: usize) -> Self {
        assert!(size > 0, "boards must have a nonzero size");
        Self {
            grid: Grid::new(size),
            ships: Vec::new(),
            occupied_or_buffered: HashSet::new(),
        }
    }

    /// Get the number of rows (and columns) of the board.
    pub fn size(&self) -> usize {
        self.grid.size
    }

    /// Get the ships placed so far.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Returns true if no ship can be placed on the given cell, either because a ship
    /// covers it or because it borders one.
    pub fn is_blocked(&self, coord: Coordinate) -> bool {
        self.occupied_or_buffered.contains(&coord)
    }

    /// Check if the given ship could be placed, without placing it.
    pub fn check_placement(&self, ship: &Ship) -> Result<(), CannotPlaceReason> {
        for cell in ship.occupied_cells() {
            if !self.grid.contains(&cell) {
                return Err(CannotPlaceReason::OutOfBounds);
            }
            if self.occupied_or_buffered.contains(&cell) {
                return Err(CannotPlaceReason::Occupied);
            }
        }
        Ok(())
    }

    /// Attempts to place the ship. Every cell must be on the board and must not be
    /// covered by or border another ship. On failure the board is left untouched and
    /// the ship is returned inside the error.
    pub fn add_ship(&mut self, ship: Ship) -> Result<(), PlaceError> {
        if let Err(reason) = self.check_placement(&ship) {
            trace!(?reason, bow = ?ship.bow(), length = ship.length(), "rejected placement");
            return Err(PlaceError::new(reason, ship));
        }
        // Already ensured that every cell is on the board and free.
        for cell in ship.occupied_cells() {
            self.grid[cell].insert(Mark::Ship);
            self.occupied_or_buffered.insert(cell);
        }
        for cell in ship.occupied_cells() {
            for around in cell.neighbourhood() {
                if self.grid.contains(&around) {
                    self.occupied_or_buffered.insert(around);
                }
            }
        }
        self.ships.push(ship);
        Ok(())
    }

    /// Finish setup and start play. The returned board has no cells shot yet.
    pub fn start(self) -> Board {
        Board::new(self.grid, self.ships)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ships::Orientation;

    fn ship(length: usize, row: i32, col: i32, orientation: Orientation) -> Ship {
        Ship::new(length, Coordinate::new(row, col), orientation)
    }

    #[test]
    fn place_marks_ship_and_buffer() {
        let mut setup = BoardSetup::new(6);
        setup
            .add_ship(ship(2, 2, 2, Orientation::Horizontal))
            .unwrap();
        assert_eq!(setup.ships().len(), 1);
        // Ship cells and their full 3x4 surroundings are blocked.
        for row in 1..=3 {
            for col in 1..=4 {
                assert!(setup.is_blocked(Coordinate::new(row, col)), "{} {}", row, col);
            }
        }
        assert!(!setup.is_blocked(Coordinate::new(0, 0)));
        assert!(!setup.is_blocked(Coordinate::new(2, 5)));
    }

    #[test]
    fn buffer_is_clamped_to_the_board() {
        let mut setup = BoardSetup::new(6);
        setup.add_ship(ship(1, 0, 0, Orientation::Vertical)).unwrap();
        assert!(!setup.is_blocked(Coordinate::new(-1, -1)));
        assert_eq!(setup.occupied_or_buffered.len(), 4);
    }

    #[test]
    fn out_of_bounds_leaves_board_untouched() {
        let mut setup = BoardSetup::new(6);
        let err = setup
            .add_ship(ship(3, 0, 4, Orientation::Horizontal))
            .unwrap_err();
        assert_eq!(err.reason(), CannotPlaceReason::OutOfBounds);
        assert_eq!(err.into_ship().bow(), Coordinate::new(0, 4));
        assert!(setup.ships().is_empty());
        assert!(setup.occupied_or_buffered.is_empty());
        assert!(setup.grid[Coordinate::new(0, 4)].is_empty());
    }

    #[test]
    fn ship_at_the_integer_limit_is_out_of_bounds() {
        let mut setup = BoardSetup::new(6);
        for &(row, col, orientation) in &[
            (i32::MAX, 0, Orientation::Vertical),
            (0, i32::MAX, Orientation::Horizontal),
            (i32::MIN, i32::MIN, Orientation::Vertical),
        ] {
            let err = setup.add_ship(ship(3, row, col, orientation)).unwrap_err();
            assert_eq!(err.reason(), CannotPlaceReason::OutOfBounds);
        }
        assert!(setup.occupied_or_buffered.is_empty());
    }

    #[test]
    fn touching_diagonally_is_rejected() {
        let mut setup = BoardSetup::new(6);
        setup.add_ship(ship(1, 2, 2, Orientation::Vertical)).unwrap();
        let err = setup
            .add_ship(ship(2, 3, 3, Orientation::Vertical))
            .unwrap_err();
        assert_eq!(err.reason(), CannotPlaceReason::Occupied);
        assert_eq!(err.ship().length(), 2);
        assert_eq!(setup.ships().len(), 1);
        assert!(setup.grid[Coordinate::new(4, 3)].is_empty());
    }

    #[test]
    fn one_cell_gap_is_allowed() {
        let mut setup = BoardSetup::new(6);
        setup.add_ship(ship(3, 0, 0, Orientation::Horizontal)).unwrap();
        setup.add_ship(ship(3, 2, 0, Orientation::Horizontal)).unwrap();
        assert_eq!(setup.ships().len(), 2);
    }

    #[test]
    fn start_keeps_ships_and_clears_shots() {
        let mut setup = BoardSetup::new(6);
        setup.add_ship(ship(2, 4, 1, Orientation::Horizontal)).unwrap();
        let board = setup.start();
        assert_eq!(board.fleet_size(), 1);
        assert_eq!(board.sunk_count(), 0);
        assert!(!board.is_shot(Coordinate::new(4, 1)));
    }
}
