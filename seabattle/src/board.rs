//! Types that make up the game board.

use std::collections::HashSet;

use enumflags2::BitFlags;
use tracing::trace;

use crate::ships::Ship;

use self::grid::Grid;
pub use self::{
    coordinate::Coordinate,
    errors::{CannotPlaceReason, CannotShootReason, PlaceError, ShotError},
    grid::Mark,
    setup::BoardSetup,
};

mod coordinate;
mod errors;
mod grid;
pub mod setup;

/// Result of a shot on a single player's board.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShotOutcome {
    /// The shot did not hit anything.
    Miss,
    /// The shot hit a ship, but did not sink it.
    Hit,
    /// The shot hit a ship and sank it.
    Sunk,
}

impl ShotOutcome {
    /// Returns true if a ship was struck, whether or not it sank.
    pub fn is_hit(self) -> bool {
        match self {
            ShotOutcome::Miss => false,
            ShotOutcome::Hit | ShotOutcome::Sunk => true,
        }
    }
}

/// Reference to a particular cell in the grid.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct CellRef {
    /// Coordinate of this cell.
    coord: Coordinate,

    /// Marks set on this cell.
    marks: BitFlags<Mark>,
}

impl CellRef {
    /// The grid coordinate of this cell.
    pub fn coord(&self) -> Coordinate {
        self.coord
    }

    /// Whether a ship occupies this cell.
    pub fn has_ship(&self) -> bool {
        self.marks.contains(Mark::Ship)
    }

    /// Whether this cell has been shot previously.
    pub fn shot(&self) -> bool {
        self.marks.contains(Mark::Shot)
    }

    /// Whether this cell was revealed as empty water next to a sunk ship.
    pub fn revealed(&self) -> bool {
        self.marks.contains(Mark::Revealed)
    }
}

/// Represents a single player's board during play, including their ships and their
/// side of the ocean.
#[derive(Debug, Clone)]
pub struct Board {
    /// Grid of cell marks, used only for display.
    grid: Grid,

    /// Ships placed on this board.
    ships: Vec<Ship>,

    /// Cells that can no longer be targeted: every shot so far plus the water revealed
    /// around sunk ships.
    shot_at: HashSet<Coordinate>,

    /// Number of ships in `ships` that have been sunk.
    sunk: usize,

    /// Whether the renderer should conceal ships that haven't been hit.
    hidden: bool,
}

impl Board {
    /// Construct a board at the start of play from a finished setup.
    fn new(grid: Grid, ships: Vec<Ship>) -> Self {
        Self {
            grid,
            ships,
            shot_at: HashSet::new(),
            sunk: 0,
            hidden: false,
        }
    }

    /// Get the number of rows (and columns) of the board.
    pub fn size(&self) -> usize {
        self.grid.size
    }

    /// Whether the renderer should conceal this board's ships.
    pub fn hidden(&self) -> bool {
        self.hidden
    }

    /// Set whether the renderer should conceal this board's ships.
    pub fn set_hidden(&mut self, hidden: bool) {
        self.hidden = hidden;
    }

    /// Get the ships on this board.
    pub fn ships(&self) -> &[Ship] {
        &self.ships
    }

    /// Number of ships sunk so far.
    pub fn sunk_count(&self) -> usize {
        self.sunk
    }

    /// Number of ships that must be sunk to defeat this board.
    pub fn fleet_size(&self) -> usize {
        self.ships.len()
    }

    /// Returns true if all of this board's ships have been sunk.
    pub fn defeated(&self) -> bool {
        self.sunk == self.fleet_size()
    }

    /// Returns true if the coordinate lies on this board.
    pub fn in_bounds(&self, coord: Coordinate) -> bool {
        self.grid.contains(&coord)
    }

    /// Returns true if the coordinate can no longer be targeted.
    pub fn is_shot(&self, coord: Coordinate) -> bool {
        self.shot_at.contains(&coord)
    }

    /// Get a reference to the cell at the given coordinate. Returns None if the
    /// coordinate is out of bounds.
    pub fn cell(&self, coord: Coordinate) -> Option<CellRef> {
        self.grid.get(&coord).map(|marks| CellRef { coord, marks })
    }

    /// Get an iterator over the rows of this board. The iterator's item is another
    /// iterator that iterates over a single row.
    pub fn iter_rows<'a>(
        &'a self,
    ) -> impl 'a + Iterator<Item = impl 'a + Iterator<Item = CellRef>> {
        let grid = &self.grid;
        grid.iter_coordinates().map(move |row| {
            row.map(move |coord| CellRef {
                coord,
                marks: grid[coord],
            })
        })
    }

    /// Fire a shot at this board, returning a result indicating why the shot was
    /// aborted or the outcome of the shot.
    pub fn shot(&mut self, coord: Coordinate) -> Result<ShotOutcome, ShotError> {
        let marks = match self.grid.get_mut(&coord) {
            None => return Err(ShotError::new(CannotShootReason::OutOfBounds, coord)),
            Some(marks) => marks,
        };
        if !self.shot_at.insert(coord) {
            return Err(ShotError::new(CannotShootReason::AlreadyShot, coord));
        }
        marks.insert(Mark::Shot);

        let struck = self.ships.iter().position(|ship| ship.is_hit_by(coord));
        let outcome = match struck {
            None => ShotOutcome::Miss,
            Some(idx) => {
                if self.ships[idx].register_hit() {
                    self.sunk += 1;
                    self.reveal_buffer(idx);
                    ShotOutcome::Sunk
                } else {
                    ShotOutcome::Hit
                }
            }
        };
        trace!(row = coord.row, col = coord.col, ?outcome, "shot resolved");
        Ok(outcome)
    }

    /// Mark the water around the ship at `idx` as revealed and rule it out as a target.
    fn reveal_buffer(&mut self, idx: usize) {
        for cell in self.ships[idx].occupied_cells() {
            for around in cell.neighbourhood() {
                if let Some(marks) = self.grid.get_mut(&around) {
                    if self.shot_at.insert(around) {
                        marks.insert(Mark::Revealed);
                    }
                }
            }
        }
    }
}
