//! The fixed parameters of a game.

use thiserror::Error;

/// Rows and columns of the standard board.
pub const DEFAULT_BOARD_SIZE: usize = 6;

/// Ship lengths of the standard fleet, in the order they are placed.
pub const STANDARD_FLEET: [usize; 7] = [1, 1, 1, 1, 2, 2, 3];

/// Attempts made to place a single ship before the whole board is started over.
pub const MAX_PLACEMENT_ATTEMPTS: usize = 1000;

/// Reason why a set of rules was rejected.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
pub enum RulesError {
    /// The board must have at least one row and column.
    #[error("board size must be nonzero")]
    EmptyBoard,
    /// The fleet must contain at least one ship.
    #[error("the fleet must contain at least one ship")]
    EmptyFleet,
    /// A ship in the fleet has length 0.
    #[error("ship lengths must be nonzero")]
    ZeroLengthShip,
    /// A ship in the fleet is longer than the board.
    #[error("a ship of length {length} does not fit on a {size}x{size} board")]
    ShipTooLong { length: usize, size: usize },
}

/// Board size, fleet and placement budget shared by both sides.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Rules {
    size: usize,
    fleet: Vec<usize>,
    max_placement_attempts: usize,
}

impl Rules {
    /// Create rules for a square board of `size` holding ships of the given lengths.
    pub fn new(size: usize, fleet: Vec<usize>) -> Result<Self, RulesError> {
        if size == 0 {
            return Err(RulesError::EmptyBoard);
        }
        if fleet.is_empty() {
            return Err(RulesError::EmptyFleet);
        }
        for &length in &fleet {
            if length == 0 {
                return Err(RulesError::ZeroLengthShip);
            }
            if length > size {
                return Err(RulesError::ShipTooLong { length, size });
            }
        }
        Ok(Self {
            size,
            fleet,
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
        })
    }

    /// Replace the number of attempts made per ship before placement starts over.
    /// Panics if `attempts` is 0.
    pub fn with_max_placement_attempts(mut self, attempts: usize) -> Self {
        assert!(attempts > 0, "at least one placement attempt is required");
        self.max_placement_attempts = attempts;
        self
    }

    /// Number of rows and columns of each board.
    pub fn size(&self) -> usize {
        self.size
    }

    /// Lengths of the ships each side places.
    pub fn fleet(&self) -> &[usize] {
        &self.fleet
    }

    /// Attempts made per ship before the board is started over.
    pub fn max_placement_attempts(&self) -> usize {
        self.max_placement_attempts
    }

    /// Number of ships that must be sunk to win.
    pub fn fleet_size(&self) -> usize {
        self.fleet.len()
    }

    /// Number of cells covered by the whole fleet.
    pub fn total_cells(&self) -> usize {
        self.fleet.iter().sum()
    }
}

impl Default for Rules {
    /// The standard game: a 6x6 board with seven ships.
    fn default() -> Self {
        Self {
            size: DEFAULT_BOARD_SIZE,
            fleet: STANDARD_FLEET.to_vec(),
            max_placement_attempts: MAX_PLACEMENT_ATTEMPTS,
        }
    }
}
