//! Ships and the way they lie on the board.
use rand::{
    distributions::{Distribution, Standard},
    Rng,
};

use crate::board::Coordinate;

/// Direction a ship extends in from its bow.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Orientation {
    /// The ship extends along the columns of its bow's row.
    Horizontal,
    /// The ship extends along the rows of its bow's column.
    Vertical,
}

impl Orientation {
    /// Row and column step taken from one cell of the ship to the next.
    fn step(self) -> (i32, i32) {
        match self {
            Orientation::Horizontal => (0, 1),
            Orientation::Vertical => (1, 0),
        }
    }
}

impl Distribution<Orientation> for Standard {
    fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Orientation {
        if rng.gen() {
            Orientation::Horizontal
        } else {
            Orientation::Vertical
        }
    }
}

/// A straight ship of fixed length anchored at its bow.
#[derive(Debug, Clone, Eq, PartialEq)]
pub struct Ship {
    /// Number of cells the ship covers.
    length: usize,

    /// First cell of the ship.
    bow: Coordinate,

    /// Direction the remaining cells follow from the bow.
    orientation: Orientation,

    /// Hits still needed to sink the ship.
    remaining_hits: usize,
}

impl Ship {
    /// Construct an undamaged ship. Panics if `length` is 0.
    pub fn new(length: usize, bow: Coordinate, orientation: Orientation) -> Self {
        assert!(length > 0, "ships must have a nonzero length");
        Self {
            length,
            bow,
            orientation,
            remaining_hits: length,
        }
    }

    /// Get the length of this ship.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Get the bow of this ship.
    pub fn bow(&self) -> Coordinate {
        self.bow
    }

    /// Get the orientation of this ship.
    pub fn orientation(&self) -> Orientation {
        self.orientation
    }

    /// Number of hits this ship can still take before it sinks.
    pub fn remaining_hits(&self) -> usize {
        self.remaining_hits
    }

    /// Check if this ship has been sunk.
    pub fn is_sunk(&self) -> bool {
        self.remaining_hits == 0
    }

    /// Get an iterator over the cells covered by this ship, starting at the bow. Stops
    /// early if the ship runs past the range of a [`Coordinate`].
    pub fn occupied_cells(&self) -> impl Iterator<Item = Coordinate> {
        let (rows, cols) = self.orientation.step();
        (0..self.length).scan(Some(self.bow), move |next, _| {
            let cell = (*next)?;
            *next = cell.offset(rows, cols);
            Some(cell)
        })
    }

    /// Returns true if the given coordinate is one of the cells of this ship.
    pub fn is_hit_by(&self, coord: Coordinate) -> bool {
        self.occupied_cells().any(|cell| cell == coord)
    }

    /// Record one hit on this ship. Returns true if this hit sank it. Hits on an
    /// already-sunk ship are ignored.
    pub(crate) fn register_hit(&mut self) -> bool {
        match self.remaining_hits {
            0 => false,
            1 => {
                self.remaining_hits = 0;
                true
            }
            _ => {
                self.remaining_hits -= 1;
                false
            }
        }
    }
}
