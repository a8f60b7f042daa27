//! Random fleet placement by rejection sampling.
//!
//! Each ship gets a bounded number of random positions to try. If one ship runs out of
//! attempts, the board built so far is thrown away and placement starts over from an
//! empty board, as many times as it takes.

use rand::Rng;
use thiserror::Error;
use tracing::debug;

use crate::{
    board::{Board, BoardSetup, Coordinate},
    rules::Rules,
    ships::{Orientation, Ship},
};

/// Error returned when a ship could not be placed within its attempt budget.
#[derive(Debug, Error, Copy, Clone, Eq, PartialEq)]
#[error("no room found for a ship of length {length} after {attempts} attempts")]
pub struct PlacementExhausted {
    /// Length of the ship that could not be placed.
    length: usize,
    /// Number of positions that were tried.
    attempts: usize,
}

impl PlacementExhausted {
    /// Length of the ship that could not be placed.
    pub fn length(&self) -> usize {
        self.length
    }

    /// Number of positions that were tried.
    pub fn attempts(&self) -> usize {
        self.attempts
    }
}

/// Pick a uniformly random bow and orientation for a ship of the given length.
pub fn random_ship<R: Rng + ?Sized>(rng: &mut R, size: usize, length: usize) -> Ship {
    let size = size as i32;
    let bow = Coordinate::new(rng.gen_range(0, size), rng.gen_range(0, size));
    let orientation: Orientation = rng.gen();
    Ship::new(length, bow, orientation)
}

/// Make one attempt at placing the whole fleet on an empty board. Fails as soon as any
/// single ship exhausts its attempts.
pub fn try_place_fleet<R: Rng + ?Sized>(
    rules: &Rules,
    rng: &mut R,
) -> Result<BoardSetup, PlacementExhausted> {
    let mut setup = BoardSetup::new(rules.size());
    for &length in rules.fleet() {
        place_one(&mut setup, rules.max_placement_attempts(), length, rng)?;
    }
    Ok(setup)
}

/// Place a single ship of the given length, trying up to `attempts` random positions.
fn place_one<R: Rng + ?Sized>(
    setup: &mut BoardSetup,
    attempts: usize,
    length: usize,
    rng: &mut R,
) -> Result<(), PlacementExhausted> {
    for _ in 0..attempts {
        let candidate = random_ship(rng, setup.size(), length);
        if setup.add_ship(candidate).is_ok() {
            return Ok(());
        }
    }
    Err(PlacementExhausted { length, attempts })
}

/// Generate a fully placed board ready for play, starting over from an empty board
/// until the whole fleet fits.
///
/// Never returns if the fleet cannot fit on the board at all.
pub fn random_board<R: Rng + ?Sized>(rules: &Rules, rng: &mut R) -> Board {
    let mut restarts = 0usize;
    loop {
        match try_place_fleet(rules, rng) {
            Ok(setup) => {
                debug!(restarts, "fleet placed");
                return setup.start();
            }
            Err(err) => {
                restarts += 1;
                debug!(%err, restarts, "starting placement over");
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    #[test]
    fn random_ships_have_bows_on_the_board() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let ship = random_ship(&mut rng, 6, 2);
            let bow = ship.bow();
            assert!((0..6).contains(&bow.row) && (0..6).contains(&bow.col));
            assert_eq!(ship.length(), 2);
        }
    }

    #[test]
    fn standard_board_holds_full_fleet() {
        let rules = Rules::default();
        let mut rng = StdRng::seed_from_u64(1);
        let board = random_board(&rules, &mut rng);
        assert_eq!(board.ships().len(), 7);
        let cells: usize = board.ships().iter().map(|ship| ship.length()).sum();
        assert_eq!(cells, rules.total_cells());
        assert_eq!(cells, 11);
        assert_eq!(board.sunk_count(), 0);
        assert!(board.iter_rows().flatten().all(|cell| !cell.shot()));
    }

    #[test]
    fn impossible_fleet_exhausts() {
        // Two single ships can never share a 1x1 board.
        let rules = Rules::new(1, vec![1, 1])
            .unwrap()
            .with_max_placement_attempts(5);
        let mut rng = StdRng::seed_from_u64(3);
        let err = try_place_fleet(&rules, &mut rng).unwrap_err();
        assert_eq!(err.length(), 1);
        assert_eq!(err.attempts(), 5);
    }

    #[test]
    fn same_seed_same_board() {
        let rules = Rules::default();
        let a = random_board(&rules, &mut StdRng::seed_from_u64(99));
        let b = random_board(&rules, &mut StdRng::seed_from_u64(99));
        assert_eq!(a.ships(), b.ships());
    }
}
