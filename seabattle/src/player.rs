//! The two kinds of player and the shared logic for taking a shot.
use std::io;

use rand::Rng;

use crate::{
    board::{Board, Coordinate, ShotOutcome},
    game::{GameError, Presenter, Side},
};

/// Source of targets for a human player, such as a console prompt. Implementations must
/// return two integers translated to zero-based board coordinates; whether they are on
/// the board is checked by the board itself.
pub trait TargetInput {
    /// Block until the next target is available. `size` is the size of the board being
    /// targeted.
    fn read_target(&mut self, size: usize) -> io::Result<Coordinate>;
}

impl<T: TargetInput + ?Sized> TargetInput for &mut T {
    fn read_target(&mut self, size: usize) -> io::Result<Coordinate> {
        (**self).read_target(size)
    }
}

/// Capability of choosing where to shoot next.
pub trait ChooseTarget {
    /// Choose a target on a board of the given size.
    fn choose_target(&mut self, size: usize) -> Result<Coordinate, GameError>;

    /// Shoot at the opponent's board until a shot lands. Targets that are off the board
    /// or already shot are reported to the presenter and a new target is chosen.
    fn make_move<P: Presenter + ?Sized>(
        &mut self,
        side: Side,
        target_board: &mut Board,
        presenter: &mut P,
    ) -> Result<(Coordinate, ShotOutcome), GameError> {
        loop {
            let target = self.choose_target(target_board.size())?;
            presenter.target_chosen(side, target);
            match target_board.shot(target) {
                Ok(outcome) => return Ok((target, outcome)),
                Err(err) => presenter.shot_rejected(side, &err),
            }
        }
    }
}

/// Player driven by a person through a [`TargetInput`].
#[derive(Debug)]
pub struct HumanPlayer<I> {
    input: I,
}

impl<I: TargetInput> HumanPlayer<I> {
    /// Create a human player that reads targets from `input`.
    pub fn new(input: I) -> Self {
        Self { input }
    }

    /// Get the input this player reads from.
    pub fn input(&self) -> &I {
        &self.input
    }

    /// Extract the input from this player.
    pub fn into_input(self) -> I {
        self.input
    }
}

impl<I: TargetInput> ChooseTarget for HumanPlayer<I> {
    fn choose_target(&mut self, size: usize) -> Result<Coordinate, GameError> {
        Ok(self.input.read_target(size)?)
    }
}

/// Player that shoots uniformly at random over the whole board. It keeps no memory of
/// earlier shots, so it may pick a cell that was already shot and have to pick again.
#[derive(Debug)]
pub struct AutomatedPlayer<R> {
    rng: R,
}

impl<R: Rng> AutomatedPlayer<R> {
    /// Create an automated player drawing its targets from `rng`.
    pub fn new(rng: R) -> Self {
        Self { rng }
    }
}

impl<R: Rng> ChooseTarget for AutomatedPlayer<R> {
    fn choose_target(&mut self, size: usize) -> Result<Coordinate, GameError> {
        let size = size as i32;
        Ok(Coordinate::new(
            self.rng.gen_range(0, size),
            self.rng.gen_range(0, size),
        ))
    }
}

/// Either kind of player.
#[derive(Debug)]
pub enum Player<I, R> {
    /// Targets are supplied by a person.
    Human(HumanPlayer<I>),
    /// Targets are drawn at random.
    Automated(AutomatedPlayer<R>),
}

impl<I: TargetInput, R: Rng> Player<I, R> {
    /// Create a human player reading from `input`.
    pub fn human(input: I) -> Self {
        Player::Human(HumanPlayer::new(input))
    }

    /// Create an automated player drawing from `rng`.
    pub fn automated(rng: R) -> Self {
        Player::Automated(AutomatedPlayer::new(rng))
    }

    /// Returns true if this player is driven by a person.
    pub fn is_human(&self) -> bool {
        match self {
            Player::Human(_) => true,
            Player::Automated(_) => false,
        }
    }
}

impl<I: TargetInput, R: Rng> ChooseTarget for Player<I, R> {
    fn choose_target(&mut self, size: usize) -> Result<Coordinate, GameError> {
        match self {
            Player::Human(player) => player.choose_target(size),
            Player::Automated(player) => player.choose_target(size),
        }
    }
}
