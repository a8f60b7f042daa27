//! The turn controller: two boards, two players, and the rule that a hit earns another
//! shot.
use std::io;

use rand::Rng;
use thiserror::Error;
use tracing::{debug, info};

use crate::{
    board::{Board, Coordinate, ShotError, ShotOutcome},
    placement,
    player::{ChooseTarget, Player, TargetInput},
    rules::Rules,
};

/// One of the two sides of the game.
#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash)]
pub enum Side {
    /// The side played by a person.
    Human,
    /// The side played by the computer.
    Computer,
}

impl Side {
    /// Get the opponent of this side.
    pub fn opponent(self) -> Self {
        match self {
            Side::Human => Side::Computer,
            Side::Computer => Side::Human,
        }
    }

    /// Index of this side in per-side arrays.
    fn index(self) -> usize {
        match self {
            Side::Human => 0,
            Side::Computer => 1,
        }
    }
}

/// Errors that end a game early.
#[derive(Debug, Error)]
pub enum GameError {
    /// The human player's input could not be read.
    #[error("failed to read a target")]
    Input(#[from] io::Error),

    /// A turn was requested after one side had already won.
    #[error("the game is already over")]
    AlreadyOver,
}

/// Receives everything that happens during a game so it can be shown to the players.
/// All methods default to doing nothing.
pub trait Presenter {
    /// A new turn is about to be taken by `side`.
    fn turn_started(&mut self, _side: Side, _human_board: &Board, _computer_board: &Board) {}

    /// `side` picked `target` as its next shot.
    fn target_chosen(&mut self, _side: Side, _target: Coordinate) {}

    /// A target picked by `side` could not be shot, and it must pick again.
    fn shot_rejected(&mut self, _side: Side, _err: &ShotError) {}

    /// A shot by `side` landed.
    fn shot_resolved(&mut self, _side: Side, _target: Coordinate, _outcome: ShotOutcome) {}

    /// The game ended with `winner` sinking the whole of its opponent's fleet.
    fn game_over(&mut self, _winner: Side, _human_board: &Board, _computer_board: &Board) {}
}

impl Presenter for () {}

impl<T: Presenter + ?Sized> Presenter for &mut T {
    fn turn_started(&mut self, side: Side, human_board: &Board, computer_board: &Board) {
        (**self).turn_started(side, human_board, computer_board)
    }

    fn target_chosen(&mut self, side: Side, target: Coordinate) {
        (**self).target_chosen(side, target)
    }

    fn shot_rejected(&mut self, side: Side, err: &ShotError) {
        (**self).shot_rejected(side, err)
    }

    fn shot_resolved(&mut self, side: Side, target: Coordinate, outcome: ShotOutcome) {
        (**self).shot_resolved(side, target, outcome)
    }

    fn game_over(&mut self, winner: Side, human_board: &Board, computer_board: &Board) {
        (**self).game_over(winner, human_board, computer_board)
    }
}

/// Record of one completed move.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub struct Turn {
    /// Side that fired.
    pub side: Side,
    /// Cell that was shot.
    pub target: Coordinate,
    /// What the shot did.
    pub outcome: ShotOutcome,
    /// Whether `side` fires again next.
    pub extra_turn: bool,
}

/// A game in progress between a human side and a computer side.
pub struct Game<I, R> {
    /// Boards indexed by the side that owns them.
    boards: [Board; 2],

    /// Players indexed by side.
    players: [Player<I, R>; 2],

    /// Counter of turns taken. Does not advance on a hit.
    turn: usize,

    /// Side that fires while `turn` is even.
    first: Side,

    /// Set once one side's fleet is destroyed.
    winner: Option<Side>,
}

impl<I: TargetInput, R: Rng> Game<I, R> {
    /// Create a game from already-placed boards and a player for each side. `first`
    /// takes the first shot.
    pub fn new(
        human_board: Board,
        computer_board: Board,
        human: Player<I, R>,
        computer: Player<I, R>,
        first: Side,
    ) -> Self {
        Self {
            boards: [human_board, computer_board],
            players: [human, computer],
            turn: 0,
            first,
            winner: None,
        }
    }

    /// Create the standard pairing: a person reading targets from `input` against an
    /// automated player. Both boards are placed at random from `rng`, which then drives
    /// the automated player. The computer's board is hidden.
    pub fn random(rules: &Rules, first: Side, input: I, mut rng: R) -> Self {
        let human_board = placement::random_board(rules, &mut rng);
        let mut computer_board = placement::random_board(rules, &mut rng);
        computer_board.set_hidden(true);
        info!(size = rules.size(), ships = rules.fleet_size(), "boards placed");
        Self::new(
            human_board,
            computer_board,
            Player::human(input),
            Player::automated(rng),
            first,
        )
    }

    /// Get the side whose turn it currently is.
    pub fn current(&self) -> Side {
        if self.turn % 2 == 0 {
            self.first
        } else {
            self.first.opponent()
        }
    }

    /// Get the status of the game. Returns `None` if the game is in progress, otherwise
    /// returns the winner.
    pub fn winner(&self) -> Option<Side> {
        self.winner
    }

    /// Get the board owned by the given side.
    pub fn board(&self, side: Side) -> &Board {
        &self.boards[side.index()]
    }

    /// Number of turns that have advanced so far, not counting extra turns.
    pub fn turn_index(&self) -> usize {
        self.turn
    }

    /// Let the current side take one move. A hit or a sinking keeps the turn with the
    /// same side; a miss passes it to the opponent.
    pub fn step<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Result<Turn, GameError> {
        if self.winner.is_some() {
            return Err(GameError::AlreadyOver);
        }
        let side = self.current();
        presenter.turn_started(side, &self.boards[0], &self.boards[1]);

        let target_board = &mut self.boards[side.opponent().index()];
        let (target, outcome) =
            self.players[side.index()].make_move(side, target_board, presenter)?;
        presenter.shot_resolved(side, target, outcome);

        let extra_turn = outcome.is_hit();
        if !extra_turn {
            self.turn += 1;
        }
        debug!(
            ?side,
            row = target.row,
            col = target.col,
            ?outcome,
            extra_turn,
            "move taken"
        );

        if let Some(winner) = self.check_winner() {
            self.winner = Some(winner);
            info!(?winner, "fleet destroyed");
            presenter.game_over(winner, &self.boards[0], &self.boards[1]);
        }
        Ok(Turn {
            side,
            target,
            outcome,
            extra_turn,
        })
    }

    /// Play until one side's fleet is destroyed and return the winner.
    pub fn run<P: Presenter + ?Sized>(&mut self, presenter: &mut P) -> Result<Side, GameError> {
        loop {
            self.step(presenter)?;
            if let Some(winner) = self.winner {
                return Ok(winner);
            }
        }
    }

    /// The side whose opponent has no ships left, if any.
    fn check_winner(&self) -> Option<Side> {
        if self.board(Side::Computer).defeated() {
            Some(Side::Human)
        } else if self.board(Side::Human).defeated() {
            Some(Side::Computer)
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        board::BoardSetup,
        ships::{Orientation, Ship},
    };
    use rand::{rngs::StdRng, SeedableRng};
    use std::collections::VecDeque;

    struct Script(VecDeque<Coordinate>);

    impl Script {
        fn new(targets: &[(i32, i32)]) -> Self {
            Script(targets.iter().map(|&pair| Coordinate::from(pair)).collect())
        }
    }

    impl TargetInput for Script {
        fn read_target(&mut self, _size: usize) -> io::Result<Coordinate> {
            self.0
                .pop_front()
                .ok_or_else(|| io::Error::from(io::ErrorKind::UnexpectedEof))
        }
    }

    fn board_with(ships: &[(usize, i32, i32, Orientation)]) -> Board {
        let mut setup = BoardSetup::new(6);
        for &(length, row, col, orientation) in ships {
            setup
                .add_ship(Ship::new(length, Coordinate::new(row, col), orientation))
                .unwrap();
        }
        setup.start()
    }

    fn scripted_game(human: &[(i32, i32)], computer: &[(i32, i32)]) -> Game<Script, StdRng> {
        Game::new(
            board_with(&[(1, 5, 5, Orientation::Horizontal)]),
            board_with(&[
                (1, 2, 2, Orientation::Horizontal),
                (2, 0, 4, Orientation::Vertical),
            ]),
            Player::human(Script::new(human)),
            Player::human(Script::new(computer)),
            Side::Human,
        )
    }

    #[test]
    fn side_opponents() {
        assert_eq!(Side::Human.opponent(), Side::Computer);
        assert_eq!(Side::Computer.opponent(), Side::Human);
    }

    #[test]
    fn miss_passes_the_turn() {
        let mut game = scripted_game(&[(0, 0)], &[(0, 0)]);
        let turn = game.step(&mut ()).unwrap();
        assert_eq!(turn.side, Side::Human);
        assert_eq!(turn.outcome, ShotOutcome::Miss);
        assert!(!turn.extra_turn);
        assert_eq!(game.current(), Side::Computer);
        assert_eq!(game.step(&mut ()).unwrap().side, Side::Computer);
        assert_eq!(game.current(), Side::Human);
    }

    #[test]
    fn hit_and_sunk_keep_the_turn() {
        let mut game = scripted_game(&[(0, 4), (1, 4), (2, 2)], &[]);
        let turn = game.step(&mut ()).unwrap();
        assert_eq!(turn.outcome, ShotOutcome::Hit);
        assert!(turn.extra_turn);
        assert_eq!(game.current(), Side::Human);

        let turn = game.step(&mut ()).unwrap();
        assert_eq!(turn.outcome, ShotOutcome::Sunk);
        assert_eq!(game.current(), Side::Human);
        assert_eq!(game.turn_index(), 0);
        assert_eq!(game.winner(), None);

        let turn = game.step(&mut ()).unwrap();
        assert_eq!(turn.outcome, ShotOutcome::Sunk);
        assert_eq!(game.winner(), Some(Side::Human));
        assert!(game.board(Side::Computer).defeated());
    }

    #[test]
    fn no_moves_after_the_game_ends() {
        let mut game = Game::new(
            board_with(&[(1, 0, 0, Orientation::Horizontal)]),
            board_with(&[(1, 2, 2, Orientation::Horizontal)]),
            Player::<Script, StdRng>::human(Script::new(&[(2, 2)])),
            Player::human(Script::new(&[])),
            Side::Human,
        );
        assert_eq!(game.run(&mut ()).unwrap(), Side::Human);
        assert!(matches!(game.step(&mut ()), Err(GameError::AlreadyOver)));
    }

    #[test]
    fn computer_may_go_first() {
        let mut game = Game::new(
            board_with(&[(1, 3, 3, Orientation::Horizontal)]),
            board_with(&[(1, 2, 2, Orientation::Horizontal)]),
            Player::<Script, StdRng>::human(Script::new(&[])),
            Player::human(Script::new(&[(0, 0), (3, 3)])),
            Side::Computer,
        );
        assert_eq!(game.current(), Side::Computer);
        let turn = game.step(&mut ()).unwrap();
        assert_eq!(turn.side, Side::Computer);
        assert_eq!(game.current(), Side::Human);
    }

    #[test]
    fn random_game_runs_to_completion() {
        let mut game: Game<Script, StdRng> = Game {
            boards: {
                let rules = Rules::default();
                let mut rng = StdRng::seed_from_u64(21);
                [
                    placement::random_board(&rules, &mut rng),
                    placement::random_board(&rules, &mut rng),
                ]
            },
            players: [
                Player::automated(StdRng::seed_from_u64(1)),
                Player::automated(StdRng::seed_from_u64(2)),
            ],
            turn: 0,
            first: Side::Human,
            winner: None,
        };
        let winner = game.run(&mut ()).unwrap();
        assert!(game.board(winner.opponent()).defeated());
        assert!(!game.board(winner).defeated());
        assert_eq!(game.board(winner.opponent()).sunk_count(), 7);
    }
}
