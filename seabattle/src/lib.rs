//! Sea battle on a small square board against a computer opponent.
//!
//! Each side's fleet is placed at random by [`placement::random_board`], with the rule
//! that ships never touch, not even at a corner. Sides then take turns shooting at each
//! other's [`Board`](board::Board); hitting a ship earns another shot, and the first side
//! to sink the whole opposing fleet wins. The [`game::Game`] controller drives the turns
//! and reports everything through a [`game::Presenter`], so this crate performs no I/O
//! of its own.

pub mod board;
pub mod game;
pub mod placement;
pub mod player;
pub mod rules;
pub mod ships;

pub use crate::{
    board::{Board, BoardSetup, Coordinate, ShotOutcome},
    game::{Game, GameError, Presenter, Side, Turn},
    player::{AutomatedPlayer, ChooseTarget, HumanPlayer, Player, TargetInput},
    rules::Rules,
    ships::{Orientation, Ship},
};
