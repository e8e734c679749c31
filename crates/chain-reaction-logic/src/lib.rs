//! Pure simulation logic for Chain Reaction.
//!
//! This crate contains the rules of the game with no rendering, input or
//! timing attached. A presentation layer submits `(row, column, player)`
//! moves to a [`game::Match`] and reads back boards, per-wave snapshots,
//! the next player and the winner.
//!
//! # Module Overview
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`board`] | Cell grid, position-derived capacities, neighbors |
//! | [`config`] | Match setup parameters, player identities, validation |
//! | [`error`] | Setup, move and engine error types |
//! | [`explosion`] | Explosion waves, resumable cascades, perpetual-cascade detection |
//! | [`game`] | `Match` aggregate and the move controller state machine |
//! | [`turn`] | Turn order, elimination and winner detection |

pub mod board;
pub mod config;
pub mod error;
pub mod explosion;
pub mod game;
pub mod turn;

pub use board::{Board, Cell, Coord, PlayerId};
pub use config::{MatchConfig, PlayerIdentity};
pub use error::{BoardError, EngineError, MoveError, SetupError};
pub use game::{Match, MoveResult, Phase, WaveOutcome};
