//! Error types for match setup, move submission and engine defects.

use crate::board::{Coord, PlayerId};
use crate::config::ConfigError;

/// Board construction failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BoardError {
    /// Either extent is below 2, so corner/edge/interior capacities are undefined.
    InvalidDimensions { rows: usize, columns: usize },
}

impl std::fmt::Display for BoardError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BoardError::InvalidDimensions { rows, columns } => write!(
                f,
                "invalid board dimensions {}x{}: both must be at least 2",
                rows, columns
            ),
        }
    }
}

impl std::error::Error for BoardError {}

/// Internal logic defect. Never expected under correct use.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EngineError {
    /// An explosion tried to remove more atoms than the cell held.
    AtomUnderflow { at: Coord },
    /// A cell is owned while empty, or holds atoms without an owner.
    OwnershipMismatch {
        at: Coord,
        atoms: u32,
        owner: Option<PlayerId>,
    },
    /// Every player is eliminated and nobody won.
    AllEliminated,
}

impl std::fmt::Display for EngineError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EngineError::AtomUnderflow { at } => {
                write!(f, "atom count underflow at {}", at)
            }
            EngineError::OwnershipMismatch { at, atoms, owner } => write!(
                f,
                "ownership mismatch at {}: {} atoms, owner {:?}",
                at, atoms, owner
            ),
            EngineError::AllEliminated => write!(f, "all players eliminated with no winner"),
        }
    }
}

impl std::error::Error for EngineError {}

/// A rejected move. Every variant except `Engine` leaves the match untouched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MoveError {
    /// Target is not on the board.
    OutOfBounds { row: usize, col: usize },
    /// Target cell belongs to another player.
    CellContested { at: Coord, owner: PlayerId },
    /// Submitted by someone other than the current player.
    NotYourTurn {
        expected: PlayerId,
        found: PlayerId,
    },
    /// A previous move's cascade has not been advanced to resolution yet.
    MoveInProgress,
    /// `advance_wave` called with no move in flight.
    NoMoveInProgress,
    /// The match already has a winner.
    GameOver { winner: PlayerId },
    Engine(EngineError),
}

impl From<EngineError> for MoveError {
    fn from(e: EngineError) -> Self {
        MoveError::Engine(e)
    }
}

impl std::fmt::Display for MoveError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            MoveError::OutOfBounds { row, col } => {
                write!(f, "cell ({}, {}) is outside the board", row, col)
            }
            MoveError::CellContested { at, owner } => {
                write!(f, "cell {} is owned by player {}", at, owner)
            }
            MoveError::NotYourTurn { expected, found } => write!(
                f,
                "player {} moved out of turn (waiting on player {})",
                found, expected
            ),
            MoveError::MoveInProgress => write!(f, "a move is still exploding"),
            MoveError::NoMoveInProgress => write!(f, "no move in progress"),
            MoveError::GameOver { winner } => {
                write!(f, "match is over: player {} won", winner)
            }
            MoveError::Engine(e) => write!(f, "engine error: {}", e),
        }
    }
}

impl std::error::Error for MoveError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            MoveError::Engine(e) => Some(e),
            _ => None,
        }
    }
}

/// Match setup failure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SetupError {
    Config(Vec<ConfigError>),
    Board(BoardError),
}

impl From<BoardError> for SetupError {
    fn from(e: BoardError) -> Self {
        SetupError::Board(e)
    }
}

impl std::fmt::Display for SetupError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SetupError::Config(errors) => {
                write!(f, "invalid match config: ")?;
                for (i, e) in errors.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", e)?;
                }
                Ok(())
            }
            SetupError::Board(e) => write!(f, "{}", e),
        }
    }
}

impl std::error::Error for SetupError {}
