//! Match aggregate and move controller.
//!
//! A [`Match`] owns the board, the turn tracker and the move lock. Each move
//! goes `Idle → Exploding → Idle`, or ends in `Terminal` once one player is
//! left. Rejected moves never touch the board.
//!
//! # Whole moves
//!
//! ```
//! use chain_reaction_logic::config::MatchConfig;
//! use chain_reaction_logic::game::Match;
//!
//! let mut game = Match::new(MatchConfig::with_players(2, 2, 2)).unwrap();
//! let result = game.submit_move(0, 0, 1).unwrap();
//! assert_eq!(result.next_turn, Some(2));
//! assert!(game.submit_move(0, 0, 2).is_err()); // owned by player 1
//! ```
//!
//! # One wave at a time
//!
//! Presentation layers that animate explosions call [`Match::place`] and then
//! pull waves with [`Match::advance_wave`] at their own pace. The match stays
//! locked until the move resolves.
//!
//! ```
//! use chain_reaction_logic::config::MatchConfig;
//! use chain_reaction_logic::game::{Match, WaveOutcome};
//!
//! let mut game = Match::new(MatchConfig::with_players(2, 2, 2)).unwrap();
//! game.submit_move(0, 0, 1).unwrap();
//! game.submit_move(1, 1, 2).unwrap();
//! game.place(0, 0, 1).unwrap();
//! assert!(!game.can_act());
//! let mut frames = 0;
//! let result = loop {
//!     match game.advance_wave().unwrap() {
//!         WaveOutcome::Pending(_snapshot) => frames += 1,
//!         WaveOutcome::Resolved(result) => break result,
//!     }
//! };
//! assert_eq!(frames, 1);
//! assert_eq!(result.next_turn, Some(2));
//! assert!(game.can_act());
//! ```

use serde::{Deserialize, Serialize};

use crate::board::{Board, Coord, PlayerId};
use crate::config::{validate_config, MatchConfig};
use crate::error::{MoveError, SetupError};
use crate::explosion::{self, Cascade, CascadeStep, WaveSnapshot};
use crate::turn::TurnTracker;

/// Where the match is in its move cycle.
#[derive(Debug, Clone)]
pub enum Phase {
    /// Waiting for the current player.
    Idle,
    /// A placement is exploding; no new move is accepted.
    Exploding { mover: PlayerId, cascade: Cascade },
    /// A single player remains.
    Terminal { winner: PlayerId },
}

/// Outcome of one resolved move.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MoveResult {
    /// Board after the cascade.
    pub board: Board,
    pub winner: Option<PlayerId>,
    /// Player to act next, `None` once the match is over.
    pub next_turn: Option<PlayerId>,
    /// Explosion waves the move caused.
    pub wave_count: u32,
    /// The cascade was cut off because the board can never settle.
    pub perpetual: bool,
    /// One snapshot per wave that left more work queued. Filled by
    /// [`Match::submit_move`]; the stepwise API hands them out one at a time
    /// instead.
    pub snapshots: Vec<WaveSnapshot>,
}

/// What [`Match::advance_wave`] produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WaveOutcome {
    /// A wave exploded and more are queued.
    Pending(WaveSnapshot),
    /// The move is complete.
    Resolved(MoveResult),
}

/// One match: board, turn state and move lock.
#[derive(Debug, Clone)]
pub struct Match {
    config: MatchConfig,
    board: Board,
    tracker: TurnTracker,
    turn: PlayerId,
    phase: Phase,
}

impl Match {
    /// Start a match. Player 1 moves first.
    pub fn new(config: MatchConfig) -> Result<Self, SetupError> {
        let errors = validate_config(&config);
        if !errors.is_empty() {
            return Err(SetupError::Config(errors));
        }
        let board = Board::new(config.rows, config.columns)?;
        log::info!(
            "Match started: {}x{} board, {} players",
            config.rows,
            config.columns,
            config.player_count
        );
        Ok(Self {
            tracker: TurnTracker::new(config.player_count),
            board,
            config,
            turn: 1,
            phase: Phase::Idle,
        })
    }

    /// Clear the board and all turn state, keeping the configuration.
    ///
    /// Abandons any cascade in flight.
    pub fn restart(&mut self) {
        // Dimensions were validated at construction.
        if let Ok(board) = Board::new(self.config.rows, self.config.columns) {
            self.board = board;
        }
        self.tracker.reset();
        self.turn = 1;
        self.phase = Phase::Idle;
        log::info!("Match restarted");
    }

    pub fn config(&self) -> &MatchConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn tracker(&self) -> &TurnTracker {
        &self.tracker
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    /// Player expected to move. After the match ends, the winner.
    pub fn turn(&self) -> PlayerId {
        self.turn
    }

    pub fn winner(&self) -> Option<PlayerId> {
        match self.phase {
            Phase::Terminal { winner } => Some(winner),
            _ => None,
        }
    }

    /// Whether a new move may be submitted.
    pub fn can_act(&self) -> bool {
        matches!(self.phase, Phase::Idle)
    }

    /// Cells the current player may place on.
    pub fn legal_moves(&self) -> Vec<Coord> {
        if !self.can_act() {
            return Vec::new();
        }
        self.board
            .coords()
            .filter(|&at| {
                self.board
                    .cell(at)
                    .is_some_and(|c| c.owner.map_or(true, |p| p == self.turn))
            })
            .collect()
    }

    /// Place and resolve a move in one call.
    pub fn submit_move(
        &mut self,
        row: usize,
        col: usize,
        player: PlayerId,
    ) -> Result<MoveResult, MoveError> {
        self.place(row, col, player)?;
        let mut snapshots = Vec::new();
        loop {
            match self.advance_wave()? {
                WaveOutcome::Pending(snapshot) => snapshots.push(snapshot),
                WaveOutcome::Resolved(mut result) => {
                    result.snapshots = snapshots;
                    return Ok(result);
                }
            }
        }
    }

    /// Validate and place one atom, locking the match until the move resolves.
    pub fn place(&mut self, row: usize, col: usize, player: PlayerId) -> Result<(), MoveError> {
        self.validate(row, col, player)?;

        let at = Coord::new(row, col);
        explosion::place_atom(&mut self.board, at, player)
            .ok_or(MoveError::OutOfBounds { row, col })?;
        self.tracker.record_move(player);
        log::debug!("Player {} placed at {}", player, at);

        self.phase = Phase::Exploding {
            mover: player,
            cascade: Cascade::new(vec![at]),
        };
        Ok(())
    }

    /// Run the next explosion wave of the move in flight.
    ///
    /// Resolves the move once nothing is left to explode, once the board is
    /// proven unable to settle, or as soon as a wave leaves a single player
    /// standing.
    pub fn advance_wave(&mut self) -> Result<WaveOutcome, MoveError> {
        let (mover, mut cascade) = match std::mem::replace(&mut self.phase, Phase::Idle) {
            Phase::Exploding { mover, cascade } => (mover, cascade),
            Phase::Terminal { winner } => {
                self.phase = Phase::Terminal { winner };
                return Err(MoveError::GameOver { winner });
            }
            Phase::Idle => return Err(MoveError::NoMoveInProgress),
        };

        let step = match cascade.advance(&mut self.board) {
            Ok(step) => step,
            Err(e) => {
                self.phase = Phase::Exploding { mover, cascade };
                return Err(e.into());
            }
        };

        match step {
            CascadeStep::Wave(_) => {
                self.tracker.recompute_eliminated(&self.board);
                if self.tracker.find_winner().is_some() {
                    return self.resolve(mover, &cascade, false).map(WaveOutcome::Resolved);
                }
                let snapshot = cascade.snapshot(&self.board);
                self.phase = Phase::Exploding { mover, cascade };
                Ok(WaveOutcome::Pending(snapshot))
            }
            CascadeStep::Quiescent => self
                .resolve(mover, &cascade, false)
                .map(WaveOutcome::Resolved),
            CascadeStep::Perpetual => {
                log::info!(
                    "Cascade from player {} can never settle; stopping after {} waves",
                    mover,
                    cascade.waves()
                );
                self.resolve(mover, &cascade, true).map(WaveOutcome::Resolved)
            }
        }
    }

    fn validate(&self, row: usize, col: usize, player: PlayerId) -> Result<(), MoveError> {
        match self.phase {
            Phase::Terminal { winner } => return Err(MoveError::GameOver { winner }),
            Phase::Exploding { .. } => return Err(MoveError::MoveInProgress),
            Phase::Idle => {}
        }

        let at = Coord::new(row, col);
        let cell = self
            .board
            .cell(at)
            .ok_or(MoveError::OutOfBounds { row, col })?;
        if let Some(owner) = cell.owner {
            if owner != player {
                return Err(MoveError::CellContested { at, owner });
            }
        }
        if player != self.turn {
            return Err(MoveError::NotYourTurn {
                expected: self.turn,
                found: player,
            });
        }
        Ok(())
    }

    fn resolve(
        &mut self,
        mover: PlayerId,
        cascade: &Cascade,
        perpetual: bool,
    ) -> Result<MoveResult, MoveError> {
        self.tracker.recompute_eliminated(&self.board);

        let next_turn = match self.tracker.find_winner() {
            Some(winner) => {
                log::info!("Player {} wins", winner);
                self.turn = winner;
                self.phase = Phase::Terminal { winner };
                None
            }
            None => {
                let next = self.tracker.next_turn(mover)?;
                self.turn = next;
                self.phase = Phase::Idle;
                Some(next)
            }
        };

        Ok(MoveResult {
            board: self.board.clone(),
            winner: self.winner(),
            next_turn,
            wave_count: cascade.waves(),
            perpetual,
            snapshots: Vec::new(),
        })
    }
}
