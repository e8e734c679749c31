//! Turn order and elimination.
//!
//! A player is eliminated once they have moved at least once and own no
//! cells. Players who have not moved yet are never eliminated, which keeps
//! late seats in 3+ player matches alive until their first turn. The match
//! is won when exactly one player remains.

use serde::{Deserialize, Serialize};

use crate::board::{Board, PlayerId};
use crate::error::EngineError;

/// Per-match move and elimination flags, indexed by player id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TurnTracker {
    player_count: u8,
    /// Slot 0 is unused so player ids index directly.
    has_moved: Vec<bool>,
    eliminated: Vec<bool>,
}

impl TurnTracker {
    pub fn new(player_count: u8) -> Self {
        let slots = player_count as usize + 1;
        Self {
            player_count,
            has_moved: vec![false; slots],
            eliminated: vec![false; slots],
        }
    }

    pub fn player_count(&self) -> u8 {
        self.player_count
    }

    /// Forget all moves and eliminations.
    pub fn reset(&mut self) {
        self.has_moved.fill(false);
        self.eliminated.fill(false);
    }

    pub fn record_move(&mut self, player: PlayerId) {
        if let Some(flag) = self.has_moved.get_mut(player as usize) {
            *flag = true;
        }
    }

    pub fn has_moved(&self, player: PlayerId) -> bool {
        self.has_moved.get(player as usize).copied().unwrap_or(false)
    }

    pub fn is_eliminated(&self, player: PlayerId) -> bool {
        self.eliminated.get(player as usize).copied().unwrap_or(false)
    }

    /// Players still in the match, in id order.
    pub fn active_players(&self) -> Vec<PlayerId> {
        self.players().filter(|&p| !self.is_eliminated(p)).collect()
    }

    /// Re-derive eliminations from cell ownership.
    pub fn recompute_eliminated(&mut self, board: &Board) {
        // Anyone who has moved is out unless they still own a cell.
        self.eliminated.copy_from_slice(&self.has_moved);
        for cell in board.cells() {
            if let Some(flag) = cell.owner.and_then(|p| self.eliminated.get_mut(p as usize)) {
                *flag = false;
            }
        }
    }

    /// The sole surviving player, if exactly one remains.
    pub fn find_winner(&self) -> Option<PlayerId> {
        let mut survivors = self.players().filter(|&p| !self.is_eliminated(p));
        let first = survivors.next()?;
        match survivors.next() {
            Some(_) => None,
            None => Some(first),
        }
    }

    /// The next non-eliminated player after `current`, wrapping around.
    ///
    /// Check [`find_winner`](Self::find_winner) first; fails only when
    /// every player is eliminated.
    pub fn next_turn(&self, current: PlayerId) -> Result<PlayerId, EngineError> {
        let count = self.player_count;
        if count == 0 {
            return Err(EngineError::AllEliminated);
        }
        let mut candidate = current;
        for _ in 0..count {
            candidate = candidate % count + 1;
            if !self.is_eliminated(candidate) {
                return Ok(candidate);
            }
        }
        Err(EngineError::AllEliminated)
    }

    fn players(&self) -> impl Iterator<Item = PlayerId> {
        1..=self.player_count
    }
}
