//! Match configuration and validation.
//!
//! A match is fixed at setup: board extents, number of players, and each
//! player's display identity. Identities are carried for presentation
//! layers only; nothing in the simulation reads them.
//!
//! ```
//! use chain_reaction_logic::config::{validate_config, MatchConfig};
//!
//! let config = MatchConfig::with_players(4, 4, 3);
//! assert!(validate_config(&config).is_empty());
//! assert_eq!(config.identity(3).label, "Player 3");
//! ```

use serde::{Deserialize, Serialize};

use crate::board::{PlayerId, MIN_EXTENT};

/// Fewest players a match can start with.
pub const MIN_PLAYERS: u8 = 2;

/// Default pause between animated explosion waves.
pub const DEFAULT_WAVE_DELAY_MS: u64 = 700;

/// Colors handed out to players without an explicit identity.
pub const DEFAULT_PALETTE: [[u8; 3]; 3] = [[255, 0, 0], [0, 255, 0], [0, 0, 255]];

/// How a player is shown to humans.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerIdentity {
    pub label: String,
    /// RGB color.
    pub color: [u8; 3],
}

impl PlayerIdentity {
    /// Identity for a player that was not configured explicitly.
    pub fn fallback(player: PlayerId) -> Self {
        let slot = (player.max(1) as usize - 1) % DEFAULT_PALETTE.len();
        Self {
            label: format!("Player {}", player),
            color: DEFAULT_PALETTE[slot],
        }
    }
}

/// Parameters fixed for the lifetime of one match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MatchConfig {
    pub rows: usize,
    pub columns: usize,
    pub player_count: u8,
    /// One identity per player in id order. Empty means use fallbacks.
    #[serde(default)]
    pub players: Vec<PlayerIdentity>,
    /// Advisory pause between animated waves. Never affects the outcome.
    #[serde(default = "default_wave_delay")]
    pub wave_delay_ms: u64,
}

fn default_wave_delay() -> u64 {
    DEFAULT_WAVE_DELAY_MS
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self::with_players(5, 6, 2)
    }
}

impl MatchConfig {
    /// Config with fallback identities for every player.
    pub fn with_players(rows: usize, columns: usize, player_count: u8) -> Self {
        Self {
            rows,
            columns,
            player_count,
            players: (1..=player_count).map(PlayerIdentity::fallback).collect(),
            wave_delay_ms: DEFAULT_WAVE_DELAY_MS,
        }
    }

    /// Identity for `player`, falling back to a generated one.
    pub fn identity(&self, player: PlayerId) -> PlayerIdentity {
        player
            .checked_sub(1)
            .and_then(|idx| self.players.get(idx as usize))
            .cloned()
            .unwrap_or_else(|| PlayerIdentity::fallback(player))
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Board narrower than 2 in some direction.
    InvalidDimensions { rows: usize, columns: usize },
    /// Fewer than two players.
    TooFewPlayers(u8),
    /// More players than cells, so a late seat could have nowhere to place.
    TooManyPlayers { players: u8, cells: usize },
    /// Identity list present but not one per player.
    IdentityCountMismatch { expected: u8, found: usize },
    /// Player label is blank.
    EmptyLabel(PlayerId),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidDimensions { rows, columns } => {
                write!(f, "board must be at least 2x2, got {}x{}", rows, columns)
            }
            ConfigError::TooFewPlayers(n) => {
                write!(f, "need at least {} players, got {}", MIN_PLAYERS, n)
            }
            ConfigError::TooManyPlayers { players, cells } => {
                write!(f, "{} players cannot share a {}-cell board", players, cells)
            }
            ConfigError::IdentityCountMismatch { expected, found } => write!(
                f,
                "{} player identities given for {} players",
                found, expected
            ),
            ConfigError::EmptyLabel(p) => write!(f, "player {} has an empty label", p),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validate a match configuration, returning all errors found.
pub fn validate_config(config: &MatchConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if config.rows < MIN_EXTENT || config.columns < MIN_EXTENT {
        errors.push(ConfigError::InvalidDimensions {
            rows: config.rows,
            columns: config.columns,
        });
    }
    if config.player_count < MIN_PLAYERS {
        errors.push(ConfigError::TooFewPlayers(config.player_count));
    }
    let cells = config.rows.saturating_mul(config.columns);
    if config.player_count as usize > cells {
        errors.push(ConfigError::TooManyPlayers {
            players: config.player_count,
            cells,
        });
    }
    if !config.players.is_empty() && config.players.len() != config.player_count as usize {
        errors.push(ConfigError::IdentityCountMismatch {
            expected: config.player_count,
            found: config.players.len(),
        });
    }
    for (idx, identity) in config.players.iter().enumerate() {
        if identity.label.trim().is_empty() {
            errors.push(ConfigError::EmptyLabel(idx as PlayerId + 1));
        }
    }

    errors
}
