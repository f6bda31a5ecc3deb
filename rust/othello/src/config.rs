//! Driver configuration
//!
//! Only the human's side and the starting difficulty live here. The driver
//! keeps the difficulty outside [`crate::Game`] and passes it on every
//! computer move, so a change takes effect on the next move.

use reversi_board::{ParseSideError, Side};
use reversi_engines::{Difficulty, ParseDifficultyError};
use thiserror::Error;

pub const HUMAN_SIDE_VAR: &str = "REVERSI_HUMAN_SIDE";
pub const DIFFICULTY_VAR: &str = "REVERSI_DIFFICULTY";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid {var}: {source}")]
    HumanSide {
        var: &'static str,
        #[source]
        source: ParseSideError,
    },
    #[error("invalid {var}: {source}")]
    Difficulty {
        var: &'static str,
        #[source]
        source: ParseDifficultyError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GameConfig {
    /// Side played by the human; the computer takes the other
    pub human_side: Side,
    pub difficulty: Difficulty,
}

impl GameConfig {
    /// Read `REVERSI_HUMAN_SIDE` and `REVERSI_DIFFICULTY`, falling back to
    /// defaults for unset variables
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|var| std::env::var(var).ok())
    }

    /// Same as [`GameConfig::from_env`] with a custom variable source
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = GameConfig::default();

        if let Some(value) = lookup(HUMAN_SIDE_VAR) {
            config.human_side = value.parse().map_err(|source| ConfigError::HumanSide {
                var: HUMAN_SIDE_VAR,
                source,
            })?;
        }
        if let Some(value) = lookup(DIFFICULTY_VAR) {
            config.difficulty = value.parse().map_err(|source| ConfigError::Difficulty {
                var: DIFFICULTY_VAR,
                source,
            })?;
        }

        Ok(config)
    }
}
