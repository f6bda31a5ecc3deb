//! Reversi game driver
//!
//! Ties the rules engine (`reversi_board`) and the computer player
//! (`reversi_engines`) together into a turn-by-turn flow that a presentation
//! layer can drive. With the `python` feature the flow is exposed as the
//! `reversi_rust` Python module.

pub mod config;
pub mod game;

// PyO3 bindings module
#[cfg(feature = "python")]
pub mod bindings;

pub use config::{ConfigError, GameConfig};
pub use game::{FlowError, Game, MoveApplied, Phase};
pub use reversi_board::{AvailableMove, Board, Cell, Flip, FlipSequence, Outcome, Side};
pub use reversi_engines::Difficulty;
