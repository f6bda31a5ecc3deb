//! Reversi Computer Player
//!
//! Picks a move for the computer side from the rules engine's list of legal
//! moves. Two engines are available, selected per call by [`Difficulty`]:
//! - `random`: any legal move, uniformly
//! - `positional`: one-ply static evaluation (cell weight + captures), random
//!   among equally good moves
//!
//! Neither engine searches beyond the move being considered. Randomness comes
//! from the caller's `Rng`, so a seeded generator makes play reproducible.

pub mod difficulty;
pub mod positional;
pub mod random;

use rand::Rng;
use reversi_board::{AvailableMove, Board, Side};

pub use difficulty::{Difficulty, ParseDifficultyError};
pub use positional::{best_moves, compute_move_scores, score_move, CAPTURE_WEIGHT, WEIGHTS};

/// Choose one of `moves` according to `difficulty`
///
/// `moves` is expected to be non-empty; an empty slice yields None.
pub fn choose_move<'a, R: Rng + ?Sized>(
    moves: &'a [AvailableMove],
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<&'a AvailableMove> {
    match difficulty {
        Difficulty::Easy => random::choose(moves, rng),
        Difficulty::Hard => positional::choose(moves, rng),
    }
}

/// Compute the computer's move for `side` straight from a board
///
/// # Returns
/// The chosen move with its flip sequence, or None if `side` has no legal move
pub fn compute_move<R: Rng + ?Sized>(
    board: &Board,
    side: Side,
    difficulty: Difficulty,
    rng: &mut R,
) -> Option<AvailableMove> {
    let moves = board.available_moves(side);
    let chosen = choose_move(&moves, difficulty, rng).cloned();
    if let Some(mv) = &chosen {
        log::debug!(
            "{} ({}) plays ({}, {}) capturing {}",
            side,
            difficulty,
            mv.row,
            mv.col,
            mv.captures()
        );
    }
    chosen
}
