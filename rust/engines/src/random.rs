//! Random engine: any legal move, each equally likely

use rand::seq::SliceRandom;
use rand::Rng;
use reversi_board::AvailableMove;

/// Pick uniformly among `moves`, or None if there are none
pub fn choose<'a, R: Rng + ?Sized>(
    moves: &'a [AvailableMove],
    rng: &mut R,
) -> Option<&'a AvailableMove> {
    moves.choose(rng)
}
