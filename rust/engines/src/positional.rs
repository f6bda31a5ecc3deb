//! Positional Engine - Greedy static evaluation
//!
//! Scores every legal move once, with no lookahead:
//!
//! `score = WEIGHTS[row][col] + CAPTURE_WEIGHT * captures`
//!
//! The weight table carries the corner bonus directly (corners are worth 100).
//! The cells touching a corner are penalised so the engine avoids handing the
//! corner to the opponent: -40 on the edge, -60 on the diagonal (X-squares).
//! The table is symmetric under all eight rotations and reflections of the
//! board.
//!
//! All moves sharing the best score are collected and one is drawn at random,
//! so the computer does not replay the same game every time.

use rand::seq::SliceRandom;
use rand::Rng;
use reversi_board::{AvailableMove, Board, Side, CELLS, SIZE};

/// Static value of owning each cell
pub const WEIGHTS: [[i32; SIZE]; SIZE] = [
    [100, -40, 20, 5, 5, 20, -40, 100],
    [-40, -60, -5, -5, -5, -5, -60, -40],
    [20, -5, 10, 3, 3, 10, -5, 20],
    [5, -5, 3, 1, 1, 3, -5, 5],
    [5, -5, 3, 1, 1, 3, -5, 5],
    [20, -5, 10, 3, 3, 10, -5, 20],
    [-40, -60, -5, -5, -5, -5, -60, -40],
    [100, -40, 20, 5, 5, 20, -40, 100],
];

/// Points per captured disc
pub const CAPTURE_WEIGHT: i32 = 2;

/// Static score of a single move
pub fn score_move(mv: &AvailableMove) -> i32 {
    WEIGHTS[mv.row][mv.col] + CAPTURE_WEIGHT * mv.captures() as i32
}

/// The best score and every move that reaches it, in input order
pub fn best_moves(moves: &[AvailableMove]) -> Option<(i32, Vec<&AvailableMove>)> {
    let mut best_score = i32::MIN;
    let mut candidates = Vec::new();

    for mv in moves {
        let score = score_move(mv);
        if score > best_score {
            best_score = score;
            candidates.clear();
            candidates.push(mv);
        } else if score == best_score {
            candidates.push(mv);
        }
    }

    if candidates.is_empty() {
        None
    } else {
        Some((best_score, candidates))
    }
}

/// Pick one of the top-scoring moves at random
pub fn choose<'a, R: Rng + ?Sized>(
    moves: &'a [AvailableMove],
    rng: &mut R,
) -> Option<&'a AvailableMove> {
    let (score, candidates) = best_moves(moves)?;
    let chosen = candidates.choose(rng).copied()?;
    log::debug!(
        "positional pick ({}, {}) score {} among {} tied of {} moves",
        chosen.row,
        chosen.col,
        score,
        candidates.len(),
        moves.len()
    );
    Some(chosen)
}

/// Compute scores for all legal moves on the board
///
/// # Returns
/// One entry per cell (index = row * 8 + col): Some(score) for a legal move,
/// None otherwise
pub fn compute_move_scores(board: &Board, side: Side) -> [Option<i32>; CELLS] {
    let mut scores = [None; CELLS];
    for mv in board.available_moves(side) {
        scores[mv.index()] = Some(score_move(&mv));
    }
    scores
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;
    use reversi_board::Flip;

    const E: u8 = 0;
    const B: u8 = 1;
    const W: u8 = 2;

    fn mv(row: usize, col: usize, captures: usize) -> AvailableMove {
        let flips = (0..captures)
            .map(|i| Flip {
                row,
                col,
                distance: i as f64 + 1.0,
            })
            .collect();
        AvailableMove { row, col, flips }
    }

    #[test]
    fn test_weights_are_eightfold_symmetric() {
        let n = SIZE - 1;
        for r in 0..SIZE {
            for c in 0..SIZE {
                let w = WEIGHTS[r][c];
                assert_eq!(w, WEIGHTS[c][r], "transpose ({}, {})", r, c);
                assert_eq!(w, WEIGHTS[n - r][c], "vertical flip ({}, {})", r, c);
                assert_eq!(w, WEIGHTS[r][n - c], "horizontal flip ({}, {})", r, c);
            }
        }
    }

    #[test]
    fn test_weight_table_shape() {
        assert_eq!(WEIGHTS[0][0], 100);
        assert_eq!(WEIGHTS[7][7], 100);
        assert_eq!(WEIGHTS[1][1], -60); // X-square
        assert_eq!(WEIGHTS[0][1], -40); // C-square
        assert!(WEIGHTS[0][2] > 0);
        assert!(WEIGHTS[0][2] < WEIGHTS[0][0]);
    }

    #[test]
    fn test_score_move() {
        assert_eq!(score_move(&mv(0, 0, 3)), 106);
        assert_eq!(score_move(&mv(1, 1, 1)), -58);
        assert_eq!(score_move(&mv(3, 3, 0)), 1);
    }

    #[test]
    fn test_best_moves_keeps_all_ties() {
        let moves = vec![mv(0, 0, 1), mv(2, 2, 5), mv(7, 7, 1), mv(1, 1, 10)];
        let (score, best) = best_moves(&moves).unwrap();
        assert_eq!(score, 102);
        let coords: Vec<(usize, usize)> = best.iter().map(|m| (m.row, m.col)).collect();
        assert_eq!(coords, vec![(0, 0), (7, 7)]);
    }

    #[test]
    fn test_best_moves_empty() {
        assert!(best_moves(&[]).is_none());
    }

    #[test]
    fn test_capture_count_breaks_equal_weights() {
        let moves = vec![mv(2, 3, 1), mv(3, 2, 3)];
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let chosen = choose(&moves, &mut rng).unwrap();
            assert_eq!((chosen.row, chosen.col), (3, 2));
        }
    }

    #[test]
    fn test_ties_are_broken_randomly() {
        let moves = vec![mv(0, 0, 1), mv(0, 7, 1), mv(7, 0, 1), mv(7, 7, 1), mv(1, 1, 1)];
        let mut rng = StdRng::seed_from_u64(11);
        let mut seen = [false; CELLS];
        for _ in 0..200 {
            seen[choose(&moves, &mut rng).unwrap().index()] = true;
        }
        assert!(seen[0] && seen[7] && seen[56] && seen[63]);
        assert!(!seen[9]);
    }

    #[test]
    fn test_prefers_corner_over_big_capture() {
        // Black can take the corner (0,0) for one disc, or (7,4) for three
        let mut state = [E; CELLS];
        state[1] = W;
        state[2] = B;
        state[6 * 8 + 4] = W;
        state[5 * 8 + 4] = W;
        state[4 * 8 + 4] = W;
        state[3 * 8 + 4] = B;
        let board = Board::from_state(&state).unwrap();

        let moves = board.available_moves(Side::Black);
        let mut rng = StdRng::seed_from_u64(5);
        let chosen = choose(&moves, &mut rng).unwrap();
        assert_eq!((chosen.row, chosen.col), (0, 0));
    }

    #[test]
    fn test_compute_move_scores_initial_board() {
        let scores = compute_move_scores(&Board::new(), Side::Black);
        let legal: Vec<usize> = (0..CELLS).filter(|&i| scores[i].is_some()).collect();
        assert_eq!(legal, vec![19, 26, 37, 44]);
        // Each opening move sits on a weight-3 square and captures one disc
        for i in legal {
            assert_eq!(scores[i], Some(5));
        }
        assert_eq!(scores[0], None);
    }
}
