//! Turn flow for a human-vs-computer game
//!
//! [`Game`] owns the board and the side to move, and walks through
//! [`Phase`]s:
//!
//! ```text
//! WaitingForHuman --play_human--> Animating --settle--> WaitingForHuman
//! ComputerThinking --play_computer--> Animating        | ComputerThinking
//!                                                      | GameOver
//! ```
//!
//! A move stays "in flight" from the moment it is applied until the
//! presentation layer calls [`Game::settle`]. Every play attempt in between
//! is refused, so the board never changes under a reveal still in progress.

use log::info;
use rand::Rng;
use reversi_board::{Board, FlipSequence, GameError, Outcome, Side, TurnResolution};
use reversi_engines::{choose_move, Difficulty};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FlowError {
    #[error("a move is still being revealed")]
    MoveInProgress,
    #[error("it is not the human's turn")]
    NotHumanTurn,
    #[error("it is not the computer's turn")]
    NotComputerTurn,
    #[error("the game is over")]
    GameOver,
    #[error("no move is waiting to be settled")]
    NothingToSettle,
    #[error("the side to move has no legal move")]
    NoAvailableMove,
    #[error(transparent)]
    Rules(#[from] GameError),
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Phase {
    WaitingForHuman,
    ComputerThinking,
    Animating,
    GameOver(Outcome),
}

impl Phase {
    pub fn as_str(&self) -> &'static str {
        match self {
            Phase::WaitingForHuman => "waiting_for_human",
            Phase::ComputerThinking => "computer_thinking",
            Phase::Animating => "animating",
            Phase::GameOver(_) => "game_over",
        }
    }
}

/// A committed move, handed to the presentation layer for reveal
#[derive(Clone, PartialEq, Debug)]
pub struct MoveApplied {
    pub side: Side,
    pub row: usize,
    pub col: usize,
    /// Captured discs in the order they should be turned over
    pub flips: FlipSequence,
}

#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    to_move: Side,
    human_side: Side,
    phase: Phase,
    in_flight: Option<MoveApplied>,
    last_skipped: Option<Side>,
}

impl Game {
    pub fn new(human_side: Side) -> Self {
        let mut game = Game {
            board: Board::new(),
            to_move: Side::Black,
            human_side,
            phase: Phase::WaitingForHuman,
            in_flight: None,
            last_skipped: None,
        };
        game.reset();
        game
    }

    /// Back to the opening position with Black to move
    pub fn reset(&mut self) {
        self.board.reset();
        self.to_move = Side::Black;
        self.phase = self.phase_for(Side::Black);
        self.in_flight = None;
        self.last_skipped = None;
    }

    fn phase_for(&self, side: Side) -> Phase {
        if side == self.human_side {
            Phase::WaitingForHuman
        } else {
            Phase::ComputerThinking
        }
    }

    fn ensure_phase(&self, expected: Phase, wrong_turn: FlowError) -> Result<(), FlowError> {
        match self.phase {
            Phase::Animating => Err(FlowError::MoveInProgress),
            Phase::GameOver(_) => Err(FlowError::GameOver),
            phase if phase == expected => Ok(()),
            _ => Err(wrong_turn),
        }
    }

    /// Human places a disc at (row, col)
    pub fn play_human(&mut self, row: usize, col: usize) -> Result<&MoveApplied, FlowError> {
        self.ensure_phase(Phase::WaitingForHuman, FlowError::NotHumanTurn)?;
        let flips = self.board.play(row, col, self.to_move)?;
        Ok(self.begin_reveal(row, col, flips))
    }

    /// Computer picks and plays a move
    ///
    /// `difficulty` is whatever the selector reads right now; nothing is
    /// remembered between calls.
    pub fn play_computer<R: Rng + ?Sized>(
        &mut self,
        difficulty: Difficulty,
        rng: &mut R,
    ) -> Result<&MoveApplied, FlowError> {
        self.ensure_phase(Phase::ComputerThinking, FlowError::NotComputerTurn)?;

        let moves = self.board.available_moves(self.to_move);
        let chosen = choose_move(&moves, difficulty, rng).ok_or(FlowError::NoAvailableMove)?;
        let (row, col) = (chosen.row, chosen.col);
        let flips = chosen.flips.clone();

        self.board.apply_move(row, col, self.to_move, &flips);
        Ok(self.begin_reveal(row, col, flips))
    }

    fn begin_reveal(&mut self, row: usize, col: usize, flips: FlipSequence) -> &MoveApplied {
        let side = self.to_move;
        let (black, white) = self.board.get_piece_counts();
        info!(
            "{} plays ({}, {}) flipping {}; black {} white {}",
            side,
            row,
            col,
            flips.len(),
            black,
            white
        );

        self.phase = Phase::Animating;
        self.last_skipped = None;
        self.in_flight.insert(MoveApplied {
            side,
            row,
            col,
            flips,
        })
    }

    /// The presentation layer has finished revealing the in-flight move
    ///
    /// Passes the turn, skipping a side with no legal move, and returns the
    /// phase the game is now in.
    pub fn settle(&mut self) -> Result<Phase, FlowError> {
        let applied = self.in_flight.take().ok_or(FlowError::NothingToSettle)?;
        let next = applied.side.opponent();

        self.phase = match self.board.resolve_turn(next) {
            TurnResolution::Play(side) => {
                self.to_move = side;
                self.phase_for(side)
            }
            TurnResolution::Skip { skipped, next } => {
                info!("{} has no legal move, {} plays again", skipped, next);
                self.last_skipped = Some(skipped);
                self.to_move = next;
                self.phase_for(next)
            }
            TurnResolution::GameOver(outcome) => {
                let (black, white) = self.board.get_piece_counts();
                info!("game over: {:?} (black {} white {})", outcome, black, white);
                self.to_move = next;
                Phase::GameOver(outcome)
            }
        };

        Ok(self.phase)
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn to_move(&self) -> Side {
        self.to_move
    }

    pub fn human_side(&self) -> Side {
        self.human_side
    }

    pub fn computer_side(&self) -> Side {
        self.human_side.opponent()
    }

    /// The move currently being revealed, if any
    pub fn in_flight(&self) -> Option<&MoveApplied> {
        self.in_flight.as_ref()
    }

    /// Side that was skipped by the most recent settle
    pub fn last_skipped(&self) -> Option<Side> {
        self.last_skipped
    }

    pub fn outcome(&self) -> Option<Outcome> {
        match self.phase {
            Phase::GameOver(outcome) => Some(outcome),
            _ => None,
        }
    }
}

impl Default for Game {
    fn default() -> Self {
        Self::new(Side::Black)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    const E: u8 = 0;
    const B: u8 = 1;
    const W: u8 = 2;

    fn game_with(state: [u8; 64], to_move: Side, human_side: Side) -> Game {
        let board = Board::from_state(&state).unwrap();
        let mut game = Game::new(human_side);
        game.phase = game.phase_for(to_move);
        game.board = board;
        game.to_move = to_move;
        game
    }

    #[test]
    fn test_new_game_waits_for_human() {
        let game = Game::default();
        assert_eq!(game.phase(), Phase::WaitingForHuman);
        assert_eq!(game.to_move(), Side::Black);
        assert_eq!(game.board().get_piece_counts(), (2, 2));
        assert!(game.in_flight().is_none());
    }

    #[test]
    fn test_human_as_white_starts_with_computer() {
        let game = Game::new(Side::White);
        assert_eq!(game.phase(), Phase::ComputerThinking);
        assert_eq!(game.computer_side(), Side::Black);
    }

    #[test]
    fn test_human_move_goes_in_flight() {
        let mut game = Game::default();
        let applied = game.play_human(2, 3).unwrap().clone();

        assert_eq!(applied.side, Side::Black);
        assert_eq!((applied.row, applied.col), (2, 3));
        assert_eq!(applied.flips.len(), 1);
        assert_eq!(game.phase(), Phase::Animating);
        assert_eq!(game.in_flight(), Some(&applied));
        assert_eq!(game.board().get_piece_counts(), (4, 1));
    }

    #[test]
    fn test_no_second_move_while_in_flight() {
        let mut game = Game::default();
        game.play_human(2, 3).unwrap();
        let board = game.board().clone();
        let mut rng = StdRng::seed_from_u64(1);

        assert_eq!(game.play_human(2, 2).unwrap_err(), FlowError::MoveInProgress);
        assert_eq!(
            game.play_computer(Difficulty::Hard, &mut rng).unwrap_err(),
            FlowError::MoveInProgress
        );
        assert_eq!(game.board(), &board);
    }

    #[test]
    fn test_illegal_human_move_is_rejected_without_change() {
        let mut game = Game::default();
        assert_eq!(
            game.play_human(0, 0).unwrap_err(),
            FlowError::Rules(GameError::InvalidMove { row: 0, col: 0 })
        );
        assert_eq!(
            game.play_human(8, 8).unwrap_err(),
            FlowError::Rules(GameError::OutOfBounds { row: 8, col: 8 })
        );
        assert_eq!(game.phase(), Phase::WaitingForHuman);
        assert_eq!(game.board().get_piece_counts(), (2, 2));
    }

    #[test]
    fn test_settle_hands_turn_to_computer() {
        let mut game = Game::default();
        game.play_human(2, 3).unwrap();
        assert_eq!(game.settle(), Ok(Phase::ComputerThinking));
        assert_eq!(game.to_move(), Side::White);
        assert!(game.in_flight().is_none());
        assert_eq!(game.settle(), Err(FlowError::NothingToSettle));
    }

    #[test]
    fn test_turn_guards() {
        let mut game = Game::default();
        let mut rng = StdRng::seed_from_u64(1);
        assert_eq!(
            game.play_computer(Difficulty::Easy, &mut rng).unwrap_err(),
            FlowError::NotComputerTurn
        );

        game.play_human(2, 3).unwrap();
        game.settle().unwrap();
        assert_eq!(game.play_human(2, 2).unwrap_err(), FlowError::NotHumanTurn);
    }

    #[test]
    fn test_computer_move_then_back_to_human() {
        let mut game = Game::default();
        let mut rng = StdRng::seed_from_u64(4);
        game.play_human(2, 3).unwrap();
        game.settle().unwrap();

        let applied = game.play_computer(Difficulty::Hard, &mut rng).unwrap().clone();
        assert_eq!(applied.side, Side::White);
        assert!(!applied.flips.is_empty());
        assert_eq!(game.settle(), Ok(Phase::WaitingForHuman));
        assert_eq!(game.to_move(), Side::Black);
    }

    #[test]
    fn test_skip_returns_turn_to_mover() {
        // Two corner pairs: after Black takes (0,2), White cannot bracket
        // anything, but Black can still capture on the bottom edge
        let mut state = [E; 64];
        state[0] = B;
        state[1] = W;
        state[56] = B;
        state[57] = W;
        let mut game = game_with(state, Side::Black, Side::Black);

        game.play_human(0, 2).unwrap();
        assert_eq!(game.settle(), Ok(Phase::WaitingForHuman));
        assert_eq!(game.last_skipped(), Some(Side::White));
        assert_eq!(game.to_move(), Side::Black);

        game.play_human(7, 2).unwrap();
        assert_eq!(game.last_skipped(), None);
        assert_eq!(game.settle(), Ok(Phase::GameOver(Outcome::BlackWins)));
    }

    #[test]
    fn test_game_over_after_last_capture() {
        let mut state = [E; 64];
        state[0] = B;
        state[1] = W;
        let mut game = game_with(state, Side::Black, Side::White);
        let mut rng = StdRng::seed_from_u64(0);

        let applied = game.play_computer(Difficulty::Easy, &mut rng).unwrap();
        assert_eq!((applied.row, applied.col), (0, 2));
        assert_eq!(game.settle(), Ok(Phase::GameOver(Outcome::BlackWins)));
        assert_eq!(game.outcome(), Some(Outcome::BlackWins));
        assert_eq!(game.play_human(5, 5).unwrap_err(), FlowError::GameOver);
        assert_eq!(
            game.play_computer(Difficulty::Hard, &mut rng).unwrap_err(),
            FlowError::GameOver
        );
    }

    #[test]
    fn test_reset_mid_move() {
        let mut game = Game::default();
        game.play_human(2, 3).unwrap();
        game.reset();

        assert_eq!(game.phase(), Phase::WaitingForHuman);
        assert!(game.in_flight().is_none());
        assert_eq!(game.board(), &Board::new());
    }

    #[test]
    fn test_phase_names() {
        assert_eq!(Phase::Animating.as_str(), "animating");
        assert_eq!(Phase::GameOver(Outcome::Draw).as_str(), "game_over");
    }
}
