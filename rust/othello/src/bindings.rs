use crate::{FlowError, Game, GameConfig, Phase};
use ndarray::Array2;
use numpy::{PyArray1, PyArray2};
use pyo3::exceptions::{PyRuntimeError, PyValueError};
/// PyO3 bindings for the Reversi game driver
/// Exposes the turn flow and the computer player to a Python presentation layer
use pyo3::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;
use reversi_board::{Board, Flip, Side, CELLS, SIZE};
use reversi_engines::{compute_move, Difficulty};

/// (row, col, distance) as handed to Python
type FlipTuple = (usize, usize, f64);

fn flips_to_py(flips: &[Flip]) -> Vec<FlipTuple> {
    flips.iter().map(|f| (f.row, f.col, f.distance)).collect()
}

fn split_action(action: usize) -> PyResult<(usize, usize)> {
    if action >= CELLS {
        return Err(PyValueError::new_err(format!(
            "Action {} is out of range. Must be between 0 and 63 (inclusive).",
            action
        )));
    }
    Ok((action / SIZE, action % SIZE))
}

fn flow_err(err: FlowError) -> PyErr {
    match err {
        FlowError::Rules(_) => PyValueError::new_err(err.to_string()),
        _ => PyRuntimeError::new_err(err.to_string()),
    }
}

fn parse_difficulty(difficulty: &str) -> PyResult<Difficulty> {
    difficulty
        .parse()
        .map_err(|e: reversi_engines::ParseDifficultyError| PyValueError::new_err(e.to_string()))
}

/// Python wrapper for a human-vs-computer Reversi game
///
/// The presentation layer plays a move, animates the returned flip sequence
/// in order, then calls `settle()` to hand the turn on.
#[pyclass]
pub struct ReversiGame {
    game: Game,
    difficulty: Difficulty,
    rng: StdRng,
}

#[pymethods]
impl ReversiGame {
    /// Create a new game with the standard opening
    ///
    /// Args:
    ///     human_side (str): "black" (moves first) or "white"
    ///     difficulty (str): "easy" or "hard"
    ///     seed (int | None): seed for the computer's random choices
    #[new]
    #[pyo3(signature = (human_side = "black", difficulty = "hard", seed = None))]
    pub fn new(human_side: &str, difficulty: &str, seed: Option<u64>) -> PyResult<Self> {
        let config = GameConfig {
            human_side: human_side
                .parse::<Side>()
                .map_err(|e| PyValueError::new_err(e.to_string()))?,
            difficulty: parse_difficulty(difficulty)?,
        };

        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Ok(Self {
            game: Game::new(config.human_side),
            difficulty: config.difficulty,
            rng,
        })
    }

    /// Reset the game to the opening position
    pub fn reset(&mut self) {
        self.game.reset();
    }

    /// Update the difficulty selector; read on the next computer move
    pub fn set_difficulty(&mut self, difficulty: &str) -> PyResult<()> {
        self.difficulty = parse_difficulty(difficulty)?;
        Ok(())
    }

    pub fn get_difficulty(&self) -> &'static str {
        self.difficulty.as_str()
    }

    /// Current phase: "waiting_for_human", "computer_thinking", "animating"
    /// or "game_over"
    pub fn get_phase(&self) -> &'static str {
        self.game.phase().as_str()
    }

    /// Play the human's move
    ///
    /// Args:
    ///     action (int): Position on the board (0-63), where action = row * 8 + col
    ///
    /// Returns:
    ///     list: [(row, col, distance), ...] captured discs in reveal order
    ///
    /// Raises:
    ///     ValueError: If the action is out of range or captures nothing
    ///     RuntimeError: If it is not the human's turn or a move is in flight
    pub fn play(&mut self, action: usize) -> PyResult<Vec<FlipTuple>> {
        let (row, col) = split_action(action)?;
        let applied = self.game.play_human(row, col).map_err(flow_err)?;
        Ok(flips_to_py(&applied.flips))
    }

    /// Let the computer move using the current difficulty
    ///
    /// Returns:
    ///     tuple: (action, [(row, col, distance), ...])
    pub fn computer_move(&mut self) -> PyResult<(usize, Vec<FlipTuple>)> {
        let difficulty = self.difficulty;
        let applied = self
            .game
            .play_computer(difficulty, &mut self.rng)
            .map_err(flow_err)?;
        Ok((applied.row * SIZE + applied.col, flips_to_py(&applied.flips)))
    }

    /// Finish the in-flight move and pass the turn
    ///
    /// Returns:
    ///     str: the new phase
    pub fn settle(&mut self) -> PyResult<&'static str> {
        let phase = self.game.settle().map_err(flow_err)?;
        Ok(phase.as_str())
    }

    /// Get the current board state as a 2D numpy array
    ///
    /// Returns:
    ///     np.ndarray: Shape (8, 8) with dtype uint8
    ///         - 0 = Empty cell
    ///         - 1 = Black piece
    ///         - 2 = White piece
    pub fn get_board<'py>(&self, py: Python<'py>) -> PyResult<&'py PyArray2<u8>> {
        let state = self.game.board().get_state();
        let array = Array2::from_shape_fn((SIZE, SIZE), |(row, col)| state[row * SIZE + col]);
        Ok(PyArray2::from_owned_array(py, array))
    }

    /// Get valid moves for the side to move
    ///
    /// Returns:
    ///     np.ndarray: Shape (64,) with dtype bool
    pub fn get_valid_moves<'py>(&self, py: Python<'py>) -> PyResult<&'py PyArray1<bool>> {
        let moves = self.game.board().get_valid_moves(self.game.to_move());
        Ok(PyArray1::from_slice(py, &moves))
    }

    /// Discs the side to move would capture at `action`, empty if illegal
    pub fn flip_sequence(&self, action: usize) -> PyResult<Vec<FlipTuple>> {
        let (row, col) = split_action(action)?;
        let flips = self
            .game
            .board()
            .legal_flip_sequence(row, col, self.game.to_move());
        Ok(flips_to_py(&flips))
    }

    /// Get the side to move: 0 for Black, 1 for White
    pub fn get_current_player(&self) -> u8 {
        match self.game.to_move() {
            Side::Black => 0,
            Side::White => 1,
        }
    }

    /// Side skipped by the last settle: 0 for Black, 1 for White, None if no skip
    pub fn get_skipped(&self) -> Option<u8> {
        self.game.last_skipped().map(|side| side.code() - 1)
    }

    /// Get piece counts for both players
    ///
    /// Returns:
    ///     tuple: (black_count, white_count)
    pub fn get_piece_counts(&self) -> (u8, u8) {
        self.game.board().get_piece_counts()
    }

    /// Get the winner of the game
    ///
    /// Returns:
    ///     int:
    ///         - 0 = Black wins
    ///         - 1 = White wins
    ///         - 2 = Draw
    ///         - 3 = Game not finished
    pub fn get_winner(&self) -> u8 {
        match self.game.phase() {
            Phase::GameOver(outcome) => match outcome.winner() {
                Some(Side::Black) => 0,
                Some(Side::White) => 1,
                None => 2,
            },
            _ => 3,
        }
    }
}

/// Compute the computer's move for a bare board
///
/// Args:
///     board (list): Flat board state as 64 elements (0=Empty, 1=Black, 2=White)
///     player (int): Side to move (1=Black, 2=White)
///     difficulty (str): "easy" or "hard"
///
/// Returns:
///     int: Move index (0-63) or 255 if no valid moves
#[pyfunction]
#[pyo3(signature = (board, player, difficulty = "hard"))]
fn choose_move_py(board: Vec<u8>, player: u8, difficulty: &str) -> PyResult<u8> {
    if board.len() != CELLS {
        return Err(PyValueError::new_err(format!(
            "Board must have exactly 64 elements, got {}",
            board.len()
        )));
    }
    let side = Side::from_code(player)
        .ok_or_else(|| PyValueError::new_err(format!("Player must be 1 or 2, got {}", player)))?;

    let mut board_array: [u8; CELLS] = [0; CELLS];
    board_array.copy_from_slice(&board);
    let board = Board::from_state(&board_array).map_err(|e| PyValueError::new_err(e.to_string()))?;

    let mut rng = rand::thread_rng();
    Ok(compute_move(&board, side, parse_difficulty(difficulty)?, &mut rng)
        .map(|mv| mv.index() as u8)
        .unwrap_or(u8::MAX))
}

/// Python module definition
///
/// This module can be imported in Python as `reversi_rust`
#[pymodule]
fn reversi_rust(_py: Python, m: &PyModule) -> PyResult<()> {
    m.add_class::<ReversiGame>()?;
    m.add_function(wrap_pyfunction!(choose_move_py, m)?)?;
    Ok(())
}
