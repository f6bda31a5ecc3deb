//! Core types and rules for Reversi (Othello)
//!
//! The [`Board`] owns the 8x8 grid and the running disc counts. Legality is
//! answered by [`Board::legal_flip_sequence`], which returns the discs a move
//! would capture ordered by their distance from the placed disc, so a renderer
//! can reveal the captures one at a time in a deterministic order.
//!
//! Side-to-move is not stored here. The driver owns it and asks the board
//! what happens next through [`Board::resolve_turn`].

use std::fmt;
use std::str::FromStr;

use thiserror::Error;

/// Width and height of the board
pub const SIZE: usize = 8;

/// Number of cells on the board
pub const CELLS: usize = SIZE * SIZE;

// N, S, W, E, then the diagonals. Equidistant captures keep this order.
const DIRECTIONS: [(i8, i8); 8] = [
    (-1, 0),
    (1, 0),
    (0, -1),
    (0, 1),
    (-1, -1),
    (-1, 1),
    (1, -1),
    (1, 1),
];

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GameError {
    #[error("position ({row}, {col}) is outside the board")]
    OutOfBounds { row: usize, col: usize },
    #[error("placing at ({row}, {col}) captures nothing")]
    InvalidMove { row: usize, col: usize },
    #[error("unknown cell code {code} at index {index}")]
    InvalidCell { index: usize, code: u8 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown side {0:?}, expected \"black\" or \"white\"")]
pub struct ParseSideError(pub String);

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug, Default)]
pub enum Side {
    /// Moves first
    #[default]
    Black,
    White,
}

impl Side {
    /// Get the opposing side
    pub fn opponent(&self) -> Side {
        match self {
            Side::Black => Side::White,
            Side::White => Side::Black,
        }
    }

    /// Convert side to cell representation
    pub fn to_cell(&self) -> Cell {
        match self {
            Side::Black => Cell::Black,
            Side::White => Cell::White,
        }
    }

    /// Flat-state code for this side (1 = Black, 2 = White)
    pub fn code(&self) -> u8 {
        self.to_cell().code()
    }

    pub fn from_code(code: u8) -> Option<Side> {
        match code {
            1 => Some(Side::Black),
            2 => Some(Side::White),
            _ => None,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::Black => f.write_str("black"),
            Side::White => f.write_str("white"),
        }
    }
}

impl FromStr for Side {
    type Err = ParseSideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "black" | "b" => Ok(Side::Black),
            "white" | "w" => Ok(Side::White),
            _ => Err(ParseSideError(s.to_string())),
        }
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Cell {
    Empty,
    Black,
    White,
}

impl Cell {
    /// Flat-state code: 0 = Empty, 1 = Black, 2 = White
    pub fn code(&self) -> u8 {
        match self {
            Cell::Empty => 0,
            Cell::Black => 1,
            Cell::White => 2,
        }
    }

    pub fn from_code(code: u8) -> Option<Cell> {
        match code {
            0 => Some(Cell::Empty),
            1 => Some(Cell::Black),
            2 => Some(Cell::White),
            _ => None,
        }
    }
}

/// One captured disc, tagged with its straight-line distance from the move
#[derive(Clone, Copy, PartialEq, Debug)]
pub struct Flip {
    pub row: usize,
    pub col: usize,
    pub distance: f64,
}

impl Flip {
    fn from_origin(origin_row: usize, origin_col: usize, row: usize, col: usize) -> Self {
        let dr = row as f64 - origin_row as f64;
        let dc = col as f64 - origin_col as f64;
        Flip {
            row,
            col,
            distance: dr.hypot(dc),
        }
    }

    pub fn index(&self) -> usize {
        self.row * SIZE + self.col
    }
}

/// Captured discs in reveal order (ascending distance from the origin)
pub type FlipSequence = Vec<Flip>;

/// A legal placement together with everything it captures
#[derive(Clone, PartialEq, Debug)]
pub struct AvailableMove {
    pub row: usize,
    pub col: usize,
    pub flips: FlipSequence,
}

impl AvailableMove {
    pub fn index(&self) -> usize {
        self.row * SIZE + self.col
    }

    /// Number of opponent discs this move converts
    pub fn captures(&self) -> usize {
        self.flips.len()
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
pub enum Outcome {
    BlackWins,
    WhiteWins,
    Draw,
}

impl Outcome {
    /// The winning side, or None for a draw
    pub fn winner(&self) -> Option<Side> {
        match self {
            Outcome::BlackWins => Some(Side::Black),
            Outcome::WhiteWins => Some(Side::White),
            Outcome::Draw => None,
        }
    }
}

/// What the driver should do after a turn has been handed to `to_move`
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum TurnResolution {
    /// The side has at least one legal move
    Play(Side),
    /// `skipped` has no move and the turn goes straight back to `next`
    Skip { skipped: Side, next: Side },
    /// Neither side can move
    GameOver(Outcome),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Board {
    pub(crate) cells: [[Cell; SIZE]; SIZE],
    black_count: u8,
    white_count: u8,
}

#[inline]
fn on_board(r: i8, c: i8) -> bool {
    (0..SIZE as i8).contains(&r) && (0..SIZE as i8).contains(&c)
}

impl Board {
    /// Create a new board with the standard opening
    /// - (3,3) and (4,4) are White
    /// - (3,4) and (4,3) are Black
    pub fn new() -> Self {
        let mut board = Board {
            cells: [[Cell::Empty; SIZE]; SIZE],
            black_count: 0,
            white_count: 0,
        };
        board.reset();
        board
    }

    /// Rebuild a board from a flat state array [0=empty, 1=black, 2=white]
    /// Array is indexed as: index = row * 8 + col
    pub fn from_state(state: &[u8; CELLS]) -> Result<Self, GameError> {
        let mut cells = [[Cell::Empty; SIZE]; SIZE];
        for (index, &code) in state.iter().enumerate() {
            cells[index / SIZE][index % SIZE] =
                Cell::from_code(code).ok_or(GameError::InvalidCell { index, code })?;
        }

        let mut board = Board {
            cells,
            black_count: 0,
            white_count: 0,
        };
        board.update_piece_counts();
        Ok(board)
    }

    /// Reset board to the opening position
    pub fn reset(&mut self) {
        self.cells = [[Cell::Empty; SIZE]; SIZE];

        self.cells[3][3] = Cell::White;
        self.cells[3][4] = Cell::Black;
        self.cells[4][3] = Cell::Black;
        self.cells[4][4] = Cell::White;

        self.black_count = 2;
        self.white_count = 2;
    }

    /// State of a single cell. Panics if (row, col) is off the board.
    pub fn cell(&self, row: usize, col: usize) -> Cell {
        self.cells[row][col]
    }

    /// Discs `side` would capture by placing at (row, col)
    ///
    /// Each of the 8 directions contributes its run of consecutive opponent
    /// discs only when the run is closed off by one of `side`'s own discs.
    /// The combined result is stably sorted by distance from (row, col).
    ///
    /// An empty result means the move is illegal: the cell is occupied, off
    /// the board, or brackets nothing.
    pub fn legal_flip_sequence(&self, row: usize, col: usize, side: Side) -> FlipSequence {
        if row >= SIZE || col >= SIZE || self.cells[row][col] != Cell::Empty {
            return Vec::new();
        }

        let mut sequence = Vec::new();
        for (dr, dc) in DIRECTIONS {
            sequence.extend(self.captures_in_direction(row, col, dr, dc, side));
        }

        sequence.sort_by(|a, b| a.distance.total_cmp(&b.distance));
        sequence
    }

    /// Opponent run captured in direction (dr, dc), or nothing if unbracketed
    fn captures_in_direction(
        &self,
        row: usize,
        col: usize,
        dr: i8,
        dc: i8,
        side: Side,
    ) -> FlipSequence {
        let opponent = side.opponent().to_cell();
        let mut run = Vec::new();

        let mut r = row as i8 + dr;
        let mut c = col as i8 + dc;
        while on_board(r, c) && self.cells[r as usize][c as usize] == opponent {
            run.push(Flip::from_origin(row, col, r as usize, c as usize));
            r += dr;
            c += dc;
        }

        let closed = on_board(r, c) && self.cells[r as usize][c as usize] == side.to_cell();
        if closed {
            run
        } else {
            Vec::new()
        }
    }

    /// Every legal move for `side`, in row-major order
    pub fn available_moves(&self, side: Side) -> Vec<AvailableMove> {
        let mut moves = Vec::new();

        for row in 0..SIZE {
            for col in 0..SIZE {
                let flips = self.legal_flip_sequence(row, col, side);
                if !flips.is_empty() {
                    moves.push(AvailableMove { row, col, flips });
                }
            }
        }

        moves
    }

    /// Get all valid moves for `side` as a 64-element bool array
    /// Array is indexed as: index = row * 8 + col
    pub fn get_valid_moves(&self, side: Side) -> [bool; CELLS] {
        let mut valid_moves = [false; CELLS];
        for mv in self.available_moves(side) {
            valid_moves[mv.index()] = true;
        }
        valid_moves
    }

    pub fn has_any_move(&self, side: Side) -> bool {
        (0..CELLS).any(|index| {
            !self
                .legal_flip_sequence(index / SIZE, index % SIZE, side)
                .is_empty()
        })
    }

    /// Place `side` at (row, col) and convert every disc in `flips`
    ///
    /// `flips` must come from [`Board::legal_flip_sequence`] for the same
    /// (row, col, side) on the current board. Nothing is re-validated in
    /// release builds; a stale sequence leaves the board inconsistent.
    pub fn apply_move(&mut self, row: usize, col: usize, side: Side, flips: &[Flip]) {
        debug_assert_eq!(
            self.cells[row][col],
            Cell::Empty,
            "origin ({}, {}) is occupied",
            row,
            col
        );
        debug_assert!(
            flips
                .iter()
                .all(|f| self.cells[f.row][f.col] == side.opponent().to_cell()),
            "flip sequence names a cell that is not an opponent disc"
        );
        debug_assert_eq!(
            flips,
            self.legal_flip_sequence(row, col, side).as_slice(),
            "flip sequence does not match the board"
        );

        let disc = side.to_cell();
        self.cells[row][col] = disc;
        for flip in flips {
            self.cells[flip.row][flip.col] = disc;
        }

        self.update_piece_counts();
    }

    /// Checked placement: query the captures and apply them in one step
    /// Returns the applied flip sequence, or an error with the board untouched
    pub fn play(&mut self, row: usize, col: usize, side: Side) -> Result<FlipSequence, GameError> {
        if row >= SIZE || col >= SIZE {
            return Err(GameError::OutOfBounds { row, col });
        }

        let flips = self.legal_flip_sequence(row, col, side);
        if flips.is_empty() {
            return Err(GameError::InvalidMove { row, col });
        }

        self.apply_move(row, col, side, &flips);
        Ok(flips)
    }

    /// Decide who moves once the turn has been handed to `to_move`
    pub fn resolve_turn(&self, to_move: Side) -> TurnResolution {
        if self.has_any_move(to_move) {
            TurnResolution::Play(to_move)
        } else if self.has_any_move(to_move.opponent()) {
            TurnResolution::Skip {
                skipped: to_move,
                next: to_move.opponent(),
            }
        } else {
            TurnResolution::GameOver(self.outcome())
        }
    }

    /// Update piece counts by scanning the board
    fn update_piece_counts(&mut self) {
        let mut black = 0;
        let mut white = 0;

        for row in self.cells.iter() {
            for cell in row.iter() {
                match cell {
                    Cell::Black => black += 1,
                    Cell::White => white += 1,
                    Cell::Empty => {}
                }
            }
        }

        self.black_count = black;
        self.white_count = white;
    }

    /// Get piece counts (black_count, white_count)
    pub fn get_piece_counts(&self) -> (u8, u8) {
        (self.black_count, self.white_count)
    }

    /// Result by disc count; meaningful once neither side can move
    pub fn outcome(&self) -> Outcome {
        match self.black_count.cmp(&self.white_count) {
            std::cmp::Ordering::Greater => Outcome::BlackWins,
            std::cmp::Ordering::Less => Outcome::WhiteWins,
            std::cmp::Ordering::Equal => Outcome::Draw,
        }
    }

    /// Check if the board is full (no empty cells)
    pub fn is_full(&self) -> bool {
        self.black_count as usize + self.white_count as usize == CELLS
    }

    /// Get current board state as flat array [0=empty, 1=black, 2=white]
    /// Array is indexed as: index = row * 8 + col
    pub fn get_state(&self) -> [u8; CELLS] {
        let mut state = [0u8; CELLS];

        for row in 0..SIZE {
            for col in 0..SIZE {
                state[row * SIZE + col] = self.cells[row][col].code();
            }
        }

        state
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "  0 1 2 3 4 5 6 7")?;
        for (r, row) in self.cells.iter().enumerate() {
            write!(f, "{}", r)?;
            for cell in row.iter() {
                let symbol = match cell {
                    Cell::Empty => ".",
                    Cell::Black => "●",
                    Cell::White => "○",
                };
                write!(f, " {}", symbol)?;
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
