//! `NQueens`: place N non-attacking queens on an N×N board.
//!
//! Incremental formulation: queens are placed one row at a time, starting at
//! row 0. The actions of a board are the squares of the next empty row that no
//! placed queen attacks, in column order. Goal: N queens on the board and no
//! attacking pair.

use std::fmt;

use fathom_search::{ActionV1, SearchProblem};

/// Name of the placement action.
pub const PLACE_QUEEN: &str = "placeQueenAt";

/// A board square. `x` is the row, `y` the column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct XyLocation {
    pub x: usize,
    pub y: usize,
}

impl XyLocation {
    #[must_use]
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }

    /// Whether a queen on `self` attacks `other` (same row, column or diagonal).
    #[must_use]
    pub fn attacks(&self, other: &Self) -> bool {
        self.x == other.x
            || self.y == other.y
            || self.x.abs_diff(other.x) == self.y.abs_diff(other.y)
    }
}

impl fmt::Display for XyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, " ( {} , {} ) ", self.x, self.y)
    }
}

/// Place a queen at `location`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct QueenAction {
    pub location: XyLocation,
}

impl ActionV1 for QueenAction {
    fn name(&self) -> &str {
        PLACE_QUEEN
    }
}

impl fmt::Display for QueenAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Action[name=={PLACE_QUEEN}, location=={}]", self.location)
    }
}

/// An N×N board with queens in placement order.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct NQueensBoard {
    size: usize,
    queens: Vec<XyLocation>,
}

impl NQueensBoard {
    /// An empty board.
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            queens: Vec::with_capacity(size),
        }
    }

    #[must_use]
    pub fn size(&self) -> usize {
        self.size
    }

    /// Placed queens, in placement order.
    #[must_use]
    pub fn queens(&self) -> &[XyLocation] {
        &self.queens
    }

    #[must_use]
    pub fn queen_count(&self) -> usize {
        self.queens.len()
    }

    /// Whether any placed queen attacks `location`.
    #[must_use]
    pub fn is_square_under_attack(&self, location: XyLocation) -> bool {
        self.queens.iter().any(|q| q.attacks(&location))
    }

    /// Number of unordered queen pairs that attack each other.
    #[must_use]
    pub fn attacking_pairs(&self) -> usize {
        self.queens
            .iter()
            .enumerate()
            .map(|(i, a)| self.queens[i + 1..].iter().filter(|b| a.attacks(b)).count())
            .sum()
    }

    /// A copy of this board with one more queen.
    #[must_use]
    pub fn with_queen(&self, location: XyLocation) -> Self {
        let mut next = self.clone();
        next.queens.push(location);
        next
    }
}

/// The N-Queens problem over an initially empty board.
#[derive(Debug, Clone)]
pub struct NQueens {
    size: usize,
    problem_id: String,
}

impl NQueens {
    #[must_use]
    pub fn new(size: usize) -> Self {
        Self {
            size,
            problem_id: format!("n_queens_{size}"),
        }
    }
}

impl SearchProblem for NQueens {
    type State = NQueensBoard;
    type Action = QueenAction;

    fn problem_id(&self) -> &str {
        &self.problem_id
    }

    fn initial_state(&self) -> NQueensBoard {
        NQueensBoard::new(self.size)
    }

    fn actions(&self, board: &NQueensBoard) -> Vec<QueenAction> {
        let row = board.queen_count();
        if row >= board.size() {
            return Vec::new();
        }
        (0..board.size())
            .map(|col| XyLocation::new(row, col))
            .filter(|&location| !board.is_square_under_attack(location))
            .map(|location| QueenAction { location })
            .collect()
    }

    fn result(&self, board: &NQueensBoard, action: &QueenAction) -> NQueensBoard {
        board.with_queen(action.location)
    }

    fn is_goal(&self, board: &NQueensBoard) -> bool {
        board.queen_count() == board.size() && board.attacking_pairs() == 0
    }
}
