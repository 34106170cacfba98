//! Error type shared by the board, move engine and game.
//!
//! Every failure is local to the attempted operation: the board and game are
//! left exactly as they were before the call.

use thiserror::Error;

use crate::constants::{MAX_SIZE, MIN_SIZE};
use crate::game::State;
use crate::piece::Color;

/// Result alias used throughout the library.
pub type Result<T> = std::result::Result<T, CheckersError>;

/// Domain errors for the checkers engine.
///
/// Each variant carries the position or input it refers to, so the rendered
/// message reads `<context>: <reason>`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CheckersError {
    #[error("{0}: invalid reachable number")]
    InvalidSquare(usize),

    #[error("(row,col)=({row},{col}): off-board position")]
    OffBoard { row: usize, col: usize },

    #[error("(row,col)=({row},{col}): not a reachable square")]
    NotPlayable { row: usize, col: usize },

    #[error("{pos}: {occupant} occupies square")]
    SquareOccupied { pos: String, occupant: String },

    #[error("{pos}: no piece found")]
    SquareEmpty { pos: String },

    #[error("{pos}: piece not on kings row {row}")]
    NotOnKingsRow { pos: String, row: usize },

    #[error("{piece}: it's {turn}'s turn")]
    WrongTurn { piece: String, turn: Color },

    #[error("{0}: not a legal move")]
    IllegalMove(String),

    #[error("{0:?}: move path too short")]
    PathTooShort(String),

    #[error("cannot jump from {from} to {to}")]
    BadJump { from: usize, to: usize },

    #[error("path0 {end} != path1 {start}")]
    PathMismatch { end: usize, start: usize },

    #[error("{nota:?}: {reason}")]
    Notation { nota: String, reason: String },

    #[error("no {0} pieces on board to play a game")]
    NoPieces(Color),

    #[error("{op}: invalid in {state} state")]
    InvalidState { op: &'static str, state: State },

    #[error("{value:?}: not a valid {what} value")]
    UnknownValue { what: &'static str, value: String },

    #[error("{0}: board size must be between {min} and {max}", min = MIN_SIZE, max = MAX_SIZE)]
    BoardSize(usize),
}
