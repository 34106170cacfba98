//! Move generation and execution.
//!
//! Candidate moves for a piece are enumerated by [`find_move_paths`], which
//! follows jump chains recursively. Each jump is simulated on a snapshot of
//! the board, so the caller's board is never touched while searching.
//!
//! Captures are not forced: a piece that can jump may still slide.

use log::debug;

use crate::board::{Board, Rnum};
use crate::constants::{BLACK_MAN_DELTAS, KING_DELTAS, WHITE_MAN_DELTAS};
use crate::error::{CheckersError, Result};
use crate::path::{Mop, MovePath};
use crate::piece::{Caste, Color, Piece};

/// Diagonal directions a piece may move in.
pub fn move_pattern(piece: &Piece) -> &'static [(isize, isize)] {
    if piece.is_king() {
        return &KING_DELTAS;
    }
    match piece.color() {
        Color::Black => &BLACK_MAN_DELTAS,
        Color::White => &WHITE_MAN_DELTAS,
    }
}

/// The on-board square one diagonal step from `rnum`, if any.
fn step(board: &Board, rnum: Rnum, delta: (isize, isize)) -> Option<Rnum> {
    let rc = board.rowcol(rnum).ok()?;
    let (row, col) = board.offset(rc, delta)?;
    board.rnum(row, col).ok()
}

/// Find every move path for the piece on `rnum`.
///
/// Simple slides are one-step paths. For every jump, the single jump is
/// returned along with each continuation chain found after it. A man landing
/// on its king's row mid-chain continues as a king. With `jumps_only`, slides
/// are skipped. An empty square yields no paths.
pub fn find_move_paths(board: &Board, rnum: Rnum, jumps_only: bool) -> Vec<MovePath> {
    let mut paths = Vec::new();
    let Some(piece) = board.get(rnum) else {
        return paths;
    };

    for &delta in move_pattern(piece) {
        let Some(adj) = step(board, rnum, delta) else {
            continue;
        };
        match board.get(adj) {
            None => {
                if !jumps_only {
                    paths.push(MovePath::simple(rnum, adj));
                }
            }
            Some(neighbor) if neighbor.color() == piece.foe() => {
                let Some(land) = step(board, adj, delta) else {
                    continue;
                };
                if board.get(land).is_some() {
                    continue;
                }
                let jump = MovePath::single(rnum, Mop::Jump, land);
                let next = simulate_jump(board, rnum, adj, land);
                let continuations = find_move_paths(&next, land, true);
                paths.push(jump.clone());
                paths.extend(continuations.iter().filter_map(|cont| jump.join(cont).ok()));
            }
            Some(_) => {}
        }
    }
    paths
}

/// Board snapshot after jumping from `from` over `over` to `to`.
fn simulate_jump(board: &Board, from: Rnum, over: Rnum, to: Rnum) -> Board {
    let mut next = board.clone();
    next.take(over);
    if let Some(mut piece) = next.take(from) {
        if let Ok((row, _)) = next.rowcol(to) {
            if !piece.is_king() && row == next.kings_row(piece.color()) {
                piece.set_caste(Caste::King);
            }
        }
        next.put(to, piece);
    }
    next
}

/// Whether the piece on `rnum` has any simple or jump move. Only the
/// immediate neighborhood is examined.
pub fn has_a_move(board: &Board, rnum: Rnum) -> bool {
    let Some(piece) = board.get(rnum) else {
        return false;
    };
    move_pattern(piece).iter().any(|&delta| {
        let Some(adj) = step(board, rnum, delta) else {
            return false;
        };
        match board.get(adj) {
            None => true,
            Some(neighbor) if neighbor.color() == piece.foe() => {
                step(board, adj, delta).is_some_and(|land| board.get(land).is_none())
            }
            Some(_) => false,
        }
    })
}

/// The square between two squares exactly one diagonal jump apart.
pub fn jumped_square(board: &Board, from: Rnum, to: Rnum) -> Result<Rnum> {
    let (row0, col0) = board.rowcol(from)?;
    let (row1, col1) = board.rowcol(to)?;
    if row0.abs_diff(row1) != 2 || col0.abs_diff(col1) != 2 {
        return Err(CheckersError::BadJump { from, to });
    }
    board.rnum((row0 + row1) / 2, (col0 + col1) / 2)
}

/// Check that `path` is a legal move for `turn` without changing anything.
pub fn validate_move(board: &Board, turn: Color, path: &MovePath) -> Result<()> {
    if path.len() < 3 {
        return Err(CheckersError::PathTooShort(path.to_string()));
    }
    let piece = board.at(path.origin())?;
    if piece.color() != turn {
        return Err(CheckersError::WrongTurn {
            piece: piece.to_string(),
            turn,
        });
    }
    if !find_move_paths(board, path.origin(), false).contains(path) {
        return Err(CheckersError::IllegalMove(path.to_string()));
    }
    Ok(())
}

/// Validate and play `path` for the side `turn`.
///
/// Jumped pieces are removed and returned in capture order. The mover is
/// crowned the first time it lands on its king's row and stays crowned for
/// the rest of the path. On error the board is unchanged.
pub fn execute_move(board: &mut Board, turn: Color, path: &MovePath) -> Result<Vec<Piece>> {
    validate_move(board, turn, path)?;

    let mut next = board.clone();
    let mut mover = next.remove_piece(path.origin())?;
    let kings_row = next.kings_row(mover.color());
    let mut captured = Vec::new();
    for (from, mop, to) in path.segments() {
        if mop == Mop::Jump {
            let over = jumped_square(&next, from, to)?;
            captured.push(next.remove_piece(over)?);
        }
        let (row, _) = next.rowcol(to)?;
        if !mover.is_king() && row == kings_row {
            debug!("{} crowned on {to}", mover.fqname());
            mover.set_caste(Caste::King);
        }
    }
    next.replace_piece(path.destination(), mover)?;
    *board = next;

    debug!("{turn} played {path}, captured {}", captured.len());
    Ok(captured)
}
