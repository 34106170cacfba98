//! Checkers board: square addressing and piece occupancy.
//!
//! Only the dark squares of an N x N board are playable. They are numbered
//! 1..=N*N/2 in row-major order (the "reachable number", or rnum). Row 0 is
//! black's back row and white's king's row.
//!
//! Pieces are stored in a flat array indexed by `rnum - 1`, `None` marking an
//! empty square.

use std::fmt;

use log::debug;

use crate::constants::{DEFAULT_SIZE, MAX_SIZE, MIN_SIZE, RNUM_MIN};
use crate::error::{CheckersError, Result};
use crate::piece::{Caste, Color, Piece};

/// Reachable number of a playable square.
pub type Rnum = usize;

/// A board position, addressed either by rnum or by zero-based (row, col).
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Pos {
    Rnum(Rnum),
    RowCol(usize, usize),
}

impl From<Rnum> for Pos {
    fn from(rnum: Rnum) -> Self {
        Pos::Rnum(rnum)
    }
}

impl From<(usize, usize)> for Pos {
    fn from((row, col): (usize, usize)) -> Self {
        Pos::RowCol(row, col)
    }
}

/// Shade of a square.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum SquareShade {
    Dark,
    Light,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Board {
    size: usize,
    squares: Vec<Option<Piece>>,
}

impl Default for Board {
    fn default() -> Self {
        Self::new(DEFAULT_SIZE)
    }
}

impl Board {
    /// Create an empty board. A zero size falls back to the default, sizes
    /// above [`MAX_SIZE`] are capped and odd sizes are rounded up to the next
    /// even size.
    pub fn new(size: usize) -> Self {
        let size = match size.min(MAX_SIZE) {
            0 => DEFAULT_SIZE,
            s if s % 2 == 1 => s + 1,
            s => s,
        };
        Self {
            size,
            squares: vec![None; size * size / 2],
        }
    }

    /// Accept `size` if it lies within [`MIN_SIZE`]..=[`MAX_SIZE`].
    pub fn check_size(size: usize) -> Result<usize> {
        if (MIN_SIZE..=MAX_SIZE).contains(&size) {
            Ok(size)
        } else {
            Err(CheckersError::BoardSize(size))
        }
    }

    pub fn size(&self) -> usize {
        self.size
    }

    pub fn dark_squares_per_row(&self) -> usize {
        self.size / 2
    }

    pub fn rnum_min(&self) -> Rnum {
        RNUM_MIN
    }

    pub fn rnum_max(&self) -> Rnum {
        self.squares.len()
    }

    /// The row on which a man of `color` is promoted.
    pub fn kings_row(&self, color: Color) -> usize {
        match color {
            Color::Black => self.size - 1,
            Color::White => 0,
        }
    }

    // -------------------------------------------------------------------------
    // Piece manipulation
    // -------------------------------------------------------------------------

    /// Place a new piece on an empty square. The piece's ident is the square
    /// it was created on.
    pub fn add_new_piece(&mut self, rnum: Rnum, color: Color, caste: Caste) -> Result<&Piece> {
        self.check_empty(rnum)?;
        debug!("add {color} {caste} at {rnum}");
        let slot = &mut self.squares[rnum - 1];
        Ok(&*slot.insert(Piece::new(color, caste, rnum)))
    }

    /// Remove and return the piece on `rnum`.
    pub fn remove_piece(&mut self, rnum: Rnum) -> Result<Piece> {
        self.check_rnum(rnum)?;
        let piece = self.squares[rnum - 1]
            .take()
            .ok_or_else(|| self.empty_error(Pos::Rnum(rnum)))?;
        debug!("remove {} from {rnum}", piece.fqname());
        Ok(piece)
    }

    /// Put back a piece previously taken off the board. The square must be
    /// empty.
    pub fn replace_piece(&mut self, rnum: Rnum, piece: Piece) -> Result<()> {
        self.check_empty(rnum)?;
        debug!("replace {} at {rnum}", piece.fqname());
        self.squares[rnum - 1] = Some(piece);
        Ok(())
    }

    /// Relocate a piece. No move rules are checked here.
    pub fn move_piece(&mut self, from: Rnum, to: Rnum) -> Result<()> {
        self.check_rnum(from)?;
        self.check_empty(to)?;
        let piece = self.squares[from - 1]
            .take()
            .ok_or_else(|| self.empty_error(Pos::Rnum(from)))?;
        debug!("move {} {from} -> {to}", piece.fqname());
        self.squares[to - 1] = Some(piece);
        Ok(())
    }

    /// Promote the piece on `rnum` to a king. With `only_kings_row` the piece
    /// must stand on its king's row.
    pub fn promote_piece(&mut self, rnum: Rnum, only_kings_row: bool) -> Result<()> {
        let (row, _) = self.rowcol(rnum)?;
        let color = self.at(Pos::Rnum(rnum))?.color();
        let krow = self.kings_row(color);
        if only_kings_row && row != krow {
            return Err(CheckersError::NotOnKingsRow {
                pos: self.describe(Pos::Rnum(rnum)),
                row: krow,
            });
        }
        if let Some(piece) = self.squares[rnum - 1].as_mut() {
            piece.set_caste(Caste::King);
        }
        Ok(())
    }

    /// Demote the piece on `rnum` back to a man.
    pub fn demote_piece(&mut self, rnum: Rnum) -> Result<()> {
        self.check_rnum(rnum)?;
        match self.squares[rnum - 1].as_mut() {
            Some(piece) => {
                piece.set_caste(Caste::Man);
                Ok(())
            }
            None => Err(self.empty_error(Pos::Rnum(rnum))),
        }
    }

    /// Whether the piece on `rnum` is a man that may be crowned.
    pub fn promotable(&self, rnum: Rnum, only_kings_row: bool) -> Result<bool> {
        let piece = self.at(Pos::Rnum(rnum))?;
        if piece.is_king() {
            return Ok(false);
        }
        if !only_kings_row {
            return Ok(true);
        }
        let (row, _) = self.rowcol(rnum)?;
        Ok(row == self.kings_row(piece.color()))
    }

    /// Remove every piece.
    pub fn clear(&mut self) {
        self.squares.iter_mut().for_each(|sq| *sq = None);
    }

    /// Unchecked take used by move simulation.
    pub(crate) fn take(&mut self, rnum: Rnum) -> Option<Piece> {
        self.squares.get_mut(rnum.wrapping_sub(1)).and_then(Option::take)
    }

    /// Unchecked put used by move simulation.
    pub(crate) fn put(&mut self, rnum: Rnum, piece: Piece) {
        if let Some(slot) = self.squares.get_mut(rnum.wrapping_sub(1)) {
            *slot = Some(piece);
        }
    }

    // -------------------------------------------------------------------------
    // Queries
    // -------------------------------------------------------------------------

    pub fn is_square_occupied(&self, pos: impl Into<Pos>) -> Result<bool> {
        let rnum = self.resolve(pos.into())?;
        Ok(self.squares[rnum - 1].is_some())
    }

    pub fn is_square_empty(&self, pos: impl Into<Pos>) -> Result<bool> {
        self.is_square_occupied(pos).map(|occupied| !occupied)
    }

    /// The piece at `pos`, which must exist.
    pub fn at(&self, pos: impl Into<Pos>) -> Result<&Piece> {
        let pos = pos.into();
        let rnum = self.resolve(pos)?;
        self.squares[rnum - 1]
            .as_ref()
            .ok_or_else(|| self.empty_error(pos))
    }

    /// The piece on `rnum`, if any. Never fails.
    pub fn get(&self, rnum: Rnum) -> Option<&Piece> {
        self.squares.get(rnum.wrapping_sub(1)).and_then(Option::as_ref)
    }

    /// Number of pieces on the board.
    pub fn len(&self) -> usize {
        self.squares.iter().filter(|sq| sq.is_some()).count()
    }

    pub fn is_empty(&self) -> bool {
        self.squares.iter().all(Option::is_none)
    }

    /// Number of pieces of one color.
    pub fn count(&self, color: Color) -> usize {
        self.pieces().filter(|(_, p)| p.color() == color).count()
    }

    /// Occupied squares in ascending order.
    pub fn positions(&self) -> Vec<Rnum> {
        self.pieces().map(|(rnum, _)| rnum).collect()
    }

    /// Iterate `(rnum, piece)` over occupied squares in ascending order.
    pub fn pieces(&self) -> impl Iterator<Item = (Rnum, &Piece)> + '_ {
        self.squares
            .iter()
            .enumerate()
            .filter_map(|(i, sq)| sq.as_ref().map(|p| (i + 1, p)))
    }

    // -------------------------------------------------------------------------
    // Geometry
    // -------------------------------------------------------------------------

    /// Dark squares alternate: on even rows the odd columns are dark, on odd
    /// rows the even columns.
    pub fn is_dark_square(row: usize, col: usize) -> bool {
        if row % 2 == 0 { col % 2 == 1 } else { col % 2 == 0 }
    }

    pub fn is_light_square(row: usize, col: usize) -> bool {
        !Self::is_dark_square(row, col)
    }

    pub fn square_shade(row: usize, col: usize) -> SquareShade {
        if Self::is_dark_square(row, col) {
            SquareShade::Dark
        } else {
            SquareShade::Light
        }
    }

    /// Whether a position lies on the board. Never fails.
    pub fn is_pos_on_board(&self, pos: impl Into<Pos>) -> bool {
        match pos.into() {
            Pos::Rnum(rnum) => (self.rnum_min()..=self.rnum_max()).contains(&rnum),
            Pos::RowCol(row, col) => row < self.size && col < self.size,
        }
    }

    /// Step from `(row, col)` by `(drow, dcol)`, if the target is on the board.
    pub fn offset(&self, (row, col): (usize, usize), (drow, dcol): (isize, isize)) -> Option<(usize, usize)> {
        let row = row.checked_add_signed(drow)?;
        let col = col.checked_add_signed(dcol)?;
        self.is_pos_on_board((row, col)).then_some((row, col))
    }

    /// Convert `(row, col)` to its reachable number.
    pub fn rnum(&self, row: usize, col: usize) -> Result<Rnum> {
        if !self.is_pos_on_board((row, col)) {
            return Err(CheckersError::OffBoard { row, col });
        }
        if !Self::is_dark_square(row, col) {
            return Err(CheckersError::NotPlayable { row, col });
        }
        Ok(row * self.dark_squares_per_row() + (col + row_adjust(row)) / 2)
    }

    /// Convert a reachable number to `(row, col)`.
    pub fn rowcol(&self, rnum: Rnum) -> Result<(usize, usize)> {
        self.check_rnum(rnum)?;
        let per_row = self.dark_squares_per_row();
        let row = (rnum - 1) / per_row;
        let col = 2 * (rnum - row * per_row) - row_adjust(row);
        Ok((row, col))
    }

    // -------------------------------------------------------------------------
    // Rendering
    // -------------------------------------------------------------------------

    /// Render the board as text, black's back row on top.
    ///
    /// With `annotate`, row/column indices and the side names are added and
    /// empty dark squares show their rnum. Squares listed in `soi` are marked
    /// with `*`. Pieces are drawn as [`Piece::letter`].
    pub fn render(&self, annotate: bool, soi: &[Rnum]) -> String {
        self.render_with(annotate, soi, Piece::letter)
    }

    /// Same as [`Board::render`] with pieces drawn as Unicode figurines.
    pub fn render_figurines(&self, annotate: bool, soi: &[Rnum]) -> String {
        self.render_with(annotate, soi, Piece::figurine)
    }

    fn render_with(&self, annotate: bool, soi: &[Rnum], glyph: impl Fn(&Piece) -> char) -> String {
        let mut out = String::new();
        let indent = if annotate { "   " } else { "" };
        let width = 4 * self.size;
        if annotate {
            out.push_str(&format!("{indent}{:^width$}\n", "Black"));
            out.push_str(&self.column_header(indent));
        }
        for row in 0..self.size {
            if annotate {
                out.push_str(&format!("{row:>2} "));
            }
            for col in 0..self.size {
                if Self::is_light_square(row, col) {
                    out.push_str("    ");
                    continue;
                }
                let rnum = row * self.dark_squares_per_row() + (col + row_adjust(row)) / 2;
                let mark = if soi.contains(&rnum) { '*' } else { ' ' };
                let cell = match self.get(rnum) {
                    Some(piece) => glyph(piece).to_string(),
                    None if annotate => rnum.to_string(),
                    None => ".".to_string(),
                };
                out.push_str(&format!("{mark}{cell:<3}"));
            }
            if annotate {
                out.push_str(&format!("{row:>2}"));
            }
            out.push('\n');
        }
        if annotate {
            out.push_str(&self.column_header(indent));
            out.push_str(&format!("{indent}{:^width$}\n", "White"));
        }
        out
    }

    fn column_header(&self, indent: &str) -> String {
        let mut s = indent.to_string();
        for col in 0..self.size {
            s.push_str(&format!("{col:>2}  "));
        }
        s.push('\n');
        s
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn resolve(&self, pos: Pos) -> Result<Rnum> {
        match pos {
            Pos::Rnum(rnum) => {
                self.check_rnum(rnum)?;
                Ok(rnum)
            }
            Pos::RowCol(row, col) => self.rnum(row, col),
        }
    }

    fn check_rnum(&self, rnum: Rnum) -> Result<()> {
        if self.is_pos_on_board(rnum) {
            Ok(())
        } else {
            Err(CheckersError::InvalidSquare(rnum))
        }
    }

    fn check_empty(&self, rnum: Rnum) -> Result<()> {
        self.check_rnum(rnum)?;
        match &self.squares[rnum - 1] {
            Some(occupant) => Err(CheckersError::SquareOccupied {
                pos: self.describe(Pos::Rnum(rnum)),
                occupant: occupant.to_string(),
            }),
            None => Ok(()),
        }
    }

    fn empty_error(&self, pos: Pos) -> CheckersError {
        CheckersError::SquareEmpty {
            pos: self.describe(pos),
        }
    }

    /// `position 14 (3,2)` style description for error messages.
    fn describe(&self, pos: Pos) -> String {
        let resolved = match pos {
            Pos::Rnum(rnum) => self.rowcol(rnum).map(|rc| (rnum, rc)),
            Pos::RowCol(row, col) => self.rnum(row, col).map(|rnum| (rnum, (row, col))),
        };
        match resolved {
            Ok((rnum, (row, col))) => format!("position {rnum} ({row},{col})"),
            Err(_) => format!("position {pos:?}"),
        }
    }
}

/// Column adjustment between even and odd rows.
fn row_adjust(row: usize) -> usize {
    1 + row % 2
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.render(true, &[]))
    }
}
