//! Checkers pieces: color, caste and identity.

use std::fmt;
use std::str::FromStr;

use crate::error::CheckersError;

/// Side a piece belongs to. Black moves first.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Color {
    Black,
    White,
}

impl Color {
    /// Both colors in play order.
    pub const ALL: [Color; 2] = [Color::Black, Color::White];

    pub fn opponent(self) -> Color {
        match self {
            Color::Black => Color::White,
            Color::White => Color::Black,
        }
    }

    /// Index into per-color tables.
    pub fn index(self) -> usize {
        match self {
            Color::Black => 0,
            Color::White => 1,
        }
    }

    /// Capitalized name, as used in outcome messages.
    pub fn title(self) -> &'static str {
        match self {
            Color::Black => "Black",
            Color::White => "White",
        }
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Color::Black => write!(f, "black"),
            Color::White => write!(f, "white"),
        }
    }
}

impl FromStr for Color {
    type Err = CheckersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "black" => Ok(Color::Black),
            "white" => Ok(Color::White),
            _ => Err(CheckersError::UnknownValue {
                what: "color",
                value: s.to_string(),
            }),
        }
    }
}

/// Piece rank. Kings move along all four diagonals.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Caste {
    Man,
    King,
}

impl fmt::Display for Caste {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Caste::Man => write!(f, "man"),
            Caste::King => write!(f, "king"),
        }
    }
}

impl FromStr for Caste {
    type Err = CheckersError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "man" => Ok(Caste::Man),
            "king" => Ok(Caste::King),
            _ => Err(CheckersError::UnknownValue {
                what: "caste",
                value: s.to_string(),
            }),
        }
    }
}

/// A piece on (or captured from) the board.
///
/// The `ident` is fixed when the piece is created and follows it into
/// captivity; it plays no part in the rules.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Piece {
    color: Color,
    caste: Caste,
    ident: usize,
}

impl Piece {
    pub fn new(color: Color, caste: Caste, ident: usize) -> Self {
        Self {
            color,
            caste,
            ident,
        }
    }

    pub fn color(&self) -> Color {
        self.color
    }

    pub fn caste(&self) -> Caste {
        self.caste
    }

    pub fn ident(&self) -> usize {
        self.ident
    }

    pub fn is_king(&self) -> bool {
        self.caste == Caste::King
    }

    /// Color of this piece's opponent.
    pub fn foe(&self) -> Color {
        self.color.opponent()
    }

    pub(crate) fn set_caste(&mut self, caste: Caste) {
        self.caste = caste;
    }

    /// Fully-qualified name, e.g. `black.man.9`.
    pub fn fqname(&self) -> String {
        format!("{}.{}.{}", self.color, self.caste, self.ident)
    }

    /// Unicode draughts figurine.
    pub fn figurine(&self) -> char {
        match (self.color, self.caste) {
            (Color::Black, Caste::Man) => '\u{26c2}',
            (Color::Black, Caste::King) => '\u{26c3}',
            (Color::White, Caste::Man) => '\u{26c0}',
            (Color::White, Caste::King) => '\u{26c1}',
        }
    }

    /// Single ASCII letter: `b`/`w` for men, `B`/`W` for kings.
    pub fn letter(&self) -> char {
        let c = match self.color {
            Color::Black => 'b',
            Color::White => 'w',
        };
        if self.is_king() { c.to_ascii_uppercase() } else { c }
    }
}

impl fmt::Display for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.color, self.caste)
    }
}
