//! Move paths and standard checkers move notation.
//!
//! A path is an origin square followed by one or more `(operator, square)`
//! steps, written `9-14` for a simple slide or `23x16x7` for a jump chain.

use std::fmt;
use std::str::FromStr;

use crate::board::Rnum;
use crate::constants::{MOP_JUMP, MOP_SIMPLE};
use crate::error::{CheckersError, Result};

/// Move operator.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Mop {
    /// Slide to an adjacent diagonal square.
    Simple,
    /// Jump over and capture an adjacent opponent.
    Jump,
}

impl Mop {
    pub fn symbol(self) -> char {
        match self {
            Mop::Simple => MOP_SIMPLE,
            Mop::Jump => MOP_JUMP,
        }
    }

    /// Squares travelled by one step.
    pub fn distance(self) -> usize {
        match self {
            Mop::Simple => 1,
            Mop::Jump => 2,
        }
    }

    fn from_symbol(c: char) -> Option<Mop> {
        match c {
            MOP_SIMPLE => Some(Mop::Simple),
            MOP_JUMP => Some(Mop::Jump),
            _ => None,
        }
    }
}

/// A move path `[rnum, op, rnum, op, rnum, ...]`.
#[derive(Clone, Debug, PartialEq, Eq, Hash)]
pub struct MovePath {
    origin: Rnum,
    steps: Vec<(Mop, Rnum)>,
}

impl MovePath {
    /// A path that has not gone anywhere yet.
    pub fn new(origin: Rnum) -> Self {
        Self {
            origin,
            steps: Vec::new(),
        }
    }

    /// A single step path.
    pub fn single(from: Rnum, mop: Mop, to: Rnum) -> Self {
        Self {
            origin: from,
            steps: vec![(mop, to)],
        }
    }

    pub fn simple(from: Rnum, to: Rnum) -> Self {
        Self::single(from, Mop::Simple, to)
    }

    /// A jump chain visiting `squares` in order after `from`.
    pub fn jumps(from: Rnum, squares: &[Rnum]) -> Self {
        Self {
            origin: from,
            steps: squares.iter().map(|&sq| (Mop::Jump, sq)).collect(),
        }
    }

    pub fn push(&mut self, mop: Mop, to: Rnum) {
        self.steps.push((mop, to));
    }

    pub fn origin(&self) -> Rnum {
        self.origin
    }

    /// Final landing square.
    pub fn destination(&self) -> Rnum {
        self.steps.last().map_or(self.origin, |&(_, sq)| sq)
    }

    pub fn steps(&self) -> &[(Mop, Rnum)] {
        &self.steps
    }

    /// Iterate `(from, op, to)` segments.
    pub fn segments(&self) -> impl Iterator<Item = (Rnum, Mop, Rnum)> + '_ {
        let froms = std::iter::once(self.origin).chain(self.steps.iter().map(|&(_, sq)| sq));
        froms.zip(self.steps.iter()).map(|(from, &(mop, to))| (from, mop, to))
    }

    /// Number of elements in the alternating `[rnum, op, rnum, ...]` form.
    pub fn len(&self) -> usize {
        1 + 2 * self.steps.len()
    }

    /// True when the path has no steps.
    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }

    /// Distance travelled in squares: 1 per slide, 2 per jump.
    pub fn distance(&self) -> usize {
        self.steps.iter().map(|&(mop, _)| mop.distance()).sum()
    }

    /// Whether the path captures anything.
    pub fn is_jump(&self) -> bool {
        self.steps.iter().any(|&(mop, _)| mop == Mop::Jump)
    }

    /// Every square the path visits, origin first.
    pub fn squares(&self) -> impl Iterator<Item = Rnum> + '_ {
        std::iter::once(self.origin).chain(self.steps.iter().map(|&(_, sq)| sq))
    }

    /// Append `other` to this path. `other` must start where this path ends.
    pub fn join(&self, other: &MovePath) -> Result<MovePath> {
        if self.destination() != other.origin {
            return Err(CheckersError::PathMismatch {
                end: self.destination(),
                start: other.origin,
            });
        }
        let mut joined = self.clone();
        joined.steps.extend_from_slice(&other.steps);
        Ok(joined)
    }
}

impl fmt::Display for MovePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.origin)?;
        for &(mop, sq) in &self.steps {
            write!(f, "{}{}", mop.symbol(), sq)?;
        }
        Ok(())
    }
}

impl FromStr for MovePath {
    type Err = CheckersError;

    fn from_str(s: &str) -> Result<Self> {
        nota_to_path(s)
    }
}

/// Join two paths sharing a pivot square.
pub fn join(path0: &MovePath, path1: &MovePath) -> Result<MovePath> {
    path0.join(path1)
}

/// Render a path in standard notation.
pub fn path_to_nota(path: &MovePath) -> String {
    path.to_string()
}

// =============================================================================
// Tokenizer
// =============================================================================

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum TokenKind {
    Rnum(Rnum),
    Mop(Mop),
}

impl TokenKind {
    fn name(self) -> &'static str {
        match self {
            TokenKind::Rnum(_) => "rnum",
            TokenKind::Mop(_) => "mop",
        }
    }

    fn text(self) -> String {
        match self {
            TokenKind::Rnum(n) => n.to_string(),
            TokenKind::Mop(m) => m.symbol().to_string(),
        }
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
struct Token {
    kind: TokenKind,
    column: usize,
}

fn tokenize(nota: &str) -> Result<Vec<Token>> {
    let mut tokens = Vec::new();
    let mut chars = nota.char_indices().peekable();
    while let Some((column, c)) = chars.next() {
        if c == ' ' || c == '\t' {
            continue;
        }
        if let Some(mop) = Mop::from_symbol(c) {
            tokens.push(Token {
                kind: TokenKind::Mop(mop),
                column,
            });
            continue;
        }
        if !c.is_ascii_digit() {
            return Err(CheckersError::Notation {
                nota: nota.to_string(),
                reason: format!("{c:?} at column {column}: unexpected token"),
            });
        }
        let mut end = column + c.len_utf8();
        while let Some(&(i, d)) = chars.peek() {
            if !d.is_ascii_digit() {
                break;
            }
            end = i + d.len_utf8();
            chars.next();
        }
        let value = nota[column..end]
            .parse::<Rnum>()
            .map_err(|e| CheckersError::Notation {
                nota: nota.to_string(),
                reason: format!("{:?}: {e}", &nota[column..end]),
            })?;
        tokens.push(Token {
            kind: TokenKind::Rnum(value),
            column,
        });
    }
    Ok(tokens)
}

/// Parse standard notation into a path.
///
/// Squares and operators must alternate, starting and ending with a square.
/// Blanks are ignored. Square numbers are not checked against any board.
pub fn nota_to_path(nota: &str) -> Result<MovePath> {
    let tokens = tokenize(nota)?;
    let missing_last = || CheckersError::Notation {
        nota: nota.to_string(),
        reason: "missing last rnum".to_string(),
    };
    if tokens.len() % 2 == 0 {
        return Err(missing_last());
    }

    let mismatch = |tok: &Token, expected: &str| CheckersError::Notation {
        nota: nota.to_string(),
        reason: format!(
            "{:?} at column {}: expected {expected:?}, got {:?}",
            tok.kind.text(),
            tok.column,
            tok.kind.name()
        ),
    };

    let mut iter = tokens.iter();
    let origin = match iter.next() {
        Some(Token {
            kind: TokenKind::Rnum(n),
            ..
        }) => *n,
        Some(tok) => return Err(mismatch(tok, "rnum")),
        None => return Err(missing_last()),
    };
    let mut path = MovePath::new(origin);
    while let (Some(op), Some(sq)) = (iter.next(), iter.next()) {
        let mop = match op.kind {
            TokenKind::Mop(m) => m,
            TokenKind::Rnum(_) => return Err(mismatch(op, "mop")),
        };
        let to = match sq.kind {
            TokenKind::Rnum(n) => n,
            TokenKind::Mop(_) => return Err(mismatch(sq, "rnum")),
        };
        path.push(mop, to);
    }
    Ok(path)
}

// =============================================================================
// Path collections
// =============================================================================

/// All paths of maximal distance. Empty input gives an empty result.
pub fn max_paths(paths: &[MovePath]) -> Vec<MovePath> {
    let best = max_path_len(paths);
    paths
        .iter()
        .filter(|p| p.distance() == best)
        .cloned()
        .collect()
}

/// Longest distance among `paths`, 0 if there are none.
pub fn max_path_len(paths: &[MovePath]) -> usize {
    paths.iter().map(MovePath::distance).max().unwrap_or(0)
}

/// Unique squares mentioned by `paths`, in first-seen order.
pub fn rnums_in_paths(paths: &[MovePath]) -> Vec<Rnum> {
    let mut rnums = Vec::new();
    for sq in paths.iter().flat_map(MovePath::squares) {
        if !rnums.contains(&sq) {
            rnums.push(sq);
        }
    }
    rnums
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_path_to_nota() {
        assert_eq!(path_to_nota(&MovePath::simple(9, 14)), "9-14");
        assert_eq!(MovePath::jumps(23, &[16, 7]).to_string(), "23x16x7");
    }

    #[test]
    fn test_nota_to_path() {
        let path = nota_to_path("9-14").unwrap();
        assert_eq!(path, MovePath::simple(9, 14));
        assert_eq!(path.len(), 3);

        let chain: MovePath = "3 x 10 x 17".parse().unwrap();
        assert_eq!(chain, MovePath::jumps(3, &[10, 17]));
        assert_eq!(chain.len(), 5);
        assert_eq!(chain.destination(), 17);
    }

    #[test]
    fn test_nota_lone_square_is_a_path_without_steps() {
        let path = nota_to_path("9").unwrap();
        assert!(path.is_empty());
        assert_eq!(path.len(), 1);
    }

    #[test]
    fn test_nota_missing_last_rnum() {
        let err = nota_to_path("9-").unwrap_err();
        assert_eq!(err.to_string(), "\"9-\": missing last rnum");
        assert!(nota_to_path("").is_err());
    }

    #[test]
    fn test_nota_wrong_token_kind() {
        let err = nota_to_path("9 14 x").unwrap_err();
        assert!(err.to_string().contains("expected \"mop\", got \"rnum\""), "{err}");
        assert!(nota_to_path("-9-14").is_err());
        assert!(nota_to_path("9--14").is_err());
    }

    #[test]
    fn test_nota_unexpected_character() {
        let err = nota_to_path("9/14").unwrap_err();
        assert!(err.to_string().contains("unexpected token"), "{err}");
    }

    #[test]
    fn test_join() {
        let first = MovePath::single(3, Mop::Jump, 10);
        let second = MovePath::single(10, Mop::Jump, 17);
        assert_eq!(join(&first, &second).unwrap(), MovePath::jumps(3, &[10, 17]));

        let err = join(&first, &MovePath::simple(11, 15)).unwrap_err();
        assert_eq!(err, CheckersError::PathMismatch { end: 10, start: 11 });
    }

    #[test]
    fn test_segments() {
        let chain = MovePath::jumps(1, &[10, 19, 28]);
        let segs: Vec<_> = chain.segments().collect();
        assert_eq!(
            segs,
            vec![(1, Mop::Jump, 10), (10, Mop::Jump, 19), (19, Mop::Jump, 28)]
        );
    }

    #[test]
    fn test_max_paths_and_rnums() {
        let paths = vec![
            MovePath::simple(14, 17),
            MovePath::single(14, Mop::Jump, 23),
            MovePath::jumps(14, &[23, 32]),
            MovePath::jumps(14, &[23, 30]),
        ];
        assert_eq!(max_path_len(&paths), 4);
        assert_eq!(max_paths(&paths), paths[2..].to_vec());
        assert_eq!(rnums_in_paths(&paths), vec![14, 17, 23, 32, 30]);
        assert!(max_paths(&[]).is_empty());
        assert_eq!(max_path_len(&[]), 0);
    }
}
