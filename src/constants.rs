//! Board geometry defaults and game parameters.

// =============================================================================
// Board Geometry
// =============================================================================

/// Default board side length (English draughts).
pub const DEFAULT_SIZE: usize = 8;

/// Smallest board the console and command line accept.
pub const MIN_SIZE: usize = 4;

/// Largest board size. Larger requests are capped.
pub const MAX_SIZE: usize = 26;

/// Lowest reachable number on any board.
pub const RNUM_MIN: usize = 1;

/// Rows of men each side starts with in the standard position.
pub const STD_ROWS_PER_SIDE: usize = 3;

// =============================================================================
// Move Patterns
// =============================================================================

/// Diagonal steps for a king.
pub const KING_DELTAS: [(isize, isize); 4] = [(-1, -1), (-1, 1), (1, -1), (1, 1)];

/// Forward diagonals for a black man (black advances toward higher rows).
pub const BLACK_MAN_DELTAS: [(isize, isize); 2] = [(1, -1), (1, 1)];

/// Forward diagonals for a white man.
pub const WHITE_MAN_DELTAS: [(isize, isize); 2] = [(-1, -1), (-1, 1)];

// =============================================================================
// Move Notation
// =============================================================================

/// Simple diagonal slide operator.
pub const MOP_SIMPLE: char = '-';

/// Jump (capture) operator.
pub const MOP_JUMP: char = 'x';

// =============================================================================
// Autoplay
// =============================================================================

/// Default number of half moves for `selfplay`.
pub const DEFAULT_HALF_MOVES: usize = 200;
