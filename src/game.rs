//! Checkers game: turn order, move execution and end-of-game detection.
//!
//! A game moves through three states:
//!
//! ```text
//! NotStarted --start/first move--> InPlay --no moves/stop/resign--> GameOver
//! ```
//!
//! `clear` and `setup` return to `NotStarted` from any state.

use std::fmt;
use std::time::{Duration, Instant};

use log::info;

use crate::board::{Board, Rnum};
use crate::constants::{DEFAULT_SIZE, STD_ROWS_PER_SIDE};
use crate::error::{CheckersError, Result};
use crate::movegen;
use crate::path::MovePath;
use crate::piece::{Caste, Color, Piece};

/// Game play state.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum State {
    NotStarted,
    InPlay,
    GameOver,
}

impl fmt::Display for State {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            State::NotStarted => write!(f, "nogame"),
            State::InPlay => write!(f, "inplay"),
            State::GameOver => write!(f, "gameover"),
        }
    }
}

/// Why a game ended.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum EndReason {
    /// Stopped with no winner.
    Abort,
    /// A player resigned.
    Resign,
    /// A player ran out of pieces.
    Defeat,
    /// A player still had pieces but none could move.
    Draw,
}

/// Game variant: board size and standard starting rows.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GameConfig {
    pub name: String,
    pub size: usize,
    pub rows_per_side: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::english_draughts()
    }
}

impl GameConfig {
    /// English draughts (American checkers): 8x8, three rows per side.
    pub fn english_draughts() -> Self {
        Self {
            name: "English Draughts".to_string(),
            size: DEFAULT_SIZE,
            rows_per_side: STD_ROWS_PER_SIDE,
        }
    }

    /// English draughts rules on another board size.
    pub fn variation(size: usize, rows_per_side: usize) -> Self {
        if size == DEFAULT_SIZE && rows_per_side == STD_ROWS_PER_SIDE {
            return Self::english_draughts();
        }
        Self {
            name: "English Draughts Variation".to_string(),
            size,
            rows_per_side,
        }
    }
}

/// A game of checkers.
pub struct Game {
    config: GameConfig,
    board: Board,
    /// Captured pieces, indexed by the captured piece's color.
    kur: [Vec<Piece>; 2],
    history: Vec<String>,
    state: State,
    move_num: u32,
    turn: Color,
    eog: Option<EndReason>,
    winner: Option<Color>,
    started: Option<Instant>,
    ended: Option<Instant>,
}

impl Default for Game {
    fn default() -> Self {
        Self::new(GameConfig::default())
    }
}

impl Game {
    /// Create a game with an empty board.
    pub fn new(config: GameConfig) -> Self {
        let board = Board::new(config.size);
        Self {
            config,
            board,
            kur: [Vec::new(), Vec::new()],
            history: Vec::new(),
            state: State::NotStarted,
            move_num: 0,
            turn: Color::Black,
            eog: None,
            winner: None,
            started: None,
            ended: None,
        }
    }

    /// Standard 8x8 English draughts, not yet set up.
    pub fn english_draughts() -> Self {
        Self::new(GameConfig::english_draughts())
    }

    // -------------------------------------------------------------------------
    // Lifecycle
    // -------------------------------------------------------------------------

    /// Reset everything, leaving an empty board.
    pub fn clear(&mut self) {
        self.board.clear();
        self.kur = [Vec::new(), Vec::new()];
        self.history.clear();
        self.state = State::NotStarted;
        self.move_num = 0;
        self.turn = Color::Black;
        self.eog = None;
        self.winner = None;
        self.started = None;
        self.ended = None;
    }

    /// Reset and place the standard starting position: black men on the
    /// lowest squares, white men on the highest.
    pub fn setup(&mut self) -> Result<()> {
        self.clear();
        self.move_num = 1;
        let per_side = self.pieces_per_side();
        let rnum_max = self.board.rnum_max();
        for rnum in 1..=per_side {
            self.board.add_new_piece(rnum, Color::Black, Caste::Man)?;
        }
        for rnum in rnum_max + 1 - per_side..=rnum_max {
            self.board.add_new_piece(rnum, Color::White, Caste::Man)?;
        }
        info!("{self} set up with {per_side} pieces per side");
        Ok(())
    }

    /// Men per side in the standard position, capped so the sides never
    /// overlap.
    pub fn pieces_per_side(&self) -> usize {
        let n = self.config.rows_per_side * self.board.dark_squares_per_row();
        n.min(self.board.rnum_max() / 2)
    }

    /// Begin play. Each side needs at least one piece.
    pub fn start(&mut self) -> Result<()> {
        self.require_state("start", State::NotStarted)?;
        self.check_can_start()?;
        self.state = State::InPlay;
        self.move_num = 1;
        self.turn = Color::Black;
        self.started = Some(Instant::now());
        self.ended = None;
        self.history.push("STARTED".to_string());
        info!("{self} started");
        Ok(())
    }

    /// Abort an in-play game with no winner.
    pub fn stop(&mut self) -> Result<()> {
        self.require_state("stop", State::InPlay)?;
        self.finish(EndReason::Abort, None, "ABORTED".to_string());
        Ok(())
    }

    /// `color` resigns; the opponent wins.
    pub fn resign(&mut self, color: Color) -> Result<()> {
        self.require_state("resign", State::InPlay)?;
        self.finish(
            EndReason::Resign,
            Some(color.opponent()),
            format!("RESIGNED({color})"),
        );
        Ok(())
    }

    // -------------------------------------------------------------------------
    // Board editing before play
    // -------------------------------------------------------------------------

    /// Place a piece by hand. Only allowed before the game starts.
    pub fn add_piece(&mut self, rnum: Rnum, color: Color, caste: Caste) -> Result<&Piece> {
        self.require_state("add", State::NotStarted)?;
        self.board.add_new_piece(rnum, color, caste)
    }

    /// Remove a piece by hand. Only allowed before the game starts.
    pub fn remove_piece(&mut self, rnum: Rnum) -> Result<Piece> {
        self.require_state("remove", State::NotStarted)?;
        self.board.remove_piece(rnum)
    }

    // -------------------------------------------------------------------------
    // Moves
    // -------------------------------------------------------------------------

    /// Play a move for the side to move.
    ///
    /// A game that has not started is started automatically once the move is
    /// known to be legal. Nothing changes if the move is rejected.
    pub fn make_a_move(&mut self, path: &MovePath) -> Result<()> {
        match self.state {
            State::GameOver => {
                return Err(CheckersError::InvalidState {
                    op: "move",
                    state: self.state,
                });
            }
            State::NotStarted => {
                movegen::validate_move(&self.board, self.turn, path)?;
                self.start()?;
            }
            State::InPlay => {}
        }

        let captured = movegen::execute_move(&mut self.board, self.turn, path)?;
        for piece in captured {
            self.kur[piece.color().index()].push(piece);
        }
        self.add_move_to_history(path);
        info!("{} {}: {path}", self.move_num, self.turn);

        self.turn = self.turn.opponent();
        if self.turn == Color::Black {
            self.move_num += 1;
        }
        self.check_is_game_over(self.turn);
        Ok(())
    }

    /// Parse `nota` and play it.
    pub fn make_a_move_nota(&mut self, nota: &str) -> Result<MovePath> {
        let path: MovePath = nota.parse()?;
        self.make_a_move(&path)?;
        Ok(path)
    }

    /// All candidate paths for the piece on `rnum`.
    pub fn take_a_peek(&self, rnum: Rnum) -> Vec<MovePath> {
        movegen::find_move_paths(&self.board, rnum, false)
    }

    /// Whether the piece on `rnum` can move at all.
    pub fn has_a_move(&self, rnum: Rnum) -> bool {
        movegen::has_a_move(&self.board, rnum)
    }

    /// End the game if `color`, who is about to move, cannot. No pieces is a
    /// defeat; pieces that cannot move is a draw. Returns true if the game
    /// ended.
    pub fn check_is_game_over(&mut self, color: Color) -> bool {
        let mine: Vec<Rnum> = self
            .board
            .pieces()
            .filter(|(_, p)| p.color() == color)
            .map(|(rnum, _)| rnum)
            .collect();
        if mine.iter().any(|&rnum| self.has_a_move(rnum)) {
            return false;
        }
        if mine.is_empty() {
            self.finish(
                EndReason::Defeat,
                Some(color.opponent()),
                format!("DEFEATED({color})"),
            );
        } else {
            self.finish(EndReason::Draw, None, "DRAW".to_string());
        }
        true
    }

    // -------------------------------------------------------------------------
    // Accessors
    // -------------------------------------------------------------------------

    pub fn name(&self) -> &str {
        &self.config.name
    }

    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Pieces of `color` that have been captured.
    pub fn kur(&self, color: Color) -> &[Piece] {
        &self.kur[color.index()]
    }

    pub fn history(&self) -> &[String] {
        &self.history
    }

    pub fn state(&self) -> State {
        self.state
    }

    pub fn move_num(&self) -> u32 {
        self.move_num
    }

    pub fn turn(&self) -> Color {
        self.turn
    }

    pub fn eog(&self) -> Option<EndReason> {
        self.eog
    }

    pub fn winner(&self) -> Option<Color> {
        self.winner
    }

    /// Time since the game started, frozen once it ends.
    pub fn elapsed(&self) -> Option<Duration> {
        let started = self.started?;
        Some(self.ended.unwrap_or_else(Instant::now) - started)
    }

    /// One-line description of the outcome so far.
    pub fn outcome(&self) -> String {
        let n = self.move_num;
        match (self.state, self.eog, self.winner) {
            (State::NotStarted, ..) => "Game not started.".to_string(),
            (State::InPlay, ..) => "Game is in play with no final outcome.".to_string(),
            (State::GameOver, Some(EndReason::Abort), _) => {
                format!("Game was aborted on move {n}.")
            }
            (State::GameOver, Some(EndReason::Resign), Some(w)) => format!(
                "{} won on move {n} as {} resigned.",
                w.title(),
                w.opponent().title()
            ),
            (State::GameOver, Some(EndReason::Defeat), Some(w)) => format!(
                "{} defeated {} on move {n}.",
                w.title(),
                w.opponent().title()
            ),
            (State::GameOver, Some(EndReason::Draw), _) => {
                format!("Game ended in a draw on move {n}.")
            }
            (State::GameOver, ..) => format!("Game over on move {n}."),
        }
    }

    /// The outcome followed by the elapsed play time, once the game has
    /// started.
    pub fn summary(&self) -> String {
        match self.elapsed() {
            Some(elapsed) => format!("{} Elapsed time {}", self.outcome(), format_elapsed(elapsed)),
            None => self.outcome(),
        }
    }

    // -------------------------------------------------------------------------
    // Helpers
    // -------------------------------------------------------------------------

    fn check_can_start(&self) -> Result<()> {
        for color in Color::ALL {
            if self.board.count(color) == 0 {
                return Err(CheckersError::NoPieces(color));
            }
        }
        Ok(())
    }

    fn require_state(&self, op: &'static str, state: State) -> Result<()> {
        if self.state == state {
            Ok(())
        } else {
            Err(CheckersError::InvalidState {
                op,
                state: self.state,
            })
        }
    }

    fn finish(&mut self, reason: EndReason, winner: Option<Color>, event: String) {
        self.state = State::GameOver;
        self.eog = Some(reason);
        self.winner = winner;
        self.ended = Some(Instant::now());
        info!("{self} over: {event}");
        self.history.push(event);
    }

    fn add_move_to_history(&mut self, path: &MovePath) {
        let entry = match self.turn {
            Color::Black => format!("{}. {path}", self.move_num),
            Color::White => path.to_string(),
        };
        self.history.push(entry);
    }
}

/// `H:MM:SS.mmm`
pub fn format_elapsed(elapsed: Duration) -> String {
    let secs = elapsed.as_secs();
    format!(
        "{}:{:02}:{:02}.{:03}",
        secs / 3600,
        secs / 60 % 60,
        secs % 60,
        elapsed.subsec_millis()
    )
}

impl fmt::Display for Game {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let size = self.board.size();
        write!(f, "{size}x{size} {}", self.config.name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn standard() -> Game {
        let mut game = Game::english_draughts();
        game.setup().unwrap();
        game
    }

    #[test]
    fn test_setup_standard_position() {
        let game = standard();
        assert_eq!(game.state(), State::NotStarted);
        assert_eq!(game.move_num(), 1);
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.board().count(Color::Black), 12);
        assert_eq!(game.board().count(Color::White), 12);
        assert_eq!(game.board().positions()[..12].to_vec(), (1..=12).collect::<Vec<usize>>());
        assert_eq!(game.to_string(), "8x8 English Draughts");
    }

    #[test]
    fn test_variation_setup() {
        let mut game = Game::new(GameConfig::variation(10, 3));
        game.setup().unwrap();
        assert_eq!(game.name(), "English Draughts Variation");
        assert_eq!(game.board().count(Color::Black), 15);
        assert!(game.board().get(36).is_some());
        assert!(game.board().get(35).is_none());

        let mut small = Game::new(GameConfig::variation(4, 3));
        small.setup().unwrap();
        assert_eq!(small.board().count(Color::Black), 4);
        assert_eq!(small.board().count(Color::White), 4);
    }

    #[test]
    fn test_start_requires_both_colors() {
        let mut game = Game::english_draughts();
        assert_eq!(game.start(), Err(CheckersError::NoPieces(Color::Black)));
        game.add_piece(1, Color::Black, Caste::Man).unwrap();
        assert_eq!(game.start(), Err(CheckersError::NoPieces(Color::White)));
        game.add_piece(32, Color::White, Caste::Man).unwrap();
        game.start().unwrap();
        assert_eq!(game.state(), State::InPlay);
        assert_eq!(game.history(), ["STARTED"]);

        let err = game.start().unwrap_err();
        assert_eq!(err.to_string(), "start: invalid in inplay state");
        assert!(game.add_piece(2, Color::Black, Caste::Man).is_err());
    }

    #[test]
    fn test_first_move_auto_starts() {
        let mut game = standard();
        game.make_a_move_nota("9-14").unwrap();
        assert_eq!(game.state(), State::InPlay);
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.history(), ["STARTED", "1. 9-14"]);
    }

    #[test]
    fn test_rejected_first_move_does_not_start() {
        let mut game = standard();
        assert!(game.make_a_move_nota("9-18").is_err());
        assert!(game.make_a_move_nota("9-").is_err());
        assert_eq!(game.state(), State::NotStarted);
        assert!(game.history().is_empty());
    }

    #[test]
    fn test_stop_and_resign() {
        let mut game = standard();
        assert!(game.stop().is_err());
        game.start().unwrap();
        game.stop().unwrap();
        assert_eq!(game.eog(), Some(EndReason::Abort));
        assert_eq!(game.winner(), None);
        assert_eq!(game.outcome(), "Game was aborted on move 1.");
        assert!(game.make_a_move_nota("9-14").is_err());

        let mut game = standard();
        game.start().unwrap();
        game.resign(Color::Black).unwrap();
        assert_eq!(game.eog(), Some(EndReason::Resign));
        assert_eq!(game.winner(), Some(Color::White));
        assert_eq!(game.history().last().unwrap(), "RESIGNED(black)");
        assert_eq!(game.outcome(), "White won on move 1 as Black resigned.");
        assert!(game.elapsed().is_some());
        assert!(game
            .summary()
            .starts_with("White won on move 1 as Black resigned. Elapsed time 0:00:"));
    }

    #[test]
    fn test_format_elapsed() {
        assert_eq!(format_elapsed(Duration::from_millis(3_723_045)), "1:02:03.045");
        assert_eq!(format_elapsed(Duration::ZERO), "0:00:00.000");
        assert_eq!(standard().summary(), "Game not started.");
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut game = standard();
        game.make_a_move_nota("9-14").unwrap();
        game.clear();
        assert_eq!(game.state(), State::NotStarted);
        assert!(game.board().is_empty());
        assert!(game.history().is_empty());
        assert_eq!(game.move_num(), 0);
        assert_eq!(game.turn(), Color::Black);
        assert_eq!(game.elapsed(), None);
        assert_eq!(game.outcome(), "Game not started.");
    }
}
