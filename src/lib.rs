//! Checkers-Rust: a checkers (draughts) engine.
//!
//! The crate models an N×N checkers board whose dark squares are addressed by
//! reachable numbers (rnums), generates legal move paths including multi-jump
//! chains, and runs games through a small state machine.
//!
//! ## Modules
//!
//! - [`constants`] - Board defaults, move patterns and notation symbols
//! - [`piece`] - Colors, castes and pieces
//! - [`board`] - Square numbering and piece placement
//! - [`path`] - Move paths and their text notation
//! - [`movegen`] - Move generation, validation and execution
//! - [`game`] - Turns, history, captures and end of game
//! - [`bot`] - Random and longest-move players
//! - [`console`] - Line-oriented command interpreter
//! - [`error`] - Error type shared by the library
//!
//! ## Example
//!
//! ```
//! use checkers_rust::game::Game;
//! use checkers_rust::piece::Color;
//!
//! let mut game = Game::english_draughts();
//! game.setup().unwrap();
//! game.make_a_move_nota("9-14").unwrap();
//! game.make_a_move_nota("23-18").unwrap();
//! assert_eq!(game.turn(), Color::Black);
//! assert_eq!(game.move_num(), 2);
//! ```

pub mod board;
pub mod bot;
pub mod console;
pub mod constants;
pub mod error;
pub mod game;
pub mod movegen;
pub mod path;
pub mod piece;
