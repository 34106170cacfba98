//! Integration tests for checkers-rust
//!
//! Game scenarios played through the public API: standard openings, jump
//! chains, promotion, end-of-game detection and bot play.

use checkers_rust::board::Board;
use checkers_rust::bot::{autoplay, BotKind};
use checkers_rust::error::CheckersError;
use checkers_rust::game::{EndReason, Game, GameConfig, State};
use checkers_rust::movegen::find_move_paths;
use checkers_rust::piece::{Caste, Color};

// =============================================================================
// Helper functions for setting up test positions
// =============================================================================

/// An 8x8 game in the standard starting position.
fn standard_game() -> Game {
    let mut game = Game::english_draughts();
    game.setup().unwrap();
    game
}

/// An 8x8 game with hand-placed pieces, already started.
/// Each list entry is (rnum, caste).
fn custom_game(black: &[(usize, Caste)], white: &[(usize, Caste)]) -> Game {
    let mut game = Game::english_draughts();
    for &(rnum, caste) in black {
        game.add_piece(rnum, Color::Black, caste).unwrap();
    }
    for &(rnum, caste) in white {
        game.add_piece(rnum, Color::White, caste).unwrap();
    }
    game.start().unwrap();
    game
}

fn men(rnums: &[usize]) -> Vec<(usize, Caste)> {
    rnums.iter().map(|&r| (r, Caste::Man)).collect()
}

fn notas(game: &Game, rnum: usize) -> Vec<String> {
    game.take_a_peek(rnum).iter().map(ToString::to_string).collect()
}

// =============================================================================
// Square numbering
// =============================================================================

#[test]
fn test_rnum_rowcol_round_trip_all_sizes() {
    for size in [4, 6, 8, 10, 12] {
        let board = Board::new(size);
        for rnum in board.rnum_min()..=board.rnum_max() {
            let (row, col) = board.rowcol(rnum).unwrap();
            assert!(Board::is_dark_square(row, col));
            assert_eq!(board.rnum(row, col).unwrap(), rnum);
        }
        for row in 0..size {
            for col in 0..size {
                if Board::is_dark_square(row, col) {
                    let rnum = board.rnum(row, col).unwrap();
                    assert_eq!(board.rowcol(rnum).unwrap(), (row, col));
                } else {
                    assert!(board.rnum(row, col).is_err());
                }
            }
        }
    }
}

#[test]
fn test_adjacent_squares_alternate_shade() {
    for row in 0..8 {
        for col in 0..7 {
            assert_ne!(
                Board::is_dark_square(row, col),
                Board::is_dark_square(row, col + 1)
            );
            if row < 7 {
                assert_ne!(
                    Board::is_dark_square(row, col),
                    Board::is_dark_square(row + 1, col)
                );
            }
        }
    }
}

// =============================================================================
// Opening scenarios
// =============================================================================

#[test]
fn test_opening_moves_and_turn_order() {
    let mut game = standard_game();
    assert_eq!(game.state(), State::NotStarted);

    game.make_a_move_nota("9-14").unwrap();
    assert_eq!(game.state(), State::InPlay);
    assert!(game.board().get(9).is_none());
    let piece = game.board().get(14).unwrap();
    assert_eq!(piece.color(), Color::Black);
    assert_eq!(piece.ident(), 9);
    assert_eq!(game.turn(), Color::White);
    assert_eq!(game.move_num(), 1);

    game.make_a_move_nota("23-18").unwrap();
    assert!(game.board().get(23).is_none());
    assert_eq!(game.board().get(18).unwrap().color(), Color::White);
    assert_eq!(game.turn(), Color::Black);
    assert_eq!(game.move_num(), 2);

    assert_eq!(game.history(), &["STARTED", "1. 9-14", "23-18"]);
}

#[test]
fn test_illegal_jump_leaves_board_unchanged() {
    let mut game = standard_game();
    let before = game.board().clone();
    let err = game.make_a_move_nota("9x14").unwrap_err();
    assert!(matches!(err, CheckersError::IllegalMove(_)));
    assert_eq!(game.board(), &before);
    assert_eq!(game.state(), State::NotStarted);
    assert!(game.history().is_empty());
}

#[test]
fn test_wrong_turn_rejected() {
    let mut game = standard_game();
    let err = game.make_a_move_nota("23-18").unwrap_err();
    assert!(matches!(err, CheckersError::WrongTurn { turn: Color::Black, .. }));
    assert_eq!(game.state(), State::NotStarted);
}

#[test]
fn test_peek_does_not_mutate() {
    let game = standard_game();
    let before = game.board().clone();
    for rnum in game.board().positions() {
        find_move_paths(game.board(), rnum, false);
    }
    assert_eq!(game.board(), &before);
}

// =============================================================================
// Move rules
// =============================================================================

#[test]
fn test_men_never_move_backward() {
    let game = custom_game(&men(&[14]), &men(&[19]));
    let board = game.board();
    let (row, _) = board.rowcol(14).unwrap();
    for path in game.take_a_peek(14) {
        let (dest_row, _) = board.rowcol(path.destination()).unwrap();
        assert!(dest_row > row, "{path} moves backward");
    }

    let (row, _) = board.rowcol(19).unwrap();
    for path in game.take_a_peek(19) {
        let (dest_row, _) = board.rowcol(path.destination()).unwrap();
        assert!(dest_row < row, "{path} moves backward");
    }
}

#[test]
fn test_king_moves_four_ways() {
    let game = custom_game(&[(14, Caste::King)], &men(&[32]));
    assert_eq!(notas(&game, 14), ["14-9", "14-10", "14-17", "14-18"]);
}

#[test]
fn test_double_jump_fills_kur() {
    let mut game = custom_game(&men(&[3]), &men(&[7, 14, 32]));
    assert_eq!(notas(&game, 3), ["3x10", "3x10x17", "3-8"]);

    game.make_a_move_nota("3x10x17").unwrap();
    assert!(game.board().get(7).is_none());
    assert!(game.board().get(14).is_none());
    assert_eq!(game.board().get(17).unwrap().ident(), 3);

    let idents: Vec<usize> = game.kur(Color::White).iter().map(|p| p.ident()).collect();
    assert_eq!(idents, [7, 14]);
    assert!(game.kur(Color::Black).is_empty());
    assert_eq!(game.state(), State::InPlay);
}

#[test]
fn test_partial_jump_is_legal() {
    let mut game = custom_game(&men(&[3]), &men(&[7, 14, 32]));
    game.make_a_move_nota("3x10").unwrap();
    assert_eq!(game.kur(Color::White).len(), 1);
    assert!(game.board().get(14).is_some());
}

#[test]
fn test_promotion_happens_once_mid_chain() {
    let mut game = custom_game(&men(&[22]), &men(&[26, 27, 32]));
    game.make_a_move_nota("22x31x24").unwrap();
    let king = game.board().get(24).unwrap();
    assert!(king.is_king());
    assert_eq!(king.ident(), 22);
    assert_eq!(game.kur(Color::White).len(), 2);
}

// =============================================================================
// End of game
// =============================================================================

#[test]
fn test_capturing_last_piece_defeats() {
    let mut game = custom_game(&men(&[14]), &men(&[18]));
    game.make_a_move_nota("14x23").unwrap();
    assert_eq!(game.state(), State::GameOver);
    assert_eq!(game.eog(), Some(EndReason::Defeat));
    assert_eq!(game.winner(), Some(Color::Black));
    assert_eq!(game.history().last().unwrap(), "DEFEATED(white)");
    assert_eq!(game.outcome(), "Black defeated White on move 1.");

    let err = game.make_a_move_nota("23-27").unwrap_err();
    assert_eq!(err.to_string(), "move: invalid in gameover state");
}

#[test]
fn test_blocked_side_draws() {
    let mut game = custom_game(&men(&[5]), &men(&[4]));
    game.make_a_move_nota("5-9").unwrap();
    assert_eq!(game.state(), State::GameOver);
    assert_eq!(game.eog(), Some(EndReason::Draw));
    assert_eq!(game.winner(), None);
    assert_eq!(game.outcome(), "Game ended in a draw on move 1.");
}

#[test]
fn test_resign_and_stop() {
    let mut game = standard_game();
    game.start().unwrap();
    game.resign(Color::Black).unwrap();
    assert_eq!(game.outcome(), "White won on move 1 as Black resigned.");
    assert!(game.elapsed().is_some());

    let mut game = standard_game();
    game.start().unwrap();
    game.make_a_move_nota("9-14").unwrap();
    game.make_a_move_nota("23-18").unwrap();
    game.stop().unwrap();
    assert_eq!(game.outcome(), "Game was aborted on move 2.");
    assert_eq!(game.history().last().unwrap(), "ABORTED");
}

// =============================================================================
// Variations and bots
// =============================================================================

#[test]
fn test_small_board_game() {
    let mut game = Game::new(GameConfig::variation(4, 3));
    game.setup().unwrap();
    assert_eq!(game.board().count(Color::Black), 4);
    assert_eq!(game.board().count(Color::White), 4);
    assert_eq!(game.board().positions(), (1..=8).collect::<Vec<usize>>());
}

#[test]
fn test_selfplay_conserves_pieces() {
    for seed in 0..5 {
        let mut game = standard_game();
        game.start().unwrap();
        let mut bots = vec![
            BotKind::Random.create(Color::Black, Some(seed)),
            BotKind::Longest.create(Color::White, Some(seed + 100)),
        ];
        let played = autoplay(&mut game, &mut bots, 300).unwrap();
        let total = game.board().len()
            + game.kur(Color::Black).len()
            + game.kur(Color::White).len();
        assert_eq!(total, 24);
        assert_eq!(game.history().len(), 1 + played.len() + usize::from(game.state() == State::GameOver));
    }
}
