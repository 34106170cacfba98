//! Autonomous players.
//!
//! Bots choose among the candidate paths the game reports; they do no search.
//! Each bot owns its own [`fastrand::Rng`] so games can be replayed from a
//! seed.

use std::fmt;
use std::str::FromStr;

use log::debug;

use crate::board::Rnum;
use crate::error::{CheckersError, Result};
use crate::game::{Game, State};
use crate::path::{max_path_len, max_paths, MovePath};
use crate::piece::Color;

/// An autonomous checkers player.
pub trait Bot {
    /// Short one-word tag naming the algorithm.
    fn tag(&self) -> &'static str;

    /// The color this bot plays.
    fn color(&self) -> Color;

    /// Choose and play a move. Returns `None` if no piece of the bot's
    /// color can move.
    fn make_a_move(&mut self, game: &mut Game) -> Result<Option<MovePath>>;

    /// Fully-qualified name, e.g. `black.random`.
    fn fqname(&self) -> String {
        format!("{}.{}", self.color(), self.tag())
    }
}

/// Available bot algorithms.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum BotKind {
    Random,
    Longest,
}

impl BotKind {
    /// Build a bot of this kind. A seed makes its choices reproducible.
    pub fn create(self, color: Color, seed: Option<u64>) -> Box<dyn Bot> {
        let rng = seed.map_or_else(fastrand::Rng::new, fastrand::Rng::with_seed);
        match self {
            BotKind::Random => Box::new(RandomBot::with_rng(color, rng)),
            BotKind::Longest => Box::new(LongestBot::with_rng(color, rng)),
        }
    }
}

impl fmt::Display for BotKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BotKind::Random => write!(f, "random"),
            BotKind::Longest => write!(f, "longest"),
        }
    }
}

impl FromStr for BotKind {
    type Err = CheckersError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "random" => Ok(BotKind::Random),
            "longest" => Ok(BotKind::Longest),
            _ => Err(CheckersError::UnknownValue {
                what: "bot",
                value: s.to_string(),
            }),
        }
    }
}

/// Squares holding pieces of `color`.
fn own_pieces(game: &Game, color: Color) -> Vec<Rnum> {
    game.board()
        .pieces()
        .filter(|(_, p)| p.color() == color)
        .map(|(rnum, _)| rnum)
        .collect()
}

/// Picks a random movable piece, then a random path for it.
pub struct RandomBot {
    color: Color,
    rng: fastrand::Rng,
}

impl RandomBot {
    pub fn new(color: Color) -> Self {
        Self::with_rng(color, fastrand::Rng::new())
    }

    pub fn with_rng(color: Color, rng: fastrand::Rng) -> Self {
        Self { color, rng }
    }
}

impl Bot for RandomBot {
    fn tag(&self) -> &'static str {
        "random"
    }

    fn color(&self) -> Color {
        self.color
    }

    fn make_a_move(&mut self, game: &mut Game) -> Result<Option<MovePath>> {
        let mut rnums = own_pieces(game, self.color);
        while !rnums.is_empty() {
            let rnum = rnums.swap_remove(self.rng.usize(..rnums.len()));
            if !game.has_a_move(rnum) {
                continue;
            }
            let paths = game.take_a_peek(rnum);
            if paths.is_empty() {
                continue;
            }
            let path = paths[self.rng.usize(..paths.len())].clone();
            debug!("{} chose {path} from {} candidates", self.fqname(), paths.len());
            game.make_a_move(&path)?;
            return Ok(Some(path));
        }
        Ok(None)
    }
}

/// Picks randomly among the longest paths of the pieces that can travel
/// furthest.
pub struct LongestBot {
    color: Color,
    rng: fastrand::Rng,
}

impl LongestBot {
    pub fn new(color: Color) -> Self {
        Self::with_rng(color, fastrand::Rng::new())
    }

    pub fn with_rng(color: Color, rng: fastrand::Rng) -> Self {
        Self { color, rng }
    }
}

impl Bot for LongestBot {
    fn tag(&self) -> &'static str {
        "longest"
    }

    fn color(&self) -> Color {
        self.color
    }

    fn make_a_move(&mut self, game: &mut Game) -> Result<Option<MovePath>> {
        let mut best_len = 0;
        let mut best: Vec<Vec<MovePath>> = Vec::new();
        for rnum in own_pieces(game, self.color) {
            if !game.has_a_move(rnum) {
                continue;
            }
            let paths = game.take_a_peek(rnum);
            let len = max_path_len(&paths);
            if len == 0 {
                continue;
            }
            if len > best_len {
                best_len = len;
                best.clear();
            }
            if len == best_len {
                best.push(max_paths(&paths));
            }
        }
        if best.is_empty() {
            return Ok(None);
        }
        let candidates = &best[self.rng.usize(..best.len())];
        let path = candidates[self.rng.usize(..candidates.len())].clone();
        debug!("{} chose {path} (distance {best_len})", self.fqname());
        game.make_a_move(&path)?;
        Ok(Some(path))
    }
}

/// Let `bots` play up to `half_moves` moves while the game is in play.
///
/// The bot whose color matches the side to move plays each half move. Play
/// stops early when the game ends, when no bot plays the side to move, or
/// when that bot has no move. Returns the moves played in order.
pub fn autoplay(
    game: &mut Game,
    bots: &mut [Box<dyn Bot>],
    half_moves: usize,
) -> Result<Vec<(Color, MovePath)>> {
    let mut played = Vec::new();
    while played.len() < half_moves && game.state() == State::InPlay {
        let turn = game.turn();
        let Some(bot) = bots.iter_mut().find(|b| b.color() == turn) else {
            break;
        };
        match bot.make_a_move(game)? {
            Some(path) => played.push((turn, path)),
            None => break,
        }
    }
    Ok(played)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::piece::Caste;

    fn seeded(kind: BotKind, color: Color, seed: u64) -> Box<dyn Bot> {
        kind.create(color, Some(seed))
    }

    #[test]
    fn test_bot_kind_parse() {
        assert_eq!("random".parse::<BotKind>().unwrap(), BotKind::Random);
        assert_eq!("Longest".parse::<BotKind>().unwrap(), BotKind::Longest);
        assert!("minimax".parse::<BotKind>().is_err());
    }

    #[test]
    fn test_fqname() {
        assert_eq!(seeded(BotKind::Random, Color::Black, 1).fqname(), "black.random");
        assert_eq!(seeded(BotKind::Longest, Color::White, 1).fqname(), "white.longest");
    }

    #[test]
    fn test_random_bot_plays_legal_move() {
        let mut game = Game::english_draughts();
        game.setup().unwrap();
        let mut bot = seeded(BotKind::Random, Color::Black, 7);
        let path = bot.make_a_move(&mut game).unwrap().unwrap();
        assert!((9..=12).contains(&path.origin()));
        assert_eq!(game.turn(), Color::White);
        assert_eq!(game.history().len(), 2);
    }

    #[test]
    fn test_longest_bot_prefers_double_jump() {
        let mut game = Game::english_draughts();
        game.add_piece(3, Color::Black, Caste::Man).unwrap();
        game.add_piece(12, Color::Black, Caste::Man).unwrap();
        game.add_piece(7, Color::White, Caste::Man).unwrap();
        game.add_piece(14, Color::White, Caste::Man).unwrap();
        game.add_piece(32, Color::White, Caste::Man).unwrap();
        game.start().unwrap();

        let mut bot = seeded(BotKind::Longest, Color::Black, 3);
        let path = bot.make_a_move(&mut game).unwrap().unwrap();
        assert_eq!(path.to_string(), "3x10x17");
        assert_eq!(game.kur(Color::White).len(), 2);
    }

    #[test]
    fn test_bot_without_moves_returns_none() {
        let mut game = Game::english_draughts();
        game.add_piece(29, Color::Black, Caste::Man).unwrap();
        game.add_piece(4, Color::White, Caste::Man).unwrap();
        game.start().unwrap();
        let mut bot = seeded(BotKind::Random, Color::Black, 1);
        assert_eq!(bot.make_a_move(&mut game).unwrap(), None);
        let mut bot = seeded(BotKind::Longest, Color::Black, 1);
        assert_eq!(bot.make_a_move(&mut game).unwrap(), None);
    }

    #[test]
    fn test_autoplay_runs_until_limit_or_game_over() {
        let mut game = Game::english_draughts();
        game.setup().unwrap();
        game.start().unwrap();
        let mut bots = vec![
            seeded(BotKind::Random, Color::Black, 11),
            seeded(BotKind::Longest, Color::White, 12),
        ];
        let played = autoplay(&mut game, &mut bots, 6).unwrap();
        assert!(played.len() <= 6);
        for (i, (color, _)) in played.iter().enumerate() {
            let expected = if i % 2 == 0 { Color::Black } else { Color::White };
            assert_eq!(*color, expected);
        }
        if played.len() < 6 {
            assert_eq!(game.state(), State::GameOver);
        }
    }

    #[test]
    fn test_autoplay_long_game_conserves_pieces() {
        let mut game = Game::english_draughts();
        game.setup().unwrap();
        game.start().unwrap();
        let mut bots = vec![
            seeded(BotKind::Longest, Color::Black, 5),
            seeded(BotKind::Longest, Color::White, 6),
        ];
        let played = autoplay(&mut game, &mut bots, 2_000).unwrap();
        match game.state() {
            State::GameOver => assert!(game.eog().is_some()),
            state => {
                assert_eq!(state, State::InPlay);
                assert_eq!(played.len(), 2_000);
            }
        }
        let on_board = game.board().len();
        let captured = game.kur(Color::Black).len() + game.kur(Color::White).len();
        assert_eq!(on_board + captured, 24);
    }
}
