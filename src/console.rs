//! Line-oriented command console.
//!
//! The console reads one command per line from any `BufRead` and writes its
//! replies to any `Write`, so it can be driven interactively, from a script
//! file, or from an in-memory buffer in tests.
//!
//! ## Commands
//!
//! - `help` - List commands
//! - `quit` - Leave the console
//! - `config` - Show game, state and bot settings
//! - `game [SIZE]` - New game in the standard position (4 <= SIZE <= 26)
//! - `setup` - Reset to the standard position
//! - `clear` - Empty the board
//! - `add RNUM COLOR CASTE` / `remove RNUM` - Edit the board before play
//! - `start` / `stop` / `resign` - Game lifecycle
//! - `peek RNUM` - Candidate paths for a piece
//! - `bot COLOR none|random|longest` - Assign or drop a bot
//! - `autoplay BOT HALFMOVES` - Let a bot play both sides
//! - `show board|history|kur|outcome ...` - Display game details
//! - `autoshow on|off board|history|kur|outcome ...` - Redisplay details
//!   after every change to the game
//! - `9-14`, `3x10x17`, ... - Play a move
//!
//! Lines that are blank or start with `#` are ignored.

use std::io::{self, BufRead, Write};
use std::str::FromStr;

use log::{info, warn};
use thiserror::Error;

use crate::board::{Board, Rnum};
use crate::bot::{self, Bot, BotKind};
use crate::constants::{DEFAULT_HALF_MOVES, STD_ROWS_PER_SIDE};
use crate::error::CheckersError;
use crate::game::{Game, GameConfig, State};
use crate::path::rnums_in_paths;
use crate::piece::{Caste, Color};

/// Commands and their usage, in help order.
const KNOWN_COMMANDS: &[(&str, &str)] = &[
    ("help", "help"),
    ("quit", "quit"),
    ("config", "config"),
    ("game", "game [SIZE]"),
    ("setup", "setup"),
    ("clear", "clear"),
    ("add", "add RNUM COLOR CASTE"),
    ("remove", "remove RNUM"),
    ("start", "start"),
    ("stop", "stop"),
    ("resign", "resign"),
    ("peek", "peek RNUM"),
    ("bot", "bot COLOR none|random|longest"),
    ("autoplay", "autoplay BOT HALFMOVES"),
    ("show", "show board|history|kur|outcome ..."),
    ("autoshow", "autoshow on|off board|history|kur|outcome ..."),
];

/// Commands after which the autoshow displays are printed. Moves count too.
const AUTOSHOW_AFTER: &[&str] = &[
    "game", "setup", "clear", "add", "remove", "start", "stop", "resign", "peek", "autoplay",
];

/// Game details that `show` and `autoshow` can display.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Tableau {
    Board,
    History,
    Kur,
    Outcome,
}

impl Tableau {
    const ALL: [Tableau; 4] = [Tableau::Board, Tableau::History, Tableau::Kur, Tableau::Outcome];

    fn name(self) -> &'static str {
        match self {
            Tableau::Board => "board",
            Tableau::History => "history",
            Tableau::Kur => "kur",
            Tableau::Outcome => "outcome",
        }
    }
}

impl FromStr for Tableau {
    type Err = CommandError;

    fn from_str(s: &str) -> Result<Self, CommandError> {
        Tableau::ALL
            .into_iter()
            .find(|t| t.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| CommandError::UnknownTopic(s.to_string()))
    }
}

/// Why a console command failed.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error(transparent)]
    Game(#[from] CheckersError),

    #[error("{0:?}: unknown command")]
    UnknownCommand(String),

    #[error("{command}: expected {expected} argument(s), got {got}")]
    ArgCount {
        command: String,
        expected: &'static str,
        got: usize,
    },

    #[error("{0:?}: not a number")]
    NotANumber(String),

    #[error("{0:?}: nothing to show")]
    UnknownTopic(String),

    #[error("{0:?}: expected on or off")]
    BadSwitch(String),
}

type CommandResult = Result<String, CommandError>;

/// Console state: the current game plus any assigned bots.
pub struct Console {
    game: Game,
    bots: [Option<Box<dyn Bot>>; 2],
    seed: Option<u64>,
    /// Input line counter, used in error reports.
    line: usize,
    done: bool,
    /// Squares highlighted by the last `peek`.
    soi: Vec<Rnum>,
    /// Autoshow switches, indexed by `Tableau`.
    autoshow: [bool; 4],
}

impl Default for Console {
    fn default() -> Self {
        Self::new(GameConfig::default(), None)
    }
}

impl Console {
    /// Create a console with a game in the standard position for `config`.
    /// `seed` makes bot choices reproducible.
    pub fn new(config: GameConfig, seed: Option<u64>) -> Self {
        let mut game = Game::new(config);
        if let Err(e) = game.setup() {
            warn!("standard setup failed: {e}");
        }
        Self {
            game,
            bots: [None, None],
            seed,
            line: 0,
            done: false,
            soi: Vec::new(),
            autoshow: [false; 4],
        }
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    /// True once `quit` has been executed.
    pub fn is_done(&self) -> bool {
        self.done
    }

    /// Run the command loop until input ends or `quit` is read.
    ///
    /// Errors are reported on `output` and never end the loop; only I/O
    /// failures do.
    pub fn run<R: BufRead, W: Write>(&mut self, input: R, mut output: W) -> io::Result<()> {
        self.report_bot_moves(&mut output)?;
        for text in input.lines() {
            let text = text?;
            self.line += 1;

            let text = text.trim();
            if text.is_empty() || text.starts_with('#') {
                continue;
            }

            match self.execute(text) {
                Ok(reply) if reply.is_empty() => {}
                Ok(reply) => writeln!(output, "{reply}")?,
                Err(e) => {
                    warn!("line {}: {text:?} rejected: {e}", self.line);
                    writeln!(output, "[{}] error: {e}", self.line)?;
                }
            }
            if self.done {
                break;
            }
            self.report_bot_moves(&mut output)?;
        }
        output.flush()
    }

    /// Execute one command line and return its reply, followed by any
    /// autoshow displays the command triggers.
    pub fn execute(&mut self, text: &str) -> CommandResult {
        let reply = self.dispatch(text)?;
        if !refreshes(text) {
            return Ok(reply);
        }
        let shown = self.autoshow_text();
        Ok(match (reply.is_empty(), shown.is_empty()) {
            (_, true) => reply,
            (true, false) => shown,
            (false, false) => format!("{reply}\n{shown}"),
        })
    }

    fn dispatch(&mut self, text: &str) -> CommandResult {
        let parts: Vec<&str> = text.split_whitespace().collect();
        let Some((&first, args)) = parts.split_first() else {
            return Ok(String::new());
        };

        if first.starts_with(|c: char| c.is_ascii_digit()) {
            return self.play(text);
        }

        let command = first.to_lowercase();
        match command.as_str() {
            "help" => Ok(Self::help()),

            "quit" => {
                self.done = true;
                Ok("bye".to_string())
            }

            "config" => Ok(self.describe_config()),

            "game" => {
                expect_args(&command, args, 0, 1, "0 or 1")?;
                self.require_not_in_play("game")?;
                let size = match args.first() {
                    Some(arg) => Board::check_size(parse_number(arg)?)?,
                    None => self.game.board().size(),
                };
                let mut game = Game::new(GameConfig::variation(size, STD_ROWS_PER_SIDE));
                game.setup()?;
                self.game = game;
                self.soi.clear();
                Ok(format!("new game: {}", self.game))
            }

            "setup" => {
                expect_args(&command, args, 0, 0, "0")?;
                self.require_not_in_play("setup")?;
                self.game.setup()?;
                self.soi.clear();
                Ok(String::new())
            }

            "clear" => {
                expect_args(&command, args, 0, 0, "0")?;
                self.game.clear();
                self.soi.clear();
                Ok(String::new())
            }

            "add" => {
                expect_args(&command, args, 3, 3, "3")?;
                let rnum = parse_number(args[0])?;
                let color: Color = args[1].parse()?;
                let caste: Caste = args[2].parse()?;
                let piece = self.game.add_piece(rnum, color, caste)?;
                Ok(format!("{rnum}: added {}", piece.fqname()))
            }

            "remove" => {
                expect_args(&command, args, 1, 1, "1")?;
                let rnum = parse_number(args[0])?;
                let piece = self.game.remove_piece(rnum)?;
                Ok(format!("{rnum}: removed {}", piece.fqname()))
            }

            "start" => {
                expect_args(&command, args, 0, 0, "0")?;
                self.game.start()?;
                Ok(format!("{} to move", self.game.turn()))
            }

            "stop" => {
                expect_args(&command, args, 0, 0, "0")?;
                self.game.stop()?;
                Ok(self.game.outcome())
            }

            "resign" => {
                expect_args(&command, args, 0, 0, "0")?;
                self.game.resign(self.game.turn())?;
                Ok(self.game.outcome())
            }

            "peek" => {
                expect_args(&command, args, 1, 1, "1")?;
                if self.game.state() == State::GameOver {
                    return Err(CheckersError::InvalidState {
                        op: "peek",
                        state: State::GameOver,
                    }
                    .into());
                }
                let rnum = parse_number(args[0])?;
                let piece = self.game.board().at(rnum)?;
                let paths = self.game.take_a_peek(rnum);
                self.soi = rnums_in_paths(&paths);
                if paths.is_empty() {
                    return Ok(format!("{rnum}: {} has no moves", piece.fqname()));
                }
                let notas: Vec<String> = paths.iter().map(ToString::to_string).collect();
                Ok(format!("{rnum}: {}", notas.join(" ")))
            }

            "bot" => {
                expect_args(&command, args, 2, 2, "2")?;
                let color: Color = args[0].parse()?;
                let slot = &mut self.bots[color.index()];
                if args[1].eq_ignore_ascii_case("none") {
                    *slot = None;
                    return Ok(format!("{color}: no bot"));
                }
                let kind: BotKind = args[1].parse()?;
                let bot = kind.create(color, self.seed.map(|s| s.wrapping_add(color.index() as u64)));
                let reply = format!("{color}: {} assigned", bot.fqname());
                *slot = Some(bot);
                Ok(reply)
            }

            "autoplay" => {
                expect_args(&command, args, 2, 2, "2")?;
                let kind: BotKind = args[0].parse()?;
                let half_moves = parse_number(args[1])?;
                if self.game.state() != State::InPlay {
                    return Err(CheckersError::InvalidState {
                        op: "autoplay",
                        state: self.game.state(),
                    }
                    .into());
                }
                let mut bots: Vec<Box<dyn Bot>> = Color::ALL
                    .iter()
                    .map(|&c| kind.create(c, self.seed.map(|s| s.wrapping_add(c.index() as u64))))
                    .collect();
                let played = bot::autoplay(&mut self.game, &mut bots, half_moves)?;
                self.soi.clear();
                let mut lines: Vec<String> = played
                    .iter()
                    .map(|(color, path)| format!("{color}.{kind}: {path}"))
                    .collect();
                if self.game.state() == State::GameOver && !self.autoshows(Tableau::Outcome) {
                    lines.push(self.game.outcome());
                }
                Ok(lines.join("\n"))
            }

            "show" => {
                expect_args(&command, args, 1, usize::MAX, "1 or more")?;
                let shown: Vec<String> = args
                    .iter()
                    .map(|topic| topic.parse::<Tableau>().map(|t| self.show(t)))
                    .collect::<Result<_, _>>()?;
                Ok(shown.join("\n"))
            }

            "autoshow" => {
                expect_args(&command, args, 2, usize::MAX, "2 or more")?;
                let on = match args[0].to_lowercase().as_str() {
                    "on" | "true" => true,
                    "off" | "false" => false,
                    _ => return Err(CommandError::BadSwitch(args[0].to_string())),
                };
                let tableaux = args[1..]
                    .iter()
                    .map(|topic| topic.parse::<Tableau>())
                    .collect::<Result<Vec<_>, _>>()?;
                for tableau in tableaux {
                    self.autoshow[tableau as usize] = on;
                }
                Ok(format!("autoshow: {}", self.describe_autoshow()))
            }

            _ => Err(CommandError::UnknownCommand(first.to_string())),
        }
    }

    fn play(&mut self, nota: &str) -> CommandResult {
        let path = self.game.make_a_move_nota(nota)?;
        self.soi.clear();
        info!("line {}: played {path}", self.line);
        if self.game.state() == State::GameOver && !self.autoshows(Tableau::Outcome) {
            Ok(self.game.outcome())
        } else {
            Ok(String::new())
        }
    }

    fn show(&self, tableau: Tableau) -> String {
        match tableau {
            Tableau::Board => self.game.board().render(true, &self.soi),
            Tableau::History => {
                if self.game.history().is_empty() {
                    "no history".to_string()
                } else {
                    self.game.history().join("\n")
                }
            }
            Tableau::Kur => {
                let lines: Vec<String> = Color::ALL
                    .iter()
                    .map(|&color| {
                        let names: Vec<String> =
                            self.game.kur(color).iter().map(|p| p.fqname()).collect();
                        format!("{color} kur: {}", names.join(" "))
                    })
                    .collect();
                lines.join("\n")
            }
            Tableau::Outcome => self.game.summary(),
        }
    }

    fn autoshows(&self, tableau: Tableau) -> bool {
        self.autoshow[tableau as usize]
    }

    /// The enabled autoshow displays that currently have something to say.
    /// Kur and history are skipped while empty, the outcome until the game
    /// is over.
    fn autoshow_text(&self) -> String {
        let shown: Vec<String> = Tableau::ALL
            .into_iter()
            .filter(|&t| self.autoshows(t))
            .filter(|&t| match t {
                Tableau::Board => true,
                Tableau::History => !self.game.history().is_empty(),
                Tableau::Kur => Color::ALL.iter().any(|&c| !self.game.kur(c).is_empty()),
                Tableau::Outcome => self.game.state() == State::GameOver,
            })
            .map(|t| self.show(t).trim_end().to_string())
            .collect();
        shown.join("\n")
    }

    fn describe_autoshow(&self) -> String {
        Tableau::ALL
            .iter()
            .map(|&t| format!("{}({})", t.name(), self.autoshows(t)))
            .collect::<Vec<_>>()
            .join(" ")
    }

    /// Let assigned bots move while it is their turn, writing each move.
    fn report_bot_moves<W: Write>(&mut self, output: &mut W) -> io::Result<()> {
        let mut played = 0;
        while played < DEFAULT_HALF_MOVES && self.game.state() == State::InPlay {
            let turn = self.game.turn();
            let Some(bot) = self.bots[turn.index()].as_mut() else {
                break;
            };
            match bot.make_a_move(&mut self.game) {
                Ok(Some(path)) => writeln!(output, "{}: {path}", bot.fqname())?,
                Ok(None) => break,
                Err(e) => {
                    writeln!(output, "[{}] error: {}: {e}", self.line, bot.fqname())?;
                    break;
                }
            }
            played += 1;
            self.soi.clear();
            let shown = self.autoshow_text();
            if !shown.is_empty() {
                writeln!(output, "{shown}")?;
            }
        }
        if played > 0 && self.game.state() == State::GameOver && !self.autoshows(Tableau::Outcome) {
            writeln!(output, "{}", self.game.outcome())?;
        }
        Ok(())
    }

    fn describe_config(&self) -> String {
        let bot_name = |color: Color| {
            self.bots[color.index()]
                .as_ref()
                .map_or_else(|| "none".to_string(), |b| b.tag().to_string())
        };
        let seed = self
            .seed
            .map_or_else(|| "none".to_string(), |s| s.to_string());
        format!(
            "game: {}\nstate: {}\nturn: {}\nmove: {}\nbots: black={} white={}\nseed: {seed}\nautoshow: {}",
            self.game,
            self.game.state(),
            self.game.turn(),
            self.game.move_num(),
            bot_name(Color::Black),
            bot_name(Color::White),
            self.describe_autoshow(),
        )
    }

    fn require_not_in_play(&self, op: &'static str) -> Result<(), CommandError> {
        if self.game.state() == State::InPlay {
            return Err(CheckersError::InvalidState {
                op,
                state: State::InPlay,
            }
            .into());
        }
        Ok(())
    }

    fn help() -> String {
        KNOWN_COMMANDS
            .iter()
            .map(|(_, usage)| *usage)
            .chain(std::iter::once("<move>  e.g. 9-14 or 3x10x17"))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

/// Whether `text` is a move or a command after which autoshow runs.
fn refreshes(text: &str) -> bool {
    let Some(first) = text.split_whitespace().next() else {
        return false;
    };
    first.starts_with(|c: char| c.is_ascii_digit())
        || AUTOSHOW_AFTER.contains(&first.to_lowercase().as_str())
}

fn expect_args(
    command: &str,
    args: &[&str],
    min: usize,
    max: usize,
    expected: &'static str,
) -> Result<(), CommandError> {
    if (min..=max).contains(&args.len()) {
        Ok(())
    } else {
        Err(CommandError::ArgCount {
            command: command.to_string(),
            expected,
            got: args.len(),
        })
    }
}

fn parse_number(arg: &str) -> Result<usize, CommandError> {
    arg.parse::<usize>()
        .map_err(|_| CommandError::NotANumber(arg.to_string()))
}
