//! Checkers-Rust: a checkers (draughts) engine.
//!
//! ## Usage
//!
//! - `checkers` - Show a demo
//! - `checkers console` - Read commands from stdin (or `--script FILE`)
//! - `checkers selfplay` - Let two bots play each other

use std::fs::File;
use std::io::{self, BufReader};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::Env;

use checkers_rust::board::Board;
use checkers_rust::bot::{autoplay, BotKind};
use checkers_rust::console::Console;
use checkers_rust::error::CheckersError;
use checkers_rust::constants::{DEFAULT_HALF_MOVES, DEFAULT_SIZE, STD_ROWS_PER_SIDE};
use checkers_rust::game::{Game, GameConfig};
use checkers_rust::path::rnums_in_paths;
use checkers_rust::piece::Color;

/// Checkers-Rust: a checkers (draughts) engine
#[derive(Parser)]
#[command(name = "checkers")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Play a short opening and show the board
    Demo,
    /// Run the command console
    Console {
        /// Read commands from this file instead of stdin
        #[arg(long)]
        script: Option<PathBuf>,
        /// Board size (4 to 26)
        #[arg(long, default_value_t = DEFAULT_SIZE, value_parser = board_size)]
        size: usize,
        /// Seed for bot moves
        #[arg(long)]
        seed: Option<u64>,
    },
    /// Let two bots play a game
    Selfplay {
        /// Bot playing black
        #[arg(long, default_value = "random")]
        black: BotKind,
        /// Bot playing white
        #[arg(long, default_value = "longest")]
        white: BotKind,
        /// Stop after this many half moves
        #[arg(long, default_value_t = DEFAULT_HALF_MOVES)]
        half_moves: usize,
        /// Board size (4 to 26)
        #[arg(long, default_value_t = DEFAULT_SIZE, value_parser = board_size)]
        size: usize,
        /// Seed for bot moves
        #[arg(long)]
        seed: Option<u64>,
    },
}

fn board_size(arg: &str) -> Result<usize, CheckersError> {
    let size = arg.parse().map_err(|_| CheckersError::UnknownValue {
        what: "board size",
        value: arg.to_string(),
    })?;
    Board::check_size(size)
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(Env::default().default_filter_or("warn")).init();
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Console { script, size, seed }) => run_console(script, size, seed),
        Some(Commands::Selfplay {
            black,
            white,
            half_moves,
            size,
            seed,
        }) => run_selfplay(black, white, half_moves, size, seed),
        Some(Commands::Demo) | None => run_demo(),
    }
}

fn run_demo() -> Result<()> {
    println!("Checkers-Rust: checkers (draughts) engine\n");

    let mut game = Game::english_draughts();
    game.setup()?;
    println!("=== {game} ===");
    println!("{}", game.board());

    for nota in ["9-14", "23-18"] {
        game.make_a_move_nota(nota)?;
        println!("Played {nota}");
    }

    let paths = game.take_a_peek(14);
    let notas: Vec<String> = paths.iter().map(ToString::to_string).collect();
    println!("Moves for 14: {}", notas.join(", "));
    println!("{}", game.board().render(true, &rnums_in_paths(&paths)));
    println!("{}", game.board().render_figurines(true, &[]));
    println!("History: {}", game.history().join(" "));
    println!("{}", game.summary());
    Ok(())
}

fn run_console(script: Option<PathBuf>, size: usize, seed: Option<u64>) -> Result<()> {
    let mut console = Console::new(GameConfig::variation(size, STD_ROWS_PER_SIDE), seed);
    let stdout = io::stdout();
    match script {
        Some(path) => {
            let file = File::open(&path)
                .with_context(|| format!("cannot open script {}", path.display()))?;
            console.run(BufReader::new(file), stdout.lock())?;
        }
        None => console.run(io::stdin().lock(), stdout.lock())?,
    }
    Ok(())
}

fn run_selfplay(
    black: BotKind,
    white: BotKind,
    half_moves: usize,
    size: usize,
    seed: Option<u64>,
) -> Result<()> {
    let mut game = Game::new(GameConfig::variation(size, STD_ROWS_PER_SIDE));
    game.setup()?;
    game.start()?;
    let mut bots = vec![
        black.create(Color::Black, seed),
        white.create(Color::White, seed.map(|s| s.wrapping_add(1))),
    ];
    println!("=== {game}: {} vs {} ===", bots[0].fqname(), bots[1].fqname());

    let played = autoplay(&mut game, &mut bots, half_moves)?;
    for (color, path) in &played {
        println!("{color}: {path}");
    }
    println!("{}", game.board());
    println!("{}", game.summary());
    Ok(())
}
