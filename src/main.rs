//! Headless runner (default binary).
//!
//! Plays one game with a seeded random player: every tick the player may
//! move, rotate, toggle fast drop or cheat, then the game advances. Prints
//! the final board and score.

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tracing::{debug, info};
use tracing_subscriber::EnvFilter;

use fallblock::core::{EngineConfig, Game, TickOutcome};
use fallblock::engine::dispatch;
use fallblock::types::GameAction;

#[derive(Parser, Debug)]
#[command(version, about, long_about = None)]
struct Args {
    /// Seed for both the piece source and the player
    #[arg(short, long, default_value_t = 1)]
    seed: u64,

    /// Board height (overrides config and environment)
    #[arg(short, long)]
    rows: Option<usize>,

    /// Board width (overrides config and environment)
    #[arg(short, long)]
    cols: Option<usize>,

    /// Stop after this many ticks even if the game is still running
    #[arg(short = 't', long, default_value_t = 10_000)]
    max_ticks: u64,

    /// JSON engine configuration; `FALLBLOCK_*` variables are used otherwise
    #[arg(long)]
    config: Option<PathBuf>,

    /// Increase log verbosity (-v = debug, -vv = trace); RUST_LOG wins if set
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let config = load_config(&args)?;
    config.validate()?;
    info!(rows = config.rows, cols = config.cols, seed = args.seed, "starting");

    let mut game = Game::seeded(config, args.seed)?;
    let mut player = StdRng::seed_from_u64(args.seed.wrapping_add(1));

    dispatch(&mut game, GameAction::StartGame);
    let mut ticks = 0;
    let mut cleared = 0;
    while ticks < args.max_ticks {
        if let Some(action) = choose_action(&mut player) {
            dispatch(&mut game, action);
        }
        ticks += 1;
        match game.advance() {
            TickOutcome::Settled { rows_cleared } if rows_cleared > 0 => {
                cleared += rows_cleared;
                debug!(rows_cleared, score = game.score(), "rows cleared");
            }
            TickOutcome::GameOver => break,
            _ => {}
        }
    }

    info!(
        ticks,
        cleared,
        score = game.score(),
        game_over = !game.is_running(),
        "finished"
    );
    print!("{}", game.board());
    println!("score: {}", game.score());
    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "info",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(args: &Args) -> Result<EngineConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("reading config {}", path.display()))?;
            serde_json::from_str(&text)
                .with_context(|| format!("parsing config {}", path.display()))?
        }
        None => EngineConfig::from_env(),
    };
    if let Some(rows) = args.rows {
        config.rows = rows;
    }
    if let Some(cols) = args.cols {
        config.cols = cols;
    }
    Ok(config)
}

/// Random player: mostly idle, sometimes steering, rarely cheating
fn choose_action(rng: &mut StdRng) -> Option<GameAction> {
    let action = match rng.random_range(0..100) {
        0..=14 => GameAction::MoveLeft,
        15..=29 => GameAction::MoveRight,
        30..=39 => GameAction::RotateRight,
        40..=44 => GameAction::RotateLeft,
        45..=49 => GameAction::SetFastDrop(true),
        50..=54 => GameAction::SetFastDrop(false),
        55 => GameAction::Cheat,
        _ => return None,
    };
    Some(action)
}
