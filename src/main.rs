/// Entry point: load config and game data, play one session.

mod config;
mod domain;
mod sim;
mod ui;

use std::error::Error;
use std::path::Path;
use std::process::ExitCode;

use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;

use config::GameConfig;
use sim::data::load_game_data;
use sim::event::{GuessEvent, Outcome};
use sim::session::Session;
use ui::console::TerminalConsole;

const LOG_FILE: &str = "hangman.log";

fn main() -> ExitCode {
    let config = GameConfig::load();

    // Keep the guard alive until exit so buffered log lines get written
    let _log_guard = match config.log_dir.as_deref().map(init_logging) {
        Some(Ok(guard)) => Some(guard),
        Some(Err(e)) => {
            eprintln!("Warning: logging disabled: {e}");
            None
        }
        None => None,
    };

    match run(&config) {
        Ok((outcome, word)) => {
            println!();
            match outcome {
                Outcome::Victory => println!("You guessed it: {word}"),
                Outcome::Defeat => println!("Out of attempts. The word was: {word}"),
            }
            println!("Thanks for playing Hangman!");
            ExitCode::SUCCESS
        }
        Err(e) => {
            tracing::error!("{e}");
            eprintln!("Game error: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(config: &GameConfig) -> Result<(Outcome, String), Box<dyn Error>> {
    let data = load_game_data(config)?;

    let rng = match config.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };

    let mut session = Session::new(TerminalConsole::stdio(), rng);
    let outcome = session.play(
        &data.catalog,
        &data.difficulties,
        &config.random_token,
        config.frame_delay,
        &data.library,
    )?;

    let hints = session
        .events()
        .iter()
        .filter(|e| matches!(e, GuessEvent::HintShown))
        .count();
    tracing::info!(
        phase = ?session.phase(),
        rounds = session.rounds_played(),
        letters = session.used_letters().len(),
        attempts_left = ?session.attempts_remaining(),
        hints,
        "game over"
    );

    let word = session
        .round()
        .map(|r| r.answer.word().to_string())
        .unwrap_or_default();
    Ok((outcome, word))
}

/// File-only logging: the terminal belongs to the game.
fn init_logging(log_dir: &Path) -> Result<WorkerGuard, Box<dyn Error>> {
    std::fs::create_dir_all(log_dir)?;

    let file_appender = tracing_appender::rolling::never(log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(file_appender);

    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(writer)
        .with_ansi(false);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()?;

    tracing::info!(path = %log_dir.join(LOG_FILE).display(), "logging initialized");
    Ok(guard)
}
