//! ChhalKapat terminal entry point.

use std::io;

use chhalkapat_cli::config::{AppConfig, LogFormat};
use chhalkapat_cli::error::AppError;
use chhalkapat_cli::terminal::{self, Table, Terminal};
use chhalkapat_core::clock::SystemClock;
use chhalkapat_game::domain::session::Session;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

fn main() -> Result<(), AppError> {
    let config = AppConfig::from_env()?;

    // Logs go to stderr so they never land on the game screen.
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr);
    match config.log_format {
        LogFormat::Json => subscriber.json().init(),
        LogFormat::Pretty => subscriber.compact().init(),
    }

    tracing::info!(
        custom_words = config.words_path.is_some(),
        seeded = config.seed.is_some(),
        "Starting ChhalKapat"
    );

    let pool = config.word_pool()?;
    let mut rng = config.rng();
    let clock = SystemClock;
    let mut session = Session::new(Uuid::new_v4());

    let mut terminal = Terminal::new(io::stdin().lock(), io::stdout().lock());
    let mut table = Table {
        pool: &pool,
        rng: &mut rng,
        clock: &clock,
    };
    terminal::run(&mut terminal, &mut session, &mut table)
}
