//! Runtime settings, read from the environment.

use std::path::PathBuf;

use chhalkapat_core::rng::StdRandom;
use chhalkapat_game::domain::word_pool::WordPool;

use crate::error::AppError;

/// Path to a JSON array of words replacing the built-in list.
pub const WORDS_VAR: &str = "CHHALKAPAT_WORDS";

/// Fixed RNG seed, for reproducible sessions.
pub const SEED_VAR: &str = "CHHALKAPAT_SEED";

/// `json` or `pretty`.
pub const LOG_FORMAT_VAR: &str = "CHHALKAPAT_LOG_FORMAT";

/// How log lines are rendered on stderr.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Compact human-readable lines.
    #[default]
    Pretty,
    /// One JSON object per line.
    Json,
}

/// Frontend settings.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppConfig {
    /// Custom word list, if any.
    pub words_path: Option<PathBuf>,
    /// RNG seed, if any.
    pub seed: Option<u64>,
    /// Log rendering.
    pub log_format: LogFormat,
}

impl AppConfig {
    /// Reads settings from the process environment.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, AppError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Reads settings through `lookup`, which maps a variable name to its
    /// value.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Config` if a variable is set to an invalid value.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, AppError> {
        let words_path = lookup(WORDS_VAR)
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from);

        let seed = lookup(SEED_VAR)
            .map(|v| {
                v.trim()
                    .parse::<u64>()
                    .map_err(|e| AppError::Config(format!("{SEED_VAR} must be a valid u64: {e}")))
            })
            .transpose()?;

        let log_format = match lookup(LOG_FORMAT_VAR).as_deref().map(str::trim) {
            None | Some("" | "pretty") => LogFormat::Pretty,
            Some("json") => LogFormat::Json,
            Some(other) => {
                return Err(AppError::Config(format!(
                    "{LOG_FORMAT_VAR} must be `json` or `pretty`, got `{other}`"
                )));
            }
        };

        Ok(Self {
            words_path,
            seed,
            log_format,
        })
    }

    /// Loads the word pool: the custom list if configured, else the
    /// built-in one.
    ///
    /// # Errors
    ///
    /// Returns `AppError::WordList` if the file cannot be read or holds no
    /// usable word.
    pub fn word_pool(&self) -> Result<WordPool, AppError> {
        let Some(path) = &self.words_path else {
            return Ok(WordPool::default());
        };
        let word_list_error = |reason: String| AppError::WordList {
            path: path.display().to_string(),
            reason,
        };
        let json = std::fs::read_to_string(path).map_err(|e| word_list_error(e.to_string()))?;
        WordPool::from_json_str(&json).map_err(|e| word_list_error(e.to_string()))
    }

    /// Builds the session RNG.
    #[must_use]
    pub fn rng(&self) -> StdRandom {
        match self.seed {
            Some(seed) => StdRandom::seeded(seed),
            None => StdRandom::from_os_rng(),
        }
    }
}
