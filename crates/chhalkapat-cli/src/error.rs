//! ChhalKapat — frontend error types.

use chhalkapat_core::error::DomainError;
use thiserror::Error;

/// Startup and runtime errors for the terminal frontend.
#[derive(Debug, Error)]
pub enum AppError {
    /// An environment variable is present but invalid.
    #[error("configuration error: {0}")]
    Config(String),

    /// The custom word list could not be used.
    #[error("word list {path}: {reason}")]
    WordList {
        /// Path that was read.
        path: String,
        /// What was wrong with it.
        reason: String,
    },

    /// A game rule rejected the operation.
    #[error("game error: {0}")]
    Domain(#[from] DomainError),

    /// Reading the keyboard or writing the screen failed.
    #[error("terminal error: {0}")]
    Io(#[from] std::io::Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_domain_error_converts() {
        let err: AppError = DomainError::invariant("word pool is empty").into();
        assert_eq!(
            err.to_string(),
            "game error: invariant violation: word pool is empty"
        );
    }

    #[test]
    fn test_word_list_message_names_path() {
        let err = AppError::WordList {
            path: "/tmp/words.json".to_owned(),
            reason: "word pool is empty".to_owned(),
        };
        assert_eq!(err.to_string(), "word list /tmp/words.json: word pool is empty");
    }
}
