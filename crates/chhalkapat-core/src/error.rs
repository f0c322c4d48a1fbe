//! Domain error types.

use thiserror::Error;

/// Top-level domain error type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DomainError {
    /// One or more player name slots were blank when the table was submitted.
    ///
    /// Recoverable: the frontend re-prompts the listed slots.
    #[error("configuration error: missing player names in slots {blank_slots:?}")]
    IncompleteNames {
        /// Zero-based indices of the blank slots.
        blank_slots: Vec<usize>,
    },

    /// A game invariant would be broken (impossible counts, empty word pool).
    #[error("invariant violation: {0}")]
    InvariantViolation(String),

    /// A session operation was issued in a phase that does not offer it.
    #[error("{operation} is not available during the {phase} phase")]
    InvalidPhase {
        /// The rejected operation.
        operation: &'static str,
        /// The phase the session was in.
        phase: &'static str,
    },
}

impl DomainError {
    /// Shorthand for building a [`DomainError::InvariantViolation`].
    pub fn invariant(message: impl Into<String>) -> Self {
        Self::InvariantViolation(message.into())
    }

    /// Returns `true` when the error is something a player can fix by
    /// editing the setup form.
    #[must_use]
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::IncompleteNames { .. })
    }
}
