//! The candidate secret words a round draws from.

use chhalkapat_core::error::DomainError;
use chhalkapat_core::rng::{DeterministicRng, choose_index};

use super::round::IMPOSTER_WORD;

/// Built-in word list.
pub const DEFAULT_WORDS: [&str; 26] = [
    "Pizza",
    "Banana",
    "Guitar",
    "Ocean",
    "Mountain",
    "Coffee",
    "Dragon",
    "Rainbow",
    "Sunset",
    "Castle",
    "Robot",
    "Unicorn",
    "Rocket",
    "Diamond",
    "Thunder",
    "Butterfly",
    "Volcano",
    "Galaxy",
    "Treasure",
    "Wizard",
    "Phoenix",
    "Carnival",
    "Compass",
    "Lighthouse",
    "Orchestra",
    "Pyramid",
];

/// A non-empty list of candidate words.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WordPool {
    words: Vec<String>,
}

impl WordPool {
    /// Builds a pool from arbitrary words. Entries are trimmed; blank
    /// entries and the imposter placeholder itself are dropped.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvariantViolation` if no usable word remains.
    pub fn new<I>(words: I) -> Result<Self, DomainError>
    where
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        let words: Vec<String> = words
            .into_iter()
            .map(|w| w.as_ref().trim().to_owned())
            .filter(|w| !w.is_empty() && !w.eq_ignore_ascii_case(IMPOSTER_WORD))
            .collect();
        if words.is_empty() {
            return Err(DomainError::invariant("word pool is empty"));
        }
        Ok(Self { words })
    }

    /// Parses a JSON array of strings, e.g. `["Pizza", "Ocean"]`.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvariantViolation` if the text is not a JSON
    /// array of strings or holds no usable word.
    pub fn from_json_str(json: &str) -> Result<Self, DomainError> {
        let words: Vec<String> = serde_json::from_str(json)
            .map_err(|e| DomainError::invariant(format!("word list is not a JSON string array: {e}")))?;
        Self::new(words)
    }

    /// Number of candidate words.
    #[must_use]
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Always `false`; kept for API symmetry with `len`.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// The candidate words.
    #[must_use]
    pub fn words(&self) -> &[String] {
        &self.words
    }

    /// Draws one word uniformly at random.
    pub fn choose(&self, rng: &mut dyn DeterministicRng) -> &str {
        // `words` is non-empty by construction.
        let index = choose_index(rng, self.words.len()).unwrap_or(0);
        &self.words[index]
    }
}

impl Default for WordPool {
    fn default() -> Self {
        Self {
            words: DEFAULT_WORDS.iter().map(|w| (*w).to_owned()).collect(),
        }
    }
}
