//! Dealing a round: the secret word, who the imposters are, the order in
//! which players look at the device, and who opens the discussion.

use std::fmt;

use chhalkapat_core::rng::{DeterministicRng, choose_index, permutation};
use serde::{Deserialize, Serialize};
use tracing::debug;

use super::configuration::Configuration;
use super::word_pool::WordPool;

/// What an imposter sees instead of the secret word.
pub const IMPOSTER_WORD: &str = "IMPOSTER";

/// A player's side in the round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Role {
    /// Knows the secret word.
    Crew,
    /// Has to bluff without it.
    Imposter,
}

/// One player's private deal.
///
/// `Debug` output never contains the role or the word.
#[derive(Clone, PartialEq, Eq)]
pub struct PlayerAssignment {
    seat: usize,
    name: String,
    role: Role,
    display_word: String,
}

impl PlayerAssignment {
    /// The player's seat, i.e. their index in the configured name list.
    #[must_use]
    pub fn seat(&self) -> usize {
        self.seat
    }

    /// The player's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The player's role.
    #[must_use]
    pub fn role(&self) -> Role {
        self.role
    }

    /// Whether the player is an imposter.
    #[must_use]
    pub fn is_imposter(&self) -> bool {
        self.role == Role::Imposter
    }

    /// The secret word for crew, [`IMPOSTER_WORD`] for imposters.
    #[must_use]
    pub fn display_word(&self) -> &str {
        &self.display_word
    }
}

impl fmt::Debug for PlayerAssignment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PlayerAssignment")
            .field("seat", &self.seat)
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// A fully dealt, immutable round.
///
/// Invariants:
/// - `assignments` holds every configured seat exactly once, in reveal order;
/// - exactly `imposter_count` assignments are imposters, every other one
///   carries `secret_word`;
/// - `starting_player` indexes a crew assignment.
#[derive(Clone, PartialEq, Eq)]
pub struct Round {
    configuration: Configuration,
    secret_word: String,
    assignments: Vec<PlayerAssignment>,
    starting_player: usize,
}

impl Round {
    /// Deals a round.
    ///
    /// Randomness is consumed in a fixed order: the word, one Fisher–Yates
    /// pass choosing imposter seats, an independent pass choosing the
    /// reveal order, then the discussion starter among the crew.
    #[must_use]
    pub fn generate(
        configuration: &Configuration,
        pool: &WordPool,
        rng: &mut dyn DeterministicRng,
    ) -> Self {
        let player_count = configuration.player_count();
        let names = configuration.player_names();
        let secret_word = pool.choose(rng).to_owned();

        let mut imposter_seats = vec![false; player_count];
        for &seat in &permutation(rng, player_count)[..configuration.imposter_count()] {
            imposter_seats[seat] = true;
        }

        let assignments: Vec<PlayerAssignment> = permutation(rng, player_count)
            .into_iter()
            .map(|seat| {
                let role = if imposter_seats[seat] {
                    Role::Imposter
                } else {
                    Role::Crew
                };
                let display_word = match role {
                    Role::Crew => secret_word.clone(),
                    Role::Imposter => IMPOSTER_WORD.to_owned(),
                };
                PlayerAssignment {
                    seat,
                    name: names[seat].clone(),
                    role,
                    display_word,
                }
            })
            .collect();

        let crew: Vec<usize> = assignments
            .iter()
            .enumerate()
            .filter(|(_, a)| a.role == Role::Crew)
            .map(|(position, _)| position)
            .collect();
        // Configuration guarantees at least one crew member.
        let starting_player = crew[choose_index(rng, crew.len()).unwrap_or(0)];

        debug!(
            player_count,
            imposter_count = configuration.imposter_count(),
            "round dealt"
        );

        Self {
            configuration: configuration.clone(),
            secret_word,
            assignments,
            starting_player,
        }
    }

    /// The configuration this round was dealt from.
    #[must_use]
    pub fn configuration(&self) -> &Configuration {
        &self.configuration
    }

    /// The word every crew member sees.
    #[must_use]
    pub fn secret_word(&self) -> &str {
        &self.secret_word
    }

    /// Assignments in reveal order.
    #[must_use]
    pub fn assignments(&self) -> &[PlayerAssignment] {
        &self.assignments
    }

    /// The crew member who opens the discussion.
    #[must_use]
    pub fn starting_player(&self) -> &PlayerAssignment {
        &self.assignments[self.starting_player]
    }

    /// Reveal-order position of the discussion starter.
    #[must_use]
    pub fn starting_position(&self) -> usize {
        self.starting_player
    }

    /// Number of imposters dealt.
    #[must_use]
    pub fn imposter_count(&self) -> usize {
        self.configuration.imposter_count()
    }

    /// Number of players dealt.
    #[must_use]
    pub fn len(&self) -> usize {
        self.assignments.len()
    }

    /// Always `false` for a dealt round.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.assignments.is_empty()
    }
}

impl fmt::Debug for Round {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Round")
            .field("assignments", &self.assignments)
            .field("starting_player", &self.starting_player)
            .finish_non_exhaustive()
    }
}
