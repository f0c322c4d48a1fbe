//! Table setup: how many players, how many imposters, and who is playing.
//!
//! [`ConfigurationDraft`] is the editable form shown before a round. Counts
//! are clamped as they are entered, so the only way a draft can fail
//! validation is by leaving a name blank. [`Configuration`] is the
//! validated, immutable result that a round is dealt from.

use chhalkapat_core::error::DomainError;
use serde::{Deserialize, Serialize};

/// Fewest players a round can be dealt for.
pub const MIN_PLAYERS: usize = 3;

/// Most players a round can be dealt for.
pub const MAX_PLAYERS: usize = 20;

/// Fewest imposters in a round.
pub const MIN_IMPOSTERS: usize = 1;

/// Largest legal imposter count for a table of `player_count`.
///
/// At least one player must hold the secret word and open the discussion.
#[must_use]
pub const fn max_imposters(player_count: usize) -> usize {
    player_count.saturating_sub(1)
}

fn blank_slots(names: &[String]) -> Vec<usize> {
    names
        .iter()
        .enumerate()
        .filter(|(_, name)| name.trim().is_empty())
        .map(|(slot, _)| slot)
        .collect()
}

/// A validated table setup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Configuration {
    player_count: usize,
    imposter_count: usize,
    player_names: Vec<String>,
}

impl Configuration {
    /// Builds a configuration without any clamping.
    ///
    /// Names are stored trimmed. Duplicate names are allowed; players are
    /// told apart by seat (their index in `player_names`).
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvariantViolation` if the player count is
    /// outside `[MIN_PLAYERS, MAX_PLAYERS]`, the imposter count is outside
    /// `[MIN_IMPOSTERS, player_count - 1]`, or the number of names differs
    /// from the player count. Returns `DomainError::IncompleteNames` if any
    /// name is blank.
    pub fn new(
        player_count: usize,
        imposter_count: usize,
        player_names: Vec<String>,
    ) -> Result<Self, DomainError> {
        if !(MIN_PLAYERS..=MAX_PLAYERS).contains(&player_count) {
            return Err(DomainError::invariant(format!(
                "player count {player_count} outside [{MIN_PLAYERS}, {MAX_PLAYERS}]"
            )));
        }
        if !(MIN_IMPOSTERS..=max_imposters(player_count)).contains(&imposter_count) {
            return Err(DomainError::invariant(format!(
                "imposter count {imposter_count} outside [{MIN_IMPOSTERS}, {}] for {player_count} players",
                max_imposters(player_count)
            )));
        }
        if player_names.len() != player_count {
            return Err(DomainError::invariant(format!(
                "expected {player_count} player names, got {}",
                player_names.len()
            )));
        }

        let blank = blank_slots(&player_names);
        if !blank.is_empty() {
            return Err(DomainError::IncompleteNames { blank_slots: blank });
        }

        Ok(Self {
            player_count,
            imposter_count,
            player_names: player_names
                .into_iter()
                .map(|name| name.trim().to_owned())
                .collect(),
        })
    }

    /// Number of players at the table.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Number of players who will not receive the word.
    #[must_use]
    pub fn imposter_count(&self) -> usize {
        self.imposter_count
    }

    /// Number of players who will receive the word.
    #[must_use]
    pub fn crew_count(&self) -> usize {
        self.player_count - self.imposter_count
    }

    /// Player names in seat order.
    #[must_use]
    pub fn player_names(&self) -> &[String] {
        &self.player_names
    }
}

/// The editable setup form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConfigurationDraft {
    player_count: usize,
    imposter_count: usize,
    player_names: Vec<String>,
}

impl Default for ConfigurationDraft {
    fn default() -> Self {
        Self {
            player_count: MIN_PLAYERS,
            imposter_count: MIN_IMPOSTERS,
            player_names: vec![String::new(); MIN_PLAYERS],
        }
    }
}

impl ConfigurationDraft {
    /// A fresh form: three empty seats and one imposter.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Current player count.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.player_count
    }

    /// Current imposter count.
    #[must_use]
    pub fn imposter_count(&self) -> usize {
        self.imposter_count
    }

    /// Name slots, one per player, possibly blank.
    #[must_use]
    pub fn player_names(&self) -> &[String] {
        &self.player_names
    }

    /// Sets the player count, clamped to `[MIN_PLAYERS, MAX_PLAYERS]`.
    ///
    /// Name slots are truncated or padded with blanks, keeping already
    /// entered names in place, and the imposter count is re-clamped to the
    /// new table size.
    pub fn set_player_count(&mut self, requested: usize) {
        self.player_count = requested.clamp(MIN_PLAYERS, MAX_PLAYERS);
        self.player_names.resize(self.player_count, String::new());
        self.set_imposter_count(self.imposter_count);
    }

    /// Sets the player count from raw text. Unparsable input means
    /// `MIN_PLAYERS`.
    pub fn set_player_count_input(&mut self, raw: &str) {
        let requested = raw.trim().parse().unwrap_or(MIN_PLAYERS);
        self.set_player_count(requested);
    }

    /// Sets the imposter count, clamped to `[MIN_IMPOSTERS, player_count - 1]`.
    pub fn set_imposter_count(&mut self, requested: usize) {
        self.imposter_count = requested.clamp(MIN_IMPOSTERS, max_imposters(self.player_count));
    }

    /// Sets the imposter count from raw text. Unparsable input means
    /// `MIN_IMPOSTERS`.
    pub fn set_imposter_count_input(&mut self, raw: &str) {
        let requested = raw.trim().parse().unwrap_or(MIN_IMPOSTERS);
        self.set_imposter_count(requested);
    }

    /// Writes the name for one seat.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvariantViolation` if `slot` is not a seat at
    /// the current table.
    pub fn set_player_name(&mut self, slot: usize, name: impl Into<String>) -> Result<(), DomainError> {
        let count = self.player_count;
        let entry = self.player_names.get_mut(slot).ok_or_else(|| {
            DomainError::invariant(format!("no seat {slot} at a table of {count}"))
        })?;
        *entry = name.into();
        Ok(())
    }

    /// Replaces every seat's name from `names`, in order. Names beyond the
    /// table size are ignored and seats left over are blanked.
    pub fn fill_names<I>(&mut self, names: I)
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let mut names = names.into_iter();
        for entry in &mut self.player_names {
            *entry = names.next().map(Into::into).unwrap_or_default();
        }
    }

    /// Seats whose name is empty or whitespace.
    #[must_use]
    pub fn blank_slots(&self) -> Vec<usize> {
        blank_slots(&self.player_names)
    }

    /// Whether every seat has a name.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.blank_slots().is_empty()
    }

    /// Validates the form without modifying it.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IncompleteNames` listing every blank seat.
    pub fn validate(&self) -> Result<Configuration, DomainError> {
        Configuration::new(
            self.player_count,
            self.imposter_count,
            self.player_names.clone(),
        )
    }
}

impl From<&Configuration> for ConfigurationDraft {
    fn from(config: &Configuration) -> Self {
        Self {
            player_count: config.player_count,
            imposter_count: config.imposter_count,
            player_names: config.player_names.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    // --- Configuration::new ---

    #[test]
    fn test_new_accepts_minimal_table() {
        let config = Configuration::new(3, 1, names(&["A", "B", "C"])).unwrap();

        assert_eq!(config.player_count(), 3);
        assert_eq!(config.imposter_count(), 1);
        assert_eq!(config.crew_count(), 2);
        assert_eq!(config.player_names(), names(&["A", "B", "C"]).as_slice());
    }

    #[test]
    fn test_new_accepts_single_crew_member() {
        let config = Configuration::new(4, 3, names(&["A", "B", "C", "D"])).unwrap();
        assert_eq!(config.crew_count(), 1);
    }

    #[test]
    fn test_new_trims_names() {
        let config = Configuration::new(3, 1, names(&["  Asha ", "Bo", "Cy\t"])).unwrap();
        assert_eq!(config.player_names(), names(&["Asha", "Bo", "Cy"]).as_slice());
    }

    #[test]
    fn test_new_allows_duplicate_names() {
        assert!(Configuration::new(3, 1, names(&["Sam", "Sam", "Lee"])).is_ok());
    }

    #[test]
    fn test_new_rejects_too_few_players() {
        let result = Configuration::new(2, 1, names(&["A", "B"]));
        assert!(matches!(result, Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn test_new_rejects_too_many_players() {
        let many: Vec<String> = (0..21).map(|i| format!("P{i}")).collect();
        let result = Configuration::new(21, 1, many);
        assert!(matches!(result, Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn test_new_rejects_all_imposters() {
        let result = Configuration::new(3, 3, names(&["A", "B", "C"]));
        match result.unwrap_err() {
            DomainError::InvariantViolation(msg) => {
                assert_eq!(msg, "imposter count 3 outside [1, 2] for 3 players");
            }
            other => panic!("expected InvariantViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_new_rejects_zero_imposters() {
        let result = Configuration::new(3, 0, names(&["A", "B", "C"]));
        assert!(matches!(result, Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn test_new_rejects_name_count_mismatch() {
        let result = Configuration::new(4, 1, names(&["A", "B", "C"]));
        match result.unwrap_err() {
            DomainError::InvariantViolation(msg) => {
                assert_eq!(msg, "expected 4 player names, got 3");
            }
            other => panic!("expected InvariantViolation, got {other:?}"),
        }
    }

    #[test]
    fn test_new_reports_blank_names() {
        let result = Configuration::new(4, 1, names(&["A", "", "C", "   "]));
        assert_eq!(
            result.unwrap_err(),
            DomainError::IncompleteNames {
                blank_slots: vec![1, 3]
            }
        );
    }

    // --- ConfigurationDraft ---

    #[test]
    fn test_default_draft_has_three_blank_seats() {
        let draft = ConfigurationDraft::new();
        assert_eq!(draft.player_count(), 3);
        assert_eq!(draft.imposter_count(), 1);
        assert_eq!(draft.player_names(), names(&["", "", ""]).as_slice());
        assert!(!draft.is_complete());
    }

    #[test]
    fn test_player_count_clamps_to_bounds() {
        let mut draft = ConfigurationDraft::new();

        draft.set_player_count(1);
        assert_eq!(draft.player_count(), 3);

        draft.set_player_count(50);
        assert_eq!(draft.player_count(), 20);
        assert_eq!(draft.player_names().len(), 20);
    }

    #[test]
    fn test_player_count_input_defaults_on_garbage() {
        let mut draft = ConfigurationDraft::new();
        draft.set_player_count(8);

        draft.set_player_count_input("lots");
        assert_eq!(draft.player_count(), 3);

        draft.set_player_count_input(" 6 ");
        assert_eq!(draft.player_count(), 6);

        draft.set_player_count_input("-4");
        assert_eq!(draft.player_count(), 3);
    }

    #[test]
    fn test_resize_preserves_names_by_position() {
        let mut draft = ConfigurationDraft::new();
        draft.fill_names(["A", "B", "C"]);

        draft.set_player_count(5);
        assert_eq!(draft.player_names(), names(&["A", "B", "C", "", ""]).as_slice());

        draft.set_player_name(4, "E").unwrap();
        draft.set_player_count(4);
        assert_eq!(draft.player_names(), names(&["A", "B", "C", ""]).as_slice());
    }

    #[test]
    fn test_shrinking_table_reclamps_imposters() {
        let mut draft = ConfigurationDraft::new();
        draft.set_player_count(10);
        draft.set_imposter_count(9);
        assert_eq!(draft.imposter_count(), 9);

        draft.set_player_count(4);
        assert_eq!(draft.imposter_count(), 3);
    }

    #[test]
    fn test_imposter_count_clamps_to_bounds() {
        let mut draft = ConfigurationDraft::new();

        draft.set_imposter_count(0);
        assert_eq!(draft.imposter_count(), 1);

        draft.set_imposter_count(3);
        assert_eq!(draft.imposter_count(), 2);
    }

    #[test]
    fn test_imposter_count_input_defaults_on_garbage() {
        let mut draft = ConfigurationDraft::new();
        draft.set_player_count(6);
        draft.set_imposter_count(4);

        draft.set_imposter_count_input("");
        assert_eq!(draft.imposter_count(), 1);

        draft.set_imposter_count_input("2");
        assert_eq!(draft.imposter_count(), 2);
    }

    #[test]
    fn test_set_player_name_out_of_range_is_invariant_violation() {
        let mut draft = ConfigurationDraft::new();
        let result = draft.set_player_name(3, "D");
        assert!(matches!(result, Err(DomainError::InvariantViolation(_))));
    }

    #[test]
    fn test_fill_names_blanks_missing_seats() {
        let mut draft = ConfigurationDraft::new();
        draft.fill_names(["A", "B", "C"]);
        draft.fill_names(["X"]);
        assert_eq!(draft.player_names(), names(&["X", "", ""]).as_slice());
    }

    #[test]
    fn test_fill_names_ignores_extras() {
        let mut draft = ConfigurationDraft::new();
        draft.fill_names(["A", "B", "C", "D"]);
        assert_eq!(draft.player_names(), names(&["A", "B", "C"]).as_slice());
    }

    #[test]
    fn test_validate_reports_blank_slots_without_mutating() {
        let mut draft = ConfigurationDraft::new();
        draft.fill_names(["A", " "]);
        let before = draft.clone();

        let result = draft.validate();

        assert_eq!(
            result.unwrap_err(),
            DomainError::IncompleteNames {
                blank_slots: vec![1, 2]
            }
        );
        assert_eq!(draft, before);
    }

    #[test]
    fn test_validate_produces_configuration() {
        let mut draft = ConfigurationDraft::new();
        draft.set_player_count(4);
        draft.set_imposter_count(2);
        draft.fill_names(["A", "B", "C", "D"]);

        let config = draft.validate().unwrap();

        assert_eq!(config.player_count(), 4);
        assert_eq!(config.imposter_count(), 2);
    }

    #[test]
    fn test_draft_from_configuration_round_trips() {
        let config = Configuration::new(3, 1, names(&["A", "B", "C"])).unwrap();
        let draft = ConfigurationDraft::from(&config);
        assert_eq!(draft.validate().unwrap(), config);
    }
}
