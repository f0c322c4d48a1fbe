//! The session aggregate: one game table moving through
//! setup → revealing → discussion → (reset) → setup.

use chhalkapat_core::clock::Clock;
use chhalkapat_core::error::DomainError;
use chhalkapat_core::event::EventMetadata;
use chhalkapat_core::rng::DeterministicRng;
use serde::Serialize;
use tracing::debug;
use uuid::Uuid;

use super::configuration::{Configuration, ConfigurationDraft};
use super::events::{
    DiscussionStarted, GameConfigured, PlayerConfirmed, RoundDealt, SessionEvent,
    SessionEventKind, SessionReset,
};
use super::reveal::{RevealGesture, RevealProgress, RevealSequencer};
use super::round::Round;
use super::word_pool::WordPool;

/// Session phase, without its data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionPhase {
    /// Filling in the table.
    Setup,
    /// Players take turns viewing their card.
    Revealing,
    /// Everyone has seen their card; the table talks.
    Discussion,
}

impl SessionPhase {
    /// Lower-case phase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Setup => "setup",
            Self::Revealing => "revealing",
            Self::Discussion => "discussion",
        }
    }
}

/// The discussion phase. The round stays sealed; only what the discussion
/// screen shows is exposed.
#[derive(Debug, Clone)]
pub struct Discussion {
    round: Round,
}

impl Discussion {
    /// The crew member who speaks first.
    #[must_use]
    pub fn starting_player(&self) -> &str {
        self.round.starting_player().name()
    }

    /// Number of imposters at the table.
    #[must_use]
    pub fn imposter_count(&self) -> usize {
        self.round.imposter_count()
    }

    /// Number of players at the table.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.round.len()
    }
}

/// Phase-tagged session state.
#[derive(Debug, Clone)]
pub enum SessionState {
    /// Editing the setup form.
    Setup(ConfigurationDraft),
    /// Walking the dealt round.
    Revealing(RevealSequencer),
    /// Round complete.
    Discussion(Discussion),
}

impl Default for SessionState {
    fn default() -> Self {
        Self::Setup(ConfigurationDraft::default())
    }
}

impl SessionState {
    /// The phase this state belongs to.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        match self {
            Self::Setup(_) => SessionPhase::Setup,
            Self::Revealing(_) => SessionPhase::Revealing,
            Self::Discussion(_) => SessionPhase::Discussion,
        }
    }
}

fn invalid_phase(operation: &'static str, phase: SessionPhase) -> DomainError {
    DomainError::InvalidPhase {
        operation,
        phase: phase.as_str(),
    }
}

/// The aggregate root for one game table.
#[derive(Debug)]
pub struct Session {
    /// Aggregate identifier.
    pub id: Uuid,
    /// Number of events recorded so far.
    pub(crate) version: i64,
    state: SessionState,
    /// Events recorded since the last drain.
    uncommitted_events: Vec<SessionEvent>,
}

impl Session {
    /// Creates a session in setup with a blank form.
    #[must_use]
    pub fn new(id: Uuid) -> Self {
        Self {
            id,
            version: 0,
            state: SessionState::default(),
            uncommitted_events: Vec::new(),
        }
    }

    /// Number of events recorded so far.
    #[must_use]
    pub fn version(&self) -> i64 {
        self.version
    }

    /// Current state.
    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    /// Current phase.
    #[must_use]
    pub fn phase(&self) -> SessionPhase {
        self.state.phase()
    }

    /// Events recorded since the last call to `take_uncommitted_events`.
    #[must_use]
    pub fn uncommitted_events(&self) -> &[SessionEvent] {
        &self.uncommitted_events
    }

    /// Drains recorded events.
    pub fn take_uncommitted_events(&mut self) -> Vec<SessionEvent> {
        std::mem::take(&mut self.uncommitted_events)
    }

    fn record(&mut self, kind: SessionEventKind, correlation_id: Uuid, clock: &dyn Clock) {
        self.version += 1;
        let event = SessionEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                aggregate_id: self.id,
                sequence_number: self.version,
                correlation_id,
                occurred_at: clock.now(),
            },
            kind,
        };
        self.uncommitted_events.push(event);
    }

    /// Mutable access to the setup form, for field-by-field editing.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` outside setup.
    pub fn draft_mut(&mut self) -> Result<&mut ConfigurationDraft, DomainError> {
        match &mut self.state {
            SessionState::Setup(draft) => Ok(draft),
            other => Err(invalid_phase("edit setup", other.phase())),
        }
    }

    /// Submits the setup form in one go.
    ///
    /// Counts are clamped like the form fields. On success the form is
    /// updated and the validated configuration returned; on failure the
    /// session is left exactly as it was.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::IncompleteNames` if any seat has no name,
    /// `DomainError::InvariantViolation` if the number of names differs from
    /// the clamped player count, or `DomainError::InvalidPhase` outside setup.
    pub fn configure(
        &mut self,
        player_count: usize,
        imposter_count: usize,
        player_names: &[String],
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<Configuration, DomainError> {
        let mut candidate = self.draft_mut()?.clone();
        candidate.set_player_count(player_count);
        candidate.set_imposter_count(imposter_count);
        if player_names.len() != candidate.player_count() {
            return Err(DomainError::invariant(format!(
                "{} player names given for {} players",
                player_names.len(),
                candidate.player_count()
            )));
        }
        candidate.fill_names(player_names.iter().map(String::as_str));

        let configuration = candidate.validate()?;
        self.state = SessionState::Setup(candidate);
        self.record(
            SessionEventKind::GameConfigured(GameConfigured {
                session_id: self.id,
                player_count: configuration.player_count(),
                imposter_count: configuration.imposter_count(),
            }),
            correlation_id,
            clock,
        );
        Ok(configuration)
    }

    /// Deals a round and hands the device to the first player.
    ///
    /// `configuration` must be the table currently held by the setup form.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` outside setup,
    /// `DomainError::IncompleteNames` if the form was never completed, or
    /// `DomainError::InvariantViolation` if `configuration` is not the
    /// configured table.
    pub fn start_game(
        &mut self,
        configuration: &Configuration,
        pool: &WordPool,
        rng: &mut dyn DeterministicRng,
        correlation_id: Uuid,
        clock: &dyn Clock,
    ) -> Result<(), DomainError> {
        let configured = match &self.state {
            SessionState::Setup(draft) => draft.validate()?,
            other => return Err(invalid_phase("start game", other.phase())),
        };
        if configured != *configuration {
            return Err(DomainError::invariant(
                "configuration does not match the configured table",
            ));
        }

        let round = Round::generate(configuration, pool, rng);
        self.state = SessionState::Revealing(RevealSequencer::new(round));
        self.record(
            SessionEventKind::RoundDealt(RoundDealt {
                session_id: self.id,
                player_count: configuration.player_count(),
                imposter_count: configuration.imposter_count(),
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }

    /// Shows or hides the current player's word.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` outside the reveal phase.
    pub fn hold_reveal(&mut self, visible: bool) -> Result<(), DomainError> {
        match &mut self.state {
            SessionState::Revealing(sequencer) => {
                sequencer.set_visible(visible);
                Ok(())
            }
            other => Err(invalid_phase("hold reveal", other.phase())),
        }
    }

    /// Applies a raw hold gesture to the current card.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` outside the reveal phase.
    pub fn handle_gesture(&mut self, gesture: RevealGesture) -> Result<(), DomainError> {
        self.hold_reveal(gesture.holds())
    }

    /// Confirms the current player. After the last player the session moves
    /// to discussion.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` outside the reveal phase.
    pub fn advance(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        let sequencer = match std::mem::take(&mut self.state) {
            SessionState::Revealing(sequencer) => sequencer,
            other => {
                let phase = other.phase();
                self.state = other;
                return Err(invalid_phase("advance", phase));
            }
        };

        let position = sequencer.current_index() + 1;
        let total = sequencer.total();
        let confirmed = SessionEventKind::PlayerConfirmed(PlayerConfirmed {
            session_id: self.id,
            position,
            total,
        });

        match sequencer.advance() {
            RevealProgress::NextPlayer(next) => {
                self.state = SessionState::Revealing(next);
                self.record(confirmed, correlation_id, clock);
            }
            RevealProgress::Complete(round) => {
                let discussion = Discussion { round };
                let started = SessionEventKind::DiscussionStarted(DiscussionStarted {
                    session_id: self.id,
                    starting_player: discussion.starting_player().to_owned(),
                    imposter_count: discussion.imposter_count(),
                    player_count: discussion.player_count(),
                });
                self.state = SessionState::Discussion(discussion);
                self.record(confirmed, correlation_id, clock);
                self.record(started, correlation_id, clock);
                debug!(session_id = %self.id, "discussion started");
            }
        }
        Ok(())
    }

    /// Leaves the discussion. The setup form is pre-filled with the table
    /// that just played; the round is discarded.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::InvalidPhase` outside the discussion phase.
    pub fn reset(&mut self, correlation_id: Uuid, clock: &dyn Clock) -> Result<(), DomainError> {
        let draft = match &self.state {
            SessionState::Discussion(discussion) => {
                ConfigurationDraft::from(discussion.round.configuration())
            }
            other => return Err(invalid_phase("reset", other.phase())),
        };
        self.state = SessionState::Setup(draft);
        self.record(
            SessionEventKind::SessionReset(SessionReset {
                session_id: self.id,
            }),
            correlation_id,
            clock,
        );
        Ok(())
    }
}
