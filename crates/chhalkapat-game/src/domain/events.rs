//! Domain events for the game context.
//!
//! Payloads are safe to log or show to the whole table: none of them
//! carries the secret word or a player's role.

use chhalkapat_core::event::{DomainEvent, EventMetadata};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Emitted when the setup form has been validated.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameConfigured {
    /// The session identifier.
    pub session_id: Uuid,
    /// Number of players at the table.
    pub player_count: usize,
    /// Number of imposters requested.
    pub imposter_count: usize,
}

/// Emitted when a round has been dealt and the reveal phase begins.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoundDealt {
    /// The session identifier.
    pub session_id: Uuid,
    /// Number of players dealt.
    pub player_count: usize,
    /// Number of imposters dealt.
    pub imposter_count: usize,
}

/// Emitted when a player confirms they have seen their card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerConfirmed {
    /// The session identifier.
    pub session_id: Uuid,
    /// 1-based reveal position of the player who confirmed.
    pub position: usize,
    /// Number of players in the round.
    pub total: usize,
}

/// Emitted when every player has seen their card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiscussionStarted {
    /// The session identifier.
    pub session_id: Uuid,
    /// Name of the crew member who opens the discussion.
    pub starting_player: String,
    /// Number of imposters among the players.
    pub imposter_count: usize,
    /// Number of players.
    pub player_count: usize,
}

/// Emitted when the table goes back to setup for a new game.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionReset {
    /// The session identifier.
    pub session_id: Uuid,
}

/// Event payload variants for the game context.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionEventKind {
    /// The setup form has been validated.
    GameConfigured(GameConfigured),
    /// A round has been dealt.
    RoundDealt(RoundDealt),
    /// A player has seen their card.
    PlayerConfirmed(PlayerConfirmed),
    /// The discussion has started.
    DiscussionStarted(DiscussionStarted),
    /// The session is back in setup.
    SessionReset(SessionReset),
}

/// Domain event envelope for the game context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SessionEvent {
    /// Event metadata.
    pub metadata: EventMetadata,
    /// Event-specific payload.
    pub kind: SessionEventKind,
}

impl SessionEventKind {
    /// Stable type name for this payload.
    #[must_use]
    pub fn event_type(&self) -> &'static str {
        match self {
            Self::GameConfigured(_) => "game.configured",
            Self::RoundDealt(_) => "game.round_dealt",
            Self::PlayerConfirmed(_) => "game.player_confirmed",
            Self::DiscussionStarted(_) => "game.discussion_started",
            Self::SessionReset(_) => "game.session_reset",
        }
    }
}

impl DomainEvent for SessionEvent {
    fn event_type(&self) -> &'static str {
        self.kind.event_type()
    }

    fn to_payload(&self) -> serde_json::Value {
        // Serialization of derived Serialize types to Value is infallible.
        serde_json::to_value(&self.kind).expect("SessionEventKind serialization is infallible")
    }

    fn metadata(&self) -> &EventMetadata {
        &self.metadata
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chhalkapat_test_support::fixed_clock;

    fn event(kind: SessionEventKind) -> SessionEvent {
        SessionEvent {
            metadata: EventMetadata {
                event_id: Uuid::new_v4(),
                event_type: kind.event_type().to_owned(),
                aggregate_id: Uuid::new_v4(),
                sequence_number: 1,
                correlation_id: Uuid::new_v4(),
                occurred_at: fixed_clock().0,
            },
            kind,
        }
    }

    #[test]
    fn test_event_type_matches_payload_variant() {
        let session_id = Uuid::new_v4();
        let evt = event(SessionEventKind::PlayerConfirmed(PlayerConfirmed {
            session_id,
            position: 2,
            total: 4,
        }));

        assert_eq!(evt.event_type(), "game.player_confirmed");
        assert_eq!(evt.metadata().event_type, "game.player_confirmed");
    }

    #[test]
    fn test_payload_serializes_externally_tagged() {
        let session_id = Uuid::new_v4();
        let evt = event(SessionEventKind::DiscussionStarted(DiscussionStarted {
            session_id,
            starting_player: "Asha".to_owned(),
            imposter_count: 1,
            player_count: 3,
        }));

        let payload = evt.to_payload();

        assert_eq!(payload["DiscussionStarted"]["starting_player"], "Asha");
        assert_eq!(payload["DiscussionStarted"]["imposter_count"], 1);
        assert_eq!(
            payload["DiscussionStarted"]["session_id"],
            session_id.to_string()
        );
    }

    #[test]
    fn test_payload_deserializes_back() {
        let kind = SessionEventKind::SessionReset(SessionReset {
            session_id: Uuid::new_v4(),
        });
        let value = serde_json::to_value(&kind).unwrap();
        let back: SessionEventKind = serde_json::from_value(value).unwrap();
        assert_eq!(back, kind);
    }
}
