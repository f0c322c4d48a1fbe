//! Query handlers for the game context.
//!
//! Views here are what a frontend renders. `SessionView` is safe to show
//! the whole table; the secret word is only reachable through
//! [`get_reveal_card`] while the current player holds the card.

use chhalkapat_core::error::DomainError;
use serde::Serialize;
use uuid::Uuid;

use crate::domain::reveal::RevealCard;
use crate::domain::session::{Session, SessionState};

/// Read-only view of the setup form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SetupView {
    /// Player count field.
    pub player_count: usize,
    /// Imposter count field.
    pub imposter_count: usize,
    /// Name slots in seat order.
    pub player_names: Vec<String>,
    /// Seats still missing a name.
    pub blank_slots: Vec<usize>,
}

/// Read-only view of reveal progress. Carries no assignment data.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RevealProgressView {
    /// 1-based position of the current player.
    pub position: usize,
    /// Number of players in the round.
    pub total: usize,
    /// Name of the player who should hold the device.
    pub current_player: String,
    /// Whether the card is being held.
    pub visible: bool,
}

/// Read-only view of the discussion screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DiscussionView {
    /// The crew member who speaks first.
    pub starting_player: String,
    /// Number of imposters among the players.
    pub imposter_count: usize,
    /// Number of players.
    pub player_count: usize,
}

/// Read-only view of a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SessionView {
    /// The session identifier.
    pub session_id: Uuid,
    /// Current phase as a string.
    pub phase: String,
    /// Number of events recorded.
    pub version: i64,
    /// Setup form, in setup.
    pub setup: Option<SetupView>,
    /// Reveal progress, while revealing.
    pub reveal: Option<RevealProgressView>,
    /// Discussion summary, in discussion.
    pub discussion: Option<DiscussionView>,
}

/// Builds the table-safe view of a session.
#[must_use]
pub fn get_session(session: &Session) -> SessionView {
    let mut view = SessionView {
        session_id: session.id,
        phase: session.phase().as_str().to_owned(),
        version: session.version(),
        setup: None,
        reveal: None,
        discussion: None,
    };

    match session.state() {
        SessionState::Setup(draft) => {
            view.setup = Some(SetupView {
                player_count: draft.player_count(),
                imposter_count: draft.imposter_count(),
                player_names: draft.player_names().to_vec(),
                blank_slots: draft.blank_slots(),
            });
        }
        SessionState::Revealing(sequencer) => {
            let card = sequencer.current();
            view.reveal = Some(RevealProgressView {
                position: card.position,
                total: card.total,
                current_player: card.name.to_owned(),
                visible: sequencer.is_visible(),
            });
        }
        SessionState::Discussion(_) => {
            view.discussion = get_discussion(session).ok();
        }
    }

    view
}

/// Returns the current player's card.
///
/// # Errors
///
/// Returns `DomainError::InvalidPhase` outside the reveal phase.
pub fn get_reveal_card(session: &Session) -> Result<RevealCard<'_>, DomainError> {
    match session.state() {
        SessionState::Revealing(sequencer) => Ok(sequencer.current()),
        other => Err(DomainError::InvalidPhase {
            operation: "view card",
            phase: other.phase().as_str(),
        }),
    }
}

/// Returns the discussion screen.
///
/// # Errors
///
/// Returns `DomainError::InvalidPhase` outside the discussion phase.
pub fn get_discussion(session: &Session) -> Result<DiscussionView, DomainError> {
    match session.state() {
        SessionState::Discussion(discussion) => Ok(DiscussionView {
            starting_player: discussion.starting_player().to_owned(),
            imposter_count: discussion.imposter_count(),
            player_count: discussion.player_count(),
        }),
        other => Err(DomainError::InvalidPhase {
            operation: "view discussion",
            phase: other.phase().as_str(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use chhalkapat_core::error::DomainError;
    use chhalkapat_test_support::{SequenceRng, fixed_clock};
    use uuid::Uuid;

    use crate::application::query_handlers::{get_discussion, get_reveal_card, get_session};
    use crate::domain::reveal::CardFace;
    use crate::domain::session::Session;
    use crate::domain::word_pool::WordPool;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_owned()).collect()
    }

    /// Reveal order B, A, C; C is the imposter; the word is "Pizza".
    fn revealing_session() -> Session {
        let clock = fixed_clock();
        let mut session = Session::new(Uuid::new_v4());
        let config = session
            .configure(3, 1, &names(&["A", "B", "C"]), Uuid::new_v4(), &clock)
            .unwrap();
        let mut rng = SequenceRng::new(vec![0, 0, 1, 2, 0, 1]);
        session
            .start_game(&config, &WordPool::default(), &mut rng, Uuid::new_v4(), &clock)
            .unwrap();
        session
    }

    #[test]
    fn test_view_in_setup() {
        let mut session = Session::new(Uuid::new_v4());
        session.draft_mut().unwrap().fill_names(["A"]);

        let view = get_session(&session);

        assert_eq!(view.phase, "setup");
        assert_eq!(view.version, 0);
        let setup = view.setup.unwrap();
        assert_eq!(setup.player_count, 3);
        assert_eq!(setup.blank_slots, vec![1, 2]);
        assert!(view.reveal.is_none());
        assert!(view.discussion.is_none());
    }

    #[test]
    fn test_view_while_revealing_hides_word_even_when_held() {
        let mut session = revealing_session();
        session.hold_reveal(true).unwrap();

        let view = get_session(&session);

        assert_eq!(view.phase, "revealing");
        let reveal = view.reveal.as_ref().unwrap();
        assert_eq!(reveal.position, 1);
        assert_eq!(reveal.current_player, "B");
        assert!(reveal.visible);
        let json = serde_json::to_string(&view).unwrap();
        assert!(!json.contains("Pizza"));
    }

    #[test]
    fn test_reveal_card_shows_word_only_while_held() {
        let mut session = revealing_session();
        assert_eq!(get_reveal_card(&session).unwrap().face, CardFace::Hidden);

        session.hold_reveal(true).unwrap();

        assert_eq!(
            get_reveal_card(&session).unwrap().face,
            CardFace::Shown {
                word: "Pizza",
                is_imposter: false
            }
        );
    }

    #[test]
    fn test_reveal_card_in_setup_is_invalid_phase() {
        let session = Session::new(Uuid::new_v4());
        assert_eq!(
            get_reveal_card(&session).unwrap_err(),
            DomainError::InvalidPhase {
                operation: "view card",
                phase: "setup"
            }
        );
    }

    #[test]
    fn test_view_in_discussion() {
        let mut session = revealing_session();
        for _ in 0..3 {
            session.advance(Uuid::new_v4(), &fixed_clock()).unwrap();
        }

        let view = get_session(&session);

        assert_eq!(view.phase, "discussion");
        assert_eq!(view.version, 6);
        let discussion = view.discussion.unwrap();
        assert_eq!(discussion.starting_player, "A");
        assert_eq!(discussion.imposter_count, 1);
        assert_eq!(discussion.player_count, 3);
        assert_eq!(get_discussion(&session).unwrap().starting_player, "A");
    }
}
