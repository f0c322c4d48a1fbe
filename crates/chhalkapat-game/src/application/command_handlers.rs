//! Command handlers for the game context.
//!
//! Each handler runs one session operation and returns the events it
//! produced. Everything is synchronous: input arrives one event at a time
//! from a single device, so the session is borrowed mutably rather than
//! locked.

use chhalkapat_core::clock::Clock;
use chhalkapat_core::command::Command;
use chhalkapat_core::error::DomainError;
use chhalkapat_core::rng::DeterministicRng;
use tracing::{debug, info, instrument};

use crate::domain::commands::{Advance, Configure, HoldReveal, Reset, StartGame};
use crate::domain::configuration::Configuration;
use crate::domain::events::SessionEvent;
use crate::domain::session::Session;
use crate::domain::word_pool::WordPool;

/// Handles the `Configure` command: validates the setup form.
///
/// # Errors
///
/// Returns `DomainError::IncompleteNames` if a seat has no name,
/// `DomainError::InvariantViolation` if the name count does not match the
/// player count, or `DomainError::InvalidPhase` outside setup.
#[instrument(skip_all, fields(session_id = %session.id, correlation_id = %command.correlation_id))]
pub fn handle_configure(
    command: &Configure,
    session: &mut Session,
    clock: &dyn Clock,
) -> Result<(Configuration, Vec<SessionEvent>), DomainError> {
    info!(command_type = command.command_type(), "handling command");

    let configuration = session.configure(
        command.player_count,
        command.imposter_count,
        &command.player_names,
        command.correlation_id,
        clock,
    )?;

    Ok((configuration, session.take_uncommitted_events()))
}

/// Handles the `StartGame` command: deals a round and begins revealing.
///
/// # Errors
///
/// Returns `DomainError::InvalidPhase` outside setup, or
/// `DomainError::InvariantViolation` if the configuration is not the one
/// the session was configured with.
#[instrument(skip_all, fields(session_id = %session.id, correlation_id = %command.correlation_id))]
pub fn handle_start_game(
    command: &StartGame,
    session: &mut Session,
    pool: &WordPool,
    rng: &mut dyn DeterministicRng,
    clock: &dyn Clock,
) -> Result<Vec<SessionEvent>, DomainError> {
    info!(
        command_type = command.command_type(),
        player_count = command.configuration.player_count(),
        imposter_count = command.configuration.imposter_count(),
        "handling command"
    );

    session.start_game(
        &command.configuration,
        pool,
        rng,
        command.correlation_id,
        clock,
    )?;

    Ok(session.take_uncommitted_events())
}

/// Handles the `HoldReveal` command. Produces no events.
///
/// # Errors
///
/// Returns `DomainError::InvalidPhase` outside the reveal phase.
#[instrument(skip_all, fields(session_id = %session.id, correlation_id = %command.correlation_id))]
pub fn handle_hold_reveal(command: &HoldReveal, session: &mut Session) -> Result<(), DomainError> {
    debug!(
        command_type = command.command_type(),
        visible = command.visible,
        "handling command"
    );
    session.hold_reveal(command.visible)
}

/// Handles the `Advance` command: confirms the current player.
///
/// # Errors
///
/// Returns `DomainError::InvalidPhase` outside the reveal phase.
#[instrument(skip_all, fields(session_id = %session.id, correlation_id = %command.correlation_id))]
pub fn handle_advance(
    command: &Advance,
    session: &mut Session,
    clock: &dyn Clock,
) -> Result<Vec<SessionEvent>, DomainError> {
    info!(command_type = command.command_type(), "handling command");

    session.advance(command.correlation_id, clock)?;

    Ok(session.take_uncommitted_events())
}

/// Handles the `Reset` command: returns to setup for a new game.
///
/// # Errors
///
/// Returns `DomainError::InvalidPhase` outside the discussion phase.
#[instrument(skip_all, fields(session_id = %session.id, correlation_id = %command.correlation_id))]
pub fn handle_reset(
    command: &Reset,
    session: &mut Session,
    clock: &dyn Clock,
) -> Result<Vec<SessionEvent>, DomainError> {
    info!(command_type = command.command_type(), "handling command");

    session.reset(command.correlation_id, clock)?;

    Ok(session.take_uncommitted_events())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chhalkapat_core::event::DomainEvent;
    use chhalkapat_test_support::{MockRng, fixed_clock};
    use uuid::Uuid;

    use crate::domain::session::SessionPhase;

    fn configure_command(names: &[&str], imposters: usize) -> Configure {
        Configure {
            correlation_id: Uuid::new_v4(),
            player_count: names.len(),
            imposter_count: imposters,
            player_names: names.iter().map(|s| (*s).to_owned()).collect(),
        }
    }

    #[test]
    fn test_handle_configure_returns_configuration_and_event() {
        let mut session = Session::new(Uuid::new_v4());
        let command = configure_command(&["A", "B", "C"], 1);

        let (config, events) = handle_configure(&command, &mut session, &fixed_clock()).unwrap();

        assert_eq!(config.player_count(), 3);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "game.configured");
        assert_eq!(events[0].metadata().correlation_id, command.correlation_id);
        assert!(session.uncommitted_events().is_empty());
    }

    #[test]
    fn test_handle_configure_surfaces_incomplete_names() {
        let mut session = Session::new(Uuid::new_v4());
        let command = configure_command(&["A", " ", "C"], 1);

        let result = handle_configure(&command, &mut session, &fixed_clock());

        assert_eq!(
            result.unwrap_err(),
            DomainError::IncompleteNames {
                blank_slots: vec![1]
            }
        );
        assert_eq!(session.phase(), SessionPhase::Setup);
    }

    #[test]
    fn test_handle_start_game_then_advance_to_discussion() {
        let clock = fixed_clock();
        let mut session = Session::new(Uuid::new_v4());
        let (configuration, _) =
            handle_configure(&configure_command(&["A", "B", "C"], 1), &mut session, &clock).unwrap();

        let events = handle_start_game(
            &StartGame {
                correlation_id: Uuid::new_v4(),
                configuration,
            },
            &mut session,
            &WordPool::default(),
            &mut MockRng,
            &clock,
        )
        .unwrap();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), "game.round_dealt");

        handle_hold_reveal(
            &HoldReveal {
                correlation_id: Uuid::new_v4(),
                visible: true,
            },
            &mut session,
        )
        .unwrap();

        let mut last = Vec::new();
        for _ in 0..3 {
            last = handle_advance(
                &Advance {
                    correlation_id: Uuid::new_v4(),
                },
                &mut session,
                &clock,
            )
            .unwrap();
        }

        assert_eq!(session.phase(), SessionPhase::Discussion);
        assert_eq!(last.len(), 2);
        assert_eq!(last[1].event_type(), "game.discussion_started");
        assert_eq!(last[1].metadata().sequence_number, 6);
    }

    #[test]
    fn test_handle_reset_outside_discussion_fails() {
        let mut session = Session::new(Uuid::new_v4());

        let result = handle_reset(
            &Reset {
                correlation_id: Uuid::new_v4(),
            },
            &mut session,
            &fixed_clock(),
        );

        assert!(matches!(result, Err(DomainError::InvalidPhase { .. })));
    }
}
