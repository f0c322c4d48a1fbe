//! Commands for the game context.

use chhalkapat_core::command::Command;
use uuid::Uuid;

use super::configuration::Configuration;
use super::reveal::RevealGesture;

/// Command to submit the setup form.
///
/// Counts are clamped like the form fields; names fill seats in order.
#[derive(Debug, Clone)]
pub struct Configure {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// Requested player count.
    pub player_count: usize,
    /// Requested imposter count.
    pub imposter_count: usize,
    /// Player names in seat order.
    pub player_names: Vec<String>,
}

impl Command for Configure {
    fn command_type(&self) -> &'static str {
        "game.configure"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to deal a round and begin the reveal phase.
#[derive(Debug, Clone)]
pub struct StartGame {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// The validated table setup.
    pub configuration: Configuration,
}

impl Command for StartGame {
    fn command_type(&self) -> &'static str {
        "game.start_game"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to show or hide the current player's word.
#[derive(Debug, Clone)]
pub struct HoldReveal {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
    /// `true` while the card is held.
    pub visible: bool,
}

impl HoldReveal {
    /// Builds the command for a raw hold gesture.
    #[must_use]
    pub fn from_gesture(correlation_id: Uuid, gesture: RevealGesture) -> Self {
        Self {
            correlation_id,
            visible: gesture.holds(),
        }
    }
}

impl Command for HoldReveal {
    fn command_type(&self) -> &'static str {
        "game.hold_reveal"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to confirm the current player and pass the device on.
#[derive(Debug, Clone)]
pub struct Advance {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for Advance {
    fn command_type(&self) -> &'static str {
        "game.advance"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}

/// Command to leave the discussion and set up a new game.
#[derive(Debug, Clone)]
pub struct Reset {
    /// The correlation ID for tracing.
    pub correlation_id: Uuid,
}

impl Command for Reset {
    fn command_type(&self) -> &'static str {
        "game.reset"
    }

    fn correlation_id(&self) -> Uuid {
        self.correlation_id
    }
}
