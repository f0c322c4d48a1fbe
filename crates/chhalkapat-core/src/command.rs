//! Player intents submitted to a session.

use uuid::Uuid;

/// A request from the table, such as starting a game or passing the device.
pub trait Command: Send + Sync + std::fmt::Debug {
    /// Dotted name used in logs, e.g. `game.advance`.
    fn command_type(&self) -> &'static str;

    /// Ties the command to the events it records.
    fn correlation_id(&self) -> Uuid;
}
