//! Domain model for the game context.

pub mod commands;
pub mod configuration;
pub mod events;
pub mod reveal;
pub mod round;
pub mod session;
pub mod word_pool;
