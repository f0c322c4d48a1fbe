//! ChhalKapat — the imposter word game context.
//!
//! Responsible for validating the table setup, dealing a round (secret
//! word, imposters, reveal order, discussion starter), passing the device
//! from player to player without leaking assignments, and the session
//! lifecycle around it.

pub mod application;
pub mod domain;
