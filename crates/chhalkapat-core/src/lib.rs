//! ChhalKapat Core — shared domain abstractions.
//!
//! This crate defines the fundamental traits and types that the game
//! context depends on. It contains no I/O code.

pub mod clock;
pub mod command;
pub mod error;
pub mod event;
pub mod rng;
