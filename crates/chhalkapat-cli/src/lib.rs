//! ChhalKapat terminal frontend.
//!
//! A thin I/O layer over the game context: it reads keyboard input line by
//! line, turns it into commands, and renders the query views.

pub mod config;
pub mod error;
pub mod terminal;
