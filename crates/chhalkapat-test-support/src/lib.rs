//! Shared test doubles and utilities for the ChhalKapat party game.

mod clock;
mod rng;

pub use clock::{FixedClock, fixed_clock};
pub use rng::{MockRng, SequenceRng};
