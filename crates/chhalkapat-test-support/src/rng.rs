//! Test RNG — deterministic `DeterministicRng` implementations for tests.

use chhalkapat_core::rng::DeterministicRng;

/// An RNG that always returns `min` for `next_u32_range` and `0.0` for
/// `next_f64`. Suitable for tests that do not depend on specific draws.
#[derive(Debug)]
pub struct MockRng;

impl DeterministicRng for MockRng {
    fn next_u32_range(&mut self, min: u32, _max: u32) -> u32 {
        min
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}

/// An RNG that returns values from a predetermined sequence.
///
/// Used in tests that script an exact deal: the word draw, the two
/// Fisher–Yates passes and the starter pick each consume values in order.
///
/// Panics if the sequence is exhausted or a scripted value falls outside
/// the requested range, so a stale script fails loudly.
#[derive(Debug)]
pub struct SequenceRng {
    values: Vec<u32>,
    index: usize,
}

impl SequenceRng {
    /// Create a new `SequenceRng` with the given values.
    #[must_use]
    pub fn new(values: Vec<u32>) -> Self {
        Self { values, index: 0 }
    }

    /// Number of values consumed so far.
    #[must_use]
    pub fn consumed(&self) -> usize {
        self.index
    }
}

impl DeterministicRng for SequenceRng {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        let val = self.values[self.index];
        assert!(
            (min..=max).contains(&val),
            "scripted value {val} outside [{min}, {max}] at draw {}",
            self.index
        );
        self.index += 1;
        val
    }

    fn next_f64(&mut self) -> f64 {
        0.0
    }
}
