//! Random number generator abstraction for determinism.
//!
//! In production, this wraps a seeded `StdRng`. In tests, a scripted
//! implementation is injected so deals can be asserted exactly.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Abstraction over random number generation.
pub trait DeterministicRng: Send + Sync {
    /// Generate a random `u32` in the range `[min, max]` inclusive.
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32;

    /// Generate a random `f64` in `[0.0, 1.0)`.
    fn next_f64(&mut self) -> f64;
}

/// Production RNG backed by `rand`'s standard generator.
#[derive(Debug, Clone)]
pub struct StdRandom(StdRng);

impl StdRandom {
    /// Seeds the generator from operating system entropy.
    #[must_use]
    pub fn from_os_rng() -> Self {
        Self(StdRng::from_os_rng())
    }

    /// Seeds the generator from a fixed value, for reproducible sessions.
    #[must_use]
    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl DeterministicRng for StdRandom {
    fn next_u32_range(&mut self, min: u32, max: u32) -> u32 {
        self.0.random_range(min..=max)
    }

    fn next_f64(&mut self) -> f64 {
        self.0.random::<f64>()
    }
}

/// Shuffles `items` in place with the Fisher–Yates algorithm.
///
/// Every permutation is equally likely provided `rng` is uniform. Draws
/// exactly `items.len() - 1` values (none for slices shorter than two).
#[allow(clippy::cast_possible_truncation)]
pub fn shuffle<T>(rng: &mut dyn DeterministicRng, items: &mut [T]) {
    for i in (1..items.len()).rev() {
        let j = rng.next_u32_range(0, i as u32) as usize;
        items.swap(i, j);
    }
}

/// Picks an index in `[0, len)` uniformly, or `None` when `len` is zero.
#[allow(clippy::cast_possible_truncation)]
pub fn choose_index(rng: &mut dyn DeterministicRng, len: usize) -> Option<usize> {
    if len == 0 {
        return None;
    }
    Some(rng.next_u32_range(0, (len - 1) as u32) as usize)
}

/// Returns a uniformly shuffled permutation of `0..len`.
#[must_use]
pub fn permutation(rng: &mut dyn DeterministicRng, len: usize) -> Vec<usize> {
    let mut indices: Vec<usize> = (0..len).collect();
    shuffle(rng, &mut indices);
    indices
}
