//! Simulation RNG
//!
//! Wraps `ChaCha8Rng` so fleet generation and telemetry ticks draw from one
//! explicit, seedable source. Identical seeds produce identical fleets and
//! identical tick sequences.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use std::ops::Range;

/// Seedable RNG used by the generator and the simulator
#[derive(Clone, Debug)]
pub struct SimRng(ChaCha8Rng);

impl SimRng {
    /// Create a new `SimRng` seeded from the given `u64` value.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create a `SimRng` seeded from OS entropy (non-reproducible)
    pub fn from_entropy() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }

    /// Seeded when a seed is configured, entropy otherwise
    pub fn from_config(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed_u64(seed),
            None => Self::from_entropy(),
        }
    }

    /// Uniform draw from a half-open range
    pub fn range(&mut self, range: Range<f64>) -> f64 {
        self.0.gen_range(range)
    }

    /// Uniform draw from `[0, upper)`
    pub fn below(&mut self, upper: f64) -> f64 {
        self.range(0.0..upper)
    }
}
