//! Injectable RNG for city generation.
//!
//! Wraps `ChaCha8Rng` so every stochastic step (boundary draws, district
//! placement, grid-area rotation, building sampling) pulls from one explicit
//! source. Cities generated from the same seed and parameters are identical;
//! the default source is entropy-seeded, so unseeded runs differ.

use bevy::prelude::*;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

/// RNG threaded through every generation step.
///
/// Generators take `&mut CityRng` and draw from `rng.0` (a `ChaCha8Rng`
/// implementing `rand::Rng`).
#[derive(Resource)]
pub struct CityRng(pub ChaCha8Rng);

impl Default for CityRng {
    fn default() -> Self {
        Self::from_entropy()
    }
}

impl CityRng {
    /// Create a new `CityRng` seeded from the given `u64` value.
    pub fn from_seed_u64(seed: u64) -> Self {
        Self(ChaCha8Rng::seed_from_u64(seed))
    }

    /// Create a new `CityRng` seeded from OS entropy.
    pub fn from_entropy() -> Self {
        Self(ChaCha8Rng::from_entropy())
    }

    /// Seeded when `seed` is given, entropy otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_seed_u64(seed),
            None => Self::from_entropy(),
        }
    }
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
