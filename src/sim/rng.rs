//! Seeded random source for cosmetic variation
//!
//! Only star fields and the menu ball's launch velocity draw from this.
//! Gameplay physics never does, so a run is reproducible from its seed.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Deterministic PCG stream owned by the game
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameRng {
    seed: u64,
    rng: Pcg32,
}

impl GameRng {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    /// Seed this stream was created from
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Uniform float in [0, 1)
    #[inline]
    pub fn next_f32(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    /// Uniform float between `min` and `max`
    #[inline]
    pub fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Uniform integer in `[min, max]` (inclusive)
    pub fn range_i32(&mut self, min: i32, max: i32) -> i32 {
        if max <= min {
            return min;
        }
        self.rng.random_range(min..=max)
    }
}
