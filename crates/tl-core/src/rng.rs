//! Seeded RNG for cycle durations.
//!
//! # Determinism strategy
//!
//! Every light draws from its own `SmallRng`.  When several lights share one
//! run seed, each is seeded with:
//!
//!   seed = run_seed XOR (light_index * MIXING_CONSTANT)
//!
//! The mixing constant is the 64-bit fractional part of the golden ratio, so
//! neighbouring light indices land far apart in seed space and the same run
//! seed always reproduces the same cycle lengths.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Deterministic RNG owned by a single cycling task.
///
/// Moved into the task's thread on `simulate()`; never shared.
pub struct CycleRng(SmallRng);

impl CycleRng {
    pub fn new(seed: u64) -> Self {
        CycleRng(SmallRng::seed_from_u64(seed))
    }

    /// Seed for the `light_index`-th light of a run.
    pub fn for_light(run_seed: u64, light_index: u32) -> Self {
        let seed = run_seed ^ (light_index as u64).wrapping_mul(MIXING_CONSTANT);
        CycleRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
