//! Injectable randomness
//!
//! The simulation only ever asks for "the next float in [0, 1)". Production runs
//! use a seeded PCG stream; tests can script the exact sequence instead.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::tuning::Range;

/// Source of uniform floats in `[0, 1)`
pub trait RandomSource {
    fn next_f32(&mut self) -> f32;

    /// Uniform sample in `[range.min, range.max)`
    fn uniform(&mut self, range: Range) -> f32 {
        self.next_f32() * (range.max - range.min) + range.min
    }

    /// Weighted coin flip, true with probability `p`
    fn chance(&mut self, p: f32) -> bool {
        self.next_f32() < p
    }
}

impl RandomSource for Pcg32 {
    fn next_f32(&mut self) -> f32 {
        self.random::<f32>()
    }
}

/// Seeded PCG stream for reproducible runs
pub fn seeded(seed: u64) -> Pcg32 {
    Pcg32::seed_from_u64(seed)
}

/// Fresh seed from the thread RNG, logged so a run can be replayed
pub fn random_seed() -> u64 {
    let seed = rand::random::<u64>();
    log::info!("Run seed: {seed}");
    seed
}

/// Replays a fixed list of values, cycling when exhausted
#[derive(Debug, Clone)]
pub struct SequenceSource {
    values: Vec<f32>,
    index: usize,
}

impl SequenceSource {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let values = values.into();
        Self { values, index: 0 }
    }

    /// A source that always yields the same value
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl RandomSource for SequenceSource {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.index % self.values.len()];
        self.index += 1;
        value.clamp(0.0, 1.0 - f32::EPSILON)
    }
}
