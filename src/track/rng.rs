//! Random sequence sources
//!
//! Every random decision the generator makes (run length, turn tile, obstacle
//! roll, obstacle prefab) goes through [`RandomSource`], so a fixed seed
//! reproduces a track exactly.

use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

/// Uniform draws used by track generation
pub trait RandomSource {
    /// Uniform float in [0, 1)
    fn next_unit(&mut self) -> f32;

    /// Uniform integer in [min, max). Returns `min` when the range is empty.
    fn next_range(&mut self, min: usize, max: usize) -> usize;

    /// Uniform pick from a slice
    fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T>
    where
        Self: Sized,
    {
        if items.is_empty() {
            None
        } else {
            items.get(self.next_range(0, items.len()))
        }
    }
}

/// Seeded PCG32 source
#[derive(Debug, Clone)]
pub struct SeededRandom {
    seed: u64,
    rng: Pcg32,
}

impl SeededRandom {
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            rng: Pcg32::seed_from_u64(seed),
        }
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }
}

impl RandomSource for SeededRandom {
    fn next_unit(&mut self) -> f32 {
        self.rng.random::<f32>()
    }

    fn next_range(&mut self, min: usize, max: usize) -> usize {
        if min >= max {
            return min;
        }
        self.rng.random_range(min..max)
    }
}

/// Replays a scripted sequence of unit values, cycling when exhausted
///
/// Integer draws map the unit value onto the range, so `0.0` always picks
/// `min` and values just below `1.0` pick `max - 1`.
#[derive(Debug, Clone)]
pub struct SequenceRandom {
    values: Vec<f32>,
    cursor: usize,
}

impl SequenceRandom {
    pub fn new(values: Vec<f32>) -> Self {
        Self { values, cursor: 0 }
    }

    /// Always returns the same value
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }

    /// Number of values drawn so far
    pub fn draws(&self) -> usize {
        self.cursor
    }
}

impl RandomSource for SequenceRandom {
    fn next_unit(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let value = self.values[self.cursor % self.values.len()];
        self.cursor += 1;
        value.clamp(0.0, 1.0 - f32::EPSILON)
    }

    fn next_range(&mut self, min: usize, max: usize) -> usize {
        if min >= max {
            return min;
        }
        let span = max - min;
        let offset = (self.next_unit() * span as f32) as usize;
        min + offset.min(span - 1)
    }
}
