//! Random number source for the simulation.
//!
//! The integrator only needs uniform floats and coin flips, so the trait is
//! small. `StdRandom` wraps `rand::rngs::StdRng`; seed it for reproducible
//! runs and tests, or seed it from OS entropy for the real screensaver.
//!
//! # Example
//!
//! ```ignore
//! use cube_physics::rng::{CubeRng, StdRandom};
//!
//! let mut rng = StdRandom::from_u64_seed(42);
//! let t = rng.next_f32();            // 0.0..1.0
//! let speed = rng.range_f32(2.0, 5.0);
//! let flip = rng.next_bool();
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Uniform randomness used by the cube initializer and integrator.
pub trait CubeRng {
    /// Returns a float in [0.0, 1.0).
    fn next_f32(&mut self) -> f32;

    /// Returns a float in [min, max).
    fn range_f32(&mut self, min: f32, max: f32) -> f32 {
        min + self.next_f32() * (max - min)
    }

    /// Returns a random boolean.
    fn next_bool(&mut self) -> bool {
        self.next_f32() < 0.5
    }

    /// Returns `1.0` or `-1.0` with equal probability.
    fn next_sign(&mut self) -> f32 {
        if self.next_bool() {
            1.0
        } else {
            -1.0
        }
    }
}

/// Standard RNG wrapper using `rand::rngs::StdRng`.
#[derive(Clone)]
pub struct StdRandom {
    rng: StdRng,
}

impl StdRandom {
    /// Create from a u64 seed. Same seed, same sequence.
    pub fn from_u64_seed(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Create from OS entropy.
    pub fn from_entropy() -> Self {
        Self {
            rng: StdRng::from_entropy(),
        }
    }

    /// Seeded when a seed is given, entropy otherwise.
    pub fn from_optional_seed(seed: Option<u64>) -> Self {
        match seed {
            Some(seed) => Self::from_u64_seed(seed),
            None => Self::from_entropy(),
        }
    }
}

impl CubeRng for StdRandom {
    fn next_f32(&mut self) -> f32 {
        self.rng.gen::<f32>()
    }

    fn next_bool(&mut self) -> bool {
        self.rng.gen::<bool>()
    }
}

/// Replays a fixed list of values, cycling when exhausted.
///
/// Lets tests pin every draw the integrator makes.
#[derive(Debug, Clone)]
pub struct SequenceRng {
    values: Vec<f32>,
    index: usize,
}

impl SequenceRng {
    pub fn new(values: impl Into<Vec<f32>>) -> Self {
        let values = values.into();
        Self { values, index: 0 }
    }

    /// Always returns the same value.
    pub fn constant(value: f32) -> Self {
        Self::new(vec![value])
    }
}

impl CubeRng for SequenceRng {
    fn next_f32(&mut self) -> f32 {
        if self.values.is_empty() {
            return 0.0;
        }
        let v = self.values[self.index % self.values.len()];
        self.index += 1;
        v
    }
}
