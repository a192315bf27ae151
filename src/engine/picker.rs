//! Random selection primitive used for drawing questions and answer cells.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::error::GameError;

pub trait RandomSource {
    /// Uniform integer in `[0, max)`. `max` must be > 0.
    fn random_int(&mut self, max: usize) -> usize;

    /// `size` distinct integers from `[0, max)`, uniformly ordered.
    fn unique_random_ints(&mut self, max: usize, size: usize) -> Result<Vec<usize>, GameError>;
}

/// Adapts any `rand` generator.
pub struct RngSource<R>(pub R);

impl RngSource<StdRng> {
    /// OS / browser entropy (getrandom `js` on wasm32).
    pub fn from_entropy() -> Self {
        Self(StdRng::from_entropy())
    }

    pub fn seeded(seed: u64) -> Self {
        Self(StdRng::seed_from_u64(seed))
    }
}

impl<R: Rng> RandomSource for RngSource<R> {
    fn random_int(&mut self, max: usize) -> usize {
        self.0.gen_range(0..max)
    }

    fn unique_random_ints(&mut self, max: usize, size: usize) -> Result<Vec<usize>, GameError> {
        if size > max {
            return Err(GameError::Configuration(format!(
                "cannot pick {size} distinct values from {max}"
            )));
        }
        Ok(rand::seq::index::sample(&mut self.0, max, size).into_vec())
    }
}
