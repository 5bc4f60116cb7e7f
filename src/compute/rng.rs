//! Explicit random generator handle threaded through every stochastic call.

use rand::prelude::*;

/// Seedable random generator used by the engine and by problem operators.
///
/// Every random draw of a run goes through one `EvoRng`, so a run is
/// reproducible from its seed.
#[derive(Debug, Clone)]
pub struct EvoRng {
    rng: StdRng,
}

impl EvoRng {
    /// Create from seed.
    pub fn new(seed: u64) -> Self {
        Self {
            rng: StdRng::seed_from_u64(seed),
        }
    }

    /// Uniform value in `[0, 1)`.
    pub fn unit(&mut self) -> f64 {
        self.rng.r#gen::<f64>()
    }

    /// True with probability `p`. Values outside `[0, 1]` saturate.
    pub fn chance(&mut self, p: f64) -> bool {
        self.unit() < p
    }

    /// Uniform index in `0..len`. `len` must be non-zero.
    pub fn index(&mut self, len: usize) -> usize {
        self.rng.gen_range(0..len)
    }

    /// Uniform integer in the inclusive range `low..=high`.
    pub fn int_in(&mut self, low: i64, high: i64) -> i64 {
        self.rng.gen_range(low..=high)
    }

    /// Uniform real in the inclusive range `low..=high`.
    pub fn uniform(&mut self, low: f64, high: f64) -> f64 {
        self.rng.gen_range(low..=high)
    }

    /// Sample from a normal distribution.
    pub fn gaussian(&mut self, mean: f64, std_dev: f64) -> f64 {
        let z: f64 = self.rng.sample(rand_distr::StandardNormal);
        mean + z * std_dev
    }

    /// Shuffle a slice in place.
    pub fn shuffle<T>(&mut self, items: &mut [T]) {
        items.shuffle(&mut self.rng);
    }

    /// Uniformly pick one element.
    pub fn choose<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        items.choose(&mut self.rng)
    }
}
