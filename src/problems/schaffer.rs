//! Schaffer's two-objective function.

use crate::compute::{EvoRng, Problem};
use crate::error::ProblemError;
use crate::schema::{ParamField, Score};

use super::engine_fields;

/// Minimize `f1(x) = x^2` and `f2(x) = (x - 2)^2` over `x` in `[-10, 10]`.
///
/// Every `x` in `[0, 2]` is Pareto-optimal.
#[derive(Debug, Clone, Copy, Default)]
pub struct Schaffer;

impl Schaffer {
    pub const BOUND: f64 = 10.0;
    pub const MUTATION_SIGMA: f64 = 1.0;

    pub fn objectives(x: f64) -> [f64; 2] {
        [x * x, (x - 2.0) * (x - 2.0)]
    }
}

impl Problem for Schaffer {
    type Individual = f64;

    fn parameter_schema(&self) -> Vec<ParamField> {
        engine_fields(100, 60, 0.1)
    }

    fn create_individual(&self, rng: &mut EvoRng) -> Result<f64, ProblemError> {
        Ok(rng.uniform(-Self::BOUND, Self::BOUND))
    }

    fn fitness(&self, x: &f64) -> Result<Score, ProblemError> {
        Ok(Score::Objectives(Self::objectives(*x).to_vec()))
    }

    fn breed(&self, a: &f64, b: &f64, rng: &mut EvoRng) -> Result<f64, ProblemError> {
        let alpha = rng.unit();
        Ok(alpha * a + (1.0 - alpha) * b)
    }

    fn mutate(&self, x: &f64, rate: f64, rng: &mut EvoRng) -> Result<f64, ProblemError> {
        let moved = if rng.chance(rate) {
            x + rng.gaussian(0.0, Self::MUTATION_SIGMA)
        } else {
            *x
        };
        Ok(moved.clamp(-Self::BOUND, Self::BOUND))
    }

    fn objective_count(&self) -> usize {
        2
    }

    fn validate(&self, x: &f64) -> Result<(), ProblemError> {
        if !x.is_finite() || x.abs() > Self::BOUND {
            return Err(ProblemError::InvalidIndividual(format!(
                "{x} outside [-{b}, {b}]",
                b = Self::BOUND
            )));
        }
        Ok(())
    }
}
