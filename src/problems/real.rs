//! Continuous benchmark functions, minimized by maximizing their negation.

use std::f64::consts::PI;

use serde_json::json;

use crate::compute::{EvoRng, Problem, encoding};
use crate::error::{ConfigError, ProblemError};
use crate::schema::{ParamField, RunParams, Score};

use super::{check_range, engine_fields};

fn check_reals(individual: &[f64], dimensions: usize) -> Result<(), ProblemError> {
    encoding::check_length(individual.len(), dimensions)?;
    if individual.iter().any(|x| !x.is_finite()) {
        return Err(ProblemError::InvalidIndividual(
            "genes must be finite".to_string(),
        ));
    }
    Ok(())
}

/// Sphere function `sum(x^2)`, optimum 0 at the origin.
#[derive(Debug, Clone)]
pub struct Sphere {
    pub dimensions: usize,
}

impl Default for Sphere {
    fn default() -> Self {
        Self { dimensions: 3 }
    }
}

impl Sphere {
    pub const INIT_BOUND: f64 = 5.0;
    pub const MUTATION_SIGMA: f64 = 0.2;

    pub fn from_params(params: &RunParams) -> Result<Self, ConfigError> {
        let dimensions = params.usize_or("dimensions", Self::default().dimensions)?;
        Ok(Self {
            dimensions: check_range("dimensions", dimensions, 1, 15)?,
        })
    }

    pub fn value(x: &[f64]) -> f64 {
        x.iter().map(|xi| xi * xi).sum()
    }
}

impl Problem for Sphere {
    type Individual = Vec<f64>;

    fn parameter_schema(&self) -> Vec<ParamField> {
        let mut fields = vec![
            ParamField::number("dimensions", "Dimensions", self.dimensions as f64)
                .range(1.0, 15.0),
        ];
        fields.extend(engine_fields(60, 60, 0.08));
        fields
    }

    fn create_individual(&self, rng: &mut EvoRng) -> Result<Vec<f64>, ProblemError> {
        Ok(encoding::random_reals(
            self.dimensions,
            -Self::INIT_BOUND,
            Self::INIT_BOUND,
            rng,
        ))
    }

    fn fitness(&self, individual: &Vec<f64>) -> Result<Score, ProblemError> {
        Ok(Score::Scalar(-Self::value(individual)))
    }

    fn breed(
        &self,
        a: &Vec<f64>,
        b: &Vec<f64>,
        rng: &mut EvoRng,
    ) -> Result<Vec<f64>, ProblemError> {
        encoding::blend_crossover(a, b, rng)
    }

    fn mutate(
        &self,
        individual: &Vec<f64>,
        rate: f64,
        rng: &mut EvoRng,
    ) -> Result<Vec<f64>, ProblemError> {
        Ok(encoding::gaussian_perturb(
            individual,
            rate,
            Self::MUTATION_SIGMA,
            None,
            rng,
        ))
    }

    fn validate(&self, individual: &Vec<f64>) -> Result<(), ProblemError> {
        check_reals(individual, self.dimensions)
    }

    fn details(&self, individual: &Vec<f64>) -> Option<serde_json::Value> {
        Some(json!({ "value": Self::value(individual) }))
    }
}

/// Rastrigin function `10d + sum(x^2 - 10 cos(2 pi x))` on `[-5.12, 5.12]^d`.
///
/// Highly multimodal; the global optimum is 0 at the origin.
#[derive(Debug, Clone)]
pub struct Rastrigin {
    pub dimensions: usize,
}

impl Default for Rastrigin {
    fn default() -> Self {
        Self { dimensions: 3 }
    }
}

impl Rastrigin {
    pub const BOUND: f64 = 5.12;
    pub const MUTATION_SIGMA: f64 = 0.3;

    pub fn from_params(params: &RunParams) -> Result<Self, ConfigError> {
        let dimensions = params.usize_or("dimensions", Self::default().dimensions)?;
        Ok(Self {
            dimensions: check_range("dimensions", dimensions, 1, 15)?,
        })
    }

    pub fn value(x: &[f64]) -> f64 {
        10.0 * x.len() as f64
            + x.iter()
                .map(|xi| xi * xi - 10.0 * (2.0 * PI * xi).cos())
                .sum::<f64>()
    }
}

impl Problem for Rastrigin {
    type Individual = Vec<f64>;

    fn parameter_schema(&self) -> Vec<ParamField> {
        let mut fields = vec![
            ParamField::number("dimensions", "Dimensions", self.dimensions as f64)
                .range(1.0, 15.0),
        ];
        fields.extend(engine_fields(80, 100, 0.1));
        fields
    }

    fn create_individual(&self, rng: &mut EvoRng) -> Result<Vec<f64>, ProblemError> {
        Ok(encoding::random_reals(
            self.dimensions,
            -Self::BOUND,
            Self::BOUND,
            rng,
        ))
    }

    fn fitness(&self, individual: &Vec<f64>) -> Result<Score, ProblemError> {
        Ok(Score::Scalar(-Self::value(individual)))
    }

    fn breed(
        &self,
        a: &Vec<f64>,
        b: &Vec<f64>,
        rng: &mut EvoRng,
    ) -> Result<Vec<f64>, ProblemError> {
        encoding::blend_crossover(a, b, rng)
    }

    fn mutate(
        &self,
        individual: &Vec<f64>,
        rate: f64,
        rng: &mut EvoRng,
    ) -> Result<Vec<f64>, ProblemError> {
        Ok(encoding::gaussian_perturb(
            individual,
            rate,
            Self::MUTATION_SIGMA,
            Some((-Self::BOUND, Self::BOUND)),
            rng,
        ))
    }

    fn validate(&self, individual: &Vec<f64>) -> Result<(), ProblemError> {
        check_reals(individual, self.dimensions)?;
        encoding::check_bounds(individual, -Self::BOUND, Self::BOUND)
    }

    fn details(&self, individual: &Vec<f64>) -> Option<serde_json::Value> {
        Some(json!({ "value": Self::value(individual) }))
    }
}
