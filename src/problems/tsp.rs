//! Traveling salesman over a fixed, seeded city layout.

use serde_json::json;

use crate::compute::{EvoRng, Problem, encoding};
use crate::error::{ConfigError, ProblemError};
use crate::schema::{EngineConfig, ParamField, RunParams, Score};

use super::{check_range, engine_fields};

/// Find the shortest closed tour through every city.
///
/// Cities are drawn uniformly from a 100x100 square by a generator seeded
/// with `seed`, so the geography is identical across runs regardless of the
/// engine's own seed. Fitness is `1 / (tour_length + 1e-6)`.
#[derive(Debug, Clone)]
pub struct Tsp {
    pub cities: Vec<(f64, f64)>,
    pub seed: u64,
}

impl Tsp {
    pub const DEFAULT_CITIES: usize = 10;
    pub const DEFAULT_SEED: u64 = 42;

    /// Generate `num_cities` cities from `seed`.
    pub fn new(num_cities: usize, seed: u64) -> Self {
        let mut rng = EvoRng::new(seed);
        let cities = (0..num_cities)
            .map(|_| (rng.uniform(0.0, 100.0), rng.uniform(0.0, 100.0)))
            .collect();
        Self { cities, seed }
    }

    pub fn from_params(params: &RunParams) -> Result<Self, ConfigError> {
        let num_cities = check_range(
            "num_cities",
            params.usize_or("num_cities", Self::DEFAULT_CITIES)?,
            3,
            200,
        )?;
        let seed = params.u64_or("city_seed", Self::DEFAULT_SEED)?;
        if seed > EngineConfig::MAX_SEED {
            return Err(ConfigError::out_of_range("city_seed", seed, "must fit in 53 bits"));
        }
        Ok(Self::new(num_cities, seed))
    }

    /// Length of the closed tour, returning to the first city.
    pub fn tour_length(&self, tour: &[usize]) -> f64 {
        if tour.is_empty() {
            return 0.0;
        }
        tour.iter()
            .zip(tour.iter().cycle().skip(1))
            .map(|(&a, &b)| {
                let (x1, y1) = self.cities[a];
                let (x2, y2) = self.cities[b];
                (x1 - x2).hypot(y1 - y2)
            })
            .sum()
    }
}

impl Default for Tsp {
    fn default() -> Self {
        Self::new(Self::DEFAULT_CITIES, Self::DEFAULT_SEED)
    }
}

impl Problem for Tsp {
    type Individual = Vec<usize>;

    fn parameter_schema(&self) -> Vec<ParamField> {
        let mut fields = vec![
            ParamField::number("num_cities", "Number of Cities", self.cities.len() as f64)
                .range(3.0, 200.0),
            ParamField::number("city_seed", "City Layout Seed", self.seed as f64)
                .range(0.0, EngineConfig::MAX_SEED as f64),
        ];
        fields.extend(engine_fields(100, 100, 0.05));
        fields
    }

    fn create_individual(&self, rng: &mut EvoRng) -> Result<Vec<usize>, ProblemError> {
        Ok(encoding::random_permutation(self.cities.len(), rng))
    }

    fn fitness(&self, tour: &Vec<usize>) -> Result<Score, ProblemError> {
        encoding::check_permutation(tour, self.cities.len())?;
        Ok(Score::Scalar(1.0 / (self.tour_length(tour) + 1e-6)))
    }

    fn breed(
        &self,
        a: &Vec<usize>,
        b: &Vec<usize>,
        rng: &mut EvoRng,
    ) -> Result<Vec<usize>, ProblemError> {
        encoding::order_crossover(a, b, rng)
    }

    fn mutate(
        &self,
        tour: &Vec<usize>,
        rate: f64,
        rng: &mut EvoRng,
    ) -> Result<Vec<usize>, ProblemError> {
        Ok(encoding::swap_mutation(tour, rate, rng))
    }

    fn validate(&self, tour: &Vec<usize>) -> Result<(), ProblemError> {
        encoding::check_permutation(tour, self.cities.len())
    }

    fn details(&self, tour: &Vec<usize>) -> Option<serde_json::Value> {
        Some(json!({
            "tour_length": self.tour_length(tour),
            "cities": self.cities,
        }))
    }
}
