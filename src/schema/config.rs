//! Engine configuration read from run parameters.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, EngineError};

use super::RunParams;

/// Settings that drive the generational loop.
///
/// Every numeric field is required when reading from [`RunParams`]; the engine
/// never substitutes defaults of its own. Problems fill in their defaults
/// through their parameter schema before the engine sees the parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EngineConfig {
    /// Number of individuals in every generation.
    pub population_size: usize,
    /// Number of generations to run. There is no early stopping.
    pub generations: usize,
    /// Per-gene mutation probability handed to the problem's `mutate`.
    pub mutation_rate: f64,
    /// Random seed. Drawn from entropy when absent.
    #[serde(default)]
    pub seed: Option<u64>,
}

impl EngineConfig {
    pub const POPULATION_SIZE: &'static str = "population_size";
    pub const GENERATIONS: &'static str = "generations";
    pub const MUTATION_RATE: &'static str = "mutation_rate";
    pub const SEED: &'static str = "seed";

    /// Largest seed that survives a trip through a JSON number.
    pub const MAX_SEED: u64 = (1 << 53) - 1;
    pub const MAX_POPULATION_SIZE: usize = 100_000;
    pub const MAX_GENERATIONS: usize = 100_000;

    /// Read and validate the engine settings from run parameters.
    pub fn from_params(params: &RunParams) -> Result<Self, EngineError> {
        let config = Self {
            population_size: params.require_usize(Self::POPULATION_SIZE)?,
            generations: params.require_usize(Self::GENERATIONS)?,
            mutation_rate: params.require_number(Self::MUTATION_RATE)?,
            seed: params.usize(Self::SEED)?.map(|s| s as u64),
        };
        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration.
    pub fn validate(&self) -> Result<(), EngineError> {
        if self.population_size < 2 {
            return Err(EngineError::EmptyPopulation {
                population_size: self.population_size,
            });
        }
        if self.population_size > Self::MAX_POPULATION_SIZE {
            return Err(ConfigError::out_of_range(
                Self::POPULATION_SIZE,
                self.population_size,
                format!("must be at most {}", Self::MAX_POPULATION_SIZE),
            )
            .into());
        }
        if self.generations == 0 {
            return Err(ConfigError::out_of_range(
                Self::GENERATIONS,
                self.generations,
                "at least one generation is required",
            )
            .into());
        }
        if self.generations > Self::MAX_GENERATIONS {
            return Err(ConfigError::out_of_range(
                Self::GENERATIONS,
                self.generations,
                format!("must be at most {}", Self::MAX_GENERATIONS),
            )
            .into());
        }
        if !(0.0..=1.0).contains(&self.mutation_rate) {
            return Err(ConfigError::out_of_range(
                Self::MUTATION_RATE,
                self.mutation_rate,
                "must be between 0 and 1",
            )
            .into());
        }
        if let Some(seed) = self.seed.filter(|&s| s > Self::MAX_SEED) {
            return Err(
                ConfigError::out_of_range(Self::SEED, seed, "must fit in 53 bits").into(),
            );
        }
        Ok(())
    }

    /// Number of survivors kept by truncation selection.
    pub fn survivor_count(&self) -> usize {
        self.population_size / 2
    }
}
