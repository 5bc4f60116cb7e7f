//! Bit-string problems: one-point crossover and bit-flip mutation over
//! fixed-length vectors of 0/1 genes.

use crate::compute::{EvoRng, Problem, encoding};
use crate::error::{ConfigError, ProblemError};
use crate::schema::{ParamField, RunParams, Score};

use super::{check_range, engine_fields};

fn check_bits(individual: &[u8], length: usize) -> Result<(), ProblemError> {
    encoding::check_length(individual.len(), length)?;
    encoding::check_bounds(individual, 0, 1)
}

fn count_ones(bits: &[u8]) -> usize {
    bits.iter().filter(|&&b| b == 1).count()
}

// ============================================================================
// Max Ones
// ============================================================================

/// Maximize the number of ones.
#[derive(Debug, Clone)]
pub struct MaxOnes {
    pub length: usize,
}

impl Default for MaxOnes {
    fn default() -> Self {
        Self { length: 50 }
    }
}

impl MaxOnes {
    pub fn from_params(params: &RunParams) -> Result<Self, ConfigError> {
        let length = params.usize_or("length", Self::default().length)?;
        Ok(Self {
            length: check_range("length", length, 2, 500)?,
        })
    }
}

impl Problem for MaxOnes {
    type Individual = Vec<u8>;

    fn parameter_schema(&self) -> Vec<ParamField> {
        let mut fields = vec![
            ParamField::number("length", "Bit String Length", self.length as f64)
                .range(2.0, 500.0),
        ];
        fields.extend(engine_fields(100, 100, 0.05));
        fields
    }

    fn create_individual(&self, rng: &mut EvoRng) -> Result<Vec<u8>, ProblemError> {
        Ok(encoding::random_bits(self.length, rng))
    }

    fn fitness(&self, individual: &Vec<u8>) -> Result<Score, ProblemError> {
        Ok(Score::Scalar(count_ones(individual) as f64))
    }

    fn breed(&self, a: &Vec<u8>, b: &Vec<u8>, rng: &mut EvoRng) -> Result<Vec<u8>, ProblemError> {
        encoding::one_point_crossover(a, b, rng)
    }

    fn mutate(
        &self,
        individual: &Vec<u8>,
        rate: f64,
        rng: &mut EvoRng,
    ) -> Result<Vec<u8>, ProblemError> {
        Ok(encoding::flip_bits(individual, rate, rng))
    }

    fn validate(&self, individual: &Vec<u8>) -> Result<(), ProblemError> {
        check_bits(individual, self.length)
    }
}

// ============================================================================
// Bitstring Match
// ============================================================================

/// Match a fixed 12-bit target.
#[derive(Debug, Clone)]
pub struct BitstringMatch {
    pub target: Vec<u8>,
}

impl BitstringMatch {
    pub const TARGET: [u8; 12] = [1, 0, 1, 1, 0, 1, 0, 1, 1, 0, 1, 0];
}

impl Default for BitstringMatch {
    fn default() -> Self {
        Self {
            target: Self::TARGET.to_vec(),
        }
    }
}

impl Problem for BitstringMatch {
    type Individual = Vec<u8>;

    fn parameter_schema(&self) -> Vec<ParamField> {
        engine_fields(100, 100, 0.01)
    }

    fn create_individual(&self, rng: &mut EvoRng) -> Result<Vec<u8>, ProblemError> {
        Ok(encoding::random_bits(self.target.len(), rng))
    }

    fn fitness(&self, individual: &Vec<u8>) -> Result<Score, ProblemError> {
        let matches = individual
            .iter()
            .zip(&self.target)
            .filter(|(a, b)| a == b)
            .count();
        Ok(Score::Scalar(matches as f64))
    }

    fn breed(&self, a: &Vec<u8>, b: &Vec<u8>, rng: &mut EvoRng) -> Result<Vec<u8>, ProblemError> {
        encoding::one_point_crossover(a, b, rng)
    }

    fn mutate(
        &self,
        individual: &Vec<u8>,
        rate: f64,
        rng: &mut EvoRng,
    ) -> Result<Vec<u8>, ProblemError> {
        Ok(encoding::flip_bits(individual, rate, rng))
    }

    fn validate(&self, individual: &Vec<u8>) -> Result<(), ProblemError> {
        check_bits(individual, self.target.len())
    }
}

// ============================================================================
// Deceptive Trap
// ============================================================================

/// Concatenated trap functions over blocks of `k` bits.
///
/// A block scores `k` when all ones, otherwise `k - 1 - ones`, which pulls a
/// hill climber toward all zeros.
#[derive(Debug, Clone)]
pub struct DeceptiveTrap {
    pub n: usize,
    pub k: usize,
}

impl Default for DeceptiveTrap {
    fn default() -> Self {
        Self { n: 30, k: 5 }
    }
}

impl DeceptiveTrap {
    pub fn from_params(params: &RunParams) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            n: check_range("n", params.usize_or("n", defaults.n)?, 6, 100)?,
            k: check_range("k", params.usize_or("k", defaults.k)?, 2, 10)?,
        })
    }

    /// Trap value of one block. A trailing partial block cannot reach `k`.
    pub fn trap(&self, block: &[u8]) -> f64 {
        let ones = count_ones(block);
        if ones == self.k {
            self.k as f64
        } else {
            self.k as f64 - 1.0 - ones as f64
        }
    }
}

impl Problem for DeceptiveTrap {
    type Individual = Vec<u8>;

    fn parameter_schema(&self) -> Vec<ParamField> {
        let mut fields = vec![
            ParamField::number("n", "Number of Bits", self.n as f64).range(6.0, 100.0),
            ParamField::number("k", "Trap Size", self.k as f64).range(2.0, 10.0),
        ];
        fields.extend(engine_fields(120, 120, 0.02));
        fields
    }

    fn create_individual(&self, rng: &mut EvoRng) -> Result<Vec<u8>, ProblemError> {
        Ok(encoding::random_bits(self.n, rng))
    }

    fn fitness(&self, individual: &Vec<u8>) -> Result<Score, ProblemError> {
        Ok(Score::Scalar(
            individual.chunks(self.k).map(|block| self.trap(block)).sum(),
        ))
    }

    fn breed(&self, a: &Vec<u8>, b: &Vec<u8>, rng: &mut EvoRng) -> Result<Vec<u8>, ProblemError> {
        encoding::one_point_crossover(a, b, rng)
    }

    fn mutate(
        &self,
        individual: &Vec<u8>,
        rate: f64,
        rng: &mut EvoRng,
    ) -> Result<Vec<u8>, ProblemError> {
        Ok(encoding::flip_bits(individual, rate, rng))
    }

    fn validate(&self, individual: &Vec<u8>) -> Result<(), ProblemError> {
        check_bits(individual, self.n)
    }
}

// ============================================================================
// Royal Road
// ============================================================================

/// Rewards complete blocks of ones: `block_size` per all-ones block.
#[derive(Debug, Clone)]
pub struct RoyalRoad {
    pub n: usize,
    pub block_size: usize,
}

impl Default for RoyalRoad {
    fn default() -> Self {
        Self {
            n: 64,
            block_size: 8,
        }
    }
}

impl RoyalRoad {
    pub fn from_params(params: &RunParams) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        Ok(Self {
            n: check_range("n", params.usize_or("n", defaults.n)?, 8, 512)?,
            block_size: check_range(
                "block_size",
                params.usize_or("block_size", defaults.block_size)?,
                2,
                32,
            )?,
        })
    }
}

impl Problem for RoyalRoad {
    type Individual = Vec<u8>;

    fn parameter_schema(&self) -> Vec<ParamField> {
        let mut fields = vec![
            ParamField::number("n", "Number of Bits", self.n as f64).range(8.0, 512.0),
            ParamField::number("block_size", "Block Size", self.block_size as f64)
                .range(2.0, 32.0),
        ];
        fields.extend(engine_fields(100, 100, 0.01));
        fields
    }

    fn create_individual(&self, rng: &mut EvoRng) -> Result<Vec<u8>, ProblemError> {
        Ok(encoding::random_bits(self.n, rng))
    }

    fn fitness(&self, individual: &Vec<u8>) -> Result<Score, ProblemError> {
        let complete = individual
            .chunks(self.block_size)
            .filter(|block| block.iter().all(|&b| b == 1))
            .count();
        Ok(Score::Scalar((complete * self.block_size) as f64))
    }

    fn breed(&self, a: &Vec<u8>, b: &Vec<u8>, rng: &mut EvoRng) -> Result<Vec<u8>, ProblemError> {
        encoding::one_point_crossover(a, b, rng)
    }

    fn mutate(
        &self,
        individual: &Vec<u8>,
        rate: f64,
        rng: &mut EvoRng,
    ) -> Result<Vec<u8>, ProblemError> {
        Ok(encoding::flip_bits(individual, rate, rng))
    }

    fn validate(&self, individual: &Vec<u8>) -> Result<(), ProblemError> {
        check_bits(individual, self.n)
    }
}
