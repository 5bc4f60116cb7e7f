//! Built-in optimization problems and the problem registry.
//!
//! Every problem is a parameterization of the same engine loop with its own
//! encoding and fitness:
//!
//! - Bit strings: `max_ones`, `bitstring_match`, `deceptive_trap`,
//!   `royal_road`, `knapsack`
//! - Bounded integers: `sudoku4x4`, `even_sum`, `target_sum`
//! - Permutations: `tsp`
//! - Reals: `sphere`, `rastrigin`, `multiobjective_schaffer` (two objectives)

mod bitstring;
mod integer;
mod knapsack;
mod real;
mod registry;
mod schaffer;
mod sudoku;
mod tsp;

pub use bitstring::{BitstringMatch, DeceptiveTrap, MaxOnes, RoyalRoad};
pub use integer::{EvenSum, TargetSum};
pub use knapsack::{Item, Knapsack};
pub use real::{Rastrigin, Sphere};
pub use registry::{DynProblem, ProblemFactory, ProblemRegistry, ProblemSummary};
pub use schaffer::Schaffer;
pub use sudoku::Sudoku4x4;
pub use tsp::Tsp;

use crate::schema::{EngineConfig, ParamField};

/// Engine fields appended to every built-in schema, with per-problem defaults.
pub(crate) fn engine_fields(
    population_size: usize,
    generations: usize,
    mutation_rate: f64,
) -> Vec<ParamField> {
    vec![
        ParamField::number(
            EngineConfig::POPULATION_SIZE,
            "Population Size",
            population_size as f64,
        )
        .range(2.0, 1000.0),
        ParamField::number(EngineConfig::GENERATIONS, "Generations", generations as f64)
            .range(1.0, 2000.0),
        ParamField::number(EngineConfig::MUTATION_RATE, "Mutation Rate", mutation_rate)
            .range(0.0, 1.0)
            .step(0.01),
        ParamField::number(EngineConfig::SEED, "Random Seed", 0.0)
            .range(0.0, EngineConfig::MAX_SEED as f64)
            .optional(),
    ]
}

/// Fail unless `value` lies within `min..=max`.
pub(crate) fn check_range(
    field: &str,
    value: usize,
    min: usize,
    max: usize,
) -> Result<usize, crate::error::ConfigError> {
    if value < min || value > max {
        return Err(crate::error::ConfigError::out_of_range(
            field,
            value,
            format!("must be between {min} and {max}"),
        ));
    }
    Ok(value)
}
