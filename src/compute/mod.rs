//! Compute module - The evolutionary engine and its building blocks.
//!
//! - `engine`: the generational loop
//! - `selection`: elitist truncation for scalar fitness
//! - `pareto`: dominance and fast non-dominated sort for multi-objective fitness
//! - `encoding`: generators and variation operators for common encodings
//! - `problem`: the contract problems implement
//! - `rng`: the seedable generator threaded through every random draw

pub mod encoding;
mod engine;
mod pareto;
mod problem;
mod rng;
mod selection;

pub use engine::{Engine, run};
pub use pareto::{dominates, fast_non_dominated_sort, front_ranks, pareto_survivors};
pub use problem::Problem;
pub use rng::EvoRng;
pub use selection::{SurvivorSelection, TruncationSelection};
