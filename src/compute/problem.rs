//! The contract every optimization problem implements to plug into the engine.

use std::fmt::Debug;

use crate::error::ProblemError;
use crate::schema::{ParamField, Score};

use super::EvoRng;

/// An optimization problem: encoding, fitness and variation operators.
///
/// The engine treats `Individual` as opaque. It only creates, clones, breeds
/// and mutates individuals through these methods. Operators take their inputs
/// by reference and must return freshly built values.
///
/// Every capability may fail; a failure aborts the run with
/// [`EngineError::ProblemContract`](crate::error::EngineError::ProblemContract).
pub trait Problem: Send + Sync {
    /// Candidate solution representation.
    type Individual: Clone + Debug + Send + Sync;

    /// Configurable fields with defaults and bounds, in display order.
    fn parameter_schema(&self) -> Vec<ParamField>;

    /// Build a random individual.
    fn create_individual(&self, rng: &mut EvoRng) -> Result<Self::Individual, ProblemError>;

    /// Score an individual. Scalar scores are maximized; objective vectors of
    /// length [`objective_count`](Self::objective_count) are minimized.
    fn fitness(&self, individual: &Self::Individual) -> Result<Score, ProblemError>;

    /// Combine two parents into one child.
    fn breed(
        &self,
        a: &Self::Individual,
        b: &Self::Individual,
        rng: &mut EvoRng,
    ) -> Result<Self::Individual, ProblemError>;

    /// Perturb an individual with per-gene probability `rate`.
    fn mutate(
        &self,
        individual: &Self::Individual,
        rate: f64,
        rng: &mut EvoRng,
    ) -> Result<Self::Individual, ProblemError>;

    /// Number of objectives. Two or more switches the engine to Pareto selection.
    fn objective_count(&self) -> usize {
        1
    }

    /// Structural check applied to every individual the engine receives.
    fn validate(&self, _individual: &Self::Individual) -> Result<(), ProblemError> {
        Ok(())
    }

    /// Problem-specific annotations of a result individual.
    fn details(&self, _individual: &Self::Individual) -> Option<serde_json::Value> {
        None
    }
}
