//! Scores, per-generation history and run results.

use serde::{Deserialize, Serialize};

/// Fitness of one individual.
///
/// Scalar scores are maximized. Objective vectors are minimized component-wise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Score {
    Scalar(f64),
    Objectives(Vec<f64>),
}

impl Score {
    pub fn as_scalar(&self) -> Option<f64> {
        match self {
            Score::Scalar(v) => Some(*v),
            Score::Objectives(_) => None,
        }
    }

    pub fn objectives(&self) -> Option<&[f64]> {
        match self {
            Score::Scalar(_) => None,
            Score::Objectives(v) => Some(v),
        }
    }

    /// Number of values carried by this score.
    pub fn len(&self) -> usize {
        match self {
            Score::Scalar(_) => 1,
            Score::Objectives(v) => v.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// NaN and the infinities have no JSON representation.
    pub(crate) fn has_non_finite(&self) -> bool {
        match self {
            Score::Scalar(v) => !v.is_finite(),
            Score::Objectives(v) => v.iter().any(|x| !x.is_finite()),
        }
    }
}

impl From<f64> for Score {
    fn from(value: f64) -> Self {
        Score::Scalar(value)
    }
}

impl From<Vec<f64>> for Score {
    fn from(values: Vec<f64>) -> Self {
        Score::Objectives(values)
    }
}

/// Summary of one generation's scalar fitness values.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FitnessStats {
    pub best: f64,
    pub mean: f64,
    pub worst: f64,
    pub std: f64,
}

impl FitnessStats {
    /// Compute statistics over a generation. `None` for an empty slice.
    pub fn from_scores(scores: &[f64]) -> Option<Self> {
        if scores.is_empty() {
            return None;
        }
        let n = scores.len() as f64;
        let best = scores.iter().copied().fold(f64::NEG_INFINITY, f64::max);
        let worst = scores.iter().copied().fold(f64::INFINITY, f64::min);
        let mean = scores.iter().sum::<f64>() / n;
        let variance = scores.iter().map(|s| (s - mean).powi(2)).sum::<f64>() / n;
        Some(Self {
            best,
            mean,
            worst,
            std: variance.sqrt(),
        })
    }
}

/// What the engine recorded for one generation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationRecord {
    pub generation: usize,
    /// Best score of this generation. For multi-objective runs, the first
    /// member of the Pareto front.
    pub best: Score,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stats: Option<FitnessStats>,
    /// Objective vectors of the Pareto front (multi-objective runs only).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub front: Option<Vec<Vec<f64>>>,
}

/// A non-dominated individual of the final population.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FrontMember<I> {
    pub individual: I,
    pub objectives: Vec<f64>,
}

/// Outcome of one engine run. Owned entirely by the caller.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunResult<I> {
    /// Best individual seen in any generation.
    pub best: I,
    pub score: Score,
    /// One record per generation, in generation order.
    pub history: Vec<GenerationRecord>,
    /// Seed the run used; passing it back reproduces the run.
    pub seed: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pareto_front: Option<Vec<FrontMember<I>>>,
}

impl<I> RunResult<I> {
    /// Scalar best of each generation, for plotting.
    pub fn best_per_generation(&self) -> Vec<f64> {
        self.history
            .iter()
            .filter_map(|r| r.best.as_scalar())
            .collect()
    }

    /// Running maximum of the per-generation best.
    pub fn best_so_far(&self) -> Vec<f64> {
        self.best_per_generation()
            .into_iter()
            .scan(f64::NEG_INFINITY, |acc, v| {
                *acc = acc.max(v);
                Some(*acc)
            })
            .collect()
    }

    /// Convert every individual in the result, keeping everything else.
    pub fn try_map<J, E>(
        self,
        mut f: impl FnMut(I) -> Result<J, E>,
    ) -> Result<RunResult<J>, E> {
        let pareto_front = match self.pareto_front {
            Some(front) => Some(
                front
                    .into_iter()
                    .map(|m| {
                        Ok(FrontMember {
                            individual: f(m.individual)?,
                            objectives: m.objectives,
                        })
                    })
                    .collect::<Result<Vec<_>, E>>()?,
            ),
            None => None,
        };
        Ok(RunResult {
            best: f(self.best)?,
            score: self.score,
            history: self.history,
            seed: self.seed,
            pareto_front,
        })
    }
}

/// Type-erased run result with problem-specific details.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunReport {
    #[serde(flatten)]
    pub result: RunResult<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}
