//! 0/1 knapsack over a fixed item catalogue.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::compute::{EvoRng, Problem, encoding};
use crate::error::{ConfigError, ProblemError};
use crate::schema::{ParamField, RunParams, Score};

use super::{check_range, engine_fields};

/// An item that can go in the knapsack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item {
    pub weight: u32,
    pub value: u32,
}

/// Pick items maximizing total value without exceeding `max_weight`.
///
/// Overweight selections score 0.
#[derive(Debug, Clone)]
pub struct Knapsack {
    pub items: Vec<Item>,
    pub max_weight: u32,
}

impl Knapsack {
    pub const ITEMS: [Item; 7] = [
        Item { weight: 12, value: 4 },
        Item { weight: 2, value: 2 },
        Item { weight: 1, value: 2 },
        Item { weight: 1, value: 1 },
        Item { weight: 4, value: 10 },
        Item { weight: 1, value: 2 },
        Item { weight: 2, value: 1 },
    ];

    pub fn from_params(params: &RunParams) -> Result<Self, ConfigError> {
        let max_weight = params.usize_or("max_weight", Self::default().max_weight as usize)?;
        Ok(Self {
            items: Self::ITEMS.to_vec(),
            max_weight: check_range("max_weight", max_weight, 1, 30)? as u32,
        })
    }

    /// Total (weight, value) of the selected items.
    pub fn totals(&self, selection: &[u8]) -> (u32, u32) {
        self.items
            .iter()
            .zip(selection)
            .filter(|(_, picked)| **picked == 1)
            .fold((0, 0), |(w, v), (item, _)| (w + item.weight, v + item.value))
    }
}

impl Default for Knapsack {
    fn default() -> Self {
        Self {
            items: Self::ITEMS.to_vec(),
            max_weight: 15,
        }
    }
}

impl Problem for Knapsack {
    type Individual = Vec<u8>;

    fn parameter_schema(&self) -> Vec<ParamField> {
        let mut fields = vec![
            ParamField::number("max_weight", "Max Knapsack Weight", self.max_weight as f64)
                .range(1.0, 30.0),
        ];
        fields.extend(engine_fields(80, 80, 0.05));
        fields
    }

    fn create_individual(&self, rng: &mut EvoRng) -> Result<Vec<u8>, ProblemError> {
        Ok(encoding::random_bits(self.items.len(), rng))
    }

    fn fitness(&self, individual: &Vec<u8>) -> Result<Score, ProblemError> {
        let (weight, value) = self.totals(individual);
        let score = if weight > self.max_weight { 0 } else { value };
        Ok(Score::Scalar(score as f64))
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
        encoding::check_length(individual.len(), self.items.len())?;
        encoding::check_bounds(individual, 0, 1)
    }

    fn details(&self, individual: &Vec<u8>) -> Option<serde_json::Value> {
        let picked: Vec<Item> = self
            .items
            .iter()
            .zip(individual)
            .filter(|(_, p)| **p == 1)
            .map(|(item, _)| *item)
            .collect();
        let (total_weight, total_value) = self.totals(individual);
        Some(json!({
            "items_picked": picked,
            "total_weight": total_weight,
            "total_value": total_value,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fitness_within_capacity() {
        let problem = Knapsack::default();
        // Items 1, 2, 4, 5: weight 2+1+4+1 = 8, value 2+2+10+2 = 16
        let selection = vec![0, 1, 1, 0, 1, 1, 0];
        assert_eq!(problem.totals(&selection), (8, 16));
        assert_eq!(problem.fitness(&selection).unwrap(), Score::Scalar(16.0));
    }

    #[test]
    fn test_overweight_scores_zero() {
        let problem = Knapsack::default();
        let everything = vec![1; 7];
        assert_eq!(problem.totals(&everything), (23, 22));
        assert_eq!(problem.fitness(&everything).unwrap(), Score::Scalar(0.0));
    }

    #[test]
    fn test_details_report_selection() {
        let problem = Knapsack::default();
        let details = problem.details(&vec![0, 0, 0, 0, 1, 0, 0]).unwrap();
        assert_eq!(details["total_weight"], 4);
        assert_eq!(details["total_value"], 10);
        assert_eq!(details["items_picked"][0]["weight"], 4);
    }

    #[test]
    fn test_max_weight_bounds() {
        let params = RunParams::new().with("max_weight", 31usize);
        assert!(Knapsack::from_params(&params).is_err());
        let params = RunParams::new().with("max_weight", 20usize);
        assert_eq!(Knapsack::from_params(&params).unwrap().max_weight, 20);
    }
}
