//! Bounded-integer list problems shipped as bundled custom problems.

use crate::compute::{EvoRng, Problem, encoding};
use crate::error::{ConfigError, ProblemError};
use crate::schema::{ParamField, RunParams, Score};

use super::{check_range, engine_fields};

fn check_genes(individual: &[i64], length: usize, max_value: i64) -> Result<(), ProblemError> {
    encoding::check_length(individual.len(), length)?;
    encoding::check_bounds(individual, 0, max_value)
}

/// Maximize the sum of the even genes in a list of integers `0..=max_value`.
#[derive(Debug, Clone)]
pub struct EvenSum {
    pub list_length: usize,
    pub max_value: i64,
}

impl Default for EvenSum {
    fn default() -> Self {
        Self {
            list_length: 10,
            max_value: 20,
        }
    }
}

impl EvenSum {
    pub fn from_params(params: &RunParams) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let list_length = params.usize_or("list_length", defaults.list_length)?;
        let max_value = params.usize_or("max_value", defaults.max_value as usize)?;
        Ok(Self {
            list_length: check_range("list_length", list_length, 2, 40)?,
            max_value: check_range("max_value", max_value, 2, 100)? as i64,
        })
    }
}

impl Problem for EvenSum {
    type Individual = Vec<i64>;

    fn parameter_schema(&self) -> Vec<ParamField> {
        let mut fields = vec![
            ParamField::number("list_length", "List Length", self.list_length as f64)
                .range(2.0, 40.0),
            ParamField::number("max_value", "Max Value", self.max_value as f64)
                .range(2.0, 100.0),
        ];
        fields.extend(engine_fields(50, 50, 0.08));
        fields
    }

    fn create_individual(&self, rng: &mut EvoRng) -> Result<Vec<i64>, ProblemError> {
        Ok(encoding::random_ints(self.list_length, 0, self.max_value, rng))
    }

    fn fitness(&self, individual: &Vec<i64>) -> Result<Score, ProblemError> {
        let sum: i64 = individual.iter().filter(|&&x| x % 2 == 0).sum();
        Ok(Score::Scalar(sum as f64))
    }

    fn breed(
        &self,
        a: &Vec<i64>,
        b: &Vec<i64>,
        rng: &mut EvoRng,
    ) -> Result<Vec<i64>, ProblemError> {
        encoding::one_point_crossover(a, b, rng)
    }

    fn mutate(
        &self,
        individual: &Vec<i64>,
        rate: f64,
        rng: &mut EvoRng,
    ) -> Result<Vec<i64>, ProblemError> {
        Ok(encoding::reset_genes(individual, rate, 0, self.max_value, rng))
    }

    fn validate(&self, individual: &Vec<i64>) -> Result<(), ProblemError> {
        check_genes(individual, self.list_length, self.max_value)
    }
}

/// Bring the sum of a list of integers `0..=20` as close as possible to
/// `target`. Fitness is `-|sum - target|`, so 0 is a perfect match.
#[derive(Debug, Clone)]
pub struct TargetSum {
    pub length: usize,
    pub target: i64,
}

impl Default for TargetSum {
    fn default() -> Self {
        Self {
            length: 10,
            target: 50,
        }
    }
}

impl TargetSum {
    pub const MAX_GENE: i64 = 20;

    pub fn from_params(params: &RunParams) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let length = check_range("length", params.usize_or("length", defaults.length)?, 2, 100)?;
        let target = params.number_or("target", defaults.target as f64)?;
        if !target.is_finite() {
            return Err(ConfigError::out_of_range("target", target, "must be finite"));
        }
        Ok(Self {
            length,
            target: target.trunc() as i64,
        })
    }
}

impl Problem for TargetSum {
    type Individual = Vec<i64>;

    fn parameter_schema(&self) -> Vec<ParamField> {
        let mut fields = vec![
            ParamField::number("length", "List Length", self.length as f64).range(2.0, 100.0),
            ParamField::number("target", "Target Sum", self.target as f64),
        ];
        fields.extend(engine_fields(100, 100, 0.1));
        fields
    }

    fn create_individual(&self, rng: &mut EvoRng) -> Result<Vec<i64>, ProblemError> {
        Ok(encoding::random_ints(self.length, 0, Self::MAX_GENE, rng))
    }

    fn fitness(&self, individual: &Vec<i64>) -> Result<Score, ProblemError> {
        let sum: i64 = individual.iter().sum();
        Ok(Score::Scalar(-((sum - self.target).abs() as f64)))
    }

    fn breed(
        &self,
        a: &Vec<i64>,
        b: &Vec<i64>,
        rng: &mut EvoRng,
    ) -> Result<Vec<i64>, ProblemError> {
        encoding::one_point_crossover(a, b, rng)
    }

    fn mutate(
        &self,
        individual: &Vec<i64>,
        rate: f64,
        rng: &mut EvoRng,
    ) -> Result<Vec<i64>, ProblemError> {
        Ok(encoding::reset_genes(individual, rate, 0, Self::MAX_GENE, rng))
    }

    fn validate(&self, individual: &Vec<i64>) -> Result<(), ProblemError> {
        check_genes(individual, self.length, Self::MAX_GENE)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_even_sum_ignores_odd_genes() {
        let problem = EvenSum::default();
        assert_eq!(
            problem.fitness(&vec![2, 3, 4, 5, 0, 20]).unwrap(),
            Score::Scalar(26.0)
        );
    }

    #[test]
    fn test_target_sum_distance() {
        let problem = TargetSum { length: 3, target: 10 };
        assert_eq!(problem.fitness(&vec![3, 3, 4]).unwrap(), Score::Scalar(0.0));
        assert_eq!(problem.fitness(&vec![5, 5, 5]).unwrap(), Score::Scalar(-5.0));
    }

    #[test]
    fn test_even_sum_from_params() {
        let params = RunParams::new().with("list_length", 6usize).with("max_value", 9usize);
        let problem = EvenSum::from_params(&params).unwrap();
        assert_eq!(problem.list_length, 6);
        assert_eq!(problem.max_value, 9);

        let mut rng = EvoRng::new(1);
        let genes = problem.create_individual(&mut rng).unwrap();
        assert!(problem.validate(&genes).is_ok());
    }

    #[test]
    fn test_target_sum_reaches_target() {
        let params = RunParams::new()
            .with("population_size", 60usize)
            .with("generations", 80usize)
            .with("mutation_rate", 0.1)
            .with("seed", 11usize);
        let result = crate::compute::run(&TargetSum::default(), &params).unwrap();
        assert!(result.score.as_scalar().unwrap() >= -2.0);
    }
}
