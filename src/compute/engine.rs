//! The generational loop.

use log::{debug, info, trace};

use crate::error::{EngineError, Operation, ProblemError};
use crate::schema::{
    EngineConfig, FitnessStats, FrontMember, GenerationRecord, RunParams, RunResult, Score,
};

use super::pareto::{fast_non_dominated_sort, pareto_survivors};
use super::selection::{SurvivorSelection, TruncationSelection};
use super::{EvoRng, Problem};

/// Evolution engine that runs a [`Problem`] for a fixed number of generations.
///
/// Scalar problems use elitist truncation: the top half survives and parents
/// are drawn uniformly, with replacement, from the survivors. Problems with
/// two or more objectives use the first Pareto front as the survivor pool.
///
/// Each call to [`run`](Self::run) starts a fresh generator from the engine's
/// seed, so repeated runs of the same engine are identical.
#[derive(Debug, Clone)]
pub struct Engine {
    config: EngineConfig,
    seed: u64,
    selection: TruncationSelection,
}

impl Engine {
    /// Create a new engine from a validated configuration.
    pub fn new(config: EngineConfig) -> Result<Self, EngineError> {
        config.validate()?;
        let seed = config
            .seed
            .unwrap_or_else(|| rand::random::<u64>() & EngineConfig::MAX_SEED);
        Ok(Self {
            config,
            seed,
            selection: TruncationSelection,
        })
    }

    /// Read `population_size`, `generations`, `mutation_rate` and `seed`.
    pub fn from_params(params: &RunParams) -> Result<Self, EngineError> {
        Self::new(EngineConfig::from_params(params)?)
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Seed every run of this engine starts from.
    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Run evolution (blocking).
    pub fn run<P: Problem>(&self, problem: &P) -> Result<RunResult<P::Individual>, EngineError> {
        self.run_with_callback(problem, |_| {})
    }

    /// Run evolution, reporting every generation record as it is produced.
    pub fn run_with_callback<P, F>(
        &self,
        problem: &P,
        callback: F,
    ) -> Result<RunResult<P::Individual>, EngineError>
    where
        P: Problem,
        F: FnMut(&GenerationRecord),
    {
        let objectives = problem.objective_count();
        info!(
            "Starting run: population_size={}, generations={}, mutation_rate={}, seed={}, \
             objectives={}",
            self.config.population_size,
            self.config.generations,
            self.config.mutation_rate,
            self.seed,
            objectives
        );

        let result = if objectives >= 2 {
            self.run_pareto(problem, objectives, callback)?
        } else {
            self.run_scalar(problem, callback)?
        };

        info!(
            "Run finished after {} generations, best score {:?}",
            result.history.len(),
            result.score
        );
        Ok(result)
    }

    fn run_scalar<P, F>(
        &self,
        problem: &P,
        mut callback: F,
    ) -> Result<RunResult<P::Individual>, EngineError>
    where
        P: Problem,
        F: FnMut(&GenerationRecord),
    {
        let mut rng = EvoRng::new(self.seed);
        let mut population = self.initial_population(problem, &mut rng)?;
        let mut history = Vec::new();

        // Generation 0 seeds the best-ever, so no sentinel score is needed.
        let mut scores = evaluate_scalar(problem, &population, Some(0))?;
        let first = best_index(&scores);
        let mut best = (population[first].clone(), scores[first]);

        for generation in 0..self.config.generations {
            if generation > 0 {
                scores = evaluate_scalar(problem, &population, Some(generation))?;
            }

            let best_idx = best_index(&scores);
            let gen_best = scores[best_idx];
            if gen_best > best.1 {
                best = (population[best_idx].clone(), gen_best);
            }

            let stats = FitnessStats::from_scores(&scores);
            if let Some(stats) = &stats {
                debug!(
                    "Generation {}: best={:.4} mean={:.4} std={:.4}",
                    generation, stats.best, stats.mean, stats.std
                );
            }
            let record = GenerationRecord {
                generation,
                best: Score::Scalar(gen_best),
                stats,
                front: None,
            };
            callback(&record);
            history.push(record);

            let scored: Vec<(P::Individual, f64)> = population
                .into_iter()
                .zip(std::mem::take(&mut scores))
                .collect();
            let pool: Vec<P::Individual> = self
                .selection
                .select(&scored)
                .into_iter()
                .map(|(individual, _)| individual)
                .collect();
            trace!("Generation {}: {} survivors", generation, pool.len());

            population = self.reproduce(problem, &pool, &mut rng, generation)?;
        }

        let (best, score) = best;

        Ok(RunResult {
            best,
            score: Score::Scalar(score),
            history,
            seed: self.seed,
            pareto_front: None,
        })
    }

    fn run_pareto<P, F>(
        &self,
        problem: &P,
        objectives: usize,
        mut callback: F,
    ) -> Result<RunResult<P::Individual>, EngineError>
    where
        P: Problem,
        F: FnMut(&GenerationRecord),
    {
        let mut rng = EvoRng::new(self.seed);
        let mut population = self.initial_population(problem, &mut rng)?;
        let mut history = Vec::new();
        let target = self.selection.pool_size(self.config.population_size);

        for generation in 0..self.config.generations {
            let scores = evaluate_objectives(problem, &population, objectives, Some(generation))?;
            let front = first_front(&scores);
            let front_scores: Vec<Vec<f64>> = front.iter().map(|&i| scores[i].clone()).collect();

            debug!(
                "Generation {}: pareto front of {} individuals",
                generation,
                front.len()
            );
            let record = GenerationRecord {
                generation,
                best: Score::Objectives(front_scores.first().cloned().unwrap_or_default()),
                stats: None,
                front: Some(front_scores),
            };
            callback(&record);
            history.push(record);

            let pool: Vec<P::Individual> =
                pareto_survivors(&front, population.len(), target, &mut rng)
                    .into_iter()
                    .map(|i| population[i].clone())
                    .collect();
            trace!("Generation {}: {} survivors", generation, pool.len());

            population = self.reproduce(problem, &pool, &mut rng, generation)?;
        }

        // The front reported back comes from the population the last
        // generation produced. That evaluation belongs to no generation.
        let scores = evaluate_objectives(problem, &population, objectives, None)?;
        let pareto_front: Vec<FrontMember<P::Individual>> = first_front(&scores)
            .into_iter()
            .map(|i| FrontMember {
                individual: population[i].clone(),
                objectives: scores[i].clone(),
            })
            .collect();

        let first = pareto_front
            .first()
            .cloned()
            .ok_or(EngineError::EmptyPopulation {
                population_size: population.len(),
            })?;

        Ok(RunResult {
            best: first.individual,
            score: Score::Objectives(first.objectives),
            history,
            seed: self.seed,
            pareto_front: Some(pareto_front),
        })
    }

    /// Create and validate the first generation.
    fn initial_population<P: Problem>(
        &self,
        problem: &P,
        rng: &mut EvoRng,
    ) -> Result<Vec<P::Individual>, EngineError> {
        (0..self.config.population_size)
            .map(|_| {
                let individual = problem
                    .create_individual(rng)
                    .map_err(EngineError::contract(Operation::Create, None))?;
                problem
                    .validate(&individual)
                    .map_err(EngineError::contract(Operation::Validate, None))?;
                Ok(individual)
            })
            .collect()
    }

    /// Breed the next generation from a survivor pool.
    fn reproduce<P: Problem>(
        &self,
        problem: &P,
        pool: &[P::Individual],
        rng: &mut EvoRng,
        generation: usize,
    ) -> Result<Vec<P::Individual>, EngineError> {
        if pool.is_empty() {
            return Err(EngineError::EmptyPopulation {
                population_size: self.config.population_size,
            });
        }

        let mut next = Vec::with_capacity(self.config.population_size);
        while next.len() < self.config.population_size {
            let (Some(a), Some(b)) = (rng.choose(pool), rng.choose(pool)) else {
                break;
            };

            let child = problem
                .breed(a, b, rng)
                .map_err(EngineError::contract(Operation::Breed, Some(generation)))?;
            let child = problem
                .mutate(&child, self.config.mutation_rate, rng)
                .map_err(EngineError::contract(Operation::Mutate, Some(generation)))?;
            problem
                .validate(&child)
                .map_err(EngineError::contract(Operation::Validate, Some(generation)))?;

            next.push(child);
        }
        Ok(next)
    }
}

/// Run `problem` with engine settings read from `params`.
pub fn run<P: Problem>(
    problem: &P,
    params: &RunParams,
) -> Result<RunResult<P::Individual>, EngineError> {
    Engine::from_params(params)?.run(problem)
}

/// Score a population in order, requiring scalar scores.
fn evaluate_scalar<P: Problem>(
    problem: &P,
    population: &[P::Individual],
    generation: Option<usize>,
) -> Result<Vec<f64>, EngineError> {
    population
        .iter()
        .map(|individual| {
            let score = checked_fitness(problem, individual)
                .map_err(EngineError::contract(Operation::Fitness, generation))?;
            match score {
                Score::Scalar(value) => Ok(value),
                Score::Objectives(values) => {
                    Err(EngineError::contract(Operation::Fitness, generation)(
                        ProblemError::ScoreShape {
                            expected: 1,
                            found: values.len(),
                        },
                    ))
                }
            }
        })
        .collect()
}

/// Score a population in order, requiring `count` objectives per individual.
fn evaluate_objectives<P: Problem>(
    problem: &P,
    population: &[P::Individual],
    count: usize,
    generation: Option<usize>,
) -> Result<Vec<Vec<f64>>, EngineError> {
    population
        .iter()
        .map(|individual| {
            let score = checked_fitness(problem, individual)
                .map_err(EngineError::contract(Operation::Fitness, generation))?;
            match score {
                Score::Objectives(values) if values.len() == count => Ok(values),
                other => Err(EngineError::contract(Operation::Fitness, generation)(
                    ProblemError::ScoreShape {
                        expected: count,
                        found: other.len(),
                    },
                )),
            }
        })
        .collect()
}

fn checked_fitness<P: Problem>(
    problem: &P,
    individual: &P::Individual,
) -> Result<Score, ProblemError> {
    let score = problem.fitness(individual)?;
    if score.has_non_finite() {
        return Err(ProblemError::NonFiniteScore);
    }
    Ok(score)
}

/// Index of the highest score. Ties go to the earliest index.
fn best_index(scores: &[f64]) -> usize {
    let mut best = 0;
    for (i, score) in scores.iter().enumerate().skip(1) {
        if *score > scores[best] {
            best = i;
        }
    }
    best
}

fn first_front(scores: &[Vec<f64>]) -> Vec<usize> {
    fast_non_dominated_sort(scores)
        .into_iter()
        .next()
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use super::*;
    use crate::compute::encoding;
    use crate::compute::pareto::dominates;
    use crate::schema::ParamField;

    fn params(population_size: usize, generations: usize) -> RunParams {
        RunParams::new()
            .with("population_size", population_size)
            .with("generations", generations)
            .with("mutation_rate", 0.05)
    }

    /// Deterministic stub: no randomness anywhere.
    struct Counter;

    impl Problem for Counter {
        type Individual = u32;

        fn parameter_schema(&self) -> Vec<ParamField> {
            Vec::new()
        }

        fn create_individual(&self, _rng: &mut EvoRng) -> Result<u32, ProblemError> {
            Ok(1)
        }

        fn fitness(&self, individual: &u32) -> Result<Score, ProblemError> {
            Ok(Score::Scalar(*individual as f64))
        }

        fn breed(&self, a: &u32, b: &u32, _rng: &mut EvoRng) -> Result<u32, ProblemError> {
            Ok(a + b)
        }

        fn mutate(
            &self,
            individual: &u32,
            _rate: f64,
            _rng: &mut EvoRng,
        ) -> Result<u32, ProblemError> {
            Ok(individual + 1)
        }
    }

    /// Every individual scores the same; each generation is tagged by mutation.
    struct Flat;

    impl Problem for Flat {
        type Individual = u32;

        fn parameter_schema(&self) -> Vec<ParamField> {
            Vec::new()
        }

        fn create_individual(&self, _rng: &mut EvoRng) -> Result<u32, ProblemError> {
            Ok(0)
        }

        fn fitness(&self, _individual: &u32) -> Result<Score, ProblemError> {
            Ok(Score::Scalar(5.0))
        }

        fn breed(&self, a: &u32, _b: &u32, _rng: &mut EvoRng) -> Result<u32, ProblemError> {
            Ok(*a)
        }

        fn mutate(
            &self,
            individual: &u32,
            _rate: f64,
            _rng: &mut EvoRng,
        ) -> Result<u32, ProblemError> {
            Ok(individual + 1)
        }
    }

    /// Count of ones in a random bit string.
    struct Ones {
        length: usize,
    }

    impl Problem for Ones {
        type Individual = Vec<u8>;

        fn parameter_schema(&self) -> Vec<ParamField> {
            Vec::new()
        }

        fn create_individual(&self, rng: &mut EvoRng) -> Result<Vec<u8>, ProblemError> {
            Ok(encoding::random_bits(self.length, rng))
        }

        fn fitness(&self, individual: &Vec<u8>) -> Result<Score, ProblemError> {
            Ok(Score::Scalar(individual.iter().map(|&b| b as f64).sum()))
        }

        fn breed(
            &self,
            a: &Vec<u8>,
            b: &Vec<u8>,
            rng: &mut EvoRng,
        ) -> Result<Vec<u8>, ProblemError> {
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
            encoding::check_length(individual.len(), self.length)
        }
    }

    /// Two objectives (x^2, (x-2)^2) over a single real.
    struct TwoParabolas;

    impl Problem for TwoParabolas {
        type Individual = f64;

        fn parameter_schema(&self) -> Vec<ParamField> {
            Vec::new()
        }

        fn create_individual(&self, rng: &mut EvoRng) -> Result<f64, ProblemError> {
            Ok(rng.uniform(-10.0, 10.0))
        }

        fn fitness(&self, x: &f64) -> Result<Score, ProblemError> {
            Ok(Score::Objectives(vec![x * x, (x - 2.0) * (x - 2.0)]))
        }

        fn breed(&self, a: &f64, b: &f64, rng: &mut EvoRng) -> Result<f64, ProblemError> {
            let alpha = rng.unit();
            Ok(alpha * a + (1.0 - alpha) * b)
        }

        fn mutate(&self, x: &f64, rate: f64, rng: &mut EvoRng) -> Result<f64, ProblemError> {
            let shifted = if rng.chance(rate) { x + rng.gaussian(0.0, 1.0) } else { *x };
            Ok(shifted.clamp(-10.0, 10.0))
        }

        fn objective_count(&self) -> usize {
            2
        }
    }

    #[test]
    fn test_stub_run_is_reproducible() {
        let first = run(&Counter, &params(4, 1)).unwrap();
        let second = run(&Counter, &params(4, 1)).unwrap();

        assert_eq!(first.best, second.best);
        assert_eq!(first.score, second.score);
        assert_eq!(first.history, second.history);
        assert_eq!(first.best, 1);
        assert_eq!(first.score, Score::Scalar(1.0));
        assert_eq!(first.history.len(), 1);
    }

    #[test]
    fn test_seeded_run_is_reproducible() {
        let params = params(20, 15).with("seed", 1234usize);
        let problem = Ones { length: 24 };

        let first = run(&problem, &params).unwrap();
        let second = run(&problem, &params).unwrap();
        assert_eq!(first, second);
        assert_eq!(first.seed, 1234);
    }

    #[test]
    fn test_history_length_and_best_so_far() {
        let problem = Ones { length: 32 };
        let result = run(&problem, &params(30, 25).with("seed", 7usize)).unwrap();

        assert_eq!(result.history.len(), 25);
        for (g, record) in result.history.iter().enumerate() {
            assert_eq!(record.generation, g);
        }

        let so_far = result.best_so_far();
        assert!(so_far.windows(2).all(|w| w[0] <= w[1]));
        assert_eq!(Some(result.score.clone()), so_far.last().copied().map(Score::Scalar));
        assert_eq!(result.best.len(), 32);
    }

    #[test]
    fn test_best_is_never_worse_than_any_generation() {
        let problem = Ones { length: 16 };
        let result = run(&problem, &params(10, 20).with("seed", 3usize)).unwrap();
        let best = result.score.as_scalar().unwrap();
        assert!(result.best_per_generation().iter().all(|&g| g <= best));
        assert_eq!(problem.fitness(&result.best).unwrap(), result.score);
    }

    #[test]
    fn test_ties_keep_earliest_best() {
        let result = run(&Flat, &params(6, 5)).unwrap();
        // Generation 0 individuals are 0; later generations are strictly larger.
        assert_eq!(result.best, 0);
        assert_eq!(result.score, Score::Scalar(5.0));
    }

    #[test]
    fn test_negative_scores_keep_generation_zero_best() {
        /// Every generation scores lower than the one before.
        struct Sinking;

        impl Problem for Sinking {
            type Individual = u32;

            fn parameter_schema(&self) -> Vec<ParamField> {
                Vec::new()
            }

            fn create_individual(&self, _rng: &mut EvoRng) -> Result<u32, ProblemError> {
                Ok(0)
            }

            fn fitness(&self, individual: &u32) -> Result<Score, ProblemError> {
                Ok(Score::Scalar(-1e300 - f64::from(*individual) * 1e299))
            }

            fn breed(&self, a: &u32, _b: &u32, _rng: &mut EvoRng) -> Result<u32, ProblemError> {
                Ok(*a)
            }

            fn mutate(
                &self,
                individual: &u32,
                _rate: f64,
                _rng: &mut EvoRng,
            ) -> Result<u32, ProblemError> {
                Ok(individual + 1)
            }
        }

        let result = run(&Sinking, &params(4, 5)).unwrap();
        assert_eq!(result.best, 0);
        assert_eq!(result.score, Score::Scalar(-1e300));
        assert_eq!(result.best_so_far(), vec![-1e300; 5]);
    }

    #[test]
    fn test_population_of_two_runs() {
        let result = run(&Ones { length: 8 }, &params(2, 10)).unwrap();
        assert_eq!(result.history.len(), 10);
    }

    #[test]
    fn test_zero_generations_rejected() {
        let err = run(&Counter, &params(4, 0)).unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn test_huge_generation_count_rejected_before_running() {
        let err = run(&Counter, &params(4, 1).with("generations", 1e17)).unwrap_err();
        assert!(matches!(err, EngineError::Configuration(_)));
    }

    #[test]
    fn test_population_of_one_rejected() {
        let err = run(&Counter, &params(1, 3)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::EmptyPopulation { population_size: 1 }
        ));
    }

    #[test]
    fn test_callback_sees_every_generation() {
        let engine = Engine::from_params(&params(8, 6).with("seed", 1usize)).unwrap();
        let mut seen = Vec::new();
        let result = engine
            .run_with_callback(&Ones { length: 10 }, |record| seen.push(record.generation))
            .unwrap();
        assert_eq!(seen, (0..6).collect::<Vec<_>>());
        assert_eq!(result.history.len(), 6);
    }

    struct FailingBreed;

    impl Problem for FailingBreed {
        type Individual = u32;

        fn parameter_schema(&self) -> Vec<ParamField> {
            Vec::new()
        }

        fn create_individual(&self, _rng: &mut EvoRng) -> Result<u32, ProblemError> {
            Ok(0)
        }

        fn fitness(&self, _individual: &u32) -> Result<Score, ProblemError> {
            Ok(Score::Scalar(0.0))
        }

        fn breed(&self, _a: &u32, _b: &u32, _rng: &mut EvoRng) -> Result<u32, ProblemError> {
            Err(ProblemError::Failed("crossover exploded".into()))
        }

        fn mutate(
            &self,
            individual: &u32,
            _rate: f64,
            _rng: &mut EvoRng,
        ) -> Result<u32, ProblemError> {
            Ok(*individual)
        }
    }

    #[test]
    fn test_breed_failure_aborts_run() {
        let err = run(&FailingBreed, &params(4, 3)).unwrap_err();
        match err {
            EngineError::ProblemContract {
                operation,
                generation,
                source,
            } => {
                assert_eq!(operation, Operation::Breed);
                assert_eq!(generation, Some(0));
                assert_eq!(source, ProblemError::Failed("crossover exploded".into()));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    struct NonFinite(f64);

    impl Problem for NonFinite {
        type Individual = u32;

        fn parameter_schema(&self) -> Vec<ParamField> {
            Vec::new()
        }

        fn create_individual(&self, _rng: &mut EvoRng) -> Result<u32, ProblemError> {
            Ok(0)
        }

        fn fitness(&self, _individual: &u32) -> Result<Score, ProblemError> {
            Ok(Score::Scalar(self.0))
        }

        fn breed(&self, a: &u32, _b: &u32, _rng: &mut EvoRng) -> Result<u32, ProblemError> {
            Ok(*a)
        }

        fn mutate(
            &self,
            individual: &u32,
            _rate: f64,
            _rng: &mut EvoRng,
        ) -> Result<u32, ProblemError> {
            Ok(*individual)
        }
    }

    #[test]
    fn test_non_finite_fitness_is_contract_error() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            let err = run(&NonFinite(value), &params(4, 2)).unwrap_err();
            assert!(
                matches!(
                    err,
                    EngineError::ProblemContract {
                        operation: Operation::Fitness,
                        generation: Some(0),
                        source: ProblemError::NonFiniteScore,
                    }
                ),
                "{value} was accepted as a score"
            );
        }
    }

    /// Mutation that grows the vector, caught by `validate`.
    struct Growing;

    impl Problem for Growing {
        type Individual = Vec<u8>;

        fn parameter_schema(&self) -> Vec<ParamField> {
            Vec::new()
        }

        fn create_individual(&self, _rng: &mut EvoRng) -> Result<Vec<u8>, ProblemError> {
            Ok(vec![0; 4])
        }

        fn fitness(&self, individual: &Vec<u8>) -> Result<Score, ProblemError> {
            Ok(Score::Scalar(individual.len() as f64))
        }

        fn breed(
            &self,
            a: &Vec<u8>,
            _b: &Vec<u8>,
            _rng: &mut EvoRng,
        ) -> Result<Vec<u8>, ProblemError> {
            Ok(a.clone())
        }

        fn mutate(
            &self,
            individual: &Vec<u8>,
            _rate: f64,
            _rng: &mut EvoRng,
        ) -> Result<Vec<u8>, ProblemError> {
            let mut grown = individual.clone();
            grown.push(1);
            Ok(grown)
        }

        fn validate(&self, individual: &Vec<u8>) -> Result<(), ProblemError> {
            encoding::check_length(individual.len(), 4)
        }
    }

    #[test]
    fn test_invalid_child_is_contract_error() {
        let err = run(&Growing, &params(4, 2)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::ProblemContract {
                operation: Operation::Validate,
                generation: Some(0),
                ..
            }
        ));
    }

    #[test]
    fn test_scalar_problem_returning_objectives_rejected() {
        struct Confused;

        impl Problem for Confused {
            type Individual = u32;

            fn parameter_schema(&self) -> Vec<ParamField> {
                Vec::new()
            }

            fn create_individual(&self, _rng: &mut EvoRng) -> Result<u32, ProblemError> {
                Ok(0)
            }

            fn fitness(&self, _individual: &u32) -> Result<Score, ProblemError> {
                Ok(Score::Objectives(vec![1.0, 2.0]))
            }

            fn breed(&self, a: &u32, _b: &u32, _rng: &mut EvoRng) -> Result<u32, ProblemError> {
                Ok(*a)
            }

            fn mutate(
                &self,
                individual: &u32,
                _rate: f64,
                _rng: &mut EvoRng,
            ) -> Result<u32, ProblemError> {
                Ok(*individual)
            }
        }

        let err = run(&Confused, &params(4, 1)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::ProblemContract {
                source: ProblemError::ScoreShape { expected: 1, found: 2 },
                ..
            }
        ));
    }

    #[test]
    fn test_pareto_run_reports_fronts() {
        let result = run(&TwoParabolas, &params(40, 12).with("seed", 99usize)).unwrap();

        assert_eq!(result.history.len(), 12);
        for record in &result.history {
            let front = record.front.as_ref().unwrap();
            assert!(!front.is_empty());
            assert!(record.stats.is_none());
            for a in front {
                assert!(front.iter().all(|b| !dominates(a, b)));
            }
        }

        let front = result.pareto_front.as_ref().unwrap();
        assert!(!front.is_empty());
        assert_eq!(result.score, Score::Objectives(front[0].objectives.clone()));
        for member in front {
            assert!((-10.0..=10.0).contains(&member.individual));
        }
    }

    #[test]
    fn test_final_front_evaluation_has_no_generation() {
        /// Fails every fitness call past `budget`.
        struct Expiring {
            budget: usize,
            calls: AtomicUsize,
        }

        impl Problem for Expiring {
            type Individual = f64;

            fn parameter_schema(&self) -> Vec<ParamField> {
                Vec::new()
            }

            fn create_individual(&self, rng: &mut EvoRng) -> Result<f64, ProblemError> {
                TwoParabolas.create_individual(rng)
            }

            fn fitness(&self, x: &f64) -> Result<Score, ProblemError> {
                if self.calls.fetch_add(1, Ordering::Relaxed) >= self.budget {
                    return Err(ProblemError::Failed("budget spent".into()));
                }
                TwoParabolas.fitness(x)
            }

            fn breed(&self, a: &f64, b: &f64, rng: &mut EvoRng) -> Result<f64, ProblemError> {
                TwoParabolas.breed(a, b, rng)
            }

            fn mutate(&self, x: &f64, rate: f64, rng: &mut EvoRng) -> Result<f64, ProblemError> {
                TwoParabolas.mutate(x, rate, rng)
            }

            fn objective_count(&self) -> usize {
                2
            }
        }

        // Four individuals for three generations, then the final front.
        let problem = Expiring {
            budget: 12,
            calls: AtomicUsize::new(0),
        };
        let err = run(&problem, &params(4, 3)).unwrap_err();
        assert!(matches!(
            err,
            EngineError::ProblemContract {
                operation: Operation::Fitness,
                generation: None,
                ..
            }
        ));
        assert_eq!(problem.calls.load(Ordering::Relaxed), 13);
    }

    #[test]
    fn test_pareto_run_with_minimum_population() {
        let result = run(&TwoParabolas, &params(2, 4)).unwrap();
        assert_eq!(result.history.len(), 4);
    }
}
