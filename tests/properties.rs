//! Property-based tests for operators, Pareto sorting and engine runs.
//!
//! Run with: cargo test --release properties

#![allow(clippy::unwrap_used)]

use std::sync::atomic::{AtomicUsize, Ordering};

use proptest::prelude::*;

use evolab::{
    compute::{
        Engine, EvoRng, Problem, SurvivorSelection, TruncationSelection, dominates, encoding,
        fast_non_dominated_sort, front_ranks,
    },
    error::ProblemError,
    problems::Tsp,
    schema::{EngineConfig, ParamField, Score},
};

/// Counts every evaluated tour that is not a permutation.
struct CheckedTsp {
    inner: Tsp,
    evaluated: AtomicUsize,
    invalid: AtomicUsize,
}

impl Problem for CheckedTsp {
    type Individual = Vec<usize>;

    fn parameter_schema(&self) -> Vec<ParamField> {
        self.inner.parameter_schema()
    }

    fn create_individual(&self, rng: &mut EvoRng) -> Result<Vec<usize>, ProblemError> {
        self.inner.create_individual(rng)
    }

    fn fitness(&self, tour: &Vec<usize>) -> Result<Score, ProblemError> {
        self.evaluated.fetch_add(1, Ordering::Relaxed);
        if !encoding::is_permutation(tour, self.inner.cities.len()) {
            self.invalid.fetch_add(1, Ordering::Relaxed);
        }
        self.inner.fitness(tour)
    }

    fn breed(
        &self,
        a: &Vec<usize>,
        b: &Vec<usize>,
        rng: &mut EvoRng,
    ) -> Result<Vec<usize>, ProblemError> {
        self.inner.breed(a, b, rng)
    }

    fn mutate(
        &self,
        tour: &Vec<usize>,
        rate: f64,
        rng: &mut EvoRng,
    ) -> Result<Vec<usize>, ProblemError> {
        self.inner.mutate(tour, rate, rng)
    }
}

fn points(max_len: usize) -> impl Strategy<Value = Vec<Vec<f64>>> {
    prop::collection::vec(prop::collection::vec(0.0f64..10.0, 2), 0..max_len)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Crossover and mutation preserve the length of their inputs.
    #[test]
    fn prop_operators_preserve_length(
        len in 0usize..64,
        rate in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let mut rng = EvoRng::new(seed);
        let a = encoding::random_bits(len, &mut rng);
        let b = encoding::random_bits(len, &mut rng);

        let child = encoding::one_point_crossover(&a, &b, &mut rng).unwrap();
        prop_assert_eq!(child.len(), len);
        prop_assert_eq!(encoding::flip_bits(&child, rate, &mut rng).len(), len);

        let reals = encoding::random_reals(len, -1.0, 1.0, &mut rng);
        let perturbed = encoding::gaussian_perturb(&reals, rate, 0.5, Some((-1.0, 1.0)), &mut rng);
        prop_assert_eq!(perturbed.len(), len);
        prop_assert!(perturbed.iter().all(|x| (-1.0..=1.0).contains(x)));
    }

    /// Permutation operators always produce permutations.
    #[test]
    fn prop_permutation_operators_stay_valid(
        n in 1usize..40,
        rate in 0.0f64..=1.0,
        seed in any::<u64>(),
    ) {
        let mut rng = EvoRng::new(seed);
        let a = encoding::random_permutation(n, &mut rng);
        let b = encoding::random_permutation(n, &mut rng);

        let child = encoding::order_crossover(&a, &b, &mut rng).unwrap();
        prop_assert!(encoding::is_permutation(&child, n));
        prop_assert!(encoding::is_permutation(&encoding::swap_mutation(&child, rate, &mut rng), n));
    }

    /// Fronts partition the indices and nothing dominates a member of F0.
    #[test]
    fn prop_fronts_partition_population(objectives in points(40)) {
        let fronts = fast_non_dominated_sort(&objectives);

        let mut seen: Vec<usize> = fronts.iter().flatten().copied().collect();
        seen.sort_unstable();
        prop_assert_eq!(seen, (0..objectives.len()).collect::<Vec<_>>());
        prop_assert!(fronts.iter().all(|f| !f.is_empty()));

        if let Some(first) = fronts.first() {
            for &p in first {
                prop_assert!(objectives.iter().all(|q| !dominates(q, &objectives[p])));
            }
        }
    }

    /// A point is only ever dominated by points of strictly earlier fronts.
    #[test]
    fn prop_domination_implies_lower_rank(objectives in points(30)) {
        let ranks = front_ranks(&objectives);
        for p in 0..objectives.len() {
            for q in 0..objectives.len() {
                if dominates(&objectives[p], &objectives[q]) {
                    prop_assert!(ranks[p] < ranks[q]);
                }
            }
        }
    }

    /// Truncation keeps floor(n / 2) survivors, none worse than a non-survivor.
    #[test]
    fn prop_truncation_pool(scores in prop::collection::vec(-100.0f64..100.0, 2..60)) {
        let selection = TruncationSelection;
        let pool = selection.ranked_indices(&scores);
        prop_assert_eq!(pool.len(), scores.len() / 2);

        let worst_kept = pool.iter().map(|&i| scores[i]).fold(f64::INFINITY, f64::min);
        for i in (0..scores.len()).filter(|i| !pool.contains(i)) {
            prop_assert!(scores[i] <= worst_kept);
        }
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(16))]

    /// Every tour the engine evaluates is a permutation of the cities.
    #[test]
    fn prop_tsp_runs_only_evaluate_permutations(
        cities in 3usize..20,
        population_size in 2usize..30,
        seed in 0u64..1_000_000
    ) {
        let problem = CheckedTsp {
            inner: Tsp::new(cities, seed),
            evaluated: AtomicUsize::new(0),
            invalid: AtomicUsize::new(0),
        };
        let engine = Engine::new(EngineConfig {
            population_size,
            generations: 5,
            mutation_rate: 0.2,
            seed: Some(seed),
        })
        .unwrap();

        let result = engine.run(&problem).unwrap();
        prop_assert_eq!(result.history.len(), 5);
        prop_assert_eq!(problem.evaluated.load(Ordering::Relaxed), population_size * 5);
        prop_assert_eq!(problem.invalid.load(Ordering::Relaxed), 0);
        prop_assert!(encoding::is_permutation(&result.best, cities));
    }

    /// Same seed, same run.
    #[test]
    fn prop_seeded_runs_are_reproducible(seed in 0u64..1_000_000) {
        let engine = Engine::new(EngineConfig {
            population_size: 12,
            generations: 6,
            mutation_rate: 0.1,
            seed: Some(seed),
        })
        .unwrap();
        let problem = Tsp::new(8, 1);
        prop_assert_eq!(engine.run(&problem).unwrap(), engine.run(&problem).unwrap());
    }
}
