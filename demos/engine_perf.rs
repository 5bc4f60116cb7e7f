//! Quick engine performance test

use evolab::{
    compute::Engine,
    problems::{MaxOnes, Rastrigin, Tsp},
    schema::EngineConfig,
};
use std::time::Instant;

fn main() {
    println!("=== Engine Performance Test ===\n");

    // Test different tour sizes
    for cities in [10, 40, 120] {
        println!("TSP with {} cities", cities);

        let config = EngineConfig {
            population_size: 80,
            generations: 100,
            mutation_rate: 0.05,
            seed: Some(42),
        };

        let start = Instant::now();
        let engine = Engine::new(config).unwrap();
        let problem = Tsp::new(cities, 42);
        let result = engine.run(&problem).unwrap();
        let elapsed = start.elapsed();

        let total_evals = 80 * result.history.len();
        let evals_per_sec = total_evals as f64 / elapsed.as_secs_f64();

        println!("  Generations:    {}", result.history.len());
        println!("  Evaluations:    {}", total_evals);
        println!("  Elapsed:        {:.2}s", elapsed.as_secs_f64());
        println!("  Evals/sec:      {:.1}", evals_per_sec);
        println!("  Tour length:    {:.4}", problem.tour_length(&result.best));
        println!();
    }

    println!("=== Rastrigin (10 dimensions) ===\n");

    let engine = Engine::new(EngineConfig {
        population_size: 100,
        generations: 200,
        mutation_rate: 0.1,
        seed: Some(42),
    })
    .unwrap();
    let start = Instant::now();
    let result = engine.run(&Rastrigin { dimensions: 10 }).unwrap();
    println!(
        "  Best value:     {:.4} in {:.2}s",
        Rastrigin::value(&result.best),
        start.elapsed().as_secs_f64()
    );
    println!();

    println!("=== Scalability Test (Max Ones, 200 bits) ===\n");

    // Test different population sizes
    for pop_size in [20, 80, 320, 1000] {
        let config = EngineConfig {
            population_size: pop_size,
            generations: 50,
            mutation_rate: 0.01,
            seed: Some(42),
        };

        let start = Instant::now();
        let engine = Engine::new(config).unwrap();
        let result = engine.run(&MaxOnes { length: 200 }).unwrap();
        let elapsed = start.elapsed();

        let total_evals = pop_size * result.history.len();
        let evals_per_sec = total_evals as f64 / elapsed.as_secs_f64();

        println!(
            "Population {}: {} evals in {:.2}s ({:.1} evals/sec), best {:?}",
            pop_size,
            total_evals,
            elapsed.as_secs_f64(),
            evals_per_sec,
            result.score
        );
    }
}
