//! Evolab - a small laboratory for evolutionary optimization.
//!
//! Any optimization problem that can create, score, breed and mutate
//! candidate solutions plugs into one generational engine. Scalar problems
//! are evolved with elitist top-half truncation; problems with two or more
//! objectives are ranked with fast non-dominated sorting instead.
//!
//! # Architecture
//!
//! - `schema`: Run parameters, the engine configuration and run results
//! - `compute`: The problem contract, the engine loop, selection, Pareto
//!   sorting, the seeded RNG and reusable genetic operators
//! - `problems`: Built-in problems and the runtime problem registry
//! - `error`: Error taxonomy shared by all of the above
//!
//! # Example
//!
//! ```rust,no_run
//! use evolab::{
//!     compute::Engine,
//!     problems::MaxOnes,
//!     schema::{EngineConfig, RunParams},
//! };
//!
//! let config = EngineConfig {
//!     population_size: 40,
//!     generations: 30,
//!     mutation_rate: 0.05,
//!     seed: Some(7),
//! };
//! let engine = Engine::new(config)?;
//! let result = engine.run(&MaxOnes { length: 32 })?;
//!
//! println!("Best score: {:?}", result.score);
//!
//! // Or drive everything from a flat parameter map.
//! let params = RunParams::new().with("generations", 10usize).with("seed", 7usize);
//! let report = evolab::problems::ProblemRegistry::with_builtins().run("tsp", &params)?;
//! println!("{}", serde_json::to_string_pretty(&report)?);
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

pub mod compute;
pub mod error;
pub mod problems;
pub mod schema;

// Re-export commonly used types
pub use compute::{Engine, EvoRng, Problem};
pub use error::{ConfigError, EngineError, ProblemError, RegistryError};
pub use problems::ProblemRegistry;
pub use schema::{EngineConfig, RunParams, RunResult, Score};
