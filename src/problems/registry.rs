//! Runtime-selectable problem catalogue.
//!
//! Problems have different `Individual` types, so the registry stores them
//! behind [`DynProblem`], an object-safe view that runs the engine and
//! returns a JSON-ready [`RunReport`].

use log::info;
use serde::{Deserialize, Serialize};

use crate::compute::{Engine, Problem};
use crate::error::{ConfigError, EngineError, RegistryError};
use crate::schema::{GenerationRecord, ParamField, RunParams, RunReport};

use super::{
    BitstringMatch, DeceptiveTrap, EvenSum, Knapsack, MaxOnes, Rastrigin, RoyalRoad, Schaffer,
    Sphere, Sudoku4x4, TargetSum, Tsp,
};

/// Type-erased problem.
pub trait DynProblem: Send + Sync {
    fn schema(&self) -> Vec<ParamField>;

    fn objectives(&self) -> usize;

    /// Run `engine` on this problem and serialize the result.
    fn run_report(
        &self,
        engine: &Engine,
        callback: &mut dyn FnMut(&GenerationRecord),
    ) -> Result<RunReport, EngineError>;
}

impl<P> DynProblem for P
where
    P: Problem,
    P::Individual: Serialize,
{
    fn schema(&self) -> Vec<ParamField> {
        Problem::parameter_schema(self)
    }

    fn objectives(&self) -> usize {
        Problem::objective_count(self)
    }

    fn run_report(
        &self,
        engine: &Engine,
        callback: &mut dyn FnMut(&GenerationRecord),
    ) -> Result<RunReport, EngineError> {
        let result = engine.run_with_callback(self, |record| callback(record))?;
        let details = self.details(&result.best);
        let result = result.try_map(serde_json::to_value)?;
        Ok(RunReport { result, details })
    }
}

/// Builds a problem instance from run parameters.
pub type ProblemFactory =
    Box<dyn Fn(&RunParams) -> Result<Box<dyn DynProblem>, ConfigError> + Send + Sync>;

/// Listing entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProblemSummary {
    pub id: String,
    pub name: String,
}

struct Entry {
    summary: ProblemSummary,
    factory: ProblemFactory,
}

/// Problems selectable by id, in registration order.
#[derive(Default)]
pub struct ProblemRegistry {
    entries: Vec<Entry>,
}

fn boxed<P: DynProblem + 'static>(problem: P) -> Box<dyn DynProblem> {
    Box::new(problem)
}

impl ProblemRegistry {
    pub const CUSTOM_PREFIX: &'static str = "custom:";

    /// Empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in problem and the bundled custom examples.
    pub fn with_builtins() -> Self {
        let mut registry = Self::new();
        registry.insert("max_ones", "Max Ones", |p| Ok(boxed(MaxOnes::from_params(p)?)));
        registry.insert("tsp", "Traveling Salesman Problem", |p| Ok(boxed(Tsp::from_params(p)?)));
        registry.insert("knapsack", "Knapsack Problem", |p| Ok(boxed(Knapsack::from_params(p)?)));
        registry.insert("bitstring_match", "Bitstring Match", |_| {
            Ok(boxed(BitstringMatch::default()))
        });
        registry.insert("sudoku4x4", "Sudoku 4x4", |_| Ok(boxed(Sudoku4x4)));
        registry.insert("deceptive_trap", "Deceptive Trap Function", |p| {
            Ok(boxed(DeceptiveTrap::from_params(p)?))
        });
        registry.insert("rastrigin", "Rastrigin Function", |p| {
            Ok(boxed(Rastrigin::from_params(p)?))
        });
        registry.insert("royal_road", "Royal Road Function", |p| {
            Ok(boxed(RoyalRoad::from_params(p)?))
        });
        registry.insert("sphere", "Sphere Function", |p| Ok(boxed(Sphere::from_params(p)?)));
        registry.insert(
            "multiobjective_schaffer",
            "Multi-Objective Schaffer Function",
            |_| Ok(boxed(Schaffer)),
        );
        registry.insert("custom:even_sum", "Custom: even_sum", |p| {
            Ok(boxed(EvenSum::from_params(p)?))
        });
        registry.insert("custom:sum", "Custom: sum", |p| Ok(boxed(TargetSum::from_params(p)?)));
        registry
    }

    fn insert<F>(&mut self, id: &str, name: &str, factory: F)
    where
        F: Fn(&RunParams) -> Result<Box<dyn DynProblem>, ConfigError> + Send + Sync + 'static,
    {
        self.entries.push(Entry {
            summary: ProblemSummary {
                id: id.to_string(),
                name: name.to_string(),
            },
            factory: Box::new(factory),
        });
    }

    /// Register a problem under `id`.
    ///
    /// Ids are non-empty and use only lowercase ASCII letters, digits, `_`
    /// and `:`. Registering an existing id fails.
    pub fn register<F>(&mut self, id: &str, name: &str, factory: F) -> Result<(), RegistryError>
    where
        F: Fn(&RunParams) -> Result<Box<dyn DynProblem>, ConfigError> + Send + Sync + 'static,
    {
        let well_formed = !id.is_empty()
            && id
                .chars()
                .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == ':');
        if !well_formed {
            return Err(RegistryError::InvalidId(id.to_string()));
        }
        if self.contains(id) {
            return Err(RegistryError::DuplicateProblem(id.to_string()));
        }
        self.insert(id, name, factory);
        info!("Registered problem `{}` ({})", id, name);
        Ok(())
    }

    /// Register a user-supplied problem as `custom:<name>`. Returns the id.
    pub fn register_custom<F>(&mut self, name: &str, factory: F) -> Result<String, RegistryError>
    where
        F: Fn(&RunParams) -> Result<Box<dyn DynProblem>, ConfigError> + Send + Sync + 'static,
    {
        if name.contains(':') {
            return Err(RegistryError::InvalidId(name.to_string()));
        }
        let id = format!("{}{}", Self::CUSTOM_PREFIX, name);
        self.register(&id, &format!("Custom: {name}"), factory)?;
        Ok(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entry(id).is_some()
    }

    fn entry(&self, id: &str) -> Option<&Entry> {
        self.entries.iter().find(|e| e.summary.id == id)
    }

    /// Every registered problem, in registration order.
    pub fn list(&self) -> Vec<ProblemSummary> {
        self.entries.iter().map(|e| e.summary.clone()).collect()
    }

    /// Instantiate a problem from run parameters.
    pub fn build(
        &self,
        id: &str,
        params: &RunParams,
    ) -> Result<Box<dyn DynProblem>, RegistryError> {
        let entry = self
            .entry(id)
            .ok_or_else(|| RegistryError::UnknownProblem(id.to_string()))?;
        Ok((entry.factory)(params)?)
    }

    /// Parameter schema of a problem with its default settings.
    pub fn parameter_schema(&self, id: &str) -> Result<Vec<ParamField>, RegistryError> {
        Ok(self.build(id, &RunParams::new())?.schema())
    }

    /// Run a problem. Missing parameters take their schema defaults.
    pub fn run(&self, id: &str, params: &RunParams) -> Result<RunReport, RegistryError> {
        self.run_with_callback(id, params, |_| {})
    }

    pub fn run_with_callback<F>(
        &self,
        id: &str,
        params: &RunParams,
        mut callback: F,
    ) -> Result<RunReport, RegistryError>
    where
        F: FnMut(&GenerationRecord),
    {
        let problem = self.build(id, params)?;
        let schema = problem.schema();
        let resolved = params.with_defaults(&schema);
        resolved.validate_against(&schema)?;

        let engine = Engine::from_params(&resolved)?;
        info!("Running `{}` with seed {}", id, engine.seed());
        Ok(problem.run_report(&engine, &mut callback)?)
    }
}
