//! Error types shared by the engine, the problem contract and the registry.

use std::fmt;

/// Run parameter errors. Every variant names the offending field.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required parameter `{field}`")]
    Missing { field: String },
    #[error("Parameter `{field}` must be {expected}")]
    InvalidType {
        field: String,
        expected: &'static str,
    },
    #[error("Parameter `{field}` = {value} is out of range: {reason}")]
    OutOfRange {
        field: String,
        value: String,
        reason: String,
    },
    #[error("Failed to read parameters: {0}")]
    Io(#[from] std::io::Error),
    #[error("Failed to parse parameters: {0}")]
    Json(#[from] serde_json::Error),
}

impl ConfigError {
    pub(crate) fn out_of_range(
        field: &str,
        value: impl fmt::Display,
        reason: impl Into<String>,
    ) -> Self {
        Self::OutOfRange {
            field: field.to_string(),
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Failure raised by a problem capability.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ProblemError {
    #[error("{0}")]
    Failed(String),
    #[error("Invalid individual: {0}")]
    InvalidIndividual(String),
    #[error("Expected a score with {expected} objective(s), found {found}")]
    ScoreShape { expected: usize, found: usize },
    #[error("Fitness returned a non-finite score")]
    NonFiniteScore,
}

/// Problem capability in which a contract failure happened.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    Create,
    Fitness,
    Breed,
    Mutate,
    Validate,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Operation::Create => "create_individual",
            Operation::Fitness => "fitness",
            Operation::Breed => "breed",
            Operation::Mutate => "mutate",
            Operation::Validate => "validate",
        };
        f.write_str(name)
    }
}

/// Errors that abort an engine run. No partial result is returned.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    #[error("Configuration error: {0}")]
    Configuration(#[from] ConfigError),
    #[error("Population size must be at least 2 (got {population_size})")]
    EmptyPopulation { population_size: usize },
    #[error("Problem `{operation}` failed{}: {source}", generation_suffix(.generation))]
    ProblemContract {
        operation: Operation,
        generation: Option<usize>,
        #[source]
        source: ProblemError,
    },
    #[error("Failed to serialize run result: {0}")]
    Report(#[from] serde_json::Error),
}

fn generation_suffix(generation: &Option<usize>) -> String {
    generation
        .map(|g| format!(" in generation {g}"))
        .unwrap_or_default()
}

impl EngineError {
    pub(crate) fn contract(
        operation: Operation,
        generation: Option<usize>,
    ) -> impl FnOnce(ProblemError) -> Self {
        move |source| Self::ProblemContract {
            operation,
            generation,
            source,
        }
    }
}

/// Registry lookup and registration errors.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("Unknown problem `{0}`")]
    UnknownProblem(String),
    #[error("Problem `{0}` is already registered")]
    DuplicateProblem(String),
    #[error("Invalid problem id `{0}`: use lowercase letters, digits, `_` or `:`")]
    InvalidId(String),
    #[error(transparent)]
    Engine(#[from] EngineError),
}

impl From<ConfigError> for RegistryError {
    fn from(err: ConfigError) -> Self {
        Self::Engine(EngineError::Configuration(err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contract_error_names_operation_and_generation() {
        let err = EngineError::contract(Operation::Breed, Some(3))(ProblemError::Failed(
            "boom".into(),
        ));
        assert_eq!(
            err.to_string(),
            "Problem `breed` failed in generation 3: boom"
        );

        let err = EngineError::contract(Operation::Create, None)(ProblemError::NonFiniteScore);
        assert_eq!(
            err.to_string(),
            "Problem `create_individual` failed: Fitness returned a non-finite score"
        );
    }

    #[test]
    fn test_config_error_names_field() {
        let err = ConfigError::Missing {
            field: "generations".into(),
        };
        assert!(err.to_string().contains("generations"));
    }
}
