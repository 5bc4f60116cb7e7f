//! Register a user-defined problem and run it through the registry.
//!
//! Evolves a lowercase phrase towards a target string.

use evolab::{
    compute::{EvoRng, Problem},
    error::{ConfigError, ProblemError},
    problems::ProblemRegistry,
    schema::{ParamField, RunParams, Score},
};

const ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz ";

struct Phrase {
    target: Vec<u8>,
}

impl Phrase {
    fn from_params(params: &RunParams) -> Result<Self, ConfigError> {
        let target = params.text_or("target", "hello world")?;
        if target.is_empty() || !target.bytes().all(|b| ALPHABET.contains(&b)) {
            return Err(ConfigError::InvalidType {
                field: "target".to_string(),
                expected: "lowercase letters and spaces",
            });
        }
        Ok(Self {
            target: target.into_bytes(),
        })
    }

    fn random_char(rng: &mut EvoRng) -> u8 {
        ALPHABET[rng.index(ALPHABET.len())]
    }
}

impl Problem for Phrase {
    type Individual = String;

    fn parameter_schema(&self) -> Vec<ParamField> {
        vec![
            ParamField::text("target", "Target Phrase", "hello world"),
            ParamField::number("population_size", "Population Size", 100.0).range(2.0, 1000.0),
            ParamField::number("generations", "Generations", 300.0).range(1.0, 2000.0),
            ParamField::number("mutation_rate", "Mutation Rate", 0.05).range(0.0, 1.0),
        ]
    }

    fn create_individual(&self, rng: &mut EvoRng) -> Result<String, ProblemError> {
        let bytes = (0..self.target.len()).map(|_| Self::random_char(rng)).collect();
        String::from_utf8(bytes).map_err(|e| ProblemError::Failed(e.to_string()))
    }

    fn fitness(&self, individual: &String) -> Result<Score, ProblemError> {
        let matches = individual
            .bytes()
            .zip(&self.target)
            .filter(|(a, b)| a == *b)
            .count();
        Ok(Score::Scalar(matches as f64))
    }

    fn breed(&self, a: &String, b: &String, rng: &mut EvoRng) -> Result<String, ProblemError> {
        let cut = rng.index(self.target.len());
        Ok(format!("{}{}", &a[..cut], &b[cut..]))
    }

    fn mutate(
        &self,
        individual: &String,
        rate: f64,
        rng: &mut EvoRng,
    ) -> Result<String, ProblemError> {
        let bytes = individual
            .bytes()
            .map(|c| if rng.chance(rate) { Self::random_char(rng) } else { c })
            .collect();
        String::from_utf8(bytes).map_err(|e| ProblemError::Failed(e.to_string()))
    }

    fn validate(&self, individual: &String) -> Result<(), ProblemError> {
        if individual.len() != self.target.len() {
            return Err(ProblemError::InvalidIndividual(format!(
                "phrase has {} characters, expected {}",
                individual.len(),
                self.target.len()
            )));
        }
        Ok(())
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let mut registry = ProblemRegistry::with_builtins();
    let id = registry.register_custom("phrase", |params| {
        Ok(Box::new(Phrase::from_params(params)?))
    })?;

    let params = RunParams::new()
        .with("target", "evolution works")
        .with("seed", 42usize);
    let report = registry.run(&id, &params)?;

    println!("Problem:  {}", id);
    println!("Best:     {}", report.result.best);
    println!("Score:    {:?}", report.result.score);
    for (generation, best) in report.result.best_so_far().iter().enumerate().step_by(25) {
        println!("  Generation {:>4}: {}", generation, best);
    }

    Ok(())
}
