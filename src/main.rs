//! Evolab CLI - list problems, show their parameters and run them.

use std::process;
use std::time::Instant;

use evolab::{
    problems::ProblemRegistry,
    schema::{ParamValue, RunParams},
};

fn usage(program: &str) -> ! {
    eprintln!("Usage:");
    eprintln!("  {} list", program);
    eprintln!("  {} schema <problem>", program);
    eprintln!(
        "  {} run <problem> [params.json] [--seed N] [--set key=value]... [--progress]",
        program
    );
    eprintln!();
    eprintln!("Run evolutionary optimization problems and print JSON results.");
    eprintln!();
    eprintln!("Arguments:");
    eprintln!("  problem      Problem id as printed by `list`");
    eprintln!("  params.json  JSON object of run parameters (missing ones use defaults)");
    eprintln!("  --seed N     Random seed, overriding the parameter file");
    eprintln!("  --set k=v    Set a single parameter; v is read as JSON, else as text");
    eprintln!("  --progress   Print the best score of every generation to stderr");
    process::exit(1);
}

fn fail(message: impl std::fmt::Display) -> ! {
    eprintln!("Error: {}", message);
    process::exit(1);
}

fn print_json(value: &impl serde::Serialize) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => fail(e),
    }
}

fn main() {
    env_logger::init();

    let args: Vec<String> = std::env::args().collect();
    let program = args.first().map(String::as_str).unwrap_or("evolab");
    let registry = ProblemRegistry::with_builtins();

    match args.get(1).map(String::as_str) {
        Some("list") => print_json(&registry.list()),
        Some("schema") => {
            let id = args.get(2).unwrap_or_else(|| usage(program));
            let schema = registry.parameter_schema(id).unwrap_or_else(|e| fail(e));
            print_json(&schema);
        }
        Some("run") => {
            let id = args.get(2).unwrap_or_else(|| usage(program));
            run(&registry, id, &args[3..], program);
        }
        _ => usage(program),
    }
}

fn run(registry: &ProblemRegistry, id: &str, rest: &[String], program: &str) {
    let mut params = RunParams::new();
    let mut overrides: Vec<(String, ParamValue)> = Vec::new();
    let mut progress = false;

    let mut i = 0;
    while i < rest.len() {
        match rest[i].as_str() {
            "--seed" => {
                let seed: u64 = rest
                    .get(i + 1)
                    .and_then(|s| s.parse().ok())
                    .unwrap_or_else(|| usage(program));
                overrides.push(("seed".to_string(), ParamValue::Number(seed as f64)));
                i += 2;
            }
            "--set" => {
                let pair = rest.get(i + 1).unwrap_or_else(|| usage(program));
                let (key, raw) = pair.split_once('=').unwrap_or_else(|| usage(program));
                let value = serde_json::from_str::<ParamValue>(raw)
                    .unwrap_or_else(|_| ParamValue::Text(raw.to_string()));
                overrides.push((key.to_string(), value));
                i += 2;
            }
            "--progress" => {
                progress = true;
                i += 1;
            }
            path if !path.starts_with("--") && i == 0 => {
                params = RunParams::load(path).unwrap_or_else(|e| fail(e));
                i += 1;
            }
            _ => usage(program),
        }
    }

    for (key, value) in overrides {
        params.set(&key, value);
    }

    let start = Instant::now();
    let report = registry
        .run_with_callback(id, &params, |record| {
            if progress {
                eprintln!("  Generation {}: best={:?}", record.generation, record.best);
            }
        })
        .unwrap_or_else(|e| fail(e));
    log::info!("Finished `{}` in {:.2}s", id, start.elapsed().as_secs_f32());

    print_json(&report);
}
