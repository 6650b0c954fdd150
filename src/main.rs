//! Outrank binary
//!
//! Sorts the alternatives of a JSON sorting problem and prints the
//! assignments as JSON.
//!
//! # Usage
//! ```bash
//! outrank <problem.json> [config.toml]
//! ```

use std::path::Path;
use std::process::ExitCode;

use serde_json::json;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

use outrank::config::EngineConfig;
use outrank::domain::model::SortingProblem;

fn main() -> ExitCode {
    let mut args = std::env::args().skip(1);
    let Some(problem_path) = args.next() else {
        eprintln!("usage: outrank <problem.json> [config.toml]");
        return ExitCode::from(2);
    };

    let config_path = args.next();
    let config = match EngineConfig::load_validated(config_path.as_deref().map(Path::new)) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("outrank: {}", e);
            return ExitCode::FAILURE;
        }
    };
    init_tracing(&config);

    match run(&config, Path::new(&problem_path)) {
        Ok(output) => {
            println!("{}", output);
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!(error = %e, "Sorting failed");
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(config: &EngineConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));
    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);
    if config.json_logs {
        builder.json().init();
    } else {
        builder.with_target(false).init();
    }
}

fn run(config: &EngineConfig, problem_path: &Path) -> Result<String, Box<dyn std::error::Error>> {
    let raw = std::fs::read_to_string(problem_path)?;
    let problem: SortingProblem = serde_json::from_str(&raw)?;
    info!(
        path = %problem_path.display(),
        alternatives = problem.alternatives().len(),
        criteria = problem.criteria().len(),
        "Loaded sorting problem"
    );

    let outcome = config.sorting_engine().sort(&problem, config.sorting.mode)?;
    let output = json!({
        "mode": config.sorting.mode,
        "assignments": outcome.assignments,
        "smallest_separation": outcome.smallest_separation,
    });
    Ok(serde_json::to_string_pretty(&output)?)
}
