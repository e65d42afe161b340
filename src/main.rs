//! Process bootstrap (§6, §10.5): argument handling, logging, config
//! loading, and the "workers > neurons" graceful-refusal exit path.

use std::env;
use std::path::PathBuf;
use std::process::ExitCode;

use neurite_mesh::config;
use neurite_mesh::error::Outcome;
use neurite_mesh::sim;

/// Number of worker ranks to run when none is given on the command line.
/// The original launch surface takes its process count from the
/// message-passing launcher (`mpirun -np`); this rewrite has no such
/// launcher, so the worker count becomes a second optional positional
/// argument instead (see DESIGN.md).
const DEFAULT_WORKERS: usize = 1;

fn main() -> ExitCode {
    env_logger::init();

    let mut args = env::args().skip(1);
    let config_path = args
        .next()
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from(config::DEFAULT_CONFIG_PATH));
    let workers: usize = args
        .next()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_WORKERS);

    let model = match config::load(&config_path) {
        Ok(model) => model,
        Err(err) => {
            log::error!("{err}");
            return ExitCode::FAILURE;
        }
    };

    let outcome = sim::run(model, workers + 1);
    match &outcome {
        Outcome::Completed => log::info!("simulation completed after reaching the configured horizon"),
        Outcome::TooFewNeurons(err) => log::warn!("{err}"),
    }
    ExitCode::from(outcome.exit_code() as u8)
}
