use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};

use towersim_app::game_loop;
use towersim_app::input;
use towersim_app::logging;
use towersim_core::state::SimSnapshot;
use towersim_sim::engine::SimConfig;

/// Airport traffic simulator. Reads JSON commands from stdin and writes
/// simulation events to stdout, one JSON object per line.
#[derive(Parser)]
#[clap(version, about)]
struct Options {
    /// JSON simulation config. Missing fields take their defaults.
    config: Option<PathBuf>,
    /// Override the RNG seed from the config.
    #[clap(long)]
    seed: Option<u64>,
    /// Override the number of aircraft spawned at startup.
    #[clap(long)]
    aircraft: Option<u32>,
}

fn main() -> ExitCode {
    let options = Options::parse();
    if let Err(err) = logging::init_logging() {
        eprintln!("failed to initialize logging: {err}");
    }

    let mut config = match &options.config {
        Some(path) => match SimConfig::load(path) {
            Ok(config) => config,
            Err(err) => {
                error!(path = %path.display(), %err, "cannot load config");
                return ExitCode::FAILURE;
            }
        },
        None => SimConfig::default(),
    };
    if let Some(seed) = options.seed {
        config.seed = seed;
    }
    if let Some(aircraft) = options.aircraft {
        config.initial_aircraft = aircraft;
    }
    info!(?config, "starting simulation");

    let (state, handle) = match game_loop::spawn_game_loop(config, print_events) {
        Ok(spawned) => spawned,
        Err(err) => {
            error!(%err, "failed to spawn game loop thread");
            return ExitCode::FAILURE;
        }
    };

    let forwarded = input::forward_commands(io::stdin().lock(), &state);
    info!(forwarded, "input closed, shutting down");
    state.shutdown();

    if handle.join().is_err() {
        error!("game loop panicked");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

/// Write the tick's events to stdout as JSON lines.
fn print_events(snapshot: &SimSnapshot) {
    for event in &snapshot.events {
        match serde_json::to_string(event) {
            Ok(json) => println!("{json}"),
            Err(err) => error!(%err, "cannot encode event"),
        }
    }
}
