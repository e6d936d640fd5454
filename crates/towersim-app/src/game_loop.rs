//! Game loop thread: runs the simulation engine at the configured tick rate.
//!
//! The engine is created inside this thread, which keeps ownership simple.
//! Commands arrive via an `mpsc` channel. Each snapshot is handed to a sink
//! callback and stored in shared state for synchronous polling.

use std::io;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use towersim_core::state::SimSnapshot;
use towersim_sim::engine::{SimConfig, SimulationEngine};

use crate::state::{AppState, GameLoopCommand};

/// Wall-clock duration of one tick. The time scale changes how much
/// simulated time a tick covers, not how often ticks run.
pub fn tick_duration(tick_rate: u32) -> Duration {
    Duration::from_nanos(1_000_000_000 / u64::from(tick_rate.max(1)))
}

/// Spawns the game loop in a new thread.
///
/// `on_snapshot` sees every snapshot the engine produces, on the loop
/// thread.
pub fn spawn_game_loop<F>(config: SimConfig, on_snapshot: F) -> io::Result<(AppState, JoinHandle<()>)>
where
    F: FnMut(&SimSnapshot) + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();
    let latest_snapshot = Arc::new(Mutex::new(None));
    let shared = Arc::clone(&latest_snapshot);

    let handle = std::thread::Builder::new()
        .name("towersim-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &shared, on_snapshot);
        })?;

    Ok((
        AppState {
            command_tx: cmd_tx,
            latest_snapshot,
        },
        handle,
    ))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop<F>(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<SimSnapshot>>,
    mut on_snapshot: F,
) where
    F: FnMut(&SimSnapshot),
{
    let period = tick_duration(config.tick_rate);
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();
    info!(tick_rate = engine.tick_rate(), "game loop started");

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Sim(cmd)) => {
                    debug!(?cmd, "command queued");
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    info!(tick = engine.time().tick, "game loop stopped");
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick();

        // 3. Hand the snapshot to the sink
        on_snapshot(&snapshot);

        // 4. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 5. Sleep until next tick
        next_tick_time += period;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > period * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}
