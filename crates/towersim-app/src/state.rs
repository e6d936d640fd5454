//! State shared between the input reader and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use towersim_core::commands::SimCommand;
use towersim_core::state::SimSnapshot;

/// Commands sent from the input layer to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A command to forward to the simulation engine.
    Sim(SimCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Handles to a running game loop.
///
/// - `command_tx` forwards commands to the loop thread
/// - `latest_snapshot` is written by the loop after every tick, for polling
pub struct AppState {
    pub command_tx: mpsc::Sender<GameLoopCommand>,
    pub latest_snapshot: Arc<Mutex<Option<SimSnapshot>>>,
}

impl AppState {
    /// Forward a simulation command. Fails once the loop has stopped.
    pub fn send(&self, command: SimCommand) -> Result<(), String> {
        self.command_tx
            .send(GameLoopCommand::Sim(command))
            .map_err(|e| format!("Failed to send command: {}", e))
    }

    /// Ask the loop to stop. A loop that already stopped is fine.
    pub fn shutdown(&self) {
        let _ = self.command_tx.send(GameLoopCommand::Shutdown);
    }

    /// Copy of the latest snapshot.
    pub fn snapshot(&self) -> Result<Option<SimSnapshot>, String> {
        let lock = self.latest_snapshot.lock().map_err(|e| e.to_string())?;
        Ok(lock.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_send_fails_after_loop_is_gone() {
        let (tx, rx) = mpsc::channel();
        let state = AppState {
            command_tx: tx,
            latest_snapshot: Arc::new(Mutex::new(None)),
        };
        assert!(state.send(SimCommand::Pause).is_ok());
        assert!(matches!(
            rx.try_recv(),
            Ok(GameLoopCommand::Sim(SimCommand::Pause))
        ));

        drop(rx);
        assert!(state.send(SimCommand::Resume).is_err());
        assert!(state.snapshot().unwrap().is_none());
    }
}
