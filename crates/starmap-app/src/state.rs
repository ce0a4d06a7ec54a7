//! Host state shared between callers and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use anyhow::{anyhow, bail, Result};

use starmap_core::commands::ViewCommand;
use starmap_core::fleets::FleetSnapshot;
use starmap_core::state::SceneSnapshot;
use starmap_sim::SimConfig;

use crate::game_loop;

/// Messages sent to the game loop thread.
#[derive(Debug)]
pub enum LoopCommand {
    /// A viewer command to forward to the simulation engine.
    Command(ViewCommand),
    /// Replace the fleet data the engine resolves against.
    ReplaceFleets(FleetSnapshot),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Shared host state. `Send + Sync` so it can sit behind an `Arc`.
///
/// `mpsc::Sender` is not `Sync`, hence the `Mutex` around it.
pub struct AppState {
    /// `None` until `start` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<LoopCommand>>>,
    /// Latest snapshot, updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<SceneSnapshot>>>,
    pub running: Mutex<bool>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
            running: Mutex::new(false),
        }
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop thread if it is not already running.
    pub fn start(&self, config: SimConfig) -> Result<()> {
        let mut running = self
            .running
            .lock()
            .map_err(|e| anyhow!("state lock poisoned: {e}"))?;
        if *running {
            bail!("Simulation already running");
        }

        let cmd_tx =
            game_loop::spawn_game_loop(config, self.latest_snapshot.clone(), |_: &SceneSnapshot| {})?;

        let mut tx_lock = self
            .command_tx
            .lock()
            .map_err(|e| anyhow!("state lock poisoned: {e}"))?;
        *tx_lock = Some(cmd_tx);
        *running = true;
        Ok(())
    }

    /// Forward a message to the game loop.
    pub fn send(&self, command: LoopCommand) -> Result<()> {
        let tx_lock = self
            .command_tx
            .lock()
            .map_err(|e| anyhow!("state lock poisoned: {e}"))?;
        let tx = tx_lock
            .as_ref()
            .ok_or_else(|| anyhow!("Simulation not running"))?;
        tx.send(command)
            .map_err(|_| anyhow!("Game loop has stopped"))
    }

    /// Clone of the most recent snapshot, if any tick has run.
    pub fn snapshot(&self) -> Option<SceneSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|s| s.clone())
    }

    /// Ask the loop to stop and forget its channel.
    pub fn stop(&self) -> Result<()> {
        self.send(LoopCommand::Shutdown)?;
        if let Ok(mut tx) = self.command_tx.lock() {
            *tx = None;
        }
        if let Ok(mut running) = self.running.lock() {
            *running = false;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::{Duration, Instant};

    #[test]
    fn test_app_state_creation() {
        let state = AppState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(!*state.running.lock().unwrap());
    }

    #[test]
    fn test_send_before_start_fails() {
        let state = AppState::new();
        let err = state.send(LoopCommand::Shutdown).unwrap_err();
        assert!(err.to_string().contains("not running"));
    }

    #[test]
    fn test_start_publishes_snapshots() {
        let state = AppState::new();
        state.start(SimConfig::default()).unwrap();
        assert!(state.start(SimConfig::default()).is_err());

        let deadline = Instant::now() + Duration::from_secs(5);
        while state.snapshot().is_none() && Instant::now() < deadline {
            std::thread::sleep(Duration::from_millis(10));
        }
        let snapshot = state.snapshot().expect("no snapshot within 5s");
        assert!(!snapshot.bodies.is_empty());

        state.stop().unwrap();
        assert!(state.send(LoopCommand::Shutdown).is_err());
    }
}
