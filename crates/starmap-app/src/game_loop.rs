//! Game loop thread: runs the simulation engine at `TICK_RATE` Hz.
//!
//! The engine is created inside the thread so it never crosses a thread
//! boundary. Messages arrive over an `mpsc` channel; every snapshot goes to
//! the `on_snapshot` callback and is stored for synchronous polling.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use starmap_core::constants::TICK_RATE;
use starmap_core::state::SceneSnapshot;
use starmap_sim::{SimConfig, SimulationEngine};

use crate::state::LoopCommand;

/// Nominal duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Spawns the game loop in a new thread and returns its command sender.
pub fn spawn_game_loop<F>(
    config: SimConfig,
    latest_snapshot: Arc<Mutex<Option<SceneSnapshot>>>,
    on_snapshot: F,
) -> std::io::Result<mpsc::Sender<LoopCommand>>
where
    F: FnMut(&SceneSnapshot) + Send + 'static,
{
    let (cmd_tx, cmd_rx) = mpsc::channel::<LoopCommand>();

    std::thread::Builder::new()
        .name("starmap-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot, on_snapshot);
        })?;

    Ok(cmd_tx)
}

/// The game loop. Runs until Shutdown or channel disconnect.
fn run_game_loop<F>(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<LoopCommand>,
    latest_snapshot: &Mutex<Option<SceneSnapshot>>,
    mut on_snapshot: F,
) where
    F: FnMut(&SceneSnapshot),
{
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();
    log::info!("Game loop started at {} Hz", TICK_RATE);

    loop {
        // 1. Drain all pending messages
        if !drain_commands(&cmd_rx, &mut engine) {
            log::info!("Game loop stopped after {} ticks", engine.frame());
            return;
        }

        // 2. Advance one tick (engine handles pause internally)
        let snapshot = engine.tick();
        on_snapshot(&snapshot);

        // 3. Store latest snapshot for synchronous polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind; reset to avoid a catch-up spiral
            log::debug!("Game loop fell behind by {:?}", now - next_tick_time);
            next_tick_time = now;
        }
    }
}

/// Apply queued messages. Returns false when the loop should stop.
fn drain_commands(cmd_rx: &mpsc::Receiver<LoopCommand>, engine: &mut SimulationEngine) -> bool {
    loop {
        match cmd_rx.try_recv() {
            Ok(LoopCommand::Command(cmd)) => engine.queue_command(cmd),
            Ok(LoopCommand::ReplaceFleets(fleets)) => engine.set_fleet_snapshot(fleets),
            Ok(LoopCommand::Shutdown) => return false,
            Err(mpsc::TryRecvError::Empty) => return true,
            Err(mpsc::TryRecvError::Disconnected) => return false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use starmap_core::commands::ViewCommand;
    use starmap_core::enums::SimPhase;
    use starmap_core::fleets::FleetSnapshot;

    #[test]
    fn test_command_channel_round_trip() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();

        tx.send(LoopCommand::Command(ViewCommand::ClearFocus)).unwrap();
        tx.send(LoopCommand::Command(ViewCommand::Pause)).unwrap();
        tx.send(LoopCommand::Shutdown).unwrap();

        let mut commands = Vec::new();
        while let Ok(cmd) = rx.try_recv() {
            commands.push(cmd);
        }

        assert_eq!(commands.len(), 3);
        assert!(matches!(
            commands[0],
            LoopCommand::Command(ViewCommand::ClearFocus)
        ));
        assert!(matches!(commands[1], LoopCommand::Command(ViewCommand::Pause)));
        assert!(matches!(commands[2], LoopCommand::Shutdown));
    }

    #[test]
    fn test_drain_stops_on_shutdown() {
        let (tx, rx) = mpsc::channel::<LoopCommand>();
        let mut engine = SimulationEngine::new(SimConfig::default());

        tx.send(LoopCommand::ReplaceFleets(FleetSnapshot::new())).unwrap();
        tx.send(LoopCommand::Command(ViewCommand::Pause)).unwrap();
        assert!(drain_commands(&rx, &mut engine));
        assert_eq!(engine.tick().phase, SimPhase::Paused);

        tx.send(LoopCommand::Shutdown).unwrap();
        assert!(!drain_commands(&rx, &mut engine));

        drop(tx);
        assert!(!drain_commands(&rx, &mut engine));
    }

    #[test]
    fn test_loop_invokes_callback() {
        let latest = Arc::new(Mutex::new(None));
        let (seen_tx, seen_rx) = mpsc::channel::<u64>();
        let cmd_tx = spawn_game_loop(SimConfig::default(), latest.clone(), move |snap| {
            let _ = seen_tx.send(snap.time.tick);
        })
        .unwrap();

        let first = seen_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        let second = seen_rx.recv_timeout(Duration::from_secs(5)).unwrap();
        assert!(second > first);
        cmd_tx.send(LoopCommand::Shutdown).unwrap();
        assert!(latest.lock().unwrap().is_some());
    }

    #[test]
    fn test_snapshot_serialization_under_3ms() {
        let mut engine = SimulationEngine::new(SimConfig::default());
        for _ in 0..50 {
            engine.tick();
        }

        let snapshot = engine.tick();
        let start = Instant::now();
        let json = serde_json::to_string(&snapshot).unwrap();
        let elapsed = start.elapsed();

        assert!(
            elapsed < Duration::from_millis(3),
            "Snapshot serialization took {:?}, should be <3ms",
            elapsed
        );
        assert!(!json.is_empty());
    }

    #[test]
    fn test_tick_duration_constant() {
        // 60Hz = 16.666ms per tick
        let expected_nanos = 1_000_000_000u64 / 60;
        assert_eq!(TICK_DURATION.as_nanos(), expected_nanos as u128);
    }
}
