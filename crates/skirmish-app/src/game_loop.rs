//! Game loop thread: runs the simulation engine at the fixed tick rate.
//!
//! The engine is created inside the thread so it never crosses a thread
//! boundary. Commands arrive over an `mpsc` channel; each tick's snapshot is
//! stored in the shared slot for polling.

use std::io;
use std::sync::mpsc;
use std::sync::Mutex;
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use skirmish_core::constants::TICK_RATE;
use skirmish_core::state::GameStateSnapshot;
use skirmish_sim::engine::{SimConfig, SimulationEngine};

use crate::state::{GameLoopCommand, HostState, LatestSnapshot};

/// Wall-clock duration of one tick.
pub const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Wall-clock run length for `seconds`, or `None` if it is negative,
/// non-finite or too large to represent.
pub fn run_duration(seconds: f64) -> Option<Duration> {
    Duration::try_from_secs_f64(seconds).ok()
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle. The thread exits on
/// `Shutdown` or when every sender has been dropped.
pub fn spawn_game_loop(
    config: SimConfig,
    latest_snapshot: LatestSnapshot,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("skirmish-game-loop".into())
        .spawn(move || {
            run_game_loop(config, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// Start a loop and wire it into a fresh `HostState`.
pub fn start(config: SimConfig) -> io::Result<(HostState, JoinHandle<()>)> {
    let mut state = HostState::new();
    let (tx, handle) = spawn_game_loop(config, state.latest_snapshot.clone())?;
    state.command_tx = Some(tx);
    Ok((state, handle))
}

/// The game loop. Runs until Shutdown command or channel disconnect.
fn run_game_loop(
    config: SimConfig,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<GameStateSnapshot>>,
) {
    log::info!("game loop starting (seed {})", config.seed);
    let mut engine = SimulationEngine::new(config);
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) | Err(mpsc::TryRecvError::Disconnected) => {
                    log::info!("game loop stopping at tick {}", engine.time().tick);
                    return;
                }
                Err(mpsc::TryRecvError::Empty) => break,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.step();

        if snapshot.time.tick > 0 && snapshot.time.tick % u64::from(TICK_RATE) == 0 {
            let hud = &snapshot.hud;
            log::info!(
                "t={:.0}s health {}/{} enemies {} bullets {} bombs {} kills {}",
                snapshot.time.elapsed_secs,
                hud.health,
                hud.max_health,
                hud.enemies,
                hud.bullets,
                hud.bombs,
                hud.score.enemies_killed
            );
        }

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until next tick
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind: reset to avoid catch-up spiral
            log::debug!("game loop fell behind by {:?}", now - next_tick_time);
            next_tick_time = now;
        }
    }
}
