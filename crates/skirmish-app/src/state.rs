//! State shared between the host and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use skirmish_core::commands::PlayerCommand;
use skirmish_core::state::GameStateSnapshot;

/// Commands sent from the host to the game loop thread.
#[derive(Debug, Clone, PartialEq)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation engine.
    PlayerCommand(PlayerCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// Latest snapshot slot, written by the loop after every tick.
pub type LatestSnapshot = Arc<Mutex<Option<GameStateSnapshot>>>;

/// Host-side handles to a running game loop.
///
/// `command_tx` is `None` once the loop has been told to shut down.
pub struct HostState {
    pub command_tx: Option<mpsc::Sender<GameLoopCommand>>,
    pub latest_snapshot: LatestSnapshot,
}

impl Default for HostState {
    fn default() -> Self {
        Self {
            command_tx: None,
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl HostState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a player command. Returns false if no loop is listening.
    pub fn send(&self, command: PlayerCommand) -> bool {
        match &self.command_tx {
            Some(tx) => tx.send(GameLoopCommand::PlayerCommand(command)).is_ok(),
            None => false,
        }
    }

    /// Copy of the most recent snapshot, if the loop has ticked at least once.
    pub fn latest(&self) -> Option<GameStateSnapshot> {
        self.latest_snapshot.lock().ok().and_then(|lock| lock.clone())
    }

    /// Ask the loop to stop and drop the sender.
    pub fn shutdown(&mut self) {
        if let Some(tx) = self.command_tx.take() {
            let _ = tx.send(GameLoopCommand::Shutdown);
        }
    }
}
