//! Deterministic replay of scripted input.
//!
//! An `InputScript` pins down everything a run depends on: seed, tuning,
//! tick length and the tick at which each command arrives. Replaying the
//! same script always yields the same snapshots.

use std::path::Path;

use serde::{Deserialize, Serialize};

use skirmish_core::commands::PlayerCommand;
use skirmish_core::config::{ConfigError, Tuning};
use skirmish_core::constants::{DT, TICK_RATE};
use skirmish_core::state::GameStateSnapshot;

use crate::engine::{SimConfig, SimulationEngine};

/// Longest accepted script: one day of fixed-rate ticks.
pub const MAX_SCRIPT_TICKS: u64 = 24 * 60 * 60 * TICK_RATE as u64;

/// A command delivered just before the given tick runs (ticks count from 0).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScriptedCommand {
    pub tick: u64,
    pub command: PlayerCommand,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputScript {
    #[serde(default = "default_seed")]
    pub seed: u64,
    #[serde(default)]
    pub tuning: Tuning,
    #[serde(default = "default_dt")]
    pub dt: f32,
    pub ticks: u64,
    #[serde(default)]
    pub commands: Vec<ScriptedCommand>,
}

fn default_seed() -> u64 {
    SimConfig::default().seed
}

fn default_dt() -> f32 {
    DT
}

impl InputScript {
    /// Empty script running `ticks` fixed-rate ticks with default settings.
    pub fn new(ticks: u64) -> Self {
        Self {
            seed: default_seed(),
            tuning: Tuning::default(),
            dt: DT,
            ticks,
            commands: Vec::new(),
        }
    }

    /// Append a command for the given tick.
    pub fn at(mut self, tick: u64, command: PlayerCommand) -> Self {
        self.commands.push(ScriptedCommand { tick, command });
        self
    }

    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let script: Self = serde_json::from_str(json)?;
        script.validate()?;
        Ok(script)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.dt.is_finite() && self.dt > 0.0) {
            return Err(ConfigError::Invalid {
                field: "dt",
                reason: format!("must be a positive finite number, got {}", self.dt),
            });
        }
        if self.ticks > MAX_SCRIPT_TICKS {
            return Err(ConfigError::Invalid {
                field: "ticks",
                reason: format!("at most {MAX_SCRIPT_TICKS}, got {}", self.ticks),
            });
        }
        self.tuning.validate()
    }
}

/// Replay a script, handing every per-tick snapshot to `on_tick`.
/// Returns the final snapshot.
pub fn replay_with(
    script: &InputScript,
    mut on_tick: impl FnMut(&GameStateSnapshot),
) -> GameStateSnapshot {
    let mut engine = SimulationEngine::new(SimConfig {
        seed: script.seed,
        tuning: script.tuning.clone(),
    });

    let mut commands = script.commands.clone();
    commands.sort_by_key(|c| c.tick);
    let mut pending = commands.into_iter().peekable();

    let mut last = engine.snapshot();
    for tick in 0..script.ticks {
        while let Some(scripted) = pending.next_if(|c| c.tick <= tick) {
            engine.queue_command(scripted.command);
        }
        last = engine.tick(script.dt);
        on_tick(&last);
    }
    last
}

/// Replay a script and collect every snapshot.
pub fn replay(script: &InputScript) -> Vec<GameStateSnapshot> {
    let mut snapshots = Vec::new();
    replay_with(script, |snap| snapshots.push(snap.clone()));
    snapshots
}

/// Replay a script and keep only the final snapshot.
pub fn replay_final(script: &InputScript) -> GameStateSnapshot {
    replay_with(script, |_| {})
}
