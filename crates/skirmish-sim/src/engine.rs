//! Simulation engine: the core of the game.
//!
//! `SimulationEngine` owns the player, one system per entity kind, the input
//! state and the seeded RNG. It applies queued commands at the tick boundary,
//! runs all systems in a fixed order and produces `GameStateSnapshot`s.
//! Completely headless, enabling deterministic testing and replay.

use std::collections::VecDeque;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use skirmish_core::commands::PlayerCommand;
use skirmish_core::config::Tuning;
use skirmish_core::constants::DT;
use skirmish_core::enums::{MotionState, SessionPhase};
use skirmish_core::events::GameEvent;
use skirmish_core::state::GameStateSnapshot;
use skirmish_core::types::SimTime;

use crate::input::InputState;
use crate::systems;
use crate::systems::combat;
use crate::systems::enemy::EnemySystem;
use crate::systems::kinematics::{self, PlayerState};
use crate::systems::ordnance::OrdnanceSystem;
use crate::systems::projectile::ProjectileSystem;
use crate::systems::snapshot::{ScoreState, SnapshotSources};

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub tuning: Tuning,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            tuning: Tuning::default(),
        }
    }
}

/// The simulation engine. Owns all sim state.
pub struct SimulationEngine {
    tuning: Tuning,
    time: SimTime,
    phase: SessionPhase,
    rng: ChaCha8Rng,
    command_queue: VecDeque<PlayerCommand>,
    input: InputState,
    player: PlayerState,
    projectiles: ProjectileSystem,
    ordnance: OrdnanceSystem,
    enemies: EnemySystem,
    events: Vec<GameEvent>,
    score: ScoreState,
}

impl SimulationEngine {
    /// Create a new simulation engine with the given config.
    pub fn new(config: SimConfig) -> Self {
        let tuning = config.tuning;
        Self {
            time: SimTime::default(),
            phase: SessionPhase::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            command_queue: VecDeque::new(),
            input: InputState::default(),
            player: PlayerState::spawn(&tuning),
            projectiles: ProjectileSystem::new(&tuning),
            ordnance: OrdnanceSystem::new(&tuning),
            enemies: EnemySystem::new(&tuning),
            events: Vec::new(),
            score: ScoreState::default(),
            tuning,
        }
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    ///
    /// A non-positive or non-finite `dt` advances nothing; the snapshot is
    /// still produced.
    pub fn tick(&mut self, dt: f32) -> GameStateSnapshot {
        self.process_commands();

        if self.phase == SessionPhase::Active {
            if dt.is_finite() && dt > 0.0 {
                self.run_systems(dt);
                self.time.advance(dt);
            } else {
                log::warn!("skipping tick with invalid dt {dt}");
            }
        }
        // Edges never survive the tick they arrived in, paused or not.
        self.input.clear_edges();

        let events = std::mem::take(&mut self.events);
        systems::snapshot::build_snapshot(&self.sources(), events)
    }

    /// Advance by one fixed-rate tick.
    pub fn step(&mut self) -> GameStateSnapshot {
        self.tick(DT)
    }

    /// Snapshot of the current state without advancing or draining events.
    pub fn snapshot(&self) -> GameStateSnapshot {
        systems::snapshot::build_snapshot(&self.sources(), Vec::new())
    }

    pub fn phase(&self) -> SessionPhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn tuning(&self) -> &Tuning {
        &self.tuning
    }

    pub fn player(&self) -> &PlayerState {
        &self.player
    }

    pub fn projectiles(&self) -> &ProjectileSystem {
        &self.projectiles
    }

    pub fn ordnance(&self) -> &OrdnanceSystem {
        &self.ordnance
    }

    pub fn enemies(&self) -> &EnemySystem {
        &self.enemies
    }

    pub fn score(&self) -> &ScoreState {
        &self.score
    }

    /// Place an enemy directly (for tests that need a known layout).
    #[cfg(test)]
    pub fn spawn_test_enemy(&mut self, position: glam::Vec3) -> skirmish_core::types::EnemyId {
        self.enemies.spawn_at(position)
    }

    /// Mutable player access for test setup.
    #[cfg(test)]
    pub fn player_mut(&mut self) -> &mut PlayerState {
        &mut self.player
    }

    fn sources(&self) -> SnapshotSources<'_> {
        SnapshotSources {
            time: &self.time,
            phase: self.phase,
            tuning: &self.tuning,
            player: &self.player,
            projectiles: &self.projectiles,
            ordnance: &self.ordnance,
            enemies: &self.enemies,
            score: &self.score,
        }
    }

    /// Process all queued commands.
    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    /// Handle a single player command.
    fn handle_command(&mut self, command: PlayerCommand) {
        match command {
            PlayerCommand::Pause => {
                if self.phase == SessionPhase::Active {
                    self.phase = SessionPhase::Paused;
                }
            }
            PlayerCommand::Resume => {
                if self.phase == SessionPhase::Paused {
                    self.phase = SessionPhase::Active;
                }
            }
            other => {
                if !self.input.apply(&other) {
                    log::trace!("ignored input {other:?}");
                }
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, dt: f32) {
        // 1. Player kinematics
        let was = self.player.motion;
        self.player = kinematics::advance(&self.player, &self.input, dt, &self.tuning);
        match (was, self.player.motion) {
            (MotionState::Grounded, MotionState::Airborne) => self.events.push(GameEvent::Jumped),
            (MotionState::Airborne, MotionState::Grounded) => self.events.push(GameEvent::Landed),
            _ => {}
        }

        // 2. Fire and drop edges
        if self.input.fire {
            if let Some(bullet_id) = self
                .projectiles
                .spawn(self.player.position, self.player.forward())
            {
                self.score.shots_fired += 1;
                self.events.push(GameEvent::ShotFired { bullet_id });
            }
        }
        if self.input.drop_bomb {
            let position = self.player.position;
            let bomb_id = self.ordnance.drop(position);
            self.score.bombs_dropped += 1;
            self.events.push(GameEvent::BombDropped { bomb_id, position });
        }

        // 3. Projectiles
        let retired = self.projectiles.advance_all(dt);
        if !retired.is_empty() {
            log::trace!("retired {} bullets out of bounds", retired.len());
        }

        // 4. Ordnance
        for explosion_id in self.ordnance.expire_explosions(dt) {
            self.events.push(GameEvent::ExplosionExpired { explosion_id });
        }
        for (bomb_id, explosion) in self.ordnance.advance_all(dt) {
            self.events.push(GameEvent::BombDetonated {
                bomb_id,
                explosion_id: explosion.id,
                position: explosion.position,
            });
        }

        // 5. Enemies
        let elapsed = self.time.elapsed_secs + f64::from(dt);
        if let Some(enemy_id) = self.enemies.spawn_tick(elapsed, &mut self.rng) {
            if let Some(enemy) = self.enemies.get(enemy_id) {
                self.events.push(GameEvent::EnemySpawned {
                    enemy_id,
                    position: enemy.position,
                });
            }
        }
        self.enemies.advance_all(self.player.position, dt);

        // 6. Combat
        let outcome = combat::resolve(
            &mut self.player,
            &mut self.projectiles,
            &mut self.enemies,
            &self.tuning,
        );
        self.score.enemies_killed += outcome.killed.len() as u32;
        self.score.damage_taken += outcome.damage_taken;
        self.events.extend(outcome.events);

        log::trace!(
            "tick {}: {} bullets, {} bombs, {} enemies, health {}",
            self.time.tick + 1,
            self.projectiles.len(),
            self.ordnance.bombs().len(),
            self.enemies.len(),
            self.player.health
        );
    }
}
