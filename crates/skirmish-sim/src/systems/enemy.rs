//! Enemy system: timed spawner and pure-pursuit movement.
//!
//! Damage intake is driven by the combat resolver through `apply_damage`;
//! enemies never decide their own fate.

use glam::Vec3;
use rand::Rng;

use skirmish_core::config::Tuning;
use skirmish_core::constants::TIMER_EPSILON;
use skirmish_core::types::{EnemyId, IdCounter};

#[derive(Debug, Clone, PartialEq)]
pub struct Enemy {
    pub id: EnemyId,
    pub position: Vec3,
    /// Remaining hit points, never below zero.
    pub hp: u32,
    /// Cosmetic hit flash countdown (seconds). Not gameplay state.
    pub hit_flash: f32,
}

impl Enemy {
    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn is_flashing(&self) -> bool {
        self.hit_flash > TIMER_EPSILON
    }
}

#[derive(Debug, Clone)]
pub struct EnemySystem {
    /// Live enemies in spawn order.
    enemies: Vec<Enemy>,
    ids: IdCounter,
    /// Elapsed time at which the next spawn is due.
    next_spawn_at: f64,
    spawn_interval: f64,
    spawn_half_extent: f32,
    spawn_height: f32,
    max_hp: u32,
    speed: f32,
    hit_flash_secs: f32,
}

impl EnemySystem {
    pub fn new(tuning: &Tuning) -> Self {
        let spawn_interval = f64::from(tuning.spawn_interval_secs);
        Self {
            enemies: Vec::new(),
            ids: IdCounter::default(),
            next_spawn_at: spawn_interval,
            spawn_interval,
            spawn_half_extent: tuning.spawn_half_extent,
            spawn_height: tuning.spawn_height,
            max_hp: tuning.enemy_max_hp,
            speed: tuning.enemy_speed,
            hit_flash_secs: tuning.hit_flash_secs,
        }
    }

    /// Spawn one enemy if the interval has elapsed. At most one per call, so a
    /// long stall catches up one enemy per tick rather than in a burst.
    pub fn spawn_tick(&mut self, elapsed: f64, rng: &mut impl Rng) -> Option<EnemyId> {
        if elapsed + f64::from(TIMER_EPSILON) < self.next_spawn_at {
            return None;
        }
        self.next_spawn_at += self.spawn_interval;

        let h = self.spawn_half_extent;
        let x = rng.gen_range(-h..=h);
        let z = rng.gen_range(-h..=h);
        Some(self.spawn_at(Vec3::new(x, self.spawn_height, z)))
    }

    /// Place a full-health enemy at an explicit position.
    pub fn spawn_at(&mut self, position: Vec3) -> EnemyId {
        let id = EnemyId(self.ids.next_raw());
        self.enemies.push(Enemy {
            id,
            position,
            hp: self.max_hp,
            hit_flash: 0.0,
        });
        log::debug!("spawned {id} at {position}");
        id
    }

    /// Move every enemy straight at the player and run down hit flashes.
    pub fn advance_all(&mut self, player_position: Vec3, dt: f32) {
        let step = self.speed * dt;
        for enemy in &mut self.enemies {
            let heading = (player_position - enemy.position).normalize_or_zero();
            enemy.position += heading * step;
            enemy.hit_flash = (enemy.hit_flash - dt).max(0.0);
        }
    }

    /// Subtract `amount` hit points (clamped at zero) and start the hit
    /// flash. Returns the remaining hit points, or `None` for an unknown id.
    pub fn apply_damage(&mut self, id: EnemyId, amount: u32) -> Option<u32> {
        let flash = self.hit_flash_secs;
        let enemy = self.get_mut(id)?;
        enemy.hp = enemy.hp.saturating_sub(amount);
        enemy.hit_flash = flash;
        Some(enemy.hp)
    }

    /// Remove one enemy. Unknown ids are a no-op.
    pub fn remove(&mut self, id: EnemyId) -> bool {
        let before = self.enemies.len();
        self.enemies.retain(|e| e.id != id);
        self.enemies.len() != before
    }

    /// Remove a batch of enemies in one pass.
    pub fn remove_many(&mut self, ids: &[EnemyId]) {
        if ids.is_empty() {
            return;
        }
        self.enemies.retain(|e| !ids.contains(&e.id));
    }

    pub fn get(&self, id: EnemyId) -> Option<&Enemy> {
        self.enemies.iter().find(|e| e.id == id)
    }

    pub fn get_mut(&mut self, id: EnemyId) -> Option<&mut Enemy> {
        self.enemies.iter_mut().find(|e| e.id == id)
    }

    pub fn enemies(&self) -> &[Enemy] {
        &self.enemies
    }

    pub(crate) fn enemies_mut(&mut self) -> &mut [Enemy] {
        &mut self.enemies
    }

    pub fn len(&self) -> usize {
        self.enemies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.enemies.is_empty()
    }
}
