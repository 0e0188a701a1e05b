//! Gameplay tuning.
//!
//! Every number the systems consult lives in [`Tuning`]. Defaults come from
//! [`crate::constants`]; a JSON file may override any subset of fields.

use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::constants::*;

/// Errors raised while loading or validating configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("Invalid value for `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    // --- Player ---
    pub player_start: Vec3,
    pub ground_height: f32,
    pub move_speed: f32,
    pub turn_speed: f32,
    pub jump_speed: f32,
    pub gravity: f32,
    pub max_health: u32,

    // --- Bullets ---
    pub bullet_speed: f32,
    pub world_bound: f32,

    // --- Ordnance ---
    pub bomb_fuse_secs: f32,
    pub explosion_lifetime_secs: f32,

    // --- Enemies ---
    pub enemy_max_hp: u32,
    pub enemy_speed: f32,
    pub spawn_interval_secs: f32,
    pub spawn_half_extent: f32,
    pub spawn_height: f32,
    pub hit_flash_secs: f32,

    // --- Combat ---
    pub hit_radius: f32,
    pub contact_radius: f32,
    pub contact_damage: u32,
    pub push_back_distance: f32,
    pub bullet_damage: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            player_start: Vec3::from_array(PLAYER_START),
            ground_height: GROUND_HEIGHT,
            move_speed: PLAYER_MOVE_SPEED,
            turn_speed: PLAYER_TURN_SPEED,
            jump_speed: PLAYER_JUMP_SPEED,
            gravity: GRAVITY,
            max_health: PLAYER_MAX_HEALTH,
            bullet_speed: BULLET_SPEED,
            world_bound: WORLD_BOUND,
            bomb_fuse_secs: BOMB_FUSE_SECS,
            explosion_lifetime_secs: EXPLOSION_LIFETIME_SECS,
            enemy_max_hp: ENEMY_MAX_HP,
            enemy_speed: ENEMY_SPEED,
            spawn_interval_secs: ENEMY_SPAWN_INTERVAL_SECS,
            spawn_half_extent: ENEMY_SPAWN_HALF_EXTENT,
            spawn_height: ENEMY_SPAWN_HEIGHT,
            hit_flash_secs: ENEMY_HIT_FLASH_SECS,
            hit_radius: HIT_RADIUS,
            contact_radius: CONTACT_RADIUS,
            contact_damage: CONTACT_DAMAGE,
            push_back_distance: PUSH_BACK_DISTANCE,
            bullet_damage: BULLET_DAMAGE,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON tuning document. Missing fields keep their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let tuning: Self = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a JSON tuning file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    /// Reject values that would break simulation invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let positive = [
            ("move_speed", self.move_speed),
            ("turn_speed", self.turn_speed),
            ("jump_speed", self.jump_speed),
            ("gravity", self.gravity),
            ("bullet_speed", self.bullet_speed),
            ("world_bound", self.world_bound),
            ("bomb_fuse_secs", self.bomb_fuse_secs),
            ("explosion_lifetime_secs", self.explosion_lifetime_secs),
            ("enemy_speed", self.enemy_speed),
            ("spawn_interval_secs", self.spawn_interval_secs),
            ("spawn_half_extent", self.spawn_half_extent),
            ("hit_radius", self.hit_radius),
            ("contact_radius", self.contact_radius),
        ];
        for (field, value) in positive {
            if !(value.is_finite() && value > 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a positive finite number, got {value}"),
                });
            }
        }

        let non_negative = [
            ("hit_flash_secs", self.hit_flash_secs),
            ("push_back_distance", self.push_back_distance),
        ];
        for (field, value) in non_negative {
            if !(value.is_finite() && value >= 0.0) {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("must be a non-negative finite number, got {value}"),
                });
            }
        }

        if !self.player_start.is_finite() || !self.ground_height.is_finite() {
            return Err(ConfigError::Invalid {
                field: "player_start",
                reason: "player start and ground height must be finite".into(),
            });
        }
        if self.max_health == 0 {
            return Err(ConfigError::Invalid {
                field: "max_health",
                reason: "must be at least 1".into(),
            });
        }
        if self.enemy_max_hp == 0 {
            return Err(ConfigError::Invalid {
                field: "enemy_max_hp",
                reason: "must be at least 1".into(),
            });
        }
        Ok(())
    }
}
