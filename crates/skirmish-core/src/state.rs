//! Game state snapshot: the complete visible state handed to the renderer each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::{MotionState, SessionPhase};
use crate::events::GameEvent;
use crate::types::{BombId, BulletId, EnemyId, ExplosionId, SimTime};

/// Complete game state produced after each tick.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: SessionPhase,
    pub player: PlayerView,
    pub bullets: Vec<BulletView>,
    pub bombs: Vec<BombView>,
    pub explosions: Vec<ExplosionView>,
    pub enemies: Vec<EnemyView>,
    pub hud: HudView,
    pub camera: CameraView,
    pub pose: LimbPose,
    pub events: Vec<GameEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec3,
    /// Rotation about +Y (radians). Zero faces -Z.
    pub yaw: f32,
    pub vertical_velocity: f32,
    pub health: u32,
    pub motion: MotionState,
    pub is_moving: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BulletView {
    pub id: BulletId,
    pub position: Vec3,
    pub direction: Vec3,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BombView {
    pub id: BombId,
    pub position: Vec3,
    pub fuse_remaining_secs: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExplosionView {
    pub id: ExplosionId,
    pub position: Vec3,
    pub ttl_secs: f32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub id: EnemyId,
    pub position: Vec3,
    pub hp: u32,
    /// Draw in the hit color this frame.
    pub flashing: bool,
}

/// On-screen counters. Live counts are recomputed from the collections
/// every tick; the score fields are cumulative over the session.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct HudView {
    pub bullets: u32,
    pub bombs: u32,
    pub explosions: u32,
    pub enemies: u32,
    pub health: u32,
    pub max_health: u32,
    pub score: ScoreView,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ScoreView {
    pub enemies_killed: u32,
    pub shots_fired: u32,
    pub bombs_dropped: u32,
    pub damage_taken: u32,
}

/// Third-person follow camera.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CameraView {
    pub eye: Vec3,
    pub target: Vec3,
}

/// Walk-cycle rotations (radians about each limb's local X, torso about Z).
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct LimbPose {
    pub torso_tilt: f32,
    pub upper_left_arm: f32,
    pub upper_right_arm: f32,
    pub lower_left_arm: f32,
    pub lower_right_arm: f32,
    pub upper_left_leg: f32,
    pub upper_right_leg: f32,
    pub lower_left_leg: f32,
    pub lower_right_leg: f32,
}
