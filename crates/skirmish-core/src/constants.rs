//! Simulation constants and default tuning parameters.
//!
//! Speeds are in world units per second and timers in seconds. Gameplay was
//! tuned against 60 Hz frames, so a per-frame step of 0.1 becomes 6.0 here.

/// Fixed simulation tick rate used by the app host (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the fixed tick rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

/// A countdown is considered expired once its remaining time drops below this.
/// Absorbs f32 accumulation error so that a 3 s fuse at 60 Hz fires on tick 180.
pub const TIMER_EPSILON: f32 = 1e-4;

// --- Player ---

/// Spawn position of the player (box center sits one unit above the plane).
pub const PLAYER_START: [f32; 3] = [0.0, 1.0, 0.0];

/// Height at which the player stands when grounded.
pub const GROUND_HEIGHT: f32 = 1.0;

/// Forward/strafe speed.
pub const PLAYER_MOVE_SPEED: f32 = 6.0;

/// Yaw rate while a turn key is held (rad/s).
pub const PLAYER_TURN_SPEED: f32 = 3.0;

/// Initial vertical velocity of a jump.
pub const PLAYER_JUMP_SPEED: f32 = 8.0;

/// Downward acceleration applied while airborne.
pub const GRAVITY: f32 = 20.0;

/// Player hit points at session start.
pub const PLAYER_MAX_HEALTH: u32 = 10;

// --- Bullets ---

/// Bullet speed (one unit per 60 Hz frame).
pub const BULLET_SPEED: f32 = 60.0;

/// Any bullet coordinate beyond this magnitude retires the bullet.
pub const WORLD_BOUND: f32 = 100.0;

// --- Ordnance ---

/// Time between a bomb drop and its detonation.
pub const BOMB_FUSE_SECS: f32 = 3.0;

/// How long an explosion lingers after detonation.
pub const EXPLOSION_LIFETIME_SECS: f32 = 1.0;

// --- Enemies ---

/// Hit points of a freshly spawned enemy.
pub const ENEMY_MAX_HP: u32 = 3;

/// Pursuit speed (0.02 per 60 Hz frame).
pub const ENEMY_SPEED: f32 = 1.2;

/// Interval between spawns.
pub const ENEMY_SPAWN_INTERVAL_SECS: f32 = 5.0;

/// Half-extent of the square enemies spawn in (the 4x4 grid of 50-unit tiles).
pub const ENEMY_SPAWN_HALF_EXTENT: f32 = 100.0;

/// Spawn height (enemy cubes are 3 units tall).
pub const ENEMY_SPAWN_HEIGHT: f32 = 1.5;

/// Duration of the red hit flash.
pub const ENEMY_HIT_FLASH_SECS: f32 = 0.1;

// --- Combat ---

/// Bullet-to-enemy distance below which the bullet hits.
pub const HIT_RADIUS: f32 = 1.5;

/// Enemy-to-player distance below which the player takes contact damage.
pub const CONTACT_RADIUS: f32 = 2.0;

/// Health removed from the player per contact.
pub const CONTACT_DAMAGE: u32 = 1;

/// Distance an enemy is shoved away from the player after contact.
pub const PUSH_BACK_DISTANCE: f32 = 1.0;

/// Damage one bullet deals.
pub const BULLET_DAMAGE: u32 = 1;

// --- Presentation ---

/// Camera offset behind and above the player, rotated by yaw.
pub const CAMERA_OFFSET: [f32; 3] = [0.0, 3.0, 5.0];

/// Limb swing frequency (rad/s).
pub const LIMB_SWING_SPEED: f32 = 6.0;

/// Upper arm/leg swing amplitude (rad).
pub const LIMB_SWING_AMPLITUDE: f32 = 0.8;

/// Lower arm/leg swing amplitude (rad).
pub const LOWER_LIMB_SWING_AMPLITUDE: f32 = 0.5;

/// Torso tilt amplitude (rad).
pub const TORSO_TILT_AMPLITUDE: f32 = 0.05;
