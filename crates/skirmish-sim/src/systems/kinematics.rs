//! Player kinematics: walking, turning and the jump state machine.
//!
//! Pure function of (previous state, input, dt). No error conditions.

use glam::Vec3;

use skirmish_core::config::Tuning;
use skirmish_core::enums::MotionState;

use crate::input::InputState;

/// Authoritative player state.
#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    pub position: Vec3,
    /// Rotation about +Y in radians. Zero faces -Z.
    pub yaw: f32,
    pub vertical_velocity: f32,
    pub health: u32,
    pub motion: MotionState,
    /// Any movement key held. Animation flag only.
    pub is_moving: bool,
}

impl PlayerState {
    /// Fresh player standing at the configured start with full health.
    pub fn spawn(tuning: &Tuning) -> Self {
        Self {
            position: tuning.player_start,
            yaw: 0.0,
            vertical_velocity: 0.0,
            health: tuning.max_health,
            motion: MotionState::Grounded,
            is_moving: false,
        }
    }

    /// Unit vector the player faces (and fires along).
    pub fn forward(&self) -> Vec3 {
        forward_from_yaw(self.yaw)
    }

    pub fn is_airborne(&self) -> bool {
        self.motion == MotionState::Airborne
    }
}

pub fn forward_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(-yaw.sin(), 0.0, -yaw.cos())
}

pub fn right_from_yaw(yaw: f32) -> Vec3 {
    Vec3::new(yaw.cos(), 0.0, -yaw.sin())
}

/// Advance the player by one tick.
///
/// Turning is applied first so translation uses the updated facing.
/// Grounded -> Airborne on a jump edge; Airborne -> Grounded once the
/// integrated height is back at or below the ground.
pub fn advance(prev: &PlayerState, input: &InputState, dt: f32, tuning: &Tuning) -> PlayerState {
    let mut next = prev.clone();

    next.yaw += input.turn_axis() * tuning.turn_speed * dt;

    let step = tuning.move_speed * dt;
    let forward = forward_from_yaw(next.yaw) * (input.forward_axis() * step);
    let strafe = right_from_yaw(next.yaw) * (input.strafe_axis() * step);
    next.position += forward + strafe;

    if input.jump && next.motion == MotionState::Grounded {
        next.vertical_velocity = tuning.jump_speed;
        next.motion = MotionState::Airborne;
    }

    if next.motion == MotionState::Airborne {
        next.vertical_velocity -= tuning.gravity * dt;
        next.position.y += next.vertical_velocity * dt;

        if next.position.y <= tuning.ground_height {
            next.position.y = tuning.ground_height;
            next.vertical_velocity = 0.0;
            next.motion = MotionState::Grounded;
        }
    }

    next.is_moving = input.is_moving();
    next
}
