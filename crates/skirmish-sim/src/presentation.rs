//! Renderer-facing values derived from simulation state.
//!
//! Nothing here feeds back into gameplay: the camera rig and the walk cycle
//! are pure functions of the authoritative player state and elapsed time.

use glam::{Quat, Vec3};

use skirmish_core::constants::*;
use skirmish_core::state::{CameraView, LimbPose};

/// Third-person camera trailing behind and above the player.
pub fn follow_camera(position: Vec3, yaw: f32) -> CameraView {
    let offset = Quat::from_rotation_y(yaw) * Vec3::from_array(CAMERA_OFFSET);
    CameraView {
        eye: position + offset,
        target: position,
    }
}

/// Walk-cycle limb rotations at `elapsed` seconds. Rest pose when idle.
pub fn limb_pose(elapsed: f64, is_moving: bool) -> LimbPose {
    if !is_moving {
        return LimbPose::default();
    }

    // Wrap before narrowing so long sessions keep full f32 precision.
    let phase = (elapsed * f64::from(LIMB_SWING_SPEED)).rem_euclid(std::f64::consts::TAU) as f32;
    let arm = phase.sin() * LIMB_SWING_AMPLITUDE;
    let leg = phase.cos() * LIMB_SWING_AMPLITUDE;
    let lower = phase.sin() * LOWER_LIMB_SWING_AMPLITUDE;

    LimbPose {
        torso_tilt: phase.sin() * TORSO_TILT_AMPLITUDE,
        upper_left_arm: arm,
        upper_right_arm: -arm,
        lower_left_arm: -lower,
        lower_right_arm: lower,
        upper_left_leg: -leg,
        upper_right_leg: leg,
        lower_left_leg: lower,
        lower_right_leg: -lower,
    }
}
