//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Top-level session state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum SessionPhase {
    #[default]
    Active,
    Paused,
}

/// Vertical motion state of the player.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MotionState {
    /// Standing on the ground; a jump is allowed.
    #[default]
    Grounded,
    /// In the air after a jump; lands when back at ground height.
    Airborne,
}

/// Keys the simulation understands. Everything else is ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Key {
    Forward,
    Back,
    StrafeLeft,
    StrafeRight,
    TurnLeft,
    TurnRight,
    Jump,
    DropBomb,
}

impl Key {
    /// Map a DOM `KeyboardEvent.code` to a key. Unknown codes yield `None`.
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "KeyW" => Some(Self::Forward),
            "KeyS" => Some(Self::Back),
            "KeyQ" => Some(Self::StrafeLeft),
            "KeyE" => Some(Self::StrafeRight),
            "KeyA" => Some(Self::TurnLeft),
            "KeyD" => Some(Self::TurnRight),
            "Space" => Some(Self::Jump),
            "KeyB" => Some(Self::DropBomb),
            _ => None,
        }
    }
}
