//! Raw input commands sent from the frontend to the simulation.
//!
//! Commands are queued and applied at the next tick boundary.

use serde::{Deserialize, Serialize};

/// All possible player actions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Keyboard ---
    /// A key was pressed. `code` is the DOM `KeyboardEvent.code`.
    KeyDown { code: String },
    /// A key was released.
    KeyUp { code: String },

    // --- Mouse ---
    /// Primary button pressed: fire one bullet.
    MouseDown,

    // --- Session control ---
    Pause,
    Resume,
}

impl PlayerCommand {
    pub fn key_down(code: impl Into<String>) -> Self {
        Self::KeyDown { code: code.into() }
    }

    pub fn key_up(code: impl Into<String>) -> Self {
        Self::KeyUp { code: code.into() }
    }
}
