//! Current input state: held keys plus one-shot edges.
//!
//! Held keys persist across ticks. Edges (fire, drop bomb, jump) latch until
//! the engine clears them at the end of the tick that consumed them.

use skirmish_core::commands::PlayerCommand;
use skirmish_core::enums::Key;

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InputState {
    pub forward: bool,
    pub back: bool,
    pub strafe_left: bool,
    pub strafe_right: bool,
    pub turn_left: bool,
    pub turn_right: bool,

    /// Fire requested this tick.
    pub fire: bool,
    /// Bomb drop requested this tick.
    pub drop_bomb: bool,
    /// Jump requested this tick.
    pub jump: bool,

    // Physical state of the edge keys, so auto-repeat key-downs don't re-trigger.
    jump_held: bool,
    bomb_held: bool,
}

impl InputState {
    /// Fold one raw command into the state. Returns false if the command was
    /// ignored (unknown key code or a session-control command).
    pub fn apply(&mut self, command: &PlayerCommand) -> bool {
        match command {
            PlayerCommand::KeyDown { code } => match Key::from_code(code) {
                Some(key) => {
                    self.set_key(key, true);
                    true
                }
                None => false,
            },
            PlayerCommand::KeyUp { code } => match Key::from_code(code) {
                Some(key) => {
                    self.set_key(key, false);
                    true
                }
                None => false,
            },
            PlayerCommand::MouseDown => {
                self.fire = true;
                true
            }
            PlayerCommand::Pause | PlayerCommand::Resume => false,
        }
    }

    fn set_key(&mut self, key: Key, down: bool) {
        match key {
            Key::Forward => self.forward = down,
            Key::Back => self.back = down,
            Key::StrafeLeft => self.strafe_left = down,
            Key::StrafeRight => self.strafe_right = down,
            Key::TurnLeft => self.turn_left = down,
            Key::TurnRight => self.turn_right = down,
            Key::Jump => {
                if down && !self.jump_held {
                    self.jump = true;
                }
                self.jump_held = down;
            }
            Key::DropBomb => {
                if down && !self.bomb_held {
                    self.drop_bomb = true;
                }
                self.bomb_held = down;
            }
        }
    }

    /// +1 forward, -1 back, 0 when neither or both are held.
    pub fn forward_axis(&self) -> f32 {
        axis(self.forward, self.back)
    }

    /// +1 right, -1 left.
    pub fn strafe_axis(&self) -> f32 {
        axis(self.strafe_right, self.strafe_left)
    }

    /// +1 left (counter-clockwise seen from above), -1 right.
    pub fn turn_axis(&self) -> f32 {
        axis(self.turn_left, self.turn_right)
    }

    /// Any directional or rotational key held. Display flag only.
    pub fn is_moving(&self) -> bool {
        self.forward
            || self.back
            || self.strafe_left
            || self.strafe_right
            || self.turn_left
            || self.turn_right
    }

    /// Drop all latched edges. Held keys are untouched.
    pub fn clear_edges(&mut self) {
        self.fire = false;
        self.drop_bomb = false;
        self.jump = false;
    }
}

fn axis(positive: bool, negative: bool) -> f32 {
    match (positive, negative) {
        (true, false) => 1.0,
        (false, true) => -1.0,
        _ => 0.0,
    }
}
