//! Fundamental identifier and time types.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks advanced so far.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += f64::from(dt);
    }
}

macro_rules! entity_id {
    ($(#[$meta:meta])* $name:ident, $prefix:literal) => {
        $(#[$meta])*
        #[derive(
            Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
        )]
        #[serde(transparent)]
        pub struct $name(pub u32);

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, concat!($prefix, "#{}"), self.0)
            }
        }
    };
}

entity_id!(
    /// Identifier of a live bullet, unique within the projectile system.
    BulletId,
    "bullet"
);
entity_id!(
    /// Identifier of a bomb, unique within the ordnance system.
    BombId,
    "bomb"
);
entity_id!(
    /// Identifier of an explosion, unique within the ordnance system.
    ExplosionId,
    "explosion"
);
entity_id!(
    /// Identifier of an enemy, unique within the enemy system.
    EnemyId,
    "enemy"
);

/// Monotonic id allocator. Ids are never reused for the lifetime of the owner.
#[derive(Debug, Clone, Default)]
pub struct IdCounter {
    next: u32,
}

impl IdCounter {
    /// Hand out the next raw id.
    pub fn next_raw(&mut self) -> u32 {
        let id = self.next;
        self.next = self.next.wrapping_add(1);
        id
    }
}
