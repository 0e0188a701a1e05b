//! Simulation systems advanced by the engine each tick.
//!
//! Each entity kind is owned by exactly one system. The combat resolver
//! borrows the projectile and enemy systems mutably for a single pass and
//! keeps nothing across ticks.

pub mod combat;
pub mod enemy;
pub mod kinematics;
pub mod ordnance;
pub mod projectile;
pub mod snapshot;
