//! Simulation engine for SKIRMISH.
//!
//! Owns the player and the per-kind entity systems, runs them once per tick
//! and produces `GameStateSnapshot`s for the renderer. Completely headless.

pub mod engine;
pub mod input;
pub mod presentation;
pub mod replay;
pub mod systems;

pub use engine::{SimConfig, SimulationEngine};
pub use skirmish_core as core;

#[cfg(test)]
mod tests;
