//! SKIRMISH headless host.
//!
//! Runs the simulation on its own fixed-rate thread and exposes it through a
//! command channel and a shared latest-snapshot slot.

pub mod game_loop;
pub mod state;

pub use skirmish_core as core;
