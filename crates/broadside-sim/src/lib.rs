//! Simulation engine for BROADSIDE.
//!
//! Owns the hecs ECS world, runs ship systems at a fixed tick rate,
//! and produces GameStateSnapshots for the presentation layer.

pub mod collision;
pub mod components;
pub mod engine;
pub mod firing_arc;
pub mod physics;
pub mod scenario;
pub mod ship;
pub mod systems;
pub mod world_setup;

pub use broadside_core as core;
pub use engine::{SimConfig, SimulationEngine};
pub use ship::ShipState;

#[cfg(test)]
mod tests;
