//! ECS systems that operate on the simulation world each tick.
//!
//! Systems are pure functions that take `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components.

pub mod audio;
pub mod broadside_ai;
pub mod cleanup;
pub mod contacts;
pub mod firing_arcs;
pub mod helm;
pub mod movement;
pub mod propulsion;
pub mod snapshot;
