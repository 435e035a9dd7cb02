//! Core types and definitions for the BROADSIDE simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! geometry helpers, tuning configs, collaborator traits, commands,
//! session state, snapshots, events, and constants.
//! It has no dependency on the ECS or any runtime framework.

pub mod body;
pub mod commands;
pub mod config;
pub mod constants;
pub mod enums;
pub mod events;
pub mod helm;
pub mod session;
pub mod state;
pub mod types;
