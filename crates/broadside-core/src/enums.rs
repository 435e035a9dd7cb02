//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Allegiance of a ship.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    Player,
    #[default]
    Enemy,
}

/// Side of the hull a firing arc covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    /// Port.
    Left,
    /// Starboard.
    Right,
}

/// What happened when a health stat reached zero.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeathOutcome {
    /// Enemy ship sunk; the entity is removed at cleanup.
    Destroyed,
    /// Player ship lost; handed to the game-over collaborator.
    Defeated,
    /// Invincible ship reached zero and stays afloat.
    Spared,
}

/// Audio clip requested by the simulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AudioCue {
    SetSails,
    StrikeSails,
    Rudder,
    Crash,
}

/// Mixer group an audio cue is routed through.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MixerGroup {
    Player,
    Enemy,
    Rudder,
}

/// Game phase (top-level state).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    #[default]
    Active,
    Paused,
    /// Player ship lost.
    Defeat,
    /// Every enemy ship sunk.
    Victory,
}

/// Scenario layouts available to the engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScenarioId {
    /// Player against a single enemy.
    #[default]
    Duel,
    /// Player against three enemies approaching from different bearings.
    Squadron,
}

impl Team {
    /// Mixer group used for this team's sail and crash cues.
    pub fn mixer_group(self) -> MixerGroup {
        match self {
            Team::Player => MixerGroup::Player,
            Team::Enemy => MixerGroup::Enemy,
        }
    }
}
