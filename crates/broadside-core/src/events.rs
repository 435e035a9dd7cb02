//! Events emitted by the simulation for audio and game-flow collaborators.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::ShipId;

/// Fire-and-forget request to the audio collaborator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AudioEvent {
    pub cue: AudioCue,
    pub group: MixerGroup,
    pub pitch_min: f64,
    pub pitch_max: f64,
}

/// Game-flow events for UI and external systems.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum GameEvent {
    /// Two hulls struck; `damage` is what `ship` took.
    Collision { ship: ShipId, other: ShipId, damage: f64 },
    /// Enemy ship sunk and removed.
    ShipDestroyed { ship: ShipId },
    /// Player ship lost.
    PlayerDefeated { ship: ShipId },
    /// Every enemy ship sunk.
    AllEnemiesSunk,
    /// A broadside was fired; projectiles belong to the weapons collaborator.
    BroadsideFired { ship: ShipId, side: Side, cannons: u32 },
}

impl AudioEvent {
    pub fn new(cue: AudioCue, group: MixerGroup, (pitch_min, pitch_max): (f64, f64)) -> Self {
        Self {
            cue,
            group,
            pitch_min,
            pitch_max,
        }
    }
}
