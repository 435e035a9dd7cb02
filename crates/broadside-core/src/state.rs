//! Game state snapshot: the complete visible state handed to the
//! presentation layer after each tick.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{AudioEvent, GameEvent};
use crate::types::{ShipId, SimTime};

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GameStateSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub ships: Vec<ShipView>,
    pub audio_events: Vec<AudioEvent>,
    pub events: Vec<GameEvent>,
}

/// Normalized health ratios for the health-bar display, each in [0, 1].
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct HealthBars {
    pub hull: f64,
    pub crew: f64,
}

/// One ship as seen by the display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipView {
    pub id: ShipId,
    pub team: Team,
    pub position: DVec2,
    /// Degrees, counter-clockwise positive.
    pub rotation: f64,
    /// Speed after speed modifier and hull throttling.
    pub speed: f64,
    pub sails_open: i32,
    /// Dead-zoned rudder deflection.
    pub rudder: f64,
    pub hull_health: f64,
    pub crew_health: f64,
    pub bars: HealthBars,
    pub left_arc_ready: bool,
    pub right_arc_ready: bool,
}

impl GameStateSnapshot {
    /// The player's ship, if it is still afloat.
    pub fn player(&self) -> Option<&ShipView> {
        self.ships.iter().find(|s| s.team == Team::Player)
    }

    pub fn enemies(&self) -> impl Iterator<Item = &ShipView> {
        self.ships.iter().filter(|s| s.team == Team::Enemy)
    }
}
