//! Process-wide session state carried across scenes.
//!
//! Holds the global pause flag and the player's ship condition between
//! battles. The engine owns one instance; the player ship imports it on
//! spawn and exports back to it when the scene is left.

use serde::{Deserialize, Serialize};

use crate::constants::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionState {
    pub paused: bool,
    pub max_hull_health: f64,
    pub max_crew_health: f64,
    pub current_hull_health: f64,
    pub current_crew_health: f64,
    /// Cannons per broadside on the player ship.
    pub cannon_count: u32,
    /// Player broadside reload time (seconds).
    pub ready_up_time: f64,
}

impl Default for SessionState {
    fn default() -> Self {
        Self {
            paused: false,
            max_hull_health: MAX_HULL_HEALTH,
            max_crew_health: MAX_CREW_HEALTH,
            current_hull_health: MAX_HULL_HEALTH,
            current_crew_health: MAX_CREW_HEALTH,
            cannon_count: CANNON_COUNT,
            ready_up_time: READY_UP_TIME,
        }
    }
}

impl SessionState {
    pub fn is_unpaused(&self) -> bool {
        !self.paused
    }

    /// Maxima must be positive and current health within `[0, max]`.
    pub fn validate(&self) -> Result<(), String> {
        let stats = [
            ("hull", self.max_hull_health, self.current_hull_health),
            ("crew", self.max_crew_health, self.current_crew_health),
        ];
        for (name, max, current) in stats {
            if max <= 0.0 || !max.is_finite() {
                return Err(format!("max_{name}_health must be positive, got {max}"));
            }
            if !(0.0..=max).contains(&current) {
                return Err(format!(
                    "current_{name}_health must be within [0, {max}], got {current}"
                ));
            }
        }
        if self.ready_up_time < 0.0 || !self.ready_up_time.is_finite() {
            return Err(format!(
                "ready_up_time must be a non-negative number, got {}",
                self.ready_up_time
            ));
        }
        Ok(())
    }
}
