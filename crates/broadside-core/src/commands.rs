//! Player commands sent from the input layer to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

use crate::enums::Side;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    // --- Helm ---
    /// Set one more sail.
    OpenSail,
    /// Strike one sail.
    CloseSail,
    /// Move the rudder one step to starboard. `key_down` is true on the
    /// first frame of a key press and sounds the rudder.
    SteerRight { key_down: bool },
    /// Move the rudder one step to port.
    SteerLeft { key_down: bool },

    // --- Weapons ---
    FireBroadside { side: Side },

    // --- Simulation control ---
    Pause,
    Resume,
}
