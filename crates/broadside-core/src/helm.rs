//! The discrete command surface of a ship.
//!
//! Human input and the broadside AI both steer a ship exclusively through
//! [`Helm`], so either driver can take the wheel of any ship.

use serde::{Deserialize, Serialize};

/// One discrete step command.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HelmOrder {
    OpenSail,
    CloseSail,
    SteerRight,
    SteerLeft,
}

/// Who issued an order. Only a helmsman's key press sounds the rudder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum OrderSource {
    Autopilot,
    Helmsman { key_down: bool },
}

/// Bounds of a ship's sail and rudder state.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct HelmLimits {
    pub sails_open_min: i32,
    pub sails_open_max: i32,
    pub rudder_min: f64,
    pub rudder_max: f64,
}

/// Steer-and-sail capability of a ship.
pub trait Helm {
    fn limits(&self) -> HelmLimits;

    /// Number of sails currently set.
    fn sails_open(&self) -> i32;

    /// Rudder position with the dead zone applied.
    fn rudder_position(&self) -> f64;

    /// Apply one step. Returns false, leaving state untouched, when the
    /// step would leave the allowed range.
    fn execute(&mut self, order: HelmOrder, source: OrderSource, dt: f64) -> bool;
}
