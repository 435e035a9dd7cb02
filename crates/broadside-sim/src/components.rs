//! ECS components owned by the simulation crate.
//!
//! A ship entity carries `ShipId`, `Pose`, `Body`, `ShipState` and usually
//! `FiringArcs`; autonomous ships add a `BroadsideAi`.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use broadside_core::body::{LayerMask, PhysicalBody};

/// Kinematic rigid body. Velocities are written by the ship each tick and
/// integrated by the movement system.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub linear_velocity: DVec2,
    /// Degrees per second, counter-clockwise positive.
    pub angular_velocity: f64,
    /// Radius of the circular hull collider.
    pub radius: f64,
    pub layer: LayerMask,
}

impl Body {
    pub fn ship(radius: f64) -> Self {
        Self {
            linear_velocity: DVec2::ZERO,
            angular_velocity: 0.0,
            radius,
            layer: LayerMask::SHIPS,
        }
    }
}

impl PhysicalBody for Body {
    fn set_linear_velocity(&mut self, velocity: DVec2) {
        self.linear_velocity = velocity;
    }

    fn set_angular_velocity(&mut self, degrees_per_sec: f64) {
        self.angular_velocity = degrees_per_sec;
    }
}
