//! Contracts of the physical body integrator.
//!
//! The simulation core never moves bodies itself: it writes velocity
//! commands through [`PhysicalBody`] and senses the world through
//! [`PhysicsQuery`]. The sim crate ships a kinematic implementation.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use crate::types::ShipId;

/// Collision layer bit set.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const SHIPS: LayerMask = LayerMask(1 << 0);
    pub const TERRAIN: LayerMask = LayerMask(1 << 1);

    pub fn contains(self, other: LayerMask) -> bool {
        self.0 & other.0 != 0
    }
}

/// One result of a ray or box cast.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CastHit {
    /// Distance travelled along the cast direction before contact.
    pub distance: f64,
    /// Ship owning the hit collider, if the collider belongs to a ship.
    pub ship: Option<ShipId>,
}

/// Velocity sink of a single body.
pub trait PhysicalBody {
    fn set_linear_velocity(&mut self, velocity: DVec2);

    /// Degrees per second, counter-clockwise positive.
    fn set_angular_velocity(&mut self, degrees_per_sec: f64);
}

/// Scene queries answered by the physics world.
pub trait PhysicsQuery {
    /// Every collider on `layers` crossed by the ray, in no particular order.
    fn ray_cast_all(
        &self,
        origin: DVec2,
        direction: DVec2,
        max_distance: f64,
        layers: LayerMask,
    ) -> Vec<CastHit>;

    /// Every collider on `layers` touched by a box of `size` (width, depth)
    /// rotated by `angle` degrees and swept from `origin` along `direction`.
    fn box_cast_all(
        &self,
        origin: DVec2,
        size: DVec2,
        angle: f64,
        direction: DVec2,
        max_distance: f64,
        layers: LayerMask,
    ) -> Vec<CastHit>;
}
