//! Fundamental geometric and simulation types.
//!
//! Rotations are degrees, counter-clockwise positive. A ship with rotation
//! 0 faces +y ("up") with its starboard side toward +x.

use glam::DVec2;
use serde::{Deserialize, Serialize};

/// Stable identifier of a ship for cross-entity lookups.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct ShipId(pub u64);

/// Position and orientation of a body.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Pose {
    pub position: DVec2,
    /// Degrees, counter-clockwise positive.
    pub rotation: f64,
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Current tick number (increments by 1 each tick).
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl Pose {
    pub fn new(position: DVec2, rotation: f64) -> Self {
        Self { position, rotation }
    }

    /// Unit vector the bow points along.
    pub fn heading(&self) -> DVec2 {
        heading(self.rotation)
    }

    /// Unit vector toward the starboard side.
    pub fn starboard(&self) -> DVec2 {
        starboard(self.rotation)
    }
}

impl SimTime {
    /// Seconds per tick at the default tick rate.
    pub fn dt(&self) -> f64 {
        crate::constants::DT
    }

    /// Advance by one tick.
    pub fn advance(&mut self) {
        self.tick += 1;
        self.elapsed_secs += self.dt();
    }
}

/// Bow direction for a rotation in degrees.
pub fn heading(rotation: f64) -> DVec2 {
    let r = rotation.to_radians();
    DVec2::new(-r.sin(), r.cos())
}

/// Starboard direction for a rotation in degrees.
pub fn starboard(rotation: f64) -> DVec2 {
    let r = rotation.to_radians();
    DVec2::new(r.cos(), r.sin())
}

/// Signed angle in degrees from `from` to `to`, counter-clockwise positive,
/// in (-180, 180]. Zero when either vector is zero.
pub fn signed_angle(from: DVec2, to: DVec2) -> f64 {
    if from == DVec2::ZERO || to == DVec2::ZERO {
        return 0.0;
    }
    from.perp_dot(to).atan2(from.dot(to)).to_degrees()
}

/// Unsigned angle in degrees between two vectors, in [0, 180].
pub fn unsigned_angle(from: DVec2, to: DVec2) -> f64 {
    signed_angle(from, to).abs()
}

/// Rotate a vector counter-clockwise by `degrees`.
pub fn rotate(v: DVec2, degrees: f64) -> DVec2 {
    let (sin, cos) = degrees.to_radians().sin_cos();
    DVec2::new(v.x * cos - v.y * sin, v.x * sin + v.y * cos)
}
