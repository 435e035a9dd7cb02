//! Sensor sweeps of the broadside AI.
//!
//! Two forward feelers watch for hulls about to be rammed; a wide box cast
//! tells whether the target already lies ahead.

use glam::DVec2;

use broadside_core::body::{CastHit, LayerMask, PhysicsQuery};
use broadside_core::types::{signed_angle, Pose, ShipId};

use crate::profile::BroadsideProfile;

/// Nearest foreign hull seen by each avoidance ray this tick.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct AvoidanceReading {
    /// Distance along the port feeler.
    pub left: Option<f64>,
    /// Distance along the starboard feeler.
    pub right: Option<f64>,
}

/// Geometry of the target relative to the ship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetObservation {
    /// Signed angle (degrees) from the starboard axis to the target.
    /// Magnitudes above 90 put the target on the port side.
    pub angle: f64,
    pub distance: f64,
}

impl AvoidanceReading {
    /// No threat on either side.
    pub fn is_clear(&self) -> bool {
        self.left.is_none() && self.right.is_none()
    }
}

/// Cast both feelers, each `avoidance_ray_offset` off the centerline and
/// `speed * look_ahead` long.
pub fn sense_avoidance<Q: PhysicsQuery + ?Sized>(
    query: &Q,
    own: ShipId,
    pose: &Pose,
    speed: f64,
    profile: &BroadsideProfile,
) -> AvoidanceReading {
    let heading = pose.heading();
    let offset = pose.starboard() * profile.avoidance_ray_offset;
    let length = speed * profile.collision_avoidance_look_ahead_range;

    let left_hits = query.ray_cast_all(pose.position - offset, heading, length, LayerMask::SHIPS);
    let right_hits = query.ray_cast_all(pose.position + offset, heading, length, LayerMask::SHIPS);

    AvoidanceReading {
        left: nearest_foreign_hull(&left_hits, own),
        right: nearest_foreign_hull(&right_hits, own),
    }
}

/// Closest hit belonging to a ship other than `own`.
fn nearest_foreign_hull(hits: &[CastHit], own: ShipId) -> Option<f64> {
    hits.iter()
        .filter(|hit| matches!(hit.ship, Some(id) if id != own))
        .map(|hit| hit.distance)
        .min_by(f64::total_cmp)
}

pub fn observe_target(pose: &Pose, target: DVec2) -> TargetObservation {
    let direction = target - pose.position;
    TargetObservation {
        angle: signed_angle(pose.starboard(), direction),
        distance: direction.length(),
    }
}

/// Whether the ship must still turn to bring the target onto its bow.
/// False once the forward box cast touches the target hull.
pub fn is_steering_needed<Q: PhysicsQuery + ?Sized>(
    query: &Q,
    pose: &Pose,
    target: ShipId,
    profile: &BroadsideProfile,
) -> bool {
    let size = DVec2::new(profile.keep_in_distance_raycast * 2.0, profile.box_cast_depth);
    let hits = query.box_cast_all(
        pose.position,
        size,
        pose.rotation,
        pose.heading(),
        profile.box_cast_range,
        LayerMask::SHIPS,
    );
    !hits.iter().any(|hit| hit.ship == Some(target))
}
