//! Tuning profile of the broadside AI.

use serde::{Deserialize, Serialize};

use broadside_core::constants::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BroadsideProfile {
    /// Range inside which the broadside counts as in distance.
    pub keep_in_distance: f64,
    /// Half-width of the forward box cast.
    pub keep_in_distance_raycast: f64,
    /// Tolerance around the beam, degrees.
    pub keep_in_sides_angle: f64,
    /// Avoidance ray length per unit of speed.
    pub collision_avoidance_look_ahead_range: f64,
    pub avoidance_change_cooldown: f64,
    pub avoidance_ray_offset: f64,
    pub steering_threshold: f64,
    pub box_cast_range: f64,
    pub box_cast_depth: f64,
    pub crew_alive_epsilon: f64,
}

impl Default for BroadsideProfile {
    fn default() -> Self {
        Self {
            keep_in_distance: KEEP_IN_DISTANCE,
            keep_in_distance_raycast: KEEP_IN_DISTANCE_RAYCAST,
            keep_in_sides_angle: KEEP_IN_SIDES_ANGLE,
            collision_avoidance_look_ahead_range: COLLISION_AVOIDANCE_LOOK_AHEAD_RANGE,
            avoidance_change_cooldown: AVOIDANCE_CHANGE_COOLDOWN,
            avoidance_ray_offset: AVOIDANCE_RAY_OFFSET,
            steering_threshold: STEERING_THRESHOLD,
            box_cast_range: BOX_CAST_RANGE,
            box_cast_depth: BOX_CAST_DEPTH,
            crew_alive_epsilon: CREW_ALIVE_EPSILON,
        }
    }
}

impl BroadsideProfile {
    pub fn validate(&self) -> Result<(), String> {
        if !(0.0..=90.0).contains(&self.keep_in_sides_angle) {
            return Err(format!(
                "keep_in_sides_angle must be within [0, 90], got {}",
                self.keep_in_sides_angle
            ));
        }
        let lengths = [
            ("keep_in_distance", self.keep_in_distance),
            ("keep_in_distance_raycast", self.keep_in_distance_raycast),
            (
                "collision_avoidance_look_ahead_range",
                self.collision_avoidance_look_ahead_range,
            ),
            ("avoidance_change_cooldown", self.avoidance_change_cooldown),
            ("avoidance_ray_offset", self.avoidance_ray_offset),
            ("steering_threshold", self.steering_threshold),
            ("box_cast_range", self.box_cast_range),
            ("box_cast_depth", self.box_cast_depth),
        ];
        for (name, value) in lengths {
            if value < 0.0 || !value.is_finite() {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        Ok(())
    }
}
