//! Per-ship tuning parameters.
//!
//! Every field has a default taken from `constants`, so a partial JSON
//! object deserializes into a complete config.

use serde::{Deserialize, Serialize};

use crate::constants::*;

/// Propulsion, steering, health and collision tuning for one ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ShipConfig {
    pub invincible: bool,
    pub sails_open_min: i32,
    pub sails_open_max: i32,
    pub speed_up_rate: f64,
    pub brake_rate: f64,
    pub rudder_min: f64,
    pub rudder_max: f64,
    pub steering_speed: f64,
    pub rudder_dead_zone: f64,
    pub max_hull_health: f64,
    pub max_crew_health: f64,
    pub speed_modifier: f64,
    /// Half-angle of the ramming sector (degrees).
    pub collision_front_angle: f64,
    pub max_collision_damage: f64,
    pub min_speed_for_collision_damage: f64,
    pub hull_health_speed_dead_zone: f64,
    /// Hull damage per second (leaks, fire). Ignored below 0.01.
    pub damage_over_time: f64,
    pub hull_radius: f64,
}

/// Broadside battery configuration, shared by both sides of a ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FiringArcConfig {
    pub cannon_count: u32,
    /// Reload time after a broadside (seconds).
    pub ready_up_time: f64,
}

impl Default for ShipConfig {
    fn default() -> Self {
        Self {
            invincible: false,
            sails_open_min: SAILS_OPEN_MIN,
            sails_open_max: SAILS_OPEN_MAX,
            speed_up_rate: SPEED_UP_RATE,
            brake_rate: BRAKE_RATE,
            rudder_min: RUDDER_MIN,
            rudder_max: RUDDER_MAX,
            steering_speed: STEERING_SPEED,
            rudder_dead_zone: RUDDER_DEAD_ZONE,
            max_hull_health: MAX_HULL_HEALTH,
            max_crew_health: MAX_CREW_HEALTH,
            speed_modifier: SPEED_MODIFIER,
            collision_front_angle: COLLISION_FRONT_ANGLE,
            max_collision_damage: MAX_COLLISION_DAMAGE,
            min_speed_for_collision_damage: MIN_SPEED_FOR_COLLISION_DAMAGE,
            hull_health_speed_dead_zone: HULL_HEALTH_SPEED_DEAD_ZONE,
            damage_over_time: 0.0,
            hull_radius: HULL_RADIUS,
        }
    }
}

impl Default for FiringArcConfig {
    fn default() -> Self {
        Self {
            cannon_count: CANNON_COUNT,
            ready_up_time: READY_UP_TIME,
        }
    }
}

impl ShipConfig {
    /// Check the ranges the ship state machine relies on.
    pub fn validate(&self) -> Result<(), String> {
        if self.sails_open_min > self.sails_open_max {
            return Err(format!(
                "sails_open_min ({}) exceeds sails_open_max ({})",
                self.sails_open_min, self.sails_open_max
            ));
        }
        if self.sails_open_max <= 0 {
            return Err("sails_open_max must be positive".to_string());
        }
        if self.rudder_min > 0.0 || self.rudder_max < 0.0 {
            return Err(format!(
                "rudder range [{}, {}] must contain zero",
                self.rudder_min, self.rudder_max
            ));
        }
        if self.max_hull_health <= 0.0 || self.max_crew_health <= 0.0 {
            return Err("max health values must be positive".to_string());
        }
        if self.collision_front_angle <= 0.0 {
            return Err("collision_front_angle must be positive".to_string());
        }
        let rates = [
            ("speed_up_rate", self.speed_up_rate),
            ("brake_rate", self.brake_rate),
            ("steering_speed", self.steering_speed),
            ("rudder_dead_zone", self.rudder_dead_zone),
            ("damage_over_time", self.damage_over_time),
            ("hull_radius", self.hull_radius),
        ];
        for (name, value) in rates {
            if value < 0.0 || !value.is_finite() {
                return Err(format!("{name} must be a non-negative number, got {value}"));
            }
        }
        Ok(())
    }
}

impl FiringArcConfig {
    pub fn validate(&self) -> Result<(), String> {
        if self.ready_up_time < 0.0 || !self.ready_up_time.is_finite() {
            return Err(format!(
                "ready_up_time must be a non-negative number, got {}",
                self.ready_up_time
            ));
        }
        Ok(())
    }
}
