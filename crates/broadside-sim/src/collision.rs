//! Ship-on-ship collision damage.
//!
//! Each party resolves its own damage from its own point of view; the two
//! results of one contact need not match.

use glam::DVec2;

use broadside_core::config::ShipConfig;
use broadside_core::enums::DeathOutcome;
use broadside_core::types::unsigned_angle;

use crate::ship::ShipState;

/// Geometry and motion of one contact, seen from the damaged ship.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CollisionInput {
    pub own_position: DVec2,
    pub own_heading: DVec2,
    pub own_velocity: DVec2,
    pub other_position: DVec2,
    pub other_velocity: DVec2,
}

/// Outcome of a contact that got past the crash cooldown.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CrashReport {
    pub damage: f64,
    pub death: Option<DeathOutcome>,
}

/// Hull damage for one contact.
///
/// A ram dead ahead adds the full `max_collision_damage`, fading linearly
/// to nothing at `collision_front_angle`. The closing speed adds a second
/// term normalized against twice the top sail speed.
pub fn collision_damage(input: &CollisionInput, config: &ShipConfig) -> f64 {
    let angle = unsigned_angle(input.own_heading, input.other_position - input.own_position);
    let front_factor = (1.0 - angle / config.collision_front_angle).max(0.0);
    let collision_modifier = config.max_collision_damage * front_factor;

    let velocity_delta = (input.other_velocity - input.own_velocity).length();
    let speed_damage = config.max_collision_damage
        * (velocity_delta + config.min_speed_for_collision_damage).max(0.0)
        / (config.sails_open_max as f64 * 2.0 + config.min_speed_for_collision_damage);

    collision_modifier + speed_damage
}

/// Apply a contact with another ship to `ship`. Returns `None` while the
/// crash cooldown from an earlier contact is still running.
pub fn resolve_contact(ship: &mut ShipState, input: &CollisionInput) -> Option<CrashReport> {
    if ship.crash_cooldown() > 0.0 {
        return None;
    }
    ship.start_crash_cooldown();

    let damage = collision_damage(input, ship.config());
    log::debug!("{:?} ship crashed for {damage:.2} damage", ship.team());
    ship.play_crash();
    let death = ship.change_hull_health(-damage);
    Some(CrashReport { damage, death })
}
