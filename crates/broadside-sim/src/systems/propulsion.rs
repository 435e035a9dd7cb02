//! Propulsion system: integrates sails and rudder into body velocities.

use hecs::World;

use broadside_core::types::Pose;

use crate::components::Body;
use crate::ship::ShipState;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pose, ship, body)) in world.query_mut::<(&Pose, &mut ShipState, &mut Body)>() {
        ship.integrate(dt, pose.rotation, body);
    }
}
