//! Kinematic integration system.
//!
//! Moves each pose by its body's velocities: position += v * dt and
//! rotation += ω * dt, kept in [0, 360).

use hecs::World;

use broadside_core::types::Pose;

use crate::components::Body;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, (pose, body)) in world.query_mut::<(&mut Pose, &Body)>() {
        pose.position += body.linear_velocity * dt;
        pose.rotation = (pose.rotation + body.angular_velocity * dt).rem_euclid(360.0);
    }
}
