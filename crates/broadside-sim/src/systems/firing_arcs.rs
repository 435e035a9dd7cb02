//! Firing arc system: counts broadside reloads down.

use hecs::World;

use crate::firing_arc::FiringArcs;

pub fn run(world: &mut World, dt: f64) {
    for (_entity, arcs) in world.query_mut::<&mut FiringArcs>() {
        arcs.tick(dt);
    }
}
