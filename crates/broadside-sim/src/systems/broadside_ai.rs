//! Broadside AI system: runs the decision loop of every autonomous ship.
//!
//! Targets and sensor sweeps read the scene captured at the start of the
//! tick, never state another ship has already changed this tick.

use hecs::World;

use broadside_ai::{BroadsideAi, BroadsideContext, TargetInfo};
use broadside_core::enums::Side;
use broadside_core::types::{Pose, ShipId};

use crate::firing_arc::{side_ready, FiringArcs};
use crate::physics::PhysicsScene;
use crate::ship::ShipState;

pub fn run(world: &mut World, scene: &PhysicsScene, paused: bool, dt: f64) {
    let target = scene.player().map(|player| TargetInfo {
        id: player.ship,
        position: player.pose.position,
    });

    for (_entity, (id, pose, ship, ai, arcs)) in world.query_mut::<(
        &ShipId,
        &Pose,
        &mut ShipState,
        &mut BroadsideAi,
        Option<&FiringArcs>,
    )>() {
        let ctx = BroadsideContext {
            ship: *id,
            pose: *pose,
            speed: ship.modified_velocity(),
            crew_health: ship.crew_health(),
            paused,
            target,
            left_arc_ready: side_ready(arcs, Side::Left),
            right_arc_ready: side_ready(arcs, Side::Right),
            dt,
        };
        ai.update(&ctx, scene, ship);
    }
}
