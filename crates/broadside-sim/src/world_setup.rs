//! Entity spawn factories for setting up the simulation world.

use hecs::{Entity, World};

use broadside_ai::{BroadsideAi, BroadsideProfile};
use broadside_core::config::{FiringArcConfig, ShipConfig};
use broadside_core::enums::Team;
use broadside_core::helm::Helm;
use broadside_core::session::SessionState;
use broadside_core::types::{Pose, ShipId};

use crate::components::Body;
use crate::engine::SimConfig;
use crate::firing_arc::FiringArcs;
use crate::scenario::ScenarioLayout;
use crate::ship::ShipState;

/// Populate an empty world with the ships of `layout`. Ids are handed out
/// from `next_ship_id`, player first.
pub fn setup_scenario(
    world: &mut World,
    layout: &ScenarioLayout,
    config: &SimConfig,
    session: &SessionState,
    next_ship_id: &mut u64,
) {
    let player = allocate_id(next_ship_id);
    spawn_player(
        world,
        player,
        layout.player,
        &config.player_ship,
        &config.firing_arc,
        session,
    );
    for pose in &layout.enemies {
        let id = allocate_id(next_ship_id);
        spawn_enemy(world, id, *pose, &config.enemy_ship, &config.firing_arc, &config.ai);
    }
}

fn allocate_id(next_ship_id: &mut u64) -> ShipId {
    let id = ShipId(*next_ship_id);
    *next_ship_id += 1;
    id
}

/// Spawn the player's ship. Health and batteries come from the session.
pub fn spawn_player(
    world: &mut World,
    id: ShipId,
    pose: Pose,
    config: &ShipConfig,
    arc_config: &FiringArcConfig,
    session: &SessionState,
) -> Entity {
    let mut ship = ShipState::new(Team::Player, config.clone());
    ship.import_session(session);
    let mut arcs = FiringArcs::new(arc_config);
    arcs.import_session(session);

    log::info!(
        "player ship {} afloat at {:?} with hull {:.0}/{:.0}",
        id.0,
        pose.position,
        ship.hull_health(),
        ship.config().max_hull_health
    );
    world.spawn((id, pose, Body::ship(config.hull_radius), ship, arcs))
}

/// Spawn an autonomous enemy ship at full health.
pub fn spawn_enemy(
    world: &mut World,
    id: ShipId,
    pose: Pose,
    config: &ShipConfig,
    arc_config: &FiringArcConfig,
    profile: &BroadsideProfile,
) -> Entity {
    let ship = ShipState::new(Team::Enemy, config.clone());
    let ai = BroadsideAi::new(profile.clone(), ship.limits());

    log::info!("enemy ship {} afloat at {:?}", id.0, pose.position);
    world.spawn((
        id,
        pose,
        Body::ship(config.hull_radius),
        ship,
        FiringArcs::new(arc_config),
        ai,
    ))
}
