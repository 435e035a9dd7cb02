//! Snapshot system: queries the ECS world and builds a complete GameStateSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use broadside_core::enums::{GamePhase, Side};
use broadside_core::events::{AudioEvent, GameEvent};
use broadside_core::helm::Helm;
use broadside_core::state::{GameStateSnapshot, ShipView};
use broadside_core::types::{Pose, ShipId, SimTime};

use crate::firing_arc::{side_ready, FiringArcs};
use crate::ship::ShipState;

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    phase: GamePhase,
    audio_events: Vec<AudioEvent>,
    events: Vec<GameEvent>,
) -> GameStateSnapshot {
    GameStateSnapshot {
        time: *time,
        phase,
        ships: build_ships(world),
        audio_events,
        events,
    }
}

/// One view per ship, ordered by id.
fn build_ships(world: &World) -> Vec<ShipView> {
    let mut ships: Vec<ShipView> = world
        .query::<(&ShipId, &Pose, &ShipState, Option<&FiringArcs>)>()
        .iter()
        .map(|(_, (id, pose, ship, arcs))| ShipView {
            id: *id,
            team: ship.team(),
            position: pose.position,
            rotation: pose.rotation,
            speed: ship.modified_velocity(),
            sails_open: ship.sails_open(),
            rudder: ship.rudder_position(),
            hull_health: ship.hull_health(),
            crew_health: ship.crew_health(),
            bars: ship.health_bars(),
            left_arc_ready: side_ready(arcs, Side::Left),
            right_arc_ready: side_ready(arcs, Side::Right),
        })
        .collect();

    ships.sort_by_key(|s| s.id);
    ships
}
