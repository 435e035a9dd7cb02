//! Contact system: detects hulls that started touching this tick, applies
//! collision damage to both sides, and pushes overlapping hulls apart.

use std::collections::{HashMap, HashSet};

use glam::DVec2;
use hecs::{Entity, World};

use broadside_core::body::LayerMask;
use broadside_core::events::GameEvent;
use broadside_core::types::{Pose, ShipId};

use crate::collision::{resolve_contact, CollisionInput};
use crate::physics::{Collider, PhysicsScene};
use crate::ship::ShipState;

/// Resolve contact-enter events against the previous tick's scene.
/// `touching` holds the pairs that were overlapping last tick.
pub fn run(
    world: &mut World,
    scene: &PhysicsScene,
    touching: &mut HashSet<(ShipId, ShipId)>,
    events: &mut Vec<GameEvent>,
) {
    let overlapping = scene.overlapping_pairs();
    let entered: Vec<(ShipId, ShipId)> = overlapping
        .iter()
        .filter(|pair| !touching.contains(pair))
        .copied()
        .collect();
    touching.clear();
    touching.extend(overlapping.iter().copied());

    if overlapping.is_empty() {
        return;
    }

    let entities: HashMap<ShipId, Entity> = world
        .query::<&ShipId>()
        .iter()
        .map(|(entity, id)| (*id, entity))
        .collect();

    for (a, b) in entered {
        let (Some(first), Some(second)) = (scene.get(a), scene.get(b)) else {
            continue;
        };
        for (own, other) in [(first, second), (second, first)] {
            if !LayerMask::SHIPS.contains(other.layer) {
                continue;
            }
            let Some(&entity) = entities.get(&own.ship) else {
                continue;
            };
            let Ok(mut ship) = world.get::<&mut ShipState>(entity) else {
                continue;
            };
            if let Some(report) = resolve_contact(&mut ship, &contact_input(own, other)) {
                events.push(GameEvent::Collision {
                    ship: own.ship,
                    other: other.ship,
                    damage: report.damage,
                });
            }
        }
    }

    separate(world, scene, &overlapping, &entities);
}

fn contact_input(own: &Collider, other: &Collider) -> CollisionInput {
    CollisionInput {
        own_position: own.pose.position,
        own_heading: own.pose.heading(),
        own_velocity: own.velocity,
        other_position: other.pose.position,
        other_velocity: other.velocity,
    }
}

/// Move each overlapping pair apart along the line between their centers
/// until the hulls just touch, splitting the correction evenly.
fn separate(
    world: &mut World,
    scene: &PhysicsScene,
    pairs: &[(ShipId, ShipId)],
    entities: &HashMap<ShipId, Entity>,
) {
    let mut shifts: Vec<(Entity, DVec2)> = Vec::new();

    for (a, b) in pairs {
        let (Some(first), Some(second)) = (scene.get(*a), scene.get(*b)) else {
            continue;
        };
        let offset = second.pose.position - first.pose.position;
        let normal = offset.try_normalize().unwrap_or(DVec2::X);
        let overlap = first.radius + second.radius - offset.length();
        if overlap <= 0.0 {
            continue;
        }
        if let Some(&entity) = entities.get(a) {
            shifts.push((entity, -normal * overlap * 0.5));
        }
        if let Some(&entity) = entities.get(b) {
            shifts.push((entity, normal * overlap * 0.5));
        }
    }

    for (entity, shift) in shifts {
        if let Ok(mut pose) = world.get::<&mut Pose>(entity) {
            pose.position += shift;
        }
    }
}
