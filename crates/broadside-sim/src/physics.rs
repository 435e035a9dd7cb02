//! Kinematic physics scene.
//!
//! Captured from the world once per tick, before any ship mutates itself,
//! so every contact and sensor query of a tick sees the same previous-tick
//! state. Doubles as the ship registry: ships are found by id, and the
//! player ship by team, through the scene rather than by walking the world.

use glam::DVec2;

use broadside_core::body::{CastHit, LayerMask, PhysicsQuery};
use broadside_core::enums::Team;
use broadside_core::types::{rotate, Pose, ShipId};
use hecs::World;

use crate::components::Body;
use crate::ship::ShipState;

/// Published state of one hull.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Collider {
    pub ship: ShipId,
    pub team: Team,
    pub pose: Pose,
    pub velocity: DVec2,
    pub radius: f64,
    pub layer: LayerMask,
}

#[derive(Debug, Clone, Default)]
pub struct PhysicsScene {
    colliders: Vec<Collider>,
}

impl PhysicsScene {
    /// Snapshot every ship body in the world, ordered by id.
    pub fn capture(world: &World) -> Self {
        let mut colliders: Vec<Collider> = world
            .query::<(&ShipId, &Pose, &Body, &ShipState)>()
            .iter()
            .map(|(_, (id, pose, body, ship))| Collider {
                ship: *id,
                team: ship.team(),
                pose: *pose,
                velocity: body.linear_velocity,
                radius: body.radius,
                layer: body.layer,
            })
            .collect();
        colliders.sort_by_key(|c| c.ship);
        Self { colliders }
    }

    pub fn from_colliders(mut colliders: Vec<Collider>) -> Self {
        colliders.sort_by_key(|c| c.ship);
        Self { colliders }
    }

    pub fn colliders(&self) -> &[Collider] {
        &self.colliders
    }

    pub fn get(&self, ship: ShipId) -> Option<&Collider> {
        self.colliders.iter().find(|c| c.ship == ship)
    }

    /// The player's ship, if afloat.
    pub fn player(&self) -> Option<&Collider> {
        self.colliders.iter().find(|c| c.team == Team::Player)
    }

    /// Every pair of hulls currently overlapping, lower id first.
    pub fn overlapping_pairs(&self) -> Vec<(ShipId, ShipId)> {
        let mut pairs = Vec::new();
        for (i, a) in self.colliders.iter().enumerate() {
            for b in &self.colliders[i + 1..] {
                let reach = a.radius + b.radius;
                if a.pose.position.distance_squared(b.pose.position) < reach * reach {
                    pairs.push((a.ship, b.ship));
                }
            }
        }
        pairs
    }
}

impl PhysicsQuery for PhysicsScene {
    fn ray_cast_all(
        &self,
        origin: DVec2,
        direction: DVec2,
        max_distance: f64,
        layers: LayerMask,
    ) -> Vec<CastHit> {
        let Some(direction) = direction.try_normalize() else {
            return Vec::new();
        };
        self.colliders
            .iter()
            .filter(|c| layers.contains(c.layer))
            .filter_map(|c| {
                ray_circle(origin, direction, c.pose.position, c.radius)
                    .filter(|distance| *distance <= max_distance)
                    .map(|distance| CastHit {
                        distance,
                        ship: Some(c.ship),
                    })
            })
            .collect()
    }

    fn box_cast_all(
        &self,
        origin: DVec2,
        size: DVec2,
        angle: f64,
        direction: DVec2,
        max_distance: f64,
        layers: LayerMask,
    ) -> Vec<CastHit> {
        let Some(direction) = direction.try_normalize() else {
            return Vec::new();
        };
        // Work in the box frame, where the box is axis aligned.
        let local_dir = rotate(direction, -angle);
        let half = size * 0.5;
        self.colliders
            .iter()
            .filter(|c| layers.contains(c.layer))
            .filter_map(|c| {
                let local_center = rotate(c.pose.position - origin, -angle);
                // Box swept against a circle: the box grown by the radius.
                // Corners are treated as square.
                let extent = half + DVec2::splat(c.radius);
                ray_aabb(local_dir, local_center - extent, local_center + extent)
                    .filter(|distance| *distance <= max_distance)
                    .map(|distance| CastHit {
                        distance,
                        ship: Some(c.ship),
                    })
            })
            .collect()
    }
}

/// Distance along a unit ray to a circle. Zero when the ray starts inside.
fn ray_circle(origin: DVec2, direction: DVec2, center: DVec2, radius: f64) -> Option<f64> {
    let offset = origin - center;
    let c = offset.length_squared() - radius * radius;
    if c <= 0.0 {
        return Some(0.0);
    }
    let b = offset.dot(direction);
    if b > 0.0 {
        return None;
    }
    let discriminant = b * b - c;
    if discriminant < 0.0 {
        return None;
    }
    Some(-b - discriminant.sqrt())
}

/// Slab test of a unit ray from the origin against an axis-aligned box.
fn ray_aabb(direction: DVec2, min: DVec2, max: DVec2) -> Option<f64> {
    let mut t_enter = f64::NEG_INFINITY;
    let mut t_exit = f64::INFINITY;
    for axis in 0..2 {
        let (d, lo, hi) = (direction[axis], min[axis], max[axis]);
        if d.abs() < 1e-12 {
            if lo > 0.0 || hi < 0.0 {
                return None;
            }
            continue;
        }
        let (t0, t1) = (lo / d, hi / d);
        t_enter = t_enter.max(t0.min(t1));
        t_exit = t_exit.min(t0.max(t1));
    }
    if t_enter > t_exit || t_exit < 0.0 {
        return None;
    }
    Some(t_enter.max(0.0))
}
