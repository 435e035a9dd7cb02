//! Scenario layouts: where the player and the enemy ships start.
//!
//! The player always starts at the origin facing up. Enemy placement is
//! drawn from the engine's seeded RNG, so the same seed gives the same
//! opening positions.

use glam::DVec2;
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use broadside_core::constants::ENEMY_SPAWN_RANGE;
use broadside_core::enums::ScenarioId;
use broadside_core::types::{rotate, Pose};

/// Opening positions of one battle.
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioLayout {
    pub player: Pose,
    pub enemies: Vec<Pose>,
}

pub fn build_layout(scenario: ScenarioId, rng: &mut ChaCha8Rng) -> ScenarioLayout {
    let enemies = match scenario {
        ScenarioId::Duel => build_duel(rng),
        ScenarioId::Squadron => build_squadron(rng),
    };
    ScenarioLayout {
        player: Pose::new(DVec2::ZERO, 0.0),
        enemies,
    }
}

/// Duel: one enemy anywhere on the spawn ring, roughly bow-on.
fn build_duel(rng: &mut ChaCha8Rng) -> Vec<Pose> {
    let bearing: f64 = rng.gen_range(0.0..360.0);
    vec![enemy_on_ring(rng, bearing, ENEMY_SPAWN_RANGE)]
}

/// Squadron: three enemies spread around the player, 120° apart with some
/// jitter, at slightly different ranges.
fn build_squadron(rng: &mut ChaCha8Rng) -> Vec<Pose> {
    let base: f64 = rng.gen_range(0.0..360.0);
    (0..3)
        .map(|i| {
            let bearing = base + i as f64 * 120.0 + rng.gen_range(-15.0..15.0);
            let range = rng.gen_range(ENEMY_SPAWN_RANGE..ENEMY_SPAWN_RANGE * 1.25);
            enemy_on_ring(rng, bearing, range)
        })
        .collect()
}

/// Enemy at `bearing` (degrees, counter-clockwise from up) and `range`,
/// heading toward the origin give or take 30°.
fn enemy_on_ring(rng: &mut ChaCha8Rng, bearing: f64, range: f64) -> Pose {
    let position = rotate(DVec2::Y, bearing) * range;
    let rotation = (bearing + 180.0 + rng.gen_range(-30.0..30.0)).rem_euclid(360.0);
    Pose::new(position, rotation)
}
