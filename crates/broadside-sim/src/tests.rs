//! Tests for ship state, collisions, firing arcs, the physics scene and the engine.

use approx::assert_abs_diff_eq;
use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use test_log::test;

use broadside_core::body::{LayerMask, PhysicsQuery};
use broadside_core::commands::PlayerCommand;
use broadside_core::config::{FiringArcConfig, ShipConfig};
use broadside_core::enums::*;
use broadside_core::events::GameEvent;
use broadside_core::helm::{Helm, HelmOrder, OrderSource};
use broadside_core::session::SessionState;
use broadside_core::types::{rotate, Pose, ShipId};

use crate::collision::{collision_damage, resolve_contact, CollisionInput};
use crate::components::Body;
use crate::engine::{SimConfig, SimulationEngine};
use crate::firing_arc::{side_ready, FiringArc, FiringArcs};
use crate::physics::{Collider, PhysicsScene};
use crate::ship::ShipState;

const DT: f64 = 1.0 / 60.0;
const AUTOPILOT: OrderSource = OrderSource::Autopilot;

fn enemy() -> ShipState {
    ShipState::new(Team::Enemy, ShipConfig::default())
}

fn player() -> ShipState {
    ShipState::new(Team::Player, ShipConfig::default())
}

/// Integrate `ticks` ticks facing up.
fn run_ticks(ship: &mut ShipState, ticks: usize) -> Body {
    let mut body = Body::ship(0.75);
    for _ in 0..ticks {
        ship.integrate(DT, 0.0, &mut body);
    }
    body
}

// ---- Sails ----

#[test]
fn test_open_sail_three_times_then_reject() {
    let mut ship = player();
    assert_eq!(ship.sails_open(), 0);

    for expected in 1..=3 {
        assert!(ship.open_sail());
        assert_eq!(ship.sails_open(), expected);
    }
    assert!(!ship.open_sail(), "fourth sail must be rejected");
    assert_eq!(ship.sails_open(), 3);

    let cues = ship.take_audio_events();
    assert_eq!(cues.len(), 3, "rejected steps are silent");
    assert!(cues
        .iter()
        .all(|c| c.cue == AudioCue::SetSails && c.group == MixerGroup::Player));
    assert_eq!((cues[0].pitch_min, cues[0].pitch_max), (0.95, 1.05));
}

#[test]
fn test_close_sail_rejected_at_minimum() {
    let mut ship = enemy();
    assert!(!ship.close_sail());
    assert_eq!(ship.sails_open(), 0);
    assert!(ship.take_audio_events().is_empty());

    ship.open_sail();
    assert!(ship.close_sail());
    let cues = ship.take_audio_events();
    assert_eq!(cues.last().map(|c| c.cue), Some(AudioCue::StrikeSails));
    assert_eq!(cues.last().map(|c| c.group), Some(MixerGroup::Enemy));
}

// ---- Rudder ----

#[test]
fn test_rudder_never_leaves_range() {
    let mut ship = enemy();
    let mut accepted = 0;
    for _ in 0..200 {
        if ship.steer_right(DT, AUTOPILOT) {
            accepted += 1;
        }
    }
    assert!(accepted >= 59 && accepted <= 60, "accepted {accepted} steps");
    assert!(ship.raw_rudder() <= 30.0);
    assert!(ship.raw_rudder() >= 29.5);

    for _ in 0..400 {
        ship.steer_left(DT, AUTOPILOT);
    }
    assert!(ship.raw_rudder() >= -30.0);
    assert!(ship.raw_rudder() <= -29.5);
}

#[test]
fn test_rudder_dead_zone_reports_zero() {
    let mut ship = enemy();
    assert!(ship.steer_right(0.05, AUTOPILOT));
    assert_abs_diff_eq!(ship.raw_rudder(), 1.5, epsilon = 1e-9);
    assert_eq!(ship.rudder_position(), 0.0, "inside the dead zone");

    assert!(ship.steer_right(0.05, AUTOPILOT));
    assert_abs_diff_eq!(ship.rudder_position(), 3.0, epsilon = 1e-9);

    assert!(ship.steer_left(0.1, AUTOPILOT));
    assert!(ship.steer_left(0.05, AUTOPILOT));
    assert_abs_diff_eq!(ship.raw_rudder(), -1.5, epsilon = 1e-9);
    assert_eq!(ship.rudder_position(), 0.0);
}

#[test]
fn test_rudder_cue_only_on_player_key_down() {
    let mut ship = player();
    ship.steer_right(DT, OrderSource::Helmsman { key_down: false });
    ship.steer_right(DT, AUTOPILOT);
    assert!(ship.take_audio_events().is_empty());

    ship.steer_left(DT, OrderSource::Helmsman { key_down: true });
    let cues = ship.take_audio_events();
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].cue, AudioCue::Rudder);
    assert_eq!(cues[0].group, MixerGroup::Rudder);

    let mut foe = enemy();
    foe.steer_left(DT, OrderSource::Helmsman { key_down: true });
    assert!(foe.take_audio_events().is_empty());
}

#[test]
fn test_helm_execute_dispatches_orders() {
    let mut ship = enemy();
    assert!(ship.execute(HelmOrder::OpenSail, AUTOPILOT, DT));
    assert!(ship.execute(HelmOrder::SteerRight, AUTOPILOT, 0.1));
    assert_eq!(ship.sails_open(), 1);
    assert_abs_diff_eq!(ship.raw_rudder(), 3.0, epsilon = 1e-9);
    assert!(ship.execute(HelmOrder::CloseSail, AUTOPILOT, DT));
    assert!(!ship.execute(HelmOrder::CloseSail, AUTOPILOT, DT));

    let limits = ship.limits();
    assert_eq!(limits.sails_open_max, 3);
    assert_eq!(limits.rudder_min, -30.0);
}

// ---- Health ----

#[test]
fn test_hull_clamp_destroys_enemy() {
    let mut ship = enemy();
    let outcome = ship.change_hull_health(-1000.0);
    assert_eq!(ship.hull_health(), 0.0);
    assert_eq!(outcome, Some(DeathOutcome::Destroyed));
    assert_eq!(ship.death(), Some(DeathOutcome::Destroyed));
}

#[test]
fn test_hull_clamp_defeats_player() {
    let mut ship = player();
    assert_eq!(ship.change_hull_health(-1000.0), Some(DeathOutcome::Defeated));
    assert_eq!(ship.hull_health(), 0.0);
}

#[test]
fn test_invincible_enemy_is_spared() {
    let config = ShipConfig {
        invincible: true,
        ..Default::default()
    };
    let mut ship = ShipState::new(Team::Enemy, config);
    assert_eq!(ship.change_hull_health(-1000.0), Some(DeathOutcome::Spared));
    assert_eq!(ship.hull_health(), 0.0);
}

#[test]
fn test_healing_clamps_to_max() {
    let mut ship = enemy();
    ship.change_hull_health(-30.0);
    assert_eq!(ship.change_hull_health(1000.0), None);
    assert_eq!(ship.hull_health(), 100.0);
    ship.change_crew_health(1000.0);
    assert_eq!(ship.crew_health(), 50.0);
}

#[test]
fn test_near_zero_health_snaps_and_dies() {
    let mut ship = enemy();
    let outcome = ship.change_hull_health(-99.995);
    assert_eq!(ship.hull_health(), 0.0);
    assert_eq!(outcome, Some(DeathOutcome::Destroyed));
}

#[test]
fn test_crew_loss_sinks_enemy() {
    let mut ship = enemy();
    assert_eq!(ship.change_crew_health(-50.0), Some(DeathOutcome::Destroyed));
    assert_eq!(ship.crew_health(), 0.0);
    assert_eq!(ship.hull_health(), 100.0);
}

#[test]
fn test_health_bars_are_ratios() {
    let mut ship = enemy();
    ship.change_hull_health(-25.0);
    ship.change_crew_health(-10.0);
    let bars = ship.health_bars();
    assert_abs_diff_eq!(bars.hull, 0.75, epsilon = 1e-12);
    assert_abs_diff_eq!(bars.crew, 0.8, epsilon = 1e-12);
}

#[test]
fn test_randomized_state_invariants() {
    let mut rng = ChaCha8Rng::seed_from_u64(7);
    for team in [Team::Player, Team::Enemy] {
        let mut ship = ShipState::new(team, ShipConfig::default());
        let mut body = Body::ship(0.75);
        for _ in 0..5000 {
            match rng.gen_range(0..7) {
                0 => {
                    ship.open_sail();
                }
                1 => {
                    ship.close_sail();
                }
                2 => {
                    ship.steer_right(rng.gen_range(0.0..0.2), AUTOPILOT);
                }
                3 => {
                    ship.steer_left(rng.gen_range(0.0..0.2), AUTOPILOT);
                }
                4 => {
                    ship.change_hull_health(rng.gen_range(-300.0..300.0));
                }
                5 => {
                    ship.change_crew_health(rng.gen_range(-200.0..200.0));
                }
                _ => ship.integrate(DT, rng.gen_range(0.0..360.0), &mut body),
            }
            let c = ship.config();
            assert!((c.sails_open_min..=c.sails_open_max).contains(&ship.sails_open()));
            assert!(ship.raw_rudder() >= c.rudder_min && ship.raw_rudder() <= c.rudder_max);
            assert!(ship.hull_health() >= 0.0 && ship.hull_health() <= c.max_hull_health);
            assert!(ship.crew_health() >= 0.0 && ship.crew_health() <= c.max_crew_health);
            assert!(ship.current_velocity() >= 0.0);
            assert!(ship.current_velocity() <= c.sails_open_max as f64);
        }
    }
}

// ---- Propulsion ----

#[test]
fn test_velocity_approaches_sail_count_monotonically() {
    let mut ship = enemy();
    for _ in 0..3 {
        ship.open_sail();
    }

    let mut body = Body::ship(0.75);
    let mut last = ship.current_velocity();
    for _ in 0..120 {
        ship.integrate(DT, 0.0, &mut body);
        assert!(ship.current_velocity() >= last);
        assert!(ship.current_velocity() <= 3.0);
        last = ship.current_velocity();
    }
    assert_abs_diff_eq!(ship.current_velocity(), 3.0, epsilon = 1e-12);

    ship.close_sail();
    ship.close_sail();
    for _ in 0..240 {
        ship.integrate(DT, 0.0, &mut body);
        assert!(ship.current_velocity() <= last);
        assert!(ship.current_velocity() >= 1.0);
        last = ship.current_velocity();
    }
    assert_abs_diff_eq!(ship.current_velocity(), 1.0, epsilon = 1e-12);
}

#[test]
fn test_acceleration_scales_with_sail_count() {
    let mut one = enemy();
    one.open_sail();
    let mut three = enemy();
    for _ in 0..3 {
        three.open_sail();
    }
    run_ticks(&mut one, 1);
    run_ticks(&mut three, 1);
    assert_abs_diff_eq!(one.current_velocity(), DT, epsilon = 1e-12);
    assert_abs_diff_eq!(three.current_velocity(), 3.0 * DT, epsilon = 1e-12);
}

#[test]
fn test_velocity_written_along_heading() {
    let mut ship = enemy();
    ship.open_sail();
    let mut body = Body::ship(0.75);
    for _ in 0..120 {
        ship.integrate(DT, 90.0, &mut body);
    }
    assert_abs_diff_eq!(body.linear_velocity.x, -1.0, epsilon = 1e-9);
    assert_abs_diff_eq!(body.linear_velocity.y, 0.0, epsilon = 1e-9);
}

#[test]
fn test_stationary_ship_cannot_turn() {
    let mut ship = enemy();
    ship.steer_right(0.5, AUTOPILOT);
    let body = run_ticks(&mut ship, 10);
    assert_eq!(body.angular_velocity, 0.0);
}

#[test]
fn test_starboard_rudder_turns_clockwise() {
    let mut ship = enemy();
    for _ in 0..3 {
        ship.open_sail();
    }
    ship.steer_right(0.5, AUTOPILOT);
    let body = run_ticks(&mut ship, 120);
    // -15 / 3 * 3
    assert_abs_diff_eq!(body.angular_velocity, -15.0, epsilon = 1e-9);
}

#[test]
fn test_hull_damage_throttles_speed() {
    let mut ship = enemy();
    for _ in 0..3 {
        ship.open_sail();
    }
    run_ticks(&mut ship, 120);
    assert_abs_diff_eq!(ship.modified_velocity(), 3.0, epsilon = 1e-12);

    ship.change_hull_health(-15.0);
    assert_abs_diff_eq!(ship.modified_velocity(), 3.0, epsilon = 1e-12);

    ship.change_hull_health(-35.0);
    assert_abs_diff_eq!(ship.modified_velocity(), 3.0 * 0.7, epsilon = 1e-12);
}

#[test]
fn test_damage_over_time_drains_hull() {
    let config = ShipConfig {
        damage_over_time: 6.0,
        ..Default::default()
    };
    let mut ship = ShipState::new(Team::Enemy, config);
    run_ticks(&mut ship, 60);
    assert_abs_diff_eq!(ship.hull_health(), 94.0, epsilon = 1e-9);

    let trickle = ShipConfig {
        damage_over_time: 0.005,
        ..Default::default()
    };
    let mut ship = ShipState::new(Team::Enemy, trickle);
    run_ticks(&mut ship, 600);
    assert_eq!(ship.hull_health(), 100.0);
}

// ---- Session ----

#[test]
fn test_session_import_and_rounded_export() {
    let session = SessionState {
        max_hull_health: 120.0,
        current_hull_health: 73.4,
        current_crew_health: 40.6,
        ..Default::default()
    };
    let config = ShipConfig {
        invincible: true,
        ..Default::default()
    };
    let mut ship = ShipState::new(Team::Player, config);
    ship.import_session(&session);
    assert!(!ship.is_invincible());
    assert_eq!(ship.hull_health(), 73.4);
    assert_eq!(ship.config().max_hull_health, 120.0);

    let mut out = SessionState::default();
    ship.export_session(&mut out);
    assert_eq!(out.current_hull_health, 73.0);
    assert_eq!(out.current_crew_health, 41.0);
}

#[test]
fn test_session_import_of_sunk_ship_dies() {
    let session = SessionState {
        current_hull_health: 0.004,
        ..Default::default()
    };
    let mut ship = player();
    ship.import_session(&session);
    assert_eq!(ship.hull_health(), 0.0);
    assert_eq!(ship.death(), Some(DeathOutcome::Defeated));

    // A healthy import revives the ship for the next battle.
    ship.import_session(&SessionState::default());
    assert_eq!(ship.death(), None);
    assert_eq!(ship.hull_health(), 100.0);
}

// ---- Collisions ----

fn head_on(closing_own: f64, closing_other: f64) -> CollisionInput {
    CollisionInput {
        own_position: DVec2::ZERO,
        own_heading: DVec2::Y,
        own_velocity: DVec2::new(0.0, closing_own),
        other_position: DVec2::new(0.0, 1.5),
        other_velocity: DVec2::new(0.0, -closing_other),
    }
}

#[test]
fn test_head_on_collision_damage() {
    let config = ShipConfig::default();
    let damage = collision_damage(&head_on(2.0, 1.0), &config);
    let expected = 20.0 + 20.0 * (3.0 + 0.5) / (3.0 * 2.0 + 0.5);
    assert_abs_diff_eq!(damage, expected, epsilon = 1e-9);
}

#[test]
fn test_collision_damage_falls_off_with_angle() {
    let config = ShipConfig::default();
    let speed_term = 20.0 * 0.5 / 6.5;
    let damage_at = |angle: f64| {
        let input = CollisionInput {
            own_position: DVec2::ZERO,
            own_heading: DVec2::Y,
            own_velocity: DVec2::ZERO,
            other_position: rotate(DVec2::Y, angle) * 1.5,
            other_velocity: DVec2::ZERO,
        };
        collision_damage(&input, &config)
    };

    assert_abs_diff_eq!(damage_at(0.0), 20.0 + speed_term, epsilon = 1e-9);
    assert!(damage_at(10.0) < damage_at(0.0));
    assert!(damage_at(20.0) < damage_at(10.0));
    assert_abs_diff_eq!(damage_at(-15.0), damage_at(15.0), epsilon = 1e-9);
    assert_abs_diff_eq!(damage_at(30.0), speed_term, epsilon = 1e-9);
    assert_abs_diff_eq!(damage_at(120.0), speed_term, epsilon = 1e-9);
}

#[test]
fn test_crash_cooldown_blocks_repeat_damage() {
    let mut ship = enemy();
    let input = head_on(1.0, 1.0);

    let first = resolve_contact(&mut ship, &input).expect("first contact damages");
    assert_abs_diff_eq!(ship.hull_health(), 100.0 - first.damage, epsilon = 1e-9);
    assert_eq!(ship.crash_cooldown(), 2.5);
    let cues = ship.take_audio_events();
    assert_eq!(cues.len(), 1);
    assert_eq!(cues[0].cue, AudioCue::Crash);
    assert_eq!((cues[0].pitch_min, cues[0].pitch_max), (0.9, 1.1));

    run_ticks(&mut ship, 120);
    assert!(resolve_contact(&mut ship, &input).is_none());
    assert_abs_diff_eq!(ship.hull_health(), 100.0 - first.damage, epsilon = 1e-9);

    run_ticks(&mut ship, 40);
    assert_eq!(ship.crash_cooldown(), 0.0);
    assert!(resolve_contact(&mut ship, &input).is_some());
}

#[test]
fn test_fatal_collision_reports_death() {
    let config = ShipConfig {
        max_hull_health: 10.0,
        ..Default::default()
    };
    let mut ship = ShipState::new(Team::Enemy, config);
    let report = resolve_contact(&mut ship, &head_on(3.0, 3.0)).expect("contact");
    assert_eq!(report.death, Some(DeathOutcome::Destroyed));
}

// ---- Firing arcs ----

#[test]
fn test_firing_arc_reload_cycle() {
    let mut arc = FiringArc::new(Side::Right, &FiringArcConfig::default());
    assert!(arc.is_ready());
    assert_eq!(arc.fire(), Some(4));
    assert!(!arc.is_ready());
    assert_eq!(arc.fire(), None);

    for _ in 0..179 {
        arc.tick(DT);
    }
    assert!(!arc.is_ready());
    for _ in 0..2 {
        arc.tick(DT);
    }
    assert!(arc.is_ready());
}

#[test]
fn test_unarmed_arc_never_ready() {
    let config = FiringArcConfig {
        cannon_count: 0,
        ..Default::default()
    };
    let arcs = FiringArcs::new(&config);
    assert!(!side_ready(Some(&arcs), Side::Left));
    assert!(!side_ready(None, Side::Right));
}

#[test]
fn test_session_rearms_both_sides() {
    let mut arcs = FiringArcs::new(&FiringArcConfig::default());
    let session = SessionState {
        cannon_count: 6,
        ready_up_time: 1.5,
        ..Default::default()
    };
    arcs.import_session(&session);
    assert_eq!(arcs.get(Side::Left).cannon_count, 6);
    assert_eq!(arcs.get(Side::Right).ready_up_time, 1.5);
}

// ---- Physics scene ----

fn collider(id: u64, team: Team, position: DVec2) -> Collider {
    Collider {
        ship: ShipId(id),
        team,
        pose: Pose::new(position, 0.0),
        velocity: DVec2::ZERO,
        radius: 0.75,
        layer: LayerMask::SHIPS,
    }
}

#[test]
fn test_ray_cast_hits_hulls_in_range() {
    let scene = PhysicsScene::from_colliders(vec![
        collider(1, Team::Enemy, DVec2::ZERO),
        collider(2, Team::Player, DVec2::new(0.0, 5.0)),
        collider(3, Team::Enemy, DVec2::new(0.0, 20.0)),
    ]);

    let mut hits = scene.ray_cast_all(DVec2::ZERO, DVec2::Y, 10.0, LayerMask::SHIPS);
    hits.sort_by(|a, b| a.distance.total_cmp(&b.distance));
    assert_eq!(hits.len(), 2);
    assert_eq!(hits[0].ship, Some(ShipId(1)));
    assert_eq!(hits[0].distance, 0.0, "ray starting inside a hull");
    assert_eq!(hits[1].ship, Some(ShipId(2)));
    assert_abs_diff_eq!(hits[1].distance, 4.25, epsilon = 1e-9);

    assert!(scene
        .ray_cast_all(DVec2::ZERO, DVec2::Y, 10.0, LayerMask::TERRAIN)
        .is_empty());
    assert!(scene
        .ray_cast_all(DVec2::new(2.0, 0.0), DVec2::Y, 30.0, LayerMask::SHIPS)
        .is_empty());
}

#[test]
fn test_box_cast_sweeps_wide_band() {
    let scene = PhysicsScene::from_colliders(vec![
        collider(2, Team::Player, DVec2::new(25.0, 30.0)),
        collider(3, Team::Enemy, DVec2::new(35.0, 10.0)),
    ]);
    let size = DVec2::new(56.0, 1.0);

    let hits = scene.box_cast_all(DVec2::ZERO, size, 0.0, DVec2::Y, 50.0, LayerMask::SHIPS);
    let ids: Vec<_> = hits.iter().filter_map(|h| h.ship).collect();
    assert_eq!(ids, vec![ShipId(2)]);
    assert_abs_diff_eq!(hits[0].distance, 30.0 - 0.5 - 0.75, epsilon = 1e-9);

    // Rotated a quarter turn the band sweeps along -x and misses both.
    let turned = scene.box_cast_all(
        DVec2::ZERO,
        size,
        90.0,
        rotate(DVec2::Y, 90.0),
        50.0,
        LayerMask::SHIPS,
    );
    assert!(turned.is_empty());
}

#[test]
fn test_overlapping_pairs_and_registry() {
    let scene = PhysicsScene::from_colliders(vec![
        collider(3, Team::Enemy, DVec2::new(1.0, 0.0)),
        collider(1, Team::Player, DVec2::ZERO),
        collider(2, Team::Enemy, DVec2::new(10.0, 0.0)),
    ]);
    assert_eq!(scene.overlapping_pairs(), vec![(ShipId(1), ShipId(3))]);
    assert_eq!(scene.player().map(|c| c.ship), Some(ShipId(1)));
    assert!(scene.get(ShipId(2)).is_some());
    assert!(scene.get(ShipId(9)).is_none());
}

// ---- Engine ----

fn enemy_entities(engine: &SimulationEngine) -> Vec<hecs::Entity> {
    engine
        .world()
        .query::<&ShipState>()
        .iter()
        .filter(|(_, ship)| ship.team() == Team::Enemy)
        .map(|(entity, _)| entity)
        .collect()
}

fn player_entity(engine: &SimulationEngine) -> hecs::Entity {
    engine.player_entity().expect("player ship")
}

#[test]
fn test_determinism_same_seed() {
    let config = SimConfig {
        seed: 12345,
        scenario: ScenarioId::Squadron,
        ..Default::default()
    };
    let mut engine_a = SimulationEngine::new(config.clone());
    let mut engine_b = SimulationEngine::new(config);

    for i in 0..300 {
        if i % 50 == 0 {
            engine_a.queue_command(PlayerCommand::OpenSail);
            engine_b.queue_command(PlayerCommand::OpenSail);
        }
        let json_a = serde_json::to_string(&engine_a.tick()).unwrap();
        let json_b = serde_json::to_string(&engine_b.tick()).unwrap();
        assert_eq!(json_a, json_b, "Snapshots diverged with same seed");
    }
}

#[test]
fn test_seed_changes_enemy_placement() {
    let snap_a = SimulationEngine::new(SimConfig {
        seed: 111,
        ..Default::default()
    })
    .tick();
    let snap_b = SimulationEngine::new(SimConfig {
        seed: 222,
        ..Default::default()
    })
    .tick();
    let a = snap_a.enemies().next().expect("enemy").position;
    let b = snap_b.enemies().next().expect("enemy").position;
    assert!(a.distance(b) > 1e-6);
}

#[test]
fn test_scenarios_spawn_expected_ships() {
    let duel = SimulationEngine::new(SimConfig::default()).tick();
    assert!(duel.player().is_some());
    assert_eq!(duel.enemies().count(), 1);

    let squadron = SimulationEngine::new(SimConfig {
        scenario: ScenarioId::Squadron,
        ..Default::default()
    })
    .tick();
    assert_eq!(squadron.enemies().count(), 3);
    for enemy in squadron.enemies() {
        assert!(enemy.position.length() >= 39.0);
    }
}

#[test]
fn test_try_new_rejects_bad_config() {
    let mut config = SimConfig::default();
    config.enemy_ship.sails_open_min = 5;
    let err = SimulationEngine::try_new(config).err().expect("invalid config");
    assert!(err.starts_with("enemy_ship:"));
}

#[test]
fn test_try_with_session_rejects_bad_session() {
    let session = SessionState {
        max_hull_health: 0.0,
        current_hull_health: 0.0,
        ..Default::default()
    };
    let err = SimulationEngine::try_with_session(SimConfig::default(), session)
        .err()
        .expect("invalid session");
    assert!(err.starts_with("session: max_hull_health"));

    let carried = SessionState {
        current_hull_health: 40.0,
        ..Default::default()
    };
    let engine = SimulationEngine::try_with_session(SimConfig::default(), carried)
        .expect("valid session");
    assert_eq!(engine.phase(), GamePhase::Active);
}

#[test]
fn test_config_json_fills_defaults() {
    let config: SimConfig =
        serde_json::from_str(r#"{"seed": 9, "scenario": "Squadron", "ai": {"keep_in_distance": 15.0}}"#)
            .unwrap();
    assert_eq!(config.seed, 9);
    assert_eq!(config.scenario, ScenarioId::Squadron);
    assert_eq!(config.ai.keep_in_distance, 15.0);
    assert_eq!(config.ai.keep_in_sides_angle, 30.0);
    assert_eq!(config.player_ship.sails_open_max, 3);
    assert!(config.validate().is_ok());
}

#[test]
fn test_player_commands_drive_player_ship() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_commands([
        PlayerCommand::OpenSail,
        PlayerCommand::OpenSail,
        PlayerCommand::SteerRight { key_down: true },
    ]);
    let snap = engine.tick();

    let player = snap.player().expect("player");
    assert_eq!(player.sails_open, 2);
    let sail_cues = snap
        .audio_events
        .iter()
        .filter(|a| a.cue == AudioCue::SetSails && a.group == MixerGroup::Player)
        .count();
    assert_eq!(sail_cues, 2);
    assert!(snap.audio_events.iter().any(|a| a.cue == AudioCue::Rudder));
}

#[test]
fn test_fire_broadside_reloads() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.queue_command(PlayerCommand::FireBroadside { side: Side::Left });
    let snap = engine.tick();

    let player = snap.player().expect("player");
    assert!(snap.events.contains(&GameEvent::BroadsideFired {
        ship: player.id,
        side: Side::Left,
        cannons: 4,
    }));
    assert!(!player.left_arc_ready);
    assert!(player.right_arc_ready);

    engine.queue_command(PlayerCommand::FireBroadside { side: Side::Left });
    let snap = engine.tick();
    assert!(snap.events.is_empty());
}

#[test]
fn test_pause_and_resume() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.tick();
    assert_eq!(engine.time().tick, 1);

    engine.queue_command(PlayerCommand::Pause);
    engine.queue_command(PlayerCommand::OpenSail);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Paused);
    assert!(engine.session().paused);
    assert_eq!(engine.time().tick, 1);
    let enemy_before = snap.enemies().next().map(|e| e.position);

    engine.tick();
    assert_eq!(engine.time().tick, 1);

    engine.queue_command(PlayerCommand::Resume);
    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(engine.time().tick, 2);
    assert_eq!(snap.player().map(|p| p.sails_open), Some(0), "paused input is dropped");
    assert!(enemy_before.is_some());
}

#[test]
fn test_paused_session_starts_paused() {
    let session = SessionState {
        paused: true,
        ..Default::default()
    };
    let mut engine = SimulationEngine::with_session(SimConfig::default(), session);
    assert_eq!(engine.phase(), GamePhase::Paused);
    engine.tick();
    assert_eq!(engine.time().tick, 0);
}

#[test]
fn test_enemy_crowds_sail_toward_player() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let mut snap = engine.tick();
    for _ in 0..3 {
        snap = engine.tick();
    }
    let enemy = snap.enemies().next().expect("enemy");
    assert_eq!(enemy.sails_open, 3);
    assert!(enemy.speed > 0.0);
}

#[test]
fn test_enemy_sunk_gives_victory() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let enemy = enemy_entities(&engine)[0];
    {
        let mut ship = engine.world_mut().get::<&mut ShipState>(enemy).unwrap();
        assert_eq!(ship.change_hull_health(-1000.0), Some(DeathOutcome::Destroyed));
    }

    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Victory);
    assert_eq!(snap.enemies().count(), 0);
    assert!(snap
        .events
        .iter()
        .any(|e| matches!(e, GameEvent::ShipDestroyed { .. })));
    assert!(snap.events.contains(&GameEvent::AllEnemiesSunk));

    let tick = engine.time().tick;
    engine.tick();
    assert_eq!(engine.time().tick, tick, "battle is over");
}

#[test]
fn test_player_loss_is_defeat_not_destruction() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let player = player_entity(&engine);
    {
        let mut ship = engine.world_mut().get::<&mut ShipState>(player).unwrap();
        assert_eq!(ship.change_hull_health(-1000.0), Some(DeathOutcome::Defeated));
    }

    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Defeat);
    let view = snap.player().expect("player ship stays in the world");
    assert_eq!(view.hull_health, 0.0);
    assert!(snap
        .events
        .contains(&GameEvent::PlayerDefeated { ship: view.id }));
}

#[test]
fn test_next_battle_after_defeat_stays_defeated() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let player = player_entity(&engine);
    engine
        .world_mut()
        .get::<&mut ShipState>(player)
        .unwrap()
        .change_hull_health(-1000.0);
    assert_eq!(engine.tick().phase, GamePhase::Defeat);

    engine.next_battle(ScenarioId::Duel);
    let player = player_entity(&engine);
    assert_eq!(
        engine.world().get::<&ShipState>(player).unwrap().death(),
        Some(DeathOutcome::Defeated)
    );

    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Defeat);
    assert_eq!(snap.player().map(|p| p.hull_health), Some(0.0));
}

#[test]
fn test_contact_damages_once_within_cooldown() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let player = player_entity(&engine);
    let enemy = enemy_entities(&engine)[0];
    {
        let world = engine.world_mut();
        *world.get::<&mut Pose>(player).unwrap() = Pose::new(DVec2::ZERO, 0.0);
        *world.get::<&mut Pose>(enemy).unwrap() = Pose::new(DVec2::new(0.0, 1.0), 180.0);
    }

    let snap = engine.tick();
    let expected = 20.0 + 20.0 * 0.5 / 6.5;
    let collisions: Vec<_> = snap
        .events
        .iter()
        .filter_map(|e| match e {
            GameEvent::Collision { damage, .. } => Some(*damage),
            _ => None,
        })
        .collect();
    assert_eq!(collisions.len(), 2, "each side resolves its own damage");
    for damage in &collisions {
        assert_abs_diff_eq!(*damage, expected, epsilon = 1e-6);
    }

    let hull_after_crash = snap.player().map(|p| p.hull_health).unwrap_or_default();
    assert_abs_diff_eq!(hull_after_crash, 100.0 - expected, epsilon = 1e-6);

    let pose = *engine.world().get::<&Pose>(player).unwrap();
    let other = *engine.world().get::<&Pose>(enemy).unwrap();
    assert!(pose.position.distance(other.position) > 1.49, "hulls pushed apart");

    for _ in 0..60 {
        let snap = engine.tick();
        assert!(!snap
            .events
            .iter()
            .any(|e| matches!(e, GameEvent::Collision { .. })));
        assert_eq!(snap.player().map(|p| p.hull_health), Some(hull_after_crash));
    }
}

#[test]
fn test_exit_scene_exports_rounded_health() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    let player = player_entity(&engine);
    engine
        .world_mut()
        .get::<&mut ShipState>(player)
        .unwrap()
        .change_hull_health(-26.6);

    let session = engine.exit_scene();
    assert_eq!(session.current_hull_health, 73.0);
    assert_eq!(session.current_crew_health, 50.0);

    engine.next_battle(ScenarioId::Squadron);
    let snap = engine.tick();
    assert_eq!(snap.player().map(|p| p.hull_health), Some(73.0));
    assert_eq!(snap.enemies().count(), 3);
    assert!(snap.enemies().all(|e| e.hull_health == 100.0));
    assert_eq!(engine.time().tick, 1);
}

#[test]
fn test_spawned_enemy_keeps_battle_going() {
    let mut engine = SimulationEngine::new(SimConfig::default());
    engine.spawn_test_enemy(Pose::new(DVec2::new(-40.0, 0.0), 90.0));
    let first = enemy_entities(&engine)[0];
    engine
        .world_mut()
        .get::<&mut ShipState>(first)
        .unwrap()
        .change_hull_health(-1000.0);

    let snap = engine.tick();
    assert_eq!(snap.phase, GamePhase::Active);
    assert_eq!(snap.enemies().count(), 1);
}
