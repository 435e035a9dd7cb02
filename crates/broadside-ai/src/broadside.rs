//! Broadside decision loop.
//!
//! Each tick: sense, decide avoidance, decide targeting (only with a clear
//! bow), then nudge the helm one step toward the aims. The aims persist
//! between ticks so a committed turn is held while the rudder swings over.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use broadside_core::body::PhysicsQuery;
use broadside_core::helm::{Helm, HelmLimits, HelmOrder, OrderSource};
use broadside_core::types::{Pose, ShipId};

use crate::profile::BroadsideProfile;
use crate::sensing::{self, AvoidanceReading, TargetObservation};

/// The ship the AI is trying to bring under its guns.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetInfo {
    pub id: ShipId,
    pub position: DVec2,
}

/// Everything the AI reads about its own ship for one tick.
#[derive(Debug, Clone)]
pub struct BroadsideContext {
    pub ship: ShipId,
    pub pose: Pose,
    /// Modified (effective) speed of the ship.
    pub speed: f64,
    pub crew_health: f64,
    pub paused: bool,
    pub target: Option<TargetInfo>,
    pub left_arc_ready: bool,
    pub right_arc_ready: bool,
    pub dt: f64,
}

/// Outcome of the targeting rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TargetingDecision {
    /// Full sail, rudder to starboard (or straight on if the target is ahead).
    CloseToStarboard,
    /// Full sail, rudder to port (or straight on if the target is ahead).
    CloseToPort,
    /// Broadside bears at range: strike sail and hold course.
    Loiter,
}

/// Working state of one autonomous ship.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BroadsideAi {
    profile: BroadsideProfile,
    steering_aim: f64,
    sail_aim: i32,
    avoidance_cooldown: f64,
}

impl BroadsideAi {
    /// A fresh AI starts by crowding on all sail with the rudder amidships.
    pub fn new(profile: BroadsideProfile, limits: HelmLimits) -> Self {
        Self {
            profile,
            steering_aim: 0.0,
            sail_aim: limits.sails_open_max,
            avoidance_cooldown: 0.0,
        }
    }

    pub fn profile(&self) -> &BroadsideProfile {
        &self.profile
    }

    pub fn steering_aim(&self) -> f64 {
        self.steering_aim
    }

    pub fn sail_aim(&self) -> i32 {
        self.sail_aim
    }

    pub fn avoidance_cooldown(&self) -> f64 {
        self.avoidance_cooldown
    }

    /// Run one tick against `helm`. Returns the orders the helm accepted.
    /// Inert while paused or once the crew is gone.
    pub fn update<Q, H>(&mut self, ctx: &BroadsideContext, query: &Q, helm: &mut H) -> Vec<HelmOrder>
    where
        Q: PhysicsQuery + ?Sized,
        H: Helm + ?Sized,
    {
        if ctx.paused || ctx.crew_health < self.profile.crew_alive_epsilon {
            return Vec::new();
        }

        let limits = helm.limits();
        let reading =
            sensing::sense_avoidance(query, ctx.ship, &ctx.pose, ctx.speed, &self.profile);
        self.decide_avoidance(&reading, &limits, ctx.dt);

        if let Some(target) = ctx.target.filter(|_| reading.is_clear()) {
            let observation = sensing::observe_target(&ctx.pose, target.position);
            let steering_needed =
                sensing::is_steering_needed(query, &ctx.pose, target.id, &self.profile);
            self.decide_targeting(
                &observation,
                steering_needed,
                ctx.left_arc_ready,
                ctx.right_arc_ready,
                &limits,
            );
        }

        self.steer_and_sail_to_aim(helm, ctx.dt)
    }

    /// Commit a hard turn away from the nearer feeler contact, then hold it
    /// until the cooldown runs out.
    pub fn decide_avoidance(&mut self, reading: &AvoidanceReading, limits: &HelmLimits, dt: f64) {
        if self.avoidance_cooldown > 0.0 {
            self.avoidance_cooldown = (self.avoidance_cooldown - dt).max(0.0);
            return;
        }

        if let Some(left) = reading.left {
            if reading.right.map_or(true, |right| left < right) {
                log::debug!("obstacle {left:.2} off the port bow, turning to starboard");
                self.steering_aim = limits.rudder_max;
                self.avoidance_cooldown = self.profile.avoidance_change_cooldown;
            }
        }

        if let Some(right) = reading.right {
            if reading.left.map_or(true, |left| right < left) {
                log::debug!("obstacle {right:.2} off the starboard bow, turning to port");
                self.steering_aim = limits.rudder_min;
                self.avoidance_cooldown = self.profile.avoidance_change_cooldown;
            }
        }
    }

    /// Pick steering and sail aims that work a loaded broadside onto the
    /// target. Branches are tried starboard, port, then loiter; when neither
    /// arc is loaded the starboard branch wins.
    pub fn decide_targeting(
        &mut self,
        observation: &TargetObservation,
        steering_needed: bool,
        left_ready: bool,
        right_ready: bool,
        limits: &HelmLimits,
    ) -> TargetingDecision {
        let p = &self.profile;
        let in_distance = observation.distance <= p.keep_in_distance;

        let is_left = observation.angle.abs() > 90.0;
        let is_right = !is_left;
        let in_correct_angle = if is_left {
            observation.angle.abs() >= 180.0 - p.keep_in_sides_angle && left_ready
        } else {
            observation.angle.abs() <= p.keep_in_sides_angle && right_ready
        };
        let positioned = in_correct_angle && in_distance;

        let decision = if !positioned && (is_right && right_ready || !left_ready) {
            self.steering_aim = if steering_needed || !left_ready {
                limits.rudder_max
            } else {
                0.0
            };
            self.sail_aim = limits.sails_open_max;
            TargetingDecision::CloseToStarboard
        } else if !positioned && (is_left && left_ready || !right_ready) {
            self.steering_aim = if steering_needed || !right_ready {
                limits.rudder_min
            } else {
                0.0
            };
            self.sail_aim = limits.sails_open_max;
            TargetingDecision::CloseToPort
        } else {
            self.steering_aim = 0.0;
            self.sail_aim = limits.sails_open_min;
            TargetingDecision::Loiter
        };

        log::trace!(
            "target at {:.1}° / {:.1}: {decision:?}",
            observation.angle,
            observation.distance
        );
        decision
    }

    /// Issue at most one sail step and one rudder step toward the aims.
    pub fn steer_and_sail_to_aim<H: Helm + ?Sized>(&self, helm: &mut H, dt: f64) -> Vec<HelmOrder> {
        let mut accepted = Vec::with_capacity(2);
        let mut issue = |helm: &mut H, order: HelmOrder| {
            if helm.execute(order, OrderSource::Autopilot, dt) {
                accepted.push(order);
            }
        };

        let sails = helm.sails_open();
        if self.sail_aim > sails {
            issue(helm, HelmOrder::OpenSail);
        } else if self.sail_aim < sails {
            issue(helm, HelmOrder::CloseSail);
        }

        let rudder = helm.rudder_position();
        if (self.steering_aim - rudder).abs() > self.profile.steering_threshold {
            if self.steering_aim > rudder {
                issue(helm, HelmOrder::SteerRight);
            } else {
                issue(helm, HelmOrder::SteerLeft);
            }
        }

        accepted
    }
}
