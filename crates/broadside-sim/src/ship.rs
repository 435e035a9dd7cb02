//! Per-ship propulsion, steering and health state machine.
//!
//! Sail and rudder steps are all-or-nothing: a step that would leave its
//! range is rejected and reported as `false`. Health changes clamp instead.

use glam::DVec2;
use serde::{Deserialize, Serialize};

use broadside_core::body::PhysicalBody;
use broadside_core::config::ShipConfig;
use broadside_core::constants::*;
use broadside_core::enums::{AudioCue, DeathOutcome, MixerGroup, Team};
use broadside_core::events::AudioEvent;
use broadside_core::helm::{Helm, HelmLimits, HelmOrder, OrderSource};
use broadside_core::session::SessionState;
use broadside_core::state::HealthBars;
use broadside_core::types::heading;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShipState {
    config: ShipConfig,
    team: Team,
    sails_open: i32,
    rudder_position: f64,
    current_velocity: f64,
    hull_health: f64,
    crew_health: f64,
    crash_cooldown: f64,
    death: Option<DeathOutcome>,
    #[serde(skip)]
    audio: Vec<AudioEvent>,
}

/// Health stat addressed by a damage call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Stat {
    Hull,
    Crew,
}

impl ShipState {
    /// A fresh ship at full health, sails furled, rudder amidships.
    pub fn new(team: Team, config: ShipConfig) -> Self {
        Self {
            team,
            sails_open: config.sails_open_min,
            rudder_position: 0.0,
            current_velocity: 0.0,
            hull_health: config.max_hull_health,
            crew_health: config.max_crew_health,
            crash_cooldown: 0.0,
            death: None,
            audio: Vec::new(),
            config,
        }
    }

    pub fn team(&self) -> Team {
        self.team
    }

    pub fn config(&self) -> &ShipConfig {
        &self.config
    }

    /// Stored rudder deflection, without the dead zone.
    pub fn raw_rudder(&self) -> f64 {
        self.rudder_position
    }

    pub fn current_velocity(&self) -> f64 {
        self.current_velocity
    }

    pub fn hull_health(&self) -> f64 {
        self.hull_health
    }

    pub fn crew_health(&self) -> f64 {
        self.crew_health
    }

    pub fn crash_cooldown(&self) -> f64 {
        self.crash_cooldown
    }

    pub fn is_invincible(&self) -> bool {
        self.config.invincible
    }

    /// Outcome of the death transition, once it has fired.
    pub fn death(&self) -> Option<DeathOutcome> {
        self.death
    }

    /// Speed after the speed modifier and hull throttling. Above
    /// `1 - hull_health_speed_dead_zone` of max hull, damage costs no speed.
    pub fn modified_velocity(&self) -> f64 {
        let ratio = self.hull_health / self.config.max_hull_health
            + self.config.hull_health_speed_dead_zone;
        self.current_velocity * self.config.speed_modifier * ratio.min(1.0)
    }

    /// Turn rate in degrees per second. A ship below the minimum turning
    /// speed cannot turn; positive rudder turns clockwise.
    pub fn angular_velocity(&self) -> f64 {
        if self.current_velocity > MIN_TURNING_VELOCITY {
            -self.rudder_position() / self.config.sails_open_max as f64 * self.modified_velocity()
        } else {
            0.0
        }
    }

    pub fn health_bars(&self) -> HealthBars {
        HealthBars {
            hull: self.hull_health / self.config.max_hull_health,
            crew: self.crew_health / self.config.max_crew_health,
        }
    }

    /// Advance one tick and write the resulting velocities to `body`.
    /// `rotation` is the ship's current orientation in degrees.
    pub fn integrate<B: PhysicalBody + ?Sized>(&mut self, dt: f64, rotation: f64, body: &mut B) {
        self.crash_cooldown = (self.crash_cooldown - dt).max(0.0);

        let target = self.sails_open as f64;
        if self.current_velocity < target {
            self.current_velocity =
                (self.current_velocity + dt * self.config.speed_up_rate * target).min(target);
        } else if self.current_velocity > target {
            self.current_velocity =
                (self.current_velocity - dt * self.config.brake_rate).max(target);
        }

        let velocity: DVec2 = heading(rotation) * self.modified_velocity();
        body.set_linear_velocity(velocity);
        body.set_angular_velocity(self.angular_velocity());

        if self.config.damage_over_time >= MIN_DAMAGE_OVER_TIME {
            self.change_hull_health(-self.config.damage_over_time * dt);
        }
    }

    pub fn open_sail(&mut self) -> bool {
        self.step_sails(1, AudioCue::SetSails)
    }

    pub fn close_sail(&mut self) -> bool {
        self.step_sails(-1, AudioCue::StrikeSails)
    }

    pub fn steer_right(&mut self, dt: f64, source: OrderSource) -> bool {
        self.step_rudder(self.config.steering_speed * dt, source)
    }

    pub fn steer_left(&mut self, dt: f64, source: OrderSource) -> bool {
        self.step_rudder(-self.config.steering_speed * dt, source)
    }

    fn step_sails(&mut self, step: i32, cue: AudioCue) -> bool {
        let next = self.sails_open + step;
        if next < self.config.sails_open_min || next > self.config.sails_open_max {
            return false;
        }
        self.sails_open = next;
        self.play(cue, self.team.mixer_group(), HELM_PITCH_RANGE);
        true
    }

    fn step_rudder(&mut self, step: f64, source: OrderSource) -> bool {
        let next = self.rudder_position + step;
        if next < self.config.rudder_min || next > self.config.rudder_max {
            return false;
        }
        self.rudder_position = next;
        if self.team == Team::Player && source == (OrderSource::Helmsman { key_down: true }) {
            self.play(AudioCue::Rudder, MixerGroup::Rudder, HELM_PITCH_RANGE);
        }
        true
    }

    /// Add `delta` to hull health, clamped to `[0, max]`. Returns the death
    /// outcome if this change (or an earlier one) emptied the hull.
    pub fn change_hull_health(&mut self, delta: f64) -> Option<DeathOutcome> {
        self.change_health(Stat::Hull, delta)
    }

    pub fn change_crew_health(&mut self, delta: f64) -> Option<DeathOutcome> {
        self.change_health(Stat::Crew, delta)
    }

    fn change_health(&mut self, stat: Stat, delta: f64) -> Option<DeathOutcome> {
        let (value, max) = match stat {
            Stat::Hull => (&mut self.hull_health, self.config.max_hull_health),
            Stat::Crew => (&mut self.crew_health, self.config.max_crew_health),
        };
        *value = (*value + delta).clamp(0.0, max);
        if value.abs() < DEATH_EPSILON {
            *value = 0.0;
            return Some(self.die(stat));
        }
        None
    }

    fn die(&mut self, stat: Stat) -> DeathOutcome {
        if let Some(outcome) = self.death {
            return outcome;
        }
        let outcome = match self.team {
            Team::Player => DeathOutcome::Defeated,
            Team::Enemy if self.config.invincible => DeathOutcome::Spared,
            Team::Enemy => DeathOutcome::Destroyed,
        };
        log::info!("{:?} ship lost its {stat:?}: {outcome:?}", self.team);
        self.death = Some(outcome);
        outcome
    }

    /// Start the crash cooldown. Collision damage is ignored until it expires.
    pub fn start_crash_cooldown(&mut self) {
        self.crash_cooldown = CRASH_COOLDOWN_SECS;
    }

    pub fn play_crash(&mut self) {
        self.play(AudioCue::Crash, self.team.mixer_group(), CRASH_PITCH_RANGE);
    }

    fn play(&mut self, cue: AudioCue, group: MixerGroup, pitch: (f64, f64)) {
        self.audio.push(AudioEvent::new(cue, group, pitch));
    }

    /// Drain the audio cues raised since the last call.
    pub fn take_audio_events(&mut self) -> Vec<AudioEvent> {
        std::mem::take(&mut self.audio)
    }

    /// Take over max and current health from the session. Imported ships
    /// are never invincible; one imported with no hull or crew left has
    /// already died.
    pub fn import_session(&mut self, session: &SessionState) {
        self.config.invincible = false;
        self.config.max_hull_health = session.max_hull_health;
        self.config.max_crew_health = session.max_crew_health;
        self.hull_health = session.current_hull_health;
        self.crew_health = session.current_crew_health;
        self.death = None;
        self.change_hull_health(0.0);
        self.change_crew_health(0.0);
    }

    /// Write current health back to the session, rounded to whole points.
    pub fn export_session(&self, session: &mut SessionState) {
        session.current_hull_health = self.hull_health.round();
        session.current_crew_health = self.crew_health.round();
    }
}

impl Helm for ShipState {
    fn limits(&self) -> HelmLimits {
        HelmLimits {
            sails_open_min: self.config.sails_open_min,
            sails_open_max: self.config.sails_open_max,
            rudder_min: self.config.rudder_min,
            rudder_max: self.config.rudder_max,
        }
    }

    fn sails_open(&self) -> i32 {
        self.sails_open
    }

    fn rudder_position(&self) -> f64 {
        if self.rudder_position.abs() < self.config.rudder_dead_zone {
            0.0
        } else {
            self.rudder_position
        }
    }

    fn execute(&mut self, order: HelmOrder, source: OrderSource, dt: f64) -> bool {
        match order {
            HelmOrder::OpenSail => self.open_sail(),
            HelmOrder::CloseSail => self.close_sail(),
            HelmOrder::SteerRight => self.steer_right(dt, source),
            HelmOrder::SteerLeft => self.steer_left(dt, source),
        }
    }
}
