//! Broadside batteries.
//!
//! Projectiles belong to the weapons layer; an arc only tracks whether its
//! guns are loaded.

use serde::{Deserialize, Serialize};

use broadside_core::config::FiringArcConfig;
use broadside_core::enums::Side;
use broadside_core::session::SessionState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiringArc {
    pub side: Side,
    pub cannon_count: u32,
    /// Reload time after a broadside (seconds).
    pub ready_up_time: f64,
    pub reload_remaining: f64,
}

impl FiringArc {
    pub fn new(side: Side, config: &FiringArcConfig) -> Self {
        Self {
            side,
            cannon_count: config.cannon_count,
            ready_up_time: config.ready_up_time,
            reload_remaining: 0.0,
        }
    }

    pub fn is_ready(&self) -> bool {
        self.cannon_count > 0 && self.reload_remaining <= 0.0
    }

    /// Fire the broadside if loaded. Returns the number of cannons fired.
    pub fn fire(&mut self) -> Option<u32> {
        if !self.is_ready() {
            return None;
        }
        self.reload_remaining = self.ready_up_time;
        Some(self.cannon_count)
    }

    pub fn tick(&mut self, dt: f64) {
        self.reload_remaining = (self.reload_remaining - dt).max(0.0);
    }
}

/// Port and starboard batteries of one ship.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FiringArcs {
    pub left: FiringArc,
    pub right: FiringArc,
}

impl FiringArcs {
    pub fn new(config: &FiringArcConfig) -> Self {
        Self {
            left: FiringArc::new(Side::Left, config),
            right: FiringArc::new(Side::Right, config),
        }
    }

    pub fn get(&self, side: Side) -> &FiringArc {
        match side {
            Side::Left => &self.left,
            Side::Right => &self.right,
        }
    }

    pub fn get_mut(&mut self, side: Side) -> &mut FiringArc {
        match side {
            Side::Left => &mut self.left,
            Side::Right => &mut self.right,
        }
    }

    pub fn tick(&mut self, dt: f64) {
        self.left.tick(dt);
        self.right.tick(dt);
    }

    /// Rearm both sides with the session's battery.
    pub fn import_session(&mut self, session: &SessionState) {
        for arc in [&mut self.left, &mut self.right] {
            arc.cannon_count = session.cannon_count;
            arc.ready_up_time = session.ready_up_time;
        }
    }
}

/// Readiness of one side; a ship without batteries is never ready.
pub fn side_ready(arcs: Option<&FiringArcs>, side: Side) -> bool {
    arcs.is_some_and(|arcs| arcs.get(side).is_ready())
}
