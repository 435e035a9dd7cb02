//! Simulation engine, the core of the game.
//!
//! `SimulationEngine` owns the hecs ECS world, processes player commands,
//! runs all systems, and produces `GameStateSnapshot`s. Completely headless,
//! enabling deterministic testing.

use std::collections::{HashSet, VecDeque};

use hecs::{Entity, World};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use broadside_ai::BroadsideProfile;
use broadside_core::commands::PlayerCommand;
use broadside_core::config::{FiringArcConfig, ShipConfig};
use broadside_core::enums::{GamePhase, ScenarioId, Team};
use broadside_core::events::{AudioEvent, GameEvent};
use broadside_core::session::SessionState;
use broadside_core::state::GameStateSnapshot;
use broadside_core::types::{ShipId, SimTime};

use crate::physics::PhysicsScene;
use crate::scenario;
use crate::ship::ShipState;
use crate::systems;
use crate::world_setup;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same opening positions.
    pub seed: u64,
    pub scenario: ScenarioId,
    pub player_ship: ShipConfig,
    pub enemy_ship: ShipConfig,
    pub ai: BroadsideProfile,
    pub firing_arc: FiringArcConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            scenario: ScenarioId::default(),
            player_ship: ShipConfig::default(),
            enemy_ship: ShipConfig::default(),
            ai: BroadsideProfile::default(),
            firing_arc: FiringArcConfig::default(),
        }
    }
}

impl SimConfig {
    pub fn validate(&self) -> Result<(), String> {
        self.player_ship
            .validate()
            .map_err(|e| format!("player_ship: {e}"))?;
        self.enemy_ship
            .validate()
            .map_err(|e| format!("enemy_ship: {e}"))?;
        self.ai.validate().map_err(|e| format!("ai: {e}"))?;
        self.firing_arc
            .validate()
            .map_err(|e| format!("firing_arc: {e}"))?;
        Ok(())
    }
}

/// The simulation engine. Owns the ECS world and all sim state.
pub struct SimulationEngine {
    config: SimConfig,
    world: World,
    time: SimTime,
    phase: GamePhase,
    session: SessionState,
    rng: ChaCha8Rng,
    next_ship_id: u64,
    command_queue: VecDeque<PlayerCommand>,
    /// Hull pairs overlapping at the end of the last contact pass.
    touching: HashSet<(ShipId, ShipId)>,
    despawn_buffer: Vec<Entity>,
    audio_events: Vec<AudioEvent>,
    events: Vec<GameEvent>,
}

impl SimulationEngine {
    /// Start the configured scenario with a fresh session.
    pub fn new(config: SimConfig) -> Self {
        Self::with_session(config, SessionState::default())
    }

    /// Start the configured scenario, carrying the player's condition over
    /// from `session`.
    pub fn with_session(config: SimConfig, session: SessionState) -> Self {
        let mut engine = Self {
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            world: World::new(),
            time: SimTime::default(),
            phase: GamePhase::Active,
            session,
            next_ship_id: 1,
            command_queue: VecDeque::new(),
            touching: HashSet::new(),
            despawn_buffer: Vec::new(),
            audio_events: Vec::new(),
            events: Vec::new(),
            config,
        };
        engine.load_scenario(engine.config.scenario);
        engine
    }

    /// Validate `config` before starting.
    pub fn try_new(config: SimConfig) -> Result<Self, String> {
        Self::try_with_session(config, SessionState::default())
    }

    /// Validate `config` and `session` before starting.
    pub fn try_with_session(config: SimConfig, session: SessionState) -> Result<Self, String> {
        if let Err(e) = config.validate() {
            log::warn!("rejected sim config: {e}");
            return Err(e);
        }
        if let Err(e) = session.validate() {
            log::warn!("rejected session: {e}");
            return Err(format!("session: {e}"));
        }
        Ok(Self::with_session(config, session))
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    /// Queue multiple commands.
    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by one tick and return the resulting snapshot.
    pub fn tick(&mut self) -> GameStateSnapshot {
        let helm_commands = self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems(&helm_commands);
            self.time.advance();
        } else if !helm_commands.is_empty() {
            log::trace!(
                "dropped {} helm commands while {:?}",
                helm_commands.len(),
                self.phase
            );
        }

        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            self.phase,
            std::mem::take(&mut self.audio_events),
            std::mem::take(&mut self.events),
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    /// Get a read-only reference to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    /// Entity of the player's ship, if it is still in the world.
    pub fn player_entity(&self) -> Option<Entity> {
        self.world
            .query::<&ShipState>()
            .iter()
            .find(|(_, ship)| ship.team() == Team::Player)
            .map(|(entity, _)| entity)
    }

    /// Leave the scene: write the player's condition back to the session
    /// and return it for the next scene.
    pub fn exit_scene(&mut self) -> SessionState {
        if let Some(entity) = self.player_entity() {
            if let Ok(ship) = self.world.get::<&ShipState>(entity) {
                ship.export_session(&mut self.session);
            }
        }
        self.session.clone()
    }

    /// Carry the player's condition into a fresh battle of `scenario`.
    /// Enemy placement continues the same seeded sequence.
    pub fn next_battle(&mut self, scenario: ScenarioId) {
        self.exit_scene();
        self.world.clear();
        self.command_queue.clear();
        self.touching.clear();
        self.audio_events.clear();
        self.events.clear();
        self.load_scenario(scenario);
    }

    fn load_scenario(&mut self, scenario: ScenarioId) {
        let layout = scenario::build_layout(scenario, &mut self.rng);
        world_setup::setup_scenario(
            &mut self.world,
            &layout,
            &self.config,
            &self.session,
            &mut self.next_ship_id,
        );
        log::info!(
            "{scenario:?} battle started with {} enemies (seed {})",
            layout.enemies.len(),
            self.config.seed
        );

        self.time = SimTime::default();
        self.phase = if self.session.is_unpaused() {
            GamePhase::Active
        } else {
            GamePhase::Paused
        };
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Mutable world access for tests that stage ships directly.
    #[cfg(test)]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    /// Spawn an extra enemy ship from the configured templates (for tests).
    #[cfg(test)]
    pub fn spawn_test_enemy(&mut self, pose: broadside_core::types::Pose) -> Entity {
        let id = ShipId(self.next_ship_id);
        self.next_ship_id += 1;
        world_setup::spawn_enemy(
            &mut self.world,
            id,
            pose,
            &self.config.enemy_ship,
            &self.config.firing_arc,
            &self.config.ai,
        )
    }

    /// Handle Pause/Resume now; return the helm and weapon commands for
    /// the helm system.
    fn process_commands(&mut self) -> Vec<PlayerCommand> {
        let mut helm_commands = Vec::new();
        while let Some(command) = self.command_queue.pop_front() {
            match command {
                PlayerCommand::Pause => {
                    if self.phase == GamePhase::Active {
                        self.phase = GamePhase::Paused;
                        self.session.paused = true;
                    }
                }
                PlayerCommand::Resume => {
                    if self.phase == GamePhase::Paused {
                        self.phase = GamePhase::Active;
                        self.session.paused = false;
                    }
                }
                other => helm_commands.push(other),
            }
        }
        helm_commands
    }

    /// Run all systems in order.
    fn run_systems(&mut self, helm_commands: &[PlayerCommand]) {
        let dt = self.time.dt();

        // 1. Previous-tick scene for contacts and sensors
        let scene = PhysicsScene::capture(&self.world);
        // 2. Contacts and collision damage
        systems::contacts::run(&mut self.world, &scene, &mut self.touching, &mut self.events);
        // 3. Broadside reloads
        systems::firing_arcs::run(&mut self.world, dt);
        // 4. Player helm and weapons
        systems::helm::run(&mut self.world, helm_commands, dt, &mut self.events);
        // 5. Broadside AI
        systems::broadside_ai::run(&mut self.world, &scene, self.session.paused, dt);
        // 6. Sails and rudder into velocities
        systems::propulsion::run(&mut self.world, dt);
        // 7. Movement integration
        systems::movement::run(&mut self.world, dt);
        // 8. Audio, sunk ships, end of battle
        systems::audio::run(&mut self.world, &mut self.audio_events);
        if let Some(phase) =
            systems::cleanup::run(&mut self.world, &mut self.despawn_buffer, &mut self.events)
        {
            self.phase = phase;
        }
    }
}
