//! Simulation constants and tuning defaults.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Propulsion ---

/// Fewest sails a ship may have set.
pub const SAILS_OPEN_MIN: i32 = 0;

/// Most sails a ship may have set.
pub const SAILS_OPEN_MAX: i32 = 3;

/// Acceleration factor; multiplied by the target sail count.
pub const SPEED_UP_RATE: f64 = 1.0;

/// Fixed deceleration (units/s²) when striking sails.
pub const BRAKE_RATE: f64 = 1.0;

/// Global multiplier applied to the smoothed velocity.
pub const SPEED_MODIFIER: f64 = 1.0;

/// Hull ratio slack before damage starts throttling speed.
pub const HULL_HEALTH_SPEED_DEAD_ZONE: f64 = 0.2;

/// Below this smoothed velocity a ship has no turning authority.
pub const MIN_TURNING_VELOCITY: f64 = 0.1;

// --- Steering ---

/// Hard-a-port rudder deflection (degrees).
pub const RUDDER_MIN: f64 = -30.0;

/// Hard-a-starboard rudder deflection (degrees).
pub const RUDDER_MAX: f64 = 30.0;

/// Rudder travel per second of held steering (degrees/s).
pub const STEERING_SPEED: f64 = 30.0;

/// Reported rudder magnitude below this reads as zero.
pub const RUDDER_DEAD_ZONE: f64 = 2.5;

// --- Health ---

/// Default hull health.
pub const MAX_HULL_HEALTH: f64 = 100.0;

/// Default crew health.
pub const MAX_CREW_HEALTH: f64 = 50.0;

/// Health magnitude below which a stat snaps to zero and the ship dies.
pub const DEATH_EPSILON: f64 = 0.01;

/// Damage-over-time rates below this are ignored.
pub const MIN_DAMAGE_OVER_TIME: f64 = 0.01;

// --- Collisions ---

/// Half-angle of the bow sector that takes ramming damage (degrees).
pub const COLLISION_FRONT_ANGLE: f64 = 30.0;

/// Damage of a dead-ahead ram, and scale of the speed term.
pub const MAX_COLLISION_DAMAGE: f64 = 20.0;

/// Offset added to relative speed in the speed damage term.
pub const MIN_SPEED_FOR_COLLISION_DAMAGE: f64 = 0.5;

/// Seconds before the same ship can take crash damage again.
pub const CRASH_COOLDOWN_SECS: f64 = 2.5;

/// Default hull collider radius.
pub const HULL_RADIUS: f64 = 0.75;

// --- Broadside AI ---

/// Range inside which the AI considers its broadside in distance.
pub const KEEP_IN_DISTANCE: f64 = 20.0;

/// Half-width of the forward box cast used to find the target ahead.
pub const KEEP_IN_DISTANCE_RAYCAST: f64 = 28.0;

/// Tolerance around the beam for a correct broadside angle (degrees).
pub const KEEP_IN_SIDES_ANGLE: f64 = 30.0;

/// Avoidance ray length per unit of current speed.
pub const COLLISION_AVOIDANCE_LOOK_AHEAD_RANGE: f64 = 2.0;

/// Seconds an avoidance turn is held before it can be re-decided.
pub const AVOIDANCE_CHANGE_COOLDOWN: f64 = 1.0;

/// Lateral offset of each avoidance ray from the centerline.
pub const AVOIDANCE_RAY_OFFSET: f64 = 0.5;

/// Rudder discrepancy the AI tolerates before stepping the helm.
pub const STEERING_THRESHOLD: f64 = 0.5;

/// Length of the forward box cast.
pub const BOX_CAST_RANGE: f64 = 50.0;

/// Depth (along the heading) of the forward box cast.
pub const BOX_CAST_DEPTH: f64 = 1.0;

/// Crew health below which an AI ship stops issuing orders.
pub const CREW_ALIVE_EPSILON: f64 = 0.01;

// --- Firing arcs ---

/// Default cannons per broadside.
pub const CANNON_COUNT: u32 = 4;

/// Default reload time of a broadside (seconds).
pub const READY_UP_TIME: f64 = 3.0;

// --- Audio ---

/// Pitch jitter range for sail and rudder cues.
pub const HELM_PITCH_RANGE: (f64, f64) = (0.95, 1.05);

/// Pitch jitter range for crash cues.
pub const CRASH_PITCH_RANGE: (f64, f64) = (0.90, 1.10);

// --- Scenario layout ---

/// Distance from the player at which enemy ships are placed.
pub const ENEMY_SPAWN_RANGE: f64 = 40.0;
