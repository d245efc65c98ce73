//! Simulation constants and tuning parameters.

/// Simulation tick rate (Hz).
pub const TICK_RATE: u32 = 30;

/// Seconds per tick.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

// --- Arena ---

/// Playable arena radius in meters; tanks are clamped inside it.
pub const ARENA_RADIUS: f64 = 400.0;

// --- Target locking ---

/// Seconds the same candidate must stay closest before the lock confirms.
pub const LOCK_ACQUIRE_SECS: f64 = 0.5;

/// Seconds of lost sight before a confirmed lock is dropped.
pub const LOCK_LOSE_SECS: f64 = 0.5;

/// Floor for either lock timing (zero would make locks instantaneous).
pub const LOCK_TIME_FLOOR_SECS: f64 = 0.01;

// --- Sight cone ---

/// Maximum range of the turret sight cone (meters).
pub const SIGHT_RANGE: f64 = 250.0;

/// Half-angle of the turret sight cone (radians, ~20 degrees).
pub const SIGHT_HALF_ANGLE: f64 = 0.35;

// --- Tanks ---

/// Starting and maximum hull integrity.
pub const TANK_MAX_HEALTH: i32 = 1000;

/// Top speed of a tank without boosts (m/s).
pub const TANK_MAX_SPEED: f64 = 12.0;

/// Hull radius used for projectile and mine hit tests (meters).
pub const TANK_BODY_RADIUS: f64 = 2.5;

/// Turret slew rate (radians per second).
pub const TURRET_TURN_RATE: f64 = 2.0;

// --- Projectiles ---

/// Number of pooled projectile entities per match.
pub const PROJECTILE_POOL_SIZE: usize = 20;

/// Muzzle speed (m/s). Projectiles fly flat, no gravity.
pub const PROJECTILE_SPEED: f64 = 500.0;

/// Seconds before an in-flight projectile deactivates itself.
pub const PROJECTILE_TTL_SECS: f64 = 5.0;

/// Distance from the tank center at which projectiles spawn (meters).
pub const MUZZLE_OFFSET: f64 = 3.0;

/// Blast radius of a projectile impact (meters).
pub const BLAST_RADIUS: f64 = 8.0;

/// Damage at the center of a projectile blast; falls off linearly to zero
/// at BLAST_RADIUS.
pub const BLAST_DAMAGE: i32 = 250;

// --- Respawn flow ---

/// Seconds between death and respawn.
pub const RESPAWN_DELAY_SECS: f64 = 5.0;

/// Seconds a used spawn point stays unavailable.
pub const SPAWN_POINT_COOLDOWN_SECS: f64 = 5.0;

/// Countdown between StartMatch and the first active tick.
pub const MATCH_START_DELAY_SECS: f64 = 3.0;

/// Delay between a self-destruct order and the detonation.
pub const SELF_DESTRUCT_DELAY_SECS: f64 = 3.0;

// --- Power-ups ---

/// Pickup trigger radius (meters).
pub const POWER_UP_RADIUS: f64 = 2.0;

/// Seconds before a consumed pickup reappears.
pub const POWER_UP_RESPAWN_SECS: f64 = 15.0;

/// Duration of timed effects (shield, damage boost, speed boost).
pub const POWER_UP_EFFECT_SECS: f64 = 10.0;

/// Health restored by a Health pickup.
pub const HEALTH_PICKUP_AMOUNT: i32 = 250;

/// Outgoing-damage multiplier while a Damage boost is active.
pub const DAMAGE_BOOST_FACTOR: f64 = 2.0;

/// Top-speed multiplier while a Speed boost is active.
pub const SPEED_BOOST_FACTOR: f64 = 1.5;

// --- Mines ---

/// Radius at which an armed mine detonates under an enemy tank (meters).
pub const MINE_TRIGGER_RADIUS: f64 = 3.0;

/// Blast radius of a mine detonation (meters).
pub const MINE_BLAST_RADIUS: f64 = 6.0;

/// Damage at the center of a mine blast.
pub const MINE_DAMAGE: i32 = 400;

// --- Scoring ---

/// Team kill count that ends the match.
pub const KILL_LIMIT: u32 = 20;
