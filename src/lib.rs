//! Dungeon Domination - a room-by-room top-down arcade shooter
//!
//! Core modules:
//! - `sim`: Real-time simulation (motion, collisions, rooms, win/loss)
//! - `profile`: Persisted player profile and weapon upgrade store
//! - `autopilot`: Headless driver that plays a run without a renderer
//! - `web`: WebAssembly binding for a browser host (wasm32 only)

pub mod autopilot;
pub mod profile;
pub mod sim;
#[cfg(target_arch = "wasm32")]
pub mod web;

pub use autopilot::Autopilot;
pub use profile::{Difficulty, PlayerColor, Profile};
pub use sim::{GameStatus, Outcome, SimConfig, SimError, Simulation};

use glam::Vec2;

/// Base tuning constants, in density-independent units (scaled by `SimConfig::dp_to_px`)
pub mod consts {
    /// Player hit-circle radius
    pub const PLAYER_RADIUS: f32 = 35.0;
    /// Player movement increment
    pub const PLAYER_STEP: f32 = 2.5;
    /// Player speed per tick
    pub const PLAYER_SPEED: f32 = 6.0;
    /// Speed of projectiles fired by the player, per tick
    pub const PLAYER_PROJECTILE_SPEED: f32 = 40.0;
    /// Player starting health
    pub const PLAYER_HEALTH: i32 = 100;

    /// Enemy speed per tick (regular and boss)
    pub const ENEMY_SPEED: f32 = 2.0;
    /// Speed of projectiles fired by enemies, per tick
    pub const ENEMY_PROJECTILE_SPEED: f32 = 15.0;
    /// Chance per tick that an enemy fires at the player
    pub const ENEMY_FIRE_CHANCE: f64 = 0.01;

    /// Regular enemy defaults (health and coins scale with difficulty)
    pub const GRUNT_RADIUS: f32 = 30.0;
    pub const GRUNT_STEP: f32 = 2.5;
    pub const GRUNT_HEALTH: i32 = 100;
    pub const GRUNT_DAMAGE: i32 = 5;
    pub const GRUNT_COINS: u32 = 1;
    /// Regular rooms hold 1..=MAX_GRUNTS enemies
    pub const MAX_GRUNTS: usize = 3;

    /// Boss defaults
    pub const BOSS_RADIUS: f32 = 80.0;
    pub const BOSS_STEP: f32 = 1.0;
    pub const BOSS_HEALTH: i32 = 500;
    pub const BOSS_DAMAGE: i32 = 20;
    pub const BOSS_COINS: u32 = 25;

    /// Projectile defaults
    pub const PROJECTILE_RADIUS: f32 = 20.0;
    pub const PROJECTILE_STEP: f32 = 1.0;

    /// Total rooms per run, including the first room and the boss room
    pub const MIN_ROOMS: u32 = 10;
    pub const MAX_ROOMS: u32 = 19;

    /// Inward nudge applied when the player is clamped or wrapped at an edge
    pub const EDGE_OFFSET: f32 = 0.01;
}

/// Angle (radians) of the ray from `from` toward `to`
#[inline]
pub fn angle_to(from: Vec2, to: Vec2) -> f32 {
    (to.y - from.y).atan2(to.x - from.x)
}

/// Unit vector for a heading in radians
#[inline]
pub fn heading(angle: f32) -> Vec2 {
    Vec2::new(angle.cos(), angle.sin())
}

/// True if `a` and `b` are strictly closer than `range`
///
/// Compares squared distances, so exact tangency does not count.
#[inline]
pub fn within_range(a: Vec2, b: Vec2, range: f32) -> bool {
    a.distance_squared(b) < range * range
}
