//! Real-time simulation module
//!
//! All gameplay logic lives here:
//! - One tick per rendered frame, no internal timers or threads
//! - Randomness drawn from a single RNG owned by the `Simulation`
//! - No rendering, audio or platform dependencies

pub mod actor;
pub mod collision;
pub mod config;
pub mod entity;
pub mod error;
pub mod projectile;
pub mod room;
pub mod state;
pub mod tick;

pub use actor::{HealthBand, enemy_turn};
pub use collision::{EdgeResponse, circles_overlap, first_overlap, resolve_edge};
pub use config::SimConfig;
pub use entity::{Body, Entity, EntityKind, Weapon};
pub use error::SimError;
pub use room::Room;
pub use state::{
    EnemyView, GameEvent, GameStatus, Outcome, PlayerView, ProjectileView, Simulation, Snapshot,
};
pub use tick::TickInput;
