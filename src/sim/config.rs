//! Simulation configuration
//!
//! Replaces the global density factor and hard-coded edge handling with an
//! explicit value handed to `Simulation::new`.

use serde::{Deserialize, Serialize};

use super::error::SimError;
use crate::consts::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// Pixels per density-independent unit; every base dimension is scaled by this
    pub dp_to_px: f32,
    /// Inward nudge (px) when the player is clamped or wrapped at an edge
    pub edge_offset: f32,
    /// Per-enemy, per-tick chance of firing at the player
    pub enemy_fire_chance: f64,
    /// Total rooms per run, inclusive range (first room and boss room included)
    pub min_rooms: u32,
    pub max_rooms: u32,
    /// Player starting health
    pub player_health: i32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dp_to_px: 1.0,
            edge_offset: EDGE_OFFSET,
            enemy_fire_chance: ENEMY_FIRE_CHANCE,
            min_rooms: MIN_ROOMS,
            max_rooms: MAX_ROOMS,
            player_health: PLAYER_HEALTH,
        }
    }
}

impl SimConfig {
    /// Convert a base dimension to pixels
    #[inline]
    pub fn px(&self, dp: f32) -> f32 {
        dp * self.dp_to_px
    }

    pub fn validate(&self) -> Result<(), SimError> {
        if !(self.dp_to_px.is_finite() && self.dp_to_px > 0.0) {
            return Err(SimError::InvalidTuning("dp_to_px must be positive"));
        }
        // A zero offset leaves a clamped player on the edge, still out of bounds
        if !(self.edge_offset.is_finite() && self.edge_offset > 0.0) {
            return Err(SimError::InvalidTuning("edge_offset must be positive"));
        }
        if !(0.0..=1.0).contains(&self.enemy_fire_chance) {
            return Err(SimError::InvalidTuning("enemy_fire_chance must be in [0, 1]"));
        }
        // The first room and the boss room are always present
        if self.min_rooms < 2 {
            return Err(SimError::InvalidTuning("min_rooms must be at least 2"));
        }
        if self.max_rooms < self.min_rooms {
            return Err(SimError::InvalidTuning("max_rooms must be >= min_rooms"));
        }
        if self.player_health <= 0 {
            return Err(SimError::InvalidTuning("player_health must be positive"));
        }
        Ok(())
    }
}
