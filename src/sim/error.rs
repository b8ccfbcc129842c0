//! Precondition failures reported by the simulation

use std::fmt;

#[derive(Debug, Clone, PartialEq)]
pub enum SimError {
    /// `tick`, `fire_at` or `set_desired_direction` before `start`
    NotStarted,
    /// `start` called on a simulation that already ran
    AlreadyStarted,
    /// Room bounds must be finite and positive
    InvalidBounds { width: f32, height: f32 },
    /// Difficulty multiplier must be at least 1 and keep scaled health in range
    InvalidDifficulty,
    /// Weapon damage must not be negative
    InvalidWeaponDamage(i32),
    /// A `SimConfig` field is out of range
    InvalidTuning(&'static str),
}

impl fmt::Display for SimError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SimError::NotStarted => write!(f, "simulation has not been started"),
            SimError::AlreadyStarted => write!(f, "simulation was already started"),
            SimError::InvalidBounds { width, height } => {
                write!(f, "invalid room bounds {width}x{height}")
            }
            SimError::InvalidDifficulty => write!(f, "difficulty multiplier out of range"),
            SimError::InvalidWeaponDamage(damage) => {
                write!(f, "weapon damage must not be negative (got {damage})")
            }
            SimError::InvalidTuning(field) => write!(f, "invalid simulation tuning: {field}"),
        }
    }
}

impl std::error::Error for SimError {}
