//! Kinematic entity shared by the player, enemies and projectiles
//!
//! One record with a capability tag instead of a type hierarchy. Behaviour
//! specific to a kind lives in `actor` and `projectile`; motion, bounds and
//! health are common and live here.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{circle_out_of_bounds, circles_overlap};
use crate::heading;

/// A weapon is just a damage value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Weapon {
    pub damage: i32,
}

impl Weapon {
    pub fn new(damage: i32) -> Self {
        Self { damage }
    }
}

/// What an entity is, plus the state only that kind carries
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Enemy {
        /// Health at spawn, for health banding
        initial_health: i32,
        /// Coins awarded when defeated
        coin_value: u32,
    },
    Projectile {
        /// Struck a target this tick; removed on the next cleanup pass
        hit: bool,
        /// Left the room without hitting anything
        spent: bool,
    },
}

/// Physical dimensions and speeds, already scaled to pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Body {
    pub radius: f32,
    pub step: f32,
    /// Distance per tick
    pub speed: f32,
    /// Speed given to projectiles this entity fires
    pub projectile_speed: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub kind: EntityKind,
    pub pos: Vec2,
    pub weapon: Weapon,
    /// May drop to zero or below; never restored
    pub health: i32,
    /// Heading in radians
    pub direction: f32,
    pub speed: f32,
    pub projectile_speed: f32,
    radius: f32,
    step: f32,
    /// Distance owed from previous ticks that did not add up to a whole step
    remainder: Vec2,
}

impl Entity {
    pub fn new(kind: EntityKind, pos: Vec2, weapon: Weapon, health: i32, body: Body) -> Self {
        debug_assert!(body.radius > 0.0, "entity radius must be positive");
        debug_assert!(body.step > 0.0, "entity step must be positive");
        Self {
            kind,
            pos,
            weapon,
            health,
            direction: 0.0,
            speed: body.speed,
            projectile_speed: body.projectile_speed,
            radius: body.radius,
            step: body.step,
            remainder: Vec2::ZERO,
        }
    }

    #[inline]
    pub fn radius(&self) -> f32 {
        self.radius
    }

    #[inline]
    pub fn step(&self) -> f32 {
        self.step
    }

    /// Travel accumulated but not yet applied to `pos`
    #[inline]
    pub fn remainder(&self) -> Vec2 {
        self.remainder
    }

    /// Advance one tick along `direction` at `speed`, in whole steps
    ///
    /// The tick's displacement is added to the running remainder. Whole steps
    /// are peeled off along the remainder's angle; whatever is shorter than a
    /// step stays in the remainder for the next tick.
    pub fn advance(&mut self) {
        self.remainder += heading(self.direction) * self.speed;

        let mut distance = self.remainder.length();
        if distance < self.step {
            return;
        }

        let travel = heading(self.remainder.y.atan2(self.remainder.x));
        let stride = travel * self.step;
        while distance >= self.step {
            distance -= self.step;
            self.pos += stride;
        }

        // Both axes keep the travel angle: x by cos, y by sin
        self.remainder = travel * distance;
    }

    /// True if the hit-circle pokes outside `[0, width) x [0, height)`
    pub fn is_out_of_bounds(&self, width: f32, height: f32) -> bool {
        circle_out_of_bounds(self.pos, self.radius, Vec2::new(width, height))
    }

    /// Strict hit-circle overlap (tangency is not contact)
    pub fn intersects(&self, other: &Entity) -> bool {
        circles_overlap(self.pos, self.radius, other.pos, other.radius)
    }

    pub fn take_damage(&mut self, amount: i32) {
        self.health = self.health.saturating_sub(amount);
    }

    #[inline]
    pub fn is_defeated(&self) -> bool {
        self.health <= 0
    }

    /// Spawn health for enemies, current health for everything else
    pub fn initial_health(&self) -> i32 {
        match self.kind {
            EntityKind::Enemy { initial_health, .. } => initial_health,
            _ => self.health,
        }
    }

    /// Coins awarded for defeating this entity (only enemies carry any)
    pub fn coin_value(&self) -> u32 {
        match self.kind {
            EntityKind::Enemy { coin_value, .. } => coin_value,
            _ => 0,
        }
    }
}
