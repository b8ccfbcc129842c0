//! Player and enemy specializations
//!
//! Enemies chase the player directly and fire at random; the player is
//! steered and fires only on command.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::config::SimConfig;
use super::entity::{Body, Entity, EntityKind, Weapon};
use crate::angle_to;
use crate::consts::*;

/// Coarse health bucket used to tint enemies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum HealthBand {
    Healthy,
    /// At or below half of spawn health
    Wounded,
    /// At or below a quarter of spawn health
    Critical,
}

impl HealthBand {
    pub fn classify(health: i32, initial_health: i32) -> Self {
        if health <= initial_health / 4 {
            HealthBand::Critical
        } else if health <= initial_health / 2 {
            HealthBand::Wounded
        } else {
            HealthBand::Healthy
        }
    }
}

impl Entity {
    pub fn player(cfg: &SimConfig, pos: Vec2, weapon_damage: i32) -> Self {
        Entity::new(
            EntityKind::Player,
            pos,
            Weapon::new(weapon_damage),
            cfg.player_health,
            Body {
                radius: cfg.px(PLAYER_RADIUS),
                step: cfg.px(PLAYER_STEP),
                speed: cfg.px(PLAYER_SPEED),
                projectile_speed: cfg.px(PLAYER_PROJECTILE_SPEED),
            },
        )
    }

    /// A regular enemy with health and coin value scaled by `multiplier`
    pub fn grunt(cfg: &SimConfig, pos: Vec2, multiplier: u32) -> Self {
        Entity::enemy(
            pos,
            GRUNT_DAMAGE,
            GRUNT_HEALTH.saturating_mul(health_scale(multiplier)),
            GRUNT_COINS.saturating_mul(multiplier),
            Body {
                radius: cfg.px(GRUNT_RADIUS),
                step: cfg.px(GRUNT_STEP),
                speed: cfg.px(ENEMY_SPEED),
                projectile_speed: cfg.px(ENEMY_PROJECTILE_SPEED),
            },
        )
    }

    /// The boss: bigger, tougher, harder hitting and worth more
    pub fn boss(cfg: &SimConfig, pos: Vec2, multiplier: u32) -> Self {
        Entity::enemy(
            pos,
            BOSS_DAMAGE,
            BOSS_HEALTH.saturating_mul(health_scale(multiplier)),
            BOSS_COINS.saturating_mul(multiplier),
            Body {
                radius: cfg.px(BOSS_RADIUS),
                step: cfg.px(BOSS_STEP),
                speed: cfg.px(ENEMY_SPEED),
                projectile_speed: cfg.px(ENEMY_PROJECTILE_SPEED),
            },
        )
    }

    fn enemy(pos: Vec2, damage: i32, health: i32, coin_value: u32, body: Body) -> Self {
        Entity::new(
            EntityKind::Enemy {
                initial_health: health,
                coin_value,
            },
            pos,
            Weapon::new(damage),
            health,
            body,
        )
    }

    /// Turn toward `target` and advance one tick. No path memory.
    pub fn pursue(&mut self, target: Vec2) {
        self.direction = angle_to(self.pos, target);
        self.advance();
    }

    pub fn health_band(&self) -> HealthBand {
        HealthBand::classify(self.health, self.initial_health())
    }
}

/// Health multiplier; saturates instead of wrapping negative
fn health_scale(multiplier: u32) -> i32 {
    i32::try_from(multiplier).unwrap_or(i32::MAX)
}

/// One enemy's turn: chase the target, then maybe shoot at it
pub fn enemy_turn<R: Rng + ?Sized>(
    enemy: &mut Entity,
    target: Vec2,
    cfg: &SimConfig,
    rng: &mut R,
) -> Option<Entity> {
    enemy.pursue(target);
    if rng.random_bool(cfg.enemy_fire_chance) {
        log::debug!("Enemy at {:?} fires at {:?}", enemy.pos, target);
        Some(enemy.fire_at(cfg, target))
    } else {
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    #[test]
    fn test_grunt_scales_with_multiplier() {
        let cfg = SimConfig::default();
        let grunt = Entity::grunt(&cfg, Vec2::new(50.0, 50.0), 2);
        assert_eq!(grunt.health, 200);
        assert_eq!(grunt.initial_health(), 200);
        assert_eq!(grunt.coin_value(), 2);
        assert_eq!(grunt.weapon.damage, GRUNT_DAMAGE);
        assert_eq!(grunt.radius(), GRUNT_RADIUS);
    }

    #[test]
    fn test_boss_stats() {
        let cfg = SimConfig::default();
        let boss = Entity::boss(&cfg, Vec2::ZERO, 1);
        assert_eq!(boss.health, 500);
        assert_eq!(boss.weapon.damage, 20);
        assert_eq!(boss.coin_value(), 25);
        assert_eq!(boss.radius(), 80.0);
        assert_eq!(boss.step(), 1.0);
    }

    #[test]
    fn test_player_scaled_by_density() {
        let cfg = SimConfig {
            dp_to_px: 2.0,
            ..Default::default()
        };
        let player = Entity::player(&cfg, Vec2::ZERO, 10);
        assert_eq!(player.radius(), 70.0);
        assert_eq!(player.step(), 5.0);
        assert_eq!(player.speed, 12.0);
        assert_eq!(player.projectile_speed, 80.0);
        assert_eq!(player.health, PLAYER_HEALTH);
        assert_eq!(player.weapon.damage, 10);
    }

    #[test]
    fn test_pursuit_closes_distance() {
        let cfg = SimConfig::default();
        let mut grunt = Entity::grunt(&cfg, Vec2::new(0.0, 0.0), 1);
        let target = Vec2::new(300.0, 400.0);
        let before = grunt.pos.distance(target);
        for _ in 0..10 {
            grunt.pursue(target);
        }
        let after = grunt.pos.distance(target);
        assert!(before - after > 17.0, "moved {}", before - after);
        // Heading recomputed every tick
        assert!((grunt.direction - angle_to(grunt.pos, target)).abs() < 1e-3);
    }

    #[test]
    fn test_enemy_turn_fire_chance_extremes() {
        let mut rng = Pcg32::seed_from_u64(7);
        let target = Vec2::new(200.0, 0.0);

        let never = SimConfig {
            enemy_fire_chance: 0.0,
            ..Default::default()
        };
        let mut grunt = Entity::grunt(&never, Vec2::ZERO, 1);
        for _ in 0..100 {
            assert!(enemy_turn(&mut grunt, target, &never, &mut rng).is_none());
        }

        let always = SimConfig {
            enemy_fire_chance: 1.0,
            ..Default::default()
        };
        let mut grunt = Entity::grunt(&always, Vec2::ZERO, 1);
        let shot = enemy_turn(&mut grunt, target, &always, &mut rng).unwrap();
        assert_eq!(shot.damage(), GRUNT_DAMAGE);
        assert_eq!(shot.speed, ENEMY_PROJECTILE_SPEED);
        assert_eq!(shot.pos, grunt.pos);
    }

    #[test]
    fn test_huge_multiplier_never_spawns_defeated() {
        let cfg = SimConfig::default();
        let grunt = Entity::grunt(&cfg, Vec2::ZERO, 3_000_000_000);
        assert_eq!(grunt.health, i32::MAX);
        assert!(!grunt.is_defeated());
        let boss = Entity::boss(&cfg, Vec2::ZERO, u32::MAX);
        assert_eq!(boss.health, i32::MAX);
        assert_eq!(boss.coin_value(), u32::MAX);
    }

    #[test]
    fn test_health_bands() {
        assert_eq!(HealthBand::classify(100, 100), HealthBand::Healthy);
        assert_eq!(HealthBand::classify(51, 100), HealthBand::Healthy);
        assert_eq!(HealthBand::classify(50, 100), HealthBand::Wounded);
        assert_eq!(HealthBand::classify(26, 100), HealthBand::Wounded);
        assert_eq!(HealthBand::classify(25, 100), HealthBand::Critical);
        assert_eq!(HealthBand::classify(-5, 100), HealthBand::Critical);
    }
}
