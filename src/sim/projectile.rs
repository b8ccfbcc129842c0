//! Projectiles: short-lived entities that strike the opposing side

use glam::Vec2;

use super::collision::{circle_off_screen, first_overlap};
use super::config::SimConfig;
use super::entity::{Body, Entity, EntityKind, Weapon};
use crate::angle_to;
use crate::consts::{PROJECTILE_RADIUS, PROJECTILE_STEP};

impl Entity {
    /// Fire a projectile from `origin` toward `destination`
    ///
    /// Carries the firer's weapon (and so its damage). Has no health and no
    /// projectile speed of its own.
    pub fn projectile(
        cfg: &SimConfig,
        origin: Vec2,
        weapon: Weapon,
        speed: f32,
        destination: Vec2,
    ) -> Self {
        let mut shot = Entity::new(
            EntityKind::Projectile {
                hit: false,
                spent: false,
            },
            origin,
            weapon,
            0,
            Body {
                radius: cfg.px(PROJECTILE_RADIUS),
                step: cfg.px(PROJECTILE_STEP),
                speed,
                projectile_speed: 0.0,
            },
        );
        shot.direction = angle_to(origin, destination);
        shot
    }

    /// Fire at `target` using this entity's weapon and projectile speed
    pub fn fire_at(&self, cfg: &SimConfig, target: Vec2) -> Entity {
        Entity::projectile(cfg, self.pos, self.weapon, self.projectile_speed, target)
    }

    /// Index of the first candidate this projectile overlaps
    pub fn first_hit(&self, candidates: &[Entity]) -> Option<usize> {
        first_overlap(
            self.pos,
            self.radius(),
            candidates.iter().map(|c| (c.pos, c.radius())),
        )
    }

    /// Damage this projectile deals on impact
    #[inline]
    pub fn damage(&self) -> i32 {
        self.weapon.damage
    }

    /// Flag a projectile as having struck something. Idempotent.
    pub fn mark_hit(&mut self) {
        if let EntityKind::Projectile { hit, .. } = &mut self.kind {
            *hit = true;
        }
    }

    pub fn is_hit(&self) -> bool {
        matches!(self.kind, EntityKind::Projectile { hit: true, .. })
    }

    /// Flag the projectile as spent once nothing of it is left on screen
    pub fn cull_if_off_screen(&mut self, bounds: Vec2) {
        let gone = circle_off_screen(self.pos, self.radius(), bounds);
        if let EntityKind::Projectile { spent, .. } = &mut self.kind {
            *spent |= gone;
        }
    }

    /// Hit or culled; removed on the next cleanup pass
    pub fn is_spent(&self) -> bool {
        matches!(
            self.kind,
            EntityKind::Projectile { hit: true, .. } | EntityKind::Projectile { spent: true, .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::FRAC_PI_2;

    fn cfg() -> SimConfig {
        SimConfig::default()
    }

    fn target(pos: Vec2, radius: f32) -> Entity {
        Entity::new(
            EntityKind::Enemy {
                initial_health: 100,
                coin_value: 1,
            },
            pos,
            Weapon::new(5),
            100,
            Body {
                radius,
                step: 2.5,
                speed: 2.0,
                projectile_speed: 15.0,
            },
        )
    }

    #[test]
    fn test_spawn_aims_at_destination() {
        let shot = Entity::projectile(
            &cfg(),
            Vec2::new(100.0, 100.0),
            Weapon::new(25),
            40.0,
            Vec2::new(100.0, 300.0),
        );
        assert!((shot.direction - FRAC_PI_2).abs() < 1e-6);
        assert_eq!(shot.health, 0);
        assert_eq!(shot.projectile_speed, 0.0);
        assert_eq!(shot.damage(), 25);
        assert_eq!(shot.radius(), PROJECTILE_RADIUS);
        assert!(!shot.is_spent());
    }

    #[test]
    fn test_projectile_travels_toward_target() {
        let mut shot = Entity::projectile(
            &cfg(),
            Vec2::new(0.0, 0.0),
            Weapon::new(5),
            15.0,
            Vec2::new(300.0, 400.0),
        );
        shot.advance();
        assert!((shot.pos - Vec2::new(9.0, 12.0)).length() < 1e-3);
    }

    #[test]
    fn test_first_hit_uses_sum_of_radii() {
        let shot = Entity::projectile(
            &cfg(),
            Vec2::new(100.0, 100.0),
            Weapon::new(5),
            40.0,
            Vec2::new(200.0, 100.0),
        );
        // 20 + 30 = 50: exactly 50 away is tangent, not a hit
        let enemies = vec![
            target(Vec2::new(150.0, 100.0), 30.0),
            target(Vec2::new(100.0, 149.0), 30.0),
            target(Vec2::new(101.0, 100.0), 30.0),
        ];
        assert_eq!(shot.first_hit(&enemies), Some(1));
        assert_eq!(shot.first_hit(&enemies[..1]), None);
        assert_eq!(shot.first_hit(&[]), None);
    }

    #[test]
    fn test_mark_hit_is_idempotent() {
        let mut shot = Entity::projectile(&cfg(), Vec2::ZERO, Weapon::new(5), 1.0, Vec2::X);
        shot.mark_hit();
        shot.mark_hit();
        assert!(shot.is_hit());
        assert!(shot.is_spent());
    }

    #[test]
    fn test_off_screen_projectile_is_spent() {
        let bounds = Vec2::new(400.0, 400.0);
        let mut shot = Entity::projectile(&cfg(), Vec2::new(390.0, 200.0), Weapon::new(5), 1.0, Vec2::X);
        shot.cull_if_off_screen(bounds);
        assert!(!shot.is_spent());

        shot.pos = Vec2::new(421.0, 200.0);
        shot.cull_if_off_screen(bounds);
        assert!(shot.is_spent());
        assert!(!shot.is_hit());
    }

    #[test]
    fn test_mark_hit_ignores_non_projectiles() {
        let mut enemy = target(Vec2::ZERO, 30.0);
        enemy.mark_hit();
        assert!(!enemy.is_hit());
        assert!(!enemy.is_spent());
    }
}
