//! A room: one wave of enemies plus the projectiles flying inside it
//!
//! The room owns its enemies and both projectile pools. Dead enemies and
//! spent projectiles are only flagged while a pool is being swept and are
//! compacted once per pass with `retain`.

use glam::Vec2;
use rand::Rng;
use serde::{Deserialize, Serialize};

use super::actor::enemy_turn;
use super::config::SimConfig;
use super::entity::Entity;
use super::state::GameEvent;
use crate::consts::MAX_GRUNTS;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Room {
    is_boss: bool,
    bounds: Vec2,
    pub(crate) enemies: Vec<Entity>,
    /// Fired by enemies, dangerous to the player
    pub(crate) hostile: Vec<Entity>,
    /// Fired by the player, dangerous to enemies
    pub(crate) friendly: Vec<Entity>,
}

impl Room {
    /// Populate a room: 1..=3 grunts, or a single boss
    ///
    /// Enemies appear at uniformly random positions inside `bounds`, with
    /// health and coin value scaled by `multiplier`.
    pub fn generate<R: Rng + ?Sized>(
        is_boss: bool,
        bounds: Vec2,
        multiplier: u32,
        cfg: &SimConfig,
        rng: &mut R,
    ) -> Self {
        let enemies = if is_boss {
            vec![Entity::boss(cfg, random_pos(bounds, rng), multiplier)]
        } else {
            let count = rng.random_range(1..=MAX_GRUNTS);
            (0..count)
                .map(|_| Entity::grunt(cfg, random_pos(bounds, rng), multiplier))
                .collect()
        };

        Self::with_enemies(is_boss, bounds, enemies)
    }

    /// Build a room around an explicit set of enemies
    pub fn with_enemies(is_boss: bool, bounds: Vec2, enemies: Vec<Entity>) -> Self {
        Self {
            is_boss,
            bounds,
            enemies,
            hostile: Vec::new(),
            friendly: Vec::new(),
        }
    }

    #[inline]
    pub fn is_boss(&self) -> bool {
        self.is_boss
    }

    #[inline]
    pub fn bounds(&self) -> Vec2 {
        self.bounds
    }

    pub fn enemies(&self) -> &[Entity] {
        &self.enemies
    }

    pub fn hostile_projectiles(&self) -> &[Entity] {
        &self.hostile
    }

    pub fn friendly_projectiles(&self) -> &[Entity] {
        &self.friendly
    }

    #[inline]
    pub fn enemy_count(&self) -> usize {
        self.enemies.len()
    }

    /// No enemies left; the player may walk out
    #[inline]
    pub fn is_cleared(&self) -> bool {
        self.enemies.is_empty()
    }

    /// Add a projectile fired by the player
    pub fn spawn_friendly(&mut self, shot: Entity) {
        self.friendly.push(shot);
    }

    /// Advance everything in the room by one tick
    ///
    /// Order: enemies chase and fire, defeated enemies pay out, hostile shots
    /// resolve against the player, friendly shots resolve against enemies.
    /// Returns the coins collected this tick.
    pub fn tick<R: Rng + ?Sized>(
        &mut self,
        player: &mut Entity,
        cfg: &SimConfig,
        rng: &mut R,
        events: &mut Vec<GameEvent>,
    ) -> u32 {
        let target = player.pos;
        for enemy in &mut self.enemies {
            if let Some(shot) = enemy_turn(enemy, target, cfg, rng) {
                self.hostile.push(shot);
            }
        }

        let coins = self.collect_defeated(events);
        self.resolve_hostile(player, events);
        self.resolve_friendly(events);
        coins
    }

    /// Remove enemies with no health left and total their coin values
    pub fn collect_defeated(&mut self, events: &mut Vec<GameEvent>) -> u32 {
        let mut coins = 0u32;
        self.enemies.retain(|enemy| {
            if enemy.is_defeated() {
                let value = enemy.coin_value();
                coins = coins.saturating_add(value);
                log::debug!("Enemy defeated at {:?} (+{} coins)", enemy.pos, value);
                events.push(GameEvent::EnemyDefeated {
                    pos: enemy.pos,
                    coins: value,
                });
                false
            } else {
                true
            }
        });
        coins
    }

    fn resolve_hostile(&mut self, player: &mut Entity, events: &mut Vec<GameEvent>) {
        for shot in &mut self.hostile {
            shot.advance();
            if shot.intersects(player) {
                shot.mark_hit();
                player.take_damage(shot.damage());
                events.push(GameEvent::PlayerHit {
                    damage: shot.damage(),
                    health: player.health,
                });
            }
            shot.cull_if_off_screen(self.bounds);
        }
        self.hostile.retain(|shot| !shot.is_spent());
    }

    fn resolve_friendly(&mut self, events: &mut Vec<GameEvent>) {
        for shot in &mut self.friendly {
            shot.advance();
            if let Some(index) = shot.first_hit(&self.enemies) {
                shot.mark_hit();
                let enemy = &mut self.enemies[index];
                enemy.take_damage(shot.damage());
                events.push(GameEvent::EnemyHit {
                    pos: enemy.pos,
                    damage: shot.damage(),
                });
            }
            shot.cull_if_off_screen(self.bounds);
        }
        self.friendly.retain(|shot| !shot.is_spent());
    }
}

fn random_pos<R: Rng + ?Sized>(bounds: Vec2, rng: &mut R) -> Vec2 {
    Vec2::new(
        rng.random_range(0.0..bounds.x),
        rng.random_range(0.0..bounds.y),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::entity::Weapon;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn quiet() -> SimConfig {
        SimConfig {
            enemy_fire_chance: 0.0,
            ..Default::default()
        }
    }

    #[test]
    fn test_regular_room_population() {
        let cfg = SimConfig::default();
        let bounds = Vec2::new(1080.0, 1920.0);
        let mut rng = Pcg32::seed_from_u64(42);
        for _ in 0..50 {
            let room = Room::generate(false, bounds, 2, &cfg, &mut rng);
            assert!(!room.is_boss());
            assert!((1..=3).contains(&room.enemy_count()));
            for enemy in room.enemies() {
                assert_eq!(enemy.health, 200);
                assert_eq!(enemy.coin_value(), 2);
                assert!(enemy.pos.x >= 0.0 && enemy.pos.x < bounds.x);
                assert!(enemy.pos.y >= 0.0 && enemy.pos.y < bounds.y);
            }
            assert!(room.hostile_projectiles().is_empty());
            assert!(room.friendly_projectiles().is_empty());
        }
    }

    #[test]
    fn test_boss_room_has_one_scaled_boss() {
        let cfg = SimConfig::default();
        let mut rng = Pcg32::seed_from_u64(3);
        let room = Room::generate(true, Vec2::new(800.0, 600.0), 3, &cfg, &mut rng);
        assert!(room.is_boss());
        assert_eq!(room.enemy_count(), 1);
        let boss = &room.enemies()[0];
        assert_eq!(boss.health, 1500);
        assert_eq!(boss.coin_value(), 75);
        assert_eq!(boss.weapon.damage, 20);
    }

    #[test]
    fn test_coin_yield_counted_once() {
        let cfg = quiet();
        let mut enemies: Vec<Entity> = (0..3)
            .map(|i| Entity::grunt(&cfg, Vec2::new(100.0 * i as f32, 50.0), 2))
            .collect();
        enemies.push(Entity::grunt(&cfg, Vec2::new(500.0, 500.0), 2));
        for enemy in enemies.iter_mut().take(3) {
            enemy.health = 0;
        }
        let mut room = Room::with_enemies(false, Vec2::new(1000.0, 1000.0), enemies);
        let mut events = Vec::new();

        assert_eq!(room.collect_defeated(&mut events), 6);
        assert_eq!(room.enemy_count(), 1);
        assert_eq!(room.collect_defeated(&mut events), 0);
        assert_eq!(
            events
                .iter()
                .filter(|e| matches!(e, GameEvent::EnemyDefeated { .. }))
                .count(),
            3
        );
    }

    #[test]
    fn test_hostile_shot_damages_player_once() {
        let cfg = quiet();
        let mut rng = Pcg32::seed_from_u64(1);
        let bounds = Vec2::new(1000.0, 1000.0);
        let mut player = Entity::player(&cfg, Vec2::new(500.0, 500.0), 5);
        let grunt = Entity::grunt(&cfg, Vec2::new(900.0, 900.0), 1);
        let mut room = Room::with_enemies(false, bounds, vec![grunt]);
        room.hostile.push(Entity::projectile(
            &cfg,
            Vec2::new(440.0, 500.0),
            Weapon::new(5),
            15.0,
            player.pos,
        ));

        let mut events = Vec::new();
        room.tick(&mut player, &cfg, &mut rng, &mut events);
        assert_eq!(player.health, 95);
        assert!(room.hostile_projectiles().is_empty());

        room.tick(&mut player, &cfg, &mut rng, &mut events);
        assert_eq!(player.health, 95);
        assert!(events.contains(&GameEvent::PlayerHit {
            damage: 5,
            health: 95
        }));
    }

    /// Boss at multiplier 1 has 500 health; a 25-damage weapon needs exactly
    /// 20 hits, and the boss pays out 25 coins on the sweep after the last hit.
    #[test]
    fn test_boss_falls_after_twenty_hits() {
        let cfg = quiet();
        let mut rng = Pcg32::seed_from_u64(9);
        let bounds = Vec2::new(2000.0, 2000.0);
        let mut player = Entity::player(&cfg, Vec2::new(100.0, 100.0), 25);
        let boss = Entity::boss(&cfg, Vec2::new(1500.0, 1500.0), 1);
        let mut room = Room::with_enemies(true, bounds, vec![boss]);
        let mut events = Vec::new();

        for hit in 1..=20 {
            let boss_pos = room.enemies()[0].pos;
            let origin = boss_pos - Vec2::new(10.0, 0.0);
            room.spawn_friendly(Entity::projectile(
                &cfg,
                origin,
                player.weapon,
                player.projectile_speed,
                boss_pos,
            ));
            let coins = room.tick(&mut player, &cfg, &mut rng, &mut events);
            assert_eq!(coins, 0);
            assert_eq!(room.enemies()[0].health, 500 - 25 * hit);
        }
        assert!(room.enemies()[0].is_defeated());
        assert!(room.friendly_projectiles().is_empty());

        let coins = room.tick(&mut player, &cfg, &mut rng, &mut events);
        assert_eq!(coins, 25);
        assert!(room.is_cleared());
        assert_eq!(player.health, 100);
    }

    #[test]
    fn test_missed_shots_are_culled_off_screen() {
        let cfg = quiet();
        let mut rng = Pcg32::seed_from_u64(5);
        let bounds = Vec2::new(400.0, 400.0);
        let mut player = Entity::player(&cfg, Vec2::new(200.0, 200.0), 5);
        let mut room = Room::with_enemies(false, bounds, Vec::new());
        room.spawn_friendly(player.fire_at(&cfg, Vec2::new(200.0, 0.0)));

        let mut events = Vec::new();
        let mut ticks = 0;
        while !room.friendly_projectiles().is_empty() {
            room.tick(&mut player, &cfg, &mut rng, &mut events);
            ticks += 1;
            assert!(ticks < 20, "shot never left the room");
        }
        assert!(events.is_empty());
    }
}
