//! Headless autopilot that plays a run without a renderer
//!
//! Used by the native demo binary and for smoke tests. The policy is
//! deliberately simple: shoot the nearest enemy on a fixed cadence, back away
//! from it, and walk out through the closest wall once the room is clear.

use std::f32::consts::{FRAC_PI_2, PI};

use glam::Vec2;

use crate::angle_to;
use crate::sim::{SimError, Simulation};

/// One frame's worth of input
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Command {
    pub heading: Option<f32>,
    pub shot: Option<Vec2>,
}

#[derive(Debug, Clone)]
pub struct Autopilot {
    /// Ticks between shots (values below 1 fire every tick)
    pub fire_interval: u32,
    ticks: u32,
}

impl Default for Autopilot {
    fn default() -> Self {
        Self::new(4)
    }
}

impl Autopilot {
    pub fn new(fire_interval: u32) -> Self {
        Self {
            fire_interval,
            ticks: 0,
        }
    }

    /// Decide this frame's input from the current snapshot
    pub fn plan(&mut self, sim: &Simulation) -> Command {
        let (Some(player), Some(bounds)) = (sim.player(), sim.bounds()) else {
            return Command::default();
        };
        if sim.is_over() {
            return Command::default();
        }

        let firing_tick = self.ticks % self.fire_interval.max(1) == 0;
        self.ticks = self.ticks.wrapping_add(1);

        let nearest = sim.enemies().into_iter().min_by(|a, b| {
            a.pos
                .distance_squared(player.pos)
                .partial_cmp(&b.pos.distance_squared(player.pos))
                .unwrap_or(std::cmp::Ordering::Equal)
        });

        match nearest {
            Some(enemy) => Command {
                heading: Some(angle_to(enemy.pos, player.pos)),
                shot: firing_tick.then_some(enemy.pos),
            },
            None => Command {
                heading: Some(nearest_exit(player.pos, bounds)),
                shot: None,
            },
        }
    }

    /// Plan, feed the command to the simulation and advance one tick
    pub fn step(&mut self, sim: &mut Simulation) -> Result<bool, SimError> {
        let command = self.plan(sim);
        if let Some(heading) = command.heading {
            sim.set_desired_direction(heading)?;
        }
        if let Some(target) = command.shot {
            sim.fire_at(target)?;
        }
        sim.tick()
    }
}

/// Heading toward the wall closest to `pos`
fn nearest_exit(pos: Vec2, bounds: Vec2) -> f32 {
    let exits = [
        (pos.x, PI),
        (bounds.x - pos.x, 0.0),
        (pos.y, -FRAC_PI_2),
        (bounds.y - pos.y, FRAC_PI_2),
    ];
    exits
        .into_iter()
        .min_by(|a, b| a.0.partial_cmp(&b.0).unwrap_or(std::cmp::Ordering::Equal))
        .map_or(0.0, |(_, angle)| angle)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{GameStatus, SimConfig};

    fn quiet_sim(seed: u64) -> Simulation {
        let cfg = SimConfig {
            enemy_fire_chance: 0.0,
            ..Default::default()
        };
        Simulation::with_seed(cfg, seed).unwrap()
    }

    #[test]
    fn test_idle_before_start() {
        let sim = quiet_sim(1);
        let mut pilot = Autopilot::default();
        assert_eq!(pilot.plan(&sim), Command::default());
    }

    #[test]
    fn test_nearest_exit() {
        let bounds = Vec2::new(1000.0, 800.0);
        assert_eq!(nearest_exit(Vec2::new(10.0, 400.0), bounds), PI);
        assert_eq!(nearest_exit(Vec2::new(990.0, 400.0), bounds), 0.0);
        assert_eq!(nearest_exit(Vec2::new(500.0, 5.0), bounds), -FRAC_PI_2);
        assert_eq!(nearest_exit(Vec2::new(500.0, 790.0), bounds), FRAC_PI_2);
    }

    #[test]
    fn test_aims_at_nearest_enemy_on_cadence() {
        let mut sim = quiet_sim(2);
        sim.start(1200.0, 1200.0, 5, 1).unwrap();
        let player = sim.player().unwrap();
        let nearest = sim
            .enemies()
            .into_iter()
            .map(|e| e.pos)
            .min_by(|a, b| {
                a.distance_squared(player.pos)
                    .partial_cmp(&b.distance_squared(player.pos))
                    .unwrap()
            })
            .unwrap();

        let mut pilot = Autopilot::new(3);
        let first = pilot.plan(&sim);
        assert_eq!(first.shot, Some(nearest));
        let heading = first.heading.unwrap();
        assert!((heading - angle_to(nearest, player.pos)).abs() < 1e-5);

        assert!(pilot.plan(&sim).shot.is_none());
        assert!(pilot.plan(&sim).shot.is_none());
        assert!(pilot.plan(&sim).shot.is_some());
    }

    #[test]
    fn test_step_drives_run_to_completion_or_cap() {
        let mut sim = quiet_sim(5);
        sim.start(1080.0, 1920.0, 20, 1).unwrap();
        let mut pilot = Autopilot::new(2);
        let mut last_coins = 0;
        for _ in 0..20_000 {
            let running = pilot.step(&mut sim).unwrap();
            assert!(sim.collected_coins() >= last_coins);
            last_coins = sim.collected_coins();
            if !running {
                break;
            }
        }
        assert!(sim.has_started());
        if sim.is_over() {
            assert!(matches!(sim.status(), GameStatus::Over(_)));
            assert_eq!(pilot.plan(&sim), Command::default());
        }
    }
}
