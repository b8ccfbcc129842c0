//! Per-frame simulation tick
//!
//! Core game loop: applies buffered input, handles the room edges, advances
//! the player and the current room, then decides whether the run is over.

use glam::Vec2;
use rand::Rng;

use super::collision::{EdgeResponse, resolve_edge};
use super::config::SimConfig;
use super::error::SimError;
use super::state::{GameEvent, GameStatus, Outcome, Run, Simulation};

/// Input collected between ticks
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Latest heading from the tilt sensor; held until replaced
    pub heading: Option<f32>,
    /// Points tapped since the last tick, one shot each
    pub shots: Vec<Vec2>,
}

impl Simulation {
    /// Advance the whole simulation by one frame
    ///
    /// Returns `Ok(true)` while the run continues and `Ok(false)` once it is
    /// over; ticking a finished run changes nothing.
    pub fn tick(&mut self) -> Result<bool, SimError> {
        match self.status {
            GameStatus::NotStarted => return Err(SimError::NotStarted),
            GameStatus::Over(_) => return Ok(false),
            GameStatus::Running => {}
        }
        let Some(run) = self.run.as_mut() else {
            return Err(SimError::NotStarted);
        };

        let input = std::mem::take(&mut self.input);
        match tick_run(run, input, &self.config, &mut self.rng, &mut self.events) {
            Some(outcome) => {
                self.finish(outcome);
                Ok(false)
            }
            None => Ok(true),
        }
    }
}

/// Advance a running game by one tick; `Some` when the run just ended
pub(crate) fn tick_run<R: Rng + ?Sized>(
    run: &mut Run,
    input: TickInput,
    cfg: &SimConfig,
    rng: &mut R,
    events: &mut Vec<GameEvent>,
) -> Option<Outcome> {
    if let Some(heading) = input.heading {
        run.player.direction = heading;
    }
    for target in input.shots {
        let shot = run.player.fire_at(cfg, target);
        log::debug!("Player fires at {:?}", target);
        run.current.spawn_friendly(shot);
    }

    let bounds = run.bounds;
    let radius = run.player.radius();
    let out_of_bounds = run.player.is_out_of_bounds(bounds.x, bounds.y);

    if out_of_bounds && run.current.is_cleared() {
        // Cleared room and the player walked off an edge: next room, or the end
        let Some(next) = run.rooms.pop_front() else {
            return Some(Outcome::Won);
        };
        run.current = next;
        run.room_index += 1;
        run.player.pos = resolve_edge(
            run.player.pos,
            radius,
            bounds,
            cfg.edge_offset,
            EdgeResponse::Wrap,
        );
        let boss = run.current.is_boss();
        log::info!(
            "Entered room {} ({} enemies{})",
            run.room_index,
            run.current.enemy_count(),
            if boss { ", boss" } else { "" }
        );
        events.push(GameEvent::RoomEntered {
            index: run.room_index,
            boss,
        });
    } else if out_of_bounds {
        // Live enemies keep the doors shut
        run.player.pos = resolve_edge(
            run.player.pos,
            radius,
            bounds,
            cfg.edge_offset,
            EdgeResponse::Clamp,
        );
    } else {
        run.player.advance();
    }

    let coins = run.current.tick(&mut run.player, cfg, rng, events);
    run.collected_coins = run.collected_coins.saturating_add(coins);

    let touched = run
        .current
        .enemies()
        .iter()
        .any(|enemy| run.player.intersects(enemy));
    if touched || run.player.is_defeated() {
        run.player.health = 0;
        return Some(Outcome::Lost);
    }
    None
}
