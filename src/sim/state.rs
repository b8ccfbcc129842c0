//! Simulation state, lifecycle and read-only views
//!
//! A `Simulation` is built once per run: `NotStarted`, then `Running` after
//! `start`, then `Over` for good. Input arriving between frames is buffered
//! and applied at the start of the next tick (see `tick`).

use std::collections::VecDeque;

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::actor::HealthBand;
use super::config::SimConfig;
use super::entity::Entity;
use super::error::SimError;
use super::room::Room;
use super::tick::TickInput;
use crate::consts::{BOSS_HEALTH, PLAYER_RADIUS};

/// How a finished run ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    /// Walked out of the cleared boss room
    Won,
    /// Health ran out or an enemy touched the player
    Lost,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GameStatus {
    NotStarted,
    Running,
    /// Terminal; a new `Simulation` is needed to play again
    Over(Outcome),
}

/// Notable things that happened during a tick, for audio and HUD cues
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum GameEvent {
    RoomEntered { index: u32, boss: bool },
    EnemyHit { pos: Vec2, damage: i32 },
    EnemyDefeated { pos: Vec2, coins: u32 },
    PlayerHit { damage: i32, health: i32 },
    RunWon { coins: u32 },
    RunLost { coins: u32 },
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlayerView {
    pub pos: Vec2,
    pub health: i32,
    pub radius: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct EnemyView {
    pub pos: Vec2,
    pub health: i32,
    pub initial_health: i32,
    pub radius: f32,
    pub band: HealthBand,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ProjectileView {
    pub pos: Vec2,
    pub radius: f32,
}

/// Everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub status: GameStatus,
    pub player: Option<PlayerView>,
    pub enemies: Vec<EnemyView>,
    pub hostile_projectiles: Vec<ProjectileView>,
    pub friendly_projectiles: Vec<ProjectileView>,
    pub collected_coins: u32,
    pub rooms_remaining: usize,
    pub boss_room: bool,
}

impl From<&Entity> for PlayerView {
    fn from(e: &Entity) -> Self {
        Self {
            pos: e.pos,
            health: e.health,
            radius: e.radius(),
        }
    }
}

impl From<&Entity> for EnemyView {
    fn from(e: &Entity) -> Self {
        Self {
            pos: e.pos,
            health: e.health,
            initial_health: e.initial_health(),
            radius: e.radius(),
            band: e.health_band(),
        }
    }
}

impl From<&Entity> for ProjectileView {
    fn from(e: &Entity) -> Self {
        Self {
            pos: e.pos,
            radius: e.radius(),
        }
    }
}

/// State that only exists once a run has started
#[derive(Debug, Clone)]
pub(crate) struct Run {
    pub player: Entity,
    /// Rooms still ahead, boss room last
    pub rooms: VecDeque<Room>,
    pub current: Room,
    pub bounds: Vec2,
    /// Never decreases within a run
    pub collected_coins: u32,
    /// 0-based index of `current` in the run
    pub room_index: u32,
}

#[derive(Debug)]
pub struct Simulation {
    pub(crate) config: SimConfig,
    seed: u64,
    pub(crate) rng: Pcg32,
    pub(crate) status: GameStatus,
    pub(crate) run: Option<Run>,
    pub(crate) input: TickInput,
    pub(crate) events: Vec<GameEvent>,
}

impl Simulation {
    /// New simulation seeded from the OS
    pub fn new(config: SimConfig) -> Result<Self, SimError> {
        Self::with_seed(config, rand::random())
    }

    /// New simulation with a fixed seed (for tests and bug reports)
    pub fn with_seed(config: SimConfig, seed: u64) -> Result<Self, SimError> {
        config.validate()?;
        Ok(Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            status: GameStatus::NotStarted,
            run: None,
            input: TickInput::default(),
            events: Vec::new(),
        })
    }

    /// Build the room sequence and drop the player in the middle of the first room
    ///
    /// `difficulty` multiplies enemy health and coin values.
    pub fn start(
        &mut self,
        width: f32,
        height: f32,
        weapon_damage: i32,
        difficulty: u32,
    ) -> Result<(), SimError> {
        if self.status != GameStatus::NotStarted {
            return Err(SimError::AlreadyStarted);
        }
        // Room must fit the player with clearance on both sides
        let min_extent = 2.0 * (self.config.px(PLAYER_RADIUS) + self.config.edge_offset);
        let fits = |extent: f32| extent.is_finite() && extent > min_extent;
        if !fits(width) || !fits(height) {
            return Err(SimError::InvalidBounds { width, height });
        }
        // The boss has the most health, so it bounds the usable multiplier
        let scaled_boss = i32::try_from(difficulty)
            .ok()
            .and_then(|m| BOSS_HEALTH.checked_mul(m));
        if difficulty == 0 || scaled_boss.is_none() {
            return Err(SimError::InvalidDifficulty);
        }
        if weapon_damage < 0 {
            return Err(SimError::InvalidWeaponDamage(weapon_damage));
        }

        let bounds = Vec2::new(width, height);
        let total_rooms = self
            .rng
            .random_range(self.config.min_rooms..=self.config.max_rooms);

        let current = Room::generate(false, bounds, difficulty, &self.config, &mut self.rng);
        let mut rooms: VecDeque<Room> = (0..total_rooms - 2)
            .map(|_| Room::generate(false, bounds, difficulty, &self.config, &mut self.rng))
            .collect();
        rooms.push_back(Room::generate(
            true,
            bounds,
            difficulty,
            &self.config,
            &mut self.rng,
        ));

        log::info!(
            "Run started: seed={}, rooms={}, bounds={}x{}, damage={}, difficulty={}",
            self.seed,
            total_rooms,
            width,
            height,
            weapon_damage,
            difficulty
        );

        self.run = Some(Run {
            player: Entity::player(&self.config, bounds / 2.0, weapon_damage),
            rooms,
            current,
            bounds,
            collected_coins: 0,
            room_index: 0,
        });
        self.status = GameStatus::Running;
        self.events.push(GameEvent::RoomEntered {
            index: 0,
            boss: false,
        });
        Ok(())
    }

    /// Buffer a new heading for the player (applied on the next tick)
    pub fn set_desired_direction(&mut self, angle: f32) -> Result<(), SimError> {
        if self.status == GameStatus::NotStarted {
            return Err(SimError::NotStarted);
        }
        if !angle.is_finite() {
            log::warn!("Ignoring non-finite heading {}", angle);
            return Ok(());
        }
        self.input.heading = Some(angle);
        Ok(())
    }

    /// Queue a player shot at `point` (spawned on the next tick)
    ///
    /// Shots requested after the run is over are dropped.
    pub fn fire_at(&mut self, point: Vec2) -> Result<(), SimError> {
        match self.status {
            GameStatus::NotStarted => Err(SimError::NotStarted),
            GameStatus::Over(_) => {
                log::debug!("Run is over, dropping shot at {:?}", point);
                Ok(())
            }
            GameStatus::Running => {
                self.input.shots.push(point);
                Ok(())
            }
        }
    }

    pub(crate) fn finish(&mut self, outcome: Outcome) {
        let coins = self.collected_coins();
        self.status = GameStatus::Over(outcome);
        self.events.push(match outcome {
            Outcome::Won => GameEvent::RunWon { coins },
            Outcome::Lost => GameEvent::RunLost { coins },
        });
        log::info!("Run over: {:?}, coins collected: {}", outcome, coins);
    }

    #[inline]
    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn has_started(&self) -> bool {
        self.status != GameStatus::NotStarted
    }

    pub fn is_over(&self) -> bool {
        matches!(self.status, GameStatus::Over(_))
    }

    pub fn did_win(&self) -> bool {
        self.status == GameStatus::Over(Outcome::Won)
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// Room dimensions, once started
    pub fn bounds(&self) -> Option<Vec2> {
        self.run.as_ref().map(|run| run.bounds)
    }

    pub fn player(&self) -> Option<PlayerView> {
        self.run.as_ref().map(|run| PlayerView::from(&run.player))
    }

    pub fn enemies(&self) -> Vec<EnemyView> {
        self.current_room()
            .map(|room| room.enemies().iter().map(EnemyView::from).collect())
            .unwrap_or_default()
    }

    pub fn hostile_projectiles(&self) -> Vec<ProjectileView> {
        self.current_room()
            .map(|room| room.hostile_projectiles().iter().map(ProjectileView::from).collect())
            .unwrap_or_default()
    }

    pub fn friendly_projectiles(&self) -> Vec<ProjectileView> {
        self.current_room()
            .map(|room| room.friendly_projectiles().iter().map(ProjectileView::from).collect())
            .unwrap_or_default()
    }

    pub fn collected_coins(&self) -> u32 {
        self.run.as_ref().map_or(0, |run| run.collected_coins)
    }

    /// Rooms still queued after the current one
    pub fn rooms_remaining(&self) -> usize {
        self.run.as_ref().map_or(0, |run| run.rooms.len())
    }

    /// 0-based index of the room the player is in
    pub fn room_index(&self) -> u32 {
        self.run.as_ref().map_or(0, |run| run.room_index)
    }

    pub fn in_boss_room(&self) -> bool {
        self.current_room().is_some_and(Room::is_boss)
    }

    pub fn current_room(&self) -> Option<&Room> {
        self.run.as_ref().map(|run| &run.current)
    }

    /// Take the events produced since the last call
    pub fn drain_events(&mut self) -> Vec<GameEvent> {
        std::mem::take(&mut self.events)
    }

    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            status: self.status,
            player: self.player(),
            enemies: self.enemies(),
            hostile_projectiles: self.hostile_projectiles(),
            friendly_projectiles: self.friendly_projectiles(),
            collected_coins: self.collected_coins(),
            rooms_remaining: self.rooms_remaining(),
            boss_room: self.in_boss_room(),
        }
    }
}
