//! Browser binding
//!
//! The host page owns the render loop and calls `tick` once per animation
//! frame, reading state back as JSON. The profile is kept in LocalStorage and
//! a finished run is banked into it automatically.

use glam::Vec2;
use wasm_bindgen::prelude::*;

use crate::profile::Profile;
use crate::sim::{SimConfig, Simulation};

fn js_err(err: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&err.to_string())
}

#[wasm_bindgen(start)]
pub fn wasm_main() {
    console_error_panic_hook::set_once();
    if console_log::init_with_level(log::Level::Info).is_err() {
        web_sys::console::warn_1(&"Logger already initialized".into());
    }
    log::info!("Dungeon Domination (web) loaded");
}

#[wasm_bindgen]
pub struct WebGame {
    sim: Simulation,
    profile: Profile,
    banked: bool,
}

#[wasm_bindgen]
impl WebGame {
    /// Create a game; pass a seed to replay a specific layout
    #[wasm_bindgen(constructor)]
    pub fn new(seed: Option<f64>, dp_to_px: Option<f32>) -> Result<WebGame, JsValue> {
        let config = SimConfig {
            dp_to_px: dp_to_px.unwrap_or(1.0),
            ..Default::default()
        };
        let sim = match seed {
            Some(seed) => Simulation::with_seed(config, seed as u64),
            None => Simulation::new(config),
        }
        .map_err(js_err)?;
        log::info!("Game initialized with seed: {}", sim.seed());

        Ok(WebGame {
            sim,
            profile: Profile::load(),
            banked: false,
        })
    }

    /// Start the run using the stored profile's weapon and difficulty
    pub fn start(&mut self, width: f32, height: f32) -> Result<(), JsValue> {
        let params = self.profile.run_params();
        self.sim
            .start(width, height, params.weapon_damage, params.difficulty)
            .map_err(js_err)
    }

    /// Advance one frame; `false` once the run is over
    pub fn tick(&mut self) -> Result<bool, JsValue> {
        let running = self.sim.tick().map_err(js_err)?;
        if self.sim.is_over() && !self.banked {
            self.banked = true;
            self.profile.bank_run(self.sim.collected_coins());
            self.profile.save();
        }
        Ok(running)
    }

    pub fn set_direction(&mut self, angle: f32) -> Result<(), JsValue> {
        self.sim.set_desired_direction(angle).map_err(js_err)
    }

    pub fn fire_at(&mut self, x: f32, y: f32) -> Result<(), JsValue> {
        self.sim.fire_at(Vec2::new(x, y)).map_err(js_err)
    }

    pub fn snapshot_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.sim.snapshot()).map_err(js_err)
    }

    /// Events since the last call, as a JSON array
    pub fn events_json(&mut self) -> Result<String, JsValue> {
        serde_json::to_string(&self.sim.drain_events()).map_err(js_err)
    }

    pub fn is_over(&self) -> bool {
        self.sim.is_over()
    }

    pub fn did_win(&self) -> bool {
        self.sim.did_win()
    }

    pub fn profile_json(&self) -> Result<String, JsValue> {
        serde_json::to_string(&self.profile).map_err(js_err)
    }

    /// Buy the next weapon upgrade; applies from the next game
    pub fn purchase_upgrade(&mut self) -> Result<u32, JsValue> {
        let price = self.profile.purchase_upgrade().map_err(js_err)?;
        self.profile.save();
        Ok(price)
    }

    pub fn set_difficulty(&mut self, name: &str) -> Result<(), JsValue> {
        let difficulty = crate::profile::Difficulty::from_str(name)
            .ok_or_else(|| JsValue::from_str("unknown difficulty"))?;
        self.profile.difficulty = difficulty;
        self.profile.save();
        Ok(())
    }
}
