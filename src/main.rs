//! Dungeon Domination headless demo
//!
//! Plays one run with the autopilot, banks the coins into the profile and
//! saves it. The browser build enters through `web::wasm_main` instead.

#[cfg(not(target_arch = "wasm32"))]
use dungeon_domination::{Autopilot, Profile, SimConfig, Simulation};

/// Upper bound on ticks so a stalemate cannot spin forever
#[cfg(not(target_arch = "wasm32"))]
const MAX_TICKS: u32 = 60 * 60 * 10;

#[cfg(not(target_arch = "wasm32"))]
const ROOM_WIDTH: f32 = 1080.0;
#[cfg(not(target_arch = "wasm32"))]
const ROOM_HEIGHT: f32 = 1920.0;

#[cfg(not(target_arch = "wasm32"))]
fn main() {
    env_logger::init();
    log::info!("Dungeon Domination (native) starting...");

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "profile.json".to_string());
    let mut profile = Profile::load_from(&path);
    let params = profile.run_params();
    log::info!(
        "Profile: {} coins, {} upgrades, difficulty {}",
        profile.coins,
        profile.weapon_upgrades,
        profile.difficulty.as_str()
    );

    let mut sim = match Simulation::new(SimConfig::default()) {
        Ok(sim) => sim,
        Err(err) => {
            log::error!("Could not create simulation: {err}");
            std::process::exit(1);
        }
    };
    if let Err(err) = sim.start(
        ROOM_WIDTH,
        ROOM_HEIGHT,
        params.weapon_damage,
        params.difficulty,
    ) {
        log::error!("Could not start run: {err}");
        std::process::exit(1);
    }

    let mut pilot = Autopilot::default();
    let mut ticks = 0;
    while ticks < MAX_TICKS {
        match pilot.step(&mut sim) {
            Ok(true) => ticks += 1,
            Ok(false) => break,
            Err(err) => {
                log::error!("Tick failed: {err}");
                break;
            }
        }
        for event in sim.drain_events() {
            log::debug!("{:?}", event);
        }
    }

    let coins = sim.collected_coins();
    if sim.is_over() {
        log::info!(
            "Run {} after {} ticks in room {} with {} coins",
            if sim.did_win() { "won" } else { "lost" },
            ticks,
            sim.room_index() + 1,
            coins
        );
    } else {
        log::warn!("Tick cap reached in room {}; banking anyway", sim.room_index() + 1);
    }

    profile.bank_run(coins);
    if let Err(err) = profile.save_to(&path) {
        log::error!("Could not save profile: {err}");
        std::process::exit(1);
    }
    println!("Collected {} coins, balance {}", coins, profile.coins);
}

#[cfg(target_arch = "wasm32")]
fn main() {
    // WASM entry point is web::wasm_main, this is just to satisfy the compiler
}
