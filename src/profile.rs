//! Player profile: coin balance, weapon upgrades and preferences
//!
//! Persisted as JSON. On the web the profile lives in LocalStorage; natively
//! it is read from and written to a file chosen by the caller.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Weapon upgrade prices, in purchase order
pub const UPGRADE_PRICES: [u32; 3] = [100, 1000, 5000];

/// Damage of the starting weapon; each upgrade adds the same again
pub const BASE_WEAPON_DAMAGE: i32 = 5;

/// Enemy health and coin multiplier chosen on the settings screen
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum Difficulty {
    #[default]
    Easy,
    Medium,
    Hard,
}

impl Difficulty {
    pub fn multiplier(&self) -> u32 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Difficulty::Easy => "Easy",
            Difficulty::Medium => "Medium",
            Difficulty::Hard => "Hard",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "easy" | "1" => Some(Difficulty::Easy),
            "medium" | "med" | "2" => Some(Difficulty::Medium),
            "hard" | "3" => Some(Difficulty::Hard),
            _ => None,
        }
    }
}

/// Player tint; purely cosmetic
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum PlayerColor {
    #[default]
    White,
    Orange,
    Purple,
}

impl PlayerColor {
    /// sRGB bytes for the renderer
    pub fn rgb(&self) -> [u8; 3] {
        match self {
            PlayerColor::White => [255, 255, 255],
            PlayerColor::Orange => [255, 140, 0],
            PlayerColor::Purple => [148, 0, 211],
        }
    }
}

/// Everything `Simulation::start` needs from the profile
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunParams {
    pub weapon_damage: i32,
    pub difficulty: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreError {
    /// Every upgrade has been bought
    SoldOut,
    InsufficientCoins { price: u32, balance: u32 },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StoreError::SoldOut => write!(f, "no weapon upgrades left"),
            StoreError::InsufficientCoins { price, balance } => {
                write!(f, "upgrade costs {price} coins, balance is {balance}")
            }
        }
    }
}

impl std::error::Error for StoreError {}

#[derive(Debug)]
pub enum ProfileError {
    Io(std::io::Error),
    Parse(serde_json::Error),
}

impl fmt::Display for ProfileError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProfileError::Io(err) => write!(f, "profile io error: {err}"),
            ProfileError::Parse(err) => write!(f, "profile parse error: {err}"),
        }
    }
}

impl std::error::Error for ProfileError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ProfileError::Io(err) => Some(err),
            ProfileError::Parse(err) => Some(err),
        }
    }
}

impl From<std::io::Error> for ProfileError {
    fn from(err: std::io::Error) -> Self {
        ProfileError::Io(err)
    }
}

impl From<serde_json::Error> for ProfileError {
    fn from(err: serde_json::Error) -> Self {
        ProfileError::Parse(err)
    }
}

/// Persistent player profile
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Profile {
    /// Banked coins, spent in the store
    pub coins: u32,
    /// Upgrades bought so far (0..=3)
    pub weapon_upgrades: u8,
    pub difficulty: Difficulty,
    pub color: PlayerColor,
    /// Background music on/off
    pub music: bool,
}

impl Default for Profile {
    fn default() -> Self {
        Self {
            coins: 0,
            weapon_upgrades: 0,
            difficulty: Difficulty::Easy,
            color: PlayerColor::White,
            music: true,
        }
    }
}

impl Profile {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "dungeon_domination_profile";

    pub fn weapon_damage(&self) -> i32 {
        BASE_WEAPON_DAMAGE * (i32::from(self.weapon_upgrades) + 1)
    }

    pub fn run_params(&self) -> RunParams {
        RunParams {
            weapon_damage: self.weapon_damage(),
            difficulty: self.difficulty.multiplier(),
        }
    }

    /// Price of the next upgrade, `None` once sold out
    pub fn next_upgrade_price(&self) -> Option<u32> {
        UPGRADE_PRICES.get(usize::from(self.weapon_upgrades)).copied()
    }

    /// Buy the next weapon upgrade, returning the price paid
    pub fn purchase_upgrade(&mut self) -> Result<u32, StoreError> {
        let price = self.next_upgrade_price().ok_or(StoreError::SoldOut)?;
        if self.coins < price {
            return Err(StoreError::InsufficientCoins {
                price,
                balance: self.coins,
            });
        }

        self.coins -= price;
        self.weapon_upgrades += 1;
        log::info!(
            "Weapon upgrade {} bought for {} coins (damage now {})",
            self.weapon_upgrades,
            price,
            self.weapon_damage()
        );
        Ok(price)
    }

    /// Add a finished run's coins to the balance
    pub fn bank_run(&mut self, collected: u32) {
        self.coins = self.coins.saturating_add(collected);
        log::info!("Banked {} coins (balance {})", collected, self.coins);
    }

    pub fn from_json(json: &str) -> Result<Self, ProfileError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn to_json(&self) -> Result<String, ProfileError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Load from a JSON file, falling back to defaults if missing or corrupt
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load_from(path: impl AsRef<std::path::Path>) -> Self {
        let path = path.as_ref();
        match Self::try_load_from(path) {
            Ok(profile) => {
                log::info!("Loaded profile from {}", path.display());
                profile
            }
            Err(ProfileError::Io(err)) if err.kind() == std::io::ErrorKind::NotFound => {
                log::info!("No profile at {}, starting fresh", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("Using default profile: {err}");
                Self::default()
            }
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn try_load_from(path: impl AsRef<std::path::Path>) -> Result<Self, ProfileError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save_to(&self, path: impl AsRef<std::path::Path>) -> Result<(), ProfileError> {
        let path = path.as_ref();
        std::fs::write(path, self.to_json()?)?;
        log::info!("Profile saved to {}", path.display());
        Ok(())
    }

    /// Load profile from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(profile) => {
                        log::info!("Loaded profile from LocalStorage");
                        return profile;
                    }
                    Err(err) => log::warn!("Stored profile unreadable: {err}"),
                }
            }
        }

        log::info!("Using default profile");
        Self::default()
    }

    /// Save profile to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            match serde_json::to_string(self) {
                Ok(json) => {
                    if storage.set_item(Self::STORAGE_KEY, &json).is_err() {
                        log::warn!("LocalStorage rejected profile write");
                    } else {
                        log::info!("Profile saved");
                    }
                }
                Err(err) => log::warn!("Could not encode profile: {err}"),
            }
        }
    }
}
