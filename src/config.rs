//! Game tuning, loadable from TOML.
//!
//! Every field defaults to the shipped tuning, so a missing file or a
//! partial file is fine; only the keys present override the defaults.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;
use tracing::{info, warn};

use crate::error::ConfigError;

pub const CONFIG_ENV_VAR: &str = "PLATFORMER_CONFIG";
pub const DEFAULT_CONFIG_FILE: &str = "platformer.toml";

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct ScreenConfig {
    pub width: f32,
    pub height: f32,
    /// Simulation ticks (and render passes) per second.
    pub fps: u32,
}

impl Default for ScreenConfig {
    fn default() -> Self {
        Self {
            width: 1020.0,
            height: 760.0,
            fps: 80,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PhysicsConfig {
    /// Added to the player's vy every tick.
    pub gravity: f32,
    pub move_speed: f32,
    /// Initial vy of a jump (negative = up).
    pub jump_speed: f32,
    pub max_fall_speed: f32,
}

impl Default for PhysicsConfig {
    fn default() -> Self {
        Self {
            gravity: 1.5,
            move_speed: 10.0,
            jump_speed: -20.0,
            max_fall_speed: 14.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PlayerConfig {
    pub width: f32,
    pub height: f32,
    pub max_hp: u32,
    pub damage_per_hit: u32,
    pub damage_cooldown_ms: u64,
    /// Spawn centre, used when the map does not name one.
    pub start: [f32; 2],
}

impl PlayerConfig {
    /// Invincibility window after a hit.
    pub fn damage_cooldown(&self) -> Duration {
        Duration::from_millis(self.damage_cooldown_ms)
    }
}

impl Default for PlayerConfig {
    fn default() -> Self {
        Self {
            width: 64.0,
            height: 64.0,
            max_hp: 10,
            damage_per_hit: 5,
            damage_cooldown_ms: 1000,
            start: [72.0, 832.0],
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct CrabConfig {
    pub width: f32,
    pub height: f32,
    pub move_speed: f32,
    /// Constant fall per tick; crabs do not accelerate.
    pub gravity: f32,
}

impl Default for CrabConfig {
    fn default() -> Self {
        Self {
            width: 64.0,
            height: 64.0,
            move_speed: 2.0,
            gravity: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct BallConfig {
    pub width: f32,
    pub height: f32,
    pub speed: f32,
    /// Horizontal offset from the player's left edge at spawn.
    pub spawn_offset: f32,
}

impl Default for BallConfig {
    fn default() -> Self {
        Self {
            width: 30.0,
            height: 30.0,
            speed: 10.0,
            spawn_offset: 2.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct PickupConfig {
    pub coin_size: f32,
    pub portal_size: f32,
}

impl Default for PickupConfig {
    fn default() -> Self {
        Self {
            coin_size: 24.0,
            portal_size: 96.0,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct LevelsConfig {
    pub dir: PathBuf,
    pub first: u32,
    /// Last playable level; walking through its portal ends the session.
    pub max: u32,
}

impl Default for LevelsConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("levels"),
            first: 1,
            max: 2,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub screen: ScreenConfig,
    pub physics: PhysicsConfig,
    pub player: PlayerConfig,
    pub crab: CrabConfig,
    pub ball: BallConfig,
    pub pickups: PickupConfig,
    pub levels: LevelsConfig,
    pub animation_interval_ms: u64,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen: ScreenConfig::default(),
            physics: PhysicsConfig::default(),
            player: PlayerConfig::default(),
            crab: CrabConfig::default(),
            ball: BallConfig::default(),
            pickups: PickupConfig::default(),
            levels: LevelsConfig::default(),
            animation_interval_ms: 200,
        }
    }
}

impl GameConfig {
    pub fn from_toml_str(content: &str, path: &Path) -> Result<Self, ConfigError> {
        let config: GameConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&content, path)
    }

    /// Resolve the config file: explicit path, then `$PLATFORMER_CONFIG`,
    /// then `platformer.toml` in the working directory, then defaults.
    ///
    /// An explicitly named file must exist; the implicit default may not.
    pub fn discover(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            info!(path = %path.display(), "loading config");
            return Self::load(path);
        }
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            info!(path = %path, "loading config from {CONFIG_ENV_VAR}");
            return Self::load(Path::new(&path));
        }
        let fallback = Path::new(DEFAULT_CONFIG_FILE);
        if fallback.exists() {
            info!(path = %fallback.display(), "loading config");
            return Self::load(fallback);
        }
        warn!("no config file found, using built-in defaults");
        Ok(Self::default())
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: &str| Err(ConfigError::Invalid(msg.to_string()));

        if self.screen.fps == 0 {
            return invalid("screen.fps must be positive");
        }
        if self.screen.width <= 0.0 || self.screen.height <= 0.0 {
            return invalid("screen size must be positive");
        }
        if self.player.width <= 0.0 || self.player.height <= 0.0 {
            return invalid("player size must be positive");
        }
        if self.crab.width <= 0.0 || self.crab.height <= 0.0 {
            return invalid("crab size must be positive");
        }
        if self.ball.width <= 0.0 || self.ball.height <= 0.0 {
            return invalid("ball size must be positive");
        }
        if self.player.max_hp == 0 {
            return invalid("player.max_hp must be positive");
        }
        if self.levels.first == 0 || self.levels.first > self.levels.max {
            return invalid("levels.first must be in 1..=levels.max");
        }
        if self.animation_interval_ms == 0 {
            return invalid("animation_interval_ms must be positive");
        }
        Ok(())
    }

    /// Wall-clock budget for one tick at the configured rate.
    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs(1) / self.screen.fps
    }

    pub fn animation_interval(&self) -> Duration {
        Duration::from_millis(self.animation_interval_ms)
    }
}
