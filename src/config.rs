//! Game tuning constants.
//!
//! Defaults reproduce the stock game.  A JSON file may override any subset of
//! fields; the rest keep their defaults.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Environment variable naming an optional tuning file.
pub const CONFIG_ENV_VAR: &str = "ALPHABET_SHOOTER_CONFIG";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Tuning {
    pub arena_width: f32,
    pub arena_height: f32,
    pub player_size: f32,
    pub bullet_size: f32,
    /// Distance per tick.
    pub player_speed: f32,
    /// Full width of the per-tick random drift.
    pub enemy_speed: f32,
    /// Distance per tick.
    pub bullet_speed: f32,
    pub special_attack_cooldown_ms: u64,
    /// How long the clear-screen effect stays visible.
    pub special_attack_display_ms: u64,
    /// Per-tick Bernoulli probability of spawning an enemy.
    pub spawn_chance: f64,
    pub max_enemies: usize,
    /// Inclusive.
    pub enemy_min_size: u32,
    /// Exclusive.
    pub enemy_max_size: u32,
    pub tick_rate_hz: u32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            arena_width: 800.0,
            arena_height: 600.0,
            player_size: 30.0,
            bullet_size: 5.0,
            player_speed: 5.0,
            enemy_speed: 1.0,
            bullet_speed: 10.0,
            special_attack_cooldown_ms: 5000,
            special_attack_display_ms: 1000,
            spawn_chance: 0.02,
            max_enemies: 10,
            enemy_min_size: 20,
            enemy_max_size: 40,
            tick_rate_hz: 60,
        }
    }
}

impl Tuning {
    /// Parse and validate a JSON document.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let tuning: Tuning = serde_json::from_str(json)?;
        tuning.validate()?;
        Ok(tuning)
    }

    /// Read, parse and validate a JSON tuning file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let tuning = Self::from_json(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }

    /// Load from the file named by [`CONFIG_ENV_VAR`], falling back to the
    /// defaults when the variable is unset or the file is unusable.
    pub fn from_env() -> Self {
        match std::env::var(CONFIG_ENV_VAR) {
            Ok(path) => Self::load(&path).unwrap_or_else(|e| {
                log::warn!("{e}; using default tuning");
                Self::default()
            }),
            Err(_) => Self::default(),
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let invalid = |msg: String| Err(ConfigError::Invalid(msg));

        if !(self.arena_width > 0.0 && self.arena_height > 0.0) {
            return invalid(format!(
                "arena must be positive, got {}x{}",
                self.arena_width, self.arena_height
            ));
        }
        if !(self.player_size > 0.0)
            || self.player_size > self.arena_width
            || self.player_size > self.arena_height
        {
            return invalid(format!(
                "player_size {} does not fit the arena",
                self.player_size
            ));
        }
        if !(self.bullet_size > 0.0) {
            return invalid(format!("bullet_size must be positive, got {}", self.bullet_size));
        }
        for (name, speed) in [
            ("player_speed", self.player_speed),
            ("enemy_speed", self.enemy_speed),
            ("bullet_speed", self.bullet_speed),
        ] {
            if !(speed > 0.0) {
                return invalid(format!("{name} must be positive, got {speed}"));
            }
        }
        if !(0.0..=1.0).contains(&self.spawn_chance) {
            return invalid(format!(
                "spawn_chance must be within [0, 1], got {}",
                self.spawn_chance
            ));
        }
        if self.enemy_min_size == 0 || self.enemy_min_size >= self.enemy_max_size {
            return invalid(format!(
                "enemy size range [{}, {}) is empty",
                self.enemy_min_size, self.enemy_max_size
            ));
        }
        if self.enemy_max_size as f32 > self.arena_width.min(self.arena_height) {
            return invalid(format!(
                "enemy_max_size {} exceeds the arena",
                self.enemy_max_size
            ));
        }
        if self.tick_rate_hz == 0 {
            return invalid("tick_rate_hz must be non-zero".to_string());
        }
        Ok(())
    }

    pub fn tick_duration(&self) -> Duration {
        Duration::from_secs_f64(1.0 / f64::from(self.tick_rate_hz.max(1)))
    }

    /// Largest x the player's top-left corner may reach.
    pub fn player_max_x(&self) -> f32 {
        self.arena_width - self.player_size
    }

    /// Largest y the player's top-left corner may reach.
    pub fn player_max_y(&self) -> f32 {
        self.arena_height - self.player_size
    }
}
