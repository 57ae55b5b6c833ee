//! Game rules
//!
//! Loaded from JSON. Every field has a default, so a config file only needs
//! the keys it changes:
//!
//! ```json
//! { "players": 2, "wraparound": true, "map": { "type": "corridors" } }
//! ```

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::consts::{MAX_PLAYERS, MAX_SNAKES, MIN_STEP_TICKS, SNAKE_LENGTH, STEP_TICKS};
use crate::sim::maps::{MapConfig, MapError, check_size};

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("config is not valid JSON: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("cannot read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid `{field}`: {reason}")]
    Invalid { field: &'static str, reason: String },
    #[error("bad map: {0}")]
    Map(#[from] MapError),
}

fn invalid(field: &'static str, reason: impl Into<String>) -> ConfigError {
    ConfigError::Invalid {
        field,
        reason: reason.into(),
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    /// Local human players (keyboard slots)
    pub players: u8,
    /// AI-controlled snakes
    pub bots: u8,
    pub map: MapConfig,
    /// Leaving one edge re-enters from the opposite edge
    pub wraparound: bool,

    /// Ticks between steps at the start
    pub step_ticks: u32,
    /// Fastest step interval reachable by eating
    pub min_step_ticks: u32,
    /// Foods per one-tick speed-up (0 = constant speed)
    pub speedup_every: u32,
    /// Length of a freshly spawned snake
    pub snake_length: u32,
    /// Lives per snake (0 = unlimited)
    pub lives: u8,

    /// Food items kept on the board
    pub food_count: u32,
    pub golden_food_chance: f32,
    pub golden_food_ttl_ticks: u32,

    pub powerups: bool,
    /// Chance to drop a power-up each time food is eaten
    pub powerup_chance: f32,
    pub max_powerups: u32,
    pub powerup_ttl_ticks: u32,
    /// Duration of timed power-up effects
    pub effect_ticks: u32,

    pub spawn_anim_ticks: u32,
    pub destroy_anim_ticks: u32,
    /// Wait between the destroy animation ending and respawning
    pub respawn_delay_ticks: u32,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            players: 1,
            bots: 0,
            map: MapConfig::default(),
            wraparound: false,

            step_ticks: STEP_TICKS,
            min_step_ticks: MIN_STEP_TICKS,
            speedup_every: 5,
            snake_length: SNAKE_LENGTH,
            lives: 3,

            food_count: 1,
            golden_food_chance: 0.1,
            golden_food_ttl_ticks: 8 * 120,

            powerups: true,
            powerup_chance: 0.25,
            max_powerups: 2,
            powerup_ttl_ticks: 10 * 120,
            effect_ticks: 6 * 120,

            spawn_anim_ticks: 30,
            destroy_anim_ticks: 45,
            respawn_delay_ticks: 120,
        }
    }
}

impl GameConfig {
    /// Parse and validate a JSON config
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: GameConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read a JSON config file
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load(path: &std::path::Path) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    pub fn snake_count(&self) -> usize {
        self.players as usize + self.bots as usize
    }

    /// Check value ranges
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.players as usize > MAX_PLAYERS {
            return Err(invalid(
                "players",
                format!("at most {} local players", MAX_PLAYERS),
            ));
        }
        let snakes = self.snake_count();
        if snakes == 0 || snakes > MAX_SNAKES {
            return Err(invalid(
                "bots",
                format!("players + bots must be 1..={}, got {}", MAX_SNAKES, snakes),
            ));
        }
        if self.step_ticks == 0 {
            return Err(invalid("step_ticks", "must be at least 1"));
        }
        if self.min_step_ticks == 0 || self.min_step_ticks > self.step_ticks {
            return Err(invalid(
                "min_step_ticks",
                format!("must be in 1..={}", self.step_ticks),
            ));
        }
        if self.snake_length == 0 {
            return Err(invalid("snake_length", "must be at least 1"));
        }
        if self.food_count == 0 {
            return Err(invalid("food_count", "must be at least 1"));
        }
        for (field, chance) in [
            ("golden_food_chance", self.golden_food_chance),
            ("powerup_chance", self.powerup_chance),
        ] {
            if !(0.0..=1.0).contains(&chance) {
                return Err(invalid(field, format!("{} is not a probability", chance)));
            }
        }
        let (width, height) = self.map.dimensions();
        check_size(width, height)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        GameConfig::default().validate().unwrap();
    }

    #[test]
    fn test_partial_json() {
        let config =
            GameConfig::from_json(r#"{"players": 2, "wraparound": true, "map": {"type": "ascii"}}"#)
                .unwrap();
        assert_eq!(config.players, 2);
        assert!(config.wraparound);
        assert_eq!(config.step_ticks, STEP_TICKS);
        assert_eq!(config.map.name(), "ascii");
    }

    #[test]
    fn test_rejects_bad_values() {
        let err = GameConfig::from_json(r#"{"players": 9}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "players", .. }));

        let err = GameConfig::from_json(r#"{"powerup_chance": 1.5}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "powerup_chance",
                ..
            }
        ));

        let err = GameConfig::from_json(r#"{"step_ticks": 4}"#).unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Invalid {
                field: "min_step_ticks",
                ..
            }
        ));

        let err = GameConfig::from_json(r#"{"players": 0}"#).unwrap_err();
        assert!(matches!(err, ConfigError::Invalid { field: "bots", .. }));
    }

    #[test]
    fn test_rejects_oversized_map() {
        let json = r#"{"map": {"type": "open", "width": 70000, "height": 70000}}"#;
        let err = GameConfig::from_json(json).unwrap_err();
        assert!(matches!(err, ConfigError::Map(MapError::TooLarge { .. })));

        let mut config = GameConfig::default();
        config.map = MapConfig::Corridors(crate::sim::maps::CorridorsMap {
            width: 257,
            ..Default::default()
        });
        assert!(crate::sim::GameState::new(config, 1).is_err());
    }

    #[test]
    fn test_rejects_malformed_json() {
        let err = GameConfig::from_json("{ players: ").unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_error_messages() {
        let err = invalid("lives", "nope");
        assert_eq!(err.to_string(), "invalid `lives`: nope");
    }
}
