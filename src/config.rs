//! Game configuration
//!
//! Screen geometry, tick rate and the opt-in hardening flags. Validated once
//! at startup; the simulation assumes a valid config from then on.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Game configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    // === Screen ===
    pub screen_width: i32,
    pub screen_height: i32,

    // === Player ===
    pub player_size: i32,

    // === Loop ===
    /// Fixed simulation ticks per second
    pub tick_rate: u32,

    // === Hardening (off by default for parity) ===
    /// Drop obstacles once they have fallen below the bottom edge
    pub cull_offscreen_obstacles: bool,
    /// Keep rolling spawns after the player has died
    pub spawn_after_death: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            screen_width: SCREEN_WIDTH,
            screen_height: SCREEN_HEIGHT,

            player_size: PLAYER_SIZE,

            tick_rate: TICK_RATE,

            cull_offscreen_obstacles: false,
            spawn_after_death: true,
        }
    }
}

impl GameConfig {
    /// Horizontal divider the player may never cross
    #[inline]
    pub fn midline(&self) -> i32 {
        self.screen_height / 2
    }

    /// Largest x the player may occupy
    #[inline]
    pub fn max_player_x(&self) -> i32 {
        self.screen_width - self.player_size
    }

    /// Largest y the player may occupy
    #[inline]
    pub fn max_player_y(&self) -> i32 {
        self.screen_height - self.player_size
    }

    /// CSS width and height of the play area
    pub fn css_size(&self) -> (String, String) {
        (
            format!("{}px", self.screen_width),
            format!("{}px", self.screen_height),
        )
    }

    /// Length of one fixed tick in seconds
    pub fn tick_seconds(&self) -> f64 {
        1.0 / f64::from(self.tick_rate.max(1))
    }

    /// Check the startup preconditions
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, value) in [
            ("screen_width", self.screen_width),
            ("screen_height", self.screen_height),
            ("player_size", self.player_size),
        ] {
            if value <= 0 {
                return Err(ConfigError::NonPositive {
                    field,
                    value: i64::from(value),
                });
            }
        }
        if self.tick_rate == 0 {
            return Err(ConfigError::NonPositive {
                field: "tick_rate",
                value: 0,
            });
        }
        if self.player_size > self.screen_width {
            return Err(ConfigError::PlayerTooWide {
                player_size: self.player_size,
                screen_width: self.screen_width,
            });
        }
        // The lowest legal row is midline + 1; the player still has to fit under it
        if self.midline() + 1 > self.max_player_y() {
            return Err(ConfigError::PlayerTooTall {
                player_size: self.player_size,
                screen_height: self.screen_height,
            });
        }
        Ok(())
    }

    /// Parse and validate a JSON config. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }

    /// LocalStorage key
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "duckie_dodge_config";

    /// Load config from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(json)) = storage.get_item(Self::STORAGE_KEY) {
                match Self::from_json(&json) {
                    Ok(config) => {
                        log::info!("Loaded config from LocalStorage");
                        return config;
                    }
                    Err(e) => log::warn!("Ignoring stored config: {e}"),
                }
            }
        }

        log::info!("Using default config");
        Self::default()
    }

    /// Native stub
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = GameConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(config.midline(), 300);
        assert_eq!(config.max_player_x(), 750);
        assert_eq!(config.max_player_y(), 550);
        assert!(!config.cull_offscreen_obstacles);
        assert!(config.spawn_after_death);
    }

    #[test]
    fn test_rejects_non_positive_sizes() {
        let config = GameConfig {
            player_size: 0,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "player_size",
                ..
            })
        ));

        let config = GameConfig {
            screen_width: -800,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::NonPositive {
                field: "screen_width",
                value: -800
            })
        ));

        let config = GameConfig {
            tick_rate: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_rejects_player_that_cannot_fit() {
        let config = GameConfig {
            player_size: 900,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PlayerTooWide { .. })
        ));

        // 600 tall: midline 300, lowest legal row 301, so at most 299 px
        let config = GameConfig {
            player_size: 300,
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::PlayerTooTall { .. })
        ));

        let config = GameConfig {
            player_size: 299,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_from_json_fills_defaults() {
        let config = GameConfig::from_json(r#"{ "screen_width": 1024 }"#).unwrap();
        assert_eq!(config.screen_width, 1024);
        assert_eq!(config.screen_height, SCREEN_HEIGHT);
        assert_eq!(config.tick_rate, TICK_RATE);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            GameConfig::from_json("not json"),
            Err(ConfigError::Parse { .. })
        ));
        assert!(matches!(
            GameConfig::from_json(r#"{ "player_size": -1 }"#),
            Err(ConfigError::NonPositive { .. })
        ));
    }

    #[test]
    fn test_load_errors_name_their_cause() {
        let parse = GameConfig::from_json("not json").unwrap_err().to_string();
        assert!(parse.starts_with("failed to parse config JSON: "));
        assert!(parse.contains("line 1"), "missing serde detail: {parse}");

        let io = GameConfig::from_path("/nonexistent/duckie_dodge.json")
            .unwrap_err()
            .to_string();
        assert!(io.starts_with("failed to read config file: "));
        assert!(io.len() > "failed to read config file: ".len());
    }

    #[test]
    fn test_css_size_follows_screen() {
        assert_eq!(
            GameConfig::default().css_size(),
            ("800px".to_string(), "600px".to_string())
        );
        let config =
            GameConfig::from_json(r#"{ "screen_width": 640, "screen_height": 480 }"#).unwrap();
        assert_eq!(config.css_size(), ("640px".to_string(), "480px".to_string()));
    }

    #[test]
    fn test_tick_seconds() {
        let config = GameConfig::default();
        assert!((config.tick_seconds() - 1.0 / 60.0).abs() < 1e-12);
    }
}
