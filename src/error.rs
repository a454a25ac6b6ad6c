//! Configuration errors
//!
//! The simulation itself has no failure modes; everything that can go wrong
//! is caught while building the config, before the first tick.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("{field} must be positive (got {value})")]
    NonPositive { field: &'static str, value: i64 },
    #[error("player size {player_size} exceeds screen width {screen_width}")]
    PlayerTooWide { player_size: i32, screen_width: i32 },
    #[error(
        "player size {player_size} does not fit below the midline of a {screen_height} px tall screen"
    )]
    PlayerTooTall {
        player_size: i32,
        screen_height: i32,
    },
    #[error("failed to read config file: {source}")]
    Io {
        #[from]
        source: std::io::Error,
    },
    #[error("failed to parse config JSON: {source}")]
    Parse {
        #[from]
        source: serde_json::Error,
    },
}
