//! Duckie Dodge - a midline arcade dodging game
//!
//! Core modules:
//! - `sim`: Deterministic simulation (movement, spawning, collisions, game state)
//! - `renderer`: WebGPU rendering pipeline and scene composition
//! - `platform`: Input providers and fixed-rate frame pacing
//! - `config`: Screen geometry, tick rate and optional hardening flags

pub mod config;
pub mod error;
pub mod platform;
pub mod renderer;
pub mod sim;

pub use config::GameConfig;
pub use error::ConfigError;

/// Game configuration constants
pub mod consts {
    /// Default screen dimensions
    pub const SCREEN_WIDTH: i32 = 800;
    pub const SCREEN_HEIGHT: i32 = 600;

    /// Fixed simulation rate (ticks per second)
    pub const TICK_RATE: u32 = 60;
    /// Maximum ticks per rendered frame to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Player defaults
    pub const PLAYER_SIZE: i32 = 50;
    pub const PLAYER_START_X: i32 = 400;
    pub const PLAYER_START_Y: i32 = 500;
    /// Units moved per held direction per tick
    pub const PLAYER_STEP: i32 = 5;

    /// Obstacle side length (independent of the player size)
    pub const OBSTACLE_SIZE: i32 = 50;
    /// Obstacle speed range, half-open
    pub const OBSTACLE_MIN_SPEED: i32 = 2;
    pub const OBSTACLE_MAX_SPEED: i32 = 10;
    /// Exclusive upper bound for each colour channel of a spawned obstacle
    pub const OBSTACLE_CHANNEL_MAX: u8 = 255;

    /// Spawn chance per tick at score 0
    pub const SPAWN_PROBABILITY_MIN: f64 = 0.02;
    /// Spawn chance per tick once the ramp is complete
    pub const SPAWN_PROBABILITY_MAX: f64 = 0.06;
    /// Score at which the spawn ramp tops out
    pub const SPAWN_RAMP_SCORE: f64 = 10.0;

    /// Score gained per tick while alive
    pub const SCORE_PER_TICK: f64 = 0.01;
}

/// Linear interpolation from `a` to `b`
///
/// `t` is not clamped: values outside [0, 1] extrapolate past the endpoints.
#[inline]
pub fn lerp(a: f64, b: f64, t: f64) -> f64 {
    (1.0 - t) * a + t * b
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f64 = 1e-12;

    #[test]
    fn test_lerp_endpoints_and_midpoint() {
        assert!((lerp(0.02, 0.06, 0.0) - 0.02).abs() < EPS);
        assert!((lerp(0.02, 0.06, 1.0) - 0.06).abs() < EPS);
        assert!((lerp(0.02, 0.06, 0.5) - 0.04).abs() < EPS);
    }

    #[test]
    fn test_lerp_extrapolates() {
        assert!((lerp(0.0, 10.0, 1.5) - 15.0).abs() < EPS);
        assert!((lerp(0.0, 10.0, -0.5) + 5.0).abs() < EPS);
    }
}
