//! Game state and core simulation types
//!
//! Everything a run mutates lives on `GameState`; the tick function takes it
//! by `&mut` and nothing else holds game data between ticks.

use glam::IVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;
use serde::{Deserialize, Serialize};

use super::collision::Rect;
use crate::config::GameConfig;
use crate::consts::*;
use crate::error::ConfigError;

/// Mixed into the run seed for the cosmetic stream
const COSMETIC_SEED_SALT: u64 = 0x9E37_79B9_7F4A_7C15;

/// Current phase of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// Player is moving and scoring
    Alive,
    /// Player has been hit; obstacles keep falling
    Dead,
}

/// 8-bit RGB colour
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const WHITE: Rgb = Rgb::new(255, 255, 255);

    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    /// Random colour, each channel uniform in [0, 255)
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            r: rng.random_range(0..OBSTACLE_CHANNEL_MAX),
            g: rng.random_range(0..OBSTACLE_CHANNEL_MAX),
            b: rng.random_range(0..OBSTACLE_CHANNEL_MAX),
        }
    }

    /// Linear RGBA for the GPU
    ///
    /// The surface format is sRGB, so channels are decoded here and the
    /// hardware re-encodes them to the stored byte values on write.
    pub fn to_rgba(self) -> [f32; 4] {
        [
            srgb_to_linear(self.r),
            srgb_to_linear(self.g),
            srgb_to_linear(self.b),
            1.0,
        ]
    }

    /// CSS colour string for DOM text
    pub fn to_css(self) -> String {
        format!("rgb({}, {}, {})", self.r, self.g, self.b)
    }
}

#[inline]
fn srgb_to_linear(channel: u8) -> f32 {
    let c = f32::from(channel) / 255.0;
    if c <= 0.04045 {
        c / 12.92
    } else {
        ((c + 0.055) / 1.055).powf(2.4)
    }
}

/// The player's square
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Player {
    /// Top-left corner
    pub pos: IVec2,
    pub size: i32,
}

impl Player {
    /// Player at the start position, pulled inside the legal area for
    /// screens smaller than the default
    pub fn new(config: &GameConfig) -> Self {
        let x = PLAYER_START_X.clamp(0, config.max_player_x());
        let y = PLAYER_START_Y.clamp(config.midline() + 1, config.max_player_y());
        Self {
            pos: IVec2::new(x, y),
            size: config.player_size,
        }
    }

    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }
}

/// A falling obstacle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    /// Top-left corner
    pub pos: IVec2,
    pub size: i32,
    /// Pixels per tick, fixed at spawn
    pub speed: i32,
    /// Display colour, fixed at spawn
    pub color: Rgb,
}

impl Obstacle {
    pub fn rect(&self) -> Rect {
        Rect::square(self.pos, self.size)
    }

    /// Fall by this obstacle's speed
    #[inline]
    pub fn advance(&mut self) {
        self.pos.y = self.pos.y.saturating_add(self.speed);
    }
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct GameState {
    /// Validated configuration for this run
    pub config: GameConfig,
    /// Run seed for reproducibility
    pub seed: u64,
    /// Random source for spawns; only the tick draws from it
    pub(crate) rng: Pcg32,
    /// Separate stream for presentation rolls so rendering never shifts spawns
    cosmetic_rng: Pcg32,
    /// Simulation tick counter
    pub time_ticks: u64,
    /// Current phase
    pub phase: GamePhase,
    /// Score, frozen on death
    pub score: f64,
    /// Player square
    pub player: Player,
    /// Active obstacles in spawn order
    pub obstacles: Vec<Obstacle>,
    /// Colour of the game-over label, rolled on first request after death
    end_screen_color: Option<Rgb>,
}

impl GameState {
    /// Create a new game state with the default config
    pub fn new(seed: u64) -> Self {
        Self::fresh(GameConfig::default(), seed)
    }

    /// Create a new game state, rejecting an invalid config
    pub fn with_config(config: GameConfig, seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::fresh(config, seed))
    }

    fn fresh(config: GameConfig, seed: u64) -> Self {
        let player = Player::new(&config);
        Self {
            config,
            seed,
            rng: Pcg32::seed_from_u64(seed),
            cosmetic_rng: Pcg32::seed_from_u64(seed ^ COSMETIC_SEED_SALT),
            time_ticks: 0,
            phase: GamePhase::Alive,
            score: 0.0,
            player,
            obstacles: Vec::new(),
            end_screen_color: None,
        }
    }

    /// Start a new run with the same config
    pub fn restart(&mut self, seed: u64) {
        log::info!("Restarting run with seed {}", seed);
        *self = Self::fresh(self.config.clone(), seed);
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.phase == GamePhase::Alive
    }

    /// Colour of the game-over label
    ///
    /// `None` while alive. The first call after death rolls a colour and every
    /// later call in the same dead state returns it unchanged.
    pub fn end_screen_color(&mut self) -> Option<Rgb> {
        if self.is_alive() {
            return None;
        }
        let rng = &mut self.cosmetic_rng;
        Some(*self.end_screen_color.get_or_insert_with(|| Rgb::random(rng)))
    }

    /// Transition to `Dead`; no-op if already dead
    pub(crate) fn kill(&mut self) {
        if self.is_alive() {
            self.phase = GamePhase::Dead;
            log::info!(
                "Game over at tick {} with score {:.2}",
                self.time_ticks,
                self.score
            );
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_state_defaults() {
        let state = GameState::new(7);
        assert!(state.is_alive());
        assert_eq!(state.score, 0.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos, IVec2::new(400, 500));
        assert_eq!(state.player.size, PLAYER_SIZE);
        assert_eq!(state.time_ticks, 0);
    }

    #[test]
    fn test_with_config_rejects_invalid() {
        let config = GameConfig {
            screen_height: 0,
            ..Default::default()
        };
        assert!(GameState::with_config(config, 1).is_err());
        assert!(GameState::with_config(GameConfig::default(), 1).is_ok());
    }

    #[test]
    fn test_start_position_fits_small_screen() {
        let config = GameConfig {
            screen_width: 300,
            screen_height: 200,
            player_size: 40,
            ..Default::default()
        };
        let state = GameState::with_config(config, 1).unwrap();
        assert_eq!(state.player.pos, IVec2::new(260, 160));
    }

    #[test]
    fn test_end_screen_color_unset_while_alive() {
        let mut state = GameState::new(1);
        assert_eq!(state.end_screen_color(), None);
    }

    #[test]
    fn test_end_screen_color_is_memoized() {
        let mut state = GameState::new(42);
        state.kill();
        let first = state.end_screen_color();
        assert!(first.is_some());
        for _ in 0..10 {
            assert_eq!(state.end_screen_color(), first);
        }
    }

    #[test]
    fn test_restart_resets_run() {
        let mut state = GameState::new(3);
        state.score = 4.2;
        state.player.pos = IVec2::new(0, 550);
        state.obstacles.push(Obstacle {
            pos: IVec2::new(10, 20),
            size: OBSTACLE_SIZE,
            speed: 3,
            color: Rgb::WHITE,
        });
        state.kill();
        assert!(state.end_screen_color().is_some());

        state.restart(4);
        assert!(state.is_alive());
        assert_eq!(state.seed, 4);
        assert_eq!(state.score, 0.0);
        assert!(state.obstacles.is_empty());
        assert_eq!(state.player.pos, IVec2::new(400, 500));
        assert_eq!(state.end_screen_color(), None);
    }

    #[test]
    fn test_random_color_channels_below_255() {
        let mut rng = Pcg32::seed_from_u64(99);
        for _ in 0..2000 {
            let c = Rgb::random(&mut rng);
            assert!(c.r < 255 && c.g < 255 && c.b < 255);
        }
    }

    #[test]
    fn test_rgb_conversions() {
        for channel in &Rgb::WHITE.to_rgba() {
            assert!((channel - 1.0).abs() < 1e-6);
        }
        assert_eq!(Rgb::new(0, 0, 0).to_rgba(), [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(Rgb::new(1, 2, 3).to_css(), "rgb(1, 2, 3)");
    }

    #[test]
    fn test_to_rgba_decodes_srgb() {
        let [r, g, b, a] = Rgb::new(128, 10, 0).to_rgba();
        assert!((r - 0.2158).abs() < 1e-3, "mid channel decoded to {r}");
        // Linear segment near black
        assert!((g - 10.0 / 255.0 / 12.92).abs() < 1e-6);
        assert_eq!(b, 0.0);
        assert_eq!(a, 1.0);
    }

    #[test]
    fn test_end_screen_color_does_not_shift_spawns() {
        use crate::sim::{TickInput, advance_frame};

        let mut a = GameState::new(77);
        let mut b = a.clone();
        a.kill();
        b.kill();
        assert!(a.end_screen_color().is_some());

        let input = TickInput::default();
        for _ in 0..600 {
            advance_frame(&mut a, &input);
            advance_frame(&mut b, &input);
        }
        assert!(!a.obstacles.is_empty());
        assert_eq!(a.obstacles, b.obstacles);
    }

    #[test]
    fn test_obstacle_advance_saturates() {
        let mut obstacle = Obstacle {
            pos: IVec2::new(0, i32::MAX - 3),
            size: OBSTACLE_SIZE,
            speed: 9,
            color: Rgb::WHITE,
        };
        obstacle.advance();
        assert_eq!(obstacle.pos.y, i32::MAX);
        obstacle.advance();
        assert_eq!(obstacle.pos.y, i32::MAX);
    }
}
