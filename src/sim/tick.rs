//! Fixed timestep simulation tick
//!
//! Core game loop that advances simulation deterministically. One call is one
//! tick at the configured rate; nothing here reads the clock.

use glam::IVec2;
use rand::Rng;

use super::collision::first_collision;
use super::state::{GameState, Obstacle, Rgb};
use crate::config::GameConfig;
use crate::consts::*;
use crate::lerp;

/// Held directions for a single tick (deterministic)
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickInput {
    pub left: bool,
    pub right: bool,
    pub up: bool,
    pub down: bool,
}

impl TickInput {
    /// Raw displacement before clamping. Opposite keys cancel; diagonals are
    /// not normalized.
    pub fn displacement(&self) -> IVec2 {
        let mut delta = IVec2::ZERO;
        if self.left {
            delta.x -= PLAYER_STEP;
        }
        if self.right {
            delta.x += PLAYER_STEP;
        }
        if self.up {
            delta.y -= PLAYER_STEP;
        }
        if self.down {
            delta.y += PLAYER_STEP;
        }
        delta
    }
}

/// Chance of spawning an obstacle this tick at the given score
///
/// Ramps linearly from 2% at score 0 to 6% at score 10, then holds.
pub fn spawn_probability(score: f64) -> f64 {
    lerp(
        SPAWN_PROBABILITY_MIN,
        SPAWN_PROBABILITY_MAX,
        score.min(SPAWN_RAMP_SCORE) / SPAWN_RAMP_SCORE,
    )
}

/// Apply one tick of movement to a player position and clamp it
pub fn move_player(pos: IVec2, input: &TickInput, config: &GameConfig) -> IVec2 {
    let moved = pos + input.displacement();
    let mut clamped = IVec2::new(
        moved.x.clamp(0, config.max_player_x()),
        moved.y.clamp(0, config.max_player_y()),
    );
    // Never on or above the divider
    let midline = config.midline();
    if clamped.y <= midline {
        clamped.y = midline + 1;
    }
    clamped
}

/// Roll a new obstacle at the top of the screen
pub fn create_obstacle(rng: &mut impl Rng, screen_width: i32) -> Obstacle {
    let x = rng.random_range(0..screen_width);
    let speed = rng.random_range(OBSTACLE_MIN_SPEED..OBSTACLE_MAX_SPEED);
    let color = Rgb::random(rng);
    Obstacle {
        pos: IVec2::new(x, 0),
        size: OBSTACLE_SIZE,
        speed,
        color,
    }
}

/// Advance the game state by one fixed tick
pub fn advance_frame(state: &mut GameState, input: &TickInput) {
    if state.is_alive() {
        state.player.pos = move_player(state.player.pos, input, &state.config);

        let player = state.player.rect();
        if first_collision(&player, state.obstacles.iter().map(Obstacle::rect)).is_some() {
            state.kill();
        }
    }

    if state.is_alive() || state.config.spawn_after_death {
        let p = spawn_probability(state.score);
        if state.rng.random::<f64>() < p {
            let obstacle = create_obstacle(&mut state.rng, state.config.screen_width);
            log::trace!(
                "Spawned obstacle at x={} speed={} (p={:.3})",
                obstacle.pos.x,
                obstacle.speed,
                p
            );
            state.obstacles.push(obstacle);
        }
    }

    for obstacle in &mut state.obstacles {
        obstacle.advance();
    }

    if state.config.cull_offscreen_obstacles {
        let bottom = state.config.screen_height;
        state.obstacles.retain(|o| o.pos.y <= bottom);
    }

    if state.is_alive() {
        state.score += SCORE_PER_TICK;
    }

    state.time_ticks += 1;
}
