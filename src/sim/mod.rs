//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed timestep only
//! - Seeded RNG only
//! - Stable iteration order (spawn order)
//! - No rendering or platform dependencies

pub mod collision;
pub mod state;
pub mod tick;

pub use collision::{Rect, first_collision};
pub use state::{GamePhase, GameState, Obstacle, Player, Rgb};
pub use tick::{TickInput, advance_frame, create_obstacle, move_player, spawn_probability};
