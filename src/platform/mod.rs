//! Platform abstraction layer
//!
//! Handles browser/native differences for:
//! - Input (held keys, idle and autopilot providers)
//! - Time (fixed-rate tick pacing)

pub mod input;
pub mod time;

pub use input::{Autopilot, Idle, InputProvider, KeyState};
pub use time::FixedTimestep;
