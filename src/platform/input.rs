//! Input providers
//!
//! The loop driver samples exactly one `TickInput` per tick from an
//! `InputProvider` before calling `advance_frame`.

use crate::consts::PLAYER_STEP;
use crate::sim::{GameState, TickInput};

/// Source of held directions, sampled once per tick
pub trait InputProvider {
    fn sample(&mut self, state: &GameState) -> TickInput;
}

/// Keyboard state built from key-down/key-up events
///
/// Keys are matched by DOM `KeyboardEvent.key` names.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeyState {
    held: TickInput,
}

impl KeyState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a key press. Returns true if the key is a movement key.
    pub fn key_down(&mut self, key: &str) -> bool {
        self.set(key, true)
    }

    /// Record a key release. Returns true if the key is a movement key.
    pub fn key_up(&mut self, key: &str) -> bool {
        self.set(key, false)
    }

    /// Drop every held key (focus lost, so key-up events will never arrive)
    pub fn release_all(&mut self) {
        self.held = TickInput::default();
    }

    pub fn held(&self) -> TickInput {
        self.held
    }

    fn set(&mut self, key: &str, pressed: bool) -> bool {
        let slot = match key {
            "ArrowLeft" => &mut self.held.left,
            "ArrowRight" => &mut self.held.right,
            "ArrowUp" => &mut self.held.up,
            "ArrowDown" => &mut self.held.down,
            _ => return false,
        };
        *slot = pressed;
        true
    }
}

impl InputProvider for KeyState {
    fn sample(&mut self, _state: &GameState) -> TickInput {
        self.held
    }
}

/// Never presses anything
#[derive(Debug, Clone, Copy, Default)]
pub struct Idle;

impl InputProvider for Idle {
    fn sample(&mut self, _state: &GameState) -> TickInput {
        TickInput::default()
    }
}

/// How far above the player the autopilot looks for falling obstacles
const LOOKAHEAD: i32 = 220;
/// Horizontal slack around the player when judging a threat
const MARGIN: i32 = 10;

/// Demo controller that hugs the bottom edge and sidesteps falling obstacles
#[derive(Debug, Clone, Copy, Default)]
pub struct Autopilot;

impl InputProvider for Autopilot {
    fn sample(&mut self, state: &GameState) -> TickInput {
        if !state.is_alive() {
            return TickInput::default();
        }

        let width = state.config.screen_width;
        let player = state.player.rect();
        let (p_min, p_max) = (player.min, player.max());
        let player_center = p_min.x + player.size.x / 2;

        // Nearest obstacle about to land on the player's column
        let threat = state
            .obstacles
            .iter()
            .filter(|o| {
                let r = o.rect();
                let r_max = r.max();
                r_max.y > p_min.y - LOOKAHEAD
                    && r.min.y < p_max.y
                    && r.min.x < p_max.x + MARGIN
                    && p_min.x - MARGIN < r_max.x
            })
            .max_by_key(|o| o.pos.y);

        let mut input = TickInput {
            down: true,
            ..Default::default()
        };

        match threat {
            Some(o) => {
                let obstacle_center = o.pos.x + o.size / 2;
                let go_left = if p_min.x <= MARGIN {
                    false
                } else if p_max.x >= width - MARGIN {
                    true
                } else {
                    player_center <= obstacle_center
                };
                input.left = go_left;
                input.right = !go_left;
            }
            None => {
                let home = width / 2;
                if player_center < home - PLAYER_STEP {
                    input.right = true;
                } else if player_center > home + PLAYER_STEP {
                    input.left = true;
                }
            }
        }

        input
    }
}
