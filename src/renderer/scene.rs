//! Scene composition
//!
//! Reads a `GameState` and produces everything a frame needs: the vertex list
//! for the GPU and the HUD label for the text layer. Never mutates the state.

use glam::{IVec2, Vec2};

use super::shapes;
use super::vertex::{Vertex, colors};
use crate::sim::{GameState, Rgb};

/// Where the score is drawn while alive
pub const SCORE_POSITION: IVec2 = IVec2::new(400, 30);
/// Where the game-over label is drawn
pub const GAME_OVER_POSITION: IVec2 = IVec2::new(350, 30);
pub const GAME_OVER_TEXT: &str = "Game Over";
/// Divider thickness in pixels
const DIVIDER_THICKNESS: f32 = 1.0;

/// A single line of HUD text
#[derive(Debug, Clone, PartialEq)]
pub struct HudLabel {
    pub text: String,
    /// Top-left corner in screen pixels
    pub position: IVec2,
    pub color: Rgb,
}

/// Everything needed to draw one frame
#[derive(Debug, Clone)]
pub struct Scene {
    pub vertices: Vec<Vertex>,
    pub hud: HudLabel,
}

/// Compose a frame from the current state
///
/// `end_color` is the memoized end-screen colour, resolved by the driver via
/// `GameState::end_screen_color` before drawing.
pub fn build(state: &GameState, end_color: Option<Rgb>) -> Scene {
    let mut vertices = Vec::with_capacity((state.obstacles.len() + 2) * 6);

    if state.is_alive() {
        let p = &state.player;
        vertices.extend(shapes::rect(
            p.pos.as_vec2(),
            Vec2::splat(p.size as f32),
            colors::PLAYER,
        ));
    }

    for obstacle in &state.obstacles {
        vertices.extend(shapes::rect(
            obstacle.pos.as_vec2(),
            Vec2::splat(obstacle.size as f32),
            obstacle.color.to_rgba(),
        ));
    }

    vertices.extend(shapes::hline(
        state.config.midline() as f32,
        0.0,
        state.config.screen_width as f32,
        DIVIDER_THICKNESS,
        colors::DIVIDER,
    ));

    Scene {
        vertices,
        hud: hud_label(state, end_color),
    }
}

/// Floored score while alive, otherwise the game-over label
pub fn hud_label(state: &GameState, end_color: Option<Rgb>) -> HudLabel {
    if state.is_alive() {
        HudLabel {
            text: format!("{}", state.score.floor() as i64),
            position: SCORE_POSITION,
            color: Rgb::WHITE,
        }
    } else {
        HudLabel {
            text: GAME_OVER_TEXT.to_string(),
            position: GAME_OVER_POSITION,
            color: end_color.unwrap_or(Rgb::WHITE),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::{Obstacle, TickInput, advance_frame};

    fn obstacle(x: i32, y: i32, color: Rgb) -> Obstacle {
        Obstacle {
            pos: IVec2::new(x, y),
            size: 50,
            speed: 2,
            color,
        }
    }

    #[test]
    fn test_alive_scene_contents() {
        let mut state = GameState::new(1);
        state.score = 3.99;
        state.obstacles.push(obstacle(10, 0, Rgb::new(200, 10, 10)));

        let scene = build(&state, None);
        // Player, one obstacle, divider
        assert_eq!(scene.vertices.len(), 18);
        assert_eq!(scene.vertices[0].color, colors::PLAYER);
        assert_eq!(scene.vertices[6].color, Rgb::new(200, 10, 10).to_rgba());
        assert_eq!(scene.vertices[12].position[1], 300.0);

        assert_eq!(scene.hud.text, "3");
        assert_eq!(scene.hud.position, SCORE_POSITION);
        assert_eq!(scene.hud.color, Rgb::WHITE);
    }

    #[test]
    fn test_dead_scene_hides_player() {
        let mut state = GameState::new(1);
        state.obstacles.push(obstacle(400, 500, Rgb::new(1, 2, 3)));
        advance_frame(&mut state, &TickInput::default());
        assert!(!state.is_alive());

        let color = state.end_screen_color();
        let scene = build(&state, color);
        // Obstacles and divider only
        assert_eq!(scene.vertices.len(), (state.obstacles.len() + 1) * 6);
        assert_eq!(scene.hud.text, GAME_OVER_TEXT);
        assert_eq!(scene.hud.position, GAME_OVER_POSITION);
        assert_eq!(Some(scene.hud.color), color);
    }

    #[test]
    fn test_build_does_not_mutate() {
        let mut state = GameState::new(5);
        for _ in 0..120 {
            advance_frame(&mut state, &TickInput::default());
        }
        let before = (state.score, state.obstacles.clone(), state.player.pos);
        let _ = build(&state, None);
        assert_eq!(before, (state.score, state.obstacles.clone(), state.player.pos));
    }
}
