//! Shape generation for 2D primitives

use glam::Vec2;

use super::vertex::Vertex;

/// Generate vertices for a filled axis-aligned rectangle (two triangles)
pub fn rect(min: Vec2, size: Vec2, color: [f32; 4]) -> Vec<Vertex> {
    let max = min + size;
    vec![
        Vertex::new(min.x, min.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(min.x, max.y, color),
        Vertex::new(max.x, min.y, color),
        Vertex::new(max.x, max.y, color),
    ]
}

/// Generate vertices for a horizontal line of the given thickness
///
/// The line's top edge sits on `y`, matching a 1 px raster line at that row.
pub fn hline(y: f32, x0: f32, x1: f32, thickness: f32, color: [f32; 4]) -> Vec<Vertex> {
    let (left, right) = if x0 <= x1 { (x0, x1) } else { (x1, x0) };
    rect(
        Vec2::new(left, y),
        Vec2::new(right - left, thickness),
        color,
    )
}
