//! Axis-aligned rectangle geometry and overlap tests
//!
//! Rectangles are half-open pixel regions: a rect at x=0 with width 50 covers
//! columns 0..50, so two rects that merely share an edge do not overlap.

use glam::IVec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in screen space (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rect {
    /// Top-left corner
    pub min: IVec2,
    /// Width and height
    pub size: IVec2,
}

impl Rect {
    pub fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self {
            min: IVec2::new(x, y),
            size: IVec2::new(w, h),
        }
    }

    pub fn square(pos: IVec2, side: i32) -> Self {
        Self {
            min: pos,
            size: IVec2::splat(side),
        }
    }

    /// Exclusive bottom-right corner
    #[inline]
    pub fn max(&self) -> IVec2 {
        self.min + self.size
    }

    /// True if the two rectangles share any interior area
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        let (a_max, b_max) = (self.max(), other.max());
        self.min.x < b_max.x
            && other.min.x < a_max.x
            && self.min.y < b_max.y
            && other.min.y < a_max.y
    }
}

/// Index of the first rectangle (in iteration order) overlapping `target`
pub fn first_collision(target: &Rect, others: impl IntoIterator<Item = Rect>) -> Option<usize> {
    others.into_iter().position(|r| r.intersects(target))
}
