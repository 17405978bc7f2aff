//! Screen-space geometry for slicing and dodging
//!
//! All rectangles here use screen coordinates: origin top-left, y grows down,
//! so `top <= bottom`.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Axis-aligned rectangle in screen space
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Build from top-left corner and size
    pub fn from_xywh(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self::new(x, y, x + w, y + h)
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }
}

/// Conservative segment-vs-rectangle test
///
/// Rejects only when both endpoints lie outside the same edge of the box.
/// Anything else counts as a hit, so segments that pass diagonally near a
/// corner can report false positives. Slicing tolerates that.
pub fn segment_intersects_rect(a: Vec2, b: Vec2, rect: &Rect) -> bool {
    let both_left = a.x < rect.left && b.x < rect.left;
    let both_right = a.x > rect.right && b.x > rect.right;
    let both_above = a.y < rect.top && b.y < rect.top;
    let both_below = a.y > rect.bottom && b.y > rect.bottom;

    !(both_left || both_right || both_above || both_below)
}

/// Inclusive overlap test between two rectangles (touching edges collide)
pub fn rects_overlap(a: &Rect, b: &Rect) -> bool {
    !(a.right < b.left || a.left > b.right || a.bottom < b.top || a.top > b.bottom)
}
