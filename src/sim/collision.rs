//! Axis-aligned bounding box collision
//!
//! Everything in the playfield is a rectangle, so a strict-inequality AABB
//! overlap is the whole story. Touching edges do not count as a hit.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle (top-left origin, y grows downward)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub w: f32,
    pub h: f32,
}

impl Rect {
    pub fn new(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_pos_size(pos: Vec2, size: Vec2) -> Self {
        Self::new(pos.x, pos.y, size.x, size.y)
    }

    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.w
    }

    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.h
    }
}

/// Strict AABB overlap test
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.x < b.right() && a.right() > b.x && a.y < b.bottom() && a.bottom() > b.y
}

/// Index of the first rect (in iteration order) that overlaps `subject`
pub fn first_hit<'a, I>(subject: &Rect, rects: I) -> Option<usize>
where
    I: IntoIterator<Item = &'a Rect>,
{
    rects.into_iter().position(|r| overlaps(subject, r))
}
