//! Axis-aligned rectangles and the playfield
//!
//! Screen coordinates: origin at the top-left corner, y grows downward.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// An axis-aligned rectangle in screen pixels
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

    /// Rectangle from top-left corner and size
    pub fn from_origin_size(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self::new(left, top, left + width, top + height)
    }

    /// Bounding box of a circle
    pub fn around_circle(center: Vec2, radius: f32) -> Self {
        Self::new(
            center.x - radius,
            center.y - radius,
            center.x + radius,
            center.y + radius,
        )
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        (self.left + self.right) * 0.5
    }

    /// Strict overlap: rectangles that only share an edge do not intersect
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && other.left < self.right
            && self.top < other.bottom
            && other.top < self.bottom
    }

    /// Move horizontally so the left edge sits at `x`, keeping the size
    pub fn offset_to_x(&mut self, x: f32) {
        let width = self.width();
        self.left = x;
        self.right = x + width;
    }
}

/// Visible playfield size in pixels
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Playfield {
    pub width: f32,
    pub height: f32,
}

impl Playfield {
    pub fn new(width: f32, height: f32) -> Self {
        assert!(
            width > 0.0 && height > 0.0,
            "playfield must have a positive size, got {width}x{height}"
        );
        Self { width, height }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_intersects_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 15.0, 15.0);
        assert!(a.intersects(&b));
        assert!(b.intersects(&a));
    }

    #[test]
    fn test_shared_edge_is_not_intersection() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(10.0, 0.0, 20.0, 10.0);
        assert!(!a.intersects(&b));
    }

    #[test]
    fn test_offset_to_x_keeps_size() {
        let mut r = Rect::from_origin_size(10.0, 20.0, 70.0, 15.0);
        r.offset_to_x(-100.0);
        assert_eq!(r.left, -100.0);
        assert!((r.width() - 70.0).abs() < 0.001);
        assert_eq!(r.top, 20.0);
        assert!((r.height() - 15.0).abs() < 0.001);
    }

    #[test]
    fn test_around_circle() {
        let r = Rect::around_circle(Vec2::new(200.0, 300.0), 8.0);
        assert_eq!(r, Rect::new(192.0, 292.0, 208.0, 308.0));
    }

    #[test]
    #[should_panic]
    fn test_playfield_rejects_zero_size() {
        Playfield::new(0.0, 600.0);
    }
}
