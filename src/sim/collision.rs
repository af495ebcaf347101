//! Collision predicates for a circular ball against the screen and rectangles
//!
//! Every test works on the ball's bounding box, not the true circle. Good
//! enough at these speeds and it is what the scoring rules are tuned for.

use glam::Vec2;

use super::geometry::Rect;

/// Ball's horizontal extent touches or crosses a side wall
#[inline]
pub fn ball_touches_side_wall(ball_pos: Vec2, ball_radius: f32, screen_width: f32) -> bool {
    ball_pos.x - ball_radius <= 0.0 || ball_pos.x + ball_radius >= screen_width
}

/// Ball's top edge touches or crosses the ceiling
#[inline]
pub fn ball_touches_ceiling(ball_pos: Vec2, ball_radius: f32) -> bool {
    ball_pos.y - ball_radius <= 0.0
}

/// Ball's top edge passed below the bottom of the playfield
#[inline]
pub fn ball_below_floor(ball_pos: Vec2, ball_radius: f32, screen_height: f32) -> bool {
    ball_pos.y - ball_radius > screen_height
}

/// Ball's bounding box strictly overlaps the rectangle
#[inline]
pub fn ball_overlaps(ball_pos: Vec2, ball_radius: f32, rect: &Rect) -> bool {
    Rect::around_circle(ball_pos, ball_radius).intersects(rect)
}
