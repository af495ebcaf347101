//! Game state and core simulation types
//!
//! Everything the tick mutates lives here. Velocities are in pixels per tick.

use glam::Vec2;
use serde::{Deserialize, Serialize};

use super::collision::{ball_touches_ceiling, ball_touches_side_wall};
use super::geometry::{Playfield, Rect};
use crate::consts::*;

/// Session status
///
/// The renderer-facing flags (`is_playing`, `level_cleared`, ...) are all
/// derived from this, so at most one of them is ever true.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Status {
    /// No game running (before the first start, or after a stop)
    #[default]
    Idle,
    /// Active gameplay
    Playing,
    /// Paused by the player; resumes to Playing
    Paused,
    /// All bricks of a non-final level destroyed, waiting for next level
    LevelCleared,
    /// All attempts used
    GameOver,
    /// All bricks of the final level destroyed
    GameCompleted,
}

/// Semantic events emitted by the tick, consumed by audio/UI
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameEvent {
    /// Ball touches a side wall or the ceiling
    BorderHit,
    /// Ball destroys a brick
    BrickHit,
    /// Ball bounces off the paddle
    PaddleHit,
    /// Ball falls below the playfield
    FloorHit,
}

/// Brick color palette
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ColorTag {
    #[default]
    SlateGray,
    DarkGoldenrod,
    IndianRed,
    ForestGreen,
    CadetBlue,
    SandyBrown,
    DarkOrange,
}

impl ColorTag {
    /// Map a level-file digit to a tag; anything outside the palette is slate gray
    pub fn from_code(code: u32) -> Self {
        match code {
            1 => ColorTag::DarkGoldenrod,
            2 => ColorTag::IndianRed,
            3 => ColorTag::ForestGreen,
            4 => ColorTag::CadetBlue,
            5 => ColorTag::SandyBrown,
            6 => ColorTag::DarkOrange,
            _ => ColorTag::SlateGray,
        }
    }

    pub fn code(&self) -> u32 {
        match self {
            ColorTag::SlateGray => 0,
            ColorTag::DarkGoldenrod => 1,
            ColorTag::IndianRed => 2,
            ColorTag::ForestGreen => 3,
            ColorTag::CadetBlue => 4,
            ColorTag::SandyBrown => 5,
            ColorTag::DarkOrange => 6,
        }
    }

    /// Packed ARGB color for renderers
    pub fn argb(&self) -> u32 {
        match self {
            ColorTag::SlateGray => 0xFF70_8090,
            ColorTag::DarkGoldenrod => 0xFFB8_860B,
            ColorTag::IndianRed => 0xFFCD_5C5C,
            ColorTag::ForestGreen => 0xFF22_8B22,
            ColorTag::CadetBlue => 0xFF5F_9EA0,
            ColorTag::SandyBrown => 0xFFF4_A460,
            ColorTag::DarkOrange => 0xFFFF_8C00,
        }
    }
}

/// Ball color (hot pink)
pub const BALL_ARGB: u32 = 0xFFFF_69B4;
/// Paddle color (dark orange)
pub const PADDLE_ARGB: u32 = 0xFFFF_8C00;

/// The ball
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Ball {
    pub center: Vec2,
    pub radius: f32,
    pub vel: Vec2,
}

impl Ball {
    pub fn new(center: Vec2, radius: f32, vel: Vec2) -> Self {
        assert!(radius > 0.0, "ball radius must be positive, got {radius}");
        Self {
            center,
            radius,
            vel,
        }
    }

    /// Fresh ball for a level start or a lost life: screen center, moving down-right
    pub fn spawn(field: Playfield) -> Self {
        Self::new(
            Vec2::new(field.width / 2.0, field.height / 2.0),
            field.width / BALL_RADIUS_DIVISOR,
            Vec2::new(BALL_X_SPEED, BALL_Y_SPEED),
        )
    }

    /// Bounding box
    pub fn rect(&self) -> Rect {
        Rect::around_circle(self.center, self.radius)
    }

    /// True if the ball touches a side wall or the ceiling
    pub fn is_out_of_screen(&self, screen_width: f32) -> bool {
        ball_touches_side_wall(self.center, self.radius, screen_width)
            || ball_touches_ceiling(self.center, self.radius)
    }

    /// Advance one tick
    pub fn integrate(&mut self) {
        self.center += self.vel;
    }

    /// Reverse velocity on wall/ceiling contact (perfectly elastic)
    pub fn bounce_off_walls(&mut self, screen_width: f32) {
        if ball_touches_side_wall(self.center, self.radius, screen_width) {
            self.reflect_horizontal();
        }
        if ball_touches_ceiling(self.center, self.radius) {
            self.reflect_vertical();
        }
    }

    #[inline]
    pub fn reflect_horizontal(&mut self) {
        self.vel.x = -self.vel.x;
    }

    #[inline]
    pub fn reflect_vertical(&mut self) {
        self.vel.y = -self.vel.y;
    }

    /// Deflect off the paddle: the further from the paddle center, the steeper
    pub fn bounce_off_paddle(&mut self, paddle: &Paddle) {
        self.vel.x = (self.center.x - paddle.center_x()) / PADDLE_DEFLECTION_DIVISOR;
        self.reflect_vertical();
    }

    /// Bricks only flip the vertical direction
    pub fn bounce_off_brick(&mut self) {
        self.reflect_vertical();
    }
}

/// The player's paddle
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paddle {
    pub rect: Rect,
}

impl Paddle {
    pub fn new(left: f32, top: f32, width: f32, height: f32) -> Self {
        Self {
            rect: Rect::from_origin_size(left, top, width, height),
        }
    }

    /// Fresh paddle, horizontally centered near the bottom of the screen
    pub fn spawn(field: Playfield) -> Self {
        let width = field.width * (PADDLE_WIDTH_BASE / REFERENCE_WIDTH);
        let height = field.height * (PADDLE_HEIGHT_BASE / REFERENCE_HEIGHT);
        Self::new(
            field.width / 2.0 - width / 2.0,
            field.height - height - PADDLE_BOTTOM_MARGIN,
            width,
            height,
        )
    }

    #[inline]
    pub fn left(&self) -> f32 {
        self.rect.left
    }

    #[inline]
    pub fn center_x(&self) -> f32 {
        self.rect.center_x()
    }

    /// Place the left edge; not clamped, the paddle may leave the screen
    pub fn set_left(&mut self, x: f32) {
        self.rect.offset_to_x(x);
    }

    /// Relative horizontal move
    pub fn move_by(&mut self, dx: f32) {
        self.set_left(self.left() + dx);
    }
}

/// A brick (immutable once created)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Brick {
    pub rect: Rect,
    pub color: ColorTag,
}

impl Brick {
    pub fn new(rect: Rect, color: ColorTag) -> Self {
        Self { rect, color }
    }
}

/// Complete simulation state
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    /// Current level, 1-based
    pub level: u32,
    /// Lives left
    pub attempts: u32,
    /// Score, +10 per brick
    pub score: u32,
    pub status: Status,
    pub ball: Ball,
    pub paddle: Paddle,
    /// Remaining bricks in storage order
    pub bricks: Vec<Brick>,
    /// Level whose map populated `bricks`; None until the first load
    pub loaded_level: Option<u32>,
}

impl GameState {
    pub fn new(field: Playfield) -> Self {
        Self {
            level: 1,
            attempts: MAX_ATTEMPTS,
            score: 0,
            status: Status::Idle,
            ball: Ball::spawn(field),
            paddle: Paddle::spawn(field),
            bricks: Vec::new(),
            loaded_level: None,
        }
    }

    /// New ball and paddle sized from the playfield; bricks untouched
    pub fn respawn(&mut self, field: Playfield) {
        self.ball = Ball::spawn(field);
        self.paddle = Paddle::spawn(field);
    }

    pub fn is_playing(&self) -> bool {
        self.status == Status::Playing
    }

    pub fn level_cleared(&self) -> bool {
        self.status == Status::LevelCleared
    }

    pub fn game_completed(&self) -> bool {
        self.status == Status::GameCompleted
    }

    pub fn is_game_over(&self) -> bool {
        self.status == Status::GameOver
    }
}
