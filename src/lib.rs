//! Bricks - a single-screen brick-breaker
//!
//! Core modules:
//! - `sim`: Deterministic simulation (ball, paddle, bricks, collisions, tick)
//! - `levels`: Level maps and brick layout
//! - `session`: Game lifecycle, event listener, render snapshot
//! - `input`: Pointer drag / quick tap mapping
//! - `audio`: Sound cues and background playlist
//! - `driver`: Fixed-interval tick driver
//! - `settings`: Persisted preferences

pub mod audio;
pub mod driver;
pub mod input;
pub mod levels;
pub mod session;
pub mod settings;
pub mod sim;

pub use session::{Session, Snapshot};
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Fixed simulation tick interval in milliseconds (50 Hz)
    pub const TICK_INTERVAL_MS: u64 = 20;
    /// Maximum ticks run per driver wake to prevent spiral of death
    pub const MAX_SUBSTEPS: u32 = 8;

    /// Number of levels in a game
    pub const MAX_LEVELS: u32 = 3;
    /// Lives per game
    pub const MAX_ATTEMPTS: u32 = 3;
    /// Points per destroyed brick
    pub const SCORE_PER_BRICK: u32 = 10;

    /// Ball defaults (pixels per tick)
    pub const BALL_X_SPEED: f32 = 10.0;
    pub const BALL_Y_SPEED: f32 = 10.0;
    /// Ball radius is screen width divided by this
    pub const BALL_RADIUS_DIVISOR: f32 = 50.0;
    /// Paddle bounce: horizontal speed = offset from paddle center / divisor
    pub const PADDLE_DEFLECTION_DIVISOR: f32 = 10.0;

    /// Paddle size relative to a 400x600 reference screen
    pub const PADDLE_WIDTH_BASE: f32 = 70.0;
    pub const PADDLE_HEIGHT_BASE: f32 = 15.0;
    pub const REFERENCE_WIDTH: f32 = 400.0;
    pub const REFERENCE_HEIGHT: f32 = 600.0;
    /// Gap between the paddle bottom and the screen bottom
    pub const PADDLE_BOTTOM_MARGIN: f32 = 80.0;

    /// Brick grid
    pub const BRICKS_PER_ROW: u32 = 10;
    pub const BRICK_GAP: f32 = 5.0;
    pub const BRICK_WIDTH_BASE: f32 = 40.0;
    pub const BRICK_HEIGHT_BASE: f32 = 20.0;

    /// Quick tap thresholds
    pub const MAX_TAP_DURATION_MS: u64 = 180;
    pub const MAX_TAP_DISTANCE_DP: f32 = 20.0;
}
