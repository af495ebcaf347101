//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Fixed tick only, velocities are pixels per tick
//! - Stable brick order (storage order decides which brick is hit first)
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod geometry;
pub mod state;
pub mod tick;

pub use collision::{ball_below_floor, ball_overlaps, ball_touches_ceiling, ball_touches_side_wall};
pub use geometry::{Playfield, Rect};
pub use state::{Ball, Brick, ColorTag, GameEvent, GameState, Paddle, Status};
pub use tick::{TickOutcome, tick};
