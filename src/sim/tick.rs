//! Fixed step simulation tick
//!
//! One call advances the game by one logical tick: move the ball, resolve at
//! most one collision class, update counters and report what happened.

use super::collision::{ball_below_floor, ball_overlaps};
use super::geometry::Playfield;
use super::state::{GameEvent, GameState, Status};
use crate::consts::*;

/// What a tick did to the session, for the caller to react on (music, UI)
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Not playing, nothing happened
    Skipped,
    /// Still playing
    Continue,
    /// A life was lost; ball and paddle were respawned, bricks kept
    LifeLost,
    /// Last attempt lost
    GameOver,
    /// Last brick of a non-final level destroyed
    LevelCleared,
    /// Last brick of the final level destroyed
    GameCompleted,
}

/// Advance the game state by one tick
///
/// `emit` is called synchronously for every event, in the order they happen.
/// Panics if called while playing before any level map was loaded.
pub fn tick(
    state: &mut GameState,
    field: Playfield,
    emit: &mut dyn FnMut(GameEvent),
) -> TickOutcome {
    if state.status != Status::Playing {
        return TickOutcome::Skipped;
    }
    assert!(
        state.loaded_level.is_some(),
        "tick() while playing before any level was loaded"
    );

    // Passive walls only make noise here; the bounce happens after moving
    if state.ball.is_out_of_screen(field.width) {
        emit(GameEvent::BorderHit);
    }

    state.ball.integrate();
    state.ball.bounce_off_walls(field.width);

    if state.ball.rect().intersects(&state.paddle.rect) {
        emit(GameEvent::PaddleHit);
        state.ball.bounce_off_paddle(&state.paddle);
        return TickOutcome::Continue;
    }

    if ball_below_floor(state.ball.center, state.ball.radius, field.height) {
        emit(GameEvent::FloorHit);
        state.attempts = state.attempts.saturating_sub(1);

        if state.attempts == 0 {
            log::info!("Game over on level {} with score {}", state.level, state.score);
            state.status = Status::GameOver;
            return TickOutcome::GameOver;
        }

        log::info!("Life lost, {} attempts left", state.attempts);
        state.respawn(field);
        return TickOutcome::LifeLost;
    }

    // At most one brick per tick, first in storage order wins
    let hit = state
        .bricks
        .iter()
        .position(|brick| ball_overlaps(state.ball.center, state.ball.radius, &brick.rect));
    if let Some(index) = hit {
        emit(GameEvent::BrickHit);
        state.ball.bounce_off_brick();
        state.bricks.remove(index);
        state.score += SCORE_PER_BRICK;
    }

    if state.bricks.is_empty() {
        if state.level >= MAX_LEVELS {
            log::info!("Game completed with score {}", state.score);
            state.status = Status::GameCompleted;
            return TickOutcome::GameCompleted;
        }
        log::info!("Level {} cleared, score {}", state.level, state.score);
        state.status = Status::LevelCleared;
        return TickOutcome::LevelCleared;
    }

    TickOutcome::Continue
}
