//! Game session: lifecycle around the simulation tick
//!
//! The session owns the game state, the level catalog, the single event
//! listener slot and the soundtrack. The application shell drives it:
//! `start_game` / `start_next_level` / `set_playing` from its screens,
//! `tick` from the update loop, and `snapshot` to draw a frame.

use serde::Serialize;

use crate::audio::Soundtrack;
use crate::consts::*;
use crate::levels::LevelCatalog;
use crate::sim::{self, Ball, Brick, GameEvent, GameState, Playfield, Rect, Status, TickOutcome};

/// Receives game events synchronously from the tick
pub type EventListener = Box<dyn FnMut(GameEvent) + Send>;

/// Read-only copy of everything a renderer needs for one frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    pub field: Playfield,
    pub ball: Ball,
    pub paddle: Rect,
    /// Remaining bricks, in storage order
    pub bricks: Vec<Brick>,
    pub score: u32,
    pub attempts: u32,
    pub level: u32,
    pub status: Status,
    pub is_playing: bool,
    pub level_cleared: bool,
    pub game_completed: bool,
    pub is_game_over: bool,
}

pub struct Session {
    state: GameState,
    field: Playfield,
    catalog: LevelCatalog,
    listener: Option<EventListener>,
    soundtrack: Option<Box<dyn Soundtrack>>,
    music_on: bool,
}

impl Session {
    pub fn new(field: Playfield, catalog: LevelCatalog) -> Self {
        Self {
            state: GameState::new(field),
            field,
            catalog,
            listener: None,
            soundtrack: None,
            music_on: true,
        }
    }

    /// Attach background music; started and stopped with the game
    pub fn with_soundtrack(mut self, soundtrack: impl Soundtrack + 'static) -> Self {
        self.soundtrack = Some(Box::new(soundtrack));
        self
    }

    /// Register the event listener, replacing any previous one
    pub fn set_event_listener(&mut self, listener: impl FnMut(GameEvent) + Send + 'static) {
        self.listener = Some(Box::new(listener));
    }

    pub fn clear_event_listener(&mut self) {
        self.listener = None;
    }

    /// New screen size; applies from the next level/attempt reset
    pub fn set_playfield(&mut self, field: Playfield) {
        self.field = field;
    }

    pub fn playfield(&self) -> Playfield {
        self.field
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Advance one tick; no-op unless playing
    pub fn tick(&mut self) -> TickOutcome {
        let Self {
            state,
            field,
            listener,
            ..
        } = self;
        let mut emit = |event: GameEvent| {
            if let Some(listener) = listener.as_mut() {
                listener(event);
            }
        };
        let outcome = sim::tick(state, *field, &mut emit);

        match outcome {
            TickOutcome::GameOver | TickOutcome::GameCompleted => self.stop_game(),
            TickOutcome::LevelCleared => self.stop_music(),
            TickOutcome::Skipped | TickOutcome::Continue | TickOutcome::LifeLost => {}
        }
        outcome
    }

    /// New game from level 1 with full attempts
    pub fn start_game(&mut self) {
        log::info!("Starting new game");
        self.state.level = 1;
        self.state.attempts = MAX_ATTEMPTS;
        self.state.score = 0;
        self.reset_level(true);
        self.start_music();
    }

    /// Continue after a cleared level
    pub fn start_next_level(&mut self) {
        if self.state.level < MAX_LEVELS {
            self.state.level += 1;
            log::info!("Starting level {}", self.state.level);
            self.reset_level(true);
            self.start_music();
        } else {
            self.stop_game();
        }
    }

    /// Fresh ball and paddle, optionally reload the level map, and play
    pub fn reset_level(&mut self, reload_map: bool) {
        self.state.respawn(self.field);
        if reload_map {
            self.state.bricks = self.catalog.load(self.state.level, self.field.width);
            self.state.loaded_level = Some(self.state.level);
        }
        self.state.status = Status::Playing;
    }

    /// Leave play and halt the music; end states stay visible
    pub fn stop_game(&mut self) {
        if matches!(
            self.state.status,
            Status::Playing | Status::Paused | Status::LevelCleared
        ) {
            self.state.status = Status::Idle;
        }
        self.stop_music();
    }

    /// Pause (`false`) or resume (`true`) a running game
    pub fn set_playing(&mut self, playing: bool) {
        match (self.state.status, playing) {
            (Status::Playing, false) => {
                log::info!("Paused");
                self.state.status = Status::Paused;
            }
            (Status::Paused, true) => {
                log::info!("Resumed");
                self.state.status = Status::Playing;
            }
            _ => {}
        }
    }

    /// Relative paddle move from a drag; ignored unless playing
    pub fn set_paddle_delta(&mut self, dx: f32) {
        if self.state.is_playing() {
            self.state.paddle.move_by(dx);
        }
    }

    /// Remember the music preference without touching playback
    pub fn set_music_on(&mut self, on: bool) {
        self.music_on = on;
    }

    pub fn music_on(&self) -> bool {
        self.music_on
    }

    /// Change the music preference and pause/resume playback to match
    pub fn switch_music(&mut self, on: bool) {
        self.music_on = on;
        if let Some(soundtrack) = self.soundtrack.as_mut() {
            if on {
                soundtrack.resume();
            } else {
                soundtrack.pause();
            }
        }
    }

    pub fn pause_music(&mut self) {
        if let Some(soundtrack) = self.soundtrack.as_mut() {
            soundtrack.pause();
        }
    }

    fn start_music(&mut self) {
        if !self.music_on {
            return;
        }
        if let Some(soundtrack) = self.soundtrack.as_mut() {
            if !soundtrack.is_playing() {
                soundtrack.play_shuffle();
            }
        }
    }

    fn stop_music(&mut self) {
        if let Some(soundtrack) = self.soundtrack.as_mut() {
            if soundtrack.is_playing() {
                soundtrack.stop();
            }
        }
    }

    pub fn status(&self) -> Status {
        self.state.status
    }

    pub fn level(&self) -> u32 {
        self.state.level
    }

    pub fn attempts(&self) -> u32 {
        self.state.attempts
    }

    pub fn score(&self) -> u32 {
        self.state.score
    }

    pub fn is_playing(&self) -> bool {
        self.state.is_playing()
    }

    pub fn level_cleared(&self) -> bool {
        self.state.level_cleared()
    }

    pub fn game_completed(&self) -> bool {
        self.state.game_completed()
    }

    pub fn is_game_over(&self) -> bool {
        self.state.is_game_over()
    }

    pub fn snapshot(&self) -> Snapshot {
        let state = &self.state;
        Snapshot {
            field: self.field,
            ball: state.ball.clone(),
            paddle: state.paddle.rect,
            bricks: state.bricks.clone(),
            score: state.score,
            attempts: state.attempts,
            level: state.level,
            status: state.status,
            is_playing: state.is_playing(),
            level_cleared: state.level_cleared(),
            game_completed: state.game_completed(),
            is_game_over: state.is_game_over(),
        }
    }
}
