//! Pointer input mapping
//!
//! A drag moves the paddle by the raw horizontal pointer delta (no density
//! scaling, so the paddle keeps pace with the finger). A short, still press
//! is a quick tap, which the shell uses to reveal its settings chrome.

use std::time::Duration;

use crate::consts::*;
use crate::session::{Session, Snapshot};

/// Quick tap thresholds in physical units
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QuickTapConfig {
    pub max_duration: Duration,
    /// Maximum movement on either axis, in physical pixels
    pub max_distance_px: f32,
}

impl Default for QuickTapConfig {
    fn default() -> Self {
        Self::new(MAX_TAP_DURATION_MS, MAX_TAP_DISTANCE_DP, 1.0)
    }
}

impl QuickTapConfig {
    /// Thresholds for a display density (physical pixels per dp)
    pub fn new(max_duration_ms: u64, max_distance_dp: f32, density: f32) -> Self {
        Self {
            max_duration: Duration::from_millis(max_duration_ms),
            // Whole pixels, like the platform's own touch slop
            max_distance_px: (max_distance_dp * density).trunc(),
        }
    }
}

/// Recognized gestures
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gesture {
    QuickTap,
}

#[derive(Debug, Clone, Copy)]
struct PointerDown {
    x: f32,
    y: f32,
    at: Duration,
}

/// Tracks one pointer from down to up
#[derive(Debug, Clone, Default)]
pub struct PointerTracker {
    config: QuickTapConfig,
    down: Option<PointerDown>,
    last_x: f32,
}

impl PointerTracker {
    pub fn new(config: QuickTapConfig) -> Self {
        Self {
            config,
            down: None,
            last_x: 0.0,
        }
    }

    /// Pointer pressed at `at` (any monotonic clock)
    pub fn down(&mut self, x: f32, y: f32, at: Duration) {
        self.down = Some(PointerDown { x, y, at });
        self.last_x = x;
    }

    /// Horizontal delta since the previous sample
    pub fn moved(&mut self, x: f32) -> f32 {
        if self.down.is_none() {
            self.last_x = x;
            return 0.0;
        }
        let dx = x - self.last_x;
        self.last_x = x;
        dx
    }

    /// Pointer released; reports a quick tap if it was short and still
    pub fn up(&mut self, x: f32, y: f32, at: Duration) -> Option<Gesture> {
        let down = self.down.take()?;
        let dx = (x - down.x).abs();
        let dy = (y - down.y).abs();
        let elapsed = at.saturating_sub(down.at);

        let still = dx < self.config.max_distance_px && dy < self.config.max_distance_px;
        (still && elapsed < self.config.max_duration).then_some(Gesture::QuickTap)
    }
}

/// Feeds pointer events into a session and the quick tap listener
#[derive(Default)]
pub struct InputMapper {
    tracker: PointerTracker,
    on_quick_tap: Option<Box<dyn FnMut() + Send>>,
}

impl InputMapper {
    pub fn new(config: QuickTapConfig) -> Self {
        Self {
            tracker: PointerTracker::new(config),
            on_quick_tap: None,
        }
    }

    pub fn set_quick_tap_listener(&mut self, listener: impl FnMut() + Send + 'static) {
        self.on_quick_tap = Some(Box::new(listener));
    }

    pub fn pointer_down(&mut self, x: f32, y: f32, at: Duration) {
        self.tracker.down(x, y, at);
    }

    /// Moves the paddle by the drag delta; returns the delta
    pub fn pointer_move(&mut self, x: f32, session: &mut Session) -> f32 {
        let dx = self.tracker.moved(x);
        session.set_paddle_delta(dx);
        dx
    }

    pub fn pointer_up(&mut self, x: f32, y: f32, at: Duration) -> Option<Gesture> {
        let gesture = self.tracker.up(x, y, at);
        if gesture == Some(Gesture::QuickTap) {
            if let Some(listener) = self.on_quick_tap.as_mut() {
                listener();
            }
        }
        gesture
    }
}

/// Fastest sideways speed the autopilot asks the paddle for (px/tick)
const AUTOPILOT_MAX_SPEED: f32 = 3.0;
/// Sideways speed used to pull a wall-hugging ball back into the field
const AUTOPILOT_ESCAPE_SPEED: f32 = 4.0;

/// Paddle left edge that sends the ball toward the nearest brick
///
/// Demo/idle play. Meant to be applied every tick before `tick()`: the paddle
/// is placed under where the ball will be, offset so the deflection aims
/// the rebound at the brick.
pub fn autopilot_left(snap: &Snapshot) -> f32 {
    let ball = &snap.ball;
    let paddle = snap.paddle;
    let next_x = ball.center.x + ball.vel.x;

    let vx = if next_x - ball.radius <= 0.0 {
        AUTOPILOT_ESCAPE_SPEED
    } else if next_x + ball.radius >= snap.field.width {
        -AUTOPILOT_ESCAPE_SPEED
    } else {
        let nearest = snap.bricks.iter().min_by(|a, b| {
            let da = (a.rect.center_x() - next_x).abs();
            let db = (b.rect.center_x() - next_x).abs();
            da.partial_cmp(&db).unwrap_or(std::cmp::Ordering::Equal)
        });
        match nearest {
            Some(brick) => {
                let climb = (paddle.top - brick.rect.bottom).max(1.0);
                let ticks = climb / ball.vel.y.abs().max(1.0);
                ((brick.rect.center_x() - next_x) / ticks)
                    .clamp(-AUTOPILOT_MAX_SPEED, AUTOPILOT_MAX_SPEED)
            }
            None => 0.0,
        }
    };

    let center = next_x - vx * PADDLE_DEFLECTION_DIVISOR;
    center - paddle.width() / 2.0
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::{InlineLevels, LevelCatalog};
    use crate::sim::Playfield;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicU32, Ordering};

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_drag_deltas_are_relative() {
        let mut tracker = PointerTracker::default();
        tracker.down(100.0, 500.0, ms(0));
        assert_eq!(tracker.moved(110.0), 10.0);
        assert_eq!(tracker.moved(105.0), -5.0);
        assert_eq!(tracker.moved(105.0), 0.0);
    }

    #[test]
    fn test_move_without_down_is_ignored() {
        let mut tracker = PointerTracker::default();
        assert_eq!(tracker.moved(300.0), 0.0);
    }

    #[test]
    fn test_quick_tap_thresholds() {
        let config = QuickTapConfig::new(180, 20.0, 2.0);
        assert_eq!(config.max_distance_px, 40.0);
        let mut tracker = PointerTracker::new(config);

        tracker.down(100.0, 100.0, ms(1000));
        assert_eq!(tracker.up(130.0, 120.0, ms(1100)), Some(Gesture::QuickTap));

        // Too slow
        tracker.down(100.0, 100.0, ms(2000));
        assert_eq!(tracker.up(100.0, 100.0, ms(2180)), None);

        // Too far on one axis
        tracker.down(100.0, 100.0, ms(3000));
        assert_eq!(tracker.up(100.0, 140.0, ms(3050)), None);

        // Up without down
        assert_eq!(tracker.up(100.0, 100.0, ms(4000)), None);
    }

    #[test]
    fn test_fractional_density_truncates() {
        let config = QuickTapConfig::new(180, 20.0, 2.625);
        assert_eq!(config.max_distance_px, 52.0);
    }

    #[test]
    fn test_mapper_moves_paddle_and_fires_tap() {
        let mut session = Session::new(
            Playfield::new(400.0, 600.0),
            LevelCatalog::new(InlineLevels::from_maps(["1"])),
        );
        session.start_game();
        let taps = Arc::new(AtomicU32::new(0));
        let counter = taps.clone();

        let mut mapper = InputMapper::new(QuickTapConfig::default());
        mapper.set_quick_tap_listener(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let left = session.state().paddle.left();
        mapper.pointer_down(200.0, 550.0, ms(0));
        mapper.pointer_move(260.0, &mut session);
        mapper.pointer_move(250.0, &mut session);
        assert!((session.state().paddle.left() - (left + 50.0)).abs() < 0.01);

        // A drag is not a tap
        assert_eq!(mapper.pointer_up(250.0, 550.0, ms(100)), None);
        assert_eq!(taps.load(Ordering::SeqCst), 0);

        mapper.pointer_down(200.0, 550.0, ms(1000));
        assert_eq!(mapper.pointer_up(202.0, 551.0, ms(1050)), Some(Gesture::QuickTap));
        assert_eq!(taps.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_autopilot_catches_ball() {
        let mut session = Session::new(
            Playfield::new(400.0, 600.0),
            LevelCatalog::new(InlineLevels::from_maps(["1"])),
        );
        session.start_game();
        let snap = session.snapshot();
        let left = autopilot_left(&snap);
        let next_x = snap.ball.center.x + snap.ball.vel.x;
        // Ball lands on the paddle, within the half width
        assert!((left + snap.paddle.width() / 2.0 - next_x).abs() <= AUTOPILOT_MAX_SPEED * 10.0);
    }
}
