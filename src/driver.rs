//! Fixed-interval tick driver
//!
//! The simulation only knows logical ticks. `FixedStep` turns real elapsed
//! time into a number of due ticks, and `UpdateLoop` runs them on a worker
//! thread. Each tick and the frame hook that follows it (rendering a
//! snapshot, UI checks) run under one lock of the session, so readers never
//! see a half-applied tick.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};

use anyhow::{Context, Result};

use crate::consts::*;
use crate::session::Session;
use crate::sim::TickOutcome;

/// Longest real-time gap fed into the accumulator at once
pub const MAX_FRAME_DELTA: Duration = Duration::from_millis(100);

/// Accumulates real time into fixed logical ticks
#[derive(Debug, Clone)]
pub struct FixedStep {
    step: Duration,
    accumulator: Duration,
}

impl FixedStep {
    pub fn new(step: Duration) -> Self {
        assert!(!step.is_zero(), "fixed step must be non-zero");
        Self {
            step,
            accumulator: Duration::ZERO,
        }
    }

    /// Add elapsed time and return how many ticks are due
    pub fn advance(&mut self, elapsed: Duration) -> u32 {
        self.accumulator += elapsed.min(MAX_FRAME_DELTA);

        let mut substeps = 0;
        while self.accumulator >= self.step && substeps < MAX_SUBSTEPS {
            self.accumulator -= self.step;
            substeps += 1;
        }
        substeps
    }

    /// Forget partial time, e.g. after the driver was detached
    pub fn reset(&mut self) {
        self.accumulator = Duration::ZERO;
    }
}

/// Worker thread that ticks a shared session at a fixed interval
pub struct UpdateLoop {
    interval: Duration,
    running: Arc<AtomicBool>,
    handle: Option<JoinHandle<()>>,
}

impl UpdateLoop {
    pub fn new(interval: Duration) -> Self {
        Self {
            interval,
            running: Arc::new(AtomicBool::new(false)),
            handle: None,
        }
    }

    /// True while the worker thread is alive
    pub fn is_attached(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Start ticking `session`; no-op if already attached
    ///
    /// `frame` runs after every tick while the session is still locked.
    pub fn attach<F>(&mut self, session: Arc<Mutex<Session>>, mut frame: F) -> Result<()>
    where
        F: FnMut(&mut Session, TickOutcome) + Send + 'static,
    {
        if self.handle.as_ref().is_some_and(JoinHandle::is_finished) {
            // Worker died (hook panic); join it so ticking can restart
            self.detach();
        }
        if self.is_attached() {
            return Ok(());
        }

        self.running.store(true, Ordering::Release);
        let running = self.running.clone();
        let interval = self.interval;

        let handle = thread::Builder::new()
            .name("bricks-update".into())
            .spawn(move || {
                let mut step = FixedStep::new(interval);
                let mut last = Instant::now();

                while running.load(Ordering::Acquire) {
                    thread::park_timeout(interval);
                    if !running.load(Ordering::Acquire) {
                        break;
                    }

                    let now = Instant::now();
                    let due = step.advance(now - last);
                    last = now;
                    if due == 0 {
                        continue;
                    }

                    let mut guard = match session.lock() {
                        Ok(guard) => guard,
                        Err(poisoned) => {
                            log::warn!("Session lock poisoned by an earlier panic, recovering");
                            session.clear_poison();
                            poisoned.into_inner()
                        }
                    };
                    for _ in 0..due {
                        let outcome = guard.tick();
                        frame(&mut guard, outcome);
                    }
                }
            })
            .context("spawning update thread")?;

        self.handle = Some(handle);
        log::debug!("Update loop attached ({:?} interval)", self.interval);
        Ok(())
    }

    /// Stop ticking and wait for the worker; no-op if not attached
    pub fn detach(&mut self) {
        let Some(handle) = self.handle.take() else {
            return;
        };
        self.running.store(false, Ordering::Release);
        handle.thread().unpark();
        if handle.join().is_err() {
            log::error!("Update thread panicked");
        }
        log::debug!("Update loop detached");
    }
}

impl Default for UpdateLoop {
    fn default() -> Self {
        Self::new(Duration::from_millis(TICK_INTERVAL_MS))
    }
}

impl Drop for UpdateLoop {
    fn drop(&mut self) {
        self.detach();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::levels::{InlineLevels, LevelCatalog};
    use crate::sim::Playfield;
    use std::sync::atomic::AtomicU32;

    fn ms(v: u64) -> Duration {
        Duration::from_millis(v)
    }

    #[test]
    fn test_fixed_step_accumulates() {
        let mut step = FixedStep::new(ms(20));
        assert_eq!(step.advance(ms(10)), 0);
        assert_eq!(step.advance(ms(10)), 1);
        assert_eq!(step.advance(ms(45)), 2);
        // 5ms carried over
        assert_eq!(step.advance(ms(15)), 1);
    }

    #[test]
    fn test_fixed_step_caps_long_gaps() {
        let mut step = FixedStep::new(ms(20));
        // A multi-second stall only yields the clamped amount, no backfill
        assert_eq!(step.advance(Duration::from_secs(5)), 5);
        assert_eq!(step.advance(Duration::ZERO), 0);
    }

    #[test]
    fn test_fixed_step_reset_drops_partial_time() {
        let mut step = FixedStep::new(ms(20));
        step.advance(ms(19));
        step.reset();
        assert_eq!(step.advance(ms(1)), 0);
    }

    fn shared_session() -> Arc<Mutex<Session>> {
        let mut session = Session::new(
            Playfield::new(400.0, 600.0),
            LevelCatalog::new(InlineLevels::from_maps(["1111111111"])),
        );
        session.start_game();
        Arc::new(Mutex::new(session))
    }

    #[test]
    fn test_update_loop_ticks_until_detached() {
        let session = shared_session();
        let ticks = Arc::new(AtomicU32::new(0));
        let counter = ticks.clone();

        let mut driver = UpdateLoop::new(ms(5));
        driver
            .attach(session.clone(), move |_, _| {
                counter.fetch_add(1, Ordering::SeqCst);
            })
            .unwrap();
        assert!(driver.is_attached());

        // Second attach is a no-op
        driver.attach(session.clone(), |_, _| panic!("second hook ran")).unwrap();

        thread::sleep(ms(200));
        driver.detach();
        assert!(!driver.is_attached());
        let after_detach = ticks.load(Ordering::SeqCst);
        assert!(after_detach > 0);

        thread::sleep(ms(50));
        assert_eq!(ticks.load(Ordering::SeqCst), after_detach);

        // Detaching twice is fine
        driver.detach();
    }

    #[test]
    fn test_update_loop_reattach() {
        let session = shared_session();
        let mut driver = UpdateLoop::new(ms(5));
        driver.attach(session.clone(), |_, _| {}).unwrap();
        driver.detach();
        driver.attach(session.clone(), |_, _| {}).unwrap();
        assert!(driver.is_attached());
        drop(driver);
        assert!(session.lock().is_ok());
    }

    #[test]
    fn test_update_loop_restarts_after_hook_panic() {
        let session = shared_session();
        let mut driver = UpdateLoop::new(ms(5));
        driver
            .attach(session.clone(), |_, _| panic!("frame hook failed"))
            .unwrap();

        let deadline = Instant::now() + Duration::from_secs(2);
        while driver.is_attached() && Instant::now() < deadline {
            thread::sleep(ms(10));
        }
        assert!(!driver.is_attached());

        let ticked = Arc::new(AtomicBool::new(false));
        let flag = ticked.clone();
        driver
            .attach(session.clone(), move |_, _| flag.store(true, Ordering::SeqCst))
            .unwrap();
        assert!(driver.is_attached());

        let deadline = Instant::now() + Duration::from_secs(2);
        while !ticked.load(Ordering::SeqCst) && Instant::now() < deadline {
            thread::sleep(ms(10));
        }
        assert!(ticked.load(Ordering::SeqCst));
        driver.detach();
        assert!(session.lock().is_ok());
    }
}
