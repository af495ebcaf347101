//! Bricks entry point
//!
//! Headless run: the autopilot drives the paddle, the update loop ticks the
//! session at the configured interval, and everything interesting is logged.
//! Use `RUST_LOG=info` (or `debug` for sound cues) to watch a game.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow, bail};
use clap::Parser;

use bricks::audio::{AudioService, Playlist};
use bricks::driver::UpdateLoop;
use bricks::input::autopilot_left;
use bricks::levels::{DirLevels, LevelCatalog};
use bricks::settings::SETTINGS_FILE;
use bricks::sim::{Playfield, TickOutcome};
use bricks::{Session, Settings};

#[derive(Parser, Debug)]
#[command(name = "bricks", version, about = "Headless brick-breaker run")]
struct Args {
    /// Playfield width in pixels
    #[arg(long, default_value_t = 400.0)]
    width: f32,
    /// Playfield height in pixels
    #[arg(long, default_value_t = 800.0)]
    height: f32,
    /// Directory with level_1.txt .. level_3.txt (built-in maps if omitted)
    #[arg(long)]
    levels: Option<PathBuf>,
    /// Settings JSON
    #[arg(long, default_value = SETTINGS_FILE)]
    settings: PathBuf,
    /// Give up after this many seconds
    #[arg(long, default_value_t = 120)]
    seconds: u64,
    /// Playlist shuffle seed
    #[arg(long)]
    seed: Option<u64>,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if !(args.width > 0.0 && args.height > 0.0) {
        bail!("playfield must be positive, got {}x{}", args.width, args.height);
    }
    let field = Playfield::new(args.width, args.height);
    let settings = Settings::load_from(&args.settings);
    let seed = args.seed.unwrap_or_else(rand::random);

    let catalog = match &args.levels {
        Some(dir) => LevelCatalog::new(DirLevels::new(dir)),
        None => LevelCatalog::builtin(),
    };

    let mut audio = AudioService::default();
    audio.set_sfx_on(settings.sfx_on);

    let mut session = Session::new(field, catalog).with_soundtrack(Playlist::builtin(seed));
    session.set_music_on(settings.music_on);
    session.set_event_listener(move |event| audio.on_event(event));

    log::info!("Bricks starting on a {}x{} field (seed {seed})", field.width, field.height);
    session.start_game();

    let session = Arc::new(Mutex::new(session));
    let finished = Arc::new(AtomicBool::new(false));
    let done = finished.clone();

    let mut driver = UpdateLoop::new(settings.tick_interval());
    driver.attach(session.clone(), move |session, outcome| {
        // The tick already logs lifecycle changes
        match outcome {
            TickOutcome::LevelCleared => session.start_next_level(),
            TickOutcome::GameOver | TickOutcome::GameCompleted => {
                done.store(true, Ordering::Release);
                return;
            }
            TickOutcome::Skipped | TickOutcome::Continue | TickOutcome::LifeLost => {}
        }

        if session.is_playing() {
            let snap = session.snapshot();
            let left = autopilot_left(&snap);
            session.set_paddle_delta(left - snap.paddle.left);
        }
    })?;

    let deadline = Instant::now() + Duration::from_secs(args.seconds);
    while !finished.load(Ordering::Acquire) && Instant::now() < deadline {
        thread::sleep(Duration::from_millis(50));
    }
    driver.detach();

    let session = session.lock().map_err(|_| anyhow!("session lock poisoned"))?;
    let outcome = if session.game_completed() {
        "completed"
    } else if session.is_game_over() {
        "over"
    } else {
        "stopped"
    };
    log::info!(
        "Game {outcome}: level {}, score {}, attempts {}",
        session.level(),
        session.score(),
        session.attempts()
    );
    println!("{}", serde_json::to_string(&session.snapshot())?);
    Ok(())
}
