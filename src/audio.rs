//! Audio: sound effects for game events and the background playlist
//!
//! Nothing here talks to an audio device. Playback goes through the
//! `CuePlayer` and `Soundtrack` seams so the shell can plug in whatever
//! backend the platform offers; the defaults only log.

use rand::SeedableRng;
use rand::seq::SliceRandom;
use rand_pcg::Pcg32;

use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SoundEffect {
    /// Ball hits a side wall or the ceiling
    WallHit,
    /// Ball breaks a brick
    BrickHit,
    /// Ball hits paddle
    PaddleHit,
    /// Ball lost through the floor
    FloorHit,
}

impl From<GameEvent> for SoundEffect {
    fn from(event: GameEvent) -> Self {
        match event {
            GameEvent::BorderHit => SoundEffect::WallHit,
            GameEvent::BrickHit => SoundEffect::BrickHit,
            GameEvent::PaddleHit => SoundEffect::PaddleHit,
            GameEvent::FloorHit => SoundEffect::FloorHit,
        }
    }
}

impl SoundEffect {
    /// Asset name of the sample for this effect
    pub fn asset(&self) -> &'static str {
        match self {
            SoundEffect::WallHit => "border_hit",
            SoundEffect::BrickHit => "brick_hit",
            SoundEffect::PaddleHit => "platform_hit",
            SoundEffect::FloorHit => "floor_hit",
        }
    }
}

/// Backend that actually plays a short effect
pub trait CuePlayer: Send {
    fn play(&mut self, effect: SoundEffect);
}

/// Backend that only logs, for headless runs
#[derive(Debug, Default)]
pub struct LogCuePlayer;

impl CuePlayer for LogCuePlayer {
    fn play(&mut self, effect: SoundEffect) {
        log::debug!("sfx {}", effect.asset());
    }
}

/// Sound effects for game events
///
/// Owned by the application shell and fed from the session's event listener.
pub struct AudioService {
    player: Box<dyn CuePlayer>,
    sfx_on: bool,
}

impl Default for AudioService {
    fn default() -> Self {
        Self::new(LogCuePlayer)
    }
}

impl AudioService {
    pub fn new(player: impl CuePlayer + 'static) -> Self {
        Self {
            player: Box::new(player),
            sfx_on: true,
        }
    }

    /// Enable/disable sound effects
    pub fn set_sfx_on(&mut self, on: bool) {
        self.sfx_on = on;
    }

    pub fn sfx_on(&self) -> bool {
        self.sfx_on
    }

    /// Play the effect for a game event (no-op while muted)
    pub fn on_event(&mut self, event: GameEvent) {
        if !self.sfx_on {
            return;
        }
        self.player.play(event.into());
    }
}

/// Background music control used by the session
pub trait Soundtrack: Send {
    /// Start the next track of a shuffled playlist
    fn play_shuffle(&mut self);
    /// Pause without losing the position
    fn pause(&mut self);
    /// Continue a paused track, or start one if nothing is loaded
    fn resume(&mut self);
    /// Stop and unload the current track
    fn stop(&mut self);
    fn is_playing(&self) -> bool;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Playback {
    Stopped,
    Playing,
    Paused,
}

/// Shuffled background playlist
///
/// Every track is played once per shuffle round; the round is reshuffled
/// when it runs out.
pub struct Playlist {
    tracks: Vec<String>,
    queue: Vec<String>,
    rng: Pcg32,
    current: Option<String>,
    playback: Playback,
}

impl Playlist {
    pub fn new<I, S>(tracks: I, seed: u64) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            tracks: tracks.into_iter().map(Into::into).collect(),
            queue: Vec::new(),
            rng: Pcg32::seed_from_u64(seed),
            current: None,
            playback: Playback::Stopped,
        }
    }

    /// The stock background tracks
    pub fn builtin(seed: u64) -> Self {
        Self::new(["bg_music_01", "bg_music_02", "bg_music_03", "bg_music_04"], seed)
    }

    fn shuffle(&mut self) {
        self.queue.clear();
        self.queue.extend(self.tracks.iter().cloned());
        self.queue.shuffle(&mut self.rng);
    }

    /// Track currently loaded (playing or paused)
    pub fn current(&self) -> Option<&str> {
        self.current.as_deref()
    }

    pub fn is_paused(&self) -> bool {
        self.playback == Playback::Paused
    }

    /// The loaded track reached its end; move on to the next one
    pub fn track_finished(&mut self) {
        if self.playback == Playback::Playing {
            self.play_shuffle();
        }
    }
}

impl Soundtrack for Playlist {
    fn play_shuffle(&mut self) {
        if self.queue.is_empty() {
            self.shuffle();
        }
        if self.queue.is_empty() {
            log::warn!("Playlist has no tracks");
            self.stop();
            return;
        }
        let track = self.queue.remove(0);
        log::info!("Now playing {track}");
        self.current = Some(track);
        self.playback = Playback::Playing;
    }

    fn pause(&mut self) {
        if self.playback == Playback::Playing {
            self.playback = Playback::Paused;
        }
    }

    fn resume(&mut self) {
        let loaded = self.current.is_some();
        match (self.playback, loaded) {
            (Playback::Paused, true) => self.playback = Playback::Playing,
            (_, false) => self.play_shuffle(),
            _ => {}
        }
    }

    fn stop(&mut self) {
        self.current = None;
        self.playback = Playback::Stopped;
    }

    fn is_playing(&self) -> bool {
        self.playback == Playback::Playing
    }
}
