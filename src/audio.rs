//! Sound cues
//!
//! The game only ever triggers cues; it never waits on or reads back from
//! the audio device.

use crate::settings::Settings;
use crate::sim::GameEvent;

/// Sound effect types
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SoundCue {
    /// Ball hits paddle
    PaddleHit,
    /// Ball hits top or bottom edge
    WallHit,
    /// Ball crossed a goal line
    PointScored,
}

impl SoundCue {
    /// Cue for a simulation event, if it has one
    pub fn for_event(event: &GameEvent) -> Option<SoundCue> {
        match event {
            GameEvent::PaddleHit { .. } => Some(SoundCue::PaddleHit),
            GameEvent::WallHit => Some(SoundCue::WallHit),
            GameEvent::PointScored { .. } => Some(SoundCue::PointScored),
            GameEvent::MatchOver { .. } | GameEvent::RallyStarted | GameEvent::MatchReset => None,
        }
    }
}

/// Audio collaborator. Fire-and-forget: must not block and has nothing
/// to report back.
pub trait AudioSink {
    fn play(&mut self, cue: SoundCue, volume: f32);
}

/// Audio manager for the game: volume and mute in front of a sink
pub struct AudioManager<S> {
    sink: S,
    volume: f32,
    muted: bool,
}

impl<S: AudioSink> AudioManager<S> {
    pub fn new(sink: S, settings: &Settings) -> Self {
        Self {
            sink,
            volume: settings.effective_volume(),
            muted: false,
        }
    }

    /// Mute/unmute all audio
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    pub fn is_muted(&self) -> bool {
        self.muted
    }

    fn effective_volume(&self) -> f32 {
        if self.muted { 0.0 } else { self.volume }
    }

    /// Play a sound effect
    pub fn play(&mut self, cue: SoundCue) {
        let volume = self.effective_volume();
        if volume <= 0.0 {
            return;
        }
        log::trace!("cue {cue:?} at {volume:.2}");
        self.sink.play(cue, volume);
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }
}
