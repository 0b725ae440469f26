//! Platform abstraction layer
//!
//! The collaborators the game loop talks to:
//! - Keyboard: held keys and key-down events
//! - Clock: monotonic milliseconds and sleeping
//! - Renderer: draws a `Frame`
//! - Audio: see `crate::audio::AudioSink`

pub mod clock;
pub mod pacing;
pub mod terminal;

pub use clock::{ManualClock, SystemClock};
pub use pacing::{FpsCounter, FrameLimiter};

use crate::error::PlatformError;
use crate::renderer::Frame;
use crate::sim::Command;

/// Keys the game reacts to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Key {
    Up,
    Down,
    Space,
    R,
    /// Toggles sound; handled by the loop, not the simulation
    M,
    Q,
    Escape,
}

impl Key {
    /// Command bound to a key-down event, if any
    pub fn command(self) -> Option<Command> {
        match self {
            Key::Space => Some(Command::Serve),
            Key::R => Some(Command::Reset),
            Key::Escape | Key::Q => Some(Command::Quit),
            Key::Up | Key::Down | Key::M => None,
        }
    }
}

/// Input collaborator
pub trait Keyboard {
    /// Key-down events since the last call, oldest first
    fn poll_pressed(&mut self) -> Result<Vec<Key>, PlatformError>;

    /// Whether `key` is held right now
    fn is_held(&self, key: Key) -> bool;
}

/// Clock collaborator
pub trait Clock {
    /// Monotonic milliseconds since some fixed start
    fn ticks_ms(&self) -> u64;

    fn sleep_ms(&self, ms: u64);
}

/// Rendering collaborator
pub trait Renderer {
    fn draw(&mut self, frame: &Frame) -> Result<(), PlatformError>;
}
