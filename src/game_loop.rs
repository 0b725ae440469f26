//! Frame loop
//!
//! One frame: poll input, step the simulation by the time since the last
//! step, fire sound cues, draw, then sleep off the rest of the frame budget.

use log::{debug, info};

use crate::audio::{AudioManager, AudioSink, SoundCue};
use crate::error::PlatformError;
use crate::platform::{Clock, FpsCounter, FrameLimiter, Key, Keyboard, Renderer};
use crate::renderer::{Diagnostics, build_frame};
use crate::settings::Settings;
use crate::sim::{GameState, HeldKeys, TickInput, elapsed_seconds, tick};

/// Game instance holding all state and its collaborators
pub struct GameLoop<K, C, R, A> {
    state: GameState,
    keyboard: K,
    clock: C,
    renderer: R,
    audio: AudioManager<A>,
    limiter: FrameLimiter,
    fps: FpsCounter,
    show_stats: bool,
    last_step_ms: u64,
}

impl<K, C, R, A> GameLoop<K, C, R, A>
where
    K: Keyboard,
    C: Clock,
    R: Renderer,
    A: AudioSink,
{
    pub fn new(
        seed: u64,
        settings: &Settings,
        keyboard: K,
        clock: C,
        renderer: R,
        sink: A,
    ) -> Self {
        let now = clock.ticks_ms();
        info!("Game initialized with seed: {seed}");
        Self {
            state: GameState::new(seed),
            keyboard,
            clock,
            renderer,
            audio: AudioManager::new(sink, settings),
            limiter: FrameLimiter::new(settings.frame_budget_ms()),
            fps: FpsCounter::new(now),
            show_stats: settings.show_stats,
            last_step_ms: now,
        }
    }

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn renderer(&self) -> &R {
        &self.renderer
    }

    pub fn audio(&self) -> &AudioManager<A> {
        &self.audio
    }

    pub fn frames(&self) -> u64 {
        self.fps.frames()
    }

    /// Run frames until the quit command arrives
    pub fn run(&mut self) -> Result<(), PlatformError> {
        while self.state.running {
            self.run_frame()?;
        }
        info!(
            "Stopped after {} frames ({:.1} fps average)",
            self.fps.frames(),
            self.fps.average(self.clock.ticks_ms())
        );
        Ok(())
    }

    /// Run a single frame
    pub fn run_frame(&mut self) -> Result<(), PlatformError> {
        let frame_start = self.clock.ticks_ms();

        let pressed = self.keyboard.poll_pressed()?;
        if pressed.contains(&Key::M) {
            let muted = !self.audio.is_muted();
            info!("Sound {}", if muted { "muted" } else { "unmuted" });
            self.audio.set_muted(muted);
        }
        let commands = pressed.into_iter().filter_map(Key::command).collect();
        let input = TickInput {
            held: HeldKeys {
                up: self.keyboard.is_held(Key::Up),
                down: self.keyboard.is_held(Key::Down),
            },
            commands,
        };

        let now = self.clock.ticks_ms();
        let dt = elapsed_seconds(self.last_step_ms, now);
        self.last_step_ms = now;

        for event in tick(&mut self.state, &input, dt) {
            debug!("{event:?}");
            if let Some(cue) = SoundCue::for_event(&event) {
                self.audio.play(cue);
            }
        }

        self.fps.frame();
        if self.state.running {
            let diagnostics = self.show_stats.then(|| Diagnostics {
                fps: self.fps.average(now),
            });
            self.renderer.draw(&build_frame(&self.state, diagnostics))?;
            self.limiter.wait(&self.clock, frame_start);
        }

        Ok(())
    }
}
