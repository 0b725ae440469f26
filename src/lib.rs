//! Paddle Pong - classic two-paddle Pong
//!
//! Core modules:
//! - `sim`: Deterministic simulation (paddles, ball, collisions, match state)
//! - `renderer`: Draw-list construction handed to the rendering collaborator
//! - `platform`: Keyboard, clock, renderer and audio collaborators
//! - `audio`: Sound cues and the volume/mute gate
//! - `game_loop`: One frame = input, tick, audio, draw, frame cap

pub mod audio;
pub mod error;
pub mod game_loop;
pub mod platform;
pub mod renderer;
pub mod settings;
pub mod sim;

pub use error::{Error, InitError, PlatformError, SettingsError};
pub use game_loop::GameLoop;
pub use settings::Settings;

/// Game configuration constants
pub mod consts {
    /// Court dimensions
    pub const SCREEN_WIDTH: f64 = 640.0;
    pub const SCREEN_HEIGHT: f64 = 480.0;
    pub const SCREEN_MID_W: f64 = SCREEN_WIDTH / 2.0;
    pub const SCREEN_MID_H: f64 = SCREEN_HEIGHT / 2.0;
    /// Boundary strip at top and bottom that paddles cannot enter
    pub const COURT_OFFSIDE: f64 = 20.0;
    pub const COURT_HEIGHT: f64 = SCREEN_HEIGHT - COURT_OFFSIDE;

    /// Frame cap
    pub const SCREEN_FPS: u32 = 60;
    pub const TICKS_PER_FRAME: u64 = 1000 / SCREEN_FPS as u64;
    /// Longest elapsed step fed to the integrator (stalls, window drags)
    pub const MAX_STEP_SECONDS: f64 = 0.1;
    /// Longest physics substep. The ball covers at most 3 px per
    /// substep, well inside the 21 px paddle overlap window.
    pub const SIM_STEP_SECONDS: f64 = 1.0 / 120.0;

    /// Ball defaults
    pub const BALL_SIZE: f64 = 10.0;
    pub const BALL_MIN_SPEED: i32 = 70;
    pub const BALL_MAX_SPEED: i32 = 120;
    /// Speed gained from a center-segment hit
    pub const ENGLISH_SPEED_BOOST: i32 = 10;
    /// Upper bound (inclusive) of the fudge roll
    pub const MAX_FUDGE: i32 = 14;

    /// Paddle defaults
    pub const PADDLE_W: f64 = 10.0;
    pub const PADDLE_H: f64 = 60.0;
    pub const PADDLE_SPEED: i32 = 20;
    pub const PADDLE_Y: f64 = SCREEN_MID_H - PADDLE_H / 2.0;
    pub const PADDLE_SEGMENTS: u8 = 5;

    /// Goal-line geometry
    pub const GOAL_OFFSET: f64 = 15.0;
    pub const PLAYER_X: f64 = SCREEN_WIDTH - PADDLE_W - GOAL_OFFSET;
    pub const ROBOT_X: f64 = GOAL_OFFSET;
    pub const PLAYER_SERVICE_X: f64 = (SCREEN_WIDTH - GOAL_OFFSET - PADDLE_W - BALL_SIZE) - 1.0;
    pub const ROBOT_SERVICE_X: f64 = (PADDLE_W + GOAL_OFFSET) + 1.0;

    /// Points needed to win the match
    pub const MAX_SCORE: u32 = 20;
}
