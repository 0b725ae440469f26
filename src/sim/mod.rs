//! Deterministic simulation module
//!
//! All gameplay logic lives here. This module must be pure and deterministic:
//! - Elapsed time is passed in, never read from a clock
//! - Seeded RNG only
//! - No rendering, audio or platform dependencies

pub mod collision;
pub mod controller;
pub mod motion;
pub mod state;
pub mod tick;

pub use collision::{English, PaddleHit, Rect, apply_english, check_collision, paddle_segment};
pub use controller::{HeldKeys, drive_from_keys, track_ball};
pub use motion::{elapsed_seconds, move_ball, move_paddle};
pub use state::{Ball, GameEvent, GameState, MatchPhase, Paddle, ScoreBoard, Side, roll_fudge};
pub use tick::{Command, TickInput, tick};
