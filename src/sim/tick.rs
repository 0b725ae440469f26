//! Per-frame simulation step
//!
//! Fixed pipeline: commands, then per substep paddle controllers →
//! collisions → motion → scoring. Each stage gets exclusive access to the
//! state it touches.

use log::{debug, info};

use super::collision::check_collision;
use super::controller::{HeldKeys, drive_from_keys, track_ball};
use super::motion::{move_ball, move_paddle};
use super::state::{GameEvent, GameState, MatchPhase, Side};
use crate::consts::*;

/// Discrete commands from key-down events
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Start a rally from Idle
    Serve,
    /// Abandon the match and return to Idle
    Reset,
    /// Stop running
    Quit,
}

/// Input for a single tick
#[derive(Debug, Clone, Default)]
pub struct TickInput {
    /// Arrow keys held this frame
    pub held: HeldKeys,
    /// Key-down commands since the last frame, in order
    pub commands: Vec<Command>,
}

/// Advance the game by `dt` seconds.
///
/// Commands apply once; physics then runs in equal substeps of at most
/// `SIM_STEP_SECONDS` so a long frame cannot carry the ball through a
/// paddle.
pub fn tick(state: &mut GameState, input: &TickInput, dt: f64) -> Vec<GameEvent> {
    let mut events = Vec::new();

    for &command in &input.commands {
        apply_command(state, command, &mut events);
    }

    let dt = dt.clamp(0.0, MAX_STEP_SECONDS);
    let substeps = ((dt / SIM_STEP_SECONDS).ceil() as u32).max(1);
    let step = dt / substeps as f64;

    if !state.running || state.is_over() {
        return events;
    }

    for _ in 0..substeps {
        step_physics(state, input.held, step, &mut events);
        if state.is_over() {
            break;
        }
    }
    state.ball.time_step = dt;

    events
}

/// One physics substep: controllers, collisions, motion, scoring
fn step_physics(state: &mut GameState, held: HeldKeys, dt: f64, events: &mut Vec<GameEvent>) {
    // Outside a rally the player paddle plays itself
    if state.phase == MatchPhase::Playing {
        drive_from_keys(&mut state.player, held);
    } else {
        track_ball(&mut state.player, &state.ball);
    }
    track_ball(&mut state.robot, &state.ball);

    for paddle in [&mut state.player, &mut state.robot] {
        if let Some(hit) = check_collision(&mut state.ball, paddle, &mut state.rng) {
            debug!(
                "{} paddle hit: segment {:?}, speed {}, fudge {}",
                hit.side.as_str(),
                hit.segment,
                state.ball.speed,
                state.ball.fudge
            );
            events.push(GameEvent::PaddleHit {
                side: hit.side,
                segment: hit.segment,
            });
        }
    }

    move_paddle(&mut state.player, dt);
    move_paddle(&mut state.robot, dt);
    if move_ball(&mut state.ball, dt) {
        events.push(GameEvent::WallHit);
    }

    check_score(state, events);
}

fn apply_command(state: &mut GameState, command: Command, events: &mut Vec<GameEvent>) {
    match command {
        Command::Quit => {
            info!("Quit requested");
            state.running = false;
        }
        Command::Serve if state.phase == MatchPhase::Idle => {
            info!("Rally started");
            state.start_rally();
            events.push(GameEvent::RallyStarted);
        }
        Command::Serve => {}
        Command::Reset => {
            info!("Match reset");
            state.reset_game();
            events.push(GameEvent::MatchReset);
        }
    }
}

/// Award a point once the ball crosses a goal line, then either serve to
/// the side that lost it or end the match. Attract mode only re-serves.
fn check_score(state: &mut GameState, events: &mut Vec<GameEvent>) {
    let scorer = if state.ball.pos.x < 0.0 {
        Side::Player
    } else if state.ball.pos.x > SCREEN_WIDTH {
        Side::Robot
    } else {
        return;
    };

    if state.phase == MatchPhase::Playing {
        let points = state.score.award(scorer);
        events.push(GameEvent::PointScored { by: scorer });
        info!(
            "{} scores: player {} - robot {}",
            scorer.as_str(),
            state.score.player,
            state.score.robot
        );

        if points >= MAX_SCORE {
            info!("{} wins the match", scorer.as_str());
            state.phase = MatchPhase::GameOver;
            state.winner = Some(scorer);
            events.push(GameEvent::MatchOver { winner: scorer });
            return;
        }
    }

    state.ball.service = scorer.opponent();
    state.ball.reset(&mut state.rng);
}
