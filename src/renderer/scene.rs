//! Builds the draw list for a game state: court, paddles, ball, score,
//! instructions and the optional diagnostics overlay.

use super::frame::{Frame, RectKind, TextAlign};
use crate::consts::*;
use crate::sim::{GameState, MatchPhase, Rect};

const NET_DASH: f64 = 10.0;
const NET_GAP: f64 = 10.0;
const LINE_W: f64 = 2.0;

/// Values shown by the stats overlay that the state doesn't hold
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Diagnostics {
    /// Average frames per second since start
    pub fps: f64,
}

/// Build the frame for `state`. `diagnostics` turns the stats overlay on.
pub fn build_frame(state: &GameState, diagnostics: Option<Diagnostics>) -> Frame {
    let mut frame = Frame::default();

    draw_court(&mut frame);
    frame.rect(state.robot.rect(), RectKind::Paddle);
    frame.rect(state.player.rect(), RectKind::Paddle);
    if !state.is_over() {
        frame.rect(state.ball.rect(), RectKind::Ball);
    }
    draw_score(&mut frame, state);
    draw_instructions(&mut frame, state);
    if let Some(diagnostics) = diagnostics {
        draw_stats(&mut frame, state, diagnostics);
    }

    frame
}

fn draw_court(frame: &mut Frame) {
    frame.rect(
        Rect::new(0.0, COURT_OFFSIDE - LINE_W, SCREEN_WIDTH, LINE_W),
        RectKind::Boundary,
    );
    frame.rect(
        Rect::new(0.0, COURT_HEIGHT, SCREEN_WIDTH, LINE_W),
        RectKind::Boundary,
    );

    let mut y = COURT_OFFSIDE;
    while y + NET_DASH <= COURT_HEIGHT {
        frame.rect(
            Rect::new(SCREEN_MID_W - LINE_W / 2.0, y, LINE_W, NET_DASH),
            RectKind::Net,
        );
        y += NET_DASH + NET_GAP;
    }
}

fn draw_score(frame: &mut Frame, state: &GameState) {
    let y = COURT_OFFSIDE + 10.0;
    frame.text(
        SCREEN_MID_W / 2.0,
        y,
        state.score.robot.to_string(),
        TextAlign::Center,
    );
    frame.text(
        SCREEN_MID_W * 1.5,
        y,
        state.score.player.to_string(),
        TextAlign::Center,
    );
}

fn draw_instructions(frame: &mut Frame, state: &GameState) {
    let x = SCREEN_MID_W;
    let y = SCREEN_MID_H - 40.0;
    match state.phase {
        MatchPhase::Idle => {
            frame.text(x, y, "P O N G", TextAlign::Center);
            frame.text(
                x,
                y + 30.0,
                format!("First to {MAX_SCORE} wins"),
                TextAlign::Center,
            );
            frame.text(
                x,
                y + 60.0,
                "SPACE serve  UP/DOWN move  R reset  M mute  ESC/Q quit",
                TextAlign::Center,
            );
            if let Some(winner) = state.winner {
                frame.text(
                    x,
                    y + 90.0,
                    format!("Last match: {} won", winner.as_str()),
                    TextAlign::Center,
                );
            }
        }
        MatchPhase::GameOver => {
            let winner = state.winner.map(|w| w.as_str()).unwrap_or("Nobody");
            frame.text(
                x,
                y,
                format!("{} WINS!", winner.to_uppercase()),
                TextAlign::Center,
            );
            frame.text(x, y + 30.0, "Press R to play again", TextAlign::Center);
        }
        MatchPhase::Playing => {}
    }
}

fn draw_stats(frame: &mut Frame, state: &GameState, diagnostics: Diagnostics) {
    let ball = &state.ball;
    let lines = [
        format!("fps {:.1}", diagnostics.fps),
        format!("speed {} dx {} dy {}", ball.speed, ball.dx, ball.dy),
        format!("fudge {} segment {}", ball.fudge, ball.paddle_segment),
        format!("step {:.3}s", ball.time_step),
    ];
    let mut y = COURT_HEIGHT - 20.0 * lines.len() as f64;
    for line in lines {
        frame.text(GOAL_OFFSET + PADDLE_W + 20.0, y, line, TextAlign::Left);
        y += 20.0;
    }
}
