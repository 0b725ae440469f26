//! Motion integration
//!
//! Displacement is `direction * speed * elapsed_seconds`, so movement is
//! independent of frame rate.

use super::state::{Ball, Paddle};
use crate::consts::*;

/// Seconds between two reads of a millisecond clock, clamped to
/// `MAX_STEP_SECONDS`. Equal reads give exactly zero.
pub fn elapsed_seconds(prev_ms: u64, now_ms: u64) -> f64 {
    (now_ms.saturating_sub(prev_ms) as f64 / 1000.0).min(MAX_STEP_SECONDS)
}

/// Advance a paddle and keep it inside the court. The boundary strips at
/// top and bottom stay out of reach, so a ball hugging the edge can slip
/// past.
pub fn move_paddle(paddle: &mut Paddle, dt: f64) {
    let y = paddle.y + paddle.dy * paddle.speed as f64 * dt;
    paddle.y = y.clamp(COURT_OFFSIDE, COURT_HEIGHT - paddle.h);
}

/// Advance the ball. Returns true if it bounced off the top or bottom
/// edge this step.
pub fn move_ball(ball: &mut Ball, dt: f64) -> bool {
    ball.time_step = dt;
    let step = ball.speed as f64 * dt;
    ball.pos.x += ball.dx as f64 * step;
    ball.pos.y += ball.dy as f64 * step;

    if ball.pos.y < 0.0 && ball.dy < 0 {
        ball.pos.y = 0.0;
        ball.dy = -ball.dy;
        return true;
    }

    let floor = SCREEN_HEIGHT - ball.size;
    if ball.pos.y > floor && ball.dy > 0 {
        ball.pos.y = floor;
        ball.dy = -ball.dy;
        return true;
    }

    false
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sim::state::Side;
    use glam::DVec2;
    use proptest::prelude::*;

    #[test]
    fn test_elapsed_seconds() {
        assert_eq!(elapsed_seconds(1000, 1000), 0.0);
        assert_eq!(elapsed_seconds(1000, 1016), 0.016);
        // Clock never runs backwards, but don't go negative if it does
        assert_eq!(elapsed_seconds(1016, 1000), 0.0);
        assert_eq!(elapsed_seconds(0, 5000), MAX_STEP_SECONDS);
    }

    #[test]
    fn test_zero_step_moves_nothing() {
        let mut ball = Ball {
            pos: DVec2::new(100.0, 200.0),
            dx: 3,
            dy: -2,
            speed: BALL_MAX_SPEED,
            ..Default::default()
        };
        let mut paddle = Paddle::new(Side::Player);
        paddle.dy = -(PADDLE_SPEED as f64);

        let dt = elapsed_seconds(4242, 4242);
        assert!(!move_ball(&mut ball, dt));
        move_paddle(&mut paddle, dt);

        assert_eq!(ball.pos, DVec2::new(100.0, 200.0));
        assert!(!ball.pos.is_nan());
        assert_eq!(paddle.y, PADDLE_Y);
    }

    #[test]
    fn test_ball_moves_by_speed_and_step() {
        let mut ball = Ball {
            pos: DVec2::new(100.0, 200.0),
            dx: 2,
            dy: 1,
            speed: 100,
            ..Default::default()
        };
        move_ball(&mut ball, 0.5);
        assert_eq!(ball.pos, DVec2::new(200.0, 250.0));
        assert_eq!(ball.time_step, 0.5);
    }

    #[test]
    fn test_ball_bounces_off_top() {
        let mut ball = Ball {
            pos: DVec2::new(300.0, 1.0),
            dx: 2,
            dy: -2,
            speed: 100,
            ..Default::default()
        };
        assert!(move_ball(&mut ball, 0.1));
        assert_eq!(ball.dy, 2);
        assert_eq!(ball.pos.y, 0.0);

        // Moving back in, no second bounce
        assert!(!move_ball(&mut ball, 0.0));
    }

    #[test]
    fn test_ball_bounces_off_bottom() {
        let mut ball = Ball {
            pos: DVec2::new(300.0, SCREEN_HEIGHT - BALL_SIZE - 1.0),
            dx: -2,
            dy: 1,
            speed: 100,
            ..Default::default()
        };
        assert!(move_ball(&mut ball, 0.1));
        assert_eq!(ball.dy, -1);
        assert_eq!(ball.pos.y, SCREEN_HEIGHT - BALL_SIZE);
    }

    #[test]
    fn test_paddle_stops_at_boundary_strip() {
        let mut paddle = Paddle::new(Side::Robot);
        paddle.dy = -(PADDLE_SPEED as f64);
        move_paddle(&mut paddle, MAX_STEP_SECONDS * 100.0);
        assert_eq!(paddle.y, COURT_OFFSIDE);

        paddle.dy = PADDLE_SPEED as f64;
        move_paddle(&mut paddle, MAX_STEP_SECONDS * 100.0);
        assert_eq!(paddle.y, COURT_HEIGHT - PADDLE_H);
    }

    proptest! {
        #[test]
        fn prop_paddle_stays_in_court(
            start in COURT_OFFSIDE..=(COURT_HEIGHT - PADDLE_H),
            dy in -1000.0f64..1000.0,
            dt in 0.0f64..10.0,
        ) {
            let mut paddle = Paddle::new(Side::Player);
            paddle.y = start;
            paddle.dy = dy;
            move_paddle(&mut paddle, dt);
            prop_assert!(paddle.y >= COURT_OFFSIDE);
            prop_assert!(paddle.y <= COURT_HEIGHT - paddle.h);
        }
    }
}
