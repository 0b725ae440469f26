//! Paddle controllers
//!
//! Every frame each paddle's `dy` is recomputed from scratch: from the held
//! arrow keys for the human, from the ball position for the AI.

use super::state::{Ball, Paddle};

/// Directional keys currently held down
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HeldKeys {
    pub up: bool,
    pub down: bool,
}

impl HeldKeys {
    /// -1 up, 1 down, 0 for neither or both
    pub fn direction(&self) -> i32 {
        self.down as i32 - self.up as i32
    }
}

/// Human rule: velocity straight from the held keys
pub fn drive_from_keys(paddle: &mut Paddle, keys: HeldKeys) {
    paddle.dy = (keys.direction() * paddle.speed) as f64;
}

/// AI rule: chase the ball once its edge has fully passed the paddle's
/// matching edge, at paddle speed minus the fudge handicap. Inside the
/// paddle's span it holds still.
pub fn track_ball(paddle: &mut Paddle, ball: &Ball) {
    let pace = (paddle.speed - paddle.fudge).max(0) as f64;
    let ball = ball.rect();
    let own = paddle.rect();

    paddle.dy = if ball.top() < own.top() {
        -pace
    } else if ball.bottom() > own.bottom() {
        pace
    } else {
        0.0
    };
}
