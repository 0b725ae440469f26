//! Game state and entity records
//!
//! Ball, paddles and score are created once and mutated in place every
//! frame. Resets reassign fields to their defaults (some randomized).

use glam::DVec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use super::collision::Rect;
use crate::consts::*;

/// Which half of the court a paddle defends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Side {
    /// Human-controlled, right side
    Player,
    /// AI-controlled, left side
    Robot,
}

impl Side {
    pub fn opponent(self) -> Side {
        match self {
            Side::Player => Side::Robot,
            Side::Robot => Side::Player,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Side::Player => "Player",
            Side::Robot => "Robot",
        }
    }

    /// Fixed x of this side's paddle
    pub fn paddle_x(self) -> f64 {
        match self {
            Side::Player => PLAYER_X,
            Side::Robot => ROBOT_X,
        }
    }

    /// Where the ball is placed when this side serves
    pub fn service_x(self) -> f64 {
        match self {
            Side::Player => PLAYER_SERVICE_X,
            Side::Robot => ROBOT_SERVICE_X,
        }
    }

    /// Horizontal heading of a ball served from this side
    pub fn serve_heading(self) -> i32 {
        match self {
            Side::Player => -1,
            Side::Robot => 1,
        }
    }
}

/// Current phase of the match
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchPhase {
    /// Attract mode: both paddles AI-driven, instructions shown
    Idle,
    /// Rally in progress, player paddle follows the keyboard
    Playing,
    /// A side reached MAX_SCORE; frozen until reset
    GameOver,
}

/// Things that happened during a tick, consumed by audio and logging
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameEvent {
    /// Ball struck a paddle; `segment` is set when English was applied
    PaddleHit { side: Side, segment: Option<u8> },
    /// Ball bounced off the top or bottom edge
    WallHit,
    /// Ball crossed a goal line during a rally
    PointScored { by: Side },
    /// Match decided
    MatchOver { winner: Side },
    /// Serve key pressed from Idle
    RallyStarted,
    /// Reset key pressed
    MatchReset,
}

/// Roll a fresh fudge value in `[0, MAX_FUDGE]`
pub fn roll_fudge<R: Rng + ?Sized>(rng: &mut R) -> i32 {
    rng.random_range(0..=MAX_FUDGE)
}

/// The ball
#[derive(Debug, Clone, PartialEq)]
pub struct Ball {
    /// Top-left corner
    pub pos: DVec2,
    /// Horizontal direction; the sign says which way
    pub dx: i32,
    /// Vertical direction; the sign says which way
    pub dy: i32,
    /// Always within `[BALL_MIN_SPEED, BALL_MAX_SPEED]`
    pub speed: i32,
    pub size: f64,
    /// AI handicap, re-rolled on each paddle hit
    pub fudge: i32,
    /// Last paddle segment struck with English (1..=5), 0 before any.
    /// Display only.
    pub paddle_segment: u8,
    /// Side serving next
    pub service: Side,
    /// Seconds covered by the last tick
    pub time_step: f64,
}

impl Default for Ball {
    fn default() -> Self {
        Self {
            pos: DVec2::new(SCREEN_MID_W - BALL_SIZE / 2.0, SCREEN_MID_H - BALL_SIZE / 2.0),
            dx: 0,
            dy: 0,
            speed: BALL_MIN_SPEED,
            size: BALL_SIZE,
            fudge: 0,
            paddle_segment: 0,
            service: Side::Player,
            time_step: 0.0,
        }
    }
}

impl Ball {
    pub fn rect(&self) -> Rect {
        Rect::new(self.pos.x, self.pos.y, self.size, self.size)
    }

    /// Set speed, clamped to the legal range
    pub fn set_speed(&mut self, speed: i32) {
        self.speed = speed.clamp(BALL_MIN_SPEED, BALL_MAX_SPEED);
    }

    /// Serve from `self.service`: reposition next to the server with a
    /// fresh trajectory. Speed carries over but never below the minimum.
    pub fn reset<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        let y = rng.random_range(COURT_OFFSIDE..=COURT_HEIGHT - self.size);
        self.pos = DVec2::new(self.service.service_x(), y);
        self.dx = self.service.serve_heading() * rng.random_range(2..=3);

        // A flat serve would rally forever
        self.dy = 0;
        while self.dy == 0 {
            self.dy = rng.random_range(-2..=2);
        }

        self.fudge = roll_fudge(rng);
        self.set_speed(self.speed);
        self.paddle_segment = 0;
        self.time_step = 0.0;
    }
}

/// A paddle
#[derive(Debug, Clone, PartialEq)]
pub struct Paddle {
    pub owner: Side,
    pub x: f64,
    /// Top edge
    pub y: f64,
    /// Velocity, recomputed every frame by the controller
    pub dy: f64,
    pub speed: i32,
    pub w: f64,
    pub h: f64,
    /// Ball fudge copied at the last collision
    pub fudge: i32,
}

impl Paddle {
    pub fn new(owner: Side) -> Self {
        let mut paddle = Self {
            owner,
            x: 0.0,
            y: 0.0,
            dy: 0.0,
            speed: 0,
            w: 0.0,
            h: 0.0,
            fudge: 0,
        };
        paddle.reset();
        paddle
    }

    /// Back to the owner's starting spot, centred vertically
    pub fn reset(&mut self) {
        self.x = self.owner.paddle_x();
        self.y = PADDLE_Y;
        self.dy = 0.0;
        self.speed = PADDLE_SPEED;
        self.w = PADDLE_W;
        self.h = PADDLE_H;
        self.fudge = 0;
    }

    pub fn rect(&self) -> Rect {
        Rect::new(self.x, self.y, self.w, self.h)
    }
}

/// Points per side
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScoreBoard {
    pub player: u32,
    pub robot: u32,
}

impl ScoreBoard {
    pub fn get(&self, side: Side) -> u32 {
        match side {
            Side::Player => self.player,
            Side::Robot => self.robot,
        }
    }

    /// Add a point and return the new total for that side
    pub fn award(&mut self, side: Side) -> u32 {
        let points = match side {
            Side::Player => &mut self.player,
            Side::Robot => &mut self.robot,
        };
        *points = (*points + 1).min(MAX_SCORE);
        *points
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }
}

/// Complete game state, owned by the game loop
#[derive(Debug, Clone)]
pub struct GameState {
    /// Seed the RNG started from
    pub seed: u64,
    pub score: ScoreBoard,
    /// Last match winner; kept after reset so Idle can announce it
    pub winner: Option<Side>,
    pub player: Paddle,
    pub robot: Paddle,
    pub ball: Ball,
    pub phase: MatchPhase,
    /// Cleared by the quit key
    pub running: bool,
    pub(crate) rng: Pcg32,
}

impl GameState {
    /// Create a new game in attract mode
    pub fn new(seed: u64) -> Self {
        let mut state = Self {
            seed,
            score: ScoreBoard::default(),
            winner: None,
            player: Paddle::new(Side::Player),
            robot: Paddle::new(Side::Robot),
            ball: Ball::default(),
            phase: MatchPhase::Idle,
            running: true,
            rng: Pcg32::seed_from_u64(seed),
        };
        state.reset_game();
        state
    }

    pub fn is_idle(&self) -> bool {
        self.phase == MatchPhase::Idle
    }

    pub fn is_over(&self) -> bool {
        self.phase == MatchPhase::GameOver
    }

    /// Zero scores, reset entities and drop back to Idle. The winner
    /// survives so the instructions can name it.
    pub fn reset_game(&mut self) {
        self.score.reset();
        self.player.reset();
        self.robot.reset();
        self.reset_ball_for(Side::Player);
        self.phase = MatchPhase::Idle;
    }

    /// Leave Idle and serve the first ball of a match
    pub fn start_rally(&mut self) {
        self.score.reset();
        self.player.reset();
        self.robot.reset();
        self.reset_ball_for(Side::Player);
        self.winner = None;
        self.phase = MatchPhase::Playing;
    }

    fn reset_ball_for(&mut self, server: Side) {
        self.ball.speed = BALL_MIN_SPEED;
        self.ball.service = server;
        self.ball.reset(&mut self.rng);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_paddle_reset_idempotent() {
        let mut paddle = Paddle::new(Side::Robot);
        paddle.y = 333.0;
        paddle.dy = -12.0;
        paddle.fudge = 9;

        paddle.reset();
        let first = paddle.clone();
        paddle.reset();
        assert_eq!(paddle, first);
        assert_eq!(paddle.x, ROBOT_X);
        assert_eq!(paddle.y, PADDLE_Y);
    }

    #[test]
    fn test_reset_ball_never_flat() {
        let mut rng = Pcg32::seed_from_u64(7);
        let mut ball = Ball::default();
        for i in 0..10_000 {
            ball.service = if i % 2 == 0 { Side::Player } else { Side::Robot };
            ball.reset(&mut rng);
            assert_ne!(ball.dy, 0);
            assert!((0..=MAX_FUDGE).contains(&ball.fudge));
        }
    }

    #[test]
    fn test_reset_ball_heads_away_from_server() {
        let mut rng = Pcg32::seed_from_u64(3);
        let mut ball = Ball::default();

        ball.service = Side::Player;
        ball.reset(&mut rng);
        assert!(ball.dx < 0);
        assert_eq!(ball.pos.x, PLAYER_SERVICE_X);

        ball.service = Side::Robot;
        ball.reset(&mut rng);
        assert!(ball.dx > 0);
        assert_eq!(ball.pos.x, ROBOT_SERVICE_X);
    }

    #[test]
    fn test_reset_ball_restores_min_speed() {
        let mut rng = Pcg32::seed_from_u64(11);
        let mut ball = Ball {
            speed: 12,
            ..Default::default()
        };
        ball.reset(&mut rng);
        assert_eq!(ball.speed, BALL_MIN_SPEED);

        ball.speed = 100;
        ball.reset(&mut rng);
        assert_eq!(ball.speed, 100);
    }

    #[test]
    fn test_score_capped() {
        let mut score = ScoreBoard {
            player: MAX_SCORE,
            robot: 0,
        };
        assert_eq!(score.award(Side::Player), MAX_SCORE);
        assert_eq!(score.award(Side::Robot), 1);
    }

    #[test]
    fn test_reset_game_keeps_winner() {
        let mut state = GameState::new(5);
        state.winner = Some(Side::Robot);
        state.score.robot = MAX_SCORE;
        state.phase = MatchPhase::GameOver;

        state.reset_game();
        assert!(state.is_idle());
        assert_eq!(state.score, ScoreBoard::default());
        assert_eq!(state.winner, Some(Side::Robot));

        state.start_rally();
        assert_eq!(state.phase, MatchPhase::Playing);
        assert_eq!(state.winner, None);
    }
}
