//! Collision detection and response
//!
//! Ball/paddle contact uses a plain axis-aligned overlap test. On contact
//! the ball turns around and may pick up "English": spin from the paddle
//! edges or extra speed from its center.

use glam::DVec2;
use rand::Rng;

use super::state::{Ball, Paddle, Side, roll_fudge};
use crate::consts::*;

/// Axis-aligned rectangle (y grows downward)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    /// Top-left corner
    pub min: DVec2,
    pub size: DVec2,
}

impl Rect {
    pub fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
        Self {
            min: DVec2::new(x, y),
            size: DVec2::new(w, h),
        }
    }

    pub fn left(&self) -> f64 {
        self.min.x
    }

    pub fn right(&self) -> f64 {
        self.min.x + self.size.x
    }

    pub fn top(&self) -> f64 {
        self.min.y
    }

    pub fn bottom(&self) -> f64 {
        self.min.y + self.size.y
    }

    /// Inclusive four-inequality overlap test; touching edges count
    pub fn overlaps(&self, other: &Rect) -> bool {
        self.right() >= other.left()
            && self.left() <= other.right()
            && self.bottom() >= other.top()
            && self.top() <= other.bottom()
    }
}

/// Effect of the paddle segment the ball struck
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum English {
    /// Added to the ball's `dy`
    Spin(i32),
    /// Speed gain, clamped to BALL_MAX_SPEED
    Boost,
}

impl English {
    pub fn for_segment(segment: u8) -> English {
        match segment {
            1 => English::Spin(-2),
            2 => English::Spin(-1),
            4 => English::Spin(1),
            5 => English::Spin(2),
            _ => English::Boost,
        }
    }
}

/// Result of a ball/paddle contact
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaddleHit {
    pub side: Side,
    /// Segment that applied English, `None` when English was skipped
    pub segment: Option<u8>,
}

/// Which of the paddle's vertical segments (1..=5, top to bottom) the
/// ball's top edge falls in. Boundaries are inclusive and the first match
/// wins, so a ball exactly on a boundary belongs to the upper segment.
/// Ball tops above the paddle count as segment 1, below as segment 5.
pub fn paddle_segment(ball_top: f64, paddle: &Paddle) -> u8 {
    let segment_h = paddle.h / PADDLE_SEGMENTS as f64;
    let rel = ball_top - paddle.y;

    (1..PADDLE_SEGMENTS)
        .find(|&segment| rel <= segment_h * segment as f64)
        .unwrap_or(PADDLE_SEGMENTS)
}

/// Apply English for the segment the ball struck. Changes either `dy` or
/// `speed`, never both. Returns the segment.
pub fn apply_english(ball: &mut Ball, paddle: &Paddle) -> u8 {
    let segment = paddle_segment(ball.pos.y, paddle);
    match English::for_segment(segment) {
        English::Spin(delta) => ball.dy += delta,
        English::Boost => ball.set_speed(ball.speed + ENGLISH_SPEED_BOOST),
    }
    ball.paddle_segment = segment;
    segment
}

/// Resolve a ball/paddle contact.
///
/// On overlap the ball's horizontal direction flips, fudge is re-rolled
/// (and copied to the paddle), and five times out of six English is
/// applied. The ball is then placed just clear of the face it now heads
/// away from so the same contact cannot flip it back next frame. A ball
/// the paddle closed on after it slipped past the face is still put back
/// in front: once touched, the ball is returned into play.
pub fn check_collision<R: Rng + ?Sized>(
    ball: &mut Ball,
    paddle: &mut Paddle,
    rng: &mut R,
) -> Option<PaddleHit> {
    if !ball.rect().overlaps(&paddle.rect()) {
        return None;
    }

    ball.dx = -ball.dx;
    ball.fudge = roll_fudge(rng);
    paddle.fudge = ball.fudge;

    let segment = rng
        .random_ratio(5, 6)
        .then(|| apply_english(ball, paddle));

    if ball.dx < 0 {
        ball.pos.x = paddle.x - ball.size - 1.0;
    } else {
        ball.pos.x = paddle.x + paddle.w + 1.0;
    }

    Some(PaddleHit {
        side: paddle.owner,
        segment,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use rand::SeedableRng;
    use rand_pcg::Pcg32;

    fn ball_at(x: f64, y: f64, dx: i32, dy: i32) -> Ball {
        Ball {
            pos: DVec2::new(x, y),
            dx,
            dy,
            ..Default::default()
        }
    }

    #[test]
    fn test_rect_overlap_touching_edges() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        assert!(a.overlaps(&Rect::new(10.0, 10.0, 5.0, 5.0)));
        assert!(!a.overlaps(&Rect::new(10.5, 0.0, 5.0, 5.0)));
        assert!(!a.overlaps(&Rect::new(0.0, -6.0, 5.0, 5.0)));
    }

    #[test]
    fn test_segment_one_spins_up() {
        let paddle = Paddle::new(Side::Player);
        let mut ball = ball_at(paddle.x - 5.0, paddle.y + 1.0, 3, 1);

        let segment = apply_english(&mut ball, &paddle);
        assert_eq!(segment, 1);
        assert_eq!(ball.paddle_segment, 1);
        assert_eq!(ball.dy, -1);
        assert_eq!(ball.speed, BALL_MIN_SPEED);
    }

    #[test]
    fn test_segment_boundaries_favor_upper() {
        let paddle = Paddle::new(Side::Robot);
        let top = paddle.y;
        assert_eq!(paddle_segment(top - 8.0, &paddle), 1);
        assert_eq!(paddle_segment(top + 12.0, &paddle), 1);
        assert_eq!(paddle_segment(top + 12.5, &paddle), 2);
        assert_eq!(paddle_segment(top + 30.0, &paddle), 3);
        assert_eq!(paddle_segment(top + 48.0, &paddle), 4);
        assert_eq!(paddle_segment(top + 55.0, &paddle), 5);
        assert_eq!(paddle_segment(top + 60.0, &paddle), 5);
    }

    #[test]
    fn test_center_hit_boosts_speed_to_cap() {
        let paddle = Paddle::new(Side::Player);
        let mut ball = ball_at(paddle.x, paddle.y + 30.0, 3, 2);
        ball.speed = BALL_MAX_SPEED - 4;

        assert_eq!(apply_english(&mut ball, &paddle), 3);
        assert_eq!(ball.speed, BALL_MAX_SPEED);
        assert_eq!(ball.dy, 2);
    }

    #[test]
    fn test_miss_leaves_ball_untouched() {
        let mut paddle = Paddle::new(Side::Player);
        let mut ball = ball_at(SCREEN_MID_W, SCREEN_MID_H, 3, 1);
        let before = ball.clone();
        let mut rng = Pcg32::seed_from_u64(1);

        assert!(check_collision(&mut ball, &mut paddle, &mut rng).is_none());
        assert_eq!(ball, before);
    }

    #[test]
    fn test_hit_snaps_ball_off_face() {
        let mut paddle = Paddle::new(Side::Player);
        let mut ball = ball_at(paddle.x - 4.0, paddle.y + 20.0, 3, 1);
        let mut rng = Pcg32::seed_from_u64(2);

        let hit = check_collision(&mut ball, &mut paddle, &mut rng).unwrap();
        assert_eq!(hit.side, Side::Player);
        assert!(ball.dx < 0);
        assert_eq!(ball.pos.x, paddle.x - ball.size - 1.0);
        assert_eq!(paddle.fudge, ball.fudge);

        // Same contact on the next frame must not turn it back
        assert!(check_collision(&mut ball, &mut paddle, &mut rng).is_none());
        assert!(ball.dx < 0);
    }

    #[test]
    fn test_ball_behind_face_is_returned_in_front() {
        let mut paddle = Paddle::new(Side::Player);
        // Left edge already past the face, still heading for the goal
        let mut ball = ball_at(paddle.x + 6.0, paddle.y + 25.0, 2, 1);
        let mut rng = Pcg32::seed_from_u64(5);

        assert!(check_collision(&mut ball, &mut paddle, &mut rng).is_some());
        assert_eq!(ball.dx, -2);
        assert_eq!(ball.pos.x, paddle.x - ball.size - 1.0);
        assert!(!ball.rect().overlaps(&paddle.rect()));
    }

    #[test]
    fn test_english_skipped_sometimes() {
        let mut rng = Pcg32::seed_from_u64(42);
        let mut skipped = 0;
        let mut applied = 0;
        for _ in 0..600 {
            let mut paddle = Paddle::new(Side::Robot);
            let mut ball = ball_at(paddle.x + 5.0, paddle.y + 1.0, -3, 1);
            let hit = check_collision(&mut ball, &mut paddle, &mut rng).unwrap();
            match hit.segment {
                Some(_) => {
                    applied += 1;
                    assert_eq!(ball.dy, -1);
                }
                None => {
                    skipped += 1;
                    assert_eq!(ball.dy, 1);
                    assert_eq!(ball.paddle_segment, 0);
                }
            }
        }
        assert!(skipped > 0);
        assert!(applied > skipped);
    }

    proptest! {
        #[test]
        fn prop_overlap_flips_dx_once(
            offset_x in -9.0f64..10.0,
            offset_y in -9.0f64..60.0,
            dx in prop_oneof![-3i32..=-1, 1i32..=3],
            dy in -4i32..=4,
            speed in BALL_MIN_SPEED..=BALL_MAX_SPEED,
            seed in any::<u64>(),
        ) {
            let mut paddle = Paddle::new(Side::Player);
            let mut ball = ball_at(paddle.x + offset_x, paddle.y + offset_y, dx, dy);
            ball.speed = speed;
            let mut rng = Pcg32::seed_from_u64(seed);

            let hit = check_collision(&mut ball, &mut paddle, &mut rng);
            prop_assert!(hit.is_some());
            prop_assert_eq!(ball.dx, -dx);
            prop_assert!((0..=MAX_FUDGE).contains(&ball.fudge));

            // English touches dy or speed, never both
            let dy_changed = ball.dy != dy;
            let speed_changed = ball.speed != speed;
            prop_assert!(!(dy_changed && speed_changed));
            prop_assert!(ball.speed <= BALL_MAX_SPEED);
        }
    }
}
