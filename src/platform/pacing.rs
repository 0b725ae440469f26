//! Frame pacing and FPS tracking

use super::Clock;

/// Caps the loop rate: sleeps off whatever is left of the frame budget
#[derive(Debug, Clone, Copy)]
pub struct FrameLimiter {
    budget_ms: u64,
}

impl FrameLimiter {
    pub fn new(budget_ms: u64) -> Self {
        Self { budget_ms }
    }

    /// Sleep until `frame_start_ms + budget`. Returns the time slept.
    pub fn wait<C: Clock + ?Sized>(&self, clock: &C, frame_start_ms: u64) -> u64 {
        let spent = clock.ticks_ms().saturating_sub(frame_start_ms);
        if spent >= self.budget_ms {
            return 0;
        }
        let remaining = self.budget_ms - spent;
        clock.sleep_ms(remaining);
        remaining
    }
}

/// Average frames per second since the counter started
#[derive(Debug, Clone, Copy)]
pub struct FpsCounter {
    start_ms: u64,
    frames: u64,
}

impl FpsCounter {
    pub fn new(start_ms: u64) -> Self {
        Self {
            start_ms,
            frames: 0,
        }
    }

    pub fn frame(&mut self) {
        self.frames += 1;
    }

    pub fn frames(&self) -> u64 {
        self.frames
    }

    pub fn average(&self, now_ms: u64) -> f64 {
        let elapsed = now_ms.saturating_sub(self.start_ms);
        if elapsed == 0 {
            return 0.0;
        }
        self.frames as f64 / (elapsed as f64 / 1000.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::platform::ManualClock;

    #[test]
    fn test_limiter_sleeps_remainder() {
        let clock = ManualClock::new(1000);
        let limiter = FrameLimiter::new(16);
        clock.advance(5);
        assert_eq!(limiter.wait(&clock, 1000), 11);
        assert_eq!(clock.ticks_ms(), 1016);
    }

    #[test]
    fn test_limiter_skips_slow_frame() {
        let clock = ManualClock::new(0);
        let limiter = FrameLimiter::new(16);
        clock.advance(40);
        assert_eq!(limiter.wait(&clock, 0), 0);
        assert_eq!(clock.slept_ms(), 0);
    }

    #[test]
    fn test_fps_average() {
        let mut fps = FpsCounter::new(500);
        assert_eq!(fps.average(500), 0.0);
        for _ in 0..120 {
            fps.frame();
        }
        assert_eq!(fps.average(2500), 60.0);
    }
}
