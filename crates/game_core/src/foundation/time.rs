//! Frame pacing

use std::time::{Duration, Instant};

/// Caps the loop to a fixed frame rate by sleeping out the rest of a frame
///
/// The frame budget is `1000 / fps` whole milliseconds, so 60 FPS gives a
/// 16 ms frame.
#[derive(Debug, Clone)]
pub struct FrameLimiter {
    frame_delay: Duration,
    paced: bool,
    frame_start: Instant,
}

impl FrameLimiter {
    /// Limiter targeting `target_fps` frames per second (0 is treated as 1)
    pub fn new(target_fps: u32) -> Self {
        Self {
            frame_delay: Duration::from_millis(1000 / u64::from(target_fps.max(1))),
            paced: true,
            frame_start: Instant::now(),
        }
    }

    /// Limiter that never sleeps
    pub fn unpaced() -> Self {
        Self {
            frame_delay: Duration::ZERO,
            paced: false,
            frame_start: Instant::now(),
        }
    }

    /// Frame budget
    pub fn frame_delay(&self) -> Duration {
        self.frame_delay
    }

    /// Whether this limiter sleeps at all
    pub fn is_paced(&self) -> bool {
        self.paced
    }

    /// Mark the start of a frame
    pub fn begin_frame(&mut self) {
        self.frame_start = Instant::now();
    }

    /// Time left in the budget after a frame that took `frame_time`
    pub fn remaining(&self, frame_time: Duration) -> Option<Duration> {
        if self.paced && frame_time < self.frame_delay {
            Some(self.frame_delay - frame_time)
        } else {
            None
        }
    }

    /// Sleep out the rest of the current frame, returning the time slept
    pub fn end_frame(&mut self) -> Duration {
        match self.remaining(self.frame_start.elapsed()) {
            Some(wait) => {
                std::thread::sleep(wait);
                wait
            }
            None => Duration::ZERO,
        }
    }
}
