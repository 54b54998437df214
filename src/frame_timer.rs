use std::time::{Duration, Instant};

/// Wall clock bookkeeping for the render loop.
pub struct FrameTimer {
    start: Instant,
    last_frame: Instant,
    frame_elapsed: Duration,
    frame_count: u32,
}

impl Default for FrameTimer {
    fn default() -> Self {
        let now = Instant::now();

        FrameTimer {
            start: now,
            last_frame: now,
            frame_elapsed: Duration::ZERO,
            frame_count: 0,
        }
    }
}

impl FrameTimer {
    pub fn new() -> Self {
        Self::default()
    }

    /// Time since the timer was created.
    pub fn total_elapsed(&self) -> Duration {
        self.start.elapsed()
    }

    /// Duration of the last completed frame. Zero before the first one.
    pub fn frame_elapsed(&self) -> Duration {
        self.frame_elapsed
    }

    pub fn frame_count(&self) -> u32 {
        self.frame_count
    }

    /// Marks the end of a frame.
    pub fn frame(&mut self) {
        let now = Instant::now();
        self.frame_elapsed = now - self.last_frame;
        self.last_frame = now;
        self.frame_count += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starts_at_zero() {
        let timer = FrameTimer::new();
        assert_eq!(timer.frame_count(), 0);
        assert_eq!(timer.frame_elapsed(), Duration::ZERO);
    }

    #[test]
    fn counts_frames() {
        let mut timer = FrameTimer::new();
        timer.frame();
        timer.frame();
        timer.frame();
        assert_eq!(timer.frame_count(), 3);
    }

    #[test]
    fn frame_time_never_exceeds_total() {
        let mut timer = FrameTimer::new();
        std::thread::sleep(Duration::from_millis(2));
        timer.frame();

        assert!(timer.frame_elapsed() >= Duration::from_millis(2));
        assert!(timer.frame_elapsed() <= timer.total_elapsed());
    }
}
