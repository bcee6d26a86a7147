use std::time::{Duration, Instant};

/// Largest delta handed to the simulation, in seconds.
pub const MAX_FRAME_DELTA: f32 = 0.1;

/// Timing for one frame.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameTime {
    /// Seconds since the clock started.
    pub elapsed: f32,
    /// Seconds since the previous frame, clamped to [`MAX_FRAME_DELTA`].
    pub delta: f32,
    /// Seconds since the previous frame as measured. For frame statistics.
    pub raw_delta: f32,
}

/// Wall clock for the render loop.
#[derive(Debug, Clone)]
pub struct FrameClock {
    start: Instant,
    last_frame: Instant,
}

impl Default for FrameClock {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameClock {
    pub fn new() -> Self {
        Self::starting_at(Instant::now())
    }

    pub fn starting_at(start: Instant) -> Self {
        Self {
            start,
            last_frame: start,
        }
    }

    /// Advance to `now` and return the frame timing.
    pub fn tick_at(&mut self, now: Instant) -> FrameTime {
        let raw_delta = now.saturating_duration_since(self.last_frame).as_secs_f32();
        self.last_frame = now.max(self.last_frame);
        FrameTime {
            elapsed: self.last_frame.duration_since(self.start).as_secs_f32(),
            delta: raw_delta.min(MAX_FRAME_DELTA),
            raw_delta,
        }
    }

    pub fn tick(&mut self) -> FrameTime {
        self.tick_at(Instant::now())
    }

    pub fn elapsed(&self) -> Duration {
        self.last_frame.duration_since(self.start)
    }
}
