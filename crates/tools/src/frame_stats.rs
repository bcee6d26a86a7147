use std::collections::VecDeque;

/// Number of frames averaged by [`FrameStats`].
pub const FRAME_WINDOW: usize = 120;

/// Rolling frame-time average over the last [`FRAME_WINDOW`] frames.
#[derive(Debug, Clone, Default)]
pub struct FrameStats {
    deltas: VecDeque<f32>,
    sum: f32,
}

impl FrameStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one frame's duration in seconds. Non-positive values are
    /// ignored.
    pub fn record(&mut self, delta_secs: f32) {
        if delta_secs.is_nan() || delta_secs <= 0.0 {
            return;
        }
        if self.deltas.len() == FRAME_WINDOW {
            if let Some(old) = self.deltas.pop_front() {
                self.sum -= old;
            }
        }
        self.deltas.push_back(delta_secs);
        self.sum += delta_secs;
    }

    pub fn frames(&self) -> usize {
        self.deltas.len()
    }

    pub fn summary(&self) -> FrameSummary {
        if self.deltas.is_empty() {
            return FrameSummary {
                frame_ms: 0.0,
                fps: 0.0,
            };
        }
        let avg = self.sum / self.deltas.len() as f32;
        FrameSummary {
            frame_ms: avg * 1000.0,
            fps: 1.0 / avg,
        }
    }
}

/// Averaged frame time and rate.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSummary {
    pub frame_ms: f32,
    pub fps: f32,
}

impl std::fmt::Display for FrameSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Application average {:.3} ms/frame ({:.1} FPS)",
            self.frame_ms, self.fps
        )
    }
}
