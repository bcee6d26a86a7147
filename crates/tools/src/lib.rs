//! Developer tooling: frame timing shown in the GUI overlay.
//!
//! # Invariants
//! - Statistics are read-only views over recorded frame times.

mod frame_stats;

pub use frame_stats::{FRAME_WINDOW, FrameStats, FrameSummary};

pub fn crate_info() -> &'static str {
    "retrowave-tools v0.1.0"
}
