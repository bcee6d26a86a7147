//! Rendering adapter: a renderer-agnostic frame plan.
//!
//! Each frame is reduced to an ordered list of draw commands with their
//! matrices, depth and blend modes. Backends (wgpu, the debug text renderer)
//! only execute the plan.
//!
//! # Invariants
//! - Draw order is fixed: grid, skybox, sun. Transparent geometry comes last.
//! - A plan is derived from camera matrices, scene parameters and elapsed
//!   time only.

mod plan;
mod renderer;

pub use plan::{BlendMode, DepthMode, DrawCommand, DrawKind, FrameInputs, FramePlan};
pub use renderer::{DebugTextRenderer, Renderer};

pub fn crate_info() -> &'static str {
    "retrowave-render v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crate_loads() {
        assert!(crate_info().contains("render"));
    }
}
