//! Scene state for the retrowave demo.
//!
//! Everything here is plain data plus `glam` math: the camera, the
//! slider-controlled parameters, the model matrices of the grid and sun, and
//! the frame clock.
//!
//! # Invariants
//! - Parameters handed to the renderer are always inside their slider ranges.
//! - Each frame is derived from elapsed time and the current parameters only.

mod camera;
mod clock;
mod params;
pub mod transforms;

pub use camera::FlyCamera;
pub use clock::{FrameClock, FrameTime, MAX_FRAME_DELTA};
pub use params::{
    GRID_SIZE_RANGE, SUN_DEPTH_RANGE, SUN_SIZE_RANGE, SUN_SPEED_RANGE, SceneParams,
};

pub fn crate_info() -> &'static str {
    "retrowave-scene v0.1.0"
}
