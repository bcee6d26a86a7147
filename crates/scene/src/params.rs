use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Range of a GUI slider.
pub const GRID_SIZE_RANGE: RangeInclusive<f32> = 0.1..=5.0;
pub const SUN_SPEED_RANGE: RangeInclusive<f32> = 0.0..=10.0;
pub const SUN_DEPTH_RANGE: RangeInclusive<f32> = -10.0..=10.0;
pub const SUN_SIZE_RANGE: RangeInclusive<f32> = 0.5..=10.0;

/// Slider-controlled scene parameters.
///
/// Written by the GUI, read by the render pass every frame.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneParams {
    /// Horizontal scale of the neon grid.
    pub grid_size: f32,
    /// Multiplier applied to elapsed time for the sun animation.
    pub sun_speed: f32,
    /// Z offset of the sun quad.
    pub sun_depth: f32,
    /// Scale of the sun quad.
    pub sun_size: f32,
}

impl Default for SceneParams {
    fn default() -> Self {
        Self {
            grid_size: 1.0,
            sun_speed: 2.0,
            sun_depth: 0.0,
            sun_size: 2.0,
        }
    }
}

impl SceneParams {
    /// Clamp every value into its slider range. NaN falls back to the default.
    pub fn clamped(self) -> Self {
        let defaults = Self::default();
        Self {
            grid_size: clamp_or(self.grid_size, GRID_SIZE_RANGE, defaults.grid_size),
            sun_speed: clamp_or(self.sun_speed, SUN_SPEED_RANGE, defaults.sun_speed),
            sun_depth: clamp_or(self.sun_depth, SUN_DEPTH_RANGE, defaults.sun_depth),
            sun_size: clamp_or(self.sun_size, SUN_SIZE_RANGE, defaults.sun_size),
        }
    }

    /// Shader time for the sun animation.
    pub fn sun_time(&self, elapsed_secs: f32) -> f32 {
        elapsed_secs * self.sun_speed
    }
}

fn clamp_or(value: f32, range: RangeInclusive<f32>, fallback: f32) -> f32 {
    if value.is_nan() {
        fallback
    } else {
        value.clamp(*range.start(), *range.end())
    }
}
