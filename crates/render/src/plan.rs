use glam::Mat4;
use retrowave_scene::{SceneParams, transforms};
use serde::Serialize;

/// Scene object drawn by a command. Each maps to one mesh and one pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DrawKind {
    Grid,
    Skybox,
    Sun,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum DepthMode {
    /// Standard test.
    Less,
    /// Lets geometry sitting exactly on the far plane pass.
    LessEqual,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BlendMode {
    Opaque,
    Alpha,
}

/// One draw call with its uniforms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct DrawCommand {
    pub kind: DrawKind,
    pub model: Mat4,
    pub view: Mat4,
    pub depth: DepthMode,
    pub blend: BlendMode,
    /// Animation time handed to the shader.
    pub time: f32,
}

/// What a frame is computed from.
#[derive(Debug, Clone, Copy)]
pub struct FrameInputs {
    pub view: Mat4,
    pub projection: Mat4,
    pub params: SceneParams,
    /// Seconds since startup.
    pub elapsed: f32,
    pub wireframe: bool,
}

/// Ordered draw list for one frame, independent of the GPU backend.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FramePlan {
    pub clear_color: [f32; 4],
    pub projection: Mat4,
    pub wireframe: bool,
    pub draws: Vec<DrawCommand>,
}

impl FramePlan {
    /// Black.
    pub const CLEAR_COLOR: [f32; 4] = [0.0, 0.0, 0.0, 1.0];

    /// Build the frame: grid, then skybox, then the transparent sun last.
    pub fn build(inputs: &FrameInputs) -> Self {
        let params = inputs.params;
        let draws = vec![
            DrawCommand {
                kind: DrawKind::Grid,
                model: transforms::grid_model(params.grid_size),
                view: inputs.view,
                depth: DepthMode::Less,
                blend: BlendMode::Alpha,
                time: inputs.elapsed,
            },
            DrawCommand {
                kind: DrawKind::Skybox,
                model: Mat4::IDENTITY,
                view: transforms::skybox_view(inputs.view),
                depth: DepthMode::LessEqual,
                blend: BlendMode::Opaque,
                time: inputs.elapsed,
            },
            DrawCommand {
                kind: DrawKind::Sun,
                model: transforms::sun_model(params.sun_size, params.sun_depth),
                view: inputs.view,
                depth: DepthMode::Less,
                blend: BlendMode::Alpha,
                time: params.sun_time(inputs.elapsed),
            },
        ];

        Self {
            clear_color: Self::CLEAR_COLOR,
            projection: inputs.projection,
            wireframe: inputs.wireframe,
            draws,
        }
    }

    pub fn draw(&self, kind: DrawKind) -> Option<&DrawCommand> {
        self.draws.iter().find(|d| d.kind == kind)
    }
}
