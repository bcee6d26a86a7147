//! wgpu render backend for the retrowave demo.
//!
//! Executes a [`retrowave_render::FramePlan`]: neon grid, cubemap skybox and
//! the animated sun quad, in a single MSAA pass.
//!
//! # Invariants
//! - Renderer never mutates scene state.
//! - Pipelines are built once at startup; per frame only uniforms change.
//! - Wireframe is only honoured when the adapter supports line polygons.

mod context;
mod gpu;
mod shaders;

pub use context::{DEPTH_FORMAT, GpuContext};
pub use gpu::RetrowaveRenderer;

/// Errors creating the GPU context.
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    CreateSurface(#[from] wgpu::CreateSurfaceError),
    #[error("no compatible GPU adapter found")]
    NoAdapter,
    #[error("surface reports no supported formats")]
    IncompatibleSurface,
    #[error("failed to create device: {0}")]
    RequestDevice(#[from] wgpu::RequestDeviceError),
}
