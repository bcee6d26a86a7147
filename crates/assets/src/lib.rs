//! Asset loading for the retrowave demo.
//!
//! Meshes come from OBJ files when configured and from procedural builders
//! otherwise. The skybox cubemap is read from six JPEG faces named by
//! convention (`posx.jpg`, `negx.jpg`, ...).
//!
//! # Layout
//! Everything here is CPU-side data; GPU upload lives in the wgpu backend.

mod cubemap;
mod mesh;

pub use cubemap::{CubemapFaces, FACE_FILES, face_paths};
pub use mesh::{MeshData, Vertex, grid_plane, inward_cube, plane_quad};

use std::path::Path;

/// Edge length of the default neon grid, in metres.
pub const GRID_EXTENT: f32 = 500.0;
/// Number of cells per side of the default neon grid.
pub const GRID_CELLS: u32 = 100;

/// Errors from asset operations.
#[derive(Debug, thiserror::Error)]
pub enum AssetError {
    #[error("OBJ load error: {0}")]
    Obj(#[from] tobj::LoadError),
    #[error("model has no triangles: {0}")]
    EmptyMesh(String),
}

/// The three meshes the demo draws.
#[derive(Debug, Clone)]
pub struct SceneMeshes {
    pub grid: MeshData,
    pub skybox: MeshData,
    pub quad: MeshData,
}

impl SceneMeshes {
    /// Procedural meshes only.
    pub fn builtin() -> Self {
        Self::load(None, None, None)
    }

    /// Load configured OBJ files, falling back to the procedural mesh for
    /// any slot that is unset or fails to load.
    pub fn load(grid: Option<&Path>, skybox: Option<&Path>, quad: Option<&Path>) -> Self {
        Self {
            grid: MeshData::from_obj_or(grid, || grid_plane(GRID_EXTENT, GRID_CELLS)),
            skybox: MeshData::from_obj_or(skybox, inward_cube),
            quad: MeshData::from_obj_or(quad, plane_quad),
        }
    }
}

pub fn crate_info() -> &'static str {
    "retrowave-assets v0.1.0"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builtin_meshes() {
        let meshes = SceneMeshes::builtin();
        assert_eq!(meshes.grid.triangle_count(), (GRID_CELLS * GRID_CELLS * 2) as usize);
        assert_eq!(meshes.skybox.triangle_count(), 12);
        assert_eq!(meshes.quad.triangle_count(), 2);
    }

    #[test]
    fn missing_models_fall_back() {
        let missing = Path::new("/nonexistent/flippedCube.obj");
        let meshes = SceneMeshes::load(None, Some(missing), None);
        assert_eq!(meshes.skybox.name, "inward_cube");
    }
}
