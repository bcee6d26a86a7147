use crate::AssetError;
use bytemuck::{Pod, Zeroable};
use std::path::Path;

/// Vertex layout shared by every mesh in the demo.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, Pod, Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
    pub uv: [f32; 2],
}

/// Indexed triangle mesh held in CPU memory until upload.
#[derive(Debug, Clone)]
pub struct MeshData {
    pub name: String,
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
}

impl MeshData {
    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Axis-aligned bounds as (min, max). Empty meshes report zeros.
    pub fn bounds(&self) -> ([f32; 3], [f32; 3]) {
        let Some(first) = self.vertices.first() else {
            return ([0.0; 3], [0.0; 3]);
        };
        let mut min = first.position;
        let mut max = first.position;
        for v in &self.vertices {
            for axis in 0..3 {
                min[axis] = min[axis].min(v.position[axis]);
                max[axis] = max[axis].max(v.position[axis]);
            }
        }
        (min, max)
    }

    /// Import every model of an OBJ file and merge them into one mesh.
    ///
    /// Faces are triangulated and attributes re-indexed to a single index
    /// buffer. Missing normals or texture coordinates are zero-filled.
    pub fn from_obj(path: impl AsRef<Path>) -> Result<Self, AssetError> {
        let path = path.as_ref();
        let (models, _materials) = tobj::load_obj(path, &tobj::GPU_LOAD_OPTIONS)?;

        let mut vertices = Vec::new();
        let mut indices = Vec::new();
        for model in &models {
            let mesh = &model.mesh;
            let base = vertices.len() as u32;
            let count = mesh.positions.len() / 3;
            for i in 0..count {
                let normal = if mesh.normals.len() >= (i + 1) * 3 {
                    [
                        mesh.normals[i * 3],
                        mesh.normals[i * 3 + 1],
                        mesh.normals[i * 3 + 2],
                    ]
                } else {
                    [0.0; 3]
                };
                let uv = if mesh.texcoords.len() >= (i + 1) * 2 {
                    [mesh.texcoords[i * 2], mesh.texcoords[i * 2 + 1]]
                } else {
                    [0.0; 2]
                };
                vertices.push(Vertex {
                    position: [
                        mesh.positions[i * 3],
                        mesh.positions[i * 3 + 1],
                        mesh.positions[i * 3 + 2],
                    ],
                    normal,
                    uv,
                });
            }
            indices.extend(mesh.indices.iter().map(|i| base + i));
        }

        if indices.is_empty() {
            return Err(AssetError::EmptyMesh(path.display().to_string()));
        }

        let name = path
            .file_stem()
            .map(|s| s.to_string_lossy().into_owned())
            .unwrap_or_else(|| "obj".into());
        tracing::debug!(
            mesh = %name,
            vertices = vertices.len(),
            triangles = indices.len() / 3,
            "imported OBJ"
        );
        Ok(Self {
            name,
            vertices,
            indices,
        })
    }

    /// Load an OBJ when a path is configured, otherwise (or on failure) use
    /// the procedural fallback.
    pub fn from_obj_or(path: Option<&Path>, fallback: impl FnOnce() -> Self) -> Self {
        match path {
            Some(path) => match Self::from_obj(path) {
                Ok(mesh) => mesh,
                Err(e) => {
                    tracing::warn!("failed to load model {}: {e}; using built-in mesh", path.display());
                    fallback()
                }
            },
            None => fallback(),
        }
    }
}

/// Flat square grid on the XZ plane, centred on the origin, facing +Y.
///
/// `size` is the edge length in metres and `cells` the number of quads per
/// side. UVs run 0..1 across the whole plane.
pub fn grid_plane(size: f32, cells: u32) -> MeshData {
    let cells = cells.max(1);
    let half = size * 0.5;
    let step = size / cells as f32;
    let row = cells + 1;

    let mut vertices = Vec::with_capacity((row * row) as usize);
    for iz in 0..row {
        for ix in 0..row {
            let u = ix as f32 / cells as f32;
            let v = iz as f32 / cells as f32;
            vertices.push(Vertex {
                position: [-half + ix as f32 * step, 0.0, -half + iz as f32 * step],
                normal: [0.0, 1.0, 0.0],
                uv: [u, v],
            });
        }
    }

    let mut indices = Vec::with_capacity((cells * cells * 6) as usize);
    for iz in 0..cells {
        for ix in 0..cells {
            let i0 = iz * row + ix;
            let i1 = i0 + 1;
            let i2 = i0 + row;
            let i3 = i2 + 1;
            indices.extend_from_slice(&[i0, i2, i1, i1, i2, i3]);
        }
    }

    MeshData {
        name: format!("grid_{size}m_{cells}x{cells}"),
        vertices,
        indices,
    }
}

/// Cube from -1 to 1 with faces and normals pointing inward, for the skybox.
pub fn inward_cube() -> MeshData {
    // (inward normal, tangent u, tangent v) per face
    const FACES: [([f32; 3], [f32; 3], [f32; 3]); 6] = [
        ([-1.0, 0.0, 0.0], [0.0, 0.0, 1.0], [0.0, 1.0, 0.0]),
        ([1.0, 0.0, 0.0], [0.0, 0.0, -1.0], [0.0, 1.0, 0.0]),
        ([0.0, -1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, 1.0]),
        ([0.0, 1.0, 0.0], [1.0, 0.0, 0.0], [0.0, 0.0, -1.0]),
        ([0.0, 0.0, -1.0], [-1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
        ([0.0, 0.0, 1.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]),
    ];

    let mut vertices = Vec::with_capacity(24);
    let mut indices = Vec::with_capacity(36);
    for (normal, tu, tv) in FACES {
        let base = vertices.len() as u32;
        // the face sits on the side opposite its inward normal
        let centre = [-normal[0], -normal[1], -normal[2]];
        for (su, sv) in [(-1.0, -1.0), (1.0, -1.0), (1.0, 1.0), (-1.0, 1.0)] {
            let position = [
                centre[0] + su * tu[0] + sv * tv[0],
                centre[1] + su * tu[1] + sv * tv[1],
                centre[2] + su * tu[2] + sv * tv[2],
            ];
            vertices.push(Vertex {
                position,
                normal,
                uv: [(su + 1.0) * 0.5, (sv + 1.0) * 0.5],
            });
        }
        indices.extend_from_slice(&[base, base + 1, base + 2, base + 2, base + 3, base]);
    }

    MeshData {
        name: "inward_cube".into(),
        vertices,
        indices,
    }
}

/// Unit quad on the XZ plane spanning -1..1, facing +Y.
pub fn plane_quad() -> MeshData {
    #[rustfmt::skip]
    let vertices = vec![
        Vertex { position: [-1.0, 0.0, -1.0], normal: [0.0, 1.0, 0.0], uv: [0.0, 0.0] },
        Vertex { position: [-1.0, 0.0,  1.0], normal: [0.0, 1.0, 0.0], uv: [0.0, 1.0] },
        Vertex { position: [ 1.0, 0.0,  1.0], normal: [0.0, 1.0, 0.0], uv: [1.0, 1.0] },
        Vertex { position: [ 1.0, 0.0, -1.0], normal: [0.0, 1.0, 0.0], uv: [1.0, 0.0] },
    ];
    MeshData {
        name: "plane_quad".into(),
        vertices,
        indices: vec![0, 1, 2, 2, 3, 0],
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn grid_plane_counts_and_bounds() {
        let grid = grid_plane(500.0, 100);
        assert_eq!(grid.vertices.len(), 101 * 101);
        assert_eq!(grid.triangle_count(), 100 * 100 * 2);
        let (min, max) = grid.bounds();
        assert_eq!(min, [-250.0, 0.0, -250.0]);
        assert_eq!(max, [250.0, 0.0, 250.0]);
        assert!(grid.indices.iter().all(|&i| (i as usize) < grid.vertices.len()));
        assert_eq!(grid.vertices.last().unwrap().uv, [1.0, 1.0]);
    }

    #[test]
    fn inward_cube_normals_point_to_centre() {
        let cube = inward_cube();
        assert_eq!(cube.vertices.len(), 24);
        assert_eq!(cube.triangle_count(), 12);
        assert_eq!(cube.bounds(), ([-1.0; 3], [1.0; 3]));
        for v in &cube.vertices {
            let dot: f32 = (0..3).map(|a| v.position[a] * v.normal[a]).sum();
            assert!(dot < 0.0, "normal {:?} at {:?} faces outward", v.normal, v.position);
        }
    }

    #[test]
    fn plane_quad_is_flat() {
        let quad = plane_quad();
        assert_eq!(quad.triangle_count(), 2);
        assert!(quad.vertices.iter().all(|v| v.position[1] == 0.0));
    }

    #[test]
    fn obj_import_merges_and_triangulates() {
        let mut file = tempfile::Builder::new().suffix(".obj").tempfile().unwrap();
        writeln!(
            file,
            "o quad\nv -1 0 -1\nv 1 0 -1\nv 1 0 1\nv -1 0 1\nvt 0 0\nvt 1 0\nvt 1 1\nvt 0 1\nvn 0 1 0\nf 1/1/1 2/2/1 3/3/1 4/4/1\n"
        )
        .unwrap();
        file.flush().unwrap();

        let mesh = MeshData::from_obj(file.path()).unwrap();
        assert_eq!(mesh.triangle_count(), 2);
        assert_eq!(mesh.vertices.len(), 4);
        assert!(mesh.vertices.iter().all(|v| v.normal == [0.0, 1.0, 0.0]));
    }

    #[test]
    fn missing_obj_falls_back() {
        let mesh = MeshData::from_obj_or(Some(Path::new("/nonexistent/model.obj")), plane_quad);
        assert_eq!(mesh.name, "plane_quad");
        assert!(MeshData::from_obj("/nonexistent/model.obj").is_err());
    }
}
