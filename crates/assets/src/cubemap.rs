use image::RgbaImage;
use image::imageops::FilterType;
use std::path::{Path, PathBuf};

/// Face file names in layer order: +X, -X, +Y, -Y, +Z, -Z.
pub const FACE_FILES: [&str; 6] = [
    "posx.jpg", "negx.jpg", "posy.jpg", "negy.jpg", "posz.jpg", "negz.jpg",
];

/// Six RGBA8 faces of equal size, ready to upload as a cube texture.
#[derive(Debug, Clone)]
pub struct CubemapFaces {
    pub size: u32,
    /// Tightly packed RGBA8 pixels, one entry per face in [`FACE_FILES`] order.
    pub faces: [Vec<u8>; 6],
    /// Faces that could not be loaded and were left black.
    pub missing: Vec<&'static str>,
}

impl CubemapFaces {
    /// Load the six faces from `dir`.
    ///
    /// Faces that are missing or fail to decode are logged and left black;
    /// loading never fails outright. Faces whose size differs from the first
    /// loaded face are resized to match it.
    pub fn load(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let images: Vec<Option<RgbaImage>> = FACE_FILES
            .iter()
            .map(|name| {
                let path = dir.join(name);
                match image::open(&path) {
                    Ok(img) => Some(img.to_rgba8()),
                    Err(e) => {
                        tracing::warn!("failed to load cubemap face {}: {e}", path.display());
                        None
                    }
                }
            })
            .collect();

        Self::from_images(images)
    }

    /// Assemble faces from decoded images, `None` meaning a missing face.
    pub fn from_images(images: Vec<Option<RgbaImage>>) -> Self {
        let size = images
            .iter()
            .flatten()
            .next()
            .map(|img| img.width().max(img.height()))
            .unwrap_or(1);

        let mut missing = Vec::new();
        let faces: [Vec<u8>; 6] = std::array::from_fn(|i| match images.get(i) {
            Some(Some(img)) => {
                if img.width() == size && img.height() == size {
                    img.as_raw().clone()
                } else {
                    tracing::debug!(
                        face = FACE_FILES[i],
                        "resizing {}x{} face to {size}x{size}",
                        img.width(),
                        img.height()
                    );
                    image::imageops::resize(img, size, size, FilterType::Triangle).into_raw()
                }
            }
            _ => {
                missing.push(FACE_FILES[i]);
                black_face(size)
            }
        });

        Self {
            size,
            faces,
            missing,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.missing.is_empty()
    }
}

fn black_face(size: u32) -> Vec<u8> {
    let mut pixels = vec![0u8; (size * size * 4) as usize];
    for alpha in pixels.iter_mut().skip(3).step_by(4) {
        *alpha = 255;
    }
    pixels
}

/// Paths of the faces in `dir`, in layer order.
pub fn face_paths(dir: impl AsRef<Path>) -> [PathBuf; 6] {
    let dir = dir.as_ref();
    FACE_FILES.map(|name| dir.join(name))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::Rgba;

    fn solid(size: u32, value: u8) -> RgbaImage {
        RgbaImage::from_pixel(size, size, Rgba([value, value, value, 255]))
    }

    #[test]
    fn complete_set_keeps_pixels() {
        let faces = CubemapFaces::from_images((0..6).map(|i| Some(solid(4, i as u8 * 10))).collect());
        assert!(faces.is_complete());
        assert_eq!(faces.size, 4);
        assert_eq!(faces.faces[3][0], 30);
        assert!(faces.faces.iter().all(|f| f.len() == 4 * 4 * 4));
    }

    #[test]
    fn missing_faces_are_black() {
        let mut images: Vec<_> = (0..6).map(|_| Some(solid(2, 200))).collect();
        images[2] = None;
        let faces = CubemapFaces::from_images(images);
        assert_eq!(faces.missing, vec!["posy.jpg"]);
        assert_eq!(&faces.faces[2][..4], &[0, 0, 0, 255]);
        assert_eq!(faces.faces[2].len(), faces.faces[0].len());
    }

    #[test]
    fn mismatched_faces_are_resized() {
        let mut images: Vec<_> = (0..6).map(|_| Some(solid(8, 50))).collect();
        images[5] = Some(solid(3, 50));
        let faces = CubemapFaces::from_images(images);
        assert_eq!(faces.faces[5].len(), 8 * 8 * 4);
    }

    #[test]
    fn empty_directory_degrades_to_black() {
        let dir = tempfile::tempdir().unwrap();
        let faces = CubemapFaces::load(dir.path());
        assert_eq!(faces.missing.len(), 6);
        assert_eq!(faces.size, 1);
    }

    #[test]
    fn loads_faces_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        for path in face_paths(dir.path()) {
            image::DynamicImage::ImageRgba8(solid(2, 90))
                .to_rgb8()
                .save(&path)
                .unwrap();
        }
        let faces = CubemapFaces::load(dir.path());
        assert!(faces.is_complete());
        assert_eq!(faces.size, 2);
    }
}
