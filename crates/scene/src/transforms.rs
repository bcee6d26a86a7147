//! Model matrices for the scene objects.

use glam::{Mat3, Mat4, Vec3};

/// Height of the grid plane.
pub const GRID_HEIGHT: f32 = -1.0;
/// Height of the sun centre.
pub const SUN_HEIGHT: f32 = 5.0;

/// translate(0, -1, 0) * scale(size, 1, size)
pub fn grid_model(grid_size: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, GRID_HEIGHT, 0.0))
        * Mat4::from_scale(Vec3::new(grid_size, 1.0, grid_size))
}

/// translate(0, 5, depth) * rotate_x(-90deg) * scale(size, 1, size)
///
/// The quad mesh lies in the XZ plane; the rotation stands it up facing the
/// camera.
pub fn sun_model(sun_size: f32, sun_depth: f32) -> Mat4 {
    Mat4::from_translation(Vec3::new(0.0, SUN_HEIGHT, sun_depth))
        * Mat4::from_rotation_x(-90.0_f32.to_radians())
        * Mat4::from_scale(Vec3::new(sun_size, 1.0, sun_size))
}

/// View matrix with the translation removed, so the skybox follows the camera.
pub fn skybox_view(view: Mat4) -> Mat4 {
    Mat4::from_mat3(Mat3::from_mat4(view))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::FlyCamera;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).length() < 1e-4
    }

    #[test]
    fn grid_is_lowered_and_scaled_horizontally() {
        let m = grid_model(2.5);
        assert!(approx(m.transform_point3(Vec3::ZERO), Vec3::new(0.0, -1.0, 0.0)));
        assert!(approx(
            m.transform_point3(Vec3::new(1.0, 1.0, 1.0)),
            Vec3::new(2.5, 0.0, 2.5)
        ));
    }

    #[test]
    fn sun_quad_stands_in_xy_plane() {
        let m = sun_model(2.0, -3.0);
        assert!(approx(m.transform_point3(Vec3::ZERO), Vec3::new(0.0, 5.0, -3.0)));
        // quad corner (1, 0, 1) ends up scaled into the XY plane
        let corner = m.transform_point3(Vec3::new(1.0, 0.0, 1.0));
        assert!(approx(corner, Vec3::new(2.0, 7.0, -3.0)));
    }

    #[test]
    fn skybox_view_drops_translation() {
        let mut cam = FlyCamera::default();
        cam.rotate(120.0, 30.0);
        let view = cam.view_matrix();
        let sky = skybox_view(view);
        assert_eq!(sky.w_axis, glam::Vec4::W);
        assert!(approx(
            sky.transform_vector3(Vec3::X),
            view.transform_vector3(Vec3::X)
        ));
    }
}
