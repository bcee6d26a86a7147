use glam::{Mat4, Vec3};

const MAX_PITCH_DEGREES: f32 = 89.0;

/// First-person camera with position, yaw, pitch, and projection parameters.
///
/// When `on_ground` is set the camera is anchored: WASD movement slides along
/// the XZ plane and never changes the eye height, whatever the pitch.
#[derive(Debug, Clone)]
pub struct FlyCamera {
    pub position: Vec3,
    pub yaw: f32,
    pub pitch: f32,
    pub fov: f32,
    pub aspect: f32,
    pub near: f32,
    pub far: f32,
    pub speed: f32,
    pub sensitivity: f32,
    pub on_ground: bool,
}

impl Default for FlyCamera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, 7.0),
            yaw: -90.0_f32.to_radians(),
            pitch: 0.0,
            fov: 45.0_f32.to_radians(),
            aspect: 16.0 / 9.0,
            near: 0.1,
            far: 10_000.0,
            speed: 3.0,
            sensitivity: 0.25_f32.to_radians(),
            on_ground: true,
        }
    }
}

impl FlyCamera {
    pub fn new(position: Vec3, on_ground: bool) -> Self {
        Self {
            position,
            on_ground,
            ..Self::default()
        }
    }

    pub fn forward(&self) -> Vec3 {
        Vec3::new(
            self.yaw.cos() * self.pitch.cos(),
            self.pitch.sin(),
            self.yaw.sin() * self.pitch.cos(),
        )
        .normalize()
    }

    pub fn right(&self) -> Vec3 {
        self.forward().cross(Vec3::Y).normalize()
    }

    /// Direction used for forward/backward motion.
    fn travel_forward(&self) -> Vec3 {
        if self.on_ground {
            Vec3::new(self.yaw.cos(), 0.0, self.yaw.sin()).normalize()
        } else {
            self.forward()
        }
    }

    fn step(&mut self, direction: Vec3, dt: f32) {
        self.position += direction * self.speed * dt;
    }

    pub fn move_forward(&mut self, dt: f32) {
        self.step(self.travel_forward(), dt);
    }

    pub fn move_backward(&mut self, dt: f32) {
        self.step(-self.travel_forward(), dt);
    }

    pub fn move_left(&mut self, dt: f32) {
        self.step(-self.right(), dt);
    }

    pub fn move_right(&mut self, dt: f32) {
        self.step(self.right(), dt);
    }

    /// Apply a mouse delta in pixels. Screen y grows downward.
    pub fn rotate(&mut self, dx: f32, dy: f32) {
        self.yaw += dx * self.sensitivity;
        let limit = MAX_PITCH_DEGREES.to_radians();
        self.pitch = (self.pitch - dy * self.sensitivity).clamp(-limit, limit);
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.position + self.forward(), Vec3::Y)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn set_viewport(&mut self, width: u32, height: u32) {
        self.aspect = width.max(1) as f32 / height.max(1) as f32;
    }
}
