//! Viewer position and orientation.

use glam::{EulerRot, Mat3, Mat4, Vec3};

/// Left-handed camera looking down +Z when unrotated.
#[derive(Debug, Copy, Clone, PartialEq)]
pub struct Camera {
    pub position: Vec3,

    /// Pitch, yaw and roll in degrees (rotation about X, Y and Z).
    pub rotation: Vec3,

    view: Mat4,
}

impl Default for Camera {
    fn default() -> Self {
        Self {
            position: Vec3::new(0.0, 0.0, -5.0),
            rotation: Vec3::ZERO,
            view: Mat4::IDENTITY,
        }
    }
}

impl Camera {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_position(&mut self, x: f32, y: f32, z: f32) {
        self.position = Vec3::new(x, y, z);
    }

    pub fn set_rotation(&mut self, pitch: f32, yaw: f32, roll: f32) {
        self.rotation = Vec3::new(pitch, yaw, roll);
    }

    /// Rebuilds the view matrix from the current position and rotation.
    pub fn render(&mut self) {
        let pitch = self.rotation.x.to_radians();
        let yaw = self.rotation.y.to_radians();
        let roll = self.rotation.z.to_radians();

        // Roll, then pitch, then yaw.
        let rotation = Mat3::from_euler(EulerRot::YXZ, yaw, pitch, roll);
        let forward = rotation * Vec3::Z;
        let up = rotation * Vec3::Y;

        self.view = Mat4::look_at_lh(self.position, self.position + forward, up);
    }

    /// View matrix as of the last [`Camera::render`].
    pub fn view_matrix(&self) -> Mat4 {
        self.view
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec4;

    fn approx(a: Vec3, b: Vec3) -> bool {
        (a - b).abs().max_element() < 1e-5
    }

    #[test]
    fn default_camera_sits_behind_origin() {
        let mut camera = Camera::new();
        camera.render();

        let origin = camera.view_matrix() * Vec4::new(0.0, 0.0, 0.0, 1.0);
        assert!(approx(origin.truncate(), Vec3::new(0.0, 0.0, 5.0)));
    }

    #[test]
    fn view_is_identity_until_rendered() {
        assert_eq!(Camera::new().view_matrix(), Mat4::IDENTITY);
    }

    #[test]
    fn yaw_turns_the_view_about_y() {
        let mut camera = Camera::new();
        camera.set_position(0.0, 0.0, 0.0);
        camera.set_rotation(0.0, 90.0, 0.0);
        camera.render();

        // Looking down +X, a point on +X is straight ahead.
        let p = camera.view_matrix().transform_point3(Vec3::new(3.0, 0.0, 0.0));
        assert!(approx(p, Vec3::new(0.0, 0.0, 3.0)));
    }

    #[test]
    fn pitch_turns_the_view_about_x() {
        let mut camera = Camera::new();
        camera.set_position(0.0, 0.0, 0.0);
        camera.set_rotation(-90.0, 0.0, 0.0);
        camera.render();

        // Negative pitch looks up.
        let p = camera.view_matrix().transform_point3(Vec3::new(0.0, 2.0, 0.0));
        assert!(approx(p, Vec3::new(0.0, 0.0, 2.0)));
    }
}
