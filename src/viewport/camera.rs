//! Perspective camera for the model viewport

use glam::{Mat4, Vec3};

use crate::config::CameraSettings;

/// Perspective camera looking at a target point
#[derive(Debug, Clone, PartialEq)]
pub struct Camera3D {
    pub position: Vec3,
    pub target: Vec3,
    pub up: Vec3,
    pub fov: f32,
    pub near: f32,
    pub far: f32,
    pub aspect: f32,
}

impl Default for Camera3D {
    fn default() -> Self {
        Self::from_settings(&CameraSettings::default())
    }
}

impl Camera3D {
    pub fn from_settings(settings: &CameraSettings) -> Self {
        Self {
            position: Vec3::from(settings.position),
            target: Vec3::ZERO,
            up: Vec3::Y,
            fov: settings.fov_degrees.to_radians(),
            near: settings.near,
            far: settings.far,
            aspect: 1.0,
        }
    }

    pub fn view_matrix(&self) -> Mat4 {
        Mat4::look_at_rh(self.position, self.target, self.up)
    }

    pub fn projection_matrix(&self) -> Mat4 {
        Mat4::perspective_rh(self.fov, self.aspect, self.near, self.far)
    }

    pub fn build_view_projection_matrix(&self) -> Mat4 {
        self.projection_matrix() * self.view_matrix()
    }

    /// Keep the projection in step with the viewport size; zero-sized
    /// viewports (minimized window) are ignored
    pub fn set_viewport_size(&mut self, width: f32, height: f32) {
        if width > 0.0 && height > 0.0 {
            self.aspect = width / height;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_scene_setup() {
        let camera = Camera3D::default();
        assert_eq!(camera.position, Vec3::new(0.0, 0.0, 5.0));
        assert!((camera.fov - 50.0_f32.to_radians()).abs() < 1e-6);
        assert_eq!(camera.near, 0.1);
        assert_eq!(camera.far, 1000.0);
    }

    #[test]
    fn test_zero_viewport_keeps_aspect() {
        let mut camera = Camera3D::default();
        camera.set_viewport_size(1600.0, 800.0);
        assert_eq!(camera.aspect, 2.0);
        camera.set_viewport_size(0.0, 800.0);
        assert_eq!(camera.aspect, 2.0);
    }

    #[test]
    fn test_target_projects_to_center() {
        let mut camera = Camera3D::default();
        camera.target = Vec3::new(0.0, -0.8, 0.0);
        let ndc = camera.build_view_projection_matrix().project_point3(camera.target);
        assert!(ndc.x.abs() < 1e-5);
        assert!(ndc.y.abs() < 1e-5);
    }
}
