//! Orbit/zoom camera controls with damping and angle/distance limits

use std::f32::consts::{PI, TAU};

use glam::Vec3;

use super::camera::Camera3D;
use crate::config::ControlsSettings;

const EPS: f32 = 1e-6;

/// Radius/polar/azimuth around the orbit target; polar is measured from +Y
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Spherical {
    pub radius: f32,
    pub phi: f32,
    pub theta: f32,
}

impl Spherical {
    pub fn from_offset(offset: Vec3) -> Self {
        let radius = offset.length();
        if radius < EPS {
            return Self { radius: 0.0, phi: 0.0, theta: 0.0 };
        }
        Self {
            radius,
            phi: (offset.y / radius).clamp(-1.0, 1.0).acos(),
            theta: offset.x.atan2(offset.z),
        }
    }

    pub fn to_offset(self) -> Vec3 {
        let sin_phi_radius = self.phi.sin() * self.radius;
        Vec3::new(
            sin_phi_radius * self.theta.sin(),
            self.phi.cos() * self.radius,
            sin_phi_radius * self.theta.cos(),
        )
    }
}

/// Turntable controls orbiting the camera around a fixed target
#[derive(Debug, Clone)]
pub struct OrbitControls {
    pub target: Vec3,
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
    pub rotate_speed: f32,
    pub zoom_speed: f32,

    spherical_delta: Spherical,
    scale: f32,
}

impl Default for OrbitControls {
    fn default() -> Self {
        Self::from_settings(&ControlsSettings::default())
    }
}

impl OrbitControls {
    pub fn from_settings(settings: &ControlsSettings) -> Self {
        Self {
            target: Vec3::from(settings.target),
            min_polar_angle: settings.min_polar_angle,
            max_polar_angle: settings.max_polar_angle,
            min_distance: settings.min_distance,
            max_distance: settings.max_distance,
            enable_damping: settings.enable_damping,
            damping_factor: settings.damping_factor,
            auto_rotate: settings.auto_rotate,
            auto_rotate_speed: settings.auto_rotate_speed,
            rotate_speed: 1.0,
            zoom_speed: 1.0,
            spherical_delta: Spherical { radius: 0.0, phi: 0.0, theta: 0.0 },
            scale: 1.0,
        }
    }

    /// Pointer drag in pixels; a full viewport height drag is one turn
    pub fn rotate_by_pixels(&mut self, delta_x: f32, delta_y: f32, viewport_height: f32) {
        if viewport_height <= 0.0 {
            return;
        }
        self.rotate_left(TAU * delta_x / viewport_height * self.rotate_speed);
        self.rotate_up(TAU * delta_y / viewport_height * self.rotate_speed);
    }

    pub fn rotate_left(&mut self, angle: f32) {
        self.spherical_delta.theta -= angle;
    }

    pub fn rotate_up(&mut self, angle: f32) {
        self.spherical_delta.phi -= angle;
    }

    /// Scroll input; positive values move the camera closer
    pub fn zoom(&mut self, scroll: f32) {
        if scroll == 0.0 {
            return;
        }
        let step = 0.95_f32.powf(self.zoom_speed * scroll.abs() / 50.0);
        if scroll > 0.0 {
            self.scale *= step;
        } else {
            self.scale /= step;
        }
    }

    /// Apply pending input to the camera; call once per frame.
    /// Returns true while the camera is still moving.
    pub fn update(&mut self, camera: &mut Camera3D, delta_seconds: f32) -> bool {
        let mut spherical = Spherical::from_offset(camera.position - self.target);

        if self.auto_rotate {
            self.rotate_left(TAU / 60.0 * self.auto_rotate_speed * delta_seconds);
        }

        if self.enable_damping {
            spherical.theta += self.spherical_delta.theta * self.damping_factor;
            spherical.phi += self.spherical_delta.phi * self.damping_factor;
        } else {
            spherical.theta += self.spherical_delta.theta;
            spherical.phi += self.spherical_delta.phi;
        }

        spherical.phi = spherical
            .phi
            .clamp(self.min_polar_angle, self.max_polar_angle)
            .clamp(EPS, PI - EPS);
        spherical.radius = (spherical.radius * self.scale).clamp(self.min_distance, self.max_distance);

        camera.position = self.target + spherical.to_offset();
        camera.target = self.target;

        if self.enable_damping {
            let decay = 1.0 - self.damping_factor;
            self.spherical_delta.theta *= decay;
            self.spherical_delta.phi *= decay;
        } else {
            self.spherical_delta = Spherical { radius: 0.0, phi: 0.0, theta: 0.0 };
        }
        self.scale = 1.0;

        self.spherical_delta.theta.abs() > EPS || self.spherical_delta.phi.abs() > EPS
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn camera_at(position: Vec3) -> Camera3D {
        let mut camera = Camera3D::default();
        camera.position = position;
        camera
    }

    #[test]
    fn test_spherical_roundtrip() {
        let offset = Vec3::new(0.3, 1.2, -0.7);
        let back = Spherical::from_offset(offset).to_offset();
        assert!((back - offset).length() < 1e-5);
    }

    #[test]
    fn test_first_update_clamps_distance() {
        let mut controls = OrbitControls::default();
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 5.0));
        controls.update(&mut camera, 1.0 / 60.0);

        let distance = (camera.position - controls.target).length();
        assert!((distance - controls.max_distance).abs() < 1e-4);
        assert_eq!(camera.target, controls.target);
    }

    #[test]
    fn test_polar_angle_stays_in_bounds() {
        let mut controls = OrbitControls::default();
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 5.0));

        controls.rotate_up(10.0);
        for _ in 0..200 {
            controls.update(&mut camera, 1.0 / 60.0);
        }
        let phi = Spherical::from_offset(camera.position - controls.target).phi;
        assert!(phi >= controls.min_polar_angle - 1e-4);

        controls.rotate_up(-10.0);
        for _ in 0..200 {
            controls.update(&mut camera, 1.0 / 60.0);
        }
        let phi = Spherical::from_offset(camera.position - controls.target).phi;
        assert!(phi <= controls.max_polar_angle + 1e-4);
    }

    #[test]
    fn test_damping_decays_motion() {
        let mut controls = OrbitControls::default();
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 5.0));
        controls.rotate_left(1.0);

        let mut still_moving = true;
        for _ in 0..500 {
            still_moving = controls.update(&mut camera, 1.0 / 60.0);
        }
        assert!(!still_moving);
    }

    #[test]
    fn test_target_stays_fixed_while_orbiting() {
        let mut controls = OrbitControls::default();
        let target = controls.target;
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 5.0));
        controls.rotate_by_pixels(120.0, -40.0, 600.0);
        controls.zoom(100.0);
        for _ in 0..100 {
            controls.update(&mut camera, 1.0 / 60.0);
        }
        assert_eq!(controls.target, target);
        assert_eq!(camera.target, target);
    }

    #[test]
    fn test_zoom_respects_min_distance() {
        let mut controls = OrbitControls::default();
        let mut camera = camera_at(Vec3::new(0.0, 0.0, 5.0));
        for _ in 0..500 {
            controls.zoom(500.0);
            controls.update(&mut camera, 1.0 / 60.0);
        }
        let distance = (camera.position - controls.target).length();
        assert!(distance >= controls.min_distance - 1e-4);
    }
}
