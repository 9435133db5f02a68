//! Where the model sits in the world, plus the optional intro spin

use glam::{Mat4, Quat, Vec3};

use crate::constants::intro;

/// Scale, yaw and height applied to the model root
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ModelPlacement {
    pub scale: f32,
    pub yaw: f32,
    pub offset_y: f32,
}

impl Default for ModelPlacement {
    fn default() -> Self {
        Self {
            scale: 2.0,
            yaw: 0.0,
            offset_y: -1.0,
        }
    }
}

impl ModelPlacement {
    pub fn matrix(&self, extra_yaw: f32) -> Mat4 {
        Mat4::from_scale_rotation_translation(
            Vec3::splat(self.scale),
            Quat::from_rotation_y(self.yaw + extra_yaw),
            Vec3::new(0.0, self.offset_y, 0.0),
        )
    }
}

/// Phase of the "drag to rotate" notice shown alongside the intro spin
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticePhase {
    Hidden,
    Shown,
    Fading,
}

/// Step-wise yaw animation played once after the model loads
#[derive(Debug, Clone)]
pub struct IntroSpin {
    enabled: bool,
    steps_done: u32,
    step_timer: f32,
    fade_timer: f32,
}

impl IntroSpin {
    pub fn new(enabled: bool) -> Self {
        Self {
            enabled,
            steps_done: 0,
            step_timer: 0.0,
            fade_timer: 0.0,
        }
    }

    /// Advance by `delta_seconds`
    pub fn update(&mut self, delta_seconds: f32) {
        if !self.enabled {
            return;
        }
        if self.steps_done < intro::STEPS {
            self.step_timer += delta_seconds;
            while self.step_timer >= intro::STEP_SECONDS && self.steps_done < intro::STEPS {
                self.step_timer -= intro::STEP_SECONDS;
                self.steps_done += 1;
            }
        } else {
            self.fade_timer += delta_seconds;
        }
    }

    /// Yaw added so far
    pub fn yaw(&self) -> f32 {
        self.steps_done as f32 * intro::STEP_ANGLE
    }

    pub fn notice(&self) -> NoticePhase {
        if !self.enabled {
            NoticePhase::Hidden
        } else if self.steps_done < intro::STEPS {
            NoticePhase::Shown
        } else if self.fade_timer < intro::NOTICE_FADE_SECONDS {
            NoticePhase::Fading
        } else {
            NoticePhase::Hidden
        }
    }

    /// Notice opacity in `0..=1`, falling linearly while fading
    pub fn notice_opacity(&self) -> f32 {
        match self.notice() {
            NoticePhase::Hidden => 0.0,
            NoticePhase::Shown => 1.0,
            NoticePhase::Fading => 1.0 - self.fade_timer / intro::NOTICE_FADE_SECONDS,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f32::consts::PI;

    #[test]
    fn test_placement_lowers_and_scales_model() {
        let matrix = ModelPlacement::default().matrix(0.0);
        let origin = matrix.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(0.0, -1.0, 0.0)).length() < 1e-5);
        let unit = matrix.transform_vector3(Vec3::Y);
        assert!((unit.length() - 2.0).abs() < 1e-5);
    }

    #[test]
    fn test_placement_keeps_authored_facing() {
        let placement = ModelPlacement::default();
        assert_eq!(placement.yaw, 0.0);
        let front = placement.matrix(0.0).transform_vector3(Vec3::Z);
        assert!((front - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-5);
        let turned = placement.matrix(PI).transform_vector3(Vec3::Z);
        assert!((turned - Vec3::new(0.0, 0.0, -2.0)).length() < 1e-5);
    }

    #[test]
    fn test_disabled_spin_never_moves() {
        let mut spin = IntroSpin::new(false);
        spin.update(10.0);
        assert_eq!(spin.yaw(), 0.0);
        assert_eq!(spin.notice(), NoticePhase::Hidden);
    }

    #[test]
    fn test_spin_completes_one_turn() {
        let mut spin = IntroSpin::new(true);
        assert_eq!(spin.notice(), NoticePhase::Shown);
        for _ in 0..300 {
            spin.update(0.01);
        }
        assert!((spin.yaw() - 2.0 * PI).abs() < 1e-4);
        assert_eq!(spin.notice(), NoticePhase::Fading);
        let opacity = spin.notice_opacity();
        assert!(opacity > 0.0 && opacity < 1.0);

        spin.update(1.0);
        assert_eq!(spin.notice(), NoticePhase::Hidden);
        assert_eq!(spin.notice_opacity(), 0.0);
    }
}
