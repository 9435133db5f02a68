//! Sky, lights, fog and floor around the model

use glam::Vec3;

use crate::config::{SceneSettings, SkySettings};

/// Convert a `0xRRGGBB` color to linear-ish float RGB
pub fn rgb_from_hex(hex: u32) -> [f32; 3] {
    [
        ((hex >> 16) & 0xFF) as f32 / 255.0,
        ((hex >> 8) & 0xFF) as f32 / 255.0,
        (hex & 0xFF) as f32 / 255.0,
    ]
}

/// Sun placement and atmosphere coefficients for the sky pass
#[derive(Debug, Clone, PartialEq)]
pub struct SkyParameters {
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
    pub elevation_degrees: f32,
    pub azimuth_degrees: f32,
}

/// Colors sampled by the sky shader
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyGradient {
    pub zenith: [f32; 3],
    pub horizon: [f32; 3],
    pub sun_color: [f32; 3],
    /// Exponent of the glow around the sun; higher is tighter
    pub sun_glow: f32,
}

impl SkyParameters {
    pub fn from_settings(settings: &SkySettings) -> Self {
        Self {
            turbidity: settings.turbidity,
            rayleigh: settings.rayleigh,
            mie_coefficient: settings.mie_coefficient,
            mie_directional_g: settings.mie_directional_g,
            elevation_degrees: settings.elevation,
            azimuth_degrees: settings.azimuth,
        }
    }

    /// Unit vector pointing at the sun
    pub fn sun_direction(&self) -> Vec3 {
        let phi = (90.0 - self.elevation_degrees).to_radians();
        let theta = self.azimuth_degrees.to_radians();
        Vec3::new(phi.sin() * theta.sin(), phi.cos(), phi.sin() * theta.cos())
    }

    /// Cheap stand-in for the scattering model: rayleigh deepens the
    /// zenith blue, turbidity washes the horizon out, a low sun warms it.
    pub fn gradient(&self) -> SkyGradient {
        let rayleigh = (self.rayleigh / 4.0).clamp(0.0, 1.0);
        let haze = ((self.turbidity - 1.0) / 19.0).clamp(0.0, 1.0);
        let sun_height = self.sun_direction().y.clamp(0.0, 1.0);
        let warmth = 1.0 - sun_height;

        let zenith = Vec3::new(0.30, 0.52, 0.85).lerp(Vec3::new(0.12, 0.30, 0.75), rayleigh);
        let horizon = Vec3::new(0.70, 0.80, 0.92).lerp(Vec3::new(0.92, 0.90, 0.86), haze);
        let horizon = horizon.lerp(Vec3::new(0.98, 0.74, 0.52), warmth * 0.35);
        let sun_color = Vec3::ONE.lerp(Vec3::new(1.0, 0.72, 0.45), warmth);

        let g = self.mie_directional_g.clamp(0.0, 0.999);
        let sun_glow = 8.0 + 2000.0 * g * g * (self.mie_coefficient * 100.0).clamp(0.1, 1.0);

        SkyGradient {
            zenith: zenith.to_array(),
            horizon: horizon.to_array(),
            sun_color: sun_color.to_array(),
            sun_glow,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HemisphereLight {
    pub sky_color: [f32; 3],
    pub ground_color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
}

impl HemisphereLight {
    /// Up axis of the sky/ground blend; +Y when the position is degenerate
    pub fn direction(&self) -> Vec3 {
        self.position.try_normalize().unwrap_or(Vec3::Y)
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DirectionalLight {
    pub color: [f32; 3],
    pub intensity: f32,
    pub position: Vec3,
}

impl DirectionalLight {
    /// Direction from the lit surface towards the light
    pub fn direction(&self) -> Vec3 {
        self.position.normalize_or_zero()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Fog {
    pub color: [f32; 3],
    pub near: f32,
    pub far: f32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Floor {
    pub size: f32,
    pub height: f32,
    pub color: [f32; 3],
}

/// Everything around the model that the renderer needs each frame
#[derive(Debug, Clone, PartialEq)]
pub struct SceneEnvironment {
    pub background: [f32; 3],
    pub fog: Fog,
    pub hemisphere: HemisphereLight,
    pub directional: DirectionalLight,
    pub floor: Floor,
    pub sky: SkyParameters,
}

impl SceneEnvironment {
    pub fn from_settings(scene: &SceneSettings, sky: &SkySettings) -> Self {
        let background = rgb_from_hex(scene.background);
        Self {
            background,
            fog: Fog {
                color: background,
                near: scene.fog_near,
                far: scene.fog_far,
            },
            hemisphere: HemisphereLight {
                sky_color: rgb_from_hex(scene.hemisphere_sky),
                ground_color: rgb_from_hex(scene.hemisphere_ground),
                intensity: scene.hemisphere_intensity,
                position: Vec3::from(scene.hemisphere_position),
            },
            directional: DirectionalLight {
                color: rgb_from_hex(scene.directional_color),
                intensity: scene.directional_intensity,
                position: Vec3::from(scene.directional_position),
            },
            floor: Floor {
                size: scene.floor_size,
                height: scene.floor_height,
                color: rgb_from_hex(scene.floor_color),
            },
            sky: SkyParameters::from_settings(sky),
        }
    }
}

impl Default for SceneEnvironment {
    fn default() -> Self {
        Self::from_settings(&SceneSettings::default(), &SkySettings::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sun_on_horizon_at_zero_elevation() {
        let sky = SceneEnvironment::default().sky;
        let sun = sky.sun_direction();
        assert!(sun.y.abs() < 1e-6);
        assert!((sun.length() - 1.0).abs() < 1e-5);
        assert!((sun.x - 250.0_f32.to_radians().sin()).abs() < 1e-5);
        assert!((sun.z - 250.0_f32.to_radians().cos()).abs() < 1e-5);
    }

    #[test]
    fn test_sun_overhead_at_ninety_degrees() {
        let mut sky = SceneEnvironment::default().sky;
        sky.elevation_degrees = 90.0;
        assert!((sky.sun_direction() - Vec3::Y).length() < 1e-5);
    }

    #[test]
    fn test_hex_colors() {
        assert_eq!(rgb_from_hex(0xFFFFFF), [1.0, 1.0, 1.0]);
        assert_eq!(rgb_from_hex(0x000000), [0.0, 0.0, 0.0]);
        let env = SceneEnvironment::default();
        assert_eq!(env.background, rgb_from_hex(0xF1F1F1));
        assert_eq!(env.fog.color, env.background);
    }

    #[test]
    fn test_low_sun_warms_horizon() {
        let mut sky = SceneEnvironment::default().sky;
        let low = sky.gradient();
        sky.elevation_degrees = 90.0;
        let high = sky.gradient();
        assert!(low.horizon[0] > high.horizon[0]);
    }

    #[test]
    fn test_hemisphere_axis_from_position() {
        let mut hemisphere = SceneEnvironment::default().hemisphere;
        assert_eq!(hemisphere.direction(), Vec3::Y);
        hemisphere.position = Vec3::ZERO;
        assert_eq!(hemisphere.direction(), Vec3::Y);
    }
}
