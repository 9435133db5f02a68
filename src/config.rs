//! Viewer configuration
//!
//! Settings are read from `<config_dir>/partscope/config.json`. Every section
//! and field falls back to its default, so a partial file is valid.

use std::f32::consts::PI;
use std::path::{Path, PathBuf};

use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::constants::{self, panel};
use crate::error::ViewerError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CameraSettings {
    pub fov_degrees: f32,
    pub near: f32,
    pub far: f32,
    pub position: [f32; 3],
}

impl Default for CameraSettings {
    fn default() -> Self {
        Self {
            fov_degrees: 50.0,
            near: 0.1,
            far: 1000.0,
            position: [0.0, 0.0, 5.0],
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ControlsSettings {
    pub target: [f32; 3],
    pub min_polar_angle: f32,
    pub max_polar_angle: f32,
    pub min_distance: f32,
    pub max_distance: f32,
    pub enable_damping: bool,
    pub damping_factor: f32,
    pub auto_rotate: bool,
    pub auto_rotate_speed: f32,
}

impl Default for ControlsSettings {
    fn default() -> Self {
        Self {
            target: [0.0, -0.8, 0.0],
            min_polar_angle: PI / 3.0,
            max_polar_angle: PI * 0.495,
            min_distance: 0.1,
            max_distance: 2.0,
            enable_damping: true,
            damping_factor: 0.1,
            auto_rotate: false,
            auto_rotate_speed: 0.2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SkySettings {
    pub turbidity: f32,
    pub rayleigh: f32,
    pub mie_coefficient: f32,
    pub mie_directional_g: f32,
    pub elevation: f32,
    pub azimuth: f32,
}

impl Default for SkySettings {
    fn default() -> Self {
        Self {
            turbidity: 10.0,
            rayleigh: 2.0,
            mie_coefficient: 0.005,
            mie_directional_g: 0.8,
            elevation: 0.0,
            azimuth: 250.0,
        }
    }
}

/// Colors are `0xRRGGBB`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneSettings {
    pub background: u32,
    pub fog_near: f32,
    pub fog_far: f32,
    pub hemisphere_sky: u32,
    pub hemisphere_ground: u32,
    pub hemisphere_intensity: f32,
    pub hemisphere_position: [f32; 3],
    pub directional_color: u32,
    pub directional_intensity: f32,
    pub directional_position: [f32; 3],
    pub floor_size: f32,
    pub floor_height: f32,
    pub floor_color: u32,
}

impl Default for SceneSettings {
    fn default() -> Self {
        Self {
            background: 0xF1F1F1,
            fog_near: 20.0,
            fog_far: 100.0,
            hemisphere_sky: 0xFFFFFF,
            hemisphere_ground: 0xFFFFFF,
            hemisphere_intensity: 0.61,
            hemisphere_position: [0.0, 50.0, 0.0],
            directional_color: 0xFFFFFF,
            directional_intensity: 0.54,
            directional_position: [-8.0, 12.0, 8.0],
            floor_size: 5000.0,
            floor_height: -1.0,
            floor_color: 0xCCCCCC,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct UiSettings {
    pub column_height: f32,
    pub explorer_width: f32,
    pub intro_spin: bool,
}

impl Default for UiSettings {
    fn default() -> Self {
        Self {
            column_height: panel::DEFAULT_COLUMN_HEIGHT,
            explorer_width: panel::DEFAULT_EXPLORER_WIDTH,
            intro_spin: false,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    pub camera: CameraSettings,
    pub controls: ControlsSettings,
    pub sky: SkySettings,
    pub scene: SceneSettings,
    pub ui: UiSettings,
}

impl ViewerConfig {
    /// Platform location of the config file, if the platform has one
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(constants::CONFIG_DIR_NAME).join(constants::CONFIG_FILE_NAME))
    }

    /// Load from the default location, falling back to defaults on any problem
    pub fn load_or_default() -> Self {
        let Some(path) = Self::default_path() else {
            info!("No config directory on this platform, using defaults");
            return Self::default();
        };
        if !path.exists() {
            info!("No config at {}, using defaults", path.display());
            return Self::default();
        }
        match Self::load_from_path(&path) {
            Ok(config) => {
                info!("Loaded config from {}", path.display());
                config
            }
            Err(e) => {
                warn!("{}; using defaults", e);
                Self::default()
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self, ViewerError> {
        let content = std::fs::read_to_string(path).map_err(|e| ViewerError::Config {
            path: path.to_path_buf(),
            reason: format!("Failed to read file: {}", e),
        })?;
        serde_json::from_str(&content).map_err(|e| ViewerError::Config {
            path: path.to_path_buf(),
            reason: format!("Failed to parse config: {}", e),
        })
    }

    pub fn save_to_path(&self, path: &Path) -> Result<(), ViewerError> {
        let to_error = |reason: String| ViewerError::Config {
            path: path.to_path_buf(),
            reason,
        };
        let json = serde_json::to_string_pretty(self).map_err(|e| to_error(format!("Failed to serialize config: {}", e)))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| to_error(format!("Failed to create directory: {}", e)))?;
        }
        std::fs::write(path, json).map_err(|e| to_error(format!("Failed to write file: {}", e)))
    }
}
