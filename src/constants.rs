//! Application-wide constants and default values
//!
//! Centralized location for all hard-coded values to improve maintainability

/// Model shown by the viewer
pub const MODEL_PATH: &str = "assets/positron_32b_v57.glb";

/// Window title
pub const APP_TITLE: &str = "Partscope";

/// Directory name used under the platform config dir
pub const CONFIG_DIR_NAME: &str = "partscope";

/// Config file name inside `CONFIG_DIR_NAME`
pub const CONFIG_FILE_NAME: &str = "config.json";

/// Panel sizing constants
pub mod panel {
    /// Initial window size
    pub const DEFAULT_WINDOW_SIZE: [f32; 2] = [1280.0, 800.0];

    /// Default explorer side panel width
    pub const DEFAULT_EXPLORER_WIDTH: f32 = 280.0;

    /// Minimum explorer side panel width
    pub const MIN_EXPLORER_WIDTH: f32 = 160.0;

    /// Height of one explorer column
    pub const DEFAULT_COLUMN_HEIGHT: f32 = 120.0;
}

/// Intro spin timing
pub mod intro {
    use std::f32::consts::PI;

    /// Number of yaw steps
    pub const STEPS: u32 = 120;

    /// Time between steps
    pub const STEP_SECONDS: f32 = 0.020;

    /// Yaw per step
    pub const STEP_ANGLE: f32 = PI / 60.0;

    /// How long the notice lingers after the spin ends
    pub const NOTICE_FADE_SECONDS: f32 = 0.8;
}

/// GPU resource constants
pub mod gpu {
    /// Stride between per-draw uniform blocks (dynamic offset alignment)
    pub const DRAW_UNIFORM_STRIDE: u64 = 256;

    /// Initial number of per-draw uniform slots
    pub const INITIAL_DRAW_CAPACITY: usize = 256;

    /// Depth buffer bits requested from eframe
    pub const DEPTH_BITS: u8 = 24;
}
