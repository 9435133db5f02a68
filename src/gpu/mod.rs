//! GPU rendering module
//!
//! wgpu side of the model viewport. The renderer lives behind a shared
//! mutex and is driven by an egui paint callback each frame.
//!
//! - [`config`] - formats and pipeline state shared with the egui pass
//! - [`scene_rendering`] - pipelines, buffers and draw submission
//! - [`scene_callback`] - egui paint callback integration
//! - `shaders/` - WGSL for the lit parts and the sky

pub mod config;
pub mod scene_callback;
pub mod scene_rendering;

pub use config::{depth_buffer_bits, GraphicsConfig};
pub use scene_callback::SceneRenderCallback;
pub use scene_rendering::{DrawPass, DrawUniforms, GlobalUniforms, ModelGeometry, SceneRenderer};
