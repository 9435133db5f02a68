//! Partscope core library
//!
//! A glTF model viewer with a hover-driven part explorer. The explorer and
//! scene model have no GPU or window dependencies; `app` and `gpu` wire them
//! into eframe and wgpu.

pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod explorer;
pub mod gpu;
pub mod scene;
pub mod theme;
pub mod viewport;

// Re-export commonly used types
pub use app::ViewerApp;
pub use config::ViewerConfig;
pub use error::ViewerError;
pub use explorer::PartExplorer;
