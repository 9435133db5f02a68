//! Panels making up the viewer window

mod explorer;
mod viewport;

pub use explorer::{ExplorerAction, ExplorerPanel};
pub use viewport::{ViewportModel, ViewportPanel};
