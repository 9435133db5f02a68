//! Loaded model data: node hierarchy, meshes and materials

pub mod loader;
pub mod material;
pub mod mesh;
pub mod tree;

pub use loader::{load_model, load_model_from_slice, LoadedModel, ModelLoadJob};
pub use material::{Material, MaterialId, MaterialLibrary};
pub use mesh::{MeshData, MeshId, MeshLibrary, Vertex};
pub use tree::{HighlightState, NodeId, NodeKind, SceneNode, SceneTree, SceneTreeBuilder};
