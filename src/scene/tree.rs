//! Node arena for the loaded model hierarchy
//!
//! Nodes are addressed by stable `NodeId` indices. Parents are stored as
//! plain indices so the tree has a single owner and no reference cycles.

use std::fmt;

use glam::Mat4;
use serde::{Deserialize, Serialize};

use super::material::MaterialId;
use super::mesh::MeshId;

/// Stable index of a node inside a `SceneTree`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct NodeId(pub usize);

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// What a node carries, decided once when the tree is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeKind {
    /// Pure transform node, traversed but never drawn
    Group,
    /// Drawable part backed by a mesh in the `MeshLibrary`
    Mesh { mesh: MeshId },
}

/// Visual state a mesh node was last put in by the highlight controller
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum HighlightState {
    #[default]
    Neutral,
    Highlighted,
    Dimmed,
}

/// One element of the model hierarchy
#[derive(Debug, Clone)]
pub struct SceneNode {
    pub name: String,
    pub parent: Option<NodeId>,
    pub children: Vec<NodeId>,
    pub kind: NodeKind,
    pub transform: Mat4,
    /// Material currently used for drawing (mesh nodes only)
    pub material: Option<MaterialId>,
    /// Original material, captured on first paint and never replaced
    pub saved_material: Option<MaterialId>,
    pub highlight: HighlightState,
}

impl SceneNode {
    pub fn is_mesh(&self) -> bool {
        matches!(self.kind, NodeKind::Mesh { .. })
    }
}

/// Arena holding the whole hierarchy; index 0 is always the root
#[derive(Debug, Clone)]
pub struct SceneTree {
    nodes: Vec<SceneNode>,
}

impl SceneTree {
    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &SceneNode {
        &self.nodes[id.0]
    }

    pub fn node_mut(&mut self, id: NodeId) -> &mut SceneNode {
        &mut self.nodes[id.0]
    }

    /// Children in authoring order (empty for leaves)
    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.nodes[id.0].children
    }

    /// Display name, possibly empty
    pub fn label(&self, id: NodeId) -> &str {
        &self.nodes[id.0].name
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].parent
    }

    /// Local transforms composed from the root down to `id`
    pub fn world_transform(&self, id: NodeId) -> Mat4 {
        let mut transform = self.nodes[id.0].transform;
        let mut current = self.nodes[id.0].parent;
        while let Some(parent) = current {
            transform = self.nodes[parent.0].transform * transform;
            current = self.nodes[parent.0].parent;
        }
        transform
    }

    /// All drawable nodes with their mesh ids
    pub fn mesh_nodes(&self) -> impl Iterator<Item = (NodeId, MeshId)> + '_ {
        self.nodes.iter().enumerate().filter_map(|(index, node)| match node.kind {
            NodeKind::Mesh { mesh } => Some((NodeId(index), mesh)),
            NodeKind::Group => None,
        })
    }

    pub fn ids(&self) -> impl Iterator<Item = NodeId> {
        (0..self.nodes.len()).map(NodeId)
    }
}

/// Builds a `SceneTree` while keeping parent and child links consistent
#[derive(Debug)]
pub struct SceneTreeBuilder {
    nodes: Vec<SceneNode>,
}

impl SceneTreeBuilder {
    /// Start a tree whose root is an unnamed group
    pub fn new() -> Self {
        Self::with_root("")
    }

    pub fn with_root(name: &str) -> Self {
        Self {
            nodes: vec![SceneNode {
                name: name.to_string(),
                parent: None,
                children: Vec::new(),
                kind: NodeKind::Group,
                transform: Mat4::IDENTITY,
                material: None,
                saved_material: None,
                highlight: HighlightState::Neutral,
            }],
        }
    }

    pub fn root(&self) -> NodeId {
        NodeId(0)
    }

    pub fn add_group(&mut self, parent: NodeId, name: &str, transform: Mat4) -> NodeId {
        self.push(parent, name, NodeKind::Group, transform, None)
    }

    pub fn add_mesh(
        &mut self,
        parent: NodeId,
        name: &str,
        transform: Mat4,
        mesh: MeshId,
        material: MaterialId,
    ) -> NodeId {
        self.push(parent, name, NodeKind::Mesh { mesh }, transform, Some(material))
    }

    fn push(
        &mut self,
        parent: NodeId,
        name: &str,
        kind: NodeKind,
        transform: Mat4,
        material: Option<MaterialId>,
    ) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(SceneNode {
            name: name.to_string(),
            parent: Some(parent),
            children: Vec::new(),
            kind,
            transform,
            material,
            saved_material: None,
            highlight: HighlightState::Neutral,
        });
        self.nodes[parent.0].children.push(id);
        id
    }

    pub fn build(self) -> SceneTree {
        SceneTree { nodes: self.nodes }
    }
}

impl Default for SceneTreeBuilder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use glam::Vec3;

    #[test]
    fn test_children_keep_authoring_order() {
        let mut builder = SceneTreeBuilder::new();
        let root = builder.root();
        let b = builder.add_group(root, "B", Mat4::IDENTITY);
        let a = builder.add_group(root, "A", Mat4::IDENTITY);
        let tree = builder.build();

        assert_eq!(tree.children(tree.root()), &[b, a]);
        assert_eq!(tree.label(b), "B");
        assert_eq!(tree.parent(a), Some(tree.root()));
        assert!(tree.children(a).is_empty());
    }

    #[test]
    fn test_empty_label_is_allowed() {
        let mut builder = SceneTreeBuilder::new();
        let root = builder.root();
        let unnamed = builder.add_group(root, "", Mat4::IDENTITY);
        let tree = builder.build();
        assert_eq!(tree.label(unnamed), "");
    }

    #[test]
    fn test_world_transform_composes_parents() {
        let mut builder = SceneTreeBuilder::new();
        let root = builder.root();
        let outer = builder.add_group(root, "outer", Mat4::from_translation(Vec3::X));
        let inner = builder.add_group(outer, "inner", Mat4::from_translation(Vec3::Y));
        let tree = builder.build();

        let world = tree.world_transform(inner);
        let origin = world.transform_point3(Vec3::ZERO);
        assert!((origin - Vec3::new(1.0, 1.0, 0.0)).length() < 1e-6);
    }
}
