//! Per-frame snapshot handed to the GPU callback

use glam::{Mat4, Vec3};

use super::camera::Camera3D;
use super::environment::SceneEnvironment;
use crate::scene::{Material, MaterialLibrary, MeshId, SceneTree};

/// One mesh to draw with its world matrix and resolved material
#[derive(Debug, Clone, PartialEq)]
pub struct DrawItem {
    pub mesh: MeshId,
    pub model: Mat4,
    pub material: Material,
}

/// Immutable view of the scene for one frame
#[derive(Debug, Clone)]
pub struct FrameScene {
    pub view_proj: Mat4,
    pub inv_view_proj: Mat4,
    pub camera_position: Vec3,
    pub environment: SceneEnvironment,
    /// Opaque draws first, then translucent draws back to front
    pub draws: Vec<DrawItem>,
}

impl FrameScene {
    /// Snapshot with nothing but the sky and floor
    pub fn empty(camera: &Camera3D, environment: &SceneEnvironment) -> Self {
        let view_proj = camera.build_view_projection_matrix();
        Self {
            view_proj,
            inv_view_proj: view_proj.inverse(),
            camera_position: camera.position,
            environment: environment.clone(),
            draws: Vec::new(),
        }
    }

    pub fn build(
        camera: &Camera3D,
        environment: &SceneEnvironment,
        tree: &SceneTree,
        materials: &MaterialLibrary,
    ) -> Self {
        let mut frame = Self::empty(camera, environment);

        let mut opaque = Vec::new();
        let mut translucent = Vec::new();
        for (node, mesh) in tree.mesh_nodes() {
            let Some(material_id) = tree.node(node).material else {
                continue;
            };
            let material = *materials.get(material_id);
            let item = DrawItem {
                mesh,
                model: tree.world_transform(node),
                material,
            };
            if material.transparent || material.wireframe {
                let distance = item.model.transform_point3(Vec3::ZERO).distance_squared(camera.position);
                translucent.push((distance, item));
            } else {
                opaque.push(item);
            }
        }

        translucent.sort_by(|a, b| b.0.total_cmp(&a.0));
        frame.draws = opaque;
        frame.draws.extend(translucent.into_iter().map(|(_, item)| item));
        frame
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scene::{MeshId, SceneTreeBuilder};

    #[test]
    fn test_dimmed_parts_draw_after_opaque_parts() {
        let mut materials = MaterialLibrary::new();
        let solid = materials.add(Material::opaque([0.5, 0.5, 0.5, 1.0]));

        let mut builder = SceneTreeBuilder::new();
        let root = builder.root();
        let near = builder.add_mesh(root, "near", Mat4::from_translation(Vec3::new(0.0, 0.0, 4.0)), MeshId(0), solid);
        let far = builder.add_mesh(root, "far", Mat4::from_translation(Vec3::new(0.0, 0.0, -4.0)), MeshId(1), solid);
        builder.add_mesh(root, "kept", Mat4::IDENTITY, MeshId(2), solid);
        let mut tree = builder.build();
        tree.node_mut(near).material = Some(MaterialLibrary::DIMMED);
        tree.node_mut(far).material = Some(MaterialLibrary::DIMMED);

        let frame = FrameScene::build(&Camera3D::default(), &SceneEnvironment::default(), &tree, &materials);

        assert_eq!(frame.draws.len(), 3);
        assert!(!frame.draws[0].material.transparent);
        assert!(frame.draws[1].material.transparent);
        assert_eq!(frame.draws[0].mesh, MeshId(2));
        // Back to front: the far part first
        assert_eq!(frame.draws[1].mesh, MeshId(1));
        assert_eq!(frame.draws[2].mesh, MeshId(0));
    }
}
