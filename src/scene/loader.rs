//! glTF/GLB asset loading
//!
//! Converts a glTF document into the node arena plus mesh and material
//! libraries. Loading runs on a worker thread; the UI polls the job each frame.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::mpsc::{self, Receiver, TryRecvError};
use std::thread;

use glam::Mat4;
use log::{debug, info, warn};

use super::material::{Material, MaterialId, MaterialLibrary};
use super::mesh::{MeshData, MeshLibrary};
use super::tree::{NodeId, SceneTree, SceneTreeBuilder};
use crate::error::ViewerError;

/// Everything the viewer needs from a loaded asset
#[derive(Debug, Clone)]
pub struct LoadedModel {
    pub source: PathBuf,
    pub tree: SceneTree,
    pub meshes: MeshLibrary,
    pub materials: MaterialLibrary,
}

/// Load a model from disk
pub fn load_model(path: &Path) -> Result<LoadedModel, ViewerError> {
    info!("Loading model {}", path.display());
    let (document, buffers, _images) = gltf::import(path).map_err(|e| ViewerError::LoadFailure {
        path: path.to_path_buf(),
        reason: e.to_string(),
    })?;
    build_model(path, &document, &buffers)
}

/// Load a model from in-memory glTF JSON or GLB bytes
pub fn load_model_from_slice(bytes: &[u8], origin: &Path) -> Result<LoadedModel, ViewerError> {
    let (document, buffers, _images) = gltf::import_slice(bytes).map_err(|e| ViewerError::LoadFailure {
        path: origin.to_path_buf(),
        reason: e.to_string(),
    })?;
    build_model(origin, &document, &buffers)
}

fn build_model(
    path: &Path,
    document: &gltf::Document,
    buffers: &[gltf::buffer::Data],
) -> Result<LoadedModel, ViewerError> {
    let scene = document
        .default_scene()
        .or_else(|| document.scenes().next())
        .ok_or_else(|| ViewerError::LoadFailure {
            path: path.to_path_buf(),
            reason: "document contains no scenes".to_string(),
        })?;

    let mut builder = SceneTreeBuilder::with_root(scene.name().unwrap_or("Scene"));
    let mut meshes = MeshLibrary::new();
    let mut materials = MaterialLibrary::new();
    let mut material_ids: HashMap<Option<usize>, MaterialId> = HashMap::new();

    let root = builder.root();
    let mut stack: Vec<(gltf::Node, NodeId)> = scene.nodes().map(|n| (n, root)).collect();
    stack.reverse();

    while let Some((gltf_node, parent)) = stack.pop() {
        let name = gltf_node.name().unwrap_or("");
        let transform = Mat4::from_cols_array_2d(&gltf_node.transform().matrix());

        let id = match gltf_node.mesh() {
            Some(mesh) => add_mesh_node(
                &mut builder,
                parent,
                name,
                transform,
                &mesh,
                buffers,
                &mut meshes,
                &mut materials,
                &mut material_ids,
            ),
            None => builder.add_group(parent, name, transform),
        };

        let children: Vec<_> = gltf_node.children().collect();
        stack.extend(children.into_iter().rev().map(|child| (child, id)));
    }

    let tree = builder.build();
    info!(
        "Loaded {} nodes, {} meshes, {} materials from {}",
        tree.len(),
        meshes.len(),
        materials.len(),
        path.display()
    );

    Ok(LoadedModel {
        source: path.to_path_buf(),
        tree,
        meshes,
        materials,
    })
}

/// Single-primitive meshes become one mesh node; multi-primitive meshes
/// become a group with one mesh child per primitive.
#[allow(clippy::too_many_arguments)]
fn add_mesh_node(
    builder: &mut SceneTreeBuilder,
    parent: NodeId,
    name: &str,
    transform: Mat4,
    mesh: &gltf::Mesh,
    buffers: &[gltf::buffer::Data],
    meshes: &mut MeshLibrary,
    materials: &mut MaterialLibrary,
    material_ids: &mut HashMap<Option<usize>, MaterialId>,
) -> NodeId {
    let mut parts = Vec::new();
    for primitive in mesh.primitives() {
        if primitive.mode() != gltf::mesh::Mode::Triangles {
            warn!("Skipping non-triangle primitive in mesh '{}'", mesh.name().unwrap_or(name));
            continue;
        }
        match read_primitive(&primitive, buffers) {
            Some(data) => {
                let material = material_for(&primitive.material(), materials, material_ids);
                parts.push((meshes.add(data), material));
            }
            None => warn!("Primitive in mesh '{}' has no positions", mesh.name().unwrap_or(name)),
        }
    }

    match parts.as_slice() {
        [(mesh_id, material)] => builder.add_mesh(parent, name, transform, *mesh_id, *material),
        _ => {
            let group = builder.add_group(parent, name, transform);
            let base = mesh.name().unwrap_or(name);
            for (i, (mesh_id, material)) in parts.iter().enumerate() {
                let part_name = format!("{}_{}", base, i + 1);
                builder.add_mesh(group, &part_name, Mat4::IDENTITY, *mesh_id, *material);
            }
            group
        }
    }
}

fn read_primitive(primitive: &gltf::Primitive, buffers: &[gltf::buffer::Data]) -> Option<MeshData> {
    let reader = primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));
    let positions: Vec<[f32; 3]> = reader.read_positions()?.collect();
    let normals = reader.read_normals().map(|normals| normals.collect::<Vec<_>>());
    let indices: Vec<u32> = match reader.read_indices() {
        Some(indices) => indices.into_u32().collect(),
        None => (0..positions.len() as u32).collect(),
    };
    debug!("Read primitive with {} vertices, {} indices", positions.len(), indices.len());
    Some(MeshData::from_positions(positions, normals, indices))
}

fn material_for(
    material: &gltf::Material,
    library: &mut MaterialLibrary,
    ids: &mut HashMap<Option<usize>, MaterialId>,
) -> MaterialId {
    *ids.entry(material.index()).or_insert_with(|| {
        let pbr = material.pbr_metallic_roughness();
        let base_color = pbr.base_color_factor();
        let transparent = material.alpha_mode() == gltf::material::AlphaMode::Blend;
        library.add(Material {
            base_color,
            metallic: pbr.metallic_factor(),
            roughness: pbr.roughness_factor(),
            transparent,
            wireframe: false,
        })
    })
}

/// Background load of a model, polled from the UI thread
pub struct ModelLoadJob {
    path: PathBuf,
    receiver: Receiver<Result<LoadedModel, ViewerError>>,
}

impl ModelLoadJob {
    pub fn spawn(path: PathBuf) -> Self {
        let (sender, receiver) = mpsc::channel();
        let worker_path = path.clone();
        thread::spawn(move || {
            let result = load_model(&worker_path);
            // The UI may have gone away; nothing to do then
            let _ = sender.send(result);
        });
        Self { path, receiver }
    }

    /// Returns the result once the worker has finished
    pub fn poll(&self) -> Option<Result<LoadedModel, ViewerError>> {
        match self.receiver.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => None,
            Err(TryRecvError::Disconnected) => Some(Err(ViewerError::LoadFailure {
                path: self.path.clone(),
                reason: "loader thread exited without a result".to_string(),
            })),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const HIERARCHY_ONLY: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [ { "name": "Positron", "nodes": [0] } ],
        "nodes": [
            { "name": "Chair", "children": [1, 2] },
            { "name": "Seat", "children": [3] },
            { },
            { "name": "Cushion", "translation": [0.0, 2.0, 0.0] }
        ]
    }"#;

    #[test]
    fn test_hierarchy_is_preserved() {
        let model = load_model_from_slice(HIERARCHY_ONLY.as_bytes(), Path::new("inline.gltf")).unwrap();
        let tree = &model.tree;

        assert_eq!(tree.label(tree.root()), "Positron");
        let top = tree.children(tree.root());
        assert_eq!(top.len(), 1);
        let chair = top[0];
        assert_eq!(tree.label(chair), "Chair");

        let parts: Vec<&str> = tree.children(chair).iter().map(|&id| tree.label(id)).collect();
        assert_eq!(parts, vec!["Seat", ""]);

        let seat = tree.children(chair)[0];
        let cushion = tree.children(seat)[0];
        let origin = tree.world_transform(cushion).transform_point3(glam::Vec3::ZERO);
        assert!((origin.y - 2.0).abs() < 1e-6);
        assert!(model.meshes.is_empty());
    }

    // One triangle with no index accessor and a blended material
    const UNINDEXED_TRIANGLE: &str = r#"{
        "asset": { "version": "2.0" },
        "scene": 0,
        "scenes": [ { "nodes": [0] } ],
        "nodes": [ { "name": "Panel", "mesh": 0 } ],
        "meshes": [ { "primitives": [ { "attributes": { "POSITION": 0 }, "material": 0 } ] } ],
        "materials": [
            { "alphaMode": "BLEND", "pbrMetallicRoughness": { "baseColorFactor": [0.2, 0.4, 0.6, 0.5] } }
        ],
        "accessors": [
            { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3",
              "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] }
        ],
        "bufferViews": [ { "buffer": 0, "byteLength": 36 } ],
        "buffers": [
            { "byteLength": 36, "uri": "data:application/octet-stream;base64,AAAAAAAAAAAAAAAAAACAPwAAAAAAAAAAAAAAAAAAgD8AAAAA" }
        ]
    }"#;

    #[test]
    fn test_unindexed_primitive_uses_vertex_order() {
        let model = load_model_from_slice(UNINDEXED_TRIANGLE.as_bytes(), Path::new("inline.gltf")).unwrap();
        assert_eq!(model.meshes.len(), 1);

        let (_, mesh) = model.meshes.iter().next().unwrap();
        assert_eq!(mesh.indices, vec![0, 1, 2]);
        assert_eq!(mesh.edge_indices.len(), 6);
        assert_eq!(mesh.vertices[0].normal, [0.0, 0.0, 1.0]);

        let tree = &model.tree;
        let panel = tree.children(tree.root())[0];
        assert_eq!(tree.label(panel), "Panel");
        let material = model.materials.get(tree.node(panel).material.unwrap());
        assert!(material.transparent);
        assert!((material.effective_alpha() - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_missing_file_is_load_failure() {
        let result = load_model(Path::new("definitely/not/here.glb"));
        match result {
            Err(ViewerError::LoadFailure { path, .. }) => {
                assert_eq!(path, PathBuf::from("definitely/not/here.glb"));
            }
            other => panic!("Expected LoadFailure, got {:?}", other.map(|m| m.tree.len())),
        }
    }

    #[test]
    fn test_garbage_bytes_are_load_failure() {
        let result = load_model_from_slice(b"not a gltf file", Path::new("garbage.glb"));
        assert!(matches!(result, Err(ViewerError::LoadFailure { .. })));
    }

    #[test]
    fn test_background_job_reports_failure() {
        let job = ModelLoadJob::spawn(PathBuf::from("definitely/not/here.glb"));
        let result = loop {
            if let Some(result) = job.poll() {
                break result;
            }
            std::thread::sleep(std::time::Duration::from_millis(5));
        };
        assert!(result.is_err());
    }
}
