//! CPU-side mesh data for loaded parts

use std::collections::HashSet;

use bytemuck::{Pod, Zeroable};
use glam::Vec3;

/// Index of a mesh inside a `MeshLibrary`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshId(pub usize);

#[repr(C)]
#[derive(Debug, Copy, Clone, Pod, Zeroable, PartialEq)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

/// Triangle mesh plus the line list used for wireframe drawing
#[derive(Debug, Clone)]
pub struct MeshData {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u32>,
    pub edge_indices: Vec<u32>,
}

impl MeshData {
    pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>) -> Self {
        let edge_indices = edge_indices(&indices);
        Self {
            vertices,
            indices,
            edge_indices,
        }
    }

    /// Build from positions, computing smooth normals when none are given
    pub fn from_positions(positions: Vec<[f32; 3]>, normals: Option<Vec<[f32; 3]>>, indices: Vec<u32>) -> Self {
        let normals = match normals {
            Some(normals) if normals.len() == positions.len() => normals,
            _ => compute_normals(&positions, &indices),
        };
        let vertices = positions
            .into_iter()
            .zip(normals)
            .map(|(position, normal)| Vertex { position, normal })
            .collect();
        Self::new(vertices, indices)
    }

    /// Axis-aligned square in the XZ plane, facing +Y
    pub fn plane(size: f32) -> Self {
        let h = size / 2.0;
        let up = [0.0, 1.0, 0.0];
        let vertices = vec![
            Vertex { position: [-h, 0.0, -h], normal: up },
            Vertex { position: [h, 0.0, -h], normal: up },
            Vertex { position: [h, 0.0, h], normal: up },
            Vertex { position: [-h, 0.0, h], normal: up },
        ];
        Self::new(vertices, vec![0, 2, 1, 0, 3, 2])
    }
}

/// Unique undirected edges of a triangle list, as a line list
pub fn edge_indices(indices: &[u32]) -> Vec<u32> {
    let mut seen = HashSet::new();
    let mut edges = Vec::new();
    for tri in indices.chunks_exact(3) {
        for (a, b) in [(tri[0], tri[1]), (tri[1], tri[2]), (tri[2], tri[0])] {
            let key = if a < b { (a, b) } else { (b, a) };
            if seen.insert(key) {
                edges.push(a);
                edges.push(b);
            }
        }
    }
    edges
}

fn compute_normals(positions: &[[f32; 3]], indices: &[u32]) -> Vec<[f32; 3]> {
    let mut accum = vec![Vec3::ZERO; positions.len()];
    for tri in indices.chunks_exact(3) {
        let [a, b, c] = [tri[0] as usize, tri[1] as usize, tri[2] as usize];
        if a >= positions.len() || b >= positions.len() || c >= positions.len() {
            continue;
        }
        let pa = Vec3::from(positions[a]);
        let face = (Vec3::from(positions[b]) - pa).cross(Vec3::from(positions[c]) - pa);
        accum[a] += face;
        accum[b] += face;
        accum[c] += face;
    }
    accum
        .into_iter()
        .map(|n| n.try_normalize().unwrap_or(Vec3::Y).to_array())
        .collect()
}

/// All meshes of a loaded model
#[derive(Debug, Clone, Default)]
pub struct MeshLibrary {
    meshes: Vec<MeshData>,
}

impl MeshLibrary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, mesh: MeshData) -> MeshId {
        let id = MeshId(self.meshes.len());
        self.meshes.push(mesh);
        id
    }

    pub fn iter(&self) -> impl Iterator<Item = (MeshId, &MeshData)> {
        self.meshes.iter().enumerate().map(|(i, m)| (MeshId(i), m))
    }

    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shared_edges_are_emitted_once() {
        // Two triangles sharing the 0-2 diagonal
        let edges = edge_indices(&[0, 1, 2, 0, 2, 3]);
        assert_eq!(edges.len() / 2, 5);
    }

    #[test]
    fn test_missing_normals_are_computed() {
        let mesh = MeshData::from_positions(
            vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            None,
            vec![0, 1, 2],
        );
        for vertex in &mesh.vertices {
            assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
        }
        assert_eq!(mesh.indices, vec![0, 1, 2]);
    }
}
