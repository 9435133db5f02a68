//! Material library with the shared dimmed placeholder

use serde::{Deserialize, Serialize};

/// Index of a material inside a `MaterialLibrary`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MaterialId(pub usize);

/// Surface appearance of a mesh node
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub base_color: [f32; 4],
    pub metallic: f32,
    pub roughness: f32,
    pub transparent: bool,
    pub wireframe: bool,
}

impl Material {
    /// Translucent white wireframe used for parts outside the hovered branch
    pub const DIMMED: Material = Material {
        base_color: [1.0, 1.0, 1.0, 0.1],
        metallic: 0.0,
        roughness: 1.0,
        transparent: true,
        wireframe: true,
    };

    pub fn opaque(base_color: [f32; 4]) -> Self {
        Self {
            base_color,
            metallic: 0.0,
            roughness: 1.0,
            transparent: false,
            wireframe: false,
        }
    }

    /// Alpha actually used when drawing; base alpha only counts when transparent
    pub fn effective_alpha(&self) -> f32 {
        if self.transparent {
            self.base_color[3]
        } else {
            1.0
        }
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::opaque([0.8, 0.8, 0.8, 1.0])
    }
}

/// All materials of a loaded model; slot 0 is the dimmed material
#[derive(Debug, Clone)]
pub struct MaterialLibrary {
    materials: Vec<Material>,
}

impl MaterialLibrary {
    pub const DIMMED: MaterialId = MaterialId(0);

    pub fn new() -> Self {
        Self {
            materials: vec![Material::DIMMED],
        }
    }

    pub fn add(&mut self, material: Material) -> MaterialId {
        let id = MaterialId(self.materials.len());
        self.materials.push(material);
        id
    }

    pub fn get(&self, id: MaterialId) -> &Material {
        &self.materials[id.0]
    }

    pub fn len(&self) -> usize {
        self.materials.len()
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty()
    }
}

impl Default for MaterialLibrary {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dimmed_slot_is_reserved() {
        let mut library = MaterialLibrary::new();
        let red = library.add(Material::opaque([1.0, 0.0, 0.0, 1.0]));
        assert_ne!(red, MaterialLibrary::DIMMED);
        assert_eq!(*library.get(MaterialLibrary::DIMMED), Material::DIMMED);
        assert!(library.get(MaterialLibrary::DIMMED).wireframe);
    }

    #[test]
    fn test_effective_alpha_follows_transparency() {
        let material = Material::opaque([1.0, 1.0, 1.0, 0.2]);
        assert_eq!(material.effective_alpha(), 1.0);

        let glass = Material {
            transparent: true,
            ..material
        };
        assert!((glass.effective_alpha() - 0.2).abs() < 1e-6);
        assert!((Material::DIMMED.effective_alpha() - 0.1).abs() < 1e-6);
    }
}
