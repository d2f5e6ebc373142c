//! # Model Assembly
//!
//! The immutable bundle produced by the pipeline: deduplicated (and usually
//! re-flattened) vertices, triangle indices, classified materials, extracted
//! lights and an optional analytic descriptor. A model is constructed once,
//! fully populated; afterwards it only changes through [`Model::transform`]
//! (rigid/affine update of positions and normals) or
//! [`Model::set_material`] (single-material replacement).

use cgmath::{Matrix, Matrix4, SquareMatrix, Vector4};
use log::warn;

use crate::assets::light::LightObject;
use crate::assets::material::Material;
use crate::assets::procedural::ProceduralShape;
use crate::assets::vertex::Vertex;
use crate::error::AssetError;

/// A fully prepared model, ready for upload into GPU-resident vertex, index
/// and material buffers.
///
/// Invariants, upheld by every constructor in this crate:
/// - every index is `< vertices.len()`
/// - every vertex's `material_index` is `< materials.len()`
/// - `indices.len()` is a multiple of 3
#[derive(Debug)]
pub struct Model {
    vertices: Vec<Vertex>,
    indices: Vec<u32>,
    materials: Vec<Material>,
    lights: Vec<LightObject>,
    procedural: Option<ProceduralShape>,
}

impl Model {
    pub fn new(
        vertices: Vec<Vertex>,
        indices: Vec<u32>,
        materials: Vec<Material>,
        lights: Vec<LightObject>,
        procedural: Option<ProceduralShape>,
    ) -> Self {
        debug_assert!(indices.len() % 3 == 0);
        debug_assert!(indices.iter().all(|&index| (index as usize) < vertices.len()));
        debug_assert!(vertices
            .iter()
            .all(|vertex| (vertex.material_index as usize) < materials.len()));

        Self {
            vertices,
            indices,
            materials,
            lights,
            procedural,
        }
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    pub fn indices(&self) -> &[u32] {
        &self.indices
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    pub fn lights(&self) -> &[LightObject] {
        &self.lights
    }

    /// The analytic intersection shortcut, present only for primitives
    /// generated with the procedural flag.
    pub fn procedural(&self) -> Option<ProceduralShape> {
        self.procedural
    }

    pub fn triangle_count(&self) -> usize {
        self.indices.len() / 3
    }

    /// Applies an affine transform to every vertex, in place.
    ///
    /// Positions go through the matrix homogeneously (no perspective
    /// divide); normals go through the inverse-transpose of it, which keeps
    /// them perpendicular under non-uniform scale. Normals are not
    /// re-normalized here.
    pub fn transform(&mut self, matrix: Matrix4<f32>) {
        let normal_matrix = match matrix.invert() {
            Some(inverse) => inverse.transpose(),
            None => {
                warn!("singular transform; normals transformed without inverse-transpose");
                matrix
            }
        };

        for vertex in &mut self.vertices {
            let [x, y, z] = vertex.position;
            let position = matrix * Vector4::new(x, y, z, 1.0);
            vertex.position = [position.x, position.y, position.z];

            let [nx, ny, nz] = vertex.normal;
            let normal = normal_matrix * Vector4::new(nx, ny, nz, 0.0);
            vertex.normal = [normal.x, normal.y, normal.z];
        }
    }

    /// Replaces the model's sole material.
    ///
    /// Fails with [`AssetError::MultiMaterial`] if the model holds anything
    /// other than exactly one material.
    pub fn set_material(&mut self, material: Material) -> Result<(), AssetError> {
        if self.materials.len() != 1 {
            return Err(AssetError::MultiMaterial {
                count: self.materials.len(),
            });
        }

        self.materials[0] = material;
        Ok(())
    }
}
