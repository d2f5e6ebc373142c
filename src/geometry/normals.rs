//! Smooth-normal synthesis for sources that omit normals.
//!
//! Explicit two-pass algorithm over the deduplicated vertex set: accumulate
//! the unnormalized face cross product into each corner vertex, then
//! normalize every accumulator. The unnormalized cross product's magnitude
//! is proportional to triangle area, so larger faces weigh more. Normals
//! supplied by the source are never overwritten; loaders only call this when
//! the source had none at all.

use cgmath::{InnerSpace, Vector3};

use crate::assets::Vertex;

/// Computes smooth per-vertex normals in place.
///
/// Degenerate (zero-area) triangles contribute a zero vector; a vertex whose
/// adjacent faces are all degenerate ends up with an exactly zero normal
/// rather than NaN.
pub fn synthesize_normals(vertices: &mut [Vertex], indices: &[u32]) {
    let mut accumulated = vec![Vector3::new(0.0f32, 0.0, 0.0); vertices.len()];

    for triangle in indices.chunks_exact(3) {
        let i0 = triangle[0] as usize;
        let i1 = triangle[1] as usize;
        let i2 = triangle[2] as usize;

        let p0 = Vector3::from(vertices[i0].position);
        let p1 = Vector3::from(vertices[i1].position);
        let p2 = Vector3::from(vertices[i2].position);

        // Unnormalized on purpose: magnitude carries the area weight.
        let face_normal = (p1 - p0).cross(p2 - p0);

        accumulated[i0] += face_normal;
        accumulated[i1] += face_normal;
        accumulated[i2] += face_normal;
    }

    for (vertex, accumulator) in vertices.iter_mut().zip(&accumulated) {
        vertex.normal = normalize_or_zero(*accumulator);
    }
}

fn normalize_or_zero(vector: Vector3<f32>) -> [f32; 3] {
    let length_squared = vector.magnitude2();
    if length_squared > 0.0 {
        (vector / length_squared.sqrt()).into()
    } else {
        [0.0; 3]
    }
}
