//! Indexed-to-flat geometry expansion.
//!
//! Some downstream consumers want fully self-contained per-triangle vertex
//! data rather than shared, indexed vertices. Flattening emits one vertex
//! copy per original index occurrence, in index order, and rewrites the
//! index list to the identity sequence. It deliberately reintroduces
//! duplicates, so it must run last, after deduplication, normal synthesis,
//! material classification and light extraction.

use crate::assets::Vertex;

/// Expands indexed geometry into non-indexed, one-vertex-per-corner form.
///
/// Purely a memory-layout transform; no attribute changes. Idempotent in
/// shape: an already-flat pair (`indices == 0..n`, `vertices.len() == n`)
/// comes out unchanged.
pub fn flatten_vertices(vertices: &mut Vec<Vertex>, indices: &mut Vec<u32>) {
    let flattened: Vec<Vertex> = indices
        .iter()
        .map(|&index| vertices[index as usize])
        .collect();

    *indices = (0..flattened.len() as u32).collect();
    *vertices = flattened;
}
