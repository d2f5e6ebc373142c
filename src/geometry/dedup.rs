//! Vertex deduplication.
//!
//! Canonicalizes a stream of face-corner vertex tuples into a compact unique
//! set with a stable index remapping. The map is keyed by the full vertex
//! tuple (position, normal, texture coordinate, material index), so corners
//! collapse only when every attribute matches bit-for-bit; the `HashMap`
//! performs an explicit equality check on hash collision, so correctness
//! never rests on the hash alone.
//!
//! When a source provides no normals, corners enter with a zero placeholder
//! normal and deduplication must run *before* normal synthesis: synthesized
//! normals diverge per vertex and would otherwise split positions that
//! should share a slot. Callers must not deduplicate again afterwards.

use std::collections::HashMap;

use crate::assets::Vertex;

/// Builds the unique-vertex list in first-seen order.
#[derive(Debug, Default)]
pub struct VertexDeduplicator {
    lookup: HashMap<Vertex, u32>,
    vertices: Vec<Vertex>,
}

impl VertexDeduplicator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            lookup: HashMap::with_capacity(capacity),
            vertices: Vec::with_capacity(capacity),
        }
    }

    /// Returns the index of `vertex` in the unique list, appending it if it
    /// has not been seen before.
    pub fn insert(&mut self, vertex: Vertex) -> u32 {
        if let Some(&index) = self.lookup.get(&vertex) {
            return index;
        }

        let index = self.vertices.len() as u32;
        self.lookup.insert(vertex, index);
        self.vertices.push(vertex);
        index
    }

    /// Number of unique vertices seen so far.
    pub fn len(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn vertices(&self) -> &[Vertex] {
        &self.vertices
    }

    /// Consumes the deduplicator, yielding the unique vertices in first-seen
    /// order.
    pub fn into_vertices(self) -> Vec<Vertex> {
        self.vertices
    }
}
