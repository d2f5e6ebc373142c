//! # Vertex Data Structure
//!
//! This module defines the vertex format shared by every stage of the asset
//! pipeline, from source-file extraction through deduplication to the final
//! GPU-ready buffers.
//!
//! A vertex carries position, normal, texture coordinate and the index of
//! the material it shades with. Equality and hashing cover the exact tuple
//! of all four fields, bit-for-bit, which is what makes the vertex usable as
//! a deduplication key: two face corners collapse only when every attribute
//! matches.

use std::hash::{Hash, Hasher};

/// A single face-corner vertex.
///
/// # Memory Layout
///
/// The `#[repr(C)]` attribute ensures the struct has a C-compatible memory
/// layout, which is required for GPU buffer operations.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    /// 3D position coordinates [x, y, z]
    pub position: [f32; 3],
    /// 3D normal vector [nx, ny, nz]
    pub normal: [f32; 3],
    /// Texture coordinates [u, v]
    pub tex_coord: [f32; 2],
    /// Index into the owning model's material list
    pub material_index: i32,
}

impl Vertex {
    pub fn new(
        position: [f32; 3],
        normal: [f32; 3],
        tex_coord: [f32; 2],
        material_index: i32,
    ) -> Self {
        Self {
            position,
            normal,
            tex_coord,
            material_index,
        }
    }

    /// Returns the vertex buffer layout for wgpu rendering.
    ///
    /// # Returns
    ///
    /// A [`wgpu::VertexBufferLayout`] that describes:
    /// - Attribute 0: Position (Float32x3) at shader location 0
    /// - Attribute 1: Normal (Float32x3) at shader location 1
    /// - Attribute 2: Texture coordinates (Float32x2) at shader location 2
    /// - Attribute 3: Material index (Sint32) at shader location 3
    pub fn desc() -> wgpu::VertexBufferLayout<'static> {
        use std::mem;
        wgpu::VertexBufferLayout {
            array_stride: mem::size_of::<Vertex>() as wgpu::BufferAddress,
            step_mode: wgpu::VertexStepMode::Vertex,
            attributes: &[
                wgpu::VertexAttribute {
                    offset: 0,
                    shader_location: 0,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: mem::size_of::<[f32; 3]>() as wgpu::BufferAddress,
                    shader_location: 1,
                    format: wgpu::VertexFormat::Float32x3,
                },
                wgpu::VertexAttribute {
                    offset: (2 * mem::size_of::<[f32; 3]>()) as wgpu::BufferAddress,
                    shader_location: 2,
                    format: wgpu::VertexFormat::Float32x2,
                },
                wgpu::VertexAttribute {
                    offset: (2 * mem::size_of::<[f32; 3]>() + mem::size_of::<[f32; 2]>())
                        as wgpu::BufferAddress,
                    shader_location: 3,
                    format: wgpu::VertexFormat::Sint32,
                },
            ],
        }
    }

    /// Raw bit pattern of every field, in declaration order. Equality and
    /// hashing are defined over these bits so that NaN payloads and signed
    /// zeros behave consistently between the two.
    fn bits(&self) -> [u32; 9] {
        [
            self.position[0].to_bits(),
            self.position[1].to_bits(),
            self.position[2].to_bits(),
            self.normal[0].to_bits(),
            self.normal[1].to_bits(),
            self.normal[2].to_bits(),
            self.tex_coord[0].to_bits(),
            self.tex_coord[1].to_bits(),
            self.material_index as u32,
        ]
    }
}

impl PartialEq for Vertex {
    fn eq(&self, other: &Self) -> bool {
        self.bits() == other.bits()
    }
}

impl Eq for Vertex {}

impl Hash for Vertex {
    fn hash<H: Hasher>(&self, state: &mut H) {
        // Golden-ratio XOR/shift combine over all four fields. Keeping the
        // material index in the mix is load-bearing: vertices differing only
        // in material must not collapse during deduplication.
        let mut combined = 0u64;
        for bits in self.bits() {
            combined = combine(combined, bits as u64);
        }
        state.write_u64(combined);
    }
}

fn combine(h0: u64, h1: u64) -> u64 {
    h0 ^ h1
        .wrapping_add(0x9e37_79b9)
        .wrapping_add(h0 << 6)
        .wrapping_add(h0 >> 2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::hash_map::DefaultHasher;

    fn hash_of(vertex: &Vertex) -> u64 {
        let mut hasher = DefaultHasher::new();
        vertex.hash(&mut hasher);
        hasher.finish()
    }

    #[test]
    fn test_equal_tuples_match() {
        let a = Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.5, 0.5], 2);
        let b = Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.5, 0.5], 2);
        assert_eq!(a, b);
        assert_eq!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_material_index_distinguishes() {
        let a = Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.5, 0.5], 0);
        let b = Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.5, 0.5], 1);
        assert_ne!(a, b);
        assert_ne!(hash_of(&a), hash_of(&b));
    }

    #[test]
    fn test_normal_distinguishes() {
        let a = Vertex::new([1.0, 2.0, 3.0], [0.0, 1.0, 0.0], [0.5, 0.5], 0);
        let b = Vertex::new([1.0, 2.0, 3.0], [1.0, 0.0, 0.0], [0.5, 0.5], 0);
        assert_ne!(a, b);
    }

    #[test]
    fn test_buffer_layout() {
        let layout = Vertex::desc();
        assert_eq!(layout.array_stride, 36); // 3 + 3 + 2 floats + 1 int
        assert_eq!(layout.attributes.len(), 4);
        assert_eq!(layout.attributes[3].offset, 32);
        assert_eq!(layout.attributes[3].format, wgpu::VertexFormat::Sint32);
    }
}
