//! # Procedural Primitive Generation
//!
//! Parametric builders for analytic primitives. Both produce the same
//! vertex/index/material shape as loaded models and pass their output
//! through the flattener identically, so downstream stages cannot tell a
//! generated primitive from a file-loaded one.
//!
//! A sphere can additionally be tagged procedural, attaching an analytic
//! descriptor so the renderer can intersect it in closed form instead of
//! walking the mesh.

use std::f32::consts::PI;

use crate::assets::{Material, Model, ProceduralShape, Vertex};
use crate::geometry::flatten::flatten_vertices;

const SPHERE_SLICES: u32 = 32;
const SPHERE_STACKS: u32 = 16;

/// Builds an axis-aligned box spanning the two opposite corners `p0`, `p1`.
///
/// 24 vertices (4 per face, one flat normal each) and 36 indices before
/// flattening; every vertex uses material index 0.
pub fn create_box(p0: [f32; 3], p1: [f32; 3], material: Material) -> Model {
    let (mut vertices, mut indices) = box_geometry(p0, p1);
    flatten_vertices(&mut vertices, &mut indices);
    Model::new(vertices, indices, vec![material], Vec::new(), None)
}

/// Builds a UV sphere around `center`.
///
/// When `procedural` is true the model carries an analytic descriptor for a
/// closed-form intersection shortcut; the triangle mesh is emitted either
/// way.
pub fn create_sphere(
    center: [f32; 3],
    radius: f32,
    material: Material,
    procedural: bool,
) -> Model {
    let (mut vertices, mut indices) = sphere_geometry(center, radius);
    flatten_vertices(&mut vertices, &mut indices);

    let descriptor = procedural.then_some(ProceduralShape::Sphere { center, radius });
    Model::new(vertices, indices, vec![material], Vec::new(), descriptor)
}

/// Raw (pre-flatten) box geometry: 24 vertices, 36 indices.
pub fn box_geometry(p0: [f32; 3], p1: [f32; 3]) -> (Vec<Vertex>, Vec<u32>) {
    let corner = |x: f32, y: f32, z: f32, normal: [f32; 3]| Vertex::new([x, y, z], normal, [0.0; 2], 0);

    let vertices = vec![
        // -X face
        corner(p0[0], p0[1], p0[2], [-1.0, 0.0, 0.0]),
        corner(p0[0], p0[1], p1[2], [-1.0, 0.0, 0.0]),
        corner(p0[0], p1[1], p1[2], [-1.0, 0.0, 0.0]),
        corner(p0[0], p1[1], p0[2], [-1.0, 0.0, 0.0]),
        // +X face
        corner(p1[0], p0[1], p1[2], [1.0, 0.0, 0.0]),
        corner(p1[0], p0[1], p0[2], [1.0, 0.0, 0.0]),
        corner(p1[0], p1[1], p0[2], [1.0, 0.0, 0.0]),
        corner(p1[0], p1[1], p1[2], [1.0, 0.0, 0.0]),
        // -Z face
        corner(p1[0], p0[1], p0[2], [0.0, 0.0, -1.0]),
        corner(p0[0], p0[1], p0[2], [0.0, 0.0, -1.0]),
        corner(p0[0], p1[1], p0[2], [0.0, 0.0, -1.0]),
        corner(p1[0], p1[1], p0[2], [0.0, 0.0, -1.0]),
        // +Z face
        corner(p0[0], p0[1], p1[2], [0.0, 0.0, 1.0]),
        corner(p1[0], p0[1], p1[2], [0.0, 0.0, 1.0]),
        corner(p1[0], p1[1], p1[2], [0.0, 0.0, 1.0]),
        corner(p0[0], p1[1], p1[2], [0.0, 0.0, 1.0]),
        // -Y face
        corner(p0[0], p0[1], p0[2], [0.0, -1.0, 0.0]),
        corner(p1[0], p0[1], p0[2], [0.0, -1.0, 0.0]),
        corner(p1[0], p0[1], p1[2], [0.0, -1.0, 0.0]),
        corner(p0[0], p0[1], p1[2], [0.0, -1.0, 0.0]),
        // +Y face
        corner(p1[0], p1[1], p0[2], [0.0, 1.0, 0.0]),
        corner(p0[0], p1[1], p0[2], [0.0, 1.0, 0.0]),
        corner(p0[0], p1[1], p1[2], [0.0, 1.0, 0.0]),
        corner(p1[0], p1[1], p1[2], [0.0, 1.0, 0.0]),
    ];

    let indices = vec![
        0, 1, 2, 0, 2, 3, //
        4, 5, 6, 4, 6, 7, //
        8, 9, 10, 8, 10, 11, //
        12, 13, 14, 12, 14, 15, //
        16, 17, 18, 16, 18, 19, //
        20, 21, 22, 20, 22, 23,
    ];

    (vertices, indices)
}

/// Raw (pre-flatten) UV-sphere geometry.
///
/// A `(stacks + 1) x (slices + 1)` grid of vertices from the spherical
/// parametrization, each normal equal to the position-minus-center
/// direction, stitched into two triangles per grid cell.
pub fn sphere_geometry(center: [f32; 3], radius: f32) -> (Vec<Vertex>, Vec<u32>) {
    let slices = SPHERE_SLICES;
    let stacks = SPHERE_STACKS;

    let mut vertices = Vec::with_capacity(((stacks + 1) * (slices + 1)) as usize);
    let mut indices = Vec::with_capacity((stacks * slices * 6) as usize);

    for j in 0..=stacks {
        let latitude = PI * j as f32 / stacks as f32;

        let ring_radius = radius * -latitude.sin();
        let height = radius * latitude.cos();

        let n0 = -latitude.sin();
        let n1 = latitude.cos();

        for i in 0..=slices {
            let longitude = 2.0 * PI * i as f32 / slices as f32;

            let position = [
                center[0] + ring_radius * longitude.sin(),
                center[1] + height,
                center[2] + ring_radius * longitude.cos(),
            ];
            let normal = [n0 * longitude.sin(), n1, n0 * longitude.cos()];
            let tex_coord = [i as f32 / slices as f32, j as f32 / stacks as f32];

            vertices.push(Vertex::new(position, normal, tex_coord, 0));
        }
    }

    for j in 0..stacks {
        for i in 0..slices {
            let j0 = j * (slices + 1);
            let j1 = (j + 1) * (slices + 1);
            let i0 = i;
            let i1 = i + 1;

            indices.push(j0 + i0);
            indices.push(j1 + i0);
            indices.push(j1 + i1);

            indices.push(j0 + i0);
            indices.push(j1 + i1);
            indices.push(j0 + i1);
        }
    }

    (vertices, indices)
}
