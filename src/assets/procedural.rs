//! Analytic shape descriptors.
//!
//! A primitive generated with the procedural flag carries one of these so
//! the renderer can use a closed-form intersection test instead of walking
//! the triangle mesh. Ownership is exclusive to the model; non-procedural
//! models carry no descriptor at all.

/// Closed-form intersection shortcut for a generated primitive.
#[derive(Copy, Clone, Debug, PartialEq)]
pub enum ProceduralShape {
    Sphere { center: [f32; 3], radius: f32 },
}
