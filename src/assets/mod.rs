//! # Asset Data Model
//!
//! The types flowing through the geometry-preparation pipeline:
//!
//! - **Vertex** ([`vertex`]) - GPU-ready face-corner vertex, also the
//!   deduplication key
//! - **Material** ([`material`]) - classified shading-model records
//! - **Texture** ([`texture`]) - decoded images in the caller's shared table
//! - **LightObject** ([`light`]) - compact summaries of emissive geometry
//! - **Model** ([`model`]) - the final immutable bundle
//! - **ProceduralShape** ([`procedural`]) - analytic intersection shortcuts

pub mod light;
pub mod material;
pub mod model;
pub mod procedural;
pub mod texture;
pub mod vertex;

// Re-export commonly used types
pub use light::{LightAccumulator, LightObject, LIGHT_GROUP_MARKER};
pub use material::{Material, MaterialModel, MaterialSource, MaterialUniform, TextureSource};
pub use model::Model;
pub use procedural::ProceduralShape;
pub use texture::{register_texture, register_texture_file, Texture};
pub use vertex::Vertex;
