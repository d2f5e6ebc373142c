//! Prism geometry pipeline
//!
//! CPU-side data preparation for a hardware ray-traced renderer. Converts
//! arbitrary 3D scene descriptions (mesh files or procedural primitives)
//! into a uniform vertex/index/material/light representation ready for
//! upload into GPU acceleration-structure builders.
//!
//! The pipeline is strictly one-directional: per-corner extraction, then
//! vertex deduplication, then normal synthesis (only when the source has no
//! normals), then material classification and light extraction, then a
//! final flatten back to one vertex per triangle corner.
//!
//! ```no_run
//! use prism::{load_model, Texture};
//!
//! let mut textures: Vec<Texture> = Vec::new();
//! let model = prism::load_model("assets/scene.obj", &mut textures)?;
//! // model.vertices(), model.indices(), model.materials(), model.lights()
//! // are ready for GPU upload.
//! # Ok::<(), prism::AssetError>(())
//! ```

pub mod assets;
pub mod error;
pub mod geometry;
pub mod io;

// Re-export main types for convenience
pub use assets::{
    LightObject, Material, MaterialModel, MaterialUniform, Model, ProceduralShape, Texture, Vertex,
};
pub use error::AssetError;
pub use geometry::{create_box, create_sphere};
pub use io::load_model;
