//! # Geometry Processing
//!
//! The order-sensitive core of the pipeline:
//!
//! - **Deduplication** ([`dedup`]) - collapse repeated face-corner tuples
//! - **Normal synthesis** ([`normals`]) - smooth normals when the source has
//!   none (runs on the deduplicated set, never before it)
//! - **Flattening** ([`flatten`]) - back to one vertex per corner, last
//! - **Primitives** ([`primitives`]) - procedural box and UV-sphere builders
//!
//! ## Usage
//!
//! ```rust
//! use prism::geometry::{create_box, create_sphere};
//! use prism::assets::Material;
//!
//! let floor = create_box([-10.0, -0.1, -10.0], [10.0, 0.0, 10.0], Material::default());
//! let ball = create_sphere([0.0, 1.0, 0.0], 1.0, Material::default(), true);
//! assert!(ball.procedural().is_some());
//! assert!(floor.procedural().is_none());
//! ```

pub mod dedup;
pub mod flatten;
pub mod normals;
pub mod primitives;

// Re-export commonly used items
pub use dedup::VertexDeduplicator;
pub use flatten::flatten_vertices;
pub use normals::synthesize_normals;
pub use primitives::{create_box, create_sphere};
