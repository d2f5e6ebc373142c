//! Error taxonomy for the asset pipeline.
//!
//! Parse failures are fatal for the load call and carry the offending file
//! path plus the underlying parser message. Missing attributes (normals,
//! texture coordinates, materials) are never errors; each has a defined
//! fallback. Recoverable source anomalies are logged and the load continues.

use std::path::PathBuf;

use thiserror::Error;

/// Errors produced while loading or manipulating models.
#[derive(Debug, Error)]
pub enum AssetError {
    /// The source file is malformed or unreadable. No partial model is
    /// returned.
    #[error("failed to load model '{}': {message}", .path.display())]
    Parse { path: PathBuf, message: String },

    /// A texture referenced by a material could not be read or decoded.
    #[error("failed to load texture '{}'", .path.display())]
    Texture {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    /// [`Model::set_material`](crate::assets::Model::set_material) was called
    /// on a model that does not hold exactly one material. This signals
    /// caller misuse, not a data problem.
    #[error("cannot change material on a model with {count} materials")]
    MultiMaterial { count: usize },
}
