//! # Model Loading
//!
//! Entry point for model ingestion. Sources are identified by file
//! extension and routed to the matching loader:
//!
//! - `.glb` / `.gltf` → [`gltf_loader`] (binary scene-graph format)
//! - everything else → [`obj_loader`] (textual face/attribute format)
//!
//! Both loaders share the caller-supplied texture table and produce the
//! same immutable [`Model`](crate::assets::Model) shape.

pub mod gltf_loader;
pub mod obj_loader;

use std::path::Path;

use crate::assets::{Model, Texture};
use crate::error::AssetError;

/// Loads a model from a file, dispatching on the extension.
///
/// The texture table is extended in place as materials are classified;
/// entries are never removed. Lookup-then-append is not atomic, so callers
/// loading models concurrently must serialize access to the table
/// (single-writer discipline). A failed load is terminal for that model;
/// re-invocation is the retry mechanism.
pub fn load_model(path: impl AsRef<Path>, textures: &mut Vec<Texture>) -> Result<Model, AssetError> {
    let path = path.as_ref();
    match path.extension().and_then(|extension| extension.to_str()) {
        Some("glb") | Some("gltf") => gltf_loader::load_gltf(path, textures),
        _ => obj_loader::load_obj(path, textures),
    }
}
