//! Texture loading and the shared texture table.
//!
//! The table is a plain `Vec<Texture>` owned by the caller and threaded
//! through every load. Each texture is identified by the path it was loaded
//! from; registration deduplicates on that identity so a texture referenced
//! by several materials (or several models) is decoded once and shares one
//! slot.
//!
//! Lookup-then-append is not atomic: if models are loaded concurrently,
//! access to the table must be serialized by the caller (single-writer
//! discipline).

use std::path::{Path, PathBuf};

use image::{DynamicImage, GenericImageView};
use log::info;

use crate::error::AssetError;

/// A decoded texture plus the load-path identity used for deduplication.
pub struct Texture {
    loadname: PathBuf,
    image: DynamicImage,
}

impl Texture {
    /// Decodes a texture from a file on disk.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self, AssetError> {
        let path = path.into();
        let image = image::open(&path).map_err(|source| AssetError::Texture {
            path: path.clone(),
            source,
        })?;

        let (width, height) = image.dimensions();
        info!("loaded texture '{}' ({}x{})", path.display(), width, height);

        Ok(Self {
            loadname: path,
            image,
        })
    }

    /// Wraps an already-decoded image, e.g. one embedded in a binary
    /// container. The loadname is a synthetic identity such as
    /// `scene.glb#image0`.
    pub fn from_image(loadname: impl Into<PathBuf>, image: DynamicImage) -> Self {
        Self {
            loadname: loadname.into(),
            image,
        }
    }

    /// The path identity this texture was registered under.
    pub fn loadname(&self) -> &Path {
        &self.loadname
    }

    pub fn image(&self) -> &DynamicImage {
        &self.image
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }
}

impl std::fmt::Debug for Texture {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Texture")
            .field("loadname", &self.loadname)
            .field("dimensions", &self.dimensions())
            .finish()
    }
}

/// Registers a texture file in the shared table, returning its index.
///
/// If the exact path is already present its index is reused and the file is
/// not touched; otherwise the file is decoded and appended.
pub fn register_texture_file(
    textures: &mut Vec<Texture>,
    path: impl Into<PathBuf>,
) -> Result<u32, AssetError> {
    let path = path.into();
    if let Some(index) = find_texture(textures, &path) {
        return Ok(index);
    }

    textures.push(Texture::load(path)?);
    Ok(textures.len() as u32 - 1)
}

/// Registers an already-decoded texture, deduplicating by loadname.
pub fn register_texture(textures: &mut Vec<Texture>, texture: Texture) -> u32 {
    if let Some(index) = find_texture(textures, texture.loadname()) {
        return index;
    }

    textures.push(texture);
    textures.len() as u32 - 1
}

fn find_texture(textures: &[Texture], loadname: &Path) -> Option<u32> {
    textures
        .iter()
        .position(|texture| texture.loadname() == loadname)
        .map(|index| index as u32)
}
