//! # Material System
//!
//! Maps raw per-face material descriptors from any source format onto a
//! small closed set of shading models. Loaders reduce their native material
//! records to a [`MaterialSource`] and run it through
//! [`Material::classify`], which applies a fixed priority cascade:
//!
//! 1. Default: `Mixture` with the source color, roughness and a
//!    perceptual-to-physical metalness remap (metallic squared).
//! 2. A diffuse texture forces the color to opaque white (so sampling is not
//!    tinted) and registers the texture in the shared table.
//! 3. Transparency name markers override the model to `Dielectric`.
//! 4. Positive emission replaces the whole record with the emissive preset.
//!    This wins over every later check.
//! 5. Near-1.0 metallic overrides the model to `Metallic`.

use std::path::PathBuf;

use crate::assets::texture::{register_texture, register_texture_file, Texture};
use crate::error::AssetError;

/// Refraction index used for the default `Mixture` model (plastic-like).
pub const PLASTIC_REFRACTION_INDEX: f32 = 1.46;

/// Source metallic values above this classify as `Metallic`.
pub const METALLIC_THRESHOLD: f32 = 0.99;

/// Material names that classify as `Dielectric` when matched exactly.
const DIELECTRIC_NAMES: [&str; 2] = ["Window-Fake-Glass", "Wine-Glasses"];

/// Material-name substrings that classify as `Dielectric` (case-sensitive).
const DIELECTRIC_MARKERS: [&str; 3] = ["Water", "Glass", "glass"];

/// The closed set of shading models understood by the renderer.
#[repr(i32)]
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MaterialModel {
    Diffuse = 0,
    Metallic = 1,
    Dielectric = 2,
    Mixture = 3,
    DiffuseLight = 4,
}

/// A classified material. Immutable once built, except that a
/// single-material model may replace its sole material wholesale via
/// [`Model::set_material`](crate::assets::Model::set_material).
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// RGBA base color.
    pub diffuse: [f32; 4],
    /// Index into the shared texture table, if textured.
    pub diffuse_texture: Option<u32>,
    pub model: MaterialModel,
    /// Surface roughness.
    pub fuzziness: f32,
    pub refraction_index: f32,
    pub metalness: f32,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            diffuse: [0.7, 0.7, 0.7, 1.0],
            diffuse_texture: None,
            model: MaterialModel::Diffuse,
            fuzziness: 0.0,
            refraction_index: PLASTIC_REFRACTION_INDEX,
            metalness: 0.0,
        }
    }
}

impl Material {
    /// The emissive preset: the whole record is rebuilt from the emission
    /// color, discarding every other source attribute.
    pub fn diffuse_light(emission: [f32; 3]) -> Self {
        Self {
            diffuse: [emission[0], emission[1], emission[2], 1.0],
            diffuse_texture: None,
            model: MaterialModel::DiffuseLight,
            fuzziness: 0.0,
            refraction_index: 1.0,
            metalness: 0.0,
        }
    }

    /// Classifies one raw material record.
    ///
    /// Textures referenced by the source are resolved against the shared
    /// table, deduplicated by load path. The only fallible step is decoding
    /// a texture file that turns out to be missing or corrupt.
    pub fn classify(
        source: MaterialSource,
        textures: &mut Vec<Texture>,
    ) -> Result<Self, AssetError> {
        let mut material = Material {
            diffuse: [source.diffuse[0], source.diffuse[1], source.diffuse[2], 1.0],
            diffuse_texture: None,
            model: MaterialModel::Mixture,
            fuzziness: source.roughness,
            refraction_index: PLASTIC_REFRACTION_INDEX,
            metalness: source.metallic * source.metallic,
        };

        if let Some(texture) = source.diffuse_texture {
            // Texture sampling must not be tinted by the source color.
            material.diffuse = [1.0, 1.0, 1.0, 1.0];
            material.diffuse_texture = Some(match texture {
                TextureSource::File(path) => register_texture_file(textures, path)?,
                TextureSource::Embedded(decoded) => register_texture(textures, decoded),
            });
        }

        if is_dielectric_name(&source.name) {
            material.model = MaterialModel::Dielectric;
        }

        if source.emission[0] > 0.0 {
            // Replaces the record entirely, so a highly emissive metallic
            // material stays emissive.
            return Ok(Material::diffuse_light(source.emission));
        }

        if source.metallic > METALLIC_THRESHOLD {
            material.model = MaterialModel::Metallic;
        }

        Ok(material)
    }
}

fn is_dielectric_name(name: &str) -> bool {
    DIELECTRIC_NAMES.contains(&name)
        || DIELECTRIC_MARKERS
            .iter()
            .any(|marker| name.contains(marker))
}

/// A format-neutral raw material record, produced by the loaders.
#[derive(Debug)]
pub struct MaterialSource {
    pub name: String,
    /// RGB base color.
    pub diffuse: [f32; 3],
    pub diffuse_texture: Option<TextureSource>,
    pub roughness: f32,
    /// Perceptual metallic value in [0, 1].
    pub metallic: f32,
    /// Emission color; a positive first channel marks the material emissive.
    pub emission: [f32; 3],
}

/// Where a referenced texture comes from.
#[derive(Debug)]
pub enum TextureSource {
    /// On-disk image, decoded on first registration.
    File(PathBuf),
    /// Pre-decoded image, e.g. embedded in a binary container.
    Embedded(Texture),
}

/// GPU uniform mirror of [`Material`].
///
/// `diffuse_texture_id` is `-1` when untextured; the shading model is its
/// enum discriminant.
#[repr(C)]
#[derive(Copy, Clone, Debug, bytemuck::Pod, bytemuck::Zeroable)]
pub struct MaterialUniform {
    pub diffuse: [f32; 4],
    pub diffuse_texture_id: i32,
    pub model: i32,
    pub fuzziness: f32,
    pub refraction_index: f32,
    pub metalness: f32,
    _padding: [f32; 3],
}

impl From<&Material> for MaterialUniform {
    fn from(material: &Material) -> Self {
        Self {
            diffuse: material.diffuse,
            diffuse_texture_id: material
                .diffuse_texture
                .map(|index| index as i32)
                .unwrap_or(-1),
            model: material.model as i32,
            fuzziness: material.fuzziness,
            refraction_index: material.refraction_index,
            metalness: material.metalness,
            _padding: [0.0; 3],
        }
    }
}
