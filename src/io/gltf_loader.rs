//! Binary glTF (.glb) ingestion.
//!
//! The scene-graph source runs through exactly the same pipeline stages as
//! the OBJ path: material classification, one deduplicator across every
//! primitive, light-marker groups, normal synthesis only when no primitive
//! carried normals, and a final flatten.
//!
//! Base-color textures embedded in the container are decoded and registered
//! in the shared table under a synthetic `file.glb#imageN` identity, so two
//! materials referencing the same image share one slot.

use std::path::Path;
use std::time::Instant;

use image::DynamicImage;
use log::{info, warn};

use crate::assets::{
    LightAccumulator, Material, MaterialSource, Model, Texture, TextureSource, Vertex,
    LIGHT_GROUP_MARKER,
};
use crate::error::AssetError;
use crate::geometry::{flatten_vertices, synthesize_normals, VertexDeduplicator};

/// Loads a binary glTF file into a fully prepared [`Model`].
pub fn load_gltf(path: &Path, textures: &mut Vec<Texture>) -> Result<Model, AssetError> {
    info!("loading '{}'", path.display());
    let start = Instant::now();

    let (document, buffers, images) =
        gltf::import(path).map_err(|error| AssetError::Parse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;

    let mut materials = Vec::new();
    for material in document.materials() {
        materials.push(Material::classify(
            material_source_from_gltf(&material, &images, path),
            textures,
        )?);
    }
    if materials.is_empty() {
        materials.push(Material::default());
    }

    let mut deduplicator = VertexDeduplicator::new();
    let mut indices = Vec::new();
    let mut lights = Vec::new();
    let mut source_corners = 0usize;
    let mut has_normals = false;

    for mesh in document.meshes() {
        let is_light_group = mesh
            .name()
            .is_some_and(|name| name.contains(LIGHT_GROUP_MARKER));
        let mut light = LightAccumulator::new();

        for primitive in mesh.primitives() {
            // Only triangle lists keep the index count a multiple of 3;
            // anything else (points, lines, strips, fans) is skipped.
            if primitive.mode() != gltf::mesh::Mode::Triangles {
                warn!(
                    "skipping non-triangle primitive ({:?}) in '{}'",
                    primitive.mode(),
                    path.display()
                );
                continue;
            }

            let reader =
                primitive.reader(|buffer| buffers.get(buffer.index()).map(|data| data.0.as_slice()));

            let positions: Vec<[f32; 3]> = reader
                .read_positions()
                .ok_or_else(|| AssetError::Parse {
                    path: path.to_path_buf(),
                    message: "primitive without POSITION attribute".to_string(),
                })?
                .collect();
            let normals: Option<Vec<[f32; 3]>> = reader.read_normals().map(|iter| iter.collect());
            let tex_coords: Option<Vec<[f32; 2]>> = reader
                .read_tex_coords(0)
                .map(|coords| coords.into_f32().collect());

            let primitive_indices: Vec<u32> = match reader.read_indices() {
                Some(read) => read.into_u32().collect(),
                None => (0..positions.len() as u32).collect(),
            };
            if primitive_indices
                .iter()
                .any(|&index| index as usize >= positions.len())
            {
                return Err(AssetError::Parse {
                    path: path.to_path_buf(),
                    message: "primitive index out of bounds".to_string(),
                });
            }

            if normals.is_some() {
                has_normals = true;
            }

            let material_index = primitive
                .material()
                .index()
                .filter(|&id| id < materials.len())
                .unwrap_or(0) as i32;

            for &position_index in &primitive_indices {
                let p = position_index as usize;
                let position = positions[p];
                light.add_position(position);

                let normal = match &normals {
                    Some(normals) => {
                        let normal = normals[p];
                        light.set_direction(normal);
                        normal
                    }
                    None => [0.0; 3],
                };
                let tex_coord = tex_coords
                    .as_ref()
                    .map(|coords| coords[p])
                    .unwrap_or([0.0; 2]);

                indices.push(deduplicator.insert(Vertex::new(
                    position,
                    normal,
                    tex_coord,
                    material_index,
                )));
            }
            source_corners += primitive_indices.len();
        }

        if is_light_group {
            if let Some(light) = light.finish() {
                lights.push(light);
            }
        }
    }

    let mut vertices = deduplicator.into_vertices();
    if !has_normals {
        synthesize_normals(&mut vertices, &indices);
    }

    info!(
        "loaded '{}': {} corners, {} unique vertices, {} materials, {} lights in {:.3}s",
        path.display(),
        source_corners,
        vertices.len(),
        materials.len(),
        lights.len(),
        start.elapsed().as_secs_f32()
    );

    flatten_vertices(&mut vertices, &mut indices);

    Ok(Model::new(vertices, indices, materials, lights, None))
}

fn material_source_from_gltf(
    material: &gltf::Material,
    images: &[gltf::image::Data],
    path: &Path,
) -> MaterialSource {
    let pbr = material.pbr_metallic_roughness();
    let base_color = pbr.base_color_factor();

    let diffuse_texture = pbr.base_color_texture().and_then(|info| {
        let source_index = info.texture().source().index();
        let image = images.get(source_index)?;
        match decode_embedded_image(image) {
            Some(decoded) => {
                let loadname = format!("{}#image{}", path.display(), source_index);
                Some(TextureSource::Embedded(Texture::from_image(
                    loadname, decoded,
                )))
            }
            None => {
                warn!(
                    "unsupported embedded texture format {:?} in '{}'",
                    image.format,
                    path.display()
                );
                None
            }
        }
    });

    MaterialSource {
        name: material.name().unwrap_or("").to_string(),
        diffuse: [base_color[0], base_color[1], base_color[2]],
        diffuse_texture,
        roughness: pbr.roughness_factor(),
        metallic: pbr.metallic_factor(),
        emission: material.emissive_factor(),
    }
}

fn decode_embedded_image(data: &gltf::image::Data) -> Option<DynamicImage> {
    match data.format {
        gltf::image::Format::R8G8B8A8 => {
            image::RgbaImage::from_raw(data.width, data.height, data.pixels.clone())
                .map(DynamicImage::ImageRgba8)
        }
        gltf::image::Format::R8G8B8 => {
            image::RgbImage::from_raw(data.width, data.height, data.pixels.clone())
                .map(DynamicImage::ImageRgb8)
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::path::PathBuf;

    struct Fixture {
        dir: PathBuf,
    }

    impl Fixture {
        fn new(name: &str) -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let dir = std::env::temp_dir().join(format!("prism-glb-{}-{}", name, std::process::id()));
            fs::create_dir_all(&dir).unwrap();
            Self { dir }
        }

        fn write(&self, file: &str, contents: &[u8]) -> PathBuf {
            let path = self.dir.join(file);
            fs::write(&path, contents).unwrap();
            path
        }
    }

    impl Drop for Fixture {
        fn drop(&mut self) {
            let _ = fs::remove_dir_all(&self.dir);
        }
    }

    /// Assembles a binary glTF container from a JSON chunk and a binary
    /// payload: 12-byte header, space-padded JSON chunk, zero-padded BIN
    /// chunk.
    fn glb(json: &str, bin: &[u8]) -> Vec<u8> {
        let mut json_chunk = json.as_bytes().to_vec();
        while json_chunk.len() % 4 != 0 {
            json_chunk.push(b' ');
        }
        let mut bin_chunk = bin.to_vec();
        while bin_chunk.len() % 4 != 0 {
            bin_chunk.push(0);
        }

        let total = 12 + 8 + json_chunk.len() + 8 + bin_chunk.len();
        let mut out = Vec::with_capacity(total);
        out.extend_from_slice(b"glTF");
        out.extend_from_slice(&2u32.to_le_bytes());
        out.extend_from_slice(&(total as u32).to_le_bytes());
        out.extend_from_slice(&(json_chunk.len() as u32).to_le_bytes());
        out.extend_from_slice(b"JSON");
        out.extend_from_slice(&json_chunk);
        out.extend_from_slice(&(bin_chunk.len() as u32).to_le_bytes());
        out.extend_from_slice(b"BIN\0");
        out.extend_from_slice(&bin_chunk);
        out
    }

    fn positions_bytes(positions: &[[f32; 3]]) -> Vec<u8> {
        positions
            .iter()
            .flatten()
            .flat_map(|value| value.to_le_bytes())
            .collect()
    }

    #[test]
    fn test_triangle_without_indices_or_normals() {
        let fixture = Fixture::new("tri");
        let bin = positions_bytes(&[[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]]);
        let json = r#"{
            "asset": {"version": "2.0"},
            "buffers": [{"byteLength": 36}],
            "bufferViews": [{"buffer": 0, "byteOffset": 0, "byteLength": 36}],
            "accessors": [{
                "bufferView": 0, "componentType": 5126, "count": 3,
                "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
            }],
            "meshes": [{"name": "tri", "primitives": [{"attributes": {"POSITION": 0}}]}]
        }"#;
        let path = fixture.write("tri.glb", &glb(json, &bin));

        let mut textures = Vec::new();
        let model = load_gltf(&path, &mut textures).unwrap();

        // No index accessor: the identity fallback covers every position.
        assert_eq!(model.vertices().len(), 3);
        assert_eq!(model.indices(), (0..3).collect::<Vec<u32>>());
        assert_eq!(model.triangle_count(), 1);

        // No normals anywhere in the file, so synthesis ran.
        for vertex in model.vertices() {
            assert_eq!(vertex.normal, [0.0, 0.0, 1.0]);
        }

        // No materials in the file: exactly one default.
        assert_eq!(model.materials().len(), 1);
        assert!(model.lights().is_empty());
        assert!(textures.is_empty());
    }

    #[test]
    fn test_non_triangle_primitives_are_skipped() {
        let fixture = Fixture::new("lines");
        let bin = positions_bytes(&[
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [0.0, 1.0, 0.0],
            [5.0, 0.0, 0.0],
            [6.0, 0.0, 0.0],
        ]);
        let json = r#"{
            "asset": {"version": "2.0"},
            "buffers": [{"byteLength": 60}],
            "bufferViews": [
                {"buffer": 0, "byteOffset": 0, "byteLength": 36},
                {"buffer": 0, "byteOffset": 36, "byteLength": 24}
            ],
            "accessors": [
                {
                    "bufferView": 0, "componentType": 5126, "count": 3,
                    "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0]
                },
                {
                    "bufferView": 1, "componentType": 5126, "count": 2,
                    "type": "VEC3", "min": [5.0, 0.0, 0.0], "max": [6.0, 0.0, 0.0]
                }
            ],
            "meshes": [{"name": "mixed", "primitives": [
                {"attributes": {"POSITION": 0}},
                {"attributes": {"POSITION": 1}, "mode": 1}
            ]}]
        }"#;
        let path = fixture.write("mixed.glb", &glb(json, &bin));

        let model = load_gltf(&path, &mut Vec::new()).unwrap();

        // The LINES primitive contributes nothing; without the skip its two
        // identity indices would leave the index count not divisible by 3.
        assert_eq!(model.indices().len() % 3, 0);
        assert_eq!(model.triangle_count(), 1);
        assert_eq!(model.vertices().len(), 3);
        assert!(model
            .vertices()
            .iter()
            .all(|vertex| vertex.position[0] < 5.0));
    }

    #[test]
    fn test_light_marker_mesh_name() {
        let fixture = Fixture::new("light");
        let mut bin = positions_bytes(&[[0.0, 0.0, 0.0], [2.0, 0.0, 0.0], [0.0, 0.0, 2.0]]);
        bin.extend(positions_bytes(&[
            [0.0, -1.0, 0.0],
            [0.0, -1.0, 0.0],
            [0.0, -1.0, 0.0],
        ]));
        let json = r#"{
            "asset": {"version": "2.0"},
            "buffers": [{"byteLength": 72}],
            "bufferViews": [
                {"buffer": 0, "byteOffset": 0, "byteLength": 36},
                {"buffer": 0, "byteOffset": 36, "byteLength": 36}
            ],
            "accessors": [
                {
                    "bufferView": 0, "componentType": 5126, "count": 3,
                    "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [2.0, 0.0, 2.0]
                },
                {
                    "bufferView": 1, "componentType": 5126, "count": 3,
                    "type": "VEC3", "min": [0.0, -1.0, 0.0], "max": [0.0, -1.0, 0.0]
                }
            ],
            "meshes": [{"name": "lightquad_ceiling", "primitives": [
                {"attributes": {"POSITION": 0, "NORMAL": 1}}
            ]}]
        }"#;
        let path = fixture.write("light.glb", &glb(json, &bin));

        let model = load_gltf(&path, &mut Vec::new()).unwrap();

        assert_eq!(model.lights().len(), 1);
        let light = &model.lights()[0];
        assert_eq!(light.world_pos_min, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(light.world_pos_max, [2.0, 0.0, 2.0, 1.0]);
        assert_eq!(light.world_direction, [0.0, -1.0, 0.0, 0.0]);
        assert!((light.area - 4.0).abs() < 1e-5);

        // Normals came from the file; synthesis must not have touched them.
        assert!(model
            .vertices()
            .iter()
            .all(|vertex| vertex.normal == [0.0, -1.0, 0.0]));
    }

    #[test]
    fn test_malformed_container_is_a_parse_error() {
        let fixture = Fixture::new("bad");
        let path = fixture.write("bad.glb", b"not a glb at all");

        let result = load_gltf(&path, &mut Vec::new());
        assert!(matches!(result, Err(AssetError::Parse { .. })));
    }
}
