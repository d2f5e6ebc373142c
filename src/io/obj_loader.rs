//! Wavefront OBJ ingestion.
//!
//! Drives the full pipeline over a textual face/attribute source: per-corner
//! extraction, deduplication across all shapes, light extraction per named
//! group, smooth-normal synthesis when the file carries no normals, and a
//! final flatten.
//!
//! MTL material records are reduced to [`MaterialSource`] before
//! classification; the PBR extension fields `Pr` (roughness) and `Pm`
//! (metallic) live in the parser's unknown-parameter map, while `Ke`
//! (emission) is parsed into the material's `emissive` field.

use std::path::Path;
use std::time::Instant;

use log::{info, warn};

use crate::assets::{
    LightAccumulator, Material, MaterialSource, Model, Texture, TextureSource, Vertex,
    LIGHT_GROUP_MARKER,
};
use crate::error::AssetError;
use crate::geometry::{flatten_vertices, synthesize_normals, VertexDeduplicator};

/// Loads an OBJ file into a fully prepared [`Model`].
///
/// A parse failure is fatal and carries the filename plus the parser
/// message. A missing or broken MTL library is only a warning; the model
/// then gets the single default material.
pub fn load_obj(path: &Path, textures: &mut Vec<Texture>) -> Result<Model, AssetError> {
    info!("loading '{}'", path.display());
    let start = Instant::now();

    let load_options = tobj::LoadOptions {
        triangulate: true,
        // The pipeline does its own per-corner deduplication, so keep the
        // separate position/normal/texcoord index streams.
        single_index: false,
        ..Default::default()
    };

    let (models, raw_materials) =
        tobj::load_obj(path, &load_options).map_err(|error| AssetError::Parse {
            path: path.to_path_buf(),
            message: error.to_string(),
        })?;

    let raw_materials = match raw_materials {
        Ok(list) => list,
        Err(error) => {
            warn!(
                "no usable material library for '{}': {}",
                path.display(),
                error
            );
            Vec::new()
        }
    };

    // Texture paths in an MTL file are relative to the file itself.
    let material_dir = path.parent().unwrap_or_else(|| Path::new(""));

    let mut materials = Vec::with_capacity(raw_materials.len());
    for raw in &raw_materials {
        materials.push(Material::classify(
            material_source_from_obj(raw, material_dir),
            textures,
        )?);
    }
    if materials.is_empty() {
        materials.push(Material::default());
    }

    // Upper bound on unique vertices: one per face corner.
    let source_corners: usize = models.iter().map(|model| model.mesh.indices.len()).sum();
    let mut deduplicator = VertexDeduplicator::with_capacity(source_corners);
    let mut indices = Vec::with_capacity(source_corners);
    let mut lights = Vec::new();
    let mut has_normals = false;

    for model in &models {
        let mesh = &model.mesh;
        let material_index = mesh
            .material_id
            .filter(|&id| id < materials.len())
            .unwrap_or(0) as i32;

        let mut light = LightAccumulator::new();

        if !mesh.normals.is_empty() {
            has_normals = true;
        }

        for (corner, &position_index) in mesh.indices.iter().enumerate() {
            let p = position_index as usize;
            let position = [
                mesh.positions[3 * p],
                mesh.positions[3 * p + 1],
                mesh.positions[3 * p + 2],
            ];
            light.add_position(position);

            let normal = if mesh.normals.is_empty() {
                // Placeholder until synthesis; all corners of a position
                // share it, so deduplication is unaffected.
                [0.0; 3]
            } else {
                let n = mesh.normal_indices[corner] as usize;
                let normal = [
                    mesh.normals[3 * n],
                    mesh.normals[3 * n + 1],
                    mesh.normals[3 * n + 2],
                ];
                light.set_direction(normal);
                normal
            };

            let tex_coord = if mesh.texcoords.is_empty() {
                [0.0; 2]
            } else {
                let t = mesh.texcoord_indices[corner] as usize;
                // OBJ puts v=0 at the bottom; the renderer samples top-down.
                [mesh.texcoords[2 * t], 1.0 - mesh.texcoords[2 * t + 1]]
            };

            indices.push(deduplicator.insert(Vertex::new(
                position,
                normal,
                tex_coord,
                material_index,
            )));
        }

        if model.name.contains(LIGHT_GROUP_MARKER) {
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

fn material_source_from_obj(raw: &tobj::Material, material_dir: &Path) -> MaterialSource {
    MaterialSource {
        name: raw.name.clone(),
        diffuse: raw.diffuse.unwrap_or([0.8, 0.8, 0.8]),
        diffuse_texture: raw
            .diffuse_texture
            .as_ref()
            .map(|name| TextureSource::File(material_dir.join(name))),
        roughness: scalar_param(raw, "Pr"),
        metallic: scalar_param(raw, "Pm"),
        emission: raw.emissive.unwrap_or([0.0; 3]),
    }
}

fn scalar_param(raw: &tobj::Material, key: &str) -> f32 {
    raw.unknown_param
        .get(key)
        .and_then(|value| value.trim().parse().ok())
        .unwrap_or(0.0)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::MaterialModel;
    use std::fs;
    use std::path::PathBuf;

    struct Fixture {
        dir: PathBuf,
    }

    impl Fixture {
        fn new(name: &str) -> Self {
            let _ = env_logger::builder().is_test(true).try_init();
            let dir = std::env::temp_dir().join(format!("prism-obj-{}-{}", name, std::process::id()));
            fs::create_dir_all(&dir).unwrap();
            Self { dir }
        }

        fn write(&self, file: &str, contents: &str) -> PathBuf {
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

    const CUBE_NO_NORMALS: &str = "\
o cube
v 0 0 0
v 1 0 0
v 1 1 0
v 0 1 0
v 0 0 1
v 1 0 1
v 1 1 1
v 0 1 1
f 1 4 3
f 1 3 2
f 5 6 7
f 5 7 8
f 1 2 6
f 1 6 5
f 4 8 7
f 4 7 3
f 1 5 8
f 1 8 4
f 2 3 7
f 2 7 6
";

    #[test]
    fn test_cube_without_normals() {
        let fixture = Fixture::new("cube");
        let path = fixture.write("cube.obj", CUBE_NO_NORMALS);

        let mut textures = Vec::new();
        let model = load_obj(&path, &mut textures).unwrap();

        // 12 triangles, flattened to one vertex per corner.
        assert_eq!(model.vertices().len(), 36);
        assert_eq!(model.indices(), (0..36).collect::<Vec<u32>>());
        assert_eq!(model.triangle_count(), 12);

        // No MTL: exactly one default material, referenced everywhere.
        assert_eq!(model.materials().len(), 1);
        assert!(model.vertices().iter().all(|v| v.material_index == 0));

        // Synthesized normals are unit length.
        for vertex in model.vertices() {
            let n = vertex.normal;
            let len = (n[0] * n[0] + n[1] * n[1] + n[2] * n[2]).sqrt();
            assert!((len - 1.0).abs() < 1e-4, "normal {:?}", n);
        }

        assert!(model.lights().is_empty());
        assert!(model.procedural().is_none());
        assert!(textures.is_empty());
    }

    #[test]
    fn test_shared_positions_deduplicate_before_synthesis() {
        let fixture = Fixture::new("dedup");
        let path = fixture.write("cube.obj", CUBE_NO_NORMALS);

        let model = load_obj(&path, &mut Vec::new()).unwrap();

        // With zero placeholder normals the 36 corners collapse to the 8
        // cube corners before synthesis; flattening re-expands them, so each
        // position appears with a single smooth normal.
        for a in model.vertices() {
            for b in model.vertices() {
                if a.position == b.position {
                    assert_eq!(a.normal, b.normal);
                }
            }
        }
    }

    #[test]
    fn test_light_group_extraction() {
        let fixture = Fixture::new("light");
        let path = fixture.write(
            "scene.obj",
            "\
o lightquad_ceiling
v 0 0 0
v 2 0 0
v 0 0 2
v 2 0 2
vn 0 -1 0
f 1//1 2//1 4//1
f 1//1 4//1 3//1
",
        );

        let model = load_obj(&path, &mut Vec::new()).unwrap();

        assert_eq!(model.lights().len(), 1);
        let light = &model.lights()[0];
        assert_eq!(light.world_pos_min, [0.0, 0.0, 0.0, 1.0]);
        assert_eq!(light.world_pos_max, [2.0, 0.0, 2.0, 1.0]);
        assert_eq!(light.world_direction, [0.0, -1.0, 0.0, 0.0]);
        assert!((light.area - 4.0).abs() < 1e-5);
    }

    #[test]
    fn test_mtl_classification_and_texcoord_flip() {
        let fixture = Fixture::new("mtl");
        fixture.write(
            "scene.mtl",
            "\
newmtl glass_pane
Kd 0.9 0.9 0.9

newmtl lamp
Kd 1.0 1.0 1.0
Ke 5.0 4.0 3.0
",
        );
        let path = fixture.write(
            "scene.obj",
            "\
mtllib scene.mtl
o pane
usemtl glass_pane
v 0 0 0
v 1 0 0
v 0 1 0
vn 0 0 1
vt 0 0
vt 1 0
vt 0 1
f 1/1/1 2/2/1 3/3/1
o lamp
usemtl lamp
v 0 0 1
v 1 0 1
v 0 1 1
f 4//1 5//1 6//1
",
        );

        let model = load_obj(&path, &mut Vec::new()).unwrap();

        assert_eq!(model.materials().len(), 2);
        assert_eq!(model.materials()[0].model, MaterialModel::Dielectric);
        assert_eq!(model.materials()[1].model, MaterialModel::DiffuseLight);
        assert_eq!(model.materials()[1].diffuse, [5.0, 4.0, 3.0, 1.0]);

        // v flipped: source (0, 0) becomes (0, 1).
        assert_eq!(model.vertices()[0].tex_coord, [0.0, 1.0]);

        // Index bounds hold for both buffers.
        let vertex_count = model.vertices().len();
        assert!(model.indices().iter().all(|&i| (i as usize) < vertex_count));
        let material_count = model.materials().len();
        assert!(model
            .vertices()
            .iter()
            .all(|v| (v.material_index as usize) < material_count));
    }

    #[test]
    fn test_missing_file_is_a_parse_error() {
        let result = load_obj(Path::new("/nonexistent/model.obj"), &mut Vec::new());
        match result {
            Err(AssetError::Parse { path, .. }) => {
                assert_eq!(path, Path::new("/nonexistent/model.obj"));
            }
            other => panic!("expected parse error, got {:?}", other.map(|_| ())),
        }
    }
}
