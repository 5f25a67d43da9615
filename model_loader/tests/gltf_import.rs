use model_assets::glm;
use model_loader::{BundleResolver, GltfImporter, ImageTextureLoader, ImportError, LoaderError, ModelLoader, TextureOptions};

use image::RgbaImage;
use rstest::{fixture, rstest};
use tempfile::TempDir;

use std::f32::consts::FRAC_1_SQRT_2;
use std::path::Path;

// accessors: 0 positions, 1 indices, 2 key times, 3 translations, 4 rotations
const TRIANGLE_GLTF: &str = r#"{
  "asset": { "version": "2.0" },
  "scene": 0,
  "scenes": [{ "nodes": [0] }],
  "nodes": [{ "name": "body", "mesh": 0 }],
  "meshes": [{
    "primitives": [{ "attributes": { "POSITION": 0 }, "indices": 1, "material": 0 }]
  }],
  "materials": [{
    "pbrMetallicRoughness": {
      "baseColorFactor": [1.0, 0.5, 0.5, 1.0],
      "baseColorTexture": { "index": 0 },
      "roughnessFactor": 0.5
    }
  }],
  "textures": [{ "source": 0 }],
  "images": [{ "uri": "tri_albedo.png" }],
  "animations": [{
    "channels": [
      { "sampler": 0, "target": { "node": 0, "path": "translation" } },
      { "sampler": 1, "target": { "node": 0, "path": "rotation" } }
    ],
    "samplers": [{ "input": 2, "output": 3 }, { "input": 2, "output": 4 }]
  }],
  "buffers": [{ "uri": "tri.bin", "byteLength": 108 }],
  "bufferViews": [
    { "buffer": 0, "byteOffset": 0, "byteLength": 36 },
    { "buffer": 0, "byteOffset": 36, "byteLength": 6 },
    { "buffer": 0, "byteOffset": 44, "byteLength": 8 },
    { "buffer": 0, "byteOffset": 52, "byteLength": 24 },
    { "buffer": 0, "byteOffset": 76, "byteLength": 32 }
  ],
  "accessors": [
    { "bufferView": 0, "componentType": 5126, "count": 3, "type": "VEC3", "min": [0.0, 0.0, 0.0], "max": [1.0, 1.0, 0.0] },
    { "bufferView": 1, "componentType": 5123, "count": 3, "type": "SCALAR" },
    { "bufferView": 2, "componentType": 5126, "count": 2, "type": "SCALAR", "min": [0.0], "max": [1.5] },
    { "bufferView": 3, "componentType": 5126, "count": 2, "type": "VEC3" },
    { "bufferView": 4, "componentType": 5126, "count": 2, "type": "VEC4" }
  ]
}"#;

fn triangle_buffer() -> Vec<u8> {
  let positions = [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, 0.0, 1.0, 0.0];
  let indices = [0u16, 1, 2];
  let times = [0.0f32, 1.5];
  let translations = [0.0f32, 0.0, 0.0, 1.0, 2.0, 3.0];
  let rotations = [0.0f32, 0.0, 0.0, 1.0, 0.0, 0.0, FRAC_1_SQRT_2, FRAC_1_SQRT_2];

  let mut buffer = Vec::new();
  buffer.extend(positions.iter().flat_map(|value| value.to_le_bytes()));
  buffer.extend(indices.iter().flat_map(|value| value.to_le_bytes()));
  buffer.extend([0u8; 2]);
  buffer.extend(times.iter().flat_map(|value| value.to_le_bytes()));
  buffer.extend(translations.iter().flat_map(|value| value.to_le_bytes()));
  buffer.extend(rotations.iter().flat_map(|value| value.to_le_bytes()));
  assert_eq!(buffer.len(), 108);
  buffer
}

#[fixture]
fn bundle() -> TempDir {
  let dir = tempfile::tempdir().unwrap();
  std::fs::write(dir.path().join("tri.gltf"), TRIANGLE_GLTF).unwrap();
  std::fs::write(dir.path().join("tri.bin"), triangle_buffer()).unwrap();
  RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255])).save(dir.path().join("tri_albedo.png")).unwrap();
  dir
}

fn loader(root: &Path) -> ModelLoader<BundleResolver, GltfImporter, ImageTextureLoader> {
  ModelLoader::new(BundleResolver::new([root]), GltfImporter, ImageTextureLoader)
}

#[rstest]
fn triangle_loads_with_texture(bundle: TempDir) {
  let loaded = loader(bundle.path()).load_static_model("tri", "gltf").unwrap();
  assert!(loaded.is_complete());

  let model = loaded.into_inner();
  assert_eq!(model.meshes().len(), 1);

  let mesh = &model.meshes()[0];
  assert_eq!(mesh.vertices().len(), 3);
  assert_eq!(mesh.vertices()[2].position, glm::vec3(0.0, 1.0, 0.0));
  assert_eq!(mesh.vertices()[2].normal, glm::vec3(0.0, 0.0, 0.0));
  assert_eq!(mesh.indices(), &[0, 1, 2]);

  let material = mesh.material();
  assert_eq!(material.diffuse_colour, glm::vec4(1.0, 0.5, 0.5, 1.0));
  assert_eq!(material.specular_colour, glm::vec4(1.0, 1.0, 1.0, 1.0));
  assert_eq!(material.shininess, 32.0);
  assert!(material.specular_texture.is_none());

  let texture = material.diffuse_texture.as_ref().unwrap();
  assert_eq!(texture.name, "tri_albedo.png");
  assert_eq!((texture.width, texture.height), (4, 4));
  assert_eq!(texture.mip_levels(), 1);
}

#[rstest]
fn mipmaps_follow_loader_options(bundle: TempDir) {
  let loader = loader(bundle.path()).with_texture_options(TextureOptions { generate_mipmaps: true });

  let model = loader.load_static_model("tri", "gltf").unwrap().into_inner();
  let texture = model.meshes()[0].material().diffuse_texture.clone().unwrap();

  assert_eq!(texture.mip_levels(), 3);
}

#[rstest]
fn node_animation_becomes_one_channel(bundle: TempDir) {
  let model = loader(bundle.path()).load_animated_model("tri", "gltf").unwrap().into_inner();
  assert_eq!(model.animations().len(), 1);

  let animation = &model.animations()[0];
  assert_eq!(animation.duration(), 1.5);
  assert_eq!(animation.ticks_per_second(), 1.0);
  assert_eq!(animation.duration_seconds(), 1.5);
  assert_eq!(animation.channels().len(), 1);

  let body = animation.channel("body").unwrap();
  assert_eq!(body.positions(), &[glm::vec3(0.0, 0.0, 0.0), glm::vec3(1.0, 2.0, 3.0)]);
  assert!(body.scales().is_empty());
  assert_eq!(body.rotations().len(), 2);

  let turned = body.rotations()[1] * glm::vec3(1.0, 0.0, 0.0);
  assert!((turned - glm::vec3(0.0, 1.0, 0.0)).norm() < 1e-6);
}

#[rstest]
fn missing_texture_only_warns(bundle: TempDir) {
  std::fs::remove_file(bundle.path().join("tri_albedo.png")).unwrap();

  let loaded = loader(bundle.path()).load_static_model("tri", "gltf").unwrap();

  assert_eq!(loaded.warnings.len(), 1);
  assert_eq!(loaded.warnings[0].resource, "tri_albedo.png");
  assert!(loaded.model.meshes()[0].material().diffuse_texture.is_none());
}

#[rstest]
fn missing_buffer_is_an_import_error(bundle: TempDir) {
  std::fs::remove_file(bundle.path().join("tri.bin")).unwrap();

  let result = loader(bundle.path()).load_static_model("tri", "gltf");

  assert!(matches!(result, Err(LoaderError::ImportError(ImportError::GltfError(_)))));
}

#[rstest]
fn unknown_format_is_rejected(bundle: TempDir) {
  std::fs::copy(bundle.path().join("tri.gltf"), bundle.path().join("tri.obj")).unwrap();

  let result = loader(bundle.path()).load_static_model("tri", "obj");

  assert!(matches!(result, Err(LoaderError::ImportError(ImportError::UnsupportedFormat(_)))));
}

#[rstest]
fn morph_weight_tracks_are_not_channels(bundle: TempDir) {
  let document = TRIANGLE_GLTF
    .replace(
      r#""indices": 1, "material": 0 }]"#,
      r#""indices": 1, "material": 0, "targets": [{ "POSITION": 0 }] }], "weights": [0.0]"#,
    )
    .replace(
      r#"{ "sampler": 0, "target": { "node": 0, "path": "translation" } },
      { "sampler": 1, "target": { "node": 0, "path": "rotation" } }"#,
      r#"{ "sampler": 0, "target": { "node": 0, "path": "weights" } }"#,
    )
    .replace(r#"[{ "input": 2, "output": 3 }, { "input": 2, "output": 4 }]"#, r#"[{ "input": 2, "output": 2 }]"#);
  assert!(document.contains(r#""path": "weights""#));
  std::fs::write(bundle.path().join("face.gltf"), document).unwrap();

  let model = loader(bundle.path()).load_animated_model("face", "gltf").unwrap().into_inner();

  assert_eq!(model.animations().len(), 1);
  assert!(model.animations()[0].channels().is_empty());
  assert_eq!(model.animations()[0].duration(), 0.0);
}

#[rstest]
fn absent_model_is_not_found(bundle: TempDir) {
  let result = loader(bundle.path()).load_static_model("square", "gltf");
  assert!(matches!(result, Err(LoaderError::ResourceNotFound { .. })));
}
