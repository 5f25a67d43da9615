use super::{Animation, Asset, AssetError, AssetFile, AssetType, Material, Result};

use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};

use std::path::Path;

const MODEL_VERSION: u32 = 1;

/// Number of floats describing one vertex in a flat buffer: position.xyz, normal.xyz, uv.xy.
pub const VERTEX_STRIDE: usize = 8;

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
  pub position: glm::Vec3,
  pub normal: glm::Vec3,
  pub tex_coord: glm::Vec2,
}

impl Vertex {
  pub fn new(position: glm::Vec3, normal: glm::Vec3, tex_coord: glm::Vec2) -> Self {
    Self { position, normal, tex_coord }
  }

  pub fn to_array(&self) -> [f32; VERTEX_STRIDE] {
    let (p, n, t) = (&self.position, &self.normal, &self.tex_coord);
    [p.x, p.y, p.z, n.x, n.y, n.z, t.x, t.y]
  }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Mesh {
  vertices: Vec<Vertex>,
  indices: Vec<u32>, // triangle list into `vertices`, not range checked
  material: Material,
}

impl Mesh {
  pub fn new(vertices: Vec<Vertex>, indices: Vec<u32>, material: Material) -> Self {
    Self { vertices, indices, material }
  }

  pub fn vertices(&self) -> &[Vertex] {
    self.vertices.as_ref()
  }

  pub fn indices(&self) -> &[u32] {
    self.indices.as_ref()
  }

  pub fn material(&self) -> &Material {
    &self.material
  }

  /// Interleaved vertex data in the same layout the importer hands out.
  pub fn vertex_buffer(&self) -> Vec<f32> {
    self.vertices.iter().flat_map(Vertex::to_array).collect()
  }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct Model {
  name: String,
  meshes: Vec<Mesh>,
}

impl Model {
  pub fn new(name: &str, meshes: Vec<Mesh>) -> Self {
    Self {
      name: name.to_owned(),
      meshes,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn meshes(&self) -> &[Mesh] {
    self.meshes.as_ref()
  }

  pub fn from_asset(asset: AssetFile) -> Result<Self> {
    check_asset(&asset, AssetType::Model)?;
    let model = bincode::deserialize(&asset.blob)?;
    Ok(model)
  }

  pub fn load_model(path: impl AsRef<Path>) -> Result<Self> {
    Self::from_asset(AssetFile::load_from_file(path)?)
  }
}

impl Asset for Model {
  fn convert_to_asset(self) -> Result<AssetFile> {
    let header = ModelHeader::new(&self.name, &self.meshes, 0);
    let json = serde_json::to_string(&header)?;
    let blob = bincode::serialize(&self)?;
    Ok(AssetFile {
      asset_type: AssetType::Model,
      version: MODEL_VERSION,
      json,
      blob,
    })
  }
}

#[derive(Serialize, Deserialize, Debug, Clone, Default, PartialEq)]
pub struct ModelAnimated {
  name: String,
  meshes: Vec<Mesh>,
  animations: Vec<Animation>,
}

impl ModelAnimated {
  pub fn new(name: &str, meshes: Vec<Mesh>, animations: Vec<Animation>) -> Self {
    Self {
      name: name.to_owned(),
      meshes,
      animations,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn meshes(&self) -> &[Mesh] {
    self.meshes.as_ref()
  }

  pub fn animations(&self) -> &[Animation] {
    self.animations.as_ref()
  }

  pub fn from_asset(asset: AssetFile) -> Result<Self> {
    check_asset(&asset, AssetType::AnimatedModel)?;
    let model = bincode::deserialize(&asset.blob)?;
    Ok(model)
  }

  pub fn load_model(path: impl AsRef<Path>) -> Result<Self> {
    Self::from_asset(AssetFile::load_from_file(path)?)
  }
}

impl Asset for ModelAnimated {
  fn convert_to_asset(self) -> Result<AssetFile> {
    let header = ModelHeader::new(&self.name, &self.meshes, self.animations.len());
    let json = serde_json::to_string(&header)?;
    let blob = bincode::serialize(&self)?;
    Ok(AssetFile {
      asset_type: AssetType::AnimatedModel,
      version: MODEL_VERSION,
      json,
      blob,
    })
  }
}

/// Readable summary stored next to the binary model data.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct ModelHeader {
  pub name: String,
  pub mesh_count: usize,
  pub vertex_count: usize,
  pub index_count: usize,
  pub animation_count: usize,
}

impl ModelHeader {
  fn new(name: &str, meshes: &[Mesh], animation_count: usize) -> Self {
    Self {
      name: name.to_owned(),
      mesh_count: meshes.len(),
      vertex_count: meshes.iter().map(|mesh| mesh.vertices.len()).sum(),
      index_count: meshes.iter().map(|mesh| mesh.indices.len()).sum(),
      animation_count,
    }
  }

  pub fn from_asset(asset: &AssetFile) -> Result<Self> {
    let header = serde_json::from_str(&asset.json)?;
    Ok(header)
  }
}

fn check_asset(asset: &AssetFile, expected: AssetType) -> Result<()> {
  if asset.asset_type != expected {
    return Err(AssetError::IncorrectType(expected.name(), asset.asset_type.name()));
  }

  if asset.version < MODEL_VERSION {
    return Err(AssetError::OldVersion);
  }

  Ok(())
}
