//! In-memory scene in the importer's flat buffer layout.

use crate::importer::{ImportMode, Importer, ImporterHandle};
use crate::ImportError;

use model_assets::VERTEX_STRIDE;

use std::cell::Cell;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawScene {
  pub meshes: Vec<RawMesh>,
  pub animations: Vec<RawAnimation>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawMesh {
  pub vertices: Vec<f32>,
  pub indices: Vec<u32>,
  pub diffuse_map: Option<String>,
  pub specular_map: Option<String>,
  pub diffuse_colour: [f32; 4],
  pub specular_colour: [f32; 4],
  pub shininess: f32,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawAnimation {
  pub duration: f64,
  pub ticks_per_second: f64,
  pub channels: Vec<RawChannel>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawChannel {
  pub name: String,
  pub positions: Vec<f32>,
  pub scales: Vec<f32>,
  pub rotations: Vec<f32>,
}

impl RawScene {
  fn channel(&self, animation: usize, channel: usize) -> &RawChannel {
    &self.animations[animation].channels[channel]
  }
}

impl ImporterHandle for RawScene {
  fn mesh_count(&self) -> usize {
    self.meshes.len()
  }

  fn vertex_count(&self, mesh: usize) -> usize {
    self.meshes[mesh].vertices.len() / VERTEX_STRIDE
  }

  fn mesh_vertices(&self, mesh: usize) -> Vec<f32> {
    self.meshes[mesh].vertices.clone()
  }

  fn index_count(&self, mesh: usize) -> usize {
    self.meshes[mesh].indices.len()
  }

  fn mesh_indices(&self, mesh: usize) -> Vec<u32> {
    self.meshes[mesh].indices.clone()
  }

  fn diffuse_map(&self, mesh: usize) -> Option<String> {
    self.meshes[mesh].diffuse_map.clone()
  }

  fn specular_map(&self, mesh: usize) -> Option<String> {
    self.meshes[mesh].specular_map.clone()
  }

  fn diffuse_colour(&self, mesh: usize) -> [f32; 4] {
    self.meshes[mesh].diffuse_colour
  }

  fn specular_colour(&self, mesh: usize) -> [f32; 4] {
    self.meshes[mesh].specular_colour
  }

  fn shininess(&self, mesh: usize) -> f32 {
    self.meshes[mesh].shininess
  }

  fn animation_count(&self) -> usize {
    self.animations.len()
  }

  fn animation_duration(&self, animation: usize) -> f64 {
    self.animations[animation].duration
  }

  fn animation_ticks_per_second(&self, animation: usize) -> f64 {
    self.animations[animation].ticks_per_second
  }

  fn channel_count(&self, animation: usize) -> usize {
    self.animations[animation].channels.len()
  }

  fn channel_name(&self, animation: usize, channel: usize) -> String {
    self.channel(animation, channel).name.clone()
  }

  fn channel_positions(&self, animation: usize, channel: usize) -> Vec<f32> {
    self.channel(animation, channel).positions.clone()
  }

  fn channel_scales(&self, animation: usize, channel: usize) -> Vec<f32> {
    self.channel(animation, channel).scales.clone()
  }

  fn channel_rotations(&self, animation: usize, channel: usize) -> Vec<f32> {
    self.channel(animation, channel).rotations.clone()
  }
}

/// Hands out copies of a prepared scene for any path and keeps track of open handles.
#[derive(Debug, Default)]
pub struct MemoryImporter {
  scene: Option<RawScene>,
  opened: Cell<usize>,
  closed: Cell<usize>,
}

impl MemoryImporter {
  pub fn new(scene: RawScene) -> Self {
    Self {
      scene: Some(scene),
      ..Default::default()
    }
  }

  /// An importer that fails to parse every file.
  pub fn unreadable() -> Self {
    Self::default()
  }

  pub fn opened(&self) -> usize {
    self.opened.get()
  }

  pub fn open_handles(&self) -> usize {
    self.opened.get() - self.closed.get()
  }
}

impl Importer for MemoryImporter {
  type Handle = RawScene;

  fn open(&self, _path: &Path, _format_hint: &str, mode: ImportMode) -> Result<Self::Handle, ImportError> {
    let mut scene = self.scene.clone().ok_or(ImportError::ParsingError("scene could not be parsed"))?;
    if mode == ImportMode::Static {
      scene.animations.clear();
    }

    self.opened.set(self.opened.get() + 1);
    Ok(scene)
  }

  fn close(&self, _handle: Self::Handle) {
    self.closed.set(self.closed.get() + 1);
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn static_import_carries_no_animations() {
    let scene = RawScene {
      animations: vec![RawAnimation::default()],
      ..Default::default()
    };
    let importer = MemoryImporter::new(scene);

    let handle = importer.open(Path::new("a.fbx"), "fbx", ImportMode::Static).unwrap();
    assert_eq!(handle.animation_count(), 0);
    importer.close(handle);

    let handle = importer.open(Path::new("a.fbx"), "fbx", ImportMode::Animated).unwrap();
    assert_eq!(handle.animation_count(), 1);
    importer.close(handle);

    assert_eq!(importer.opened(), 2);
    assert_eq!(importer.open_handles(), 0);
  }

  #[test]
  fn unreadable_importer_never_opens() {
    let importer = MemoryImporter::unreadable();
    let result = importer.open(Path::new("a.fbx"), "fbx", ImportMode::Static);

    assert!(matches!(result, Err(ImportError::ParsingError(_))));
    assert_eq!(importer.opened(), 0);
  }
}
