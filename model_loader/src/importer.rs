//! Boundary to the native asset importer.
//!
//! An importer parses one file into a handle that exposes the scene as counts and flat numeric buffers.
//! Handles hold importer-side state and must be given back through [`Importer::close`]; [`ScopedHandle`]
//! makes sure that happens on every exit path.

use crate::ImportError;

use log::trace;

use std::ops::Deref;
use std::path::Path;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
  /// Geometry and materials only.
  Static,
  /// Geometry, materials and animations.
  Animated,
}

pub trait Importer {
  type Handle: ImporterHandle;

  fn open(&self, path: &Path, format_hint: &str, mode: ImportMode) -> Result<Self::Handle, ImportError>;

  fn close(&self, handle: Self::Handle);
}

/// Read access to a parsed scene.
///
/// Indices passed in must be below the matching count. Vertex buffers have a stride of 8 floats
/// (position.xyz, normal.xyz, uv.xy), position and scale keys 3 floats, rotation keys 9 floats
/// forming a row-major 3x3 matrix.
pub trait ImporterHandle {
  fn mesh_count(&self) -> usize;
  fn vertex_count(&self, mesh: usize) -> usize;
  fn mesh_vertices(&self, mesh: usize) -> Vec<f32>;
  fn index_count(&self, mesh: usize) -> usize;
  fn mesh_indices(&self, mesh: usize) -> Vec<u32>;

  /// File name of the diffuse map, `None` when the importer did not load one.
  fn diffuse_map(&self, mesh: usize) -> Option<String>;
  /// File name of the specular map, `None` when the importer did not load one.
  fn specular_map(&self, mesh: usize) -> Option<String>;
  fn diffuse_colour(&self, mesh: usize) -> [f32; 4];
  fn specular_colour(&self, mesh: usize) -> [f32; 4];
  fn shininess(&self, mesh: usize) -> f32;

  fn animation_count(&self) -> usize;
  fn animation_duration(&self, animation: usize) -> f64;
  fn animation_ticks_per_second(&self, animation: usize) -> f64;
  fn channel_count(&self, animation: usize) -> usize;
  fn channel_name(&self, animation: usize, channel: usize) -> String;
  fn channel_positions(&self, animation: usize, channel: usize) -> Vec<f32>;
  fn channel_scales(&self, animation: usize, channel: usize) -> Vec<f32>;
  fn channel_rotations(&self, animation: usize, channel: usize) -> Vec<f32>;
}

/// Owns an open handle and closes it through its importer when dropped.
pub struct ScopedHandle<'a, I: Importer> {
  importer: &'a I,
  handle: Option<I::Handle>,
}

impl<'a, I: Importer> ScopedHandle<'a, I> {
  pub fn open(importer: &'a I, path: &Path, format_hint: &str, mode: ImportMode) -> Result<Self, ImportError> {
    let handle = importer.open(path, format_hint, mode)?;
    trace!("Opened importer handle for {}", path.display());

    Ok(Self {
      importer,
      handle: Some(handle),
    })
  }
}

impl<I: Importer> Deref for ScopedHandle<'_, I> {
  type Target = I::Handle;

  fn deref(&self) -> &Self::Target {
    match &self.handle {
      Some(handle) => handle,
      None => unreachable!("importer handle is only taken on drop"),
    }
  }
}

impl<I: Importer> Drop for ScopedHandle<'_, I> {
  fn drop(&mut self) {
    if let Some(handle) = self.handle.take() {
      self.importer.close(handle);
      trace!("Closed importer handle");
    }
  }
}
