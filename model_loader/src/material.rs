use crate::importer::ImporterHandle;
use crate::resolver::{split_extension, ResourceResolver};
use crate::texture::{TextureLoader, TextureOptions};
use crate::{LoaderError, Result, TextureError};

use log::{trace, warn};
use model_assets::{glm, Material, Texture};

use std::collections::hash_map::Entry;
use std::collections::HashMap;
use std::fmt;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TextureSlot {
  Diffuse,
  Specular,
}

impl fmt::Display for TextureSlot {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    match self {
      TextureSlot::Diffuse => f.write_str("diffuse"),
      TextureSlot::Specular => f.write_str("specular"),
    }
  }
}

/// A texture that could not be loaded. The affected material slot was left empty and loading went on.
#[derive(Debug)]
pub struct LoadWarning {
  pub resource: String,
  pub mesh_index: usize,
  pub slot: TextureSlot,
  pub error: TextureError,
}

impl fmt::Display for LoadWarning {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    write!(f, "could not load {} texture {:?} of mesh {}: {}", self.slot, self.resource, self.mesh_index, self.error)
  }
}

/// Builds materials for the meshes of one load, sharing decoded textures between meshes.
pub struct MaterialResolver<'a, R: ?Sized, T: ?Sized> {
  resolver: &'a R,
  textures: &'a T,
  options: TextureOptions,
  cache: HashMap<PathBuf, Arc<Texture>>,
  warnings: Vec<LoadWarning>,
}

impl<'a, R, T> MaterialResolver<'a, R, T>
where
  R: ResourceResolver + ?Sized,
  T: TextureLoader + ?Sized,
{
  pub fn new(resolver: &'a R, textures: &'a T, options: TextureOptions) -> Self {
    Self {
      resolver,
      textures,
      options,
      cache: HashMap::new(),
      warnings: Vec::new(),
    }
  }

  /// Fails only when a texture file name has no extension; texture loading problems become warnings.
  pub fn resolve_material<H: ImporterHandle + ?Sized>(&mut self, handle: &H, mesh_index: usize) -> Result<Material> {
    let diffuse_texture = self.load_slot(handle.diffuse_map(mesh_index), mesh_index, TextureSlot::Diffuse)?;
    let specular_texture = self.load_slot(handle.specular_map(mesh_index), mesh_index, TextureSlot::Specular)?;

    Ok(Material {
      diffuse_texture,
      specular_texture,
      diffuse_colour: glm::Vec4::from(handle.diffuse_colour(mesh_index)),
      specular_colour: glm::Vec4::from(handle.specular_colour(mesh_index)),
      shininess: handle.shininess(mesh_index),
    })
  }

  pub fn warnings(&self) -> &[LoadWarning] {
    self.warnings.as_ref()
  }

  pub fn into_warnings(self) -> Vec<LoadWarning> {
    self.warnings
  }

  fn load_slot(&mut self, file_name: Option<String>, mesh_index: usize, slot: TextureSlot) -> Result<Option<Arc<Texture>>> {
    let Some(file_name) = file_name else {
      return Ok(None);
    };

    let (name, ty) = split_extension(&file_name).map_err(|source| LoaderError::MaterialError { mesh_index, source })?;
    match self.load_texture(name, ty) {
      Ok(texture) => Ok(Some(texture)),
      Err(error) => {
        let warning = LoadWarning {
          resource: file_name,
          mesh_index,
          slot,
          error,
        };
        warn!("{}", warning);
        self.warnings.push(warning);
        Ok(None)
      }
    }
  }

  fn load_texture(&mut self, name: &str, ty: &str) -> std::result::Result<Arc<Texture>, TextureError> {
    let path = self.resolver.resolve(name, ty).ok_or_else(|| TextureError::Unresolved {
      name: name.to_owned(),
      ty: ty.to_owned(),
    })?;

    match self.cache.entry(path) {
      Entry::Occupied(entry) => {
        trace!("Texture already loaded: {}", entry.key().display());
        Ok(entry.get().clone())
      }
      Entry::Vacant(entry) => {
        let texture = Arc::new(self.textures.load_texture(entry.key(), &self.options)?);
        Ok(entry.insert(texture).clone())
      }
    }
  }
}
