use crate::animation::decode_animation;
use crate::importer::{ImportMode, Importer, ImporterHandle, ScopedHandle};
use crate::material::{LoadWarning, MaterialResolver};
use crate::mesh::decode_mesh;
use crate::resolver::ResourceResolver;
use crate::texture::{TextureLoader, TextureOptions};
use crate::{LoaderError, Result};

use log::{debug, info};
use model_assets::{Animation, Mesh, Model, ModelAnimated};

use std::path::PathBuf;

/// A finished load together with the textures that could not be loaded along the way.
#[derive(Debug)]
pub struct Loaded<T> {
  pub model: T,
  pub warnings: Vec<LoadWarning>,
}

impl<T> Loaded<T> {
  pub fn into_inner(self) -> T {
    self.model
  }

  pub fn is_complete(&self) -> bool {
    self.warnings.is_empty()
  }
}

pub struct ModelLoader<R, I, T> {
  resolver: R,
  importer: I,
  textures: T,
  texture_options: TextureOptions,
}

impl<R, I, T> ModelLoader<R, I, T>
where
  R: ResourceResolver,
  I: Importer,
  T: TextureLoader,
{
  pub fn new(resolver: R, importer: I, textures: T) -> Self {
    Self {
      resolver,
      importer,
      textures,
      texture_options: TextureOptions::default(),
    }
  }

  pub fn with_texture_options(mut self, texture_options: TextureOptions) -> Self {
    self.texture_options = texture_options;
    self
  }

  pub fn importer(&self) -> &I {
    &self.importer
  }

  /// Loads meshes and materials of the resource `name` of type `ty`.
  pub fn load_static_model(&self, name: &str, ty: &str) -> Result<Loaded<Model>> {
    let path = self.resolve(name, ty)?;
    let handle = ScopedHandle::open(&self.importer, &path, ty, ImportMode::Static)?;

    let (meshes, warnings) = self.load_meshes(&*handle)?;
    drop(handle);
    info!("Loaded static model {}.{}: {} mesh(es), {} warning(s)", name, ty, meshes.len(), warnings.len());

    Ok(Loaded {
      model: Model::new(name, meshes),
      warnings,
    })
  }

  /// Loads meshes, materials and animations of the resource `name` of type `ty`.
  pub fn load_animated_model(&self, name: &str, ty: &str) -> Result<Loaded<ModelAnimated>> {
    let path = self.resolve(name, ty)?;
    let handle = ScopedHandle::open(&self.importer, &path, ty, ImportMode::Animated)?;

    let (meshes, warnings) = self.load_meshes(&*handle)?;
    let animations = load_animations(&*handle);
    drop(handle);
    info!(
      "Loaded animated model {}.{}: {} mesh(es), {} animation(s), {} warning(s)",
      name,
      ty,
      meshes.len(),
      animations.len(),
      warnings.len()
    );

    Ok(Loaded {
      model: ModelAnimated::new(name, meshes, animations),
      warnings,
    })
  }

  fn resolve(&self, name: &str, ty: &str) -> Result<PathBuf> {
    self.resolver.resolve(name, ty).ok_or_else(|| LoaderError::ResourceNotFound {
      name: name.to_owned(),
      ty: ty.to_owned(),
    })
  }

  fn load_meshes(&self, handle: &I::Handle) -> Result<(Vec<Mesh>, Vec<LoadWarning>)> {
    let mut materials = MaterialResolver::new(&self.resolver, &self.textures, self.texture_options);
    let mesh_count = handle.mesh_count();
    let mut meshes = Vec::with_capacity(mesh_count);

    for mesh_index in 0..mesh_count {
      let geometry = decode_mesh(handle, mesh_index);
      let material = materials.resolve_material(handle, mesh_index)?;
      debug!("Decoded mesh {}: {} vertices, {} indices", mesh_index, geometry.vertices.len(), geometry.indices.len());
      meshes.push(geometry.with_material(material));
    }

    Ok((meshes, materials.into_warnings()))
  }
}

fn load_animations<H: ImporterHandle + ?Sized>(handle: &H) -> Vec<Animation> {
  (0..handle.animation_count())
    .map(|animation_index| {
      let animation = decode_animation(handle, animation_index);
      debug!("Decoded animation {}: {} channel(s)", animation_index, animation.channels().len());
      animation
    })
    .collect()
}
