use crate::resolver::MissingExtension;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, LoaderError>;

#[derive(Error, Debug)]
pub enum LoaderError {
  #[error("no resource named {name:?} of type {ty:?} could be found")]
  ResourceNotFound { name: String, ty: String },
  #[error("importer failed: {0}")]
  ImportError(#[from] ImportError),
  #[error("failed to resolve material of mesh {mesh_index}: {source}")]
  MaterialError {
    mesh_index: usize,
    #[source]
    source: MissingExtension,
  },
  #[error("error processing asset: {0}")]
  AssetError(#[from] model_assets::AssetError),
  #[error("failed to parse loader settings: {0}")]
  SettingsError(#[from] serde_yaml::Error),
  #[error("file error: {0}")]
  FileError(#[from] std::io::Error),
}

#[derive(Error, Debug)]
pub enum ImportError {
  #[error("failed to parse gltf document: {0}")]
  GltfError(#[from] gltf::Error),
  #[error("no importer available for format {0:?}")]
  UnsupportedFormat(String),
  #[error("tried to access a resource that doesn't exist!")]
  MissingResource,
  #[error("couldn't parse resource: {0}")]
  ParsingError(&'static str),
}

#[derive(Error, Debug)]
pub enum TextureError {
  #[error("texture {name}.{ty} is not part of any bundle")]
  Unresolved { name: String, ty: String },
  #[error("failed to read texture file: {0}")]
  FileError(#[from] std::io::Error),
  #[error("failed to decode texture: {0}")]
  DecodeError(#[from] image::ImageError),
}
