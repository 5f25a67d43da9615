use crate::resolver::BundleResolver;
use crate::texture::TextureOptions;
use crate::Result;

use serde::Deserialize;
use serde_yaml as yml;

use std::path::{Path, PathBuf};

/// Loader configuration, usually read from a yaml file.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
#[serde(default)]
pub struct LoaderSettings {
  /// Directories searched in order for models and textures.
  pub bundle_dirs: Vec<PathBuf>,
  pub generate_mipmaps: bool,
}

impl Default for LoaderSettings {
  fn default() -> Self {
    Self {
      bundle_dirs: vec![PathBuf::from(".")],
      generate_mipmaps: false,
    }
  }
}

impl LoaderSettings {
  pub fn load_from_file(path: impl AsRef<Path>) -> Result<Self> {
    let file = std::fs::File::open(path)?;
    let settings = yml::from_reader(file)?;
    Ok(settings)
  }

  pub fn from_yaml(document: &str) -> Result<Self> {
    let settings = yml::from_str(document)?;
    Ok(settings)
  }

  pub fn resolver(&self) -> BundleResolver {
    BundleResolver::new(self.bundle_dirs.iter().cloned())
  }

  pub fn texture_options(&self) -> TextureOptions {
    TextureOptions {
      generate_mipmaps: self.generate_mipmaps,
    }
  }
}
