//! Lookup of named resources inside the application's bundle directories.

use log::trace;
use thiserror::Error;

use std::path::{Path, PathBuf};

pub trait ResourceResolver {
  /// Path of the resource `name` of type `ty`, `None` when no bundle provides it.
  fn resolve(&self, name: &str, ty: &str) -> Option<PathBuf>;
}

/// Searches an ordered list of directories for `<name>.<ty>`.
#[derive(Debug, Clone, Default)]
pub struct BundleResolver {
  roots: Vec<PathBuf>,
}

impl BundleResolver {
  pub fn new<P: Into<PathBuf>>(roots: impl IntoIterator<Item = P>) -> Self {
    Self {
      roots: roots.into_iter().map(Into::into).collect(),
    }
  }

  pub fn roots(&self) -> &[PathBuf] {
    self.roots.as_ref()
  }
}

impl ResourceResolver for BundleResolver {
  fn resolve(&self, name: &str, ty: &str) -> Option<PathBuf> {
    let file_name = if ty.is_empty() { name.to_owned() } else { format!("{name}.{ty}") };

    let found = self.roots.iter().map(|root| root.join(&file_name)).find(|path| path.is_file());
    trace!("Resolving {} in {} bundle(s): {:?}", file_name, self.roots.len(), found);
    found
  }
}

impl<R: ResourceResolver + ?Sized> ResourceResolver for &R {
  fn resolve(&self, name: &str, ty: &str) -> Option<PathBuf> {
    (**self).resolve(name, ty)
  }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("file name {0:?} has no extension")]
pub struct MissingExtension(pub String);

/// Splits a file name at its last `.` into base name and extension.
pub fn split_extension(file_name: &str) -> Result<(&str, &str), MissingExtension> {
  file_name.rsplit_once('.').ok_or_else(|| MissingExtension(file_name.to_owned()))
}

pub(crate) fn display_name(path: &Path) -> String {
  path.file_name().map(|name| name.to_string_lossy().into_owned()).unwrap_or_else(|| path.display().to_string())
}
