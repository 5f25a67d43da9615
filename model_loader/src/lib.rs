//! Turns 3D asset files found in resource bundles into [`Model`](model_assets::Model)s and
//! [`ModelAnimated`](model_assets::ModelAnimated)s.

mod animation;
mod error;
mod gltf;
mod importer;
mod loader;
mod material;
mod mesh;
mod raw;
mod resolver;
mod settings;
mod stride;
mod texture;

pub use error::{ImportError, LoaderError, Result, TextureError};

pub use crate::gltf::{GltfImporter, SUPPORTED_FORMATS};
pub use animation::decode_animation;
pub use importer::{ImportMode, Importer, ImporterHandle, ScopedHandle};
pub use loader::{Loaded, ModelLoader};
pub use material::{LoadWarning, MaterialResolver, TextureSlot};
pub use mesh::{decode_mesh, decode_vertices, MeshGeometry};
pub use raw::{MemoryImporter, RawAnimation, RawChannel, RawMesh, RawScene};
pub use resolver::{split_extension, BundleResolver, MissingExtension, ResourceResolver};
pub use settings::LoaderSettings;
pub use stride::{unpack, unpack_rotations, unpack_vectors, ROTATION_STRIDE, VECTOR_STRIDE};
pub use texture::{ImageTextureLoader, TextureLoader, TextureOptions};
