mod animation;
mod asset;
mod error;
mod material;
mod model;

pub(crate) use error::Result;

pub use animation::{Animation, AnimationChannel};
pub use asset::{Asset, AssetArchive, AssetFile, AssetType};
pub use error::AssetError;
pub use material::{Material, Texture};
pub use model::{Mesh, Model, ModelAnimated, ModelHeader, Vertex, VERTEX_STRIDE};

pub use nalgebra_glm as glm;
