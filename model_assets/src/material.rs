use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};

use std::fmt;
use std::sync::Arc;

/// Decoded RGBA8 texture. `levels[0]` is the full resolution image, every following level halves it.
#[derive(Serialize, Deserialize, Clone, PartialEq)]
pub struct Texture {
  pub name: String,
  pub width: u32,
  pub height: u32,
  pub levels: Vec<Vec<u8>>,
}

impl Texture {
  pub fn mip_levels(&self) -> usize {
    self.levels.len()
  }

  /// Dimensions of the given mip level, never smaller than 1x1.
  pub fn level_extent(&self, level: usize) -> (u32, u32) {
    let shift = level.min(31) as u32;
    ((self.width >> shift).max(1), (self.height >> shift).max(1))
  }
}

impl fmt::Debug for Texture {
  fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
    f.debug_struct("Texture")
      .field("name", &self.name)
      .field("width", &self.width)
      .field("height", &self.height)
      .field("mip_levels", &self.levels.len())
      .finish()
  }
}

/// Surface description of a mesh. Texture slots are empty when the asset has no map or the map failed to load.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Material {
  pub diffuse_texture: Option<Arc<Texture>>,
  pub specular_texture: Option<Arc<Texture>>,
  pub diffuse_colour: glm::Vec4,
  pub specular_colour: glm::Vec4,
  pub shininess: f32,
}

impl Material {
  pub fn untextured(diffuse_colour: glm::Vec4, specular_colour: glm::Vec4, shininess: f32) -> Self {
    Self {
      diffuse_texture: None,
      specular_texture: None,
      diffuse_colour,
      specular_colour,
      shininess,
    }
  }

  pub fn is_textured(&self) -> bool {
    self.diffuse_texture.is_some() || self.specular_texture.is_some()
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn texture_debug_skips_pixel_data() {
    let texture = Texture {
      name: "brick.png".to_owned(),
      width: 2,
      height: 2,
      levels: vec![vec![255; 16], vec![255; 4]],
    };

    let debug = format!("{texture:?}");
    assert!(debug.contains("brick.png"));
    assert!(debug.contains("mip_levels: 2"));
    assert!(!debug.contains("255"));
  }

  #[test]
  fn level_extent_bottoms_out_at_one() {
    let texture = Texture {
      name: "wide.png".to_owned(),
      width: 8,
      height: 2,
      levels: Vec::new(),
    };

    assert_eq!(texture.level_extent(0), (8, 2));
    assert_eq!(texture.level_extent(2), (2, 1));
    assert_eq!(texture.level_extent(3), (1, 1));
  }

  #[test]
  fn untextured_material_keeps_colours() {
    let material = Material::untextured(glm::vec4(1.0, 0.0, 0.0, 1.0), glm::vec4(0.5, 0.5, 0.5, 1.0), 32.0);

    assert!(!material.is_textured());
    assert_eq!(material.diffuse_colour, glm::vec4(1.0, 0.0, 0.0, 1.0));
    assert_eq!(material.shininess, 32.0);
  }
}
