//! Texture decoding.

use crate::resolver::display_name;
use crate::TextureError;

use image::imageops::FilterType;
use image::RgbaImage;
use log::debug;
use model_assets::Texture;

use std::path::Path;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TextureOptions {
  pub generate_mipmaps: bool,
}

pub trait TextureLoader {
  fn load_texture(&self, path: &Path, options: &TextureOptions) -> Result<Texture, TextureError>;
}

impl<T: TextureLoader + ?Sized> TextureLoader for &T {
  fn load_texture(&self, path: &Path, options: &TextureOptions) -> Result<Texture, TextureError> {
    (**self).load_texture(path, options)
  }
}

/// Decodes any format the `image` crate understands into RGBA8.
#[derive(Debug, Clone, Copy, Default)]
pub struct ImageTextureLoader;

impl TextureLoader for ImageTextureLoader {
  fn load_texture(&self, path: &Path, options: &TextureOptions) -> Result<Texture, TextureError> {
    let bytes = std::fs::read(path)?;
    let image = image::load_from_memory(&bytes)?.to_rgba8();
    let (width, height) = image.dimensions();

    let levels = if options.generate_mipmaps { mip_chain(image) } else { vec![image.into_raw()] };
    debug!("Decoded texture {} ({}x{}, {} level(s))", path.display(), width, height, levels.len());

    Ok(Texture {
      name: display_name(path),
      width,
      height,
      levels,
    })
  }
}

fn mip_chain(image: RgbaImage) -> Vec<Vec<u8>> {
  let mut levels = Vec::new();
  let mut current = image;

  loop {
    let (width, height) = current.dimensions();
    if width == 1 && height == 1 {
      levels.push(current.into_raw());
      return levels;
    }

    let next = image::imageops::resize(&current, (width / 2).max(1), (height / 2).max(1), FilterType::Triangle);
    levels.push(current.into_raw());
    current = next;
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn write_png(dir: &Path, name: &str, width: u32, height: u32) -> std::path::PathBuf {
    let path = dir.join(name);
    RgbaImage::from_pixel(width, height, image::Rgba([200, 100, 50, 255])).save(&path).unwrap();
    path
  }

  #[test]
  fn decodes_to_rgba8_without_mipmaps() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "brick.png", 4, 2);

    let texture = ImageTextureLoader.load_texture(&path, &TextureOptions::default()).unwrap();

    assert_eq!(texture.name, "brick.png");
    assert_eq!((texture.width, texture.height), (4, 2));
    assert_eq!(texture.mip_levels(), 1);
    assert_eq!(texture.levels[0].len(), 4 * 2 * 4);
    assert_eq!(&texture.levels[0][..4], &[200, 100, 50, 255]);
  }

  #[test]
  fn mip_chain_reaches_one_pixel() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_png(dir.path(), "wide.png", 8, 2);

    let options = TextureOptions { generate_mipmaps: true };
    let texture = ImageTextureLoader.load_texture(&path, &options).unwrap();

    assert_eq!(texture.mip_levels(), 4);
    for (level, data) in texture.levels.iter().enumerate() {
      let (width, height) = texture.level_extent(level);
      assert_eq!(data.len(), (width * height * 4) as usize);
    }
  }

  #[test]
  fn missing_file_is_a_file_error() {
    let dir = tempfile::tempdir().unwrap();
    let result = ImageTextureLoader.load_texture(&dir.path().join("gone.png"), &TextureOptions::default());
    assert!(matches!(result, Err(TextureError::FileError(_))));
  }

  #[test]
  fn garbage_is_a_decode_error() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("noise.png");
    std::fs::write(&path, b"definitely not a png").unwrap();

    let result = ImageTextureLoader.load_texture(&path, &TextureOptions::default());
    assert!(matches!(result, Err(TextureError::DecodeError(_))));
  }
}
