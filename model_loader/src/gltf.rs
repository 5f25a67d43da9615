//! Importer for glTF documents.
//!
//! The document is flattened into a [`RawScene`]: every triangle primitive becomes one mesh and every
//! animated node one channel. Images are not decoded here, materials only carry texture file names.

use crate::importer::{ImportMode, Importer};
use crate::raw::{RawAnimation, RawChannel, RawMesh, RawScene};
use crate::ImportError;

use gltf::accessor::Dimensions;
use gltf::animation::{Interpolation, Property};
use log::{debug, warn};
use model_assets::glm;
use num_traits::FromPrimitive;

use std::path::Path;

type Result<T> = std::result::Result<T, ImportError>;

pub const SUPPORTED_FORMATS: [&str; 3] = ["gltf", "glb", "vrm"];

const SPECULAR_COLOUR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
const MAX_SHININESS: f32 = 128.0;

#[derive(Debug, Clone, Copy, Default)]
pub struct GltfImporter;

impl Importer for GltfImporter {
  type Handle = RawScene;

  fn open(&self, path: &Path, format_hint: &str, mode: ImportMode) -> Result<RawScene> {
    let format = format_hint.to_ascii_lowercase();
    if !SUPPORTED_FORMATS.contains(&format.as_str()) {
      return Err(ImportError::UnsupportedFormat(format_hint.to_owned()));
    }

    let gltf::Gltf { document, blob } = gltf::Gltf::open(path)?;
    let buffers = gltf::import_buffers(&document, path.parent(), blob)?;
    debug!("Parsed gltf file {} ({} buffer(s))", path.display(), buffers.len());

    let reader = GltfReader { document, buffers };
    let meshes = reader.parse_meshes()?;
    let animations = match mode {
      ImportMode::Static => Vec::new(),
      ImportMode::Animated => reader.parse_animations()?,
    };

    Ok(RawScene { meshes, animations })
  }

  fn close(&self, handle: RawScene) {
    debug!("Releasing gltf scene with {} mesh(es)", handle.meshes.len());
  }
}

struct GltfReader {
  document: gltf::Document,
  buffers: Vec<gltf::buffer::Data>,
}

impl GltfReader {
  fn parse_meshes(&self) -> Result<Vec<RawMesh>> {
    let mut meshes = Vec::new();

    for mesh in self.document.meshes() {
      for primitive in mesh.primitives() {
        match self.parse_primitive(&primitive)? {
          Some(raw) => meshes.push(raw),
          None => warn!("Skipping {:?} primitive of gltf mesh {}", primitive.mode(), mesh.index()),
        }
      }
    }

    Ok(meshes)
  }

  fn parse_primitive(&self, primitive: &gltf::Primitive) -> Result<Option<RawMesh>> {
    let mut attributes = Attributes::default();
    for (semantic, accessor) in primitive.attributes() {
      match semantic {
        gltf::Semantic::Positions => attributes.positions = self.parse_accessor(&accessor)?,
        gltf::Semantic::Normals => attributes.normals = self.parse_accessor(&accessor)?,
        gltf::Semantic::TexCoords(0) => attributes.tex_coords = self.parse_accessor(&accessor)?,
        _ => (),
      }
    }

    if attributes.positions.is_empty() {
      return Err(ImportError::ParsingError("primitive has no position data!"));
    }

    attributes.fill_missing();

    if !attributes.attributes_are_equal() {
      return Err(ImportError::ParsingError("primitive attributes do not have equal length!"));
    }

    let indices: Vec<u32> = match primitive.indices() {
      Some(indices) => self.parse_accessor::<1, u32>(&indices)?.into_iter().map(|[index]| index).collect(),
      None => (0..attributes.positions.len() as u32).collect(),
    };

    let indices = match primitive.mode() {
      gltf::mesh::Mode::Triangles => indices,
      gltf::mesh::Mode::TriangleStrip => convert_indices_from_strip(&indices),
      gltf::mesh::Mode::TriangleFan => convert_indices_from_fan(&indices),
      gltf::mesh::Mode::Points | gltf::mesh::Mode::Lines | gltf::mesh::Mode::LineLoop | gltf::mesh::Mode::LineStrip => return Ok(None),
    };

    let material = primitive.material();
    let pbr = material.pbr_metallic_roughness();
    let diffuse_map = pbr.base_color_texture().and_then(|info| texture_file_name(&info.texture()));
    let roughness = pbr.roughness_factor().clamp(0.0, 1.0);

    Ok(Some(RawMesh {
      vertices: attributes.interleave(),
      indices,
      diffuse_map,
      specular_map: None,
      diffuse_colour: pbr.base_color_factor(),
      specular_colour: SPECULAR_COLOUR,
      shininess: (1.0 - roughness).powi(2) * MAX_SHININESS,
    }))
  }

  fn parse_animations(&self) -> Result<Vec<RawAnimation>> {
    let mut animations = Vec::new();

    for animation in self.document.animations() {
      let mut channels: Vec<(usize, RawChannel)> = Vec::new();
      let mut duration = 0.0f32;

      for channel in animation.channels() {
        // morph weights are not node transforms
        if matches!(channel.target().property(), Property::MorphTargetWeights) {
          continue;
        }

        let sampler = channel.sampler();
        let times = self.parse_accessor::<1, f32>(&sampler.input())?;
        duration = times.iter().fold(duration, |longest, [time]| longest.max(*time));

        let node = channel.target().node();
        let index = match channels.iter().position(|(node_index, _)| *node_index == node.index()) {
          Some(index) => index,
          None => {
            let name = node.name().map(|name| name.to_owned()).unwrap_or(format!("Node_{}", node.index()));
            channels.push((node.index(), RawChannel { name, ..Default::default() }));
            channels.len() - 1
          }
        };
        let target = &mut channels[index].1;
        let cubic = matches!(sampler.interpolation(), Interpolation::CubicSpline);

        match channel.target().property() {
          Property::Translation => target.positions = flatten(keyframe_values(self.parse_accessor::<3, f32>(&sampler.output())?, cubic)),
          Property::Scale => target.scales = flatten(keyframe_values(self.parse_accessor::<3, f32>(&sampler.output())?, cubic)),
          Property::Rotation => {
            let rotations = keyframe_values(self.parse_accessor::<4, f32>(&sampler.output())?, cubic);
            target.rotations = rotations.iter().flat_map(rotation_matrix).collect();
          }
          Property::MorphTargetWeights => (),
        }
      }

      animations.push(RawAnimation {
        duration: duration as f64,
        ticks_per_second: 1.0,
        channels: channels.into_iter().map(|(_, channel)| channel).collect(),
      });
    }

    Ok(animations)
  }

  fn parse_accessor<const C: usize, T>(&self, accessor: &gltf::Accessor) -> Result<Vec<[T; C]>>
  where
    T: Copy + Default + FromPrimitive,
  {
    let count = accessor.count();
    let data_type = DataType::from(accessor.data_type());
    let layout = ElementLayout {
      data_type,
      width: get_component_width(&accessor.dimensions()),
      normalized: accessor.normalized(),
    };

    // Getting base data of the accessor
    let mut elements = match accessor.view() {
      Some(buffer_view) => {
        let stride = buffer_view.stride().unwrap_or(layout.size());
        let offset = accessor.offset() + buffer_view.offset();
        parse_buffer_view(self.buffer(buffer_view.buffer().index())?, offset, count, stride, &layout)?
      }
      None => vec![[T::default(); C]; count],
    };

    // checking if there's extra sparse information and applying it to base data
    if let Some(sparse) = accessor.sparse() {
      let count = sparse.count() as usize;

      let values = sparse.values();
      let buffer_view = values.view();
      let offset = values.offset() as usize + buffer_view.offset();
      let values = parse_buffer_view::<C, T>(self.buffer(buffer_view.buffer().index())?, offset, count, layout.size(), &layout)?;

      let indices = sparse.indices();
      let buffer_view = indices.view();
      let index_layout = ElementLayout {
        data_type: DataType::from(indices.index_type()),
        width: 1,
        normalized: false,
      };
      let offset = indices.offset() as usize + buffer_view.offset();
      let indices = parse_buffer_view::<1, u32>(self.buffer(buffer_view.buffer().index())?, offset, count, index_layout.size(), &index_layout)?;

      for ([index], value) in indices.into_iter().zip(values) {
        let element = elements.get_mut(index as usize).ok_or(ImportError::MissingResource)?;
        *element = value;
      }
    }

    Ok(elements)
  }

  fn buffer(&self, index: usize) -> Result<&[u8]> {
    self.buffers.get(index).map(|data| &data[..]).ok_or(ImportError::MissingResource)
  }
}

//----------------------------Helpers--------------------------------------

#[derive(Default)]
struct Attributes {
  positions: Vec<[f32; 3]>,
  normals: Vec<[f32; 3]>,
  tex_coords: Vec<[f32; 2]>,
}

impl Attributes {
  fn attributes_are_equal(&self) -> bool {
    self.positions.len() == self.normals.len() && self.positions.len() == self.tex_coords.len()
  }

  fn fill_missing(&mut self) {
    let count = self.positions.len();
    if self.normals.is_empty() {
      self.normals = vec![[0.0; 3]; count];
    }
    if self.tex_coords.is_empty() {
      self.tex_coords = vec![[0.0; 2]; count];
    }
  }

  fn interleave(&self) -> Vec<f32> {
    let mut vertices = Vec::with_capacity(self.positions.len() * model_assets::VERTEX_STRIDE);
    for ((position, normal), tex_coord) in self.positions.iter().zip(&self.normals).zip(&self.tex_coords) {
      vertices.extend_from_slice(position);
      vertices.extend_from_slice(normal);
      vertices.extend_from_slice(tex_coord);
    }
    vertices
  }
}

#[derive(Clone, Copy)]
enum DataType {
  I8,
  U8,
  I16,
  U16,
  U32,
  F32,
}

impl DataType {
  fn size(&self) -> usize {
    match self {
      DataType::I8 | DataType::U8 => 1,
      DataType::I16 | DataType::U16 => 2,
      DataType::U32 | DataType::F32 => 4,
    }
  }

  fn read(&self, bytes: &[u8]) -> Result<f64> {
    // Search here for data conversion errors
    let failure = || ImportError::ParsingError("failed to parse accessor bytes!");
    let value = match self {
      DataType::I8 => i8::from_le_bytes(bytes.try_into().map_err(|_| failure())?) as f64,
      DataType::U8 => u8::from_le_bytes(bytes.try_into().map_err(|_| failure())?) as f64,
      DataType::I16 => i16::from_le_bytes(bytes.try_into().map_err(|_| failure())?) as f64,
      DataType::U16 => u16::from_le_bytes(bytes.try_into().map_err(|_| failure())?) as f64,
      DataType::U32 => u32::from_le_bytes(bytes.try_into().map_err(|_| failure())?) as f64,
      DataType::F32 => f32::from_le_bytes(bytes.try_into().map_err(|_| failure())?) as f64,
    };
    Ok(value)
  }

  /// Maps a normalized integer to [0, 1] or [-1, 1].
  fn normalize(&self, value: f64) -> f64 {
    match self {
      DataType::I8 => (value / i8::MAX as f64).max(-1.0),
      DataType::U8 => value / u8::MAX as f64,
      DataType::I16 => (value / i16::MAX as f64).max(-1.0),
      DataType::U16 => value / u16::MAX as f64,
      DataType::U32 => value / u32::MAX as f64,
      DataType::F32 => value,
    }
  }
}

impl From<gltf::accessor::DataType> for DataType {
  fn from(data_type: gltf::accessor::DataType) -> Self {
    match data_type {
      gltf::accessor::DataType::I8 => DataType::I8,
      gltf::accessor::DataType::U8 => DataType::U8,
      gltf::accessor::DataType::I16 => DataType::I16,
      gltf::accessor::DataType::U16 => DataType::U16,
      gltf::accessor::DataType::U32 => DataType::U32,
      gltf::accessor::DataType::F32 => DataType::F32,
    }
  }
}

impl From<gltf::accessor::sparse::IndexType> for DataType {
  fn from(index_type: gltf::accessor::sparse::IndexType) -> Self {
    match index_type {
      gltf::accessor::sparse::IndexType::U8 => DataType::U8,
      gltf::accessor::sparse::IndexType::U16 => DataType::U16,
      gltf::accessor::sparse::IndexType::U32 => DataType::U32,
    }
  }
}

struct ElementLayout {
  data_type: DataType,
  width: usize,
  normalized: bool,
}

impl ElementLayout {
  fn size(&self) -> usize {
    self.width * self.data_type.size()
  }
}

fn get_component_width(dimension: &Dimensions) -> usize {
  match dimension {
    Dimensions::Scalar => 1,
    Dimensions::Vec2 => 2,
    Dimensions::Vec3 => 3,
    Dimensions::Vec4 => 4,
    Dimensions::Mat2 => 4,
    Dimensions::Mat3 => 9,
    Dimensions::Mat4 => 16,
  }
}

/// Reads `count` elements spaced `stride` bytes apart. Components beyond `C` are dropped, missing ones stay default.
fn parse_buffer_view<const C: usize, T>(data: &[u8], offset: usize, count: usize, stride: usize, layout: &ElementLayout) -> Result<Vec<[T; C]>>
where
  T: Copy + Default + FromPrimitive,
{
  let element_size = layout.data_type.size();
  let mut elements = Vec::with_capacity(count);

  for i in 0..count {
    let start = offset + i * stride;
    let bytes = data.get(start..start + layout.size()).ok_or(ImportError::MissingResource)?;

    let mut element = [T::default(); C];
    for (component, component_bytes) in element.iter_mut().zip(bytes.chunks_exact(element_size)) {
      let mut value = layout.data_type.read(component_bytes)?;
      if layout.normalized {
        value = layout.data_type.normalize(value);
      }
      *component = T::from_f64(value).ok_or(ImportError::ParsingError("accessor value out of range!"))?;
    }
    elements.push(element);
  }

  Ok(elements)
}

/// Cubic spline samplers store in-tangent, value and out-tangent per key; only the value is kept.
fn keyframe_values<const C: usize>(output: Vec<[f32; C]>, cubic: bool) -> Vec<[f32; C]> {
  if !cubic {
    return output;
  }

  output.chunks_exact(3).map(|key| key[1]).collect()
}

fn flatten<const C: usize>(keys: Vec<[f32; C]>) -> Vec<f32> {
  keys.into_iter().flatten().collect()
}

/// Row-major 3x3 matrix of a glTF `[x, y, z, w]` quaternion.
fn rotation_matrix(rotation: &[f32; 4]) -> [f32; 9] {
  let [x, y, z, w] = *rotation;
  let matrix = glm::quat_to_mat3(&glm::quat_normalize(&glm::quat(x, y, z, w)));

  let mut flat = [0.0; 9];
  for row in 0..3 {
    for column in 0..3 {
      flat[row * 3 + column] = matrix[(row, column)];
    }
  }
  flat
}

fn texture_file_name(texture: &gltf::Texture) -> Option<String> {
  match texture.source().source() {
    gltf::image::Source::Uri { uri, .. } if !uri.starts_with("data:") => Some(uri.to_owned()),
    _ => None,
  }
}

fn convert_indices_from_strip(indices: &[u32]) -> Vec<u32> {
  let mut new_indices = Vec::with_capacity(indices.len().saturating_sub(2) * 3);

  for (even, window) in indices.windows(3).enumerate() {
    if even % 2 == 0 {
      new_indices.extend_from_slice(&[window[0], window[1], window[2]]);
    } else {
      new_indices.extend_from_slice(&[window[1], window[0], window[2]]);
    }
  }

  new_indices
}

fn convert_indices_from_fan(indices: &[u32]) -> Vec<u32> {
  let Some((first_index, rest)) = indices.split_first() else {
    return Vec::new();
  };

  let mut new_indices = Vec::with_capacity(rest.len().saturating_sub(1) * 3);
  for pair in rest.windows(2) {
    new_indices.extend_from_slice(&[*first_index, pair[0], pair[1]]);
  }

  new_indices
}
