use crate::importer::ImporterHandle;
use crate::stride;

use model_assets::{glm, Material, Mesh, Vertex, VERTEX_STRIDE};

/// Geometry of a mesh whose material is still being resolved.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshGeometry {
  pub vertices: Vec<Vertex>,
  pub indices: Vec<u32>,
}

impl MeshGeometry {
  pub fn with_material(self, material: Material) -> Mesh {
    Mesh::new(self.vertices, self.indices, material)
  }
}

pub fn decode_mesh<H: ImporterHandle + ?Sized>(handle: &H, mesh_index: usize) -> MeshGeometry {
  let vertices = decode_vertices(&handle.mesh_vertices(mesh_index));
  let indices = handle.mesh_indices(mesh_index);

  debug_assert_eq!(vertices.len(), handle.vertex_count(mesh_index));
  debug_assert_eq!(indices.len(), handle.index_count(mesh_index));

  MeshGeometry { vertices, indices }
}

pub fn decode_vertices(buffer: &[f32]) -> Vec<Vertex> {
  stride::unpack(buffer, VERTEX_STRIDE, |group| {
    Vertex::new(glm::vec3(group[0], group[1], group[2]), glm::vec3(group[3], group[4], group[5]), glm::vec2(group[6], group[7]))
  })
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::raw::{RawMesh, RawScene};

  fn scene_with(vertices: Vec<f32>, indices: Vec<u32>) -> RawScene {
    RawScene {
      meshes: vec![RawMesh {
        vertices,
        indices,
        ..Default::default()
      }],
      ..Default::default()
    }
  }

  #[test]
  fn groups_of_eight_become_vertices() {
    let buffer: Vec<f32> = (0..16).map(|i| i as f32).collect();
    let geometry = decode_mesh(&scene_with(buffer, vec![1, 0, 1]), 0);

    assert_eq!(geometry.vertices.len(), 2);
    assert_eq!(geometry.vertices[1].position, glm::vec3(8.0, 9.0, 10.0));
    assert_eq!(geometry.vertices[1].normal, glm::vec3(11.0, 12.0, 13.0));
    assert_eq!(geometry.vertices[1].tex_coord, glm::vec2(14.0, 15.0));
    assert_eq!(geometry.indices, vec![1, 0, 1]);
  }

  #[test]
  fn reflattening_reproduces_the_buffer_bitwise() {
    let buffer = vec![
      -0.0, f32::MIN_POSITIVE, 1.0e-38, 0.1, 0.2, 0.3, f32::MAX, -f32::MAX, //
      3.5, -2.25, 1.0 / 3.0, 0.0, 1.0, 0.0, 0.5, 0.75,
    ];
    let mesh = decode_mesh(&scene_with(buffer.clone(), Vec::new()), 0).with_material(Material::untextured(
      glm::Vec4::zeros(),
      glm::Vec4::zeros(),
      0.0,
    ));

    let reflattened = mesh.vertex_buffer();
    assert_eq!(reflattened.len(), buffer.len());
    for (decoded, original) in reflattened.iter().zip(&buffer) {
      assert_eq!(decoded.to_bits(), original.to_bits());
    }
  }

  #[test]
  fn indices_are_not_range_checked() {
    let geometry = decode_mesh(&scene_with(vec![0.0; 8], vec![0, 7, 42]), 0);
    assert_eq!(geometry.vertices.len(), 1);
    assert_eq!(geometry.indices, vec![0, 7, 42]);
  }

  #[test]
  fn empty_mesh_decodes_to_empty_sequences() {
    let geometry = decode_mesh(&scene_with(Vec::new(), Vec::new()), 0);
    assert!(geometry.vertices.is_empty());
    assert!(geometry.indices.is_empty());
  }
}
