//! Unpacking of flat, fixed-stride buffers handed out by importers.

use nalgebra_glm as glm;

/// Floats per position or scale key.
pub const VECTOR_STRIDE: usize = 3;
/// Floats per rotation key, a row-major 3x3 matrix.
pub const ROTATION_STRIDE: usize = 9;

/// Splits `buffer` into consecutive groups of `stride` elements and builds one value per group, in order.
///
/// A trailing partial group is ignored; importers guarantee whole groups.
pub fn unpack<E, T>(buffer: &[E], stride: usize, build: impl FnMut(&[E]) -> T) -> Vec<T> {
  debug_assert!(stride > 0, "stride must be positive");
  debug_assert_eq!(buffer.len() % stride, 0, "buffer of {} elements is not a multiple of {}", buffer.len(), stride);

  buffer.chunks_exact(stride).map(build).collect()
}

pub fn unpack_vectors(buffer: &[f32]) -> Vec<glm::Vec3> {
  unpack(buffer, VECTOR_STRIDE, |key| glm::vec3(key[0], key[1], key[2]))
}

pub fn unpack_rotations(buffer: &[f32]) -> Vec<glm::Mat3> {
  unpack(buffer, ROTATION_STRIDE, glm::Mat3::from_row_slice)
}
