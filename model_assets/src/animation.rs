use nalgebra_glm as glm;
use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct Animation {
  duration: f64,
  ticks_per_second: f64,
  channels: Vec<AnimationChannel>,
}

impl Animation {
  pub fn new(duration: f64, ticks_per_second: f64, channels: Vec<AnimationChannel>) -> Self {
    Self {
      duration,
      ticks_per_second,
      channels,
    }
  }

  /// Length of the animation in ticks.
  pub fn duration(&self) -> f64 {
    self.duration
  }

  pub fn ticks_per_second(&self) -> f64 {
    self.ticks_per_second
  }

  pub fn duration_seconds(&self) -> f64 {
    if self.ticks_per_second == 0.0 {
      return 0.0;
    }

    self.duration / self.ticks_per_second
  }

  pub fn channels(&self) -> &[AnimationChannel] {
    self.channels.as_ref()
  }

  pub fn channel(&self, name: &str) -> Option<&AnimationChannel> {
    self.channels.iter().find(|channel| channel.name == name)
  }
}

/// Keyframes for one node. The three tracks are indexed independently and may differ in length;
/// key timing belongs to the importer.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct AnimationChannel {
  name: String,
  positions: Vec<glm::Vec3>,
  scales: Vec<glm::Vec3>,
  rotations: Vec<glm::Mat3>,
}

impl AnimationChannel {
  pub fn new(name: String, positions: Vec<glm::Vec3>, scales: Vec<glm::Vec3>, rotations: Vec<glm::Mat3>) -> Self {
    Self {
      name,
      positions,
      scales,
      rotations,
    }
  }

  pub fn name(&self) -> &str {
    &self.name
  }

  pub fn positions(&self) -> &[glm::Vec3] {
    self.positions.as_ref()
  }

  pub fn scales(&self) -> &[glm::Vec3] {
    self.scales.as_ref()
  }

  pub fn rotations(&self) -> &[glm::Mat3] {
    self.rotations.as_ref()
  }
}
