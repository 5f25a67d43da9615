use crate::importer::ImporterHandle;
use crate::stride::{unpack_rotations, unpack_vectors};

use model_assets::{Animation, AnimationChannel};

pub fn decode_animation<H: ImporterHandle + ?Sized>(handle: &H, animation_index: usize) -> Animation {
  let duration = handle.animation_duration(animation_index);
  let ticks_per_second = handle.animation_ticks_per_second(animation_index);

  let channels = (0..handle.channel_count(animation_index)).map(|channel| decode_channel(handle, animation_index, channel)).collect();

  Animation::new(duration, ticks_per_second, channels)
}

fn decode_channel<H: ImporterHandle + ?Sized>(handle: &H, animation_index: usize, channel: usize) -> AnimationChannel {
  let name = handle.channel_name(animation_index, channel);
  let positions = unpack_vectors(&handle.channel_positions(animation_index, channel));
  let scales = unpack_vectors(&handle.channel_scales(animation_index, channel));
  let rotations = unpack_rotations(&handle.channel_rotations(animation_index, channel));

  AnimationChannel::new(name, positions, scales, rotations)
}
