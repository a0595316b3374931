/*
 * Copyright (c) Radzivon Bartoshyk, 2/2025. All rights reserved.
 *
 * Redistribution and use in source and binary forms, with or without modification,
 * are permitted provided that the following conditions are met:
 *
 * 1.  Redistributions of source code must retain the above copyright notice, this
 * list of conditions and the following disclaimer.
 *
 * 2.  Redistributions in binary form must reproduce the above copyright notice,
 * this list of conditions and the following disclaimer in the documentation
 * and/or other materials provided with the distribution.
 *
 * 3.  Neither the name of the copyright holder nor the names of its
 * contributors may be used to endorse or promote products derived from
 * this software without specific prior written permission.
 *
 * THIS SOFTWARE IS PROVIDED BY THE COPYRIGHT HOLDERS AND CONTRIBUTORS "AS IS"
 * AND ANY EXPRESS OR IMPLIED WARRANTIES, INCLUDING, BUT NOT LIMITED TO, THE
 * IMPLIED WARRANTIES OF MERCHANTABILITY AND FITNESS FOR A PARTICULAR PURPOSE ARE
 * DISCLAIMED. IN NO EVENT SHALL THE COPYRIGHT HOLDER OR CONTRIBUTORS BE LIABLE
 * FOR ANY DIRECT, INDIRECT, INCIDENTAL, SPECIAL, EXEMPLARY, OR CONSEQUENTIAL
 * DAMAGES (INCLUDING, BUT NOT LIMITED TO, PROCUREMENT OF SUBSTITUTE GOODS OR
 * SERVICES; LOSS OF USE, DATA, OR PROFITS; OR BUSINESS INTERRUPTION) HOWEVER
 * CAUSED AND ON ANY THEORY OF LIABILITY, WHETHER IN CONTRACT, STRICT LIABILITY,
 * OR TORT (INCLUDING NEGLIGENCE OR OTHERWISE) ARISING IN ANY WAY OUT OF THE USE
 * OF THIS SOFTWARE, EVEN IF ADVISED OF THE POSSIBILITY OF SUCH DAMAGE.
 */
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
use crate::cpu_features::{query_capability, CPU_HAS_BYTE_SHUFFLE};
#[cfg(target_arch = "aarch64")]
use crate::cpu_features::{query_capability, CPU_HAS_NEON};
#[cfg(target_arch = "aarch64")]
use crate::neon::neon_shuffle_row;
use crate::pix_error::check_packed_destination;
use crate::pix_support::PackedChannels;
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
use crate::sse::sse_shuffle_row;
use crate::PixError;

/// Reorders channels row by row. Pure permutation, a missing source alpha
/// becomes fully opaque in the destination.
fn shuffle_impl<const SRC: u8, const DST: u8>(
    src: &[u8],
    src_stride: u32,
    dst: &mut [u8],
    dst_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    let src_channels: PackedChannels = SRC.into();
    let dst_channels: PackedChannels = DST.into();
    check_packed_destination(
        src,
        src_stride,
        width,
        height,
        src_channels.get_channels_count(),
    )?;
    check_packed_destination(
        dst,
        dst_stride,
        width,
        height,
        dst_channels.get_channels_count(),
    )?;

    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    let use_shuffle = query_capability(CPU_HAS_BYTE_SHUFFLE)
        && src_channels.get_channels_count() >= 3
        && dst_channels.get_channels_count() == 4;
    #[cfg(target_arch = "aarch64")]
    let use_neon = query_capability(CPU_HAS_NEON);

    for (dst_row, src_row) in dst
        .chunks_exact_mut(dst_stride as usize)
        .zip(src.chunks_exact(src_stride as usize))
    {
        let mut _cx = 0usize;

        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
        if use_shuffle {
            _cx = unsafe { sse_shuffle_row::<SRC, DST>(src_row, dst_row, width as usize) };
        }

        #[cfg(target_arch = "aarch64")]
        if use_neon {
            _cx = unsafe { neon_shuffle_row::<SRC, DST>(src_row, dst_row, width as usize) };
        }

        for (dst, src) in dst_row
            .chunks_exact_mut(dst_channels.get_channels_count())
            .zip(src_row.chunks_exact(src_channels.get_channels_count()))
            .take(width as usize)
            .skip(_cx)
        {
            dst[dst_channels.get_r_channel_offset()] = src[src_channels.get_r_channel_offset()];
            dst[dst_channels.get_g_channel_offset()] = src[src_channels.get_g_channel_offset()];
            dst[dst_channels.get_b_channel_offset()] = src[src_channels.get_b_channel_offset()];
            if dst_channels.has_alpha() {
                let a = if src_channels.has_alpha() {
                    src[src_channels.get_a_channel_offset()]
                } else {
                    255
                };
                dst[dst_channels.get_a_channel_offset()] = a;
            }
        }
    }

    Ok(())
}

/// Converts RGBA8 to BGRA8
///
/// # Arguments
///
/// * `src`: Source slice
/// * `src_stride`: Source slice stride
/// * `dst`: Destination slice
/// * `dst_stride`: Destination slice stride
/// * `width`: Image width
/// * `height`: Image height
///
/// returns: Result<(), PixError>
///
pub fn rgba_to_bgra(
    src: &[u8],
    src_stride: u32,
    dst: &mut [u8],
    dst_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    shuffle_impl::<{ PackedChannels::Rgba as u8 }, { PackedChannels::Bgra as u8 }>(
        src, src_stride, dst, dst_stride, width, height,
    )
}

/// Converts BGRA8 to RGBA8
///
/// # Arguments
///
/// * `src`: Source slice
/// * `src_stride`: Source slice stride
/// * `dst`: Destination slice
/// * `dst_stride`: Destination slice stride
/// * `width`: Image width
/// * `height`: Image height
///
/// returns: Result<(), PixError>
///
pub fn bgra_to_rgba(
    src: &[u8],
    src_stride: u32,
    dst: &mut [u8],
    dst_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    shuffle_impl::<{ PackedChannels::Bgra as u8 }, { PackedChannels::Rgba as u8 }>(
        src, src_stride, dst, dst_stride, width, height,
    )
}

/// Converts ARGB8 to BGRA8
///
/// # Arguments
///
/// * `src`: Source slice
/// * `src_stride`: Source slice stride
/// * `dst`: Destination slice
/// * `dst_stride`: Destination slice stride
/// * `width`: Image width
/// * `height`: Image height
///
/// returns: Result<(), PixError>
///
pub fn argb_to_bgra(
    src: &[u8],
    src_stride: u32,
    dst: &mut [u8],
    dst_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    shuffle_impl::<{ PackedChannels::Argb as u8 }, { PackedChannels::Bgra as u8 }>(
        src, src_stride, dst, dst_stride, width, height,
    )
}

/// Converts BGRA8 to ARGB8
///
/// # Arguments
///
/// * `src`: Source slice
/// * `src_stride`: Source slice stride
/// * `dst`: Destination slice
/// * `dst_stride`: Destination slice stride
/// * `width`: Image width
/// * `height`: Image height
///
/// returns: Result<(), PixError>
///
pub fn bgra_to_argb(
    src: &[u8],
    src_stride: u32,
    dst: &mut [u8],
    dst_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    shuffle_impl::<{ PackedChannels::Bgra as u8 }, { PackedChannels::Argb as u8 }>(
        src, src_stride, dst, dst_stride, width, height,
    )
}

/// Converts RGB8 to BGRA8
///
/// # Arguments
///
/// * `src`: Source slice
/// * `src_stride`: Source slice stride
/// * `dst`: Destination slice
/// * `dst_stride`: Destination slice stride
/// * `width`: Image width
/// * `height`: Image height
///
/// returns: Result<(), PixError>
///
pub fn rgb_to_bgra(
    src: &[u8],
    src_stride: u32,
    dst: &mut [u8],
    dst_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    shuffle_impl::<{ PackedChannels::Rgb as u8 }, { PackedChannels::Bgra as u8 }>(
        src, src_stride, dst, dst_stride, width, height,
    )
}

/// Converts BGR8 to BGRA8
///
/// # Arguments
///
/// * `src`: Source slice
/// * `src_stride`: Source slice stride
/// * `dst`: Destination slice
/// * `dst_stride`: Destination slice stride
/// * `width`: Image width
/// * `height`: Image height
///
/// returns: Result<(), PixError>
///
pub fn bgr_to_bgra(
    src: &[u8],
    src_stride: u32,
    dst: &mut [u8],
    dst_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    shuffle_impl::<{ PackedChannels::Bgr as u8 }, { PackedChannels::Bgra as u8 }>(
        src, src_stride, dst, dst_stride, width, height,
    )
}

/// Converts BGRA8 to RGB8, alpha is dropped
///
/// # Arguments
///
/// * `src`: Source slice
/// * `src_stride`: Source slice stride
/// * `dst`: Destination slice
/// * `dst_stride`: Destination slice stride
/// * `width`: Image width
/// * `height`: Image height
///
/// returns: Result<(), PixError>
///
pub fn bgra_to_rgb(
    src: &[u8],
    src_stride: u32,
    dst: &mut [u8],
    dst_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    shuffle_impl::<{ PackedChannels::Bgra as u8 }, { PackedChannels::Rgb as u8 }>(
        src, src_stride, dst, dst_stride, width, height,
    )
}

/// Converts BGRA8 to BGR8, alpha is dropped
///
/// # Arguments
///
/// * `src`: Source slice
/// * `src_stride`: Source slice stride
/// * `dst`: Destination slice
/// * `dst_stride`: Destination slice stride
/// * `width`: Image width
/// * `height`: Image height
///
/// returns: Result<(), PixError>
///
pub fn bgra_to_bgr(
    src: &[u8],
    src_stride: u32,
    dst: &mut [u8],
    dst_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    shuffle_impl::<{ PackedChannels::Bgra as u8 }, { PackedChannels::Bgr as u8 }>(
        src, src_stride, dst, dst_stride, width, height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_features::{set_capability_override, CAPABILITY_TEST_GUARD, CPU_INITIALIZED};
    use rand::Rng;

    fn random_image(len: usize) -> Vec<u8> {
        let mut rng = rand::rng();
        (0..len).map(|_| rng.random::<u8>()).collect()
    }

    #[test]
    fn test_bgra_rgba_swap_round_trip() {
        let width = 131u32;
        let height = 17u32;
        let src = random_image(width as usize * height as usize * 4);
        let mut swapped = vec![0u8; src.len()];
        let mut restored = vec![0u8; src.len()];
        bgra_to_rgba(&src, width * 4, &mut swapped, width * 4, width, height).unwrap();
        rgba_to_bgra(&swapped, width * 4, &mut restored, width * 4, width, height).unwrap();
        assert_eq!(src, restored);
        for (swapped, origin) in swapped.chunks_exact(4).zip(src.chunks_exact(4)) {
            assert_eq!(swapped[0], origin[2]);
            assert_eq!(swapped[1], origin[1]);
            assert_eq!(swapped[2], origin[0]);
            assert_eq!(swapped[3], origin[3]);
        }
    }

    #[test]
    fn test_bgr_expansion_sets_opaque_alpha() {
        let width = 61u32;
        let height = 5u32;
        let src = random_image(width as usize * height as usize * 3);
        let mut dst = vec![0u8; width as usize * height as usize * 4];
        bgr_to_bgra(&src, width * 3, &mut dst, width * 4, width, height).unwrap();
        for (expanded, origin) in dst.chunks_exact(4).zip(src.chunks_exact(3)) {
            assert_eq!(&expanded[0..3], origin);
            assert_eq!(expanded[3], 255);
        }
    }

    #[test]
    fn test_shuffle_dispatch_matches_scalar() {
        let _guard = CAPABILITY_TEST_GUARD.lock().unwrap();
        let width = 157u32;
        let height = 9u32;
        let src = random_image(width as usize * height as usize * 4);
        let mut dispatched = vec![0u8; src.len()];
        bgra_to_argb(&src, width * 4, &mut dispatched, width * 4, width, height).unwrap();

        set_capability_override(CPU_INITIALIZED);
        let mut scalar = vec![0u8; src.len()];
        bgra_to_argb(&src, width * 4, &mut scalar, width * 4, width, height).unwrap();
        set_capability_override(0);

        assert_eq!(dispatched, scalar);
    }
}
