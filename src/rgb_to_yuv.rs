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
use crate::images::YuvPlanarImageMut;
#[cfg(target_arch = "aarch64")]
use crate::neon::{neon_rgbx_to_uv_row, neon_rgbx_to_y_row};
use crate::numerics::avg_round;
use crate::pix_error::{check_packed_destination, check_y8_channel};
use crate::pix_support::{
    ChromaSubsampling, PackedChannels, CB_WEIGHT_B, CB_WEIGHT_G, CB_WEIGHT_R, CHROMA_BIAS,
    CR_WEIGHT_B, CR_WEIGHT_G, CR_WEIGHT_R, LUMA_BIAS, LUMA_WEIGHT_B, LUMA_WEIGHT_G, LUMA_WEIGHT_R,
};
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
use crate::sse::{sse_rgbx_to_uv_row, sse_rgbx_to_y_row};
use crate::PixError;

#[inline(always)]
pub(crate) fn luma_value(b: i32, g: i32, r: i32) -> u8 {
    (((LUMA_WEIGHT_B * b + LUMA_WEIGHT_G * g + LUMA_WEIGHT_R * r) >> 7) + LUMA_BIAS) as u8
}

#[inline(always)]
fn chroma_pair(b: i32, g: i32, r: i32) -> (u8, u8) {
    let cb = ((CB_WEIGHT_B * b + CB_WEIGHT_G * g + CB_WEIGHT_R * r) >> 8) + CHROMA_BIAS;
    let cr = ((CR_WEIGHT_B * b + CR_WEIGHT_G * g + CR_WEIGHT_R * r) >> 8) + CHROMA_BIAS;
    (cb as u8, cr as u8)
}

#[inline(always)]
fn box_average<const ORIGIN_CHANNELS: u8>(
    row0: &[u8],
    row1: &[u8],
    x: usize,
    width: usize,
) -> (i32, i32, i32) {
    let source_channels: PackedChannels = ORIGIN_CHANNELS.into();
    let channels = source_channels.get_channels_count();
    let b_offset = source_channels.get_b_channel_offset();
    let g_offset = source_channels.get_g_channel_offset();
    let r_offset = source_channels.get_r_channel_offset();

    let px0 = x * channels;
    // The lone last column of an odd width averages against itself.
    let px1 = if x + 1 < width { px0 + channels } else { px0 };

    // Vertical pass first, the rounding order is part of the contract.
    let b0 = avg_round(row0[px0 + b_offset], row1[px0 + b_offset]);
    let g0 = avg_round(row0[px0 + g_offset], row1[px0 + g_offset]);
    let r0 = avg_round(row0[px0 + r_offset], row1[px0 + r_offset]);
    let b1 = avg_round(row0[px1 + b_offset], row1[px1 + b_offset]);
    let g1 = avg_round(row0[px1 + g_offset], row1[px1 + g_offset]);
    let r1 = avg_round(row0[px1 + r_offset], row1[px1 + r_offset]);

    (
        avg_round(b0, b1) as i32,
        avg_round(g0, g1) as i32,
        avg_round(r0, r1) as i32,
    )
}

fn rgbx_to_yuv420_impl<const ORIGIN_CHANNELS: u8>(
    planar_image: &mut YuvPlanarImageMut<u8>,
    rgba: &[u8],
    rgba_stride: u32,
) -> Result<(), PixError> {
    let source_channels: PackedChannels = ORIGIN_CHANNELS.into();
    let channels = source_channels.get_channels_count();
    planar_image.check_constraints(ChromaSubsampling::Yuv420)?;
    check_packed_destination(
        rgba,
        rgba_stride,
        planar_image.width,
        planar_image.height,
        channels,
    )?;

    let width = planar_image.width as usize;
    let height = planar_image.height as usize;
    let y_stride = planar_image.y_stride as usize;
    let u_stride = planar_image.u_stride as usize;
    let v_stride = planar_image.v_stride as usize;

    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    let use_shuffle = query_capability(CPU_HAS_BYTE_SHUFFLE) && channels == 4;
    #[cfg(target_arch = "aarch64")]
    let use_neon = query_capability(CPU_HAS_NEON) && channels == 4;

    let y_plane = planar_image.y_plane.borrow_mut();
    let mut chroma_y = 0usize;

    for y in (0..height).step_by(2) {
        let rgba_row0 = &rgba[y * rgba_stride as usize..][..width * channels];
        // An odd trailing row pairs with itself for the chroma pass.
        let row1_index = if y + 1 < height { y + 1 } else { y };
        let rgba_row1 = &rgba[row1_index * rgba_stride as usize..][..width * channels];

        let mut _cx = 0usize;
        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
        if use_shuffle {
            _cx = unsafe {
                sse_rgbx_to_y_row::<ORIGIN_CHANNELS>(
                    rgba_row0,
                    &mut y_plane[y * y_stride..][..width],
                    width,
                )
            };
        }
        #[cfg(target_arch = "aarch64")]
        if use_neon {
            _cx = unsafe {
                neon_rgbx_to_y_row::<ORIGIN_CHANNELS>(
                    rgba_row0,
                    &mut y_plane[y * y_stride..][..width],
                    width,
                )
            };
        }
        luma_row_scalar::<ORIGIN_CHANNELS>(
            rgba_row0,
            &mut y_plane[y * y_stride..][..width],
            _cx,
        );

        if y + 1 < height {
            let mut _cx = 0usize;
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
            if use_shuffle {
                _cx = unsafe {
                    sse_rgbx_to_y_row::<ORIGIN_CHANNELS>(
                        rgba_row1,
                        &mut y_plane[(y + 1) * y_stride..][..width],
                        width,
                    )
                };
            }
            #[cfg(target_arch = "aarch64")]
            if use_neon {
                _cx = unsafe {
                    neon_rgbx_to_y_row::<ORIGIN_CHANNELS>(
                        rgba_row1,
                        &mut y_plane[(y + 1) * y_stride..][..width],
                        width,
                    )
                };
            }
            luma_row_scalar::<ORIGIN_CHANNELS>(
                rgba_row1,
                &mut y_plane[(y + 1) * y_stride..][..width],
                _cx,
            );
        }

        let u_row = &mut planar_image.u_plane.borrow_mut()[chroma_y * u_stride..][..width.div_ceil(2)];
        let v_row = &mut planar_image.v_plane.borrow_mut()[chroma_y * v_stride..][..width.div_ceil(2)];

        let mut _uv_cx = 0usize;
        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
        if use_shuffle {
            _uv_cx = unsafe {
                sse_rgbx_to_uv_row::<ORIGIN_CHANNELS>(rgba_row0, rgba_row1, u_row, v_row, width)
            };
        }
        #[cfg(target_arch = "aarch64")]
        if use_neon {
            _uv_cx = unsafe {
                neon_rgbx_to_uv_row::<ORIGIN_CHANNELS>(rgba_row0, rgba_row1, u_row, v_row, width)
            };
        }

        for x in (_uv_cx..width).step_by(2) {
            let (mb, mg, mr) = box_average::<ORIGIN_CHANNELS>(rgba_row0, rgba_row1, x, width);
            let (cb, cr) = chroma_pair(mb, mg, mr);
            u_row[x / 2] = cb;
            v_row[x / 2] = cr;
        }

        chroma_y += 1;
    }

    Ok(())
}

#[inline]
fn luma_row_scalar<const ORIGIN_CHANNELS: u8>(rgba_row: &[u8], y_row: &mut [u8], start: usize) {
    let source_channels: PackedChannels = ORIGIN_CHANNELS.into();
    let channels = source_channels.get_channels_count();
    for (y_dst, rgba) in y_row
        .iter_mut()
        .zip(rgba_row.chunks_exact(channels))
        .skip(start)
    {
        let r = rgba[source_channels.get_r_channel_offset()] as i32;
        let g = rgba[source_channels.get_g_channel_offset()] as i32;
        let b = rgba[source_channels.get_b_channel_offset()] as i32;
        *y_dst = luma_value(b, g, r);
    }
}

fn rgbx_to_y_impl<const ORIGIN_CHANNELS: u8>(
    y_plane: &mut [u8],
    y_stride: u32,
    rgba: &[u8],
    rgba_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    let source_channels: PackedChannels = ORIGIN_CHANNELS.into();
    let channels = source_channels.get_channels_count();
    check_y8_channel(y_plane, y_stride, width, height)?;
    check_packed_destination(rgba, rgba_stride, width, height, channels)?;

    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    let use_shuffle = query_capability(CPU_HAS_BYTE_SHUFFLE) && channels == 4;
    #[cfg(target_arch = "aarch64")]
    let use_neon = query_capability(CPU_HAS_NEON) && channels == 4;

    for (y_row, rgba_row) in y_plane
        .chunks_exact_mut(y_stride as usize)
        .zip(rgba.chunks_exact(rgba_stride as usize))
    {
        let y_row = &mut y_row[..width as usize];
        let rgba_row = &rgba_row[..width as usize * channels];

        let mut _cx = 0usize;
        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
        if use_shuffle {
            _cx = unsafe { sse_rgbx_to_y_row::<ORIGIN_CHANNELS>(rgba_row, y_row, width as usize) };
        }
        #[cfg(target_arch = "aarch64")]
        if use_neon {
            _cx = unsafe { neon_rgbx_to_y_row::<ORIGIN_CHANNELS>(rgba_row, y_row, width as usize) };
        }

        luma_row_scalar::<ORIGIN_CHANNELS>(rgba_row, y_row, _cx);
    }

    Ok(())
}

/// Convert BGRA image data to YUV420 planar format.
///
/// Chroma is box filtered over every 2x2 block, the two source rows are
/// averaged first and the horizontal neighbours after that.
///
/// # Arguments
///
/// * `planar_image` - Target planar image.
/// * `bgra` - The input BGRA image data slice.
/// * `bgra_stride` - The stride (bytes per row) for the BGRA data.
///
/// returns: Result<(), PixError>
///
pub fn bgra_to_yuv420(
    planar_image: &mut YuvPlanarImageMut<u8>,
    bgra: &[u8],
    bgra_stride: u32,
) -> Result<(), PixError> {
    rgbx_to_yuv420_impl::<{ PackedChannels::Bgra as u8 }>(planar_image, bgra, bgra_stride)
}

/// Convert RGBA image data to YUV420 planar format.
///
/// # Arguments
///
/// * `planar_image` - Target planar image.
/// * `rgba` - The input RGBA image data slice.
/// * `rgba_stride` - The stride (bytes per row) for the RGBA data.
///
/// returns: Result<(), PixError>
///
pub fn rgba_to_yuv420(
    planar_image: &mut YuvPlanarImageMut<u8>,
    rgba: &[u8],
    rgba_stride: u32,
) -> Result<(), PixError> {
    rgbx_to_yuv420_impl::<{ PackedChannels::Rgba as u8 }>(planar_image, rgba, rgba_stride)
}

/// Convert ARGB image data to YUV420 planar format.
///
/// # Arguments
///
/// * `planar_image` - Target planar image.
/// * `argb` - The input ARGB image data slice.
/// * `argb_stride` - The stride (bytes per row) for the ARGB data.
///
/// returns: Result<(), PixError>
///
pub fn argb_to_yuv420(
    planar_image: &mut YuvPlanarImageMut<u8>,
    argb: &[u8],
    argb_stride: u32,
) -> Result<(), PixError> {
    rgbx_to_yuv420_impl::<{ PackedChannels::Argb as u8 }>(planar_image, argb, argb_stride)
}

/// Convert RGB image data to YUV420 planar format.
///
/// # Arguments
///
/// * `planar_image` - Target planar image.
/// * `rgb` - The input RGB image data slice.
/// * `rgb_stride` - The stride (bytes per row) for the RGB data.
///
/// returns: Result<(), PixError>
///
pub fn rgb_to_yuv420(
    planar_image: &mut YuvPlanarImageMut<u8>,
    rgb: &[u8],
    rgb_stride: u32,
) -> Result<(), PixError> {
    rgbx_to_yuv420_impl::<{ PackedChannels::Rgb as u8 }>(planar_image, rgb, rgb_stride)
}

/// Extract the luma plane of a BGRA image.
///
/// # Arguments
///
/// * `y_plane` - A mutable slice to store the Y (luminance) plane data.
/// * `y_stride` - The stride (elements per row) for the Y plane.
/// * `bgra` - The input BGRA image data slice.
/// * `bgra_stride` - The stride (bytes per row) for the BGRA data.
/// * `width` - The width of the image in pixels.
/// * `height` - The height of the image in pixels.
///
/// returns: Result<(), PixError>
///
pub fn bgra_to_yuv400(
    y_plane: &mut [u8],
    y_stride: u32,
    bgra: &[u8],
    bgra_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    rgbx_to_y_impl::<{ PackedChannels::Bgra as u8 }>(
        y_plane, y_stride, bgra, bgra_stride, width, height,
    )
}

/// Extract the luma plane of a RGBA image.
///
/// # Arguments
///
/// * `y_plane` - A mutable slice to store the Y (luminance) plane data.
/// * `y_stride` - The stride (elements per row) for the Y plane.
/// * `rgba` - The input RGBA image data slice.
/// * `rgba_stride` - The stride (bytes per row) for the RGBA data.
/// * `width` - The width of the image in pixels.
/// * `height` - The height of the image in pixels.
///
/// returns: Result<(), PixError>
///
pub fn rgba_to_yuv400(
    y_plane: &mut [u8],
    y_stride: u32,
    rgba: &[u8],
    rgba_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    rgbx_to_y_impl::<{ PackedChannels::Rgba as u8 }>(
        y_plane, y_stride, rgba, rgba_stride, width, height,
    )
}

/// Extract the luma plane of an ARGB image.
///
/// # Arguments
///
/// * `y_plane` - A mutable slice to store the Y (luminance) plane data.
/// * `y_stride` - The stride (elements per row) for the Y plane.
/// * `argb` - The input ARGB image data slice.
/// * `argb_stride` - The stride (bytes per row) for the ARGB data.
/// * `width` - The width of the image in pixels.
/// * `height` - The height of the image in pixels.
///
/// returns: Result<(), PixError>
///
pub fn argb_to_yuv400(
    y_plane: &mut [u8],
    y_stride: u32,
    argb: &[u8],
    argb_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    rgbx_to_y_impl::<{ PackedChannels::Argb as u8 }>(
        y_plane, y_stride, argb, argb_stride, width, height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_features::{set_capability_override, CAPABILITY_TEST_GUARD, CPU_INITIALIZED};
    use rand::Rng;

    fn solid_frame(width: u32, height: u32, px: [u8; 4]) -> Vec<u8> {
        px.iter()
            .copied()
            .cycle()
            .take(width as usize * height as usize * 4)
            .collect()
    }

    #[test]
    fn test_black_and_white_fixed_points() {
        let width = 32u32;
        let height = 32u32;
        for (pixel, expected_y) in [([0u8, 0, 0, 255], 16u8), ([255u8, 255, 255, 255], 237u8)] {
            let frame = solid_frame(width, height, pixel);
            let mut planar =
                YuvPlanarImageMut::<u8>::alloc(width, height, ChromaSubsampling::Yuv420);
            bgra_to_yuv420(&mut planar, &frame, width * 4).unwrap();
            assert!(planar.y_plane.borrow().iter().all(|&y| y == expected_y));
            assert!(planar.u_plane.borrow().iter().all(|&u| u == 128));
            assert!(planar.v_plane.borrow().iter().all(|&v| v == 128));
        }
    }

    #[test]
    fn test_gray_has_neutral_chroma() {
        let width = 16u32;
        let height = 16u32;
        for gray in [1u8, 63, 127, 200, 254] {
            let frame = solid_frame(width, height, [gray, gray, gray, 255]);
            let mut planar =
                YuvPlanarImageMut::<u8>::alloc(width, height, ChromaSubsampling::Yuv420);
            bgra_to_yuv420(&mut planar, &frame, width * 4).unwrap();
            assert!(planar.u_plane.borrow().iter().all(|&u| u == 128));
            assert!(planar.v_plane.borrow().iter().all(|&v| v == 128));
        }
    }

    #[test]
    fn test_luma_matches_reference_rule() {
        let width = 49u32;
        let height = 5u32;
        let mut rng = rand::rng();
        let frame: Vec<u8> = (0..width as usize * height as usize * 4)
            .map(|_| rng.random::<u8>())
            .collect();
        let mut y_plane = vec![0u8; width as usize * height as usize];
        bgra_to_yuv400(&mut y_plane, width, &frame, width * 4, width, height).unwrap();
        for (y, px) in y_plane.iter().zip(frame.chunks_exact(4)) {
            let reference =
                (((13 * px[0] as i32 + 65 * px[1] as i32 + 33 * px[2] as i32) >> 7) + 16) as u8;
            assert_eq!(*y, reference);
        }
    }

    #[test]
    fn test_yuv420_dispatch_matches_scalar() {
        let _guard = CAPABILITY_TEST_GUARD.lock().unwrap();
        let width = 103u32;
        let height = 29u32;
        let mut rng = rand::rng();
        let frame: Vec<u8> = (0..width as usize * height as usize * 4)
            .map(|_| rng.random::<u8>())
            .collect();

        let mut dispatched = YuvPlanarImageMut::<u8>::alloc(width, height, ChromaSubsampling::Yuv420);
        bgra_to_yuv420(&mut dispatched, &frame, width * 4).unwrap();

        set_capability_override(CPU_INITIALIZED);
        let mut scalar = YuvPlanarImageMut::<u8>::alloc(width, height, ChromaSubsampling::Yuv420);
        bgra_to_yuv420(&mut scalar, &frame, width * 4).unwrap();
        set_capability_override(0);

        assert_eq!(dispatched.y_plane.borrow(), scalar.y_plane.borrow());
        assert_eq!(dispatched.u_plane.borrow(), scalar.u_plane.borrow());
        assert_eq!(dispatched.v_plane.borrow(), scalar.v_plane.borrow());
    }
}
