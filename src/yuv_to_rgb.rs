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
use crate::cpu_features::{query_capability, CPU_HAS_SIMD128};
#[cfg(target_arch = "aarch64")]
use crate::cpu_features::{query_capability, CPU_HAS_NEON};
use crate::images::YuvPlanarImage;
#[cfg(target_arch = "aarch64")]
use crate::neon::neon_yuv_to_rgbx_row;
use crate::numerics::clamp8;
use crate::pix_error::check_packed_destination;
use crate::pix_support::{
    ChromaSubsampling, PackedChannels, CHROMA_BIAS, LUMA_BIAS, U_COEF_B, U_COEF_G, V_COEF_G,
    V_COEF_R, Y_COEF,
};
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
use crate::sse::sse_yuv_to_rgbx_row;
use crate::PixError;

fn yuv_to_rgbx_impl<const DESTINATION_CHANNELS: u8, const SAMPLING: u8>(
    planar_image: &YuvPlanarImage<u8>,
    rgba: &mut [u8],
    rgba_stride: u32,
) -> Result<(), PixError> {
    let chroma_subsampling: ChromaSubsampling = SAMPLING.into();
    let dst_chans: PackedChannels = DESTINATION_CHANNELS.into();
    let channels = dst_chans.get_channels_count();

    check_packed_destination(
        rgba,
        rgba_stride,
        planar_image.width,
        planar_image.height,
        channels,
    )?;
    planar_image.check_constraints(chroma_subsampling)?;

    let width = planar_image.width as usize;

    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    let use_simd128 = query_capability(CPU_HAS_SIMD128) && channels == 4;
    #[cfg(target_arch = "aarch64")]
    let use_neon = query_capability(CPU_HAS_NEON) && channels == 4;

    for (y, (rgba_row, y_row)) in rgba
        .chunks_exact_mut(rgba_stride as usize)
        .zip(planar_image.y_plane.chunks_exact(planar_image.y_stride as usize))
        .enumerate()
    {
        let chroma_row = match chroma_subsampling {
            ChromaSubsampling::Yuv420 => y >> 1,
            ChromaSubsampling::Yuv444 => y,
        };
        let u_row = &planar_image.u_plane[chroma_row * planar_image.u_stride as usize..];
        let v_row = &planar_image.v_plane[chroma_row * planar_image.v_stride as usize..];

        let mut _cx = 0usize;

        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
        if use_simd128 {
            _cx = unsafe {
                sse_yuv_to_rgbx_row::<DESTINATION_CHANNELS, SAMPLING>(
                    y_row, u_row, v_row, rgba_row, width,
                )
            };
        }

        #[cfg(target_arch = "aarch64")]
        if use_neon {
            _cx = unsafe {
                neon_yuv_to_rgbx_row::<DESTINATION_CHANNELS, SAMPLING>(
                    y_row, u_row, v_row, rgba_row, width,
                )
            };
        }

        for x in _cx..width {
            let uv_x = match chroma_subsampling {
                ChromaSubsampling::Yuv420 => x >> 1,
                ChromaSubsampling::Yuv444 => x,
            };
            let c = (y_row[x] as i32 - LUMA_BIAS) * Y_COEF;
            let cb = u_row[uv_x] as i32 - CHROMA_BIAS;
            let cr = v_row[uv_x] as i32 - CHROMA_BIAS;

            let b: u8 = clamp8((c + U_COEF_B * cb) >> 6);
            let g: u8 = clamp8((c + U_COEF_G * cb + V_COEF_G * cr) >> 6);
            let r: u8 = clamp8((c + V_COEF_R * cr) >> 6);

            let rgba = &mut rgba_row[x * channels..(x + 1) * channels];
            rgba[dst_chans.get_b_channel_offset()] = b;
            rgba[dst_chans.get_g_channel_offset()] = g;
            rgba[dst_chans.get_r_channel_offset()] = r;
            if dst_chans.has_alpha() {
                rgba[dst_chans.get_a_channel_offset()] = 255;
            }
        }
    }

    Ok(())
}

/// Convert YUV420 planar format to BGRA8.
///
/// Each chroma sample covers its whole 2x2 block, no chroma interpolation
/// is performed.
///
/// # Arguments
///
/// * `planar_image` - Source planar image.
/// * `bgra` - A mutable slice for the BGRA output.
/// * `bgra_stride` - The stride (bytes per row) for the BGRA data.
///
/// returns: Result<(), PixError>
///
pub fn yuv420_to_bgra(
    planar_image: &YuvPlanarImage<u8>,
    bgra: &mut [u8],
    bgra_stride: u32,
) -> Result<(), PixError> {
    yuv_to_rgbx_impl::<{ PackedChannels::Bgra as u8 }, { ChromaSubsampling::Yuv420 as u8 }>(
        planar_image,
        bgra,
        bgra_stride,
    )
}

/// Convert YUV420 planar format to RGBA8.
///
/// # Arguments
///
/// * `planar_image` - Source planar image.
/// * `rgba` - A mutable slice for the RGBA output.
/// * `rgba_stride` - The stride (bytes per row) for the RGBA data.
///
/// returns: Result<(), PixError>
///
pub fn yuv420_to_rgba(
    planar_image: &YuvPlanarImage<u8>,
    rgba: &mut [u8],
    rgba_stride: u32,
) -> Result<(), PixError> {
    yuv_to_rgbx_impl::<{ PackedChannels::Rgba as u8 }, { ChromaSubsampling::Yuv420 as u8 }>(
        planar_image,
        rgba,
        rgba_stride,
    )
}

/// Convert YUV420 planar format to ARGB8.
///
/// # Arguments
///
/// * `planar_image` - Source planar image.
/// * `argb` - A mutable slice for the ARGB output.
/// * `argb_stride` - The stride (bytes per row) for the ARGB data.
///
/// returns: Result<(), PixError>
///
pub fn yuv420_to_argb(
    planar_image: &YuvPlanarImage<u8>,
    argb: &mut [u8],
    argb_stride: u32,
) -> Result<(), PixError> {
    yuv_to_rgbx_impl::<{ PackedChannels::Argb as u8 }, { ChromaSubsampling::Yuv420 as u8 }>(
        planar_image,
        argb,
        argb_stride,
    )
}

/// Convert YUV444 planar format to BGRA8.
///
/// # Arguments
///
/// * `planar_image` - Source planar image.
/// * `bgra` - A mutable slice for the BGRA output.
/// * `bgra_stride` - The stride (bytes per row) for the BGRA data.
///
/// returns: Result<(), PixError>
///
pub fn yuv444_to_bgra(
    planar_image: &YuvPlanarImage<u8>,
    bgra: &mut [u8],
    bgra_stride: u32,
) -> Result<(), PixError> {
    yuv_to_rgbx_impl::<{ PackedChannels::Bgra as u8 }, { ChromaSubsampling::Yuv444 as u8 }>(
        planar_image,
        bgra,
        bgra_stride,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_features::{set_capability_override, CAPABILITY_TEST_GUARD, CPU_INITIALIZED};
    use crate::images::YuvPlanarImageMut;
    use crate::rgb_to_yuv::bgra_to_yuv420;
    use rand::Rng;

    #[test]
    fn test_neutral_chroma_decodes_gray() {
        let width = 8u32;
        let height = 8u32;
        let y_plane = vec![126u8; (width * height) as usize];
        let u_plane = vec![128u8; ((width / 2) * (height / 2)) as usize];
        let v_plane = vec![128u8; ((width / 2) * (height / 2)) as usize];
        let planar = YuvPlanarImage {
            y_plane: &y_plane,
            y_stride: width,
            u_plane: &u_plane,
            u_stride: width / 2,
            v_plane: &v_plane,
            v_stride: width / 2,
            width,
            height,
        };
        let mut bgra = vec![0u8; (width * height * 4) as usize];
        yuv420_to_bgra(&planar, &mut bgra, width * 4).unwrap();
        let expected = ((126i32 - 16) * 74 >> 6) as u8;
        for px in bgra.chunks_exact(4) {
            assert_eq!(px, [expected, expected, expected, 255]);
        }
    }

    #[test]
    fn test_saturated_limits_clamp() {
        let y_plane = [255u8, 0u8];
        let u_plane = [255u8];
        let v_plane = [0u8];
        let planar = YuvPlanarImage {
            y_plane: &y_plane,
            y_stride: 2,
            u_plane: &u_plane,
            u_stride: 1,
            v_plane: &v_plane,
            v_stride: 1,
            width: 2,
            height: 1,
        };
        let mut bgra = [0u8; 8];
        yuv420_to_bgra(&planar, &mut bgra, 8).unwrap();
        // Blue of the bright pixel overshoots above 255, red of the dark
        // pixel undershoots below 0.
        assert_eq!(bgra[0], 255);
        assert_eq!(bgra[6], 0);
    }

    #[test]
    fn test_round_trip_stays_close() {
        let width = 64u32;
        let height = 64u32;
        let mut rng = rand::rng();
        let r = rng.random::<u8>();
        let g = rng.random::<u8>();
        let b = rng.random::<u8>();
        let frame: Vec<u8> = [b, g, r, 255u8]
            .iter()
            .copied()
            .cycle()
            .take((width * height * 4) as usize)
            .collect();

        let mut planar = YuvPlanarImageMut::<u8>::alloc(width, height, ChromaSubsampling::Yuv420);
        bgra_to_yuv420(&mut planar, &frame, width * 4).unwrap();
        let fixed = planar.to_fixed();
        let mut restored = vec![0u8; frame.len()];
        yuv420_to_bgra(&fixed, &mut restored, width * 4).unwrap();

        for (restored, origin) in restored.chunks_exact(4).zip(frame.chunks_exact(4)) {
            for c in 0..3 {
                let diff = (restored[c] as i32 - origin[c] as i32).abs();
                assert!(
                    diff <= 10,
                    "Original BGRA {:?}, round-tripped {:?}",
                    origin,
                    restored
                );
            }
        }
    }

    #[test]
    fn test_yuv420_dispatch_matches_scalar() {
        let _guard = CAPABILITY_TEST_GUARD.lock().unwrap();
        let width = 97u32;
        let height = 23u32;
        let mut rng = rand::rng();
        let y_plane: Vec<u8> = (0..(width * height) as usize)
            .map(|_| rng.random::<u8>())
            .collect();
        let chroma_len = (width.div_ceil(2) * height.div_ceil(2)) as usize;
        let u_plane: Vec<u8> = (0..chroma_len).map(|_| rng.random::<u8>()).collect();
        let v_plane: Vec<u8> = (0..chroma_len).map(|_| rng.random::<u8>()).collect();
        let planar = YuvPlanarImage {
            y_plane: &y_plane,
            y_stride: width,
            u_plane: &u_plane,
            u_stride: width.div_ceil(2),
            v_plane: &v_plane,
            v_stride: width.div_ceil(2),
            width,
            height,
        };

        let mut dispatched = vec![0u8; (width * height * 4) as usize];
        yuv420_to_bgra(&planar, &mut dispatched, width * 4).unwrap();

        set_capability_override(CPU_INITIALIZED);
        let mut scalar = vec![0u8; (width * height * 4) as usize];
        yuv420_to_bgra(&planar, &mut scalar, width * 4).unwrap();
        set_capability_override(0);

        assert_eq!(dispatched, scalar);
    }
}
