/*
 * Copyright (c) Radzivon Bartoshyk, 3/2025. All rights reserved.
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
#[cfg(target_arch = "aarch64")]
use crate::neon::{neon_scale_down2_box_row, neon_scale_down2_point_row, neon_scale_filter_row};
use crate::numerics::{avg_round, blend_channel};
use crate::pix_error::check_packed_destination;
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
use crate::sse::{sse_scale_down2_box_row, sse_scale_down2_point_row, sse_scale_filter_row};
use crate::PixError;

/// Declares the resampling filter used while rescaling.
#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq, Hash)]
pub enum ScaleFilter {
    /// Nearest neighbour point sampling.
    None,
    /// Two pass bilinear interpolation.
    Bilinear,
}

// Bilinear filtering keeps a scratch row of this many pixels at most, wider
// sources fall back to point sampling.
pub(crate) const MAX_INPUT_WIDTH: usize = 2560;

#[inline(always)]
fn source_row(src: &[u8], base: isize, stride: isize, y: usize, row_bytes: usize) -> &[u8] {
    let start = (base + y as isize * stride) as usize;
    &src[start..start + row_bytes]
}

#[derive(Copy, Clone)]
struct ScaleDispatch {
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    use_simd128: bool,
    #[cfg(target_arch = "aarch64")]
    use_neon: bool,
}

impl ScaleDispatch {
    fn resolve() -> Self {
        ScaleDispatch {
            #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
            use_simd128: query_capability(CPU_HAS_SIMD128),
            #[cfg(target_arch = "aarch64")]
            use_neon: query_capability(CPU_HAS_NEON),
        }
    }
}

fn scale_down2_point_row(dispatch: ScaleDispatch, row0: &[u8], dst_row: &mut [u8], dst_width: usize) {
    let mut _cx = 0usize;
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    if dispatch.use_simd128 {
        _cx = unsafe { sse_scale_down2_point_row(row0, dst_row, dst_width) };
    }
    #[cfg(target_arch = "aarch64")]
    if dispatch.use_neon {
        _cx = unsafe { neon_scale_down2_point_row(row0, dst_row, dst_width) };
    }
    for (x, dst) in dst_row
        .chunks_exact_mut(4)
        .enumerate()
        .take(dst_width)
        .skip(_cx)
    {
        dst.copy_from_slice(&row0[x * 8..x * 8 + 4]);
    }
}

fn scale_down2_box_row(
    dispatch: ScaleDispatch,
    row0: &[u8],
    row1: &[u8],
    dst_row: &mut [u8],
    dst_width: usize,
) {
    let mut _cx = 0usize;
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    if dispatch.use_simd128 {
        _cx = unsafe { sse_scale_down2_box_row(row0, row1, dst_row, dst_width) };
    }
    #[cfg(target_arch = "aarch64")]
    if dispatch.use_neon {
        _cx = unsafe { neon_scale_down2_box_row(row0, row1, dst_row, dst_width) };
    }
    for (x, dst) in dst_row
        .chunks_exact_mut(4)
        .enumerate()
        .take(dst_width)
        .skip(_cx)
    {
        let px = x * 8;
        for c in 0..4 {
            dst[c] = ((row0[px + c] as u16
                + row0[px + 4 + c] as u16
                + row1[px + c] as u16
                + row1[px + 4 + c] as u16
                + 2)
                >> 2) as u8;
        }
    }
}

// Blends two source rows into the scratch row and duplicates the trailing
// pixel so the horizontal pass may always look one pixel ahead.
fn scale_filter_row(
    dispatch: ScaleDispatch,
    dst: &mut [u8],
    row0: &[u8],
    row1: &[u8],
    width: usize,
    yf: i32,
) {
    let mut _cx = 0usize;
    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    if dispatch.use_simd128 {
        _cx = unsafe { sse_scale_filter_row(dst, row0, row1, width, yf) };
    }
    #[cfg(target_arch = "aarch64")]
    if dispatch.use_neon {
        _cx = unsafe { neon_scale_filter_row(dst, row0, row1, width, yf) };
    }
    let start = _cx * 4;
    let end = width * 4;
    if yf == 0 {
        dst[start..end].copy_from_slice(&row0[start..end]);
    } else if yf == 128 {
        for ((dst, &a), &b) in dst[start..end]
            .iter_mut()
            .zip(row0[start..end].iter())
            .zip(row1[start..end].iter())
        {
            *dst = avg_round(a, b);
        }
    } else {
        let y1_fraction = yf;
        let y0_fraction = 256 - yf;
        for ((dst, &a), &b) in dst[start..end]
            .iter_mut()
            .zip(row0[start..end].iter())
            .zip(row1[start..end].iter())
        {
            *dst = ((a as i32 * y0_fraction + b as i32 * y1_fraction) >> 8) as u8;
        }
    }
    dst.copy_within((width - 1) * 4..width * 4, width * 4);
}

fn scale_cols_point(dst_row: &mut [u8], src_row: &[u8], dst_width: usize, mut x: i64, dx: i64) {
    for dst in dst_row.chunks_exact_mut(4).take(dst_width) {
        let xi = (x >> 16) as usize * 4;
        dst.copy_from_slice(&src_row[xi..xi + 4]);
        x += dx;
    }
}

fn scale_cols_bilinear(dst_row: &mut [u8], src_row: &[u8], dst_width: usize, mut x: i64, dx: i64) {
    for dst in dst_row.chunks_exact_mut(4).take(dst_width) {
        let xi = (x >> 16) as usize * 4;
        let f = (x & 0xffff) as i32;
        let ab = &src_row[xi..xi + 8];
        dst[0] = blend_channel(ab[0], ab[4], f);
        dst[1] = blend_channel(ab[1], ab[5], f);
        dst[2] = blend_channel(ab[2], ab[6], f);
        dst[3] = blend_channel(ab[3], ab[7], f);
        x += dx;
    }
}

#[allow(clippy::too_many_arguments)]
fn scale_any(
    dispatch: ScaleDispatch,
    src: &[u8],
    src_base: isize,
    src_stride: isize,
    src_width: usize,
    src_height: usize,
    dst: &mut [u8],
    dst_stride: usize,
    dst_width: usize,
    dst_height: usize,
    filtering: ScaleFilter,
) {
    let dx = ((src_width as i64) << 16) / dst_width as i64;
    let dy = ((src_height as i64) << 16) / dst_height as i64;
    // Center of texel sampling, minification backs off by half a texel so the
    // first and last samples stay balanced against the edges.
    let x = if dx >= 65536 { (dx >> 1) - 32768 } else { dx >> 1 };
    let mut y = if dy >= 65536 { (dy >> 1) - 32768 } else { dy >> 1 };
    let row_bytes = src_width * 4;

    if filtering == ScaleFilter::None || src_width > MAX_INPUT_WIDTH {
        for dst_row in dst.chunks_exact_mut(dst_stride).take(dst_height) {
            let yi = (y >> 16) as usize;
            let src_row = source_row(src, src_base, src_stride, yi, row_bytes);
            scale_cols_point(dst_row, src_row, dst_width, x, dx);
            y += dy;
        }
        return;
    }

    let mut scratch = vec![0u8; row_bytes + 4];
    let maxy = if src_height > 1 {
        ((src_height as i64 - 1) << 16) - 1
    } else {
        0
    };
    if y > maxy {
        y = maxy;
    }
    for dst_row in dst.chunks_exact_mut(dst_stride).take(dst_height) {
        let yi = (y >> 16) as usize;
        let yf = ((y >> 8) & 255) as i32;
        let row0 = source_row(src, src_base, src_stride, yi, row_bytes);
        let row1 = source_row(
            src,
            src_base,
            src_stride,
            (yi + 1).min(src_height - 1),
            row_bytes,
        );
        scale_filter_row(dispatch, &mut scratch, row0, row1, src_width, yf);
        scale_cols_bilinear(dst_row, &scratch, dst_width, x, dx);
        y += dy;
        if y > maxy {
            y = maxy;
        }
    }
}

/// Rescales a packed 32 bit per pixel image to arbitrary target dimensions.
///
/// The routine works on any 4 byte packed layout, channel order never
/// influences resampling. A matching source and target size degenerates into
/// a row copy and an exact 1/2 ratio takes an optimized downsample path,
/// everything else is resolved with fixed point stepping, either point
/// sampled or bilinear filtered.
///
/// A negative `src_height` declares a bottom-up source, the image is read
/// back to front and the output comes out flipped vertically.
///
/// # Arguments
///
/// * `src`: Source slice
/// * `src_stride`: Source slice stride in bytes
/// * `src_width`: Source image width
/// * `src_height`: Source image height, negative height flips the image
/// * `dst`: Destination slice
/// * `dst_stride`: Destination slice stride in bytes
/// * `dst_width`: Destination image width
/// * `dst_height`: Destination image height
/// * `filter`: Refer to [ScaleFilter] for filtering info
///
/// returns: Result<(), PixError>
///
#[allow(clippy::too_many_arguments)]
pub fn scale_rgba8(
    src: &[u8],
    src_stride: u32,
    src_width: u32,
    src_height: i32,
    dst: &mut [u8],
    dst_stride: u32,
    dst_width: u32,
    dst_height: u32,
    filter: ScaleFilter,
) -> Result<(), PixError> {
    if src_width == 0 || src_height == 0 {
        return Err(PixError::ZeroBaseSize);
    }
    if dst_width == 0 || dst_height == 0 {
        return Err(PixError::InvalidScaleTarget);
    }
    let abs_height = src_height.unsigned_abs();
    check_packed_destination(src, src_stride, src_width, abs_height, 4)?;
    check_packed_destination(dst, dst_stride, dst_width, dst_height, 4)?;

    let mut filtering = filter;
    // Test harness escape hatch, not part of the stable contract.
    if let Ok(filter_override) = std::env::var("PIXFMT_FILTER") {
        if let Ok(value) = filter_override.parse::<i32>() {
            filtering = if value == 0 {
                ScaleFilter::None
            } else {
                ScaleFilter::Bilinear
            };
        }
    }

    // A bottom-up source normalizes once, ahead of strategy selection.
    let mut src_base = 0isize;
    let mut src_row_stride = src_stride as isize;
    if src_height < 0 {
        src_base = (abs_height as isize - 1) * src_stride as isize;
        src_row_stride = -(src_stride as isize);
    }

    let dispatch = ScaleDispatch::resolve();
    let width = src_width as usize;
    let row_bytes = width * 4;

    if dst_width == src_width && dst_height == abs_height {
        for (y, dst_row) in dst
            .chunks_exact_mut(dst_stride as usize)
            .take(dst_height as usize)
            .enumerate()
        {
            let src_row = source_row(src, src_base, src_row_stride, y, row_bytes);
            dst_row[..row_bytes].copy_from_slice(src_row);
        }
        return Ok(());
    }

    if 2 * dst_width == src_width && 2 * dst_height == abs_height {
        for (y, dst_row) in dst
            .chunks_exact_mut(dst_stride as usize)
            .take(dst_height as usize)
            .enumerate()
        {
            let row0 = source_row(src, src_base, src_row_stride, 2 * y, row_bytes);
            match filtering {
                ScaleFilter::None => {
                    // Point mode keeps the even pixels of the even row, the
                    // odd row is never read.
                    scale_down2_point_row(dispatch, row0, dst_row, dst_width as usize);
                }
                ScaleFilter::Bilinear => {
                    let row1 = source_row(src, src_base, src_row_stride, 2 * y + 1, row_bytes);
                    scale_down2_box_row(dispatch, row0, row1, dst_row, dst_width as usize);
                }
            }
        }
        return Ok(());
    }

    scale_any(
        dispatch,
        src,
        src_base,
        src_row_stride,
        width,
        abs_height as usize,
        dst,
        dst_stride as usize,
        dst_width as usize,
        dst_height as usize,
        filtering,
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_features::{set_capability_override, CAPABILITY_TEST_GUARD, CPU_INITIALIZED};
    use rand::Rng;

    fn random_frame(width: usize, height: usize) -> Vec<u8> {
        let mut rng = rand::rng();
        (0..width * height * 4).map(|_| rng.random::<u8>()).collect()
    }

    #[test]
    fn test_identity_scale_is_exact_copy() {
        let width = 37usize;
        let height = 11usize;
        let src = random_frame(width, height);
        for filter in [ScaleFilter::None, ScaleFilter::Bilinear] {
            let mut dst = vec![0u8; src.len()];
            scale_rgba8(
                &src,
                width as u32 * 4,
                width as u32,
                height as i32,
                &mut dst,
                width as u32 * 4,
                width as u32,
                height as u32,
                filter,
            )
            .unwrap();
            assert_eq!(src, dst);
        }
    }

    #[test]
    fn test_half_downsample_point_takes_even_pixels() {
        let width = 64usize;
        let height = 16usize;
        let src = random_frame(width, height);
        let mut dst = vec![0u8; width / 2 * height / 2 * 4];
        scale_rgba8(
            &src,
            width as u32 * 4,
            width as u32,
            height as i32,
            &mut dst,
            width as u32 / 2 * 4,
            width as u32 / 2,
            height as u32 / 2,
            ScaleFilter::None,
        )
        .unwrap();
        for y in 0..height / 2 {
            for x in 0..width / 2 {
                let dst_px = &dst[(y * width / 2 + x) * 4..][..4];
                let src_px = &src[(2 * y * width + 2 * x) * 4..][..4];
                assert_eq!(dst_px, src_px);
            }
        }
    }

    #[test]
    fn test_half_downsample_box_filter_rule() {
        let _guard = CAPABILITY_TEST_GUARD.lock().unwrap();
        let width = 32usize;
        let height = 8usize;
        let src = random_frame(width, height);
        let mut dst = vec![0u8; width / 2 * height / 2 * 4];
        scale_rgba8(
            &src,
            width as u32 * 4,
            width as u32,
            height as i32,
            &mut dst,
            width as u32 / 2 * 4,
            width as u32 / 2,
            height as u32 / 2,
            ScaleFilter::Bilinear,
        )
        .unwrap();
        for y in 0..height / 2 {
            for x in 0..width / 2 {
                for c in 0..4 {
                    let p00 = src[(2 * y * width + 2 * x) * 4 + c] as u16;
                    let p01 = src[(2 * y * width + 2 * x + 1) * 4 + c] as u16;
                    let p10 = src[((2 * y + 1) * width + 2 * x) * 4 + c] as u16;
                    let p11 = src[((2 * y + 1) * width + 2 * x + 1) * 4 + c] as u16;
                    let reference = ((p00 + p01 + p10 + p11 + 2) >> 2) as u8;
                    assert_eq!(dst[(y * width / 2 + x) * 4 + c], reference);
                }
            }
        }
    }

    #[test]
    fn test_fixed_point_stepping_mapping() {
        // 100 -> 50 yields dx == 131072, the sampled column sequence is the
        // even column set and never reaches the source width.
        let width = 100usize;
        let height = 1usize;
        let src: Vec<u8> = (0..width)
            .flat_map(|x| [x as u8, x as u8, x as u8, 255])
            .collect();
        let mut dst = vec![0u8; 50 * 4];
        scale_rgba8(
            &src,
            width as u32 * 4,
            width as u32,
            height as i32,
            &mut dst,
            50 * 4,
            50,
            1,
            ScaleFilter::None,
        )
        .unwrap();
        let sampled: Vec<u8> = dst.chunks_exact(4).map(|px| px[0]).collect();
        for (i, &v) in sampled.iter().enumerate() {
            assert_eq!(v as usize, 2 * i);
        }
        assert!((*sampled.last().unwrap() as usize) < width);
    }

    #[test]
    fn test_negative_height_matches_prior_flip() {
        let _guard = CAPABILITY_TEST_GUARD.lock().unwrap();
        let width = 24usize;
        let height = 10usize;
        let src = random_frame(width, height);
        let mut flipped = vec![0u8; src.len()];
        for y in 0..height {
            let target = height - 1 - y;
            flipped[target * width * 4..(target + 1) * width * 4]
                .copy_from_slice(&src[y * width * 4..(y + 1) * width * 4]);
        }

        for filter in [ScaleFilter::None, ScaleFilter::Bilinear] {
            let mut from_negative = vec![0u8; width / 2 * height / 2 * 4];
            scale_rgba8(
                &src,
                width as u32 * 4,
                width as u32,
                -(height as i32),
                &mut from_negative,
                width as u32 / 2 * 4,
                width as u32 / 2,
                height as u32 / 2,
                filter,
            )
            .unwrap();
            let mut from_flipped = vec![0u8; width / 2 * height / 2 * 4];
            scale_rgba8(
                &flipped,
                width as u32 * 4,
                width as u32,
                height as i32,
                &mut from_flipped,
                width as u32 / 2 * 4,
                width as u32 / 2,
                height as u32 / 2,
                filter,
            )
            .unwrap();
            assert_eq!(from_negative, from_flipped);
        }
    }

    #[test]
    fn test_invalid_arguments_leave_destination_untouched() {
        let src = random_frame(4, 4);
        let mut dst = vec![7u8; 4 * 4 * 4];
        assert!(scale_rgba8(&src, 16, 4, 0, &mut dst, 16, 4, 4, ScaleFilter::None).is_err());
        assert!(scale_rgba8(&src, 16, 0, 4, &mut dst, 16, 4, 4, ScaleFilter::None).is_err());
        assert!(scale_rgba8(&src, 16, 4, 4, &mut dst, 16, 0, 4, ScaleFilter::None).is_err());
        assert!(scale_rgba8(&src, 16, 4, 4, &mut dst, 16, 4, 0, ScaleFilter::None).is_err());
        assert!(dst.iter().all(|&v| v == 7));
    }

    #[test]
    fn test_bilinear_upscale_dispatch_matches_scalar() {
        let _guard = CAPABILITY_TEST_GUARD.lock().unwrap();
        let src_width = 61usize;
        let src_height = 13usize;
        let dst_width = 160usize;
        let dst_height = 29usize;
        let src = random_frame(src_width, src_height);

        let mut dispatched = vec![0u8; dst_width * dst_height * 4];
        scale_rgba8(
            &src,
            src_width as u32 * 4,
            src_width as u32,
            src_height as i32,
            &mut dispatched,
            dst_width as u32 * 4,
            dst_width as u32,
            dst_height as u32,
            ScaleFilter::Bilinear,
        )
        .unwrap();

        set_capability_override(CPU_INITIALIZED);
        let mut scalar = vec![0u8; dst_width * dst_height * 4];
        scale_rgba8(
            &src,
            src_width as u32 * 4,
            src_width as u32,
            src_height as i32,
            &mut scalar,
            dst_width as u32 * 4,
            dst_width as u32,
            dst_height as u32,
            ScaleFilter::Bilinear,
        )
        .unwrap();
        set_capability_override(0);

        assert_eq!(dispatched, scalar);
    }

    #[test]
    fn test_environment_override_forces_point_sampling() {
        let _guard = CAPABILITY_TEST_GUARD.lock().unwrap();
        let width = 16usize;
        let height = 8usize;
        let src = random_frame(width, height);

        std::env::set_var("PIXFMT_FILTER", "0");
        let mut overridden = vec![0u8; width / 2 * height / 2 * 4];
        scale_rgba8(
            &src,
            width as u32 * 4,
            width as u32,
            height as i32,
            &mut overridden,
            width as u32 / 2 * 4,
            width as u32 / 2,
            height as u32 / 2,
            ScaleFilter::Bilinear,
        )
        .unwrap();
        std::env::remove_var("PIXFMT_FILTER");

        let mut pointed = vec![0u8; width / 2 * height / 2 * 4];
        scale_rgba8(
            &src,
            width as u32 * 4,
            width as u32,
            height as i32,
            &mut pointed,
            width as u32 / 2 * 4,
            width as u32 / 2,
            height as u32 / 2,
            ScaleFilter::None,
        )
        .unwrap();
        assert_eq!(overridden, pointed);
    }
}
