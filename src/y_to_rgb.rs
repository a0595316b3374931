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
use crate::images::YuvGrayImage;
#[cfg(target_arch = "aarch64")]
use crate::neon::{neon_y400_to_bgra_row, neon_y400_tv_to_bgra_row};
use crate::numerics::clamp8;
use crate::pix_error::check_packed_destination;
use crate::pix_support::{Y_COEF, LUMA_BIAS};
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
use crate::sse::{sse_y400_to_bgra_row, sse_y400_tv_to_bgra_row};
use crate::PixError;

/// Widens a full-range luma plane into gray BGRA8.
///
/// Every destination channel receives the luma sample unchanged and alpha is
/// forced fully opaque, there is no range scaling involved.
///
/// # Arguments
///
/// * `gray`: Source luma image
/// * `bgra`: Destination slice
/// * `bgra_stride`: Destination slice stride in bytes
///
/// returns: Result<(), PixError>
///
pub fn yuv400_to_bgra(
    gray: &YuvGrayImage<u8>,
    bgra: &mut [u8],
    bgra_stride: u32,
) -> Result<(), PixError> {
    gray.check_constraints()?;
    check_packed_destination(bgra, bgra_stride, gray.width, gray.height, 4)?;

    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    let use_simd128 = query_capability(CPU_HAS_SIMD128);
    #[cfg(target_arch = "aarch64")]
    let use_neon = query_capability(CPU_HAS_NEON);

    for (bgra_row, y_row) in bgra
        .chunks_exact_mut(bgra_stride as usize)
        .zip(gray.y_plane.chunks_exact(gray.y_stride as usize))
    {
        let mut _cx = 0usize;

        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
        if use_simd128 {
            _cx = unsafe { sse_y400_to_bgra_row(y_row, bgra_row, gray.width as usize) };
        }

        #[cfg(target_arch = "aarch64")]
        if use_neon {
            _cx = unsafe { neon_y400_to_bgra_row(y_row, bgra_row, gray.width as usize) };
        }

        for (bgra, &y) in bgra_row
            .chunks_exact_mut(4)
            .zip(y_row.iter())
            .take(gray.width as usize)
            .skip(_cx)
        {
            bgra[0] = y;
            bgra[1] = y;
            bgra[2] = y;
            bgra[3] = 255;
        }
    }

    Ok(())
}

/// Decodes a limited range luma plane into gray BGRA8.
///
/// The TV range signal `[16, 235]` is stretched to the full channel domain
/// with the same fixed point rule the chroma decoder uses, chroma terms held
/// at zero.
///
/// # Arguments
///
/// * `gray`: Source luma image
/// * `bgra`: Destination slice
/// * `bgra_stride`: Destination slice stride in bytes
///
/// returns: Result<(), PixError>
///
pub fn yuv400_tv_to_bgra(
    gray: &YuvGrayImage<u8>,
    bgra: &mut [u8],
    bgra_stride: u32,
) -> Result<(), PixError> {
    gray.check_constraints()?;
    check_packed_destination(bgra, bgra_stride, gray.width, gray.height, 4)?;

    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    let use_simd128 = query_capability(CPU_HAS_SIMD128);
    #[cfg(target_arch = "aarch64")]
    let use_neon = query_capability(CPU_HAS_NEON);

    for (bgra_row, y_row) in bgra
        .chunks_exact_mut(bgra_stride as usize)
        .zip(gray.y_plane.chunks_exact(gray.y_stride as usize))
    {
        let mut _cx = 0usize;

        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
        if use_simd128 {
            _cx = unsafe { sse_y400_tv_to_bgra_row(y_row, bgra_row, gray.width as usize) };
        }

        #[cfg(target_arch = "aarch64")]
        if use_neon {
            _cx = unsafe { neon_y400_tv_to_bgra_row(y_row, bgra_row, gray.width as usize) };
        }

        for (bgra, &y) in bgra_row
            .chunks_exact_mut(4)
            .zip(y_row.iter())
            .take(gray.width as usize)
            .skip(_cx)
        {
            let c = (y as i32 - LUMA_BIAS) * Y_COEF;
            let gray_value: u8 = clamp8(c >> 6);
            bgra[0] = gray_value;
            bgra[1] = gray_value;
            bgra[2] = gray_value;
            bgra[3] = 255;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luma_widening_is_identity() {
        let width = 19u32;
        let height = 4u32;
        let y_plane: Vec<u8> = (0..width as usize * height as usize)
            .map(|v| (v * 7 % 256) as u8)
            .collect();
        let gray = YuvGrayImage {
            y_plane: &y_plane,
            y_stride: width,
            width,
            height,
        };
        let mut bgra = vec![0u8; width as usize * height as usize * 4];
        yuv400_to_bgra(&gray, &mut bgra, width * 4).unwrap();
        for (px, &y) in bgra.chunks_exact(4).zip(y_plane.iter()) {
            assert_eq!(px, [y, y, y, 255]);
        }
    }

    #[test]
    fn test_tv_luma_fixed_points() {
        let y_plane = [16u8, 235u8, 0u8, 255u8];
        let gray = YuvGrayImage {
            y_plane: &y_plane,
            y_stride: 4,
            width: 4,
            height: 1,
        };
        let mut bgra = [0u8; 16];
        yuv400_tv_to_bgra(&gray, &mut bgra, 16).unwrap();
        // Black level maps to zero, nominal white stretches past 253.
        assert_eq!(bgra[0], 0);
        assert_eq!(bgra[4], ((235i32 - 16) * 74 >> 6) as u8);
        assert_eq!(bgra[8], 0);
        assert_eq!(bgra[12], 255);
    }
}
