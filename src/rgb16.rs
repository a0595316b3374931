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
use crate::numerics::replicate_bits;
use crate::pix_error::{check_packed_destination, check_y8_channel};
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
use crate::sse::{
    sse_argb1555_to_bgra_row, sse_argb4444_to_bgra_row, sse_bgra_to_rgb565_row,
    sse_rgb565_to_bgra_row,
};
use crate::PixError;

#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub(crate) enum Rgb16Layout {
    Rgb565 = 0,
    Argb1555 = 1,
    Argb4444 = 2,
}

impl From<u8> for Rgb16Layout {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => Rgb16Layout::Rgb565,
            1 => Rgb16Layout::Argb1555,
            2 => Rgb16Layout::Argb4444,
            _ => {
                panic!("Unknown value")
            }
        }
    }
}

#[inline(always)]
pub(crate) fn unpack_rgb16<const LAYOUT: u8>(v: u16) -> (u8, u8, u8, u8) {
    let layout: Rgb16Layout = LAYOUT.into();
    match layout {
        Rgb16Layout::Rgb565 => {
            let b = replicate_bits::<5>((v & 0x1f) << 3);
            let g = replicate_bits::<6>(((v >> 5) & 0x3f) << 2);
            let r = replicate_bits::<5>(((v >> 11) & 0x1f) << 3);
            (b, g, r, 255)
        }
        Rgb16Layout::Argb1555 => {
            let b = replicate_bits::<5>((v & 0x1f) << 3);
            let g = replicate_bits::<5>(((v >> 5) & 0x1f) << 3);
            let r = replicate_bits::<5>(((v >> 10) & 0x1f) << 3);
            let a = if v & 0x8000 != 0 { 255 } else { 0 };
            (b, g, r, a)
        }
        Rgb16Layout::Argb4444 => {
            let b = replicate_bits::<4>((v & 0xf) << 4);
            let g = replicate_bits::<4>(((v >> 4) & 0xf) << 4);
            let r = replicate_bits::<4>(((v >> 8) & 0xf) << 4);
            let a = replicate_bits::<4>(((v >> 12) & 0xf) << 4);
            (b, g, r, a)
        }
    }
}

#[inline(always)]
pub(crate) fn pack_rgb16<const LAYOUT: u8>(b: u8, g: u8, r: u8, a: u8) -> u16 {
    let layout: Rgb16Layout = LAYOUT.into();
    match layout {
        Rgb16Layout::Rgb565 => {
            (b as u16 >> 3) | ((g as u16 >> 2) << 5) | ((r as u16 >> 3) << 11)
        }
        Rgb16Layout::Argb1555 => {
            (b as u16 >> 3)
                | ((g as u16 >> 3) << 5)
                | ((r as u16 >> 3) << 10)
                | ((a as u16 >> 7) << 15)
        }
        Rgb16Layout::Argb4444 => {
            (b as u16 >> 4)
                | ((g as u16 >> 4) << 4)
                | ((r as u16 >> 4) << 8)
                | ((a as u16 >> 4) << 12)
        }
    }
}

fn rgb16_to_bgra_impl<const LAYOUT: u8>(
    src: &[u16],
    src_stride: u32,
    dst: &mut [u8],
    dst_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    check_y8_channel(src, src_stride, width, height)?;
    check_packed_destination(dst, dst_stride, width, height, 4)?;

    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    let use_simd128 = query_capability(CPU_HAS_SIMD128);

    for (dst_row, src_row) in dst
        .chunks_exact_mut(dst_stride as usize)
        .zip(src.chunks_exact(src_stride as usize))
    {
        let mut _cx = 0usize;

        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
        if use_simd128 {
            let layout: Rgb16Layout = LAYOUT.into();
            _cx = unsafe {
                match layout {
                    Rgb16Layout::Rgb565 => sse_rgb565_to_bgra_row(src_row, dst_row, width as usize),
                    Rgb16Layout::Argb1555 => {
                        sse_argb1555_to_bgra_row(src_row, dst_row, width as usize)
                    }
                    Rgb16Layout::Argb4444 => {
                        sse_argb4444_to_bgra_row(src_row, dst_row, width as usize)
                    }
                }
            };
        }

        for (dst, &src) in dst_row
            .chunks_exact_mut(4)
            .zip(src_row.iter())
            .take(width as usize)
            .skip(_cx)
        {
            let (b, g, r, a) = unpack_rgb16::<LAYOUT>(src);
            dst[0] = b;
            dst[1] = g;
            dst[2] = r;
            dst[3] = a;
        }
    }

    Ok(())
}

fn bgra_to_rgb16_impl<const LAYOUT: u8>(
    src: &[u8],
    src_stride: u32,
    dst: &mut [u16],
    dst_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    check_packed_destination(src, src_stride, width, height, 4)?;
    check_y8_channel(dst, dst_stride, width, height)?;

    #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
    let use_simd128 = query_capability(CPU_HAS_SIMD128);

    for (dst_row, src_row) in dst
        .chunks_exact_mut(dst_stride as usize)
        .zip(src.chunks_exact(src_stride as usize))
    {
        let mut _cx = 0usize;

        #[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
        if use_simd128 {
            let layout: Rgb16Layout = LAYOUT.into();
            if layout == Rgb16Layout::Rgb565 {
                _cx = unsafe { sse_bgra_to_rgb565_row(src_row, dst_row, width as usize) };
            }
        }

        for (dst, src) in dst_row
            .iter_mut()
            .zip(src_row.chunks_exact(4))
            .take(width as usize)
            .skip(_cx)
        {
            *dst = pack_rgb16::<LAYOUT>(src[0], src[1], src[2], src[3]);
        }
    }

    Ok(())
}

/// Converts RGB565 to BGRA8, replicating field bits into full channels.
///
/// # Arguments
///
/// * `src`: Source slice of packed 565 pixels
/// * `src_stride`: Source stride in elements
/// * `dst`: Destination slice
/// * `dst_stride`: Destination stride in bytes
/// * `width`: Image width
/// * `height`: Image height
///
/// returns: Result<(), PixError>
///
pub fn rgb565_to_bgra(
    src: &[u16],
    src_stride: u32,
    dst: &mut [u8],
    dst_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    rgb16_to_bgra_impl::<{ Rgb16Layout::Rgb565 as u8 }>(
        src, src_stride, dst, dst_stride, width, height,
    )
}

/// Converts ARGB1555 to BGRA8, the single alpha bit maps to 0 or 255.
///
/// # Arguments
///
/// * `src`: Source slice of packed 1555 pixels
/// * `src_stride`: Source stride in elements
/// * `dst`: Destination slice
/// * `dst_stride`: Destination stride in bytes
/// * `width`: Image width
/// * `height`: Image height
///
/// returns: Result<(), PixError>
///
pub fn argb1555_to_bgra(
    src: &[u16],
    src_stride: u32,
    dst: &mut [u8],
    dst_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    rgb16_to_bgra_impl::<{ Rgb16Layout::Argb1555 as u8 }>(
        src, src_stride, dst, dst_stride, width, height,
    )
}

/// Converts ARGB4444 to BGRA8, nibbles replicate into full channels.
///
/// # Arguments
///
/// * `src`: Source slice of packed 4444 pixels
/// * `src_stride`: Source stride in elements
/// * `dst`: Destination slice
/// * `dst_stride`: Destination stride in bytes
/// * `width`: Image width
/// * `height`: Image height
///
/// returns: Result<(), PixError>
///
pub fn argb4444_to_bgra(
    src: &[u16],
    src_stride: u32,
    dst: &mut [u8],
    dst_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    rgb16_to_bgra_impl::<{ Rgb16Layout::Argb4444 as u8 }>(
        src, src_stride, dst, dst_stride, width, height,
    )
}

/// Converts BGRA8 to RGB565 by truncating each channel.
///
/// # Arguments
///
/// * `src`: Source slice
/// * `src_stride`: Source stride in bytes
/// * `dst`: Destination slice of packed 565 pixels
/// * `dst_stride`: Destination stride in elements
/// * `width`: Image width
/// * `height`: Image height
///
/// returns: Result<(), PixError>
///
pub fn bgra_to_rgb565(
    src: &[u8],
    src_stride: u32,
    dst: &mut [u16],
    dst_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    bgra_to_rgb16_impl::<{ Rgb16Layout::Rgb565 as u8 }>(
        src, src_stride, dst, dst_stride, width, height,
    )
}

/// Converts BGRA8 to ARGB1555 by truncating each channel.
///
/// # Arguments
///
/// * `src`: Source slice
/// * `src_stride`: Source stride in bytes
/// * `dst`: Destination slice of packed 1555 pixels
/// * `dst_stride`: Destination stride in elements
/// * `width`: Image width
/// * `height`: Image height
///
/// returns: Result<(), PixError>
///
pub fn bgra_to_argb1555(
    src: &[u8],
    src_stride: u32,
    dst: &mut [u16],
    dst_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    bgra_to_rgb16_impl::<{ Rgb16Layout::Argb1555 as u8 }>(
        src, src_stride, dst, dst_stride, width, height,
    )
}

/// Converts BGRA8 to ARGB4444 by truncating each channel.
///
/// # Arguments
///
/// * `src`: Source slice
/// * `src_stride`: Source stride in bytes
/// * `dst`: Destination slice of packed 4444 pixels
/// * `dst_stride`: Destination stride in elements
/// * `width`: Image width
/// * `height`: Image height
///
/// returns: Result<(), PixError>
///
pub fn bgra_to_argb4444(
    src: &[u8],
    src_stride: u32,
    dst: &mut [u16],
    dst_stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    bgra_to_rgb16_impl::<{ Rgb16Layout::Argb4444 as u8 }>(
        src, src_stride, dst, dst_stride, width, height,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cpu_features::{set_capability_override, CAPABILITY_TEST_GUARD, CPU_INITIALIZED};

    #[test]
    fn test_rgb565_round_trip_whole_domain() {
        let width = 256u32;
        let height = 256u32;
        let src: Vec<u16> = (0..=u16::MAX).collect();
        let mut expanded = vec![0u8; src.len() * 4];
        rgb565_to_bgra(&src, width, &mut expanded, width * 4, width, height).unwrap();
        let mut packed = vec![0u16; src.len()];
        bgra_to_rgb565(&expanded, width * 4, &mut packed, width, width, height).unwrap();
        assert_eq!(src, packed);
    }

    #[test]
    fn test_argb1555_round_trip_whole_domain() {
        let width = 256u32;
        let height = 256u32;
        let src: Vec<u16> = (0..=u16::MAX).collect();
        let mut expanded = vec![0u8; src.len() * 4];
        argb1555_to_bgra(&src, width, &mut expanded, width * 4, width, height).unwrap();
        let mut packed = vec![0u16; src.len()];
        bgra_to_argb1555(&expanded, width * 4, &mut packed, width, width, height).unwrap();
        assert_eq!(src, packed);
    }

    #[test]
    fn test_argb4444_round_trip_whole_domain() {
        let width = 256u32;
        let height = 256u32;
        let src: Vec<u16> = (0..=u16::MAX).collect();
        let mut expanded = vec![0u8; src.len() * 4];
        argb4444_to_bgra(&src, width, &mut expanded, width * 4, width, height).unwrap();
        let mut packed = vec![0u16; src.len()];
        bgra_to_argb4444(&expanded, width * 4, &mut packed, width, width, height).unwrap();
        assert_eq!(src, packed);
    }

    #[test]
    fn test_expansion_saturates_full_fields() {
        let src = [0xffffu16];
        let mut dst = [0u8; 4];
        rgb565_to_bgra(&src, 1, &mut dst, 4, 1, 1).unwrap();
        assert_eq!(dst, [255, 255, 255, 255]);
        argb1555_to_bgra(&[0x7fffu16], 1, &mut dst, 4, 1, 1).unwrap();
        assert_eq!(dst, [255, 255, 255, 0]);
    }

    #[test]
    fn test_rgb16_dispatch_matches_scalar() {
        let _guard = CAPABILITY_TEST_GUARD.lock().unwrap();
        let width = 123u32;
        let height = 3u32;
        let src: Vec<u16> = (0..width as u16 * height as u16)
            .map(|v| v.wrapping_mul(2654435761u32 as u16))
            .collect();
        let mut dispatched = vec![0u8; src.len() * 4];
        rgb565_to_bgra(&src, width, &mut dispatched, width * 4, width, height).unwrap();

        set_capability_override(CPU_INITIALIZED);
        let mut scalar = vec![0u8; src.len() * 4];
        rgb565_to_bgra(&src, width, &mut scalar, width * 4, width, height).unwrap();
        set_capability_override(0);

        assert_eq!(dispatched, scalar);
    }
}
