/*
 * Copyright (c) Radzivon Bartoshyk, 1/2025. All rights reserved.
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
use crate::pix_support::ChromaSubsampling;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Copy, Clone, Ord, PartialOrd, Eq, PartialEq)]
pub struct MismatchedSize {
    pub expected: usize,
    pub received: usize,
}

#[derive(Debug)]
pub enum PixError {
    DestinationSizeMismatch(MismatchedSize),
    MinimumDestinationSizeMismatch(MismatchedSize),
    PointerOverflow,
    ZeroBaseSize,
    LumaPlaneSizeMismatch(MismatchedSize),
    LumaPlaneMinimumSizeMismatch(MismatchedSize),
    InvalidScaleTarget,
}

impl Display for PixError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            PixError::LumaPlaneSizeMismatch(size) => f.write_fmt(format_args!(
                "Luma plane have invalid size, it must be {}, but it was {}",
                size.expected, size.received
            )),
            PixError::LumaPlaneMinimumSizeMismatch(size) => f.write_fmt(format_args!(
                "Luma plane have invalid size, it must be at least {}, but it was {}",
                size.expected, size.received
            )),
            PixError::PointerOverflow => f.write_str("Image size overflow pointer capabilities"),
            PixError::ZeroBaseSize => f.write_str("Zero sized images is not supported"),
            PixError::DestinationSizeMismatch(size) => f.write_fmt(format_args!(
                "Destination size mismatch: expected={}, received={}",
                size.expected, size.received
            )),
            PixError::MinimumDestinationSizeMismatch(size) => f.write_fmt(format_args!(
                "Destination must have size at least {} but it is {}",
                size.expected, size.received
            )),
            PixError::InvalidScaleTarget => {
                f.write_str("Scale target dimensions must not be zero")
            }
        }
    }
}

impl Error for PixError {}

#[inline]
pub(crate) fn check_overflow_v2(v0: usize, v1: usize) -> Result<(), PixError> {
    let (_, overflow) = v0.overflowing_mul(v1);
    if overflow {
        return Err(PixError::PointerOverflow);
    }
    Ok(())
}

#[inline]
pub(crate) fn check_overflow_v3(v0: usize, v1: usize, v2: usize) -> Result<(), PixError> {
    let (product0, overflow) = v0.overflowing_mul(v1);
    if overflow {
        return Err(PixError::PointerOverflow);
    }
    let (_, overflow) = product0.overflowing_mul(v2);
    if overflow {
        return Err(PixError::PointerOverflow);
    }
    Ok(())
}

#[inline]
pub(crate) fn check_packed_destination<V>(
    arr: &[V],
    stride: u32,
    width: u32,
    height: u32,
    channels: usize,
) -> Result<(), PixError> {
    if width == 0 || height == 0 {
        return Err(PixError::ZeroBaseSize);
    }
    check_overflow_v3(width as usize, height as usize, channels)?;
    check_overflow_v2(stride as usize, height as usize)?;
    if arr.len() != stride as usize * height as usize {
        return Err(PixError::DestinationSizeMismatch(MismatchedSize {
            expected: stride as usize * height as usize,
            received: arr.len(),
        }));
    }
    if (stride as usize) < (width as usize * channels) {
        return Err(PixError::MinimumDestinationSizeMismatch(MismatchedSize {
            expected: width as usize * channels,
            received: stride as usize,
        }));
    }
    Ok(())
}

#[inline]
pub(crate) fn check_y8_channel<V>(
    data: &[V],
    stride: u32,
    width: u32,
    height: u32,
) -> Result<(), PixError> {
    if width == 0 || height == 0 {
        return Err(PixError::ZeroBaseSize);
    }
    check_overflow_v2(stride as usize, height as usize)?;
    check_overflow_v2(width as usize, height as usize)?;
    if (stride as usize) < (width as usize) {
        return Err(PixError::LumaPlaneMinimumSizeMismatch(MismatchedSize {
            expected: width as usize,
            received: stride as usize,
        }));
    }
    if stride as usize * height as usize != data.len() {
        return Err(PixError::LumaPlaneSizeMismatch(MismatchedSize {
            expected: stride as usize * height as usize,
            received: data.len(),
        }));
    }
    Ok(())
}

#[inline]
pub(crate) fn check_chroma_channel(
    data: &[u8],
    stride: u32,
    image_width: u32,
    image_height: u32,
    sampling: ChromaSubsampling,
) -> Result<(), PixError> {
    let chroma_min_width = match sampling {
        ChromaSubsampling::Yuv420 => image_width.div_ceil(2),
        ChromaSubsampling::Yuv444 => image_width,
    };
    let chroma_height = match sampling {
        ChromaSubsampling::Yuv420 => image_height.div_ceil(2),
        ChromaSubsampling::Yuv444 => image_height,
    };
    check_overflow_v2(stride as usize, chroma_height as usize)?;
    if (stride as usize) < (chroma_min_width as usize) {
        return Err(PixError::LumaPlaneMinimumSizeMismatch(MismatchedSize {
            expected: chroma_min_width as usize,
            received: stride as usize,
        }));
    }
    if stride as usize * chroma_height as usize != data.len() {
        return Err(PixError::LumaPlaneSizeMismatch(MismatchedSize {
            expected: stride as usize * chroma_height as usize,
            received: data.len(),
        }));
    }
    Ok(())
}
