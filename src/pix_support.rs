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

/// Declares a packed pixel layout by its memory byte order.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum PackedChannels {
    Rgb = 0,
    Rgba = 1,
    Bgra = 2,
    Bgr = 3,
    Argb = 4,
}

impl From<u8> for PackedChannels {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => PackedChannels::Rgb,
            1 => PackedChannels::Rgba,
            2 => PackedChannels::Bgra,
            3 => PackedChannels::Bgr,
            4 => PackedChannels::Argb,
            _ => {
                panic!("Unknown value")
            }
        }
    }
}

impl PackedChannels {
    #[inline(always)]
    pub const fn get_channels_count(&self) -> usize {
        match self {
            PackedChannels::Rgb | PackedChannels::Bgr => 3,
            PackedChannels::Rgba | PackedChannels::Bgra | PackedChannels::Argb => 4,
        }
    }

    #[inline(always)]
    pub const fn has_alpha(&self) -> bool {
        match self {
            PackedChannels::Rgb | PackedChannels::Bgr => false,
            PackedChannels::Rgba | PackedChannels::Bgra | PackedChannels::Argb => true,
        }
    }

    #[inline(always)]
    pub const fn get_r_channel_offset(&self) -> usize {
        match self {
            PackedChannels::Rgb | PackedChannels::Rgba => 0,
            PackedChannels::Bgra | PackedChannels::Bgr => 2,
            PackedChannels::Argb => 1,
        }
    }

    #[inline(always)]
    pub const fn get_g_channel_offset(&self) -> usize {
        match self {
            PackedChannels::Rgb | PackedChannels::Rgba | PackedChannels::Bgra | PackedChannels::Bgr => 1,
            PackedChannels::Argb => 2,
        }
    }

    #[inline(always)]
    pub const fn get_b_channel_offset(&self) -> usize {
        match self {
            PackedChannels::Rgb | PackedChannels::Rgba => 2,
            PackedChannels::Bgra | PackedChannels::Bgr => 0,
            PackedChannels::Argb => 3,
        }
    }

    #[inline(always)]
    pub const fn get_a_channel_offset(&self) -> usize {
        match self {
            PackedChannels::Rgba | PackedChannels::Bgra => 3,
            PackedChannels::Argb => 0,
            PackedChannels::Rgb | PackedChannels::Bgr => 0,
        }
    }
}

/// Declares chroma plane density against the luma plane.
#[repr(u8)]
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum ChromaSubsampling {
    /// One chroma pair per 2x2 luma block.
    Yuv420 = 0,
    /// Chroma planes match the luma plane.
    Yuv444 = 1,
}

impl From<u8> for ChromaSubsampling {
    #[inline(always)]
    fn from(value: u8) -> Self {
        match value {
            0 => ChromaSubsampling::Yuv420,
            1 => ChromaSubsampling::Yuv444,
            _ => {
                panic!("Unknown value")
            }
        }
    }
}

// Forward transform, weights against B,G,R in this order.
pub(crate) const LUMA_WEIGHT_B: i32 = 13;
pub(crate) const LUMA_WEIGHT_G: i32 = 65;
pub(crate) const LUMA_WEIGHT_R: i32 = 33;
pub(crate) const LUMA_BIAS: i32 = 16;

pub(crate) const CB_WEIGHT_B: i32 = 112;
pub(crate) const CB_WEIGHT_G: i32 = -74;
pub(crate) const CB_WEIGHT_R: i32 = -38;
pub(crate) const CR_WEIGHT_B: i32 = -18;
pub(crate) const CR_WEIGHT_G: i32 = -94;
pub(crate) const CR_WEIGHT_R: i32 = 112;
pub(crate) const CHROMA_BIAS: i32 = 128;

// Inverse transform in 6 fractional bits.
pub(crate) const Y_COEF: i32 = 74;
pub(crate) const U_COEF_B: i32 = 127;
pub(crate) const U_COEF_G: i32 = -25;
pub(crate) const V_COEF_G: i32 = -52;
pub(crate) const V_COEF_R: i32 = 102;
