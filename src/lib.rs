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
#![cfg_attr(docsrs, feature(doc_auto_cfg))]
mod cpu_features;
mod images;
#[cfg(target_arch = "aarch64")]
mod neon;
mod numerics;
mod pix_error;
mod pix_support;
mod rgb16;
mod rgb_to_yuv;
mod scale;
mod shuffle;
#[cfg(all(any(target_arch = "x86", target_arch = "x86_64"), feature = "sse"))]
mod sse;
mod y_to_rgb;
mod yuv_to_rgb;

pub use cpu_features::{
    query_capability, set_capability_override, CPU_HAS_BYTE_SHUFFLE, CPU_HAS_NEON,
    CPU_HAS_SIMD128, CPU_INITIALIZED,
};
pub use images::{BufferStoreMut, YuvGrayImage, YuvPlanarImage, YuvPlanarImageMut};
pub use pix_error::{MismatchedSize, PixError};
pub use pix_support::{ChromaSubsampling, PackedChannels};

pub use shuffle::argb_to_bgra;
pub use shuffle::bgr_to_bgra;
pub use shuffle::bgra_to_argb;
pub use shuffle::bgra_to_bgr;
pub use shuffle::bgra_to_rgb;
pub use shuffle::bgra_to_rgba;
pub use shuffle::rgb_to_bgra;
pub use shuffle::rgba_to_bgra;

pub use rgb16::argb1555_to_bgra;
pub use rgb16::argb4444_to_bgra;
pub use rgb16::bgra_to_argb1555;
pub use rgb16::bgra_to_argb4444;
pub use rgb16::bgra_to_rgb565;
pub use rgb16::rgb565_to_bgra;

pub use rgb_to_yuv::argb_to_yuv400;
pub use rgb_to_yuv::argb_to_yuv420;
pub use rgb_to_yuv::bgra_to_yuv400;
pub use rgb_to_yuv::bgra_to_yuv420;
pub use rgb_to_yuv::rgb_to_yuv420;
pub use rgb_to_yuv::rgba_to_yuv400;
pub use rgb_to_yuv::rgba_to_yuv420;

pub use yuv_to_rgb::yuv420_to_argb;
pub use yuv_to_rgb::yuv420_to_bgra;
pub use yuv_to_rgb::yuv420_to_rgba;
pub use yuv_to_rgb::yuv444_to_bgra;

pub use y_to_rgb::yuv400_to_bgra;
pub use y_to_rgb::yuv400_tv_to_bgra;

pub use scale::{scale_rgba8, ScaleFilter};
