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
use crate::pix_support::{
    PackedChannels, CB_WEIGHT_B, CB_WEIGHT_G, CB_WEIGHT_R, CR_WEIGHT_B, CR_WEIGHT_G, CR_WEIGHT_R,
    LUMA_BIAS, LUMA_WEIGHT_B, LUMA_WEIGHT_G, LUMA_WEIGHT_R,
};
use std::arch::aarch64::*;

#[inline(always)]
unsafe fn load_bgr_channels<const ORIGIN_CHANNELS: u8>(
    ptr: *const u8,
) -> (uint8x16_t, uint8x16_t, uint8x16_t) {
    let source_channels: PackedChannels = ORIGIN_CHANNELS.into();
    let px = vld4q_u8(ptr);
    let channel = [px.0, px.1, px.2, px.3];
    (
        channel[source_channels.get_b_channel_offset()],
        channel[source_channels.get_g_channel_offset()],
        channel[source_channels.get_r_channel_offset()],
    )
}

#[inline(always)]
unsafe fn luma_half(b: uint8x8_t, g: uint8x8_t, r: uint8x8_t) -> uint8x8_t {
    let mut acc = vmull_u8(b, vdup_n_u8(LUMA_WEIGHT_B as u8));
    acc = vmlal_u8(acc, g, vdup_n_u8(LUMA_WEIGHT_G as u8));
    acc = vmlal_u8(acc, r, vdup_n_u8(LUMA_WEIGHT_R as u8));
    vadd_u8(
        vmovn_u16(vshrq_n_u16::<7>(acc)),
        vdup_n_u8(LUMA_BIAS as u8),
    )
}

pub(crate) unsafe fn neon_rgbx_to_y_row<const ORIGIN_CHANNELS: u8>(
    rgba: &[u8],
    y_row: &mut [u8],
    width: usize,
) -> usize {
    let mut cx = 0usize;
    while cx + 16 <= width {
        let (b, g, r) = load_bgr_channels::<ORIGIN_CHANNELS>(rgba.as_ptr().add(cx * 4));
        let y_lo = luma_half(vget_low_u8(b), vget_low_u8(g), vget_low_u8(r));
        let y_hi = luma_half(vget_high_u8(b), vget_high_u8(g), vget_high_u8(r));
        vst1q_u8(y_row.as_mut_ptr().add(cx), vcombine_u8(y_lo, y_hi));
        cx += 16;
    }
    cx
}

#[inline(always)]
unsafe fn pairwise_round_avg(v: uint8x16_t) -> uint8x8_t {
    vmovn_u16(vrshrq_n_u16::<1>(vpaddlq_u8(v)))
}

#[inline(always)]
unsafe fn chroma_channel(mb: int16x8_t, mg: int16x8_t, mr: int16x8_t, wb: i16, wg: i16, wr: i16) -> uint8x8_t {
    let mut acc = vmulq_s16(mb, vdupq_n_s16(wb));
    acc = vmlaq_s16(acc, mg, vdupq_n_s16(wg));
    acc = vmlaq_s16(acc, mr, vdupq_n_s16(wr));
    let biased = vaddq_s16(vshrq_n_s16::<8>(acc), vdupq_n_s16(128));
    vqmovun_s16(biased)
}

/// Folds a 16x2 block into 8 chroma pairs, row average ahead of the
/// horizontal average.
pub(crate) unsafe fn neon_rgbx_to_uv_row<const ORIGIN_CHANNELS: u8>(
    row0: &[u8],
    row1: &[u8],
    u_row: &mut [u8],
    v_row: &mut [u8],
    width: usize,
) -> usize {
    let mut cx = 0usize;
    let mut uv_x = 0usize;
    while cx + 16 <= width {
        let (b0, g0, r0) = load_bgr_channels::<ORIGIN_CHANNELS>(row0.as_ptr().add(cx * 4));
        let (b1, g1, r1) = load_bgr_channels::<ORIGIN_CHANNELS>(row1.as_ptr().add(cx * 4));

        let b_cols = vrhaddq_u8(b0, b1);
        let g_cols = vrhaddq_u8(g0, g1);
        let r_cols = vrhaddq_u8(r0, r1);

        let mb = vreinterpretq_s16_u16(vmovl_u8(pairwise_round_avg(b_cols)));
        let mg = vreinterpretq_s16_u16(vmovl_u8(pairwise_round_avg(g_cols)));
        let mr = vreinterpretq_s16_u16(vmovl_u8(pairwise_round_avg(r_cols)));

        let cb = chroma_channel(
            mb,
            mg,
            mr,
            CB_WEIGHT_B as i16,
            CB_WEIGHT_G as i16,
            CB_WEIGHT_R as i16,
        );
        let cr = chroma_channel(
            mb,
            mg,
            mr,
            CR_WEIGHT_B as i16,
            CR_WEIGHT_G as i16,
            CR_WEIGHT_R as i16,
        );
        vst1_u8(u_row.as_mut_ptr().add(uv_x), cb);
        vst1_u8(v_row.as_mut_ptr().add(uv_x), cr);

        cx += 16;
        uv_x += 8;
    }
    cx
}
