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
    ChromaSubsampling, PackedChannels, CHROMA_BIAS, LUMA_BIAS, U_COEF_B, U_COEF_G, V_COEF_G,
    V_COEF_R, Y_COEF,
};
use std::arch::aarch64::*;

#[inline(always)]
unsafe fn store_px<const DESTINATION_CHANNELS: u8>(
    dst: *mut u8,
    b: uint8x8_t,
    g: uint8x8_t,
    r: uint8x8_t,
) {
    let dst_chans: PackedChannels = DESTINATION_CHANNELS.into();
    let mut lanes = [vdup_n_u8(255); 4];
    lanes[dst_chans.get_b_channel_offset()] = b;
    lanes[dst_chans.get_g_channel_offset()] = g;
    lanes[dst_chans.get_r_channel_offset()] = r;
    vst4_u8(dst, uint8x8x4_t(lanes[0], lanes[1], lanes[2], lanes[3]));
}

pub(crate) unsafe fn neon_yuv_to_rgbx_row<const DESTINATION_CHANNELS: u8, const SAMPLING: u8>(
    y_row: &[u8],
    u_row: &[u8],
    v_row: &[u8],
    rgba_row: &mut [u8],
    width: usize,
) -> usize {
    let chroma_subsampling: ChromaSubsampling = SAMPLING.into();
    let v_luma_bias = vdupq_n_s16(LUMA_BIAS as i16);
    let v_chroma_bias = vdupq_n_s16(CHROMA_BIAS as i16);
    let v_y_coef = vdupq_n_s16(Y_COEF as i16);

    let mut cx = 0usize;
    let mut uv_x = 0usize;
    while cx + 8 <= width {
        let y16 = vreinterpretq_s16_u16(vmovl_u8(vld1_u8(y_row.as_ptr().add(cx))));
        let c = vmulq_s16(vsubq_s16(y16, v_luma_bias), v_y_coef);

        let (u8v, v8v) = match chroma_subsampling {
            ChromaSubsampling::Yuv420 => {
                let u_half = vcreate_u8(std::ptr::read_unaligned(
                    u_row.as_ptr().add(uv_x) as *const u32
                ) as u64);
                let v_half = vcreate_u8(std::ptr::read_unaligned(
                    v_row.as_ptr().add(uv_x) as *const u32
                ) as u64);
                (vzip1_u8(u_half, u_half), vzip1_u8(v_half, v_half))
            }
            ChromaSubsampling::Yuv444 => (
                vld1_u8(u_row.as_ptr().add(uv_x)),
                vld1_u8(v_row.as_ptr().add(uv_x)),
            ),
        };
        let cb = vsubq_s16(vreinterpretq_s16_u16(vmovl_u8(u8v)), v_chroma_bias);
        let cr = vsubq_s16(vreinterpretq_s16_u16(vmovl_u8(v8v)), v_chroma_bias);

        let b16 = vshrq_n_s16::<6>(vqaddq_s16(
            c,
            vmulq_s16(cb, vdupq_n_s16(U_COEF_B as i16)),
        ));
        let g16 = vshrq_n_s16::<6>(vqaddq_s16(
            c,
            vqaddq_s16(
                vmulq_s16(cb, vdupq_n_s16(U_COEF_G as i16)),
                vmulq_s16(cr, vdupq_n_s16(V_COEF_G as i16)),
            ),
        ));
        let r16 = vshrq_n_s16::<6>(vqaddq_s16(
            c,
            vmulq_s16(cr, vdupq_n_s16(V_COEF_R as i16)),
        ));

        store_px::<DESTINATION_CHANNELS>(
            rgba_row.as_mut_ptr().add(cx * 4),
            vqmovun_s16(b16),
            vqmovun_s16(g16),
            vqmovun_s16(r16),
        );

        cx += 8;
        uv_x += match chroma_subsampling {
            ChromaSubsampling::Yuv420 => 4,
            ChromaSubsampling::Yuv444 => 8,
        };
    }
    cx
}

pub(crate) unsafe fn neon_y400_to_bgra_row(y_row: &[u8], dst: &mut [u8], width: usize) -> usize {
    let mut cx = 0usize;
    while cx + 8 <= width {
        let y = vld1_u8(y_row.as_ptr().add(cx));
        vst4_u8(
            dst.as_mut_ptr().add(cx * 4),
            uint8x8x4_t(y, y, y, vdup_n_u8(255)),
        );
        cx += 8;
    }
    cx
}

pub(crate) unsafe fn neon_y400_tv_to_bgra_row(y_row: &[u8], dst: &mut [u8], width: usize) -> usize {
    let v_luma_bias = vdupq_n_s16(LUMA_BIAS as i16);
    let v_y_coef = vdupq_n_s16(Y_COEF as i16);
    let mut cx = 0usize;
    while cx + 8 <= width {
        let y16 = vreinterpretq_s16_u16(vmovl_u8(vld1_u8(y_row.as_ptr().add(cx))));
        let scaled = vshrq_n_s16::<6>(vmulq_s16(vsubq_s16(y16, v_luma_bias), v_y_coef));
        let gray = vqmovun_s16(scaled);
        vst4_u8(
            dst.as_mut_ptr().add(cx * 4),
            uint8x8x4_t(gray, gray, gray, vdup_n_u8(255)),
        );
        cx += 8;
    }
    cx
}
