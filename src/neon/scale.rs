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
use std::arch::aarch64::*;

pub(crate) unsafe fn neon_scale_down2_point_row(
    row0: &[u8],
    dst_row: &mut [u8],
    dst_width: usize,
) -> usize {
    let mut cx = 0usize;
    while cx + 4 <= dst_width {
        let a = vreinterpretq_u32_u8(vld1q_u8(row0.as_ptr().add(cx * 8)));
        let b = vreinterpretq_u32_u8(vld1q_u8(row0.as_ptr().add(cx * 8 + 16)));
        let even = vuzp1q_u32(a, b);
        vst1q_u8(
            dst_row.as_mut_ptr().add(cx * 4),
            vreinterpretq_u8_u32(even),
        );
        cx += 4;
    }
    cx
}

#[inline(always)]
unsafe fn box_sum_pair(row0: uint8x16_t, row1: uint8x16_t) -> uint16x8_t {
    let s_lo = vaddl_u8(vget_low_u8(row0), vget_low_u8(row1));
    let s_hi = vaddl_u8(vget_high_u8(row0), vget_high_u8(row1));
    let o0 = vadd_u16(vget_low_u16(s_lo), vget_high_u16(s_lo));
    let o1 = vadd_u16(vget_low_u16(s_hi), vget_high_u16(s_hi));
    vcombine_u16(o0, o1)
}

pub(crate) unsafe fn neon_scale_down2_box_row(
    row0: &[u8],
    row1: &[u8],
    dst_row: &mut [u8],
    dst_width: usize,
) -> usize {
    let mut cx = 0usize;
    while cx + 4 <= dst_width {
        let a0 = vld1q_u8(row0.as_ptr().add(cx * 8));
        let a1 = vld1q_u8(row0.as_ptr().add(cx * 8 + 16));
        let b0 = vld1q_u8(row1.as_ptr().add(cx * 8));
        let b1 = vld1q_u8(row1.as_ptr().add(cx * 8 + 16));

        // The rounding narrow shift bakes in the +2 bias.
        let px01 = vrshrq_n_u16::<2>(box_sum_pair(a0, b0));
        let px23 = vrshrq_n_u16::<2>(box_sum_pair(a1, b1));
        vst1q_u8(
            dst_row.as_mut_ptr().add(cx * 4),
            vcombine_u8(vmovn_u16(px01), vmovn_u16(px23)),
        );
        cx += 4;
    }
    cx
}

pub(crate) unsafe fn neon_scale_filter_row(
    dst: &mut [u8],
    row0: &[u8],
    row1: &[u8],
    width: usize,
    yf: i32,
) -> usize {
    let mut cx = 0usize;
    if yf == 0 {
        while cx + 4 <= width {
            vst1q_u8(
                dst.as_mut_ptr().add(cx * 4),
                vld1q_u8(row0.as_ptr().add(cx * 4)),
            );
            cx += 4;
        }
    } else if yf == 128 {
        while cx + 4 <= width {
            let a = vld1q_u8(row0.as_ptr().add(cx * 4));
            let b = vld1q_u8(row1.as_ptr().add(cx * 4));
            vst1q_u8(dst.as_mut_ptr().add(cx * 4), vrhaddq_u8(a, b));
            cx += 4;
        }
    } else {
        let f1 = vdup_n_u8(yf as u8);
        let f0 = vdup_n_u8((256 - yf) as u8);
        while cx + 4 <= width {
            let a = vld1q_u8(row0.as_ptr().add(cx * 4));
            let b = vld1q_u8(row1.as_ptr().add(cx * 4));
            let lo = vmlal_u8(vmull_u8(vget_low_u8(a), f0), vget_low_u8(b), f1);
            let hi = vmlal_u8(vmull_u8(vget_high_u8(a), f0), vget_high_u8(b), f1);
            vst1q_u8(
                dst.as_mut_ptr().add(cx * 4),
                vcombine_u8(vshrn_n_u16::<8>(lo), vshrn_n_u16::<8>(hi)),
            );
            cx += 4;
        }
    }
    cx
}
