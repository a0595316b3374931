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
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Decodes 8 luma samples with their chroma pair into one of the 4 channel
/// packed layouts. The luma term saturates in 16 bits exactly where the
/// scalar rule clamps, so both land on the same bytes.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn sse_yuv_to_rgbx_row<const DESTINATION_CHANNELS: u8, const SAMPLING: u8>(
    y_row: &[u8],
    u_row: &[u8],
    v_row: &[u8],
    rgba_row: &mut [u8],
    width: usize,
) -> usize {
    let dst_chans: PackedChannels = DESTINATION_CHANNELS.into();
    let chroma_subsampling: ChromaSubsampling = SAMPLING.into();
    debug_assert_eq!(dst_chans.get_channels_count(), 4);

    let zero = _mm_setzero_si128();
    let v_luma_bias = _mm_set1_epi16(LUMA_BIAS as i16);
    let v_chroma_bias = _mm_set1_epi16(CHROMA_BIAS as i16);
    let v_y_coef = _mm_set1_epi16(Y_COEF as i16);
    let v_ub = _mm_set1_epi16(U_COEF_B as i16);
    let v_ug = _mm_set1_epi16(U_COEF_G as i16);
    let v_vg = _mm_set1_epi16(V_COEF_G as i16);
    let v_vr = _mm_set1_epi16(V_COEF_R as i16);
    let v_alpha = _mm_set1_epi8(-1);

    let mut cx = 0usize;
    let mut uv_x = 0usize;
    while cx + 8 <= width {
        let y8 = _mm_loadl_epi64(y_row.as_ptr().add(cx) as *const __m128i);
        let y16 = _mm_unpacklo_epi8(y8, zero);
        let c = _mm_mullo_epi16(_mm_sub_epi16(y16, v_luma_bias), v_y_coef);

        let (u16w, v16w) = match chroma_subsampling {
            ChromaSubsampling::Yuv420 => {
                let u32v = _mm_cvtsi32_si128(std::ptr::read_unaligned(
                    u_row.as_ptr().add(uv_x) as *const i32
                ));
                let v32v = _mm_cvtsi32_si128(std::ptr::read_unaligned(
                    v_row.as_ptr().add(uv_x) as *const i32
                ));
                // Each chroma byte doubles up to feed both luma columns.
                let u_dup = _mm_unpacklo_epi8(u32v, u32v);
                let v_dup = _mm_unpacklo_epi8(v32v, v32v);
                (
                    _mm_unpacklo_epi8(u_dup, zero),
                    _mm_unpacklo_epi8(v_dup, zero),
                )
            }
            ChromaSubsampling::Yuv444 => {
                let u8v = _mm_loadl_epi64(u_row.as_ptr().add(uv_x) as *const __m128i);
                let v8v = _mm_loadl_epi64(v_row.as_ptr().add(uv_x) as *const __m128i);
                (_mm_unpacklo_epi8(u8v, zero), _mm_unpacklo_epi8(v8v, zero))
            }
        };
        let cb = _mm_sub_epi16(u16w, v_chroma_bias);
        let cr = _mm_sub_epi16(v16w, v_chroma_bias);

        let b16 = _mm_srai_epi16(_mm_adds_epi16(c, _mm_mullo_epi16(cb, v_ub)), 6);
        let g16 = _mm_srai_epi16(
            _mm_adds_epi16(
                c,
                _mm_adds_epi16(_mm_mullo_epi16(cb, v_ug), _mm_mullo_epi16(cr, v_vg)),
            ),
            6,
        );
        let r16 = _mm_srai_epi16(_mm_adds_epi16(c, _mm_mullo_epi16(cr, v_vr)), 6);

        let b8 = _mm_packus_epi16(b16, b16);
        let g8 = _mm_packus_epi16(g16, g16);
        let r8 = _mm_packus_epi16(r16, r16);

        let mut lanes = [zero; 4];
        lanes[dst_chans.get_b_channel_offset()] = b8;
        lanes[dst_chans.get_g_channel_offset()] = g8;
        lanes[dst_chans.get_r_channel_offset()] = r8;
        lanes[dst_chans.get_a_channel_offset()] = v_alpha;

        let pair01 = _mm_unpacklo_epi8(lanes[0], lanes[1]);
        let pair23 = _mm_unpacklo_epi8(lanes[2], lanes[3]);
        let px_lo = _mm_unpacklo_epi16(pair01, pair23);
        let px_hi = _mm_unpackhi_epi16(pair01, pair23);
        _mm_storeu_si128(rgba_row.as_mut_ptr().add(cx * 4) as *mut __m128i, px_lo);
        _mm_storeu_si128(rgba_row.as_mut_ptr().add(cx * 4 + 16) as *mut __m128i, px_hi);

        cx += 8;
        uv_x += match chroma_subsampling {
            ChromaSubsampling::Yuv420 => 4,
            ChromaSubsampling::Yuv444 => 8,
        };
    }
    cx
}
