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
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[inline(always)]
fn weight_table<const ORIGIN_CHANNELS: u8>(b: i32, g: i32, r: i32) -> [i8; 16] {
    let source_channels: PackedChannels = ORIGIN_CHANNELS.into();
    let mut table = [0i8; 16];
    for i in 0..4 {
        table[i * 4 + source_channels.get_b_channel_offset()] = b as i8;
        table[i * 4 + source_channels.get_g_channel_offset()] = g as i8;
        table[i * 4 + source_channels.get_r_channel_offset()] = r as i8;
    }
    table
}

/// 16 pixels of any 4 channel layout fold into 16 luma samples through a
/// byte multiply-add against the layout-ordered weight table.
#[target_feature(enable = "ssse3")]
pub(crate) unsafe fn sse_rgbx_to_y_row<const ORIGIN_CHANNELS: u8>(
    rgba: &[u8],
    y_row: &mut [u8],
    width: usize,
) -> usize {
    let table = weight_table::<ORIGIN_CHANNELS>(LUMA_WEIGHT_B, LUMA_WEIGHT_G, LUMA_WEIGHT_R);
    let v_weights = _mm_loadu_si128(table.as_ptr() as *const __m128i);
    let v_bias = _mm_set1_epi8(LUMA_BIAS as i8);

    let mut cx = 0usize;
    while cx + 16 <= width {
        let base = rgba.as_ptr().add(cx * 4);
        let p0 = _mm_loadu_si128(base as *const __m128i);
        let p1 = _mm_loadu_si128(base.add(16) as *const __m128i);
        let p2 = _mm_loadu_si128(base.add(32) as *const __m128i);
        let p3 = _mm_loadu_si128(base.add(48) as *const __m128i);

        let s0 = _mm_maddubs_epi16(p0, v_weights);
        let s1 = _mm_maddubs_epi16(p1, v_weights);
        let s2 = _mm_maddubs_epi16(p2, v_weights);
        let s3 = _mm_maddubs_epi16(p3, v_weights);

        let y01 = _mm_srli_epi16(_mm_hadd_epi16(s0, s1), 7);
        let y23 = _mm_srli_epi16(_mm_hadd_epi16(s2, s3), 7);
        let y = _mm_add_epi8(_mm_packus_epi16(y01, y23), v_bias);
        _mm_storeu_si128(y_row.as_mut_ptr().add(cx) as *mut __m128i, y);
        cx += 16;
    }
    cx
}

/// Subsamples a 16x2 block of pixels to 8 chroma pairs. Rows average first,
/// then the horizontal neighbours, then the averaged pixels run through the
/// two chroma weight tables.
#[target_feature(enable = "ssse3")]
pub(crate) unsafe fn sse_rgbx_to_uv_row<const ORIGIN_CHANNELS: u8>(
    row0: &[u8],
    row1: &[u8],
    u_row: &mut [u8],
    v_row: &mut [u8],
    width: usize,
) -> usize {
    let u_table = weight_table::<ORIGIN_CHANNELS>(CB_WEIGHT_B, CB_WEIGHT_G, CB_WEIGHT_R);
    let v_table = weight_table::<ORIGIN_CHANNELS>(CR_WEIGHT_B, CR_WEIGHT_G, CR_WEIGHT_R);
    let v_u_weights = _mm_loadu_si128(u_table.as_ptr() as *const __m128i);
    let v_v_weights = _mm_loadu_si128(v_table.as_ptr() as *const __m128i);
    let v_bias = _mm_set1_epi8(0x80u8 as i8);

    let mut cx = 0usize;
    let mut uv_x = 0usize;
    while cx + 16 <= width {
        let base0 = row0.as_ptr().add(cx * 4);
        let base1 = row1.as_ptr().add(cx * 4);
        let a0 = _mm_avg_epu8(
            _mm_loadu_si128(base0 as *const __m128i),
            _mm_loadu_si128(base1 as *const __m128i),
        );
        let a1 = _mm_avg_epu8(
            _mm_loadu_si128(base0.add(16) as *const __m128i),
            _mm_loadu_si128(base1.add(16) as *const __m128i),
        );
        let a2 = _mm_avg_epu8(
            _mm_loadu_si128(base0.add(32) as *const __m128i),
            _mm_loadu_si128(base1.add(32) as *const __m128i),
        );
        let a3 = _mm_avg_epu8(
            _mm_loadu_si128(base0.add(48) as *const __m128i),
            _mm_loadu_si128(base1.add(48) as *const __m128i),
        );

        let even0 = _mm_castps_si128(_mm_shuffle_ps(
            _mm_castsi128_ps(a0),
            _mm_castsi128_ps(a1),
            0x88,
        ));
        let odd0 = _mm_castps_si128(_mm_shuffle_ps(
            _mm_castsi128_ps(a0),
            _mm_castsi128_ps(a1),
            0xdd,
        ));
        let even1 = _mm_castps_si128(_mm_shuffle_ps(
            _mm_castsi128_ps(a2),
            _mm_castsi128_ps(a3),
            0x88,
        ));
        let odd1 = _mm_castps_si128(_mm_shuffle_ps(
            _mm_castsi128_ps(a2),
            _mm_castsi128_ps(a3),
            0xdd,
        ));
        let m0 = _mm_avg_epu8(even0, odd0);
        let m1 = _mm_avg_epu8(even1, odd1);

        let u_words = _mm_srai_epi16(
            _mm_hadd_epi16(
                _mm_maddubs_epi16(m0, v_u_weights),
                _mm_maddubs_epi16(m1, v_u_weights),
            ),
            8,
        );
        let v_words = _mm_srai_epi16(
            _mm_hadd_epi16(
                _mm_maddubs_epi16(m0, v_v_weights),
                _mm_maddubs_epi16(m1, v_v_weights),
            ),
            8,
        );
        let uv = _mm_add_epi8(_mm_packs_epi16(u_words, v_words), v_bias);

        _mm_storel_epi64(u_row.as_mut_ptr().add(uv_x) as *mut __m128i, uv);
        _mm_storel_epi64(
            v_row.as_mut_ptr().add(uv_x) as *mut __m128i,
            _mm_srli_si128::<8>(uv),
        );
        cx += 16;
        uv_x += 8;
    }
    cx
}
