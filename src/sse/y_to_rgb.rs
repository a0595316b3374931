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
use crate::pix_support::{LUMA_BIAS, Y_COEF};
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

#[inline(always)]
unsafe fn store_gray_bgra(dst: *mut u8, gray: __m128i) {
    let alpha = _mm_set1_epi32(0xff000000u32 as i32);
    let doubled = _mm_unpacklo_epi8(gray, gray);
    let lo = _mm_or_si128(_mm_unpacklo_epi16(doubled, doubled), alpha);
    let hi = _mm_or_si128(_mm_unpackhi_epi16(doubled, doubled), alpha);
    _mm_storeu_si128(dst as *mut __m128i, lo);
    _mm_storeu_si128(dst.add(16) as *mut __m128i, hi);
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn sse_y400_to_bgra_row(y_row: &[u8], dst: &mut [u8], width: usize) -> usize {
    let mut cx = 0usize;
    while cx + 8 <= width {
        let y = _mm_loadl_epi64(y_row.as_ptr().add(cx) as *const __m128i);
        store_gray_bgra(dst.as_mut_ptr().add(cx * 4), y);
        cx += 8;
    }
    cx
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn sse_y400_tv_to_bgra_row(y_row: &[u8], dst: &mut [u8], width: usize) -> usize {
    let zero = _mm_setzero_si128();
    let v_bias = _mm_set1_epi16(LUMA_BIAS as i16);
    let v_coef = _mm_set1_epi16(Y_COEF as i16);

    let mut cx = 0usize;
    while cx + 8 <= width {
        let y = _mm_loadl_epi64(y_row.as_ptr().add(cx) as *const __m128i);
        let y16 = _mm_unpacklo_epi8(y, zero);
        let scaled = _mm_srai_epi16(_mm_mullo_epi16(_mm_sub_epi16(y16, v_bias), v_coef), 6);
        let gray = _mm_packus_epi16(scaled, scaled);
        store_gray_bgra(dst.as_mut_ptr().add(cx * 4), gray);
        cx += 8;
    }
    cx
}
