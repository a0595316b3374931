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
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Keeps the even source pixels, 4 destination pixels per lap.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn sse_scale_down2_point_row(
    row0: &[u8],
    dst_row: &mut [u8],
    dst_width: usize,
) -> usize {
    let mut cx = 0usize;
    while cx + 4 <= dst_width {
        let a = _mm_loadu_si128(row0.as_ptr().add(cx * 8) as *const __m128i);
        let b = _mm_loadu_si128(row0.as_ptr().add(cx * 8 + 16) as *const __m128i);
        let even = _mm_castps_si128(_mm_shuffle_ps(
            _mm_castsi128_ps(a),
            _mm_castsi128_ps(b),
            0x88,
        ));
        _mm_storeu_si128(dst_row.as_mut_ptr().add(cx * 4) as *mut __m128i, even);
        cx += 4;
    }
    cx
}

#[inline(always)]
unsafe fn box_sum_pair(row0: __m128i, row1: __m128i) -> __m128i {
    let zero = _mm_setzero_si128();
    // Vertical sums of the 2x2 block columns, then the two pixels fold
    // together horizontally.
    let s_lo = _mm_add_epi16(
        _mm_unpacklo_epi8(row0, zero),
        _mm_unpacklo_epi8(row1, zero),
    );
    let s_hi = _mm_add_epi16(
        _mm_unpackhi_epi8(row0, zero),
        _mm_unpackhi_epi8(row1, zero),
    );
    let o0 = _mm_add_epi16(s_lo, _mm_srli_si128::<8>(s_lo));
    let o1 = _mm_add_epi16(s_hi, _mm_srli_si128::<8>(s_hi));
    _mm_unpacklo_epi64(o0, o1)
}

/// `(a + b + c + d + 2) >> 2` per channel over every 2x2 block, computed with
/// widening adds so the rounding matches the reference rule bit for bit.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn sse_scale_down2_box_row(
    row0: &[u8],
    row1: &[u8],
    dst_row: &mut [u8],
    dst_width: usize,
) -> usize {
    let rounding = _mm_set1_epi16(2);
    let mut cx = 0usize;
    while cx + 4 <= dst_width {
        let a0 = _mm_loadu_si128(row0.as_ptr().add(cx * 8) as *const __m128i);
        let a1 = _mm_loadu_si128(row0.as_ptr().add(cx * 8 + 16) as *const __m128i);
        let b0 = _mm_loadu_si128(row1.as_ptr().add(cx * 8) as *const __m128i);
        let b1 = _mm_loadu_si128(row1.as_ptr().add(cx * 8 + 16) as *const __m128i);

        let sum01 = box_sum_pair(a0, b0);
        let sum23 = box_sum_pair(a1, b1);
        let px01 = _mm_srli_epi16(_mm_add_epi16(sum01, rounding), 2);
        let px23 = _mm_srli_epi16(_mm_add_epi16(sum23, rounding), 2);
        let packed = _mm_packus_epi16(px01, px23);
        _mm_storeu_si128(dst_row.as_mut_ptr().add(cx * 4) as *mut __m128i, packed);
        cx += 4;
    }
    cx
}

/// Vertical bilinear blend of two source rows, 4 pixels per lap. The zero
/// and exact-half fractions skip the multiplies.
#[target_feature(enable = "sse2")]
pub(crate) unsafe fn sse_scale_filter_row(
    dst: &mut [u8],
    row0: &[u8],
    row1: &[u8],
    width: usize,
    yf: i32,
) -> usize {
    let mut cx = 0usize;
    if yf == 0 {
        while cx + 4 <= width {
            let v = _mm_loadu_si128(row0.as_ptr().add(cx * 4) as *const __m128i);
            _mm_storeu_si128(dst.as_mut_ptr().add(cx * 4) as *mut __m128i, v);
            cx += 4;
        }
    } else if yf == 128 {
        while cx + 4 <= width {
            let a = _mm_loadu_si128(row0.as_ptr().add(cx * 4) as *const __m128i);
            let b = _mm_loadu_si128(row1.as_ptr().add(cx * 4) as *const __m128i);
            _mm_storeu_si128(
                dst.as_mut_ptr().add(cx * 4) as *mut __m128i,
                _mm_avg_epu8(a, b),
            );
            cx += 4;
        }
    } else {
        let zero = _mm_setzero_si128();
        let f1 = _mm_set1_epi16(yf as i16);
        let f0 = _mm_set1_epi16((256 - yf) as i16);
        while cx + 4 <= width {
            let a = _mm_loadu_si128(row0.as_ptr().add(cx * 4) as *const __m128i);
            let b = _mm_loadu_si128(row1.as_ptr().add(cx * 4) as *const __m128i);
            let a_lo = _mm_unpacklo_epi8(a, zero);
            let a_hi = _mm_unpackhi_epi8(a, zero);
            let b_lo = _mm_unpacklo_epi8(b, zero);
            let b_hi = _mm_unpackhi_epi8(b, zero);
            let lo = _mm_srli_epi16(
                _mm_add_epi16(_mm_mullo_epi16(a_lo, f0), _mm_mullo_epi16(b_lo, f1)),
                8,
            );
            let hi = _mm_srli_epi16(
                _mm_add_epi16(_mm_mullo_epi16(a_hi, f0), _mm_mullo_epi16(b_hi, f1)),
                8,
            );
            _mm_storeu_si128(
                dst.as_mut_ptr().add(cx * 4) as *mut __m128i,
                _mm_packus_epi16(lo, hi),
            );
            cx += 4;
        }
    }
    cx
}
