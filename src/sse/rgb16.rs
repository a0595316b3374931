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
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

// Multipliers replicating 5 and 6 bit fields already moved into their 8 bit
// position, `field * (256 + 2^(8-n)) >> 8`.
const REPLICATE_5: i16 = 0x108;
const REPLICATE_6: i16 = 0x104;
const REPLICATE_4: i16 = 0x110;

#[inline(always)]
unsafe fn store_weaved_bgra(dst: *mut u8, bg: __m128i, ra: __m128i) {
    let lo = _mm_unpacklo_epi16(bg, ra);
    let hi = _mm_unpackhi_epi16(bg, ra);
    _mm_storeu_si128(dst as *mut __m128i, lo);
    _mm_storeu_si128(dst.add(16) as *mut __m128i, hi);
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn sse_rgb565_to_bgra_row(src: &[u16], dst: &mut [u8], width: usize) -> usize {
    let mul5 = _mm_set1_epi16(REPLICATE_5);
    let mul6 = _mm_set1_epi16(REPLICATE_6);
    let mask5 = _mm_set1_epi16(0x1f);
    let mask6 = _mm_set1_epi16(0x3f);
    let alpha = _mm_set1_epi16(0xff00u16 as i16);

    let mut cx = 0usize;
    while cx + 8 <= width {
        let v = _mm_loadu_si128(src.as_ptr().add(cx) as *const __m128i);
        let b = _mm_slli_epi16(_mm_and_si128(v, mask5), 3);
        let g = _mm_slli_epi16(_mm_and_si128(_mm_srli_epi16(v, 5), mask6), 2);
        let r = _mm_slli_epi16(_mm_srli_epi16(v, 11), 3);
        let b8 = _mm_srli_epi16(_mm_mullo_epi16(b, mul5), 8);
        let g8 = _mm_srli_epi16(_mm_mullo_epi16(g, mul6), 8);
        let r8 = _mm_srli_epi16(_mm_mullo_epi16(r, mul5), 8);
        let bg = _mm_or_si128(b8, _mm_slli_epi16(g8, 8));
        let ra = _mm_or_si128(r8, alpha);
        store_weaved_bgra(dst.as_mut_ptr().add(cx * 4), bg, ra);
        cx += 8;
    }
    cx
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn sse_argb1555_to_bgra_row(src: &[u16], dst: &mut [u8], width: usize) -> usize {
    let mul5 = _mm_set1_epi16(REPLICATE_5);
    let mask5 = _mm_set1_epi16(0x1f);
    let alpha_mask = _mm_set1_epi16(0xff00u16 as i16);

    let mut cx = 0usize;
    while cx + 8 <= width {
        let v = _mm_loadu_si128(src.as_ptr().add(cx) as *const __m128i);
        let b = _mm_slli_epi16(_mm_and_si128(v, mask5), 3);
        let g = _mm_slli_epi16(_mm_and_si128(_mm_srli_epi16(v, 5), mask5), 3);
        let r = _mm_slli_epi16(_mm_and_si128(_mm_srli_epi16(v, 10), mask5), 3);
        let b8 = _mm_srli_epi16(_mm_mullo_epi16(b, mul5), 8);
        let g8 = _mm_srli_epi16(_mm_mullo_epi16(g, mul5), 8);
        let r8 = _mm_srli_epi16(_mm_mullo_epi16(r, mul5), 8);
        // The sign bit smears across the lane, masked into the alpha byte.
        let a8 = _mm_and_si128(_mm_srai_epi16(v, 15), alpha_mask);
        let bg = _mm_or_si128(b8, _mm_slli_epi16(g8, 8));
        let ra = _mm_or_si128(r8, a8);
        store_weaved_bgra(dst.as_mut_ptr().add(cx * 4), bg, ra);
        cx += 8;
    }
    cx
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn sse_argb4444_to_bgra_row(src: &[u16], dst: &mut [u8], width: usize) -> usize {
    let mul4 = _mm_set1_epi16(REPLICATE_4);
    let mask4 = _mm_set1_epi16(0xf);

    let mut cx = 0usize;
    while cx + 8 <= width {
        let v = _mm_loadu_si128(src.as_ptr().add(cx) as *const __m128i);
        let b = _mm_slli_epi16(_mm_and_si128(v, mask4), 4);
        let g = _mm_slli_epi16(_mm_and_si128(_mm_srli_epi16(v, 4), mask4), 4);
        let r = _mm_slli_epi16(_mm_and_si128(_mm_srli_epi16(v, 8), mask4), 4);
        let a = _mm_slli_epi16(_mm_and_si128(_mm_srli_epi16(v, 12), mask4), 4);
        let b8 = _mm_srli_epi16(_mm_mullo_epi16(b, mul4), 8);
        let g8 = _mm_srli_epi16(_mm_mullo_epi16(g, mul4), 8);
        let r8 = _mm_srli_epi16(_mm_mullo_epi16(r, mul4), 8);
        let a8 = _mm_srli_epi16(_mm_mullo_epi16(a, mul4), 8);
        let bg = _mm_or_si128(b8, _mm_slli_epi16(g8, 8));
        let ra = _mm_or_si128(r8, _mm_slli_epi16(a8, 8));
        store_weaved_bgra(dst.as_mut_ptr().add(cx * 4), bg, ra);
        cx += 8;
    }
    cx
}

#[target_feature(enable = "sse2")]
pub(crate) unsafe fn sse_bgra_to_rgb565_row(src: &[u8], dst: &mut [u16], width: usize) -> usize {
    let mask_b = _mm_set1_epi32(0x1f);
    let mask_g = _mm_set1_epi32(0x7e0);
    let mask_r = _mm_set1_epi32(0xf800);

    let mut cx = 0usize;
    while cx + 4 <= width {
        let px = _mm_loadu_si128(src.as_ptr().add(cx * 4) as *const __m128i);
        let b = _mm_and_si128(_mm_srli_epi32(px, 3), mask_b);
        let g = _mm_and_si128(_mm_srli_epi32(px, 5), mask_g);
        let r = _mm_and_si128(_mm_srli_epi32(px, 8), mask_r);
        let v = _mm_or_si128(_mm_or_si128(b, g), r);
        // Sign extend so the dword pack cannot saturate.
        let v = _mm_srai_epi32(_mm_slli_epi32(v, 16), 16);
        let packed = _mm_packs_epi32(v, v);
        _mm_storel_epi64(dst.as_mut_ptr().add(cx) as *mut __m128i, packed);
        cx += 4;
    }
    cx
}
