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
use crate::pix_support::PackedChannels;
#[cfg(target_arch = "x86")]
use std::arch::x86::*;
#[cfg(target_arch = "x86_64")]
use std::arch::x86_64::*;

/// Permutes 4 pixels per lane with a byte shuffle. Handles 4 and 3 channel
/// sources expanding into a 4 channel destination, the remainder is left to
/// the scalar tail.
#[target_feature(enable = "ssse3")]
pub(crate) unsafe fn sse_shuffle_row<const SRC: u8, const DST: u8>(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
) -> usize {
    let src_channels: PackedChannels = SRC.into();
    let dst_channels: PackedChannels = DST.into();
    let src_ch = src_channels.get_channels_count();
    debug_assert_eq!(dst_channels.get_channels_count(), 4);

    let mut table = [0u8; 16];
    let mut alpha_fill = [0u8; 16];
    for i in 0..4 {
        let src_base = (i * src_ch) as u8;
        let dst_base = i * 4;
        table[dst_base + dst_channels.get_r_channel_offset()] =
            src_base + src_channels.get_r_channel_offset() as u8;
        table[dst_base + dst_channels.get_g_channel_offset()] =
            src_base + src_channels.get_g_channel_offset() as u8;
        table[dst_base + dst_channels.get_b_channel_offset()] =
            src_base + src_channels.get_b_channel_offset() as u8;
        if src_channels.has_alpha() {
            table[dst_base + dst_channels.get_a_channel_offset()] =
                src_base + src_channels.get_a_channel_offset() as u8;
        } else {
            table[dst_base + dst_channels.get_a_channel_offset()] = 0x80;
            alpha_fill[dst_base + dst_channels.get_a_channel_offset()] = 0xff;
        }
    }
    let v_table = _mm_loadu_si128(table.as_ptr() as *const __m128i);
    let v_alpha = _mm_loadu_si128(alpha_fill.as_ptr() as *const __m128i);

    let mut cx = 0usize;

    if src_ch == 4 {
        while cx + 4 <= width {
            let px = _mm_loadu_si128(src.as_ptr().add(cx * 4) as *const __m128i);
            let shuffled = _mm_shuffle_epi8(px, v_table);
            _mm_storeu_si128(dst.as_mut_ptr().add(cx * 4) as *mut __m128i, shuffled);
            cx += 4;
        }
    } else {
        // 12 payload bytes per iteration, the load grabs a full lane so the
        // loop stops short of the row end.
        while cx + 6 <= width {
            let px = _mm_loadu_si128(src.as_ptr().add(cx * 3) as *const __m128i);
            let shuffled = _mm_or_si128(_mm_shuffle_epi8(px, v_table), v_alpha);
            _mm_storeu_si128(dst.as_mut_ptr().add(cx * 4) as *mut __m128i, shuffled);
            cx += 4;
        }
    }

    cx
}
