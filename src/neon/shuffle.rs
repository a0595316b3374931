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
use std::arch::aarch64::*;

/// Reorders 16 pixels per lap with the deinterleaving loads, 3 channel
/// sources pick up an opaque alpha lane.
pub(crate) unsafe fn neon_shuffle_row<const SRC: u8, const DST: u8>(
    src: &[u8],
    dst: &mut [u8],
    width: usize,
) -> usize {
    let src_channels: PackedChannels = SRC.into();
    let dst_channels: PackedChannels = DST.into();
    let src_ch = src_channels.get_channels_count();
    let dst_ch = dst_channels.get_channels_count();

    let mut cx = 0usize;
    while cx + 16 <= width {
        let mut lanes = [vdupq_n_u8(255); 4];
        if src_ch == 4 {
            let px = vld4q_u8(src.as_ptr().add(cx * 4));
            let channel = [px.0, px.1, px.2, px.3];
            lanes[dst_channels.get_r_channel_offset()] =
                channel[src_channels.get_r_channel_offset()];
            lanes[dst_channels.get_g_channel_offset()] =
                channel[src_channels.get_g_channel_offset()];
            lanes[dst_channels.get_b_channel_offset()] =
                channel[src_channels.get_b_channel_offset()];
            if dst_channels.has_alpha() {
                lanes[dst_channels.get_a_channel_offset()] =
                    channel[src_channels.get_a_channel_offset()];
            }
        } else {
            let px = vld3q_u8(src.as_ptr().add(cx * 3));
            let channel = [px.0, px.1, px.2];
            lanes[dst_channels.get_r_channel_offset()] =
                channel[src_channels.get_r_channel_offset()];
            lanes[dst_channels.get_g_channel_offset()] =
                channel[src_channels.get_g_channel_offset()];
            lanes[dst_channels.get_b_channel_offset()] =
                channel[src_channels.get_b_channel_offset()];
        }

        if dst_ch == 4 {
            vst4q_u8(
                dst.as_mut_ptr().add(cx * 4),
                uint8x16x4_t(lanes[0], lanes[1], lanes[2], lanes[3]),
            );
        } else {
            vst3q_u8(
                dst.as_mut_ptr().add(cx * 3),
                uint8x16x3_t(lanes[0], lanes[1], lanes[2]),
            );
        }
        cx += 16;
    }
    cx
}
