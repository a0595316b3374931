/*
 * Copyright (c) Radzivon Bartoshyk, 1/2025. All rights reserved.
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
use num_traits::AsPrimitive;

#[inline(always)]
/// Saturates a widened component back into the 8 bit channel domain
pub(crate) fn clamp8<V: Copy + 'static>(val: i32) -> V
where
    i32: AsPrimitive<V>,
{
    val.max(0).min(255).as_()
}

#[inline(always)]
/// Rounding halving add, the vector units round the same way
pub(crate) fn avg_round(a: u8, b: u8) -> u8 {
    ((a as u16 + b as u16 + 1) >> 1) as u8
}

#[inline(always)]
/// Replicates the high bits of an `N` bit field, already shifted into its
/// 8 bit position, into the vacated low bits. `(field * (256 + 2^(8-N))) >> 8`
/// is exact for the 4, 5 and 6 bit fields handled here.
pub(crate) fn replicate_bits<const N: u32>(field: u16) -> u8 {
    let multiplier = 256u32 + (1u32 << (8 - N));
    ((field as u32 * multiplier) >> 8) as u8
}

#[inline(always)]
/// Per-channel blend `a + (f * (b - a)) >> 16` with a 16 bit fraction
pub(crate) fn blend_channel(a: u8, b: u8, f: i32) -> u8 {
    (a as i32 + ((f * (b as i32 - a as i32)) >> 16)) as u8
}
