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
use criterion::{criterion_group, criterion_main, Criterion};
use pixfmt::{
    bgra_to_yuv420, rgb565_to_bgra, scale_rgba8, yuv420_to_bgra, ChromaSubsampling, ScaleFilter,
    YuvPlanarImageMut,
};
use rand::Rng;

const WIDTH: u32 = 1920;
const HEIGHT: u32 = 1080;

fn random_bytes(len: usize) -> Vec<u8> {
    let mut rng = rand::rng();
    (0..len).map(|_| rng.random::<u8>()).collect()
}

pub fn criterion_benchmark(c: &mut Criterion) {
    let frame = random_bytes((WIDTH * HEIGHT * 4) as usize);

    c.bench_function("pixfmt: bgra -> yuv420 1080p", |b| {
        let mut planar = YuvPlanarImageMut::<u8>::alloc(WIDTH, HEIGHT, ChromaSubsampling::Yuv420);
        b.iter(|| {
            bgra_to_yuv420(&mut planar, &frame, WIDTH * 4).unwrap();
        })
    });

    c.bench_function("pixfmt: yuv420 -> bgra 1080p", |b| {
        let mut planar = YuvPlanarImageMut::<u8>::alloc(WIDTH, HEIGHT, ChromaSubsampling::Yuv420);
        bgra_to_yuv420(&mut planar, &frame, WIDTH * 4).unwrap();
        let fixed = planar.to_fixed();
        let mut restored = vec![0u8; frame.len()];
        b.iter(|| {
            yuv420_to_bgra(&fixed, &mut restored, WIDTH * 4).unwrap();
        })
    });

    c.bench_function("pixfmt: rgb565 -> bgra 1080p", |b| {
        let mut rng = rand::rng();
        let packed: Vec<u16> = (0..(WIDTH * HEIGHT) as usize)
            .map(|_| rng.random::<u16>())
            .collect();
        let mut expanded = vec![0u8; (WIDTH * HEIGHT * 4) as usize];
        b.iter(|| {
            rgb565_to_bgra(&packed, WIDTH, &mut expanded, WIDTH * 4, WIDTH, HEIGHT).unwrap();
        })
    });

    c.bench_function("pixfmt: bilinear 1080p -> 720p", |b| {
        let mut scaled = vec![0u8; 1280 * 720 * 4];
        b.iter(|| {
            scale_rgba8(
                &frame,
                WIDTH * 4,
                WIDTH,
                HEIGHT as i32,
                &mut scaled,
                1280 * 4,
                1280,
                720,
                ScaleFilter::Bilinear,
            )
            .unwrap();
        })
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
