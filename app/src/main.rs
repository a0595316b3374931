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
use image::RgbaImage;
use pixfmt::{
    bgra_to_rgba, bgra_to_yuv420, scale_rgba8, yuv420_to_bgra, ChromaSubsampling, ScaleFilter,
    YuvPlanarImageMut,
};
use std::time::Instant;

fn synthetic_frame(width: u32, height: u32) -> Vec<u8> {
    let mut frame = vec![0u8; (width * height * 4) as usize];
    for y in 0..height {
        for x in 0..width {
            let idx = ((y * width + x) * 4) as usize;
            frame[idx] = (x * 255 / width) as u8;
            frame[idx + 1] = (y * 255 / height) as u8;
            frame[idx + 2] = ((x + y) * 255 / (width + height)) as u8;
            frame[idx + 3] = 255;
        }
    }
    frame
}

fn save_bgra(path: &str, bgra: &[u8], width: u32, height: u32) {
    let mut rgba = vec![0u8; bgra.len()];
    bgra_to_rgba(bgra, width * 4, &mut rgba, width * 4, width, height).unwrap();
    RgbaImage::from_raw(width, height, rgba)
        .unwrap()
        .save(path)
        .unwrap();
}

fn main() {
    let width = 1920u32;
    let height = 1080u32;
    let frame = synthetic_frame(width, height);

    let mut planar = YuvPlanarImageMut::<u8>::alloc(width, height, ChromaSubsampling::Yuv420);
    let start_time = Instant::now();
    bgra_to_yuv420(&mut planar, &frame, width * 4).unwrap();
    println!("bgra -> yuv420 time: {:?}", start_time.elapsed());

    let fixed = planar.to_fixed();
    let mut restored = vec![0u8; frame.len()];
    let start_time = Instant::now();
    yuv420_to_bgra(&fixed, &mut restored, width * 4).unwrap();
    println!("yuv420 -> bgra time: {:?}", start_time.elapsed());

    let half_width = width / 2;
    let half_height = height / 2;
    let mut half = vec![0u8; (half_width * half_height * 4) as usize];
    let start_time = Instant::now();
    scale_rgba8(
        &restored,
        width * 4,
        width,
        height as i32,
        &mut half,
        half_width * 4,
        half_width,
        half_height,
        ScaleFilter::Bilinear,
    )
    .unwrap();
    println!("1/2 downscale time: {:?}", start_time.elapsed());

    let target_width = 1279u32;
    let target_height = 719u32;
    let mut odd = vec![0u8; (target_width * target_height * 4) as usize];
    let start_time = Instant::now();
    scale_rgba8(
        &restored,
        width * 4,
        width,
        height as i32,
        &mut odd,
        target_width * 4,
        target_width,
        target_height,
        ScaleFilter::Bilinear,
    )
    .unwrap();
    println!("arbitrary downscale time: {:?}", start_time.elapsed());

    save_bgra("converted.png", &restored, width, height);
    save_bgra("scaled_half.png", &half, half_width, half_height);
    save_bgra("scaled_odd.png", &odd, target_width, target_height);
}
