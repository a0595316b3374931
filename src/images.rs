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
use crate::pix_error::{check_chroma_channel, check_y8_channel};
use crate::pix_support::ChromaSubsampling;
use crate::PixError;
use std::fmt::Debug;

#[derive(Debug)]
pub enum BufferStoreMut<'a, T: Copy + Debug> {
    Borrowed(&'a mut [T]),
    Owned(Vec<T>),
}

impl<T: Copy + Debug> BufferStoreMut<'_, T> {
    pub fn borrow(&self) -> &[T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }

    pub fn borrow_mut(&mut self) -> &mut [T] {
        match self {
            Self::Borrowed(p_ref) => p_ref,
            Self::Owned(vec) => vec,
        }
    }
}

#[derive(Debug, Clone)]
/// Non-mutable representation of a planar YUV image
pub struct YuvPlanarImage<'a, T>
where
    T: Copy + Debug,
{
    pub y_plane: &'a [T],
    /// Stride here always means elements per row.
    pub y_stride: u32,
    pub u_plane: &'a [T],
    /// Stride here always means elements per row.
    pub u_stride: u32,
    pub v_plane: &'a [T],
    /// Stride here always means elements per row.
    pub v_stride: u32,
    pub width: u32,
    pub height: u32,
}

impl YuvPlanarImage<'_, u8> {
    pub fn check_constraints(&self, subsampling: ChromaSubsampling) -> Result<(), PixError> {
        check_y8_channel(self.y_plane, self.y_stride, self.width, self.height)?;
        check_chroma_channel(self.u_plane, self.u_stride, self.width, self.height, subsampling)?;
        check_chroma_channel(self.v_plane, self.v_stride, self.width, self.height, subsampling)?;
        Ok(())
    }
}

#[derive(Debug)]
/// Mutable representation of a planar YUV image
pub struct YuvPlanarImageMut<'a, T>
where
    T: Copy + Debug,
{
    pub y_plane: BufferStoreMut<'a, T>,
    /// Stride here always means elements per row.
    pub y_stride: u32,
    pub u_plane: BufferStoreMut<'a, T>,
    /// Stride here always means elements per row.
    pub u_stride: u32,
    pub v_plane: BufferStoreMut<'a, T>,
    /// Stride here always means elements per row.
    pub v_stride: u32,
    pub width: u32,
    pub height: u32,
}

impl YuvPlanarImageMut<'_, u8> {
    pub fn check_constraints(&self, subsampling: ChromaSubsampling) -> Result<(), PixError> {
        check_y8_channel(
            self.y_plane.borrow(),
            self.y_stride,
            self.width,
            self.height,
        )?;
        check_chroma_channel(
            self.u_plane.borrow(),
            self.u_stride,
            self.width,
            self.height,
            subsampling,
        )?;
        check_chroma_channel(
            self.v_plane.borrow(),
            self.v_stride,
            self.width,
            self.height,
            subsampling,
        )?;
        Ok(())
    }
}

impl<T> YuvPlanarImageMut<'_, T>
where
    T: Copy + Debug + Default,
{
    /// Allocates fresh planes for a given image size and chroma layout
    pub fn alloc(width: u32, height: u32, subsampling: ChromaSubsampling) -> Self {
        let chroma_width = match subsampling {
            ChromaSubsampling::Yuv420 => width.div_ceil(2),
            ChromaSubsampling::Yuv444 => width,
        };
        let chroma_height = match subsampling {
            ChromaSubsampling::Yuv420 => height.div_ceil(2),
            ChromaSubsampling::Yuv444 => height,
        };
        let y_target = vec![T::default(); width as usize * height as usize];
        let u_target = vec![T::default(); chroma_width as usize * chroma_height as usize];
        let v_target = vec![T::default(); chroma_width as usize * chroma_height as usize];
        YuvPlanarImageMut {
            y_plane: BufferStoreMut::Owned(y_target),
            y_stride: width,
            u_plane: BufferStoreMut::Owned(u_target),
            u_stride: chroma_width,
            v_plane: BufferStoreMut::Owned(v_target),
            v_stride: chroma_width,
            width,
            height,
        }
    }

    /// Reinterprets the mutable image as a borrowed immutable one
    pub fn to_fixed(&self) -> YuvPlanarImage<'_, T> {
        YuvPlanarImage {
            y_plane: match &self.y_plane {
                BufferStoreMut::Borrowed(p) => p,
                BufferStoreMut::Owned(v) => v,
            },
            y_stride: self.y_stride,
            u_plane: match &self.u_plane {
                BufferStoreMut::Borrowed(p) => p,
                BufferStoreMut::Owned(v) => v,
            },
            u_stride: self.u_stride,
            v_plane: match &self.v_plane {
                BufferStoreMut::Borrowed(p) => p,
                BufferStoreMut::Owned(v) => v,
            },
            v_stride: self.v_stride,
            width: self.width,
            height: self.height,
        }
    }
}

#[derive(Debug, Clone)]
/// Non-mutable representation of a luma-only image
pub struct YuvGrayImage<'a, T>
where
    T: Copy + Debug,
{
    pub y_plane: &'a [T],
    /// Stride here always means elements per row.
    pub y_stride: u32,
    pub width: u32,
    pub height: u32,
}

impl YuvGrayImage<'_, u8> {
    pub fn check_constraints(&self) -> Result<(), PixError> {
        check_y8_channel(self.y_plane, self.y_stride, self.width, self.height)
    }
}
