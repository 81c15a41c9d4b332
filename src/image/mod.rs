//! Grayscale image views and derived per-image data.
//!
//! `ImageView` is a borrowed 2D view into a 1D `u8` buffer with an explicit
//! stride. The stride counts elements between the starts of consecutive rows,
//! so a stride larger than the width represents padded rows. Views are `Copy`
//! and read-only; a search shares them freely across worker threads.

use crate::util::{NccMatchError, NccMatchResult};

pub mod integral;
#[cfg(feature = "image-io")]
pub mod io;
pub mod pyramid;

/// Borrowed grayscale image view with an explicit stride.
#[derive(Copy, Clone)]
pub struct ImageView<'a> {
    data: &'a [u8],
    width: usize,
    height: usize,
    stride: usize,
}

impl<'a> ImageView<'a> {
    /// Creates a contiguous view with `stride == width`.
    ///
    /// Fails with [`NccMatchError::BufferSizeMismatch`] when the buffer does
    /// not hold exactly `width * height` pixels, so a raw-buffer entry point
    /// rejects mismatched dimensions before any scoring happens.
    pub fn from_slice(data: &'a [u8], width: usize, height: usize) -> NccMatchResult<Self> {
        let expected = checked_area(width, height)?;
        if data.len() != expected {
            return Err(NccMatchError::BufferSizeMismatch {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride: width,
        })
    }

    /// Creates a view with an explicit stride over a possibly padded buffer.
    pub fn with_stride(
        data: &'a [u8],
        width: usize,
        height: usize,
        stride: usize,
    ) -> NccMatchResult<Self> {
        if width == 0 || height == 0 {
            return Err(NccMatchError::InvalidDimensions { width, height });
        }
        if stride < width {
            return Err(NccMatchError::InvalidStride { width, stride });
        }
        let needed = (height - 1)
            .checked_mul(stride)
            .and_then(|v| v.checked_add(width))
            .ok_or(NccMatchError::InvalidDimensions { width, height })?;
        if data.len() < needed {
            return Err(NccMatchError::BufferSizeMismatch {
                expected: needed,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            stride,
        })
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the stride in elements between row starts.
    pub fn stride(&self) -> usize {
        self.stride
    }

    /// Returns the backing slice including any row padding.
    pub fn as_slice(&self) -> &'a [u8] {
        self.data
    }

    /// Returns the pixel at `(x, y)` if it is within bounds.
    pub fn get(&self, x: usize, y: usize) -> Option<u8> {
        if x >= self.width || y >= self.height {
            return None;
        }
        self.data.get(y * self.stride + x).copied()
    }

    /// Returns a contiguous slice for row `y` with length `width`.
    pub fn row(&self, y: usize) -> Option<&'a [u8]> {
        if y >= self.height {
            return None;
        }
        let start = y * self.stride;
        self.data.get(start..start + self.width)
    }
}

pub(crate) fn checked_area(width: usize, height: usize) -> NccMatchResult<usize> {
    if width == 0 || height == 0 {
        return Err(NccMatchError::InvalidDimensions { width, height });
    }
    width
        .checked_mul(height)
        .ok_or(NccMatchError::InvalidDimensions { width, height })
}
