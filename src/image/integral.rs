//! Integral-image statistics for O(1) window sums.
//!
//! `IntegralStats` stores `(width + 1) x (height + 1)` prefix sums of pixel
//! value and squared pixel value, with the standard zero row/column padding,
//! so the sum over any axis-aligned rectangle reduces to four lookups and
//! inclusion-exclusion. Window mean and variance then follow without
//! re-scanning pixels. The lifetime of the statistics is tied to the image
//! they were built from only logically; the tables own their storage.

use crate::image::ImageView;
use crate::util::{NccMatchError, NccMatchResult};

/// Prefix sums of value and value squared in f64.
pub struct IntegralStats {
    sum: Vec<f64>,
    sum_sq: Vec<f64>,
    /// Row stride of the padded tables, `width + 1`.
    stride: usize,
    width: usize,
    height: usize,
}

impl IntegralStats {
    /// Builds both prefix tables in a single pass over the image.
    pub fn build(image: ImageView<'_>) -> Self {
        let width = image.width();
        let height = image.height();
        let stride = width + 1;
        let len = stride * (height + 1);

        let mut sum = vec![0.0f64; len];
        let mut sum_sq = vec![0.0f64; len];

        for y in 0..height {
            let row = image.row(y).expect("row within image bounds");
            for (x, &value) in row.iter().enumerate() {
                let v = f64::from(value);
                let idx = (y + 1) * stride + (x + 1);
                sum[idx] = v + sum[idx - 1] + sum[idx - stride] - sum[idx - stride - 1];
                sum_sq[idx] =
                    v * v + sum_sq[idx - 1] + sum_sq[idx - stride] - sum_sq[idx - stride - 1];
            }
        }

        Self {
            sum,
            sum_sq,
            stride,
            width,
            height,
        }
    }

    /// Returns the width of the source image in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the height of the source image in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns `(sum, sum_sq, count)` for the `w x h` rectangle at `(x, y)`.
    ///
    /// Fails with [`NccMatchError::RegionOutOfBounds`] when the rectangle
    /// leaves the image; callers on the hot path clamp first and use
    /// [`IntegralStats::window_sums`] instead.
    pub fn region_stats(
        &self,
        x: usize,
        y: usize,
        w: usize,
        h: usize,
    ) -> NccMatchResult<(f64, f64, u32)> {
        let out_of_bounds = w == 0
            || h == 0
            || x.checked_add(w).map_or(true, |end| end > self.width)
            || y.checked_add(h).map_or(true, |end| end > self.height);
        if out_of_bounds {
            return Err(NccMatchError::RegionOutOfBounds {
                x,
                y,
                width: w,
                height: h,
                img_width: self.width,
                img_height: self.height,
            });
        }
        let (sum, sum_sq) = self.window_sums(x, y, w, h);
        Ok((sum, sum_sq, (w * h) as u32))
    }

    /// Unchecked-fast window sums; the rectangle must lie inside the image.
    #[inline]
    pub(crate) fn window_sums(&self, x: usize, y: usize, w: usize, h: usize) -> (f64, f64) {
        debug_assert!(x + w <= self.width && y + h <= self.height);
        let top = y * self.stride;
        let bottom = (y + h) * self.stride;
        let (a, b, c, d) = (top + x, top + x + w, bottom + x, bottom + x + w);
        let sum = self.sum[d] - self.sum[b] - self.sum[c] + self.sum[a];
        let sum_sq = self.sum_sq[d] - self.sum_sq[b] - self.sum_sq[c] + self.sum_sq[a];
        (sum, sum_sq)
    }
}

/// Mean and variance of a window from its raw sums, variance clamped to zero
/// to absorb floating-point cancellation.
#[inline]
pub(crate) fn window_mean_var(sum: f64, sum_sq: f64, count: f64) -> (f64, f64) {
    let mean = sum / count;
    let var = (sum_sq / count - mean * mean).max(0.0);
    (mean, var)
}
