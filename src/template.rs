//! Template statistics precomputed once per pyramid level.

use crate::image::ImageView;

/// A template with near-zero squared deviation cannot be normalized; such
/// levels are skipped and produce no matches rather than an error.
const DEGENERATE_SUM_SQ_DEV: f64 = 1e-6;

/// Mean, total squared deviation, and size of a template image.
///
/// `sum_sq_dev` is `sum((T - mean)^2)` over all pixels, the template half of
/// the NCC denominator. Building never fails; degenerate (flat) templates are
/// detected through [`TemplateStats::is_degenerate`].
pub struct TemplateStats {
    width: usize,
    height: usize,
    mean: f64,
    sum_sq_dev: f64,
}

impl TemplateStats {
    /// Computes statistics in one pass over the template pixels.
    pub fn from_view(template: ImageView<'_>) -> Self {
        let width = template.width();
        let height = template.height();

        let mut sum = 0.0f64;
        let mut sum_sq = 0.0f64;
        for y in 0..height {
            let row = template.row(y).expect("row within template bounds");
            for &value in row {
                let v = f64::from(value);
                sum += v;
                sum_sq += v * v;
            }
        }

        let count = (width * height) as f64;
        let mean = sum / count;
        let sum_sq_dev = (sum_sq - sum * sum / count).max(0.0);

        Self {
            width,
            height,
            mean,
            sum_sq_dev,
        }
    }

    /// Returns the template width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the template height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns the number of template pixels.
    pub fn len(&self) -> u32 {
        (self.width * self.height) as u32
    }

    /// Returns true when the template has no pixels (never for validated views).
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }

    /// Returns the mean intensity.
    pub fn mean(&self) -> f64 {
        self.mean
    }

    /// Returns the total squared deviation from the mean.
    pub fn sum_sq_dev(&self) -> f64 {
        self.sum_sq_dev
    }

    /// True when the template is flat and correlation is undefined.
    pub fn is_degenerate(&self) -> bool {
        self.sum_sq_dev <= DEGENERATE_SUM_SQ_DEV
    }
}
