//! Image pyramid construction for grayscale `u8` images.
//!
//! Downsampling uses a 2x2 box filter with integer rounding:
//! `dst = ((a + b + c + d) + 2) / 4`. Each level carries its own
//! [`IntegralStats`] so window statistics stay O(1) at every resolution.
//! Levels are ordered coarsest first; the last level is the base resolution.

use crate::image::integral::IntegralStats;
use crate::image::{checked_area, ImageView};
use crate::util::{NccMatchError, NccMatchResult};

/// Owned contiguous grayscale image buffer.
pub struct OwnedImage {
    data: Vec<u8>,
    width: usize,
    height: usize,
}

impl OwnedImage {
    /// Creates an owned image, requiring exactly `width * height` pixels.
    pub fn new(data: Vec<u8>, width: usize, height: usize) -> NccMatchResult<Self> {
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
        })
    }

    pub(crate) fn from_view(view: ImageView<'_>) -> NccMatchResult<Self> {
        let width = view.width();
        let height = view.height();
        let mut data = Vec::with_capacity(checked_area(width, height)?);
        for y in 0..height {
            let row = view.row(y).expect("row within view bounds");
            data.extend_from_slice(row);
        }
        Self::new(data, width, height)
    }

    /// Returns the image width in pixels.
    pub fn width(&self) -> usize {
        self.width
    }

    /// Returns the image height in pixels.
    pub fn height(&self) -> usize {
        self.height
    }

    /// Returns a borrowed view of the image.
    pub fn view(&self) -> ImageView<'_> {
        ImageView::from_slice(&self.data, self.width, self.height)
            .expect("owned image dimensions are validated at construction")
    }
}

/// One pyramid resolution with its image and integral statistics.
pub struct PyramidLevel {
    image: OwnedImage,
    integral: IntegralStats,
    factor: u32,
}

impl PyramidLevel {
    /// Returns the level image.
    pub fn image(&self) -> &OwnedImage {
        &self.image
    }

    /// Returns the integral statistics for this level.
    pub fn integral(&self) -> &IntegralStats {
        &self.integral
    }

    /// Power-of-two downsample factor relative to the base resolution.
    pub fn factor(&self) -> u32 {
        self.factor
    }

    /// Returns a borrowed view of the level image.
    pub fn view(&self) -> ImageView<'_> {
        self.image.view()
    }
}

/// Owned image pyramid, coarsest level at index 0.
pub struct Pyramid {
    levels: Vec<PyramidLevel>,
}

impl Pyramid {
    /// Builds a pyramid with up to `num_levels` levels from a base view.
    ///
    /// `num_levels` is clamped to at least 1 so the base resolution is always
    /// present. Halving stops early when a side would become empty.
    pub fn build(base: ImageView<'_>, num_levels: usize) -> NccMatchResult<Self> {
        let num_levels = num_levels.max(1);
        let mut images = vec![OwnedImage::from_view(base)?];

        while images.len() < num_levels {
            let src = images.last().expect("images is not empty").view();
            if src.width() < 2 || src.height() < 2 {
                break;
            }

            let dst_width = src.width() / 2;
            let dst_height = src.height() / 2;
            let mut dst = vec![0u8; checked_area(dst_width, dst_height)?];

            for y in 0..dst_height {
                let row0 = src.row(2 * y).expect("even source row within bounds");
                let row1 = src.row(2 * y + 1).expect("odd source row within bounds");
                let out = &mut dst[y * dst_width..(y + 1) * dst_width];
                for (x, slot) in out.iter_mut().enumerate() {
                    let sum = u16::from(row0[2 * x])
                        + u16::from(row0[2 * x + 1])
                        + u16::from(row1[2 * x])
                        + u16::from(row1[2 * x + 1]);
                    *slot = ((sum + 2) / 4) as u8;
                }
            }

            images.push(OwnedImage::new(dst, dst_width, dst_height)?);
        }

        let mut levels: Vec<PyramidLevel> = images
            .into_iter()
            .enumerate()
            .map(|(idx, image)| {
                let integral = IntegralStats::build(image.view());
                PyramidLevel {
                    image,
                    integral,
                    factor: 1u32 << idx,
                }
            })
            .collect();
        levels.reverse();
        Ok(Self { levels })
    }

    /// Returns the number of levels.
    pub fn num_levels(&self) -> usize {
        self.levels.len()
    }

    /// Returns a level by index, 0 being the coarsest.
    pub fn level(&self, index: usize) -> Option<&PyramidLevel> {
        self.levels.get(index)
    }

    /// Returns the base-resolution level.
    pub fn finest(&self) -> &PyramidLevel {
        self.levels.last().expect("pyramid has at least one level")
    }
}

/// Plans the shared pyramid depth for a template of the given size.
///
/// Halving continues while the smaller template side stays at or above
/// `min_side` and the level cap is not reached, so the coarsest template is
/// never too small to correlate meaningfully.
pub(crate) fn plan_levels(
    tpl_width: usize,
    tpl_height: usize,
    min_side: usize,
    max_levels: usize,
) -> usize {
    let max_levels = max_levels.max(1);
    let min_side = min_side.max(1);
    let mut levels = 1;
    let mut side = tpl_width.min(tpl_height);
    while levels < max_levels && side / 2 >= min_side {
        side /= 2;
        levels += 1;
    }
    levels
}
