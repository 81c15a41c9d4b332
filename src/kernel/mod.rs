//! NCC scoring kernels.
//!
//! The window half of the normalized cross-correlation comes from integral
//! statistics in O(1); the cross term is a direct sum over template pixels,
//! which is the expensive part and the reason the search prunes with a
//! pyramid instead of scanning full resolution exhaustively.

use crate::image::integral::{window_mean_var, IntegralStats};
use crate::image::ImageView;
use crate::template::TemplateStats;

pub mod rayon;
pub mod scalar;

/// Denominator values at or below this count as flat and score zero.
const DENOM_EPS: f64 = 1e-9;

/// Computes the NCC score for the template placed at `(x, y)`.
///
/// The placement must be valid: `x + tw <= image width` and
/// `y + th <= image height`. Flat windows (variance below `min_window_var`),
/// degenerate templates, and non-finite intermediate values all yield 0.0;
/// negative correlation is treated as a non-match, so the result is clamped
/// to `[0, 1]`.
pub fn score_at(
    image: ImageView<'_>,
    integral: &IntegralStats,
    template: ImageView<'_>,
    stats: &TemplateStats,
    x: usize,
    y: usize,
    min_window_var: f64,
) -> f64 {
    let tpl_width = stats.width();
    let tpl_height = stats.height();
    debug_assert!(x + tpl_width <= image.width() && y + tpl_height <= image.height());

    if stats.is_degenerate() {
        return 0.0;
    }

    let n = f64::from(stats.len());
    let (sum, sum_sq) = integral.window_sums(x, y, tpl_width, tpl_height);
    let (mean, var) = window_mean_var(sum, sum_sq, n);
    if var < min_window_var {
        return 0.0;
    }

    let mut cross = 0.0f64;
    for ty in 0..tpl_height {
        let img_row = image.row(y + ty).expect("row within bounds for score");
        let tpl_row = template.row(ty).expect("row within template bounds");
        for (tx, &t) in tpl_row.iter().enumerate() {
            cross += f64::from(img_row[x + tx]) * f64::from(t);
        }
    }

    // sum_sq - sum^2/n is the window's total squared deviation.
    let numer = cross - n * mean * stats.mean();
    let denom = ((sum_sq - sum * sum / n).max(0.0) * stats.sum_sq_dev()).sqrt();
    if denom <= DENOM_EPS {
        return 0.0;
    }
    let score = numer / denom;
    if score.is_finite() {
        score.clamp(0.0, 1.0)
    } else {
        0.0
    }
}
