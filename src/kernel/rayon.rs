//! Row-parallel scanning over the full placement range.
//!
//! The coarse pass is the dominant cost of a search, so its rows are
//! distributed across the global thread pool. Each row is an independent,
//! stateless work unit writing into its own result vector; the final
//! `collect` is the fork-join barrier after which all partial results are
//! visible.

use crate::candidate::Peak;
use crate::image::integral::IntegralStats;
use crate::image::ImageView;
use crate::kernel::score_at;
use crate::template::TemplateStats;
use rayon::prelude::*;

/// Scans every valid placement, in parallel over rows, and returns all peaks
/// with `score >= min_score` (zero scores are never collected).
///
/// Peak order is unspecified; callers sort. The peak set is identical to a
/// serial scan because each placement is scored independently.
pub fn scan_full_par(
    image: ImageView<'_>,
    integral: &IntegralStats,
    template: ImageView<'_>,
    stats: &TemplateStats,
    min_score: f64,
    min_window_var: f64,
) -> Vec<Peak> {
    let img_width = image.width();
    let img_height = image.height();
    let tpl_width = stats.width();
    let tpl_height = stats.height();
    if img_width < tpl_width || img_height < tpl_height || stats.is_degenerate() {
        return Vec::new();
    }

    let max_x = img_width - tpl_width;
    let max_y = img_height - tpl_height;

    (0..=max_y)
        .into_par_iter()
        .flat_map_iter(|y| {
            let mut row_peaks = Vec::new();
            for x in 0..=max_x {
                let score = score_at(image, integral, template, stats, x, y, min_window_var);
                if score >= min_score && score > 0.0 {
                    row_peaks.push(Peak { x, y, score });
                }
            }
            row_peaks
        })
        .collect()
}
