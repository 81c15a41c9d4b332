//! Serial ROI evaluation used during candidate refinement.

use crate::candidate::Peak;
use crate::image::integral::IntegralStats;
use crate::image::ImageView;
use crate::kernel::score_at;
use crate::template::TemplateStats;

/// Scores every placement in the inclusive ROI and returns the best one.
///
/// The ROI is clamped to the valid placement range; `None` means the ROI is
/// empty. Ties resolve to the smallest row-major position because only
/// strictly better scores replace the running best. A zero-score peak is
/// still returned so a candidate lineage survives until final thresholding.
#[allow(clippy::too_many_arguments)]
pub fn best_in_roi(
    image: ImageView<'_>,
    integral: &IntegralStats,
    template: ImageView<'_>,
    stats: &TemplateStats,
    x0: usize,
    y0: usize,
    x1: usize,
    y1: usize,
    min_window_var: f64,
) -> Option<Peak> {
    let img_width = image.width();
    let img_height = image.height();
    let tpl_width = stats.width();
    let tpl_height = stats.height();
    if img_width < tpl_width || img_height < tpl_height {
        return None;
    }

    let max_x = img_width - tpl_width;
    let max_y = img_height - tpl_height;
    if x0 > max_x || y0 > max_y {
        return None;
    }
    let x1 = x1.min(max_x);
    let y1 = y1.min(max_y);
    if x0 > x1 || y0 > y1 {
        return None;
    }

    let mut best: Option<Peak> = None;
    for y in y0..=y1 {
        for x in x0..=x1 {
            let score = score_at(image, integral, template, stats, x, y, min_window_var);
            if best.map_or(true, |b| score > b.score) {
                best = Some(Peak { x, y, score });
            }
        }
    }
    best
}

#[cfg(test)]
mod tests {
    use super::best_in_roi;
    use crate::image::integral::IntegralStats;
    use crate::image::ImageView;
    use crate::template::TemplateStats;

    #[test]
    fn finds_embedded_patch_inside_roi() {
        let width = 20;
        let height = 16;
        let mut data = vec![0u8; width * height];
        let tpl: Vec<u8> = (0..9u32).map(|i| (i * 23 + 10) as u8).collect();
        for y in 0..3 {
            for x in 0..3 {
                data[(7 + y) * width + 11 + x] = tpl[y * 3 + x];
            }
        }

        let image = ImageView::from_slice(&data, width, height).unwrap();
        let integral = IntegralStats::build(image);
        let template = ImageView::from_slice(&tpl, 3, 3).unwrap();
        let stats = TemplateStats::from_view(template);

        let best = best_in_roi(image, &integral, template, &stats, 9, 5, 13, 9, 1.0).unwrap();
        assert_eq!((best.x, best.y), (11, 7));
        assert!(best.score > 0.9999);
    }

    #[test]
    fn empty_roi_yields_none() {
        let data = vec![7u8; 64];
        let image = ImageView::from_slice(&data, 8, 8).unwrap();
        let integral = IntegralStats::build(image);
        let tpl = vec![1u8, 2, 3, 4];
        let template = ImageView::from_slice(&tpl, 2, 2).unwrap();
        let stats = TemplateStats::from_view(template);

        // Start beyond the valid placement range.
        assert!(best_in_roi(image, &integral, template, &stats, 7, 7, 9, 9, 1.0).is_none());
    }
}
