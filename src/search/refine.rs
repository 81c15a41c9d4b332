//! Candidate refinement across pyramid levels.
//!
//! Each surviving candidate is projected to the next finer level by doubling
//! its position, then re-scored in a small window around the projection. Only
//! the best offset per lineage survives. Refinement is purely local per
//! candidate, so evaluation order never changes the resulting scores.

use crate::candidate::nms::nms_2d;
use crate::candidate::Peak;
use crate::image::pyramid::PyramidLevel;
use crate::kernel::scalar::best_in_roi;
use crate::search::MatchConfig;
use crate::template::TemplateStats;
use crate::trace::{trace_event, trace_span};

fn roi_bounds(
    x: usize,
    y: usize,
    radius: usize,
    max_x: usize,
    max_y: usize,
) -> Option<(usize, usize, usize, usize)> {
    let x0 = x.saturating_sub(radius);
    let y0 = y.saturating_sub(radius);
    if x0 > max_x || y0 > max_y {
        return None;
    }
    let x1 = x.saturating_add(radius).min(max_x);
    let y1 = y.saturating_add(radius).min(max_y);
    Some((x0, y0, x1, y1))
}

pub(crate) fn refine_to_finer_level(
    source: &PyramidLevel,
    template: &PyramidLevel,
    stats: &TemplateStats,
    prev: &[Peak],
    cfg: &MatchConfig,
) -> Vec<Peak> {
    if prev.is_empty() {
        return Vec::new();
    }

    let _span = trace_span!(
        "refine_level",
        factor = source.factor(),
        candidates = prev.len()
    )
    .entered();

    let img_width = source.image().width();
    let img_height = source.image().height();
    let tpl_width = stats.width();
    let tpl_height = stats.height();
    if img_width < tpl_width || img_height < tpl_height {
        return Vec::new();
    }
    let max_x = img_width - tpl_width;
    let max_y = img_height - tpl_height;

    let mut refined = Vec::with_capacity(prev.len());
    for cand in prev.iter().copied() {
        let (x_up, y_up) = (cand.x.saturating_mul(2), cand.y.saturating_mul(2));
        let Some((x0, y0, x1, y1)) = roi_bounds(x_up, y_up, cfg.refine_radius, max_x, max_y)
        else {
            continue;
        };
        if let Some(best) = best_in_roi(
            source.view(),
            source.integral(),
            template.view(),
            stats,
            x0,
            y0,
            x1,
            y1,
            cfg.min_window_var,
        ) {
            refined.push(best);
        }
    }

    // Lineages that converged onto the same peak collapse to one candidate.
    let mut kept = nms_2d(&mut refined, 1);
    if kept.len() > cfg.beam_width {
        kept.truncate(cfg.beam_width);
    }

    trace_event!("refined_candidates", count = kept.len());
    kept
}
