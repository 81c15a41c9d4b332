//! Exhaustive pass at the coarsest pyramid level.
//!
//! The coarsest level is scanned at stride 1 with a relaxed threshold; the
//! relaxation margin compensates for correlation lost to downsampling blur.
//! Chebyshev NMS plus a beam cap keep the surviving candidate set bounded
//! before refinement starts.

use crate::candidate::nms::nms_2d;
use crate::candidate::Peak;
use crate::image::pyramid::PyramidLevel;
use crate::kernel::rayon::scan_full_par;
use crate::search::MatchConfig;
use crate::template::TemplateStats;
use crate::trace::{trace_event, trace_span};

pub(crate) fn coarse_search_level(
    source: &PyramidLevel,
    template: &PyramidLevel,
    stats: &TemplateStats,
    relaxed_threshold: f64,
    cfg: &MatchConfig,
) -> Vec<Peak> {
    let _span = trace_span!(
        "coarse_search",
        factor = source.factor(),
        threshold = relaxed_threshold
    )
    .entered();

    let mut peaks = scan_full_par(
        source.view(),
        source.integral(),
        template.view(),
        stats,
        relaxed_threshold,
        cfg.min_window_var,
    );
    if peaks.is_empty() {
        return Vec::new();
    }

    // Keep clusters apart by less than half the template so two genuinely
    // distinct instances can never suppress each other.
    let radius = (stats.width().min(stats.height()) / 2).max(1);
    let mut kept = nms_2d(&mut peaks, radius);
    if kept.len() > cfg.beam_width {
        kept.truncate(cfg.beam_width);
    }

    trace_event!("coarse_candidates", count = kept.len());
    kept
}
