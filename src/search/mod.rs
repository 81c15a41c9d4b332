//! Coarse-to-fine search orchestration and the public matching API.
//!
//! [`Matcher`] plans a shared pyramid depth from the template size, runs the
//! relaxed exhaustive pass at the coarsest level, walks candidates down the
//! pyramid with local re-scoring, applies the true threshold at full
//! resolution, and hands survivors to the suppressor. [`find_best`] and
//! [`find_all`] are conveniences over a default-configured matcher.

use crate::candidate::nms::{suppress, OverlapPolicy};
use crate::candidate::{sort_peaks_desc, Peak};
use crate::image::pyramid::{plan_levels, Pyramid};
use crate::image::ImageView;
use crate::pool;
use crate::template::TemplateStats;
use crate::trace::{trace_event, trace_span};
use crate::util::NccMatchResult;

pub(crate) mod coarse;
pub(crate) mod refine;

/// A confirmed match in full-resolution source coordinates.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Match {
    /// Column of the match's top-left corner.
    pub x: u32,
    /// Row of the match's top-left corner.
    pub y: u32,
    /// NCC confidence, clamped to `[0, 1]`.
    pub confidence: f64,
}

impl Match {
    /// Returns `(x, y, confidence)`.
    pub fn to_tuple(&self) -> (u32, u32, f64) {
        (self.x, self.y, self.confidence)
    }

    /// Returns the template-sized bounding box `(x, y, width, height)`.
    pub fn bounding_box(&self, tpl_width: u32, tpl_height: u32) -> (u32, u32, u32, u32) {
        (self.x, self.y, tpl_width, tpl_height)
    }
}

/// Tuning constants for the coarse-to-fine search.
///
/// The defaults are empirical; they trade a little extra work for robustness
/// to downsampling blur and projection rounding. All fields are plain data so
/// callers can struct-update from `MatchConfig::default()`.
#[derive(Clone, Copy, Debug)]
pub struct MatchConfig {
    /// Maximum pyramid depth; the planned depth also respects
    /// `min_template_side`.
    pub max_levels: usize,
    /// Smallest usable template side at the coarsest level, in pixels.
    pub min_template_side: usize,
    /// Threshold relaxation applied at the coarsest level.
    pub relaxation_margin: f64,
    /// Half-width of the re-scoring window around a projected candidate.
    pub refine_radius: usize,
    /// Maximum candidates carried between pyramid levels.
    pub beam_width: usize,
    /// Windows with per-pixel variance below this score zero (flat regions).
    pub min_window_var: f64,
    /// Overlap rule for the final suppression pass.
    pub overlap: OverlapPolicy,
}

impl Default for MatchConfig {
    fn default() -> Self {
        Self {
            max_levels: 4,
            min_template_side: 8,
            relaxation_margin: 0.08,
            refine_radius: 3,
            beam_width: 64,
            min_window_var: 1.0,
            overlap: OverlapPolicy::AnyOverlap,
        }
    }
}

/// Template matcher with a fixed configuration.
#[derive(Clone, Copy, Debug, Default)]
pub struct Matcher {
    cfg: MatchConfig,
}

impl Matcher {
    /// Creates a matcher with default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a matcher with an explicit configuration.
    pub fn with_config(cfg: MatchConfig) -> Self {
        Self { cfg }
    }

    /// Returns the active configuration.
    pub fn config(&self) -> &MatchConfig {
        &self.cfg
    }

    /// Returns the best match at or above `threshold`, if any.
    pub fn find_best(
        &self,
        source: ImageView<'_>,
        template: ImageView<'_>,
        threshold: f64,
    ) -> NccMatchResult<Option<Match>> {
        let peaks = self.search(source, template, threshold, false)?;
        Ok(peaks.first().map(to_match))
    }

    /// Returns up to `max_count` non-overlapping matches, best first.
    pub fn find_all(
        &self,
        source: ImageView<'_>,
        template: ImageView<'_>,
        threshold: f64,
        max_count: usize,
    ) -> NccMatchResult<Vec<Match>> {
        let peaks = self.search(source, template, threshold, true)?;
        let kept = suppress(
            peaks,
            template.width(),
            template.height(),
            max_count,
            self.cfg.overlap,
        );
        Ok(kept.iter().map(to_match).collect())
    }

    /// Runs the coarse-to-fine search and returns ranked full-resolution
    /// peaks at or above `threshold` (pre-suppression).
    fn search(
        &self,
        source: ImageView<'_>,
        template: ImageView<'_>,
        threshold: f64,
        want_all: bool,
    ) -> NccMatchResult<Vec<Peak>> {
        pool::ensure_initialized();

        let (src_width, src_height) = (source.width(), source.height());
        let (tpl_width, tpl_height) = (template.width(), template.height());
        // A template that cannot fit anywhere has an empty search space.
        if tpl_width > src_width || tpl_height > src_height {
            return Ok(Vec::new());
        }

        let planned = plan_levels(
            tpl_width,
            tpl_height,
            self.cfg.min_template_side,
            self.cfg.max_levels,
        );
        let src_pyr = Pyramid::build(source, planned)?;
        let tpl_pyr = Pyramid::build(template, planned)?;
        let num_levels = src_pyr.num_levels().min(tpl_pyr.num_levels());

        let _span = trace_span!("search", levels = num_levels, want_all = want_all).entered();

        let coarse_src = src_pyr.level(0).expect("pyramid has a coarsest level");
        let coarse_tpl = tpl_pyr.level(0).expect("pyramid has a coarsest level");
        let coarse_stats = TemplateStats::from_view(coarse_tpl.view());
        if coarse_stats.is_degenerate() {
            trace_event!("degenerate_template", factor = coarse_tpl.factor());
            return Ok(Vec::new());
        }

        // A single-level pyramid scans at full resolution with the true
        // threshold; otherwise the coarse pass relaxes it by the margin.
        let relaxed = if num_levels == 1 {
            threshold
        } else {
            (threshold - self.cfg.relaxation_margin).max(0.0)
        };
        let mut peaks =
            coarse::coarse_search_level(coarse_src, coarse_tpl, &coarse_stats, relaxed, &self.cfg);

        for level in 1..num_levels {
            if peaks.is_empty() {
                return Ok(Vec::new());
            }
            let src_level = src_pyr.level(level).expect("level index within pyramid");
            let tpl_level = tpl_pyr.level(level).expect("level index within pyramid");
            let stats = TemplateStats::from_view(tpl_level.view());
            if stats.is_degenerate() {
                trace_event!("degenerate_template", factor = tpl_level.factor());
                return Ok(Vec::new());
            }
            peaks = refine::refine_to_finer_level(src_level, tpl_level, &stats, &peaks, &self.cfg);
        }

        peaks.retain(|p| p.score >= threshold);
        sort_peaks_desc(&mut peaks);
        if !want_all {
            peaks.truncate(1);
        }
        trace_event!("final_peaks", count = peaks.len());
        Ok(peaks)
    }
}

fn to_match(peak: &Peak) -> Match {
    Match {
        x: peak.x as u32,
        y: peak.y as u32,
        confidence: peak.score.clamp(0.0, 1.0),
    }
}

/// Finds the best match with default configuration.
pub fn find_best(
    source: ImageView<'_>,
    template: ImageView<'_>,
    threshold: f64,
) -> NccMatchResult<Option<Match>> {
    Matcher::new().find_best(source, template, threshold)
}

/// Finds up to `max_count` matches with default configuration.
pub fn find_all(
    source: ImageView<'_>,
    template: ImageView<'_>,
    threshold: f64,
    max_count: usize,
) -> NccMatchResult<Vec<Match>> {
    Matcher::new().find_all(source, template, threshold, max_count)
}
