//! Non-maximum suppression of overlapping candidates.
//!
//! Two suppression passes exist. `nms_2d` prunes clustered peaks at a single
//! pyramid level by Chebyshev distance (used to bound the candidate set
//! between levels). `suppress` is the final greedy pass that turns refined
//! candidates into non-overlapping results, with the overlap test selectable
//! through [`OverlapPolicy`].

use crate::candidate::{sort_peaks_desc, Peak};

/// Overlap rejection rule for the final suppression pass.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum OverlapPolicy {
    /// Reject a candidate whose template box intersects a kept box at all.
    /// Matches the "distinct icon instances" use case.
    AnyOverlap,
    /// Reject when the intersection-over-union of the two template-sized
    /// boxes exceeds the given fraction.
    Iou(f64),
}

impl Default for OverlapPolicy {
    fn default() -> Self {
        Self::AnyOverlap
    }
}

fn boxes_conflict(a: Peak, b: Peak, width: usize, height: usize, policy: OverlapPolicy) -> bool {
    let dx = a.x.abs_diff(b.x);
    let dy = a.y.abs_diff(b.y);
    if dx >= width || dy >= height {
        return false;
    }
    match policy {
        OverlapPolicy::AnyOverlap => true,
        OverlapPolicy::Iou(max_iou) => {
            let inter = ((width - dx) * (height - dy)) as f64;
            let union = (2 * width * height) as f64 - inter;
            inter / union > max_iou
        }
    }
}

/// Applies 2D non-maximum suppression using Chebyshev distance.
///
/// Peaks are sorted by descending score and kept if they are farther than
/// `radius` in Chebyshev distance from all previously kept peaks.
pub(crate) fn nms_2d(peaks: &mut [Peak], radius: usize) -> Vec<Peak> {
    sort_peaks_desc(peaks);
    if radius == 0 {
        return peaks.to_owned();
    }

    let mut kept: Vec<Peak> = Vec::new();
    'outer: for peak in peaks.iter().copied() {
        for kept_peak in kept.iter() {
            let dist = peak.x.abs_diff(kept_peak.x).max(peak.y.abs_diff(kept_peak.y));
            if dist <= radius {
                continue 'outer;
            }
        }
        kept.push(peak);
    }
    kept
}

/// Greedy suppression into a ranked, non-overlapping result set.
///
/// Candidates are taken by descending score (row-major tie-break); each kept
/// candidate removes later ones whose template box conflicts under `policy`.
/// Collection stops at `max_count` results.
pub(crate) fn suppress(
    mut peaks: Vec<Peak>,
    tpl_width: usize,
    tpl_height: usize,
    max_count: usize,
    policy: OverlapPolicy,
) -> Vec<Peak> {
    if max_count == 0 {
        return Vec::new();
    }
    sort_peaks_desc(&mut peaks);

    let mut kept: Vec<Peak> = Vec::new();
    'outer: for peak in peaks {
        for kept_peak in kept.iter() {
            if boxes_conflict(peak, *kept_peak, tpl_width, tpl_height, policy) {
                continue 'outer;
            }
        }
        kept.push(peak);
        if kept.len() >= max_count {
            break;
        }
    }
    kept
}
