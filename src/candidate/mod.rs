//! Candidate peaks and their deterministic ordering.

use std::cmp::Ordering;

pub(crate) mod nms;

/// Tentative match position in the coordinates of one pyramid level.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Peak {
    /// X coordinate (column) of the placement's top-left corner.
    pub x: usize,
    /// Y coordinate (row) of the placement's top-left corner.
    pub y: usize,
    /// NCC score in `[0, 1]`.
    pub score: f64,
}

/// Descending score, ties broken by row-major position so concurrent scans
/// always rank equal-scoring peaks the same way.
pub(crate) fn peak_cmp_desc(a: &Peak, b: &Peak) -> Ordering {
    b.score
        .total_cmp(&a.score)
        .then_with(|| a.y.cmp(&b.y))
        .then_with(|| a.x.cmp(&b.x))
}

/// Sorts peaks by descending score with deterministic tie-breaking.
pub(crate) fn sort_peaks_desc(peaks: &mut [Peak]) {
    peaks.sort_by(peak_cmp_desc);
}
