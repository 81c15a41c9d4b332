//! nccmatch locates a small template image inside a larger grayscale source
//! using normalized cross-correlation.
//!
//! Window statistics come from integral images in O(1); a coarse-to-fine
//! pyramid search prunes the expensive cross-term evaluation; overlapping
//! detections are suppressed into a deterministic ranked result set. The
//! coarse pass runs row-parallel on a process-wide worker pool.
//!
//! ```no_run
//! use nccmatch::{find_best, ImageView};
//!
//! # fn main() -> nccmatch::NccMatchResult<()> {
//! let screen = vec![0u8; 1920 * 1080];
//! let icon = vec![0u8; 32 * 32];
//! let source = ImageView::from_slice(&screen, 1920, 1080)?;
//! let template = ImageView::from_slice(&icon, 32, 32)?;
//! if let Some(found) = find_best(source, template, 0.8)? {
//!     println!("match at ({}, {}), confidence {:.3}", found.x, found.y, found.confidence);
//! }
//! # Ok(())
//! # }
//! ```

mod candidate;
pub mod image;
pub mod kernel;
mod pool;
pub mod search;
pub mod template;
pub(crate) mod trace;
pub mod util;

pub use candidate::nms::OverlapPolicy;
pub use candidate::Peak;
pub use image::integral::IntegralStats;
#[cfg(feature = "image-io")]
pub use image::io;
pub use image::pyramid::{OwnedImage, Pyramid, PyramidLevel};
pub use image::ImageView;
pub use pool::configure_threads;
pub use search::{find_all, find_best, Match, MatchConfig, Matcher};
pub use template::TemplateStats;
pub use util::{NccMatchError, NccMatchResult};

/// Returns the crate's semantic version.
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
