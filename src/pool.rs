//! Process-wide worker pool configuration.
//!
//! Parallel scans run on rayon's global thread pool, which is created once
//! per process. [`configure_threads`] must therefore run before the first
//! search; an atomic latch records whether the pool has been claimed so a
//! late reconfiguration fails loudly instead of silently doing nothing.

use crate::util::{NccMatchError, NccMatchResult};
use std::sync::atomic::{AtomicBool, Ordering};

static POOL_CLAIMED: AtomicBool = AtomicBool::new(false);

/// Sizes the global worker pool; `num_threads == 0` auto-detects core count.
///
/// May be called at most once, strictly before the first search in the
/// process. Later calls fail with
/// [`NccMatchError::ThreadPoolAlreadyInitialized`].
pub fn configure_threads(num_threads: usize) -> NccMatchResult<()> {
    if POOL_CLAIMED
        .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
        .is_err()
    {
        return Err(NccMatchError::ThreadPoolAlreadyInitialized);
    }

    let mut builder = rayon::ThreadPoolBuilder::new();
    if num_threads > 0 {
        builder = builder.num_threads(num_threads);
    }
    builder
        .build_global()
        .map_err(|err| NccMatchError::ThreadPool {
            reason: err.to_string(),
        })
}

/// Latches the pool as in use before a search touches it.
///
/// Rayon creates a default-sized global pool lazily on first use; this only
/// records that the one-shot configuration window has closed.
pub(crate) fn ensure_initialized() {
    POOL_CLAIMED.store(true, Ordering::SeqCst);
}
