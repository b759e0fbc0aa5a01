//! Process-wide interrupt flag set by the Ctrl-C handler.
//!
//! The handler only records the request. The session checks it at the prompt
//! and right before the rename batch; a batch that has started runs to
//! completion so no file is left parked under a temporary name.
use std::sync::atomic::{AtomicBool, Ordering};

static INTERRUPTED: AtomicBool = AtomicBool::new(false);

/// Record an interrupt (idempotent, signal-handler safe).
#[inline]
pub fn request() {
    INTERRUPTED.store(true, Ordering::Relaxed);
}

#[inline]
pub fn is_requested() -> bool {
    INTERRUPTED.load(Ordering::Relaxed)
}
