use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Marks an operation that must not be started twice at once.
///
/// Used to block re-submission of a checkout or login while its simulated
/// delay is still running.
#[derive(Debug, Clone, Default)]
pub struct PendingFlag(Arc<AtomicBool>);

impl PendingFlag {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claims the flag, or returns `None` if it is already held.
    pub fn try_begin(&self) -> Option<PendingGuard> {
        self.0
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| PendingGuard(self.0.clone()))
    }

    pub fn is_pending(&self) -> bool {
        self.0.load(Ordering::Acquire)
    }
}

/// Releases its [`PendingFlag`] when dropped, including on early return.
#[derive(Debug)]
pub struct PendingGuard(Arc<AtomicBool>);

impl Drop for PendingGuard {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}
