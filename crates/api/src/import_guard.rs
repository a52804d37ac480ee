//! Single-flight guard for lead imports.
//!
//! Only one import may run at a time. A second upload while one is in
//! progress is refused instead of queued.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Shared busy flag. Clones observe the same flag.
#[derive(Debug, Clone, Default)]
pub struct ImportGuard {
    busy: Arc<AtomicBool>,
}

/// Held for the duration of one import. Clears the busy flag on drop.
#[derive(Debug)]
pub struct ImportPermit {
    busy: Arc<AtomicBool>,
}

impl ImportGuard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Claim the guard. Returns `None` if an import is already running.
    pub fn try_acquire(&self) -> Option<ImportPermit> {
        self.busy
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| ImportPermit {
                busy: Arc::clone(&self.busy),
            })
    }

    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }
}

impl Drop for ImportPermit {
    fn drop(&mut self) {
        self.busy.store(false, Ordering::Release);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn second_acquire_fails_while_permit_is_held() {
        let guard = ImportGuard::new();
        let permit = guard.try_acquire();
        assert!(permit.is_some());
        assert!(guard.is_busy());
        assert!(guard.clone().try_acquire().is_none());

        drop(permit);
        assert!(!guard.is_busy());
        assert!(guard.try_acquire().is_some());
    }
}
