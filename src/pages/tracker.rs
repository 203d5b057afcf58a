use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Hands out load tickets and invalidates them on teardown or when a newer
/// load supersedes them.
///
/// Clones share state, so a view can keep one handle for teardown while a
/// load future holds another.
#[derive(Debug, Clone, Default)]
pub struct LoadTracker {
    generation: Arc<AtomicU64>,
}

/// Proof that a load is still the one whose result should be kept
#[derive(Debug, Clone)]
pub struct LoadTicket {
    generation: u64,
    current: Arc<AtomicU64>,
}

impl LoadTracker {
    pub fn new() -> Self {
        Self::default()
    }

    /// Start a load; every earlier ticket goes stale
    pub fn begin(&self) -> LoadTicket {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        LoadTicket {
            generation,
            current: Arc::clone(&self.generation),
        }
    }

    /// The owning view is gone; results of in-flight loads are dropped
    pub fn invalidate(&self) {
        self.generation.fetch_add(1, Ordering::SeqCst);
    }
}

impl LoadTicket {
    pub fn is_current(&self) -> bool {
        self.current.load(Ordering::SeqCst) == self.generation
    }

    /// Store `value` in `slot` if this ticket is still current
    pub fn commit<T>(&self, slot: &mut T, value: T) -> bool {
        if self.is_current() {
            *slot = value;
            true
        } else {
            false
        }
    }
}
