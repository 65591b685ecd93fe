//! Run-level progress observation.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Mutex, PoisonError};

/// Observer fed the expected total once and one increment per emitted
/// record.
///
/// `on_item` is invoked from concurrently completing detail-fetch futures
/// and must tolerate that; implementations keep their counters atomic.
pub trait ProgressObserver: Send + Sync {
    /// Called once, before any item is emitted. `expected_total` is `None`
    /// when no category listing resolved, in which case raw counts are
    /// still reported without a completion percentage.
    fn on_start(&self, expected_total: Option<u64>);
    /// Called once per successfully emitted record.
    fn on_item(&self);
    /// Called once, after the last item.
    fn on_finish(&self);
}

/// Emit a progress line every this many items.
const LOG_EVERY: u64 = 50;

/// [`ProgressObserver`] reporting through `tracing`, with a completion
/// percentage when the expected total is known.
#[derive(Debug, Default)]
pub struct LogProgress {
    expected: Mutex<Option<u64>>,
    emitted: AtomicU64,
}

impl LogProgress {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of records counted so far.
    #[must_use]
    pub fn emitted(&self) -> u64 {
        self.emitted.load(Ordering::Relaxed)
    }

    fn expected(&self) -> Option<u64> {
        *self
            .expected
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
    }
}

impl ProgressObserver for LogProgress {
    fn on_start(&self, expected_total: Option<u64>) {
        *self
            .expected
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = expected_total;
        match expected_total {
            Some(total) => tracing::info!(expected = total, "harvest started"),
            None => tracing::info!("harvest started, expected total unknown"),
        }
    }

    fn on_item(&self) {
        let emitted = self.emitted.fetch_add(1, Ordering::Relaxed) + 1;
        if emitted % LOG_EVERY != 0 {
            return;
        }
        match self.expected().filter(|total| *total > 0) {
            Some(total) => {
                let percent = emitted.saturating_mul(100) / total;
                tracing::info!(emitted, expected = total, percent, "harvest progress");
            }
            None => tracing::info!(emitted, "harvest progress"),
        }
    }

    fn on_finish(&self) {
        tracing::info!(emitted = self.emitted(), "harvest finished");
    }
}
