//! Transfer-completion signal shared between the DMA interrupt and the
//! foreground exchange loop.
//!
//! A saturating counter rather than a single flag: a completion raised while
//! an earlier one is still being acted on is counted, never overwritten.
//!
//! # Contract
//!
//! - The interrupt side only calls [`on_transport_complete()`](CompletionSignal::on_transport_complete).
//! - Only the exchange controller consumes completions.

use core::sync::atomic::{AtomicU32, Ordering};

/// Atomic completion counter.
pub struct CompletionSignal {
    /// Completions raised but not yet consumed.
    pending: AtomicU32,
}

impl CompletionSignal {
    /// Signal with no pending completions. Usable in a `static`.
    pub const fn new() -> Self {
        CompletionSignal {
            pending: AtomicU32::new(0),
        }
    }

    /// Record one finished transfer. Interrupt-safe, lock-free, bounded.
    pub fn on_transport_complete(&self) {
        // Saturates rather than wrapping back to "nothing pending".
        let _ = self
            .pending
            .fetch_update(Ordering::Release, Ordering::Relaxed, |n| n.checked_add(1));
    }

    /// Number of completions waiting to be consumed.
    pub fn pending(&self) -> u32 {
        self.pending.load(Ordering::Acquire)
    }

    /// Consume one completion.
    ///
    /// Returns the pending count observed before the decrement, or `None` if
    /// nothing was pending. Read and decrement are a single atomic step, so a
    /// completion raised concurrently is either included or left pending.
    pub(crate) fn consume(&self) -> Option<u32> {
        self.pending
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| n.checked_sub(1))
            .ok()
    }

    /// Drop any stale completions left over from a previous stream.
    pub(crate) fn clear(&self) {
        self.pending.store(0, Ordering::Release);
    }
}

impl Default for CompletionSignal {
    fn default() -> Self {
        Self::new()
    }
}
