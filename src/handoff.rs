//! Hand-off of finished results from the background worker to the consumer
//!
//! Refreshes run off the main loop and may overlap or finish out of order.
//! Only the newest result matters: a result older than one already published
//! is dropped, and the consumer always takes the latest pending one.

use std::sync::{Mutex, MutexGuard};

struct Slot<T> {
    /// Generation of the newest value ever published
    generation: Option<u64>,
    pending: Option<T>,
}

/// Last-result-wins mailbox between a producer and a single consumer
pub struct LatestResult<T> {
    slot: Mutex<Slot<T>>,
}

impl<T> Default for LatestResult<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> LatestResult<T> {
    pub fn new() -> Self {
        Self { slot: Mutex::new(Slot { generation: None, pending: None }) }
    }

    fn lock(&self) -> MutexGuard<'_, Slot<T>> {
        // Slot updates cannot leave it half-written, so a poisoned lock is still usable
        self.slot.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Offer a result computed for refresh `generation`
    ///
    /// Returns `false` (and drops `value`) when a result from a newer or equal
    /// generation was already published.
    pub fn publish(&self, generation: u64, value: T) -> bool {
        let mut slot = self.lock();
        if slot.generation.map_or(false, |current| generation <= current) {
            return false;
        }
        slot.generation = Some(generation);
        slot.pending = Some(value);
        true
    }

    /// Take the newest unconsumed result, with its generation
    pub fn take(&self) -> Option<(u64, T)> {
        let mut slot = self.lock();
        let value = slot.pending.take()?;
        slot.generation.map(|generation| (generation, value))
    }

    /// Generation of the newest result ever published
    pub fn generation(&self) -> Option<u64> {
        self.lock().generation
    }
}
