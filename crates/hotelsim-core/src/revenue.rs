//! Shared revenue ledger.
//!
//! Every occupancy protocol instance credits the same ledger. Each day's
//! charge is one atomic `fetch_add`, so concurrent stays in different rooms
//! never lose an update. `Relaxed` is enough: the total is only read after
//! the driver has joined every client task, and the join orders all prior
//! writes before the read.

use std::sync::atomic::{AtomicU64, Ordering};

/// Aggregate income of the hotel.
#[derive(Debug, Default)]
pub struct Revenue {
    total: AtomicU64,
}

impl Revenue {
    /// Empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add one payment.
    pub fn credit(&self, amount: u64) {
        self.total.fetch_add(amount, Ordering::Relaxed);
    }

    /// Current total.
    pub fn total(&self) -> u64 {
        self.total.load(Ordering::Relaxed)
    }
}
