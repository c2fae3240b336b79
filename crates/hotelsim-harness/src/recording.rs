//! Event sink that keeps every event in emission order.
//!
//! Events are appended under one lock, so the log order is the order in
//! which client tasks emitted them. Because `CheckedIn` is emitted after a
//! room key is taken and `CheckedOut` before it is released, the log is
//! enough to reconstruct who held which room when.

use std::sync::{Arc, Mutex, PoisonError};

use hotelsim_core::{ClientId, EventSink, HotelEvent};

/// Shared, cloneable event recorder.
#[derive(Debug, Clone, Default)]
pub struct RecordingSink {
    events: Arc<Mutex<Vec<HotelEvent>>>,
}

impl RecordingSink {
    /// Empty recorder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of every event recorded so far.
    pub fn events(&self) -> Vec<HotelEvent> {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clone()
    }

    /// Events that belong to `client`, in order.
    pub fn events_for(&self, client: ClientId) -> Vec<HotelEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|event| event.client() == Some(client))
            .cloned()
            .collect()
    }

    /// Number of recorded events.
    pub fn len(&self) -> usize {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).len()
    }

    /// Whether nothing was recorded.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drop all recorded events.
    pub fn clear(&self) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).clear();
    }
}

impl EventSink for RecordingSink {
    fn emit(&self, event: HotelEvent) {
        self.events.lock().unwrap_or_else(PoisonError::into_inner).push(event);
    }
}
