//! Observable state of a finished run.
//!
//! Invariants operate on a snapshot of the recorded event log rather than on
//! live state, so every check sees the same consistent history.

use std::collections::BTreeMap;

use hotelsim_core::{ClientId, HotelEvent, RoomId};

/// Recorded history of one simulation run.
#[derive(Debug, Clone, Default)]
pub struct RunSnapshot {
    /// Every event, in emission order.
    pub events: Vec<HotelEvent>,
}

impl RunSnapshot {
    /// Snapshot with no events.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Snapshot of a recorded event log.
    pub fn from_events(events: Vec<HotelEvent>) -> Self {
        Self { events }
    }

    /// Events grouped per client, each group in emission order.
    pub fn by_client(&self) -> BTreeMap<ClientId, Vec<&HotelEvent>> {
        let mut grouped: BTreeMap<ClientId, Vec<&HotelEvent>> = BTreeMap::new();
        for event in &self.events {
            if let Some(client) = event.client() {
                grouped.entry(client).or_default().push(event);
            }
        }
        grouped
    }

    /// Check-in and check-out events grouped per room, in emission order.
    pub fn holds_by_room(&self) -> BTreeMap<RoomId, Vec<&HotelEvent>> {
        let mut grouped: BTreeMap<RoomId, Vec<&HotelEvent>> = BTreeMap::new();
        for event in &self.events {
            if let HotelEvent::CheckedIn { room, .. } | HotelEvent::CheckedOut { room, .. } = event {
                grouped.entry(*room).or_default().push(event);
            }
        }
        grouped
    }

    /// Revenue the driver reported, if the run finished.
    pub fn reported_revenue(&self) -> Option<u64> {
        self.events.iter().rev().find_map(|event| match event {
            HotelEvent::RevenueReported { revenue } => Some(*revenue),
            _ => None,
        })
    }

    /// Total paid across all check-outs.
    pub fn paid_total(&self) -> u64 {
        self.events
            .iter()
            .map(|event| match event {
                HotelEvent::CheckedOut { paid, .. } => *paid,
                _ => 0,
            })
            .sum()
    }
}
