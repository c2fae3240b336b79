//! Shared state of one simulation run.
//!
//! A [`Hotel`] owns the room registry and revenue ledger for a single run
//! and carries the injected environment and event sink. The driver builds it
//! after validating its inputs and hands an `Arc` to every client task.

use crate::{
    config::HotelConfig,
    env::Environment,
    event::EventSink,
    occupancy::Occupancy,
    revenue::Revenue,
    room::{Room, RoomRegistry},
};

/// Rooms, ledger and collaborators shared by all client tasks.
#[derive(Debug)]
pub struct Hotel<E, S> {
    config: HotelConfig,
    registry: RoomRegistry,
    revenue: Revenue,
    env: E,
    sink: S,
}

impl<E: Environment, S: EventSink> Hotel<E, S> {
    /// Build the registry described by `config`.
    ///
    /// `config` must already be validated.
    pub fn open(config: HotelConfig, env: E, sink: S) -> Self {
        let registry = RoomRegistry::initialize(config.room_count, &config.prices);
        Self { config, registry, revenue: Revenue::new(), env, sink }
    }

    /// Configuration this hotel was opened with.
    pub fn config(&self) -> &HotelConfig {
        &self.config
    }

    /// The room registry.
    pub fn registry(&self) -> &RoomRegistry {
        &self.registry
    }

    /// The revenue ledger.
    pub fn revenue(&self) -> &Revenue {
        &self.revenue
    }

    /// The injected environment.
    pub fn env(&self) -> &E {
        &self.env
    }

    /// The injected event sink.
    pub fn sink(&self) -> &S {
        &self.sink
    }

    /// Rooms a client with `budget` could rent right now.
    pub fn available_rooms(&self, budget: u64) -> Vec<&Room> {
        self.registry.available_rooms(budget)
    }

    /// Occupancy protocol bound to this hotel's ledger, sink and day length.
    pub fn occupancy(&self) -> Occupancy<'_, E, S> {
        Occupancy::new(&self.env, &self.revenue, &self.sink, self.config.day_duration)
    }
}
