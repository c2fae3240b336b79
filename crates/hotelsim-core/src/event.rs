//! Simulation events and the sinks that consume them.
//!
//! The core never prints. Every observable step of a client's visit becomes
//! a [`HotelEvent`] handed to an [`EventSink`]. The binary renders them with
//! [`TracingSink`]; tests record them and check invariants over the log.

use std::{fmt, sync::Arc};

use crate::room::RoomId;

/// Client number, starting at 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClientId(pub u32);

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Something that happened during the simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HotelEvent {
    /// Client walked in with a budget
    Arrived {
        /// Who arrived
        client: ClientId,
        /// Money available for the whole stay
        budget: u64,
    },

    /// Client picked a room among the available ones
    RoomChosen {
        /// Who chose
        client: ClientId,
        /// Chosen room
        room: RoomId,
        /// Daily rate of the chosen room
        daily_cost: u64,
    },

    /// Client holds the room key and the room is marked occupied
    CheckedIn {
        /// Guest
        client: ClientId,
        /// Room now held
        room: RoomId,
    },

    /// One day of the stay was paid for
    DayElapsed {
        /// Guest
        client: ClientId,
        /// Room being stayed in
        room: RoomId,
        /// Day number, starting at 1
        day: u64,
        /// Budget left after paying for this day
        remaining: u64,
    },

    /// Budget no longer covers a day; the room is about to be released
    CheckedOut {
        /// Former guest
        client: ClientId,
        /// Released room
        room: RoomId,
        /// Days stayed
        days: u64,
        /// Total paid
        paid: u64,
    },

    /// Client left the hotel after a stay; the room is free again
    Departed {
        /// Former guest
        client: ClientId,
        /// Room that became free
        room: RoomId,
    },

    /// No free room was affordable, the client left without staying
    TurnedAway {
        /// Rejected client
        client: ClientId,
        /// Budget that was not enough
        budget: u64,
    },

    /// Every client task has finished
    AllClientsLeft {
        /// Number of clients that visited
        clients: usize,
    },

    /// Final income of the hotel
    RevenueReported {
        /// Total collected
        revenue: u64,
    },
}

impl HotelEvent {
    /// The client this event belongs to, if any.
    pub fn client(&self) -> Option<ClientId> {
        match self {
            Self::Arrived { client, .. }
            | Self::RoomChosen { client, .. }
            | Self::CheckedIn { client, .. }
            | Self::DayElapsed { client, .. }
            | Self::CheckedOut { client, .. }
            | Self::Departed { client, .. }
            | Self::TurnedAway { client, .. } => Some(*client),
            Self::AllClientsLeft { .. } | Self::RevenueReported { .. } => None,
        }
    }

    /// The room this event concerns, if any.
    pub fn room(&self) -> Option<RoomId> {
        match self {
            Self::RoomChosen { room, .. }
            | Self::CheckedIn { room, .. }
            | Self::DayElapsed { room, .. }
            | Self::CheckedOut { room, .. }
            | Self::Departed { room, .. } => Some(*room),
            Self::Arrived { .. }
            | Self::TurnedAway { .. }
            | Self::AllClientsLeft { .. }
            | Self::RevenueReported { .. } => None,
        }
    }
}

/// Consumer of simulation events.
///
/// Called from many client tasks at once; implementations must not block
/// for long since `CheckedIn` and `CheckedOut` are emitted while a room key
/// is held.
pub trait EventSink: Send + Sync + 'static {
    /// Handle one event.
    fn emit(&self, event: HotelEvent);
}

impl<S: EventSink + ?Sized> EventSink for Arc<S> {
    fn emit(&self, event: HotelEvent) {
        (**self).emit(event);
    }
}

/// Sink that drops every event.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl EventSink for NullSink {
    fn emit(&self, _event: HotelEvent) {}
}

/// Renders events as structured `tracing` records.
#[derive(Debug, Clone, Copy, Default)]
pub struct TracingSink;

impl EventSink for TracingSink {
    fn emit(&self, event: HotelEvent) {
        match event {
            HotelEvent::Arrived { client, budget } => {
                tracing::info!(%client, budget, "client arrived");
            },
            HotelEvent::RoomChosen { client, room, daily_cost } => {
                tracing::info!(%client, %room, daily_cost, "client chose room");
            },
            HotelEvent::CheckedIn { client, room } => {
                tracing::debug!(%client, %room, "client checked in");
            },
            HotelEvent::DayElapsed { client, room, day, remaining } => {
                tracing::info!(%client, %room, day, remaining, "day elapsed");
            },
            HotelEvent::CheckedOut { client, room, days, paid } => {
                tracing::debug!(%client, %room, days, paid, "client checked out");
            },
            HotelEvent::Departed { client, room } => {
                tracing::info!(%client, %room, "client left the hotel, room is free");
            },
            HotelEvent::TurnedAway { client, budget } => {
                tracing::info!(%client, budget, "client can't stay in this hotel");
            },
            HotelEvent::AllClientsLeft { clients } => {
                tracing::info!(clients, "all clients left the hotel");
            },
            HotelEvent::RevenueReported { revenue } => {
                tracing::info!(revenue, "hotel income");
            },
        }
    }
}
