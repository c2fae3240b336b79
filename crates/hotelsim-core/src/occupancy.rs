//! Occupancy protocol.
//!
//! Acquire the room key, bill one day per simulated day while the budget
//! covers the rate, release the key. Only one client runs the billing loop
//! for a given room at any instant; the loop ends as soon as the remaining
//! budget cannot pay for another day.

use std::time::Duration;

use crate::{
    env::Environment,
    event::{ClientId, EventSink, HotelEvent},
    revenue::Revenue,
    room::{Room, RoomId},
};

/// Record of one completed stay.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stay {
    /// Guest
    pub client: ClientId,
    /// Room stayed in
    pub room: RoomId,
    /// Daily rate of the room
    pub daily_cost: u64,
    /// Budget at check-in
    pub budget: u64,
    /// Days paid for
    pub days: u64,
    /// Revenue collected, `days * daily_cost`
    pub paid: u64,
    /// Budget left at check-out, always below `daily_cost`
    pub remaining: u64,
}

/// Runs stays against a shared revenue ledger.
///
/// Holds the injected collaborators: the environment (for the day sleep),
/// the ledger and the event sink.
pub struct Occupancy<'a, E, S> {
    env: &'a E,
    revenue: &'a Revenue,
    sink: &'a S,
    day_duration: Duration,
}

impl<'a, E: Environment, S: EventSink> Occupancy<'a, E, S> {
    /// Bind the protocol to its collaborators.
    pub fn new(env: &'a E, revenue: &'a Revenue, sink: &'a S, day_duration: Duration) -> Self {
        Self { env, revenue, sink, day_duration }
    }

    /// Stay in `room` until `budget` no longer covers a day.
    ///
    /// Suspends until the room key is free. The returned [`Stay`] carries the
    /// revenue collected from this client.
    pub async fn occupy(&self, client: ClientId, room: &Room, budget: u64) -> Stay {
        let room_id = room.id();
        let daily_cost = room.daily_cost();

        if room.is_occupied() {
            tracing::debug!(%client, room = %room_id, "waiting for room key");
        }

        let key = room.acquire().await;
        self.sink.emit(HotelEvent::CheckedIn { client, room: room_id });

        let mut remaining = budget;
        let mut days = 0;
        while remaining >= daily_cost {
            self.env.sleep(self.day_duration).await;
            days += 1;
            remaining -= daily_cost;
            self.revenue.credit(daily_cost);
            self.sink.emit(HotelEvent::DayElapsed { client, room: room_id, day: days, remaining });
        }

        let paid = days * daily_cost;
        self.sink.emit(HotelEvent::CheckedOut { client, room: room_id, days, paid });
        drop(key);

        Stay { client, room: room_id, daily_cost, budget, days, paid, remaining }
    }
}
