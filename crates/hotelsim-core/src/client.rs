//! Client task.
//!
//! A client arrives, draws a budget, looks at the rooms it can afford and
//! either rents one picked at random or leaves. There is no retry: a client
//! that finds nothing is turned away for good.

use std::sync::Arc;

use crate::{
    env::Environment,
    event::{ClientId, EventSink, HotelEvent},
    hotel::Hotel,
    occupancy::Stay,
};

/// How a client's visit ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClientOutcome {
    /// The client rented a room until the budget ran out
    Stayed(Stay),
    /// No free room was affordable
    TurnedAway {
        /// Budget the client arrived with
        budget: u64,
    },
}

impl ClientOutcome {
    /// The stay, if the client got a room.
    pub fn stay(&self) -> Option<&Stay> {
        match self {
            Self::Stayed(stay) => Some(stay),
            Self::TurnedAway { .. } => None,
        }
    }

    /// Budget the client arrived with.
    pub fn budget(&self) -> u64 {
        match self {
            Self::Stayed(stay) => stay.budget,
            Self::TurnedAway { budget } => *budget,
        }
    }
}

/// One client's visit to the hotel.
pub struct ClientTask<E, S> {
    id: ClientId,
    hotel: Arc<Hotel<E, S>>,
}

impl<E: Environment, S: EventSink> ClientTask<E, S> {
    /// A client bound to `hotel`.
    pub fn new(id: ClientId, hotel: Arc<Hotel<E, S>>) -> Self {
        Self { id, hotel }
    }

    /// Client number.
    pub fn id(&self) -> ClientId {
        self.id
    }

    /// Arrive after the configured delay with a random budget in
    /// `0..=max_client_budget`, then visit.
    pub async fn run(self) -> ClientOutcome {
        let config = self.hotel.config();
        self.hotel.env().sleep(config.arrival_delay).await;

        let budget = self.hotel.env().random_inclusive(config.max_client_budget);
        self.visit(budget).await
    }

    /// Look for a room with a known budget and stay if one is available.
    pub async fn visit(self, budget: u64) -> ClientOutcome {
        let hotel = &*self.hotel;
        let client = self.id;
        hotel.sink().emit(HotelEvent::Arrived { client, budget });

        let candidates = hotel.available_rooms(budget);
        if candidates.is_empty() {
            hotel.sink().emit(HotelEvent::TurnedAway { client, budget });
            return ClientOutcome::TurnedAway { budget };
        }

        let pick = hotel.env().random_below(candidates.len() as u64) as usize;
        let room = candidates[pick];
        hotel.sink().emit(HotelEvent::RoomChosen {
            client,
            room: room.id(),
            daily_cost: room.daily_cost(),
        });

        let stay = hotel.occupancy().occupy(client, room, budget).await;
        hotel.sink().emit(HotelEvent::Departed { client, room: stay.room });

        ClientOutcome::Stayed(stay)
    }
}
