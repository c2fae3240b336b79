//! Concurrent hotel simulation.
//!
//! Clients compete for a fixed pool of priced rooms. Each room has its own
//! key; a client holding it stays one simulated day at a time until its
//! budget no longer covers the rate, paying into a shared revenue ledger.
//!
//! ## Architecture
//!
//! ```text
//! Simulation            (validate, spawn one task per client, join, report)
//!   └─ ClientTask       (arrive, draw budget, pick an available room)
//!        ├─ RoomRegistry (fixed rooms, availability query)
//!        └─ Occupancy    (acquire key → bill per day → release)
//!             ├─ Revenue      (shared atomic ledger)
//!             ├─ Environment  (day sleep, randomness)
//!             └─ EventSink    (observable events)
//! ```
//!
//! Availability is read without taking any key, so it is a hint. A client
//! that loses the race for a room waits for its key and rents it afterwards.

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod client;
mod config;
pub mod env;
mod error;
mod event;
mod hotel;
mod occupancy;
mod revenue;
mod room;
mod simulation;

pub use client::{ClientOutcome, ClientTask};
pub use config::{HotelConfig, PriceSchedule};
pub use env::Environment;
pub use error::{ConfigError, HotelError};
pub use event::{ClientId, EventSink, HotelEvent, NullSink, TracingSink};
pub use hotel::Hotel;
pub use occupancy::{Occupancy, Stay};
pub use revenue::Revenue;
pub use room::{Room, RoomId, RoomKey, RoomRegistry};
pub use simulation::{Simulation, SimulationReport};
