//! Simulation driver.
//!
//! Validates the client count, opens a fresh [`Hotel`], spawns one tokio
//! task per client, joins all of them and reports the revenue. The join is
//! the only synchronization barrier: nothing is reported until every client
//! has left.

use std::{sync::Arc, time::Duration};

use tokio::task::JoinSet;

use crate::{
    client::{ClientOutcome, ClientTask},
    config::HotelConfig,
    env::Environment,
    error::HotelError,
    event::{ClientId, EventSink, HotelEvent},
    hotel::Hotel,
    occupancy::Stay,
};

/// Result of a finished simulation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimulationReport {
    /// Total collected by the hotel
    pub revenue: u64,
    /// Outcome of every client, ordered by client id
    pub outcomes: Vec<(ClientId, ClientOutcome)>,
    /// Time from opening until the last client left, on the environment's
    /// clock
    pub elapsed: Duration,
}

impl SimulationReport {
    /// Completed stays, ordered by client id.
    pub fn stays(&self) -> impl Iterator<Item = &Stay> {
        self.outcomes.iter().filter_map(|(_, outcome)| outcome.stay())
    }

    /// Outcome of one client.
    pub fn outcome(&self, client: ClientId) -> Option<&ClientOutcome> {
        self.outcomes.iter().find(|(id, _)| *id == client).map(|(_, outcome)| outcome)
    }

    /// Number of clients that rented a room.
    pub fn served(&self) -> usize {
        self.stays().count()
    }

    /// Number of clients that left without a room.
    pub fn turned_away(&self) -> usize {
        self.outcomes.len() - self.served()
    }

    /// Revenue implied by the stays, `Σ days * daily_cost`.
    pub fn billed(&self) -> u64 {
        self.stays().map(|stay| stay.days * stay.daily_cost).sum()
    }
}

/// Drives one hotel run.
#[derive(Debug, Clone)]
pub struct Simulation<E, S> {
    config: HotelConfig,
    env: E,
    sink: S,
}

impl<E: Environment, S: EventSink + Clone> Simulation<E, S> {
    /// Driver over `config`, drawing time and randomness from `env` and
    /// reporting to `sink`.
    pub fn new(config: HotelConfig, env: E, sink: S) -> Self {
        Self { config, env, sink }
    }

    /// The configuration runs are checked against.
    pub fn config(&self) -> &HotelConfig {
        &self.config
    }

    /// Run `client_count` clients with random budgets.
    ///
    /// Fails with [`HotelError::ClientCountOutOfRange`] before any room is
    /// created when the count is outside the configured bounds.
    pub async fn run(&self, client_count: usize) -> Result<SimulationReport, HotelError> {
        self.check(client_count)?;
        tracing::info!(clients = client_count, rooms = self.config.room_count, "hotel opening");

        let started = self.env.now();
        let hotel = self.open();
        let mut tasks = JoinSet::new();
        for id in 1..=client_count {
            let task = ClientTask::new(ClientId(id as u32), Arc::clone(&hotel));
            tasks.spawn(async move {
                let id = task.id();
                (id, task.run().await)
            });
        }

        self.finish(&hotel, tasks, started).await
    }

    /// Run one client per entry of `budgets`, skipping the arrival delay.
    ///
    /// Client ids are `index + 1`. The count is checked like [`Self::run`].
    pub async fn run_with_budgets(&self, budgets: &[u64]) -> Result<SimulationReport, HotelError> {
        self.check(budgets.len())?;
        tracing::info!(clients = budgets.len(), rooms = self.config.room_count, "hotel opening");

        let started = self.env.now();
        let hotel = self.open();
        let mut tasks = JoinSet::new();
        for (index, &budget) in budgets.iter().enumerate() {
            let task = ClientTask::new(ClientId(index as u32 + 1), Arc::clone(&hotel));
            tasks.spawn(async move {
                let id = task.id();
                (id, task.visit(budget).await)
            });
        }

        self.finish(&hotel, tasks, started).await
    }

    fn check(&self, client_count: usize) -> Result<(), HotelError> {
        self.config.validate()?;

        if !self.config.client_bounds().contains(&client_count) {
            return Err(HotelError::ClientCountOutOfRange {
                count: client_count,
                min: self.config.min_clients,
                max: self.config.max_clients,
            });
        }

        Ok(())
    }

    fn open(&self) -> Arc<Hotel<E, S>> {
        Arc::new(Hotel::open(self.config.clone(), self.env.clone(), self.sink.clone()))
    }

    async fn finish(
        &self,
        hotel: &Hotel<E, S>,
        mut tasks: JoinSet<(ClientId, ClientOutcome)>,
        started: E::Instant,
    ) -> Result<SimulationReport, HotelError> {
        let mut outcomes = Vec::with_capacity(tasks.len());
        while let Some(joined) = tasks.join_next().await {
            outcomes.push(joined?);
        }
        outcomes.sort_by_key(|(id, _)| *id);

        let revenue = hotel.revenue().total();
        let elapsed = self.env.now() - started;
        self.sink.emit(HotelEvent::AllClientsLeft { clients: outcomes.len() });
        self.sink.emit(HotelEvent::RevenueReported { revenue });

        Ok(SimulationReport { revenue, outcomes, elapsed })
    }
}
