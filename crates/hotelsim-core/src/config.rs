//! Hotel configuration.
//!
//! Defaults describe the reference hotel: 25 rooms in three price tiers,
//! budgets up to 18000, two-second days and between 5 and 50 clients.

use std::time::Duration;

use crate::error::ConfigError;

/// Maps room indices to daily rates.
///
/// `boundaries` are ascending room indices where the next tier starts, so
/// `prices.len()` must be `boundaries.len() + 1`. With boundaries `[10, 20]`
/// and prices `[2000, 4000, 6000]`, indices 0..10 cost 2000, 10..20 cost
/// 4000 and the rest cost 6000.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PriceSchedule {
    /// Index at which each subsequent tier starts.
    pub boundaries: Vec<usize>,
    /// Daily rate of each tier, cheapest tier first.
    pub prices: Vec<u64>,
}

impl PriceSchedule {
    /// Schedule with explicit tier boundaries and prices.
    pub fn new(boundaries: Vec<usize>, prices: Vec<u64>) -> Self {
        Self { boundaries, prices }
    }

    /// A single tier: every room costs `price`.
    pub fn flat(price: u64) -> Self {
        Self { boundaries: Vec::new(), prices: vec![price] }
    }

    /// Daily rate for the room at `index` (zero-based).
    pub fn price_for(&self, index: usize) -> u64 {
        let tier = self.boundaries.iter().take_while(|&&start| start <= index).count();
        self.prices.get(tier).or_else(|| self.prices.last()).copied().unwrap_or_default()
    }

    /// Lowest rate in the schedule.
    pub fn cheapest(&self) -> Option<u64> {
        self.prices.iter().copied().min()
    }

    fn validate(&self) -> Result<(), ConfigError> {
        if self.prices.len() != self.boundaries.len() + 1 {
            return Err(ConfigError::TierMismatch {
                boundaries: self.boundaries.len(),
                prices: self.prices.len(),
            });
        }

        if self.boundaries.windows(2).any(|pair| pair[0] >= pair[1]) {
            return Err(ConfigError::UnsortedBoundaries(self.boundaries.clone()));
        }

        if let Some(tier) = self.prices.iter().position(|&price| price == 0) {
            return Err(ConfigError::ZeroPrice { tier });
        }

        Ok(())
    }
}

impl Default for PriceSchedule {
    fn default() -> Self {
        Self { boundaries: vec![10, 20], prices: vec![2000, 4000, 6000] }
    }
}

/// Simulation configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HotelConfig {
    /// Number of rooms in the registry
    pub room_count: usize,
    /// Daily rate per room index
    pub prices: PriceSchedule,
    /// Upper bound (inclusive) of a randomly drawn client budget
    pub max_client_budget: u64,
    /// Wall time that stands in for one rented day
    pub day_duration: Duration,
    /// Delay before a client looks for a room
    pub arrival_delay: Duration,
    /// Smallest accepted client count
    pub min_clients: usize,
    /// Largest accepted client count
    pub max_clients: usize,
}

impl Default for HotelConfig {
    fn default() -> Self {
        Self {
            room_count: 25,
            prices: PriceSchedule::default(),
            max_client_budget: 18_000,
            day_duration: Duration::from_secs(2),
            arrival_delay: Duration::from_secs(1),
            min_clients: 5,
            max_clients: 50,
        }
    }
}

impl HotelConfig {
    /// Check the configuration before any room is created.
    ///
    /// A zero price would keep a client in its room forever, so it is
    /// rejected here rather than in the billing loop.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.room_count == 0 {
            return Err(ConfigError::NoRooms);
        }

        if self.min_clients > self.max_clients {
            return Err(ConfigError::ClientBounds { min: self.min_clients, max: self.max_clients });
        }

        self.prices.validate()
    }

    /// Inclusive client count bounds.
    pub fn client_bounds(&self) -> std::ops::RangeInclusive<usize> {
        self.min_clients..=self.max_clients
    }
}
