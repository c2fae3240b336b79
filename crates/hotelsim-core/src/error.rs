//! Error types for the hotel simulation.
//!
//! Only the driver can fail. A client that finds no affordable free room is
//! an ordinary outcome ([`crate::ClientOutcome::TurnedAway`]), not an error.

use thiserror::Error;

/// Errors raised by [`crate::Simulation`].
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum HotelError {
    /// Client count outside the accepted bounds
    #[error("client count {count} is outside the accepted range {min}..={max}")]
    ClientCountOutOfRange {
        /// Requested number of clients
        count: usize,
        /// Smallest accepted count
        min: usize,
        /// Largest accepted count
        max: usize,
    },

    /// Configuration rejected before the registry was built
    #[error("invalid configuration: {0}")]
    InvalidConfig(#[from] ConfigError),

    /// A client task panicked or was cancelled
    #[error("client task failed: {0}")]
    ClientTask(String),
}

impl HotelError {
    /// Returns true if the error was caused by caller-supplied arguments.
    ///
    /// These are raised before any room state exists.
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::ClientCountOutOfRange { .. } | Self::InvalidConfig(_))
    }
}

impl From<tokio::task::JoinError> for HotelError {
    fn from(err: tokio::task::JoinError) -> Self {
        Self::ClientTask(err.to_string())
    }
}

/// Reasons a [`crate::HotelConfig`] is rejected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    /// Registry would be empty
    #[error("room count must be at least 1")]
    NoRooms,

    /// Minimum client count exceeds maximum
    #[error("client bounds are inverted: min {min} > max {max}")]
    ClientBounds {
        /// Configured minimum
        min: usize,
        /// Configured maximum
        max: usize,
    },

    /// Tier prices do not line up with tier boundaries
    #[error("{prices} tier prices for {boundaries} tier boundaries (expected boundaries + 1)")]
    TierMismatch {
        /// Number of boundaries
        boundaries: usize,
        /// Number of prices
        prices: usize,
    },

    /// Tier boundaries are not strictly ascending
    #[error("tier boundaries must be strictly ascending: {0:?}")]
    UnsortedBoundaries(Vec<usize>),

    /// A tier costs nothing, so a stay would never end
    #[error("tier {tier} has a daily price of zero")]
    ZeroPrice {
        /// Index of the offending tier
        tier: usize,
    },
}
