//! Environment abstraction for deterministic testing.
//!
//! Decouples the simulation from system resources (time, randomness). The
//! occupancy protocol sleeps one "day" per billing iteration and clients draw
//! their budgets at random; both go through this trait so tests can run a
//! whole hotel on a paused clock with a seeded RNG.

use std::time::Duration;

/// Abstract environment providing time, randomness, and async primitives.
///
/// # Safety
///
/// Implementations MUST guarantee:
///
/// - `now()` never goes backwards
/// - `random_bytes()` is seeded and reproducible in simulation
/// - Methods are infallible except in exceptional circumstances (e.g., OS
///   entropy exhaustion, incorrect simulation setup)
pub trait Environment: Clone + Send + Sync + 'static {
    /// The specific instant type used by this environment.
    ///
    /// Production environments use `std::time::Instant`, while simulation
    /// environments use the tokio clock so it can be paused.
    type Instant: Copy + Ord + Send + Sync + std::ops::Sub<Output = Duration>;

    /// Current time (monotonic).
    ///
    /// The driver reads it when the hotel opens and after the last client
    /// leaves to fill [`crate::SimulationReport::elapsed`].
    fn now(&self) -> Self::Instant;

    /// Sleeps for the specified duration.
    ///
    /// This is the only suspension point besides room lock acquisition.
    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send;

    /// Fills the provided buffer with random bytes.
    ///
    /// # Invariants
    ///
    /// - Given the same RNG seed, this produces the same sequence of bytes
    fn random_bytes(&self, buffer: &mut [u8]);

    /// Generates a random `u64`.
    fn random_u64(&self) -> u64 {
        let mut bytes = [0u8; 8];
        self.random_bytes(&mut bytes);
        u64::from_be_bytes(bytes)
    }

    /// Uniform value in `0..bound`. Returns 0 when `bound` is 0.
    ///
    /// Uses rejection sampling so small bounds carry no modulo bias.
    fn random_below(&self, bound: u64) -> u64 {
        if bound == 0 {
            return 0;
        }
        let zone = u64::MAX - (u64::MAX % bound);
        loop {
            let value = self.random_u64();
            if value < zone {
                return value % bound;
            }
        }
    }

    /// Uniform value in `0..=max`.
    fn random_inclusive(&self, max: u64) -> u64 {
        match max.checked_add(1) {
            Some(bound) => self.random_below(bound),
            None => self.random_u64(),
        }
    }
}
