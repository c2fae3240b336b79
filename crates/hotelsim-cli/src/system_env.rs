//! Production Environment implementation using system time and RNG.
//!
//! `SystemEnv` uses real system time, tokio sleeps (a simulated day really
//! takes `day_duration` of wall time) and OS randomness for budgets and room
//! picks. Runs are not reproducible.

use std::time::Duration;

use hotelsim_core::Environment;

/// Production environment using system time and OS randomness.
///
/// # Panics
///
/// Panics if the OS RNG fails. RNG failure is extremely rare (indicates
/// OS-level issues) and a simulation without randomness is meaningless.
#[derive(Debug, Clone, Default)]
pub struct SystemEnv;

impl SystemEnv {
    /// Create a new system environment.
    #[must_use]
    pub fn new() -> Self {
        Self
    }
}

impl Environment for SystemEnv {
    type Instant = std::time::Instant;

    #[allow(clippy::disallowed_methods)]
    fn now(&self) -> Self::Instant {
        std::time::Instant::now()
    }

    fn sleep(&self, duration: Duration) -> impl std::future::Future<Output = ()> + Send {
        tokio::time::sleep(duration)
    }

    #[allow(clippy::expect_used)]
    fn random_bytes(&self, buffer: &mut [u8]) {
        getrandom::fill(buffer).expect("invariant: OS RNG failure is unrecoverable");
    }
}
