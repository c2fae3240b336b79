//! hotelsim runner.
//!
//! Wires the simulation core to production collaborators:
//! - `SystemEnv` for wall-clock days and OS randomness
//! - `TracingSink` for structured event output
//! - Tokio for the multi-threaded client tasks
//!
//! ## Architecture
//!
//! ```text
//! hotelsim-cli
//!   ├─ Args (clap)        → RuntimeConfig
//!   ├─ SystemEnv          (production Environment impl)
//!   └─ Simulation         (hotelsim-core driver)
//!        └─ TracingSink   (events → tracing)
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

mod error;
mod system_env;

pub use error::CliError;
use hotelsim_core::{HotelConfig, Simulation, SimulationReport, TracingSink};
pub use system_env::SystemEnv;

/// Everything a single run needs.
#[derive(Debug, Clone)]
pub struct RuntimeConfig {
    /// Number of clients to simulate
    pub client_count: usize,
    /// Hotel layout, prices and timing
    pub hotel: HotelConfig,
}

impl Default for RuntimeConfig {
    fn default() -> Self {
        Self { client_count: 10, hotel: HotelConfig::default() }
    }
}

/// Run the simulation with production collaborators.
///
/// Returns once every client has left. Fails before any room exists when
/// the client count or configuration is invalid.
pub async fn run(config: RuntimeConfig) -> Result<SimulationReport, CliError> {
    let simulation = Simulation::new(config.hotel, SystemEnv::new(), TracingSink);
    let report = simulation.run(config.client_count).await?;

    tracing::info!(
        served = report.served(),
        turned_away = report.turned_away(),
        revenue = report.revenue,
        elapsed_ms = report.elapsed.as_millis() as u64,
        "simulation finished"
    );

    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn reference_hotel_run_balances() {
        let report = run(RuntimeConfig::default()).await.unwrap();

        assert_eq!(report.outcomes.len(), 10);
        assert_eq!(report.served() + report.turned_away(), 10);
        assert_eq!(report.revenue, report.billed());
    }

    #[tokio::test(start_paused = true)]
    async fn too_few_clients_is_rejected() {
        let config = RuntimeConfig { client_count: 4, ..RuntimeConfig::default() };
        let err = run(config).await.unwrap_err();

        assert!(matches!(err, CliError::InvalidArgument(_)));
    }

    #[tokio::test(start_paused = true)]
    async fn too_many_clients_is_rejected() {
        let config = RuntimeConfig { client_count: 51, ..RuntimeConfig::default() };
        let err = run(config).await.unwrap_err();

        assert!(matches!(err, CliError::InvalidArgument(_)));
    }
}
