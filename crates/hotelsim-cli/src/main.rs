//! hotelsim binary.
//!
//! # Usage
//!
//! ```bash
//! # Reference hotel: 25 rooms, two-second days
//! hotelsim 12
//!
//! # Faster days, verbose output
//! hotelsim 30 --day-ms 200 --arrival-ms 100 --log-level debug
//! ```

use std::{process::ExitCode, time::Duration};

use clap::Parser;
use hotelsim_cli::{RuntimeConfig, run};
use hotelsim_core::HotelConfig;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Concurrent hotel room contention simulation
#[derive(Parser, Debug)]
#[command(name = "hotelsim")]
#[command(about = "Simulate clients competing for hotel rooms")]
#[command(version)]
struct Args {
    /// Number of clients (5 to 50)
    client_count: usize,

    /// Wall time of one rented day, in milliseconds
    #[arg(long, default_value = "2000")]
    day_ms: u64,

    /// Delay before each client looks for a room, in milliseconds
    #[arg(long, default_value = "1000")]
    arrival_ms: u64,

    /// Largest budget a client can arrive with
    #[arg(long, default_value = "18000")]
    max_budget: u64,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> ExitCode {
    let args = Args::parse();
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&args.log_level));

    tracing_subscriber::registry().with(fmt::layer()).with(filter).init();

    let config = args.runtime_config();
    tracing::info!("hotelsim starting with {} clients", config.client_count);

    match run(config).await {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::error!("{err}");
            ExitCode::from(err.exit_code())
        },
    }
}

impl Args {
    fn runtime_config(&self) -> RuntimeConfig {
        RuntimeConfig {
            client_count: self.client_count,
            hotel: HotelConfig {
                day_duration: Duration::from_millis(self.day_ms),
                arrival_delay: Duration::from_millis(self.arrival_ms),
                max_client_budget: self.max_budget,
                ..HotelConfig::default()
            },
        }
    }
}
