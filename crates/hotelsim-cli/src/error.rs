//! Runner error types.

use std::fmt;

use hotelsim_core::HotelError;

/// Errors that end a `hotelsim` run with a nonzero exit code.
#[derive(Debug)]
pub enum CliError {
    /// Invalid client count or configuration.
    ///
    /// Raised before any room exists. Fix the arguments and rerun.
    InvalidArgument(HotelError),

    /// The simulation itself failed (a client task panicked).
    ///
    /// Should never happen in correct implementation. Indicates a bug.
    Simulation(HotelError),
}

impl CliError {
    /// Process exit status for this error.
    ///
    /// Invalid arguments exit with 2, the same status clap uses for usage
    /// errors. A failed simulation exits with 1.
    pub fn exit_code(&self) -> u8 {
        match self {
            Self::InvalidArgument(_) => 2,
            Self::Simulation(_) => 1,
        }
    }
}

impl fmt::Display for CliError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidArgument(err) => write!(f, "invalid argument: {err}"),
            Self::Simulation(err) => write!(f, "simulation failed: {err}"),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::InvalidArgument(err) | Self::Simulation(err) => Some(err),
        }
    }
}

impl From<HotelError> for CliError {
    fn from(err: HotelError) -> Self {
        if err.is_invalid_argument() { Self::InvalidArgument(err) } else { Self::Simulation(err) }
    }
}

#[cfg(test)]
mod tests {
    use std::error::Error;

    use super::*;

    #[test]
    fn out_of_range_count_is_invalid_argument() {
        let err = CliError::from(HotelError::ClientCountOutOfRange { count: 4, min: 5, max: 50 });

        assert!(matches!(err, CliError::InvalidArgument(_)));
        assert_eq!(
            err.to_string(),
            "invalid argument: client count 4 is outside the accepted range 5..=50"
        );
        assert!(err.source().is_some());
        assert_eq!(err.exit_code(), 2);
    }

    #[test]
    fn task_failure_is_simulation_error() {
        let err = CliError::from(HotelError::ClientTask("panicked".to_string()));
        assert!(matches!(err, CliError::Simulation(_)));
        assert_eq!(err.exit_code(), 1);
    }
}
