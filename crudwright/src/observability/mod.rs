//! Logging setup
//!
//! Library code only emits `tracing` events; binaries call [`init`] once to
//! install a subscriber writing to stderr.

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, util::TryInitError, EnvFilter};

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LogFormat {
    /// Compact human-readable lines
    #[default]
    Compact,
    /// One JSON object per event
    Json,
}

/// Default filter directive for a `-v` count
#[must_use]
pub const fn directive_for(verbosity: u8) -> &'static str {
    match verbosity {
        0 => "warn",
        1 => "info,crudwright=debug",
        _ => "debug,crudwright=trace",
    }
}

/// Install the global subscriber
///
/// `RUST_LOG` wins over the verbosity-derived filter.
///
/// # Example
///
/// ```rust,no_run
/// use crudwright::observability::{self, LogFormat};
///
/// observability::init(1, LogFormat::Compact).ok();
/// tracing::info!("Generator started");
/// ```
///
/// # Errors
///
/// Returns an error when a global subscriber is already installed.
pub fn init(verbosity: u8, format: LogFormat) -> Result<(), TryInitError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(directive_for(verbosity)));

    let registry = tracing_subscriber::registry().with(env_filter);
    match format {
        LogFormat::Compact => registry
            .with(
                tracing_subscriber::fmt::layer()
                    .compact()
                    .with_target(false)
                    .with_writer(std::io::stderr),
            )
            .try_init(),
        LogFormat::Json => registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .try_init(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_directive_for_verbosity() {
        assert_eq!(directive_for(0), "warn");
        assert_eq!(directive_for(1), "info,crudwright=debug");
        assert_eq!(directive_for(5), "debug,crudwright=trace");
    }

    #[test]
    fn test_directives_parse() {
        for verbosity in 0..3 {
            assert!(EnvFilter::try_new(directive_for(verbosity)).is_ok());
        }
    }
}
