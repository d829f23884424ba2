//! Logging for Verdict
//!
//! Installs the global `tracing` subscriber and offers an in-memory capture
//! layer for asserting on emitted events.

#![allow(clippy::must_use_candidate)]

pub mod capture;

use tracing_subscriber::{EnvFilter, Layer, layer::SubscriberExt, util::SubscriberInitExt};
use verdict_config::{LogFormat, TelemetryConfig};

/// Initialize logging from configuration
///
/// Sets up a `tracing-subscriber` registry with an `EnvFilter` built from
/// the configured directive and a text or JSON formatting layer.
///
/// # Errors
///
/// Returns an error if the filter directive is invalid or a global
/// subscriber is already installed
pub fn init(config: &TelemetryConfig) -> anyhow::Result<()> {
    let filter = EnvFilter::try_new(&config.log_filter)
        .map_err(|e| anyhow::anyhow!("invalid log filter `{}`: {e}", config.log_filter))?;

    let fmt_layer = match config.format {
        LogFormat::Text => tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(false)
            .with_file(false)
            .with_line_number(false)
            .boxed(),
        LogFormat::Json => tracing_subscriber::fmt::layer()
            .json()
            .with_target(true)
            .with_current_span(true)
            .boxed(),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("failed to install log subscriber: {e}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_invalid_filter() {
        let config = TelemetryConfig {
            log_filter: "verdict=loud".to_string(),
            format: LogFormat::Text,
        };

        let error = init(&config).unwrap_err();
        assert!(error.to_string().contains("invalid log filter"), "{error}");
    }

    #[test]
    fn second_init_fails() {
        let config = TelemetryConfig {
            format: LogFormat::Json,
            ..TelemetryConfig::default()
        };

        // Only the first installation in this process can succeed.
        let _ = init(&config);

        assert!(init(&config).is_err());
    }
}
