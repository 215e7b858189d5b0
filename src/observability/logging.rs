//! Structured logging.
//!
//! # Responsibilities
//! - Initialize logging subsystem
//! - Select pretty or JSON output
//! - Resolve the log filter from `RUST_LOG` or configuration
//!
//! # Design Decisions
//! - Uses tracing crate for structured logging
//! - JSON format for production, pretty format for development
//! - `RUST_LOG` wins over the configured level

use thiserror::Error;
use tracing_subscriber::{
    filter::ParseError, fmt, layer::SubscriberExt, util::SubscriberInitExt,
    util::TryInitError, EnvFilter,
};

use crate::config::{LogFormat, ObservabilityConfig};

/// Error type for logging setup.
#[derive(Debug, Error)]
pub enum LoggingError {
    #[error("invalid log filter: {0}")]
    Filter(#[from] ParseError),

    #[error("failed to install subscriber: {0}")]
    Init(#[from] TryInitError),
}

/// Build the filter: `RUST_LOG` if set and valid, otherwise `config.log_level`.
pub fn env_filter(config: &ObservabilityConfig) -> Result<EnvFilter, ParseError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    filter_from(rust_log.as_deref(), config)
}

fn filter_from(rust_log: Option<&str>, config: &ObservabilityConfig) -> Result<EnvFilter, ParseError> {
    if let Some(directives) = rust_log.filter(|d| !d.trim().is_empty()) {
        if let Ok(filter) = EnvFilter::try_new(directives) {
            return Ok(filter);
        }
    }
    EnvFilter::try_new(&config.log_level)
}

/// Install the global subscriber. Call once, before serving.
pub fn init(config: &ObservabilityConfig) -> Result<(), LoggingError> {
    let rust_log = std::env::var(EnvFilter::DEFAULT_ENV).ok();
    init_with(rust_log.as_deref(), config)
}

fn init_with(rust_log: Option<&str>, config: &ObservabilityConfig) -> Result<(), LoggingError> {
    let filter = filter_from(rust_log, config)?;

    let pretty = (config.log_format == LogFormat::Pretty).then(|| fmt::layer());
    let json = (config.log_format == LogFormat::Json).then(|| fmt::layer().json());

    tracing_subscriber::registry()
        .with(filter)
        .with(pretty)
        .with(json)
        .try_init()?;

    Ok(())
}
