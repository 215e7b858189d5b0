//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (quality, upload cap)
//! - Check the bind address parses as a socket address
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: ServiceConfig → Result<(), Vec<ValidationError>>
//! - Runs before config is accepted into the system

use std::net::SocketAddr;

use thiserror::Error;

use crate::compress::Quality;
use crate::config::schema::ServiceConfig;

/// A single semantic problem found in a configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("listener.bind_address '{0}' is not a valid socket address")]
    InvalidBindAddress(String),

    #[error("compression.default_quality must be between 1 and 100, got {0}")]
    QualityOutOfRange(u8),

    #[error("compression.max_upload_bytes must be greater than zero")]
    ZeroUploadLimit,

    #[error("observability.log_level must not be empty")]
    EmptyLogLevel,
}

/// Check a configuration, collecting every error found.
pub fn validate_config(config: &ServiceConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    if config.listener.bind_address.parse::<SocketAddr>().is_err() {
        errors.push(ValidationError::InvalidBindAddress(
            config.listener.bind_address.clone(),
        ));
    }

    if Quality::new(config.compression.default_quality).is_none() {
        errors.push(ValidationError::QualityOutOfRange(
            config.compression.default_quality,
        ));
    }

    if config.compression.max_upload_bytes == 0 {
        errors.push(ValidationError::ZeroUploadLimit);
    }

    if config.observability.log_level.trim().is_empty() {
        errors.push(ValidationError::EmptyLogLevel);
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}
