//! Startup orchestration.
//!
//! # Responsibilities
//! - Resolve the configured bind address
//! - Bind the listener before any traffic is accepted
//!
//! # Design Decisions
//! - Fail fast: any startup error is fatal to the process

use std::net::SocketAddr;

use thiserror::Error;
use tokio::net::TcpListener;

use crate::config::ListenerConfig;

/// Error type for startup.
#[derive(Debug, Error)]
pub enum StartupError {
    #[error("Invalid bind address '{address}': {source}")]
    InvalidAddress {
        address: String,
        #[source]
        source: std::net::AddrParseError,
    },

    #[error("Failed to bind {address}: {source}")]
    Bind {
        address: SocketAddr,
        #[source]
        source: std::io::Error,
    },
}

/// Bind the TCP listener described by `config`.
pub async fn bind_listener(config: &ListenerConfig) -> Result<TcpListener, StartupError> {
    let address: SocketAddr =
        config
            .bind_address
            .parse()
            .map_err(|source| StartupError::InvalidAddress {
                address: config.bind_address.clone(),
                source,
            })?;

    let listener = TcpListener::bind(address)
        .await
        .map_err(|source| StartupError::Bind { address, source })?;
    let local_addr = listener
        .local_addr()
        .map_err(|source| StartupError::Bind { address, source })?;

    tracing::info!(
        address = %local_addr,
        "Server started at http://localhost:{}",
        local_addr.port()
    );

    Ok(listener)
}
