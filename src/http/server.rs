//! HTTP server setup and configuration.
//!
//! # Responsibilities
//! - Create Axum Router with both handlers
//! - Wire up middleware (tracing, request ID, body limit)
//! - Serve on a supplied listener until the shutdown future resolves

use std::future::Future;

use axum::{
    extract::DefaultBodyLimit,
    http::Request,
    routing::any,
    Router,
};
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::{
    request_id::{PropagateRequestIdLayer, SetRequestIdLayer},
    trace::TraceLayer,
};

use crate::compress::Quality;
use crate::config::{validate_config, ConfigError, ServiceConfig};
use crate::http::handlers;
use crate::http::request::{request_id, MakeRequestUuidV4};

/// Application state injected into handlers.
///
/// Immutable after construction; cloning is cheap.
#[derive(Debug, Clone, Copy)]
pub struct AppState {
    pub default_quality: Quality,
}

/// HTTP server for the compression service.
pub struct HttpServer {
    router: Router,
    config: ServiceConfig,
}

impl HttpServer {
    /// Create a new HTTP server with the given configuration.
    ///
    /// The configuration is validated first, so a config assembled in code
    /// gets the same checks as one loaded from a file.
    pub fn new(config: ServiceConfig) -> Result<Self, ConfigError> {
        validate_config(&config).map_err(ConfigError::Validation)?;

        // In range after validation.
        let default_quality = Quality::new(config.compression.default_quality).unwrap_or_default();

        let state = AppState { default_quality };
        let router = Self::build_router(&config, state);
        Ok(Self { router, config })
    }

    /// Build the Axum router with all middleware layers.
    fn build_router(config: &ServiceConfig, state: AppState) -> Router {
        Router::new()
            .route("/", any(handlers::health))
            .route("/compress", any(handlers::compress))
            .layer(DefaultBodyLimit::max(config.compression.max_upload_bytes))
            .with_state(state)
            .layer(
                ServiceBuilder::new()
                    .layer(SetRequestIdLayer::x_request_id(MakeRequestUuidV4))
                    .layer(TraceLayer::new_for_http().make_span_with(
                        |request: &Request<axum::body::Body>| {
                            tracing::info_span!(
                                "request",
                                method = %request.method(),
                                uri = %request.uri(),
                                request_id = %request_id(request),
                            )
                        },
                    ))
                    .layer(PropagateRequestIdLayer::x_request_id()),
            )
    }

    /// The fully layered router, for driving the service without a socket.
    pub fn router(&self) -> Router {
        self.router.clone()
    }

    /// Run the server on `listener` until `shutdown` resolves.
    ///
    /// In-flight requests are drained before this returns. Any transport
    /// error is returned to the caller, which treats it as fatal.
    pub async fn run<F>(self, listener: TcpListener, shutdown: F) -> Result<(), std::io::Error>
    where
        F: Future<Output = ()> + Send + 'static,
    {
        let addr = listener.local_addr()?;
        tracing::info!(
            address = %addr,
            default_quality = %self.config.compression.default_quality,
            max_upload_bytes = self.config.compression.max_upload_bytes,
            "HTTP server starting"
        );

        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown)
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
