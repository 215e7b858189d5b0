use std::path::PathBuf;

use clap::Parser;

use image_compressor::config::{load_config, ServiceConfig};
use image_compressor::lifecycle::{bind_listener, signals, Shutdown};
use image_compressor::observability::logging;
use image_compressor::HttpServer;

#[derive(Parser)]
#[command(name = "image-compressor")]
#[command(about = "HTTP service that recompresses uploaded images as JPEG", long_about = None)]
#[command(version)]
struct Cli {
    /// Optional TOML configuration file; built-in defaults are used without it.
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();

    let config = match &cli.config {
        Some(path) => load_config(path)?,
        None => ServiceConfig::default(),
    };

    logging::init(&config.observability)?;

    tracing::info!("image-compressor v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?cli.config,
        bind_address = %config.listener.bind_address,
        default_quality = config.compression.default_quality,
        max_upload_bytes = config.compression.max_upload_bytes,
        "Configuration loaded"
    );

    let listener = bind_listener(&config.listener).await.map_err(|e| {
        tracing::error!(error = %e, "Listener failed");
        e
    })?;

    let shutdown = Shutdown::new();
    let trigger = shutdown.clone();
    tokio::spawn(async move {
        signals::shutdown_signal().await;
        trigger.trigger();
    });

    let server = HttpServer::new(config)?;
    if let Err(e) = server.run(listener, shutdown.signalled()).await {
        tracing::error!(error = %e, "Server failed");
        return Err(e.into());
    }

    tracing::info!("Shutdown complete");
    Ok(())
}
