//! Movie Service
//!
//! An HTTP service managing a single in-memory collection of movie records.
//!
//! # Architecture Overview
//!
//! ```text
//!     Client Request
//!     ──────────────▶  http::server  ──▶  http::handlers  ──▶  movies::MovieStore
//!                      (middleware)        (decode/encode)      (RwLock<Vec<Movie>>)
//!     Client Response
//!     ◀──────────────  http::response ◀── MovieError / Movie
//!
//!     Cross-cutting: config (TOML), observability (tracing, metrics), lifecycle (shutdown)
//! ```
//!
//! Records live only in process memory and are lost on exit.

use std::path::PathBuf;

use clap::Parser;
use movie_service::config::{load_config, ServiceConfig};
use movie_service::http::HttpServer;
use movie_service::lifecycle::Shutdown;
use movie_service::observability::{logging, metrics};
use tokio::net::TcpListener;

#[derive(Parser)]
#[command(name = "movie-service")]
#[command(about = "In-memory movie record HTTP service", long_about = None)]
struct Cli {
    /// Path to a TOML configuration file. Defaults apply when omitted.
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

    logging::init_logging(&config.observability);

    tracing::info!("movie-service v{} starting", env!("CARGO_PKG_VERSION"));
    tracing::info!(
        config_file = ?cli.config,
        bind_address = %config.listener.bind_address,
        request_timeout_secs = config.timeouts.request_secs,
        seed = config.store.seed,
        "Configuration loaded"
    );

    if config.observability.metrics_enabled {
        metrics::init_metrics(config.observability.metrics_address.parse()?)?;
    }

    let listener = TcpListener::bind(&config.listener.bind_address).await?;
    tracing::info!(address = %listener.local_addr()?, "Listening for connections");

    let shutdown = Shutdown::new();
    let server = HttpServer::new(config);
    server.run(listener, shutdown.subscribe()).await?;

    tracing::info!("Shutdown complete");
    Ok(())
}
