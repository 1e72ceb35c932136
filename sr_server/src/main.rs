//! Multi-room game server using an async actor model.
//!
//! Each room is a RoomActor owned by the shared RoomManager; clients talk to
//! rooms over JSON WebSocket messages.

mod api;
mod config;
mod logging;
mod metrics;

use std::sync::Arc;

use anyhow::Error;
use ctrlc::set_handler;
use pico_args::Arguments;
use spot_rush::RoomManager;
use tracing::info;

use crate::config::ServerConfig;

const HELP: &str = "\
Run a multi-room Spot Rush server

USAGE:
  sr_server [OPTIONS]

OPTIONS:
  --bind          IP:PORT    Server socket bind address   [default: env SERVER_BIND or 127.0.0.1:7171]
  --metrics-bind  IP:PORT    Prometheus scrape address    [default: env METRICS_BIND or disabled]

FLAGS:
  -h, --help                 Print help information

ENVIRONMENT:
  SERVER_BIND                Server bind address (e.g., 0.0.0.0:8080)
  METRICS_BIND               Prometheus scrape address (e.g., 127.0.0.1:9090)
  ROOM_MAX_PLAYERS           Join limit per room          [default: 8]
  ROOM_GRID_CAPACITY         Cards kept on the grid       [default: 9]
  ROOM_MATCH_REWARD          Points per accepted match    [default: 3]
  ROOM_ORDER                 Deck order (prime)           [default: 7]
";

#[tokio::main]
async fn main() -> Result<(), Error> {
    // Load .env file if it exists
    let _ = dotenvy::dotenv();

    let mut pargs = Arguments::from_env();

    // Help has a higher priority and should be handled separately.
    if pargs.contains(["-h", "--help"]) {
        print!("{HELP}");
        std::process::exit(0);
    }

    let bind_override = pargs.opt_value_from_str("--bind")?;
    let metrics_override = pargs.opt_value_from_str("--metrics-bind")?;

    // Catching signals for exit.
    set_handler(|| std::process::exit(0))?;

    logging::init();

    let config = ServerConfig::from_env(bind_override, metrics_override);
    config.validate()?;

    if let Some(addr) = config.metrics_bind {
        metrics::init_metrics(addr).map_err(|e| anyhow::anyhow!(e))?;
        info!("metrics listener on {addr}");
    }

    let settings = config.game.to_settings();
    info!(
        "room defaults: order {}, grid {}, max players {}, reward {}",
        settings.order, settings.grid_capacity, settings.max_players, settings.match_reward
    );

    let state = api::AppState {
        rooms: Arc::new(RoomManager::new(settings)),
    };
    let app = api::create_router(state);

    info!("starting HTTP/WebSocket server on {}", config.bind);
    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to bind to {}: {}", config.bind, e))?;

    info!(
        "Server is running at http://{}. Press Ctrl+C to stop.",
        config.bind
    );

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Server error: {}", e))?;

    info!("Shutting down server...");

    Ok(())
}

/// Graceful shutdown signal
async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("Failed to install CTRL+C signal handler");
}
