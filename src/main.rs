use anyhow::{Context, Result};
use std::path::Path;
use std::sync::Arc;
use tracing::info;
use vibetown::api::create_api_router;
use vibetown::config::{load_config, VibeTownConfig};
use vibetown::world::RoomWorldState;

const DEFAULT_CONFIG_PATH: &str = "vibetown.toml";

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing subscriber
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "vibetown=info".into()),
        )
        .init();

    info!("VibeTown starting...");

    let mut config = match std::env::var("VIBETOWN_CONFIG") {
        Ok(path) => load_config(&path)?,
        Err(_) if Path::new(DEFAULT_CONFIG_PATH).exists() => load_config(DEFAULT_CONFIG_PATH)?,
        Err(_) => {
            info!("No config file found, using defaults");
            VibeTownConfig::default()
        }
    };

    if let Ok(addr) = std::env::var("VIBETOWN_BIND_ADDR") {
        config.api.bind_addr = addr;
    }

    // One world per process; routers share it by handle
    let world = Arc::new(RoomWorldState::from_config(&config.world));
    let app = create_api_router(world);

    let listener = tokio::net::TcpListener::bind(&config.api.bind_addr)
        .await
        .with_context(|| format!("Failed to bind {}", config.api.bind_addr))?;

    info!(addr = %config.api.bind_addr, "HTTP API listening");

    axum::serve(listener, app)
        .await
        .context("HTTP server error")?;

    Ok(())
}
