mod config;
mod errors;
mod layout;
mod models;
mod render;
mod report;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::layout::a4_geometry;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting photo report API v{}", env!("CARGO_PKG_VERSION"));

    // A4 portrait, 15mm side margins, two-column photo grid
    let geometry = a4_geometry();
    info!(
        "Page geometry: {}x{}mm, cell {:.3}x{:.3}mm",
        geometry.page_width_mm,
        geometry.page_height_mm,
        geometry.cell_width_mm(),
        geometry.cell_height_mm()
    );
    info!(
        "Default header '{}', body limit {} bytes",
        config.default_header_text, config.max_body_bytes
    );

    let state = AppState {
        config: config.clone(),
        geometry,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: restrict origins once the web client has a fixed host

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
