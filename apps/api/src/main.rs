mod ashby;
mod config;
mod errors;
mod listings;
mod notify;
mod report;
mod routes;
mod state;
mod webhook;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::ashby::AshbyClient;
use crate::config::Config;
use crate::notify::Notifier;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(format!("tracker_api={}", &config.rust_log))),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting tracker API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the Ashby client
    let ashby = AshbyClient::new(config.ashby_api_key.clone());
    info!("Ashby client initialized");

    // Initialize the mail notifier (disabled unless fully configured)
    let notifier = Notifier::new(config.smtp.clone());
    if config.smtp.is_some() {
        info!("SMTP notifier configured");
    }
    if config.webhook_secret.is_some() {
        info!("Webhook signature verification enabled");
    }

    // Build app state
    let state = AppState {
        ashby,
        notifier,
        config: config.clone(),
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: pin to the frontend origin in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
