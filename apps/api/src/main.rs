mod config;
mod convert;
mod errors;
mod models;
mod render;
mod resume;
mod routes;
mod state;

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Result;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::convert::CommandConverter;
use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first so a bad value fails before anything starts
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_CRATE_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Resume API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize the DOCX → PDF converter
    let mut converter = CommandConverter::new(
        config.converter_program.clone(),
        config.converter_args.clone(),
        config.conversion_timeout,
    );
    if let Some(root) = &config.conversion_temp_dir {
        converter = converter.with_temp_root(root);
    }
    info!(
        "Converter: {} {} (timeout {:?})",
        config.converter_program,
        config.converter_args.join(" "),
        config.conversion_timeout
    );
    info!(
        "Entry limits: work {:?}, education {:?}",
        config.group_limits.work, config.group_limits.education
    );

    // Build app state
    let state = AppState {
        converter: Arc::new(converter),
        group_limits: config.group_limits,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
