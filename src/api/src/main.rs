//! Racing & Sports Catalog API
//!
//! JSON API and CLI for filtered, sortable race and sporting event listings.

mod cli;
mod config;
mod query;
mod routes;
mod storage;
mod types;

use clap::Parser;
use std::net::SocketAddr;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::cli::{Cli, Commands};
use crate::config::AppConfig;
use crate::routes::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::Serve { host, port } => run_server(host, port).await,
        Commands::ListRaces {
            meeting_ids,
            visible_only,
            order_by,
            format,
        } => cli::run_list_races(meeting_ids, visible_only, order_by, format),
        Commands::ListEvents {
            visible_only,
            order_by,
            format,
        } => cli::run_list_events(visible_only, order_by, format),
        Commands::GetEvent { id, format } => cli::run_get_event(id, format),
        Commands::Compile {
            entity,
            meeting_ids,
            visible_only,
            order_by,
        } => cli::run_compile(entity, meeting_ids, visible_only, order_by),
    }
}

/// Run the API server.
async fn run_server(host: Option<String>, port: Option<u16>) -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "catalog_api=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load configuration
    let mut config = AppConfig::load()?;

    // Override with CLI args
    if let Some(h) = host {
        config.server.host = h;
    }
    if let Some(p) = port {
        config.server.port = p;
    }

    tracing::info!("Configuration loaded");
    tracing::info!("Racing database: {}", config.storage.racing_db);
    tracing::info!("Sports database: {}", config.storage.sports_db);

    let races = cli::open_races(&config)?;
    let events = cli::open_events(&config)?;

    // Create application state
    let state = Arc::new(AppState { races, events });
    let app = routes::router(state);

    // Start server
    let addr = SocketAddr::new(config.server.host.parse()?, config.server.port);
    tracing::info!("Starting server on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
