//! ffdashd - Fantasy league dashboard daemon
//!
//! Loads the league workbook into an in-memory store and serves the JSON API
//! and the static dashboard.
//!
//! Usage:
//!   ffdashd [--config <file>] [--port <n>] [--bind <addr>]
//!           [--seed <file> | --no-seed] [--public-dir <dir>]
//!
//! A missing or unreadable seed workbook is not fatal; the server starts
//! empty and data can be uploaded through `POST /api/upload`.

mod config;

use std::sync::Arc;

use clap::Parser;
use ffdash_api::{create_router, AppState};
use ffdash_core::{ingest, Store};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::config::{Args, Settings};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                "ffdashd=info,ffdash_api=info,ffdash_core=info,tower_http=info".into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting ffdashd (fantasy league dashboard)");

    let args = Args::parse();
    if let Some(ref path) = args.config {
        tracing::info!("Loading config from: {}", path.display());
    }
    let settings = Settings::resolve(&args)?;

    // Schema creation failure is fatal
    let store = Arc::new(Store::open_in_memory()?);

    match settings.seed_file {
        Some(ref path) => {
            if let Some(summary) = ingest::seed_from_file(&store, path) {
                tracing::info!(
                    weekly_results = summary.weekly_results,
                    coach_lookup = summary.coach_lookup,
                    "Seeded store from {}",
                    path.display()
                );
            }
        }
        None => tracing::info!("Seeding disabled, starting with an empty store"),
    }

    let mut state = AppState::new(store).with_upload_limit(settings.upload_limit);
    if settings.public_dir.is_dir() {
        tracing::info!("Serving dashboard from {}", settings.public_dir.display());
        state = state.with_public_dir(&settings.public_dir);
    } else {
        tracing::warn!(
            "Public directory not found: {}",
            settings.public_dir.display()
        );
    }

    let app = create_router(state);

    tracing::info!("Listening on http://{}", settings.addr);

    // Run the server
    let listener = tokio::net::TcpListener::bind(settings.addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
