//! ffdash-api - JSON API for the fantasy league dashboard
//!
//! Serves the league aggregates computed by `ffdash-core`, accepts workbook
//! uploads that replace the store contents, and serves the static dashboard.
//!
//! # Usage
//!
//! ```ignore
//! use std::sync::Arc;
//! use ffdash_api::{create_router, AppState};
//! use ffdash_core::Store;
//!
//! let store = Arc::new(Store::open_in_memory()?);
//! let state = AppState::new(store).with_public_dir("public");
//! let router = create_router(state);
//! ```

pub mod error;
pub mod handlers;
pub mod state;

pub use error::ApiError;
pub use state::AppState;

use axum::extract::DefaultBodyLimit;
use axum::routing::{get, post};
use axum::Router;
use tower::ServiceBuilder;
use tower_http::cors::{Any, CorsLayer};
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;

/// Create the dashboard router with the given application state
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let upload_limit = state.upload_limit();
    let public_dir = state.public_dir().map(|dir| dir.to_path_buf());

    let router = Router::new()
        // Health check
        .route("/health", get(handlers::health::health))
        // League aggregates
        .route("/api/standings", get(handlers::stats::standings))
        .route("/api/head-to-head", get(handlers::stats::head_to_head))
        .route(
            "/api/weekly-performance",
            get(handlers::stats::weekly_performance),
        )
        .route("/api/yearly-summary", get(handlers::stats::yearly_summary))
        // Distinct values for the dashboard filters
        .route("/api/coaches", get(handlers::stats::coaches))
        .route("/api/years", get(handlers::stats::years))
        .route("/api/coach-lookup", get(handlers::stats::coach_lookup))
        // Workbook upload
        .route(
            "/api/upload",
            post(handlers::upload::upload_workbook).layer(DefaultBodyLimit::max(upload_limit)),
        );

    // Dashboard page and assets
    let router = match public_dir {
        Some(dir) => router.fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(cors),
        )
        .with_state(state)
}
