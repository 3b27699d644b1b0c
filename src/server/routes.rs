//! Router configuration for the web server.

use axum::{routing::get, Router};
use tower_http::cors::CorsLayer;

use super::handlers;
use super::AppState;

/// Create the main router with all report pages.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/", get(handlers::home_page))
        .route("/vaccination", get(handlers::vaccination_page))
        .route("/infection", get(handlers::infection_page))
        .route("/analysis", get(handlers::analysis_page))
        .route("/economy", get(handlers::economy_page))
        .route("/static/style.css", get(handlers::serve_css))
        .layer(CorsLayer::permissive())
        .with_state(state)
}
