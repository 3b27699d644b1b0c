//! Static asset handlers.

use axum::{http::header, response::IntoResponse};

use super::super::assets;

/// Serve the stylesheet.
pub async fn serve_css() -> impl IntoResponse {
    ([(header::CONTENT_TYPE, "text/css")], assets::CSS)
}
