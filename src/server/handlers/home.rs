//! Landing page handler.

use axum::{
    extract::State,
    response::{Html, IntoResponse},
};

use super::super::templates::{self, Page};
use super::super::AppState;
use crate::utils::{format_billions, format_opt_count};

/// Marker shown when the aggregate query fails.
const DB_ERROR: &str = "DB ERROR";

/// Landing page: aggregate facts plus persona and team listings.
///
/// A query failure never propagates: the page renders with "DB ERROR" facts
/// and empty listings instead.
pub async fn home_page(State(state): State<AppState>) -> impl IntoResponse {
    let (total_doses, total_cases, infection_types, countries, personas, team) =
        match state.repo.summary_stats() {
            Ok(stats) => (
                format_billions(stats.total_doses),
                format_opt_count(stats.total_cases),
                stats.infection_types.to_string(),
                stats.countries.to_string(),
                state.repo.personas().unwrap_or_else(|e| {
                    tracing::warn!("persona query failed: {}", e);
                    Vec::new()
                }),
                state.repo.team().unwrap_or_else(|e| {
                    tracing::warn!("team query failed: {}", e);
                    Vec::new()
                }),
            ),
            Err(e) => {
                tracing::warn!("summary query failed: {}", e);
                (
                    DB_ERROR.to_string(),
                    DB_ERROR.to_string(),
                    DB_ERROR.to_string(),
                    DB_ERROR.to_string(),
                    Vec::new(),
                    Vec::new(),
                )
            }
        };

    let content = templates::home_content(
        &total_doses,
        &total_cases,
        &infection_types,
        &countries,
        &personas,
        &team,
    );
    Html(templates::base_template("Home", Page::Home, &content))
}
