//! Vaccination filter report handler.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
};
use serde::Deserialize;

use super::super::templates::{self, Page};
use super::super::AppState;
use crate::filters::VaccinationFilter;

/// Query params for the vaccination report.
#[derive(Debug, Deserialize)]
pub struct VaccinationParams {
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub region: String,
    #[serde(default)]
    pub antigen: String,
    #[serde(default)]
    pub year: String,
}

/// Vaccination coverage report with optional AND-combined filters.
pub async fn vaccination_page(
    State(state): State<AppState>,
    Query(params): Query<VaccinationParams>,
) -> impl IntoResponse {
    let filter = VaccinationFilter::from_input(
        &params.country,
        &params.region,
        &params.antigen,
        &params.year,
    );

    let records = state.repo.vaccinations(&filter).unwrap_or_else(|e| {
        tracing::warn!("vaccination query failed: {}", e);
        Vec::new()
    });

    let content = templates::vaccination_content(&filter, &records);
    Html(templates::base_template(
        "Vaccination Data",
        Page::Vaccination,
        &content,
    ))
}
