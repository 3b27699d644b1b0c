//! Economic-phase infection report handler.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
};
use serde::Deserialize;

use super::super::templates::{self, Page, PhaseView};
use super::super::AppState;
use crate::filters::PhaseFilter;

/// Query params for the economic-phase report.
#[derive(Debug, Deserialize)]
pub struct EconomyParams {
    #[serde(default)]
    pub phase: String,
    #[serde(default)]
    pub inf_type: String,
    #[serde(default)]
    pub year: String,
    #[serde(default)]
    pub summary: String,
}

/// Infection cases by economic phase, in detail or summary mode. Summary
/// mode groups by (disease, phase, year) and drops the country column.
pub async fn economy_page(
    State(state): State<AppState>,
    Query(params): Query<EconomyParams>,
) -> impl IntoResponse {
    let filter = PhaseFilter::from_input(
        &params.phase,
        &params.inf_type,
        &params.year,
        &params.summary,
    );

    let content = if filter.summary {
        let rows = state.repo.phase_case_summaries(&filter).unwrap_or_else(|e| {
            tracing::warn!("phase summary query failed: {}", e);
            Vec::new()
        });
        templates::economy_content(&filter, &PhaseView::Summary(&rows))
    } else {
        let rows = state.repo.phase_cases(&filter).unwrap_or_else(|e| {
            tracing::warn!("phase detail query failed: {}", e);
            Vec::new()
        });
        templates::economy_content(&filter, &PhaseView::Detail(&rows))
    };

    Html(templates::base_template("Economy", Page::Economy, &content))
}
