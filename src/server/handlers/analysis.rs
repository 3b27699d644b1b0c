//! Exceeding-global-rate report handler.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
};
use serde::Deserialize;

use super::super::templates::{self, AnalysisView, Page};
use super::super::AppState;
use crate::filters::RateSelection;

/// Query params for the analysis report.
#[derive(Debug, Deserialize)]
pub struct AnalysisParams {
    #[serde(default)]
    pub inf_type: String,
    #[serde(default)]
    pub year: String,
}

/// Countries whose infection rate strictly exceeds the global rate for the
/// selected (type, year). When the global rate cannot be computed, no
/// country rows are computed and a neutral "no data" state is shown.
pub async fn analysis_page(
    State(state): State<AppState>,
    Query(params): Query<AnalysisParams>,
) -> impl IntoResponse {
    let types = state.repo.infection_type_names().unwrap_or_else(|e| {
        tracing::warn!("infection type listing failed: {}", e);
        Vec::new()
    });

    let selection = RateSelection::from_input(&params.inf_type, &params.year);

    let content = match &selection {
        None => templates::analysis_content(&types, None, &AnalysisView::Prompt),
        Some(selection) => match exceeding_countries(&state, selection) {
            Some((global_rate, rows)) => templates::analysis_content(
                &types,
                Some(selection),
                &AnalysisView::Data {
                    selection,
                    global_rate,
                    rows: &rows,
                },
            ),
            None => templates::analysis_content(
                &types,
                Some(selection),
                &AnalysisView::NoData { selection },
            ),
        },
    };

    Html(templates::base_template("Analysis", Page::Analysis, &content))
}

/// Compute the global baseline and the countries above it. Returns None when
/// the type is unknown, the global rate is undefined, or a query fails.
fn exceeding_countries(
    state: &AppState,
    selection: &RateSelection,
) -> Option<(f64, Vec<crate::models::ExceedingRate>)> {
    let type_id = match state.repo.infection_type_id(&selection.infection_type) {
        Ok(id) => id?,
        Err(e) => {
            tracing::warn!("infection type lookup failed: {}", e);
            return None;
        }
    };

    let global_rate = match state.repo.global_rate(type_id, selection.year) {
        Ok(rate) => rate?,
        Err(e) => {
            tracing::warn!("global rate query failed: {}", e);
            return None;
        }
    };

    match state
        .repo
        .countries_exceeding_rate(type_id, selection.year, global_rate)
    {
        Ok(rows) => Some((global_rate, rows)),
        Err(e) => {
            tracing::warn!("exceeding rate query failed: {}", e);
            None
        }
    }
}
