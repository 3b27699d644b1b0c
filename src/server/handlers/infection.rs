//! Per-country infection rate report handler.

use axum::{
    extract::{Query, State},
    response::{Html, IntoResponse},
};
use serde::Deserialize;

use super::super::templates::{self, Page, RateView};
use super::super::AppState;
use crate::filters::RateSelection;

/// Query params for the infection rate report.
#[derive(Debug, Deserialize)]
pub struct InfectionParams {
    #[serde(default)]
    pub inf_type: String,
    #[serde(default)]
    pub year: String,
}

/// Infection rate report: global and per-country rates for one
/// (infection type, year) selection. Incomplete input renders a prompt
/// without querying.
pub async fn infection_page(
    State(state): State<AppState>,
    Query(params): Query<InfectionParams>,
) -> impl IntoResponse {
    let types = state.repo.infection_type_names().unwrap_or_else(|e| {
        tracing::warn!("infection type listing failed: {}", e);
        Vec::new()
    });

    let selection = RateSelection::from_input(&params.inf_type, &params.year);

    let content = match &selection {
        None => templates::infection_content(&types, None, &RateView::Prompt),
        Some(selection) => {
            let view = build_rate_view(&state, selection);
            match view {
                Some((global_rate, rows)) => templates::infection_content(
                    &types,
                    Some(selection),
                    &RateView::Data {
                        selection,
                        global_rate,
                        rows: &rows,
                    },
                ),
                None => templates::infection_content(
                    &types,
                    Some(selection),
                    &RateView::NoData { selection },
                ),
            }
        }
    };

    Html(templates::base_template(
        "Infection Data",
        Page::Infection,
        &content,
    ))
}

/// Resolve the selection and gather rate data. Returns None for unknown
/// types, uncomputable global rates, empty row sets, or query failures.
fn build_rate_view(
    state: &AppState,
    selection: &RateSelection,
) -> Option<(f64, Vec<crate::models::CountryRate>)> {
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

    let rows = match state.repo.country_rates(type_id, selection.year) {
        Ok(rows) => rows,
        Err(e) => {
            tracing::warn!("country rate query failed: {}", e);
            return None;
        }
    };

    if rows.is_empty() {
        return None;
    }
    Some((global_rate, rows))
}
