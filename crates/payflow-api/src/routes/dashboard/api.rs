//! Dashboard API endpoints - JSON summary and the HTMX content fragment

use crate::{ApiError, AppState};
use axum::extract::State;
use axum::response::Html;
use axum::Json;
use payflow_core::{ClientResult, DashboardSummary};

const LOAD_FAILED: &str = "Failed to load dashboard";

/// Both lists through the cache, summarised
pub(crate) async fn load_summary(state: &AppState) -> ClientResult<DashboardSummary> {
    let (accounts, transactions) = tokio::join!(
        state.cache.accounts(state.accounts.as_ref()),
        state.cache.transactions(state.transactions.as_ref()),
    );
    let (accounts, transactions) = (accounts?, transactions?);
    Ok(DashboardSummary::build(&accounts, &transactions, state.config.views.recent_transactions))
}

/// Get dashboard summary (JSON API)
pub async fn api_summary(State(state): State<AppState>) -> Result<Json<DashboardSummary>, ApiError> {
    load_summary(&state)
        .await
        .map(Json)
        .map_err(ApiError::upstream(LOAD_FAILED))
}

/// HTMX: dashboard cards and recent transfers
pub async fn htmx_dashboard_content(State(state): State<AppState>) -> Html<String> {
    match load_summary(&state).await {
        Ok(summary) => Html(super::page::render_dashboard_content(&state, &summary)),
        Err(e) => {
            log::warn!("Dashboard load failed: {}", e);
            Html(crate::error_banner(&e.operator_message(LOAD_FAILED)))
        }
    }
}
