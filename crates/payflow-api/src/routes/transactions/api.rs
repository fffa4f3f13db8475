//! Transactions API endpoints - JSON API and HTMX partial responses

use crate::{ApiError, AppState};
use axum::extract::{Query, State};
use axum::response::Html;
use axum::Json;
use payflow_core::{ClientResult, StatusFilter, TransactionFilter, TransactionRow, TransactionStats};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

const LOAD_FAILED: &str = "Failed to load transactions";

/// Filtered history for API response
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionsResponse {
    pub transactions: Vec<TransactionRow>,
    pub total_count: usize,
    pub stats: TransactionStats,
}

fn filter_from_params(params: &HashMap<String, String>) -> Result<TransactionFilter, String> {
    let query = params.get("q").map(|s| s.as_str()).unwrap_or("");
    let status = params
        .get("status")
        .map(|s| s.parse::<StatusFilter>())
        .transpose()?
        .unwrap_or_default();
    Ok(TransactionFilter::new(query, status))
}

fn wants_refresh(params: &HashMap<String, String>) -> bool {
    matches!(params.get("refresh").map(|s| s.as_str()), Some("1") | Some("true"))
}

async fn load(state: &AppState, filter: &TransactionFilter, refresh: bool) -> ClientResult<TransactionsResponse> {
    if refresh {
        state.cache.invalidate_all().await;
    }
    let (accounts, transactions) = tokio::join!(
        state.cache.accounts(state.accounts.as_ref()),
        state.cache.transactions(state.transactions.as_ref()),
    );
    let transactions = transactions?;
    // Holder names are a nicety; the list still renders without them
    let accounts = accounts.unwrap_or_else(|e| {
        log::warn!("Holder names unavailable: {}", e);
        Arc::new(Vec::new())
    });

    let rows = filter.apply(&transactions, &accounts);
    Ok(TransactionsResponse {
        total_count: rows.len(),
        transactions: rows,
        stats: TransactionStats::from_transactions(&transactions),
    })
}

/// Filtered transaction history (JSON API)
pub async fn api_transactions(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<TransactionsResponse>, ApiError> {
    let filter = filter_from_params(&params).map_err(|message| ApiError::BadRequest { message })?;
    load(&state, &filter, wants_refresh(&params))
        .await
        .map(Json)
        .map_err(ApiError::upstream(LOAD_FAILED))
}

/// HTMX: Transactions list - stats bar and rows
///
/// Query parameters: `q` (search), `status` (all/completed/pending),
/// `refresh=1` (invalidate cached lists first). An unknown status shows
/// everything.
pub async fn htmx_transactions_list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let filter = filter_from_params(&params).unwrap_or_else(|e| {
        log::debug!("{}", e);
        TransactionFilter::new(params.get("q").map(|s| s.as_str()).unwrap_or(""), StatusFilter::All)
    });

    match load(&state, &filter, wants_refresh(&params)).await {
        Ok(response) => Html(super::page::render_transactions_list(&state, &response, &filter)),
        Err(e) => {
            log::warn!("Transaction list failed: {}", e);
            Html(crate::error_banner(&e.operator_message(LOAD_FAILED)))
        }
    }
}
