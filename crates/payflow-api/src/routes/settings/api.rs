//! Settings API endpoints - JSON API

use crate::AppState;
use axum::extract::State;
use axum::Json;
use payflow_config::RoutingMode;
use serde::{Deserialize, Serialize};

/// Resolved routing as reported to operators
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoutingInfo {
    pub mode: RoutingMode,
    pub account_base_url: String,
    pub transaction_base_url: String,
    /// Where relative paths are sent
    pub origin: String,
}

impl RoutingInfo {
    pub fn from_state(state: &AppState) -> Self {
        Self {
            mode: state.routes.mode,
            account_base_url: state.routes.account_base_url.clone(),
            transaction_base_url: state.routes.transaction_base_url.clone(),
            origin: state.config.api.origin.clone(),
        }
    }
}

pub async fn api_routing(State(state): State<AppState>) -> Json<RoutingInfo> {
    Json(RoutingInfo::from_state(&state))
}
