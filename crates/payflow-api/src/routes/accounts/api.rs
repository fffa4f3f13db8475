//! Accounts HTMX endpoints - list fragment, create and delete

use crate::AppState;
use axum::extract::{Path, Query, State};
use axum::response::Html;
use axum::Form;
use payflow_core::{Account, CreateAccountRequest, Resource};
use serde::Deserialize;
use std::collections::HashMap;

const LOAD_FAILED: &str = "Failed to load accounts";
const CREATE_FAILED: &str = "Failed to create account";
const DELETE_FAILED: &str = "Failed to delete account";

/// Create-account form fields, all raw text
#[derive(Debug, Default, Deserialize)]
pub struct CreateAccountForm {
    #[serde(default)]
    pub holder_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub initial_balance: String,
}

/// Delete form; the account is only deleted with `confirm=yes`
#[derive(Debug, Default, Deserialize)]
pub struct DeleteAccountForm {
    #[serde(default)]
    pub confirm: String,
}

/// Account grid with an optional banner above it
async fn render_list(state: &AppState, banner: String) -> String {
    match state.cache.accounts(state.accounts.as_ref()).await {
        Ok(accounts) => format!("{}{}", banner, super::page::render_account_grid(state, &accounts)),
        Err(e) => {
            log::warn!("Account list failed: {}", e);
            format!("{}{}", banner, crate::error_banner(&e.operator_message(LOAD_FAILED)))
        }
    }
}

/// HTMX: Accounts grid (`?refresh=1` invalidates first)
pub async fn htmx_accounts_list(
    State(state): State<AppState>,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    if params.get("refresh").is_some_and(|v| v == "1") {
        state.cache.invalidate(Resource::Accounts).await;
    }
    Html(render_list(&state, String::new()).await)
}

/// HTMX: Create an account from the form, then re-render the grid
pub async fn htmx_account_create(State(state): State<AppState>, Form(form): Form<CreateAccountForm>) -> Html<String> {
    let request = CreateAccountRequest::from_form(&form.holder_name, &form.email, &form.initial_balance);

    let banner = match state.accounts.create(&request).await {
        Ok(account) => {
            log::info!("Created account {} for {}", account.account_number, account.holder_name);
            state.cache.invalidate(Resource::Accounts).await;
            crate::success_banner("Account created successfully!")
        }
        Err(e) => {
            log::warn!("Account creation failed: {}", e);
            crate::error_banner(&e.operator_message(CREATE_FAILED))
        }
    };
    Html(render_list(&state, banner).await)
}

async fn find_account(state: &AppState, id: i64) -> Option<Account> {
    if let Ok(accounts) = state.cache.accounts(state.accounts.as_ref()).await {
        if let Some(account) = accounts.iter().find(|a| a.id == id) {
            return Some(account.clone());
        }
    }
    state.accounts.get_by_id(id).await.ok()
}

/// HTMX: Confirmation step shown before any delete request
pub async fn htmx_account_delete_confirm(State(state): State<AppState>, Path(id): Path<i64>) -> Html<String> {
    let account = find_account(&state, id).await;
    Html(super::page::render_delete_confirmation(id, account.as_ref()))
}

/// HTMX: Delete after explicit confirmation, then re-render the grid
pub async fn htmx_account_delete(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<DeleteAccountForm>,
) -> Html<String> {
    if form.confirm != "yes" {
        let account = find_account(&state, id).await;
        return Html(super::page::render_delete_confirmation(id, account.as_ref()));
    }

    let banner = match state.accounts.delete(id).await {
        Ok(()) => {
            log::info!("Deleted account #{}", id);
            state.cache.invalidate(Resource::Accounts).await;
            crate::success_banner("Account deleted successfully!")
        }
        Err(e) => {
            log::warn!("Account deletion failed: {}", e);
            crate::error_banner(&e.operator_message(DELETE_FAILED))
        }
    };
    Html(render_list(&state, banner).await)
}
