//! Transfer wizard form handler

use crate::AppState;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use axum::Form;
use payflow_core::{Account, TransferDraft, TransferWizard, WizardStep};
use serde::Deserialize;
use std::sync::Arc;

/// Button pressed on the wizard form
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferAction {
    Next,
    Back,
    Submit,
    Reset,
}

impl std::str::FromStr for TransferAction {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "next" => Ok(TransferAction::Next),
            "back" => Ok(TransferAction::Back),
            "submit" => Ok(TransferAction::Submit),
            "reset" => Ok(TransferAction::Reset),
            _ => Err(format!("Unknown transfer action: {}", s)),
        }
    }
}

/// Every wizard form posts all fields, visible or hidden
#[derive(Debug, Default, Deserialize)]
pub struct TransferForm {
    #[serde(default)]
    pub step: String,
    #[serde(default)]
    pub action: String,
    #[serde(default)]
    pub from_account: String,
    #[serde(default)]
    pub to_account: String,
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub description: String,
}

impl TransferForm {
    pub fn draft(&self) -> TransferDraft {
        TransferDraft {
            from_account: self.from_account.trim().to_string(),
            to_account: self.to_account.trim().to_string(),
            amount: self.amount.clone(),
            description: self.description.clone(),
        }
    }

    /// Unknown or missing step means the first one
    pub fn step(&self) -> WizardStep {
        self.step.parse().unwrap_or_default()
    }
}

/// Known accounts for dropdowns and the balance check
pub(crate) async fn known_accounts(state: &AppState) -> (Arc<Vec<Account>>, Option<String>) {
    match state.cache.accounts(state.accounts.as_ref()).await {
        Ok(accounts) => (accounts, None),
        Err(e) => {
            log::warn!("Accounts unavailable for transfer: {}", e);
            (Arc::new(Vec::new()), Some(e.operator_message("Failed to load accounts")))
        }
    }
}

/// Apply one action to the restored wizard
pub(crate) async fn apply(state: &AppState, form: &TransferForm, accounts: &[Account]) -> TransferWizard {
    let mut wizard = TransferWizard::restore(form.step(), form.draft());

    let action = match form.action.parse::<TransferAction>() {
        Ok(action) => action,
        Err(e) => {
            log::debug!("{}", e);
            return wizard;
        }
    };

    let outcome = match action {
        TransferAction::Next => wizard.next().map(|_| ()),
        TransferAction::Back => wizard.back().map(|_| ()),
        TransferAction::Submit => wizard
            .submit(state.transactions.as_ref(), &state.cache, accounts)
            .await
            .map(|_| ()),
        TransferAction::Reset => {
            wizard.reset();
            Ok(())
        }
    };
    if let Err(e) = outcome {
        log::debug!("Transfer wizard stays on {}: {}", wizard.step(), e);
    }
    wizard
}

/// POST /transfer - next, back, submit or reset
pub async fn htmx_transfer_action(
    State(state): State<AppState>,
    headers: HeaderMap,
    Form(form): Form<TransferForm>,
) -> Html<String> {
    let (accounts, load_error) = known_accounts(&state).await;
    let wizard = apply(&state, &form, &accounts).await;
    let fragment = super::page::render_wizard(&state, &wizard, &accounts, load_error.as_deref());

    if headers.get("hx-request").is_some() {
        Html(fragment)
    } else {
        Html(super::page::wrap_page(&headers, &fragment))
    }
}
