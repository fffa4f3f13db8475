//! Transfer page rendering - wizard steps, review and receipt

use crate::AppState;
use axum::extract::{Query, State};
use axum::http::HeaderMap;
use axum::response::Html;
use payflow_core::wizard::QUICK_AMOUNTS;
use payflow_core::{Account, HolderDirectory, TransferDraft, TransferWizard, WizardError, WizardStep};
use payflow_utils::escape_html;
use rust_decimal::Decimal;
use std::collections::HashMap;

/// Transfer page - a fresh wizard, optionally with the source preselected
pub async fn page_transfer(
    State(state): State<AppState>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Html<String> {
    let (accounts, load_error) = super::api::known_accounts(&state).await;

    let mut wizard = TransferWizard::new();
    if let Some(from) = params.get("from") {
        wizard.update_draft(TransferDraft {
            from_account: from.trim().to_string(),
            ..TransferDraft::default()
        });
    }

    let fragment = render_wizard(&state, &wizard, &accounts, load_error.as_deref());
    Html(wrap_page(&headers, &fragment))
}

pub(crate) fn wrap_page(headers: &HeaderMap, fragment: &str) -> String {
    let inner_content = format!(
        r#"<div class='mb-6'>
            <h2 class='text-2xl font-bold'>Send Money</h2>
            <p class='text-gray-500'>Transfer funds between accounts in three steps.</p>
        </div>
        <div class='max-w-2xl'>{}</div>"#,
        fragment
    );
    crate::page_response(headers, "Transfer", "/transfer", &inner_content)
}

fn progress(step: WizardStep) -> String {
    let labels = [(1, "Select Accounts"), (2, "Enter Amount"), (3, "Review")];
    let current = step.number();
    let items: String = labels
        .iter()
        .map(|(n, label)| {
            let class = if *n < current || step == WizardStep::Success {
                "bg-emerald-600 text-white"
            } else if *n == current {
                "bg-emerald-100 text-emerald-700 ring-2 ring-emerald-500"
            } else {
                "bg-gray-100 text-gray-400"
            };
            format!(
                "<div class='flex items-center gap-2'><span class='w-8 h-8 rounded-full flex items-center justify-center text-sm font-bold {}'>{}</span><span class='text-sm text-gray-600'>{}</span></div>",
                class, n, label
            )
        })
        .collect();
    format!("<div class='flex justify-between mb-6'>{}</div>", items)
}

fn hidden(name: &str, value: &str) -> String {
    format!("<input type='hidden' name='{}' value='{}'>", name, escape_html(value))
}

fn button(action: &str, label: &str, primary: bool) -> String {
    let class = if primary {
        "px-4 py-2 bg-emerald-600 text-white rounded-lg hover:bg-emerald-700"
    } else {
        "px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200"
    };
    format!(
        "<button type='submit' name='action' value='{}' class='{}'>{}</button>",
        action, class, label
    )
}

fn account_select(name: &str, label: &str, selected: &str, accounts: &[Account], state: &AppState) -> String {
    if accounts.is_empty() {
        return format!(
            r#"<label class='block mb-4'><span class='text-sm text-gray-600'>{}</span>
                <input type='text' name='{}' value='{}' placeholder='Account number' class='mt-1 w-full px-4 py-2 border rounded-lg'></label>"#,
            label,
            name,
            escape_html(selected)
        );
    }

    let options: String = accounts
        .iter()
        .map(|a| {
            format!(
                "<option value='{}' {}>{} ({}) - {}</option>",
                escape_html(&a.account_number),
                if a.account_number == selected { "selected" } else { "" },
                escape_html(&a.holder_name),
                escape_html(&a.account_number),
                state.money(&a.balance)
            )
        })
        .collect();
    format!(
        r#"<label class='block mb-4'><span class='text-sm text-gray-600'>{}</span>
            <select name='{}' class='mt-1 w-full px-4 py-2 border rounded-lg'>
                <option value='' {}>Select an account</option>{}
            </select></label>"#,
        label,
        name,
        if selected.is_empty() { "selected" } else { "" },
        options
    )
}

fn party(holders: &HolderDirectory<'_>, account_number: &str) -> String {
    format!(
        "{} <span class='text-xs text-gray-400'>({})</span>",
        escape_html(holders.label(account_number)),
        escape_html(account_number)
    )
}

fn render_select_step(state: &AppState, draft: &TransferDraft, accounts: &[Account]) -> String {
    format!(
        "{}{}{}{}<div class='flex justify-end'>{}</div>",
        account_select("from_account", "From Account", &draft.from_account, accounts, state),
        account_select("to_account", "To Account", &draft.to_account, accounts, state),
        hidden("amount", &draft.amount),
        hidden("description", &draft.description),
        button("next", "Continue", true)
    )
}

fn render_amount_step(state: &AppState, draft: &TransferDraft, accounts: &[Account]) -> String {
    let holders = HolderDirectory::new(accounts);
    let available = accounts
        .iter()
        .find(|a| a.account_number == draft.from_account)
        .map(|a| format!("<p class='text-sm text-gray-500 mt-1'>Available: {}</p>", state.money(&a.balance)))
        .unwrap_or_default();

    let quick: String = QUICK_AMOUNTS
        .iter()
        .map(|amount| {
            format!(
                "<button type='button' onclick=\"document.getElementById('transfer-amount').value='{}'\" class='px-3 py-1 border rounded-lg text-sm hover:bg-emerald-50'>{}</button>",
                amount,
                state.money(&Decimal::from(*amount))
            )
        })
        .collect();

    format!(
        r#"<div class='mb-4 p-3 bg-gray-50 rounded-lg text-sm'>
            <p>From: {}</p>
            <p>To: {}</p>
        </div>
        <label class='block mb-2'><span class='text-sm text-gray-600'>Amount</span>
            <input id='transfer-amount' type='text' inputmode='decimal' name='amount' value='{}' placeholder='0.00'
                class='mt-1 w-full px-4 py-3 border rounded-lg text-2xl'></label>
        {}
        <div class='flex gap-2 my-4'>{}</div>
        <label class='block mb-4'><span class='text-sm text-gray-600'>Description (optional)</span>
            <input type='text' name='description' value='{}' placeholder='What is this for?' class='mt-1 w-full px-4 py-2 border rounded-lg'></label>
        {}{}
        <div class='flex flex-row-reverse justify-between'>{}{}</div>"#,
        party(&holders, &draft.from_account),
        party(&holders, &draft.to_account),
        escape_html(&draft.amount),
        available,
        quick,
        escape_html(&draft.description),
        hidden("from_account", &draft.from_account),
        hidden("to_account", &draft.to_account),
        button("next", "Review", true),
        button("back", "Back", false)
    )
}

fn render_review_step(state: &AppState, wizard: &TransferWizard, accounts: &[Account]) -> String {
    let draft = wizard.draft();
    let holders = HolderDirectory::new(accounts);
    let amount = wizard
        .amount()
        .map(|a| state.money(&a))
        .unwrap_or_else(|| escape_html(&draft.amount));

    format!(
        r#"<div class='divide-y mb-6'>
            <div class='flex justify-between py-3'><span class='text-gray-500'>From</span><span>{}</span></div>
            <div class='flex justify-between py-3'><span class='text-gray-500'>To</span><span>{}</span></div>
            <div class='flex justify-between py-3'><span class='text-gray-500'>Amount</span><span class='text-2xl font-bold text-emerald-700'>{}</span></div>
            <div class='flex justify-between py-3'><span class='text-gray-500'>Description</span><span>{}</span></div>
        </div>
        {}{}{}{}
        <div class='flex flex-row-reverse justify-between'>{}{}</div>"#,
        party(&holders, &draft.from_account),
        party(&holders, &draft.to_account),
        amount,
        escape_html(draft.description_or_default()),
        hidden("from_account", &draft.from_account),
        hidden("to_account", &draft.to_account),
        hidden("amount", &draft.amount),
        hidden("description", &draft.description),
        button("submit", "Confirm Transfer", true),
        button("back", "Back", false)
    )
}

fn render_success(state: &AppState, wizard: &TransferWizard, accounts: &[Account]) -> String {
    let holders = HolderDirectory::new(accounts);
    let receipt = match wizard.receipt() {
        Some(tx) => format!(
            r#"<div class='divide-y text-left my-6'>
                <div class='flex justify-between py-2'><span class='text-gray-500'>Transaction ID</span><code>{}</code></div>
                <div class='flex justify-between py-2'><span class='text-gray-500'>Amount</span><span class='font-bold'>{}</span></div>
                <div class='flex justify-between py-2'><span class='text-gray-500'>From</span><span>{}</span></div>
                <div class='flex justify-between py-2'><span class='text-gray-500'>To</span><span>{}</span></div>
                <div class='flex justify-between py-2'><span class='text-gray-500'>Status</span><span>{}</span></div>
            </div>"#,
            escape_html(&tx.transaction_id),
            state.money(&tx.amount),
            party(&holders, &tx.from_account),
            party(&holders, &tx.to_account),
            crate::status_badge(&tx.status)
        ),
        None => String::new(),
    };

    format!(
        r#"<div class='text-center'>
            <p class='text-5xl mb-4'>✅</p>
            <h3 class='text-xl font-bold mb-2'>Transfer Successful!</h3>
            <p class='text-gray-500'>Your money is on its way.</p>
            {}
            <div class='flex justify-center gap-2'>
                {}
                <a href='/transactions' class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200'>View History</a>
            </div>
        </div>"#,
        receipt,
        button("reset", "Start New Transfer", true)
    )
}

/// The wizard as one swappable fragment.
///
/// While a request is in flight the form drops further submits and
/// disables its buttons, so one click sends at most one transfer.
pub(crate) fn render_wizard(
    state: &AppState,
    wizard: &TransferWizard,
    accounts: &[Account],
    load_error: Option<&str>,
) -> String {
    let mut banners = String::new();
    if let Some(message) = load_error {
        banners.push_str(&crate::error_banner(message));
    }
    if let Some(error) = wizard.error() {
        let message = match error {
            WizardError::InsufficientBalance { available } => {
                format!("{}: {} available", error, state.money(available))
            }
            other => other.to_string(),
        };
        banners.push_str(&crate::error_banner(&message));
    }

    let body = match wizard.step() {
        WizardStep::SelectAccounts => render_select_step(state, wizard.draft(), accounts),
        WizardStep::EnterAmount => render_amount_step(state, wizard.draft(), accounts),
        // A restored wizard never sits in Submitting; it renders like Review
        WizardStep::Review | WizardStep::Submitting => render_review_step(state, wizard, accounts),
        WizardStep::Success => render_success(state, wizard, accounts),
    };

    format!(
        r#"<div id='transfer-wizard' class='bg-white rounded-xl shadow-sm p-6'>
            {}
            {}
            <form method='post' action='/transfer' hx-post='/transfer' hx-target='#transfer-wizard' hx-swap='outerHTML'
                hx-sync='this:drop' hx-disabled-elt='find button' hx-indicator='#transfer-pending'>
                {}
                {}
                <p id='transfer-pending' class='htmx-indicator text-center text-gray-500 mt-4'>Processing transfer...</p>
            </form>
        </div>"#,
        progress(wizard.step()),
        banners,
        hidden("step", wizard.step().as_str()),
        body
    )
}
