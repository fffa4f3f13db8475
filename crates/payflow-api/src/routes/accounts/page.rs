//! Accounts page rendering - Full page endpoints

use crate::AppState;
use axum::http::HeaderMap;
use axum::response::Html;
use payflow_core::Account;
use payflow_utils::{escape_html, initial};

/// Accounts page - create form and the grid placeholder
pub async fn page_accounts(headers: HeaderMap) -> Html<String> {
    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-6'>
            <div>
                <h2 class='text-2xl font-bold'>Accounts</h2>
                <p class='text-gray-500'>Manage your accounts and balances.</p>
            </div>
            <button hx-get='/accounts/list?refresh=1' hx-target='#accounts-content'
                class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200'>Refresh</button>
        </div>
        <details class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <summary class='cursor-pointer font-semibold text-emerald-700'>➕ Add Account</summary>
            <form hx-post='/accounts' hx-target='#accounts-content' hx-on::after-request='if(event.detail.successful) this.reset()'
                class='grid grid-cols-1 md:grid-cols-4 gap-4 mt-4'>
                <input type='text' name='holder_name' placeholder='Holder name' required class='px-4 py-2 border rounded-lg'>
                <input type='email' name='email' placeholder='Email' required class='px-4 py-2 border rounded-lg'>
                <input type='number' name='initial_balance' placeholder='Initial balance (optional)' min='0' step='0.01'
                    class='px-4 py-2 border rounded-lg'>
                <button type='submit' class='px-4 py-2 bg-emerald-600 text-white rounded-lg hover:bg-emerald-700'>Create Account</button>
            </form>
        </details>
        {}"#,
        crate::loading_placeholder("accounts-content", "/accounts/list", "")
    );

    Html(crate::page_response(&headers, "Accounts", "/accounts", &inner_content))
}

pub(crate) fn render_account_grid(state: &AppState, accounts: &[Account]) -> String {
    if accounts.is_empty() {
        return r#"<div class='bg-white rounded-xl shadow-sm p-12 text-center'>
            <p class='text-4xl mb-4'>💳</p>
            <h3 class='text-xl font-semibold text-gray-600 mb-2'>No accounts yet</h3>
            <p class='text-gray-500'>Create your first account with the form above.</p>
        </div>"#
            .to_string();
    }

    let cards: String = accounts.iter().map(|a| render_account_card(state, a)).collect();
    format!("<div class='grid grid-cols-1 md:grid-cols-2 lg:grid-cols-3 gap-4'>{}</div>", cards)
}

fn render_account_card(state: &AppState, account: &Account) -> String {
    let status_class = if account.status.is_active() {
        "bg-green-100 text-green-700"
    } else {
        "bg-gray-100 text-gray-600"
    };

    format!(
        r#"<div class='bg-white rounded-xl shadow-sm p-6'>
            <div class='flex items-center gap-3 mb-4'>
                <div class='w-12 h-12 rounded-full bg-emerald-100 text-emerald-700 flex items-center justify-center text-lg font-bold'>{}</div>
                <div class='flex-1 min-w-0'>
                    <p class='font-semibold truncate'>{}</p>
                    <p class='text-sm text-gray-500 truncate'>{}</p>
                </div>
                <span class='px-2 py-1 rounded-full text-xs font-medium {}'>{}</span>
            </div>
            <p class='text-xs text-gray-400'>Account Number</p>
            <code class='text-sm bg-gray-100 px-2 py-1 rounded'>{}</code>
            <p class='text-xs text-gray-400 mt-4'>Balance</p>
            <p class='text-2xl font-bold text-emerald-700'>{}</p>
            <div id='account-{}-actions' class='mt-4 flex gap-2'>
                <a href='/transfer?from={}' class='px-3 py-1 text-sm bg-emerald-50 text-emerald-700 rounded-lg'>Send</a>
                <button hx-get='/accounts/{}/delete' hx-target='#account-{}-actions'
                    class='px-3 py-1 text-sm bg-red-50 text-red-600 rounded-lg hover:bg-red-100'>Delete</button>
            </div>
        </div>"#,
        escape_html(&initial(&account.holder_name)),
        escape_html(&account.holder_name),
        escape_html(&account.email),
        status_class,
        escape_html(&account.status.to_string()),
        escape_html(&account.account_number),
        state.money(&account.balance),
        account.id,
        escape_html(&account.account_number),
        account.id,
        account.id
    )
}

/// Confirmation prompt replacing a card's action buttons
pub(crate) fn render_delete_confirmation(id: i64, account: Option<&Account>) -> String {
    let label = account
        .map(|a| format!("{} ({})", a.holder_name, a.account_number))
        .unwrap_or_else(|| format!("Account #{}", id));

    format!(
        r#"<form hx-post='/accounts/{}/delete' hx-target='#accounts-content' class='w-full p-3 rounded-lg bg-red-50 border border-red-200'>
            <p class='text-sm text-red-700 mb-2'>Are you sure you want to delete {}?</p>
            <input type='hidden' name='confirm' value='yes'>
            <div class='flex gap-2'>
                <button type='submit' class='px-3 py-1 text-sm bg-red-600 text-white rounded-lg'>Delete</button>
                <button type='button' hx-get='/accounts/list' hx-target='#accounts-content'
                    class='px-3 py-1 text-sm bg-white border rounded-lg'>Cancel</button>
            </div>
        </form>"#,
        id,
        escape_html(&label)
    )
}
