//! Transactions page rendering - Full page endpoints
//!
//! Endpoints:
//! - page_transactions: History page with search box and status buttons
//!
//! Helper functions:
//! - render_transactions_list: Stats bar, rows or empty state
//! - render_transaction_row: One transfer with holder names

use crate::AppState;
use axum::http::HeaderMap;
use axum::response::Html;
use payflow_core::{StatusFilter, TransactionFilter, TransactionRow};
use payflow_utils::escape_html;

use super::api::TransactionsResponse;

/// Transactions page - filters post to `/transactions/list`
pub async fn page_transactions(headers: HeaderMap) -> Html<String> {
    let status_options: String = [StatusFilter::All, StatusFilter::Completed, StatusFilter::Pending]
        .iter()
        .map(|status| {
            let label = match status {
                StatusFilter::All => "All",
                StatusFilter::Completed => "Completed",
                StatusFilter::Pending => "Pending",
            };
            format!(
                r#"<label class='cursor-pointer'>
                    <input type='radio' name='status' value='{}' class='peer sr-only' {}>
                    <span class='px-4 py-2 rounded-lg border bg-white text-gray-600 peer-checked:bg-emerald-50 peer-checked:text-emerald-700 peer-checked:border-emerald-300'>{}</span>
                </label>"#,
                status,
                if *status == StatusFilter::All { "checked" } else { "" },
                label
            )
        })
        .collect();

    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-4'>
            <div>
                <h2 class='text-2xl font-bold'>Transaction History</h2>
                <p class='text-gray-500'>View and track all your transactions.</p>
            </div>
            <button hx-get='/transactions/list?refresh=1' hx-include='#transaction-filters' hx-target='#transactions-content'
                class='px-4 py-2 bg-gray-100 text-gray-700 rounded-lg hover:bg-gray-200 flex items-center gap-2'>
                <span class='htmx-indicator'>⟳</span>
                Refresh
            </button>
        </div>
        <form id='transaction-filters' hx-get='/transactions/list' hx-target='#transactions-content'
            hx-trigger='keyup changed delay:500ms from:input[name=q], change'
            class='bg-white rounded-xl shadow-sm p-4 mb-4 flex flex-col md:flex-row gap-4'>
            <input type='text' name='q' placeholder='Search by account number, holder or transaction id...'
                class='flex-1 px-4 py-2 border rounded-lg'>
            <div class='flex gap-2 items-center'>{}</div>
        </form>
        {}"#,
        status_options,
        crate::loading_placeholder("transactions-content", "/transactions/list", "")
    );

    Html(crate::page_response(&headers, "Transactions", "/transactions", &inner_content))
}

pub(crate) fn render_transactions_list(
    state: &AppState,
    response: &TransactionsResponse,
    filter: &TransactionFilter,
) -> String {
    let stats = &response.stats;
    let stats_bar = format!(
        r#"<div class='grid grid-cols-2 md:grid-cols-4 gap-3 mb-4'>
            <div class='bg-white p-3 rounded-lg border text-center'><p class='text-xs text-gray-500'>Total Transactions</p><p class='text-xl font-bold'>{}</p></div>
            <div class='bg-green-50 p-3 rounded-lg border border-green-100 text-center'><p class='text-xs text-green-600'>Completed</p><p class='text-xl font-bold text-green-700'>{}</p></div>
            <div class='bg-orange-50 p-3 rounded-lg border border-orange-100 text-center'><p class='text-xs text-orange-600'>Pending</p><p class='text-xl font-bold text-orange-700'>{}</p></div>
            <div class='bg-red-50 p-3 rounded-lg border border-red-100 text-center'><p class='text-xs text-red-600'>Failed</p><p class='text-xl font-bold text-red-700'>{}</p></div>
        </div>"#,
        stats.total, stats.completed, stats.pending, stats.failed
    );

    let body = if response.transactions.is_empty() {
        let (title, hint) = if filter.is_active() {
            ("No matching transactions", "Try adjusting your search or filters")
        } else {
            ("No transactions yet", "Your transaction history will appear here")
        };
        format!(
            r#"<div class='p-12 text-center'>
                <p class='text-4xl mb-4'>🕘</p>
                <h3 class='text-xl font-semibold text-gray-600 mb-2'>{}</h3>
                <p class='text-gray-500'>{}</p>
            </div>"#,
            title, hint
        )
    } else {
        let rows: String = response
            .transactions
            .iter()
            .map(|row| render_transaction_row(state, row))
            .collect();
        format!(
            r#"<div class='hidden md:grid grid-cols-12 gap-4 p-4 bg-gray-50 text-gray-500 text-sm font-medium'>
                <div class='col-span-5'>Transfer Details</div>
                <div class='col-span-2'>Amount</div>
                <div class='col-span-2'>Status</div>
                <div class='col-span-3'>Date / Transaction ID</div>
            </div>
            <div class='divide-y'>{}</div>"#,
            rows
        )
    };

    format!(
        "{}<div class='bg-white rounded-xl shadow-sm overflow-hidden'>{}</div>",
        stats_bar, body
    )
}

/// One transfer line, shared with the dashboard
pub fn render_transaction_row(state: &AppState, row: &TransactionRow) -> String {
    let tx = &row.transaction;
    let failure = tx
        .failure_reason
        .as_deref()
        .filter(|r| !r.is_empty())
        .map(|r| format!("<p class='text-xs text-red-500 mt-1'>{}</p>", escape_html(r)))
        .unwrap_or_default();

    format!(
        r#"<div class='grid grid-cols-1 md:grid-cols-12 gap-2 md:gap-4 p-4 items-center hover:bg-gray-50'>
            <div class='md:col-span-5 text-sm space-y-1'>
                <p class='text-gray-500'>From: <span class='text-gray-900 font-medium'>{}</span> <span class='text-xs text-gray-400'>({})</span></p>
                <p class='text-gray-500'>To: <span class='text-emerald-700 font-medium'>{}</span> <span class='text-xs text-gray-400'>({})</span></p>
                {}
            </div>
            <div class='md:col-span-2 text-lg font-semibold text-emerald-700'>{}</div>
            <div class='md:col-span-2'>{}</div>
            <div class='md:col-span-3 text-sm text-gray-500'>
                <p>{}</p>
                <code class='text-xs bg-gray-100 px-2 py-1 rounded'>{}</code>
            </div>
        </div>"#,
        escape_html(&row.from_holder),
        escape_html(&tx.from_account),
        escape_html(&row.to_holder),
        escape_html(&tx.to_account),
        failure,
        state.money(&tx.amount),
        crate::status_badge(&tx.status),
        crate::format_timestamp(tx.created_at.as_ref()),
        escape_html(&tx.transaction_id)
    )
}
