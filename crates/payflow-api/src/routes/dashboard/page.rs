//! Dashboard page rendering

use crate::AppState;
use axum::http::HeaderMap;
use axum::response::Html;
use payflow_core::DashboardSummary;

/// Dashboard page - the content loads through `/dashboard/content`
pub async fn page_dashboard(headers: HeaderMap) -> Html<String> {
    let inner_content = format!(
        r#"<div class='flex items-center justify-between mb-6'>
            <div>
                <h2 class='text-2xl font-bold'>Welcome back</h2>
                <p class='text-gray-500'>Here's what's happening with your money today.</p>
            </div>
            <a href='/transfer' class='px-4 py-2 bg-emerald-600 text-white rounded-lg hover:bg-emerald-700'>New Transfer</a>
        </div>
        {}"#,
        crate::loading_placeholder("dashboard-content", "/dashboard/content", "")
    );

    Html(crate::page_response(&headers, "Dashboard", "/dashboard", &inner_content))
}

pub(crate) fn render_dashboard_content(state: &AppState, summary: &DashboardSummary) -> String {
    let recent = if summary.recent_transactions.is_empty() {
        r#"<div class='text-center py-12'>
            <p class='text-4xl mb-4'>📭</p>
            <h4 class='text-lg font-semibold text-gray-600 mb-2'>No transactions yet</h4>
            <p class='text-gray-500 mb-4'>Start by creating an account and making your first transfer!</p>
            <a href='/transfer' class='px-4 py-2 bg-emerald-600 text-white rounded-lg'>Make Transfer</a>
        </div>"#
            .to_string()
    } else {
        summary
            .recent_transactions
            .iter()
            .map(|row| crate::routes::transactions::render_transaction_row(state, row))
            .collect::<Vec<_>>()
            .join("")
    };

    format!(
        r#"<div class='grid grid-cols-1 md:grid-cols-3 gap-4 mb-6'>
            <div class='md:col-span-2 bg-emerald-50 p-6 rounded-xl border border-emerald-200'>
                <p class='text-sm text-emerald-700'>Total Balance</p>
                <p class='text-4xl font-bold text-emerald-800'>{}</p>
            </div>
            <div class='bg-white p-6 rounded-xl border'>
                <p class='text-sm text-gray-500'>Accounts</p>
                <p class='text-3xl font-bold'>{}</p>
                <p class='text-xs text-gray-400'>Active accounts</p>
            </div>
        </div>
        <h3 class='text-lg font-semibold mb-3'>Quick Actions</h3>
        <div class='grid grid-cols-3 gap-4 mb-6'>
            <a href='/transfer' class='bg-white p-4 rounded-xl border text-center hover:shadow'>💸<p class='font-medium'>Send Money</p></a>
            <a href='/accounts' class='bg-white p-4 rounded-xl border text-center hover:shadow'>➕<p class='font-medium'>Add Account</p></a>
            <a href='/transactions' class='bg-white p-4 rounded-xl border text-center hover:shadow'>📋<p class='font-medium'>History</p></a>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6'>
            <div class='flex items-center justify-between mb-4'>
                <h3 class='text-lg font-semibold'>Recent Transactions</h3>
                <a href='/transactions' class='text-emerald-600 hover:underline'>View All →</a>
            </div>
            <div class='divide-y'>{}</div>
        </div>"#,
        state.money(&summary.total_balance),
        summary.account_count,
        recent
    )
}
