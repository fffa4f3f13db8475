//! Settings page rendering - Full page endpoints

use crate::AppState;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::response::Html;
use payflow_config::ServiceRoutes;
use payflow_utils::escape_html;

pub async fn page_settings(State(state): State<AppState>, headers: HeaderMap) -> Html<String> {
    let config = &state.config;
    let routes = &state.routes;

    let inner_content = format!(
        r#"<div class='mb-6'><h2 class='text-2xl font-bold'>Settings</h2></div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Backend Routing</h3>
            <div class='grid grid-cols-2 gap-4'>
                <div><p class='text-sm text-gray-500'>Mode</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Public origin</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Account service</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Transaction service</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6 mb-6'>
            <h3 class='text-lg font-semibold mb-4'>Server</h3>
            <div class='grid grid-cols-2 gap-4'>
                <div><p class='text-sm text-gray-500'>Host</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Port</p><p class='font-medium'>{}</p></div>
            </div>
        </div>
        <div class='bg-white rounded-xl shadow-sm p-6'>
            <h3 class='text-lg font-semibold mb-4'>Display</h3>
            <div class='grid grid-cols-2 gap-4'>
                <div><p class='text-sm text-gray-500'>Currency symbol</p><p class='font-medium'>{}</p></div>
                <div><p class='text-sm text-gray-500'>Recent transactions on dashboard</p><p class='font-medium'>{}</p></div>
            </div>
        </div>"#,
        routes.mode,
        escape_html(&config.api.origin),
        escape_html(ServiceRoutes::display_url(&routes.account_base_url)),
        escape_html(ServiceRoutes::display_url(&routes.transaction_base_url)),
        escape_html(&config.server.host),
        config.server.port,
        escape_html(&config.currency.symbol),
        config.views.recent_transactions
    );

    Html(crate::page_response(&headers, "Settings", "/settings", &inner_content))
}
