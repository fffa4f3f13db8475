//! HTTP server with HTMX support
//!
//! Routes are organized into modules:
//! - routes::dashboard: Balance overview and recent transfers
//! - routes::accounts: Account grid, create and delete
//! - routes::transfer: Three-step transfer wizard
//! - routes::transactions: History with search and status filter
//! - routes::settings: Resolved backend routing

pub mod error;
pub mod routes;

use axum::http::HeaderMap;
use axum::{
    routing::get,
    Router,
};
use payflow_config::{Config, ServiceRoutes, SymbolPosition};
use payflow_core::{AccountServiceRef, QueryCache, TransactionServiceRef};
use rust_decimal::Decimal;
use std::sync::Arc;
use tokio::net::TcpListener;

pub use error::ApiError;

/// Application state
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    pub routes: ServiceRoutes,
    pub accounts: AccountServiceRef,
    pub transactions: TransactionServiceRef,
    pub cache: Arc<QueryCache>,
}

impl AppState {
    pub fn new(config: Config, routes: ServiceRoutes, accounts: AccountServiceRef, transactions: TransactionServiceRef) -> Self {
        Self {
            config: Arc::new(config),
            routes,
            accounts,
            transactions,
            cache: Arc::new(QueryCache::new()),
        }
    }

    /// Format an amount with the configured currency settings
    pub fn money(&self, value: &Decimal) -> String {
        let currency = &self.config.currency;
        let number = payflow_utils::format_decimal(
            value,
            currency.decimal_places,
            &currency.thousands_separator,
            &currency.decimal_separator,
        );
        match currency.symbol_position {
            SymbolPosition::Before => format!("{}{}", currency.symbol, number),
            SymbolPosition::After => format!("{} {}", number, currency.symbol),
        }
    }
}

/// Create the application router
pub fn create_router(state: AppState) -> Router {
    use routes::accounts::{htmx_account_create, htmx_account_delete, htmx_account_delete_confirm, htmx_accounts_list, page_accounts};
    use routes::dashboard::{api_summary, htmx_dashboard_content, page_dashboard};
    use routes::settings::{api_routing, page_settings};
    use routes::transactions::{api_transactions, htmx_transactions_list, page_transactions};
    use routes::transfer::{htmx_transfer_action, page_transfer};

    Router::new()
        // API endpoints
        .route("/api/health", get(health_check))
        .route("/api/routing", get(api_routing))
        .route("/api/summary", get(api_summary))
        .route("/api/transactions", get(api_transactions))
        // HTMX page routes
        .route("/", get(page_dashboard))
        .route("/dashboard", get(page_dashboard))
        .route("/accounts", get(page_accounts).post(htmx_account_create))
        .route("/transfer", get(page_transfer).post(htmx_transfer_action))
        .route("/transactions", get(page_transactions))
        .route("/settings", get(page_settings))
        // HTMX partial routes
        .route("/dashboard/content", get(htmx_dashboard_content))
        .route("/accounts/list", get(htmx_accounts_list))
        .route("/accounts/:id/delete", get(htmx_account_delete_confirm).post(htmx_account_delete))
        .route("/transactions/list", get(htmx_transactions_list))
        .with_state(state)
}

/// Health check endpoint
async fn health_check() -> &'static str {
    "OK"
}

// ==================== Template Functions ====================

/// Base HTML template
pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{} - PayFlow</title>
    <script src="https://unpkg.com/htmx.org@1.9.10"></script>
    <script src="https://cdn.tailwindcss.com"></script>
    <style>
        .htmx-indicator {{ opacity: 0; transition: opacity 0.3s; }}
        .htmx-request .htmx-indicator {{ opacity: 1; }}
        .htmx-request.htmx-indicator {{ opacity: 1; }}
    </style>
</head>
<body class="bg-gray-50 text-gray-900">
    {}
</body>
</html>"#,
        payflow_utils::escape_html(title),
        content
    )
}

/// Navigation sidebar
pub fn nav_sidebar(current_path: &str) -> String {
    let links = [
        ("/", "Dashboard", "dashboard"),
        ("/accounts", "Accounts", "accounts"),
        ("/transfer", "Transfer", "transfer"),
        ("/transactions", "Transactions", "transactions"),
        ("/settings", "Settings", "settings"),
    ];

    let mut nav = String::from("<div class='bg-white border-r h-screen flex flex-col'><div class='p-4 border-b'><h1 class='text-xl font-bold text-emerald-600'>PayFlow</h1></div><ul class='flex-1 py-2 space-y-1 px-2'>");

    for (path, label, id) in &links {
        let is_active = if *path == "/" {
            current_path == "/" || current_path == "/dashboard"
        } else {
            current_path.starts_with(path)
        };
        let active_class = if is_active { "bg-emerald-50 text-emerald-600" } else { "text-gray-600 hover:bg-gray-50" };
        let icon = match *id {
            "dashboard" => "📊",
            "accounts" => "💳",
            "transfer" => "💸",
            "transactions" => "📋",
            "settings" => "⚙️",
            _ => "📄",
        };
        nav.push_str(&format!(
            r#"<li><a href='{}' class='flex items-center gap-2 px-3 py-2 rounded-lg {}'>{}<span>{}</span></a></li>"#,
            path, active_class, icon, label
        ));
    }
    nav.push_str("</ul></div>");
    nav
}

fn is_htmx_request(headers: &HeaderMap) -> bool {
    headers.get("hx-request").is_some()
}

/// Full page with sidebar, or only the content area for HTMX navigation
pub fn page_response(headers: &HeaderMap, title: &str, current_path: &str, inner_content: &str) -> String {
    if is_htmx_request(headers) {
        format!(r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
            inner_content)
    } else {
        base_html(title, &format!(r#"<div class='flex flex-col h-screen'>
    <div class='flex flex-1 overflow-hidden'>
        <aside class='w-64 flex-shrink-0'>{}</aside>
        <main class='flex-1 overflow-auto bg-gray-50 p-6'>{}</main>
    </div>
</div>"#,
            nav_sidebar(current_path), inner_content))
    }
}

/// Fragment replaced by HTMX as soon as it is inserted
pub fn loading_placeholder(id: &str, url: &str, classes: &str) -> String {
    format!(
        r#"<div id='{}' hx-get='{}' hx-trigger='load' class='{}'>
            <p class='text-gray-500 text-center py-8 animate-pulse'>Loading...</p>
        </div>"#,
        id, url, classes
    )
}

pub fn error_banner(message: &str) -> String {
    format!(
        "<div class='mb-4 p-4 rounded-lg bg-red-50 border border-red-200 text-red-700' role='alert'>{}</div>",
        payflow_utils::escape_html(message)
    )
}

pub fn success_banner(message: &str) -> String {
    format!(
        "<div class='mb-4 p-4 rounded-lg bg-emerald-50 border border-emerald-200 text-emerald-700'>{}</div>",
        payflow_utils::escape_html(message)
    )
}

/// Coloured status badge
pub fn status_badge(status: &payflow_core::TransactionStatus) -> String {
    let class = if status.is_completed() {
        "bg-green-100 text-green-700"
    } else if status.is_failed() {
        "bg-red-100 text-red-700"
    } else if matches!(status, payflow_core::TransactionStatus::Pending) {
        "bg-yellow-100 text-yellow-700"
    } else {
        "bg-blue-100 text-blue-700"
    };
    format!(
        "<span class='px-2 py-1 rounded-full text-xs font-medium {}'>{}</span>",
        class,
        payflow_utils::escape_html(&status.to_string())
    )
}

/// Short date-time for lists; `-` when the backend sent none
pub fn format_timestamp(value: Option<&chrono::NaiveDateTime>) -> String {
    value
        .map(|dt| dt.format("%d %b %Y, %H:%M").to_string())
        .unwrap_or_else(|| "-".to_string())
}

/// Start the HTTP server
///
/// Binds to the configured address and serves until Ctrl+C.
pub async fn start_server(state: AppState) -> anyhow::Result<()> {
    let addr = state.config.bind_address();
    let router = create_router(state);

    let listener = TcpListener::bind(&addr).await?;
    log::info!("Starting PayFlow web on http://{}", addr);
    log::info!("Available routes:");
    log::info!("  - / (Dashboard)");
    log::info!("  - /accounts (Accounts)");
    log::info!("  - /transfer (Transfer wizard)");
    log::info!("  - /transactions (History)");
    log::info!("  - /api/* (JSON endpoints)");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    log::info!("Server stopped gracefully");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        log::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
