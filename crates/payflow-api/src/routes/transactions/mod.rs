//! Transaction routes - history list with search, status filter and stats
//!
//! Structure:
//! - api.rs: JSON API and HTMX list fragment
//! - page.rs: Full page rendering and row templates

pub mod api;
pub mod page;

pub use api::{api_transactions, htmx_transactions_list, TransactionsResponse};
pub use page::{page_transactions, render_transaction_row};
