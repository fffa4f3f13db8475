//! Dashboard routes - total balance, account count and recent transfers

pub mod api;
pub mod page;

pub use api::{api_summary, htmx_dashboard_content};
pub use page::page_dashboard;
