//! Route modules for the web server
//!
//! Each module follows the same structure:
//! - mod.rs: Module declaration and exports
//! - api.rs: JSON endpoints and HTMX partials
//! - page.rs: Full page rendering

pub mod accounts;
pub mod dashboard;
pub mod settings;
pub mod transactions;
pub mod transfer;
