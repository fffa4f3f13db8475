//! Account routes - account grid, create form and delete with confirmation
//!
//! Structure:
//! - api.rs: HTMX fragments and form handlers
//! - page.rs: Full page rendering and card templates

pub mod api;
pub mod page;

pub use api::{
    htmx_account_create,
    htmx_account_delete,
    htmx_account_delete_confirm,
    htmx_accounts_list,
    CreateAccountForm,
    DeleteAccountForm,
};
pub use page::page_accounts;
