//! Transfer routes - the three-step wizard
//!
//! The wizard keeps no server-side session: every form carries the current
//! step and the draft in hidden fields, and each POST rebuilds the machine
//! with `TransferWizard::restore` before applying the requested action.

pub mod api;
pub mod page;

pub use api::{htmx_transfer_action, TransferAction, TransferForm};
pub use page::page_transfer;
