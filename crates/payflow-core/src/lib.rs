//! Service clients, query cache and the transfer wizard

pub mod cache;
pub mod client;
pub mod error;
pub mod models;
pub mod reports;
pub mod types;
pub mod wizard;

pub use cache::{QueryCache, Resource};
pub use client::{build_http_client, AccountClient, AccountService, TransactionClient, TransactionService};
pub use error::{ClientError, ClientResult, ErrorCode, ErrorDetails};
pub use models::{Account, BalanceUpdateRequest, CreateAccountRequest, OperationType, Transaction, TransferRequest};
pub use reports::{DashboardSummary, HolderDirectory, TransactionFilter, TransactionRow, TransactionStats};
pub use types::{AccountStatus, StatusFilter, TransactionStatus};
pub use wizard::{TransferDraft, TransferWizard, WizardError, WizardStep};

use std::sync::Arc;

/// Shared handles to the two services
pub type AccountServiceRef = Arc<dyn AccountService>;
pub type TransactionServiceRef = Arc<dyn TransactionService>;
