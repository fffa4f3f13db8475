//! Transfer wizard state machine
//!
//! ```text
//! SelectAccounts -> EnterAmount -> Review -> Submitting -> Success
//!        ^               |  ^         |          |
//!        +---- back -----+  +- back --+          +-- error --> Review
//! ```
//!
//! Every forward transition passes a validation gate. The draft survives
//! back transitions and failed submissions; it is only discarded by
//! [`TransferWizard::reset`].

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use thiserror::Error;

use crate::cache::{QueryCache, Resource};
use crate::client::TransactionService;
use crate::error::ClientResult;
use crate::models::{Account, Transaction, TransferRequest};

/// Description sent when the operator leaves the field empty
pub const DEFAULT_DESCRIPTION: &str = "PayFlow Transfer";

/// Preset amounts offered on the amount step
pub const QUICK_AMOUNTS: [u32; 4] = [100, 500, 1000, 5000];

/// Fallback shown when the service rejects a transfer without a message
pub const TRANSFER_FAILED_MESSAGE: &str = "Transfer failed. Please try again.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum WizardStep {
    #[default]
    SelectAccounts,
    EnterAmount,
    Review,
    Submitting,
    Success,
}

impl WizardStep {
    pub fn as_str(&self) -> &'static str {
        match self {
            WizardStep::SelectAccounts => "select_accounts",
            WizardStep::EnterAmount => "enter_amount",
            WizardStep::Review => "review",
            WizardStep::Submitting => "submitting",
            WizardStep::Success => "success",
        }
    }

    /// Position in the three-step progress indicator
    pub fn number(&self) -> u8 {
        match self {
            WizardStep::SelectAccounts => 1,
            WizardStep::EnterAmount => 2,
            WizardStep::Review | WizardStep::Submitting | WizardStep::Success => 3,
        }
    }
}

impl FromStr for WizardStep {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "select_accounts" => Ok(WizardStep::SelectAccounts),
            "enter_amount" => Ok(WizardStep::EnterAmount),
            "review" => Ok(WizardStep::Review),
            "submitting" => Ok(WizardStep::Submitting),
            "success" => Ok(WizardStep::Success),
            _ => Err(format!("Unknown wizard step: {}", s)),
        }
    }
}

impl std::fmt::Display for WizardStep {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Form fields collected across the wizard steps
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TransferDraft {
    #[serde(default)]
    pub from_account: String,
    #[serde(default)]
    pub to_account: String,
    /// Raw text as typed; parsed only at the gates
    #[serde(default)]
    pub amount: String,
    #[serde(default)]
    pub description: String,
}

impl TransferDraft {
    pub fn description_or_default(&self) -> &str {
        let description = self.description.trim();
        if description.is_empty() {
            DEFAULT_DESCRIPTION
        } else {
            description
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
pub enum WizardError {
    #[error("Please select both source and destination accounts")]
    MissingAccounts,

    #[error("Please enter a valid amount")]
    InvalidAmount,

    #[error("Source and destination accounts must be different")]
    SameAccount,

    /// `available` is left for the view to format with the currency
    #[error("Insufficient balance")]
    InsufficientBalance { available: Decimal },

    #[error("Cannot {action} from step {step}")]
    WrongStep { action: &'static str, step: WizardStep },

    /// The transaction service refused or could not be reached
    #[error("{0}")]
    Rejected(String),
}

/// Parse a free-text amount; must be a decimal strictly greater than zero.
///
/// Only plain digits with at most one decimal point are accepted, so
/// separators (`1_000`), exponents (`1e3`) and signs are rejected.
pub fn parse_amount(input: &str) -> Result<Decimal, WizardError> {
    let text = input.trim();
    let plain = text.chars().all(|c| c.is_ascii_digit() || c == '.')
        && text.matches('.').count() <= 1
        && text.chars().any(|c| c.is_ascii_digit());
    if !plain {
        return Err(WizardError::InvalidAmount);
    }
    let amount = Decimal::from_str(text).map_err(|_| WizardError::InvalidAmount)?;
    if amount <= Decimal::ZERO {
        return Err(WizardError::InvalidAmount);
    }
    Ok(amount)
}

/// The wizard: a step tag, the draft and the outcome of the last action
#[derive(Debug, Clone, Default)]
pub struct TransferWizard {
    step: WizardStep,
    draft: TransferDraft,
    error: Option<WizardError>,
    receipt: Option<Transaction>,
}

impl TransferWizard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rebuild a wizard from a step tag and draft carried by the client.
    ///
    /// Forward gates are replayed from the first step; restoration stops at
    /// the first gate that fails, so a forged step cannot skip validation.
    /// `Submitting` and `Success` are never restored, they clamp to `Review`.
    pub fn restore(step: WizardStep, draft: TransferDraft) -> Self {
        let target = step.min(WizardStep::Review);
        let mut wizard = Self { draft, ..Self::default() };
        while wizard.step < target {
            if wizard.next().is_err() {
                wizard.error = None;
                break;
            }
        }
        wizard
    }

    pub fn step(&self) -> WizardStep {
        self.step
    }

    pub fn draft(&self) -> &TransferDraft {
        &self.draft
    }

    /// Replace the draft fields; ignored once a submission is under way
    pub fn update_draft(&mut self, draft: TransferDraft) {
        if self.step < WizardStep::Submitting {
            self.draft = draft;
        }
    }

    /// Validation or submission error from the last action
    pub fn error(&self) -> Option<&WizardError> {
        self.error.as_ref()
    }

    /// Transaction returned by the service after a successful submission
    pub fn receipt(&self) -> Option<&Transaction> {
        self.receipt.as_ref()
    }

    /// Parsed amount of the draft, if valid
    pub fn amount(&self) -> Option<Decimal> {
        parse_amount(&self.draft.amount).ok()
    }

    /// Advance through the gate of the current step
    pub fn next(&mut self) -> Result<WizardStep, WizardError> {
        let result = match self.step {
            WizardStep::SelectAccounts => {
                if self.draft.from_account.trim().is_empty() || self.draft.to_account.trim().is_empty() {
                    Err(WizardError::MissingAccounts)
                } else {
                    Ok(WizardStep::EnterAmount)
                }
            }
            WizardStep::EnterAmount => parse_amount(&self.draft.amount).map(|_| WizardStep::Review),
            step => Err(WizardError::WrongStep { action: "advance", step }),
        };
        self.settle(result)
    }

    /// Go back one step keeping every field
    pub fn back(&mut self) -> Result<WizardStep, WizardError> {
        let result = match self.step {
            WizardStep::EnterAmount => Ok(WizardStep::SelectAccounts),
            WizardStep::Review => Ok(WizardStep::EnterAmount),
            step => Err(WizardError::WrongStep { action: "go back", step }),
        };
        self.settle(result)
    }

    /// Confirm on the review step.
    ///
    /// Re-checks the draft against the locally known `accounts`; the balance
    /// check is skipped when the source account is not among them. On
    /// success moves to `Submitting` and returns the payload to send.
    pub fn prepare_submit(&mut self, accounts: &[Account]) -> Result<TransferRequest, WizardError> {
        let checked = self.check_submission(accounts);
        match checked {
            Ok(request) => {
                self.step = WizardStep::Submitting;
                self.error = None;
                Ok(request)
            }
            Err(e) => {
                self.error = Some(e.clone());
                Err(e)
            }
        }
    }

    fn check_submission(&self, accounts: &[Account]) -> Result<TransferRequest, WizardError> {
        if self.step != WizardStep::Review {
            return Err(WizardError::WrongStep { action: "submit", step: self.step });
        }
        let from = self.draft.from_account.trim();
        let to = self.draft.to_account.trim();
        if from.is_empty() || to.is_empty() {
            return Err(WizardError::MissingAccounts);
        }
        if from == to {
            return Err(WizardError::SameAccount);
        }
        let amount = parse_amount(&self.draft.amount)?;
        if let Some(source) = accounts.iter().find(|a| a.account_number == from) {
            if amount > source.balance {
                return Err(WizardError::InsufficientBalance { available: source.balance });
            }
        }
        Ok(TransferRequest {
            from_account: from.to_string(),
            to_account: to.to_string(),
            amount,
            description: self.draft.description_or_default().to_string(),
        })
    }

    /// Record the service's answer to a submission
    pub fn complete(&mut self, outcome: ClientResult<Transaction>) -> Result<&Transaction, WizardError> {
        if self.step != WizardStep::Submitting {
            return Err(WizardError::WrongStep { action: "complete", step: self.step });
        }
        match outcome {
            Ok(transaction) => {
                log::info!("Transfer {} accepted", transaction.transaction_id);
                self.step = WizardStep::Success;
                self.error = None;
                Ok(self.receipt.insert(transaction))
            }
            Err(e) => {
                log::warn!("Transfer rejected: {}", e);
                let error = WizardError::Rejected(e.operator_message(TRANSFER_FAILED_MESSAGE));
                self.step = WizardStep::Review;
                self.error = Some(error.clone());
                Err(error)
            }
        }
    }

    /// Validate, send one transfer request and record the outcome.
    ///
    /// On success both cached lists are invalidated. Validation failures
    /// make no network call.
    pub async fn submit(
        &mut self,
        service: &dyn TransactionService,
        cache: &QueryCache,
        accounts: &[Account],
    ) -> Result<&Transaction, WizardError> {
        let request = self.prepare_submit(accounts)?;
        let outcome = service.transfer(&request).await;
        if outcome.is_ok() {
            cache.invalidate(Resource::Accounts).await;
            cache.invalidate(Resource::Transactions).await;
        }
        self.complete(outcome)
    }

    /// Discard the draft and start over
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    fn settle(&mut self, result: Result<WizardStep, WizardError>) -> Result<WizardStep, WizardError> {
        match &result {
            Ok(step) => {
                self.step = *step;
                self.error = None;
            }
            Err(e) => self.error = Some(e.clone()),
        }
        result
    }
}
