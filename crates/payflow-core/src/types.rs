//! Status enumerations reported by the backend services
//!
//! Both services may grow new states; unknown values are kept verbatim in
//! an `Other` variant instead of failing deserialization.

use serde::{Deserialize, Serialize};

/// Account status enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum AccountStatus {
    /// Account is open and can send or receive money
    #[default]
    Active,
    /// Any other status reported by the account service
    Other(String),
}

impl AccountStatus {
    pub fn is_active(&self) -> bool {
        matches!(self, AccountStatus::Active)
    }
}

impl From<String> for AccountStatus {
    fn from(s: String) -> Self {
        if s.trim().is_empty() || s.eq_ignore_ascii_case("active") {
            AccountStatus::Active
        } else {
            AccountStatus::Other(s)
        }
    }
}

impl From<AccountStatus> for String {
    fn from(status: AccountStatus) -> Self {
        status.to_string()
    }
}

impl std::fmt::Display for AccountStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AccountStatus::Active => write!(f, "ACTIVE"),
            AccountStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Transaction status enumeration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(from = "String", into = "String")]
pub enum TransactionStatus {
    /// Money has moved on both sides
    Completed,
    /// Accepted, not yet settled
    #[default]
    Pending,
    /// Rejected or rolled back
    Failed,
    /// Intermediate backend states such as `DEBIT_INITIATED`
    Other(String),
}

impl TransactionStatus {
    pub fn is_completed(&self) -> bool {
        matches!(self, TransactionStatus::Completed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, TransactionStatus::Failed)
    }

    /// Anything neither completed nor failed counts as pending
    pub fn is_pending(&self) -> bool {
        !self.is_completed() && !self.is_failed()
    }
}

impl From<String> for TransactionStatus {
    fn from(s: String) -> Self {
        match s.to_uppercase().as_str() {
            "COMPLETED" => TransactionStatus::Completed,
            "PENDING" => TransactionStatus::Pending,
            "FAILED" => TransactionStatus::Failed,
            _ => TransactionStatus::Other(s),
        }
    }
}

impl From<TransactionStatus> for String {
    fn from(status: TransactionStatus) -> Self {
        status.to_string()
    }
}

impl std::fmt::Display for TransactionStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            TransactionStatus::Completed => write!(f, "COMPLETED"),
            TransactionStatus::Pending => write!(f, "PENDING"),
            TransactionStatus::Failed => write!(f, "FAILED"),
            TransactionStatus::Other(s) => write!(f, "{}", s),
        }
    }
}

/// Status filter offered by the history view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum StatusFilter {
    #[default]
    All,
    Completed,
    Pending,
}

impl StatusFilter {
    pub fn matches(&self, status: &TransactionStatus) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Completed => status.is_completed(),
            StatusFilter::Pending => status.is_pending(),
        }
    }
}

impl std::str::FromStr for StatusFilter {
    type Err = String;
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "" | "all" => Ok(StatusFilter::All),
            "completed" => Ok(StatusFilter::Completed),
            "pending" => Ok(StatusFilter::Pending),
            _ => Err(format!("Invalid status filter: {}", s)),
        }
    }
}

impl std::fmt::Display for StatusFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StatusFilter::All => write!(f, "all"),
            StatusFilter::Completed => write!(f, "completed"),
            StatusFilter::Pending => write!(f, "pending"),
        }
    }
}
