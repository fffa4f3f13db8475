//! Summaries behind the dashboard and history views

use std::collections::HashMap;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::models::{Account, Transaction};
use super::types::StatusFilter;

/// Label shown for an account number that is not in the loaded list
pub const UNKNOWN_HOLDER: &str = "Unknown";

/// Account number to holder name lookup
#[derive(Debug, Default)]
pub struct HolderDirectory<'a> {
    names: HashMap<&'a str, &'a str>,
}

impl<'a> HolderDirectory<'a> {
    pub fn new(accounts: &'a [Account]) -> Self {
        Self {
            names: accounts
                .iter()
                .map(|a| (a.account_number.as_str(), a.holder_name.as_str()))
                .collect(),
        }
    }

    pub fn get(&self, account_number: &str) -> Option<&'a str> {
        self.names.get(account_number).copied()
    }

    /// Holder name or [`UNKNOWN_HOLDER`]
    pub fn label(&self, account_number: &str) -> &'a str {
        self.get(account_number).unwrap_or(UNKNOWN_HOLDER)
    }
}

/// A transaction with both holder names resolved
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionRow {
    #[serde(flatten)]
    pub transaction: Transaction,
    pub from_holder: String,
    pub to_holder: String,
}

impl TransactionRow {
    pub fn new(transaction: &Transaction, holders: &HolderDirectory<'_>) -> Self {
        Self {
            from_holder: holders.label(&transaction.from_account).to_string(),
            to_holder: holders.label(&transaction.to_account).to_string(),
            transaction: transaction.clone(),
        }
    }
}

/// Dashboard figures
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    #[serde(with = "rust_decimal::serde::float")]
    pub total_balance: Decimal,
    pub account_count: usize,
    /// The first `limit` transactions in service order
    pub recent_transactions: Vec<TransactionRow>,
}

impl DashboardSummary {
    pub fn build(accounts: &[Account], transactions: &[Transaction], limit: usize) -> Self {
        let holders = HolderDirectory::new(accounts);
        Self {
            total_balance: accounts.iter().map(|a| a.balance).sum(),
            account_count: accounts.len(),
            recent_transactions: transactions
                .iter()
                .take(limit)
                .map(|tx| TransactionRow::new(tx, &holders))
                .collect(),
        }
    }
}

/// Search box and status buttons of the history view
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionFilter {
    #[serde(default)]
    pub query: String,
    #[serde(default)]
    pub status: StatusFilter,
}

impl TransactionFilter {
    pub fn new(query: &str, status: StatusFilter) -> Self {
        Self {
            query: query.trim().to_string(),
            status,
        }
    }

    /// Whether the operator narrowed the list at all
    pub fn is_active(&self) -> bool {
        !self.query.is_empty() || self.status != StatusFilter::All
    }

    /// Case-insensitive match on both account numbers, the transaction id
    /// and both holder names, combined with the status filter
    pub fn matches(&self, tx: &Transaction, holders: &HolderDirectory<'_>) -> bool {
        if !self.status.matches(&tx.status) {
            return false;
        }
        if self.query.is_empty() {
            return true;
        }
        let needle = self.query.to_lowercase();
        let contains = |s: &str| s.to_lowercase().contains(&needle);

        contains(&tx.from_account)
            || contains(&tx.to_account)
            || contains(&tx.transaction_id)
            || holders.get(&tx.from_account).is_some_and(contains)
            || holders.get(&tx.to_account).is_some_and(contains)
    }

    pub fn apply(&self, transactions: &[Transaction], accounts: &[Account]) -> Vec<TransactionRow> {
        let holders = HolderDirectory::new(accounts);
        transactions
            .iter()
            .filter(|tx| self.matches(tx, &holders))
            .map(|tx| TransactionRow::new(tx, &holders))
            .collect()
    }
}

/// Counts shown in the history stats bar, over the unfiltered list
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransactionStats {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
    pub failed: usize,
}

impl TransactionStats {
    pub fn from_transactions(transactions: &[Transaction]) -> Self {
        transactions.iter().fold(Self::default(), |mut stats, tx| {
            stats.total += 1;
            if tx.status.is_completed() {
                stats.completed += 1;
            } else if tx.status.is_failed() {
                stats.failed += 1;
            } else {
                stats.pending += 1;
            }
            stats
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionStatus;

    fn account(number: &str, holder: &str, balance: i64) -> Account {
        Account {
            id: 0,
            account_number: number.to_string(),
            holder_name: holder.to_string(),
            email: String::new(),
            balance: Decimal::from(balance),
            status: Default::default(),
            created_at: None,
            updated_at: None,
        }
    }

    fn tx(id: &str, from: &str, to: &str, status: TransactionStatus) -> Transaction {
        Transaction {
            id: 0,
            transaction_id: id.to_string(),
            from_account: from.to_string(),
            to_account: to.to_string(),
            amount: Decimal::from(10),
            status,
            failure_reason: None,
            created_at: None,
            completed_at: None,
        }
    }

    fn sample() -> (Vec<Account>, Vec<Transaction>) {
        let accounts = vec![account("ACC1", "Asha Rao", 1000), account("ACC2", "Ravi Kumar", 250)];
        let transactions = vec![
            tx("TXN-A", "ACC1", "ACC2", TransactionStatus::Completed),
            tx("TXN-B", "ACC2", "ACC9", TransactionStatus::Other("DEBIT_COMPLETED".to_string())),
            tx("TXN-C", "ACC2", "ACC1", TransactionStatus::Failed),
        ];
        (accounts, transactions)
    }

    #[test]
    fn test_dashboard_summary() {
        let (accounts, transactions) = sample();
        let summary = DashboardSummary::build(&accounts, &transactions, 2);
        assert_eq!(summary.total_balance, Decimal::from(1250));
        assert_eq!(summary.account_count, 2);
        assert_eq!(summary.recent_transactions.len(), 2);
        assert_eq!(summary.recent_transactions[0].from_holder, "Asha Rao");
        assert_eq!(summary.recent_transactions[1].to_holder, UNKNOWN_HOLDER);
    }

    #[test]
    fn test_empty_dashboard() {
        let summary = DashboardSummary::build(&[], &[], 5);
        assert_eq!(summary.total_balance, Decimal::ZERO);
        assert!(summary.recent_transactions.is_empty());
    }

    #[test]
    fn test_search_by_holder_name_case_insensitive() {
        let (accounts, transactions) = sample();
        let rows = TransactionFilter::new("ravi", StatusFilter::All).apply(&transactions, &accounts);
        assert_eq!(rows.len(), 3);

        let rows = TransactionFilter::new("ASHA", StatusFilter::All).apply(&transactions, &accounts);
        let ids: Vec<_> = rows.iter().map(|r| r.transaction.transaction_id.as_str()).collect();
        assert_eq!(ids, vec!["TXN-A", "TXN-C"]);
    }

    #[test]
    fn test_search_by_transaction_id_and_number() {
        let (accounts, transactions) = sample();
        assert_eq!(TransactionFilter::new("txn-b", StatusFilter::All).apply(&transactions, &accounts).len(), 1);
        assert_eq!(TransactionFilter::new("acc9", StatusFilter::All).apply(&transactions, &accounts).len(), 1);
        assert!(TransactionFilter::new("nobody", StatusFilter::All).apply(&transactions, &accounts).is_empty());
    }

    #[test]
    fn test_status_filter_pending_excludes_failed() {
        let (accounts, transactions) = sample();
        let rows = TransactionFilter::new("", StatusFilter::Pending).apply(&transactions, &accounts);
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].transaction.transaction_id, "TXN-B");

        let filter = TransactionFilter::new(" ", StatusFilter::All);
        assert!(!filter.is_active());
        assert!(TransactionFilter::new("", StatusFilter::Completed).is_active());
    }

    #[test]
    fn test_stats() {
        let (_, transactions) = sample();
        let stats = TransactionStats::from_transactions(&transactions);
        assert_eq!(stats, TransactionStats { total: 3, completed: 1, pending: 1, failed: 1 });
    }
}
