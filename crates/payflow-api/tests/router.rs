//! Router tests against in-memory account and transaction services

use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, StatusCode};
use payflow_api::{create_router, AppState};
use payflow_config::Config;
use payflow_core::{
    Account, AccountService, BalanceUpdateRequest, ClientError, ClientResult, CreateAccountRequest, Resource,
    Transaction, TransactionService, TransactionStatus, TransferRequest,
};
use rust_decimal::Decimal;
use serde_json::Value;
use tower::ServiceExt;

fn account(id: i64, number: &str, holder: &str, balance: i64) -> Account {
    Account {
        id,
        account_number: number.to_string(),
        holder_name: holder.to_string(),
        email: format!("{}@example.com", number.to_lowercase()),
        balance: Decimal::from(balance),
        status: Default::default(),
        created_at: None,
        updated_at: None,
    }
}

fn transaction(id: &str, from: &str, to: &str, status: TransactionStatus) -> Transaction {
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

fn not_found(what: &str) -> ClientError {
    ClientError::Http {
        url: format!("/api/{}", what),
        status: 404,
        message: Some(format!("{} not found", what)),
    }
}

#[derive(Default)]
struct FakeAccounts {
    accounts: Vec<Account>,
    listed: Mutex<usize>,
    created: Mutex<Vec<CreateAccountRequest>>,
    deleted: Mutex<Vec<i64>>,
    reject_create: Option<&'static str>,
}

#[async_trait]
impl AccountService for FakeAccounts {
    async fn list(&self) -> ClientResult<Vec<Account>> {
        *self.listed.lock().unwrap() += 1;
        Ok(self.accounts.clone())
    }

    async fn get_by_id(&self, id: i64) -> ClientResult<Account> {
        self.accounts.iter().find(|a| a.id == id).cloned().ok_or_else(|| not_found("account"))
    }

    async fn get_by_account_number(&self, account_number: &str) -> ClientResult<Account> {
        self.accounts
            .iter()
            .find(|a| a.account_number == account_number)
            .cloned()
            .ok_or_else(|| not_found("account"))
    }

    async fn create(&self, payload: &CreateAccountRequest) -> ClientResult<Account> {
        self.created.lock().unwrap().push(payload.clone());
        if let Some(message) = self.reject_create {
            return Err(ClientError::Http {
                url: "/api/accounts".to_string(),
                status: 400,
                message: Some(message.to_string()),
            });
        }
        Ok(account(99, "ACC99", &payload.holder_name, 0))
    }

    async fn update_balance(&self, id: i64, _payload: &BalanceUpdateRequest) -> ClientResult<Account> {
        self.get_by_id(id).await
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        self.deleted.lock().unwrap().push(id);
        Ok(())
    }
}

#[derive(Default)]
struct FakeTransactions {
    transactions: Vec<Transaction>,
    transfers: Mutex<Vec<TransferRequest>>,
    reject: Option<&'static str>,
}

#[async_trait]
impl TransactionService for FakeTransactions {
    async fn list(&self) -> ClientResult<Vec<Transaction>> {
        Ok(self.transactions.clone())
    }

    async fn get_by_id(&self, transaction_id: &str) -> ClientResult<Transaction> {
        self.transactions
            .iter()
            .find(|t| t.transaction_id == transaction_id)
            .cloned()
            .ok_or_else(|| not_found("transaction"))
    }

    async fn get_by_account_number(&self, account_number: &str) -> ClientResult<Vec<Transaction>> {
        Ok(self.transactions.iter().filter(|t| t.from_account == account_number || t.to_account == account_number).cloned().collect())
    }

    async fn transfer(&self, payload: &TransferRequest) -> ClientResult<Transaction> {
        self.transfers.lock().unwrap().push(payload.clone());
        if let Some(message) = self.reject {
            return Err(ClientError::Http {
                url: "/api/transactions".to_string(),
                status: 400,
                message: Some(message.to_string()),
            });
        }
        let mut receipt = transaction("TXN5F3A9C21", &payload.from_account, &payload.to_account, TransactionStatus::Completed);
        receipt.amount = payload.amount;
        Ok(receipt)
    }
}

struct Harness {
    state: AppState,
    accounts: Arc<FakeAccounts>,
    transactions: Arc<FakeTransactions>,
}

impl Harness {
    fn new(accounts: FakeAccounts, transactions: FakeTransactions) -> Self {
        let config = Config::default();
        let routes = config.routes();
        let accounts = Arc::new(accounts);
        let transactions = Arc::new(transactions);
        let state = AppState::new(config, routes, accounts.clone(), transactions.clone());
        Self { state, accounts, transactions }
    }

    fn populated() -> Self {
        Self::new(
            FakeAccounts {
                accounts: vec![account(1, "ACC1", "Asha Rao", 1000), account(2, "ACC2", "Ravi Kumar", 50)],
                ..FakeAccounts::default()
            },
            FakeTransactions {
                transactions: vec![
                    transaction("TXN-A", "ACC1", "ACC2", TransactionStatus::Completed),
                    transaction("TXN-B", "ACC2", "ACC9", TransactionStatus::Pending),
                    transaction("TXN-C", "ACC2", "ACC1", TransactionStatus::Failed),
                ],
                ..FakeTransactions::default()
            },
        )
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = create_router(self.state.clone()).oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn get(&self, uri: &str) -> (StatusCode, String) {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap()).await
    }

    async fn htmx_get(&self, uri: &str) -> (StatusCode, String) {
        self.send(Request::builder().uri(uri).header("hx-request", "true").body(Body::empty()).unwrap())
            .await
    }

    async fn post_form(&self, uri: &str, body: &str) -> (StatusCode, String) {
        let request = Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/x-www-form-urlencoded")
            .header("hx-request", "true")
            .body(Body::from(body.to_string()))
            .unwrap();
        self.send(request).await
    }
}

#[tokio::test]
async fn test_health_and_routing() {
    let harness = Harness::populated();
    let (status, body) = harness.get("/api/health").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, "OK");

    let (_, body) = harness.get("/api/routing").await;
    let routing: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(routing["mode"], "relative");
    assert_eq!(routing["accountBaseUrl"], "");
    assert_eq!(routing["origin"], "http://localhost");
}

#[tokio::test]
async fn test_dashboard_full_page_and_partial() {
    let harness = Harness::populated();
    let (_, page) = harness.get("/").await;
    assert!(page.contains("<!DOCTYPE html>"));
    assert!(page.contains("<aside"));
    assert!(page.contains("hx-get='/dashboard/content'"));

    let (_, partial) = harness.htmx_get("/dashboard").await;
    assert!(!partial.contains("<aside"));
    assert!(partial.contains("hx-get='/dashboard/content'"));
}

#[tokio::test]
async fn test_dashboard_content_totals_and_unknown_holder() {
    let harness = Harness::populated();
    let (_, body) = harness.get("/dashboard/content").await;
    assert!(body.contains("₹1,050.00"));
    assert!(body.contains("Asha Rao"));
    assert!(body.contains("Unknown"));

    let (_, body) = harness.get("/api/summary").await;
    let summary: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(summary["accountCount"], 2);
    assert_eq!(summary["totalBalance"], 1050.0);
    assert_eq!(summary["recentTransactions"][1]["toHolder"], "Unknown");
}

#[tokio::test]
async fn test_dashboard_empty_state() {
    let harness = Harness::new(FakeAccounts::default(), FakeTransactions::default());
    let (_, body) = harness.get("/dashboard/content").await;
    assert!(body.contains("No transactions yet"));
    assert!(body.contains("₹0.00"));
}

#[tokio::test]
async fn test_transactions_search_and_status() {
    let harness = Harness::populated();
    let (_, body) = harness.get("/transactions/list?q=ravi&status=pending").await;
    assert!(body.contains("TXN-B"));
    assert!(!body.contains("TXN-A"));
    assert!(!body.contains("TXN-C"));

    let (_, body) = harness.get("/transactions/list?q=nobody").await;
    assert!(body.contains("No matching transactions"));

    let (_, body) = harness.get("/transactions/list?status=bogus").await;
    assert!(body.contains("TXN-A") && body.contains("TXN-C"));

    let (status, _) = harness.get("/api/transactions?status=bogus").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (_, body) = harness.get("/api/transactions?status=completed").await;
    let response: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(response["totalCount"], 1);
    assert_eq!(response["stats"]["total"], 3);
}

#[tokio::test]
async fn test_history_refresh_refetches_both_lists() {
    let harness = Harness::populated();
    harness.get("/transactions/list").await;
    harness.get("/transactions/list?q=asha").await;
    assert_eq!(*harness.accounts.listed.lock().unwrap(), 1);

    let (_, body) = harness.get("/transactions/list?refresh=1").await;
    assert!(body.contains("TXN-A"));
    assert_eq!(*harness.accounts.listed.lock().unwrap(), 2);
    assert!(!harness.state.cache.is_stale(Resource::Transactions).await);
}

#[tokio::test]
async fn test_transactions_empty_history() {
    let harness = Harness::new(FakeAccounts::default(), FakeTransactions::default());
    let (_, body) = harness.get("/transactions/list").await;
    assert!(body.contains("No transactions yet"));
}

#[tokio::test]
async fn test_transfer_success_shows_receipt_and_invalidates() {
    let harness = Harness::populated();
    harness.get("/dashboard/content").await;
    assert!(!harness.state.cache.is_stale(Resource::Accounts).await);

    let (_, body) = harness
        .post_form("/transfer", "step=review&action=submit&from_account=ACC1&to_account=ACC2&amount=500&description=")
        .await;
    assert!(body.contains("Transfer Successful!"));
    assert!(body.contains("TXN5F3A9C21"));
    assert!(body.contains("₹500.00"));

    let transfers = harness.transactions.transfers.lock().unwrap().clone();
    assert_eq!(transfers.len(), 1);
    assert_eq!(transfers[0].amount, Decimal::from(500));
    assert_eq!(transfers[0].description, "PayFlow Transfer");

    assert!(harness.state.cache.is_stale(Resource::Accounts).await);
    assert!(harness.state.cache.is_stale(Resource::Transactions).await);
}

#[tokio::test]
async fn test_transfer_validation_makes_no_call() {
    let harness = Harness::populated();

    let (_, body) = harness
        .post_form("/transfer", "step=review&action=submit&from_account=ACC1&to_account=ACC1&amount=5")
        .await;
    assert!(body.contains("must be different"));

    let (_, body) = harness
        .post_form("/transfer", "step=review&action=submit&from_account=ACC2&to_account=ACC1&amount=100")
        .await;
    assert!(body.contains("Insufficient balance: ₹50.00 available"));
    assert!(body.contains("value='review'"));

    let (_, body) = harness
        .post_form("/transfer", "step=select_accounts&action=next&from_account=ACC1&to_account=")
        .await;
    assert!(body.contains("Please select both source and destination accounts"));

    assert!(harness.transactions.transfers.lock().unwrap().is_empty());
}

#[tokio::test]
async fn test_transfer_rejected_returns_to_review() {
    let harness = Harness::new(
        FakeAccounts { accounts: vec![account(1, "ACC1", "Asha Rao", 1000)], ..FakeAccounts::default() },
        FakeTransactions { reject: Some("Insufficient funds in ACC1"), ..FakeTransactions::default() },
    );

    let (_, body) = harness
        .post_form("/transfer", "step=review&action=submit&from_account=ACC1&to_account=ACC2&amount=10")
        .await;
    assert!(body.contains("Insufficient funds in ACC1"));
    assert!(body.contains("value='review'"));
    assert_eq!(harness.transactions.transfers.lock().unwrap().len(), 1);
}

#[tokio::test]
async fn test_transfer_page_prefills_source() {
    let harness = Harness::populated();
    let (_, body) = harness.htmx_get("/transfer?from=ACC2").await;
    assert!(body.contains("<option value='ACC2' selected>"));
}

#[tokio::test]
async fn test_create_account_with_blank_balance() {
    let harness = Harness::populated();
    let (_, body) = harness
        .post_form("/accounts", "holder_name=Meera+Iyer&email=meera%40example.com&initial_balance=")
        .await;
    assert!(body.contains("Account created successfully!"));

    let created = harness.accounts.created.lock().unwrap().clone();
    assert_eq!(created.len(), 1);
    assert_eq!(created[0].holder_name, "Meera Iyer");
    assert_eq!(created[0].initial_balance, Decimal::ZERO);
}

#[tokio::test]
async fn test_create_account_shows_service_message() {
    let harness = Harness::new(
        FakeAccounts { reject_create: Some("Email already registered"), ..FakeAccounts::default() },
        FakeTransactions::default(),
    );
    let (_, body) = harness.post_form("/accounts", "holder_name=A&email=a%40b.c&initial_balance=10").await;
    assert!(body.contains("Email already registered"));
    assert!(!body.contains("Account created successfully!"));
}

#[tokio::test]
async fn test_delete_requires_confirmation() {
    let harness = Harness::populated();

    let (_, body) = harness.htmx_get("/accounts/2/delete").await;
    assert!(body.contains("Are you sure you want to delete Ravi Kumar (ACC2)?"));

    let (_, body) = harness.post_form("/accounts/2/delete", "").await;
    assert!(body.contains("Are you sure"));
    assert!(harness.accounts.deleted.lock().unwrap().is_empty());

    let (_, body) = harness.post_form("/accounts/2/delete", "confirm=yes").await;
    assert!(body.contains("Account deleted successfully!"));
    assert_eq!(*harness.accounts.deleted.lock().unwrap(), vec![2]);
}

#[tokio::test]
async fn test_review_form_guards_against_double_confirm() {
    let harness = Harness::populated();
    let (_, body) = harness
        .post_form("/transfer", "step=enter_amount&action=next&from_account=ACC1&to_account=ACC2&amount=25")
        .await;
    assert!(body.contains("Confirm Transfer"));
    assert!(body.contains("value='review'"));

    let form_start = body.find("<form").unwrap();
    let form_tag = &body[form_start..form_start + body[form_start..].find('>').unwrap()];
    assert!(form_tag.contains("hx-sync='this:drop'"));
    assert!(form_tag.contains("hx-disabled-elt='find button'"));
    assert!(form_tag.contains("hx-indicator='#transfer-pending'"));
    assert!(body.contains("id='transfer-pending' class='htmx-indicator"));

    assert!(harness.transactions.transfers.lock().unwrap().is_empty());
}
