//! HTTP clients for the account and transaction services
//!
//! One client per logical service. Each operation issues exactly one request
//! to `<base url><fixed path>` and returns the decoded JSON body. The base
//! URL comes from the routing resolved at startup; in relative mode it is
//! empty and paths resolve against the configured public origin.

use async_trait::async_trait;
use payflow_config::ServiceRoutes;
use reqwest::header::ACCEPT;
use reqwest::{Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;

use crate::error::{extract_message, ClientError, ClientResult};
use crate::models::{Account, BalanceUpdateRequest, CreateAccountRequest, Transaction, TransferRequest};

/// Operations offered by the account service
#[async_trait]
pub trait AccountService: Send + Sync {
    /// `GET /api/accounts`
    async fn list(&self) -> ClientResult<Vec<Account>>;
    /// `GET /api/accounts/{id}`
    async fn get_by_id(&self, id: i64) -> ClientResult<Account>;
    /// `GET /api/accounts/number/{accountNumber}`
    async fn get_by_account_number(&self, account_number: &str) -> ClientResult<Account>;
    /// `POST /api/accounts`
    async fn create(&self, payload: &CreateAccountRequest) -> ClientResult<Account>;
    /// `PUT /api/accounts/{id}/balance`
    async fn update_balance(&self, id: i64, payload: &BalanceUpdateRequest) -> ClientResult<Account>;
    /// `DELETE /api/accounts/{id}`
    async fn delete(&self, id: i64) -> ClientResult<()>;
}

/// Operations offered by the transaction service
#[async_trait]
pub trait TransactionService: Send + Sync {
    /// `GET /api/transactions`
    async fn list(&self) -> ClientResult<Vec<Transaction>>;
    /// `GET /api/transactions/{id}`
    async fn get_by_id(&self, transaction_id: &str) -> ClientResult<Transaction>;
    /// `GET /api/transactions/account/{accountNumber}`
    async fn get_by_account_number(&self, account_number: &str) -> ClientResult<Vec<Transaction>>;
    /// `POST /api/transactions`
    async fn transfer(&self, payload: &TransferRequest) -> ClientResult<Transaction>;
}

/// Build the shared HTTP client
pub fn build_http_client() -> ClientResult<reqwest::Client> {
    reqwest::Client::builder()
        .user_agent(concat!("payflow-web/", env!("CARGO_PKG_VERSION")))
        .build()
        .map_err(|e| ClientError::Transport {
            url: String::new(),
            message: format!("Failed to create HTTP client: {}", e),
        })
}

/// JSON-over-HTTP plumbing for one base URL
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    prefix: String,
}

impl HttpTransport {
    /// `base_url` empty means relative mode: paths go to `origin`
    pub fn new(client: reqwest::Client, base_url: &str, origin: &str) -> Self {
        let prefix = if base_url.is_empty() { origin } else { base_url };
        Self {
            client,
            prefix: prefix.trim_end_matches('/').to_string(),
        }
    }

    /// Absolute URL for an API path
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.prefix, path)
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        let url = self.url(path);
        let response = self.execute(&url, self.request(Method::GET, &url)).await?;
        decode(&url, response).await
    }

    async fn send<B, T>(&self, method: Method, path: &str, body: &B) -> ClientResult<T>
    where
        B: Serialize + ?Sized + Sync,
        T: DeserializeOwned,
    {
        let url = self.url(path);
        let response = self.execute(&url, self.request(method, &url).json(body)).await?;
        decode(&url, response).await
    }

    async fn delete(&self, path: &str) -> ClientResult<()> {
        let url = self.url(path);
        self.execute(&url, self.request(Method::DELETE, &url)).await?;
        Ok(())
    }

    fn request(&self, method: Method, url: &str) -> RequestBuilder {
        log::debug!("{} {}", method, url);
        self.client.request(method, url).header(ACCEPT, "application/json")
    }

    /// Send and turn non-2xx statuses into `ClientError::Http`
    async fn execute(&self, url: &str, request: RequestBuilder) -> ClientResult<Response> {
        let response = request.send().await.map_err(|e| {
            log::warn!("Request to {} failed: {}", url, e);
            ClientError::Transport {
                url: url.to_string(),
                message: e.to_string(),
            }
        })?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        let message = extract_message(&body);
        log::warn!("{} answered HTTP {}: {}", url, status.as_u16(), message.as_deref().unwrap_or("<no message>"));
        Err(ClientError::Http {
            url: url.to_string(),
            status: status.as_u16(),
            message,
        })
    }
}

async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> ClientResult<T> {
    let bytes = response.bytes().await.map_err(|e| ClientError::Transport {
        url: url.to_string(),
        message: e.to_string(),
    })?;
    serde_json::from_slice(&bytes).map_err(|e| ClientError::Decode {
        url: url.to_string(),
        message: e.to_string(),
    })
}

fn segment(value: &str) -> String {
    urlencoding::encode(value).into_owned()
}

/// Account service client
#[derive(Debug, Clone)]
pub struct AccountClient {
    transport: HttpTransport,
}

impl AccountClient {
    pub fn new(client: reqwest::Client, routes: &ServiceRoutes, origin: &str) -> Self {
        Self {
            transport: HttpTransport::new(client, &routes.account_base_url, origin),
        }
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }
}

#[async_trait]
impl AccountService for AccountClient {
    async fn list(&self) -> ClientResult<Vec<Account>> {
        self.transport.get("/api/accounts").await
    }

    async fn get_by_id(&self, id: i64) -> ClientResult<Account> {
        self.transport.get(&format!("/api/accounts/{}", id)).await
    }

    async fn get_by_account_number(&self, account_number: &str) -> ClientResult<Account> {
        self.transport
            .get(&format!("/api/accounts/number/{}", segment(account_number)))
            .await
    }

    async fn create(&self, payload: &CreateAccountRequest) -> ClientResult<Account> {
        self.transport.send(Method::POST, "/api/accounts", payload).await
    }

    async fn update_balance(&self, id: i64, payload: &BalanceUpdateRequest) -> ClientResult<Account> {
        self.transport
            .send(Method::PUT, &format!("/api/accounts/{}/balance", id), payload)
            .await
    }

    async fn delete(&self, id: i64) -> ClientResult<()> {
        self.transport.delete(&format!("/api/accounts/{}", id)).await
    }
}

/// Transaction service client
#[derive(Debug, Clone)]
pub struct TransactionClient {
    transport: HttpTransport,
}

impl TransactionClient {
    pub fn new(client: reqwest::Client, routes: &ServiceRoutes, origin: &str) -> Self {
        Self {
            transport: HttpTransport::new(client, &routes.transaction_base_url, origin),
        }
    }

    pub fn transport(&self) -> &HttpTransport {
        &self.transport
    }
}

#[async_trait]
impl TransactionService for TransactionClient {
    async fn list(&self) -> ClientResult<Vec<Transaction>> {
        self.transport.get("/api/transactions").await
    }

    async fn get_by_id(&self, transaction_id: &str) -> ClientResult<Transaction> {
        self.transport
            .get(&format!("/api/transactions/{}", segment(transaction_id)))
            .await
    }

    async fn get_by_account_number(&self, account_number: &str) -> ClientResult<Vec<Transaction>> {
        self.transport
            .get(&format!("/api/transactions/account/{}", segment(account_number)))
            .await
    }

    async fn transfer(&self, payload: &TransferRequest) -> ClientResult<Transaction> {
        self.transport.send(Method::POST, "/api/transactions", payload).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use payflow_config::{ApiConfig, RoutingMode};

    fn routes(mode: RoutingMode) -> ServiceRoutes {
        let api = ApiConfig {
            use_direct: mode == RoutingMode::Direct,
            use_gateway: mode == RoutingMode::Gateway,
            ..ApiConfig::default()
        };
        ServiceRoutes::resolve(&api)
    }

    #[test]
    fn test_direct_mode_urls() {
        let http = reqwest::Client::new();
        let r = routes(RoutingMode::Direct);
        let accounts = AccountClient::new(http.clone(), &r, "http://localhost");
        let transactions = TransactionClient::new(http, &r, "http://localhost");
        assert_eq!(accounts.transport().url("/api/accounts"), "http://localhost:8081/api/accounts");
        assert_eq!(transactions.transport().url("/api/transactions"), "http://localhost:8082/api/transactions");
    }

    #[test]
    fn test_relative_mode_uses_origin() {
        let r = routes(RoutingMode::Relative);
        let accounts = AccountClient::new(reqwest::Client::new(), &r, "https://payflow.example/");
        assert_eq!(accounts.transport().url("/api/accounts/3"), "https://payflow.example/api/accounts/3");
    }

    #[test]
    fn test_gateway_mode_shares_prefix() {
        let http = reqwest::Client::new();
        let r = routes(RoutingMode::Gateway);
        let accounts = AccountClient::new(http.clone(), &r, "http://localhost");
        let transactions = TransactionClient::new(http, &r, "http://localhost");
        assert_eq!(accounts.transport().url(""), transactions.transport().url(""));
    }

    #[test]
    fn test_segment_encoding() {
        assert_eq!(segment("ACC 1/2"), "ACC%201%2F2");
        assert_eq!(segment("ACC1001"), "ACC1001");
    }
}
