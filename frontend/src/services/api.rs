use async_trait::async_trait;
use gloo::net::http::{Request, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::api::{authorization_header, should_redirect_to_login, ApiConfig, Endpoint, FinanceApi, Method, LOGIN_ROUTE};
use shared::filters::{Period, TransactionQuery};
use shared::{
    ApiError, Budget, BudgetDraft, BudgetStatus, BudgetUpdate, CategoryTotal, ExchangeRateInfo, MonthlyTrendPoint,
    RecordId, Summary, SyncRequest, SyncResponse, Transaction, TransactionDraft,
};
use web_sys::RequestCredentials;

use super::logging::Logger;
use super::storage;

/// API client for communicating with the backend server
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ApiClient {
    config: ApiConfig,
}

impl ApiClient {
    /// Client for the backend configured at build time
    pub fn new() -> Self {
        Self::default()
    }

    #[cfg(test)]
    pub fn with_base_url(base_url: &str) -> Self {
        Self {
            config: ApiConfig::with_backend_url(base_url),
        }
    }

    pub fn login_url(&self) -> String {
        self.config.login_url()
    }

    fn builder(&self, endpoint: &Endpoint) -> RequestBuilder {
        let url = self.config.url_for(endpoint);
        let builder = match endpoint.method {
            Method::Get => Request::get(&url),
            Method::Post => Request::post(&url),
            Method::Put => Request::put(&url),
            Method::Delete => Request::delete(&url),
        }
        .credentials(RequestCredentials::Include);

        // Cross-origin deployments can't rely on the session cookie
        match authorization_header(storage::session_token().as_deref()) {
            Some(value) => builder.header("Authorization", &value),
            None => builder,
        }
    }

    async fn send(&self, endpoint: Endpoint) -> Result<Response, ApiError> {
        let request = self
            .builder(&endpoint)
            .build()
            .map_err(|e| ApiError::Network(e.to_string()))?;
        self.dispatch(&endpoint, request).await
    }

    async fn send_json<B: Serialize>(&self, endpoint: Endpoint, body: &B) -> Result<Response, ApiError> {
        let request = self
            .builder(&endpoint)
            .json(body)
            .map_err(|e| ApiError::Decode(format!("Failed to serialize request: {}", e)))?;
        self.dispatch(&endpoint, request).await
    }

    async fn dispatch(&self, endpoint: &Endpoint, request: Request) -> Result<Response, ApiError> {
        let response = request.send().await.map_err(|e| {
            Logger::error_with_component("api", &format!("{} failed: {}", endpoint.describe(), e));
            ApiError::Network(e.to_string())
        })?;

        let status = response.status();
        if should_redirect_to_login(status, &storage::current_path()) {
            Logger::warn_with_component("api", "session expired, redirecting to login");
            storage::navigate_to(LOGIN_ROUTE);
        }
        if !response.ok() {
            let body = response.text().await.unwrap_or_default();
            let error = ApiError::from_response(status, &body);
            Logger::warn_with_component("api", &format!("{} -> {}", endpoint.describe(), error));
            return Err(error);
        }
        Ok(response)
    }

    async fn decode<T: DeserializeOwned>(response: Response) -> Result<T, ApiError> {
        response.json::<T>().await.map_err(|e| ApiError::Decode(e.to_string()))
    }

    async fn get<T: DeserializeOwned>(&self, endpoint: Endpoint) -> Result<T, ApiError> {
        Self::decode(self.send(endpoint).await?).await
    }
}

#[async_trait(?Send)]
impl FinanceApi for ApiClient {
    async fn current_user(&self) -> Result<serde_json::Value, ApiError> {
        self.get(Endpoint::current_user()).await
    }

    async fn logout(&self) -> Result<(), ApiError> {
        self.send(Endpoint::logout()).await.map(|_| ())
    }

    async fn list_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, ApiError> {
        self.get(Endpoint::list_transactions(query)).await
    }

    async fn get_transaction(&self, id: RecordId) -> Result<Transaction, ApiError> {
        self.get(Endpoint::transaction(Method::Get, id)).await
    }

    async fn create_transaction(&self, draft: &TransactionDraft) -> Result<Transaction, ApiError> {
        Self::decode(self.send_json(Endpoint::create_transaction(), draft).await?).await
    }

    async fn update_transaction(&self, id: RecordId, draft: &TransactionDraft) -> Result<Transaction, ApiError> {
        Self::decode(self.send_json(Endpoint::transaction(Method::Put, id), draft).await?).await
    }

    async fn delete_transaction(&self, id: RecordId) -> Result<(), ApiError> {
        // 204, no body
        self.send(Endpoint::transaction(Method::Delete, id)).await.map(|_| ())
    }

    async fn list_budgets(&self) -> Result<Vec<Budget>, ApiError> {
        self.get(Endpoint::list_budgets()).await
    }

    async fn create_budget(&self, draft: &BudgetDraft) -> Result<Budget, ApiError> {
        Self::decode(self.send_json(Endpoint::create_budget(), draft).await?).await
    }

    async fn update_budget(&self, id: RecordId, update: &BudgetUpdate) -> Result<Budget, ApiError> {
        Self::decode(self.send_json(Endpoint::budget(Method::Put, id), update).await?).await
    }

    async fn delete_budget(&self, id: RecordId) -> Result<(), ApiError> {
        self.send(Endpoint::budget(Method::Delete, id)).await.map(|_| ())
    }

    async fn summary(&self, period: Period) -> Result<Summary, ApiError> {
        self.get(Endpoint::summary(period)).await
    }

    async fn by_category(&self, period: Period) -> Result<Vec<CategoryTotal>, ApiError> {
        self.get(Endpoint::by_category(period)).await
    }

    async fn monthly_trend(&self, year: i32) -> Result<Vec<MonthlyTrendPoint>, ApiError> {
        self.get(Endpoint::monthly_trend(year)).await
    }

    async fn budget_status(&self, period: Period) -> Result<Vec<BudgetStatus>, ApiError> {
        self.get(Endpoint::budget_status(period)).await
    }

    async fn exchange_rate(&self) -> Result<ExchangeRateInfo, ApiError> {
        self.get(Endpoint::exchange_rate()).await
    }

    async fn sync(&self, days_back: u32) -> Result<SyncResponse, ApiError> {
        Self::decode(self.send_json(Endpoint::sync(), &SyncRequest { days_back }).await?).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_client_uses_configured_backend() {
        let client = ApiClient::with_base_url("https://finance.example.com/");
        assert_eq!(client.login_url(), "https://finance.example.com/auth/login");
        assert_eq!(client, ApiClient::with_base_url("https://finance.example.com"));
    }
}
