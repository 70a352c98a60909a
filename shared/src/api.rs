//! HTTP contract with the backend: configuration, endpoint paths, and the
//! `FinanceApi` trait the pages are written against.

use async_trait::async_trait;

use crate::filters::{Period, TransactionQuery};
use crate::{
    ApiError, Budget, BudgetDraft, BudgetStatus, BudgetUpdate, CategoryTotal, ExchangeRateInfo,
    MonthlyTrendPoint, RecordId, Summary, SyncResponse, Transaction, TransactionDraft,
};

/// Backend used when `BACKEND_URL` was not set at build time
pub const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";

/// Local storage key holding the bearer credential for cross-origin deployments
pub const SESSION_TOKEN_KEY: &str = "session_token";

/// Client-side route of the login page
pub const LOGIN_ROUTE: &str = "/login";

#[derive(Debug, Clone, PartialEq)]
pub struct ApiConfig {
    backend_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self::from_env()
    }
}

impl ApiConfig {
    /// Backend URL baked in at compile time, falling back to localhost
    pub fn from_env() -> Self {
        Self::with_backend_url(option_env!("BACKEND_URL").unwrap_or(DEFAULT_BACKEND_URL))
    }

    pub fn with_backend_url(backend_url: &str) -> Self {
        Self {
            backend_url: backend_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn backend_url(&self) -> &str {
        &self.backend_url
    }

    /// Where the browser goes to start the OAuth flow
    pub fn login_url(&self) -> String {
        format!("{}/auth/login", self.backend_url)
    }

    /// Absolute URL including the query string
    pub fn url_for(&self, endpoint: &Endpoint) -> String {
        match endpoint.scope {
            Scope::Api => format!("{}/api{}", self.backend_url, endpoint.describe()),
            Scope::Auth => format!("{}{}", self.backend_url, endpoint.describe()),
        }
    }
}

/// The client forces a navigation to the login page on 401, except when the
/// browser is already there
pub fn should_redirect_to_login(status: u16, current_path: &str) -> bool {
    status == 401 && !current_path.contains("login")
}

/// `Authorization` value for a stored bearer credential. Without one the
/// request relies on the session cookie alone.
pub fn authorization_header(token: Option<&str>) -> Option<String> {
    token
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(|token| format!("Bearer {}", token))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Put,
    Delete,
}

/// Whether a path lives under `/api` or at the backend root
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    Api,
    Auth,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub method: Method,
    pub scope: Scope,
    pub path: String,
    pub query: Vec<(&'static str, String)>,
}

impl Endpoint {
    fn api(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            scope: Scope::Api,
            path: path.into(),
            query: Vec::new(),
        }
    }

    fn with_period(mut self, period: Period) -> Self {
        self.query.push(("month", period.month.to_string()));
        self.query.push(("year", period.year.to_string()));
        self
    }

    pub fn current_user() -> Self {
        Self {
            method: Method::Get,
            scope: Scope::Auth,
            path: "/auth/me".to_string(),
            query: Vec::new(),
        }
    }

    pub fn logout() -> Self {
        Self {
            method: Method::Post,
            scope: Scope::Auth,
            path: "/auth/logout".to_string(),
            query: Vec::new(),
        }
    }

    pub fn list_transactions(query: &TransactionQuery) -> Self {
        let mut endpoint = Self::api(Method::Get, "/transactions").with_period(query.period);
        if let Some(category) = query.category.category() {
            endpoint.query.push(("category", category.as_str().to_string()));
        }
        endpoint
    }

    pub fn transaction(method: Method, id: RecordId) -> Self {
        Self::api(method, format!("/transactions/{}", id))
    }

    pub fn create_transaction() -> Self {
        Self::api(Method::Post, "/transactions")
    }

    pub fn list_budgets() -> Self {
        Self::api(Method::Get, "/budgets")
    }

    pub fn create_budget() -> Self {
        Self::api(Method::Post, "/budgets")
    }

    pub fn budget(method: Method, id: RecordId) -> Self {
        Self::api(method, format!("/budgets/{}", id))
    }

    pub fn summary(period: Period) -> Self {
        Self::api(Method::Get, "/dashboard/summary").with_period(period)
    }

    pub fn by_category(period: Period) -> Self {
        Self::api(Method::Get, "/dashboard/by-category").with_period(period)
    }

    pub fn monthly_trend(year: i32) -> Self {
        let mut endpoint = Self::api(Method::Get, "/dashboard/monthly-trend");
        endpoint.query.push(("year", year.to_string()));
        endpoint
    }

    pub fn budget_status(period: Period) -> Self {
        Self::api(Method::Get, "/dashboard/budget-status").with_period(period)
    }

    pub fn exchange_rate() -> Self {
        Self::api(Method::Get, "/dashboard/exchange-rate")
    }

    pub fn sync() -> Self {
        Self::api(Method::Post, "/sync")
    }

    /// Path plus query string
    pub fn describe(&self) -> String {
        if self.query.is_empty() {
            return self.path.clone();
        }
        let query: Vec<String> = self.query.iter().map(|(k, v)| format!("{}={}", k, v)).collect();
        format!("{}?{}", self.path, query.join("&"))
    }
}

/// Every backend operation the pages use. The browser implementation lives in
/// the frontend crate; tests use an in-memory fake.
#[async_trait(?Send)]
pub trait FinanceApi {
    /// Raw `/auth/me` body; structural validation happens in `session`
    async fn current_user(&self) -> Result<serde_json::Value, ApiError>;
    async fn logout(&self) -> Result<(), ApiError>;

    async fn list_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, ApiError>;
    async fn get_transaction(&self, id: RecordId) -> Result<Transaction, ApiError>;
    async fn create_transaction(&self, draft: &TransactionDraft) -> Result<Transaction, ApiError>;
    async fn update_transaction(&self, id: RecordId, draft: &TransactionDraft) -> Result<Transaction, ApiError>;
    async fn delete_transaction(&self, id: RecordId) -> Result<(), ApiError>;

    async fn list_budgets(&self) -> Result<Vec<Budget>, ApiError>;
    async fn create_budget(&self, draft: &BudgetDraft) -> Result<Budget, ApiError>;
    async fn update_budget(&self, id: RecordId, update: &BudgetUpdate) -> Result<Budget, ApiError>;
    async fn delete_budget(&self, id: RecordId) -> Result<(), ApiError>;

    async fn summary(&self, period: Period) -> Result<Summary, ApiError>;
    async fn by_category(&self, period: Period) -> Result<Vec<CategoryTotal>, ApiError>;
    async fn monthly_trend(&self, year: i32) -> Result<Vec<MonthlyTrendPoint>, ApiError>;
    async fn budget_status(&self, period: Period) -> Result<Vec<BudgetStatus>, ApiError>;
    async fn exchange_rate(&self) -> Result<ExchangeRateInfo, ApiError>;

    async fn sync(&self, days_back: u32) -> Result<SyncResponse, ApiError>;
}

#[cfg(test)]
pub(crate) mod fake {
    //! In-memory backend for exercising loaders and page controllers.

    use super::*;
    use crate::category::CategoryFilter;
    use crate::Totals;
    use std::cell::{Cell, RefCell};
    use std::collections::HashMap;

    #[derive(Default)]
    pub struct FakeApi {
        pub me: RefCell<Option<Result<serde_json::Value, ApiError>>>,
        pub transactions: RefCell<Vec<Transaction>>,
        pub budgets: RefCell<Vec<Budget>>,
        pub statuses: RefCell<Vec<BudgetStatus>>,
        pub rate: Cell<f64>,
        pub sync_result: RefCell<Option<Result<SyncResponse, ApiError>>>,
        /// Endpoint name -> error to return instead of data
        pub failures: RefCell<HashMap<&'static str, ApiError>>,
        /// Endpoint name -> number of calls
        pub calls: RefCell<HashMap<&'static str, usize>>,
        next_id: Cell<RecordId>,
    }

    impl FakeApi {
        pub fn new() -> Self {
            let api = Self::default();
            api.rate.set(0.27);
            api.next_id.set(1000);
            api
        }

        pub fn fail(&self, endpoint: &'static str, error: ApiError) {
            self.failures.borrow_mut().insert(endpoint, error);
        }

        pub fn calls(&self, endpoint: &'static str) -> usize {
            self.calls.borrow().get(endpoint).copied().unwrap_or(0)
        }

        fn record(&self, endpoint: &'static str) -> Result<(), ApiError> {
            *self.calls.borrow_mut().entry(endpoint).or_insert(0) += 1;
            match self.failures.borrow().get(endpoint) {
                Some(error) => Err(error.clone()),
                None => Ok(()),
            }
        }

        fn allocate_id(&self) -> RecordId {
            let id = self.next_id.get();
            self.next_id.set(id + 1);
            id
        }
    }

    #[async_trait(?Send)]
    impl FinanceApi for FakeApi {
        async fn current_user(&self) -> Result<serde_json::Value, ApiError> {
            self.record("me")?;
            self.me
                .borrow()
                .clone()
                .unwrap_or(Err(ApiError::Unauthorized))
        }

        async fn logout(&self) -> Result<(), ApiError> {
            self.record("logout")
        }

        async fn list_transactions(&self, query: &TransactionQuery) -> Result<Vec<Transaction>, ApiError> {
            self.record("transactions")?;
            Ok(self
                .transactions
                .borrow()
                .iter()
                .filter(|tx| match query.category {
                    CategoryFilter::All => true,
                    CategoryFilter::Only(category) => tx.category == category,
                })
                .cloned()
                .collect())
        }

        async fn get_transaction(&self, id: RecordId) -> Result<Transaction, ApiError> {
            self.record("transaction")?;
            self.transactions
                .borrow()
                .iter()
                .find(|tx| tx.id == id)
                .cloned()
                .ok_or(ApiError::Server {
                    status: 404,
                    detail: Some("Transaction not found".to_string()),
                })
        }

        async fn create_transaction(&self, draft: &TransactionDraft) -> Result<Transaction, ApiError> {
            self.record("create_transaction")?;
            let tx = Transaction {
                id: self.allocate_id(),
                date: draft.date,
                description: draft.description.clone(),
                amount: draft.amount,
                currency: draft.currency,
                category: draft.category,
                bank: draft.bank.clone(),
                email_id: Some("manual".to_string()),
                created_at: None,
            };
            self.transactions.borrow_mut().insert(0, tx.clone());
            Ok(tx)
        }

        async fn update_transaction(&self, id: RecordId, draft: &TransactionDraft) -> Result<Transaction, ApiError> {
            self.record("update_transaction")?;
            let mut transactions = self.transactions.borrow_mut();
            let tx = transactions
                .iter_mut()
                .find(|tx| tx.id == id)
                .ok_or(ApiError::Server { status: 404, detail: Some("Transaction not found".to_string()) })?;
            tx.date = draft.date;
            tx.description = draft.description.clone();
            tx.amount = draft.amount;
            tx.currency = draft.currency;
            tx.category = draft.category;
            tx.bank = draft.bank.clone();
            Ok(tx.clone())
        }

        async fn delete_transaction(&self, id: RecordId) -> Result<(), ApiError> {
            self.record("delete_transaction")?;
            self.transactions.borrow_mut().retain(|tx| tx.id != id);
            Ok(())
        }

        async fn list_budgets(&self) -> Result<Vec<Budget>, ApiError> {
            self.record("budgets")?;
            Ok(self.budgets.borrow().clone())
        }

        async fn create_budget(&self, draft: &BudgetDraft) -> Result<Budget, ApiError> {
            self.record("create_budget")?;
            let budget = Budget {
                id: self.allocate_id(),
                category: draft.category,
                monthly_limit: draft.monthly_limit,
                currency: draft.currency,
            };
            self.budgets.borrow_mut().push(budget.clone());
            Ok(budget)
        }

        async fn update_budget(&self, id: RecordId, update: &BudgetUpdate) -> Result<Budget, ApiError> {
            self.record("update_budget")?;
            let mut budgets = self.budgets.borrow_mut();
            let budget = budgets
                .iter_mut()
                .find(|budget| budget.id == id)
                .ok_or(ApiError::Server { status: 404, detail: Some("Budget not found".to_string()) })?;
            if let Some(limit) = update.monthly_limit {
                budget.monthly_limit = limit;
            }
            if let Some(currency) = update.currency {
                budget.currency = currency;
            }
            Ok(budget.clone())
        }

        async fn delete_budget(&self, id: RecordId) -> Result<(), ApiError> {
            self.record("delete_budget")?;
            self.budgets.borrow_mut().retain(|budget| budget.id != id);
            Ok(())
        }

        async fn summary(&self, period: Period) -> Result<Summary, ApiError> {
            self.record("summary")?;
            let income: f64 = self.transactions.borrow().iter().filter(|t| t.amount > 0.0).map(|t| t.amount).sum();
            let expenses: f64 = self.transactions.borrow().iter().filter(|t| t.amount < 0.0).map(|t| t.amount).sum();
            let totals = Totals { income, expenses, net: income + expenses };
            Ok(Summary {
                month: period.month,
                year: period.year,
                pen: Totals::default(),
                usd: totals,
                total_usd: totals,
                exchange_rate: Some(self.rate.get()),
                transaction_count: self.transactions.borrow().len() as u32,
            })
        }

        async fn by_category(&self, _period: Period) -> Result<Vec<CategoryTotal>, ApiError> {
            self.record("by_category")?;
            Ok(Vec::new())
        }

        async fn monthly_trend(&self, _year: i32) -> Result<Vec<MonthlyTrendPoint>, ApiError> {
            self.record("monthly_trend")?;
            Ok(Vec::new())
        }

        async fn budget_status(&self, _period: Period) -> Result<Vec<BudgetStatus>, ApiError> {
            self.record("budget_status")?;
            Ok(self.statuses.borrow().clone())
        }

        async fn exchange_rate(&self) -> Result<ExchangeRateInfo, ApiError> {
            self.record("exchange_rate")?;
            Ok(ExchangeRateInfo {
                rate: self.rate.get(),
                age_hours: Some(0.5),
                from_currency: Some("PEN".to_string()),
                to_currency: Some("USD".to_string()),
                fetched_at: None,
                source: Some("cache".to_string()),
            })
        }

        async fn sync(&self, _days_back: u32) -> Result<SyncResponse, ApiError> {
            self.record("sync")?;
            self.sync_result
                .borrow()
                .clone()
                .unwrap_or_else(|| Ok(SyncResponse::default()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::category::CategoryFilter;
    use crate::Category;

    #[test]
    fn test_api_and_auth_urls() {
        let config = ApiConfig::with_backend_url("https://api.example.com/");
        assert_eq!(config.url_for(&Endpoint::current_user()), "https://api.example.com/auth/me");
        assert_eq!(config.url_for(&Endpoint::list_budgets()), "https://api.example.com/api/budgets");
        assert_eq!(
            config.url_for(&Endpoint::transaction(Method::Put, 42)),
            "https://api.example.com/api/transactions/42"
        );
        assert_eq!(config.login_url(), "https://api.example.com/auth/login");
        assert_eq!(
            config.url_for(&Endpoint::budget_status(Period::new(1, 2026))),
            "https://api.example.com/api/dashboard/budget-status?month=1&year=2026"
        );
    }

    #[test]
    fn test_bearer_header_only_with_stored_token() {
        assert_eq!(authorization_header(Some("abc.def")), Some("Bearer abc.def".to_string()));
        assert_eq!(authorization_header(None), None);
        assert_eq!(authorization_header(Some("  ")), None);
    }

    #[test]
    fn test_transaction_query_only_sends_category_when_filtered() {
        let period = Period::new(6, 2025);
        let all = Endpoint::list_transactions(&TransactionQuery { period, category: CategoryFilter::All });
        assert_eq!(all.describe(), "/transactions?month=6&year=2025");

        let groceries = Endpoint::list_transactions(&TransactionQuery {
            period,
            category: CategoryFilter::Only(Category::Groceries),
        });
        assert_eq!(groceries.describe(), "/transactions?month=6&year=2025&category=groceries");
    }

    #[test]
    fn test_dashboard_endpoints() {
        let period = Period::new(3, 2024);
        assert_eq!(Endpoint::summary(period).describe(), "/dashboard/summary?month=3&year=2024");
        assert_eq!(Endpoint::monthly_trend(2024).describe(), "/dashboard/monthly-trend?year=2024");
        assert_eq!(Endpoint::exchange_rate().describe(), "/dashboard/exchange-rate");
        assert_eq!(Endpoint::sync().method, Method::Post);
    }

    #[test]
    fn test_login_redirect_rule() {
        assert!(should_redirect_to_login(401, "/transactions"));
        assert!(!should_redirect_to_login(401, "/login"));
        assert!(!should_redirect_to_login(403, "/transactions"));
        assert!(!should_redirect_to_login(200, "/"));
    }
}
