use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub mod api;
pub mod cancel;
pub mod category;
pub mod currency;
pub mod error;
pub mod filters;
pub mod forms;
pub mod notify;
pub mod pages;
pub mod reconcile;
pub mod session;
pub mod sync;

pub use category::Category;
pub use currency::Currency;
pub use error::ApiError;

/// Server-assigned primary key for transactions and budgets
pub type RecordId = i64;

/// Authenticated user as returned by `/auth/me`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: RecordId,
    pub email: String,
    #[serde(default)]
    pub name: Option<String>,
    /// Profile picture URL from the identity provider
    #[serde(default)]
    pub picture: Option<String>,
}

impl User {
    /// Name if the provider gave one, otherwise the email
    pub fn display_name(&self) -> &str {
        match self.name.as_deref() {
            Some(name) if !name.trim().is_empty() => name,
            _ => &self.email,
        }
    }

    /// Single uppercase letter shown when there is no picture
    pub fn initial(&self) -> String {
        self.name
            .as_deref()
            .and_then(|name| name.trim().chars().next())
            .or_else(|| self.email.chars().next())
            .map(|c| c.to_uppercase().to_string())
            .unwrap_or_else(|| "?".to_string())
    }

    pub fn picture_url(&self) -> Option<&str> {
        self.picture.as_deref().filter(|url| !url.is_empty())
    }
}

/// A single income or expense record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: RecordId,
    pub date: NaiveDate,
    pub description: String,
    /// Signed amount in the native currency (negative for expenses)
    pub amount: f64,
    pub currency: Currency,
    pub category: Category,
    /// Bank or source the record came from ("Manual" for hand-entered rows)
    pub bank: String,
    /// Mail message the record was extracted from, "manual" otherwise
    #[serde(default)]
    pub email_id: Option<String>,
    #[serde(default)]
    pub created_at: Option<String>,
}

impl Transaction {
    pub fn is_income(&self) -> bool {
        self.amount >= 0.0
    }
}

/// Body for `POST /transactions` and `PUT /transactions/{id}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransactionDraft {
    pub date: NaiveDate,
    pub description: String,
    pub amount: f64,
    pub currency: Currency,
    pub category: Category,
    pub bank: String,
}

/// Monthly spending cap for one category
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Budget {
    pub id: RecordId,
    pub category: Category,
    pub monthly_limit: f64,
    pub currency: Currency,
}

/// Body for `POST /budgets`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetDraft {
    pub category: Category,
    pub monthly_limit: f64,
    pub currency: Currency,
}

/// Partial body for `PUT /budgets/{id}`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BudgetUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub monthly_limit: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<Currency>,
}

/// Server-computed spend against a budget for one month (USD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BudgetStatus {
    pub category: Category,
    pub spent: f64,
    pub limit: f64,
    pub percentage: f64,
    #[serde(default)]
    pub currency: Option<Currency>,
}

/// How close a category is to its limit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BudgetLevel {
    Ok,
    Warning,
    Over,
}

impl BudgetLevel {
    pub fn from_percentage(percentage: f64) -> Self {
        if percentage >= 100.0 {
            BudgetLevel::Over
        } else if percentage >= 75.0 {
            BudgetLevel::Warning
        } else {
            BudgetLevel::Ok
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            BudgetLevel::Ok => "level-ok",
            BudgetLevel::Warning => "level-warning",
            BudgetLevel::Over => "level-over",
        }
    }
}

impl BudgetStatus {
    pub fn level(&self) -> BudgetLevel {
        BudgetLevel::from_percentage(self.percentage)
    }

    /// Width of the progress bar, capped at 100%
    pub fn bar_width(&self) -> f64 {
        self.percentage.clamp(0.0, 100.0)
    }

    /// Spend expressed in the budget's own currency. `spent` is USD, but the
    /// percentage is currency-neutral, so scale the native limit by it.
    pub fn spent_in_budget_currency(&self, monthly_limit: f64) -> f64 {
        self.percentage / 100.0 * monthly_limit
    }
}

/// Income, expenses and net for one currency bucket
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Totals {
    #[serde(default)]
    pub income: f64,
    /// Negative when there was spending
    #[serde(default)]
    pub expenses: f64,
    #[serde(default)]
    pub net: f64,
}

/// Response of `/dashboard/summary`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Summary {
    pub month: u32,
    pub year: i32,
    #[serde(default)]
    pub pen: Totals,
    #[serde(default)]
    pub usd: Totals,
    /// Both currencies folded into USD
    #[serde(default)]
    pub total_usd: Totals,
    #[serde(default)]
    pub exchange_rate: Option<f64>,
    #[serde(default)]
    pub transaction_count: u32,
}

impl Summary {
    /// Share of income kept, never negative
    pub fn savings_rate(&self) -> f64 {
        let income = self.total_usd.income;
        if income > 0.0 {
            (self.total_usd.net / income * 100.0).max(0.0)
        } else {
            0.0
        }
    }
}

pub fn savings_label(rate: f64) -> &'static str {
    if rate >= 20.0 {
        "On track"
    } else if rate > 0.0 {
        "Room to improve"
    } else {
        "No savings"
    }
}

/// One bar of the spending-by-category chart (USD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryTotal {
    pub category: Category,
    pub total: f64,
}

/// One point of the monthly expense trend (USD)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyTrendPoint {
    /// Short month name, e.g. "Jan"
    pub month: String,
    pub month_num: u32,
    pub expenses: f64,
}

/// Response of `/dashboard/exchange-rate`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExchangeRateInfo {
    /// PEN to USD
    pub rate: f64,
    #[serde(default)]
    pub age_hours: Option<f64>,
    #[serde(default)]
    pub from_currency: Option<String>,
    #[serde(default)]
    pub to_currency: Option<String>,
    #[serde(default)]
    pub fetched_at: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

/// Body for `POST /sync`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SyncRequest {
    pub days_back: u32,
}

/// Response of `POST /sync`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SyncResponse {
    #[serde(default)]
    pub transactions_added: Option<u32>,
    #[serde(default)]
    pub message: Option<String>,
}
