//! Modal form models and the validation that runs before any request.

use chrono::NaiveDate;
use thiserror::Error;

use crate::{Budget, BudgetDraft, Category, Currency, Transaction, TransactionDraft};

/// Bank recorded for hand-entered transactions
pub const MANUAL_BANK: &str = "Manual";

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Description is required")]
    DescriptionRequired,
    #[error("Enter a valid positive amount")]
    InvalidAmount,
    #[error("Enter a valid date")]
    InvalidDate,
    #[error("Enter a valid amount")]
    InvalidLimit,
    #[error("A budget for {0} already exists")]
    DuplicateCategory(Category),
    #[error("All categories have budgets set.")]
    NoCategoryAvailable,
}

/// Parse a user-typed positive number, tolerating surrounding spaces and
/// thousands separators
fn parse_positive(input: &str) -> Option<f64> {
    let cleaned: String = input.trim().chars().filter(|c| *c != ',').collect();
    cleaned.parse::<f64>().ok().filter(|v| v.is_finite() && *v > 0.0)
}

/// Add/edit transaction modal contents, kept as typed so a failed submit
/// preserves them
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionForm {
    /// `YYYY-MM-DD` as held by the date input
    pub date: String,
    pub description: String,
    /// Magnitude only; the sign comes from `is_expense`
    pub amount: String,
    pub is_expense: bool,
    pub currency: Currency,
    pub category: Category,
    pub bank: String,
    /// Set when editing an existing record
    pub editing: Option<i64>,
}

impl TransactionForm {
    pub fn new(today: NaiveDate) -> Self {
        Self {
            date: today.format("%Y-%m-%d").to_string(),
            description: String::new(),
            amount: String::new(),
            is_expense: true,
            currency: Currency::Usd,
            category: Category::Other,
            bank: MANUAL_BANK.to_string(),
            editing: None,
        }
    }

    pub fn edit(tx: &Transaction) -> Self {
        Self {
            date: tx.date.format("%Y-%m-%d").to_string(),
            description: tx.description.clone(),
            amount: format!("{}", tx.amount.abs()),
            is_expense: tx.amount < 0.0,
            currency: tx.currency,
            category: tx.category,
            bank: tx.bank.clone(),
            editing: Some(tx.id),
        }
    }

    pub fn is_editing(&self) -> bool {
        self.editing.is_some()
    }

    /// The income/expense toggle is only offered when adding
    pub fn can_toggle_kind(&self) -> bool {
        !self.is_editing()
    }

    pub fn title(&self) -> &'static str {
        if self.is_editing() {
            "Edit transaction"
        } else {
            "Add transaction"
        }
    }

    pub fn to_draft(&self) -> Result<TransactionDraft, ValidationError> {
        let description = self.description.trim();
        if description.is_empty() {
            return Err(ValidationError::DescriptionRequired);
        }
        let magnitude = parse_positive(&self.amount).ok_or(ValidationError::InvalidAmount)?;
        let date = NaiveDate::parse_from_str(self.date.trim(), "%Y-%m-%d").map_err(|_| ValidationError::InvalidDate)?;
        let bank = match self.bank.trim() {
            "" => MANUAL_BANK.to_string(),
            bank => bank.to_string(),
        };
        Ok(TransactionDraft {
            date,
            description: description.to_string(),
            amount: if self.is_expense { -magnitude } else { magnitude },
            currency: self.currency,
            category: self.category,
            bank,
        })
    }
}

/// Categories that do not have a budget yet, in canonical order
pub fn available_categories(existing: &[Budget]) -> Vec<Category> {
    Category::ALL
        .iter()
        .copied()
        .filter(|category| !existing.iter().any(|budget| budget.category == *category))
        .collect()
}

/// Add-budget modal contents
#[derive(Debug, Clone, PartialEq)]
pub struct BudgetForm {
    pub category: Option<Category>,
    pub monthly_limit: String,
    pub currency: Currency,
}

impl BudgetForm {
    /// Preselects the first category still without a budget
    pub fn new(existing: &[Budget]) -> Self {
        Self {
            category: available_categories(existing).first().copied(),
            monthly_limit: String::new(),
            currency: Currency::Pen,
        }
    }

    pub fn to_draft(&self, existing: &[Budget]) -> Result<BudgetDraft, ValidationError> {
        let category = self.category.ok_or(ValidationError::NoCategoryAvailable)?;
        if existing.iter().any(|budget| budget.category == category) {
            return Err(ValidationError::DuplicateCategory(category));
        }
        let monthly_limit = parse_limit(&self.monthly_limit)?;
        Ok(BudgetDraft {
            category,
            monthly_limit,
            currency: self.currency,
        })
    }
}

/// Value typed into a budget card's inline limit editor
pub fn parse_limit(input: &str) -> Result<f64, ValidationError> {
    parse_positive(input).ok_or(ValidationError::InvalidLimit)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 5).unwrap()
    }

    fn budget(id: i64, category: Category) -> Budget {
        Budget {
            id,
            category,
            monthly_limit: 100.0,
            currency: Currency::Pen,
        }
    }

    #[test]
    fn test_new_transaction_defaults() {
        let form = TransactionForm::new(today());
        assert_eq!(form.date, "2025-06-05");
        assert_eq!(form.currency, Currency::Usd);
        assert_eq!(form.category, Category::Other);
        assert_eq!(form.bank, "Manual");
        assert!(form.is_expense);
        assert!(form.can_toggle_kind());
    }

    #[test]
    fn test_expense_is_sent_negative() {
        let mut form = TransactionForm::new(today());
        form.description = "  Groceries run ".to_string();
        form.amount = "42.10".to_string();
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.description, "Groceries run");
        assert_eq!(draft.amount, -42.10);

        form.is_expense = false;
        assert_eq!(form.to_draft().unwrap().amount, 42.10);
    }

    #[test]
    fn test_transaction_validation_messages() {
        let mut form = TransactionForm::new(today());
        form.amount = "10".to_string();
        assert_eq!(form.to_draft().unwrap_err().to_string(), "Description is required");

        form.description = "Taxi".to_string();
        for bad in ["", "abc", "0", "-5"] {
            form.amount = bad.to_string();
            assert_eq!(form.to_draft(), Err(ValidationError::InvalidAmount));
        }
        assert_eq!(ValidationError::InvalidAmount.to_string(), "Enter a valid positive amount");

        form.amount = "1,200.50".to_string();
        assert_eq!(form.to_draft().unwrap().amount, -1200.50);
    }

    #[test]
    fn test_editing_keeps_sign_and_locks_kind() {
        let tx = Transaction {
            id: 3,
            date: today(),
            description: "Salary".to_string(),
            amount: 2500.0,
            currency: Currency::Pen,
            category: Category::Salary,
            bank: "BCP".to_string(),
            email_id: None,
            created_at: None,
        };
        let form = TransactionForm::edit(&tx);
        assert!(!form.can_toggle_kind());
        assert_eq!(form.title(), "Edit transaction");
        let draft = form.to_draft().unwrap();
        assert_eq!(draft.amount, 2500.0);
        assert_eq!(draft.bank, "BCP");
    }

    #[test]
    fn test_available_categories_skip_existing_budgets() {
        let existing = vec![budget(1, Category::Groceries), budget(2, Category::Health)];
        let available = available_categories(&existing);
        assert!(!available.contains(&Category::Groceries));
        assert!(!available.contains(&Category::Health));
        assert_eq!(available.len(), Category::ALL.len() - 2);

        let form = BudgetForm::new(&existing);
        assert_eq!(form.category, Some(Category::Transport));
        assert_eq!(form.currency, Currency::Pen);
    }

    #[test]
    fn test_budget_form_rejects_duplicates_and_bad_limits() {
        let existing = vec![budget(1, Category::Groceries)];
        let mut form = BudgetForm {
            category: Some(Category::Groceries),
            monthly_limit: "300".to_string(),
            currency: Currency::Pen,
        };
        assert_eq!(form.to_draft(&existing), Err(ValidationError::DuplicateCategory(Category::Groceries)));

        form.category = Some(Category::Transport);
        form.monthly_limit = "nope".to_string();
        assert_eq!(form.to_draft(&existing), Err(ValidationError::InvalidLimit));

        form.monthly_limit = "300".to_string();
        assert_eq!(form.to_draft(&existing).unwrap().monthly_limit, 300.0);
    }

    #[test]
    fn test_full_budget_set_has_nothing_to_offer() {
        let existing: Vec<_> = Category::ALL.iter().enumerate().map(|(i, c)| budget(i as i64, *c)).collect();
        let form = BudgetForm::new(&existing);
        assert_eq!(form.category, None);
        assert_eq!(form.to_draft(&existing).unwrap_err().to_string(), "All categories have budgets set.");
    }

    #[test]
    fn test_parse_limit() {
        assert_eq!(parse_limit(" 450 "), Ok(450.0));
        assert_eq!(parse_limit("0"), Err(ValidationError::InvalidLimit));
    }
}
