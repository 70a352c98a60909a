use chrono::{Datelike, Local, NaiveDate};

use crate::category::CategoryFilter;
use crate::Transaction;

pub const MONTH_NAMES: [&str; 12] = [
    "January", "February", "March", "April", "May", "June",
    "July", "August", "September", "October", "November", "December",
];

pub const SHORT_MONTH_NAMES: [&str; 12] = [
    "Jan", "Feb", "Mar", "Apr", "May", "Jun", "Jul", "Aug", "Sep", "Oct", "Nov", "Dec",
];

/// A calendar month the pages are looking at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Period {
    /// 1-based
    pub month: u32,
    pub year: i32,
}

impl Default for Period {
    fn default() -> Self {
        Self::current()
    }
}

impl Period {
    pub fn new(month: u32, year: i32) -> Self {
        Self {
            month: month.clamp(1, 12),
            year,
        }
    }

    pub fn current() -> Self {
        let now = Local::now();
        Self {
            month: now.month(),
            year: now.year(),
        }
    }

    pub fn month_name(&self) -> &'static str {
        MONTH_NAMES[(self.month as usize).saturating_sub(1) % 12]
    }

    /// "June 2025"
    pub fn title(&self) -> String {
        format!("{} {}", self.month_name(), self.year)
    }

    pub fn previous(&self) -> Self {
        if self.month == 1 {
            Self { month: 12, year: self.year - 1 }
        } else {
            Self { month: self.month - 1, year: self.year }
        }
    }

    pub fn next(&self) -> Self {
        if self.month == 12 {
            Self { month: 1, year: self.year + 1 }
        } else {
            Self { month: self.month + 1, year: self.year }
        }
    }

    pub fn with_month(&self, month: u32) -> Self {
        Self::new(month, self.year)
    }

    pub fn with_year(&self, year: i32) -> Self {
        Self::new(self.month, year)
    }
}

/// Years offered in the period pickers: the three before `current` and `current` itself
pub fn year_options(current: i32) -> Vec<i32> {
    ((current - 3)..=current).collect()
}

/// Short display date for table rows, e.g. "Jun 5"
pub fn short_date(date: NaiveDate) -> String {
    format!("{} {}", SHORT_MONTH_NAMES[date.month0() as usize], date.day())
}

/// Server-side part of the transaction filter
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransactionQuery {
    pub period: Period,
    pub category: CategoryFilter,
}

/// Everything the transactions page filters on
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionFilter {
    pub period: Period,
    pub category: CategoryFilter,
    /// Applied client-side to description and bank
    pub search: String,
}

impl TransactionFilter {
    pub fn query(&self) -> TransactionQuery {
        TransactionQuery {
            period: self.period,
            category: self.category,
        }
    }

    pub fn has_search(&self) -> bool {
        !self.search.trim().is_empty()
    }

    pub fn matches(&self, tx: &Transaction) -> bool {
        let needle = self.search.trim().to_lowercase();
        if needle.is_empty() {
            return true;
        }
        tx.description.to_lowercase().contains(&needle) || tx.bank.to_lowercase().contains(&needle)
    }

    /// Rows to render, in list order
    pub fn apply(&self, transactions: &[Transaction]) -> Vec<Transaction> {
        transactions.iter().filter(|tx| self.matches(tx)).cloned().collect()
    }
}

/// Totals strip shown above the transaction table (native amounts, no conversion)
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct FilteredTotals {
    pub income: f64,
    /// Positive sum of spending
    pub expenses: f64,
    pub count: usize,
}

impl FilteredTotals {
    pub fn compute(transactions: &[Transaction]) -> Self {
        transactions.iter().fold(Self::default(), |mut acc, tx| {
            if tx.amount > 0.0 {
                acc.income += tx.amount;
            } else if tx.amount < 0.0 {
                acc.expenses += tx.amount.abs();
            }
            acc.count += 1;
            acc
        })
    }

    pub fn net(&self) -> f64 {
        self.income - self.expenses
    }
}

/// "3 transactions" / "1 transaction"
pub fn count_label(count: usize) -> String {
    format!("{} transaction{}", count, if count == 1 { "" } else { "s" })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Category, Currency};

    fn tx(id: i64, description: &str, bank: &str, amount: f64) -> Transaction {
        Transaction {
            id,
            date: NaiveDate::from_ymd_opt(2025, 6, 5).unwrap(),
            description: description.to_string(),
            amount,
            currency: Currency::Usd,
            category: Category::Other,
            bank: bank.to_string(),
            email_id: None,
            created_at: None,
        }
    }

    #[test]
    fn test_period_navigation_wraps_years() {
        let january = Period::new(1, 2025);
        assert_eq!(january.previous(), Period::new(12, 2024));
        assert_eq!(Period::new(12, 2024).next(), january);
        assert_eq!(Period::new(6, 2025).title(), "June 2025");
    }

    #[test]
    fn test_period_clamps_month() {
        assert_eq!(Period::new(0, 2025).month, 1);
        assert_eq!(Period::new(13, 2025).month, 12);
    }

    #[test]
    fn test_year_options() {
        assert_eq!(year_options(2026), vec![2023, 2024, 2025, 2026]);
    }

    #[test]
    fn test_short_date() {
        assert_eq!(short_date(NaiveDate::from_ymd_opt(2025, 6, 5).unwrap()), "Jun 5");
        assert_eq!(short_date(NaiveDate::from_ymd_opt(2025, 12, 31).unwrap()), "Dec 31");
    }

    #[test]
    fn test_search_matches_description_or_bank_case_insensitively() {
        let filter = TransactionFilter {
            search: "  bcp ".to_string(),
            ..TransactionFilter::default()
        };
        let rows = vec![
            tx(1, "Uber ride", "BCP", -10.0),
            tx(2, "Salary", "Interbank", 2000.0),
            tx(3, "Pago BCP tarjeta", "Cash", -5.0),
        ];
        let ids: Vec<_> = filter.apply(&rows).iter().map(|t| t.id).collect();
        assert_eq!(ids, vec![1, 3]);
    }

    #[test]
    fn test_empty_search_keeps_everything() {
        let filter = TransactionFilter::default();
        assert!(!filter.has_search());
        assert_eq!(filter.apply(&[tx(1, "a", "b", 1.0)]).len(), 1);
    }

    #[test]
    fn test_filtered_totals() {
        let rows = vec![tx(1, "a", "b", 100.0), tx(2, "c", "d", -30.0), tx(3, "e", "f", -20.0)];
        let totals = FilteredTotals::compute(&rows);
        assert_eq!(totals.income, 100.0);
        assert_eq!(totals.expenses, 50.0);
        assert_eq!(totals.net(), 50.0);
        assert_eq!(totals.count, 3);
        assert_eq!(count_label(1), "1 transaction");
        assert_eq!(count_label(3), "3 transactions");
    }
}
