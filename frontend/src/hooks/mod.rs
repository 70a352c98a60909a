pub mod page_store;
pub mod use_auth;
pub mod use_budgets;
pub mod use_cancel_token;
pub mod use_currency;
pub mod use_dashboard;
pub mod use_toasts;
pub mod use_transactions;
