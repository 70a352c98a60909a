pub mod budget_alerts;
pub mod budgets;
pub mod category_chips;
pub mod charts;
pub mod currency_toggle;
pub mod header;
pub mod period_picker;
pub mod rate_line;
pub mod require_auth;
pub mod summary_cards;
pub mod sync_menu;
pub mod toast;
pub mod transactions;
pub mod user_menu;
