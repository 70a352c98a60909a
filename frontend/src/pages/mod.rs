pub mod budgets;
pub mod dashboard;
pub mod login;
pub mod transactions;

pub use budgets::BudgetsPage;
pub use dashboard::DashboardPage;
pub use login::LoginPage;
pub use transactions::TransactionsPage;
