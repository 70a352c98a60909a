pub mod budget_card;
pub mod budget_modal;

pub use budget_card::BudgetCard;
pub use budget_modal::BudgetModal;
