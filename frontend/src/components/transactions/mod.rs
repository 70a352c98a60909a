pub mod totals_strip;
pub mod transaction_modal;
pub mod transaction_table;

pub use totals_strip::TotalsStrip;
pub use transaction_modal::TransactionModal;
pub use transaction_table::TransactionTable;
