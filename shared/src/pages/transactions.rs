use super::Group;
use crate::api::FinanceApi;
use crate::category::CategoryFilter;
use crate::currency::ExchangeRate;
use crate::filters::{FilteredTotals, Period, TransactionFilter, TransactionQuery};
use crate::forms::TransactionForm;
use crate::notify::Notification;
use crate::reconcile::{reconcile, Mutation};
use crate::{ApiError, ExchangeRateInfo, RecordId, Transaction};

/// Shown when a failed save carries no usable server detail
pub const SAVE_FALLBACK_MESSAGE: &str = "Something went wrong";

pub const DELETE_CONFIRMATION: &str = "Delete this transaction?";

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionsAction {
    SetPeriod(Period),
    SetCategory(CategoryFilter),
    SetSearch(String),
    Loaded(TransactionQuery, Result<Vec<Transaction>, ApiError>),
    RateLoaded(Result<ExchangeRateInfo, ApiError>),
    OpenAdd(TransactionForm),
    OpenEdit(RecordId),
    UpdateForm(TransactionForm),
    CloseModal,
    SubmitStarted,
    SubmitFailed(String),
    Saved(Mutation<Transaction>),
    DeleteFailed(ApiError),
}

/// Add/edit modal while it is open
#[derive(Debug, Clone, PartialEq)]
pub struct TransactionModal {
    pub form: TransactionForm,
    pub error: Option<String>,
    pub saving: bool,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct TransactionsState {
    pub filter: TransactionFilter,
    pub transactions: Group<Vec<Transaction>>,
    pub rate: Group<Option<ExchangeRateInfo>>,
    pub modal: Option<TransactionModal>,
}

impl TransactionsState {
    pub fn new(period: Period) -> Self {
        Self {
            filter: TransactionFilter {
                period,
                ..TransactionFilter::default()
            },
            ..Self::default()
        }
    }

    pub fn query(&self) -> TransactionQuery {
        self.filter.query()
    }

    pub fn apply(&mut self, action: TransactionsAction) {
        match action {
            TransactionsAction::SetPeriod(period) => {
                if period != self.filter.period {
                    self.filter.period = period;
                    self.transactions.begin();
                }
            }
            TransactionsAction::SetCategory(category) => {
                if category != self.filter.category {
                    self.filter.category = category;
                    self.transactions.begin();
                }
            }
            TransactionsAction::SetSearch(search) => self.filter.search = search,
            TransactionsAction::Loaded(query, result) => {
                if query == self.query() {
                    self.transactions.settle(result);
                } else {
                    log::debug!("dropping transactions loaded for a previous filter");
                }
            }
            TransactionsAction::RateLoaded(result) => {
                self.rate.settle(result.map(Some));
            }
            TransactionsAction::OpenAdd(form) => self.open(form),
            TransactionsAction::OpenEdit(id) => {
                if let Some(tx) = self.transactions.data.iter().find(|tx| tx.id == id) {
                    let form = TransactionForm::edit(tx);
                    self.open(form);
                }
            }
            TransactionsAction::UpdateForm(form) => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.form = form;
                }
            }
            TransactionsAction::CloseModal => self.modal = None,
            TransactionsAction::SubmitStarted => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.saving = true;
                    modal.error = None;
                }
            }
            TransactionsAction::SubmitFailed(message) => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.saving = false;
                    modal.error = Some(message);
                }
            }
            TransactionsAction::Saved(mutation) => {
                if !matches!(mutation, Mutation::Deleted(_)) {
                    self.modal = None;
                }
                self.transactions.data = reconcile(&self.transactions.data, mutation);
            }
            TransactionsAction::DeleteFailed(_) => {}
        }
    }

    fn open(&mut self, form: TransactionForm) {
        self.modal = Some(TransactionModal {
            form,
            error: None,
            saving: false,
        });
    }

    pub fn notification(&self, action: &TransactionsAction) -> Option<Notification> {
        match action {
            TransactionsAction::Loaded(query, Err(e)) if *query == self.query() && !e.is_cancelled() => {
                Some(Notification::error("Failed to load transactions"))
            }
            TransactionsAction::Saved(Mutation::Created(_)) => Some(Notification::success("Transaction added")),
            TransactionsAction::Saved(Mutation::Updated(_)) => Some(Notification::success("Transaction updated")),
            TransactionsAction::Saved(Mutation::Deleted(_)) => Some(Notification::success("Transaction deleted")),
            TransactionsAction::SubmitFailed(message) => Some(Notification::error(message.clone())),
            TransactionsAction::DeleteFailed(_) => Some(Notification::error("Failed to delete")),
            _ => None,
        }
    }

    /// Rows after the client-side search
    pub fn visible(&self) -> Vec<Transaction> {
        self.filter.apply(&self.transactions.data)
    }

    pub fn totals(&self) -> FilteredTotals {
        FilteredTotals::compute(&self.visible())
    }

    pub fn exchange_rate(&self) -> ExchangeRate {
        ExchangeRate::resolve(self.rate.data.as_ref(), None)
    }
}

pub async fn load_transactions<A: FinanceApi + ?Sized>(api: &A, query: TransactionQuery) -> TransactionsAction {
    let result = api.list_transactions(&query).await;
    TransactionsAction::Loaded(query, result)
}

/// Validate and send the modal; the returned action either closes the modal
/// or reports the error inside it
pub async fn submit_transaction<A: FinanceApi + ?Sized>(api: &A, form: &TransactionForm) -> TransactionsAction {
    let draft = match form.to_draft() {
        Ok(draft) => draft,
        Err(e) => return TransactionsAction::SubmitFailed(e.to_string()),
    };
    let result = match form.editing {
        Some(id) => api.update_transaction(id, &draft).await.map(Mutation::Updated),
        None => api.create_transaction(&draft).await.map(Mutation::Created),
    };
    match result {
        Ok(mutation) => TransactionsAction::Saved(mutation),
        Err(e) => {
            log::warn!("saving transaction failed: {}", e);
            TransactionsAction::SubmitFailed(e.user_message(SAVE_FALLBACK_MESSAGE))
        }
    }
}

/// Caller has already asked for confirmation
pub async fn delete_transaction<A: FinanceApi + ?Sized>(api: &A, id: RecordId) -> TransactionsAction {
    match api.delete_transaction(id).await {
        Ok(()) => TransactionsAction::Saved(Mutation::Deleted(id)),
        Err(e) => {
            log::warn!("deleting transaction {} failed: {}", id, e);
            TransactionsAction::DeleteFailed(e)
        }
    }
}
