use super::Group;
use crate::api::FinanceApi;
use crate::filters::Period;
use crate::forms::{available_categories, parse_limit, BudgetForm, ValidationError};
use crate::notify::Notification;
use crate::reconcile::{reconcile, Mutation};
use crate::{ApiError, Budget, BudgetDraft, BudgetStatus, BudgetUpdate, Category, RecordId};

pub const CREATE_FALLBACK_MESSAGE: &str = "Failed to create budget";

pub fn delete_confirmation(category: Category) -> String {
    format!("Remove budget for \"{}\"?", category)
}

#[derive(Debug, Clone, PartialEq)]
pub enum BudgetsAction {
    BudgetsLoaded(Result<Vec<Budget>, ApiError>),
    StatusLoaded(Period, Result<Vec<BudgetStatus>, ApiError>),
    OpenCreate,
    UpdateForm(BudgetForm),
    CloseModal,
    SubmitStarted,
    SubmitFailed(String),
    Created(Budget),
    Updated(Budget),
    UpdateFailed(ApiError),
    Deleted(RecordId),
    DeleteFailed(ApiError),
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetModal {
    pub form: BudgetForm,
    pub error: Option<String>,
    pub saving: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BudgetsState {
    /// Month the spend figures on the cards refer to
    pub period: Period,
    pub budgets: Group<Vec<Budget>>,
    pub status: Group<Vec<BudgetStatus>>,
    pub modal: Option<BudgetModal>,
}

impl Default for BudgetsState {
    fn default() -> Self {
        Self::new(Period::current())
    }
}

impl BudgetsState {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            budgets: Group::default(),
            status: Group::default(),
            modal: None,
        }
    }

    pub fn apply(&mut self, action: BudgetsAction) {
        match action {
            BudgetsAction::BudgetsLoaded(result) => {
                self.budgets.settle(result);
            }
            BudgetsAction::StatusLoaded(period, result) => {
                if period == self.period {
                    self.status.settle(result);
                }
            }
            BudgetsAction::OpenCreate => {
                self.modal = Some(BudgetModal {
                    form: BudgetForm::new(&self.budgets.data),
                    error: None,
                    saving: false,
                });
            }
            BudgetsAction::UpdateForm(form) => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.form = form;
                }
            }
            BudgetsAction::CloseModal => self.modal = None,
            BudgetsAction::SubmitStarted => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.saving = true;
                    modal.error = None;
                }
            }
            BudgetsAction::SubmitFailed(message) => {
                if let Some(modal) = self.modal.as_mut() {
                    modal.saving = false;
                    modal.error = Some(message);
                }
            }
            BudgetsAction::Created(budget) => {
                // Mirrors the server, even for a second budget in a held category
                if self.has_other_budget_for(&budget) {
                    log::warn!("server accepted a second budget for {}", budget.category);
                }
                self.modal = None;
                self.budgets.data = reconcile(&self.budgets.data, Mutation::Created(budget));
            }
            BudgetsAction::Updated(budget) => {
                self.budgets.data = reconcile(&self.budgets.data, Mutation::Updated(budget));
            }
            BudgetsAction::Deleted(id) => {
                self.budgets.data = reconcile(&self.budgets.data, Mutation::Deleted(id));
            }
            BudgetsAction::UpdateFailed(_) | BudgetsAction::DeleteFailed(_) => {}
        }
    }

    fn has_other_budget_for(&self, budget: &Budget) -> bool {
        self.budgets
            .data
            .iter()
            .any(|existing| existing.category == budget.category && existing.id != budget.id)
    }

    /// The create form's draft, checked against the budgets already held
    pub fn validate_new(&self, form: &BudgetForm) -> Result<BudgetDraft, ValidationError> {
        form.to_draft(&self.budgets.data)
    }

    pub fn notification(&self, action: &BudgetsAction) -> Option<Notification> {
        match action {
            BudgetsAction::BudgetsLoaded(Err(e)) if !e.is_cancelled() => Some(Notification::error("Failed to load budgets")),
            BudgetsAction::StatusLoaded(period, Err(e)) if *period == self.period && !e.is_cancelled() => {
                Some(Notification::error("Failed to load budget status"))
            }
            BudgetsAction::Created(budget) if self.has_other_budget_for(budget) => Some(Notification::info(format!(
                "{} already had a budget; both are now listed",
                budget.category
            ))),
            BudgetsAction::Created(budget) => Some(Notification::success(format!("Budget set for {}", budget.category))),
            BudgetsAction::SubmitFailed(message) => Some(Notification::error(message.clone())),
            BudgetsAction::Updated(_) => Some(Notification::success("Budget updated")),
            BudgetsAction::UpdateFailed(_) => Some(Notification::error("Failed to update")),
            BudgetsAction::Deleted(_) => Some(Notification::success("Budget removed")),
            BudgetsAction::DeleteFailed(_) => Some(Notification::error("Failed to remove")),
            _ => None,
        }
    }

    pub fn status_for(&self, category: Category) -> Option<&BudgetStatus> {
        self.status.data.iter().find(|status| status.category == category)
    }

    pub fn available_categories(&self) -> Vec<Category> {
        available_categories(&self.budgets.data)
    }

    /// "3 of 11 categories budgeted"
    pub fn coverage_label(&self) -> String {
        format!("{} of {} categories budgeted", self.budgets.data.len(), Category::ALL.len())
    }
}

pub async fn load_budgets<A: FinanceApi + ?Sized>(api: &A) -> BudgetsAction {
    BudgetsAction::BudgetsLoaded(api.list_budgets().await)
}

pub async fn load_status<A: FinanceApi + ?Sized>(api: &A, period: Period) -> BudgetsAction {
    BudgetsAction::StatusLoaded(period, api.budget_status(period).await)
}

/// Validate against the held set, then create
pub async fn submit_budget<A: FinanceApi + ?Sized>(api: &A, state: &BudgetsState, form: &BudgetForm) -> BudgetsAction {
    let draft = match state.validate_new(form) {
        Ok(draft) => draft,
        Err(e) => return BudgetsAction::SubmitFailed(e.to_string()),
    };
    match api.create_budget(&draft).await {
        Ok(budget) => BudgetsAction::Created(budget),
        Err(e) => {
            log::warn!("creating budget for {} failed: {}", draft.category, e);
            BudgetsAction::SubmitFailed(e.user_message(CREATE_FALLBACK_MESSAGE))
        }
    }
}

/// Inline limit edit. `None` when the typed value is not a positive number,
/// in which case nothing is sent.
pub async fn update_limit<A: FinanceApi + ?Sized>(api: &A, id: RecordId, input: &str) -> Option<BudgetsAction> {
    let monthly_limit = parse_limit(input).ok()?;
    let update = BudgetUpdate {
        monthly_limit: Some(monthly_limit),
        currency: None,
    };
    Some(match api.update_budget(id, &update).await {
        Ok(budget) => BudgetsAction::Updated(budget),
        Err(e) => {
            log::warn!("updating budget {} failed: {}", id, e);
            BudgetsAction::UpdateFailed(e)
        }
    })
}

pub async fn delete_budget<A: FinanceApi + ?Sized>(api: &A, id: RecordId) -> BudgetsAction {
    match api.delete_budget(id).await {
        Ok(()) => BudgetsAction::Deleted(id),
        Err(e) => {
            log::warn!("deleting budget {} failed: {}", id, e);
            BudgetsAction::DeleteFailed(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::Currency;

    fn budget(id: RecordId, category: Category, limit: f64) -> Budget {
        Budget {
            id,
            category,
            monthly_limit: limit,
            currency: Currency::Pen,
        }
    }

    fn loaded(budgets: Vec<Budget>) -> BudgetsState {
        let mut state = BudgetsState::new(Period::new(6, 2025));
        state.apply(BudgetsAction::BudgetsLoaded(Ok(budgets)));
        state
    }

    #[test]
    fn test_create_form_omits_budgeted_categories() {
        let mut state = loaded(vec![budget(1, Category::Groceries, 500.0)]);
        state.apply(BudgetsAction::OpenCreate);
        assert!(!state.available_categories().contains(&Category::Groceries));
        assert_eq!(state.modal.as_ref().unwrap().form.category, Some(Category::Transport));
        assert_eq!(state.coverage_label(), "1 of 11 categories budgeted");
    }

    #[test]
    fn test_status_joined_by_category() {
        let mut state = loaded(vec![budget(1, Category::Groceries, 500.0)]);
        state.apply(BudgetsAction::StatusLoaded(
            state.period,
            Ok(vec![BudgetStatus { category: Category::Groceries, spent: 90.0, limit: 135.0, percentage: 66.7, currency: None }]),
        ));
        assert_eq!(state.status_for(Category::Groceries).map(|s| s.spent), Some(90.0));
        assert_eq!(state.status_for(Category::Health), None);
    }

    #[test]
    fn test_server_confirmed_duplicate_is_still_listed() {
        let mut state = loaded(vec![budget(1, Category::Groceries, 500.0)]);
        state.apply(BudgetsAction::OpenCreate);
        let second = budget(2, Category::Groceries, 10.0);
        let note = state.notification(&BudgetsAction::Created(second.clone())).unwrap();
        assert!(!note.is_error());
        assert!(note.message.contains("groceries"));

        state.apply(BudgetsAction::Created(second));
        assert_eq!(state.budgets.data.len(), 2);
        assert_eq!(state.budgets.data[0].id, 2);
        assert!(state.modal.is_none());

        state.apply(BudgetsAction::Deleted(2));
        assert_eq!(state.budgets.data.len(), 1);
    }

    #[tokio::test]
    async fn test_budget_list_settles_without_status() {
        let api = FakeApi::new();
        let mut state = BudgetsState::new(Period::new(6, 2025));
        state.apply(load_budgets(&api).await);
        assert!(!state.budgets.loading);
        assert!(state.status.loading);
    }

    #[tokio::test]
    async fn test_submit_validates_before_network() {
        let api = FakeApi::new();
        let state = loaded(vec![budget(1, Category::Groceries, 500.0)]);
        let form = BudgetForm {
            category: Some(Category::Groceries),
            monthly_limit: "100".to_string(),
            currency: Currency::Pen,
        };
        let action = submit_budget(&api, &state, &form).await;
        assert!(matches!(action, BudgetsAction::SubmitFailed(_)));
        assert_eq!(api.calls("create_budget"), 0);

        let form = BudgetForm { monthly_limit: "abc".to_string(), category: Some(Category::Health), ..form };
        assert_eq!(
            submit_budget(&api, &state, &form).await,
            BudgetsAction::SubmitFailed("Enter a valid amount".to_string())
        );
    }

    #[tokio::test]
    async fn test_create_success_and_conflict() {
        let api = FakeApi::new();
        let mut state = loaded(vec![budget(1, Category::Groceries, 500.0)]);
        state.apply(BudgetsAction::OpenCreate);
        let form = BudgetForm {
            category: Some(Category::Health),
            monthly_limit: "200".to_string(),
            currency: Currency::Usd,
        };
        let action = submit_budget(&api, &state, &form).await;
        assert_eq!(state.notification(&action).unwrap().message, "Budget set for health");
        state.apply(action);
        assert!(state.modal.is_none());
        assert_eq!(state.budgets.data[0].category, Category::Health);

        api.fail(
            "create_budget",
            ApiError::Server { status: 409, detail: Some("Budget for 'transport' already exists".into()) },
        );
        let form = BudgetForm { category: Some(Category::Transport), ..form };
        let action = submit_budget(&api, &state, &form).await;
        assert_eq!(action, BudgetsAction::SubmitFailed("Budget for 'transport' already exists".to_string()));

        api.fail("create_budget", ApiError::Network("offline".into()));
        let action = submit_budget(&api, &state, &form).await;
        assert_eq!(action, BudgetsAction::SubmitFailed(CREATE_FALLBACK_MESSAGE.to_string()));
    }

    #[tokio::test]
    async fn test_inline_limit_edit() {
        let api = FakeApi::new();
        api.budgets.borrow_mut().push(budget(4, Category::Transport, 100.0));
        let mut state = loaded(vec![budget(3, Category::Health, 50.0), budget(4, Category::Transport, 100.0)]);

        assert_eq!(update_limit(&api, 4, "zero").await, None);
        assert_eq!(api.calls("update_budget"), 0);

        let action = update_limit(&api, 4, "250").await.unwrap();
        state.apply(action);
        let transport: Vec<_> = state.budgets.data.iter().filter(|b| b.id == 4).collect();
        assert_eq!(transport.len(), 1);
        assert_eq!(transport[0].monthly_limit, 250.0);
        assert_eq!(transport[0].currency, Currency::Pen);
    }

    #[tokio::test]
    async fn test_delete_and_load_failures() {
        let api = FakeApi::new();
        let mut state = loaded(vec![budget(3, Category::Health, 50.0)]);
        let action = delete_budget(&api, 3).await;
        state.apply(action);
        assert!(state.budgets.data.is_empty());
        assert_eq!(delete_confirmation(Category::Health), "Remove budget for \"health\"?");

        api.fail("budgets", ApiError::Network("offline".into()));
        let mut state = loaded(vec![budget(3, Category::Health, 50.0)]);
        let action = load_budgets(&api).await;
        assert_eq!(state.notification(&action).unwrap().message, "Failed to load budgets");
        state.apply(action);
        assert_eq!(state.budgets.data.len(), 1);
    }
}
