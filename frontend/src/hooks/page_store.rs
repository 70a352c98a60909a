use std::rc::Rc;

use shared::notify::Notification;
use shared::pages::budgets::{BudgetsAction, BudgetsState};
use shared::pages::dashboard::{DashboardAction, DashboardState};
use shared::pages::transactions::{TransactionsAction, TransactionsState};
use yew::prelude::*;

use super::use_toasts::use_toasts;

/// Toasts kept around until the effect below has raised them
const OUTBOX_LIMIT: usize = 8;

/// A page state machine the frontend can drive through `use_reducer`
pub trait PageState: Clone + PartialEq + Default + 'static {
    type Action;

    fn apply(&mut self, action: Self::Action);
    fn notification(&self, action: &Self::Action) -> Option<Notification>;
}

impl PageState for DashboardState {
    type Action = DashboardAction;

    fn apply(&mut self, action: DashboardAction) {
        DashboardState::apply(self, action)
    }

    fn notification(&self, action: &DashboardAction) -> Option<Notification> {
        DashboardState::notification(self, action)
    }
}

impl PageState for TransactionsState {
    type Action = TransactionsAction;

    fn apply(&mut self, action: TransactionsAction) {
        TransactionsState::apply(self, action)
    }

    fn notification(&self, action: &TransactionsAction) -> Option<Notification> {
        TransactionsState::notification(self, action)
    }
}

impl PageState for BudgetsState {
    type Action = BudgetsAction;

    fn apply(&mut self, action: BudgetsAction) {
        BudgetsState::apply(self, action)
    }

    fn notification(&self, action: &BudgetsAction) -> Option<Notification> {
        BudgetsState::notification(self, action)
    }
}

/// Page state plus the toasts its actions produced, numbered in order
#[derive(Clone, PartialEq, Default)]
pub struct PageStore<S: PageState> {
    pub state: S,
    outbox: Vec<(u64, Notification)>,
    seq: u64,
}

impl<S: PageState> Reducible for PageStore<S> {
    type Action = S::Action;

    fn reduce(self: Rc<Self>, action: Self::Action) -> Rc<Self> {
        let mut next = (*self).clone();
        // Judged against the state the action arrives at
        if let Some(notification) = next.state.notification(&action) {
            next.seq += 1;
            next.outbox.push((next.seq, notification));
            if next.outbox.len() > OUTBOX_LIMIT {
                next.outbox.remove(0);
            }
        }
        next.state.apply(action);
        Rc::new(next)
    }
}

/// Reducer for a page, with every notification it produces forwarded to the toast stack
#[hook]
pub fn use_page_store<S: PageState>() -> UseReducerHandle<PageStore<S>> {
    let store = use_reducer(PageStore::<S>::default);
    let push_toast = use_toasts();
    let raised = use_mut_ref(|| 0u64);

    {
        let outbox = store.outbox.clone();
        use_effect_with(store.seq, move |seq| {
            let mut raised = raised.borrow_mut();
            for (id, notification) in outbox.into_iter().filter(|(id, _)| *id > *raised) {
                log::debug!("toast #{}: {}", id, notification.message);
                push_toast.emit(notification);
            }
            *raised = *seq;
            || ()
        });
    }

    store
}

#[cfg(test)]
mod tests {
    use super::*;
    use shared::ApiError;
    use wasm_bindgen_test::*;

    #[wasm_bindgen_test]
    fn test_reduce_numbers_notifications_in_order() {
        let store = Rc::new(PageStore::<BudgetsState>::default());
        let store = store.reduce(BudgetsAction::DeleteFailed(ApiError::Network("offline".into())));
        let store = store.reduce(BudgetsAction::Deleted(4));
        assert_eq!(store.seq, 2);
        let messages: Vec<_> = store.outbox.iter().map(|(_, n)| n.message.clone()).collect();
        assert_eq!(messages, vec!["Failed to remove".to_string(), "Budget removed".to_string()]);
    }

    #[wasm_bindgen_test]
    fn test_silent_actions_do_not_advance_sequence() {
        let store = Rc::new(PageStore::<BudgetsState>::default());
        let store = store.reduce(BudgetsAction::OpenCreate);
        assert_eq!(store.seq, 0);
        assert!(store.state.modal.is_some());
    }
}
