use shared::forms::BudgetForm;
use shared::pages::budgets::{
    delete_budget, delete_confirmation, load_budgets, load_status, submit_budget, update_limit, BudgetsAction,
    BudgetsState,
};
use shared::{Budget, RecordId};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::page_store::use_page_store;
use super::use_cancel_token::use_cancel_token;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::storage;

/// Inline limit edit: budget id, the raw input, and a callback told whether it saved
pub type LimitEdit = (RecordId, String, Callback<bool>);

pub struct UseBudgetsResult {
    pub state: BudgetsState,
    pub actions: UseBudgetsActions,
}

#[derive(Clone)]
pub struct UseBudgetsActions {
    pub open_create: Callback<()>,
    pub update_form: Callback<BudgetForm>,
    pub close_modal: Callback<()>,
    pub submit: Callback<BudgetForm>,
    pub update_limit: Callback<LimitEdit>,
    pub delete: Callback<Budget>,
}

#[hook]
pub fn use_budgets(api_client: &ApiClient) -> UseBudgetsResult {
    let store = use_page_store::<BudgetsState>();
    let token = use_cancel_token();

    {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        let token = token.clone();
        let period = store.state.period;
        use_effect_with((), move |_| {
            // Each group settles on its own response
            {
                let api_client = api_client.clone();
                let dispatcher = dispatcher.clone();
                let token = token.clone();
                spawn_local(async move {
                    let action = load_budgets(&api_client).await;
                    if !token.is_cancelled() {
                        dispatcher.dispatch(action);
                    }
                });
            }
            spawn_local(async move {
                let action = load_status(&api_client, period).await;
                if !token.is_cancelled() {
                    dispatcher.dispatch(action);
                }
            });
            || ()
        });
    }

    let open_create = {
        let dispatcher = store.dispatcher();
        use_callback((), move |_: (), _| dispatcher.dispatch(BudgetsAction::OpenCreate))
    };

    let update_form = {
        let dispatcher = store.dispatcher();
        use_callback((), move |form: BudgetForm, _| dispatcher.dispatch(BudgetsAction::UpdateForm(form)))
    };

    let close_modal = {
        let dispatcher = store.dispatcher();
        use_callback((), move |_: (), _| dispatcher.dispatch(BudgetsAction::CloseModal))
    };

    let submit = {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        let token = token.clone();
        use_callback(store.state.clone(), move |form: BudgetForm, state| {
            dispatcher.dispatch(BudgetsAction::SubmitStarted);
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let token = token.clone();
            let state = state.clone();
            spawn_local(async move {
                let action = submit_budget(&api_client, &state, &form).await;
                if !token.is_cancelled() {
                    dispatcher.dispatch(action);
                }
            });
        })
    };

    let on_update_limit = {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        let token = token.clone();
        use_callback((), move |(id, input, done): LimitEdit, _| {
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let token = token.clone();
            spawn_local(async move {
                match update_limit(&api_client, id, &input).await {
                    None => {
                        Logger::debug_with_component("budgets", &format!("ignoring limit input {:?}", input));
                        done.emit(false);
                    }
                    Some(action) => {
                        if token.is_cancelled() {
                            return;
                        }
                        let saved = matches!(action, BudgetsAction::Updated(_));
                        dispatcher.dispatch(action);
                        done.emit(saved);
                    }
                }
            });
        })
    };

    let delete = {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        use_callback((), move |budget: Budget, _| {
            if !storage::confirm(&delete_confirmation(budget.category)) {
                return;
            }
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let token = token.clone();
            spawn_local(async move {
                let action = delete_budget(&api_client, budget.id).await;
                if !token.is_cancelled() {
                    dispatcher.dispatch(action);
                }
            });
        })
    };

    UseBudgetsResult {
        state: store.state.clone(),
        actions: UseBudgetsActions {
            open_create,
            update_form,
            close_modal,
            submit,
            update_limit: on_update_limit,
            delete,
        },
    }
}
