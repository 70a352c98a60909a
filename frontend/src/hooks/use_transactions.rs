use chrono::Local;
use shared::api::FinanceApi;
use shared::category::CategoryFilter;
use shared::filters::Period;
use shared::forms::TransactionForm;
use shared::pages::transactions::{
    delete_transaction, load_transactions, submit_transaction, TransactionsAction, TransactionsState,
    DELETE_CONFIRMATION,
};
use shared::RecordId;
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::page_store::use_page_store;
use super::use_cancel_token::use_cancel_token;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::storage;

pub struct UseTransactionsResult {
    pub state: TransactionsState,
    pub actions: UseTransactionsActions,
}

#[derive(Clone)]
pub struct UseTransactionsActions {
    pub set_period: Callback<Period>,
    pub set_category: Callback<CategoryFilter>,
    pub set_search: Callback<String>,
    pub open_add: Callback<()>,
    pub open_edit: Callback<RecordId>,
    pub update_form: Callback<TransactionForm>,
    pub close_modal: Callback<()>,
    pub submit: Callback<TransactionForm>,
    pub delete: Callback<RecordId>,
}

#[hook]
pub fn use_transactions(api_client: &ApiClient) -> UseTransactionsResult {
    let store = use_page_store::<TransactionsState>();
    let token = use_cancel_token();

    // Search is applied locally; only period and category go to the server
    {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        let token = token.clone();
        use_effect_with(store.state.query(), move |query| {
            let query = *query;
            spawn_local(async move {
                let action = load_transactions(&api_client, query).await;
                if !token.is_cancelled() {
                    dispatcher.dispatch(action);
                }
            });
            || ()
        });
    }

    {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        let token = token.clone();
        use_effect_with((), move |_| {
            spawn_local(async move {
                let result = api_client.exchange_rate().await;
                if let Err(e) = &result {
                    Logger::warn_with_component("transactions", &format!("exchange rate unavailable: {}", e));
                }
                if !token.is_cancelled() {
                    dispatcher.dispatch(TransactionsAction::RateLoaded(result));
                }
            });
            || ()
        });
    }

    let set_period = {
        let dispatcher = store.dispatcher();
        use_callback((), move |period: Period, _| dispatcher.dispatch(TransactionsAction::SetPeriod(period)))
    };

    let set_category = {
        let dispatcher = store.dispatcher();
        use_callback((), move |category: CategoryFilter, _| {
            dispatcher.dispatch(TransactionsAction::SetCategory(category))
        })
    };

    let set_search = {
        let dispatcher = store.dispatcher();
        use_callback((), move |search: String, _| dispatcher.dispatch(TransactionsAction::SetSearch(search)))
    };

    let open_add = {
        let dispatcher = store.dispatcher();
        use_callback((), move |_: (), _| {
            let today = Local::now().date_naive();
            dispatcher.dispatch(TransactionsAction::OpenAdd(TransactionForm::new(today)))
        })
    };

    let open_edit = {
        let dispatcher = store.dispatcher();
        use_callback((), move |id: RecordId, _| dispatcher.dispatch(TransactionsAction::OpenEdit(id)))
    };

    let update_form = {
        let dispatcher = store.dispatcher();
        use_callback((), move |form: TransactionForm, _| dispatcher.dispatch(TransactionsAction::UpdateForm(form)))
    };

    let close_modal = {
        let dispatcher = store.dispatcher();
        use_callback((), move |_: (), _| dispatcher.dispatch(TransactionsAction::CloseModal))
    };

    let submit = {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        let token = token.clone();
        use_callback((), move |form: TransactionForm, _| {
            dispatcher.dispatch(TransactionsAction::SubmitStarted);
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let token = token.clone();
            spawn_local(async move {
                let action = submit_transaction(&api_client, &form).await;
                if !token.is_cancelled() {
                    dispatcher.dispatch(action);
                }
            });
        })
    };

    let delete = {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        use_callback((), move |id: RecordId, _| {
            if !storage::confirm(DELETE_CONFIRMATION) {
                return;
            }
            Logger::info_with_component("transactions", &format!("deleting transaction {}", id));
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let token = token.clone();
            spawn_local(async move {
                let action = delete_transaction(&api_client, id).await;
                if !token.is_cancelled() {
                    dispatcher.dispatch(action);
                }
            });
        })
    };

    UseTransactionsResult {
        state: store.state.clone(),
        actions: UseTransactionsActions {
            set_period,
            set_category,
            set_search,
            open_add,
            open_edit,
            update_form,
            close_modal,
            submit,
            delete,
        },
    }
}
