use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::components::category_chips::CategoryChips;
use crate::components::period_picker::PeriodPicker;
use crate::components::rate_line::RateLine;
use crate::components::transactions::{TotalsStrip, TransactionModal, TransactionTable};
use crate::hooks::use_currency::use_currency;
use crate::hooks::use_transactions::use_transactions;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct TransactionsPageProps {
    pub api_client: ApiClient,
}

#[function_component(TransactionsPage)]
pub fn transactions_page(props: &TransactionsPageProps) -> Html {
    let transactions = use_transactions(&props.api_client);
    let currency = use_currency().currency;

    let state = &transactions.state;
    let actions = &transactions.actions;
    let rate = state.exchange_rate();

    let on_search = {
        let set_search = actions.set_search.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            set_search.emit(input.value());
        })
    };

    let on_add = {
        let open_add = actions.open_add.clone();
        Callback::from(move |_: MouseEvent| open_add.emit(()))
    };

    html! {
        <div class="page transactions-page">
            <div class="page-header">
                <div>
                    <h1>{"Transactions"}</h1>
                    <RateLine rate={rate} info={state.rate.data.clone()} loading={state.rate.loading} />
                </div>
                <div class="page-header-controls">
                    <PeriodPicker period={state.filter.period} on_change={actions.set_period.clone()} />
                    <button class="btn btn-primary" onclick={on_add}>{"+ Add"}</button>
                </div>
            </div>

            <div class="filters">
                <input
                    class="search-input"
                    type="search"
                    placeholder="Search description or bank…"
                    value={state.filter.search.clone()}
                    oninput={on_search}
                />
                <CategoryChips selected={state.filter.category} on_select={actions.set_category.clone()} />
            </div>

            <TotalsStrip totals={state.totals()} />

            <TransactionTable
                transactions={state.visible()}
                rate={rate}
                currency={currency}
                loading={state.transactions.loading}
                empty_message={if state.filter.has_search() { "No transactions match your search" } else { "No transactions found" }}
                on_edit={Some(actions.open_edit.clone())}
                on_delete={Some(actions.delete.clone())}
            />

            <TransactionModal
                modal={state.modal.clone()}
                on_change={actions.update_form.clone()}
                on_submit={actions.submit.clone()}
                on_close={actions.close_modal.clone()}
            />
        </div>
    }
}
