use yew::prelude::*;

use crate::components::budgets::{BudgetCard, BudgetModal};
use crate::hooks::use_budgets::use_budgets;
use crate::services::api::ApiClient;

#[derive(Properties, PartialEq)]
pub struct BudgetsPageProps {
    pub api_client: ApiClient,
}

#[function_component(BudgetsPage)]
pub fn budgets_page(props: &BudgetsPageProps) -> Html {
    let budgets = use_budgets(&props.api_client);

    let state = &budgets.state;
    let actions = &budgets.actions;

    let on_create = {
        let open_create = actions.open_create.clone();
        Callback::from(move |_: MouseEvent| open_create.emit(()))
    };

    let body = if state.budgets.loading && !state.budgets.loaded {
        html! { <div class="loading">{"Loading budgets..."}</div> }
    } else if state.budgets.data.is_empty() {
        html! {
            <div class="empty-state">
                <p class="empty-icon">{"📊"}</p>
                <p>{"No budgets set yet"}</p>
                <p class="empty-hint">{"Set monthly spending limits per category to track your progress."}</p>
                <button class="btn btn-primary" onclick={on_create.clone()}>{"+ Set your first budget"}</button>
            </div>
        }
    } else {
        html! {
            <div class="budget-grid">
                {for state.budgets.data.iter().map(|budget| html! {
                    <BudgetCard
                        key={budget.id}
                        budget={budget.clone()}
                        status={state.status_for(budget.category).cloned()}
                        on_update_limit={actions.update_limit.clone()}
                        on_delete={actions.delete.clone()}
                    />
                })}
            </div>
        }
    };

    html! {
        <div class="page budgets-page">
            <div class="page-header">
                <div>
                    <h1>{"Budgets"}</h1>
                    if state.budgets.loaded {
                        <p class="page-subtitle">{state.coverage_label()}</p>
                    }
                </div>
                <button class="btn btn-primary" onclick={on_create}>{"+ Set Budget"}</button>
            </div>

            <div class="info-note">
                {"Budget limits are in the currency you choose (PEN or USD). Spending is compared for "}
                {state.period.title()}
                {"."}
            </div>

            {body}

            <BudgetModal
                modal={state.modal.clone()}
                available={state.available_categories()}
                on_change={actions.update_form.clone()}
                on_submit={actions.submit.clone()}
                on_close={actions.close_modal.clone()}
            />
        </div>
    }
}
