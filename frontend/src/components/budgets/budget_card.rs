use shared::currency::format_native;
use shared::{BudgetLevel, Budget, BudgetStatus};
use web_sys::HtmlInputElement;
use yew::prelude::*;

use crate::hooks::use_budgets::LimitEdit;

#[derive(Properties, PartialEq)]
pub struct BudgetCardProps {
    pub budget: Budget,
    /// Spend for the current month, once loaded
    pub status: Option<BudgetStatus>,
    pub on_update_limit: Callback<LimitEdit>,
    pub on_delete: Callback<Budget>,
}

#[function_component(BudgetCard)]
pub fn budget_card(props: &BudgetCardProps) -> Html {
    let editing = use_state(|| false);
    let saving = use_state(|| false);
    let limit_input = use_state(|| props.budget.monthly_limit.to_string());

    let budget = &props.budget;
    let currency = budget.currency;

    let on_limit_input = {
        let limit_input = limit_input.clone();
        Callback::from(move |e: InputEvent| {
            let input: HtmlInputElement = e.target_unchecked_into();
            limit_input.set(input.value());
        })
    };

    let on_toggle_edit = {
        let editing = editing.clone();
        let limit_input = limit_input.clone();
        let current = budget.monthly_limit;
        Callback::from(move |_: MouseEvent| {
            limit_input.set(current.to_string());
            editing.set(!*editing);
        })
    };

    let on_save = {
        let editing = editing.clone();
        let saving = saving.clone();
        let limit_input = limit_input.clone();
        let on_update_limit = props.on_update_limit.clone();
        let id = budget.id;
        Callback::from(move |_: MouseEvent| {
            saving.set(true);
            let done = {
                let editing = editing.clone();
                let saving = saving.clone();
                Callback::from(move |saved: bool| {
                    saving.set(false);
                    if saved {
                        editing.set(false);
                    }
                })
            };
            on_update_limit.emit((id, (*limit_input).clone(), done));
        })
    };

    let on_delete = {
        let on_delete = props.on_delete.clone();
        let budget = budget.clone();
        Callback::from(move |_: MouseEvent| on_delete.emit(budget.clone()))
    };

    let (spent, percentage, level) = match &props.status {
        Some(status) => (
            status.spent_in_budget_currency(budget.monthly_limit),
            status.percentage,
            status.level(),
        ),
        None => (0.0, 0.0, BudgetLevel::Ok),
    };

    html! {
        <div class={classes!("budget-card", level.css_class())}>
            <div class="budget-card-header">
                <span class="budget-card-category">{budget.category.badge()}</span>
                <div class="budget-card-actions">
                    <button class="row-action edit" onclick={on_toggle_edit} title="Edit limit">{"✎"}</button>
                    <button class="row-action delete" onclick={on_delete} title="Remove budget">{"🗑"}</button>
                </div>
            </div>

            <div class="budget-bar-track">
                <div
                    class={classes!("budget-bar-fill", level.css_class())}
                    style={format!("width: {:.1}%", percentage.clamp(0.0, 100.0))}
                ></div>
            </div>

            if *editing {
                <div class="budget-limit-editor">
                    <input
                        type="number"
                        min="0"
                        step="1"
                        value={(*limit_input).clone()}
                        oninput={on_limit_input}
                        disabled={*saving}
                        autofocus=true
                    />
                    <button class="btn btn-primary btn-small" onclick={on_save} disabled={*saving}>
                        {if *saving { "…" } else { "Save" }}
                    </button>
                </div>
            } else {
                <div class="budget-card-figures">
                    <span class="budget-spent">{format!("{} spent", format_native(spent, currency))}</span>
                    <span class="budget-limit">{format!("of {}", format_native(budget.monthly_limit, currency))}</span>
                    <span class="budget-percentage">{format!("{:.0}%", percentage)}</span>
                </div>
            }
        </div>
    }
}
