use shared::forms::BudgetForm;
use shared::pages::budgets::BudgetModal as ModalState;
use shared::{Category, Currency};
use web_sys::{HtmlInputElement, HtmlSelectElement, MouseEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BudgetModalProps {
    pub modal: Option<ModalState>,
    /// Categories without a budget yet
    pub available: Vec<Category>,
    pub on_change: Callback<BudgetForm>,
    pub on_submit: Callback<BudgetForm>,
    pub on_close: Callback<()>,
}

#[function_component(BudgetModal)]
pub fn budget_modal(props: &BudgetModalProps) -> Html {
    let Some(modal) = props.modal.as_ref() else {
        return html! {};
    };
    let form = &modal.form;
    let saving = modal.saving;

    let on_backdrop_click = {
        let on_close = props.on_close.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            on_close.emit(());
        })
    };

    let on_modal_click = Callback::from(|e: MouseEvent| e.stop_propagation());

    let on_cancel = {
        let on_close = props.on_close.clone();
        Callback::from(move |_: MouseEvent| on_close.emit(()))
    };

    if props.available.is_empty() {
        return html! {
            <div class="modal-backdrop" onclick={on_backdrop_click}>
                <div class="modal modal-small" onclick={on_modal_click}>
                    <p class="modal-note">{"All categories have budgets set."}</p>
                    <button class="btn btn-secondary" onclick={on_cancel}>{"Close"}</button>
                </div>
            </div>
        };
    }

    let on_category_change = {
        let form = form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = form.clone();
            next.category = select.value().parse().ok();
            on_change.emit(next);
        })
    };

    let on_limit_change = {
        let form = form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let input: HtmlInputElement = e.target_unchecked_into();
            let mut next = form.clone();
            next.monthly_limit = input.value();
            on_change.emit(next);
        })
    };

    let on_currency_change = {
        let form = form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let select: HtmlSelectElement = e.target_unchecked_into();
            let mut next = form.clone();
            next.currency = Currency::from_preference(Some(&select.value()));
            on_change.emit(next);
        })
    };

    let on_submit = {
        let form = form.clone();
        let on_submit = props.on_submit.clone();
        Callback::from(move |e: SubmitEvent| {
            e.prevent_default();
            on_submit.emit(form.clone());
        })
    };

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal modal-small" onclick={on_modal_click}>
                <div class="modal-content">
                    <h3 class="modal-title">{"Set Monthly Budget"}</h3>

                    <form class="modal-form" onsubmit={on_submit}>
                        <div class="form-group">
                            <label for="budget-category">{"Category"}</label>
                            <select id="budget-category" onchange={on_category_change} disabled={saving}>
                                {for props.available.iter().map(|category| html! {
                                    <option value={category.as_str()} selected={Some(*category) == form.category}>
                                        {category.badge()}
                                    </option>
                                })}
                            </select>
                        </div>

                        <div class="form-row">
                            <div class="form-group">
                                <label for="budget-limit">{"Monthly Limit"}</label>
                                <input
                                    id="budget-limit"
                                    type="number"
                                    min="0"
                                    step="1"
                                    placeholder="500"
                                    value={form.monthly_limit.clone()}
                                    onchange={on_limit_change}
                                    disabled={saving}
                                    autofocus=true
                                />
                            </div>
                            <div class="form-group narrow">
                                <label for="budget-currency">{"Currency"}</label>
                                <select id="budget-currency" onchange={on_currency_change} disabled={saving}>
                                    {for Currency::ALL.iter().map(|currency| html! {
                                        <option value={currency.code()} selected={*currency == form.currency}>
                                            {currency.code()}
                                        </option>
                                    })}
                                </select>
                            </div>
                        </div>

                        if let Some(error) = modal.error.clone() {
                            <div class="modal-error">{error}</div>
                        }

                        <div class="modal-buttons">
                            <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={saving}>
                                {"Cancel"}
                            </button>
                            <button type="submit" class="btn btn-primary" disabled={saving}>
                                {if saving { "Saving…" } else { "Set Budget" }}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
