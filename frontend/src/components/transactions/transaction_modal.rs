use shared::forms::TransactionForm;
use shared::pages::transactions::TransactionModal as ModalState;
use shared::{Category, Currency};
use web_sys::{HtmlInputElement, HtmlSelectElement, MouseEvent};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TransactionModalProps {
    /// `None` while closed
    pub modal: Option<ModalState>,
    pub on_change: Callback<TransactionForm>,
    pub on_submit: Callback<TransactionForm>,
    pub on_close: Callback<()>,
}

/// Add/edit dialog. The form lives in page state so a failed save keeps what was typed.
#[function_component(TransactionModal)]
pub fn transaction_modal(props: &TransactionModalProps) -> Html {
    let Some(modal) = props.modal.as_ref() else {
        return html! {};
    };
    let form = &modal.form;
    let saving = modal.saving;

    // Each input rewrites one field of the current form
    let edit = |apply: fn(&mut TransactionForm, String)| {
        let form = form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |e: Event| {
            let value = match e.target_dyn_into::<HtmlSelectElement>() {
                Some(select) => select.value(),
                None => e.target_unchecked_into::<HtmlInputElement>().value(),
            };
            let mut next = form.clone();
            apply(&mut next, value);
            on_change.emit(next);
        })
    };

    let set_kind = |is_expense: bool| {
        let form = form.clone();
        let on_change = props.on_change.clone();
        Callback::from(move |_: MouseEvent| {
            let mut next = form.clone();
            next.is_expense = is_expense;
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

    html! {
        <div class="modal-backdrop" onclick={on_backdrop_click}>
            <div class="modal" onclick={on_modal_click}>
                <div class="modal-content">
                    <h3 class="modal-title">{form.title()}</h3>

                    if let Some(error) = modal.error.clone() {
                        <div class="modal-error">{error}</div>
                    }

                    <form class="modal-form" onsubmit={on_submit}>
                        if form.can_toggle_kind() {
                            <div class="kind-toggle">
                                <button
                                    type="button"
                                    class={classes!("kind-button", "income", (!form.is_expense).then_some("active"))}
                                    onclick={set_kind(false)}
                                >
                                    {"+ Income"}
                                </button>
                                <button
                                    type="button"
                                    class={classes!("kind-button", "expense", form.is_expense.then_some("active"))}
                                    onclick={set_kind(true)}
                                >
                                    {"− Expense"}
                                </button>
                            </div>
                        }

                        <div class="form-row">
                            <div class="form-group">
                                <label for="tx-amount">{"Amount"}</label>
                                <input
                                    id="tx-amount"
                                    type="number"
                                    min="0"
                                    step="0.01"
                                    placeholder="0.00"
                                    value={form.amount.clone()}
                                    onchange={edit(|form, value| form.amount = value)}
                                    disabled={saving}
                                    autofocus=true
                                />
                            </div>
                            <div class="form-group narrow">
                                <label for="tx-currency">{"Currency"}</label>
                                <select
                                    id="tx-currency"
                                    onchange={edit(|form, value| form.currency = Currency::from_preference(Some(&value)))}
                                    disabled={saving}
                                >
                                    {for Currency::ALL.iter().map(|currency| html! {
                                        <option value={currency.code()} selected={*currency == form.currency}>
                                            {currency.code()}
                                        </option>
                                    })}
                                </select>
                            </div>
                        </div>

                        <div class="form-group">
                            <label for="tx-description">{"Description"}</label>
                            <input
                                id="tx-description"
                                type="text"
                                placeholder={if form.is_expense { "e.g. Uber ride" } else { "e.g. Monthly salary" }}
                                value={form.description.clone()}
                                onchange={edit(|form, value| form.description = value)}
                                disabled={saving}
                            />
                        </div>

                        <div class="form-group">
                            <label for="tx-category">{"Category"}</label>
                            <select
                                id="tx-category"
                                onchange={edit(|form, value| form.category = value.parse().unwrap_or(Category::Other))}
                                disabled={saving}
                            >
                                {for Category::ALL.iter().map(|category| html! {
                                    <option value={category.as_str()} selected={*category == form.category}>
                                        {category.badge()}
                                    </option>
                                })}
                            </select>
                        </div>

                        <div class="form-row">
                            <div class="form-group">
                                <label for="tx-date">{"Date"}</label>
                                <input
                                    id="tx-date"
                                    type="date"
                                    value={form.date.clone()}
                                    onchange={edit(|form, value| form.date = value)}
                                    disabled={saving}
                                />
                            </div>
                            <div class="form-group">
                                <label for="tx-bank">{"Source"}</label>
                                <input
                                    id="tx-bank"
                                    type="text"
                                    placeholder="Cash, BCP, etc."
                                    value={form.bank.clone()}
                                    onchange={edit(|form, value| form.bank = value)}
                                    disabled={saving}
                                />
                            </div>
                        </div>

                        <div class="modal-buttons">
                            <button type="submit" class="btn btn-primary" disabled={saving}>
                                {match (saving, form.is_editing()) {
                                    (true, _) => "Saving...",
                                    (false, true) => "Save changes",
                                    (false, false) => "Add transaction",
                                }}
                            </button>
                            <button type="button" class="btn btn-secondary" onclick={on_cancel} disabled={saving}>
                                {"Cancel"}
                            </button>
                        </div>
                    </form>
                </div>
            </div>
        </div>
    }
}
