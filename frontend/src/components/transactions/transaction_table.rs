use shared::currency::{format_signed, ExchangeRate};
use shared::filters::short_date;
use shared::{Currency, RecordId, Transaction};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TransactionTableProps {
    pub transactions: Vec<Transaction>,
    pub rate: ExchangeRate,
    pub currency: Currency,
    pub loading: bool,
    #[prop_or("No transactions found".into())]
    pub empty_message: AttrValue,
    /// Row actions; the dashboard's recent list has none
    #[prop_or_default]
    pub on_edit: Option<Callback<RecordId>>,
    #[prop_or_default]
    pub on_delete: Option<Callback<RecordId>>,
}

#[function_component(TransactionTable)]
pub fn transaction_table(props: &TransactionTableProps) -> Html {
    if props.transactions.is_empty() {
        return html! {
            <div class="loading">
                {if props.loading { "Loading transactions...".into() } else { props.empty_message.clone() }}
            </div>
        };
    }

    let has_actions = props.on_edit.is_some() || props.on_delete.is_some();

    html! {
        <div class={classes!("table-container", props.loading.then_some("refreshing"))}>
            <table class="transactions-table">
                <thead>
                    <tr>
                        <th>{"Date"}</th>
                        <th>{"Description"}</th>
                        <th>{"Category"}</th>
                        <th>{"Bank"}</th>
                        <th>{"Amount"}</th>
                        if has_actions {
                            <th></th>
                        }
                    </tr>
                </thead>
                <tbody>
                    {for props.transactions.iter().map(|tx| html! {
                        <TransactionRow
                            key={tx.id}
                            transaction={tx.clone()}
                            rate={props.rate}
                            currency={props.currency}
                            on_edit={props.on_edit.clone()}
                            on_delete={props.on_delete.clone()}
                        />
                    })}
                </tbody>
            </table>
        </div>
    }
}

#[derive(Properties, PartialEq)]
struct TransactionRowProps {
    transaction: Transaction,
    rate: ExchangeRate,
    currency: Currency,
    on_edit: Option<Callback<RecordId>>,
    on_delete: Option<Callback<RecordId>>,
}

#[function_component(TransactionRow)]
fn transaction_row(props: &TransactionRowProps) -> Html {
    let tx = &props.transaction;
    let amount_class = if tx.is_income() { "amount positive" } else { "amount negative" };
    let hint = props.rate.converted_hint(tx, props.currency);
    let id = tx.id;

    let action = |callback: &Option<Callback<RecordId>>, label: &'static str, class: &'static str| match callback {
        Some(callback) => {
            let callback = callback.clone();
            html! {
                <button class={classes!("row-action", class)} onclick={Callback::from(move |_: MouseEvent| callback.emit(id))}>
                    {label}
                </button>
            }
        }
        None => html! {},
    };

    html! {
        <tr>
            <td class="date">{short_date(tx.date)}</td>
            <td class="description">{&tx.description}</td>
            <td class="category"><span class="category-badge">{tx.category.badge()}</span></td>
            <td class="bank">{&tx.bank}</td>
            <td class={amount_class}>
                <span>{format_signed(tx)}</span>
                if let Some(hint) = hint {
                    <span class="converted-hint">{hint}</span>
                }
            </td>
            if props.on_edit.is_some() || props.on_delete.is_some() {
                <td class="row-actions">
                    {action(&props.on_edit, "Edit", "edit")}
                    {action(&props.on_delete, "Delete", "delete")}
                </td>
            }
        </tr>
    }
}
