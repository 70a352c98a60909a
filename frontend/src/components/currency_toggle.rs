use yew::prelude::*;

use crate::hooks::use_currency::use_currency;

/// USD/PEN switch for aggregate figures
#[function_component(CurrencyToggle)]
pub fn currency_toggle() -> Html {
    let currency = use_currency();

    let onclick = {
        let toggle = currency.toggle.clone();
        Callback::from(move |_: MouseEvent| toggle.emit(()))
    };

    html! {
        <button
            class="currency-toggle"
            {onclick}
            title={format!("Showing totals in {}", currency.currency.name())}
        >
            <span class="currency-symbol">{currency.currency.symbol()}</span>
            <span class="currency-code">{currency.currency.code()}</span>
        </button>
    }
}
