use shared::Currency;
use yew::prelude::*;

use crate::services::logging::Logger;
use crate::services::storage;

/// Display currency for aggregate figures, persisted across visits
#[derive(Clone, PartialEq)]
pub struct CurrencyContext {
    pub currency: Currency,
    pub toggle: Callback<()>,
}

#[derive(Properties, PartialEq)]
pub struct CurrencyProviderProps {
    #[prop_or_default]
    pub children: Html,
}

#[function_component(CurrencyProvider)]
pub fn currency_provider(props: &CurrencyProviderProps) -> Html {
    let currency = use_state(storage::preferred_currency);

    let toggle = {
        let currency = currency.clone();
        Callback::from(move |_| {
            let next = currency.toggled();
            storage::store_preferred_currency(next);
            Logger::debug_with_component("currency", &format!("display currency -> {}", next));
            currency.set(next);
        })
    };

    let context = CurrencyContext {
        currency: *currency,
        toggle,
    };

    html! {
        <ContextProvider<CurrencyContext> context={context}>
            { props.children.clone() }
        </ContextProvider<CurrencyContext>>
    }
}

#[hook]
pub fn use_currency() -> CurrencyContext {
    use_context::<CurrencyContext>().unwrap_or_else(|| CurrencyContext {
        currency: storage::preferred_currency(),
        toggle: Callback::noop(),
    })
}
