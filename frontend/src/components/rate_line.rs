use shared::currency::{describe_rate_age, ExchangeRate};
use shared::ExchangeRateInfo;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct RateLineProps {
    pub rate: ExchangeRate,
    #[prop_or_default]
    pub info: Option<ExchangeRateInfo>,
    #[prop_or_default]
    pub loading: bool,
    /// Shown as a refresh button when set
    #[prop_or_default]
    pub on_refresh: Option<Callback<()>>,
}

#[function_component(RateLine)]
pub fn rate_line(props: &RateLineProps) -> Html {
    let age = props.info.as_ref().and_then(|info| describe_rate_age(info.age_hours));

    html! {
        <div class="rate-line">
            <span class="rate-value">{props.rate.describe()}</span>
            if let Some(age) = age {
                <span class="rate-age">{format!(" · {}", age)}</span>
            }
            if let Some(on_refresh) = props.on_refresh.clone() {
                <button
                    class="rate-refresh"
                    onclick={Callback::from(move |_: MouseEvent| on_refresh.emit(()))}
                    disabled={props.loading}
                    title="Refresh exchange rate"
                >
                    {if props.loading { "…" } else { "↻" }}
                </button>
            }
        </div>
    }
}
