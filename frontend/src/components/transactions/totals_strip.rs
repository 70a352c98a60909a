use shared::currency::format_signed_total;
use shared::filters::{count_label, FilteredTotals};
use shared::Currency;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct TotalsStripProps {
    pub totals: FilteredTotals,
}

/// Income, expenses and net of the rows currently shown, summed as recorded
#[function_component(TotalsStrip)]
pub fn totals_strip(props: &TotalsStripProps) -> Html {
    let totals = props.totals;
    let net = totals.net();

    html! {
        <div class="totals-strip">
            <span class="totals-count">{count_label(totals.count)}</span>
            <span class="totals-income">{format_signed_total(totals.income, Currency::Usd)}</span>
            <span class="totals-expenses">{format_signed_total(-totals.expenses, Currency::Usd)}</span>
            <span class={classes!("totals-net", (net < 0.0).then_some("negative"))}>
                {format!("Net: {}", format_signed_total(net, Currency::Usd))}
            </span>
        </div>
    }
}
