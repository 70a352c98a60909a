use shared::currency::{format_pen, group_thousands, ExchangeRate};
use shared::{savings_label, Currency, Summary};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SummaryCardsProps {
    pub summary: Option<Summary>,
    pub rate: ExchangeRate,
    pub currency: Currency,
    pub loading: bool,
}

/// Income, expenses, net and savings rate for the month, in the display currency
#[function_component(SummaryCards)]
pub fn summary_cards(props: &SummaryCardsProps) -> Html {
    let Some(summary) = props.summary.as_ref() else {
        return html! {
            <div class="summary-cards">
                <div class="summary-card summary-card-empty">
                    {if props.loading { "Loading summary..." } else { "No data for this month" }}
                </div>
            </div>
        };
    };

    let totals = &summary.total_usd;
    let format = |usd: f64| props.rate.format_summary(usd, props.currency);
    let savings = summary.savings_rate();

    html! {
        <div class={classes!("summary-cards", props.loading.then_some("refreshing"))}>
            <div class="summary-card income">
                <span class="summary-label">{"Income"}</span>
                <span class="summary-value">{format(totals.income)}</span>
            </div>
            <div class="summary-card expenses">
                <span class="summary-label">{"Expenses"}</span>
                <span class="summary-value">{format(totals.expenses.abs())}</span>
            </div>
            <div class={classes!("summary-card", "net", (totals.net < 0.0).then_some("negative"))}>
                <span class="summary-label">{"Net"}</span>
                <span class="summary-value">
                    {if totals.net < 0.0 { "-" } else { "" }}{format(totals.net.abs())}
                </span>
            </div>
            <div class="summary-card savings">
                <span class="summary-label">{"Savings rate"}</span>
                <span class="summary-value">{format!("{:.0}%", savings)}</span>
                <span class="summary-hint">{savings_label(savings)}</span>
            </div>
            <div class="summary-card count">
                <span class="summary-label">{"Transactions"}</span>
                <span class="summary-value">{summary.transaction_count}</span>
            </div>
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct CurrencyBreakdownProps {
    pub summary: Option<Summary>,
}

/// Per-currency totals in their native units, before conversion
#[function_component(CurrencyBreakdown)]
pub fn currency_breakdown(props: &CurrencyBreakdownProps) -> Html {
    let Some(summary) = props.summary.as_ref() else {
        return html! {};
    };

    let row = |label: &'static str, value: String| {
        html! {
            <div class="breakdown-row">
                <span>{label}</span>
                <span>{value}</span>
            </div>
        }
    };
    let usd = |value: f64| format!("${}", group_thousands(value, 2));

    html! {
        <div class="currency-breakdown">
            <div class="breakdown-card">
                <h4>{format!("{} {}", Currency::Pen.symbol(), Currency::Pen.name())}</h4>
                {row("Income", format_pen(summary.pen.income))}
                {row("Expenses", format_pen(summary.pen.expenses.abs()))}
            </div>
            <div class="breakdown-card">
                <h4>{format!("{} {}", Currency::Usd.symbol(), Currency::Usd.name())}</h4>
                {row("Income", usd(summary.usd.income))}
                {row("Expenses", usd(summary.usd.expenses.abs()))}
            </div>
        </div>
    }
}
