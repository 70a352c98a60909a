use shared::currency::ExchangeRate;
use shared::{BudgetStatus, Currency};
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct BudgetAlertsProps {
    pub alerts: Vec<BudgetStatus>,
    pub rate: ExchangeRate,
    pub currency: Currency,
}

/// Budgets at or past the alert threshold; renders nothing when there are none
#[function_component(BudgetAlerts)]
pub fn budget_alerts(props: &BudgetAlertsProps) -> Html {
    if props.alerts.is_empty() {
        return html! {};
    }

    html! {
        <div class="budget-alerts">
            <h3>{"Budget Alerts"}</h3>
            {for props.alerts.iter().map(|status| {
                let level = status.level();
                html! {
                    <div class={classes!("budget-alert", level.css_class())} key={status.category.as_str()}>
                        <span class="budget-alert-category">{status.category.badge()}</span>
                        <span class="budget-alert-figures">
                            {format!(
                                "{} of {}",
                                props.rate.format_compact(status.spent, props.currency),
                                props.rate.format_compact(status.limit, props.currency),
                            )}
                        </span>
                        <span class="budget-alert-percentage">{format!("{:.0}%", status.percentage)}</span>
                    </div>
                }
            })}
        </div>
    }
}
