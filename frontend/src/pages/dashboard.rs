use shared::pages::dashboard::RECENT_LIMIT;
use yew::prelude::*;
use yew_router::prelude::*;

use crate::components::budget_alerts::BudgetAlerts;
use crate::components::charts::{CategoryChart, TrendChart};
use crate::components::period_picker::PeriodPicker;
use crate::components::rate_line::RateLine;
use crate::components::summary_cards::{CurrencyBreakdown, SummaryCards};
use crate::components::sync_menu::{SyncBanner, SyncMenu};
use crate::components::transactions::TransactionTable;
use crate::hooks::use_auth::use_auth;
use crate::hooks::use_currency::use_currency;
use crate::hooks::use_dashboard::use_dashboard;
use crate::services::api::ApiClient;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct DashboardPageProps {
    pub api_client: ApiClient,
}

#[function_component(DashboardPage)]
pub fn dashboard_page(props: &DashboardPageProps) -> Html {
    let dashboard = use_dashboard(&props.api_client);
    let currency = use_currency().currency;
    let auth = use_auth();

    let state = &dashboard.state;
    let actions = &dashboard.actions;
    let rate = state.exchange_rate();
    let summary = state.summary.data.summary.clone();
    let alerts: Vec<_> = state.alerts().into_iter().cloned().collect();

    let greeting = match auth.session.user() {
        Some(user) => format!("Hi, {}", user.display_name()),
        None => "Dashboard".to_string(),
    };

    html! {
        <div class="page dashboard-page">
            <div class="page-header">
                <div>
                    <h1>{greeting}</h1>
                    <RateLine
                        rate={rate}
                        info={state.rate.data.clone()}
                        loading={state.rate.loading}
                        on_refresh={Some(actions.refresh_rate.clone())}
                    />
                </div>
                <div class="page-header-controls">
                    <PeriodPicker period={state.period} on_change={actions.set_period.clone()} />
                    <SyncMenu syncing={state.syncing} on_sync={actions.sync.clone()} />
                </div>
            </div>

            <SyncBanner summary={state.last_sync} on_dismiss={actions.dismiss_sync.clone()} />

            <SummaryCards
                summary={summary.clone()}
                rate={rate}
                currency={currency}
                loading={state.summary.loading}
            />

            <BudgetAlerts alerts={alerts} rate={rate} currency={currency} />

            <div class="chart-grid">
                <CategoryChart
                    bars={state.category_bars()}
                    rate={rate}
                    currency={currency}
                    loading={state.charts.loading}
                />
                <TrendChart
                    points={state.charts.data.trend.clone()}
                    rate={rate}
                    currency={currency}
                    year={state.period.year}
                    loading={state.charts.loading}
                />
            </div>

            <CurrencyBreakdown summary={summary} />

            <section class="transactions-section">
                <div class="section-header">
                    <h2>{"Recent Transactions"}</h2>
                    <Link<Route> to={Route::Transactions} classes={classes!("section-link")}>{"View all →"}</Link<Route>>
                </div>
                <TransactionTable
                    transactions={state.summary.data.recent.iter().take(RECENT_LIMIT).cloned().collect::<Vec<_>>()}
                    rate={rate}
                    currency={currency}
                    loading={state.summary.loading}
                    empty_message="No transactions this month"
                />
            </section>
        </div>
    }
}
