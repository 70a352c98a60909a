use futures::stream::{FuturesUnordered, StreamExt};

use super::Group;
use crate::api::FinanceApi;
use crate::cancel::CancelToken;
use crate::category::CategoryFilter;
use crate::currency::ExchangeRate;
use crate::filters::{Period, TransactionQuery};
use crate::notify::Notification;
use crate::sync::{sync_notification, SyncSummary, SyncWindow};
use crate::{
    ApiError, BudgetStatus, Category, CategoryTotal, ExchangeRateInfo, MonthlyTrendPoint, Summary, SyncResponse,
    Transaction,
};

/// How many of the period's transactions the dashboard lists
pub const RECENT_LIMIT: usize = 5;

/// Bars shown in the spending-by-category chart
pub const CATEGORY_BAR_LIMIT: usize = 8;

/// Budgets at or above this share of their limit are listed as alerts
pub const ALERT_THRESHOLD: f64 = 75.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DashboardGroup {
    Summary,
    Charts,
    Budgets,
    Rate,
}

impl DashboardGroup {
    /// Everything a page load fetches
    pub const ALL: [DashboardGroup; 4] = [
        DashboardGroup::Summary,
        DashboardGroup::Charts,
        DashboardGroup::Budgets,
        DashboardGroup::Rate,
    ];

    /// Groups that depend on the selected period; also what a sync refreshes
    pub const PERIODIC: [DashboardGroup; 3] = [DashboardGroup::Summary, DashboardGroup::Charts, DashboardGroup::Budgets];
}

/// Identifies the request a result belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadKey {
    pub period: Period,
    /// Bumped after every sync so the same period is fetched again
    pub generation: u64,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct SummaryData {
    pub summary: Option<Summary>,
    pub recent: Vec<Transaction>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct ChartData {
    pub by_category: Vec<CategoryTotal>,
    pub trend: Vec<MonthlyTrendPoint>,
}

/// One row of the category bar chart
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBar {
    pub category: Category,
    pub total: f64,
    /// Percentage of the widest bar, never below 2
    pub width: f64,
}

/// Largest categories first, at most eight of them
pub fn category_bars(totals: &[CategoryTotal]) -> Vec<CategoryBar> {
    let mut sorted: Vec<&CategoryTotal> = totals.iter().collect();
    sorted.sort_by(|a, b| b.total.partial_cmp(&a.total).unwrap_or(std::cmp::Ordering::Equal));
    sorted.truncate(CATEGORY_BAR_LIMIT);

    let max = sorted.first().map(|t| t.total).unwrap_or(0.0);
    sorted
        .into_iter()
        .map(|t| CategoryBar {
            category: t.category,
            total: t.total,
            width: if max > 0.0 { (t.total / max * 100.0).max(2.0) } else { 2.0 },
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq)]
pub enum DashboardAction {
    SetPeriod(Period),
    SummaryLoaded(LoadKey, Result<SummaryData, ApiError>),
    ChartsLoaded(LoadKey, Result<ChartData, ApiError>),
    BudgetsLoaded(LoadKey, Result<Vec<BudgetStatus>, ApiError>),
    /// `manual` is set when the user pressed the refresh button
    RateLoaded {
        manual: bool,
        result: Result<ExchangeRateInfo, ApiError>,
    },
    RefreshRate,
    SyncStarted,
    SyncFinished(SyncWindow, Result<SyncResponse, ApiError>),
    DismissSyncBanner,
}

#[derive(Debug, Clone, PartialEq)]
pub struct DashboardState {
    pub period: Period,
    pub generation: u64,
    pub summary: Group<SummaryData>,
    pub charts: Group<ChartData>,
    pub budgets: Group<Vec<BudgetStatus>>,
    pub rate: Group<Option<ExchangeRateInfo>>,
    pub syncing: bool,
    pub last_sync: Option<SyncSummary>,
}

impl Default for DashboardState {
    fn default() -> Self {
        Self::new(Period::current())
    }
}

impl DashboardState {
    pub fn new(period: Period) -> Self {
        Self {
            period,
            generation: 0,
            summary: Group::default(),
            charts: Group::default(),
            budgets: Group::default(),
            rate: Group::default(),
            syncing: false,
            last_sync: None,
        }
    }

    pub fn key(&self) -> LoadKey {
        LoadKey {
            period: self.period,
            generation: self.generation,
        }
    }

    fn is_current(&self, key: &LoadKey) -> bool {
        *key == self.key()
    }

    pub fn apply(&mut self, action: DashboardAction) {
        match action {
            DashboardAction::SetPeriod(period) => {
                if period != self.period {
                    log::debug!("dashboard period -> {}", period.title());
                    self.period = period;
                    self.begin_periodic();
                }
            }
            DashboardAction::SummaryLoaded(key, result) => {
                if self.is_current(&key) {
                    self.summary.settle(result);
                }
            }
            DashboardAction::ChartsLoaded(key, result) => {
                if self.is_current(&key) {
                    self.charts.settle(result);
                }
            }
            DashboardAction::BudgetsLoaded(key, result) => {
                if self.is_current(&key) {
                    self.budgets.settle(result);
                }
            }
            DashboardAction::RateLoaded { result, .. } => {
                self.rate.settle(result.map(Some));
            }
            DashboardAction::RefreshRate => self.rate.begin(),
            DashboardAction::SyncStarted => {
                self.syncing = true;
                self.last_sync = None;
            }
            DashboardAction::SyncFinished(window, result) => {
                self.syncing = false;
                if let Ok(response) = &result {
                    self.last_sync = Some(SyncSummary::new(response, window));
                }
                // One new generation means exactly one more fetch of each periodic group
                self.generation += 1;
                self.begin_periodic();
            }
            DashboardAction::DismissSyncBanner => self.last_sync = None,
        }
    }

    fn begin_periodic(&mut self) {
        self.summary.begin();
        self.charts.begin();
        self.budgets.begin();
    }

    /// Toast to raise for an action, judged against the state before it is applied
    pub fn notification(&self, action: &DashboardAction) -> Option<Notification> {
        let failed = |key: &LoadKey, result_is_err: bool, message: &str| {
            (result_is_err && self.is_current(key)).then(|| Notification::error(message))
        };
        match action {
            DashboardAction::SummaryLoaded(key, result) => failed(key, is_failure(result), "Failed to load summary"),
            DashboardAction::ChartsLoaded(key, result) => failed(key, is_failure(result), "Failed to load charts"),
            DashboardAction::BudgetsLoaded(key, result) => failed(key, is_failure(result), "Failed to load budgets"),
            DashboardAction::RateLoaded { manual: true, result } => Some(match result {
                Ok(_) => Notification::success("Exchange rate refreshed"),
                Err(_) => Notification::error("Could not refresh exchange rate"),
            }),
            DashboardAction::SyncFinished(_, result) => Some(sync_notification(result)),
            _ => None,
        }
    }

    pub fn exchange_rate(&self) -> ExchangeRate {
        ExchangeRate::resolve(
            self.rate.data.as_ref(),
            self.summary.data.summary.as_ref().and_then(|s| s.exchange_rate),
        )
    }

    pub fn category_bars(&self) -> Vec<CategoryBar> {
        category_bars(&self.charts.data.by_category)
    }

    /// Budgets close to or over their limit; empty until budget status has loaded
    pub fn alerts(&self) -> Vec<&BudgetStatus> {
        if !self.budgets.is_ready() {
            return Vec::new();
        }
        self.budgets
            .data
            .iter()
            .filter(|status| status.percentage >= ALERT_THRESHOLD)
            .collect()
    }
}

fn is_failure<T>(result: &Result<T, ApiError>) -> bool {
    matches!(result, Err(e) if !e.is_cancelled())
}

pub async fn load_summary<A: FinanceApi + ?Sized>(api: &A, period: Period) -> Result<SummaryData, ApiError> {
    let query = TransactionQuery {
        period,
        category: CategoryFilter::All,
    };
    let (summary, transactions) = futures::try_join!(api.summary(period), api.list_transactions(&query))?;
    Ok(SummaryData {
        summary: Some(summary),
        recent: transactions.into_iter().take(RECENT_LIMIT).collect(),
    })
}

pub async fn load_charts<A: FinanceApi + ?Sized>(api: &A, period: Period) -> Result<ChartData, ApiError> {
    let (by_category, trend) = futures::try_join!(api.by_category(period), api.monthly_trend(period.year))?;
    Ok(ChartData { by_category, trend })
}

pub async fn load_group<A: FinanceApi + ?Sized>(api: &A, group: DashboardGroup, key: LoadKey) -> DashboardAction {
    match group {
        DashboardGroup::Summary => DashboardAction::SummaryLoaded(key, load_summary(api, key.period).await),
        DashboardGroup::Charts => DashboardAction::ChartsLoaded(key, load_charts(api, key.period).await),
        DashboardGroup::Budgets => DashboardAction::BudgetsLoaded(key, api.budget_status(key.period).await),
        DashboardGroup::Rate => DashboardAction::RateLoaded {
            manual: false,
            result: api.exchange_rate().await,
        },
    }
}

/// Load `groups` concurrently, dispatching each as it lands. Stops as soon as
/// the page's token is cancelled.
pub async fn load_groups<A, F>(api: &A, groups: &[DashboardGroup], key: LoadKey, token: &CancelToken, dispatch: F)
where
    A: FinanceApi + ?Sized,
    F: Fn(DashboardAction),
{
    let mut pending: FuturesUnordered<_> = groups.iter().map(|group| load_group(api, *group, key)).collect();
    while let Some(action) = pending.next().await {
        if token.is_cancelled() {
            log::debug!("dashboard unmounted, dropping remaining loads");
            return;
        }
        dispatch(action);
    }
}
