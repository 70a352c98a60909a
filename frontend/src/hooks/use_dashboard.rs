use shared::api::FinanceApi;
use shared::filters::Period;
use shared::notify::Notification;
use shared::pages::dashboard::{load_groups, DashboardAction, DashboardGroup, DashboardState};
use shared::sync::{run_sync, SyncLock, SyncWindow};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use super::page_store::use_page_store;
use super::use_cancel_token::use_cancel_token;
use super::use_toasts::use_toasts;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;

pub struct UseDashboardResult {
    pub state: DashboardState,
    pub actions: UseDashboardActions,
}

#[derive(Clone)]
pub struct UseDashboardActions {
    pub set_period: Callback<Period>,
    pub refresh_rate: Callback<()>,
    pub sync: Callback<SyncWindow>,
    pub dismiss_sync: Callback<()>,
}

#[hook]
pub fn use_dashboard(api_client: &ApiClient) -> UseDashboardResult {
    let store = use_page_store::<DashboardState>();
    let token = use_cancel_token();
    let push_toast = use_toasts();

    // Period-dependent groups: on mount, on every period change and once per finished sync
    {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        let token = token.clone();
        use_effect_with(store.state.key(), move |key| {
            let key = *key;
            Logger::debug_with_component(
                "dashboard",
                &format!("loading {} (generation {})", key.period.title(), key.generation),
            );
            spawn_local(async move {
                load_groups(&api_client, &DashboardGroup::PERIODIC, key, &token, |action| {
                    dispatcher.dispatch(action)
                })
                .await;
            });
            || ()
        });
    }

    // The exchange rate does not depend on the period
    {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        let token = token.clone();
        let key = store.state.key();
        use_effect_with((), move |_| {
            spawn_local(async move {
                load_groups(&api_client, &[DashboardGroup::Rate], key, &token, |action| {
                    dispatcher.dispatch(action)
                })
                .await;
            });
            || ()
        });
    }

    let set_period = {
        let dispatcher = store.dispatcher();
        use_callback((), move |period: Period, _| dispatcher.dispatch(DashboardAction::SetPeriod(period)))
    };

    let refresh_rate = {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        let token = token.clone();
        use_callback((), move |_: (), _| {
            dispatcher.dispatch(DashboardAction::RefreshRate);
            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let token = token.clone();
            spawn_local(async move {
                let result = api_client.exchange_rate().await;
                if !token.is_cancelled() {
                    dispatcher.dispatch(DashboardAction::RateLoaded { manual: true, result });
                }
            });
        })
    };

    let sync = {
        let api_client = api_client.clone();
        let dispatcher = store.dispatcher();
        let token = token.clone();
        let lock = (*use_memo((), |_| SyncLock::default())).clone();
        use_callback((), move |window: SyncWindow, _| {
            if !lock.try_acquire() {
                Logger::debug_with_component("dashboard", "sync already running");
                return;
            }
            Logger::info_with_component("dashboard", &format!("syncing {} of email", window.label()));
            push_toast.emit(Notification::info(window.progress_message()));
            dispatcher.dispatch(DashboardAction::SyncStarted);

            let api_client = api_client.clone();
            let dispatcher = dispatcher.clone();
            let token = token.clone();
            let lock = lock.clone();
            spawn_local(async move {
                let result = run_sync(&api_client, window).await;
                lock.release();
                if !token.is_cancelled() {
                    dispatcher.dispatch(DashboardAction::SyncFinished(window, result));
                }
            });
        })
    };

    let dismiss_sync = {
        let dispatcher = store.dispatcher();
        use_callback((), move |_: (), _| dispatcher.dispatch(DashboardAction::DismissSyncBanner))
    };

    UseDashboardResult {
        state: store.state.clone(),
        actions: UseDashboardActions {
            set_period,
            refresh_rate,
            sync,
            dismiss_sync,
        },
    }
}
