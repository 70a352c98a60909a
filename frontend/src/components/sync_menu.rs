use shared::sync::{SyncSummary, SyncWindow};
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct SyncMenuProps {
    pub syncing: bool,
    pub on_sync: Callback<SyncWindow>,
}

/// "Sync email" button with the lookback window dropdown
#[function_component(SyncMenu)]
pub fn sync_menu(props: &SyncMenuProps) -> Html {
    let is_open = use_state(|| false);

    let toggle_menu = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| is_open.set(!*is_open))
    };

    let on_backdrop_click = {
        let is_open = is_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            is_open.set(false);
        })
    };

    let on_menu_click = Callback::from(|e: MouseEvent| e.stop_propagation());

    html! {
        <div class="sync-menu">
            <button class="btn btn-primary sync-button" onclick={toggle_menu} disabled={props.syncing}>
                {if props.syncing { "Syncing..." } else { "📧 Sync email" }}
            </button>

            if *is_open && !props.syncing {
                <>
                    <div class="sync-backdrop" onclick={on_backdrop_click}></div>
                    <div class="sync-dropdown" onclick={on_menu_click}>
                        {for SyncWindow::ALL.iter().map(|window| {
                            let window = *window;
                            let onclick = {
                                let is_open = is_open.clone();
                                let on_sync = props.on_sync.clone();
                                Callback::from(move |_: MouseEvent| {
                                    is_open.set(false);
                                    on_sync.emit(window);
                                })
                            };
                            html! {
                                <div class="sync-item" {onclick}>
                                    <span>{window.menu_label()}</span>
                                    <span class={classes!("sync-cost", window.is_quick().then_some("quick"))}>
                                        {window.cost_hint()}
                                    </span>
                                </div>
                            }
                        })}
                    </div>
                </>
            }
        </div>
    }
}

#[derive(Properties, PartialEq)]
pub struct SyncBannerProps {
    pub summary: Option<SyncSummary>,
    pub on_dismiss: Callback<()>,
}

#[function_component(SyncBanner)]
pub fn sync_banner(props: &SyncBannerProps) -> Html {
    let Some(summary) = props.summary else {
        return html! {};
    };
    let on_dismiss = props.on_dismiss.clone();

    html! {
        <div class="sync-banner">
            <span>{summary.banner()}</span>
            <button class="sync-banner-close" onclick={Callback::from(move |_: MouseEvent| on_dismiss.emit(()))}>
                {"×"}
            </button>
        </div>
    }
}
