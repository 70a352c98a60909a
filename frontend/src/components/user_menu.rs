use shared::User;
use web_sys::MouseEvent;
use yew::prelude::*;

#[derive(Properties, PartialEq)]
pub struct UserMenuProps {
    pub user: User,
    pub on_logout: Callback<()>,
}

#[function_component(UserMenu)]
pub fn user_menu(props: &UserMenuProps) -> Html {
    let is_open = use_state(|| false);

    let toggle_menu = {
        let is_open = is_open.clone();
        Callback::from(move |_: MouseEvent| is_open.set(!*is_open))
    };

    // Close menu when clicking outside
    let on_backdrop_click = {
        let is_open = is_open.clone();
        Callback::from(move |e: MouseEvent| {
            e.stop_propagation();
            is_open.set(false);
        })
    };

    let on_menu_click = Callback::from(|e: MouseEvent| e.stop_propagation());

    let on_logout_click = {
        let is_open = is_open.clone();
        let on_logout = props.on_logout.clone();
        Callback::from(move |_: MouseEvent| {
            is_open.set(false);
            on_logout.emit(());
        })
    };

    let avatar = match props.user.picture_url() {
        Some(url) => html! { <img class="user-avatar" src={url.to_string()} alt="" referrerpolicy="no-referrer" /> },
        None => html! { <span class="user-avatar user-avatar-initial">{props.user.initial()}</span> },
    };

    html! {
        <div class="user-menu">
            <button class="user-menu-button" onclick={toggle_menu} aria-label="Account menu">
                {avatar}
            </button>

            if *is_open {
                <>
                    <div class="user-menu-backdrop" onclick={on_backdrop_click}></div>
                    <div class="user-menu-dropdown" onclick={on_menu_click}>
                        <div class="user-menu-identity">
                            <span class="user-menu-name">{props.user.display_name()}</span>
                            <span class="user-menu-email">{&props.user.email}</span>
                        </div>
                        <div class="user-menu-item" onclick={on_logout_click}>
                            <svg width="16" height="16" viewBox="0 0 24 24" fill="none" xmlns="http://www.w3.org/2000/svg">
                                <path d="M10 17l1.4-1.4-2.6-2.6H20v-2H8.8l2.6-2.6L10 7l-5 5 5 5zM4 5h8V3H4c-1.1 0-2 .9-2 2v14c0 1.1.9 2 2 2h8v-2H4V5z" fill="currentColor"/>
                            </svg>
                            <span>{"Sign out"}</span>
                        </div>
                    </div>
                </>
            }
        </div>
    }
}
