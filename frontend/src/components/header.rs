use yew::prelude::*;
use yew_router::prelude::*;

use super::currency_toggle::CurrencyToggle;
use super::user_menu::UserMenu;
use crate::hooks::use_auth::use_auth;
use crate::Route;

#[function_component(Header)]
pub fn header() -> Html {
    let auth = use_auth();
    let current = use_route::<Route>();

    let nav_link = |route: Route, label: &'static str| {
        let active = current.as_ref() == Some(&route);
        html! {
            <Link<Route> to={route} classes={classes!("nav-link", active.then_some("active"))}>
                {label}
            </Link<Route>>
        }
    };

    html! {
        <header class="header">
            <div class="container">
                <h1 class="brand">{"💸 Budget Tracker"}</h1>
                <nav class="nav-links">
                    {nav_link(Route::Dashboard, "Dashboard")}
                    {nav_link(Route::Transactions, "Transactions")}
                    {nav_link(Route::Budgets, "Budgets")}
                </nav>
                <div class="header-right">
                    <CurrencyToggle />
                    {match auth.session.user() {
                        Some(user) => html! { <UserMenu user={user.clone()} on_logout={auth.logout.clone()} /> },
                        None => html! {},
                    }}
                </div>
            </div>
        </header>
    }
}
