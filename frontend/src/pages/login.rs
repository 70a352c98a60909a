use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::use_auth::use_auth;
use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::storage;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct LoginPageProps {
    pub api_client: ApiClient,
}

#[function_component(LoginPage)]
pub fn login_page(props: &LoginPageProps) -> Html {
    let auth = use_auth();

    if auth.session.is_authenticated() {
        return html! { <Redirect<Route> to={Route::Dashboard} /> };
    }

    let on_login = {
        let login_url = props.api_client.login_url();
        Callback::from(move |_: MouseEvent| {
            Logger::info_with_component("login", "starting OAuth sign-in");
            storage::navigate_to(&login_url);
        })
    };

    html! {
        <div class="login-page">
            <div class="login-card">
                <h1 class="brand">{"💸 Budget Tracker"}</h1>
                <p class="login-tagline">{"Track spending across soles and dollars, straight from your bank emails."}</p>
                <button class="btn btn-primary login-button" onclick={on_login} disabled={auth.session.is_loading()}>
                    {"Sign in with Google"}
                </button>
            </div>
        </div>
    }
}
