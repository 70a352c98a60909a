use yew::prelude::*;
use yew_router::prelude::*;

use crate::hooks::use_auth::use_auth;
use crate::Route;

#[derive(Properties, PartialEq)]
pub struct RequireAuthProps {
    #[prop_or_default]
    pub children: Html,
}

/// Renders its children only for a signed-in user
#[function_component(RequireAuth)]
pub fn require_auth(props: &RequireAuthProps) -> Html {
    let auth = use_auth();

    if auth.session.is_loading() {
        return html! {
            <div class="auth-loading">
                <div class="loading-spinner"></div>
            </div>
        };
    }

    if !auth.session.is_authenticated() {
        return html! { <Redirect<Route> to={Route::Login} /> };
    }

    props.children.clone()
}
