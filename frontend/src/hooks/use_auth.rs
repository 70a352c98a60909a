use shared::session::{fetch_session, logout, SessionState};
use wasm_bindgen_futures::spawn_local;
use yew::prelude::*;

use crate::services::api::ApiClient;
use crate::services::logging::Logger;
use crate::services::storage;

#[derive(Clone, PartialEq)]
pub struct AuthContext {
    pub session: SessionState,
    pub logout: Callback<()>,
    /// Probe `/auth/me` again without reloading the page
    pub refetch: Callback<()>,
}

#[derive(Properties, PartialEq)]
pub struct AuthProviderProps {
    pub api_client: ApiClient,
    #[prop_or_default]
    pub children: Html,
}

#[function_component(AuthProvider)]
pub fn auth_provider(props: &AuthProviderProps) -> Html {
    let session = use_state(|| SessionState::Loading);

    let refetch = {
        let api_client = props.api_client.clone();
        let session = session.clone();
        use_callback((), move |_: (), _| {
            let api_client = api_client.clone();
            let session = session.clone();
            spawn_local(async move {
                session.set(fetch_session(&api_client).await);
            });
        })
    };

    // One probe per app load
    {
        let refetch = refetch.clone();
        use_effect_with((), move |_| {
            match storage::take_token_from_url() {
                Ok(true) => Logger::info_with_component("auth", "stored token from login redirect"),
                Ok(false) => {}
                Err(e) => Logger::warn_with_component("auth", &format!("could not read login token: {}", e)),
            }
            refetch.emit(());
            || ()
        });
    }

    let on_logout = {
        let api_client = props.api_client.clone();
        let session = session.clone();
        use_callback((), move |_: (), _| {
            storage::clear_session_token();
            let api_client = api_client.clone();
            let session = session.clone();
            spawn_local(async move {
                session.set(logout(&api_client).await);
                Logger::info_with_component("auth", "signed out");
            });
        })
    };

    let context = AuthContext {
        session: (*session).clone(),
        logout: on_logout,
        refetch,
    };

    html! {
        <ContextProvider<AuthContext> context={context}>
            { props.children.clone() }
        </ContextProvider<AuthContext>>
    }
}

#[hook]
pub fn use_auth() -> AuthContext {
    use_context::<AuthContext>().unwrap_or_else(|| {
        Logger::error_with_component("auth", "use_auth called outside AuthProvider");
        AuthContext {
            session: SessionState::Unauthenticated,
            logout: Callback::noop(),
            refetch: Callback::noop(),
        }
    })
}
