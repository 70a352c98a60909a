use yew::prelude::*;
use yew_router::prelude::*;

mod components;
mod hooks;
mod pages;
mod services;

use components::header::Header;
use components::require_auth::RequireAuth;
use hooks::use_auth::AuthProvider;
use hooks::use_currency::CurrencyProvider;
use hooks::use_toasts::ToastProvider;
use pages::{BudgetsPage, DashboardPage, LoginPage, TransactionsPage};
use services::api::ApiClient;

#[derive(Clone, Routable, PartialEq, Debug)]
pub enum Route {
    #[at("/")]
    Dashboard,
    #[at("/transactions")]
    Transactions,
    #[at("/budgets")]
    Budgets,
    #[at("/login")]
    Login,
    #[not_found]
    #[at("/404")]
    NotFound,
}

fn switch(route: Route) -> Html {
    let api_client = ApiClient::new();
    match route {
        Route::Login => html! { <LoginPage api_client={api_client} /> },
        Route::NotFound => html! { <Redirect<Route> to={Route::Dashboard} /> },
        protected => html! {
            <RequireAuth>
                <Header />
                <main class="container">
                    {match protected {
                        Route::Transactions => html! { <TransactionsPage api_client={api_client} /> },
                        Route::Budgets => html! { <BudgetsPage api_client={api_client} /> },
                        _ => html! { <DashboardPage api_client={api_client} /> },
                    }}
                </main>
            </RequireAuth>
        },
    }
}

#[function_component(App)]
fn app() -> Html {
    html! {
        <AuthProvider api_client={ApiClient::new()}>
            <CurrencyProvider>
                <ToastProvider>
                    <BrowserRouter>
                        <div class="app">
                            <Switch<Route> render={switch} />
                        </div>
                    </BrowserRouter>
                </ToastProvider>
            </CurrencyProvider>
        </AuthProvider>
    }
}

fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("starting budget tracker frontend");
    yew::Renderer::<App>::new().render();
}
