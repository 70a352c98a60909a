//! Browser local storage and location helpers.

use anyhow::{anyhow, Context, Result};
use gloo::storage::{LocalStorage, Storage};
use shared::api::SESSION_TOKEN_KEY;
use shared::currency::PREFERRED_CURRENCY_KEY;
use shared::Currency;
use wasm_bindgen::JsValue;

use super::logging::Logger;

/// Values are stored raw (no JSON quoting) so they stay readable by the
/// backend's redirect page and older builds
fn read(key: &str) -> Option<String> {
    LocalStorage::raw().get_item(key).ok().flatten().filter(|value| !value.is_empty())
}

fn write(key: &str, value: &str) -> Result<()> {
    LocalStorage::raw()
        .set_item(key, value)
        .map_err(|e| anyhow!("failed to store {}: {:?}", key, e))
}

pub fn session_token() -> Option<String> {
    read(SESSION_TOKEN_KEY)
}

pub fn store_session_token(token: &str) -> Result<()> {
    write(SESSION_TOKEN_KEY, token)
}

pub fn clear_session_token() {
    LocalStorage::delete(SESSION_TOKEN_KEY);
}

pub fn preferred_currency() -> Currency {
    Currency::from_preference(read(PREFERRED_CURRENCY_KEY).as_deref())
}

pub fn store_preferred_currency(currency: Currency) {
    if let Err(e) = write(PREFERRED_CURRENCY_KEY, currency.code()) {
        Logger::warn_with_component("storage", &format!("could not persist currency: {}", e));
    }
}

fn window() -> Result<web_sys::Window> {
    web_sys::window().context("no window")
}

fn js_error(e: JsValue) -> anyhow::Error {
    anyhow!("{:?}", e)
}

pub fn current_path() -> String {
    window()
        .and_then(|w| w.location().pathname().map_err(js_error))
        .unwrap_or_default()
}

/// Full page navigation, dropping all in-memory state
pub fn navigate_to(url: &str) {
    if let Err(e) = window().and_then(|w| w.location().set_href(url).map_err(js_error)) {
        Logger::error_with_component("storage", &format!("navigation to {} failed: {}", url, e));
    }
}

/// Native confirmation dialog; a missing window counts as "no"
pub fn confirm(message: &str) -> bool {
    window()
        .and_then(|w| w.confirm_with_message(message).map_err(js_error))
        .unwrap_or(false)
}

/// After the OAuth redirect the backend may hand us a bearer token as
/// `?token=`. Persist it and remove it from the address bar.
pub fn take_token_from_url() -> Result<bool> {
    let window = window()?;
    let href = window.location().href().map_err(js_error)?;
    let url = web_sys::Url::new(&href).map_err(js_error)?;
    let params = url.search_params();
    let Some(token) = params.get("token") else {
        return Ok(false);
    };

    store_session_token(&token)?;
    params.delete("token");
    url.set_search(&String::from(params.to_string()));
    window
        .history()
        .map_err(js_error)?
        .replace_state_with_url(&JsValue::NULL, "", Some(&url.href()))
        .map_err(js_error)?;
    Ok(true)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    fn visit(url: &str) {
        let history = web_sys::window().unwrap().history().unwrap();
        history.replace_state_with_url(&JsValue::NULL, "", Some(url)).unwrap();
    }

    #[wasm_bindgen_test]
    fn test_token_handoff_is_stored_and_stripped() {
        clear_session_token();
        visit("/dashboard?token=abc123&tab=recent");

        assert!(take_token_from_url().unwrap());
        assert_eq!(session_token().as_deref(), Some("abc123"));

        let location = web_sys::window().unwrap().location();
        assert_eq!(location.pathname().unwrap(), "/dashboard");
        assert_eq!(location.search().unwrap(), "?tab=recent");

        clear_session_token();
    }

    #[wasm_bindgen_test]
    fn test_cookie_only_session_leaves_storage_empty() {
        clear_session_token();
        visit("/transactions");

        assert!(!take_token_from_url().unwrap());
        assert_eq!(session_token(), None);
    }
}
