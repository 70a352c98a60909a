//! Authentication state shared by the whole app.

use serde_json::Value;

use crate::api::FinanceApi;
use crate::User;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum SessionState {
    /// `/auth/me` has not answered yet
    #[default]
    Loading,
    Authenticated(User),
    Unauthenticated,
}

impl SessionState {
    pub fn user(&self) -> Option<&User> {
        match self {
            SessionState::Authenticated(user) => Some(user),
            _ => None,
        }
    }

    pub fn is_loading(&self) -> bool {
        matches!(self, SessionState::Loading)
    }

    pub fn is_authenticated(&self) -> bool {
        matches!(self, SessionState::Authenticated(_))
    }

    /// Turn a successful `/auth/me` body into a state. Anything without an id
    /// and an email is treated as signed out rather than an error.
    pub fn from_profile(body: &Value) -> Self {
        match parse_user(body) {
            Some(user) => SessionState::Authenticated(user),
            None => {
                log::warn!("/auth/me returned a body without id/email, treating as signed out");
                SessionState::Unauthenticated
            }
        }
    }
}

fn parse_user(body: &Value) -> Option<User> {
    let id = match body.get("id")? {
        Value::Number(n) => n.as_i64()?,
        Value::String(s) => s.trim().parse().ok()?,
        _ => return None,
    };
    let email = body.get("email")?.as_str()?.trim();
    if email.is_empty() {
        return None;
    }
    let text = |field: &str| body.get(field).and_then(Value::as_str).map(str::to_string);
    Some(User {
        id,
        email: email.to_string(),
        name: text("name"),
        picture: text("picture"),
    })
}

/// The single probe made when the app starts, and again on refetch
pub async fn fetch_session<A: FinanceApi + ?Sized>(api: &A) -> SessionState {
    match api.current_user().await {
        Ok(body) => {
            let state = SessionState::from_profile(&body);
            log::debug!("session resolved, authenticated: {}", state.is_authenticated());
            state
        }
        Err(e) => {
            log::debug!("session probe failed: {}", e);
            SessionState::Unauthenticated
        }
    }
}

/// Tell the server we are leaving; the local state is signed out whatever it says
pub async fn logout<A: FinanceApi + ?Sized>(api: &A) -> SessionState {
    if let Err(e) = api.logout().await {
        log::warn!("logout request failed: {}", e);
    }
    SessionState::Unauthenticated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::fake::FakeApi;
    use crate::ApiError;
    use serde_json::json;

    #[test]
    fn test_profile_with_id_and_email_authenticates() {
        let state = SessionState::from_profile(&json!({
            "id": 7,
            "email": "ana@example.com",
            "name": "Ana",
            "picture": "https://example.com/a.png"
        }));
        let user = state.user().unwrap();
        assert_eq!(user.id, 7);
        assert_eq!(user.name.as_deref(), Some("Ana"));
    }

    #[test]
    fn test_profile_missing_email_is_unauthenticated() {
        assert_eq!(SessionState::from_profile(&json!({"id": 7})), SessionState::Unauthenticated);
        assert_eq!(SessionState::from_profile(&json!({"id": 7, "email": ""})), SessionState::Unauthenticated);
        assert_eq!(SessionState::from_profile(&json!({"email": "a@b.c"})), SessionState::Unauthenticated);
        assert_eq!(SessionState::from_profile(&json!(null)), SessionState::Unauthenticated);
        assert_eq!(SessionState::from_profile(&json!({})), SessionState::Unauthenticated);
    }

    #[test]
    fn test_string_ids_are_accepted() {
        let state = SessionState::from_profile(&json!({"id": "12", "email": "a@b.c"}));
        assert_eq!(state.user().map(|u| u.id), Some(12));
    }

    #[tokio::test]
    async fn test_fetch_session_makes_one_request() {
        let api = FakeApi::new();
        *api.me.borrow_mut() = Some(Ok(json!({"id": 1, "email": "a@b.c"})));
        let state = fetch_session(&api).await;
        assert!(state.is_authenticated());
        assert_eq!(api.calls("me"), 1);
    }

    #[tokio::test]
    async fn test_failed_probe_is_unauthenticated() {
        let api = FakeApi::new();
        *api.me.borrow_mut() = Some(Err(ApiError::Network("offline".into())));
        assert_eq!(fetch_session(&api).await, SessionState::Unauthenticated);
    }

    #[tokio::test]
    async fn test_logout_swallows_server_errors() {
        let api = FakeApi::new();
        api.fail("logout", ApiError::Server { status: 500, detail: None });
        assert_eq!(logout(&api).await, SessionState::Unauthenticated);
        assert_eq!(api.calls("logout"), 1);
    }
}
