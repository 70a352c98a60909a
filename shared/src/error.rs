use serde::Deserialize;
use thiserror::Error;

/// Failure of a call against the backend
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ApiError {
    /// 401; the HTTP client has already navigated to the login page
    #[error("Not authenticated")]
    Unauthorized,
    #[error("Network error: {0}")]
    Network(String),
    #[error("Server error {status}{}", .detail.as_ref().map(|d| format!(": {}", d)).unwrap_or_default())]
    Server { status: u16, detail: Option<String> },
    #[error("Failed to parse response: {0}")]
    Decode(String),
    /// The page that issued the call went away before it resolved
    #[error("Request cancelled")]
    Cancelled,
}

/// FastAPI-style error body: `{"detail": "..."}`
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

impl ApiError {
    /// Build a server error from a non-2xx status and its raw body
    pub fn from_response(status: u16, body: &str) -> Self {
        if status == 401 {
            return ApiError::Unauthorized;
        }
        ApiError::Server {
            status,
            detail: extract_detail(body),
        }
    }

    /// Server-provided detail when there is one, otherwise the fallback
    pub fn user_message(&self, fallback: &str) -> String {
        match self {
            ApiError::Server {
                detail: Some(detail),
                ..
            } => detail.clone(),
            _ => fallback.to_string(),
        }
    }

    pub fn is_cancelled(&self) -> bool {
        matches!(self, ApiError::Cancelled)
    }
}

fn extract_detail(body: &str) -> Option<String> {
    let parsed: ErrorBody = serde_json::from_str(body).ok()?;
    match parsed.detail {
        serde_json::Value::String(detail) if !detail.is_empty() => Some(detail),
        // Validation errors come back as a list of objects with a "msg" field
        serde_json::Value::Array(items) => items
            .iter()
            .find_map(|item| item.get("msg").and_then(|msg| msg.as_str()))
            .map(str::to_string),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_response_extracts_detail() {
        let err = ApiError::from_response(409, r#"{"detail":"Budget for 'groceries' already exists"}"#);
        assert_eq!(
            err,
            ApiError::Server {
                status: 409,
                detail: Some("Budget for 'groceries' already exists".to_string())
            }
        );
        assert_eq!(err.user_message("Failed to create budget"), "Budget for 'groceries' already exists");
    }

    #[test]
    fn test_from_response_handles_validation_lists() {
        let err = ApiError::from_response(422, r#"{"detail":[{"loc":["body","amount"],"msg":"field required"}]}"#);
        assert_eq!(err.user_message("x"), "field required");
    }

    #[test]
    fn test_html_body_falls_back_to_generic_message() {
        let err = ApiError::from_response(500, "<html>Internal Server Error</html>");
        assert_eq!(err.user_message("Something went wrong"), "Something went wrong");
        assert_eq!(err.to_string(), "Server error 500");
    }

    #[test]
    fn test_401_maps_to_unauthorized() {
        assert_eq!(ApiError::from_response(401, r#"{"detail":"Not authenticated"}"#), ApiError::Unauthorized);
        assert_eq!(ApiError::Network("offline".into()).user_message("Failed to delete"), "Failed to delete");
    }
}
