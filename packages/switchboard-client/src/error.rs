//! Typed errors for the switchboard client.

use serde::Deserialize;
use thiserror::Error;

/// Result type for switchboard client operations.
pub type Result<T> = std::result::Result<T, SwitchboardError>;

/// Structured error body returned by the backend: `{message, url?}`.
#[derive(Debug, Clone, Deserialize)]
pub struct ApiErrorBody {
    pub message: Option<String>,
    pub url: Option<String>,
}

/// Switchboard client errors.
///
/// The backend distinguishes two failure classes and so does the UI:
/// a request that never produced a response renders as "Connection error",
/// while an error status with a `{message, url?}` body renders the backend
/// message verbatim.
#[derive(Debug, Error)]
pub enum SwitchboardError {
    /// The request produced no HTTP response (DNS, refused, timeout).
    #[error("Connection error")]
    Connection(#[source] reqwest::Error),

    /// The backend answered with an error status.
    #[error("{message}")]
    Api {
        status: u16,
        message: String,
        url: Option<String>,
    },

    /// The response body did not match the expected shape.
    #[error("Parse error: {0}")]
    Parse(String),
}

impl SwitchboardError {
    /// Build an `Api` error from an error response, preferring the backend's
    /// structured `{message, url?}` body over the bare status reason.
    pub(crate) async fn from_response(resp: reqwest::Response) -> Self {
        let status = resp.status();
        let reason = status.canonical_reason();
        let body = resp.text().await.unwrap_or_default();
        Self::api_error_from_parts(status.as_u16(), reason, &body)
    }

    pub(crate) fn api_error_from_parts(status: u16, reason: Option<&str>, body: &str) -> Self {
        let fallback = || reason.unwrap_or("Request failed").to_string();
        match serde_json::from_str::<ApiErrorBody>(body) {
            Ok(parsed) => SwitchboardError::Api {
                status,
                message: parsed.message.unwrap_or_else(fallback),
                url: parsed.url,
            },
            Err(_) => SwitchboardError::Api {
                status,
                message: fallback(),
                url: None,
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn structured_body_wins_over_status_reason() {
        let err = SwitchboardError::api_error_from_parts(
            400,
            Some("Bad Request"),
            r#"{"message":"file is too large","url":"https://example.org/limits"}"#,
        );
        match err {
            SwitchboardError::Api { status, message, url } => {
                assert_eq!(status, 400);
                assert_eq!(message, "file is too large");
                assert_eq!(url.as_deref(), Some("https://example.org/limits"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn unstructured_body_falls_back_to_status_reason() {
        let err = SwitchboardError::api_error_from_parts(502, Some("Bad Gateway"), "<html>oops</html>");
        match err {
            SwitchboardError::Api { message, url, .. } => {
                assert_eq!(message, "Bad Gateway");
                assert_eq!(url, None);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        assert_eq!(
            SwitchboardError::api_error_from_parts(599, None, "").to_string(),
            "Request failed"
        );
    }

    #[test]
    fn body_with_url_but_no_message_keeps_the_reason() {
        let err = SwitchboardError::api_error_from_parts(
            403,
            Some("Forbidden"),
            r#"{"url":"https://example.org/login"}"#,
        );
        match err {
            SwitchboardError::Api { message, url, .. } => {
                assert_eq!(message, "Forbidden");
                assert_eq!(url.as_deref(), Some("https://example.org/login"));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }
}
