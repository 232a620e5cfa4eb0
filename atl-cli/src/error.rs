//! JSON error envelope
//!
//! Every failure the binary reports ends up as an [`ApiError`], written to stderr as
//! `{"error": <kind>, "message": <text>, "retryAfter"?: <seconds>}`.

use atl_babel::ConversionError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Machine-readable error category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    ConfigError,
    ValidationError,
    AuthError,
    PermissionError,
    NotFound,
    RateLimit,
    Timeout,
    ServerError,
    ConversionError,
    UnknownError,
}

impl ErrorKind {
    /// Map an unsuccessful HTTP status to its category.
    pub fn from_status(status: u16) -> Self {
        match status {
            401 => ErrorKind::AuthError,
            403 => ErrorKind::PermissionError,
            404 => ErrorKind::NotFound,
            429 => ErrorKind::RateLimit,
            s if s >= 500 => ErrorKind::ServerError,
            _ => ErrorKind::UnknownError,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::ConfigError => "config_error",
            ErrorKind::ValidationError => "validation_error",
            ErrorKind::AuthError => "auth_error",
            ErrorKind::PermissionError => "permission_error",
            ErrorKind::NotFound => "not_found",
            ErrorKind::RateLimit => "rate_limit",
            ErrorKind::Timeout => "timeout",
            ErrorKind::ServerError => "server_error",
            ErrorKind::ConversionError => "conversion_error",
            ErrorKind::UnknownError => "unknown_error",
        }
    }

    /// Message used when the service body does not carry one.
    pub fn default_message(&self) -> &'static str {
        match self {
            ErrorKind::AuthError => "Authentication failed - check your credentials",
            ErrorKind::PermissionError => "Access denied - check your permissions",
            ErrorKind::NotFound => "Resource not found",
            ErrorKind::RateLimit => "Rate limit exceeded",
            ErrorKind::ServerError => "Atlassian service error",
            _ => "An unexpected error occurred",
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error reported to the user.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ApiError {
    #[serde(rename = "error")]
    pub kind: ErrorKind,
    pub message: String,
    #[serde(rename = "retryAfter", skip_serializing_if = "Option::is_none")]
    pub retry_after: Option<u64>,
}

#[derive(Deserialize)]
struct JiraErrorBody {
    #[serde(rename = "errorMessages", default)]
    error_messages: Vec<String>,
}

#[derive(Deserialize)]
struct ConfluenceErrorBody {
    #[serde(default)]
    errors: Vec<ConfluenceErrorItem>,
}

#[derive(Deserialize)]
struct ConfluenceErrorItem {
    #[serde(default)]
    title: String,
}

impl ApiError {
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        ApiError {
            kind,
            message: message.into(),
            retry_after: None,
        }
    }

    pub fn config(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ConfigError, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::ValidationError, message)
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::UnknownError, message)
    }

    pub fn timeout(seconds: u64) -> Self {
        Self::new(
            ErrorKind::Timeout,
            format!("Request timed out after {seconds} seconds"),
        )
    }

    /// Build the envelope for a non-success response.
    ///
    /// The message comes from Jira's `errorMessages[0]` or Confluence's `errors[0].title`
    /// when the body carries one. `retry_after` is only read for 429 responses.
    pub fn from_response(status: u16, retry_after: Option<&str>, body: &str) -> Self {
        let kind = ErrorKind::from_status(status);
        let message = service_message(body).unwrap_or_else(|| kind.default_message().to_string());
        let retry_after = match kind {
            ErrorKind::RateLimit => retry_after.and_then(|value| value.trim().parse().ok()),
            _ => None,
        };
        ApiError {
            kind,
            message,
            retry_after,
        }
    }

    /// Pretty JSON form written to stderr.
    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| {
            format!(
                "{{\"error\": \"{}\", \"message\": {:?}}}",
                self.kind, self.message
            )
        })
    }
}

fn service_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    let confluence = serde_json::from_str::<ConfluenceErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.errors.into_iter().next())
        .map(|item| item.title);
    let jira = serde_json::from_str::<JiraErrorBody>(body)
        .ok()
        .and_then(|parsed| parsed.error_messages.into_iter().next());
    confluence.or(jira)
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.kind, self.message)
    }
}

impl std::error::Error for ApiError {}

impl From<ConversionError> for ApiError {
    fn from(err: ConversionError) -> Self {
        ApiError::new(ErrorKind::ConversionError, err.to_string())
    }
}

impl From<atl_config::ConfigError> for ApiError {
    fn from(err: atl_config::ConfigError) -> Self {
        ApiError::config(format!("Failed to load configuration: {err}"))
    }
}

impl From<atl_config::ValidationError> for ApiError {
    fn from(err: atl_config::ValidationError) -> Self {
        ApiError::config(err.to_string())
    }
}

impl From<reqwest::Error> for ApiError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ApiError::new(ErrorKind::Timeout, "Request timed out");
        }
        ApiError::unknown(format!("request failed: {err}"))
    }
}

impl From<serde_json::Error> for ApiError {
    fn from(err: serde_json::Error) -> Self {
        ApiError::unknown(format!("failed to parse response: {err}"))
    }
}

impl From<std::io::Error> for ApiError {
    fn from(err: std::io::Error) -> Self {
        ApiError::unknown(err.to_string())
    }
}
