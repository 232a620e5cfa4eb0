//! Blocking HTTP gateway to the Atlassian REST APIs
//!
//! Adapters talk to a [`Transport`] so they can be exercised against canned responses.
//! [`HttpGateway`] is the real one: basic auth, JSON headers, HTTPS only, and debug
//! logging through `tracing` with the credentials redacted.

use crate::error::ApiError;
use atl_config::AtlConfig;
use reqwest::blocking::Client;
use reqwest::header::{HeaderMap, ACCEPT, CONTENT_TYPE, RETRY_AFTER};
use serde::de::DeserializeOwned;
use std::fmt;
use std::time::Duration;

/// Default request timeout, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

const RATE_LIMIT_HEADERS: [&str; 3] = ["X-RateLimit-Remaining", "X-RateLimit-Reset", "Retry-After"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl fmt::Display for Method {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Method::Get => f.write_str("GET"),
            Method::Post => f.write_str("POST"),
        }
    }
}

/// A request an adapter wants sent.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub url: String,
    pub body: Option<serde_json::Value>,
}

impl ApiRequest {
    pub fn get(url: impl Into<String>) -> Self {
        ApiRequest {
            method: Method::Get,
            url: url.into(),
            body: None,
        }
    }

    pub fn post(url: impl Into<String>, body: serde_json::Value) -> Self {
        ApiRequest {
            method: Method::Post,
            url: url.into(),
            body: Some(body),
        }
    }
}

/// Status, body and the one header the error envelope needs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
    pub retry_after: Option<String>,
}

impl ApiResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        ApiResponse {
            status,
            body: body.into(),
            retry_after: None,
        }
    }

    /// Pass the response through when it has the expected status, otherwise
    /// turn it into the matching error envelope.
    pub fn expect_status(self, expected: u16) -> Result<Self, ApiError> {
        if self.status == expected {
            Ok(self)
        } else {
            Err(ApiError::from_response(
                self.status,
                self.retry_after.as_deref(),
                &self.body,
            ))
        }
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, ApiError> {
        Ok(serde_json::from_str(&self.body)?)
    }
}

/// Sends requests somewhere and returns what came back.
pub trait Transport {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError>;
}

impl<T: Transport + ?Sized> Transport for &T {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        (**self).send(request)
    }
}

/// Reject anything that is not an `https://` URL.
pub fn ensure_https(url: &str) -> Result<(), ApiError> {
    match reqwest::Url::parse(url) {
        Ok(parsed) if parsed.scheme() == "https" => Ok(()),
        _ => Err(ApiError::config("HTTPS is required for all API requests")),
    }
}

/// Authenticated reqwest client for one Atlassian site.
pub struct HttpGateway {
    client: Client,
    email: String,
    token: String,
    timeout_secs: u64,
}

impl HttpGateway {
    pub fn new(
        email: impl Into<String>,
        token: impl Into<String>,
        timeout_secs: u64,
    ) -> Result<Self, ApiError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(timeout_secs))
            .build()?;
        Ok(HttpGateway {
            client,
            email: email.into(),
            token: token.into(),
            timeout_secs,
        })
    }

    pub fn from_config(config: &AtlConfig) -> Result<Self, ApiError> {
        Self::new(
            config.email.clone(),
            config.token.clone(),
            config.http.timeout_secs,
        )
    }
}

impl fmt::Debug for HttpGateway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpGateway")
            .field("email", &self.email)
            .field("token", &"[REDACTED]")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

impl Transport for HttpGateway {
    fn send(&self, request: &ApiRequest) -> Result<ApiResponse, ApiError> {
        ensure_https(&request.url)?;

        tracing::debug!(method = %request.method, url = %request.url, "sending request");
        tracing::debug!("Authorization: Basic [REDACTED]");

        let builder = match request.method {
            Method::Get => self.client.get(&request.url),
            Method::Post => self.client.post(&request.url),
        };
        let mut builder = builder
            .basic_auth(&self.email, Some(&self.token))
            .header(ACCEPT, "application/json")
            .header(CONTENT_TYPE, "application/json");
        if let Some(body) = &request.body {
            builder = builder.body(serde_json::to_string(body)?);
        }

        let response = builder.send().map_err(|err| {
            tracing::debug!(error = %err, "request failed");
            if err.is_timeout() {
                ApiError::timeout(self.timeout_secs)
            } else {
                ApiError::from(err)
            }
        })?;

        let status = response.status();
        tracing::debug!(status = %status, "response received");
        log_rate_limit_headers(response.headers());

        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response.text()?;

        Ok(ApiResponse {
            status: status.as_u16(),
            body,
            retry_after,
        })
    }
}

fn log_rate_limit_headers(headers: &HeaderMap) {
    for name in RATE_LIMIT_HEADERS {
        if let Some(value) = headers.get(name).and_then(|v| v.to_str().ok()) {
            tracing::debug!(header = name, value, "rate limit");
        }
    }
}
