//! Core domain types and the transport contract for webhook-notify
//!
//! This module defines the request model a notification is normalized
//! into, the error kinds the dispatcher distinguishes, and the trait
//! contract that lets tests substitute the HTTP layer.

use async_trait::async_trait;
use reqwest::StatusCode;
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// String-keyed JSON map used by host systems to hand over trigger
/// context and raw notifier properties.
pub type Properties = serde_json::Map<String, serde_json::Value>;

/// The HTTP methods a notification is allowed to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Delete,
}

impl HttpMethod {
    /// Whether a request with this method may carry a payload.
    pub fn allows_body(&self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put)
    }

    /// The canonical upper-case token for this method.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Delete => "DELETE",
        }
    }
}

impl FromStr for HttpMethod {
    type Err = ConfigError;

    /// Parses a method name case-insensitively. Anything outside
    /// GET/POST/PUT/DELETE is rejected.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_uppercase().as_str() {
            "GET" => Ok(HttpMethod::Get),
            "POST" => Ok(HttpMethod::Post),
            "PUT" => Ok(HttpMethod::Put),
            "DELETE" => Ok(HttpMethod::Delete),
            _ => Err(ConfigError::UnsupportedMethod(s.to_string())),
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<HttpMethod> for reqwest::Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => reqwest::Method::GET,
            HttpMethod::Post => reqwest::Method::POST,
            HttpMethod::Put => reqwest::Method::PUT,
            HttpMethod::Delete => reqwest::Method::DELETE,
        }
    }
}

/// A validated, normalized notification request handed to a transport.
///
/// The notifier guarantees that GET and DELETE requests never carry a
/// payload: for those methods `content_type` and `body` are `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct NotificationRequest {
    pub method: HttpMethod,
    pub url: String,
    /// Value for the `Content-Type` header, present only with a body.
    pub content_type: Option<String>,
    pub body: Option<String>,
}

/// Invalid or missing notifier parameters, detected before any network
/// call is made.
#[derive(Error, Debug, Clone)]
pub enum ConfigError {
    #[error("invalid URL: {0:?}")]
    InvalidUrl(String),

    #[error("unsupported HTTP method: {0:?}")]
    UnsupportedMethod(String),
}

/// Network or transport-level failure while executing a request.
#[derive(Error, Debug, Clone)]
pub enum TransportError {
    /// The wire request could not be constructed, e.g. the URL does
    /// not parse or the content type is not a valid header value.
    #[error("could not build request: {0}")]
    Request(String),

    /// The request went out but no usable response came back: connect
    /// failure, timeout, broken transfer.
    #[error("request failed: {0}")]
    Io(String),
}

/// Sends a single notification request and reports the response status.
///
/// Implementations perform exactly one request per call and surface
/// every network-level problem as a [`TransportError`]; judging the
/// status code is the caller's job.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Executes one HTTP request.
    ///
    /// # Returns
    /// * `Ok(StatusCode)` with the response status, whatever it is
    /// * `Err(TransportError)` if no response could be obtained
    async fn execute(&self, request: &NotificationRequest) -> Result<StatusCode, TransportError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_method_parses_case_insensitively() {
        assert_eq!("GET".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("post".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert_eq!("Put".parse::<HttpMethod>().unwrap(), HttpMethod::Put);
        assert_eq!("dElEtE".parse::<HttpMethod>().unwrap(), HttpMethod::Delete);
    }

    #[test]
    fn test_method_rejects_unsupported_names() {
        for name in ["PATCH", "HEAD", "OPTIONS", "TRACE", "", "GOT"] {
            let err = name.parse::<HttpMethod>().unwrap_err();
            assert!(
                matches!(&err, ConfigError::UnsupportedMethod(m) if m == name),
                "unexpected error for {:?}: {}",
                name,
                err
            );
        }
    }

    #[test]
    fn test_method_display_is_canonical() {
        assert_eq!("get".parse::<HttpMethod>().unwrap().to_string(), "GET");
        assert_eq!("delete".parse::<HttpMethod>().unwrap().to_string(), "DELETE");
    }

    #[test]
    fn test_only_post_and_put_allow_a_body() {
        assert!(HttpMethod::Post.allows_body());
        assert!(HttpMethod::Put.allows_body());
        assert!(!HttpMethod::Get.allows_body());
        assert!(!HttpMethod::Delete.allows_body());
    }

    #[test]
    fn test_error_messages_name_the_offending_value() {
        let err = ConfigError::InvalidUrl("   ".to_string());
        assert_eq!(err.to_string(), r#"invalid URL: "   ""#);

        let err = ConfigError::UnsupportedMethod("PATCH".to_string());
        assert_eq!(err.to_string(), r#"unsupported HTTP method: "PATCH""#);
    }
}
