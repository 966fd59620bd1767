//! Transport implementations.
//!
//! `HttpTransport` is the production transport: it translates a
//! `NotificationRequest` into a reqwest call and hands back the bare
//! status code. `MockTransport` (behind the `test-utils` feature)
//! substitutes for it in tests.

use crate::core::{NotificationRequest, Transport, TransportError};
use async_trait::async_trait;
use reqwest::{header::CONTENT_TYPE, StatusCode};
use std::time::Duration;

/// Transport that performs real HTTP requests through a
/// `reqwest::Client`.
///
/// The client pools connections, so one `HttpTransport` can be shared
/// across any number of invocations. Timeout policy lives here, not in
/// the notifier.
pub struct HttpTransport {
    client: reqwest::Client,
    timeout: Duration,
}

impl HttpTransport {
    const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Creates a transport with its own client and the default
    /// 10 second per-request timeout.
    pub fn new() -> Self {
        Self::with_client(reqwest::Client::new())
    }

    /// Creates a transport on top of an existing client, so the
    /// connection pool can be shared with the rest of the host.
    pub fn with_client(client: reqwest::Client) -> Self {
        Self {
            client,
            timeout: Self::DEFAULT_TIMEOUT,
        }
    }

    /// Replaces the per-request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Translates the normalized request into a wire request. URL or
    /// header values that reqwest cannot represent surface here.
    fn to_wire(&self, request: &NotificationRequest) -> Result<reqwest::Request, TransportError> {
        let mut builder = self
            .client
            .request(request.method.into(), request.url.as_str())
            .timeout(self.timeout);

        if let Some(body) = &request.body {
            builder = builder.body(body.clone());
            if let Some(content_type) = &request.content_type {
                builder = builder.header(CONTENT_TYPE, content_type.as_str());
            }
        }

        builder
            .build()
            .map_err(|e| TransportError::Request(e.to_string()))
    }
}

impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn execute(&self, request: &NotificationRequest) -> Result<StatusCode, TransportError> {
        let wire = self.to_wire(request)?;
        let response = self
            .client
            .execute(wire)
            .await
            .map_err(|e| TransportError::Io(e.to_string()))?;
        Ok(response.status())
    }
}

/// Scripted transport for tests: records every request it is handed
/// and replays queued responses, in order.
#[cfg(feature = "test-utils")]
pub struct MockTransport {
    requests: std::sync::Mutex<Vec<NotificationRequest>>,
    responses: std::sync::Mutex<std::collections::VecDeque<Result<StatusCode, TransportError>>>,
}

#[cfg(feature = "test-utils")]
impl MockTransport {
    pub fn new() -> Self {
        Self {
            requests: std::sync::Mutex::new(Vec::new()),
            responses: std::sync::Mutex::new(std::collections::VecDeque::new()),
        }
    }

    /// Convenience constructor for the common single-call case.
    pub fn returning(status: StatusCode) -> Self {
        let transport = Self::new();
        transport.push_status(status);
        transport
    }

    /// Queues a status response.
    pub fn push_status(&self, status: StatusCode) {
        self.responses.lock().unwrap().push_back(Ok(status));
    }

    /// Queues a transport failure.
    pub fn push_error(&self, error: TransportError) {
        self.responses.lock().unwrap().push_back(Err(error));
    }

    /// Every request executed so far, in order.
    pub fn requests(&self) -> Vec<NotificationRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[cfg(feature = "test-utils")]
impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(feature = "test-utils")]
#[async_trait]
impl Transport for MockTransport {
    async fn execute(&self, request: &NotificationRequest) -> Result<StatusCode, TransportError> {
        self.requests.lock().unwrap().push(request.clone());
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(TransportError::Io("no scripted response left".to_string())))
    }
}
