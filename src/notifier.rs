//! Notification dispatch.
//!
//! The notifier turns a `NotificationConfig` into a single HTTP
//! request and reports the outcome as a plain boolean. Configuration
//! problems are the only errors callers see; delivery problems are
//! folded into `Ok(false)`.

use crate::config::NotificationConfig;
use crate::core::{ConfigError, HttpMethod, NotificationRequest, Properties, Transport};
use std::sync::Arc;
use tracing::{debug, error, info, instrument, warn};

/// Dispatches notifications over an injected transport.
pub struct Notifier {
    transport: Arc<dyn Transport>,
}

impl Notifier {
    pub fn new(transport: Arc<dyn Transport>) -> Self {
        Self { transport }
    }

    /// Dispatches a notification for a named trigger.
    ///
    /// The trigger and execution data describe the event being
    /// reported. They are logged for operators but do not alter the
    /// request; the configured URL, method and payload already say
    /// everything the endpoint will receive.
    pub async fn notify(
        &self,
        trigger: &str,
        execution_data: &Properties,
        config: &NotificationConfig,
    ) -> Result<bool, ConfigError> {
        debug!(
            trigger,
            execution_keys = execution_data.len(),
            "dispatching notification"
        );
        self.send(config).await
    }

    /// Builds and executes the configured request.
    ///
    /// Returns `Ok(true)` when the endpoint answers with a 2xx status,
    /// `Ok(false)` for any other status or for a transport failure,
    /// and `Err` only when the configuration itself is unusable.
    #[instrument(skip(self, config), fields(url = %config.url, method = %config.method))]
    pub async fn send(&self, config: &NotificationConfig) -> Result<bool, ConfigError> {
        let request = build_request(config)?;

        match self.transport.execute(&request).await {
            Ok(status) if status.is_success() => {
                info!(status = status.as_u16(), "notification delivered");
                Ok(true)
            }
            Ok(status) => {
                warn!(
                    status = status.as_u16(),
                    "notification endpoint answered with a non-success status"
                );
                Ok(false)
            }
            Err(e) => {
                // Delivery failures are an outcome, not an error.
                error!(error = %e, "notification delivery failed");
                Ok(false)
            }
        }
    }
}

/// Validates the configuration and normalizes it into a request.
///
/// The body rides along only on methods that carry one, and the
/// content type only when there is a body to describe.
fn build_request(config: &NotificationConfig) -> Result<NotificationRequest, ConfigError> {
    if config.url.trim().is_empty() {
        return Err(ConfigError::InvalidUrl(config.url.clone()));
    }
    let method: HttpMethod = config.method.parse()?;

    let body = config
        .body
        .as_deref()
        .filter(|b| method.allows_body() && !b.is_empty())
        .map(str::to_string);
    let content_type = config
        .content_type
        .as_deref()
        .filter(|ct| body.is_some() && !ct.is_empty())
        .map(str::to_string);

    Ok(NotificationRequest {
        method,
        url: config.url.clone(),
        content_type,
        body,
    })
}
