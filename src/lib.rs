//! webhook-notify - single-shot HTTP notification dispatch.
//!
//! This library reports an event to a remote endpoint with one
//! configurable HTTP request. Callers hand the [`Notifier`] a
//! [`NotificationConfig`] and get back a plain outcome: `Ok(true)` when
//! the endpoint answered with a 2xx status, `Ok(false)` when it did not
//! or could not be reached, and an error only when the configuration is
//! rejected before anything is sent.

pub mod cli;
pub mod config;
pub mod core;
pub mod notifier;
pub mod transport;

// Re-export the types most callers need.
pub use crate::config::NotificationConfig;
pub use crate::core::{
    ConfigError, HttpMethod, NotificationRequest, Properties, Transport, TransportError,
};
pub use crate::notifier::Notifier;
pub use crate::transport::HttpTransport;

#[cfg(feature = "test-utils")]
pub use crate::transport::MockTransport;
