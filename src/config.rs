//! Configuration management for webhook-notify
//!
//! This module defines `NotificationConfig`, the description of a
//! single notification, and the binary-level `Config` that wraps it.
//! It uses the `figment` crate to load configuration from a
//! `webhook-notify.toml` file and merge it with environment variables
//! and command-line arguments.

use crate::cli::Cli;
use crate::core::Properties;
use anyhow::Result;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

/// The configuration file consulted when no `--config` flag is given.
pub const DEFAULT_CONFIG_FILE: &str = "webhook-notify.toml";

fn default_method() -> String {
    "POST".to_string()
}

/// Describes a single notification: where to send it and what it
/// carries. Immutable per invocation; validation happens when the
/// notifier is asked to send, not here.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct NotificationConfig {
    /// Target URL for the request. Must be non-empty after trimming.
    #[serde(default)]
    pub url: String,
    /// HTTP method name, case-insensitive: GET, POST, PUT or DELETE.
    #[serde(default = "default_method")]
    pub method: String,
    /// Value for the `Content-Type` header, applied only when a body
    /// is sent. Host property maps may also spell this `contentType`;
    /// see [`NotificationConfig::from_properties`]. Config files use
    /// snake_case.
    #[serde(default)]
    pub content_type: Option<String>,
    /// Request payload, used by POST and PUT only.
    #[serde(default)]
    pub body: Option<String>,
}

impl NotificationConfig {
    /// Binds a raw property map handed over by a host system.
    ///
    /// Values must be JSON strings; anything else counts as absent. A
    /// missing method falls back to POST, a missing URL to the empty
    /// string, which the notifier then rejects. Binding is lenient,
    /// validation is not.
    pub fn from_properties(props: &Properties) -> Self {
        let get = |key: &str| props.get(key).and_then(|v| v.as_str()).map(str::to_string);
        Self {
            url: get("url").unwrap_or_default(),
            method: get("method").unwrap_or_else(default_method),
            content_type: get("content_type").or_else(|| get("contentType")),
            body: get("body"),
        }
    }
}

// Provide a default implementation for tests and easy setup.
impl Default for NotificationConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            method: default_method(),
            content_type: None,
            body: None,
        }
    }
}

/// The main configuration struct for the binary.
#[derive(Debug, Deserialize, Serialize, Clone)]
pub struct Config {
    /// The logging filter, e.g. "info" or "webhook_notify=debug".
    pub log_level: String,
    /// The notification to dispatch.
    pub notification: NotificationConfig,
}

impl Config {
    /// Loads the configuration by layering sources: defaults, the TOML
    /// file, environment variables, and command-line arguments (each
    /// later source wins over the earlier ones).
    pub fn load(cli: &Cli) -> Result<Self> {
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));

        if let Some(path) = &cli.config {
            if !path.exists() {
                anyhow::bail!("config file not found at {}", path.display());
            }
            figment = figment.merge(Toml::file(path));
        } else {
            figment = figment.merge(Toml::file(DEFAULT_CONFIG_FILE));
        }

        // Allow overriding with environment variables, e.g.
        // WEBHOOK_NOTIFY_LOG_LEVEL=debug or
        // WEBHOOK_NOTIFY_NOTIFICATION__URL=https://example.com/hook
        let config: Config = figment
            .merge(Env::prefixed("WEBHOOK_NOTIFY_").split("__"))
            .merge(cli.clone())
            .extract()?;
        Ok(config)
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            notification: NotificationConfig::default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(pairs: &[(&str, serde_json::Value)]) -> Properties {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.clone()))
            .collect()
    }

    #[test]
    fn test_from_properties_binds_all_fields() {
        let props = props(&[
            ("url", json!("https://example.com/hook")),
            ("method", json!("put")),
            ("content_type", json!("text/plain")),
            ("body", json!("job done")),
        ]);

        let config = NotificationConfig::from_properties(&props);
        assert_eq!(config.url, "https://example.com/hook");
        assert_eq!(config.method, "put");
        assert_eq!(config.content_type.as_deref(), Some("text/plain"));
        assert_eq!(config.body.as_deref(), Some("job done"));
    }

    #[test]
    fn test_from_properties_defaults_method_to_post() {
        let props = props(&[("url", json!("https://example.com/hook"))]);

        let config = NotificationConfig::from_properties(&props);
        assert_eq!(config.method, "POST");
        assert_eq!(config.content_type, None);
        assert_eq!(config.body, None);
    }

    #[test]
    fn test_from_properties_accepts_camel_case_content_type() {
        let props = props(&[
            ("url", json!("https://example.com/hook")),
            ("contentType", json!("application/json")),
        ]);

        let config = NotificationConfig::from_properties(&props);
        assert_eq!(config.content_type.as_deref(), Some("application/json"));
    }

    #[test]
    fn test_from_properties_ignores_non_string_values() {
        let props = props(&[("url", json!(42)), ("method", json!(["GET"]))]);

        let config = NotificationConfig::from_properties(&props);
        // A lenient binding: the bad URL becomes empty and is rejected
        // later by the notifier's validation.
        assert_eq!(config.url, "");
        assert_eq!(config.method, "POST");
    }

    #[test]
    fn test_default_config_is_post_without_url() {
        let config = Config::default();
        assert_eq!(config.log_level, "info");
        assert_eq!(config.notification.url, "");
        assert_eq!(config.notification.method, "POST");
    }
}
